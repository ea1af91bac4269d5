//! Information messages with optional actions.
//!
//! The messages will ignore the newlines inside the string and display all text on one line.
//! At the bottom of the message, the extension name will be displayed.

use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::JsValue;

/// Action button that will appear on a message.
pub struct Action<'a, T> {
	/// Identifier that will be returned if the action in selected.
	pub id: T,
	/// Title of the button.
	pub title: &'a str,
	/// Whether the action will be selected as default if the message is closed.
	/// This option only works for modal messages and is otherwise ignored.
	pub is_close_affordance: bool,
}

#[derive(Clone, Copy)]
enum Kind {
	Info,
	Warning,
	Error,
}

/// Builder for configuring messages. Use [`Message::new`] to create.
#[must_use]
pub struct Builder<'a, T> {
	message: &'a str,
	kind: Kind,
	modal: bool,
	items: Vec<Action<'a, T>>,
}
impl<'a, T: Serialize+DeserializeOwned> Builder<'a, T> {
	/// Use a orange warning icon.
	pub fn warning(mut self) -> Self {
		self.kind = Kind::Warning;
		self
	}

	/// Use a red error icon.
	pub fn error(mut self) -> Self {
		self.kind = Kind::Error;
		self
	}

	/// Make message modal, blocking the rest of the editor until the user responds.
	pub fn modal(mut self) -> Self {
		self.modal = true;
		self
	}

	/// Add action buttons to the message.
	pub fn items(mut self, items: impl IntoIterator<Item=Action<'a, T>>) -> Self {
		self.items.extend(items);
		self
	}

	/// Add an action button to the message.
	/// See [`Action`] for the meaning of the arguments.
	pub fn item(self, id: T, title: &'a str, is_close_affordance: bool) -> Self {
		self.items(std::iter::once(Action { id, title, is_close_affordance }))
	}

	/// Display the message and wait until it is dismissed.
	/// Returns the id of the selected action, if any.
	pub async fn show(self) -> Option<T> {
		let options = JsValue::from_serde(&vscode_sys::window::ShowMessageOptions { modal: self.modal }).ok()?;
		let items = self
			.items
			.into_iter()
			.filter_map(|item| {
				JsValue::from_serde(&vscode_sys::window::ShowMessageItem {
					is_close_affordance: item.is_close_affordance,
					title: item.title,
					id: item.id,
				})
				.ok()
			})
			.collect();
		let show = match self.kind {
			Kind::Info => vscode_sys::window::show_information_message,
			Kind::Warning => vscode_sys::window::show_warning_message,
			Kind::Error => vscode_sys::window::show_error_message,
		};
		let selected = show(self.message, &options, items).await;
		selected.into_serde::<vscode_sys::ItemRet<T>>().ok().map(|item| item.id)
	}
}

/// Info message provided by the VS Code API.
///
/// See [module documentation](index.html) for details.
pub struct Message {
	_a: (),
}

impl Message {
	/// Create a new builder to configure the message.
	pub fn new<T>(message: &str) -> Builder<T> {
		Builder { message, kind: Kind::Info, modal: false, items: Vec::new() }
	}
}
