//! Selecting one of the given options.

use js_sys::Array;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::JsValue;

/// Builder object for an item that can be selected.
#[must_use]
pub struct Item<T> {
	description: Option<String>,
	detail: Option<String>,
	label: String,
	picked: bool,
	id: T,
}
impl<T> Item<T> {
	/// Create a new item with the given ID and label.
	pub fn new(id: T, label: impl Into<String>) -> Item<T> {
		Item { description: None, detail: None, label: label.into(), picked: false, id }
	}

	/// Set description, displayed in lighter font beside the label.
	pub fn description(mut self, x: impl Into<String>) -> Self {
		self.description = Some(x.into());
		self
	}

	/// Set detail, displayed in smaller and lighter font below the label.
	pub fn detail(mut self, x: impl Into<String>) -> Self {
		self.detail = Some(x.into());
		self
	}

	/// Mark the item as the current choice.
	pub fn picked(mut self, picked: bool) -> Self {
		self.picked = picked;
		self
	}
}

/// Builder for configuring quick picks. Use [`QuickPick::new`] to create.
#[must_use]
pub struct Builder<'a, T> {
	ignore_focus_out: bool,
	match_on_description: bool,
	placeholder: Option<&'a str>,
	items: Vec<Item<T>>,
}
impl<'a, T: Serialize+DeserializeOwned> Builder<'a, T> {
	/// Do not make the quick pick disappear when user breaks focus.
	pub fn ignore_focus_out(mut self) -> Self {
		self.ignore_focus_out = true;
		self
	}

	/// When user types a filter, match it against the description as well as the label.
	pub fn match_on_description(mut self) -> Self {
		self.match_on_description = true;
		self
	}

	/// Set a placeholder.
	pub fn placeholder(mut self, x: &'a str) -> Self {
		self.placeholder = Some(x);
		self
	}

	/// Add items to the selection.
	pub fn items(mut self, items: impl IntoIterator<Item=Item<T>>) -> Self {
		self.items.extend(items);
		self
	}

	/// Display the quick pick and wait for the user to choose.
	/// Returns `None` if the quick pick was dismissed.
	pub async fn show(self) -> Option<T> {
		let items = Array::new();
		for item in self.items {
			let raw = JsValue::from_serde(&vscode_sys::window::ShowQuickPickItem {
				detail: item.detail.as_deref(),
				description: item.description.as_deref(),
				always_show: false,
				label: &item.label,
				id: item.id,
				picked: item.picked,
			});
			if let Ok(raw) = raw {
				items.push(&raw);
			}
		}
		let options = vscode_sys::window::ShowQuickPickOptions {
			can_pick_many: false,
			ignore_focus_out: self.ignore_focus_out,
			match_on_description: self.match_on_description,
			match_on_detail: false,
			place_holder: self.placeholder,
		};
		let item = vscode_sys::window::show_quick_pick(&items, options).await;
		item.into_serde::<vscode_sys::ItemRet<T>>().ok().map(|item| item.id)
	}
}

/// Quick pick provided by the VS Code API.
///
/// See [module documentation](index.html) for details.
pub struct QuickPick {
	_a: (),
}

impl QuickPick {
	/// Create a new builder to configure the quick pick.
	pub fn new<T>() -> Builder<'static, T> {
		Builder { ignore_focus_out: false, match_on_description: false, placeholder: None, items: Vec::new() }
	}
}
