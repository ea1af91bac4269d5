//! Tabs with custom interface built on HTML/CSS/JS.
//!
//! See also the [official webview tutorial](https://code.visualstudio.com/api/extension-guides/webview).

use crate::{error::ResultExt, Column, R};
use futures::{
	channel::{mpsc, oneshot}, Stream
};
use serde::Serialize;
use std::{
	future::Future, pin::Pin, task::{Context, Poll}
};
use wasm_bindgen::{closure::Closure, JsValue};

/// Builder for configurating webviews. See [module documentation](index.html) for details.
#[must_use]
pub struct Builder<'a> {
	view_type: &'a str,
	title: &'a str,
	view_column: Column,
	preserve_focus: bool,
	enable_scripts: bool,
	enable_find_widget: bool,
	retain_context_when_hidden: bool,
}
impl<'a> Builder<'a> {
	/// Do not focus the newly created webview.
	pub fn preserve_focus(mut self) -> Self {
		self.preserve_focus = true;
		self
	}

	/// Allow JavaScript to run.
	pub fn enable_scripts(mut self) -> Self {
		self.enable_scripts = true;
		self
	}

	/// Enabled the find window available under the Ctrl+F shortcut.
	pub fn enable_find_widget(mut self) -> Self {
		self.enable_find_widget = true;
		self
	}

	/// Do not destroy webview state when the tab stops to be visible.
	/// Required if the page keeps state that can't be reconstructed from HTML alone, like a running game.
	pub fn retain_context_when_hidden(mut self) -> Self {
		self.retain_context_when_hidden = true;
		self
	}

	/// Spawn the webview.
	pub fn create(self) -> WebviewMeta {
		let panel = vscode_sys::window::create_webview_panel(
			self.view_type,
			self.title,
			vscode_sys::window::CreateWebviewPanelShowOptions {
				preserve_focus: self.preserve_focus,
				view_column: self.view_column.as_native(),
			},
			vscode_sys::window::CreateWebviewPanelOptions {
				general: vscode_sys::window::WebviewOptions { enable_command_uris: false, enable_scripts: self.enable_scripts },
				panel: vscode_sys::window::WebviewPanelOptions {
					enable_find_widget: self.enable_find_widget,
					retain_context_when_hidden: self.retain_context_when_hidden,
				},
			},
		);
		let (message_tx, message_rx) = mpsc::unbounded();
		let on_message = Closure::wrap(Box::new(move |message: JsValue| {
			let _ = message_tx.unbounded_send(message);
		}) as Box<dyn FnMut(JsValue)>);
		panel.webview().on_did_receive_message(&on_message.into_js_value());
		let (dispose_tx, dispose_rx) = oneshot::channel();
		let on_dispose = Closure::once_into_js(move || {
			let _ = dispose_tx.send(());
		});
		panel.on_did_dispose(&on_dispose);
		WebviewMeta { webview: Webview { panel }, listener: Listener { rx: message_rx }, disposer: Disposer { rx: dispose_rx } }
	}
}

/// Webview provided by the VS Code API.
///
/// Cloning creates another handle to the same panel. Handles remain usable after the panel is
/// disposed, although calls will then have no effect.
#[derive(Clone)]
pub struct Webview {
	panel: vscode_sys::WebviewPanel,
}
impl Webview {
	/// Create a new builder to configure the webview.
	/// View type is a panel type identifier.
	pub fn new<'a>(view_type: &'a str, title: &'a str, view_column: impl Into<Column>) -> Builder<'a> {
		Builder {
			view_type,
			title,
			view_column: view_column.into(),
			preserve_focus: false,
			enable_scripts: false,
			enable_find_widget: false,
			retain_context_when_hidden: false,
		}
	}

	/// Set the HTML content. This reloads the page, resetting all of its state.
	pub fn set_html(&self, html: &str) {
		self.panel.webview().set_html(html);
	}

	/// Set the title of the tab.
	pub fn set_title(&self, title: &str) {
		self.panel.set_title(title);
	}

	/// Send a message which can be [received by the JS inside the webview](https://code.visualstudio.com/api/extension-guides/webview#passing-messages-from-an-extension-to-a-webview).
	///
	/// Messages sent while the webview is hidden and its context is not retained are dropped by VS Code.
	pub fn post_message(&self, message: &impl Serialize) -> R<()> {
		let message = JsValue::from_serde(message).wrap("could not serialize a webview message")?;
		drop(self.panel.webview().post_message(message));
		Ok(())
	}

	/// Show the webview in the given view column.
	pub fn reveal(&self, view_column: impl Into<Column>, preserve_focus: bool) {
		self.panel.reveal(view_column.into().as_native(), preserve_focus);
	}

	/// Close the webview.
	pub fn dispose(&self) {
		self.panel.dispose();
	}
}

/// The products of creating a webview.
///
/// Aside from the actual webview, also contains the event stream and the dispose future.
pub struct WebviewMeta {
	/// The created webview.
	pub webview: Webview,
	/// A stream of messages sent by [JS inside the webview](https://code.visualstudio.com/api/extension-guides/webview#passing-messages-from-a-webview-to-an-extension).
	pub listener: Listener,
	/// A future that will yield a value when the webview is destroyed.
	pub disposer: Disposer,
}

/// A stream of messages sent by [JS inside the webview](https://code.visualstudio.com/api/extension-guides/webview#passing-messages-from-a-webview-to-an-extension).
pub struct Listener {
	rx: mpsc::UnboundedReceiver<JsValue>,
}

impl Stream for Listener {
	type Item = JsValue;

	fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>> {
		Pin::new(&mut self.rx).poll_next(cx)
	}
}

/// A future that will yield a value when the webview is destroyed.
pub struct Disposer {
	rx: oneshot::Receiver<()>,
}

impl Future for Disposer {
	type Output = ();

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		Pin::new(&mut self.rx).poll(cx).map(|_| ())
	}
}
