macro_rules! wasm_abi_serde {
	($t:ty) => {
		impl wasm_bindgen::convert::IntoWasmAbi for $t {
			type Abi = <wasm_bindgen::JsValue as wasm_bindgen::convert::IntoWasmAbi>::Abi;

			fn into_abi(self) -> Self::Abi {
				wasm_bindgen::JsValue::from_serde(&self).unwrap_or(wasm_bindgen::JsValue::UNDEFINED).into_abi()
			}
		}

		impl wasm_bindgen::describe::WasmDescribe for $t {
			fn describe() {
				<wasm_bindgen::JsValue as wasm_bindgen::describe::WasmDescribe>::describe()
			}
		}
	};
}
macro_rules! wasm_abi_enumi32 {
	($t:ty) => {
		impl wasm_bindgen::convert::IntoWasmAbi for $t {
			type Abi = <i32 as wasm_bindgen::convert::IntoWasmAbi>::Abi;

			fn into_abi(self) -> Self::Abi {
				self as i32
			}
		}

		impl wasm_bindgen::describe::WasmDescribe for $t {
			fn describe() {
				<i32 as wasm_bindgen::describe::WasmDescribe>::describe()
			}
		}
	};
}

use serde::Deserialize;
use std::{
	future::Future, marker::PhantomData, pin::Pin, task::{Context, Poll}
};
use wasm_bindgen::{prelude::*, JsCast};

/// A `PromiseLike` returned by the VS Code API, converted to a Rust value once resolved.
/// Rejections are passed to the conversion the same way resolutions are.
pub struct Thenable<T: Thenability> {
	inner: wasm_bindgen_futures::JsFuture,
	phantom: PhantomData<T>,
}

impl<T: Thenability> Future for Thenable<T> {
	type Output = T;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context) -> Poll<Self::Output> {
		Pin::new(&mut self.inner).poll(cx).map(|x| {
			Thenability::convert(match x {
				Ok(x) => x,
				Err(x) => x,
			})
		})
	}
}
impl<T: Thenability> wasm_bindgen::describe::WasmDescribe for Thenable<T> {
	fn describe() {
		<js_sys::Promise as wasm_bindgen::describe::WasmDescribe>::describe()
	}
}
impl<T: Thenability> wasm_bindgen::convert::FromWasmAbi for Thenable<T> {
	type Abi = <js_sys::Promise as wasm_bindgen::convert::FromWasmAbi>::Abi;

	unsafe fn from_abi(js: Self::Abi) -> Self {
		let promise = <js_sys::Promise as wasm_bindgen::convert::FromWasmAbi>::from_abi(js);
		Thenable { inner: wasm_bindgen_futures::JsFuture::from(promise), phantom: PhantomData }
	}
}

pub trait Thenability: Unpin {
	fn convert(x: JsValue) -> Self;
}
impl Thenability for () {
	fn convert(_: JsValue) -> Self {
	}
}
impl Thenability for bool {
	fn convert(x: JsValue) -> Self {
		x.as_bool().unwrap_or(false)
	}
}
impl Thenability for JsValue {
	fn convert(x: JsValue) -> Self {
		x.unchecked_into()
	}
}
impl<T: Thenability> Thenability for Option<T> {
	fn convert(x: JsValue) -> Self {
		if x.is_null() || x.is_undefined() { None } else { Some(T::convert(x)) }
	}
}

#[wasm_bindgen(module = "vscode")]
extern "C" {

	pub type ExtensionContext;

	pub type Webview;
	#[derive(Clone)]
	pub type WebviewPanel;

	#[wasm_bindgen(method)]
	pub fn dispose(this: &WebviewPanel);

	#[wasm_bindgen(method, js_name = onDidDispose)]
	pub fn on_did_dispose(this: &WebviewPanel, callback: &JsValue);

	#[wasm_bindgen(method)]
	pub fn reveal(this: &WebviewPanel, view_column: i32, preserve_focus: bool);

	#[wasm_bindgen(method, setter)]
	pub fn set_title(this: &WebviewPanel, title: &str);

	#[wasm_bindgen(method, getter)]
	pub fn webview(this: &WebviewPanel) -> Webview;

	#[wasm_bindgen(method, js_name = onDidReceiveMessage)]
	pub fn on_did_receive_message(this: &Webview, callback: &JsValue);

	#[wasm_bindgen(method, js_name = postMessage)]
	pub fn post_message(this: &Webview, message: JsValue) -> Thenable<bool>;

	#[wasm_bindgen(method, setter)]
	pub fn set_html(this: &Webview, html: &str);

	pub type OutputChannel;

	#[wasm_bindgen(method)]
	pub fn append(this: &OutputChannel, value: &str);

	#[wasm_bindgen(method, js_name = appendLine)]
	pub fn append_line(this: &OutputChannel, value: &str);

	#[wasm_bindgen(method)]
	pub fn clear(this: &OutputChannel);

	#[wasm_bindgen(method)]
	pub fn dispose(this: &OutputChannel);

	#[wasm_bindgen(method)]
	pub fn show(this: &OutputChannel, preserve_focus: bool);

	pub type StatusBarItem;

	#[wasm_bindgen(method)]
	pub fn dispose(this: &StatusBarItem);

	#[wasm_bindgen(method)]
	pub fn hide(this: &StatusBarItem);

	#[wasm_bindgen(method, setter)]
	pub fn set_command(this: &StatusBarItem, command: &str);

	#[wasm_bindgen(method, setter)]
	pub fn set_text(this: &StatusBarItem, text: &str);

	#[wasm_bindgen(method, setter)]
	pub fn set_tooltip(this: &StatusBarItem, tooltip: &str);

	#[wasm_bindgen(method)]
	pub fn show(this: &StatusBarItem);

	pub type WorkspaceConfiguration;

	#[wasm_bindgen(method)]
	pub fn get(this: &WorkspaceConfiguration, section: &str) -> JsValue;

}

#[derive(Deserialize)]
pub struct ItemRet<T> {
	pub id: T,
}

#[repr(i32)]
#[derive(Clone, Copy)]
pub enum StatusBarAlignment {
	Left = 1,
	Right = 2,
}
wasm_abi_enumi32!(StatusBarAlignment);

pub mod commands {
	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "vscode")]
	extern "C" {

		#[wasm_bindgen(js_namespace = commands, js_name = registerCommand)]
		pub fn register_command(command: &str, callback: &Closure<dyn FnMut()>);

	}
}

pub mod env {

	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "vscode")]
	extern "C" {

		#[wasm_bindgen(js_namespace = env, js_name = appName)]
		pub static APP_NAME: String;

	}
}

pub mod window {

	use crate::{OutputChannel, StatusBarAlignment, StatusBarItem, Thenable, WebviewPanel};
	use serde::Serialize;
	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "vscode")]
	extern "C" {

		#[wasm_bindgen(js_namespace = window, js_name = createOutputChannel)]
		pub fn create_output_channel(name: &str) -> OutputChannel;

		#[wasm_bindgen(js_namespace = window, js_name = createStatusBarItem)]
		pub fn create_status_bar_item(alignment: StatusBarAlignment, priority: f64) -> StatusBarItem;

		#[wasm_bindgen(js_namespace = window, js_name = createWebviewPanel)]
		pub fn create_webview_panel(
			view_type: &str,
			title: &str,
			show_options: CreateWebviewPanelShowOptions,
			options: CreateWebviewPanelOptions,
		) -> WebviewPanel;

		#[wasm_bindgen(js_namespace = window, js_name = showErrorMessage, variadic)]
		pub fn show_error_message(
			message: &str,
			options: &JsValue,
			items: Vec<JsValue>,
		) -> Thenable<JsValue>;

		#[wasm_bindgen(js_namespace = window, js_name = showInformationMessage, variadic)]
		pub fn show_information_message(
			message: &str,
			options: &JsValue,
			items: Vec<JsValue>,
		) -> Thenable<JsValue>;

		#[wasm_bindgen(js_namespace = window, js_name = showQuickPick)]
		pub fn show_quick_pick(
			items: &js_sys::Array,
			options: ShowQuickPickOptions,
		) -> Thenable<JsValue>;

		#[wasm_bindgen(js_namespace = window, js_name = showWarningMessage, variadic)]
		pub fn show_warning_message(
			message: &str,
			options: &JsValue,
			items: Vec<JsValue>,
		) -> Thenable<JsValue>;

	}

	#[derive(Serialize)]
	pub struct CreateWebviewPanelOptions {
		#[serde(flatten)]
		pub general: WebviewOptions,
		#[serde(flatten)]
		pub panel: WebviewPanelOptions,
	}
	wasm_abi_serde!(CreateWebviewPanelOptions);

	#[derive(Serialize)]
	pub struct WebviewPanelOptions {
		#[serde(rename = "enableFindWidget")]
		pub enable_find_widget: bool,
		#[serde(rename = "retainContextWhenHidden")]
		pub retain_context_when_hidden: bool,
	}

	#[derive(Serialize)]
	pub struct WebviewOptions {
		#[serde(rename = "enableCommandUris")]
		pub enable_command_uris: bool,
		#[serde(rename = "enableScripts")]
		pub enable_scripts: bool,
	}

	#[derive(Serialize)]
	pub struct CreateWebviewPanelShowOptions {
		#[serde(rename = "preserveFocus")]
		pub preserve_focus: bool,
		#[serde(rename = "viewColumn")]
		pub view_column: i32,
	}
	wasm_abi_serde!(CreateWebviewPanelShowOptions);

	#[derive(Serialize)]
	pub struct ShowMessageOptions {
		pub modal: bool,
	}
	wasm_abi_serde!(ShowMessageOptions);

	#[derive(Serialize)]
	pub struct ShowQuickPickOptions<'a> {
		#[serde(rename = "canPickMany")]
		pub can_pick_many: bool,
		#[serde(rename = "ignoreFocusOut")]
		pub ignore_focus_out: bool,
		#[serde(rename = "matchOnDescription")]
		pub match_on_description: bool,
		#[serde(rename = "matchOnDetail")]
		pub match_on_detail: bool,
		#[serde(rename = "placeHolder")]
		pub place_holder: Option<&'a str>,
	}
	wasm_abi_serde!(ShowQuickPickOptions<'_>);

	#[derive(Serialize)]
	pub struct ShowMessageItem<'a, T> {
		#[serde(rename = "isCloseAffordance")]
		pub is_close_affordance: bool,
		pub title: &'a str,
		pub id: T,
	}

	#[derive(Serialize)]
	pub struct ShowQuickPickItem<'a, T> {
		#[serde(rename = "alwaysShow")]
		pub always_show: bool,
		pub description: Option<&'a str>,
		pub detail: Option<&'a str>,
		pub label: &'a str,
		pub picked: bool,
		pub id: T,
	}
}

pub mod workspace {

	use crate::WorkspaceConfiguration;
	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "vscode")]
	extern "C" {

		#[wasm_bindgen(js_namespace = workspace, js_name = getConfiguration)]
		pub fn get_configuration(section: &str) -> WorkspaceConfiguration;

	}
}
