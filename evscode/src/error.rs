//! Rich error type, supporting cancellation, automatic logging and followup actions.
//!
//! It should also be used by extensions instead of custom error types, because it supports follow-up actions, cancellations and hiding error
//! details from the user. Properly connecting these features to VS Code API is a little bit code-heavy, and keeping this logic inside Evscode
//! allows to improve error message format across all extensions.

use crate::{stdlib::message::Action as MessageAction, BoxFuture, Message};
use std::{fmt, future::Future};
use wasm_bindgen::{JsCast, JsValue};

/// Result type used for errors in Evscode. See [`E`] for details.
pub type R<T> = Result<T, E>;

/// A button on an error message that the user can press.
pub struct Action {
	/// Title displayed to the user.
	/// Preferably one-word, because wider buttons look weird.
	pub title: String,
	/// The operation that will be spawned upon clicking the button.
	pub trigger: BoxFuture<'static, R<()>>,
}

/// Indication of how serious the error is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Severity {
	/// Abort the operation, display an error message.
	Error,
	/// Abort the operation, do not display an error message.
	Cancel,
	/// Do not abort the operation, display a warning message.
	/// Do not use the `?` operator to avoid aborting the operation.
	Warning,
	/// Abort the operation, display an error message, but treat it as a part of the normal workflow.
	/// These are logged with a lower level.
	Workflow,
}

/// Error type used by Evscode.
///
/// See [module documentation](index.html) for details.
#[derive(Debug)]
pub struct E {
	/// Marks whose fault this error is and how serious is it.
	pub severity: Severity,
	/// List of human-facing error messages, ordered from low-level to high-level.
	pub reasons: Vec<String>,
	/// List of error messages not meant for the end user, ordered from low-level to high level.
	/// These messages will not be displayed in the UI.
	pub details: Vec<String>,
	/// List of actions available as buttons in the message, if displayed.
	pub actions: Vec<Action>,
}

impl E {
	/// Create an error from a user-facing string.
	pub fn error(s: impl AsRef<str>) -> E {
		E { severity: Severity::Error, reasons: vec![s.as_ref().to_owned()], details: Vec::new(), actions: Vec::new() }
	}

	/// Create an error representing an operation cancelled by user. This error will be logged, but not displayed to the user.
	pub fn cancel() -> E {
		E { severity: Severity::Cancel, reasons: Vec::new(), details: Vec::new(), actions: Vec::new() }
	}

	/// Convert an error implementing [`std::error::Error`] to an Evscode error. Error messages will be collected from [`std::fmt::Display`]
	/// implementations on each error in the [`std::error::Error::source`] chain.
	pub fn from_std(native: impl std::error::Error) -> E {
		let mut reasons = vec![native.to_string()];
		let mut source = native.source();
		while let Some(inner) = source {
			let inner_message = inner.to_string();
			if !reasons.iter().any(|reason| reason.contains(inner_message.as_str())) {
				reasons.push(inner_message);
			}
			source = inner.source();
		}
		reasons.reverse();
		E { severity: Severity::Error, reasons, details: Vec::new(), actions: Vec::new() }
	}

	/// Convert an exception thrown by JavaScript code to an Evscode error.
	/// Instances of `Error` contribute their message, other values are formatted as well as possible.
	pub fn from_js(raw: JsValue) -> E {
		let message = match raw.dyn_ref::<js_sys::Error>() {
			Some(error) => String::from(error.message()),
			None => raw.as_string().unwrap_or_else(|| format!("{:?}", raw)),
		};
		E::error(message)
	}

	/// A short human-facing representation of the error.
	pub fn human(&self) -> String {
		let mut reasons = self.reasons.clone();
		reasons.reverse();
		reasons.join("; ")
	}

	/// A representation of the error including details not meant for the end user.
	pub fn human_detailed(&self) -> String {
		let mut messages: Vec<String> = self.details.iter().chain(self.reasons.iter()).cloned().collect();
		messages.reverse();
		messages.join("; ")
	}

	/// Add an additional message describing the error, which will be displayed in front of the previous ones.
	/// ```
	/// # use evscode::E;
	/// let e = E::error("permission denied").context("could not list directory").context("failed to find logs");
	/// assert_eq!(e.human(), "failed to find logs; could not list directory; permission denied");
	/// ```
	pub fn context(mut self, msg: impl AsRef<str>) -> Self {
		self.reasons.push(msg.as_ref().to_owned());
		self
	}

	/// Add an additional message describing the error and mark all previous message as not meant for the end user.
	/// This does not remove the lower-level messages, they will still be present in the logs.
	/// ```
	/// # use evscode::E;
	/// let e = E::error("ENOENT: no such file or directory").reform("log file main.log disappeared");
	/// assert_eq!(e.human(), "log file main.log disappeared");
	/// ```
	pub fn reform(mut self, msg: impl AsRef<str>) -> Self {
		self.details.append(&mut self.reasons);
		self.reasons.push(msg.as_ref().to_owned());
		self
	}

	/// Add a follow-up action that can be taken by the user, who will see the action as a button on the error message.
	pub fn action(mut self, title: impl AsRef<str>, trigger: impl Future<Output=R<()>>+'static) -> Self {
		self.actions.push(Action { title: title.as_ref().to_owned(), trigger: Box::pin(trigger) });
		self
	}

	/// Mark the error as something common in extension's workflow.
	pub fn workflow_error(mut self) -> Self {
		self.severity = Severity::Workflow;
		self
	}

	/// Mark the error as a warning that does not break the ongoing operation.
	/// This will change the icon on the error message to a warning sign.
	pub fn warning(mut self) -> Self {
		self.severity = Severity::Warning;
		self
	}

	/// Check whether the error represents an operation cancelled by the user.
	pub fn is_cancel(&self) -> bool {
		self.severity == Severity::Cancel
	}

	/// Log the error and show it to the end user.
	/// Prefer to return this value from commands instead.
	/// This is meant to be used e.g. for warnings.
	pub fn emit(self) {
		let level = match self.severity {
			Severity::Cancel => {
				log::debug!("operation cancelled {}", self.human_detailed());
				return;
			},
			Severity::Error => log::Level::Error,
			Severity::Warning | Severity::Workflow => log::Level::Warn,
		};
		log::log!(level, "{}", self.human_detailed());
		wasm_bindgen_futures::spawn_local(self.show());
	}

	async fn show(self) {
		let text = self.human();
		let buttons = self.actions.iter().enumerate().map(|(i, action)| MessageAction { id: i, title: &action.title, is_close_affordance: false });
		let message = Message::new(&text).items(buttons);
		let selected = match self.severity {
			Severity::Warning => message.warning().show().await,
			_ => message.error().show().await,
		};
		if let Some(action) = selected.and_then(|i| self.actions.into_iter().nth(i)) {
			crate::spawn(action.trigger);
		}
	}
}

impl From<js_sys::Error> for E {
	fn from(native: js_sys::Error) -> Self {
		E::from_js(native.into())
	}
}

/// An extension trait for terser error handling.
pub trait ResultExt {
	/// The value type of the result.
	type Ok;
	/// Convert the error to [`E`] and add a single context layer.
	fn wrap(self, s: impl AsRef<str>) -> R<Self::Ok>;
}
impl<T, E2: std::error::Error> ResultExt for Result<T, E2> {
	type Ok = T;

	fn wrap(self, s: impl AsRef<str>) -> R<T> {
		self.map_err(|e| E::from_std(e).context(s))
	}
}
impl<T> ResultExt for Option<T> {
	type Ok = T;

	fn wrap(self, s: impl AsRef<str>) -> R<T> {
		self.ok_or_else(|| E::error(s))
	}
}

impl fmt::Debug for Action {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Action").field("title", &self.title).finish()
	}
}

#[test]
fn test_from_std_collects_sources() {
	let e = E::from_std(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"));
	assert_eq!(e.human(), "disk on fire");
	assert_eq!(e.severity, Severity::Error);
}

#[test]
fn test_reform_keeps_details() {
	let e = E::error("EACCES").context("stat failed").reform("could not read the log");
	assert_eq!(e.human(), "could not read the log");
	assert_eq!(e.human_detailed(), "could not read the log; stat failed; EACCES");
}

#[test]
fn test_wrap_option() {
	let e = None::<()>.wrap("no game with this id").unwrap_err();
	assert_eq!(e.human(), "no game with this id");
	assert!(!e.is_cancel());
	assert!(E::cancel().is_cancel());
}
