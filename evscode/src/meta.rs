//! Extension metadata types.

use crate::{BoxFuture, R};
use std::fmt::{self, Write};

/// Identifier of a command or a configuration entry, derived from where it was declared.
///
/// Displayed as the extension name followed by the camel-cased module path and item name, e.g.
/// `copilot_arcade::monitor::find_logs` becomes `copilotArcade.monitor.findLogs`.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Identifier {
	pub module_path: &'static str,
	pub local_name: &'static str,
}

impl fmt::Display for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for part in self.module_path.split("::") {
			crate::marshal::camel_case(part, f)?;
			f.write_char('.')?;
		}
		crate::marshal::camel_case(self.local_name, f)
	}
}

impl Identifier {
	/// The first segment of the identifier, shared by all entries of the extension.
	pub fn extension_id(&self) -> String {
		let mut buf = String::new();
		let root = self.module_path.split("::").next().unwrap_or(self.module_path);
		let _ = crate::marshal::camel_case(root, &mut buf);
		buf
	}

	/// The identifier without the [`Identifier::extension_id`] prefix.
	pub fn inner_path(&self) -> String {
		let full = self.to_string();
		match full.find('.') {
			Some(i) => full[i + 1..].to_owned(),
			None => full,
		}
	}
}

#[doc(hidden)]
pub struct Command {
	pub id: Identifier,
	pub title: &'static str,
	pub key: Option<&'static str>,
	pub trigger: fn() -> BoxFuture<'static, R<()>>,
}

impl fmt::Debug for Command {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Command").field("id", &self.id).field("title", &self.title).field("key", &self.key).finish()
	}
}

/// Metadata of a configuration entry.
pub struct ConfigEntry {
	#[doc(hidden)]
	pub id: Identifier,
	/// Uses Markdown.
	#[doc(hidden)]
	pub description: &'static str,
	#[doc(hidden)]
	pub schema: fn() -> serde_json::Value,
}

/// [Activation event](https://code.visualstudio.com/api/references/activation-events) checked by VS Code even when the extension is not active.
///
/// Set the [`Package::extra_activations`] field in [`evscode::plugin!`](../../evscode_codegen/macro.plugin.html) call to register the check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation<S: AsRef<str>> {
	#[doc(hidden)]
	OnCommand { command: Identifier },
	/// Fires shortly after VS Code has started, without slowing down the startup.
	OnStartupFinished,
	/// Fires when a folder is opened and it contains at least one file that matched the given selector.
	WorkspaceContains {
		/// Glob file pattern, like `**/.editorconfig`.
		selector: S,
	},
}

impl<S: AsRef<str>> Activation<S> {
	#[doc(hidden)]
	pub fn package_json_format(&self) -> String {
		match self {
			Activation::OnCommand { command } => format!("onCommand:{}", command),
			Activation::OnStartupFinished => "onStartupFinished".to_owned(),
			Activation::WorkspaceContains { selector } => format!("workspaceContains:{}", selector.as_ref()),
		}
	}
}

/// Extension metadata.
///
/// See [official documentation](https://code.visualstudio.com/api/references/extension-manifest) for detailed information.
pub struct Package {
	#[doc(hidden)]
	pub identifier: &'static str,
	#[doc(hidden)]
	pub version: &'static str,
	#[doc(hidden)]
	pub commands: Vec<Command>,
	#[doc(hidden)]
	pub configuration: Vec<ConfigEntry>,
	/// Display name seen by end users.
	pub name: &'static str,
	/// Your Marketplace [publisher](https://code.visualstudio.com/api/working-with-extensions/publishing-extension#publishers-and-personal-access-tokens) username.
	pub publisher: &'static str,
	/// Short description of your extension.
	pub description: &'static str,
	/// Up to 5 keywords to make it easier to find the extension.
	pub keywords: &'static [&'static str],
	/// Categories that describe your extension, like `Other` or `Visualization`.
	pub categories: &'static [&'static str],
	/// [SPDX 2.0](https://spdx.org/licenses/) identifier of your extension's license.
	pub license: &'static str,
	/// URL of your extension repository.
	pub repository: &'static str,
	/// Minimal supported VS Code version, in the `^1.80.0` format.
	pub vscode_version: &'static str,
	/// Function intended to run when the extension is activated.
	pub on_activate: Option<fn() -> BoxFuture<'static, R<()>>>,
	/// Function intended to run when the extension is deactivated.
	pub on_deactivate: Option<fn() -> BoxFuture<'static, R<()>>>,
	/// Additional [`Activation`] events that will activate your extension.
	/// Evscode will automatically add events related to the commands in your extension.
	pub extra_activations: &'static [Activation<&'static str>],
	/// List of filters that specify what can be logged.
	/// An entry like `("regex", LevelFilter::Error)` means that only errors of level Error or higher will be logged from that crate.
	pub log_filters: &'static [(&'static str, log::LevelFilter)],
}

#[test]
fn test_identifier_format() {
	let id = Identifier { module_path: "copilot_arcade::arcade", local_name: "DEFAULT_GAME" };
	assert_eq!(id.to_string(), "copilotArcade.arcade.defaultGame");
	assert_eq!(id.extension_id(), "copilotArcade");
	assert_eq!(id.inner_path(), "arcade.defaultGame");
	let id = Identifier { module_path: "copilot_arcade::monitor", local_name: "find_logs" };
	assert_eq!(id.to_string(), "copilotArcade.monitor.findLogs");
}

#[test]
fn test_activation_format() {
	let command = Identifier { module_path: "copilot_arcade::arcade", local_name: "show_game" };
	assert_eq!(Activation::<&str>::OnCommand { command }.package_json_format(), "onCommand:copilotArcade.arcade.showGame");
	assert_eq!(Activation::<&str>::OnStartupFinished.package_json_format(), "onStartupFinished");
	assert_eq!(Activation::WorkspaceContains { selector: "**/.vscode" }.package_json_format(), "workspaceContains:**/.vscode");
}
