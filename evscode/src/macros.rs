pub use crate::{
	config::Configurable, glue::{activate, deactivate, generate_package_json}
};
pub use once_cell::sync::Lazy;
pub use vscode_sys::ExtensionContext;
