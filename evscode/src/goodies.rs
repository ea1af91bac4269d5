//! Set of common utilities that are not present in original VS Code API.

pub mod dev_tools_logger;

pub use dev_tools_logger::DevToolsLogger;
