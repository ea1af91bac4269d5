//! Logger that logs every passed event to Developer Tools console in VS Code.

use crate::glue::PACKAGE;
use log::{Level, Log, Metadata, Record};

/// Formats the message in the same way it will be displayed in Developer Tools.
pub fn format_message(record: &Record) -> String {
	match PACKAGE.get() {
		Some(pkg) => format!("[{}.{}] {}", pkg.publisher, pkg.identifier, record.args()),
		None => format!("{}", record.args()),
	}
}

/// Logger that logs every passed event to Developer Tools console in VS Code.
pub struct DevToolsLogger;

impl Log for DevToolsLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		let filters = PACKAGE.get().map_or(&[][..], |pkg| pkg.log_filters);
		filters.iter().all(|(source, filter)| metadata.level() <= *filter || !metadata.target().starts_with(source))
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		let console = match record.level() {
			Level::Error => node_sys::console::error,
			Level::Warn => node_sys::console::warn,
			Level::Info => node_sys::console::info,
			Level::Debug => node_sys::console::log,
			Level::Trace => node_sys::console::debug,
		};
		console(&format_message(record));
	}

	fn flush(&self) {
	}
}
