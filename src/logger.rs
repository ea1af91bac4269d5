use evscode::{error::ResultExt, goodies::DevToolsLogger, OutputChannel, R};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;

pub const CHANNEL_NAME: &str = "Copilot Arcade";

thread_local! {
	static OUTPUT: RefCell<Option<OutputChannel>> = RefCell::new(None);
}

pub fn initialize() -> R<()> {
	OUTPUT.with(|output| output.borrow_mut().get_or_insert_with(|| OutputChannel::new(CHANNEL_NAME)).clear());
	log::set_boxed_logger(Box::new(Logger { dev_tools: DevToolsLogger })).wrap("logging system initialization failed")?;
	log::set_max_level(LevelFilter::Trace);
	Ok(())
}

/// Copies a log line into the output channel as is.
pub fn mirror(line: &str) {
	with_output(|output| output.append_line(line));
}

pub fn reveal() {
	with_output(|output| output.show(true));
}

pub fn dispose() {
	OUTPUT.with(|output| output.borrow_mut().take());
}

fn with_output(f: impl FnOnce(&OutputChannel)) {
	OUTPUT.with(|output| {
		if let Some(output) = output.borrow().as_ref() {
			f(output);
		}
	});
}

pub fn format_line(timestamp: chrono::DateTime<chrono::Utc>, message: &str) -> String {
	format!("[{}] {}", timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true), message)
}

struct Logger {
	dev_tools: DevToolsLogger,
}

impl Log for Logger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		self.dev_tools.enabled(metadata)
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		self.dev_tools.log(record);
		if record.level() <= Level::Info {
			mirror(&format_line(crate::util::time_now(), &record.args().to_string()));
		}
	}

	fn flush(&self) {
		self.dev_tools.flush()
	}
}

#[test]
fn test_format_line() {
	use chrono::TimeZone;
	let timestamp = chrono::Utc.timestamp_millis_opt(1_742_404_382_118).unwrap();
	assert_eq!(format_line(timestamp, "monitoring 2 log files"), "[2025-03-19T17:13:02.118Z] monitoring 2 log files");
}
