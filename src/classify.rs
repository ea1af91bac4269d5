//! Recognizing tool call boundaries and interesting lines in Copilot Chat logs.

/// Logged when the model answers with tool invocations, which starts a round-trip.
pub const TOOL_CALLS_MARKER: &str = "message 0 returned. finish reason: [tool_calls]";
/// Logged when the model produces its final answer.
pub const STOP_MARKER: &str = "message 0 returned. finish reason: [stop]";
/// Lines containing any of these are mirrored to the output channel.
pub const TOPICS: &[&str] = &["copilot", "chat", "completion", "request", "response"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
	ToolCallStarted,
	ToolCallFinished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event<'a> {
	Signal(Signal),
	Mirror(&'a str),
}

/// Classifies every non-blank line of a chunk, in order.
///
/// Matching is plain substring containment, so a line quoting a marker counts as the marker.
pub fn classify(chunk: &str) -> Vec<Event> {
	let mut events = Vec::new();
	for line in chunk.split('\n').map(|line| line.trim_end_matches('\r')) {
		if line.trim().is_empty() {
			continue;
		}
		if let Some(signal) = signal(line) {
			events.push(Event::Signal(signal));
		}
		if is_topical(line) {
			events.push(Event::Mirror(line));
		}
	}
	events
}

pub fn signal(line: &str) -> Option<Signal> {
	if line.contains(TOOL_CALLS_MARKER) {
		Some(Signal::ToolCallStarted)
	} else if line.contains(STOP_MARKER) {
		Some(Signal::ToolCallFinished)
	} else {
		None
	}
}

pub fn is_topical(line: &str) -> bool {
	TOPICS.iter().any(|topic| line.contains(topic))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_markers() {
		let started = "2025-03-19 17:13:02.118 [info] [chat fetch] message 0 returned. finish reason: [tool_calls]";
		let finished = "2025-03-19 17:13:09.540 [info] [chat fetch] message 0 returned. finish reason: [stop]";
		assert_eq!(signal(started), Some(Signal::ToolCallStarted));
		assert_eq!(signal(finished), Some(Signal::ToolCallFinished));
		assert_eq!(signal("message 1 returned. finish reason: [stop]"), None);
		assert_eq!(signal("finish reason: [length]"), None);
	}

	#[test]
	fn test_classify_order() {
		let chunk = "[info] request started\r\n\n   \n[info] message 0 returned. finish reason: [tool_calls]\nnothing here\n";
		assert_eq!(
			classify(chunk),
			vec![
				Event::Mirror("[info] request started"),
				Event::Signal(Signal::ToolCallStarted),
			]
		);
	}

	#[test]
	fn test_marker_line_with_topic_is_mirrored_too() {
		let line = "[chat fetch] message 0 returned. finish reason: [stop]";
		assert_eq!(classify(line), vec![Event::Signal(Signal::ToolCallFinished), Event::Mirror(line)]);
	}

	#[test]
	fn test_quoted_marker_still_matches() {
		let line = "user typed: message 0 returned. finish reason: [tool_calls]";
		assert_eq!(classify(line), vec![Event::Signal(Signal::ToolCallStarted)]);
	}

	#[test]
	fn test_topics_are_case_sensitive() {
		assert!(is_topical("GitHub copilot activated"));
		assert!(!is_topical("GitHub Copilot activated"));
		assert!(is_topical("sending response"));
	}
}
