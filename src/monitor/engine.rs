use crate::{
	classify::{classify, Event, Signal}, locate::{find_logs, LogCandidate}, tail::{StartAt, Tailer, WatchedFile}, timer::ActivityTimer, util::{fs::Filesystem, path::Path}
};
use chrono::{DateTime, Duration, Utc};
use evscode::R;
use std::collections::BTreeSet;

/// UI effect requested by the monitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reaction {
	ToolCallStarted { started_at: DateTime<Utc> },
	ToolCallFinished { elapsed: Duration },
	Mirror(String),
	Activity,
}

#[derive(Debug)]
pub struct Rescan {
	pub found: Vec<LogCandidate>,
	pub added: Vec<Path>,
	pub removed: Vec<Path>,
}

/// Log discovery, tailing and the activity timer, without any VS Code API calls.
pub struct Engine<F> {
	tailer: Tailer<F>,
	timer: ActivityTimer,
	initial_scan_done: bool,
}

impl<F: Filesystem> Engine<F> {
	pub fn new(fs: F) -> Engine<F> {
		Engine { tailer: Tailer::new(fs), timer: ActivityTimer::new(), initial_scan_done: false }
	}

	/// Synchronizes the tracked files with the logs currently found under `root`.
	///
	/// Files found by the first successful scan are tailed from their end, so tool calls that
	/// happened before the extension started are not replayed. Files appearing later are read
	/// from the start.
	pub async fn rescan(&mut self, root: &Path, now: DateTime<Utc>) -> R<Rescan> {
		let found = find_logs(self.tailer.fs(), root, now).await?;
		let start = if self.initial_scan_done { StartAt::Beginning } else { StartAt::End };
		self.initial_scan_done = true;
		let mut added = Vec::new();
		for candidate in &found {
			if self.tailer.track(candidate.path.clone(), start).await {
				added.push(candidate.path.clone());
			}
		}
		let keep: BTreeSet<&Path> = found.iter().map(|candidate| &candidate.path).collect();
		let removed = self.tailer.retain(|path| keep.contains(path));
		Ok(Rescan { found, added, removed })
	}

	pub async fn poll(&mut self, path: &Path, now: DateTime<Utc>) -> R<Vec<Reaction>> {
		let chunk = match self.tailer.read(path, now).await? {
			Some(chunk) => chunk,
			None => return Ok(Vec::new()),
		};
		let mut reactions = Vec::new();
		let mut mirrored = false;
		for event in classify(&chunk) {
			match event {
				Event::Signal(Signal::ToolCallStarted) => {
					if self.timer.start(now) {
						reactions.push(Reaction::ToolCallStarted { started_at: now });
					}
				},
				Event::Signal(Signal::ToolCallFinished) => {
					if let Some(elapsed) = self.timer.stop(now) {
						reactions.push(Reaction::ToolCallFinished { elapsed });
					}
				},
				Event::Mirror(line) => {
					mirrored = true;
					reactions.push(Reaction::Mirror(line.to_owned()));
				},
			}
		}
		if mirrored {
			reactions.push(Reaction::Activity);
		}
		Ok(reactions)
	}

	/// Polls every tracked file. Files that fail to read are logged and retried on the next call.
	pub async fn poll_all(&mut self, now: DateTime<Utc>) -> Vec<Reaction> {
		let paths: Vec<Path> = self.tailer.files().map(|file| file.path.clone()).collect();
		let mut reactions = Vec::new();
		for path in paths {
			match self.poll(&path, now).await {
				Ok(mut new) => reactions.append(&mut new),
				Err(e) => log::warn!("could not read {}, {}", path, e.human()),
			}
		}
		reactions
	}

	pub fn reset(&mut self) -> bool {
		self.timer.reset()
	}

	pub fn timer(&self) -> &ActivityTimer {
		&self.timer
	}

	pub fn watched(&self) -> impl Iterator<Item=&WatchedFile> {
		self.tailer.files()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::fs::memory::{at, MemoryFs};
	use futures::executor::block_on;

	const ROOT: &str = "/home/user/.config/Code/logs";
	const LOG: &str = "/home/user/.config/Code/logs/20250319T171247/window1/exthost/GitHub.copilot-chat/GitHub Copilot Chat.log";
	const STARTED: &str = "2025-03-19 17:13:02.118 [info] message 0 returned. finish reason: [tool_calls]\n";
	const FINISHED: &str = "2025-03-19 17:13:09.540 [info] message 0 returned. finish reason: [stop]\n";

	fn engine_with_log(content: &str) -> (MemoryFs, Engine<MemoryFs>) {
		let fs = MemoryFs::new();
		fs.write(LOG, content.as_bytes(), at(0));
		let mut engine = Engine::new(fs.clone());
		let rescan = block_on(engine.rescan(&Path::from(ROOT), at(1))).unwrap();
		assert_eq!(rescan.added, vec![Path::from(LOG)]);
		(fs, engine)
	}

	fn poll(engine: &mut Engine<MemoryFs>, now: i64) -> Vec<Reaction> {
		block_on(engine.poll(&Path::from(LOG), at(now))).unwrap()
	}

	#[test]
	fn test_first_scan_skips_history() {
		let (_, mut engine) = engine_with_log(STARTED);
		assert_eq!(poll(&mut engine, 2), vec![]);
		assert!(!engine.timer().is_running());
	}

	#[test]
	fn test_tool_call_round_trip() {
		let (fs, mut engine) = engine_with_log("");
		fs.append(LOG, STARTED.as_bytes());
		assert_eq!(poll(&mut engine, 2), vec![Reaction::ToolCallStarted { started_at: at(2) }]);
		assert!(engine.timer().is_running());
		fs.append(LOG, FINISHED.as_bytes());
		assert_eq!(poll(&mut engine, 9), vec![Reaction::ToolCallFinished { elapsed: Duration::seconds(7) }]);
		assert!(!engine.timer().is_running());
	}

	#[test]
	fn test_repeated_start_transitions_once() {
		let (fs, mut engine) = engine_with_log("");
		fs.append(LOG, STARTED.as_bytes());
		fs.append(LOG, STARTED.as_bytes());
		assert_eq!(poll(&mut engine, 2), vec![Reaction::ToolCallStarted { started_at: at(2) }]);
		fs.append(LOG, STARTED.as_bytes());
		assert_eq!(poll(&mut engine, 3), vec![]);
		assert_eq!(engine.timer().started_at(), Some(at(2)));
	}

	#[test]
	fn test_stop_while_idle_is_ignored() {
		let (fs, mut engine) = engine_with_log("");
		fs.append(LOG, FINISHED.as_bytes());
		assert_eq!(poll(&mut engine, 2), vec![]);
	}

	#[test]
	fn test_mirrored_lines_and_activity() {
		let (fs, mut engine) = engine_with_log("");
		fs.append(LOG, b"[info] chat request sent\n[debug] unrelated\n[info] completion received\n");
		assert_eq!(poll(&mut engine, 2), vec![
			Reaction::Mirror("[info] chat request sent".to_owned()),
			Reaction::Mirror("[info] completion received".to_owned()),
			Reaction::Activity,
		]);
	}

	#[test]
	fn test_split_marker_fires_when_completed() {
		let (fs, mut engine) = engine_with_log("");
		let (head, tail) = STARTED.split_at(40);
		fs.append(LOG, head.as_bytes());
		assert_eq!(poll(&mut engine, 2), vec![]);
		fs.append(LOG, tail.as_bytes());
		assert_eq!(poll(&mut engine, 3), vec![Reaction::ToolCallStarted { started_at: at(3) }]);
	}

	#[test]
	fn test_later_files_are_read_from_start() {
		let (fs, mut engine) = engine_with_log("");
		let second = LOG.replace("window1", "window2");
		fs.write(&second, STARTED.as_bytes(), at(5));
		let rescan = block_on(engine.rescan(&Path::from(ROOT), at(6))).unwrap();
		assert_eq!(rescan.added, vec![Path::from(second.as_str())]);
		assert_eq!(block_on(engine.poll_all(at(7))), vec![Reaction::ToolCallStarted { started_at: at(7) }]);
	}

	#[test]
	fn test_rescan_drops_vanished_files() {
		let (_, mut engine) = engine_with_log("");
		let rescan = block_on(engine.rescan(&Path::from(ROOT), at(2 * 24 * 60 * 60))).unwrap();
		assert!(rescan.found.is_empty());
		assert_eq!(rescan.removed, vec![Path::from(LOG)]);
		assert_eq!(engine.watched().count(), 0);
	}

	#[test]
	fn test_reset_forces_idle() {
		let (fs, mut engine) = engine_with_log("");
		fs.append(LOG, STARTED.as_bytes());
		poll(&mut engine, 2);
		assert!(engine.reset());
		fs.append(LOG, FINISHED.as_bytes());
		assert_eq!(poll(&mut engine, 3), vec![]);
	}
}
