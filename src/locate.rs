//! Finding the Copilot Chat logs written by the running editor.
//!
//! The editor starts a new `<date>T<time>` directory per session, with one `window<N>` directory
//! per window and an extension host log directory per extension inside it:
//! ```text
//! <logs>/20250319T171247/window1/exthost/GitHub.copilot-chat/GitHub Copilot Chat.log
//! ```

use crate::util::{
	fs::Filesystem, path::Path, OS
};
use chrono::{DateTime, Duration, Utc};
use evscode::R;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

pub const SESSIONS_SEARCHED: usize = 2;
pub const COPILOT_CHAT_DIR: &str = "GitHub.copilot-chat";

static SESSION_DIR: Lazy<Regex> = Lazy::new(|| Regex::new("^[0-9]{8}T[0-9]{6}$").unwrap());

/// Files modified longer ago than this are not considered at all.
pub fn recency_window() -> Duration {
	Duration::hours(24)
}

/// Files modified within this threshold take precedence over older ones.
pub fn active_window() -> Duration {
	Duration::hours(1)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogCandidate {
	pub path: Path,
	pub modified: DateTime<Utc>,
}

pub fn logs_root() -> R<Path> {
	let insiders = evscode::app_name().contains("Insiders");
	Ok(logs_root_for(OS::query()?, crate::util::env("APPDATA"), &node_sys::os::homedir(), insiders))
}

pub fn logs_root_for(os: OS, appdata: Option<String>, home: &str, insiders: bool) -> Path {
	let home = Path::from(home);
	let config = match os {
		OS::Windows => appdata.map(Path::from_native).unwrap_or_else(|| home.join("AppData").join("Roaming")),
		OS::MacOS => home.join("Library").join("Application Support"),
		OS::Linux => home.join(".config"),
	};
	config.join(if insiders { "Code - Insiders" } else { "Code" }).join("logs")
}

pub fn is_session_dir(name: &str) -> bool {
	SESSION_DIR.is_match(name)
}

/// Lists recent Copilot Chat log files under the logs root, newest first.
///
/// A missing root or missing subdirectories mean there is nothing to find. Only failing to list
/// an existing root is an error; failures deeper in the tree skip the affected directory.
pub async fn find_logs(fs: &impl Filesystem, root: &Path, now: DateTime<Utc>) -> R<Vec<LogCandidate>> {
	if !fs.exists(root).await {
		log::info!("logs directory {} does not exist", root);
		return Ok(Vec::new());
	}
	let mut sessions: Vec<String> = fs.read_dir(root).await?.into_iter().filter(|name| is_session_dir(name)).collect();
	sessions.sort_by(|a, b| b.cmp(a));
	let mut candidates = Vec::new();
	for session in sessions.into_iter().take(SESSIONS_SEARCHED) {
		for window in windows(fs, &root.join(&session)).await {
			candidates.extend(copilot_logs(fs, &window).await);
		}
	}
	Ok(select_recent(candidates, now))
}

async fn windows(fs: &impl Filesystem, session: &Path) -> Vec<Path> {
	let entries = match fs.read_dir(session).await {
		Ok(entries) => entries,
		Err(e) => {
			log::warn!("skipping session {}, {}", session, e.human());
			return Vec::new();
		},
	};
	let mut windows = Vec::new();
	for name in entries.into_iter().filter(|name| name.starts_with("window")) {
		let path = session.join(&name);
		match fs.metadata(&path).await {
			Ok(meta) if meta.is_dir => windows.push((meta.modified, path)),
			Ok(_) => (),
			Err(e) => log::debug!("skipping window {}, {}", path, e.human()),
		}
	}
	windows.sort_by(|a, b| b.cmp(a));
	windows.into_iter().map(|(_, path)| path).collect()
}

async fn copilot_logs(fs: &impl Filesystem, window: &Path) -> Vec<LogCandidate> {
	let dir = window.join("exthost").join(COPILOT_CHAT_DIR);
	if !fs.exists(&dir).await {
		return Vec::new();
	}
	let entries = match fs.read_dir(&dir).await {
		Ok(entries) => entries,
		Err(e) => {
			log::warn!("skipping {}, {}", dir, e.human());
			return Vec::new();
		},
	};
	let mut logs = Vec::new();
	for name in entries.into_iter().filter(|name| name.ends_with(".log")) {
		let path = dir.join(&name);
		match fs.metadata(&path).await {
			Ok(meta) if meta.is_file => logs.push(LogCandidate { path, modified: meta.modified }),
			Ok(_) => (),
			Err(e) => log::debug!("skipping log {}, {}", path, e.human()),
		}
	}
	logs
}

/// Drops stale candidates and, if any candidate is active, everything that is not.
pub fn select_recent(mut candidates: Vec<LogCandidate>, now: DateTime<Utc>) -> Vec<LogCandidate> {
	candidates.retain(|candidate| now - candidate.modified <= recency_window());
	if candidates.iter().any(|candidate| now - candidate.modified <= active_window()) {
		candidates.retain(|candidate| now - candidate.modified <= active_window());
	}
	candidates.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
	let mut seen = BTreeSet::new();
	candidates.retain(|candidate| seen.insert(candidate.path.clone()));
	candidates
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::fs::memory::{at, MemoryFs};
	use futures::executor::block_on;

	const ROOT: &str = "/home/user/.config/Code/logs";
	const HOUR: i64 = 60 * 60;

	fn log_path(session: &str, window: &str, file: &str) -> String {
		format!("{}/{}/{}/exthost/GitHub.copilot-chat/{}", ROOT, session, window, file)
	}

	fn found(fs: &MemoryFs, now: i64) -> Vec<String> {
		block_on(find_logs(fs, &Path::from(ROOT), at(now))).unwrap().into_iter().map(|c| c.path.to_string()).collect()
	}

	#[test]
	fn test_logs_root() {
		assert_eq!(logs_root_for(OS::Linux, None, "/home/user", false).to_str(), "/home/user/.config/Code/logs");
		assert_eq!(
			logs_root_for(OS::MacOS, None, "/Users/user", true).to_str(),
			"/Users/user/Library/Application Support/Code - Insiders/logs"
		);
		assert_eq!(
			logs_root_for(OS::Windows, Some("C:\\Users\\user\\AppData\\Roaming".to_owned()), "C:\\Users\\user", false).to_str(),
			"C:\\Users\\user\\AppData\\Roaming\\Code\\logs"
		);
	}

	#[test]
	fn test_session_dir_pattern() {
		assert!(is_session_dir("20250319T171247"));
		assert!(!is_session_dir("20250319T17124"));
		assert!(!is_session_dir("20250319T171247-old"));
		assert!(!is_session_dir("window1"));
	}

	#[test]
	fn test_missing_root_is_empty() {
		assert!(found(&MemoryFs::new(), 0).is_empty());
	}

	#[test]
	fn test_session_without_windows_is_empty() {
		let fs = MemoryFs::new();
		fs.mkdir(&format!("{}/20250319T171247", ROOT), at(0));
		fs.mkdir(&format!("{}/20250319T171247/output_logging_20250319T171247", ROOT), at(0));
		assert!(found(&fs, 0).is_empty());
	}

	#[test]
	fn test_only_two_newest_sessions() {
		let fs = MemoryFs::new();
		fs.write(&log_path("20250317T090000", "window1", "a.log"), b"", at(-3));
		fs.write(&log_path("20250318T090000", "window1", "b.log"), b"", at(-2));
		fs.write(&log_path("20250319T090000", "window1", "c.log"), b"", at(-1));
		fs.write(&log_path("20250319T090000", "window1", "notes.txt"), b"", at(-1));
		fs.mkdir(&format!("{}/not-a-session", ROOT), at(0));
		assert_eq!(
			found(&fs, 0),
			vec![log_path("20250319T090000", "window1", "c.log"), log_path("20250318T090000", "window1", "b.log")]
		);
	}

	#[test]
	fn test_active_files_take_precedence() {
		let fs = MemoryFs::new();
		fs.write(&log_path("20250319T090000", "window1", "stale.log"), b"", at(-25 * HOUR));
		fs.write(&log_path("20250319T090000", "window1", "old.log"), b"", at(-3 * HOUR));
		fs.write(&log_path("20250319T090000", "window2", "fresh.log"), b"", at(-10 * 60));
		assert_eq!(found(&fs, 0), vec![log_path("20250319T090000", "window2", "fresh.log")]);
		assert_eq!(found(&fs, 2 * HOUR), vec![
			log_path("20250319T090000", "window2", "fresh.log"),
			log_path("20250319T090000", "window1", "old.log"),
		]);
		assert!(found(&fs, 30 * HOUR).is_empty());
	}

	#[test]
	fn test_window_without_copilot_chat() {
		let fs = MemoryFs::new();
		fs.mkdir(&format!("{}/20250319T090000/window1/exthost/vscode.git", ROOT), at(0));
		fs.write(&log_path("20250319T090000", "window2", "chat.log"), b"", at(0));
		assert_eq!(found(&fs, 0), vec![log_path("20250319T090000", "window2", "chat.log")]);
	}
}
