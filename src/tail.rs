//! Reading only the newly appended part of growing log files.

use crate::util::{
	fs::Filesystem, path::Path
};
use chrono::{DateTime, Utc};
use evscode::R;
use std::collections::BTreeMap;

/// Longest unterminated line kept in memory; anything longer is handed out as a line of its own.
const MAX_PENDING: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartAt {
	Beginning,
	End,
}

#[derive(Clone, Debug)]
pub struct WatchedFile {
	pub path: Path,
	pub offset: u64,
	pub last_activity: Option<DateTime<Utc>>,
	pending: Vec<u8>,
}

/// Byte offsets of tracked files.
///
/// Offsets of untracked files are remembered, so a file that briefly drops out of the log
/// search and comes back is not read again from the start.
pub struct Tailer<F> {
	fs: F,
	files: BTreeMap<Path, WatchedFile>,
	dormant: BTreeMap<Path, u64>,
}

impl<F: Filesystem> Tailer<F> {
	pub fn new(fs: F) -> Tailer<F> {
		Tailer { fs, files: BTreeMap::new(), dormant: BTreeMap::new() }
	}

	pub fn fs(&self) -> &F {
		&self.fs
	}

	pub fn files(&self) -> impl Iterator<Item=&WatchedFile> {
		self.files.values()
	}

	#[cfg(test)]
	pub fn is_tracked(&self, path: &Path) -> bool {
		self.files.contains_key(path)
	}

	/// Starts tracking a file, returning false if it was already tracked.
	pub async fn track(&mut self, path: Path, start: StartAt) -> bool {
		if self.files.contains_key(&path) {
			return false;
		}
		let offset = match (self.dormant.remove(&path), start) {
			(Some(offset), _) => offset,
			(None, StartAt::Beginning) => 0,
			(None, StartAt::End) => match self.fs.metadata(&path).await {
				Ok(meta) => meta.len,
				Err(e) => {
					log::warn!("could not find the end of {}, reading from the start, {}", path, e.human());
					0
				},
			},
		};
		log::debug!("tracking {} from byte {}", path, offset);
		self.files.insert(path.clone(), WatchedFile { path, offset, last_activity: None, pending: Vec::new() });
		true
	}

	pub fn untrack(&mut self, path: &Path) -> bool {
		match self.files.remove(path) {
			Some(file) => {
				log::debug!("no longer tracking {}", path);
				self.dormant.insert(file.path, file.offset);
				true
			},
			None => false,
		}
	}

	/// Untracks every file not accepted by the predicate, returning the removed paths.
	pub fn retain(&mut self, mut keep: impl FnMut(&Path) -> bool) -> Vec<Path> {
		let removed: Vec<Path> = self.files.keys().filter(|path| !keep(path)).cloned().collect();
		for path in &removed {
			self.untrack(path);
		}
		removed
	}

	/// Reads bytes appended since the last read and returns the lines they completed.
	///
	/// A file that shrank is read again from the start. Untracked files and files that did not
	/// grow yield `None` without reading any content.
	pub async fn read(&mut self, path: &Path, now: DateTime<Utc>) -> R<Option<String>> {
		let offset = match self.files.get(path) {
			Some(file) => file.offset,
			None => return Ok(None),
		};
		let meta = self.fs.metadata(path).await?;
		let offset = if meta.len < offset {
			log::info!("{} shrank from {} to {} bytes, reading from the start", path, offset, meta.len);
			if let Some(file) = self.files.get_mut(path) {
				file.offset = 0;
				file.pending.clear();
			}
			0
		} else {
			offset
		};
		if meta.len <= offset {
			return Ok(None);
		}
		let bytes = self.fs.read_range(path, offset, meta.len).await?;
		let file = match self.files.get_mut(path) {
			Some(file) => file,
			None => return Ok(None),
		};
		file.offset = offset + bytes.len() as u64;
		if bytes.is_empty() {
			return Ok(None);
		}
		file.last_activity = Some(now);
		file.pending.extend_from_slice(&bytes);
		let complete = match file.pending.iter().rposition(|b| *b == b'\n') {
			Some(last_newline) => file.pending.drain(..=last_newline).collect::<Vec<u8>>(),
			None if file.pending.len() >= MAX_PENDING => {
				log::debug!("{} has a line longer than {} bytes, splitting it", path, MAX_PENDING);
				let mut line = std::mem::take(&mut file.pending);
				line.push(b'\n');
				line
			},
			None => return Ok(None),
		};
		Ok(Some(String::from_utf8_lossy(&complete).into_owned()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::fs::memory::{at, MemoryFs};
	use futures::executor::block_on;

	const LOG: &str = "/logs/main.log";

	fn setup(content: &str, start: StartAt) -> (MemoryFs, Tailer<MemoryFs>) {
		let fs = MemoryFs::new();
		fs.write(LOG, content.as_bytes(), at(0));
		let mut tailer = Tailer::new(fs.clone());
		assert!(block_on(tailer.track(Path::from(LOG), start)));
		(fs, tailer)
	}

	#[test]
	fn test_reads_only_appended_lines() {
		let (fs, mut tailer) = setup("old line\n", StartAt::End);
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(1))).unwrap(), None);
		fs.append(LOG, b"new line\n");
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(2))).unwrap().as_deref(), Some("new line\n"));
		let file = tailer.files().next().unwrap();
		assert_eq!(file.offset, 18);
		assert_eq!(file.last_activity, Some(at(2)));
	}

	#[test]
	fn test_unchanged_size_does_not_read() {
		let (fs, mut tailer) = setup("a\n", StartAt::Beginning);
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(1))).unwrap().as_deref(), Some("a\n"));
		assert_eq!(fs.reads(), 1);
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(2))).unwrap(), None);
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(3))).unwrap(), None);
		assert_eq!(fs.reads(), 1);
	}

	#[test]
	fn test_truncation_restarts_from_zero() {
		let (fs, mut tailer) = setup("first session line\npartial", StartAt::Beginning);
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(1))).unwrap().as_deref(), Some("first session line\n"));
		fs.write(LOG, b"rotated\n", at(2));
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(3))).unwrap().as_deref(), Some("rotated\n"));
		assert_eq!(tailer.files().next().unwrap().offset, 8);
	}

	#[test]
	fn test_split_line_is_completed_once() {
		let (fs, mut tailer) = setup("", StartAt::Beginning);
		fs.append(LOG, b"message 0 returned. finish");
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(1))).unwrap(), None);
		fs.append(LOG, b" reason: [stop]\nnext");
		assert_eq!(
			block_on(tailer.read(&Path::from(LOG), at(2))).unwrap().as_deref(),
			Some("message 0 returned. finish reason: [stop]\n")
		);
		fs.append(LOG, b"\n");
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(3))).unwrap().as_deref(), Some("next\n"));
	}

	#[test]
	fn test_overlong_line_is_flushed() {
		let (fs, mut tailer) = setup("", StartAt::Beginning);
		fs.append(LOG, &vec![b'x'; MAX_PENDING - 1]);
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(1))).unwrap(), None);
		fs.append(LOG, b"xy");
		let flushed = block_on(tailer.read(&Path::from(LOG), at(2))).unwrap().unwrap();
		assert_eq!(flushed.len(), MAX_PENDING + 2);
		assert!(flushed.ends_with("xy\n"));
		fs.append(LOG, b"short\n");
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(3))).unwrap().as_deref(), Some("short\n"));
	}

	#[test]
	fn test_track_is_idempotent_and_remembers_offsets() {
		let (fs, mut tailer) = setup("one\n", StartAt::Beginning);
		assert!(!block_on(tailer.track(Path::from(LOG), StartAt::End)));
		block_on(tailer.read(&Path::from(LOG), at(1))).unwrap();
		assert_eq!(tailer.retain(|_| false), vec![Path::from(LOG)]);
		assert!(!tailer.is_tracked(&Path::from(LOG)));
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(2))).unwrap(), None);
		fs.append(LOG, b"two\n");
		assert!(block_on(tailer.track(Path::from(LOG), StartAt::Beginning)));
		assert_eq!(block_on(tailer.read(&Path::from(LOG), at(3))).unwrap().as_deref(), Some("two\n"));
	}

	#[test]
	fn test_missing_file_errors_but_stays_tracked() {
		let fs = MemoryFs::new();
		let mut tailer = Tailer::new(fs);
		assert!(block_on(tailer.track(Path::from("/logs/gone.log"), StartAt::End)));
		assert!(block_on(tailer.read(&Path::from("/logs/gone.log"), at(1))).is_err());
		assert!(tailer.is_tracked(&Path::from("/logs/gone.log")));
	}
}
