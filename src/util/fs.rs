use crate::util::path::Path;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use evscode::{error::ResultExt, E, R};
use futures::channel::oneshot;
use std::future::Future;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
	pub len: u64,
	pub modified: DateTime<Utc>,
	pub is_dir: bool,
	pub is_file: bool,
}

/// Read-only view of the filesystem needed to find and tail log files.
#[async_trait(?Send)]
pub trait Filesystem {
	async fn exists(&self, path: &Path) -> bool;

	/// Names of the directory entries, without the directory prefix.
	async fn read_dir(&self, path: &Path) -> R<Vec<String>>;

	async fn metadata(&self, path: &Path) -> R<Metadata>;

	/// Bytes in `[start, end)`. Fewer bytes are returned if the file is shorter.
	async fn read_range(&self, path: &Path, start: u64, end: u64) -> R<Vec<u8>>;
}

/// Filesystem access through Node.js `fs` callbacks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeFs;

#[async_trait(?Send)]
impl Filesystem for NodeFs {
	async fn exists(&self, path: &Path) -> bool {
		let (tx, rx) = make_callback1();
		node_sys::fs::access(path.to_str(), tx);
		rx.await.is_ok()
	}

	async fn read_dir(&self, path: &Path) -> R<Vec<String>> {
		let (tx, rx) = make_callback2();
		node_sys::fs::readdir(
			path.to_str(),
			node_sys::fs::ReaddirOptions { encoding: Some("utf8"), with_file_types: None },
			tx,
		);
		let entries = rx
			.await
			.map_err(|e| E::from(e).context(format!("could not list directory {}", path)))?
			.dyn_into::<js_sys::Array>()
			.map_err(|_| E::error(format!("listing of {} is not an array", path)))?;
		Ok(entries.iter().filter_map(|entry| entry.as_string()).collect())
	}

	async fn metadata(&self, path: &Path) -> R<Metadata> {
		let (tx, rx) = make_callback2();
		node_sys::fs::stat(path.to_str(), node_sys::fs::StatOptions { bigint: false }, tx);
		let stats: node_sys::fs::Stats =
			rx.await.map_err(|e| E::from(e).context(format!("could not stat {}", path)))?.unchecked_into();
		let modified = Utc
			.timestamp_millis_opt(stats.mtime_ms() as i64)
			.single()
			.wrap(format!("modification time of {} is out of range", path))?;
		Ok(Metadata { len: stats.size() as u64, modified, is_dir: stats.is_directory(), is_file: stats.is_file() })
	}

	async fn read_range(&self, path: &Path, start: u64, end: u64) -> R<Vec<u8>> {
		let length = end.saturating_sub(start);
		let (tx, rx) = make_callback2();
		node_sys::fs::open(path.to_str(), "r", tx);
		let fd = rx
			.await
			.map_err(|e| E::from(e).context(format!("could not open {}", path)))?
			.as_f64()
			.wrap("file descriptor is not a number")?;
		let buffer = node_sys::buffer::Buffer::alloc(length as f64);
		let (tx, rx) = make_callback2();
		node_sys::fs::read(fd, &buffer, 0.0, length as f64, start as f64, tx);
		let bytes_read = rx.await;
		let (tx, rx) = make_callback1();
		node_sys::fs::close(fd, tx);
		if let Err(e) = rx.await {
			log::warn!("could not close {}, {}", path, E::from(e).human());
		}
		let bytes_read = bytes_read.map_err(|e| E::from(e).context(format!("could not read {}", path)))?.as_f64().unwrap_or(0.0);
		let mut bytes = buffer.to_vec();
		bytes.truncate(bytes_read as usize);
		Ok(bytes)
	}
}

fn make_callback1() -> (JsValue, impl Future<Output=Result<(), js_sys::Error>>) {
	let (tx, rx) = oneshot::channel();
	let closure = Closure::once_into_js(move |err: JsValue| {
		let _ = tx.send(match err.dyn_into::<js_sys::Error>() {
			Ok(err) => Err(err),
			Err(_) => Ok(()),
		});
	});
	let completion = async move { rx.await.unwrap_or_else(|_| Err(js_sys::Error::new("callback was dropped"))) };
	(closure, completion)
}

fn make_callback2() -> (JsValue, impl Future<Output=Result<JsValue, js_sys::Error>>) {
	let (tx, rx) = oneshot::channel();
	let closure = Closure::once_into_js(move |err: JsValue, value: JsValue| {
		let _ = tx.send(match err.dyn_into::<js_sys::Error>() {
			Ok(err) => Err(err),
			Err(_) => Ok(value),
		});
	});
	let completion = async move { rx.await.unwrap_or_else(|_| Err(js_sys::Error::new("callback was dropped"))) };
	(closure, completion)
}

#[cfg(test)]
pub mod memory {
	use super::{Filesystem, Metadata};
	use crate::util::path::Path;
	use async_trait::async_trait;
	use chrono::{DateTime, TimeZone, Utc};
	use evscode::{E, R};
	use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

	#[derive(Default)]
	struct Tree {
		files: BTreeMap<String, (Vec<u8>, DateTime<Utc>)>,
		dirs: BTreeMap<String, DateTime<Utc>>,
		reads: usize,
	}

	/// In-memory filesystem with `/`-separated paths. Clones share the same tree.
	#[derive(Clone, Default)]
	pub struct MemoryFs {
		tree: Rc<RefCell<Tree>>,
	}

	impl MemoryFs {
		pub fn new() -> MemoryFs {
			MemoryFs::default()
		}

		pub fn mkdir(&self, path: &str, modified: DateTime<Utc>) {
			let mut tree = self.tree.borrow_mut();
			let mut prefix = String::new();
			for part in path.split('/').filter(|part| !part.is_empty()) {
				prefix = format!("{}/{}", prefix, part);
				tree.dirs.entry(prefix.clone()).or_insert(modified);
			}
			tree.dirs.insert(path.to_owned(), modified);
		}

		pub fn write(&self, path: &str, content: &[u8], modified: DateTime<Utc>) {
			self.mkdir_parents(path, modified);
			self.tree.borrow_mut().files.insert(path.to_owned(), (content.to_vec(), modified));
		}

		pub fn append(&self, path: &str, content: &[u8]) {
			let mut tree = self.tree.borrow_mut();
			if let Some((bytes, _)) = tree.files.get_mut(path) {
				bytes.extend_from_slice(content);
			}
		}

		pub fn reads(&self) -> usize {
			self.tree.borrow().reads
		}

		fn mkdir_parents(&self, path: &str, modified: DateTime<Utc>) {
			if let Some(i) = path.rfind('/') {
				if i > 0 && !self.tree.borrow().dirs.contains_key(&path[..i]) {
					self.mkdir(&path[..i], modified);
				}
			}
		}
	}

	#[async_trait(?Send)]
	impl Filesystem for MemoryFs {
		async fn exists(&self, path: &Path) -> bool {
			let tree = self.tree.borrow();
			tree.files.contains_key(path.to_str()) || tree.dirs.contains_key(path.to_str())
		}

		async fn read_dir(&self, path: &Path) -> R<Vec<String>> {
			let tree = self.tree.borrow();
			if !tree.dirs.contains_key(path.to_str()) {
				return Err(E::error(format!("ENOENT: no such file or directory, scandir '{}'", path)));
			}
			let prefix = format!("{}/", path.to_str());
			let children = tree
				.dirs
				.keys()
				.chain(tree.files.keys())
				.filter_map(|entry| entry.strip_prefix(&prefix))
				.filter(|rest| !rest.contains('/'))
				.map(str::to_owned)
				.collect();
			Ok(children)
		}

		async fn metadata(&self, path: &Path) -> R<Metadata> {
			let tree = self.tree.borrow();
			if let Some((bytes, modified)) = tree.files.get(path.to_str()) {
				Ok(Metadata { len: bytes.len() as u64, modified: *modified, is_dir: false, is_file: true })
			} else if let Some(modified) = tree.dirs.get(path.to_str()) {
				Ok(Metadata { len: 0, modified: *modified, is_dir: true, is_file: false })
			} else {
				Err(E::error(format!("ENOENT: no such file or directory, stat '{}'", path)))
			}
		}

		async fn read_range(&self, path: &Path, start: u64, end: u64) -> R<Vec<u8>> {
			let mut tree = self.tree.borrow_mut();
			tree.reads += 1;
			let (bytes, _) =
				tree.files.get(path.to_str()).ok_or_else(|| E::error(format!("ENOENT: no such file, open '{}'", path)))?;
			let start = (start as usize).min(bytes.len());
			let end = (end as usize).min(bytes.len()).max(start);
			Ok(bytes[start..end].to_vec())
		}
	}

	pub fn at(secs: i64) -> DateTime<Utc> {
		Utc.timestamp_opt(1_742_400_000 + secs, 0).unwrap()
	}
}
