use serde::Serializer;
use std::{fmt, ops};

/// Native path string as received from Node.js.
///
/// Joining uses the separator the path already uses, so paths built from `%APPDATA%` keep
/// backslashes and everything else gets forward slashes.
#[derive(Clone, Hash, PartialOrd, PartialEq, Ord, Eq)]
pub struct Path {
	buf: String,
}

impl Path {
	/// Converts a native-encoded string received from JS to a [`Path`].
	pub fn from_native(buf: String) -> Path {
		Path { buf }
	}

	pub fn to_str(&self) -> &str {
		&self.buf
	}

	pub fn join(&self, key: impl AsRef<str>) -> Path {
		let sep = self.separator();
		let base = self.buf.trim_end_matches(|c| c == '/' || c == '\\');
		let key = key.as_ref().trim_start_matches(|c| c == '/' || c == '\\');
		if self.buf.is_empty() {
			return Path::from_native(key.to_owned());
		}
		Path::from_native(format!("{}{}{}", base, sep, key))
	}

	pub fn file_name(&self) -> &str {
		let trimmed = self.buf.trim_end_matches(|c| c == '/' || c == '\\');
		match trimmed.rfind(|c| c == '/' || c == '\\') {
			Some(i) => &trimmed[i + 1..],
			None => trimmed,
		}
	}

	pub fn parent(&self) -> Path {
		let trimmed = self.buf.trim_end_matches(|c| c == '/' || c == '\\');
		match trimmed.rfind(|c| c == '/' || c == '\\') {
			Some(0) => Path::from_native(trimmed[..1].to_owned()),
			Some(i) => Path::from_native(trimmed[..i].to_owned()),
			None => Path::from_native(String::new()),
		}
	}

	fn separator(&self) -> char {
		if self.buf.contains('\\') && !self.buf.contains('/') { '\\' } else { '/' }
	}
}

impl From<&str> for Path {
	fn from(s: &str) -> Self {
		Path::from_native(s.to_owned())
	}
}

impl fmt::Debug for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<String as fmt::Debug>::fmt(&self.buf, f)
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<String as fmt::Display>::fmt(&self.buf, f)
	}
}

impl serde::Serialize for Path {
	fn serialize<S>(&self, serializer: S) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
	where
		S: Serializer,
	{
		self.buf.serialize(serializer)
	}
}

impl ops::Deref for Path {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.buf
	}
}

#[test]
fn test_join() {
	let unix = Path::from("/home/user/.config");
	assert_eq!(unix.join("Code").join("logs").to_str(), "/home/user/.config/Code/logs");
	assert_eq!(Path::from("/tmp/").join("a.log").to_str(), "/tmp/a.log");
	let windows = Path::from("C:\\Users\\user\\AppData\\Roaming");
	assert_eq!(windows.join("Code - Insiders").to_str(), "C:\\Users\\user\\AppData\\Roaming\\Code - Insiders");
}

#[test]
fn test_file_name_and_parent() {
	let path = Path::from("/logs/20250319T171247/window1/exthost/GitHub.copilot-chat/GitHub Copilot Chat.log");
	assert_eq!(path.file_name(), "GitHub Copilot Chat.log");
	assert_eq!(path.parent().file_name(), "GitHub.copilot-chat");
	assert_eq!(Path::from("C:\\logs\\main.log").file_name(), "main.log");
	assert_eq!(Path::from("/logs").parent().to_str(), "/");
}
