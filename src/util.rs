use chrono::{DateTime, Utc};
use evscode::{E, R};
use wasm_bindgen::JsValue;

pub mod fs;
pub mod path;
pub mod timers;

pub fn env(key: &str) -> Option<String> {
	js_sys::Reflect::get(&node_sys::process::ENV, &JsValue::from_str(key)).ok().and_then(|value| value.as_string())
}

pub fn time_now() -> DateTime<Utc> {
	Utc::now()
}

pub fn plural(x: usize, singular: &str, plural: &str) -> String {
	format!("{} {}", x, if x == 1 { singular } else { plural })
}

#[test]
fn test_plural() {
	assert_eq!(plural(1, "file", "files"), "1 file");
	assert_eq!(plural(0, "file", "files"), "0 files");
	assert_eq!(plural(3, "file", "files"), "3 files");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OS {
	Windows,
	Linux,
	MacOS,
}

impl OS {
	pub fn query() -> R<OS> {
		OS::from_platform(node_sys::process::PLATFORM.as_str())
	}

	pub fn from_platform(platform: &str) -> R<OS> {
		match platform {
			"linux" | "freebsd" | "openbsd" => Ok(OS::Linux),
			"win32" => Ok(OS::Windows),
			"darwin" => Ok(OS::MacOS),
			platform => Err(E::error(format!("running on unrecognized platform {}", platform))),
		}
	}
}

#[test]
fn test_os_from_platform() {
	assert_eq!(OS::from_platform("win32").unwrap(), OS::Windows);
	assert_eq!(OS::from_platform("darwin").unwrap(), OS::MacOS);
	assert_eq!(OS::from_platform("openbsd").unwrap(), OS::Linux);
	assert!(OS::from_platform("aix").is_err());
}
