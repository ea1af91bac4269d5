//! Conversion traits between Rust and JavaScript types.

use std::fmt::{self, Write};
use wasm_bindgen::JsValue;

/// Trait responsible for converting values between Rust and JavaScript.
pub trait Marshal: Sized {
	/// Convert a Rust value to JavaScript.
	fn to_js(&self) -> JsValue;
	/// Convert a JavaScript value to a Rust value.
	fn from_js(raw: JsValue) -> Result<Self, String>;
}

impl Marshal for bool {
	fn to_js(&self) -> JsValue {
		JsValue::from_bool(*self)
	}

	fn from_js(raw: JsValue) -> Result<Self, String> {
		raw.as_bool().ok_or_else(|| type_error("boolean", &raw))
	}
}
impl Marshal for String {
	fn to_js(&self) -> JsValue {
		JsValue::from_str(self)
	}

	fn from_js(raw: JsValue) -> Result<Self, String> {
		raw.as_string().ok_or_else(|| type_error("string", &raw))
	}
}
impl Marshal for f64 {
	fn to_js(&self) -> JsValue {
		JsValue::from_f64(*self)
	}

	fn from_js(raw: JsValue) -> Result<Self, String> {
		raw.as_f64().ok_or_else(|| type_error("number", &raw))
	}
}
impl Marshal for u64 {
	fn to_js(&self) -> JsValue {
		JsValue::from_f64(*self as f64)
	}

	fn from_js(raw: JsValue) -> Result<Self, String> {
		match raw.as_f64() {
			Some(x) if x >= 0.0 && x.fract() == 0.0 => Ok(x as u64),
			_ => Err(type_error("non-negative integer", &raw)),
		}
	}
}
impl<T: Marshal> Marshal for Option<T> {
	fn to_js(&self) -> JsValue {
		self.as_ref().map_or(JsValue::NULL, Marshal::to_js)
	}

	fn from_js(raw: JsValue) -> Result<Self, String> {
		if raw.is_null() || raw.is_undefined() { Ok(None) } else { Ok(Some(T::from_js(raw)?)) }
	}
}

/// Describe a value that failed to convert.
pub fn type_error(expected: &'static str, raw: &JsValue) -> String {
	format!("expected {}, found `{:?}`", expected, raw)
}

/// Write `snake_case` or `SCREAMING_CASE` text as `camelCase`.
/// ```
/// let mut buf = String::new();
/// evscode::marshal::camel_case("DEFAULT_GAME", &mut buf).unwrap();
/// assert_eq!(buf, "defaultGame");
/// ```
pub fn camel_case(s: &str, f: &mut impl Write) -> fmt::Result {
	for (i, word) in s.split('_').filter(|word| !word.is_empty()).enumerate() {
		for (j, chr) in word.chars().enumerate() {
			if i != 0 && j == 0 {
				for upper in chr.to_uppercase() {
					f.write_char(upper)?;
				}
			} else {
				for lower in chr.to_lowercase() {
					f.write_char(lower)?;
				}
			}
		}
	}
	Ok(())
}

#[test]
fn test_camel_case() {
	let convert = |s: &str| {
		let mut buf = String::new();
		camel_case(s, &mut buf).unwrap();
		buf
	};
	assert_eq!(convert("copilot_arcade"), "copilotArcade");
	assert_eq!(convert("AUTO_START"), "autoStart");
	assert_eq!(convert("monitor"), "monitor");
	assert_eq!(convert("show_monitoring_status"), "showMonitoringStatus");
}
