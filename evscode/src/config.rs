//! Configuration system based on VS Code API, with strong typing built in.
//!
//! To add a configuration entry, write this in global scope of any file of an extension:
//! ```ignore
//! /// Fooification time limit, expressed in milliseconds
//! #[evscode::config]
//! static TIME_LIMIT: evscode::Config<Option<u64>> = Some(1500);
//! ```
//! and list it in the `configuration` field of `plugin!`. The entry will then be added to the
//! extension manifest. Values are read every time [`Config::get`] is called, so the extension
//! always sees the current settings.
//!
//! The system supports all types that implement the [`Configurable`] trait. If the conversion
//! provided via the [`Marshal`](../marshal/trait.Marshal.html) trait fails, the default value will
//! be used.

use crate::{marshal::Marshal, meta::Identifier};

macro_rules! optobject_impl {
	($obj:ident, ) => {};
	($obj:ident, optional $key:expr => $value:expr, $($rest:tt)*) => {
		if let Some(value) = $value {
			$obj[$key] = serde_json::Value::from(value);
		}
		optobject_impl!($obj, $($rest)*);
	};
	($obj:ident, $key:expr => $value:expr, $($rest:tt)*) => {
		$obj[$key] = serde_json::Value::from($value);
		optobject_impl!($obj, $($rest)*);
	};
}
macro_rules! optobject {
	{ $($token:tt)* } => {{
		let mut obj = serde_json::Value::Object(Default::default());
		optobject_impl!(obj, $($token)*);
		obj
	}};
}

/// Wrapper object for a configuration entry.
///
/// To get the current value, call the [`Config::get`] method.
#[derive(Debug)]
pub struct Config<T: Configurable> {
	id: Identifier,
	default: T,
}
impl<T: Configurable> Config<T> {
	#[doc(hidden)]
	pub fn placeholder(default: T, id: Identifier) -> Config<T> {
		Config { id, default }
	}

	/// Read the current value, falling back to the default if the user did not set it or set it to something invalid.
	pub fn get(&self) -> T {
		let tree = vscode_sys::workspace::get_configuration(&self.id.extension_id());
		let raw = tree.get(&self.id.inner_path());
		match T::from_js(raw) {
			Ok(value) => value,
			Err(e) => {
				log::warn!("invalid value of {}, {}", self.id, e);
				self.default.clone()
			},
		}
	}
}

/// A trait that allows a type to be used as a configuration values.
///
/// There does not exist a simple way to implement it for any custom types, because the VS Code
/// [documentation of config API][1] is lacking.
///
/// [1]: (https://code.visualstudio.com/api/references/contribution-points#contributes.configuration)
pub trait Configurable: Marshal+Clone {
	#[doc(hidden)]
	fn to_json(&self) -> serde_json::Value;
	#[doc(hidden)]
	fn schema(default: Option<&Self>) -> serde_json::Value;
}

macro_rules! simple_configurable {
	($rust:ty, $json:expr) => {
		impl Configurable for $rust {
			fn to_json(&self) -> serde_json::Value {
				self.clone().into()
			}

			fn schema(default: Option<&Self>) -> serde_json::Value {
				optobject! {
					"type" => $json,
					optional "default" => default.map(Self::to_json),
				}
			}
		}
	};
}

simple_configurable!(bool, "boolean");
simple_configurable!(String, "string");
simple_configurable!(f64, "number");
simple_configurable!(u64, "integer");

impl<T: Configurable> Configurable for Option<T> {
	fn to_json(&self) -> serde_json::Value {
		self.as_ref().map_or(serde_json::Value::Null, T::to_json)
	}

	fn schema(default: Option<&Option<T>>) -> serde_json::Value {
		let mut obj = T::schema(default.and_then(|default| default.as_ref()));
		let inner_type = obj["type"].take();
		obj["type"] = serde_json::json!(["null", inner_type]);
		if let Some(None) = default {
			obj["default"] = serde_json::Value::Null;
		}
		obj
	}
}

#[test]
fn test_schema() {
	assert_eq!(bool::schema(Some(&true)), serde_json::json!({"type": "boolean", "default": true}));
	assert_eq!(String::schema(None), serde_json::json!({"type": "string"}));
	assert_eq!(
		<Option<u64>>::schema(Some(&None)),
		serde_json::json!({"type": ["null", "integer"], "default": null})
	);
}
