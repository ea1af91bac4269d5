macro_rules! wasm_abi_serde {
	($t:ty) => {
		impl wasm_bindgen::convert::IntoWasmAbi for $t {
			type Abi = <wasm_bindgen::JsValue as wasm_bindgen::convert::IntoWasmAbi>::Abi;

			fn into_abi(self) -> Self::Abi {
				wasm_bindgen::JsValue::from_serde(&self).unwrap_or(wasm_bindgen::JsValue::UNDEFINED).into_abi()
			}
		}

		impl wasm_bindgen::describe::WasmDescribe for $t {
			fn describe() {
				<wasm_bindgen::JsValue as wasm_bindgen::describe::WasmDescribe>::describe()
			}
		}
	};
}

/// Node.js [buffer](https://nodejs.org/api/buffer.html)
pub mod buffer {

	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "buffer")]
	extern "C" {

		#[wasm_bindgen(extends = js_sys::Uint8Array)]
		pub type Buffer;

		#[wasm_bindgen(static_method_of = Buffer)]
		pub fn alloc(size: f64) -> Buffer;

	}
}

pub mod console {

	use wasm_bindgen::prelude::*;

	#[wasm_bindgen]
	extern "C" {

		#[wasm_bindgen(js_namespace = console)]
		pub fn debug(message: &str);
		#[wasm_bindgen(js_namespace = console)]
		pub fn error(message: &str);
		#[wasm_bindgen(js_namespace = console)]
		pub fn info(message: &str);
		#[wasm_bindgen(js_namespace = console)]
		pub fn log(message: &str);
		#[wasm_bindgen(js_namespace = console)]
		pub fn warn(message: &str);

	}
}

/// Node.js [fs](https://nodejs.org/api/fs.html)
pub mod fs {

	use crate::buffer::Buffer;
	use serde::Serialize;
	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "fs")]
	extern "C" {

		pub type Stats;

		#[wasm_bindgen(method, getter)]
		pub fn size(this: &Stats) -> f64;

		#[wasm_bindgen(method, getter, js_name = mtimeMs)]
		pub fn mtime_ms(this: &Stats) -> f64;

		#[wasm_bindgen(method, js_name = isDirectory)]
		pub fn is_directory(this: &Stats) -> bool;

		#[wasm_bindgen(method, js_name = isFile)]
		pub fn is_file(this: &Stats) -> bool;

		/// Node.js [fs.FSWatcher](https://nodejs.org/api/fs.html#fs_class_fs_fswatcher)
		pub type FSWatcher;

		#[wasm_bindgen(method)]
		pub fn close(this: &FSWatcher);

		#[wasm_bindgen(method, js_name = on)]
		pub fn on_1(this: &FSWatcher, event: &str, callback: &Closure<dyn FnMut(JsValue)>);

		pub fn access(path: &str, callback: JsValue);

		pub fn close(fd: f64, callback: JsValue);

		pub fn open(path: &str, flags: &str, callback: JsValue);

		pub fn read(fd: f64, buffer: &Buffer, offset: f64, length: f64, position: f64, callback: JsValue);

		pub fn readdir(path: &str, options: ReaddirOptions, callback: JsValue);

		pub fn stat(path: &str, options: StatOptions, callback: JsValue);

		/// Node.js [fs.watch](https://nodejs.org/api/fs.html#fs_fs_watch_filename_options_listener)
		#[wasm_bindgen(catch)]
		pub fn watch(filename: &str, listener: &Closure<dyn FnMut(JsValue, JsValue)>) -> Result<FSWatcher, JsValue>;

		/// Node.js [fs.writeFileSync](https://nodejs.org/api/fs.html#fs_fs_writefilesync_file_data_options)
		#[wasm_bindgen(js_name = writeFileSync, catch)]
		pub fn write_file_sync(file: &str, data: &str) -> Result<(), JsValue>;

	}

	#[derive(Serialize)]
	pub struct ReaddirOptions<'a> {
		pub encoding: Option<&'a str>,
		#[serde(rename = "withFileTypes")]
		pub with_file_types: Option<bool>,
	}
	wasm_abi_serde!(ReaddirOptions<'_>);

	#[derive(Serialize)]
	pub struct StatOptions {
		pub bigint: bool,
	}
	wasm_abi_serde!(StatOptions);
}

/// Node.js [os](https://nodejs.org/api/os.html)
pub mod os {

	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "os")]
	extern "C" {

		/// Node.js [os.homedir](https://nodejs.org/api/os.html#os_os_homedir)
		pub fn homedir() -> String;

	}
}

/// Node.js [process](https://nodejs.org/api/process.html)
pub mod process {

	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "process")]
	extern "C" {

		#[wasm_bindgen(js_name = env)]
		pub static ENV: JsValue;

		#[wasm_bindgen(js_name = platform)]
		pub static PLATFORM: String;

	}
}

/// Node.js [timers](https://nodejs.org/api/timers.html)
pub mod timers {

	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(module = "timers")]
	extern "C" {

		pub type Timeout;

		#[wasm_bindgen(js_name = clearInterval)]
		pub fn clear_interval(timeout: &Timeout);

		#[wasm_bindgen(js_name = clearTimeout)]
		pub fn clear_timeout(timeout: &Timeout);

		#[wasm_bindgen(js_name = setInterval)]
		pub fn set_interval(callback: &Closure<dyn FnMut()>, delay: f64) -> Timeout;

		#[wasm_bindgen(js_name = setTimeout)]
		pub fn set_timeout(callback: &JsValue, delay: f64) -> Timeout;

	}
}
