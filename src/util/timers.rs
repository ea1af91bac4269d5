use crate::util::path::Path;
use evscode::{E, R};
use futures::channel::oneshot;
use std::time::Duration;
use wasm_bindgen::{closure::Closure, JsValue};

/// Repeating Node.js timer, cleared when dropped.
pub struct Interval {
	timeout: node_sys::timers::Timeout,
	_callback: Closure<dyn FnMut()>,
}

impl Interval {
	pub fn new(period: Duration, callback: impl FnMut()+'static) -> Interval {
		let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
		let timeout = node_sys::timers::set_interval(&callback, period.as_secs_f64() * 1000.0);
		Interval { timeout, _callback: callback }
	}
}

impl Drop for Interval {
	fn drop(&mut self) {
		node_sys::timers::clear_interval(&self.timeout);
	}
}

pub async fn sleep(delay: Duration) {
	let (tx, rx) = oneshot::channel();
	node_sys::timers::set_timeout(
		&Closure::once_into_js(move || {
			let _ = tx.send(());
		}),
		delay.as_secs_f64() * 1000.0,
	);
	let _ = rx.await;
}

/// Handle to `fs.watch` on a single path, closed when dropped.
pub struct Watch {
	watcher: node_sys::fs::FSWatcher,
	_on_change: Closure<dyn FnMut(JsValue, JsValue)>,
	_on_error: Closure<dyn FnMut(JsValue)>,
}

impl Watch {
	/// Calls `on_change` on every change event. Watch errors are logged and the watch goes quiet.
	pub fn new(path: &Path, mut on_change: impl FnMut()+'static) -> R<Watch> {
		let on_change = Closure::wrap(Box::new(move |_event: JsValue, _filename: JsValue| {
			on_change();
		}) as Box<dyn FnMut(JsValue, JsValue)>);
		let watcher = node_sys::fs::watch(path.to_str(), &on_change)
			.map_err(|e| E::from_js(e).context(format!("could not watch {}", path)))?;
		let described = path.to_string();
		let on_error = Closure::wrap(Box::new(move |err: JsValue| {
			log::warn!("watching {} failed, {}", described, E::from_js(err).human());
		}) as Box<dyn FnMut(JsValue)>);
		watcher.on_1("error", &on_error);
		Ok(Watch { watcher, _on_change: on_change, _on_error: on_error })
	}
}

impl Drop for Watch {
	fn drop(&mut self) {
		self.watcher.close();
	}
}
