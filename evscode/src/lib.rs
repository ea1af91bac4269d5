//! Evscode is a Rust framework for writing WebAssembly-based Visual Studio Code extensions.
//!
//! Extensions declare their commands with [`command`], their settings with [`config`], and tie
//! everything together with a single [`plugin!`] invocation in the crate root. The macro exports
//! the `activate`/`deactivate` functions VS Code calls and a function that writes the manifest.

#![allow(clippy::new_ret_no_self)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
mod glue;
pub mod goodies;
#[doc(hidden)]
pub mod macros;
pub mod marshal;
pub mod meta;
pub mod stdlib;

pub use config::{Config, Configurable};
pub use error::{E, R};
pub use evscode_codegen::{command, config, plugin};
use std::{future::Future, pin::Pin};
pub use stdlib::*;

/// A boxed future that is not required to be [`Send`], because WebAssembly has no threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output=T>+'a>>;

/// Spawn an asynchronous operation concurrently to the active one.
/// If it fails, the error is logged and shown to the user.
pub fn spawn(f: impl Future<Output=R<()>>+'static) {
	wasm_bindgen_futures::spawn_local(async move {
		if let Err(e) = f.await {
			e.emit();
		}
	});
}
