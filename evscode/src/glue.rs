use crate::{meta::Package, E};
use once_cell::sync::OnceCell;
use std::panic::PanicInfo;
use wasm_bindgen::closure::Closure;

mod package_json;

#[doc(hidden)]
pub fn activate(_ctx: &vscode_sys::ExtensionContext, pkg: Package) {
	std::panic::set_hook(Box::new(panic_hook));
	if PACKAGE.set(pkg).is_err() {
		log::error!("extension was activated twice");
		return;
	}
	let pkg = match PACKAGE.get() {
		Some(pkg) => pkg,
		None => return,
	};
	for command in &pkg.commands {
		let trigger = command.trigger;
		let closure = Closure::wrap(Box::new(move || {
			crate::spawn(trigger());
		}) as Box<dyn FnMut()>);
		vscode_sys::commands::register_command(&command.id.to_string(), &closure);
		closure.forget();
	}
	if let Some(on_activate) = pkg.on_activate {
		crate::spawn(on_activate());
	}
}

#[doc(hidden)]
pub async fn deactivate() {
	if let Some(on_deactivate) = PACKAGE.get().and_then(|pkg| pkg.on_deactivate) {
		if let Err(e) = on_deactivate().await {
			e.emit();
		}
	}
}

#[doc(hidden)]
pub fn generate_package_json(path: &str, pkg: Package) {
	let package_json = package_json::construct_package_json(&pkg);
	let written = serde_json::to_string_pretty(&package_json)
		.map_err(E::from_std)
		.and_then(|text| node_sys::fs::write_file_sync(path, &text).map_err(E::from_js));
	if let Err(e) = written {
		node_sys::console::error(&format!("failed to write {}, {}", path, e.human()));
	}
}

fn panic_hook(info: &PanicInfo) {
	let payload = if let Some(payload) = info.payload().downcast_ref::<&str>() {
		(*payload).to_owned()
	} else if let Some(payload) = info.payload().downcast_ref::<String>() {
		payload.clone()
	} else {
		"???".to_owned()
	};
	let location = info
		.location()
		.map_or("???".to_owned(), |location| format!("{}:{}:{}", location.file(), location.line(), location.column()));
	let name = PACKAGE.get().map_or("extension", |pkg| pkg.name);
	E::error(format!("{} panicked, {} at {}", name, payload, location)).emit();
}

pub(crate) static PACKAGE: OnceCell<Package> = OnceCell::new();
