#![recursion_limit = "128"]

extern crate proc_macro;

mod command;
mod config;
mod plugin;
mod util;

use proc_macro::TokenStream;

/// Register the function as a callable command with the given title and [keyboard shortcut](https://code.visualstudio.com/docs/getstarted/keybindings#_accepted-keys).
///
/// The shortcut is optional and can be omitted.
/// The function must be `async` and return `evscode::R<()>`. It also has to be listed in the `commands` field of [`plugin!`].
/// ```ignore
/// #[evscode::command(title = "Example Evscode Extension - Hello World", key = "ctrl+alt+5")]
/// async fn hello() -> evscode::R<()> {
/// 	evscode::Message::new::<()>("Hello, world!").show().await;
/// 	Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn command(params: TokenStream, item: TokenStream) -> TokenStream {
	command::generate(params, item)
}

/// Create a strongly-typed [config](../evscode/config/index.html) entry.
///
/// The entry id is derived from the module path, and the doc comment becomes its description.
/// The static has to be listed in the `configuration` field of [`plugin!`].
/// ```ignore
/// /// Fooification time limit, expressed in milliseconds
/// #[evscode::config]
/// static TIME_LIMIT: evscode::Config<Option<u64>> = Some(1500);
/// ```
#[proc_macro_attribute]
pub fn config(_params: TokenStream, item: TokenStream) -> TokenStream {
	config::generate(item)
}

/// Specify all of the plugin metadata and export the `activate`/`deactivate` entry points.
///
/// See [`evscode::meta::Package`](../evscode/meta/struct.Package.html) for a description and types of all available options.
/// This macro should only be invoked once, from the crate root.
/// ```ignore
/// evscode::plugin! {
/// 	name: "Example Evscode Extension",
/// 	publisher: "", // fill in your Marketplace publisher username.
/// 	description: "An example extension developed using Evscode",
/// 	keywords: &["test"],
/// 	categories: &["Other"],
/// 	license: "", // fill in an SPDX 2.0 identifier of your extension's license
/// 	repository: "", // fill in an URL of your extension repository.
/// 	commands: [hello],
/// 	configuration: [TIME_LIMIT],
/// 	on_activate: None,
/// 	on_deactivate: None,
/// 	extra_activations: &[],
/// 	log_filters: &[],
/// }
/// ```
#[proc_macro]
pub fn plugin(input: TokenStream) -> TokenStream {
	plugin::generate(input)
}
