use crate::util::{
	option_literal, params::{self, ParamMap}, registration_ident
};
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
	parse::{Parse, ParseStream}, parse_macro_input, ItemFn, LitStr
};

pub fn generate(params: TokenStream, item: TokenStream) -> TokenStream {
	let params: Params = parse_macro_input!(params);
	let item: ItemFn = parse_macro_input!(item);
	if item.sig.asyncness.is_none() {
		return syn::Error::new_spanned(&item.sig.fn_token, "commands must be async functions returning evscode::R<()>")
			.to_compile_error()
			.into();
	}
	let local_name = &item.sig.ident;
	let title = LitStr::new(&params.title, Span::call_site());
	let key = option_literal(params.key.map(|key| LitStr::new(&key, Span::call_site())));
	let registration = registration_ident("command", local_name);
	TokenStream::from(quote! {
		#item

		#[doc(hidden)]
		pub(crate) fn #registration() -> evscode::meta::Command {
			evscode::meta::Command {
				id: evscode::meta::Identifier {
					module_path: module_path!(),
					local_name: stringify!(#local_name),
				},
				title: #title,
				key: #key,
				trigger: || Box::pin(#local_name()),
			}
		}
	})
}

#[derive(Debug)]
pub struct Params {
	pub title: String,
	pub key: Option<String>,
}
impl Parse for Params {
	fn parse(input: ParseStream) -> params::R<Params> {
		let mut params: ParamMap = input.parse()?;
		let r = Params { title: params.get("title")?, key: params.get("key")? };
		params.finish()?;
		Ok(r)
	}
}
