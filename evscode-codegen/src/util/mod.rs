use proc_macro2::Ident;
use quote::{format_ident, quote};

pub mod params;

pub fn option_literal(x: Option<impl quote::ToTokens>) -> proc_macro2::TokenStream {
	match x {
		Some(x) => quote! { Some(#x) },
		None => quote! { None },
	}
}

/// Name of the hidden function that returns the metadata of a registered item.
/// `plugin!` derives the same name from the item's path, so both sides must agree on it.
pub fn registration_ident(kind: &str, local_name: &Ident) -> Ident {
	format_ident!("__evscode_{}_{}", kind, local_name)
}
