use crate::util::registration_ident;
use proc_macro::TokenStream;
use quote::quote;
use syn::{
	parse_macro_input, GenericArgument, ItemStatic, Lit, Meta, PathArguments, Type
};

pub fn generate(item: TokenStream) -> TokenStream {
	let item: ItemStatic = parse_macro_input!(item);
	transform(&item).unwrap_or_else(|e| e.to_compile_error().into())
}

fn transform(item: &ItemStatic) -> syn::Result<TokenStream> {
	let ty = extract_inner_type(item)?;
	let default = &item.expr;
	let local_name = &item.ident;
	let description = extract_description(item)?;
	let vis = &item.vis;
	let attrs = &item.attrs;
	let registration = registration_ident("config", local_name);
	Ok(TokenStream::from(quote! {
		#(#attrs)*
		#vis static #local_name: evscode::macros::Lazy<evscode::Config<#ty>> = evscode::macros::Lazy::new(|| {
			evscode::Config::placeholder(
				<#ty as From<_>>::from(#default),
				evscode::meta::Identifier {
					module_path: module_path!(),
					local_name: stringify!(#local_name),
				},
			)
		});

		#[doc(hidden)]
		#[allow(non_snake_case)]
		pub(crate) fn #registration() -> evscode::meta::ConfigEntry {
			evscode::meta::ConfigEntry {
				id: evscode::meta::Identifier {
					module_path: module_path!(),
					local_name: stringify!(#local_name),
				},
				description: #description,
				schema: || <#ty as evscode::Configurable>::schema(
					Some(&<#ty as From<_>>::from(#default)),
				),
			}
		}
	}))
}

fn extract_inner_type(item: &ItemStatic) -> syn::Result<&Type> {
	match &*item.ty {
		Type::Path(path) => path.path.segments.last().and_then(|segment| match &segment.arguments {
			PathArguments::AngleBracketed(args) => args.args.iter().next().and_then(|arg| match arg {
				GenericArgument::Type(ty) => Some(ty),
				_ => None,
			}),
			_ => None,
		}),
		_ => None,
	}
	.ok_or_else(|| syn::Error::new_spanned(&item.ty, "expected type `evscode::Config<...>`"))
}

fn extract_description(item: &ItemStatic) -> syn::Result<String> {
	let mut lines = Vec::new();
	for attr in item.attrs.iter().filter(|attr| attr.path.is_ident("doc")) {
		match attr.parse_meta()? {
			Meta::NameValue(mnv) => match mnv.lit {
				Lit::Str(lit) => lines.push(lit.value().trim().to_owned()),
				lit => return Err(syn::Error::new_spanned(lit, "expected a string doc comment")),
			},
			meta => return Err(syn::Error::new_spanned(meta, "expected a doc comment")),
		}
	}
	if lines.is_empty() {
		return Err(syn::Error::new_spanned(&item.ident, "configuration entries must have an attached doc comment"));
	}
	Ok(lines.join("\n"))
}
