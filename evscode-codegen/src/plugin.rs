use crate::util::registration_ident;
use proc_macro::TokenStream;
use quote::quote;
use syn::{
	parse::Parser, punctuated::Punctuated, token::Comma, Expr, ExprPath, FieldValue, Member
};

pub fn generate(input: TokenStream) -> TokenStream {
	match transform(input) {
		Ok(tokens) => tokens,
		Err(e) => e.to_compile_error().into(),
	}
}

fn transform(input: TokenStream) -> syn::Result<TokenStream> {
	let fields = Punctuated::<FieldValue, Comma>::parse_terminated.parse(input)?;
	let mut commands = Vec::new();
	let mut configuration = Vec::new();
	let mut rest = Vec::new();
	for field in fields {
		match &field.member {
			Member::Named(name) if name == "commands" => commands = registrations(&field.expr, "command")?,
			Member::Named(name) if name == "configuration" => configuration = registrations(&field.expr, "config")?,
			_ => rest.push(field),
		}
	}
	Ok(TokenStream::from(quote! {
		#[wasm_bindgen::prelude::wasm_bindgen(js_name = internal_generate_package_json)]
		pub fn __evscode_generate_package_json(path: &str) {
			evscode::macros::generate_package_json(path, __evscode_metadata());
		}

		#[wasm_bindgen::prelude::wasm_bindgen(js_name = activate)]
		pub fn __evscode_activate(ctx: &evscode::macros::ExtensionContext) {
			evscode::macros::activate(ctx, __evscode_metadata());
		}

		#[wasm_bindgen::prelude::wasm_bindgen(js_name = deactivate)]
		pub async fn __evscode_deactivate() {
			evscode::macros::deactivate().await;
		}

		fn __evscode_metadata() -> evscode::meta::Package {
			evscode::meta::Package {
				identifier: env!("CARGO_PKG_NAME"),
				version: env!("CARGO_PKG_VERSION"),
				commands: vec![#(#commands()),*],
				configuration: vec![#(#configuration()),*],
				#(#rest),*
			}
		}
	}))
}

/// Turns `[a::b, c]` into paths of the hidden registration functions generated next to `b` and `c`.
fn registrations(expr: &Expr, kind: &str) -> syn::Result<Vec<ExprPath>> {
	let array = match expr {
		Expr::Array(array) => array,
		_ => return Err(syn::Error::new_spanned(expr, "expected an array of paths")),
	};
	array
		.elems
		.iter()
		.map(|elem| match elem {
			Expr::Path(path) => {
				let mut path = path.clone();
				let last = path.path.segments.last_mut().ok_or_else(|| syn::Error::new_spanned(elem, "empty path"))?;
				last.ident = registration_ident(kind, &last.ident);
				Ok(path)
			},
			_ => Err(syn::Error::new_spanned(elem, "expected a path to a registered item")),
		})
		.collect()
}
