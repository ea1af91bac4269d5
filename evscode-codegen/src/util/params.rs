use proc_macro2::Span;
use std::collections::BTreeMap;
use syn::{
	parse::{Parse, ParseStream}, punctuated::Punctuated, spanned::Spanned, token::Comma, Lit, MetaNameValue
};

pub type R<T> = syn::parse::Result<T>;
type E = syn::parse::Error;

/// `key = "literal"` pairs passed to an attribute macro, consumed one by one.
pub struct ParamMap {
	storage: BTreeMap<String, MetaNameValue>,
}
impl Parse for ParamMap {
	fn parse(input: ParseStream) -> R<ParamMap> {
		let pairs = Punctuated::<MetaNameValue, Comma>::parse_terminated(input)?;
		let mut storage = BTreeMap::new();
		for pair in pairs {
			let key = match pair.path.get_ident() {
				Some(ident) => ident.to_string(),
				None => return Err(E::new(pair.path.span(), "expected a plain parameter name")),
			};
			if storage.contains_key(&key) {
				return Err(E::new(pair.path.span(), "duplicate parameter"));
			}
			storage.insert(key, pair);
		}
		Ok(ParamMap { storage })
	}
}
impl ParamMap {
	pub fn get<T: Param>(&mut self, key: &'static str) -> R<T> {
		T::convert(self.storage.remove(key), key)
	}

	pub fn finish(self) -> R<()> {
		match self.storage.into_iter().next() {
			Some((key, pair)) => Err(E::new(pair.path.span(), format!("unrecognized parameter `{}`", key))),
			None => Ok(()),
		}
	}
}

pub trait Param: Sized {
	fn convert(pair: Option<MetaNameValue>, key: &'static str) -> R<Self>;
}
impl Param for Option<String> {
	fn convert(pair: Option<MetaNameValue>, _: &'static str) -> R<Self> {
		pair.map(|pair| match pair.lit {
			Lit::Str(lit) => Ok(lit.value()),
			lit => Err(E::new(lit.span(), "expected a string literal")),
		})
		.transpose()
	}
}
impl Param for String {
	fn convert(pair: Option<MetaNameValue>, key: &'static str) -> R<Self> {
		<Option<String> as Param>::convert(pair, key)?
			.ok_or_else(|| E::new(Span::call_site(), format!("parameter `{}` is required", key)))
	}
}
