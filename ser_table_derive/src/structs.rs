use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Fields, Generics, Ident, Index};

use crate::{impls, Body};

pub fn derive_struct(data: DataStruct, ident: Ident, generics: Generics) -> TokenStream {
	let fields = match &data.fields {
		Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
		Fields::Unnamed(fields) => fields.unnamed.iter().collect::<Vec<_>>(),
		Fields::Unit => vec![],
	};

	// `x` for named fields, `0` for tuple fields
	let accessors = fields
		.iter()
		.enumerate()
		.map(|(index, field)| match &field.ident {
			Some(name) => quote! {#name},
			None => {
				let index = Index::from(index);
				quote! {#index}
			}
		})
		.collect::<Vec<_>>();

	let names = fields
		.iter()
		.enumerate()
		.map(|(index, field)| match &field.ident {
			Some(name) => name.to_string(),
			None => index.to_string(),
		})
		.collect::<Vec<_>>();

	let field_types = fields.iter().map(|field| field.ty.clone()).collect::<Vec<_>>();
	let slot_indexes = (0..fields.len()).map(Index::from).collect::<Vec<_>>();

	let shape = quote! {
		::ser_table::Shape::record::<Self>(::std::vec![
			#(::ser_table::Field::new::<#field_types>(#names)),*
		])
	};

	let write_stmts = fields
		.iter()
		.zip(&accessors)
		.zip(&slot_indexes)
		.map(|((field, accessor), slot)| {
			quote_spanned! {field.span()=>
				engine.write_at(slots.#slot, &self.#accessor, writer, limits)?;
			}
		})
		.collect::<Vec<_>>();
	let write = quote! {
		#(#write_stmts)*
		::std::result::Result::Ok(())
	};

	let reads = slot_indexes
		.iter()
		.map(|slot| quote! { engine.read_at(slots.#slot, reader, limits)? })
		.collect::<Vec<_>>();
	let read = match &data.fields {
		Fields::Named(_) => quote! {
			::std::result::Result::Ok(Self { #(#accessors: #reads),* })
		},
		Fields::Unnamed(_) => quote! {
			::std::result::Result::Ok(Self(#(#reads),*))
		},
		Fields::Unit => quote! {
			::std::result::Result::Ok(Self)
		},
	};

	impls(
		ident,
		generics,
		Body {
			shape,
			field_types,
			write,
			read,
		},
	)
}
