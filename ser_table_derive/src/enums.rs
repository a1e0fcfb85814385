use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{DataEnum, Fields, Generics, Ident, Index};

use crate::{impls, Body};

pub fn derive_enum(data: DataEnum, ident: Ident, generics: Generics) -> TokenStream {
	let mut field_types = vec![];
	let mut variant_shapes = vec![];
	let mut write_arms = vec![];
	let mut read_arms = vec![];

	for (variant_index, variant) in data.variants.iter().enumerate() {
		let variant_ident = &variant.ident;
		let variant_name = variant_ident.to_string();
		let variant_index = variant_index as u32;

		let fields = match &variant.fields {
			Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
			Fields::Unnamed(fields) => fields.unnamed.iter().collect::<Vec<_>>(),
			Fields::Unit => vec![],
		};

		// Slots of all variants' fields share one tuple
		let slots = (field_types.len()..field_types.len() + fields.len())
			.map(Index::from)
			.collect::<Vec<_>>();
		field_types.extend(fields.iter().map(|field| field.ty.clone()));

		let names = fields
			.iter()
			.enumerate()
			.map(|(index, field)| match &field.ident {
				Some(name) => name.to_string(),
				None => index.to_string(),
			})
			.collect::<Vec<_>>();
		let types = fields.iter().map(|field| &field.ty);
		variant_shapes.push(quote! {
			::ser_table::Variant::new(#variant_name, ::std::vec![
				#(::ser_table::Field::new::<#types>(#names)),*
			])
		});

		// Aliases are required in case of a field called `writer` or `engine`.
		// `Self::Foo {x: val_x} =>` instead of just `Self::Foo {x} =>`.
		let aliases = fields
			.iter()
			.enumerate()
			.map(|(index, field)| match &field.ident {
				Some(name) => format_ident!("val_{}", name),
				None => format_ident!("val_{}", index),
			})
			.collect::<Vec<_>>();

		let pattern = match &variant.fields {
			Fields::Named(_) => {
				let field_idents = fields.iter().map(|field| &field.ident);
				quote! { Self::#variant_ident { #(#field_idents: #aliases),* } }
			}
			Fields::Unnamed(_) => quote! { Self::#variant_ident(#(#aliases),*) },
			Fields::Unit => quote! { Self::#variant_ident },
		};
		write_arms.push(quote_spanned! {variant_ident.span()=>
			#pattern => {
				<u32 as ::ser_table::Primitive>::write_direct(&#variant_index, writer)?;
				#(engine.write_at(slots.#slots, #aliases, writer, limits)?;)*
			}
		});

		let reads = slots
			.iter()
			.map(|slot| quote! { engine.read_at(slots.#slot, reader, limits)? })
			.collect::<Vec<_>>();
		let construct = match &variant.fields {
			Fields::Named(_) => {
				let field_idents = fields.iter().map(|field| &field.ident);
				quote! { Self::#variant_ident { #(#field_idents: #reads),* } }
			}
			Fields::Unnamed(_) => quote! { Self::#variant_ident(#(#reads),*) },
			Fields::Unit => quote! { Self::#variant_ident },
		};
		read_arms.push(quote! {
			#variant_index => ::std::result::Result::Ok(#construct),
		});
	}

	let shape = quote! {
		::ser_table::Shape::enumeration::<Self>(::std::vec![#(#variant_shapes),*])
	};

	// Enum with no variants can't be instantiated
	let write = if write_arms.is_empty() {
		quote! { match *self {} }
	} else {
		quote! {
			match self {
				#(#write_arms)*
			}
			::std::result::Result::Ok(())
		}
	};

	let read = quote! {
		match <u32 as ::ser_table::Primitive>::read_direct(reader)? {
			#(#read_arms)*
			index => ::std::result::Result::Err(::ser_table::unknown_variant::<Self>(index)),
		}
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
