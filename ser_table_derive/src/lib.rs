use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Error, GenericParam, Generics, Ident};

mod structs;
use structs::derive_struct;
mod enums;
use enums::derive_enum;

#[proc_macro_derive(Serialize)]
pub fn serialize(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	serialize_impl(input).into()
}

fn serialize_impl(input: DeriveInput) -> TokenStream {
	let generics = add_bounds(input.generics);

	match input.data {
		Data::Struct(data) => derive_struct(data, input.ident, generics),
		Data::Enum(data) => derive_enum(data, input.ident, generics),
		Data::Union(data) => Error::new(
			data.union_token.span,
			"Deriving `Serialize` on unions is not supported",
		)
		.to_compile_error(),
	}
}

/// Add `Serialize` bound to all type params
fn add_bounds(mut generics: Generics) -> Generics {
	for param in &mut generics.params {
		if let GenericParam::Type(param) = param {
			param.bounds.push(parse_quote!(::ser_table::Serialize));
		}
	}
	generics
}

/// Parts of a derived impl which differ between structs and enums.
pub(crate) struct Body {
	/// Expression for `Serialize::shape`
	pub shape: TokenStream,
	/// Types of all fields, in slot order
	pub field_types: Vec<syn::Type>,
	/// Statements of `Composite::write_fields`
	pub write: TokenStream,
	/// Expression of `Composite::read_fields`
	pub read: TokenStream,
}

/// Assemble `Serialize` and `Composite` impls.
pub(crate) fn impls(ident: Ident, generics: Generics, body: Body) -> TokenStream {
	let Body {
		shape,
		field_types,
		write,
		read,
	} = body;
	let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

	quote! {
		#[automatically_derived]
		impl #impl_generics ::ser_table::Serialize for #ident #type_generics #where_clause {
			fn shape() -> ::ser_table::Shape {
				#shape
			}
		}

		#[automatically_derived]
		impl #impl_generics ::ser_table::Composite for #ident #type_generics #where_clause {
			type Slots = (#(::ser_table::Slot<#field_types>,)*);

			#[allow(unused_variables)]
			fn bind(
				bindings: &::ser_table::Bindings<'_>,
			) -> ::std::result::Result<Self::Slots, ::ser_table::BuildError> {
				::std::result::Result::Ok((#(bindings.slot::<#field_types>()?,)*))
			}

			#[allow(unused_variables)]
			fn write_fields(
				&self,
				slots: &Self::Slots,
				writer: &mut dyn ::std::io::Write,
				engine: &::ser_table::Engine,
				limits: &::ser_table::Limits,
			) -> ::std::result::Result<(), ::ser_table::Error> {
				#write
			}

			#[allow(unused_variables)]
			fn read_fields(
				slots: &Self::Slots,
				reader: &mut dyn ::std::io::Read,
				engine: &::ser_table::Engine,
				limits: &::ser_table::Limits,
			) -> ::std::result::Result<Self, ::ser_table::Error> {
				#read
			}
		}
	}
}
