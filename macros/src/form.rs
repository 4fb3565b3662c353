use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::TokenTree;
use quote::{format_ident, quote, ToTokens};
use syn::Meta;

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named), forward_attrs)]
struct FormInputReceiver {
	ident: syn::Ident,

	generics: syn::Generics,

	data: ast::Data<(), FormFieldReceiver>,

	attrs: Vec<syn::Attribute>,
}

#[derive(Debug, FromField)]
#[darling(forward_attrs)]
struct FormFieldReceiver {
	ident: Option<syn::Ident>,

	ty: syn::Type,
	vis: syn::Visibility,

	attrs: Vec<syn::Attribute>,
}

/// Whether the field is marked `#[serde(skip_deserializing)]` or `#[serde(skip)]`.
fn is_server_owned(attrs: &[syn::Attribute]) -> bool {
	attrs.iter().any(|attr| {
		let Meta::List(ref list) = attr.meta else {
			return false;
		};

		if !list.path.is_ident("serde") {
			return false;
		}

		list.tokens.to_token_stream().into_iter().any(|token| {
			matches!(token, TokenTree::Ident(ref ident) if ident == "skip_deserializing" || ident == "skip")
		})
	})
}

pub fn from_input(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = syn::parse_macro_input!(input as syn::DeriveInput);
	let receiver = match FormInputReceiver::from_derive_input(&input) {
		Ok(x) => x,
		Err(e) => return e.write_errors().into(),
	};

	let ident = &receiver.ident;
	let vis = &input.vis;
	let generics = &receiver.generics;
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
	let form_ident = format_ident!("{}Form", ident);
	let doc = format!(" Submitted form input for [`{ident}`].");

	// The model's docs describe the model, not the form
	let attrs = receiver
		.attrs
		.iter()
		.filter(|attr| !attr.path().is_ident("doc"));

	let Some(fields) = receiver.data.take_struct() else {
		return syn::Error::new_spanned(ident, "#[form] only supports structs with named fields")
			.into_compile_error()
			.into();
	};

	let fields = fields
		.iter()
		.filter(|field| !is_server_owned(&field.attrs))
		.filter_map(|field| Some((&field.attrs, field.ident.as_ref()?, &field.ty, &field.vis)))
		.collect::<Vec<_>>();

	let form_fields = fields.iter().map(|(attrs, ident, ty, vis)| {
		quote! {
			#(#attrs)*
			#vis #ident: #ty,
		}
	});

	let copies = fields.iter().map(|(_, ident, _, _)| {
		quote! {
			#ident: ::core::clone::Clone::clone(&model.#ident),
		}
	});

	quote! {
		#input

		#[doc = #doc]
		#(#attrs)*
		#vis struct #form_ident #generics {
			#(
				#form_fields
			)*
		}

		impl #impl_generics ::core::convert::From<&#ident #ty_generics> for #form_ident #ty_generics #where_clause {
			fn from(model: &#ident #ty_generics) -> Self {
				Self {
					#(
						#copies
					)*
				}
			}
		}
	}
	.into()
}
