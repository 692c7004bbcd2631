//! Token generation for the `Structural` and `Mergeable` impls.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, parse_quote};

use super::parse::MergeInput;

fn bounded_generics(generics: &Generics, krate: &TokenStream) -> Generics {
    let mut generics = generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#krate::Mergeable));
    }
    generics
}

/// `Structural` impl describing the struct as a record.
pub(crate) fn structural_impl(input: &MergeInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let generics = bounded_generics(&input.generics, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = if input.is_opaque() {
        quote! {
            fn is_empty_value(&self) -> bool {
                *self == <Self as ::core::default::Default>::default()
            }

            fn opaque_eq(&self, other: &dyn #krate::structural::Structural) -> bool {
                let other: &dyn ::core::any::Any = other;
                other.downcast_ref::<Self>().is_some_and(|other| other == self)
            }
        }
    } else {
        let mut checks = input.fields.iter().map(|field| {
            let member = &field.ident;
            quote! { #krate::structural::Structural::is_empty_value(&self.#member) }
        });
        let first = checks.next();
        let entries = input.fields.iter().map(|field| {
            let member = &field.ident;
            let name = &field.name;
            let key = field.is_key.then(|| quote! { .key() });
            quote! { #krate::structural::Field::new(#name, &self.#member) #key }
        });
        quote! {
            fn is_empty_value(&self) -> bool {
                #first #(&& #checks)*
            }

            fn fields(&self) -> ::std::vec::Vec<#krate::structural::Field<'_>> {
                ::std::vec![#(#entries),*]
            }
        }
    };

    quote! {
        impl #impl_generics #krate::structural::Structural for #ident #ty_generics #where_clause {
            fn kind(&self) -> #krate::structural::Kind {
                #krate::structural::Kind::Record
            }

            #body
        }
    }
}

/// `Mergeable` impl merging visible fields one by one, or the whole value
/// for opaque structs.
pub(crate) fn mergeable_impl(input: &MergeInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let generics = bounded_generics(&input.generics, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = if input.is_opaque() {
        quote! { #krate::merge::merge_scalar(self, src, merger) }
    } else {
        let steps = input.fields.iter().map(|field| {
            let member = &field.ident;
            let name = &field.name;
            quote! { merger.merge_field(#name, &mut self.#member, &src.#member)?; }
        });
        quote! {
            #(#steps)*
            ::core::result::Result::Ok(())
        }
    };

    quote! {
        impl #impl_generics #krate::Mergeable for #ident #ty_generics #where_clause {
            fn merge_from(
                &mut self,
                src: &Self,
                merger: &mut #krate::Merger<'_>,
            ) -> #krate::MergeResult<()> {
                #body
            }
        }
    }
}
