//! Expansion of `#[derive(Mergeable)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

mod crate_path;
pub(crate) mod generate;
pub(crate) mod parse;

/// Expand the derive for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.crate_path.as_ref());
    let structural = generate::structural_impl(&parsed, &krate);
    let mergeable = generate::mergeable_impl(&parsed, &krate);
    Ok(quote! {
        #structural
        #mergeable
    })
}
