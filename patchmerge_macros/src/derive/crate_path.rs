//! Crate path resolution for renamed dependencies.

use proc_macro2::TokenStream;
use quote::quote;

/// Tokens naming the `patchmerge` crate in generated code.
///
/// Defaults to `::patchmerge`; `#[merge(crate = "...")]` substitutes the
/// given path.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::patchmerge }, |path| quote! { #path })
}
