//! Procedural macros for `patchmerge`.
//!
//! `#[derive(Mergeable)]` implements `patchmerge::structural::Structural`
//! and `patchmerge::Mergeable` for structs with named fields, so records can
//! be walked, compared and merged field by field.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;
#[cfg(test)]
mod tests;

/// Derive `Structural` and `Mergeable` for a struct with named fields.
///
/// Field attributes:
///
/// - `#[merge(skip)]` hides the field: it is never merged, compared or used
///   for emptiness.
/// - `#[merge(name)]` marks the field whose string value keys the record in
///   the unique sequence strategies. Without it, a field called `name` is
///   used.
///
/// Struct attributes:
///
/// - `#[merge(crate = "path")]` points generated code at a renamed
///   `patchmerge` dependency.
///
/// A struct whose fields are all skipped is merged as a single value and must
/// implement `Default` and `PartialEq`.
#[proc_macro_derive(Mergeable, attributes(merge))]
pub fn derive_mergeable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
