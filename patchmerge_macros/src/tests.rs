//! Unit tests for input parsing and token generation.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use crate::derive::expand;
use crate::derive::parse::parse_input;

fn key_field(input: &DeriveInput) -> Result<Option<String>> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err.to_string()))?;
    Ok(parsed
        .fields
        .iter()
        .find(|field| field.is_key)
        .map(|field| field.name.clone()))
}

#[rstest]
fn field_called_name_is_the_key() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Member { name: String, ratio: u32 }
    };
    ensure!(key_field(&input)? == Some(String::from("name")));
    Ok(())
}

#[rstest]
fn explicit_key_wins() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Node { name: String, #[merge(name)] full_path: String }
    };
    ensure!(key_field(&input)? == Some(String::from("full_path")));
    Ok(())
}

#[rstest]
fn raw_identifiers_are_unprefixed() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Rule { r#type: String }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(parsed.fields.first().map(|field| field.name.as_str()) == Some("type"));
    Ok(())
}

#[rstest]
fn skipped_fields_are_hidden() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Pool { name: String, #[merge(skip)] generation: u64 }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(parsed.fields.len() == 1);
    ensure!(!parsed.is_opaque());
    Ok(())
}

#[rstest]
#[case::enumeration(parse_quote! { enum Mode { A, B } }, "only be derived for structs")]
#[case::tuple(parse_quote! { struct Pair(u8, u8); }, "requires named fields")]
#[case::two_keys(
    parse_quote! { struct Twice { #[merge(name)] a: String, #[merge(name)] b: String } },
    "already marked"
)]
#[case::skipped_key(
    parse_quote! { struct Hidden { #[merge(skip, name)] a: String } },
    "cannot be the name key"
)]
#[case::unknown(
    parse_quote! { struct Odd { #[merge(flatten)] a: String } },
    "unsupported field attribute"
)]
fn invalid_input_is_rejected(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let Err(err) = expand(&input) else {
        return Err(anyhow!("expansion unexpectedly succeeded"));
    };
    ensure!(err.to_string().contains(message), "unexpected error: {err}");
    Ok(())
}

#[rstest]
fn records_merge_field_by_field() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Member { name: String, ratio: u32 }
    };
    let tokens = expand(&input).map_err(|err| anyhow!(err.to_string()))?.to_string();
    ensure!(tokens.contains("merger . merge_field (\"name\" , & mut self . name , & src . name) ?"));
    ensure!(tokens.contains("Field :: new (\"name\" , & self . name) . key ()"));
    ensure!(tokens.contains("Field :: new (\"ratio\" , & self . ratio)"));
    ensure!(!tokens.contains("merge_scalar"));
    Ok(())
}

#[rstest]
fn opaque_records_use_the_scalar_rule() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Token { #[merge(skip)] secret: String }
    };
    let tokens = expand(&input).map_err(|err| anyhow!(err.to_string()))?.to_string();
    ensure!(tokens.contains(":: patchmerge :: merge :: merge_scalar (self , src , merger)"));
    ensure!(tokens.contains("fn opaque_eq"));
    Ok(())
}

#[rstest]
fn crate_path_and_generics_are_honoured() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[merge(crate = "pm")]
        struct Wrapper<T> { name: String, value: T }
    };
    let tokens = expand(&input).map_err(|err| anyhow!(err.to_string()))?.to_string();
    ensure!(tokens.contains("impl < T : pm :: Mergeable > pm :: Mergeable for Wrapper < T >"));
    ensure!(!tokens.contains(":: patchmerge"));
    Ok(())
}
