//! Attribute and field parsing for `#[derive(Mergeable)]`.

use syn::ext::IdentExt as _;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, LitStr};

/// A field the derive merges and exposes.
pub(crate) struct MergeField {
    pub ident: Ident,
    /// Field name without any raw-identifier prefix.
    pub name: String,
    pub is_key: bool,
}

/// Everything the generators need from the input struct.
pub(crate) struct MergeInput {
    pub ident: Ident,
    pub generics: Generics,
    pub fields: Vec<MergeField>,
    pub crate_path: Option<syn::Path>,
}

impl MergeInput {
    /// Whether the struct has no visible fields and is merged as one value.
    pub(crate) fn is_opaque(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    name: bool,
}

/// Iterate every `#[merge(...)]` attribute and apply `f` to each entry.
fn parse_merge_attrs<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("merge")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn parse_crate_path(attrs: &[Attribute]) -> syn::Result<Option<syn::Path>> {
    let mut crate_path = None;
    parse_merge_attrs(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let lit: LitStr = meta.value()?.parse()?;
            crate_path = Some(lit.parse::<syn::Path>()?);
            Ok(())
        } else {
            Err(meta.error("unsupported struct attribute; expected `crate = \"...\"`"))
        }
    })?;
    Ok(crate_path)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    parse_merge_attrs(attrs, |meta| {
        if meta.path.is_ident("skip") {
            parsed.skip = true;
        } else if meta.path.is_ident("name") {
            parsed.name = true;
        } else {
            return Err(meta.error("unsupported field attribute; expected `skip` or `name`"));
        }
        Ok(())
    })?;
    Ok(parsed)
}

/// Parse the derive input, rejecting anything but structs with named fields.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<MergeInput> {
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Mergeable requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Mergeable can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::new();
    let mut explicit_key: Option<Ident> = None;
    for field in named {
        let attrs = parse_field_attrs(&field.attrs)?;
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        if attrs.skip {
            if attrs.name {
                return Err(syn::Error::new_spanned(
                    &ident,
                    "a skipped field cannot be the name key",
                ));
            }
            continue;
        }
        if attrs.name {
            if let Some(previous) = &explicit_key {
                return Err(syn::Error::new_spanned(
                    &ident,
                    format!("`{previous}` is already marked #[merge(name)]"),
                ));
            }
            explicit_key = Some(ident.clone());
        }
        fields.push(MergeField {
            name: ident.unraw().to_string(),
            ident,
            is_key: attrs.name,
        });
    }

    if explicit_key.is_none()
        && let Some(field) = fields.iter_mut().find(|field| field.name == "name")
    {
        field.is_key = true;
    }

    Ok(MergeInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        fields,
        crate_path: parse_crate_path(&input.attrs)?,
    })
}
