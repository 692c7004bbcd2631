//! Normalising dual representations of sub-collections at decode time.
//!
//! Some stores return a sub-collection either inline (`"members": [...]`) or
//! as an expanded reference (`"membersReference": {"link": ..., "items":
//! [...]}`). Resources must hold a single list before they reach the merge
//! engine, so decoders route both shapes through [`collapse_dual`].

use serde::{Deserialize, Serialize};

use crate::DecodeError;

/// An expanded reference to a sub-collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsRef<T> {
    /// Location of the collection on the store.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    /// The referenced elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<T>,
}

impl<T> Default for ItemsRef<T> {
    fn default() -> Self {
        Self {
            link: String::new(),
            items: Vec::new(),
        }
    }
}

/// Merge the inline and referenced forms of `field` into one list.
///
/// # Errors
///
/// Returns [`DecodeError::DualRepresentation`] when both forms carry
/// elements.
///
/// # Examples
///
/// ```
/// use patchmerge::decode::{ItemsRef, collapse_dual};
///
/// let reference = ItemsRef { link: String::from("/members"), items: vec![1, 2] };
/// assert_eq!(collapse_dual("web", "members", Vec::new(), Some(reference))?, [1, 2]);
/// assert!(collapse_dual("web", "members", vec![3], Some(ItemsRef { link: String::new(), items: vec![4] })).is_err());
/// # Ok::<(), patchmerge::DecodeError>(())
/// ```
pub fn collapse_dual<T>(
    owner: &str,
    field: &'static str,
    inline: Vec<T>,
    reference: Option<ItemsRef<T>>,
) -> Result<Vec<T>, DecodeError> {
    let referenced = reference.map(|reference| reference.items).unwrap_or_default();
    match (inline.is_empty(), referenced.is_empty()) {
        (false, false) => Err(DecodeError::DualRepresentation {
            owner: owner.to_owned(),
            field,
        }),
        (true, false) => Ok(referenced),
        _ => Ok(inline),
    }
}
