//! Deep structural equality that treats absent and empty collections alike.

use crate::structural::{Kind, Structural};

/// Whether `left` and `right` are deeply equal.
///
/// Walks both values through [`Structural`]. An absent optional compares
/// equal to an empty sequence or mapping. Shared nodes compare by identity
/// and polymorphic values must share a concrete type.
///
/// # Examples
///
/// ```
/// use patchmerge::equivalent;
///
/// let absent: Option<Vec<String>> = None;
/// assert!(equivalent(&absent, &Some(Vec::new())));
/// assert!(!equivalent(&absent, &Some(vec![String::from("a")])));
/// ```
#[must_use]
pub fn equivalent<T: Structural>(left: &T, right: &T) -> bool {
    values_equal(left, right)
}

fn values_equal(left: &dyn Structural, right: &dyn Structural) -> bool {
    match (unwrap_optional(left), unwrap_optional(right)) {
        (None, None) => true,
        (None, Some(value)) | (Some(value), None) => is_empty_collection(value),
        (Some(left), Some(right)) => present_equal(left, right),
    }
}

fn unwrap_optional(mut value: &dyn Structural) -> Option<&dyn Structural> {
    while value.kind() == Kind::Optional {
        value = value.target()?;
    }
    Some(value)
}

fn is_empty_collection(value: &dyn Structural) -> bool {
    matches!(value.kind(), Kind::Sequence | Kind::Mapping) && value.is_empty_value()
}

fn present_equal(left: &dyn Structural, right: &dyn Structural) -> bool {
    if left.kind() != right.kind() {
        return false;
    }
    match left.kind() {
        Kind::Scalar => left.scalar() == right.scalar(),
        Kind::Record => records_equal(left, right),
        Kind::Mapping => {
            let (left, right) = (left.entries(), right.entries());
            left.len() == right.len()
                && left.iter().zip(&right).all(|((lk, lv), (rk, rv))| {
                    lk == rk && values_equal(*lv, *rv)
                })
        }
        Kind::Sequence => {
            let (left, right) = (left.elements(), right.elements());
            left.len() == right.len()
                && left
                    .iter()
                    .zip(&right)
                    .all(|(lv, rv)| values_equal(*lv, *rv))
        }
        Kind::Polymorphic => {
            left.type_name() == right.type_name()
                && match (left.target(), right.target()) {
                    (Some(lv), Some(rv)) => values_equal(lv, rv),
                    (lv, rv) => lv.is_none() && rv.is_none(),
                }
        }
        Kind::Shared => left.node_id() == right.node_id(),
        Kind::Optional => false,
    }
}

fn records_equal(left: &dyn Structural, right: &dyn Structural) -> bool {
    if left.type_name() != right.type_name() {
        return false;
    }
    let (left_fields, right_fields) = (left.fields(), right.fields());
    if left_fields.is_empty() && right_fields.is_empty() {
        return left.opaque_eq(right);
    }
    left_fields.len() == right_fields.len()
        && left_fields
            .iter()
            .zip(&right_fields)
            .all(|(lf, rf)| lf.name() == rf.name() && values_equal(lf.value(), rf.value()))
}
