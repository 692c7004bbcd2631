//! [`Structural`] implementations for scalars and standard containers.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::BuildHasher;

use super::{Kind, Scalar, Structural};

macro_rules! scalar_impl {
    ($variant:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Structural for $ty {
                fn kind(&self) -> Kind {
                    Kind::Scalar
                }

                fn is_empty_value(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn scalar(&self) -> Option<Scalar<'_>> {
                    Some(Scalar::$variant((*self).into()))
                }
            }
        )+
    };
}

scalar_impl!(Bool => bool);
scalar_impl!(Char => char);
scalar_impl!(Int => i8, i16, i32, i64, i128);
scalar_impl!(UInt => u8, u16, u32, u64, u128);
scalar_impl!(Float => f32, f64);

impl Structural for isize {
    fn kind(&self) -> Kind {
        Kind::Scalar
    }

    fn is_empty_value(&self) -> bool {
        *self == 0
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        i128::try_from(*self).ok().map(Scalar::Int)
    }
}

impl Structural for usize {
    fn kind(&self) -> Kind {
        Kind::Scalar
    }

    fn is_empty_value(&self) -> bool {
        *self == 0
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        u128::try_from(*self).ok().map(Scalar::UInt)
    }
}

impl Structural for String {
    fn kind(&self) -> Kind {
        Kind::Scalar
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(self))
    }
}

impl<T: Structural> Structural for Vec<T> {
    fn kind(&self) -> Kind {
        Kind::Sequence
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn elements(&self) -> Vec<&dyn Structural> {
        self.iter().map(|item| item as &dyn Structural).collect()
    }
}

impl<T: Structural> Structural for Option<T> {
    fn kind(&self) -> Kind {
        Kind::Optional
    }

    fn is_empty_value(&self) -> bool {
        self.is_none()
    }

    fn target(&self) -> Option<&dyn Structural> {
        self.as_ref().map(|inner| inner as &dyn Structural)
    }
}

impl<K, V> Structural for BTreeMap<K, V>
where
    K: Display + 'static,
    V: Structural,
{
    fn kind(&self) -> Kind {
        Kind::Mapping
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn entries(&self) -> Vec<(String, &dyn Structural)> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value as &dyn Structural))
            .collect()
    }
}

impl<K, V, S> Structural for HashMap<K, V, S>
where
    K: Display + 'static,
    V: Structural,
    S: BuildHasher + 'static,
{
    fn kind(&self) -> Kind {
        Kind::Mapping
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn entries(&self) -> Vec<(String, &dyn Structural)> {
        let mut entries: Vec<_> = self
            .iter()
            .map(|(key, value)| (key.to_string(), value as &dyn Structural))
            .collect();
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));
        entries
    }
}
