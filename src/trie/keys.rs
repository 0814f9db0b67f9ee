use super::Key;
use crate::{Error, Result};
use smallvec::SmallVec;

/// Validated key bytes, one per edge of the path from the root.
pub(super) type Path = SmallVec<[u8; 32]>;

pub(super) trait KeyBytes: Key {
    /// Narrows every unit to a byte, failing on the first one that doesn't fit.
    fn to_bytes(&self) -> Result<Path> {
        self.as_units()
            .into_iter()
            .enumerate()
            .map(|(position, unit)| {
                u8::try_from(unit).map_err(|_| {
                    tracing::debug!(unit, position, "rejected key unit outside of a byte");
                    Error::InvalidKey { unit, position }
                })
            })
            .collect()
    }
}

impl<S> KeyBytes for S where S: Key + ?Sized {}

impl Key for str {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        self.chars().map(u32::from)
    }
}

impl Key for String {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        self.as_str().as_units()
    }
}

impl Key for [char] {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        self.iter().copied().map(u32::from)
    }
}

impl Key for [u8] {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        self.iter().copied().map(u32::from)
    }
}

impl<const N: usize> Key for [u8; N] {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        self.as_slice().as_units()
    }
}

impl Key for Vec<u8> {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        self.as_slice().as_units()
    }
}

impl Key for [u16] {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        self.iter().copied().map(u32::from)
    }
}

impl Key for Vec<u16> {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        self.as_slice().as_units()
    }
}

impl<K: Key + ?Sized> Key for &K {
    fn as_units(&self) -> impl IntoIterator<Item = u32> + '_ {
        (**self).as_units()
    }
}
