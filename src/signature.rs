//! A signature describes a set of component types as a fixed-width bit array.
//!
//! Every entity has a signature describing the components it currently holds,
//! and every system has a signature describing the components it requires.
//! A system is interested in an entity if and only if
//! the entity signature is a superset of the system signature.

use std::{fmt, hash};

use bitvec::prelude::{BitArray, Lsb0};
use bitvec::BitArr;
use itertools::Itertools;

use crate::comp::ComponentId;

/// The maximum number of distinct component types in a registry.
pub const MAX_COMPONENTS: usize = 32;

static_assertions::const_assert!(MAX_COMPONENTS > 0);

type Bits = BitArr!(for MAX_COMPONENTS, in u32, Lsb0);

/// A fixed-width set of [`ComponentId`]s.
#[derive(Clone, Copy)]
pub struct Signature(Bits);

impl Default for Signature {
    fn default() -> Self { Self(BitArray::ZERO) }
}

impl Signature {
    /// Creates an empty signature.
    pub fn new() -> Self { Self::default() }

    /// Sets or clears the bit of a component type.
    pub fn set(&mut self, id: ComponentId, present: bool) { self.0.set(id.index(), present); }

    /// Adds a component type.
    pub fn insert(&mut self, id: ComponentId) { self.set(id, true) }

    /// Removes a component type.
    pub fn remove(&mut self, id: ComponentId) { self.set(id, false) }

    /// Tests the bit of a component type.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.0.get(id.index()).map_or(false, |bit| *bit)
    }

    /// Returns `true` if every component in `required` is also in `self`.
    ///
    /// Components in `self` that are not required do not affect the result.
    /// An empty `required` signature is satisfied by every signature.
    pub fn satisfies(&self, required: &Signature) -> bool {
        self.0
            .as_raw_slice()
            .iter()
            .zip(required.0.as_raw_slice())
            .all(|(&have, &want)| have & want == want)
    }

    /// Whether no component types are set.
    pub fn is_empty(&self) -> bool { self.0.not_any() }

    /// The number of component types set.
    pub fn len(&self) -> usize { self.0.count_ones() }

    /// Removes all component types.
    pub fn clear(&mut self) { self.0 = BitArray::ZERO; }

    /// Iterates over the component types set, in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.0.iter_ones().map(ComponentId)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool { self.0.as_raw_slice() == other.0.as_raw_slice() }
}

impl Eq for Signature {}

impl hash::Hash for Signature {
    fn hash<H: hash::Hasher>(&self, state: &mut H) { self.0.as_raw_slice().hash(state) }
}

impl FromIterator<ComponentId> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentId>>(iter: I) -> Self {
        let mut signature = Self::new();
        for id in iter {
            signature.insert(id);
        }
        signature
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Signature{{{}}}", self.0.iter_ones().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::{Signature, MAX_COMPONENTS};
    use crate::comp::ComponentId;

    fn sig(ids: &[usize]) -> Signature { ids.iter().map(|&id| ComponentId(id)).collect() }

    #[test]
    fn test_satisfies_superset() {
        let required = sig(&[1, 4]);

        assert!(sig(&[1, 4]).satisfies(&required));
        assert!(sig(&[0, 1, 4, 31]).satisfies(&required), "extra components are irrelevant");
        assert!(!sig(&[1]).satisfies(&required));
        assert!(!sig(&[]).satisfies(&required));
    }

    #[test]
    fn test_empty_requirement_matches_all() {
        assert!(sig(&[]).satisfies(&Signature::new()));
        assert!(sig(&[3, 7]).satisfies(&Signature::new()));
    }

    #[test]
    fn test_set_and_clear() {
        let mut signature = Signature::new();
        signature.insert(ComponentId(MAX_COMPONENTS - 1));
        signature.insert(ComponentId(2));
        assert_eq!(signature.len(), 2);
        assert!(signature.contains(ComponentId(2)));
        assert!(!signature.contains(ComponentId(3)));
        assert_eq!(signature.iter().map(ComponentId::index).collect::<Vec<_>>(), vec![
            2,
            MAX_COMPONENTS - 1
        ]);

        signature.remove(ComponentId(2));
        assert_eq!(signature, sig(&[MAX_COMPONENTS - 1]));

        signature.clear();
        assert!(signature.is_empty());
        assert_eq!(format!("{signature:?}"), "Signature{}");
    }
}
