//! Weights and their multisets.
//!
//! A [`Multiset`] is a selection of items (plates), where only the
//! weight of an item matters, but each item counts separately.  It is
//! represented canonically as a vector of [`Weight`]s sorted in
//! ascending order, so that two selections of the same items compare
//! equal element-wise, hash equally, and may be interned in a
//! [`Context`].
//!
//! Interned multisets are referred to by [`MultisetId`]s.  Within a
//! single [`Context`], two ids are equal iff the multisets they stand
//! for are equal.
//!
//! [`Context`]: crate::Context

use std::{fmt, iter::FromIterator};
use crate::AnyId;

/// The magnitude of a single item.
pub type Weight = u64;

/// A scalar cost of a transition, or of a sequence of transitions.
pub type Cost = u64;

/// A canonical (sorted) sequence of [`Weight`]s.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
pub struct Multiset {
    weights: Vec<Weight>,
}

impl Multiset {
    /// Creates the empty multiset, i.e. the unloaded state.
    #[inline]
    pub fn empty() -> Self {
        Default::default()
    }

    /// Creates a multiset of a single item.
    #[inline]
    pub fn singleton(weight: Weight) -> Self {
        Multiset { weights: vec![weight] }
    }

    /// Creates a multiset from a sequence of weights given in any
    /// order.
    pub fn new<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = Weight>,
    {
        let mut weights: Vec<_> = weights.into_iter().collect();

        weights.sort_unstable();

        Multiset { weights }
    }

    /// Returns a copy of this multiset with one more item of a given
    /// weight.
    pub fn with_weight(&self, weight: Weight) -> Self {
        let pos = self.weights.partition_point(|&w| w <= weight);
        let mut weights = Vec::with_capacity(self.weights.len() + 1);

        weights.extend_from_slice(&self.weights[..pos]);
        weights.push(weight);
        weights.extend_from_slice(&self.weights[pos..]);

        Multiset { weights }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Weight] {
        self.weights.as_slice()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of all weights.
    #[inline]
    pub fn total(&self) -> Weight {
        self.weights.iter().sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Weight> {
        self.weights.iter()
    }
}

impl FromIterator<Weight> for Multiset {
    fn from_iter<I: IntoIterator<Item = Weight>>(iter: I) -> Self {
        Multiset::new(iter)
    }
}

impl<'a> IntoIterator for &'a Multiset {
    type Item = &'a Weight;
    type IntoIter = std::slice::Iter<'a, Weight>;

    fn into_iter(self) -> Self::IntoIter {
        self.weights.iter()
    }
}

impl fmt::Display for Multiset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;

        let mut first = true;

        for weight in self.weights.iter() {
            if first {
                first = false;
            } else {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(weight, f)?;
        }

        f.write_str("]")
    }
}

/// An identifier of a [`Multiset`] interned in a [`Context`].
///
/// Identifiers are serial and one-based.  They are meaningful only
/// in the context which issued them.
///
/// [`Context`]: crate::Context
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct MultisetId(pub(crate) AnyId);

impl MultisetId {
    #[inline]
    pub const fn get(self) -> AnyId {
        self.0
    }
}

impl From<MultisetId> for AnyId {
    fn from(id: MultisetId) -> Self {
        id.0
    }
}
