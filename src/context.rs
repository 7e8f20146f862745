use std::{fmt, collections::HashMap};
use crate::{AnyId, Weight, Multiset, MultisetId, PlatesError};

/// A canonicalization context of a single computation run.
///
/// This type maintains a bijection between [`Multiset`]s and their
/// serial [`MultisetId`]s.  Sharing the same multiset twice returns
/// the same identifier, hence "same selection of items" may be
/// tested by comparing identifiers.
///
/// A `Context` is meant to be created for one end-to-end run (graph
/// construction followed by path enumeration) and dropped, or
/// [`clear`]ed, afterwards.  Identifiers issued by one context are
/// meaningless in another.  Numbering continues across [`clear`], so
/// an identifier issued before clearing is never reissued and no
/// longer resolves.
///
/// [`clear`]: Context::clear
#[derive(Debug)]
pub struct Context {
    name:      String,
    multisets: Vec<Multiset>,
    ids:       HashMap<Multiset, MultisetId>,
    // Number of identifiers issued before the last `clear()`.
    base:      usize,
}

impl Context {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            name:      name.as_ref().to_owned(),
            multisets: vec![Multiset::empty()], // bottom, never shared
            ids:       Default::default(),
            base:      0,
        }
    }

    #[inline]
    pub fn get_name(&self) -> &str {
        self.name.as_str()
    }

    /// Forgets all interned multisets.  Identifiers issued so far
    /// become stale.
    pub fn clear(&mut self) {
        self.base += self.multisets.len() - 1;
        self.multisets.truncate(1);
        self.ids.clear();
    }

    /// Number of interned multisets.
    #[inline]
    pub fn num_multisets(&self) -> usize {
        self.multisets.len() - 1
    }

    pub fn share_multiset(&mut self, multiset: Multiset) -> MultisetId {
        if let Some(&id) = self.ids.get(&multiset) {
            id
        } else {
            let id = MultisetId(
                AnyId::new(self.base + self.multisets.len()).unwrap_or_else(|| unreachable!()),
            );

            trace!("New multiset {}: {}", id.get(), multiset);

            self.multisets.push(multiset.clone());
            self.ids.insert(multiset, id);

            id
        }
    }

    /// Interns a multiset given as a sequence of weights in any order.
    #[inline]
    pub fn share_weights<I>(&mut self, weights: I) -> MultisetId
    where
        I: IntoIterator<Item = Weight>,
    {
        self.share_multiset(Multiset::new(weights))
    }

    /// Interns the empty multiset.
    #[inline]
    pub fn share_root(&mut self) -> MultisetId {
        self.share_multiset(Multiset::empty())
    }

    #[inline]
    pub fn get_multiset(&self, id: MultisetId) -> Option<&Multiset> {
        match id.get().get().checked_sub(self.base) {
            Some(0) | None => None,
            Some(pos) => self.multisets.get(pos),
        }
    }

    #[inline]
    pub fn get_multiset_id(&self, multiset: &Multiset) -> Option<MultisetId> {
        self.ids.get(multiset).copied()
    }

    pub fn get_multiset_checked(&self, id: MultisetId) -> Result<&Multiset, PlatesError> {
        self.get_multiset(id).ok_or(PlatesError::MultisetMissingForId(id))
    }

    /// Sum of weights of an interned multiset.
    pub fn get_total(&self, id: MultisetId) -> Result<Weight, PlatesError> {
        self.get_multiset_checked(id).map(|ms| ms.total())
    }

    pub fn with<'a, T: Contextual>(&'a self, thing: &'a T) -> InContext<'a, T> {
        InContext { context: self, thing }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new("")
    }
}

/// Types whose values can be rendered only with the help of the
/// [`Context`] which interned their multisets.
pub trait Contextual {
    fn format(&self, ctx: &Context) -> Result<String, PlatesError>;
}

impl Contextual for MultisetId {
    fn format(&self, ctx: &Context) -> Result<String, PlatesError> {
        Ok(ctx.get_multiset_checked(*self)?.to_string())
    }
}

impl<T: Contextual> Contextual for Vec<T> {
    fn format(&self, ctx: &Context) -> Result<String, PlatesError> {
        let items: Result<Vec<_>, _> = self.iter().map(|thing| thing.format(ctx)).collect();

        Ok(format!("[{}]", items?.join(", ")))
    }
}

/// A [`Contextual`] value coupled with its [`Context`], ready for
/// display.
pub struct InContext<'a, T: Contextual> {
    context: &'a Context,
    thing:   &'a T,
}

impl<'a, T: Contextual> fmt::Display for InContext<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.thing.format(self.context) {
            Ok(s) => f.write_str(&s),
            Err(err) => write!(f, "<{}>", err),
        }
    }
}
