//! Planning of plate-loading sequences.
//!
//! Given a universe of items (plates) of known weights and a sequence
//! of totals to be loaded one after another, this crate enumerates
//! every way of hitting all the totals in order, and ranks these ways
//! by the effort of changing plates between consecutive totals.
//!
//! # Selections and ways
//!
//! A _selection_ is a [`Multiset`] of items drawn from the universe.
//! Only weights of items matter, but each item counts separately, so
//! that a universe with three 10s admits selections with up to three
//! 10s.  A _way_ of achieving a total is a selection summing up to
//! that total.  [`enumerate_ways_of_weights()`] lists all distinct
//! ways of achieving every achievable total.
//!
//! Selections are interned in a [`Context`], so that equal
//! selections share the same [`MultisetId`].  A context lives as long
//! as a single run of the planner.
//!
//! # Transition graph
//!
//! The [`TransitionGraph`] is layered by totals: layer zero holds the
//! empty selection, and the layer of the _i_-th total of the sequence
//! holds all selections reachable at that total.  An [`Edge`] links
//! a selection of one layer to a selection of the next layer and
//! carries two costs of the transition (see [`transition_cost()`]).
//!
//! # Paths
//!
//! A [`Path`] is a chain of edges, one per transition, where
//! consecutive edges meet at the very same selection, not merely at
//! the same total.  [`enumerate_paths()`] lists all such paths, and
//! [`rank_paths()`] picks the cheapest ones.

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

mod error;
mod multiset;
mod context;
mod available;
mod ways;
mod transition;
mod graph;
mod path;
mod scenario;
mod logging;
pub mod cli;

pub use error::PlatesError;
pub use multiset::{Weight, Cost, Multiset, MultisetId};
pub use context::{Context, Contextual, InContext};
pub use available::{available_weights, get_available_weights};
pub use ways::{WaysOfWeights, enumerate_ways_of_weights};
pub use transition::{
    CostFunction, TransitionOption, transition_cost, transition_cost_by_name, get_transition_options,
};
pub use graph::{Edge, TransitionGraph, make_transition_graph};
pub use path::{Path, enumerate_paths, rank_paths};
pub use scenario::{Scenario, ScenarioError, MAX_WEIGHT_SUM, parse_weights};
pub use logging::Logger;

use std::num::NonZeroUsize;

/// A generic one-based serial identifier.
///
/// Used as a common internal type backing [`MultisetId`].
pub(crate) type AnyId = NonZeroUsize;
