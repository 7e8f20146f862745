//! Transitions between selections of items.
//!
//! A transition replaces the items currently loaded (a [`Multiset`]
//! summing up to the previous total) with a selection summing up to
//! the next total.  Items are stacked, so only the heaviest items
//! common to both selections may stay in place; everything else has
//! to be taken off and put on again.  The cost of a transition is
//! measured either by the number of items moved, or by their total
//! weight (see [`CostFunction`]).
//!
//! [`Multiset`]: crate::Multiset

use std::{fmt, str::FromStr};
use crate::{Context, Weight, Cost, MultisetId, PlatesError, enumerate_ways_of_weights};

/// A measure of the effort of a single transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CostFunction {
    /// Number of items taken off plus number of items put on.
    Count,
    /// Total weight of items taken off plus total weight of items
    /// put on.
    Weight,
}

impl CostFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            CostFunction::Count => "count",
            CostFunction::Weight => "weight",
        }
    }
}

impl Default for CostFunction {
    fn default() -> Self {
        CostFunction::Count
    }
}

impl fmt::Display for CostFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CostFunction {
    type Err = PlatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(CostFunction::Count),
            "weight" => Ok(CostFunction::Weight),
            _ => Err(PlatesError::UnsupportedCostFunction(s.to_owned())),
        }
    }
}

/// Computes the cost of replacing `prev` with `next`.
///
/// Both sides are sorted and their common suffix (the heaviest
/// matching items) is stripped, one pair at a time, from the top.
/// What remains on either side has to be moved.
///
/// Note: this is not an edit distance.  Items matching below the
/// first mismatch from the top still count as moved.
pub fn transition_cost(prev: &[Weight], next: &[Weight], cost_fn: CostFunction) -> Cost {
    let mut prev_q = prev.to_vec();
    let mut next_q = next.to_vec();

    prev_q.sort_unstable();
    next_q.sort_unstable();

    while let (Some(p), Some(n)) = (prev_q.last(), next_q.last()) {
        if p != n {
            break
        }
        prev_q.pop();
        next_q.pop();
    }

    match cost_fn {
        CostFunction::Count => (prev_q.len() + next_q.len()) as Cost,
        CostFunction::Weight => prev_q.iter().sum::<Cost>() + next_q.iter().sum::<Cost>(),
    }
}

/// Same as [`transition_cost()`], with the cost function given by
/// name, `"count"` or `"weight"`.
pub fn transition_cost_by_name<S: AsRef<str>>(
    prev: &[Weight],
    next: &[Weight],
    cost_fn: S,
) -> Result<Cost, PlatesError> {
    let cost_fn = cost_fn.as_ref().parse()?;

    Ok(transition_cost(prev, next, cost_fn))
}

/// A selection reachable from the current one, together with the
/// costs of getting there.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TransitionOption {
    pub(crate) node:        MultisetId,
    pub(crate) count_cost:  Cost,
    pub(crate) weight_cost: Cost,
}

impl TransitionOption {
    #[inline]
    pub fn get_node(&self) -> MultisetId {
        self.node
    }

    #[inline]
    pub fn get_count_cost(&self) -> Cost {
        self.count_cost
    }

    #[inline]
    pub fn get_weight_cost(&self) -> Cost {
        self.weight_cost
    }

    #[inline]
    pub fn get_cost(&self, cost_fn: CostFunction) -> Cost {
        match cost_fn {
            CostFunction::Count => self.count_cost,
            CostFunction::Weight => self.weight_cost,
        }
    }
}

/// Lists all selections of items summing up to `target`, which may
/// be drawn from the items of `weights` (currently loaded) and the
/// items of `available_weights` (not loaded).
///
/// An empty list is returned if `target` can't be reached.
pub fn get_transition_options(
    ctx: &mut Context,
    weights: MultisetId,
    available_weights: &[MultisetId],
    target: Weight,
) -> Result<Vec<TransitionOption>, PlatesError> {
    let current = ctx.get_multiset_checked(weights)?.as_slice().to_vec();
    let mut pool = current.clone();

    for &id in available_weights.iter() {
        pool.extend_from_slice(ctx.get_multiset_checked(id)?.as_slice());
    }

    let ways = enumerate_ways_of_weights(ctx, &pool)?;
    let mut result = Vec::new();

    if let Some(target_options) = ways.get(target) {
        for &node in target_options.iter() {
            let next = ctx.get_multiset_checked(node)?.as_slice();

            result.push(TransitionOption {
                node,
                count_cost: transition_cost(&current, next, CostFunction::Count),
                weight_cost: transition_cost(&current, next, CostFunction::Weight),
            });
        }
    } else {
        debug!("Total {} is unreachable from {}", target, ctx.with(&weights));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_added_on_top() {
        // Sorted tops are 10 and 20, so nothing stays in place.
        assert_eq!(transition_cost(&[5, 10], &[5, 10, 20], CostFunction::Count), 5);
        assert_eq!(transition_cost(&[5, 10], &[5, 10, 20], CostFunction::Weight), 50);
    }

    #[test]
    fn test_cost_common_suffix() {
        assert_eq!(transition_cost(&[10, 45], &[5, 45], CostFunction::Count), 2);
        assert_eq!(transition_cost(&[10, 45], &[5, 45], CostFunction::Weight), 15);
        assert_eq!(transition_cost(&[45, 10], &[10, 45], CostFunction::Count), 0);
        assert_eq!(transition_cost(&[], &[25, 10], CostFunction::Count), 2);
        assert_eq!(transition_cost(&[25, 10], &[], CostFunction::Weight), 35);
    }

    #[test]
    fn test_cost_not_edit_distance() {
        // The common 5 sits below a mismatch, so it has to move too.
        assert_eq!(transition_cost(&[5, 10], &[5, 25], CostFunction::Count), 4);
        assert_eq!(transition_cost(&[5, 10], &[5, 25], CostFunction::Weight), 45);
    }

    #[test]
    fn test_cost_by_name() {
        assert_eq!(transition_cost_by_name(&[5, 10], &[5, 10, 20], "count"), Ok(5));
        assert_eq!(transition_cost_by_name(&[5, 10], &[5, 10, 20], "weight"), Ok(50));
        assert_eq!(
            transition_cost_by_name(&[5], &[10], "plates"),
            Err(PlatesError::UnsupportedCostFunction("plates".to_owned()))
        );
    }

    #[test]
    fn test_cost_function_parse() {
        assert_eq!("count".parse::<CostFunction>(), Ok(CostFunction::Count));
        assert_eq!("weight".parse::<CostFunction>(), Ok(CostFunction::Weight));
        assert!("Weight".parse::<CostFunction>().is_err());
        assert_eq!(CostFunction::Weight.to_string(), "weight");
    }

    #[test]
    fn test_transition_options() {
        let mut ctx = Context::new("test");
        let cur = ctx.share_weights(vec![5, 10]);
        let available: Vec<_> =
            vec![10, 10, 25].into_iter().map(|w| ctx.share_weights(vec![w])).collect();
        let options = get_transition_options(&mut ctx, cur, &available, 25).unwrap();
        let mut found: Vec<_> = options
            .iter()
            .map(|opt| {
                let ms = ctx.get_multiset(opt.get_node()).unwrap().as_slice().to_vec();
                (ms, opt.get_count_cost(), opt.get_weight_cost())
            })
            .collect();
        found.sort();
        // [5, 10] -> [5, 10, 10] keeps only the top 10 in place.
        assert_eq!(found, vec![(vec![5, 10, 10], 3, 20), (vec![25], 3, 40)]);
    }

    #[test]
    fn test_transition_options_unreachable() {
        let mut ctx = Context::new("test");
        let cur = ctx.share_root();
        let available = vec![ctx.share_weights(vec![10])];
        let options = get_transition_options(&mut ctx, cur, &available, 15).unwrap();
        assert!(options.is_empty());
    }
}
