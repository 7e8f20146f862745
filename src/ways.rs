use std::{convert::TryFrom, collections::{btree_map, BTreeMap, BTreeSet}};
use crate::{Context, Contextual, Weight, Multiset, MultisetId, PlatesError};

/// A mapping from achievable totals to the distinct ways of
/// achieving them.
///
/// A way is a [`Multiset`] of items, interned in the [`Context`] in
/// which the mapping was computed.  Totals which can't be achieved
/// are absent, and so is the empty way of achieving zero.
#[derive(Clone, Default, Debug)]
pub struct WaysOfWeights {
    ways:  BTreeMap<Weight, BTreeSet<MultisetId>>,
    bound: Weight,
}

impl WaysOfWeights {
    /// Returns the set of ways of achieving a given total, if any.
    #[inline]
    pub fn get(&self, total: Weight) -> Option<&BTreeSet<MultisetId>> {
        self.ways.get(&total)
    }

    /// Returns the number of ways of achieving a given total.
    #[inline]
    pub fn count(&self, total: Weight) -> usize {
        self.ways.get(&total).map_or(0, |ways| ways.len())
    }

    /// Iterates over achievable totals in ascending order.
    pub fn totals(&self) -> btree_map::Keys<'_, Weight, BTreeSet<MultisetId>> {
        self.ways.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Weight, BTreeSet<MultisetId>> {
        self.ways.iter()
    }

    /// Number of achievable totals.
    #[inline]
    pub fn len(&self) -> usize {
        self.ways.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ways.is_empty()
    }

    /// Sum of all weights the mapping was computed from.
    #[inline]
    pub fn bound(&self) -> Weight {
        self.bound
    }

    /// Resolves all ways into plain multisets, so that mappings
    /// computed in different contexts may be compared.
    pub fn to_multisets(
        &self,
        ctx: &Context,
    ) -> Result<BTreeMap<Weight, BTreeSet<Multiset>>, PlatesError> {
        let mut result = BTreeMap::new();

        for (&total, ways) in self.ways.iter() {
            let ways: Result<BTreeSet<_>, _> =
                ways.iter().map(|&id| ctx.get_multiset_checked(id).map(Clone::clone)).collect();

            result.insert(total, ways?);
        }

        Ok(result)
    }
}

impl Contextual for WaysOfWeights {
    fn format(&self, ctx: &Context) -> Result<String, PlatesError> {
        let mut lines = Vec::with_capacity(self.ways.len());

        for (total, ways) in self.ways.iter() {
            let ways: Vec<_> = ways.iter().copied().collect();

            lines.push(format!("{}: {}", total, ways.format(ctx)?));
        }

        Ok(lines.join("\n"))
    }
}

/// Enumerates all distinct ways of selecting items from `weights`,
/// grouped by their total.
///
/// Every element of `weights` is a separate item, so repeated values
/// may be selected as many times as they occur.  Items are processed
/// one by one.  Each step reads ways from a snapshot of the state
/// preceding it and writes extended ways into a live copy, hence an
/// item never joins a way twice.
pub fn enumerate_ways_of_weights(
    ctx: &mut Context,
    weights: &[Weight],
) -> Result<WaysOfWeights, PlatesError> {
    let bound = weights
        .iter()
        .try_fold(0 as Weight, |acc, &w| acc.checked_add(w))
        .ok_or(PlatesError::WeightOverflow)?;

    let num_slots = usize::try_from(bound)
        .ok()
        .and_then(|b| b.checked_add(1))
        .ok_or(PlatesError::WeightOverflow)?;

    let mut snapshot: Vec<BTreeSet<MultisetId>> = vec![BTreeSet::new(); num_slots];

    for &weight in weights.iter() {
        let mut live = snapshot.clone();

        for (total, ways) in snapshot.iter().enumerate() {
            if ways.is_empty() {
                continue
            }

            let combined = total as Weight + weight;
            let slot = live.get_mut(combined as usize).ok_or(PlatesError::WayOutOfBounds {
                total: total as Weight,
                weight,
                bound,
            })?;

            for &way in ways.iter() {
                let extended = ctx.get_multiset_checked(way)?.with_weight(weight);

                slot.insert(ctx.share_multiset(extended));
            }
        }

        let slot = live.get_mut(weight as usize).ok_or(PlatesError::WayOutOfBounds {
            total: 0,
            weight,
            bound,
        })?;

        slot.insert(ctx.share_multiset(Multiset::singleton(weight)));

        snapshot = live;
    }

    let ways: BTreeMap<_, _> = snapshot
        .into_iter()
        .enumerate()
        .filter(|(_, ways)| !ways.is_empty())
        .map(|(total, ways)| (total as Weight, ways))
        .collect();

    debug!("{} achievable totals for {} weights (bound {})", ways.len(), weights.len(), bound);

    Ok(WaysOfWeights { ways, bound })
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use super::*;
    use crate::available_weights;

    fn ways_at(ctx: &Context, ways: &WaysOfWeights, total: Weight) -> BTreeSet<Vec<Weight>> {
        ways.get(total)
            .map(|set| {
                set.iter().map(|&id| ctx.get_multiset(id).unwrap().as_slice().to_vec()).collect()
            })
            .unwrap_or_default()
    }

    fn set_of(ways: Vec<Vec<Weight>>) -> BTreeSet<Vec<Weight>> {
        ways.into_iter().collect()
    }

    #[test]
    fn test_ways_completeness() {
        let mut ctx = Context::new("test");
        let ways = enumerate_ways_of_weights(&mut ctx, &[1, 2, 3]).unwrap();
        assert_eq!(ways.bound(), 6);
        assert_eq!(ways_at(&ctx, &ways, 3), set_of(vec![vec![3], vec![1, 2]]));
        assert_eq!(ways_at(&ctx, &ways, 6), set_of(vec![vec![1, 2, 3]]));
        assert_eq!(ways.totals().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_ways_no_duplicates() {
        let mut ctx = Context::new("test");
        let ways = enumerate_ways_of_weights(&mut ctx, &[2, 2, 3]).unwrap();
        assert_eq!(ways.count(4), 1);
        assert_eq!(ways_at(&ctx, &ways, 4), set_of(vec![vec![2, 2]]));
        assert_eq!(ways.count(2), 1);
        assert_eq!(ways.count(5), 1);
        assert_eq!(ways.count(7), 1);
        assert_eq!(ways.count(6), 0);
    }

    #[test]
    fn test_ways_no_reuse() {
        let mut ctx = Context::new("test");
        let ways = enumerate_ways_of_weights(&mut ctx, &[5, 10]).unwrap();
        assert!(ways.get(10).unwrap().contains(&ctx.share_weights(vec![10])));
        assert_eq!(ways.count(10), 1);
        assert_eq!(ways.count(20), 0);
    }

    #[test]
    fn test_ways_empty() {
        let mut ctx = Context::new("test");
        let ways = enumerate_ways_of_weights(&mut ctx, &[]).unwrap();
        assert!(ways.is_empty());
        assert_eq!(ways.bound(), 0);
        assert!(ways.get(0).is_none());
    }

    #[test]
    fn test_ways_overflow() {
        let mut ctx = Context::new("test");
        let result = enumerate_ways_of_weights(&mut ctx, &[Weight::max_value(), 1]);
        assert_eq!(result.unwrap_err(), PlatesError::WeightOverflow);
    }

    #[test]
    fn test_ways_sum_too_large_for_table() {
        let mut ctx = Context::new("test");
        let result = enumerate_ways_of_weights(&mut ctx, &[Weight::max_value()]);
        assert_eq!(result.unwrap_err(), PlatesError::WeightOverflow);
        assert_eq!(ctx.num_multisets(), 0);
    }

    #[test]
    fn test_ways_idempotent() {
        let weights = [10, 5, 25, 10, 45];
        let mut ctx1 = Context::new("first");
        let mut ctx2 = Context::new("second");
        ctx2.share_weights(vec![45, 45]);
        let ways1 = enumerate_ways_of_weights(&mut ctx1, &weights).unwrap();
        let ways2 = enumerate_ways_of_weights(&mut ctx2, &weights).unwrap();
        let ways3 = enumerate_ways_of_weights(&mut ctx1, &weights).unwrap();
        assert_eq!(ways1.to_multisets(&ctx1).unwrap(), ways2.to_multisets(&ctx2).unwrap());
        assert_eq!(ways1.to_multisets(&ctx1).unwrap(), ways3.to_multisets(&ctx1).unwrap());
    }

    #[test]
    fn test_ways_random() {
        let mut rng = rand::thread_rng();

        for _ in 0..20 {
            let size = rng.gen_range(0..7);
            let weights: Vec<Weight> = (0..size).map(|_| rng.gen_range(1..6) * 5).collect();
            let mut ctx = Context::new("random");
            let ways = enumerate_ways_of_weights(&mut ctx, &weights).unwrap();

            for (&total, set) in ways.iter() {
                assert!(total > 0);
                assert!(!set.is_empty());

                for &id in set.iter() {
                    let way = ctx.get_multiset(id).unwrap();
                    assert_eq!(way.total(), total);
                    assert!(available_weights(way, &weights).is_ok());
                }
            }

            if !weights.is_empty() {
                let all = ways.get(ways.bound()).unwrap();
                assert_eq!(all.len(), 1);
            }
        }
    }
}
