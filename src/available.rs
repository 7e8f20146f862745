use std::collections::BTreeMap;
use crate::{Context, Weight, Multiset, MultisetId, PlatesError};

/// Returns the items of `all` which remain after taking out the
/// items of `cur`, in the order of their appearance in `all`.
///
/// Each item of `cur` takes out the first remaining item of `all`
/// having the same weight.  Fails with
/// [`PlatesError::ContractViolation`] if `cur` isn't a sub-multiset
/// of `all`.
pub fn available_weights(cur: &Multiset, all: &[Weight]) -> Result<Vec<Weight>, PlatesError> {
    let mut to_mark: BTreeMap<Weight, usize> = BTreeMap::new();

    for &weight in cur.iter() {
        *to_mark.entry(weight).or_insert(0) += 1;
    }

    let mut result = Vec::with_capacity(all.len().saturating_sub(cur.len()));

    for &weight in all.iter() {
        match to_mark.get_mut(&weight) {
            Some(count) if *count > 0 => *count -= 1,
            _ => result.push(weight),
        }
    }

    let leftover: Vec<Weight> = to_mark
        .into_iter()
        .flat_map(|(weight, count)| std::iter::repeat(weight).take(count))
        .collect();

    if leftover.is_empty() {
        Ok(result)
    } else {
        Err(PlatesError::ContractViolation(leftover))
    }
}

/// Interned variant of [`available_weights()`]: the remaining items
/// are returned as single-item multisets shared in a [`Context`].
pub fn get_available_weights(
    ctx: &mut Context,
    cur: MultisetId,
    all: &[Weight],
) -> Result<Vec<MultisetId>, PlatesError> {
    let remaining = available_weights(ctx.get_multiset_checked(cur)?, all)?;

    Ok(remaining.into_iter().map(|weight| ctx.share_multiset(Multiset::singleton(weight))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_multiplicity() {
        let cur = Multiset::new(vec![2]);
        assert_eq!(available_weights(&cur, &[2, 2, 3]).unwrap(), vec![2, 3]);

        let cur = Multiset::new(vec![10, 5, 10]);
        assert_eq!(
            available_weights(&cur, &[5, 10, 10, 10, 25, 25, 45, 45]).unwrap(),
            vec![10, 25, 25, 45, 45]
        );
    }

    #[test]
    fn test_available_order() {
        let cur = Multiset::new(vec![3]);
        assert_eq!(available_weights(&cur, &[7, 3, 1, 3, 7]).unwrap(), vec![7, 1, 3, 7]);
        assert_eq!(available_weights(&Multiset::empty(), &[7, 3, 1]).unwrap(), vec![7, 3, 1]);
    }

    #[test]
    fn test_available_violation() {
        let cur = Multiset::new(vec![2, 2]);
        assert_eq!(available_weights(&cur, &[2, 3]), Err(PlatesError::ContractViolation(vec![2])));

        let cur = Multiset::new(vec![4]);
        assert_eq!(available_weights(&cur, &[]), Err(PlatesError::ContractViolation(vec![4])));
    }

    #[test]
    fn test_get_available_interned() {
        let mut ctx = Context::new("test");
        let cur = ctx.share_weights(vec![2]);
        let result = get_available_weights(&mut ctx, cur, &[2, 2, 3]).unwrap();
        assert_eq!(result, vec![ctx.share_weights(vec![2]), ctx.share_weights(vec![3])]);
        assert_eq!(result[0], cur);

        let cur = ctx.share_weights(vec![2, 2]);
        match get_available_weights(&mut ctx, cur, &[2, 3]) {
            Err(PlatesError::ContractViolation(_)) => {}
            other => panic!("Unexpected result {:?}", other),
        }
    }
}
