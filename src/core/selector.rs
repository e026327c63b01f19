//! Name selector: filtered, uniform draws with replacement.

use crate::core::dice::RandomSource;
use crate::core::error::NameError;
use crate::schema::filter::NameFilter;
use crate::schema::name::NameRecord;

/// The records a selection draws from.
///
/// Applies `filter` to `names`. When nothing matches, the whole collection
/// is used instead, so an over-specific filter still yields names.
pub fn candidates<'a>(names: &'a [NameRecord], filter: &NameFilter) -> Vec<&'a NameRecord> {
    let matched = filter.apply(names);
    if matched.is_empty() {
        names.iter().collect()
    } else {
        matched
    }
}

/// Draw `num_names` names matching `filter`, uniformly and with
/// replacement, in draw order.
///
/// Fails with `InvalidInput` when `num_names` is zero or when there is no
/// record to draw from at all.
pub fn select<R: RandomSource>(
    names: &[NameRecord],
    filter: &NameFilter,
    num_names: usize,
    rng: &mut R,
) -> Result<Vec<String>, NameError> {
    Ok(select_records(names, filter, num_names, rng)?
        .into_iter()
        .map(|record| record.name.clone())
        .collect())
}

/// Like [`select`] but returns the chosen records themselves.
pub fn select_records<'a, R: RandomSource>(
    names: &'a [NameRecord],
    filter: &NameFilter,
    num_names: usize,
    rng: &mut R,
) -> Result<Vec<&'a NameRecord>, NameError> {
    if num_names == 0 {
        return Err(NameError::invalid("cannot select zero names"));
    }
    let pool = candidates(names, filter);
    if pool.is_empty() {
        return Err(NameError::invalid("no names to select from"));
    }

    let mut chosen = Vec::with_capacity(num_names);
    for _ in 0..num_names {
        if let Some(record) = rng.choose(&pool) {
            chosen.push(*record);
        }
    }
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::ScriptedRolls;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn breakfast() -> Vec<NameRecord> {
        vec![
            NameRecord::new(1, "spam", "eggs", "bacon", 1970, "sausage", "given"),
            NameRecord::new(2, "ham", "eggs", "bacon", 1970, "baked beans", "given"),
            NameRecord::new(3, "tomato", "mushrooms", "pancakes", 2000, "sausage", "surname"),
            NameRecord::new(4, "waffles", "porridge", "porridge", 2000, "baked beans", "given"),
        ]
    }

    #[test]
    fn returns_requested_count() {
        let names = breakfast();
        let mut rng = StdRng::seed_from_u64(42);
        let picked = select(&names, &NameFilter::any(), 5, &mut rng).unwrap();
        assert_eq!(picked.len(), 5);
    }

    #[test]
    fn scripted_draws_follow_candidate_order() {
        let names = breakfast();
        let mut rolls = ScriptedRolls::new([2, 0, 2]);
        let filter = NameFilter::any().kind("given");
        let picked = select(&names, &filter, 3, &mut rolls).unwrap();
        assert_eq!(picked, vec!["waffles", "spam", "waffles"]);
    }

    #[test]
    fn filtered_draws_stay_in_candidates() {
        let names = breakfast();
        let mut rng = StdRng::seed_from_u64(9);
        let filter = NameFilter::any().culture("bacon");
        for name in select(&names, &filter, 50, &mut rng).unwrap() {
            assert!(name == "spam" || name == "ham", "unexpected pick {name}");
        }
    }

    #[test]
    fn unknown_culture_falls_back_to_everything() {
        let names = breakfast();
        let mut rng = StdRng::seed_from_u64(1);
        let filter = NameFilter::any().culture("toast");
        let picked = select(&names, &filter, 3, &mut rng).unwrap();
        assert_eq!(picked.len(), 3);
        assert_eq!(candidates(&names, &filter).len(), names.len());
    }

    #[test]
    fn zero_names_is_invalid() {
        let names = breakfast();
        let mut rng = StdRng::seed_from_u64(1);
        let result = select(&names, &NameFilter::any(), 0, &mut rng);
        assert!(matches!(result, Err(NameError::InvalidInput(_))));
    }

    #[test]
    fn empty_collection_is_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = select(&[], &NameFilter::any().kind("given"), 1, &mut rng);
        assert!(matches!(result, Err(NameError::InvalidInput(_))));
    }

    #[test]
    fn same_seed_same_pick() {
        let names = breakfast();
        let filter = NameFilter::any().kind("given");
        let first = select(&names, &filter, 1, &mut StdRng::seed_from_u64(1138)).unwrap();
        for _ in 0..5 {
            let again = select(&names, &filter, 1, &mut StdRng::seed_from_u64(1138)).unwrap();
            assert_eq!(again, first);
        }
    }

    proptest! {
        #[test]
        fn picks_are_members(seed in any::<u64>(), count in 1usize..20) {
            let names = breakfast();
            let filter = NameFilter::any().kind("given");
            let allowed: Vec<&str> = filter.apply(&names).iter().map(|r| r.name.as_str()).collect();
            let picked = select(&names, &filter, count, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(picked.len(), count);
            for name in &picked {
                prop_assert!(allowed.contains(&name.as_str()));
            }
        }
    }
}
