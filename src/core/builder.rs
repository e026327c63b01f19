//! Name builder: new names from fragments of existing ones.

use crate::core::config::CharClasses;
use crate::core::dice::RandomSource;
use crate::core::error::NameError;
use crate::core::syllable::split_with;

/// Upper-case the first character and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Join the first syllable of `name_a` to the last syllable of `name_b`.
///
/// A single-syllable name contributes the whole name. The result is
/// title-cased regardless of input casing.
pub fn build_compound(name_a: &str, name_b: &str, classes: &CharClasses) -> String {
    let head = split_with(name_a, classes).first().copied().unwrap_or_default();
    let tail = split_with(name_b, classes).last().copied().unwrap_or_default();
    title_case(&format!("{head}{tail}"))
}

/// Pool the syllables of every name and draw `num_syllables` of them,
/// with replacement, concatenated in draw order and title-cased.
pub fn build_from_syllables<S, R>(
    names: &[S],
    num_syllables: usize,
    classes: &CharClasses,
    rng: &mut R,
) -> Result<String, NameError>
where
    S: AsRef<str>,
    R: RandomSource,
{
    if num_syllables == 0 {
        return Err(NameError::invalid("cannot build a name from zero syllables"));
    }
    let pool: Vec<&str> = names
        .iter()
        .flat_map(|name| split_with(name.as_ref(), classes))
        .collect();
    if pool.is_empty() {
        return Err(NameError::invalid("no syllables to build a name from"));
    }

    let mut built = String::new();
    for _ in 0..num_syllables {
        if let Some(syllable) = rng.choose(&pool) {
            built.push_str(syllable);
        }
    }
    Ok(title_case(&built))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CharSet;
    use crate::core::dice::ScriptedRolls;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn title_case_normalizes() {
        assert_eq!(title_case("gRAHAM"), "Graham");
        assert_eq!(title_case("ésa"), "Ésa");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn compound_graham_waffles() {
        let classes = CharClasses::default();
        assert_eq!(build_compound("Graham", "Waffles", &classes), "Grahes");
    }

    #[test]
    fn compound_ignores_input_case() {
        let classes = CharClasses::default();
        assert_eq!(build_compound("GRAHAM", "waffles", &classes), "Grahes");
    }

    #[test]
    fn compound_single_syllable_names_contribute_whole() {
        let classes = CharClasses::default();
        assert_eq!(build_compound("spam", "eggs", &classes), "Spameggs");
        assert_eq!(build_compound("spam", "tomato", &classes), "Spamo");
    }

    #[test]
    fn compound_with_empty_names() {
        let classes = CharClasses::default();
        assert_eq!(build_compound("", "Waffles", &classes), "Es");
        assert_eq!(build_compound("", "", &classes), "");
    }

    #[test]
    fn compound_respects_configured_vowels() {
        let classes = CharClasses {
            vowels: CharSet::new("aeiout"),
            consonants: CharSet::new("bcdfghjklmnpqrsvwxz"),
            ..CharClasses::default()
        };
        assert_eq!(build_compound("tomato", "tomato", &classes), "Tomato");
    }

    #[test]
    fn syllables_drawn_in_order() {
        let classes = CharClasses::default();
        // Pool: ["spam", "tom", "at", "o"]
        let mut rolls = ScriptedRolls::new([1, 3, 0]);
        let built = build_from_syllables(&["spam", "tomato"], 3, &classes, &mut rolls).unwrap();
        assert_eq!(built, "Tomospam");
    }

    #[test]
    fn syllables_reproducible_with_seed() {
        let classes = CharClasses::default();
        let names = ["Graham", "Waffles", "tomato"];
        let a = build_from_syllables(&names, 3, &classes, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = build_from_syllables(&names, 3, &classes, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
        assert!(a.chars().next().unwrap().is_uppercase());
    }

    #[test]
    fn empty_pool_is_invalid() {
        let classes = CharClasses::default();
        let mut rng = StdRng::seed_from_u64(1);
        let result = build_from_syllables(&["", ""], 2, &classes, &mut rng);
        assert!(matches!(result, Err(NameError::InvalidInput(_))));

        let none: [&str; 0] = [];
        assert!(build_from_syllables(&none, 2, &classes, &mut rng).is_err());
    }

    #[test]
    fn zero_syllables_is_invalid() {
        let classes = CharClasses::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(build_from_syllables(&["spam"], 0, &classes, &mut rng).is_err());
    }
}
