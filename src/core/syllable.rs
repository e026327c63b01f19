//! Syllable splitter using consonant and vowel runs.
//!
//! A syllable is one vowel run plus the consonants that follow it. Leading
//! consonants before the first vowel belong to the first syllable, and
//! characters outside both sets never force a break. "Graham" therefore
//! splits as `["Grah", "am"]` and "Waffles" as `["Waffl", "es"]`.

use crate::core::config::{classify, CharClass, CharClasses, CharSet};

/// Split `name` into syllables using the given consonant and vowel sets.
///
/// The returned slices partition `name` exactly: concatenating them in
/// order reproduces the input. An empty name yields no syllables and a
/// name with no vowels yields one syllable holding the whole string.
pub fn split_syllables<'a>(name: &'a str, consonants: &CharSet, vowels: &CharSet) -> Vec<&'a str> {
    let mut syllables = Vec::new();
    let mut start = 0;
    let mut seen_vowel = false;
    let mut last = CharClass::Other;

    for (i, c) in name.char_indices() {
        match classify(c, consonants, vowels) {
            CharClass::Vowel => {
                // A vowel after a consonant run opens the next syllable.
                if seen_vowel && last == CharClass::Consonant {
                    syllables.push(&name[start..i]);
                    start = i;
                }
                seen_vowel = true;
                last = CharClass::Vowel;
            }
            CharClass::Consonant => last = CharClass::Consonant,
            CharClass::Other => {}
        }
    }

    if start < name.len() {
        syllables.push(&name[start..]);
    }
    syllables
}

/// [`split_syllables`] using the sets from a loaded configuration.
pub fn split_with<'a>(name: &'a str, classes: &CharClasses) -> Vec<&'a str> {
    split_syllables(name, &classes.consonants, &classes.vowels)
}
