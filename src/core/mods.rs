//! Name mods: independent, stateless string mutations.
//!
//! Each mod takes a name and returns a new string. Randomized mods draw
//! from an injected [`RandomSource`], so a scripted or seeded source pins
//! their output. Mods only fail when a request is structurally impossible,
//! such as doubling a letter of an empty name.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use crate::core::builder::title_case;
use crate::core::config::{CharClasses, CharSet};
use crate::core::dice::RandomSource;
use crate::core::error::NameError;

/// Upper-case the first character, leaving the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Append `len` letters drawn from `letters`.
///
/// A one-letter pool gives a fixed run. An empty pool leaves the name as is.
pub fn add_letters<R: RandomSource>(name: &str, letters: &CharSet, len: usize, rng: &mut R) -> String {
    let mut result = name.to_string();
    for _ in 0..len {
        match rng.choose(letters.members()) {
            Some(letter) => result.push(*letter),
            None => break,
        }
    }
    result
}

/// Placement controls for [`add_punctuation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunctuationOptions {
    /// Character index to insert the mark at. Random interior position
    /// when `None`.
    pub index: Option<usize>,
    /// Upper-case the first character of the name.
    pub cap_before: bool,
    /// Upper-case the character following the mark.
    pub cap_after: bool,
}

impl Default for PunctuationOptions {
    fn default() -> Self {
        Self {
            index: None,
            cap_before: true,
            cap_after: true,
        }
    }
}

/// Insert one punctuation mark into the name.
///
/// The mark is drawn before the position. Random positions fall strictly
/// inside the name; names shorter than two characters get the mark
/// appended.
pub fn add_punctuation<R: RandomSource>(
    name: &str,
    punctuation: &CharSet,
    options: PunctuationOptions,
    rng: &mut R,
) -> String {
    let Some(&mark) = rng.choose(punctuation.members()) else {
        return name.to_string();
    };

    let chars: Vec<char> = name.chars().collect();
    let len = chars.len();
    let index = match options.index {
        Some(index) => index.min(len),
        None if len >= 2 => 1 + rng.below(len - 1),
        None => len,
    };

    let before: String = chars[..index].iter().collect();
    let after: String = chars[index..].iter().collect();
    let before = if options.cap_before { capitalize(&before) } else { before };
    let after = if options.cap_after { capitalize(&after) } else { after };
    format!("{before}{mark}{after}")
}

/// Build a name from the start of `mod_name` and the body of `root_name`.
///
/// The leading run of `mod_name` (consonants or vowels, whichever it
/// starts with) replaces the leading run of `root_name` when both start
/// with the same class, and is prefixed to it otherwise.
pub fn compound_names(mod_name: &str, root_name: &str, consonants: &CharSet, vowels: &CharSet) -> String {
    let mod_chars: Vec<char> = mod_name.to_lowercase().chars().collect();
    let root_chars: Vec<char> = root_name.to_lowercase().chars().collect();
    let (Some(&mod_first), Some(&root_first)) = (mod_chars.first(), root_chars.first()) else {
        return title_case(&format!("{mod_name}{root_name}"));
    };

    let mod_set = if vowels.contains(mod_first) { vowels } else { consonants };
    let head_end = run_end(&mod_chars, mod_set);
    let tail_start = match (vowels.contains(mod_first), vowels.contains(root_first)) {
        (false, false) => run_end(&root_chars, consonants),
        (true, true) => run_end(&root_chars, vowels),
        _ => 0,
    };

    let name: String = mod_chars[..head_end]
        .iter()
        .chain(&root_chars[tail_start..])
        .collect();
    title_case(&name)
}

/// Index just past the leading run, always at least one character.
fn run_end(chars: &[char], set: &CharSet) -> usize {
    let mut index = 1;
    while chars.get(index).is_some_and(|c| set.contains(*c)) {
        index += 1;
    }
    index.min(chars.len())
}

/// Duplicate one randomly chosen character in place.
///
/// Only characters in `letters` are eligible; an empty set allows any
/// character. A name without eligible characters is returned unchanged.
pub fn double_letter<R: RandomSource>(name: &str, letters: &CharSet, rng: &mut R) -> Result<String, NameError> {
    if name.is_empty() {
        return Err(NameError::invalid("cannot double a letter of an empty name"));
    }

    let eligible: Vec<usize> = name
        .chars()
        .enumerate()
        .filter(|(_, c)| letters.is_empty() || letters.contains(*c))
        .map(|(i, _)| i)
        .collect();
    let Some(&target) = rng.choose(&eligible) else {
        return Ok(name.to_string());
    };

    let mut doubled = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        doubled.push(c);
        if i == target {
            doubled.push(c);
        }
    }
    Ok(doubled)
}

/// Duplicate one randomly chosen vowel.
pub fn double_vowel<R: RandomSource>(name: &str, vowels: &CharSet, rng: &mut R) -> Result<String, NameError> {
    double_letter(name, vowels, rng)
}

/// Replace one random character with its base64 encoding, padding dropped,
/// and capitalize the result.
pub fn garble_character<R: RandomSource>(name: &str, rng: &mut R) -> Result<String, NameError> {
    let chars: Vec<char> = name.chars().collect();
    if chars.is_empty() {
        return Err(NameError::invalid("cannot garble an empty name"));
    }

    let target = rng.below(chars.len());
    let mut garbled = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i == target {
            let mut buf = [0u8; 4];
            let encoded = STANDARD.encode(c.encode_utf8(&mut buf).as_bytes());
            garbled.push_str(encoded.trim_end_matches('='));
        } else {
            garbled.push(*c);
        }
    }
    Ok(title_case(&garbled))
}

/// Heavier scrambling: garble a character, double a letter, then add a
/// scifi letter.
pub fn garble<R: RandomSource>(name: &str, classes: &CharClasses, rng: &mut R) -> Result<String, NameError> {
    let garbled = garble_character(name, rng)?;
    let doubled = double_letter(&garbled, &CharSet::new(""), rng)?;
    Ok(make_scifi(&doubled, classes, rng))
}

/// Work one of the scifi letters into the name.
///
/// A d12 picks the placement: 1-5 the front, 6-10 the end, 11-12 a random
/// position. At the front or end the letter is added next to a vowel and
/// replaces a consonant. On 11-12 a d20 of 20 replaces a random number of
/// random characters instead of one.
pub fn make_scifi<R: RandomSource>(name: &str, classes: &CharClasses, rng: &mut R) -> String {
    let Some(&letter) = rng.choose(classes.scifi_letters.members()) else {
        return name.to_string();
    };
    let placement = rng.roll(12);
    let wild = rng.roll(20);

    let mut chars: Vec<char> = name.to_lowercase().chars().collect();
    let len = chars.len();
    if len == 0 {
        return title_case(&letter.to_string());
    }

    let vowels = &classes.vowels;
    if placement < 6 {
        if vowels.contains(chars[0]) {
            chars.insert(0, letter);
        } else {
            chars[0] = letter;
        }
    } else if placement < 11 {
        if vowels.contains(chars[len - 1]) {
            chars.push(letter);
        } else {
            chars[len - 1] = letter;
        }
    } else if wild < 20 {
        let index = rng.below(len);
        chars[index] = letter;
    } else {
        let count = rng.roll(len);
        for _ in 0..count {
            let index = rng.below(len);
            chars[index] = letter;
        }
    }

    title_case(&chars.into_iter().collect::<String>())
}

/// Substitute characters through `char_map`.
///
/// With `casefold` the name is lower-cased first, so lower-case keys match
/// either case. Without it matching is case-sensitive.
pub fn translate_characters<S: BuildHasher>(name: &str, char_map: &HashMap<char, char, S>, casefold: bool) -> String {
    let source = if casefold { name.to_lowercase() } else { name.to_string() };
    source
        .chars()
        .map(|c| char_map.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Prefix an apostrophe-separated fragment: usually `T`, and on a d6 of 6
/// a random consonant-vowel pair.
pub fn vulcanize<R: RandomSource>(name: &str, classes: &CharClasses, rng: &mut R) -> String {
    let prefix = if rng.roll(6) < 6 {
        "T".to_string()
    } else {
        let consonant = rng.choose(classes.consonants.members()).copied();
        let vowel = rng.choose(classes.vowels.members()).copied();
        let pair: String = consonant.into_iter().chain(vowel).collect();
        if pair.is_empty() {
            "T".to_string()
        } else {
            title_case(&pair)
        }
    };
    format!("{prefix}'{}", capitalize(name))
}

/// The mods that need nothing beyond a name, the character classes, and
/// a random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleMod {
    AddPunctuation,
    DoubleLetter,
    DoubleVowel,
    Garble,
    MakeScifi,
    Vulcanize,
}

impl SimpleMod {
    pub const ALL: [SimpleMod; 6] = [
        Self::AddPunctuation,
        Self::DoubleLetter,
        Self::DoubleVowel,
        Self::Garble,
        Self::MakeScifi,
        Self::Vulcanize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPunctuation => "add_punctuation",
            Self::DoubleLetter => "double_letter",
            Self::DoubleVowel => "double_vowel",
            Self::Garble => "garble",
            Self::MakeScifi => "make_scifi",
            Self::Vulcanize => "vulcanize",
        }
    }

    pub fn apply<R: RandomSource>(&self, name: &str, classes: &CharClasses, rng: &mut R) -> Result<String, NameError> {
        match self {
            Self::AddPunctuation => Ok(add_punctuation(
                name,
                &classes.punctuation,
                PunctuationOptions::default(),
                rng,
            )),
            Self::DoubleLetter => double_letter(name, &CharSet::new(""), rng),
            Self::DoubleVowel => double_vowel(name, &classes.vowels, rng),
            Self::Garble => garble(name, classes, rng),
            Self::MakeScifi => Ok(make_scifi(name, classes, rng)),
            Self::Vulcanize => Ok(vulcanize(name, classes, rng)),
        }
    }
}

impl fmt::Display for SimpleMod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimpleMod {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| NameError::invalid(format!("unknown mod '{s}'")))
    }
}
