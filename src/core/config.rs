//! Character-class configuration and its layered RON loading.

use ron::extensions::Extensions;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONSONANTS: &str = "bcdfghjklmnpqrstvwxz";
pub const DEFAULT_VOWELS: &str = "aeiouy";
pub const DEFAULT_PUNCTUATION: &str = "'-.?!/:@+|•";
pub const DEFAULT_SCIFI_LETTERS: &str = "kqxz";

/// File name searched for in the working directory and in explicitly
/// given config directories.
pub const CONFIG_FILE_NAME: &str = "name_engine.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// An ordered set of characters with case-insensitive membership.
///
/// The original ordering is kept so random draws from the set are
/// reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CharSet {
    members: Vec<char>,
    lookup: FxHashSet<char>,
}

impl CharSet {
    pub fn new(chars: &str) -> Self {
        let members: Vec<char> = chars.chars().collect();
        let lookup = members.iter().flat_map(|c| c.to_lowercase()).collect();
        Self { members, lookup }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, c: char) -> bool {
        c.to_lowercase().all(|lower| self.lookup.contains(&lower))
    }

    pub fn members(&self) -> &[char] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }
}

impl From<String> for CharSet {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<CharSet> for String {
    fn from(value: CharSet) -> Self {
        value.members.into_iter().collect()
    }
}

impl From<&str> for CharSet {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// How a character participates in syllable splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Vowel,
    Consonant,
    Other,
}

/// The four character sets used by the splitter and the mods.
///
/// The sets are disjoint by convention only. When a character appears in
/// both `vowels` and `consonants` it classifies as a vowel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharClasses {
    pub consonants: CharSet,
    pub vowels: CharSet,
    pub punctuation: CharSet,
    pub scifi_letters: CharSet,
}

impl Default for CharClasses {
    fn default() -> Self {
        Self {
            consonants: CharSet::new(DEFAULT_CONSONANTS),
            vowels: CharSet::new(DEFAULT_VOWELS),
            punctuation: CharSet::new(DEFAULT_PUNCTUATION),
            scifi_letters: CharSet::new(DEFAULT_SCIFI_LETTERS),
        }
    }
}

impl CharClasses {
    pub fn classify(&self, c: char) -> CharClass {
        classify(c, &self.consonants, &self.vowels)
    }
}

pub(crate) fn classify(c: char, consonants: &CharSet, vowels: &CharSet) -> CharClass {
    if vowels.contains(c) {
        CharClass::Vowel
    } else if consonants.contains(c) {
        CharClass::Consonant
    } else {
        CharClass::Other
    }
}

/// One configuration file's worth of settings. Absent keys leave the
/// underlying value untouched when merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigLayer {
    #[serde(default)]
    pub consonants: Option<String>,
    #[serde(default)]
    pub vowels: Option<String>,
    #[serde(default)]
    pub punctuation: Option<String>,
    #[serde(default)]
    pub scifi_letters: Option<String>,
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl ConfigLayer {
    /// Parse a layer from a RON string. Optional keys are written bare,
    /// without a `Some(..)` wrapper.
    pub fn parse_ron(input: &str) -> Result<ConfigLayer, ConfigError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(input)?)
    }

    pub fn load_from_ron(path: &Path) -> Result<ConfigLayer, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }
}

/// The complete, resolved configuration for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameConfig {
    pub classes: CharClasses,
    /// Names store chosen by configuration, if any.
    pub store_path: Option<PathBuf>,
}

impl NameConfig {
    /// Overlay a layer on this configuration, key by key.
    pub fn merge(&mut self, layer: ConfigLayer) {
        if let Some(consonants) = layer.consonants {
            self.classes.consonants = CharSet::new(&consonants);
        }
        if let Some(vowels) = layer.vowels {
            self.classes.vowels = CharSet::new(&vowels);
        }
        if let Some(punctuation) = layer.punctuation {
            self.classes.punctuation = CharSet::new(&punctuation);
        }
        if let Some(scifi_letters) = layer.scifi_letters {
            self.classes.scifi_letters = CharSet::new(&scifi_letters);
        }
        if let Some(store_path) = layer.store_path {
            self.store_path = Some(store_path).filter(|p| !p.as_os_str().is_empty());
        }
    }

    /// Load configuration relative to the process working directory.
    pub fn load(explicit: Option<&Path>) -> Result<NameConfig, ConfigError> {
        let cwd = std::env::current_dir()?;
        Self::load_from(&cwd, explicit)
    }

    /// Build the configuration from defaults, then `name_engine.ron` in
    /// `cwd`, then the explicitly given file or directory.
    pub fn load_from(cwd: &Path, explicit: Option<&Path>) -> Result<NameConfig, ConfigError> {
        let mut config = NameConfig::default();
        for path in Self::search_paths(cwd, explicit)? {
            if !path.is_file() {
                continue;
            }
            debug!(path = %path.display(), "loading config layer");
            let layer = ConfigLayer::load_from_ron(&path)?;
            config.merge(layer);
        }
        Ok(config)
    }

    /// The candidate config files, lowest precedence first.
    pub fn search_paths(cwd: &Path, explicit: Option<&Path>) -> Result<Vec<PathBuf>, ConfigError> {
        let mut paths = vec![cwd.join(CONFIG_FILE_NAME)];
        if let Some(path) = explicit {
            if path.is_dir() {
                paths.push(path.join(CONFIG_FILE_NAME));
            } else if path.is_file() {
                paths.push(path.to_path_buf());
            } else {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
        }
        Ok(paths)
    }
}
