use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length, in characters, of a name.
pub const MAX_NAME_LEN: usize = 64;
/// Maximum length, in characters, of a provenance citation.
pub const MAX_SOURCE_LEN: usize = 128;
/// Maximum length, in characters, of a culture label.
pub const MAX_CULTURE_LEN: usize = 64;
/// Maximum length, in characters, of a gender label.
pub const MAX_GENDER_LEN: usize = 64;
/// Maximum length, in characters, of a kind label.
pub const MAX_KIND_LEN: usize = 16;

/// Conventional kind for given (first) names.
pub const KIND_GIVEN: &str = "given";
/// Conventional kind for family names.
pub const KIND_SURNAME: &str = "surname";

/// A record field over its length limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("{field} is {len} characters long (limit {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// One stored name together with its provenance and demographic metadata.
///
/// Records are never mutated by the engine; generation only derives new
/// strings from them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameRecord {
    pub id: u64,
    pub name: String,
    /// Free-form citation for where the name was found.
    pub source: String,
    pub culture: String,
    /// Approximate year the name is tied to. Negative years are BCE.
    pub date: i64,
    pub gender: String,
    /// Role of the name, conventionally `"given"` or `"surname"`.
    pub kind: String,
}

impl NameRecord {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        source: impl Into<String>,
        culture: impl Into<String>,
        date: i64,
        gender: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            source: source.into(),
            culture: culture.into(),
            date,
            gender: gender.into(),
            kind: kind.into(),
        }
    }

    /// Check the field length limits, reporting the first field over its
    /// limit.
    pub fn check_limits(&self) -> Result<(), LimitError> {
        let fields = [
            ("name", &self.name, MAX_NAME_LEN),
            ("source", &self.source, MAX_SOURCE_LEN),
            ("culture", &self.culture, MAX_CULTURE_LEN),
            ("gender", &self.gender, MAX_GENDER_LEN),
            ("kind", &self.kind, MAX_KIND_LEN),
        ];
        for (field, value, max) in fields {
            let len = value.chars().count();
            if len > max {
                return Err(LimitError::TooLong { field, len, max });
            }
        }
        Ok(())
    }
}
