use serde::{Deserialize, Serialize};

use super::name::NameRecord;

/// Criteria for narrowing a collection of names.
///
/// Every field is optional. An absent field, or one holding an empty
/// string, places no restriction. Present fields combine with logical AND
/// and compare by exact string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameFilter {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub culture: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<i64>,
}

impl NameFilter {
    /// A filter that matches every record.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn date(mut self, date: i64) -> Self {
        self.date = Some(date);
        self
    }

    /// Returns true if no field restricts anything.
    pub fn is_unrestricted(&self) -> bool {
        active(&self.kind).is_none()
            && active(&self.culture).is_none()
            && active(&self.gender).is_none()
            && active(&self.source).is_none()
            && self.date.is_none()
    }

    /// Returns true if the record satisfies every present criterion.
    pub fn matches(&self, record: &NameRecord) -> bool {
        field_matches(&self.kind, &record.kind)
            && field_matches(&self.culture, &record.culture)
            && field_matches(&self.gender, &record.gender)
            && field_matches(&self.source, &record.source)
            && self.date.map_or(true, |date| date == record.date)
    }

    /// The records that satisfy this filter, in their original order.
    pub fn apply<'a>(&self, records: &'a [NameRecord]) -> Vec<&'a NameRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn field_matches(criterion: &Option<String>, value: &str) -> bool {
    active(criterion).map_or(true, |wanted| wanted == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<NameRecord> {
        vec![
            NameRecord::new(1, "spam", "eggs", "bacon", 1970, "sausage", "given"),
            NameRecord::new(2, "ham", "eggs", "bacon", 1970, "baked beans", "given"),
            NameRecord::new(3, "tomato", "mushrooms", "pancakes", 2000, "sausage", "surname"),
        ]
    }

    #[test]
    fn default_matches_everything() {
        let filter = NameFilter::any();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&records()).len(), 3);
    }

    #[test]
    fn empty_strings_are_unrestricted() {
        let filter = NameFilter::any().kind("").culture("");
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&records()).len(), 3);
    }

    #[test]
    fn criteria_combine_with_and() {
        let records = records();
        let filter = NameFilter::any().culture("bacon").gender("sausage");
        let matched = filter.apply(&records);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "spam");
    }

    #[test]
    fn matching_is_exact() {
        let filter = NameFilter::any().kind("Given");
        assert!(filter.apply(&records()).is_empty());
    }

    #[test]
    fn date_and_source_filters() {
        let records = records();
        assert_eq!(NameFilter::any().date(2000).apply(&records).len(), 1);
        assert_eq!(NameFilter::any().source("eggs").apply(&records).len(), 2);
    }

    #[test]
    fn preserves_order() {
        let records = records();
        let names: Vec<&str> = NameFilter::any()
            .kind("given")
            .apply(&records)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["spam", "ham"]);
    }
}
