//! Filter predicates evaluated against catalog records.
//!
//! Filters are plain values built from caller input; they never fail. Inputs
//! that cannot be interpreted degrade to "matches nothing" (an empty id list)
//! rather than raising errors, and values arrive already decoded from whatever
//! transport carried them.

use crate::catalog::model::Record;
use std::collections::BTreeSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// Exact, case-sensitive match on a string field.
    Equals { field: String, value: String },
    /// Case-insensitive substring match on `name`. Stored lowercased.
    NameContains(String),
    /// `id` is one of the listed values.
    IdIn(BTreeSet<String>),
    /// Every inner filter matches. Empty means everything matches.
    All(Vec<Filter>),
}

impl Filter {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn name_contains(needle: &str) -> Self {
        Filter::NameContains(needle.to_lowercase())
    }

    /// Build a membership filter from a comma-separated id list.
    ///
    /// Entries are trimmed and empty entries dropped, so `""` or `",,"` give an
    /// empty set that matches no record.
    pub fn id_in_list(raw: &str) -> Self {
        Filter::IdIn(split_id_list(raw))
    }

    pub fn id_in<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::IdIn(ids.into_iter().map(Into::into).collect())
    }

    pub fn all_of(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::All(filters.into_iter().collect())
    }

    /// Conjunction of `self` and `other`, flattening nested `All`s.
    pub fn and(self, other: Filter) -> Self {
        let mut parts = match self {
            Filter::All(parts) => parts,
            single => vec![single],
        };
        match other {
            Filter::All(more) => parts.extend(more),
            single => parts.push(single),
        }
        Filter::All(parts)
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Filter::Equals { field, value } => record.field(field) == Some(value.as_str()),
            Filter::NameContains(needle) => record
                .name()
                .is_some_and(|name| name.to_lowercase().contains(needle.as_str())),
            Filter::IdIn(ids) => record.id().is_some_and(|id| ids.contains(id.as_str())),
            Filter::All(parts) => parts.iter().all(|part| part.matches(record)),
        }
    }
}

/// Split a comma-delimited id list into a set of non-empty, trimmed ids.
pub fn split_id_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{Category, Product};

    fn produce() -> Vec<Product> {
        vec![
            Product::new("Tomato", "t", "veg"),
            Product::new("Potato", "p", "veg"),
            Product::new("Apple", "a", "fruit"),
            Product::new("Banana", "b", "fruit"),
        ]
    }

    fn names<'a>(records: impl Iterator<Item = &'a Product>) -> Vec<&'a str> {
        records.filter_map(|p| p.name.as_deref()).collect()
    }

    #[test]
    fn name_contains_ignores_case() {
        let records = produce();
        let filter = Filter::name_contains("TO");
        assert_eq!(
            names(records.iter().filter(|p| filter.matches(*p))),
            vec!["Tomato", "Potato"]
        );
        let none = Filter::name_contains("xyz");
        assert!(records.iter().all(|p| !none.matches(p)));
    }

    #[test]
    fn empty_substring_matches_every_named_record() {
        let filter = Filter::name_contains("");
        assert!(produce().iter().all(|p| filter.matches(p)));
        assert!(!filter.matches(&Product::default()));
    }

    #[test]
    fn equals_is_exact_and_case_sensitive() {
        let tomato = Product::new("Tomato", "t", "veg");
        assert!(Filter::equals("name", "Tomato").matches(&tomato));
        assert!(!Filter::equals("name", "tomato").matches(&tomato));
        assert!(Filter::equals("category_id", "veg").matches(&tomato));
        assert!(!Filter::equals("colour", "red").matches(&tomato));
    }

    #[test]
    fn id_list_parsing_trims_and_drops_empties() {
        assert!(split_id_list("").is_empty());
        assert!(split_id_list(" , ,").is_empty());
        let ids = split_id_list("a, b,,c ");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_id_list_matches_nothing() {
        let veg = Category::new("Vegetables", "f4f9");
        assert!(!Filter::id_in_list("").matches(&veg));
        assert!(Filter::id_in_list("d899,f4f9").matches(&veg));
        assert!(!Filter::id_in_list("F4F9").matches(&veg));
    }

    #[test]
    fn conjunction_requires_every_part() {
        let records = produce();
        let filter = Filter::name_contains("a").and(Filter::equals("category_id", "fruit"));
        assert_eq!(
            names(records.iter().filter(|p| filter.matches(*p))),
            vec!["Apple", "Banana"]
        );

        let nested = Filter::all_of([Filter::name_contains("o")]).and(Filter::id_in(["p"]));
        match &nested {
            Filter::All(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected flattened conjunction, got {other:?}"),
        }
        assert_eq!(names(records.iter().filter(|p| nested.matches(*p))), vec!["Potato"]);
        assert!(Filter::all_of(Vec::new()).matches(&records[0]));
    }
}
