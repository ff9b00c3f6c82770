//! Free-text search plus categorical filters over a collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::local_db_model::LocalDbModel;

/// Filter value meaning "no constraint from this field".
pub const ALL: &str = "all";

/// Constraint on one categorical field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldFilter {
    #[default]
    All,
    Equals(String),
}

impl FieldFilter {
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Equals(wanted) => value == Some(wanted.as_str()),
        }
    }
}

impl From<String> for FieldFilter {
    fn from(value: String) -> Self {
        if value == ALL {
            FieldFilter::All
        } else {
            FieldFilter::Equals(value)
        }
    }
}

impl From<&str> for FieldFilter {
    fn from(value: &str) -> Self {
        FieldFilter::from(value.to_string())
    }
}

impl From<FieldFilter> for String {
    fn from(filter: FieldFilter) -> Self {
        match filter {
            FieldFilter::All => ALL.to_string(),
            FieldFilter::Equals(value) => value,
        }
    }
}

/// A search term and a set of field filters, combined with logical AND.
///
/// ```rust
/// use dashboard_store::query::Query;
///
/// let query = Query::new("jo").with_filter("status", "Active").with_filter("role", "all");
/// assert_eq!(query.term, "jo");
/// assert_eq!(query.active_filters().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    pub term: String,
    pub filters: BTreeMap<String, FieldFilter>,
}

impl Query {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            filters: BTreeMap::new(),
        }
    }

    /// Matches every record.
    pub fn everything() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FieldFilter>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Filters that actually constrain something.
    pub fn active_filters(&self) -> impl Iterator<Item = (&String, &FieldFilter)> {
        self.filters
            .iter()
            .filter(|(_, filter)| **filter != FieldFilter::All)
    }

    /// Case-insensitive substring match against any search field. An empty
    /// term matches everything.
    pub fn matches_term<R: LocalDbModel>(&self, record: &R) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let needle = self.term.to_lowercase();
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn matches<R: LocalDbModel>(&self, record: &R) -> bool {
        self.matches_term(record)
            && self
                .active_filters()
                .all(|(field, filter)| filter.matches(record.facet(field)))
    }
}

/// Records of `collection` matching `query`, in collection order.
pub fn search<R: LocalDbModel>(collection: &[R], query: &Query) -> Vec<R> {
    collection
        .iter()
        .filter(|record| query.matches(*record))
        .cloned()
        .collect()
}
