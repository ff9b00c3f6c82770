//! The record-shape contract shared by every collection.
//!
//! One [`EntityStore`](crate::entity_store::EntityStore) works for any type
//! implementing [`LocalDbModel`]. The implementation names the storage key, the
//! input shape used to create a record, which text fields are searched, which
//! categorical fields can be filtered on, the derived-field rule (if any) and
//! the built-in sample records.
//!
//! # Example
//!
//! ```rust
//! use dashboard_store::local_db_model::LocalDbModel;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Note {
//!     id: String,
//!     title: String,
//!     body: String,
//! }
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct NoteDraft {
//!     title: String,
//!     body: String,
//! }
//!
//! impl LocalDbModel for Note {
//!     const COLLECTION: &'static str = "notes";
//!     type Draft = NoteDraft;
//!
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//!
//!     fn from_draft(id: String, draft: NoteDraft) -> Self {
//!         Note { id, title: draft.title, body: draft.body }
//!     }
//!
//!     fn search_fields(&self) -> Vec<&str> {
//!         vec![self.title.as_str(), self.body.as_str()]
//!     }
//!
//!     fn facet(&self, _field: &str) -> Option<&'static str> {
//!         None
//!     }
//!
//!     fn sample_seed() -> Vec<Self> {
//!         Vec::new()
//!     }
//! }
//! ```

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record persisted in a keyed collection.
///
/// `id` is assigned by the store at creation time and never changes.
pub trait LocalDbModel: Serialize + DeserializeOwned + Clone + Debug {
    /// Storage key of the collection, e.g. `"products"`.
    const COLLECTION: &'static str;

    /// Caller-supplied fields for a new record: everything except `id` and
    /// whatever the record fills in itself. `Default` yields the form defaults.
    type Draft: DeserializeOwned + Default;

    fn id(&self) -> &str;

    /// Builds a full record from a fresh id and a draft.
    fn from_draft(id: String, draft: Self::Draft) -> Self;

    /// Text fields matched by the free-text search term.
    fn search_fields(&self) -> Vec<&str>;

    /// Current value of the categorical field `field`, or `None` when this
    /// record kind has no such facet.
    fn facet(&self, field: &str) -> Option<&'static str>;

    /// Recomputes derived fields from their sources.
    fn apply_derived(&mut self) {}

    /// Copies fields that are fixed at creation (such as a created date) from
    /// the stored version of this record, ahead of an update.
    fn retain_immutable(&mut self, _previous: &Self) {}

    /// Built-in records used when the collection has never been persisted.
    fn sample_seed() -> Vec<Self>;
}
