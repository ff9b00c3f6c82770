//! Generic persisted collection with CRUD operations.
//!
//! An [`EntityStore`] owns the in-memory sequence of one record kind and keeps
//! the storage key in sync with it: every successful `create`, `update` and
//! `delete` re-serializes the whole collection before returning. If that write
//! fails the in-memory change is rolled back, so memory and storage never
//! disagree after an operation returns.
//!
//! Records are kept most-recent-first: `create` prepends.
//!
//! Deleted ids are retired under `"<key>.retired"` and never handed out again
//! by `create`. Records that failed to load are held under
//! `"<key>.quarantine"` until [`EntityStore::drain_quarantine`] takes them.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::Value as JsonValue;

use crate::error::{StoreError, StoreResult};
use crate::id_gen::generate_unique_id;
use crate::local_db_model::LocalDbModel;
use crate::local_db_state::PersistenceAdapter;
use crate::query::{self, Query};

/// Suffix of the key that receives persisted records which failed to parse.
pub const QUARANTINE_SUFFIX: &str = ".quarantine";

/// Suffix of the key listing ids of deleted records.
pub const RETIRED_SUFFIX: &str = ".retired";

pub struct EntityStore<R: LocalDbModel, P: PersistenceAdapter> {
    adapter: Arc<P>,
    key: String,
    seed: Vec<R>,
    records: Vec<R>,
    retired: HashSet<String>,
}

impl<R: LocalDbModel, P: PersistenceAdapter> EntityStore<R, P> {
    /// Opens the collection under its default key with its built-in seed.
    pub fn open(adapter: Arc<P>) -> StoreResult<Self> {
        Self::initialize(adapter, R::COLLECTION, R::sample_seed())
    }

    /// Loads `key`, or seeds it with `seed` when nothing usable is persisted.
    pub fn initialize(adapter: Arc<P>, key: &str, seed: Vec<R>) -> StoreResult<Self> {
        let mut store = Self {
            adapter,
            key: key.to_string(),
            seed,
            records: Vec::new(),
            retired: HashSet::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Re-reads the collection from storage, seeding it if the key is absent.
    pub fn reload(&mut self) -> StoreResult<()> {
        match self.load_persisted()? {
            Some(records) => {
                info!("Loaded {} records from '{}'", records.len(), self.key);
                self.records = records;
            }
            None => {
                info!("No persisted '{}', seeding {} sample records", self.key, self.seed.len());
                self.adapter.save(&self.key, &self.seed)?;
                self.records = self.seed.clone();
            }
        }
        self.retired = self.load_retired();
        Ok(())
    }

    /// Overwrites the collection with the seed.
    ///
    /// The seed replaces the stored value in one write. If that write fails
    /// the current records stay in place, both in memory and in storage.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.adapter.save(&self.key, &self.seed)?;
        self.records = self.seed.clone();
        self.retired = self.load_retired();
        info!("Collection '{}' reset to {} sample records", self.key, self.seed.len());
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Records satisfying `predicate`, in collection order.
    pub fn filter<F>(&self, predicate: F) -> Vec<R>
    where
        F: Fn(&R) -> bool,
    {
        self.records
            .iter()
            .filter(|record| predicate(*record))
            .cloned()
            .collect()
    }

    /// The visible subset for `query`.
    pub fn list(&self, query: &Query) -> Vec<R> {
        query::search(&self.records, query)
    }

    /// Assigns a fresh id, applies derived rules, prepends and persists.
    ///
    /// The id is neither live nor retired.
    pub fn create(&mut self, draft: R::Draft) -> StoreResult<R> {
        let id = {
            let taken: HashSet<&str> = self
                .records
                .iter()
                .map(|record| record.id())
                .chain(self.retired.iter().map(String::as_str))
                .collect();
            generate_unique_id(&taken)
        };

        let mut record = R::from_draft(id, draft);
        record.apply_derived();

        self.records.insert(0, record.clone());
        if let Err(e) = self.persist() {
            self.records.remove(0);
            return Err(e);
        }

        debug!("Created '{}' in '{}'", record.id(), self.key);
        Ok(record)
    }

    /// Replaces the record with the same id by `record`.
    ///
    /// Fields that are fixed at creation keep their stored values and derived
    /// fields are recomputed before the write. An unknown id leaves the
    /// collection and storage untouched and returns [`StoreError::NotFound`].
    pub fn update(&mut self, mut record: R) -> StoreResult<()> {
        let Some(position) = self.position(record.id()) else {
            warn!("Update skipped: no '{}' in '{}'", record.id(), self.key);
            return Err(StoreError::not_found(&self.key, record.id()));
        };

        record.retain_immutable(&self.records[position]);
        record.apply_derived();
        let previous = std::mem::replace(&mut self.records[position], record);
        if let Err(e) = self.persist() {
            self.records[position] = previous;
            return Err(e);
        }

        debug!("Updated '{}' in '{}'", self.records[position].id(), self.key);
        Ok(())
    }

    /// Removes the record with `id` and returns it. The id is retired first.
    pub fn delete(&mut self, id: &str) -> StoreResult<R> {
        let Some(position) = self.position(id) else {
            warn!("Delete skipped: no '{id}' in '{}'", self.key);
            return Err(StoreError::not_found(&self.key, id));
        };

        if self.retired.insert(id.to_string()) {
            if let Err(e) = self.adapter.save(&self.retired_key(), &self.retired) {
                self.retired.remove(id);
                return Err(e);
            }
        }

        let removed = self.records.remove(position);
        if let Err(e) = self.persist() {
            self.records.insert(position, removed);
            return Err(e);
        }

        debug!("Deleted '{id}' from '{}'", self.key);
        Ok(removed)
    }

    /// Ids of deleted records.
    pub fn retired_ids(&self) -> &HashSet<String> {
        &self.retired
    }

    /// Raw values set aside because they did not parse, oldest first.
    pub fn quarantined(&self) -> Vec<JsonValue> {
        match self.adapter.load(&self.quarantine_key()) {
            Some(JsonValue::Array(held)) => held,
            _ => Vec::new(),
        }
    }

    /// Removes and returns everything held in quarantine.
    pub fn drain_quarantine(&mut self) -> StoreResult<Vec<JsonValue>> {
        let held = self.quarantined();
        self.adapter.remove(&self.quarantine_key())?;
        if !held.is_empty() {
            info!("Drained {} quarantined values from '{}'", held.len(), self.key);
        }
        Ok(held)
    }

    fn quarantine_key(&self) -> String {
        format!("{}{QUARANTINE_SUFFIX}", self.key)
    }

    fn retired_key(&self) -> String {
        format!("{}{RETIRED_SUFFIX}", self.key)
    }

    fn load_retired(&self) -> HashSet<String> {
        match self.adapter.load(&self.retired_key()) {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Ignoring unreadable retired ids for '{}': {e}", self.key);
                HashSet::new()
            }),
            None => HashSet::new(),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn persist(&self) -> StoreResult<()> {
        self.adapter.save(&self.key, &self.records)
    }

    /// Parses the persisted blob record by record.
    ///
    /// Elements that do not fit `R` are moved to the quarantine key and the
    /// collection key is rewritten without them. A blob
    /// that is not an array is quarantined whole and reported as absent.
    fn load_persisted(&self) -> StoreResult<Option<Vec<R>>> {
        let items = match self.adapter.load(&self.key) {
            None => return Ok(None),
            Some(JsonValue::Array(items)) => items,
            Some(other) => {
                warn!("'{}' does not hold an array, quarantining it", self.key);
                self.quarantine(vec![other])?;
                return Ok(None);
            }
        };

        let mut records = Vec::with_capacity(items.len());
        let mut rejected = Vec::new();
        for item in items {
            match serde_json::from_value::<R>(item.clone()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Rejected malformed record in '{}': {e}", self.key);
                    rejected.push(item);
                }
            }
        }

        if !rejected.is_empty() {
            self.quarantine(rejected)?;
            self.adapter.save(&self.key, &records)?;
        }
        Ok(Some(records))
    }

    fn quarantine(&self, values: Vec<JsonValue>) -> StoreResult<()> {
        let key = self.quarantine_key();
        let mut held = self.quarantined();
        held.extend(values);
        info!("Quarantined values now held under '{key}': {}", held.len());
        self.adapter.save(&key, &held)
    }
}
