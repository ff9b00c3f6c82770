//! The dashboard session: one owned store per record kind over a shared
//! persistence adapter.
//!
//! A [`Dashboard`] is created once per application session and handed to the
//! presentation layer by reference. Besides the typed stores it offers a
//! JSON-in/JSON-out surface keyed by [`Collection`], which is what the C
//! boundary in the crate root forwards to.

use std::sync::{Arc, Mutex, MutexGuard};

use log::info;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::config::StoreConfig;
use crate::derived::StockStatus;
use crate::entities::{
    AccountStatus, Collection, Customer, Product, Transaction, TransactionStatus, User,
};
use crate::entity_store::EntityStore;
use crate::error::{StoreError, StoreResult};
use crate::local_db_model::LocalDbModel;
use crate::local_db_state::{AppDbState, PersistenceAdapter};
use crate::query::Query;

pub struct Dashboard<P: PersistenceAdapter = AppDbState> {
    adapter: Arc<P>,
    pub customers: EntityStore<Customer, P>,
    pub products: EntityStore<Product, P>,
    pub transactions: EntityStore<Transaction, P>,
    pub users: EntityStore<User, P>,
}

impl Dashboard<AppDbState> {
    /// Opens (or creates) the LMDB storage described by `config` and loads
    /// every collection, seeding the ones never persisted before.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let adapter = AppDbState::init(config)?;
        Self::with_adapter(Arc::new(adapter))
    }
}

impl<P: PersistenceAdapter> Dashboard<P> {
    pub fn with_adapter(adapter: Arc<P>) -> StoreResult<Self> {
        let dashboard = Self {
            customers: EntityStore::open(Arc::clone(&adapter))?,
            products: EntityStore::open(Arc::clone(&adapter))?,
            transactions: EntityStore::open(Arc::clone(&adapter))?,
            users: EntityStore::open(Arc::clone(&adapter))?,
            adapter,
        };
        info!(
            "Dashboard ready: {} customers, {} products, {} transactions, {} users",
            dashboard.customers.len(),
            dashboard.products.len(),
            dashboard.transactions.len(),
            dashboard.users.len()
        );
        Ok(dashboard)
    }

    /// Filtered view of `collection` as a JSON array.
    pub fn list_json(&self, collection: Collection, query: &Query) -> StoreResult<JsonValue> {
        match collection {
            Collection::Customers => to_json(&self.customers.list(query)),
            Collection::Products => to_json(&self.products.list(query)),
            Collection::Transactions => to_json(&self.transactions.list(query)),
            Collection::Users => to_json(&self.users.list(query)),
        }
    }

    pub fn get_json(&self, collection: Collection, id: &str) -> StoreResult<JsonValue> {
        match collection {
            Collection::Customers => get_in(&self.customers, id),
            Collection::Products => get_in(&self.products, id),
            Collection::Transactions => get_in(&self.transactions, id),
            Collection::Users => get_in(&self.users, id),
        }
    }

    /// Creates a record from a JSON draft and returns the stored record.
    pub fn create_json(&mut self, collection: Collection, draft: JsonValue) -> StoreResult<JsonValue> {
        match collection {
            Collection::Customers => create_in(&mut self.customers, draft),
            Collection::Products => create_in(&mut self.products, draft),
            Collection::Transactions => create_in(&mut self.transactions, draft),
            Collection::Users => create_in(&mut self.users, draft),
        }
    }

    /// Replaces a record from its full JSON form and returns it as stored.
    pub fn update_json(&mut self, collection: Collection, record: JsonValue) -> StoreResult<JsonValue> {
        match collection {
            Collection::Customers => update_in(&mut self.customers, record),
            Collection::Products => update_in(&mut self.products, record),
            Collection::Transactions => update_in(&mut self.transactions, record),
            Collection::Users => update_in(&mut self.users, record),
        }
    }

    /// Deletes a record and returns what was removed.
    pub fn delete_json(&mut self, collection: Collection, id: &str) -> StoreResult<JsonValue> {
        match collection {
            Collection::Customers => to_json(&self.customers.delete(id)?),
            Collection::Products => to_json(&self.products.delete(id)?),
            Collection::Transactions => to_json(&self.transactions.delete(id)?),
            Collection::Users => to_json(&self.users.delete(id)?),
        }
    }

    pub fn reset(&mut self, collection: Collection) -> StoreResult<()> {
        match collection {
            Collection::Customers => self.customers.reset(),
            Collection::Products => self.products.reset(),
            Collection::Transactions => self.transactions.reset(),
            Collection::Users => self.users.reset(),
        }
    }

    /// Wipes storage and reseeds all four collections.
    pub fn reset_all(&mut self) -> StoreResult<()> {
        self.adapter.clear_all_records()?;
        for collection in Collection::ALL {
            self.reset(collection)?;
        }
        Ok(())
    }

    pub fn summary(&self) -> DashboardSummary {
        let completed: Vec<&Transaction> = self
            .transactions
            .records()
            .iter()
            .filter(|t| t.status == TransactionStatus::Completed)
            .collect();

        DashboardSummary {
            customers: self.customers.len(),
            active_customers: self
                .customers
                .records()
                .iter()
                .filter(|c| c.status == AccountStatus::Active)
                .count(),
            products: self.products.len(),
            transactions: self.transactions.len(),
            completed_transactions: completed.len(),
            pending_transactions: self
                .transactions
                .records()
                .iter()
                .filter(|t| t.status == TransactionStatus::Pending)
                .count(),
            // NaN amounts from bad form entries are left out of the total.
            revenue: completed
                .iter()
                .map(|t| t.amount)
                .filter(|amount| amount.is_finite())
                .sum(),
            users: self.users.len(),
            active_users: self
                .users
                .records()
                .iter()
                .filter(|u| u.status == AccountStatus::Active)
                .count(),
            restock_alerts: self
                .products
                .records()
                .iter()
                .filter(|p| p.status.needs_restock())
                .map(|p| StockAlert {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    stock: p.stock,
                    status: p.status,
                })
                .collect(),
        }
    }
}

/// Headline figures for the overview page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub customers: usize,
    pub active_customers: usize,
    pub products: usize,
    pub transactions: usize,
    pub completed_transactions: usize,
    pub pending_transactions: usize,
    /// Sum of completed transaction amounts.
    pub revenue: f64,
    pub users: usize,
    pub active_users: usize,
    pub restock_alerts: Vec<StockAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockAlert {
    pub id: String,
    pub name: String,
    pub stock: f64,
    pub status: StockStatus,
}

/// A dashboard behind one lock, so every read-modify-write on a collection
/// runs as a single critical section.
pub struct SharedDashboard<P: PersistenceAdapter = AppDbState> {
    inner: Mutex<Dashboard<P>>,
}

impl<P: PersistenceAdapter> SharedDashboard<P> {
    pub fn new(dashboard: Dashboard<P>) -> Self {
        Self {
            inner: Mutex::new(dashboard),
        }
    }

    pub fn lock(&self) -> StoreResult<MutexGuard<'_, Dashboard<P>>> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> StoreResult<JsonValue> {
    Ok(serde_json::to_value(value)?)
}

fn get_in<R: LocalDbModel, P: PersistenceAdapter>(
    store: &EntityStore<R, P>,
    id: &str,
) -> StoreResult<JsonValue> {
    let record = store
        .get(id)
        .ok_or_else(|| StoreError::not_found(store.key(), id))?;
    to_json(record)
}

fn create_in<R: LocalDbModel, P: PersistenceAdapter>(
    store: &mut EntityStore<R, P>,
    draft: JsonValue,
) -> StoreResult<JsonValue> {
    let draft: R::Draft = serde_json::from_value(draft)?;
    let record = store.create(draft)?;
    to_json(&record)
}

fn update_in<R: LocalDbModel, P: PersistenceAdapter>(
    store: &mut EntityStore<R, P>,
    record: JsonValue,
) -> StoreResult<JsonValue> {
    let record: R = serde_json::from_value(record)?;
    let id = record.id().to_string();
    store.update(record)?;
    get_in(store, &id)
}
