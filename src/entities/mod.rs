//! The four record kinds managed by the dashboard.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub mod customer;
pub mod product;
pub mod transaction;
pub mod user;

pub use customer::{Customer, CustomerDraft};
pub use product::{Product, ProductCategory, ProductDraft};
pub use transaction::{Transaction, TransactionDraft, TransactionStatus};
pub use user::{Role, User, UserDraft};

/// Active/inactive flag shared by customers and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
        }
    }
}

/// Names the collection a boundary call is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Customers,
    Products,
    Transactions,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Customers,
        Collection::Products,
        Collection::Transactions,
        Collection::Users,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Customers => "customers",
            Collection::Products => "products",
            Collection::Transactions => "transactions",
            Collection::Users => "users",
        }
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|collection| collection.key() == s)
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
