use serde::{Deserialize, Serialize};

use crate::entities::AccountStatus;
use crate::form::lenient_f64;
use crate::id_gen::{generate_unique_ids, today_iso};
use crate::local_db_model::LocalDbModel;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: AccountStatus,
    /// Lifetime spend in dollars.
    #[serde(deserialize_with = "lenient_f64")]
    pub spent: f64,
    pub last_order: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub status: AccountStatus,
    #[serde(deserialize_with = "lenient_f64")]
    pub spent: f64,
    pub last_order: String,
}

impl Default for CustomerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            status: AccountStatus::Active,
            spent: 0.0,
            last_order: today_iso(),
        }
    }
}

impl LocalDbModel for Customer {
    const COLLECTION: &'static str = "customers";
    type Draft = CustomerDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: CustomerDraft) -> Self {
        Customer {
            id,
            name: draft.name,
            email: draft.email,
            status: draft.status,
            spent: draft.spent,
            last_order: draft.last_order,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }

    fn facet(&self, field: &str) -> Option<&'static str> {
        match field {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn sample_seed() -> Vec<Self> {
        let rows = [
            ("John Doe", "john@example.com", AccountStatus::Active, 2456.0, "2023-05-01"),
            ("Jane Smith", "jane@example.com", AccountStatus::Active, 1789.0, "2023-05-03"),
            ("Robert Johnson", "robert@example.com", AccountStatus::Inactive, 890.0, "2023-04-15"),
            ("Emily Davis", "emily@example.com", AccountStatus::Active, 3421.0, "2023-05-07"),
            ("Michael Wilson", "michael@example.com", AccountStatus::Active, 1245.0, "2023-05-02"),
            ("Sarah Brown", "sarah@example.com", AccountStatus::Inactive, 567.0, "2023-04-10"),
            ("David Miller", "david@example.com", AccountStatus::Active, 2890.0, "2023-05-05"),
            ("Lisa Taylor", "lisa@example.com", AccountStatus::Active, 1678.0, "2023-05-04"),
            ("James Anderson", "james@example.com", AccountStatus::Inactive, 432.0, "2023-04-20"),
            ("Jennifer Thomas", "jennifer@example.com", AccountStatus::Active, 3210.0, "2023-05-06"),
        ];
        let ids = generate_unique_ids(rows.len());

        rows.into_iter()
            .zip(ids)
            .map(|((name, email, status, spent, last_order), id)| Customer {
                id,
                name: name.to_string(),
                email: email.to_string(),
                status,
                spent,
                last_order: last_order.to_string(),
            })
            .collect()
    }
}
