use serde::{Deserialize, Serialize};

use crate::form::lenient_f64;
use crate::id_gen::{generate_unique_ids, today_iso};
use crate::local_db_model::LocalDbModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    #[default]
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Failed => "Failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: String,
    /// Customer display name, free text.
    pub customer: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    pub status: TransactionStatus,
    pub payment_method: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionDraft {
    pub date: String,
    pub customer: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    pub status: TransactionStatus,
    pub payment_method: String,
}

impl Default for TransactionDraft {
    fn default() -> Self {
        Self {
            date: today_iso(),
            customer: String::new(),
            amount: 0.0,
            status: TransactionStatus::Pending,
            payment_method: String::new(),
        }
    }
}

impl LocalDbModel for Transaction {
    const COLLECTION: &'static str = "transactions";
    type Draft = TransactionDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: TransactionDraft) -> Self {
        Transaction {
            id,
            date: draft.date,
            customer: draft.customer,
            amount: draft.amount,
            status: draft.status,
            payment_method: draft.payment_method,
        }
    }

    // Transactions are looked up by reference as often as by name.
    fn search_fields(&self) -> Vec<&str> {
        vec![self.customer.as_str(), self.id.as_str()]
    }

    fn facet(&self, field: &str) -> Option<&'static str> {
        match field {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn sample_seed() -> Vec<Self> {
        let rows = [
            ("2023-05-01", "John Doe", 245.99, TransactionStatus::Completed, "Credit Card"),
            ("2023-05-02", "Jane Smith", 125.5, TransactionStatus::Completed, "PayPal"),
            ("2023-05-03", "Robert Johnson", 450.0, TransactionStatus::Pending, "Bank Transfer"),
            ("2023-05-04", "Emily Davis", 89.99, TransactionStatus::Failed, "Credit Card"),
            ("2023-05-05", "Michael Wilson", 320.75, TransactionStatus::Completed, "PayPal"),
        ];
        let ids = generate_unique_ids(rows.len());

        rows.into_iter()
            .zip(ids)
            .map(|((date, customer, amount, status, payment_method), id)| Transaction {
                id,
                date: date.to_string(),
                customer: customer.to_string(),
                amount,
                status,
                payment_method: payment_method.to_string(),
            })
            .collect()
    }
}
