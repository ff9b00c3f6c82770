//! Catalogue products. `status` is derived from `stock` and is never taken
//! from input.

use serde::{Deserialize, Serialize};

use crate::derived::StockStatus;
use crate::form::lenient_f64;
use crate::id_gen::{generate_unique_ids, today_iso};
use crate::local_db_model::LocalDbModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductCategory {
    #[default]
    Electronics,
    Accessories,
    Clothing,
    Home,
    Books,
    Sports,
    Other,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Electronics => "Electronics",
            ProductCategory::Accessories => "Accessories",
            ProductCategory::Clothing => "Clothing",
            ProductCategory::Home => "Home",
            ProductCategory::Books => "Books",
            ProductCategory::Sports => "Sports",
            ProductCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    pub category: ProductCategory,
    #[serde(deserialize_with = "lenient_f64")]
    pub stock: f64,
    pub status: StockStatus,
    pub created_at: String,
}

impl Product {
    /// Edits the stock count and refreshes the status with it, so an edit form
    /// always previews the status the record will be saved with.
    pub fn set_stock(&mut self, stock: f64) {
        self.stock = stock;
        self.status = StockStatus::from_stock(stock);
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    pub category: ProductCategory,
    #[serde(deserialize_with = "lenient_f64")]
    pub stock: f64,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            category: ProductCategory::Electronics,
            stock: 0.0,
        }
    }
}

impl ProductDraft {
    /// Status the product will get once created.
    pub fn status_preview(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }
}

impl LocalDbModel for Product {
    const COLLECTION: &'static str = "products";
    type Draft = ProductDraft;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: ProductDraft) -> Self {
        Product {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            stock: draft.stock,
            status: StockStatus::from_stock(draft.stock),
            created_at: today_iso(),
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn facet(&self, field: &str) -> Option<&'static str> {
        match field {
            "category" => Some(self.category.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn apply_derived(&mut self) {
        self.status = StockStatus::from_stock(self.stock);
    }

    fn retain_immutable(&mut self, previous: &Self) {
        self.created_at.clone_from(&previous.created_at);
    }

    fn sample_seed() -> Vec<Self> {
        let rows = [
            (
                "Wireless Headphones",
                "Premium noise-cancelling wireless headphones with 30-hour battery life.",
                199.99,
                ProductCategory::Electronics,
                45.0,
                "2023-04-15",
            ),
            (
                "Smart Watch",
                "Fitness tracker with heart rate monitoring and sleep analysis.",
                149.99,
                ProductCategory::Electronics,
                28.0,
                "2023-04-20",
            ),
            (
                "Bluetooth Speaker",
                "Portable waterproof speaker with 360-degree sound.",
                79.99,
                ProductCategory::Electronics,
                5.0,
                "2023-04-25",
            ),
            (
                "Laptop Backpack",
                "Water-resistant backpack with anti-theft features and USB charging port.",
                59.99,
                ProductCategory::Accessories,
                0.0,
                "2023-05-01",
            ),
            (
                "Wireless Mouse",
                "Ergonomic wireless mouse with adjustable DPI settings.",
                29.99,
                ProductCategory::Electronics,
                62.0,
                "2023-05-05",
            ),
        ];
        let ids = generate_unique_ids(rows.len());

        rows.into_iter()
            .zip(ids)
            .map(
                |((name, description, price, category, stock, created_at), id)| Product {
                    id,
                    name: name.to_string(),
                    description: description.to_string(),
                    price,
                    category,
                    stock,
                    status: StockStatus::from_stock(stock),
                    created_at: created_at.to_string(),
                },
            )
            .collect()
    }
}
