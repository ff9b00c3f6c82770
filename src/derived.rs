//! Derived-field rules.
//!
//! A derived field is recomputed from its source field and is never set on its
//! own. Rules are pure and idempotent: applying one twice to the same source
//! value yields the same result.

use serde::{Deserialize, Serialize};

/// Highest stock count still reported as low.
pub const LOW_STOCK_THRESHOLD: f64 = 5.0;

/// Stock tier of a product, derived from its stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    /// `stock <= 0` is out of stock, up to 5 is low, anything above is in stock.
    ///
    /// A stock entry that did not parse is NaN. It fails both comparisons and
    /// lands in stock.
    pub fn from_stock(stock: f64) -> Self {
        if stock <= 0.0 {
            StockStatus::OutOfStock
        } else if stock <= LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }

    /// Whether the tier should raise a restock alert.
    pub fn needs_restock(&self) -> bool {
        !matches!(self, StockStatus::InStock)
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
