//! The collaborator products use to look up live stock.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::KspError;
use crate::types::loose_int;

/// Stock of one product at one branch, as reported by the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStock {
    pub name: String,
    /// Units on hand. Sent as `qnt`, sometimes as a numeric string.
    #[serde(rename = "qnt", deserialize_with = "loose_int")]
    pub quantity: i64,
}

/// Branch stock records as `(record id, record)` pairs, in payload order.
pub type BranchStockRecords = Vec<(String, BranchStock)>;

/// Availability keyed by branch name.
pub type StockMap = HashMap<String, bool>;

/// Source of per-branch stock for a SKU.
///
/// [`crate::KspClient`] is the HTTP implementation; tests substitute stubs.
/// Implementations own timeouts and cancellation; callers see their errors
/// unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the stock record of every branch carrying `sku`.
    async fn get_product_stock(&self, sku: &str) -> Result<BranchStockRecords, KspError>;
}

/// Collapses branch stock records into `{branch name → quantity > 0}`.
///
/// When several records name the same branch, the last one wins.
#[must_use]
pub fn availability_by_branch(records: BranchStockRecords) -> StockMap {
    records
        .into_iter()
        .map(|(_, branch)| (branch.name, branch.quantity > 0))
        .collect()
}
