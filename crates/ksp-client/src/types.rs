//! Response envelopes for the storefront's `m_action/api` endpoints.
//!
//! ## Observed shape
//!
//! Every endpoint wraps its payload as `{"result": ...}`.
//!
//! ### `item/{uin}`
//! `result` is the item page object consumed by [`crate::Product::from_raw`],
//! or `null` / `false` when the uin does not exist.
//!
//! ### `category/?search=...`
//! `result.items` is an array of search hits consumed by
//! [`crate::PartialProduct::from_raw`]. `items` is omitted when nothing matches.
//!
//! ### `mlay/{sku}`
//! `result` maps a branch record id to `{"name", "qnt"}`. When no branch
//! carries the SKU the backend emits `[]` instead of `{}`; `qnt` is usually
//! a number but has been seen as a numeric string.

use serde::de::{DeserializeOwned, Error};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::raw::{as_int, RawMapping};
use crate::transport::BranchStockRecords;

/// Top-level envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

/// `result` of the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub items: Vec<RawMapping>,
}

/// `result` of the stock endpoint.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct StockResult {
    #[serde(deserialize_with = "php_map")]
    pub branches: BranchStockRecords,
}

/// Accepts an integer written as a JSON number or a numeric string.
pub(crate) fn loose_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_int(&value).ok_or_else(|| Error::custom(format!("expected an integer, got {value}")))
}

/// Accepts a JSON object, or the array / `null` the backend sends in place
/// of an empty object. Entries keep payload order; array entries are keyed
/// by their index.
pub(crate) fn php_map<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries: Vec<(String, Value)> = match Value::deserialize(deserializer)? {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| (idx.to_string(), item))
            .collect(),
        Value::Null => Vec::new(),
        other => {
            return Err(Error::custom(format!(
                "expected an object or array, got {other}"
            )))
        }
    };

    entries
        .into_iter()
        .map(|(key, item)| {
            T::deserialize(item)
                .map(|parsed| (key.clone(), parsed))
                .map_err(|e| Error::custom(format!("entry \"{key}\": {e}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn stock_result_accepts_object() {
        let parsed: ApiResponse<StockResult> = serde_json::from_value(json!({
            "result": {
                "1": {"name": "Tel Aviv", "qnt": 0},
                "2": {"name": "Haifa", "qnt": "5"}
            }
        }))
        .unwrap();
        let branches = parsed.result.branches;
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[1].0, "2");
        assert_eq!(branches[1].1.name, "Haifa");
        assert_eq!(branches[1].1.quantity, 5);
    }

    #[test]
    fn stock_result_accepts_empty_array_and_null() {
        let parsed: ApiResponse<StockResult> =
            serde_json::from_value(json!({"result": []})).unwrap();
        assert!(parsed.result.branches.is_empty());

        let parsed: ApiResponse<StockResult> =
            serde_json::from_value(json!({"result": null})).unwrap();
        assert!(parsed.result.branches.is_empty());
    }

    #[test]
    fn stock_result_keys_array_entries_by_index() {
        let parsed: ApiResponse<StockResult> = serde_json::from_value(json!({
            "result": [{"name": "Eilat", "qnt": 1}]
        }))
        .unwrap();
        let (id, record) = &parsed.result.branches[0];
        assert_eq!(id, "0");
        assert_eq!(record.name, "Eilat");
    }

    #[test]
    fn stock_result_keeps_payload_order() {
        let parsed: ApiResponse<StockResult> = serde_json::from_value(json!({
            "result": {
                "9": {"name": "Eilat", "qnt": 1},
                "1": {"name": "Haifa", "qnt": 0},
                "5": {"name": "Eilat", "qnt": 0}
            }
        }))
        .unwrap();
        let ids: Vec<&str> = parsed
            .result
            .branches
            .iter()
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(ids, ["9", "1", "5"]);
    }

    #[test]
    fn stock_result_reports_the_bad_entry() {
        let err = serde_json::from_value::<ApiResponse<StockResult>>(json!({
            "result": {
                "1": {"name": "Tel Aviv", "qnt": 2},
                "2": {"name": "Haifa", "qnt": "lots"}
            }
        }))
        .unwrap_err()
        .to_string();
        assert!(err.contains("entry \"2\""), "unexpected error: {err}");
        assert!(
            err.contains("expected an integer, got \"lots\""),
            "unexpected error: {err}"
        );
        assert!(!err.contains("untagged"), "unexpected error: {err}");
    }

    #[test]
    fn stock_result_rejects_scalar() {
        let err = serde_json::from_value::<ApiResponse<StockResult>>(json!({"result": 3}))
            .unwrap_err()
            .to_string();
        assert!(err.contains("expected an object or array"), "unexpected error: {err}");
    }

    #[test]
    fn search_result_defaults_to_no_items() {
        let parsed: ApiResponse<SearchResult> =
            serde_json::from_value(json!({"result": {"total": 0}})).unwrap();
        assert!(parsed.result.items.is_empty());
    }

    #[test]
    fn envelope_requires_result() {
        let result = serde_json::from_value::<ApiResponse<SearchResult>>(json!({"status": "ok"}));
        assert!(result.is_err());
    }
}
