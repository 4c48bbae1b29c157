//! Field extraction over untyped storefront payloads.
//!
//! The storefront API is loosely typed: numbers sometimes arrive as strings,
//! empty maps arrive as `[]`, and keys come and go between API revisions.
//! [`RawObject`] wraps one JSON object together with the name of the entity
//! being built from it, so every failure names both the field and the entity.
//!
//! Coercion rules (mirroring the storefront's own loose typing):
//! - integers accept JSON integers, floats (truncated toward zero) and
//!   numeric strings; booleans are rejected.
//! - strings accept JSON strings and numbers (rendered as written).
//! - `null` never satisfies a required field.

use serde_json::{Map, Value};

use crate::error::KspError;

/// An untyped key/value payload as returned by the storefront API.
pub type RawMapping = Map<String, Value>;

#[derive(Debug, Clone, Copy)]
pub(crate) struct RawObject<'a> {
    map: &'a RawMapping,
    entity: &'static str,
}

impl<'a> RawObject<'a> {
    pub(crate) fn new(map: &'a RawMapping, entity: &'static str) -> Self {
        Self { map, entity }
    }

    /// Values in payload order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &'a Value> {
        self.map.values()
    }

    pub(crate) fn require(&self, field: &str) -> Result<&'a Value, KspError> {
        self.map.get(field).ok_or_else(|| self.missing(field))
    }

    /// Returns the value for `field`, treating an explicit `null` as absent.
    pub(crate) fn optional(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub(crate) fn require_str(&self, field: &str) -> Result<String, KspError> {
        let value = self.require(field)?;
        as_string(value).ok_or_else(|| self.invalid(field, value))
    }

    pub(crate) fn require_int(&self, field: &str) -> Result<i64, KspError> {
        let value = self.require(field)?;
        as_int(value).ok_or_else(|| self.invalid(field, value))
    }

    pub(crate) fn require_object(&self, field: &str) -> Result<&'a RawMapping, KspError> {
        let value = self.require(field)?;
        value.as_object().ok_or_else(|| self.invalid(field, value))
    }

    /// Returns the entries of a collection field.
    ///
    /// Arrays yield their elements; objects yield their values in payload
    /// order. The API serializes empty maps as `[]`, so both shapes are
    /// accepted wherever a collection is expected.
    pub(crate) fn require_items(&self, field: &str) -> Result<Vec<&'a Value>, KspError> {
        match self.require(field)? {
            Value::Array(items) => Ok(items.iter().collect()),
            Value::Object(map) => Ok(map.values().collect()),
            other => Err(self.invalid(field, other)),
        }
    }

    /// Like [`Self::require_items`], but additionally requires every entry to
    /// be an object.
    pub(crate) fn require_object_items(
        &self,
        field: &str,
    ) -> Result<Vec<&'a RawMapping>, KspError> {
        self.require_items(field)?
            .into_iter()
            .map(|item| item.as_object().ok_or_else(|| self.invalid(field, item)))
            .collect()
    }

    pub(crate) fn missing(&self, field: &str) -> KspError {
        KspError::MissingField {
            field: field.to_owned(),
            entity: self.entity,
        }
    }

    pub(crate) fn invalid(&self, field: &str, value: &Value) -> KspError {
        KspError::InvalidField {
            field: field.to_owned(),
            value: value.clone(),
            entity: self.entity,
        }
    }
}

pub(crate) fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < 9.0e18)
                .map(truncate_to_i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn truncate_to_i64(f: f64) -> i64 {
    f.trunc() as i64
}

/// `null`, `false`, `0`, `""`, `[]` and `{}`.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
#[path = "raw_test.rs"]
mod tests;
