//! Product flags and delivery options.
//!
//! A [`DeliveryFlag`] is a [`Flag`] with place, price and a delivery window
//! attached. It embeds the base flag rather than repeating its fields, and
//! both parsers share [`Flag::parse_with_name_key`] for the common keys.
//!
//! ### `title` vs `name`
//! Plain flags carry their label under `name`; delivery entries carry it
//! under `title`. Both land in [`Flag::name`].

use serde::Serialize;
use serde_json::Value;

use crate::error::KspError;
use crate::raw::{as_int, is_falsy, RawMapping, RawObject};

/// A categorical label on a product, e.g. a benefit or promotional badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flag {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl Flag {
    /// Parses a flag from `{"type": ..., "name": ...}`.
    ///
    /// # Errors
    ///
    /// Returns [`KspError::MissingField`] if `type` or `name` is absent and
    /// [`KspError::InvalidField`] if either is not a string.
    pub fn from_raw(raw: &RawMapping) -> Result<Self, KspError> {
        Self::parse_with_name_key(&RawObject::new(raw, "Flag"), "name")
    }

    fn parse_with_name_key(obj: &RawObject<'_>, name_key: &str) -> Result<Self, KspError> {
        Ok(Self {
            kind: obj.require_str("type")?,
            name: obj.require_str(name_key)?,
        })
    }
}

/// Delivery window in days. Either bound may be unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeliveryTime {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl DeliveryTime {
    /// Parses a delivery window **positionally**: the first value of the
    /// object is the lower bound and the second the upper bound. Key names
    /// are not consulted because the payload does not use stable ones.
    ///
    /// Falsy values (`null`, `0`, `""`) leave the bound unspecified.
    ///
    /// # Errors
    ///
    /// - [`KspError::MissingField`] (`min` / `max`) when fewer than two values are present.
    /// - [`KspError::InvalidField`] when a bound is negative or non-numeric,
    ///   or when the object has more than two values.
    pub fn from_raw(raw: &RawMapping) -> Result<Self, KspError> {
        let obj = RawObject::new(raw, "DeliveryTime");
        let mut values = obj.values();

        let min = parse_bound(&obj, "min", values.next())?;
        let max = parse_bound(&obj, "max", values.next())?;

        if values.next().is_some() {
            return Err(obj.invalid("time", &Value::Object(raw.clone())));
        }

        Ok(Self { min, max })
    }
}

fn parse_bound(
    obj: &RawObject<'_>,
    bound: &str,
    value: Option<&Value>,
) -> Result<Option<u32>, KspError> {
    let value = value.ok_or_else(|| obj.missing(bound))?;
    if is_falsy(value) {
        return Ok(None);
    }
    as_int(value)
        .and_then(|days| u32::try_from(days).ok())
        .map(Some)
        .ok_or_else(|| obj.invalid(bound, value))
}

/// A delivery option: where, for how much and how fast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryFlag {
    #[serde(flatten)]
    pub flag: Flag,
    pub place: String,
    /// Delivery fee. `0` when the source leaves it empty.
    pub price: u64,
    pub time: DeliveryTime,
}

impl DeliveryFlag {
    /// Parses `{"type", "title", "place", "price", "time"}`.
    ///
    /// # Errors
    ///
    /// Returns [`KspError::MissingField`] for any absent key and
    /// [`KspError::InvalidField`] for a negative or non-numeric price or a
    /// malformed `time` object.
    pub fn from_raw(raw: &RawMapping) -> Result<Self, KspError> {
        let obj = RawObject::new(raw, "DeliveryFlag");
        let flag = Flag::parse_with_name_key(&obj, "title")?;
        let place = obj.require_str("place")?;

        let raw_price = obj.require("price")?;
        let price = if is_falsy(raw_price) {
            0
        } else {
            as_int(raw_price)
                .and_then(|p| u64::try_from(p).ok())
                .ok_or_else(|| obj.invalid("price", raw_price))?
        };

        let time = DeliveryTime::from_raw(obj.require_object("time")?)?;

        Ok(Self {
            flag,
            place,
            price,
            time,
        })
    }
}

#[cfg(test)]
#[path = "flag_test.rs"]
mod tests;
