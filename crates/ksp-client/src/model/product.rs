//! Catalog products.
//!
//! [`PartialProduct`] is the identity record returned by search; [`Product`]
//! is the full item page and embeds a `PartialProduct` as its `base`.
//!
//! ### Identity
//! Both types compare and hash by `uin` alone: the same catalog entry seen
//! before and after a price change is still the same product.
//!
//! ### Payload shapes
//! Search hits carry identity fields at the top level with a single `img`.
//! Item pages nest identity fields under `data` and list images in an
//! `images` map; collections that are empty may arrive as `[]`.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;

use crate::error::KspError;
use crate::model::flag::{DeliveryFlag, Flag};
use crate::model::tag::Tag;
use crate::raw::{as_string, is_falsy, RawMapping, RawObject};
use crate::transport::{availability_by_branch, StockMap, Transport};

/// Summary record of a catalog product.
#[derive(Clone, Serialize)]
pub struct PartialProduct {
    /// Image URLs. Search hits provide exactly one.
    pub images: Vec<String>,
    pub name: String,
    /// Price as given by the storefront (whole shekels).
    pub price: i64,
    /// Permanent catalog identifier.
    pub uin: i64,
    /// Stock-keeping unit, the key for branch stock lookups.
    pub sku: String,
    #[serde(skip)]
    transport: Arc<dyn Transport>,
}

impl PartialProduct {
    /// Parses a search hit: `{"img", "name", "price", "uin", "uinsql"}`.
    ///
    /// # Errors
    ///
    /// Returns [`KspError::MissingField`] for any absent key and
    /// [`KspError::InvalidField`] when `price` or `uin` is not an integer.
    pub fn from_raw(raw: &RawMapping, transport: Arc<dyn Transport>) -> Result<Self, KspError> {
        let obj = RawObject::new(raw, "PartialProduct");
        let images = vec![obj.require_str("img")?];
        Self::from_identity(&obj, images, transport)
    }

    /// Parses the identity keys shared by search hits and item pages.
    fn from_identity(
        obj: &RawObject<'_>,
        images: Vec<String>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, KspError> {
        Ok(Self {
            images,
            name: obj.require_str("name")?,
            price: obj.require_int("price")?,
            uin: obj.require_int("uin")?,
            sku: obj.require_str("uinsql")?,
            transport,
        })
    }

    /// Looks up current availability per branch.
    ///
    /// Every call issues a fresh lookup through the transport; nothing is
    /// cached on the product.
    ///
    /// # Errors
    ///
    /// Propagates the transport's error unchanged.
    pub async fn stock(&self) -> Result<StockMap, KspError> {
        let records = self.transport.get_product_stock(&self.sku).await?;
        Ok(availability_by_branch(records))
    }
}

impl PartialEq for PartialProduct {
    fn eq(&self, other: &Self) -> bool {
        self.uin == other.uin
    }
}

impl Eq for PartialProduct {}

impl Hash for PartialProduct {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uin.hash(state);
    }
}

impl fmt::Debug for PartialProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialProduct")
            .field("images", &self.images)
            .field("name", &self.name)
            .field("price", &self.price)
            .field("uin", &self.uin)
            .field("sku", &self.sku)
            .finish_non_exhaustive()
    }
}

/// Full catalog product as shown on its item page.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    #[serde(flatten)]
    pub base: PartialProduct,
    /// Maximum number of interest-free payments.
    pub max_payments: i64,
    pub description: String,
    pub benefits: Vec<Flag>,
    pub delivery_flags: Vec<DeliveryFlag>,
    pub flags: Vec<Flag>,
    pub tags: Vec<Tag>,
    /// `uin`s of sibling variants (colour, size, ...).
    pub variants: Vec<i64>,
    /// Promotional message, when the storefront shows one.
    pub note: Option<Tag>,
}

impl Product {
    /// Parses an item page payload.
    ///
    /// Required: `data.{name, price, uin, uinsql, smalldesc}`, `p`, `images`,
    /// `benefitBox`, `delivery`, `flags`, `tags`. Optional:
    /// `products_options.variations` (absent ⇒ no variants) and `redMsg`
    /// (null or absent ⇒ no note).
    ///
    /// # Errors
    ///
    /// Returns [`KspError::MissingField`] naming the first absent required key
    /// and [`KspError::InvalidField`] for values of the wrong shape. Nested
    /// flags and tags report their own entity.
    pub fn from_raw(raw: &RawMapping, transport: Arc<dyn Transport>) -> Result<Self, KspError> {
        let obj = RawObject::new(raw, "Product");
        let data = RawObject::new(obj.require_object("data")?, "Product");

        let images = obj
            .require_items("images")?
            .into_iter()
            .map(|image| as_string(image).ok_or_else(|| obj.invalid("images", image)))
            .collect::<Result<Vec<_>, _>>()?;

        let base = PartialProduct::from_identity(&data, images, transport)?;
        let description = data.require_str("smalldesc")?;
        let max_payments = obj.require_int("p")?;

        let benefits = parse_flags(&obj, "benefitBox")?;
        let delivery_flags = obj
            .require_object_items("delivery")?
            .into_iter()
            .map(DeliveryFlag::from_raw)
            .collect::<Result<Vec<_>, _>>()?;
        let flags = parse_flags(&obj, "flags")?;
        let tags = obj
            .require_object_items("tags")?
            .into_iter()
            .map(Tag::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            base,
            max_payments,
            description,
            benefits,
            delivery_flags,
            flags,
            tags,
            variants: parse_variants(&obj)?,
            note: parse_note(&obj)?,
        })
    }

    /// Looks up current availability per branch. See [`PartialProduct::stock`].
    ///
    /// # Errors
    ///
    /// Propagates the transport's error unchanged.
    pub async fn stock(&self) -> Result<StockMap, KspError> {
        self.base.stock().await
    }

    #[must_use]
    pub fn uin(&self) -> i64 {
        self.base.uin
    }

    #[must_use]
    pub fn sku(&self) -> &str {
        &self.base.sku
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    #[must_use]
    pub fn price(&self) -> i64 {
        self.base.price
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.base.images
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
    }
}

impl From<Product> for PartialProduct {
    fn from(product: Product) -> Self {
        product.base
    }
}

fn parse_flags(obj: &RawObject<'_>, field: &str) -> Result<Vec<Flag>, KspError> {
    obj.require_object_items(field)?
        .into_iter()
        .map(Flag::from_raw)
        .collect()
}

/// `products_options.variations[*].uin_item`, or nothing when the product
/// has no options block.
fn parse_variants(obj: &RawObject<'_>) -> Result<Vec<i64>, KspError> {
    let Some(options) = obj.optional("products_options") else {
        return Ok(Vec::new());
    };
    if is_falsy(options) {
        return Ok(Vec::new());
    }

    let options = options
        .as_object()
        .ok_or_else(|| obj.invalid("products_options", options))?;

    RawObject::new(options, "Product")
        .require_object_items("variations")?
        .into_iter()
        .map(|variation| RawObject::new(variation, "Product").require_int("uin_item"))
        .collect()
}

/// `redMsg` → `Tag { name: type, description: msg }`.
fn parse_note(obj: &RawObject<'_>) -> Result<Option<Tag>, KspError> {
    let Some(message) = obj.optional("redMsg") else {
        return Ok(None);
    };
    if is_falsy(message) {
        return Ok(None);
    }

    let message = message
        .as_object()
        .ok_or_else(|| obj.invalid("redMsg", message))?;
    let message = RawObject::new(message, "Tag");

    Ok(Some(Tag::new(
        message.require_str("type")?,
        message.require_str("msg")?,
    )))
}

#[cfg(test)]
#[path = "product_test.rs"]
mod tests;
