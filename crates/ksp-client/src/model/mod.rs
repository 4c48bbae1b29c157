//! Typed catalog model built from raw storefront payloads.

pub mod flag;
pub mod product;
pub mod tag;

pub use flag::{DeliveryFlag, DeliveryTime, Flag};
pub use product::{PartialProduct, Product};
pub use tag::Tag;
