pub mod client;
pub mod error;
pub mod model;
pub mod raw;
pub mod transport;
pub mod types;

pub use client::KspClient;
pub use error::KspError;
pub use model::{DeliveryFlag, DeliveryTime, Flag, PartialProduct, Product, Tag};
pub use raw::RawMapping;
pub use transport::{availability_by_branch, BranchStock, BranchStockRecords, StockMap, Transport};
