//! Inventory layer - the chip multiset and the chip catalog

pub mod catalog;
pub mod multiset;

pub use catalog::{describe, is_fusable, kind_name};
pub use multiset::InventoryMultiset;
