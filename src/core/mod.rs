pub mod config;
pub mod error;
pub mod types;

pub use error::{PlannerError, Result};
pub use types::{OwnedItem, ResourceCode, SlotId, EMPTY_KIND, MAX_LEVEL, MAX_WEIGHT};
