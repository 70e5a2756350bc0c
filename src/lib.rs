//! Fusion Planner - chip fusion and disposal planning

pub mod core;
pub mod fusion;
pub mod inventory;
pub mod planner;

pub use crate::core::config::PlannerConfig;
pub use crate::core::error::{PlannerError, Result};
pub use crate::core::types::{OwnedItem, ResourceCode, SlotId};
pub use crate::planner::{FusionPlan, FusionPlanner};
