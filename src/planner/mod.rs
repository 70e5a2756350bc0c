//! Fusion planner - works out which chips to fuse and which to sell
//!
//! A run goes through three stages:
//! 1. Fusable chips from the inventory are loaded into a fresh multiset
//! 2. Each target claims a chip or plans a fusion tree (`resolve`)
//! 3. Trees are pruned into a fusion list; leftovers become the sell list (`report`)
//!
//! Runs share no state. Re-planning after the inventory changes is just
//! another call to [`FusionPlanner::plan`].

pub mod acquire;
pub mod node;
pub mod report;
pub mod resolve;

pub use acquire::Acquirer;
pub use node::{FusionNode, NodeState};
pub use report::{build_plan, FusionInput, FusionPlan, FusionRecord, TargetOutcome, TargetStatus};
pub use resolve::{resolve_target, resolve_targets, ResolvedTarget};

use crate::core::config::PlannerConfig;
use crate::core::error::Result;
use crate::core::types::OwnedItem;
use crate::fusion::LevelFloors;
use crate::inventory::InventoryMultiset;

/// Runs planning passes against a fixed configuration
#[derive(Debug, Clone)]
pub struct FusionPlanner {
    config: PlannerConfig,
    floors: LevelFloors,
}

impl FusionPlanner {
    /// Create a planner, validating the configuration first
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let floors = config.floors();
        Ok(Self { config, floors })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn floors(&self) -> &LevelFloors {
        &self.floors
    }

    /// Split an inventory into a multiset of fusable chips and the rest
    ///
    /// Chips are added in the order given, which fixes which physical slot
    /// each pop returns.
    pub fn load<I, F>(inventory: I, is_fusable: F) -> (InventoryMultiset, Vec<OwnedItem>)
    where
        I: IntoIterator<Item = OwnedItem>,
        F: Fn(&OwnedItem) -> bool,
    {
        let mut set = InventoryMultiset::new();
        let mut ignored = Vec::new();
        for item in inventory {
            if is_fusable(&item) {
                set.add(item);
            } else {
                ignored.push(item);
            }
        }
        (set, ignored)
    }

    /// Plan trees for every configured target
    pub fn resolve(&self, set: &mut InventoryMultiset) -> Result<Vec<ResolvedTarget>> {
        resolve_targets(set, &self.config.targets, &self.floors)
    }

    /// Full run: load, resolve, and report
    pub fn plan<I, F>(&self, inventory: I, is_fusable: F) -> Result<FusionPlan>
    where
        I: IntoIterator<Item = OwnedItem>,
        F: Fn(&OwnedItem) -> bool,
    {
        let (mut set, ignored) = Self::load(inventory, is_fusable);
        tracing::debug!(
            "Loaded {} fusable chip(s), ignored {}",
            set.len(),
            ignored.len()
        );

        let resolved = self.resolve(&mut set)?;
        build_plan(resolved, &mut set, ignored)
    }
}
