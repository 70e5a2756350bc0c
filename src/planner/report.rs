//! Pruning and reporting - turn planned trees into a fusion list
//!
//! Trees are consumed bottom-up. Empty branches drop out, every fusion
//! whose inputs are real (or already-reported) chips becomes a record, and
//! whatever is left in the multiset afterwards is offered for disposal.

use serde::Serialize;

use crate::core::error::Result;
use crate::core::types::{OwnedItem, ResourceCode};
use crate::fusion::fuse;
use crate::inventory::InventoryMultiset;
use crate::planner::node::{FusionNode, NodeState};
use crate::planner::resolve::ResolvedTarget;

/// One side of a reported fusion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FusionInput {
    /// A chip from the inventory
    Item(OwnedItem),
    /// The product of an earlier record in the list
    Fused(ResourceCode),
}

impl FusionInput {
    pub fn code(&self) -> ResourceCode {
        match self {
            FusionInput::Item(item) => item.code,
            FusionInput::Fused(code) => *code,
        }
    }
}

/// Fuse `lower` with `upper` to get `product`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionRecord {
    pub product: ResourceCode,
    pub lower: FusionInput,
    pub upper: FusionInput,
}

/// How far a single target got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "code", rename_all = "snake_case")]
pub enum TargetStatus {
    /// Met directly by a chip already owned
    Held(ResourceCode),
    /// Met by the fusion chain ending in this product
    Fused(ResourceCode),
    /// Some chips were found but the chain is incomplete
    Partial,
    /// Nothing usable was found
    Unmet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetOutcome {
    pub target: ResourceCode,
    pub status: TargetStatus,
}

/// Result of one planning run
///
/// Every chip handed to the planner lands in exactly one of `fusions`,
/// `disposable`, `held` or `ignored`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FusionPlan {
    /// Fusions to perform, lower levels first
    pub fusions: Vec<FusionRecord>,
    /// Chips no target needs
    pub disposable: Vec<OwnedItem>,
    /// Chips claimed by a target but not fused
    pub held: Vec<OwnedItem>,
    /// Chips that never entered planning
    pub ignored: Vec<OwnedItem>,
    /// One entry per target, in table order
    pub targets: Vec<TargetOutcome>,
}

impl FusionPlan {
    /// Number of targets met either directly or through fusion
    pub fn satisfied_count(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| matches!(t.status, TargetStatus::Held(_) | TargetStatus::Fused(_)))
            .count()
    }

    /// Inventory chips consumed by the reported fusions
    pub fn consumed(&self) -> impl Iterator<Item = &OwnedItem> + '_ {
        self.fusions
            .iter()
            .flat_map(|record| [&record.lower, &record.upper])
            .filter_map(|input| match input {
                FusionInput::Item(item) => Some(item),
                FusionInput::Fused(_) => None,
            })
    }
}

/// What a subtree amounts to once its fusions are reported
enum Settled {
    Empty,
    Chip(OwnedItem),
    Product(ResourceCode),
    Partial,
}

impl Settled {
    fn into_input(self) -> Option<FusionInput> {
        match self {
            Settled::Chip(item) => Some(FusionInput::Item(item)),
            Settled::Product(code) => Some(FusionInput::Fused(code)),
            Settled::Empty | Settled::Partial => None,
        }
    }
}

/// Post-order walk; records are pushed child before parent
fn settle(node: FusionNode, plan: &mut FusionPlan) -> Result<Settled> {
    let (lower, upper) = match node.state {
        NodeState::Empty => return Ok(Settled::Empty),
        NodeState::Bound(item) => return Ok(Settled::Chip(item)),
        NodeState::Pending { lower, upper } => (settle(*lower, plan)?, settle(*upper, plan)?),
    };

    if matches!((&lower, &upper), (Settled::Empty, Settled::Empty)) {
        return Ok(Settled::Empty);
    }

    match (lower.into_input(), upper.into_input()) {
        (Some(lower), Some(upper)) => {
            let product = fuse(lower.code(), upper.code())?;
            plan.fusions.push(FusionRecord {
                product,
                lower,
                upper,
            });
            Ok(Settled::Product(product))
        }
        (lower, upper) => {
            // Chips already claimed by an unfinished fusion stay with the holder
            for input in [lower, upper].into_iter().flatten() {
                if let FusionInput::Item(item) = input {
                    plan.held.push(item);
                }
            }
            Ok(Settled::Partial)
        }
    }
}

/// Build the final plan from resolved trees and the leftover stock
pub fn build_plan(
    resolved: Vec<ResolvedTarget>,
    leftovers: &mut InventoryMultiset,
    ignored: Vec<OwnedItem>,
) -> Result<FusionPlan> {
    let mut plan = FusionPlan {
        ignored,
        ..FusionPlan::default()
    };

    for ResolvedTarget { target, root } in resolved {
        let status = match settle(root, &mut plan)? {
            Settled::Chip(item) => {
                let code = item.code;
                plan.held.push(item);
                TargetStatus::Held(code)
            }
            Settled::Product(product) => TargetStatus::Fused(product),
            Settled::Partial => TargetStatus::Partial,
            Settled::Empty => TargetStatus::Unmet,
        };
        plan.targets.push(TargetOutcome { target, status });
    }

    plan.disposable.extend(leftovers.drain());

    // Stable sorts: lower-level records stay ahead of the fusions using them
    plan.fusions.sort_by_key(|record| record.product);
    plan.disposable.sort_by_key(|item| item.code);
    plan.held.sort_by_key(|item| item.code);

    tracing::info!(
        "Planned {} fusion(s); {}/{} targets met, {} chip(s) to sell, {} held",
        plan.fusions.len(),
        plan.satisfied_count(),
        plan.targets.len(),
        plan.disposable.len(),
        plan.held.len()
    );

    Ok(plan)
}
