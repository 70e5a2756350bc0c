//! Resolution driver - one acquisition per target, in table order

use crate::core::error::{PlannerError, Result};
use crate::core::types::ResourceCode;
use crate::fusion::LevelFloors;
use crate::inventory::InventoryMultiset;
use crate::planner::acquire::Acquirer;
use crate::planner::node::FusionNode;

/// A target together with the tree planned for it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTarget {
    pub target: ResourceCode,
    pub root: FusionNode,
}

/// Plan a tree for every target, draining chips from `set` as they are claimed
///
/// Targets are resolved strictly in order, so earlier entries get first
/// pick of the stock. Fails with `InvalidTarget` before touching the
/// multiset if any target has a level outside `0..=MAX_LEVEL` or a weight
/// outside `1..=MAX_WEIGHT`.
pub fn resolve_targets(
    set: &mut InventoryMultiset,
    targets: &[ResourceCode],
    floors: &LevelFloors,
) -> Result<Vec<ResolvedTarget>> {
    if let Some(bad) = targets.iter().find(|t| !t.is_plannable()) {
        return Err(PlannerError::InvalidTarget(*bad));
    }

    let mut acquirer = Acquirer::new(set, floors);
    let mut resolved = Vec::with_capacity(targets.len());

    for &target in targets {
        let root = resolve_target(&mut acquirer, target)?;
        tracing::debug!(
            "Resolved {}: bound={} full={} empty={}",
            target,
            root.is_bound(),
            root.is_full(),
            root.is_empty()
        );
        resolved.push(ResolvedTarget { target, root });
    }

    Ok(resolved)
}

/// Claim one root for `target`
///
/// An exact match in stock is taken as-is. Otherwise the lightest chip
/// that meets the target wins, and failing that a fusion is planned.
pub fn resolve_target(acquirer: &mut Acquirer<'_>, target: ResourceCode) -> Result<FusionNode> {
    let nodes = if acquirer.stock().count(target) > 0 {
        acquirer.acquire_exact(target, 1)?
    } else {
        acquirer.acquire_lowest(target, 1)?
    };

    Ok(nodes
        .into_iter()
        .next()
        .unwrap_or_else(|| FusionNode::empty(target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OwnedItem, SlotId};
    use crate::planner::node::NodeState;

    #[test]
    fn test_exact_match_wins_over_lighter_chip() {
        let mut set: InventoryMultiset = [OwnedItem::new(1, 3, 2, 6), OwnedItem::new(2, 3, 2, 8)]
            .into_iter()
            .collect();
        let floors = LevelFloors::from_base(5);

        let resolved =
            resolve_targets(&mut set, &[ResourceCode::new(3, 2, 8)], &floors).unwrap();
        assert_eq!(resolved.len(), 1);
        assert!(matches!(
            &resolved[0].root.state,
            NodeState::Bound(item) if item.slot == SlotId(2)
        ));
        assert_eq!(set.count(ResourceCode::new(3, 2, 6)), 1);
    }

    #[test]
    fn test_lighter_chip_fills_target_without_exact_match() {
        let mut set: InventoryMultiset = [OwnedItem::new(1, 3, 2, 6)].into_iter().collect();
        let floors = LevelFloors::from_base(5);

        let resolved =
            resolve_targets(&mut set, &[ResourceCode::new(3, 2, 8)], &floors).unwrap();
        assert!(resolved[0].root.is_bound());
        assert_eq!(resolved[0].root.code, ResourceCode::new(3, 2, 6));
        assert_eq!(resolved[0].target, ResourceCode::new(3, 2, 8));
        assert!(set.is_empty());
    }

    #[test]
    fn test_duplicate_targets_are_separate_requests() {
        let mut set: InventoryMultiset = [OwnedItem::new(1, 0x0E, 3, 7)].into_iter().collect();
        let floors = LevelFloors::from_base(5);
        let target = ResourceCode::new(0x0E, 3, 7);

        let resolved = resolve_targets(&mut set, &[target, target], &floors).unwrap();
        assert_eq!(resolved.len(), 2);
        assert!(resolved[0].root.is_bound());
        assert!(resolved[1].root.is_empty());
    }

    #[test]
    fn test_invalid_target_fails_before_claiming() {
        let mut set: InventoryMultiset = [OwnedItem::new(1, 1, 0, 5)].into_iter().collect();
        let floors = LevelFloors::from_base(5);

        let result = resolve_targets(
            &mut set,
            &[ResourceCode::new(1, 0, 5), ResourceCode::new(1, -2, 5)],
            &floors,
        );
        assert!(matches!(result, Err(PlannerError::InvalidTarget(_))));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_oversized_target_weight_fails_before_claiming() {
        let mut set: InventoryMultiset = [OwnedItem::new(1, 1, 2, 6)].into_iter().collect();
        let floors = LevelFloors::from_base(5);

        let result = resolve_targets(&mut set, &[ResourceCode::new(1, 3, i32::MAX)], &floors);
        assert!(matches!(result, Err(PlannerError::InvalidTarget(_))));
        assert_eq!(set.len(), 1);
    }
}
