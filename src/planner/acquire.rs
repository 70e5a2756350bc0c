//! Acquisition engine - claim real chips or plan fusions for a code
//!
//! Every entry point returns exactly `qty` nodes. Whatever the multiset
//! cannot supply directly is handed to `make_fusion`, which recurses one
//! level down per call and bottoms out at level 0 with empty nodes.

use std::collections::BTreeMap;

use crate::core::error::Result;
use crate::core::types::ResourceCode;
use crate::fusion::{defuse_lower, fuse_complement, LevelFloors};
use crate::inventory::InventoryMultiset;
use crate::planner::node::FusionNode;

/// Claims chips out of a multiset on behalf of one planning run
pub struct Acquirer<'a> {
    set: &'a mut InventoryMultiset,
    floors: &'a LevelFloors,
}

impl<'a> Acquirer<'a> {
    pub fn new(set: &'a mut InventoryMultiset, floors: &'a LevelFloors) -> Self {
        Self { set, floors }
    }

    /// Read access to what is left in stock
    pub fn stock(&self) -> &InventoryMultiset {
        &*self.set
    }

    /// Claim chips of exactly `code`, planning fusions for any shortfall
    pub fn acquire_exact(&mut self, code: ResourceCode, qty: usize) -> Result<Vec<FusionNode>> {
        let nodes = self.claim([code], qty);
        self.fill_shortfall(code, qty, nodes)
    }

    /// Claim the lightest chips of `code`'s kind and level, up to its weight
    pub fn acquire_lowest(&mut self, code: ResourceCode, qty: usize) -> Result<Vec<FusionNode>> {
        let stock = self.stock_codes(code);
        let nodes = self.claim(stock, qty);
        self.fill_shortfall(code, qty, nodes)
    }

    /// Claim the heaviest chips of `code`'s kind and level not above its weight
    pub fn acquire_highest(&mut self, code: ResourceCode, qty: usize) -> Result<Vec<FusionNode>> {
        let stock = self.stock_codes(code);
        let nodes = self.claim(stock.into_iter().rev(), qty);
        self.fill_shortfall(code, qty, nodes)
    }

    /// Plan `qty` fusions that each produce `code`
    ///
    /// Lower children are taken as light as possible. Because they can land
    /// on different weights, lowers are grouped by the code they actually
    /// realize and each group gets its own complement, so a light
    /// synthesized lower leaves room for a heavier upper.
    pub fn make_fusion(&mut self, code: ResourceCode, qty: usize) -> Result<Vec<FusionNode>> {
        if qty == 0 {
            return Ok(Vec::new());
        }
        if code.level == 0 {
            return Ok(vec![FusionNode::empty(code); qty]);
        }

        tracing::trace!("Planning {} fusion(s) for {}", qty, code);

        let nominal_lower = defuse_lower(code)?;
        let lowers = self.acquire_lowest(nominal_lower, qty)?;

        let mut groups: BTreeMap<ResourceCode, Vec<FusionNode>> = BTreeMap::new();
        for lower in lowers {
            groups.entry(lower.realized_code()?).or_default().push(lower);
        }

        let mut nodes = Vec::with_capacity(qty);
        for (lower_code, group) in groups {
            let complement = fuse_complement(lower_code, code)?;
            let uppers = self.acquire_highest(complement, group.len())?;
            nodes.extend(
                group
                    .into_iter()
                    .zip(uppers)
                    .map(|(lower, upper)| FusionNode::pending(code, lower, upper)),
            );
        }

        Ok(nodes)
    }

    /// Stocked codes usable in place of `code`, lightest first
    fn stock_codes(&self, code: ResourceCode) -> Vec<ResourceCode> {
        match self.floors.at(code.level) {
            Some(floor) => self
                .set
                .codes_in(code.kind, code.level, floor..=code.weight)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Pop up to `qty` chips, walking `codes` in the given order
    fn claim(&mut self, codes: impl IntoIterator<Item = ResourceCode>, qty: usize) -> Vec<FusionNode> {
        let mut nodes = Vec::with_capacity(qty);
        for code in codes {
            while nodes.len() < qty {
                match self.set.pop(code) {
                    Some(item) => {
                        tracing::trace!("Claimed slot {} as {}", item.slot.0, item.code);
                        nodes.push(FusionNode::bound(item));
                    }
                    None => break,
                }
            }
            if nodes.len() == qty {
                break;
            }
        }
        nodes
    }

    fn fill_shortfall(
        &mut self,
        code: ResourceCode,
        qty: usize,
        mut nodes: Vec<FusionNode>,
    ) -> Result<Vec<FusionNode>> {
        let missing = qty.saturating_sub(nodes.len());
        if missing > 0 {
            nodes.extend(self.make_fusion(code, missing)?);
        }
        Ok(nodes)
    }
}
