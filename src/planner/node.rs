//! Fusion nodes - the planning tree
//!
//! A node either wraps a real chip, plans a fusion of two child nodes, or
//! is empty because nothing could be found or synthesized for it. Children
//! are owned outright; the partner of a lower child is only ever reached
//! through the shared parent.

use crate::core::error::Result;
use crate::core::types::{OwnedItem, ResourceCode, MAX_LEVEL};
use crate::fusion::fuse;

/// Rendered width of a full-depth tree row
const TREE_WIDTH: usize = 7 * MAX_LEVEL as usize + 6;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    /// Nothing claimed or planned
    Empty,
    /// Bound to a real chip
    Bound(OwnedItem),
    /// Planned fusion of two children
    Pending {
        lower: Box<FusionNode>,
        upper: Box<FusionNode>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FusionNode {
    /// Code this node is meant to supply
    pub code: ResourceCode,
    pub state: NodeState,
}

impl FusionNode {
    pub fn empty(code: ResourceCode) -> Self {
        Self {
            code,
            state: NodeState::Empty,
        }
    }

    /// A leaf for a real chip; the node takes the chip's own code
    pub fn bound(item: OwnedItem) -> Self {
        Self {
            code: item.code,
            state: NodeState::Bound(item),
        }
    }

    pub fn pending(code: ResourceCode, lower: FusionNode, upper: FusionNode) -> Self {
        Self {
            code,
            state: NodeState::Pending {
                lower: Box::new(lower),
                upper: Box::new(upper),
            },
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self.state, NodeState::Bound(_))
    }

    /// No real chip anywhere in this subtree
    pub fn is_empty(&self) -> bool {
        match &self.state {
            NodeState::Empty => true,
            NodeState::Bound(_) => false,
            NodeState::Pending { lower, upper } => lower.is_empty() && upper.is_empty(),
        }
    }

    /// Pending fusion whose children both bottom out in real chips
    pub fn is_complete_fusion(&self) -> bool {
        match &self.state {
            NodeState::Pending { lower, upper } => lower.is_full() && upper.is_full(),
            _ => false,
        }
    }

    /// Either a real chip or something that can be fused into one
    pub fn is_full(&self) -> bool {
        self.is_bound() || self.is_complete_fusion()
    }

    /// Code this subtree actually turns into
    ///
    /// A bound chip is its own code and a complete fusion is whatever its
    /// children fuse into, which can come out lighter than the planned
    /// code. Anything unfinished still stands for the planned code.
    pub fn realized_code(&self) -> Result<ResourceCode> {
        match &self.state {
            NodeState::Bound(item) => Ok(item.code),
            NodeState::Pending { lower, upper } if self.is_complete_fusion() => {
                fuse(lower.realized_code()?, upper.realized_code()?)
            }
            _ => Ok(self.code),
        }
    }

    fn status_char(&self) -> char {
        if self.is_bound() {
            'A'
        } else if self.is_empty() {
            'E'
        } else if self.is_complete_fusion() {
            'F'
        } else {
            'P'
        }
    }

    /// Multi-line debug view of the subtree
    ///
    /// Each node prints as `[S WW]` with S one of `A`ctual, `E`mpty,
    /// `F`usable or `P`artial. The lower child follows on the same row, the
    /// upper child starts a new row aligned under it.
    pub fn render_tree(&self) -> String {
        let mut rows = vec![String::new()];
        self.render_into(&mut rows, "", false);
        rows.join("\n")
    }

    fn render_into(&self, rows: &mut Vec<String>, prefix: &str, has_upper_sibling: bool) {
        let tag = format!("[{} {:02}]", self.status_char(), self.code.weight);
        // rows always holds at least the row being written
        let Some(row) = rows.last_mut() else { return };
        row.push_str(&tag);

        match &self.state {
            NodeState::Pending { lower, upper } => {
                row.push(' ');
                let guide = if has_upper_sibling { "|      " } else { "       " };
                let child_prefix = format!("{}{}", prefix, guide);
                lower.render_into(rows, &child_prefix, true);
                rows.push(child_prefix.clone());
                upper.render_into(rows, &child_prefix, false);
            }
            NodeState::Bound(_) => {
                let pad = TREE_WIDTH.saturating_sub(row.len());
                row.push_str(&"-".repeat(pad));
            }
            NodeState::Empty => {}
        }
    }
}
