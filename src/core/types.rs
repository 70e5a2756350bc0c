//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest level a chip can reach through fusion
pub const MAX_LEVEL: i32 = 8;

/// Heaviest weight a planned chip may carry
///
/// Real drops sit far below this. The bound keeps every derived weight
/// inside `i32` through eight levels of fusion arithmetic.
pub const MAX_WEIGHT: i32 = 9999;

/// Kind marker used by the save format for an unoccupied slot
pub const EMPTY_KIND: i32 = -1;

/// Identifies a class of chip: kind, level and weight
///
/// Ordering is by kind, then level, then weight (field order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceCode {
    #[serde(rename = "type")]
    pub kind: i32,
    pub level: i32,
    pub weight: i32,
}

impl ResourceCode {
    pub const fn new(kind: i32, level: i32, weight: i32) -> Self {
        Self { kind, level, weight }
    }

    /// Same kind and level, different weight
    pub const fn with_weight(self, weight: i32) -> Self {
        Self { weight, ..self }
    }

    /// True when the level lies inside `0..=MAX_LEVEL`
    pub fn has_valid_level(&self) -> bool {
        (0..=MAX_LEVEL).contains(&self.level)
    }

    /// True when the weight lies inside `1..=MAX_WEIGHT`
    pub fn has_valid_weight(&self) -> bool {
        (1..=MAX_WEIGHT).contains(&self.weight)
    }

    /// Level and weight are both in range, so the code can be planned for
    pub fn is_plannable(&self) -> bool {
        self.has_valid_level() && self.has_valid_weight()
    }
}

impl fmt::Display for ResourceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X} +{} [{}]", self.kind, self.level, self.weight)
    }
}

/// Position of an item in the holder's inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u32);

/// A real chip sitting in an inventory slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedItem {
    pub slot: SlotId,
    #[serde(flatten)]
    pub code: ResourceCode,
}

impl OwnedItem {
    pub fn new(slot: u32, kind: i32, level: i32, weight: i32) -> Self {
        Self {
            slot: SlotId(slot),
            code: ResourceCode::new(kind, level, weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_ordering() {
        let a = ResourceCode::new(1, 8, 21);
        let b = ResourceCode::new(2, 0, 5);
        let c = ResourceCode::new(2, 0, 6);
        let d = ResourceCode::new(2, 1, 5);

        let mut codes = vec![d, c, a, b];
        codes.sort();
        assert_eq!(codes, vec![a, b, c, d]);
    }

    #[test]
    fn test_valid_level() {
        assert!(ResourceCode::new(1, 0, 5).has_valid_level());
        assert!(ResourceCode::new(1, 8, 21).has_valid_level());
        assert!(!ResourceCode::new(1, 9, 30).has_valid_level());
        assert!(!ResourceCode::new(1, -1, 5).has_valid_level());
    }

    #[test]
    fn test_plannable_weight() {
        assert!(ResourceCode::new(1, 3, 7).is_plannable());
        assert!(ResourceCode::new(1, 8, MAX_WEIGHT).is_plannable());
        assert!(!ResourceCode::new(1, 3, 0).is_plannable());
        assert!(!ResourceCode::new(1, 3, i32::MAX).is_plannable());
        assert!(!ResourceCode::new(1, 9, 30).is_plannable());
    }

    #[test]
    fn test_owned_item_json_shape() {
        let item: OwnedItem =
            serde_json::from_str(r#"{"slot": 4, "type": 14, "level": 3, "weight": 7}"#).unwrap();
        assert_eq!(item, OwnedItem::new(4, 0x0E, 3, 7));
        assert_eq!(item.code.to_string(), "#0E +3 [7]");
    }
}
