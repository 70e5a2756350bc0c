//! Chip catalog - display names and which kinds can be levelled

use crate::core::types::{OwnedItem, ResourceCode, EMPTY_KIND};

/// Levelable chip kinds and their in-game names
const LEVELABLE: &[(i32, &str)] = &[
    (0x01, "Weapon Attack Up"),
    (0x02, "Down-Attack Up"),
    (0x03, "Critical Up"),
    (0x04, "Ranged Attack Up"),
    (0x05, "Fast Cooldown"),
    (0x06, "Melee Defence Up"),
    (0x07, "Ranged Defence Up"),
    (0x08, "Anti Chain Damage"),
    (0x09, "Max HP Up"),
    (0x0A, "Offensive Heal"),
    (0x0B, "Deadly Heal"),
    (0x0C, "Auto-Heal"),
    (0x0D, "Evade Range Up"),
    (0x0E, "Moving Speed Up"),
    (0x0F, "Drop Rate Up"),
    (0x10, "EXP Gain Up"),
    (0x11, "Shock Wave"),
    (0x12, "Last Stand"),
    (0x13, "Damage Absorb"),
    (0x14, "Vengeance"),
    (0x15, "Reset"),
    (0x16, "Overclock"),
    (0x17, "Resilience"),
    (0x18, "Counter"),
    (0x19, "Taunt Up"),
    (0x1A, "Charge Attack"),
    (0x1B, "Auto-use Item"),
    (0x1D, "Hijack Boost"),
    (0x1E, "Stun"),
    (0x1F, "Combust"),
    (0x22, "Heal Drops Up"),
];

/// Name of a levelable kind, if known
pub fn kind_name(kind: i32) -> Option<&'static str> {
    LEVELABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, name)| *name)
}

/// `Name +L [W]`, falling back to the hex kind for unknown chips
pub fn describe(code: &ResourceCode) -> String {
    match kind_name(code.kind) {
        Some(name) => format!("{} +{} [{}]", name, code.level, code.weight),
        None => code.to_string(),
    }
}

/// Default classification for what may enter the planner
///
/// Empty slots and kinds without levels never fuse, so they are kept out
/// of planning and out of the disposal list.
pub fn is_fusable(item: &OwnedItem) -> bool {
    item.code.kind != EMPTY_KIND && kind_name(item.code.kind).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(kind_name(0x0E), Some("Moving Speed Up"));
        assert_eq!(kind_name(0x1C), None);
        assert_eq!(
            describe(&ResourceCode::new(0x01, 8, 21)),
            "Weapon Attack Up +8 [21]"
        );
        assert_eq!(describe(&ResourceCode::new(0x20, 0, 9)), "#20 +0 [9]");
    }

    #[test]
    fn test_is_fusable() {
        assert!(is_fusable(&OwnedItem::new(0, 0x22, 2, 6)));
        assert!(!is_fusable(&OwnedItem::new(1, EMPTY_KIND, 0, 0)));
        assert!(!is_fusable(&OwnedItem::new(2, 0x1C, 0, 5)));
    }
}
