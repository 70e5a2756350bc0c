//! Planner configuration with documented defaults
//!
//! The target table is domain data: the loadout the planner works toward.
//! It can be replaced wholesale from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{PlannerError, Result};
use crate::core::types::{ResourceCode, MAX_WEIGHT};
use crate::fusion::LevelFloors;

/// Lightest weight a level 0 chip can drop with
pub const DEFAULT_BASE_WEIGHT: i32 = 5;

/// Configuration for a planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Lightest possible level 0 weight
    ///
    /// Every other level's floor is derived from this by fusing two floor
    /// chips together. At 5, the level 8 floor comes out at 21.
    #[serde(default = "default_base_weight")]
    pub base_weight: i32,

    /// Desired chips, resolved in order
    ///
    /// Duplicates are separate requests: listing a code twice asks for two
    /// chips of that code.
    #[serde(default)]
    pub targets: Vec<ResourceCode>,
}

fn default_base_weight() -> i32 {
    DEFAULT_BASE_WEIGHT
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_weight: DEFAULT_BASE_WEIGHT,
            targets: default_targets(),
        }
    }
}

/// The stock loadout: every levelable chip at +8 with the floor weight,
/// except movement speed and drop rate which are only wanted partway.
pub fn default_targets() -> Vec<ResourceCode> {
    let maxed = |kind| ResourceCode::new(kind, 8, 21);
    let mut targets: Vec<ResourceCode> = (0x01..=0x0D).map(maxed).collect();
    targets.extend([
        ResourceCode::new(0x0E, 3, 7),
        ResourceCode::new(0x0E, 3, 7),
        ResourceCode::new(0x0F, 4, 9),
        ResourceCode::new(0x0F, 3, 7),
    ]);
    targets.extend((0x10..=0x1B).map(maxed));
    targets.extend([0x1D, 0x1E, 0x1F, 0x22].map(maxed));
    targets
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: PlannerConfig =
            toml::from_str(content).map_err(|e| PlannerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WEIGHT).contains(&self.base_weight) {
            return Err(PlannerError::Config(format!(
                "base_weight ({}) must be between 1 and {}",
                self.base_weight, MAX_WEIGHT
            )));
        }

        if let Some(bad) = self.targets.iter().find(|t| !t.is_plannable()) {
            return Err(PlannerError::InvalidTarget(*bad));
        }

        Ok(())
    }

    /// Per-level weight floors derived from `base_weight`
    pub fn floors(&self) -> LevelFloors {
        LevelFloors::from_base(self.base_weight)
    }
}
