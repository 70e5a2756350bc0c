//! Fusion arithmetic - the only place weight policy lives
//!
//! Fusing two chips of the same kind and level yields one chip a level up
//! whose weight is `ceil((a + b + level) / 2)`. The inverse helpers below
//! plan the children of a chip that does not exist yet. Every planning
//! routine calls into these functions instead of re-deriving the formulas,
//! so rounding stays consistent across the crate.

use crate::core::error::{PlannerError, Result};
use crate::core::types::{ResourceCode, MAX_LEVEL};

/// `ceil(n / 2)` for any sign of `n`
fn half_up(n: i32) -> i32 {
    n.div_euclid(2) + n.rem_euclid(2)
}

/// `floor(n / 2)` for any sign of `n`
fn half_down(n: i32) -> i32 {
    n.div_euclid(2)
}

/// Fuse two chips into one a level higher
pub fn fuse(x: ResourceCode, y: ResourceCode) -> Result<ResourceCode> {
    if x.kind != y.kind {
        return Err(PlannerError::InvalidFusion(format!(
            "{} and {} are different kinds",
            x, y
        )));
    }
    if x.level != y.level {
        return Err(PlannerError::InvalidFusion(format!(
            "{} and {} are different levels",
            x, y
        )));
    }
    if x.level >= MAX_LEVEL {
        return Err(PlannerError::InvalidFusion(format!(
            "{} is already at level {}",
            x, MAX_LEVEL
        )));
    }

    let total = x
        .weight
        .checked_add(y.weight)
        .and_then(|sum| sum.checked_add(x.level))
        .ok_or_else(|| {
            PlannerError::InvalidFusion(format!("{} and {} overflow the weight range", x, y))
        })?;

    Ok(ResourceCode::new(x.kind, x.level + 1, half_up(total)))
}

/// Split divisor shared by both halves of a defusion
fn defuse_spread(code: ResourceCode) -> Result<i32> {
    if code.level <= 0 {
        return Err(PlannerError::InvalidDefusion(code));
    }
    Ok((code.level - 1).max(1))
}

/// `2 * weight - spread`, the combined weight of both halves
fn defuse_total(code: ResourceCode) -> Result<i32> {
    let spread = defuse_spread(code)?;
    code.weight
        .checked_mul(2)
        .and_then(|double| double.checked_sub(spread))
        .ok_or(PlannerError::InvalidDefusion(code))
}

/// Lighter half of the ideal pair that would fuse into `code`
///
/// Weight is `floor(weight - max(level - 1, 1) / 2)`.
pub fn defuse_lower(code: ResourceCode) -> Result<ResourceCode> {
    let total = defuse_total(code)?;
    Ok(ResourceCode::new(code.kind, code.level - 1, half_down(total)))
}

/// Heavier half of the ideal pair that would fuse into `code`
///
/// Weight is `ceil(weight - max(level - 1, 1) / 2)`.
pub fn defuse_upper(code: ResourceCode) -> Result<ResourceCode> {
    let total = defuse_total(code)?;
    Ok(ResourceCode::new(code.kind, code.level - 1, half_up(total)))
}

/// Code the partner of `known` must have so the pair fuses into `target`
pub fn fuse_complement(known: ResourceCode, target: ResourceCode) -> Result<ResourceCode> {
    if known.level >= MAX_LEVEL {
        return Err(PlannerError::InvalidFusion(format!(
            "{} is already at level {}",
            known, MAX_LEVEL
        )));
    }
    if known.level + 1 != target.level {
        return Err(PlannerError::InvalidFusion(format!(
            "{} cannot fuse into {}: fusions go up exactly one level",
            known, target
        )));
    }

    let weight = target
        .weight
        .checked_mul(2)
        .and_then(|double| double.checked_sub(known.weight))
        .and_then(|rest| rest.checked_sub(known.level.max(1)))
        .ok_or_else(|| {
            PlannerError::InvalidFusion(format!(
                "complement of {} toward {} overflows the weight range",
                known, target
            ))
        })?;

    Ok(known.with_weight(weight))
}

/// Lowest weight a chip can have at each level
///
/// Level 0 starts at `base_weight`; each further level is what two of the
/// previous floor fuse into. A base of 5 gives `[5, 5, 6, 7, 9, 11, 14, 17, 21]`.
/// Floors saturate at `i32::MAX` rather than wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelFloors {
    floors: [i32; MAX_LEVEL as usize + 1],
}

impl LevelFloors {
    pub fn from_base(base_weight: i32) -> Self {
        let mut floors = [base_weight; MAX_LEVEL as usize + 1];
        for level in 1..floors.len() {
            let below = floors[level - 1];
            // ceil((2 * below + (level - 1)) / 2) == below + ceil((level - 1) / 2)
            floors[level] = below.saturating_add(half_up(level as i32 - 1));
        }
        Self { floors }
    }

    /// Floor for `level`, or `None` if the level is out of range
    pub fn at(&self, level: i32) -> Option<i32> {
        usize::try_from(level)
            .ok()
            .and_then(|idx| self.floors.get(idx))
            .copied()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.floors
    }
}

impl Default for LevelFloors {
    fn default() -> Self {
        Self::from_base(crate::core::config::DEFAULT_BASE_WEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(level: i32, weight: i32) -> ResourceCode {
        ResourceCode::new(1, level, weight)
    }

    #[test]
    fn test_fuse_rounds_up() {
        assert_eq!(fuse(code(0, 10), code(0, 11)).unwrap(), code(1, 11));
        assert_eq!(fuse(code(0, 10), code(0, 10)).unwrap(), code(1, 10));
        // (7 + 8 + 3) / 2 = 9
        assert_eq!(fuse(code(3, 7), code(3, 8)).unwrap(), code(4, 9));
        assert_eq!(fuse(code(7, 17), code(7, 17)).unwrap(), code(8, 21));
    }

    #[test]
    fn test_fuse_rejects_bad_pairs() {
        let other_kind = ResourceCode::new(2, 0, 10);
        assert!(matches!(
            fuse(code(0, 10), other_kind),
            Err(PlannerError::InvalidFusion(_))
        ));
        assert!(matches!(
            fuse(code(0, 10), code(1, 10)),
            Err(PlannerError::InvalidFusion(_))
        ));
        assert!(matches!(
            fuse(code(8, 21), code(8, 21)),
            Err(PlannerError::InvalidFusion(_))
        ));
    }

    #[test]
    fn test_defuse_splits() {
        // Level 1: spread clamps to 1
        assert_eq!(defuse_lower(code(1, 11)).unwrap(), code(0, 10));
        assert_eq!(defuse_upper(code(1, 11)).unwrap(), code(0, 11));

        // Level 3: spread 2 splits evenly
        assert_eq!(defuse_lower(code(3, 7)).unwrap(), code(2, 6));
        assert_eq!(defuse_upper(code(3, 7)).unwrap(), code(2, 6));

        // Level 8: spread 7
        assert_eq!(defuse_lower(code(8, 21)).unwrap(), code(7, 17));
        assert_eq!(defuse_upper(code(8, 21)).unwrap(), code(7, 18));
    }

    #[test]
    fn test_defuse_level_zero_fails() {
        assert!(matches!(
            defuse_lower(code(0, 5)),
            Err(PlannerError::InvalidDefusion(_))
        ));
        assert!(matches!(
            defuse_upper(code(0, 5)),
            Err(PlannerError::InvalidDefusion(_))
        ));
    }

    #[test]
    fn test_fuse_complement() {
        assert_eq!(fuse_complement(code(0, 10), code(1, 11)).unwrap(), code(0, 11));
        assert_eq!(fuse_complement(code(7, 17), code(8, 21)).unwrap(), code(7, 18));
        assert!(matches!(
            fuse_complement(code(0, 10), code(2, 11)),
            Err(PlannerError::InvalidFusion(_))
        ));
        assert!(matches!(
            fuse_complement(code(8, 21), code(9, 21)),
            Err(PlannerError::InvalidFusion(_))
        ));
    }

    #[test]
    fn test_huge_weights_error_instead_of_wrapping() {
        let heavy = code(3, i32::MAX);
        assert!(matches!(fuse(heavy, heavy), Err(PlannerError::InvalidFusion(_))));
        assert!(matches!(defuse_lower(heavy), Err(PlannerError::InvalidDefusion(_))));
        assert!(matches!(defuse_upper(heavy), Err(PlannerError::InvalidDefusion(_))));
        assert!(matches!(
            fuse_complement(code(2, 5), heavy),
            Err(PlannerError::InvalidFusion(_))
        ));
        assert!(matches!(
            fuse_complement(code(2, i32::MIN), code(3, 10)),
            Err(PlannerError::InvalidFusion(_))
        ));
        assert!(matches!(
            defuse_lower(code(3, i32::MIN)),
            Err(PlannerError::InvalidDefusion(_))
        ));
    }

    #[test]
    fn test_level_floors_saturate() {
        let floors = LevelFloors::from_base(1_500_000_000);
        assert_eq!(floors.at(0), Some(1_500_000_000));
        assert_eq!(floors.at(8), Some(1_500_000_016));

        let floors = LevelFloors::from_base(i32::MAX);
        assert!(floors.as_slice().iter().all(|&floor| floor == i32::MAX));
    }

    #[test]
    fn test_level_floors() {
        let floors = LevelFloors::from_base(5);
        assert_eq!(floors.as_slice(), &[5, 5, 6, 7, 9, 11, 14, 17, 21]);
        assert_eq!(floors.at(8), Some(21));
        assert_eq!(floors.at(9), None);
        assert_eq!(floors.at(-1), None);
    }
}
