//! Level derivation from experience.
//!
//! Level is never stored authoritatively: it is recomputed from the current
//! experience balance after every mutation, so spending XP can lower it.

use serde::Serialize;

use crate::types::Xp;

/// Experience required per level.
pub const XP_PER_LEVEL: Xp = 100;

/// `floor(experience / 100) + 1`.
///
/// Negative balances are treated as zero; they cannot occur through the
/// economy operations but may appear in hand-edited rows.
pub fn compute_level(experience: Xp) -> i32 {
    let level = experience.max(0) / XP_PER_LEVEL + 1;
    i32::try_from(level).unwrap_or(i32::MAX)
}

/// Progress of a character through its current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: i32,
    /// XP earned since reaching the current level.
    pub xp_into_level: Xp,
    /// XP still needed to reach the next level.
    pub xp_to_next_level: Xp,
    /// Total experience at which the next level starts.
    pub next_level_xp: Xp,
    /// Integer percent (0-99) of the way through the current level.
    pub percent: u8,
}

pub fn level_progress(experience: Xp) -> LevelProgress {
    let experience = experience.max(0);
    let level = compute_level(experience);
    let xp_into_level = experience % XP_PER_LEVEL;
    let percent = (xp_into_level * 100 / XP_PER_LEVEL) as u8;

    LevelProgress {
        level,
        xp_into_level,
        xp_to_next_level: XP_PER_LEVEL - xp_into_level,
        next_level_xp: (experience / XP_PER_LEVEL + 1) * XP_PER_LEVEL,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_level_boundaries() {
        assert_eq!(compute_level(0), 1);
        assert_eq!(compute_level(99), 1);
        assert_eq!(compute_level(100), 2);
        assert_eq!(compute_level(250), 3);
    }

    #[test]
    fn test_compute_level_matches_formula() {
        for xp in (0..5_000).step_by(7) {
            assert_eq!(compute_level(xp), (xp / 100 + 1) as i32, "xp = {xp}");
        }
    }

    #[test]
    fn test_compute_level_clamps_negative() {
        assert_eq!(compute_level(-40), 1);
    }

    #[test]
    fn test_compute_level_saturates() {
        assert_eq!(compute_level(Xp::MAX), i32::MAX);
    }

    #[test]
    fn test_level_progress_mid_level() {
        let p = level_progress(1247);
        assert_eq!(p.level, 13);
        assert_eq!(p.xp_into_level, 47);
        assert_eq!(p.xp_to_next_level, 53);
        assert_eq!(p.next_level_xp, 1300);
        assert_eq!(p.percent, 47);
    }

    #[test]
    fn test_level_progress_exact_boundary() {
        let p = level_progress(200);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp_into_level, 0);
        assert_eq!(p.xp_to_next_level, 100);
        assert_eq!(p.next_level_xp, 300);
    }
}
