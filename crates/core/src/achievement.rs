//! Achievement rules and progress evaluation.
//!
//! Rules are a fixed catalog. The store persists an achievement the first
//! time its rule reports `unlocked`; a later drop in the counters (spending
//! XP, un-completing tasks) never revokes it.

use serde::Serialize;

/// What a rule measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Requirement {
    TasksCompleted(i64),
    LevelReached(i32),
    ItemsOwned(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementRule {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: Requirement,
}

pub const RULES: &[AchievementRule] = &[
    AchievementRule {
        key: "first_quest",
        title: "First Quest",
        description: "Complete your first task",
        icon: "🎯",
        requirement: Requirement::TasksCompleted(1),
    },
    AchievementRule {
        key: "task_master",
        title: "Task Master",
        description: "Complete 100 tasks",
        icon: "🏆",
        requirement: Requirement::TasksCompleted(100),
    },
    AchievementRule {
        key: "rising_star",
        title: "Rising Star",
        description: "Reach level 5",
        icon: "⭐",
        requirement: Requirement::LevelReached(5),
    },
    AchievementRule {
        key: "collector",
        title: "Collector",
        description: "Own 3 items from the shop",
        icon: "🎒",
        requirement: Requirement::ItemsOwned(3),
    },
];

/// Counters the rules are evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressCounters {
    pub tasks_completed: i64,
    pub level: i32,
    pub items_owned: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementProgress {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    /// Integer percent, capped at 100.
    pub progress: u8,
    pub unlocked: bool,
}

impl AchievementRule {
    pub fn progress(&self, counters: &ProgressCounters) -> u8 {
        let (current, target) = match self.requirement {
            Requirement::TasksCompleted(n) => (counters.tasks_completed, n),
            Requirement::LevelReached(n) => (i64::from(counters.level), i64::from(n)),
            Requirement::ItemsOwned(n) => (counters.items_owned, n),
        };
        if target <= 0 {
            return 100;
        }
        let pct = current.max(0).saturating_mul(100) / target;
        pct.min(100) as u8
    }
}

/// Progress of every rule against `counters`, in catalog order.
pub fn evaluate(counters: &ProgressCounters) -> Vec<AchievementProgress> {
    RULES
        .iter()
        .map(|rule| {
            let progress = rule.progress(counters);
            AchievementProgress {
                key: rule.key,
                title: rule.title,
                description: rule.description,
                icon: rule.icon,
                progress,
                unlocked: progress >= 100,
            }
        })
        .collect()
}

/// Rules currently satisfied by `counters`.
pub fn unlocked_rules(counters: &ProgressCounters) -> impl Iterator<Item = &'static AchievementRule> + '_ {
    RULES.iter().filter(move |rule| rule.progress(counters) >= 100)
}
