//! Task categories, priorities and input rules.
//!
//! Both enumerations are closed: the database enforces the same value sets
//! with `CHECK` constraints and rows decode through [`TryFrom<String>`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Xp;

/// Maximum length of a task title, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Upper bound for the experience a single task may award.
pub const MAX_TASK_XP: Xp = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Work,
    Health,
    Learning,
    #[default]
    Personal,
    Creative,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Work,
        TaskCategory::Health,
        TaskCategory::Learning,
        TaskCategory::Personal,
        TaskCategory::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::Work => "work",
            TaskCategory::Health => "health",
            TaskCategory::Learning => "learning",
            TaskCategory::Personal => "personal",
            TaskCategory::Creative => "creative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    /// Experience awarded by a task created without an explicit value.
    pub fn default_xp(self) -> Xp {
        match self {
            TaskPriority::Low => 25,
            TaskPriority::Medium => 30,
            TaskPriority::High => 50,
        }
    }
}

macro_rules! impl_str_enum {
    ($ty:ident, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        CoreError::Validation(format!(
                            "Invalid {} '{s}'. Must be one of: {}",
                            $label,
                            $ty::ALL.map(|v| v.as_str()).join(", ")
                        ))
                    })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

impl_str_enum!(TaskCategory, "task category");
impl_str_enum!(TaskPriority, "task priority");

/// Resolve the experience value for a new task.
///
/// An explicit value must be within `1..=MAX_TASK_XP`; otherwise the
/// priority's default applies. The value is fixed once the task exists.
pub fn resolve_task_xp(priority: TaskPriority, explicit: Option<Xp>) -> Result<Xp, CoreError> {
    match explicit {
        None => Ok(priority.default_xp()),
        Some(xp) if (1..=MAX_TASK_XP).contains(&xp) => Ok(xp),
        Some(xp) => Err(CoreError::Validation(format!(
            "xp_value must be between 1 and {MAX_TASK_XP}, got {xp}"
        ))),
    }
}

/// Reject titles that are blank after trimming or longer than [`MAX_TITLE_LEN`].
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::Validation("Task title must not be blank".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Task title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}
