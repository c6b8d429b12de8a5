//! Daily progress summary shown on the dashboard.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskProgress {
    pub completed: i64,
    pub pending: i64,
    pub total: i64,
    /// Rounded percent of tasks completed; 0 when there are no tasks.
    pub percent: u8,
}

pub fn task_progress(completed: i64, total: i64) -> TaskProgress {
    let total = total.max(0);
    let completed = completed.clamp(0, total);
    let percent = if total == 0 {
        0
    } else {
        ((completed * 100 + total / 2) / total) as u8
    };

    TaskProgress {
        completed,
        pending: total - completed,
        total,
        percent,
    }
}
