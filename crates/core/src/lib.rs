//! TaskQuest domain logic.
//!
//! Everything in this crate is pure: no I/O, no database handles. The
//! `taskquest-db` crate loads state, calls into [`economy`], and writes the
//! returned state back inside a single transaction.

pub mod achievement;
pub mod dashboard;
pub mod economy;
pub mod error;
pub mod item;
pub mod leveling;
pub mod task;
pub mod types;
