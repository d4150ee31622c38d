//! # Golf Scoring
//!
//! Scoring and handicap engine for casual golf rounds.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (courses, players, rounds, history)
//! - **calculate**: Handicap allocation, game-mode scoring, virtual handicap
//! - **storage**: JSONL files for courses, rounds and handicap history
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;

use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` date, tolerating surrounding whitespace.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
