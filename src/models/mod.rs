//! Core data models for the scoring engine.

mod course;
mod handicap_history;
mod ids;
mod period;
mod player;
mod round;
mod stats;

#[cfg(test)]
pub(crate) use course::fixtures;

pub use course::*;
pub use handicap_history::*;
pub use ids::*;
pub use period::*;
pub use player::*;
pub use round::*;
pub use stats::*;
