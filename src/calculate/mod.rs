//! Scoring and handicap engine.
//!
//! Pure functions over the round models:
//! - Playing handicap and per-hole stroke allocation
//! - Result-vs-par classification
//! - Stableford, Sindicato, team and match-play scoring
//! - Virtual handicap estimation and period averages
//! - Per-player round summaries
//!
//! Nothing here mutates its inputs except [`Round::finish`](crate::models::Round::finish).

pub mod game_mode;
pub mod handicap;
pub mod match_play;
pub mod result;
pub mod sindicato;
pub mod stableford;
pub mod summary;
pub mod team;
pub mod virtual_handicap;

pub use game_mode::*;
pub use handicap::*;
pub use match_play::*;
pub use result::*;
pub use sindicato::*;
pub use stableford::*;
pub use summary::*;
pub use team::*;
pub use virtual_handicap::*;

use thiserror::Error;

use crate::models::{Course, CourseLength, HoleData, Player, PlayerId};

/// Errors raised by the engine. Missing scores are never errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Invalid course data: {0}")]
    InvalidCourseData(String),

    #[error("Hole {0} is missing from the course data")]
    MissingHole(u8),

    #[error("Tee '{0}' not found for course")]
    UnknownTee(String),

    #[error("Player not found: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Game needs {required} players, found {found}")]
    NotEnoughPlayers { required: usize, found: usize },
}

/// Hole numbers covered by a course length, ascending.
pub fn get_holes_for_course_length(course_length: CourseLength) -> Vec<u8> {
    course_length.holes()
}

/// Look up a hole, failing if the course does not define it.
pub fn hole_data(course: &Course, number: u8) -> Result<&HoleData, ScoringError> {
    course.hole(number).ok_or(ScoringError::MissingHole(number))
}

/// A player paired with the playing handicap a scorer should use.
///
/// Callers build these with [`resolve_effective_handicap`] (or
/// [`resolve_own_playing_handicap`]); scorers never look at
/// `Player::playing_handicap` directly.
#[derive(Debug, Clone, Copy)]
pub struct Competitor<'a> {
    pub player: &'a Player,
    pub playing_handicap: i32,
}

impl<'a> Competitor<'a> {
    pub fn new(player: &'a Player, playing_handicap: i32) -> Self {
        Self {
            player,
            playing_handicap,
        }
    }

    /// Net score on a hole, or None if the player has no score there.
    pub fn net_score(&self, hole: &HoleData) -> Option<i32> {
        self.player.score(hole.number).map(|score| {
            score.strokes as i32
                - calculate_strokes_received(self.playing_handicap, hole.handicap) as i32
        })
    }
}
