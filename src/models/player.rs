//! Round-scoped players and their hole scores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId};

/// Strokes and putts recorded on one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub strokes: u32,
    #[serde(default)]
    pub putts: u32,
}

impl Score {
    pub fn new(strokes: u32, putts: u32) -> Self {
        Self { strokes, putts }
    }

    /// Clamp raw form input: strokes to at least 1, putts to at least 0,
    /// both capped at `u32::MAX`.
    pub fn clamped(strokes: i64, putts: i64) -> Self {
        Self {
            strokes: u32::try_from(strokes.max(1)).unwrap_or(u32::MAX),
            putts: u32::try_from(putts.max(0)).unwrap_or(u32::MAX),
        }
    }
}

/// Team side for team game modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => write!(f, "A"),
            Team::B => write!(f, "B"),
        }
    }
}

/// A player taking part in a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    pub name: String,

    /// Official handicap index
    #[serde(alias = "od_handicap_index")]
    pub handicap_index: f64,

    /// Name of the tee played from
    pub tee_box: String,

    /// Playing handicap (HDJ). Older rounds may store 0 here.
    #[serde(default)]
    pub playing_handicap: i32,

    #[serde(default)]
    pub team: Option<Team>,

    /// Scores keyed by hole number
    #[serde(default)]
    pub scores: BTreeMap<u8, Score>,
}

impl Player {
    /// Create a new Player with a random ID and no scores.
    pub fn new(name: String, handicap_index: f64, tee_box: String) -> Self {
        Self {
            id: EntityId::random(),
            name,
            handicap_index,
            tee_box,
            playing_handicap: 0,
            team: None,
            scores: BTreeMap::new(),
        }
    }

    /// Builder method to set the ID.
    pub fn with_id(mut self, id: impl Into<PlayerId>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method to set the stored playing handicap.
    pub fn with_playing_handicap(mut self, playing_handicap: i32) -> Self {
        self.playing_handicap = playing_handicap;
        self
    }

    /// Builder method to set the team.
    pub fn with_team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    /// Builder method to record a score.
    pub fn with_score(mut self, hole: u8, strokes: u32, putts: u32) -> Self {
        self.scores.insert(hole, Score::new(strokes, putts));
        self
    }

    /// Score recorded on a hole, if any.
    pub fn score(&self, hole: u8) -> Option<&Score> {
        self.scores.get(&hole)
    }
}
