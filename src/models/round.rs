//! Round model and its game settings.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Course, CourseId, EntityId, Player, PlayerId, RoundId};

/// Default Sindicato points for 1st..4th.
pub const DEFAULT_SINDICATO_POINTS: [u32; 4] = [4, 2, 1, 0];

/// Game mode of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Stableford,
    #[serde(rename = "stroke")]
    StrokePlay,
    Sindicato,
    Team,
    #[serde(rename = "matchplay")]
    MatchPlay,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::Stableford => write!(f, "stableford"),
            GameMode::StrokePlay => write!(f, "stroke"),
            GameMode::Sindicato => write!(f, "sindicato"),
            GameMode::Team => write!(f, "team"),
            GameMode::MatchPlay => write!(f, "matchplay"),
        }
    }
}

/// Which holes of the course a round covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CourseLength {
    #[default]
    #[serde(rename = "18")]
    Full,
    #[serde(rename = "front9")]
    Front9,
    #[serde(rename = "back9")]
    Back9,
}

impl CourseLength {
    /// Hole numbers played, ascending.
    pub fn holes(&self) -> Vec<u8> {
        match self {
            CourseLength::Full => (1..=18).collect(),
            CourseLength::Front9 => (1..=9).collect(),
            CourseLength::Back9 => (10..=18).collect(),
        }
    }

    /// Number of holes played (9 or 18).
    pub fn hole_count(&self) -> u32 {
        match self {
            CourseLength::Full => 18,
            CourseLength::Front9 | CourseLength::Back9 => 9,
        }
    }

    pub fn is_nine_holes(&self) -> bool {
        self.hole_count() == 9
    }

    /// Length actually played on a course.
    ///
    /// A full round on a 9-hole course only covers that course's nine holes.
    pub fn played_on(&self, course: &Course) -> CourseLength {
        if course.holes as u32 >= self.hole_count() {
            return *self;
        }
        if course.hole(1).is_some() {
            CourseLength::Front9
        } else {
            CourseLength::Back9
        }
    }

    /// Hole the round starts on.
    pub fn starting_hole(&self) -> u8 {
        match self {
            CourseLength::Full | CourseLength::Front9 => 1,
            CourseLength::Back9 => 10,
        }
    }
}

/// Share of the playing handicap applied to every player in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum HandicapPercentage {
    #[default]
    Full,
    ThreeQuarters,
}

impl HandicapPercentage {
    pub fn as_percent(&self) -> u8 {
        match self {
            HandicapPercentage::Full => 100,
            HandicapPercentage::ThreeQuarters => 75,
        }
    }
}

impl TryFrom<u8> for HandicapPercentage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(HandicapPercentage::Full),
            75 => Ok(HandicapPercentage::ThreeQuarters),
            other => Err(format!("handicap percentage must be 100 or 75, got {}", other)),
        }
    }
}

impl From<HandicapPercentage> for u8 {
    fn from(value: HandicapPercentage) -> Self {
        value.as_percent()
    }
}

/// Team game variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TeamMode {
    /// Best net ball of each team decides the hole
    #[default]
    BestBall,
    /// Best balls and worst balls are compared separately
    GoodBadBall,
}

fn default_sindicato_points() -> [u32; 4] {
    DEFAULT_SINDICATO_POINTS
}

fn default_ball_points() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

// Older records store `null` for settings that do not apply to their game mode.

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_sindicato_points<'de, D>(deserializer: D) -> Result<[u32; 4], D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or(DEFAULT_SINDICATO_POINTS))
}

fn null_ball_points<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_else(default_ball_points))
}

/// A round of golf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: RoundId,

    pub course_id: CourseId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub course_name: String,

    pub round_date: NaiveDate,

    #[serde(default)]
    pub game_mode: GameMode,

    #[serde(default)]
    pub course_length: CourseLength,

    #[serde(default = "default_true")]
    pub use_handicap: bool,

    #[serde(default)]
    pub handicap_percentage: HandicapPercentage,

    /// Points for 1st..4th on each Sindicato hole
    #[serde(
        default = "default_sindicato_points",
        deserialize_with = "null_sindicato_points"
    )]
    pub sindicato_points: [u32; 4],

    #[serde(default)]
    pub team_mode: Option<TeamMode>,

    #[serde(default = "default_ball_points", deserialize_with = "null_ball_points")]
    pub best_ball_points: u32,

    #[serde(default = "default_ball_points", deserialize_with = "null_ball_points")]
    pub worst_ball_points: u32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub completed_holes: BTreeSet<u8>,

    #[serde(default)]
    pub current_hole: u8,

    #[serde(default)]
    pub is_finished: bool,

    /// Virtual handicap of the round owner, set when the round is finished
    #[serde(default)]
    pub virtual_handicap: Option<f64>,

    pub players: Vec<Player>,
}

impl Round {
    /// Create a new unfinished Round with a random ID and default settings.
    pub fn new(
        course_id: CourseId,
        round_date: NaiveDate,
        game_mode: GameMode,
        course_length: CourseLength,
        players: Vec<Player>,
    ) -> Self {
        Self {
            id: EntityId::random(),
            course_id,
            course_name: String::new(),
            round_date,
            game_mode,
            course_length,
            use_handicap: true,
            handicap_percentage: HandicapPercentage::default(),
            sindicato_points: DEFAULT_SINDICATO_POINTS,
            team_mode: None,
            best_ball_points: default_ball_points(),
            worst_ball_points: default_ball_points(),
            completed_holes: BTreeSet::new(),
            current_hole: course_length.starting_hole(),
            is_finished: false,
            virtual_handicap: None,
            players,
        }
    }

    /// Builder method to disable handicaps.
    pub fn without_handicap(mut self) -> Self {
        self.use_handicap = false;
        self
    }

    /// Builder method to set the handicap percentage.
    pub fn with_handicap_percentage(mut self, percentage: HandicapPercentage) -> Self {
        self.handicap_percentage = percentage;
        self
    }

    /// Builder method to set the team mode.
    pub fn with_team_mode(mut self, mode: TeamMode) -> Self {
        self.team_mode = Some(mode);
        self
    }

    /// Builder method to mark holes as completed.
    pub fn with_completed_holes(mut self, holes: impl IntoIterator<Item = u8>) -> Self {
        self.completed_holes.extend(holes);
        self
    }

    /// Look up a player by ID.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Completed holes in ascending order.
    pub fn completed_holes_sorted(&self) -> Vec<u8> {
        self.completed_holes.iter().copied().collect()
    }
}
