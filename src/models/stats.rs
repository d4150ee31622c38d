//! Derived scoring and statistics models.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Result of a hole relative to par.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultVsPar {
    AlbatrossOrBetter,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleOrWorse,
}

impl ResultVsPar {
    /// Classify from `strokes - par`.
    pub fn from_diff(diff: i32) -> Self {
        match diff {
            d if d <= -3 => ResultVsPar::AlbatrossOrBetter,
            -2 => ResultVsPar::Eagle,
            -1 => ResultVsPar::Birdie,
            0 => ResultVsPar::Par,
            1 => ResultVsPar::Bogey,
            2 => ResultVsPar::DoubleBogey,
            _ => ResultVsPar::TripleOrWorse,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ResultVsPar::AlbatrossOrBetter => "Albatross",
            ResultVsPar::Eagle => "Eagle",
            ResultVsPar::Birdie => "Birdie",
            ResultVsPar::Par => "Par",
            ResultVsPar::Bogey => "Bogey",
            ResultVsPar::DoubleBogey => "Double Bogey",
            ResultVsPar::TripleOrWorse => "Triple+",
        }
    }

    /// Key used by scorecards to color a cell. Eagles and better share one color.
    pub fn color_class(&self) -> &'static str {
        match self {
            ResultVsPar::AlbatrossOrBetter | ResultVsPar::Eagle => "eagle",
            ResultVsPar::Birdie => "birdie",
            ResultVsPar::Par => "par",
            ResultVsPar::Bogey => "bogey",
            ResultVsPar::DoubleBogey => "double-bogey",
            ResultVsPar::TripleOrWorse => "triple-bogey",
        }
    }
}

impl std::fmt::Display for ResultVsPar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Count of holes per result category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCounts {
    pub albatross_or_better: u32,
    pub eagles: u32,
    pub birdies: u32,
    pub pars: u32,
    pub bogeys: u32,
    pub double_bogeys: u32,
    pub triple_or_worse: u32,
}

impl ResultCounts {
    pub fn record(&mut self, result: ResultVsPar) {
        let slot = match result {
            ResultVsPar::AlbatrossOrBetter => &mut self.albatross_or_better,
            ResultVsPar::Eagle => &mut self.eagles,
            ResultVsPar::Birdie => &mut self.birdies,
            ResultVsPar::Par => &mut self.pars,
            ResultVsPar::Bogey => &mut self.bogeys,
            ResultVsPar::DoubleBogey => &mut self.double_bogeys,
            ResultVsPar::TripleOrWorse => &mut self.triple_or_worse,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u32 {
        self.albatross_or_better
            + self.eagles
            + self.birdies
            + self.pars
            + self.bogeys
            + self.double_bogeys
            + self.triple_or_worse
    }
}

/// Per-player statistics for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRoundSummary {
    pub player_id: PlayerId,

    /// Playing handicap used for net figures
    pub playing_handicap: i32,

    /// Holes with a recorded score
    pub holes_played: u32,

    /// Par of the holes played
    pub par_played: u32,

    pub gross_strokes: u32,

    /// Gross minus strokes received on the holes played
    pub net_strokes: i32,

    pub putts: u32,

    pub stableford_points: u32,

    /// Greens in regulation
    pub greens_in_regulation: u32,

    /// GIR as a fraction of holes played (0.0 to 1.0)
    pub gir_percentage: f64,

    pub average_putts: f64,

    pub results: ResultCounts,
}

/// Average virtual handicap per reporting period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HvpSummary {
    pub total: Option<f64>,
    pub year: Option<f64>,
    pub quarter: Option<f64>,
    pub month: Option<f64>,

    /// Rounds that contributed to the total
    pub rounds_counted: u32,
}
