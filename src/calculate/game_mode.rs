//! Single entry point for scoring a hole or a round in any game mode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Course, GameMode, PlayerId, Round, Team};

use super::{
    calculate_match_play_score, calculate_sindicato_points, calculate_stableford_points,
    calculate_team_points, effective_competitors, get_match_play_holes_remaining, hole_data, match_hole_result,
    Competitor, ScoringError, TeamPoints,
};

/// Outcome of one hole, shaped by the round's game mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HoleOutcome {
    /// Stableford points per scored player
    Stableford { points: BTreeMap<PlayerId, u32> },

    /// Gross and net strokes per scored player
    StrokePlay {
        gross: BTreeMap<PlayerId, u32>,
        net: BTreeMap<PlayerId, i32>,
    },

    /// Positional points per scored player
    Sindicato { points: BTreeMap<PlayerId, u32> },

    /// Points per team
    Team { points: BTreeMap<Team, u32> },

    /// +1 player 0 won, -1 player 1 won, 0 halved; None if not both scored
    MatchPlay { result: Option<i32> },
}

/// Running totals of a round, shaped by its game mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoundStandings {
    /// Stableford or Sindicato points per player
    Points { points: BTreeMap<PlayerId, u32> },

    /// Stroke totals per player
    Strokes {
        gross: BTreeMap<PlayerId, u32>,
        net: BTreeMap<PlayerId, i32>,
    },

    /// Team points
    Teams { points: BTreeMap<Team, u32> },

    /// Match score from player 0's side
    Match { score: i32, holes_remaining: u32 },
}

fn team_points(round: &Round) -> TeamPoints {
    TeamPoints {
        best_ball: round.best_ball_points,
        worst_ball: round.worst_ball_points,
    }
}

fn match_sides<'a>(
    competitors: &[Competitor<'a>],
) -> Result<(Competitor<'a>, Competitor<'a>), ScoringError> {
    match competitors {
        [first, second, ..] => Ok((*first, *second)),
        _ => Err(ScoringError::NotEnoughPlayers {
            required: 2,
            found: competitors.len(),
        }),
    }
}

fn score_hole_for(
    round: &Round,
    course: &Course,
    competitors: &[Competitor<'_>],
    hole_number: u8,
) -> Result<HoleOutcome, ScoringError> {
    let hole = hole_data(course, hole_number)?;

    let outcome = match round.game_mode {
        GameMode::Stableford => HoleOutcome::Stableford {
            points: competitors
                .iter()
                .filter_map(|c| {
                    c.player.score(hole_number).map(|score| {
                        let points = calculate_stableford_points(
                            score.strokes,
                            hole.par,
                            c.playing_handicap,
                            hole.handicap,
                        );
                        (c.player.id.clone(), points)
                    })
                })
                .collect(),
        },
        GameMode::StrokePlay => {
            let mut gross = BTreeMap::new();
            let mut net = BTreeMap::new();
            for c in competitors {
                if let (Some(score), Some(net_score)) =
                    (c.player.score(hole_number), c.net_score(hole))
                {
                    gross.insert(c.player.id.clone(), score.strokes);
                    net.insert(c.player.id.clone(), net_score);
                }
            }
            HoleOutcome::StrokePlay { gross, net }
        }
        GameMode::Sindicato => HoleOutcome::Sindicato {
            points: calculate_sindicato_points(
                competitors,
                hole_number,
                course,
                &round.sindicato_points,
            )?,
        },
        GameMode::Team => HoleOutcome::Team {
            points: calculate_team_points(
                competitors,
                hole_number,
                course,
                round.team_mode.unwrap_or_default(),
                team_points(round),
            )?,
        },
        GameMode::MatchPlay => {
            let (side0, side1) = match_sides(competitors)?;
            HoleOutcome::MatchPlay {
                result: match_hole_result(&side0, &side1, hole),
            }
        }
    };

    Ok(outcome)
}

/// Score one hole of a round according to its game mode.
///
/// Effective handicaps are resolved here, so callers pass the round as stored.
pub fn score_hole(round: &Round, course: &Course, hole_number: u8) -> Result<HoleOutcome, ScoringError> {
    let competitors = effective_competitors(round, course)?;
    score_hole_for(round, course, &competitors, hole_number)
}

/// Fold every hole of the round into standings.
///
/// Holes are visited in ascending order. Match play only counts completed
/// holes; other modes count every scored hole of the course length.
pub fn score_round(round: &Round, course: &Course) -> Result<RoundStandings, ScoringError> {
    let competitors = effective_competitors(round, course)?;

    let standings = match round.game_mode {
        GameMode::MatchPlay => {
            let (side0, side1) = match_sides(&competitors)?;
            let completed = round.completed_holes_sorted();
            RoundStandings::Match {
                score: calculate_match_play_score(&side0, &side1, &completed, course)?,
                holes_remaining: get_match_play_holes_remaining(
                    round.course_length.played_on(course),
                    &completed,
                ),
            }
        }
        GameMode::Stableford | GameMode::Sindicato => {
            let mut totals: BTreeMap<PlayerId, u32> = competitors
                .iter()
                .map(|c| (c.player.id.clone(), 0))
                .collect();
            for number in scored_holes(round, &competitors) {
                let points = match score_hole_for(round, course, &competitors, number)? {
                    HoleOutcome::Stableford { points } | HoleOutcome::Sindicato { points } => points,
                    _ => BTreeMap::new(),
                };
                for (id, pts) in points {
                    *totals.entry(id).or_insert(0) += pts;
                }
            }
            RoundStandings::Points { points: totals }
        }
        GameMode::StrokePlay => {
            let mut gross_totals: BTreeMap<PlayerId, u32> = BTreeMap::new();
            let mut net_totals: BTreeMap<PlayerId, i32> = BTreeMap::new();
            for c in &competitors {
                gross_totals.insert(c.player.id.clone(), 0);
                net_totals.insert(c.player.id.clone(), 0);
            }
            for number in scored_holes(round, &competitors) {
                if let HoleOutcome::StrokePlay { gross, net } =
                    score_hole_for(round, course, &competitors, number)?
                {
                    for (id, strokes) in gross {
                        *gross_totals.entry(id).or_insert(0) += strokes;
                    }
                    for (id, strokes) in net {
                        *net_totals.entry(id).or_insert(0) += strokes;
                    }
                }
            }
            RoundStandings::Strokes {
                gross: gross_totals,
                net: net_totals,
            }
        }
        GameMode::Team => {
            let mut totals = BTreeMap::from([(Team::A, 0), (Team::B, 0)]);
            for number in scored_holes(round, &competitors) {
                if let HoleOutcome::Team { points } =
                    score_hole_for(round, course, &competitors, number)?
                {
                    for (team, pts) in points {
                        *totals.entry(team).or_insert(0) += pts;
                    }
                }
            }
            RoundStandings::Teams { points: totals }
        }
    };

    debug!("Scored round {} ({})", round.id, round.game_mode);
    Ok(standings)
}

/// Holes of the course length on which anyone has a score, ascending.
fn scored_holes(round: &Round, competitors: &[Competitor<'_>]) -> Vec<u8> {
    round
        .course_length
        .holes()
        .into_iter()
        .filter(|&n| competitors.iter().any(|c| c.player.score(n).is_some()))
        .collect()
}
