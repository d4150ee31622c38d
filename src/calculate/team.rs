//! Team play (A vs B): best ball and good/bad ball.

use std::collections::BTreeMap;

use crate::models::{Course, HoleData, Team, TeamMode};

use super::{hole_data, Competitor, ScoringError};

/// Points a hole is worth in team play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamPoints {
    pub best_ball: u32,
    pub worst_ball: u32,
}

impl Default for TeamPoints {
    fn default() -> Self {
        Self {
            best_ball: 1,
            worst_ball: 1,
        }
    }
}

/// Best and worst net of a team on a hole, if any member scored.
fn team_nets(competitors: &[Competitor<'_>], team: Team, hole: &HoleData) -> Option<(i32, i32)> {
    let nets: Vec<i32> = competitors
        .iter()
        .filter(|c| c.player.team == Some(team))
        .filter_map(|c| c.net_score(hole))
        .collect();
    let best = nets.iter().min().copied()?;
    let worst = nets.iter().max().copied()?;
    Some((best, worst))
}

/// Award `points` to the team with the lower value; ties award nothing.
fn award(totals: &mut BTreeMap<Team, u32>, a: i32, b: i32, points: u32) {
    if a < b {
        *totals.entry(Team::A).or_insert(0) += points;
    } else if b < a {
        *totals.entry(Team::B).or_insert(0) += points;
    }
}

/// Team points for one hole. Both teams always get an entry.
///
/// If either team has no scored player on the hole nothing is awarded.
pub fn calculate_team_points(
    competitors: &[Competitor<'_>],
    hole_number: u8,
    course: &Course,
    mode: TeamMode,
    points: TeamPoints,
) -> Result<BTreeMap<Team, u32>, ScoringError> {
    let hole = hole_data(course, hole_number)?;
    let mut totals = BTreeMap::from([(Team::A, 0), (Team::B, 0)]);

    let (Some((best_a, worst_a)), Some((best_b, worst_b))) = (
        team_nets(competitors, Team::A, hole),
        team_nets(competitors, Team::B, hole),
    ) else {
        return Ok(totals);
    };

    award(&mut totals, best_a, best_b, points.best_ball);
    if mode == TeamMode::GoodBadBall {
        award(&mut totals, worst_a, worst_b, points.worst_ball);
    }

    Ok(totals)
}

/// Team points summed over a set of holes.
pub fn calculate_team_totals(
    competitors: &[Competitor<'_>],
    holes: &[u8],
    course: &Course,
    mode: TeamMode,
    points: TeamPoints,
) -> Result<BTreeMap<Team, u32>, ScoringError> {
    let mut totals = BTreeMap::from([(Team::A, 0), (Team::B, 0)]);
    for &number in holes {
        if !competitors.iter().any(|c| c.player.score(number).is_some()) {
            continue;
        }
        for (team, pts) in calculate_team_points(competitors, number, course, mode, points)? {
            *totals.entry(team).or_insert(0) += pts;
        }
    }
    Ok(totals)
}
