//! Stableford points.

use crate::models::{Course, Player};

use super::{calculate_strokes_received, hole_data, ScoringError};

/// Points that par (net) is worth.
pub const STABLEFORD_PAR_POINTS: u32 = 2;

/// Stableford points for one hole (0..=5).
///
/// | net vs par | points |
/// |------------|--------|
/// | -3 or less | 5      |
/// | -2         | 4      |
/// | -1         | 3      |
/// | 0          | 2      |
/// | +1         | 1      |
/// | +2 or more | 0      |
pub fn calculate_stableford_points(
    strokes: u32,
    par: u8,
    playing_handicap: i32,
    stroke_index: u8,
) -> u32 {
    let net = strokes as i32 - calculate_strokes_received(playing_handicap, stroke_index) as i32;
    let diff = net - par as i32;

    (STABLEFORD_PAR_POINTS as i32 - diff).clamp(0, 5) as u32
}

/// Stableford points over a set of holes.
///
/// Only holes with a recorded score count. A scored hole that the course does
/// not define is an error.
pub fn calculate_stableford_total(
    player: &Player,
    playing_handicap: i32,
    holes: &[u8],
    course: &Course,
) -> Result<u32, ScoringError> {
    let mut total = 0;
    for &number in holes {
        let Some(score) = player.score(number) else {
            continue;
        };
        let hole = hole_data(course, number)?;
        total += calculate_stableford_points(score.strokes, hole.par, playing_handicap, hole.handicap);
    }
    Ok(total)
}

/// Number of the given holes the player has a score for.
pub fn holes_played(player: &Player, holes: &[u8]) -> usize {
    holes.iter().filter(|&&n| player.score(n).is_some()).count()
}
