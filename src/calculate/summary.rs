//! Per-player statistics for a round.

use crate::models::{Course, PlayerId, PlayerRoundSummary, ResultCounts, Round};

use super::{
    calculate_stableford_points, calculate_strokes_received, get_score_result_vs_par, hole_data,
    resolve_effective_handicap, ScoringError,
};

/// A green is hit in regulation when the ball is on it with two putts to spare.
pub fn is_green_in_regulation(strokes: u32, putts: u32, par: u8) -> bool {
    strokes.saturating_sub(putts) as i32 <= par as i32 - 2
}

/// Summarize one player's round over the holes of its course length.
///
/// Net figures use the effective handicap, so a round played without
/// handicaps reports nets off the first player's handicap.
pub fn summarize_player(
    round: &Round,
    course: &Course,
    player_id: &PlayerId,
) -> Result<PlayerRoundSummary, ScoringError> {
    let player = round
        .player(player_id)
        .ok_or_else(|| ScoringError::UnknownPlayer(player_id.clone()))?;
    let playing_handicap = resolve_effective_handicap(round, player, course)?;

    let mut holes_played = 0;
    let mut par_played = 0;
    let mut gross_strokes = 0;
    let mut strokes_received = 0;
    let mut putts = 0;
    let mut stableford_points = 0;
    let mut greens_in_regulation = 0;
    let mut results = ResultCounts::default();

    for number in round.course_length.holes() {
        let Some(score) = player.score(number) else {
            continue;
        };
        let hole = hole_data(course, number)?;

        holes_played += 1;
        par_played += hole.par as u32;
        gross_strokes += score.strokes;
        strokes_received += calculate_strokes_received(playing_handicap, hole.handicap);
        putts += score.putts;
        stableford_points +=
            calculate_stableford_points(score.strokes, hole.par, playing_handicap, hole.handicap);
        if is_green_in_regulation(score.strokes, score.putts, hole.par) {
            greens_in_regulation += 1;
        }
        results.record(get_score_result_vs_par(score.strokes, hole.par));
    }

    let (gir_percentage, average_putts) = if holes_played == 0 {
        (0.0, 0.0)
    } else {
        (
            greens_in_regulation as f64 / holes_played as f64,
            putts as f64 / holes_played as f64,
        )
    };

    Ok(PlayerRoundSummary {
        player_id: player.id.clone(),
        playing_handicap,
        holes_played,
        par_played,
        gross_strokes,
        net_strokes: gross_strokes as i32 - strokes_received as i32,
        putts,
        stableford_points,
        greens_in_regulation,
        gir_percentage,
        average_putts,
        results,
    })
}

/// Summaries for every player, in round order.
pub fn summarize_round(
    round: &Round,
    course: &Course,
) -> Result<Vec<PlayerRoundSummary>, ScoringError> {
    round
        .players
        .iter()
        .map(|p| summarize_player(round, course, &p.id))
        .collect()
}
