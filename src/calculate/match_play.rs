//! Match play between two players.
//!
//! The match state is a single signed count: positive when player 0 is up,
//! negative when player 1 is up. Only holes both players have scored move it.

use serde::{Deserialize, Serialize};

use crate::models::{Course, CourseLength, HoleData};

use super::{hole_data, Competitor, ScoringError};

/// Where a match stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    AllSquare,
    InProgress,
    /// Leader is up by exactly the number of holes left
    Dormie,
    /// Leader is up by more than the number of holes left
    ClosedOut,
}

/// Result of one hole: +1 player 0 wins, -1 player 1 wins, 0 halved.
/// None unless both players have a score.
pub fn match_hole_result(
    side0: &Competitor<'_>,
    side1: &Competitor<'_>,
    hole: &HoleData,
) -> Option<i32> {
    let net0 = side0.net_score(hole)?;
    let net1 = side1.net_score(hole)?;
    Some((net1 - net0).signum())
}

/// Running match score after each completed hole, in hole order.
pub fn match_play_progression(
    side0: &Competitor<'_>,
    side1: &Competitor<'_>,
    completed_holes: &[u8],
    course: &Course,
) -> Result<Vec<(u8, i32)>, ScoringError> {
    let mut holes = completed_holes.to_vec();
    holes.sort_unstable();
    holes.dedup();

    let mut score = 0;
    let mut progression = Vec::with_capacity(holes.len());
    for number in holes {
        let hole = hole_data(course, number)?;
        if let Some(result) = match_hole_result(side0, side1, hole) {
            score += result;
            progression.push((number, score));
        }
    }
    Ok(progression)
}

/// Final match score over the completed holes.
pub fn calculate_match_play_score(
    side0: &Competitor<'_>,
    side1: &Competitor<'_>,
    completed_holes: &[u8],
    course: &Course,
) -> Result<i32, ScoringError> {
    let progression = match_play_progression(side0, side1, completed_holes, course)?;
    Ok(progression.last().map(|&(_, score)| score).unwrap_or(0))
}

/// Render a match score from a player's point of view: "2 UP", "1 DN", "AS".
pub fn format_match_play_score(match_score: i32, viewer_index: usize) -> String {
    let score = if viewer_index == 0 {
        match_score
    } else {
        -match_score
    };

    match score {
        0 => "AS".to_string(),
        s if s > 0 => format!("{} UP", s),
        s => format!("{} DN", -s),
    }
}

/// Holes left to play for the course length.
pub fn get_match_play_holes_remaining(course_length: CourseLength, completed_holes: &[u8]) -> u32 {
    course_length
        .hole_count()
        .saturating_sub(completed_holes.len() as u32)
}

/// Classify a match score given the holes left.
pub fn match_status(match_score: i32, holes_remaining: u32) -> MatchStatus {
    let lead = match_score.unsigned_abs();
    if lead == 0 {
        MatchStatus::AllSquare
    } else if lead > holes_remaining {
        MatchStatus::ClosedOut
    } else if lead == holes_remaining {
        MatchStatus::Dormie
    } else {
        MatchStatus::InProgress
    }
}

/// Render the result of a finished (or closed-out) match.
///
/// Always reports the full accumulated margin; holes played after the match
/// was mathematically decided still count.
pub fn format_match_play_final_result(
    match_score: i32,
    holes_remaining: u32,
    viewer_index: usize,
) -> String {
    match match_status(match_score, holes_remaining) {
        MatchStatus::AllSquare => "AS".to_string(),
        _ => format_match_play_score(match_score, viewer_index),
    }
}
