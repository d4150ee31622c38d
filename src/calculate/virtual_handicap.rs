//! Virtual handicap estimation.
//!
//! A round's virtual handicap is the handicap index the player "played to":
//! 36 Stableford points (18-hole scale) means playing exactly to the index,
//! each point above lowers it by one. HVP is the average over a period.
//! Stableford points are the common currency regardless of game mode.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Course, CourseLength, HvpSummary, PlayerId, Round, StatsPeriod};

use super::{calculate_stableford_total, resolve_own_playing_handicap, ScoringError};

/// Stableford points that correspond to playing to handicap over 18 holes.
pub const STABLEFORD_BASELINE: f64 = 36.0;

/// Virtual handicap from a round's Stableford total.
///
/// Nine-hole totals are doubled first.
pub fn calculate_round_virtual_handicap(
    handicap_index: f64,
    stableford_points: u32,
    course_length: CourseLength,
) -> f64 {
    let normalized = if course_length.is_nine_holes() {
        stableford_points * 2
    } else {
        stableford_points
    };
    handicap_index - (normalized as f64 - STABLEFORD_BASELINE)
}

/// Virtual handicap of one player in a round.
///
/// Uses the player's own playing handicap even when the round was played
/// without handicaps. A full round on a 9-hole course counts as nine holes.
pub fn compute_round_virtual_handicap(
    round: &Round,
    course: &Course,
    player_id: &PlayerId,
) -> Result<f64, ScoringError> {
    let player = round
        .player(player_id)
        .ok_or_else(|| ScoringError::UnknownPlayer(player_id.clone()))?;
    let playing_handicap = resolve_own_playing_handicap(round, player, course)?;
    let length = round.course_length.played_on(course);
    let points = calculate_stableford_total(player, playing_handicap, &length.holes(), course)?;

    Ok(calculate_round_virtual_handicap(
        player.handicap_index,
        points,
        length,
    ))
}

impl Round {
    /// Mark the round finished and store the owner's virtual handicap.
    ///
    /// The owner is the first player. On error the round is left untouched.
    pub fn finish(&mut self, course: &Course) -> Result<Option<f64>, ScoringError> {
        let virtual_handicap = match self.players.first() {
            Some(owner) => Some(compute_round_virtual_handicap(self, course, &owner.id)?),
            None => None,
        };

        debug!(
            "Finished round {} with virtual handicap {:?}",
            self.id, virtual_handicap
        );
        self.is_finished = true;
        self.virtual_handicap = virtual_handicap;
        Ok(virtual_handicap)
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Virtual handicaps of finished rounds dated inside a period.
fn virtual_handicaps_in(rounds: &[Round], period: StatsPeriod, today: NaiveDate) -> Vec<f64> {
    rounds
        .iter()
        .filter(|r| r.is_finished && period.contains(r.round_date, today))
        .filter_map(|r| r.virtual_handicap)
        .collect()
}

/// HVP: mean virtual handicap of finished rounds in a period.
pub fn calculate_hvp(rounds: &[Round], period: StatsPeriod, today: NaiveDate) -> Option<f64> {
    mean(&virtual_handicaps_in(rounds, period, today))
}

/// HVP for every period at once.
pub fn hvp_summary(rounds: &[Round], today: NaiveDate) -> HvpSummary {
    HvpSummary {
        total: calculate_hvp(rounds, StatsPeriod::Total, today),
        year: calculate_hvp(rounds, StatsPeriod::Year, today),
        quarter: calculate_hvp(rounds, StatsPeriod::Quarter, today),
        month: calculate_hvp(rounds, StatsPeriod::Month, today),
        rounds_counted: virtual_handicaps_in(rounds, StatsPeriod::Total, today).len() as u32,
    }
}

/// Mean of the lowest `best` virtual handicaps among the `last` most recent
/// finished rounds, in the style of the official "best 8 of 20" method.
pub fn calculate_hvp_best_of(rounds: &[Round], best: usize, last: usize) -> Option<f64> {
    let mut finished: Vec<&Round> = rounds
        .iter()
        .filter(|r| r.is_finished && r.virtual_handicap.is_some())
        .collect();
    finished.sort_by_key(|r| std::cmp::Reverse(r.round_date));

    let mut recent: Vec<f64> = finished
        .iter()
        .take(last)
        .filter_map(|r| r.virtual_handicap)
        .collect();
    recent.sort_by(|a, b| a.total_cmp(b));
    recent.truncate(best);

    mean(&recent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{eighteen_hole_course, nine_hole_course};
    use crate::models::{EntityId, GameMode, Player};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A scratch player scoring par on every hole of the length: 2 points each.
    fn par_round(course: &Course, length: CourseLength, mode: GameMode) -> Round {
        let mut player = Player::new("Ana".to_string(), 0.0, "Amarillas".to_string())
            .with_id("owner");
        for number in length.holes() {
            if let Some(hole) = course.hole(number) {
                player = player.with_score(number, hole.par as u32, 2);
            }
        }
        Round::new(course.id.clone(), date(2025, 5, 4), mode, length, vec![player])
    }

    fn finished(on: NaiveDate, virtual_handicap: Option<f64>) -> Round {
        let mut round = Round::new(
            EntityId::from("c1"),
            on,
            GameMode::Stableford,
            CourseLength::Full,
            Vec::new(),
        );
        round.is_finished = true;
        round.virtual_handicap = virtual_handicap;
        round
    }

    #[test]
    fn test_thirty_six_points_is_playing_to_index() {
        assert_eq!(
            calculate_round_virtual_handicap(18.0, 36, CourseLength::Full),
            18.0
        );
        assert_eq!(
            calculate_round_virtual_handicap(18.0, 18, CourseLength::Front9),
            18.0
        );
    }

    #[test]
    fn test_virtual_handicap_moves_with_points() {
        assert_eq!(
            calculate_round_virtual_handicap(18.0, 40, CourseLength::Full),
            14.0
        );
        assert_eq!(
            calculate_round_virtual_handicap(18.0, 30, CourseLength::Full),
            24.0
        );
        // Nine holes: 20 points doubles to 40
        assert_eq!(
            calculate_round_virtual_handicap(18.0, 20, CourseLength::Back9),
            14.0
        );
    }

    #[test]
    fn test_compute_for_par_round() {
        let course = eighteen_hole_course();
        let round = par_round(&course, CourseLength::Full, GameMode::Stableford);

        let vh = compute_round_virtual_handicap(&round, &course, &EntityId::from("owner"));
        assert_eq!(vh, Ok(0.0));
    }

    #[test]
    fn test_compute_nine_hole_round_is_normalized() {
        let course = nine_hole_course();
        let round = par_round(&course, CourseLength::Front9, GameMode::Stableford);

        // 9 holes at par = 18 points, doubled to 36
        let vh = compute_round_virtual_handicap(&round, &course, &EntityId::from("owner"));
        assert_eq!(vh, Ok(0.0));
    }

    #[test]
    fn test_compute_full_length_on_nine_hole_course_is_normalized() {
        let course = nine_hole_course();
        let round = par_round(&course, CourseLength::Full, GameMode::Stableford);

        let vh = compute_round_virtual_handicap(&round, &course, &EntityId::from("owner"));
        assert_eq!(vh, Ok(0.0));
    }

    #[test]
    fn test_compute_is_independent_of_game_mode() {
        let course = eighteen_hole_course();
        let stableford = par_round(&course, CourseLength::Full, GameMode::Stableford);
        let matchplay = par_round(&course, CourseLength::Full, GameMode::MatchPlay);
        let id = EntityId::from("owner");

        assert_eq!(
            compute_round_virtual_handicap(&stableford, &course, &id),
            compute_round_virtual_handicap(&matchplay, &course, &id)
        );
    }

    #[test]
    fn test_compute_uses_own_handicap_without_handicap_play() {
        let course = eighteen_hole_course();
        let scratch = Player::new("Pro".to_string(), 0.0, "Amarillas".to_string()).with_id("pro");
        // HDJ 18 bogey golfer: one stroke per hole, bogeys are net pars
        let mut bogey = Player::new("Luis".to_string(), 16.0, "Amarillas".to_string())
            .with_id("luis")
            .with_playing_handicap(18);
        for hole in &course.holes_data {
            bogey = bogey.with_score(hole.number, hole.par as u32 + 1, 2);
        }
        let round = Round::new(
            course.id.clone(),
            date(2025, 5, 4),
            GameMode::StrokePlay,
            CourseLength::Full,
            vec![scratch, bogey],
        )
        .without_handicap();

        let vh = compute_round_virtual_handicap(&round, &course, &EntityId::from("luis"));
        assert_eq!(vh, Ok(16.0));
    }

    #[test]
    fn test_compute_unknown_player() {
        let course = eighteen_hole_course();
        let round = par_round(&course, CourseLength::Full, GameMode::Stableford);

        assert_eq!(
            compute_round_virtual_handicap(&round, &course, &EntityId::from("nobody")),
            Err(ScoringError::UnknownPlayer(EntityId::from("nobody")))
        );
    }

    #[test]
    fn test_finish_stores_owner_virtual_handicap() {
        let course = eighteen_hole_course();
        let mut round = par_round(&course, CourseLength::Full, GameMode::Sindicato);

        assert_eq!(round.finish(&course), Ok(Some(0.0)));
        assert!(round.is_finished);
        assert_eq!(round.virtual_handicap, Some(0.0));

        // Finishing again gives the same answer
        assert_eq!(round.finish(&course), Ok(Some(0.0)));
    }

    #[test]
    fn test_finish_leaves_round_untouched_on_error() {
        let course = nine_hole_course();
        let mut round = par_round(&eighteen_hole_course(), CourseLength::Full, GameMode::Stableford);

        assert_eq!(round.finish(&course), Err(ScoringError::MissingHole(10)));
        assert!(!round.is_finished);
        assert!(round.virtual_handicap.is_none());
    }

    #[test]
    fn test_hvp_periods() {
        let today = date(2025, 5, 20);
        let rounds = vec![
            finished(date(2025, 5, 2), Some(10.0)),
            finished(date(2025, 4, 10), Some(14.0)),
            finished(date(2025, 1, 5), Some(18.0)),
            finished(date(2024, 11, 1), Some(22.0)),
            finished(date(2025, 5, 10), None),
        ];

        assert_eq!(calculate_hvp(&rounds, StatsPeriod::Month, today), Some(10.0));
        assert_eq!(calculate_hvp(&rounds, StatsPeriod::Quarter, today), Some(12.0));
        assert_eq!(calculate_hvp(&rounds, StatsPeriod::Year, today), Some(14.0));
        assert_eq!(calculate_hvp(&rounds, StatsPeriod::Total, today), Some(16.0));

        let summary = hvp_summary(&rounds, today);
        assert_eq!(summary.total, Some(16.0));
        assert_eq!(summary.month, Some(10.0));
        assert_eq!(summary.rounds_counted, 4);
    }

    #[test]
    fn test_hvp_ignores_unfinished_rounds() {
        let today = date(2025, 5, 20);
        let mut open = finished(date(2025, 5, 2), Some(2.0));
        open.is_finished = false;
        let rounds = vec![open, finished(date(2025, 5, 3), Some(12.0))];

        assert_eq!(calculate_hvp(&rounds, StatsPeriod::Month, today), Some(12.0));
    }

    #[test]
    fn test_hvp_empty_period() {
        let today = date(2025, 5, 20);
        let rounds = vec![finished(date(2024, 5, 2), Some(12.0))];

        assert_eq!(calculate_hvp(&rounds, StatsPeriod::Year, today), None);
        assert_eq!(calculate_hvp(&[], StatsPeriod::Total, today), None);
    }

    #[test]
    fn test_hvp_best_of_recent() {
        let rounds: Vec<Round> = (1..=6)
            .map(|day| finished(date(2025, 3, day), Some(10.0 + day as f64)))
            .collect();

        // Last 4 rounds: days 3..=6 -> 13, 14, 15, 16; best 2 -> 13, 14
        assert_eq!(calculate_hvp_best_of(&rounds, 2, 4), Some(13.5));
        assert_eq!(calculate_hvp_best_of(&[], 8, 20), None);
    }
}
