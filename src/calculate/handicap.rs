//! Playing handicap and stroke allocation.

use crate::models::{Course, HandicapPercentage, Player, Round};

use super::{Competitor, ScoringError};

/// Slope of a course of standard difficulty.
pub const STANDARD_SLOPE: f64 = 113.0;

/// Round to the nearest integer, halves up.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Playing handicap (HDJ) from a handicap index and tee slope.
///
/// `round_half_up(index * slope / 113 * percentage / 100)`. A zero slope is
/// treated as malformed course data.
pub fn calculate_playing_handicap(
    handicap_index: f64,
    slope: u32,
    percentage: HandicapPercentage,
) -> Result<i32, ScoringError> {
    if slope == 0 {
        return Err(ScoringError::InvalidCourseData(
            "tee slope must be greater than 0".to_string(),
        ));
    }

    let course_handicap = handicap_index * slope as f64 / STANDARD_SLOPE;
    Ok(round_half_up(
        course_handicap * percentage.as_percent() as f64 / 100.0,
    ))
}

/// Strokes a player receives on a hole.
///
/// Every hole gets `playing_handicap / 18` strokes, and the hardest
/// `playing_handicap % 18` holes by stroke index get one more. Zero and
/// plus handicaps receive nothing; strokes are never taken away.
pub fn calculate_strokes_received(playing_handicap: i32, stroke_index: u8) -> u32 {
    if playing_handicap <= 0 {
        return 0;
    }

    let base = (playing_handicap / 18) as u32;
    let remainder = playing_handicap % 18;
    if (stroke_index as i32) <= remainder {
        base + 1
    } else {
        base
    }
}

/// The player's own playing handicap for a round.
///
/// Older rounds stored 0 when the value was never computed; in that case it
/// is recomputed from the player's tee and the round's percentage.
pub fn resolve_own_playing_handicap(
    round: &Round,
    player: &Player,
    course: &Course,
) -> Result<i32, ScoringError> {
    if player.playing_handicap != 0 || player.handicap_index <= 0.0 {
        return Ok(player.playing_handicap);
    }

    let tee = course
        .tee(&player.tee_box)
        .ok_or_else(|| ScoringError::UnknownTee(player.tee_box.clone()))?;
    calculate_playing_handicap(player.handicap_index, tee.slope, round.handicap_percentage)
}

/// The playing handicap scorers should use for a player.
///
/// With handicaps disabled every player plays off the first player's
/// handicap, so net and gross rankings coincide.
pub fn resolve_effective_handicap(
    round: &Round,
    player: &Player,
    course: &Course,
) -> Result<i32, ScoringError> {
    if round.use_handicap {
        return resolve_own_playing_handicap(round, player, course);
    }

    match round.players.first() {
        Some(first) => resolve_own_playing_handicap(round, first, course),
        None => resolve_own_playing_handicap(round, player, course),
    }
}

/// All players of a round paired with their effective handicaps, in round order.
pub fn effective_competitors<'a>(
    round: &'a Round,
    course: &Course,
) -> Result<Vec<Competitor<'a>>, ScoringError> {
    round
        .players
        .iter()
        .map(|player| {
            resolve_effective_handicap(round, player, course)
                .map(|hcp| Competitor::new(player, hcp))
        })
        .collect()
}

/// Recompute every stored playing handicap from the player's tee and the
/// round's current percentage.
///
/// The round is left untouched when any player's tee is unknown.
pub fn recompute_playing_handicaps(round: &mut Round, course: &Course) -> Result<(), ScoringError> {
    let handicaps = round
        .players
        .iter()
        .map(|player| {
            let tee = course
                .tee(&player.tee_box)
                .ok_or_else(|| ScoringError::UnknownTee(player.tee_box.clone()))?;
            calculate_playing_handicap(player.handicap_index, tee.slope, round.handicap_percentage)
        })
        .collect::<Result<Vec<i32>, _>>()?;

    for (player, hdj) in round.players.iter_mut().zip(handicaps) {
        player.playing_handicap = hdj;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::eighteen_hole_course;
    use crate::models::{CourseLength, EntityId, GameMode};
    use chrono::NaiveDate;

    fn round_with(players: Vec<Player>) -> Round {
        Round::new(
            EntityId::from("c1"),
            NaiveDate::from_ymd_opt(2025, 5, 4).unwrap(),
            GameMode::Stableford,
            CourseLength::Full,
            players,
        )
    }

    #[test]
    fn test_playing_handicap_scenario() {
        // 18.0 * 130 / 113 = 20.71
        assert_eq!(
            calculate_playing_handicap(18.0, 130, HandicapPercentage::Full),
            Ok(21)
        );
    }

    #[test]
    fn test_playing_handicap_three_quarters() {
        // 20.71 * 0.75 = 15.53
        assert_eq!(
            calculate_playing_handicap(18.0, 130, HandicapPercentage::ThreeQuarters),
            Ok(16)
        );
        assert_eq!(
            calculate_playing_handicap(20.0, 113, HandicapPercentage::ThreeQuarters),
            Ok(15)
        );
    }

    #[test]
    fn test_playing_handicap_rounds_half_up() {
        assert_eq!(
            calculate_playing_handicap(12.5, 113, HandicapPercentage::Full),
            Ok(13)
        );
        assert_eq!(
            calculate_playing_handicap(12.4, 113, HandicapPercentage::Full),
            Ok(12)
        );
    }

    #[test]
    fn test_playing_handicap_plus_index() {
        assert_eq!(
            calculate_playing_handicap(-2.0, 130, HandicapPercentage::Full),
            Ok(-2)
        );
        assert_eq!(
            calculate_playing_handicap(0.0, 130, HandicapPercentage::Full),
            Ok(0)
        );
    }

    #[test]
    fn test_playing_handicap_zero_slope() {
        assert!(matches!(
            calculate_playing_handicap(18.0, 0, HandicapPercentage::Full),
            Err(ScoringError::InvalidCourseData(_))
        ));
    }

    #[test]
    fn test_strokes_received() {
        assert_eq!(calculate_strokes_received(21, 3), 2);
        assert_eq!(calculate_strokes_received(21, 4), 1);
        assert_eq!(calculate_strokes_received(18, 18), 1);
        assert_eq!(calculate_strokes_received(17, 18), 0);
        assert_eq!(calculate_strokes_received(36, 18), 2);
        assert_eq!(calculate_strokes_received(40, 2), 3);
        assert_eq!(calculate_strokes_received(40, 4), 3);
        assert_eq!(calculate_strokes_received(40, 5), 2);
    }

    #[test]
    fn test_strokes_received_zero_and_plus() {
        assert_eq!(calculate_strokes_received(0, 1), 0);
        assert_eq!(calculate_strokes_received(-3, 1), 0);
        assert_eq!(calculate_strokes_received(-3, 18), 0);
    }

    #[test]
    fn test_strokes_received_total_matches_handicap() {
        for hcp in 0..=54 {
            let total: u32 = (1..=18).map(|si| calculate_strokes_received(hcp, si)).sum();
            assert_eq!(total, hcp as u32);
        }
    }

    #[test]
    fn test_own_handicap_uses_stored_value() {
        let course = eighteen_hole_course();
        let player = Player::new("Ana".to_string(), 18.0, "Amarillas".to_string())
            .with_playing_handicap(25);
        let round = round_with(vec![player.clone()]);

        assert_eq!(resolve_own_playing_handicap(&round, &player, &course), Ok(25));
    }

    #[test]
    fn test_own_handicap_recomputes_legacy_zero() {
        let course = eighteen_hole_course();
        let player = Player::new("Ana".to_string(), 18.0, "Amarillas".to_string());
        let round = round_with(vec![player.clone()]);

        assert_eq!(resolve_own_playing_handicap(&round, &player, &course), Ok(21));

        let round = round.with_handicap_percentage(HandicapPercentage::ThreeQuarters);
        assert_eq!(resolve_own_playing_handicap(&round, &player, &course), Ok(16));
    }

    #[test]
    fn test_own_handicap_scratch_player_stays_zero() {
        let course = eighteen_hole_course();
        let player = Player::new("Pro".to_string(), 0.0, "Negras".to_string());
        let round = round_with(vec![player.clone()]);

        // Unknown tee is never looked up for a scratch player
        assert_eq!(resolve_own_playing_handicap(&round, &player, &course), Ok(0));
    }

    #[test]
    fn test_own_handicap_unknown_tee() {
        let course = eighteen_hole_course();
        let player = Player::new("Ana".to_string(), 18.0, "Negras".to_string());
        let round = round_with(vec![player.clone()]);

        assert_eq!(
            resolve_own_playing_handicap(&round, &player, &course),
            Err(ScoringError::UnknownTee("Negras".to_string()))
        );
    }

    #[test]
    fn test_effective_handicap_with_and_without_handicap() {
        let course = eighteen_hole_course();
        let first = Player::new("Ana".to_string(), 10.0, "Amarillas".to_string())
            .with_playing_handicap(12);
        let second = Player::new("Luis".to_string(), 30.0, "Amarillas".to_string())
            .with_playing_handicap(35);

        let round = round_with(vec![first.clone(), second.clone()]);
        assert_eq!(resolve_effective_handicap(&round, &second, &course), Ok(35));

        let round = round.without_handicap();
        assert_eq!(resolve_effective_handicap(&round, &second, &course), Ok(12));
        assert_eq!(resolve_effective_handicap(&round, &first, &course), Ok(12));
    }

    #[test]
    fn test_effective_competitors_do_not_mutate_players() {
        let course = eighteen_hole_course();
        let round = round_with(vec![
            Player::new("Ana".to_string(), 18.0, "Amarillas".to_string()),
            Player::new("Luis".to_string(), 9.0, "Rojas".to_string()).with_playing_handicap(10),
        ]);

        let competitors = effective_competitors(&round, &course).unwrap();
        let handicaps: Vec<i32> = competitors.iter().map(|c| c.playing_handicap).collect();

        assert_eq!(handicaps, vec![21, 10]);
        assert_eq!(round.players[0].playing_handicap, 0);
    }

    #[test]
    fn test_recompute_follows_new_percentage() {
        let course = eighteen_hole_course();
        let mut round = round_with(vec![
            Player::new("Ana".to_string(), 18.0, "Amarillas".to_string()).with_playing_handicap(21),
            Player::new("Luis".to_string(), 9.0, "Rojas".to_string()).with_playing_handicap(10),
        ])
        .with_handicap_percentage(HandicapPercentage::ThreeQuarters);

        recompute_playing_handicaps(&mut round, &course).unwrap();

        // 9.0 * 120 / 113 * 0.75 = 7.17
        let handicaps: Vec<i32> = round.players.iter().map(|p| p.playing_handicap).collect();
        assert_eq!(handicaps, vec![16, 7]);
    }

    #[test]
    fn test_recompute_unknown_tee_leaves_round_unchanged() {
        let course = eighteen_hole_course();
        let mut round = round_with(vec![
            Player::new("Ana".to_string(), 18.0, "Amarillas".to_string()).with_playing_handicap(21),
            Player::new("Luis".to_string(), 9.0, "Negras".to_string()).with_playing_handicap(10),
        ]);

        assert_eq!(
            recompute_playing_handicaps(&mut round, &course),
            Err(ScoringError::UnknownTee("Negras".to_string()))
        );
        assert_eq!(round.players[0].playing_handicap, 21);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn strokes_received_monotonic_in_handicap(
                hcp in 0i32..=60,
                stroke_index in 1u8..=18
            ) {
                prop_assert!(
                    calculate_strokes_received(hcp + 1, stroke_index)
                        >= calculate_strokes_received(hcp, stroke_index)
                );
            }

            #[test]
            fn harder_holes_never_get_fewer_strokes(
                hcp in -10i32..=60,
                stroke_index in 1u8..18
            ) {
                prop_assert!(
                    calculate_strokes_received(hcp, stroke_index)
                        >= calculate_strokes_received(hcp, stroke_index + 1)
                );
            }
        }
    }
}
