//! Sindicato: positional points per hole by net score.

use std::collections::BTreeMap;

use crate::models::{Course, PlayerId};

use super::{hole_data, Competitor, ScoringError};

/// Sindicato points for one hole.
///
/// A competitor's position is the number of competitors with a strictly lower
/// net score, so tied players share the best position of their group and the
/// positions they occupy are skipped: nets `[3, 3, 5]` with table
/// `[4, 2, 1, 0]` pay `4, 4, 1`. Positions past the table pay 0. Competitors
/// without a score on the hole get no entry.
pub fn calculate_sindicato_points(
    competitors: &[Competitor<'_>],
    hole_number: u8,
    course: &Course,
    points_table: &[u32; 4],
) -> Result<BTreeMap<PlayerId, u32>, ScoringError> {
    let hole = hole_data(course, hole_number)?;

    let nets: Vec<(&PlayerId, i32)> = competitors
        .iter()
        .filter_map(|c| c.net_score(hole).map(|net| (&c.player.id, net)))
        .collect();

    let points = nets
        .iter()
        .map(|&(id, net)| {
            let position = nets.iter().filter(|&&(_, other)| other < net).count();
            let points = points_table.get(position).copied().unwrap_or(0);
            (id.clone(), points)
        })
        .collect();

    Ok(points)
}

/// Sindicato points summed over a set of holes.
///
/// Every competitor gets an entry, even with no scored holes.
pub fn calculate_sindicato_totals(
    competitors: &[Competitor<'_>],
    holes: &[u8],
    course: &Course,
    points_table: &[u32; 4],
) -> Result<BTreeMap<PlayerId, u32>, ScoringError> {
    let mut totals: BTreeMap<PlayerId, u32> = competitors
        .iter()
        .map(|c| (c.player.id.clone(), 0))
        .collect();

    for &number in holes {
        let any_scored = competitors.iter().any(|c| c.player.score(number).is_some());
        if !any_scored {
            continue;
        }
        for (id, points) in calculate_sindicato_points(competitors, number, course, points_table)? {
            *totals.entry(id).or_insert(0) += points;
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::eighteen_hole_course;
    use crate::models::Player;
    use pretty_assertions::assert_eq;

    const TABLE: [u32; 4] = [4, 2, 1, 0];

    fn player(id: &str, hole: u8, strokes: u32) -> Player {
        Player::new(id.to_string(), 0.0, "Amarillas".to_string())
            .with_id(id)
            .with_score(hole, strokes, 2)
    }

    fn expected(entries: &[(&str, u32)]) -> BTreeMap<PlayerId, u32> {
        entries
            .iter()
            .map(|&(id, pts)| (PlayerId::from(id), pts))
            .collect()
    }

    #[test]
    fn test_distinct_scores() {
        let course = eighteen_hole_course();
        let players = [
            player("a", 1, 5),
            player("b", 1, 3),
            player("c", 1, 4),
            player("d", 1, 6),
        ];
        let competitors: Vec<_> = players.iter().map(|p| Competitor::new(p, 0)).collect();

        let points = calculate_sindicato_points(&competitors, 1, &course, &TABLE).unwrap();
        assert_eq!(points, expected(&[("a", 1), ("b", 4), ("c", 2), ("d", 0)]));
    }

    #[test]
    fn test_tie_for_first_skips_second_place() {
        let course = eighteen_hole_course();
        let players = [player("a", 1, 3), player("b", 1, 3), player("c", 1, 5)];
        let competitors: Vec<_> = players.iter().map(|p| Competitor::new(p, 0)).collect();

        let points = calculate_sindicato_points(&competitors, 1, &course, &TABLE).unwrap();
        assert_eq!(points, expected(&[("a", 4), ("b", 4), ("c", 1)]));
    }

    #[test]
    fn test_tie_for_second() {
        let course = eighteen_hole_course();
        let players = [
            player("a", 1, 3),
            player("b", 1, 4),
            player("c", 1, 4),
            player("d", 1, 6),
        ];
        let competitors: Vec<_> = players.iter().map(|p| Competitor::new(p, 0)).collect();

        let points = calculate_sindicato_points(&competitors, 1, &course, &TABLE).unwrap();
        assert_eq!(points, expected(&[("a", 4), ("b", 2), ("c", 2), ("d", 0)]));
    }

    #[test]
    fn test_all_tied() {
        let course = eighteen_hole_course();
        let players = [player("a", 1, 4), player("b", 1, 4), player("c", 1, 4)];
        let competitors: Vec<_> = players.iter().map(|p| Competitor::new(p, 0)).collect();

        let points = calculate_sindicato_points(&competitors, 1, &course, &TABLE).unwrap();
        assert!(points.values().all(|&p| p == 4));
    }

    #[test]
    fn test_ranking_uses_net_scores() {
        let course = eighteen_hole_course();
        // Hole 5 has stroke index 1: HDJ 18 gets one stroke there
        let players = [player("a", 5, 5), player("b", 5, 4)];
        let competitors = [
            Competitor::new(&players[0], 18),
            Competitor::new(&players[1], 0),
        ];

        let points = calculate_sindicato_points(&competitors, 5, &course, &TABLE).unwrap();
        assert_eq!(points, expected(&[("a", 4), ("b", 4)]));
    }

    #[test]
    fn test_unscored_players_are_excluded() {
        let course = eighteen_hole_course();
        let players = [player("a", 1, 4), player("b", 2, 4)];
        let competitors: Vec<_> = players.iter().map(|p| Competitor::new(p, 0)).collect();

        let points = calculate_sindicato_points(&competitors, 1, &course, &TABLE).unwrap();
        assert_eq!(points, expected(&[("a", 4)]));
    }

    #[test]
    fn test_more_players_than_table() {
        let course = eighteen_hole_course();
        let players: Vec<_> = (0..5u32)
            .map(|i| player(&format!("p{}", i), 1, 3 + i))
            .collect();
        let competitors: Vec<_> = players.iter().map(|p| Competitor::new(p, 0)).collect();

        let points = calculate_sindicato_points(&competitors, 1, &course, &TABLE).unwrap();
        assert_eq!(points[&PlayerId::from("p4")], 0);
        assert_eq!(points.values().sum::<u32>(), 7);
    }

    #[test]
    fn test_tied_players_always_share_points() {
        let course = eighteen_hole_course();
        let groups: [&[u32]; 4] = [&[4, 4, 4, 4], &[3, 3, 5, 5], &[3, 4, 4, 4], &[5, 3, 3]];

        for strokes in groups {
            let players: Vec<_> = strokes
                .iter()
                .enumerate()
                .map(|(i, &s)| player(&format!("p{}", i), 1, s))
                .collect();
            let competitors: Vec<_> = players.iter().map(|p| Competitor::new(p, 0)).collect();

            let points = calculate_sindicato_points(&competitors, 1, &course, &TABLE).unwrap();
            assert_eq!(points.len(), players.len());
            for (i, &si) in strokes.iter().enumerate() {
                for (j, &sj) in strokes.iter().enumerate() {
                    if si == sj {
                        assert_eq!(
                            points[&PlayerId::from(format!("p{}", i))],
                            points[&PlayerId::from(format!("p{}", j))]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_missing_hole_is_error() {
        let course = eighteen_hole_course();
        let players = [player("a", 1, 4)];
        let competitors: Vec<_> = players.iter().map(|p| Competitor::new(p, 0)).collect();

        assert_eq!(
            calculate_sindicato_points(&competitors, 19, &course, &TABLE).unwrap_err(),
            ScoringError::MissingHole(19)
        );
    }

    #[test]
    fn test_totals_over_holes() {
        let course = eighteen_hole_course();
        let a = Player::new("a".to_string(), 0.0, "Amarillas".to_string())
            .with_id("a")
            .with_score(1, 4, 2)
            .with_score(2, 5, 2);
        let b = Player::new("b".to_string(), 0.0, "Amarillas".to_string())
            .with_id("b")
            .with_score(1, 5, 2)
            .with_score(2, 4, 2);
        let c = Player::new("c".to_string(), 0.0, "Amarillas".to_string()).with_id("c");
        let competitors = [
            Competitor::new(&a, 0),
            Competitor::new(&b, 0),
            Competitor::new(&c, 0),
        ];

        let totals =
            calculate_sindicato_totals(&competitors, &[1, 2, 3], &course, &TABLE).unwrap();
        assert_eq!(totals, expected(&[("a", 6), ("b", 6), ("c", 0)]));
    }
}
