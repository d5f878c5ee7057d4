use ahash::RandomState;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::model::{PointsRule, RankedEntry, TeamRoundAggregate};
use crate::score::points::allocate_positions;

/// Sum each team's ranked members for one competition.
///
/// Members missing from `individual` (ineligible, DQ'd, unfinished) add
/// nothing; a team appears as long as one member was ranked. Positions and
/// points are left at zero for [`rank_teams`] and [`allocate_team_points`].
#[must_use]
pub fn aggregate_teams(
    competition_id: i64,
    individual: &[RankedEntry],
    membership: &HashMap<i64, i64, RandomState>,
) -> Vec<TeamRoundAggregate> {
    let mut by_team: BTreeMap<i64, TeamRoundAggregate> = BTreeMap::new();

    for entry in individual {
        let Some(&team_id) = membership.get(&entry.participant_id) else {
            continue;
        };
        let team = by_team.entry(team_id).or_insert_with(|| TeamRoundAggregate {
            team_id,
            competition_id,
            total_relative_score: 0,
            total_shots: 0,
            member_scores: vec![],
            position: 0,
            points: 0,
        });
        team.total_relative_score += entry.ranking_score;
        team.total_shots += entry.score.gross_total;
        team.member_scores.push(entry.ranking_score);
    }

    by_team
        .into_values()
        .map(|mut team| {
            team.member_scores.sort_unstable();
            team
        })
        .collect()
}

/// Walk two ascending member lists until one is lower. Lists that agree on
/// every compared value stay tied, whatever their lengths: `[-1, 2]` ties
/// with `[-1, 2, 0]`.
#[must_use]
pub fn compare_member_scores(a: &[i32], b: &[i32]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Total relative score first, then the member-by-member cascade.
#[must_use]
pub fn compare_teams(a: &TeamRoundAggregate, b: &TeamRoundAggregate) -> Ordering {
    a.total_relative_score
        .cmp(&b.total_relative_score)
        .then_with(|| compare_member_scores(&a.member_scores, &b.member_scores))
}

/// Give each team its dense position, best first.
///
/// Position is one plus the number of teams that beat it under
/// [`compare_teams`], so teams that stay tied through the whole cascade
/// share a position.
#[must_use]
pub fn rank_teams(mut teams: Vec<TeamRoundAggregate>) -> Vec<TeamRoundAggregate> {
    let positions: Vec<u32> = teams
        .iter()
        .map(|team| {
            let better = teams
                .iter()
                .filter(|other| compare_teams(other, team) == Ordering::Less)
                .count();
            u32::try_from(better).unwrap_or(u32::MAX - 1) + 1
        })
        .collect();

    for (team, position) in teams.iter_mut().zip(positions) {
        team.position = position;
    }

    teams.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    teams
}

pub fn allocate_team_points(teams: &mut [TeamRoundAggregate], rule: &PointsRule, field_size: i32) {
    let positions: Vec<u32> = teams.iter().map(|t| t.position).collect();
    let points = allocate_positions(&positions, rule, field_size);
    for (team, points) in teams.iter_mut().zip(points) {
        team.points = points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResolvedScore, ScoreSource, ScoringType};

    fn ranked(participant_id: i64, relative_to_par: i32) -> RankedEntry {
        RankedEntry {
            participant_id,
            scoring_type: ScoringType::Gross,
            ranking_score: relative_to_par,
            position: 0,
            score: ResolvedScore {
                source: ScoreSource::HoleByHole,
                holes_played: 18,
                gross_total: 72 + relative_to_par,
                relative_to_par,
                front_nine: None,
                back_nine: None,
                net_total: None,
                net_relative_to_par: None,
                eligible: true,
            },
        }
    }

    fn membership(pairs: &[(i64, i64)]) -> HashMap<i64, i64, RandomState> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn sums_members_and_sorts_member_scores() {
        let entries = vec![ranked(1, 3), ranked(2, -2), ranked(3, 1), ranked(4, 0)];
        let teams = aggregate_teams(9, &entries, &membership(&[(1, 10), (2, 10), (3, 20)]));
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].team_id, 10);
        assert_eq!(teams[0].competition_id, 9);
        assert_eq!(teams[0].total_relative_score, 1);
        assert_eq!(teams[0].total_shots, 145);
        assert_eq!(teams[0].member_scores, vec![-2, 3]);
        assert_eq!(teams[1].member_scores, vec![1]);
    }

    #[test]
    fn cascade_breaks_tie_on_first_member() {
        assert_eq!(compare_member_scores(&[-2, 3], &[-1, 4]), Ordering::Less);

        let entries = vec![ranked(1, -2), ranked(2, 3), ranked(3, -1), ranked(4, 2)];
        let teams = aggregate_teams(
            1,
            &entries,
            &membership(&[(1, 100), (2, 100), (3, 200), (4, 200)]),
        );
        let ranked_teams = rank_teams(teams);
        assert_eq!(ranked_teams[0].team_id, 100);
        assert_eq!(ranked_teams[0].position, 1);
        assert_eq!(ranked_teams[1].team_id, 200);
        assert_eq!(ranked_teams[1].position, 2);
    }

    #[test]
    fn cascade_goes_past_the_first_level() {
        let a = TeamRoundAggregate {
            team_id: 1,
            competition_id: 1,
            total_relative_score: 3,
            total_shots: 0,
            member_scores: vec![-1, 0, 4],
            position: 0,
            points: 0,
        };
        let b = TeamRoundAggregate {
            team_id: 2,
            member_scores: vec![-1, 1, 3],
            ..a.clone()
        };
        assert_eq!(compare_teams(&a, &b), Ordering::Less);
        assert_eq!(compare_teams(&b, &a), Ordering::Greater);
    }

    #[test]
    fn shorter_list_with_matching_prefix_stays_tied() {
        assert_eq!(compare_member_scores(&[-1, 2], &[-1, 2, 0]), Ordering::Equal);
        assert_eq!(compare_member_scores(&[], &[3]), Ordering::Equal);

        let two = TeamRoundAggregate {
            team_id: 1,
            competition_id: 1,
            total_relative_score: 1,
            total_shots: 0,
            member_scores: vec![-1, 2],
            position: 0,
            points: 0,
        };
        let three = TeamRoundAggregate {
            team_id: 2,
            member_scores: vec![-1, 2, 0],
            ..two.clone()
        };
        let positions: Vec<u32> = rank_teams(vec![three, two]).iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 1]);
    }

    #[test]
    fn identical_teams_stay_tied_and_split_points() {
        let entries = vec![
            ranked(1, 0),
            ranked(2, 1),
            ranked(3, 0),
            ranked(4, 1),
            ranked(5, 4),
        ];
        let teams = aggregate_teams(
            1,
            &entries,
            &membership(&[(1, 1), (2, 1), (3, 2), (4, 2), (5, 3)]),
        );
        let mut teams = rank_teams(teams);
        let positions: Vec<u32> = teams.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 1, 3]);

        allocate_team_points(&mut teams, &PointsRule::default(), 3);
        let points: Vec<i32> = teams.iter().map(|t| t.points).collect();
        // positions 1 and 2 earn 5 and 3, averaged to 4
        assert_eq!(points, vec![4, 4, 1]);
    }

    #[test]
    fn no_ranked_members_no_teams() {
        assert!(aggregate_teams(1, &[], &membership(&[(1, 1)])).is_empty());
        assert!(rank_teams(vec![]).is_empty());
    }
}
