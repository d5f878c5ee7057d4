use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::model::{
    CompetitionPoints, CompetitionResult, ScoringType, StandingSubject, TeamRoundAggregate,
    TourStanding,
};
use crate::score::ranker::dense_positions_by;

/// A finalized row that earns points towards a tour standing.
pub trait PointsRow {
    fn subject(&self) -> StandingSubject;
    fn competition_id(&self) -> i64;
    fn points(&self) -> i32;
}

impl PointsRow for CompetitionResult {
    fn subject(&self) -> StandingSubject {
        StandingSubject::Player(self.player_id)
    }

    fn competition_id(&self) -> i64 {
        self.competition_id
    }

    fn points(&self) -> i32 {
        self.points
    }
}

impl PointsRow for TeamRoundAggregate {
    fn subject(&self) -> StandingSubject {
        StandingSubject::Team(self.team_id)
    }

    fn competition_id(&self) -> i64 {
        self.competition_id
    }

    fn points(&self) -> i32 {
        self.points
    }
}

/// Sum points per player or team across a tour and rank by the total.
///
/// Only summation, no averaging: a round someone skipped simply adds
/// nothing. Highest total is first and equal totals share a position. No
/// rows gives no standings.
#[must_use]
pub fn build_standings<R: PointsRow>(rows: &[R]) -> Vec<TourStanding> {
    let mut by_subject: BTreeMap<StandingSubject, BTreeMap<i64, i32>> = BTreeMap::new();
    for row in rows {
        let points = by_subject
            .entry(row.subject())
            .or_default()
            .entry(row.competition_id())
            .or_insert(0);
        *points = points.saturating_add(row.points());
    }

    let mut standings: Vec<TourStanding> = by_subject
        .into_iter()
        .map(|(subject, rounds)| TourStanding {
            subject,
            total_points: rounds.values().fold(0, |acc, p| acc.saturating_add(*p)),
            competitions_played: u32::try_from(rounds.len()).unwrap_or(u32::MAX),
            position: 0,
            points_by_competition: rounds
                .into_iter()
                .map(|(competition_id, points)| CompetitionPoints {
                    competition_id,
                    points,
                })
                .collect(),
        })
        .collect();

    standings.sort_by_key(|s| (Reverse(s.total_points), s.subject));
    let positions = dense_positions_by(&standings, |s| s.total_points);
    for (standing, position) in standings.iter_mut().zip(positions) {
        standing.position = position;
    }

    standings
}

/// Player standings for one scoring view of the tour.
#[must_use]
pub fn player_standings(
    results: &[CompetitionResult],
    scoring_type: ScoringType,
) -> Vec<TourStanding> {
    let view: Vec<CompetitionResult> = results
        .iter()
        .filter(|r| r.scoring_type == scoring_type)
        .cloned()
        .collect();
    build_standings(&view)
}
