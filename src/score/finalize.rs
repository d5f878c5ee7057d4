use ahash::RandomState;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::ScoringError;
use crate::model::{
    CompetitionResult, CompetitionSnapshot, Participant, ResolvedScore, ScoringType,
    TeamRoundAggregate,
};
use crate::score::points::allocate;
use crate::score::ranker::rank;
use crate::score::resolver::resolve;
use crate::score::team::{aggregate_teams, allocate_team_points, rank_teams};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RejectedEntry {
    pub participant_id: i64,
    pub reason: String,
}

/// Full result set of one competition, ready to replace whatever was stored
/// for it before.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompetitionOutcome {
    pub competition_id: i64,
    pub tour_id: i64,
    /// Gross rows first, then net rows, each in position order.
    pub results: Vec<CompetitionResult>,
    pub team_results: Vec<TeamRoundAggregate>,
    /// Entries that failed validation. They are left out of every ranking.
    pub rejected: Vec<RejectedEntry>,
}

impl CompetitionOutcome {
    #[must_use]
    pub fn results_for(&self, scoring_type: ScoringType) -> Vec<&CompetitionResult> {
        self.results
            .iter()
            .filter(|r| r.scoring_type == scoring_type)
            .collect()
    }
}

/// Fails when the participant or player id was already claimed earlier in the field.
fn check_unique(
    participant: &Participant,
    participants: &HashMap<i64, &Participant, RandomState>,
    players: &HashSet<i64, RandomState>,
) -> Result<(), ScoringError> {
    if participants.contains_key(&participant.participant_id) {
        return Err(ScoringError::InvalidInput(format!(
            "participant id {} appears more than once",
            participant.participant_id
        )));
    }
    if players.contains(&participant.player_id) {
        return Err(ScoringError::InvalidInput(format!(
            "player {} is already entered in this competition",
            participant.player_id
        )));
    }
    Ok(())
}

/// Compute every result row for a competition from one snapshot.
///
/// A bad entry is recorded in `rejected` and the rest of the field is still
/// ranked. So is any entry repeating a participant or player id seen earlier
/// in the snapshot; the first entry keeps the ids even when it is rejected.
/// `as_of` is the instant open-window rounds are judged against.
///
/// # Errors
///
/// Will return `Err` if the snapshot carries no course par profile
pub fn finalize(
    snapshot: &CompetitionSnapshot,
    as_of: DateTime<Utc>,
) -> Result<CompetitionOutcome, ScoringError> {
    let pars = snapshot.pars.as_ref().ok_or_else(|| {
        ScoringError::NotFound(format!(
            "course par profile for competition {}",
            snapshot.competition_id
        ))
    })?;
    let completion = snapshot.round_completion(as_of);

    let mut resolved: Vec<(i64, ResolvedScore)> = Vec::with_capacity(snapshot.participants.len());
    let mut participants: HashMap<i64, &Participant, RandomState> = HashMap::default();
    let mut players: HashSet<i64, RandomState> = HashSet::default();
    let mut rejected = vec![];
    for participant in &snapshot.participants {
        let outcome = check_unique(participant, &participants, &players).and_then(|()| {
            participants.insert(participant.participant_id, participant);
            players.insert(participant.player_id);
            resolve(&participant.entry, pars, &completion)
        });
        match outcome {
            Ok(score) => resolved.push((participant.participant_id, score)),
            Err(e) => {
                warn!(
                    "competition {}: rejected participant {}: {e}",
                    snapshot.competition_id, participant.participant_id
                );
                rejected.push(RejectedEntry {
                    participant_id: participant.participant_id,
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut results = vec![];
    let mut gross_ranked = vec![];
    for scoring_type in ScoringType::ALL {
        let ranked = rank(&resolved, scoring_type);
        let field_size = snapshot.field_size.resolve(ranked.len());
        let points = allocate(&ranked, &snapshot.points_rule, field_size);
        debug!(
            "competition {}: {} ranked {} of {} (field size {field_size})",
            snapshot.competition_id,
            scoring_type,
            ranked.len(),
            resolved.len()
        );

        for entry in &ranked {
            let Some(participant) = participants.get(&entry.participant_id) else {
                continue;
            };
            results.push(CompetitionResult {
                competition_id: snapshot.competition_id,
                player_id: participant.player_id,
                scoring_type,
                position: entry.position,
                points: points.get(&entry.participant_id).copied().unwrap_or_default(),
                gross_score: entry.score.gross_total,
                net_score: entry.score.net_total,
                relative_to_par: entry.score.relative_to_par,
            });
        }

        if scoring_type == ScoringType::Gross {
            gross_ranked = ranked;
        }
    }

    let membership: HashMap<i64, i64, RandomState> = participants
        .values()
        .filter_map(|p| p.team_id.map(|team_id| (p.participant_id, team_id)))
        .collect();
    let team_results = if membership.is_empty() {
        vec![]
    } else {
        let mut teams = rank_teams(aggregate_teams(
            snapshot.competition_id,
            &gross_ranked,
            &membership,
        ));
        let team_rule = snapshot.team_points_rule.clone().unwrap_or_default();
        let field_size = i32::try_from(teams.len()).unwrap_or(i32::MAX);
        allocate_team_points(&mut teams, &team_rule, field_size);
        teams
    };

    Ok(CompetitionOutcome {
        competition_id: snapshot.competition_id,
        tour_id: snapshot.tour_id,
        results,
        team_results,
        rejected,
    })
}
