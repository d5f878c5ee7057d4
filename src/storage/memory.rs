use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ScoringError;
use crate::model::{CompetitionResult, ScoringType, TeamRoundAggregate};
use crate::score::CompetitionOutcome;
use crate::storage::ResultStore;

#[derive(Clone, Debug)]
struct StoredCompetition {
    tour_id: i64,
    results: Vec<CompetitionResult>,
    team_results: Vec<TeamRoundAggregate>,
}

/// Keeps result sets in process, keyed by competition.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    competitions: Arc<RwLock<BTreeMap<i64, StoredCompetition>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn replace_competition_results(
        &self,
        outcome: &CompetitionOutcome,
    ) -> Result<(), ScoringError> {
        let mut map = self.competitions.write().await;
        map.insert(
            outcome.competition_id,
            StoredCompetition {
                tour_id: outcome.tour_id,
                results: outcome.results.clone(),
                team_results: outcome.team_results.clone(),
            },
        );
        Ok(())
    }

    async fn competition_results(
        &self,
        competition_id: i64,
        scoring_type: ScoringType,
    ) -> Result<Vec<CompetitionResult>, ScoringError> {
        let map = self.competitions.read().await;
        Ok(map
            .get(&competition_id)
            .map(|c| {
                c.results
                    .iter()
                    .filter(|r| r.scoring_type == scoring_type)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn competition_team_results(
        &self,
        competition_id: i64,
    ) -> Result<Vec<TeamRoundAggregate>, ScoringError> {
        let map = self.competitions.read().await;
        Ok(map
            .get(&competition_id)
            .map(|c| c.team_results.clone())
            .unwrap_or_default())
    }

    async fn tour_results(&self, tour_id: i64) -> Result<Vec<CompetitionResult>, ScoringError> {
        let map = self.competitions.read().await;
        Ok(map
            .values()
            .filter(|c| c.tour_id == tour_id)
            .flat_map(|c| c.results.iter().cloned())
            .collect())
    }

    async fn tour_team_results(
        &self,
        tour_id: i64,
    ) -> Result<Vec<TeamRoundAggregate>, ScoringError> {
        let map = self.competitions.read().await;
        Ok(map
            .values()
            .filter(|c| c.tour_id == tour_id)
            .flat_map(|c| c.team_results.iter().cloned())
            .collect())
    }
}
