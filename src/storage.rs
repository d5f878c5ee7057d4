pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::error::ScoringError;
use crate::model::{CompetitionResult, ScoringType, TeamRoundAggregate};
use crate::score::CompetitionOutcome;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Where finalized competition results live between finalization and
/// standings.
///
/// `replace_competition_results` must swap the whole result set of a
/// competition at once: every player and team row stored for it goes away
/// and the new rows appear together, so re-finalizing never leaves stale or
/// duplicate rows and a reader never sees half of each.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn replace_competition_results(
        &self,
        outcome: &CompetitionOutcome,
    ) -> Result<(), ScoringError>;
    async fn competition_results(
        &self,
        competition_id: i64,
        scoring_type: ScoringType,
    ) -> Result<Vec<CompetitionResult>, ScoringError>;
    async fn competition_team_results(
        &self,
        competition_id: i64,
    ) -> Result<Vec<TeamRoundAggregate>, ScoringError>;
    async fn tour_results(&self, tour_id: i64) -> Result<Vec<CompetitionResult>, ScoringError>;
    async fn tour_team_results(
        &self,
        tour_id: i64,
    ) -> Result<Vec<TeamRoundAggregate>, ScoringError>;
}
