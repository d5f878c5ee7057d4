use chrono::{DateTime, Utc};
use log::info;

use crate::error::ScoringError;
use crate::model::{CompetitionSnapshot, ScoringType, TourStanding};
use crate::score::{CompetitionOutcome, build_standings, finalize, player_standings};
use crate::storage::ResultStore;

/// Compute a competition's results and replace whatever the store held for it.
///
/// Running this twice on the same snapshot leaves the store exactly as after
/// the first run.
///
/// # Errors
///
/// Will return `Err` if the snapshot has no course par profile or the store fails
pub async fn finalize_competition(
    store: &dyn ResultStore,
    snapshot: &CompetitionSnapshot,
    as_of: DateTime<Utc>,
) -> Result<CompetitionOutcome, ScoringError> {
    let outcome = finalize(snapshot, as_of)?;
    store.replace_competition_results(&outcome).await?;
    info!(
        "finalized competition {} of tour {}: {} result rows, {} team rows, {} rejected",
        outcome.competition_id,
        outcome.tour_id,
        outcome.results.len(),
        outcome.team_results.len(),
        outcome.rejected.len()
    );
    Ok(outcome)
}

/// Player standings re-derived from the rows currently stored for the tour.
/// A tour with nothing finalized yields an empty list.
///
/// # Errors
///
/// Will return `Err` if the store fails
pub async fn tour_standings(
    store: &dyn ResultStore,
    tour_id: i64,
    scoring_type: ScoringType,
) -> Result<Vec<TourStanding>, ScoringError> {
    let results = store.tour_results(tour_id).await?;
    Ok(player_standings(&results, scoring_type))
}

/// # Errors
///
/// Will return `Err` if the store fails
pub async fn tour_team_standings(
    store: &dyn ResultStore,
    tour_id: i64,
) -> Result<Vec<TourStanding>, ScoringError> {
    let team_results = store.tour_team_results(tour_id).await?;
    Ok(build_standings(&team_results))
}
