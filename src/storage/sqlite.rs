use async_trait::async_trait;
use log::debug;
use rusqlite::{Connection, Row, params};
use std::path::Path;
use tokio::sync::Mutex;

use crate::error::ScoringError;
use crate::model::{CompetitionResult, ScoringType, TeamRoundAggregate};
use crate::score::CompetitionOutcome;
use crate::storage::ResultStore;

pub const SCHEMA: &[(&str, &str)] = &[
    (
        "competition",
        include_str!("../sql/schema/sqlite/00_competition.sql"),
    ),
    (
        "competition_result",
        include_str!("../sql/schema/sqlite/01_competition_result.sql"),
    ),
    (
        "team_result",
        include_str!("../sql/schema/sqlite/02_team_result.sql"),
    ),
];

const RESULT_COLUMNS: &str =
    "r.competition_id, r.player_id, r.scoring_type, r.position, r.points,
     r.gross_score, r.net_score, r.relative_to_par";
const TEAM_COLUMNS: &str =
    "t.competition_id, t.team_id, t.total_relative_score, t.total_shots, t.member_scores,
     t.position, t.points";

/// SQLite-backed result store. One connection guarded by an async mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// # Errors
    ///
    /// Will return `Err` if the database cannot be opened or the schema cannot be created
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScoringError> {
        Self::with_connection(Connection::open(path)?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the schema cannot be created
    pub fn open_in_memory() -> Result<Self, ScoringError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, ScoringError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        for (table, ddl) in SCHEMA {
            debug!("ensuring table {table}");
            conn.execute_batch(ddl)?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn replace_in_tx(conn: &mut Connection, outcome: &CompetitionOutcome) -> Result<(), ScoringError> {
    let tx = conn.transaction()?;
    tx.execute(
        "DELETE FROM competition_result WHERE competition_id = ?1",
        params![outcome.competition_id],
    )?;
    tx.execute(
        "DELETE FROM team_result WHERE competition_id = ?1",
        params![outcome.competition_id],
    )?;
    tx.execute(
        "INSERT INTO competition (competition_id, tour_id, finalized_at) VALUES (?1, ?2, ?3)
         ON CONFLICT (competition_id) DO UPDATE
         SET tour_id = excluded.tour_id, finalized_at = excluded.finalized_at",
        params![
            outcome.competition_id,
            outcome.tour_id,
            chrono::Utc::now().to_rfc3339()
        ],
    )?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO competition_result
             (competition_id, player_id, scoring_type, position, points,
              gross_score, net_score, relative_to_par)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for r in &outcome.results {
            stmt.execute(params![
                r.competition_id,
                r.player_id,
                r.scoring_type.as_str(),
                r.position,
                r.points,
                r.gross_score,
                r.net_score,
                r.relative_to_par,
            ])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO team_result
             (competition_id, team_id, total_relative_score, total_shots, member_scores,
              position, points)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for t in &outcome.team_results {
            stmt.execute(params![
                t.competition_id,
                t.team_id,
                t.total_relative_score,
                t.total_shots,
                serde_json::to_string(&t.member_scores)?,
                t.position,
                t.points,
            ])?;
        }
    }

    tx.commit()?;
    Ok(())
}

type ResultRow = (i64, i64, String, u32, i32, i32, Option<i32>, i32);

fn read_result_row(row: &Row<'_>) -> rusqlite::Result<ResultRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn into_result(raw: ResultRow) -> Result<CompetitionResult, ScoringError> {
    let (
        competition_id,
        player_id,
        scoring_type,
        position,
        points,
        gross_score,
        net_score,
        relative_to_par,
    ) = raw;
    Ok(CompetitionResult {
        competition_id,
        player_id,
        scoring_type: scoring_type.parse()?,
        position,
        points,
        gross_score,
        net_score,
        relative_to_par,
    })
}

type TeamRow = (i64, i64, i32, i32, String, u32, i32);

fn read_team_row(row: &Row<'_>) -> rusqlite::Result<TeamRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn into_team(raw: TeamRow) -> Result<TeamRoundAggregate, ScoringError> {
    let (
        competition_id,
        team_id,
        total_relative_score,
        total_shots,
        member_scores,
        position,
        points,
    ) = raw;
    Ok(TeamRoundAggregate {
        team_id,
        competition_id,
        total_relative_score,
        total_shots,
        member_scores: serde_json::from_str(&member_scores)?,
        position,
        points,
    })
}

fn query_results(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<CompetitionResult>, ScoringError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, read_result_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(into_result).collect()
}

fn query_teams(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<TeamRoundAggregate>, ScoringError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, read_team_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(into_team).collect()
}

#[async_trait]
impl ResultStore for SqliteStore {
    async fn replace_competition_results(
        &self,
        outcome: &CompetitionOutcome,
    ) -> Result<(), ScoringError> {
        let mut conn = self.conn.lock().await;
        replace_in_tx(&mut conn, outcome)?;
        debug!(
            "stored {} result rows and {} team rows for competition {}",
            outcome.results.len(),
            outcome.team_results.len(),
            outcome.competition_id
        );
        Ok(())
    }

    async fn competition_results(
        &self,
        competition_id: i64,
        scoring_type: ScoringType,
    ) -> Result<Vec<CompetitionResult>, ScoringError> {
        let conn = self.conn.lock().await;
        query_results(
            &conn,
            &format!(
                "SELECT {RESULT_COLUMNS} FROM competition_result r
                 WHERE r.competition_id = ?1 AND r.scoring_type = ?2
                 ORDER BY r.position, r.player_id"
            ),
            params![competition_id, scoring_type.as_str()],
        )
    }

    async fn competition_team_results(
        &self,
        competition_id: i64,
    ) -> Result<Vec<TeamRoundAggregate>, ScoringError> {
        let conn = self.conn.lock().await;
        query_teams(
            &conn,
            &format!(
                "SELECT {TEAM_COLUMNS} FROM team_result t
                 WHERE t.competition_id = ?1
                 ORDER BY t.position, t.team_id"
            ),
            params![competition_id],
        )
    }

    async fn tour_results(&self, tour_id: i64) -> Result<Vec<CompetitionResult>, ScoringError> {
        let conn = self.conn.lock().await;
        query_results(
            &conn,
            &format!(
                "SELECT {RESULT_COLUMNS} FROM competition_result r
                 JOIN competition c ON c.competition_id = r.competition_id
                 WHERE c.tour_id = ?1
                 ORDER BY r.competition_id, r.scoring_type, r.position, r.player_id"
            ),
            params![tour_id],
        )
    }

    async fn tour_team_results(
        &self,
        tour_id: i64,
    ) -> Result<Vec<TeamRoundAggregate>, ScoringError> {
        let conn = self.conn.lock().await;
        query_teams(
            &conn,
            &format!(
                "SELECT {TEAM_COLUMNS} FROM team_result t
                 JOIN competition c ON c.competition_id = t.competition_id
                 WHERE c.tour_id = ?1
                 ORDER BY t.competition_id, t.position, t.team_id"
            ),
            params![tour_id],
        )
    }
}
