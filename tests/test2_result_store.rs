mod common;

use common::{as_of, five_with_three_way_tie, locked_card, participant, snapshot};
use rusty_golf_tour::controller::{finalize_competition, tour_standings, tour_team_standings};
use rusty_golf_tour::model::{ScoringType, StandingSubject};
use rusty_golf_tour::storage::{MemoryStore, ResultStore, SqliteStore};

fn stores() -> Vec<(&'static str, Box<dyn ResultStore>)> {
    vec![
        ("memory", Box::new(MemoryStore::new())),
        (
            "sqlite",
            Box::new(SqliteStore::open_in_memory().expect("in-memory sqlite opens")),
        ),
    ]
}

#[tokio::test]
async fn finalizing_twice_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    for (name, store) in stores() {
        let snap = five_with_three_way_tie(1, 1);
        finalize_competition(store.as_ref(), &snap, as_of()).await?;
        let first = store.competition_results(1, ScoringType::Gross).await?;
        let first_standings = tour_standings(store.as_ref(), 1, ScoringType::Gross).await?;

        finalize_competition(store.as_ref(), &snap, as_of()).await?;
        let second = store.competition_results(1, ScoringType::Gross).await?;
        let second_standings = tour_standings(store.as_ref(), 1, ScoringType::Gross).await?;

        assert_eq!(first.len(), 5, "{name}");
        assert_eq!(first, second, "{name}");
        assert_eq!(store.tour_results(1).await?.len(), 5, "{name}");
        assert_eq!(first_standings, second_standings, "{name}");
        assert_eq!(second_standings[0].total_points, 7, "{name}");
    }
    Ok(())
}

#[tokio::test]
async fn refinalizing_replaces_stale_rows() -> Result<(), Box<dyn std::error::Error>> {
    for (name, store) in stores() {
        let first = snapshot(
            3,
            1,
            vec![
                participant(1, Some(10), locked_card(0)),
                participant(2, Some(20), locked_card(1)),
                participant(3, Some(20), locked_card(2)),
            ],
        );
        finalize_competition(store.as_ref(), &first, as_of()).await?;
        assert_eq!(store.competition_team_results(3).await?.len(), 2, "{name}");

        // player 3 withdrew and player 1 improved; no team entries any more
        let second = snapshot(
            3,
            1,
            vec![
                participant(1, None, locked_card(-4)),
                participant(2, None, locked_card(1)),
            ],
        );
        finalize_competition(store.as_ref(), &second, as_of()).await?;

        let rows = store.competition_results(3, ScoringType::Gross).await?;
        let summary: Vec<(i64, u32, i32)> = rows
            .iter()
            .map(|r| (r.player_id, r.position, r.relative_to_par))
            .collect();
        assert_eq!(summary, vec![(100, 1, -4), (200, 2, 1)], "{name}");
        assert!(store.competition_team_results(3).await?.is_empty(), "{name}");
        assert!(store.tour_team_results(1).await?.is_empty(), "{name}");
    }
    Ok(())
}

#[tokio::test]
async fn standings_sum_across_the_tour() -> Result<(), Box<dyn std::error::Error>> {
    for (name, store) in stores() {
        let round_one = snapshot(
            11,
            5,
            vec![
                participant(1, Some(1), locked_card(-1).with_handicap(4.0)),
                participant(2, Some(1), locked_card(2).with_handicap(12.0)),
                participant(3, Some(2), locked_card(0)),
            ],
        );
        let round_two = snapshot(
            12,
            5,
            vec![
                participant(2, Some(1), locked_card(-3).with_handicap(12.0)),
                participant(3, Some(2), locked_card(1)),
            ],
        );
        let other_tour = five_with_three_way_tie(99, 6);

        finalize_competition(store.as_ref(), &round_one, as_of()).await?;
        finalize_competition(store.as_ref(), &round_two, as_of()).await?;
        finalize_competition(store.as_ref(), &other_tour, as_of()).await?;

        let gross = tour_standings(store.as_ref(), 5, ScoringType::Gross).await?;
        let summary: Vec<(StandingSubject, i32, u32, u32)> = gross
            .iter()
            .map(|s| (s.subject, s.total_points, s.competitions_played, s.position))
            .collect();
        // round one (field 3): 100 -> 5, 300 -> 3, 200 -> 1
        // round two (field 2): 200 -> 4, 300 -> 2
        assert_eq!(
            summary,
            vec![
                (StandingSubject::Player(100), 5, 1, 1),
                (StandingSubject::Player(200), 5, 2, 1),
                (StandingSubject::Player(300), 5, 2, 1),
            ],
            "{name}"
        );

        // net: round one 100 (-5) and 200 (-10), round two 200 alone
        let net = tour_standings(store.as_ref(), 5, ScoringType::Net).await?;
        assert_eq!(net[0].subject, StandingSubject::Player(200), "{name}");
        assert_eq!(net[0].total_points, 4 + 3, "{name}");
        assert_eq!(net[1].total_points, 2, "{name}");
        assert_eq!(net.len(), 2, "{name}");

        let teams = tour_team_standings(store.as_ref(), 5).await?;
        assert_eq!(teams.len(), 2, "{name}");
        assert!(teams.iter().all(|t| t.competitions_played == 2), "{name}");
    }
    Ok(())
}

#[tokio::test]
async fn repeated_player_is_stored_once_by_every_store() -> Result<(), Box<dyn std::error::Error>> {
    for (name, store) in stores() {
        let mut twice = participant(2, None, locked_card(-3));
        twice.player_id = 100;
        let snap = snapshot(
            21,
            3,
            vec![
                participant(1, None, locked_card(1)),
                twice,
                participant(3, None, locked_card(2)),
            ],
        );
        let outcome = finalize_competition(store.as_ref(), &snap, as_of()).await?;
        assert_eq!(outcome.rejected.len(), 1, "{name}");
        assert_eq!(outcome.rejected[0].participant_id, 2, "{name}");

        let rows = store.competition_results(21, ScoringType::Gross).await?;
        let summary: Vec<(i64, u32, i32)> = rows
            .iter()
            .map(|r| (r.player_id, r.position, r.points))
            .collect();
        assert_eq!(summary, vec![(100, 1, 4), (300, 2, 2)], "{name}");

        let standings = tour_standings(store.as_ref(), 3, ScoringType::Gross).await?;
        assert_eq!(standings[0].subject, StandingSubject::Player(100), "{name}");
        assert_eq!(standings[0].total_points, 4, "{name}");
    }
    Ok(())
}

#[tokio::test]
async fn empty_tour_has_no_standings() -> Result<(), Box<dyn std::error::Error>> {
    for (name, store) in stores() {
        assert!(tour_standings(store.as_ref(), 42, ScoringType::Gross).await?.is_empty(), "{name}");
        assert!(tour_team_standings(store.as_ref(), 42).await?.is_empty(), "{name}");
    }
    Ok(())
}

#[tokio::test]
async fn sqlite_file_keeps_results_between_opens() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join(format!(
        "rusty_golf_tour_{}_{}.db",
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));

    {
        let store = SqliteStore::open(&path)?;
        finalize_competition(&store, &five_with_three_way_tie(1, 1), as_of()).await?;
    }

    let reopened = SqliteStore::open(&path)?;
    let standings = tour_standings(&reopened, 1, ScoringType::Gross).await?;
    assert_eq!(standings.len(), 5);
    assert_eq!(standings[4].position, 5);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
    Ok(())
}
