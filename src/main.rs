use log::info;
use rusty_golf_tour::args;
use rusty_golf_tour::controller::{finalize_competition, tour_standings, tour_team_standings};
use rusty_golf_tour::storage::{ResultStore, SqliteStore};
use std::collections::BTreeSet;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = args::args_checks()?;

    let store: Box<dyn ResultStore> = match &args.db_name {
        Some(db_name) => Box::new(SqliteStore::open(db_name)?),
        None => Box::new(SqliteStore::open_in_memory()?),
    };

    let mut tours = BTreeSet::new();
    for snapshot in &args.snapshots {
        let outcome = finalize_competition(store.as_ref(), snapshot, args.as_of).await?;
        tours.insert(outcome.tour_id);
    }
    info!("finalized {} competitions across {} tours", args.snapshots.len(), tours.len());

    for tour_id in tours {
        let standings = if args.teams {
            tour_team_standings(store.as_ref(), tour_id).await?
        } else {
            tour_standings(store.as_ref(), tour_id, args.scoring_type).await?
        };
        let report = serde_json::json!({
            "tour_id": tour_id,
            "scoring_type": if args.teams { None } else { Some(args.scoring_type) },
            "standings": standings,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
