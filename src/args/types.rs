use chrono::{DateTime, Utc};
use clap::Parser;

use crate::error::ScoringError;
use crate::model::{CompetitionSnapshot, ScoringType};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Competition snapshot json files to finalize, separated by semicolons.
    #[arg(
        short = 's',
        long,
        value_name = "SNAPSHOT_FILES",
        value_parser = crate::args::validation::check_readable_file
    )]
    pub snapshot: String,
    /// SQLite file holding finalized results. Results are kept in memory when omitted.
    #[arg(short = 'n', long, value_name = "DATABASE_NAME")]
    pub db_name: Option<String>,
    /// Standings view to print: gross or net
    #[arg(
        short = 't',
        long,
        value_name = "SCORING_TYPE",
        default_value = "gross",
        value_parser = clap::value_parser!(ScoringType)
    )]
    pub scoring_type: ScoringType,
    /// Instant (RFC 3339) open-window rounds are judged against. Defaults to now.
    #[arg(
        long,
        value_name = "AS_OF",
        value_parser = crate::args::validation::parse_as_of
    )]
    pub as_of: Option<DateTime<Utc>>,
    /// Print team standings instead of player standings.
    #[arg(long)]
    pub teams: bool,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub snapshots: Vec<CompetitionSnapshot>,
    pub db_name: Option<String>,
    pub scoring_type: ScoringType,
    pub as_of: DateTime<Utc>,
    pub teams: bool,
}

impl TryFrom<Args> for CleanArgs {
    type Error = ScoringError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        Ok(Self {
            snapshots: crate::args::validation::load_snapshots(&args.snapshot)?,
            db_name: args.db_name,
            scoring_type: args.scoring_type,
            as_of: args.as_of.unwrap_or_else(Utc::now),
            teams: args.teams,
        })
    }
}
