use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScoringError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ScoringType {
    Gross,
    Net,
}

impl ScoringType {
    pub const ALL: [ScoringType; 2] = [ScoringType::Gross, ScoringType::Net];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScoringType::Gross => "gross",
            ScoringType::Net => "net",
        }
    }
}

impl fmt::Display for ScoringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScoringType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gross" => Ok(ScoringType::Gross),
            "net" => Ok(ScoringType::Net),
            other => Err(ScoringError::Parse(format!(
                "scoring type must be gross or net, got '{other}'"
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    HoleByHole,
    ManualTotal,
}

/// Canonical view of one participant's round.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedScore {
    pub source: ScoreSource,
    /// Holes with any entry, gave-up holes included.
    pub holes_played: u32,
    pub gross_total: i32,
    pub relative_to_par: i32,
    pub front_nine: Option<i32>,
    pub back_nine: Option<i32>,
    pub net_total: Option<i32>,
    pub net_relative_to_par: Option<i32>,
    pub eligible: bool,
}

impl ResolvedScore {
    /// Key used to order this score in the given view, lower is better.
    /// `None` means the score takes no part in that view.
    #[must_use]
    pub fn ranking_score(&self, scoring_type: ScoringType) -> Option<i32> {
        if !self.eligible {
            return None;
        }
        match scoring_type {
            ScoringType::Gross => Some(self.relative_to_par),
            ScoringType::Net => self.net_relative_to_par,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RankedEntry {
    pub participant_id: i64,
    pub scoring_type: ScoringType,
    pub ranking_score: i32,
    pub position: u32,
    pub score: ResolvedScore,
}

/// A persisted result row, one per player per scoring type per competition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CompetitionResult {
    pub competition_id: i64,
    pub player_id: i64,
    pub scoring_type: ScoringType,
    pub position: u32,
    pub points: i32,
    pub gross_score: i32,
    pub net_score: Option<i32>,
    pub relative_to_par: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LineScore {
    pub hole: i32,
    pub strokes: i32,
    pub par: i32,
    pub score_display: ScoreDisplay,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ScoreDisplay {
    Condor,
    Albatross,
    Eagle,
    Birdie,
    Par,
    Bogey,
    DoubleBogey,
    TripleBogey,
    QuadrupleBogeyOrWorse,
}

impl ScoreDisplay {
    /// Classify strokes relative to par (`strokes - par`).
    #[must_use]
    pub fn from_i32(diff: i32) -> Self {
        match diff {
            i32::MIN..=-4 => ScoreDisplay::Condor,
            -3 => ScoreDisplay::Albatross,
            -2 => ScoreDisplay::Eagle,
            -1 => ScoreDisplay::Birdie,
            0 => ScoreDisplay::Par,
            1 => ScoreDisplay::Bogey,
            2 => ScoreDisplay::DoubleBogey,
            3 => ScoreDisplay::TripleBogey,
            _ => ScoreDisplay::QuadrupleBogeyOrWorse,
        }
    }
}

impl From<i32> for ScoreDisplay {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}
