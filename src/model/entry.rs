use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// One hole on a scorecard.
///
/// On the wire a hole is a plain integer: `0` is unreported, `-1` is a
/// gave-up hole, and any positive number is the stroke count.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "i32", into = "i32")]
pub enum HoleScore {
    Unreported,
    GaveUp,
    Strokes(u32),
}

impl HoleScore {
    /// Stroke count when the hole was completed.
    #[must_use]
    pub fn strokes(self) -> Option<i32> {
        match self {
            HoleScore::Strokes(n) if n > 0 => Some(i32::try_from(n).unwrap_or(i32::MAX)),
            _ => None,
        }
    }

    /// Gave-up holes count as played, they just carry no strokes.
    #[must_use]
    pub fn is_played(self) -> bool {
        match self {
            HoleScore::Unreported => false,
            HoleScore::GaveUp => true,
            HoleScore::Strokes(n) => n > 0,
        }
    }
}

impl TryFrom<i32> for HoleScore {
    type Error = ScoringError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HoleScore::Unreported),
            -1 => Ok(HoleScore::GaveUp),
            n if n > 0 => Ok(HoleScore::Strokes(n.unsigned_abs())),
            n => Err(ScoringError::InvalidInput(format!(
                "hole value {n} is not -1, 0 or a positive stroke count"
            ))),
        }
    }
}

impl From<HoleScore> for i32 {
    fn from(value: HoleScore) -> Self {
        match value {
            HoleScore::Unreported => 0,
            HoleScore::GaveUp => -1,
            HoleScore::Strokes(n) => i32::try_from(n).unwrap_or(i32::MAX),
        }
    }
}

/// Whole-round score entered instead of a hole-by-hole card. Only `total`
/// feeds scoring; `out` and `in` are carried for display.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManualTotal {
    pub out: Option<i32>,
    #[serde(rename = "in")]
    pub in_: Option<i32>,
    pub total: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct RawEntry {
    /// Empty when no card has been started, otherwise exactly 18 holes.
    #[serde(default)]
    pub hole_scores: Vec<HoleScore>,
    #[serde(default)]
    pub manual_total: Option<ManualTotal>,
    /// Captured at first score entry and never refreshed afterwards.
    #[serde(default)]
    pub handicap_index: Option<f64>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_dq: bool,
}

impl RawEntry {
    /// # Errors
    ///
    /// Will return `Err` if a hole value is outside `{-1, 0}` and the positive integers
    pub fn from_holes(holes: &[i32]) -> Result<Self, ScoringError> {
        let hole_scores = holes
            .iter()
            .map(|&h| HoleScore::try_from(h))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            hole_scores,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn from_manual_total(total: i32) -> Self {
        Self {
            manual_total: Some(ManualTotal {
                out: None,
                in_: None,
                total,
            }),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_handicap(mut self, handicap_index: f64) -> Self {
        self.handicap_index = Some(handicap_index);
        self
    }

    #[must_use]
    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }
}

/// A player's slot in one competition, as supplied by the score-entry layer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Participant {
    pub participant_id: i64,
    pub player_id: i64,
    #[serde(default)]
    pub team_id: Option<i64>,
    pub entry: RawEntry,
}
