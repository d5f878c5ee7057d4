use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::course::CourseParProfile;
use crate::model::entry::Participant;
use crate::model::points::{FieldSize, PointsRule};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartMode {
    #[default]
    Scheduled,
    Open,
}

/// Decides whether a participant's round counts as final.
///
/// Scheduled competitions only count locked rounds. Open competitions also
/// count unlocked rounds once the open window has closed at `as_of`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundCompletion {
    start_mode: StartMode,
    open_end: Option<DateTime<Utc>>,
    as_of: DateTime<Utc>,
}

impl RoundCompletion {
    #[must_use]
    pub fn new(
        start_mode: StartMode,
        open_end: Option<DateTime<Utc>>,
        as_of: DateTime<Utc>,
    ) -> Self {
        Self {
            start_mode,
            open_end,
            as_of,
        }
    }

    /// Only locked rounds count.
    #[must_use]
    pub fn locked_only(as_of: DateTime<Utc>) -> Self {
        Self::new(StartMode::Scheduled, None, as_of)
    }

    #[must_use]
    pub fn open_window_closed(&self) -> bool {
        self.start_mode == StartMode::Open && self.open_end.is_some_and(|end| end <= self.as_of)
    }

    #[must_use]
    pub fn is_final(&self, is_locked: bool) -> bool {
        is_locked || self.open_window_closed()
    }
}

/// Everything needed to finalize one competition, captured at one instant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CompetitionSnapshot {
    pub competition_id: i64,
    pub tour_id: i64,
    /// Missing when the course could not be loaded; finalization refuses to run.
    #[serde(default)]
    pub pars: Option<CourseParProfile>,
    #[serde(default)]
    pub start_mode: StartMode,
    #[serde(default)]
    pub open_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub points_rule: PointsRule,
    #[serde(default)]
    pub team_points_rule: Option<PointsRule>,
    #[serde(default)]
    pub field_size: FieldSize,
    pub participants: Vec<Participant>,
}

impl CompetitionSnapshot {
    #[must_use]
    pub fn round_completion(&self, as_of: DateTime<Utc>) -> RoundCompletion {
        RoundCompletion::new(self.start_mode, self.open_end, as_of)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum StandingSubject {
    Player(i64),
    Team(i64),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompetitionPoints {
    pub competition_id: i64,
    pub points: i32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TourStanding {
    pub subject: StandingSubject,
    pub total_points: i32,
    pub competitions_played: u32,
    pub position: u32,
    pub points_by_competition: Vec<CompetitionPoints>,
}
