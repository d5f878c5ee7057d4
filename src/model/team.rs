use serde::{Deserialize, Serialize};

/// One team's combined round in a competition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TeamRoundAggregate {
    pub team_id: i64,
    pub competition_id: i64,
    pub total_relative_score: i32,
    pub total_shots: i32,
    /// Eligible members' relative scores, ascending. Only used to break ties.
    pub member_scores: Vec<i32>,
    pub position: u32,
    pub points: i32,
}
