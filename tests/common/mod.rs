#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rusty_golf_tour::model::{
    CompetitionSnapshot, CourseParProfile, FieldSize, Participant, PointsRule, RawEntry, StartMode,
};

pub const FLAT_PARS: [i32; 18] = [4; 18];

pub fn flat_course() -> CourseParProfile {
    CourseParProfile::new(&FLAT_PARS).expect("flat course is valid")
}

pub fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 10, 18, 0, 0).unwrap()
}

/// A full card on the flat par-4 course finishing `relative` to par.
pub fn card(relative: i32) -> Vec<i32> {
    let mut holes = FLAT_PARS.to_vec();
    let step = if relative < 0 { -1 } else { 1 };
    for hole in holes.iter_mut().take(relative.unsigned_abs() as usize) {
        *hole += step;
    }
    holes
}

pub fn locked_card(relative: i32) -> RawEntry {
    RawEntry::from_holes(&card(relative)).unwrap().locked()
}

pub fn participant(participant_id: i64, team_id: Option<i64>, entry: RawEntry) -> Participant {
    Participant {
        participant_id,
        player_id: participant_id * 100,
        team_id,
        entry,
    }
}

pub fn snapshot(
    competition_id: i64,
    tour_id: i64,
    participants: Vec<Participant>,
) -> CompetitionSnapshot {
    CompetitionSnapshot {
        competition_id,
        tour_id,
        pars: Some(flat_course()),
        start_mode: StartMode::Scheduled,
        open_end: None,
        points_rule: PointsRule::default(),
        team_points_rule: None,
        field_size: FieldSize::Ranked,
        participants,
    }
}

/// Five locked players: one at -3, three level at even par, one at +2.
pub fn five_with_three_way_tie(competition_id: i64, tour_id: i64) -> CompetitionSnapshot {
    snapshot(
        competition_id,
        tour_id,
        vec![
            participant(1, None, locked_card(-3)),
            participant(2, None, locked_card(0)),
            participant(3, None, locked_card(0)),
            participant(4, None, locked_card(0)),
            participant(5, None, locked_card(2)),
        ],
    )
}
