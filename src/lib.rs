//! Scoring, ranking and points engine for multi-round golf tours.
//!
//! Raw scorecards go through [`score::resolve`], are ranked per competition
//! with [`score::rank`], converted to points with [`score::allocate`], summed
//! per team with [`score::aggregate_teams`], and finally rolled up across a
//! tour with [`score::build_standings`]. [`controller`] wires those steps to a
//! [`storage::ResultStore`].

pub mod args;
pub mod controller;
pub mod error;
pub mod model;
pub mod score;
pub mod storage;

pub use error::ScoringError;
