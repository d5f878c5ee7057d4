use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

pub const HOLES_PER_ROUND: usize = 18;
pub const HOLES_PER_NINE: usize = 9;

/// Par for each of the 18 holes of a course, in play order.
///
/// Construction validates the hole count and that every par is between 3
/// and 6. A profile is handed to the resolver by value and never re-read from
/// live course configuration once a competition is being finalized.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct CourseParProfile {
    pars: [i32; HOLES_PER_ROUND],
}

impl CourseParProfile {
    /// # Errors
    ///
    /// Will return `Err` if there are not exactly 18 pars or a par is outside 3..=6
    pub fn new(pars: &[i32]) -> Result<Self, ScoringError> {
        let pars: [i32; HOLES_PER_ROUND] = pars.try_into().map_err(|_| {
            ScoringError::InvalidInput(format!(
                "course needs {HOLES_PER_ROUND} pars, got {}",
                pars.len()
            ))
        })?;

        if let Some((idx, par)) = pars
            .iter()
            .enumerate()
            .find(|(_, par)| !(3..=6).contains(*par))
        {
            return Err(ScoringError::InvalidInput(format!(
                "par {par} on hole {} is outside 3..=6",
                idx + 1
            )));
        }

        Ok(Self { pars })
    }

    #[must_use]
    pub fn pars(&self) -> &[i32; HOLES_PER_ROUND] {
        &self.pars
    }

    /// Par of a hole by zero-based index.
    #[must_use]
    pub fn par(&self, hole_idx: usize) -> Option<i32> {
        self.pars.get(hole_idx).copied()
    }

    #[must_use]
    pub fn front9_total(&self) -> i32 {
        self.pars[..HOLES_PER_NINE].iter().sum()
    }

    #[must_use]
    pub fn back9_total(&self) -> i32 {
        self.pars[HOLES_PER_NINE..].iter().sum()
    }

    #[must_use]
    pub fn total(&self) -> i32 {
        self.pars.iter().sum()
    }
}

impl TryFrom<Vec<i32>> for CourseParProfile {
    type Error = ScoringError;

    fn try_from(value: Vec<i32>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CourseParProfile> for Vec<i32> {
    fn from(value: CourseParProfile) -> Self {
        value.pars.to_vec()
    }
}
