use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where the base points for a position come from.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointsTable {
    /// 1st gets `field + 2`, 2nd gets `field`, then `field - (position - 1)`.
    #[default]
    Formula,
    Template {
        positions: BTreeMap<u32, i32>,
        /// Used for every position the template does not list.
        #[serde(default)]
        default: i32,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PointsRule {
    #[serde(default)]
    pub table: PointsTable,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Default for PointsRule {
    fn default() -> Self {
        Self {
            table: PointsTable::Formula,
            multiplier: default_multiplier(),
        }
    }
}

impl PointsRule {
    #[must_use]
    pub fn template(positions: impl IntoIterator<Item = (u32, i32)>, default: i32) -> Self {
        Self {
            table: PointsTable::Template {
                positions: positions.into_iter().collect(),
                default,
            },
            multiplier: default_multiplier(),
        }
    }

    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }
}

/// How the field size fed to the points formula is counted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldSize {
    /// Number of entries ranked in the view being scored.
    #[default]
    Ranked,
    /// Number of players enrolled in the competition, ranked or not.
    Enrolled(u32),
}

impl FieldSize {
    #[must_use]
    pub fn resolve(self, ranked: usize) -> i32 {
        match self {
            FieldSize::Ranked => i32::try_from(ranked).unwrap_or(i32::MAX),
            FieldSize::Enrolled(n) => i32::try_from(n).unwrap_or(i32::MAX),
        }
    }
}
