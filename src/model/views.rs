//! Value types produced by the aggregation, ranking and filtering functions. None of them refer
//! back to the table they were computed from.

use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// The sum of the stored totals of every record belonging to one team.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamTotal {
    pub team: String,
    pub total: Amount,
}

impl TeamTotal {
    pub fn new(team: impl Into<String>, total: impl Into<Amount>) -> Self {
        Self {
            team: team.into(),
            total: total.into(),
        }
    }
}

/// A team's position in the ranking. `rank` 1 is the highest total and `stars` counts down from
/// the number of teams to 1.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankedTeam {
    pub team: String,
    pub total: Amount,
    pub rank: u32,
    pub stars: u32,
}

impl RankedTeam {
    /// Renders the star count, e.g. `***` for three stars.
    pub fn star_string(&self) -> String {
        "*".repeat(self.stars as usize)
    }
}

/// One cell of the melted (long-format) sheet.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DatedAmount {
    pub team: String,
    pub date: String,
    pub amount: Amount,
}

/// The sum of one date column over every record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DateTotal {
    pub date: String,
    pub total: Amount,
}

/// Headline figures for a sheet.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub records: usize,
    pub teams: usize,
    pub dates: Vec<String>,
    pub grand_total: Amount,
}
