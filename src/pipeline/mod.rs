//! The revenue pipeline: pure functions from a loaded `RevenueTable` to the views the dashboard
//! draws. Nothing here mutates its input or touches the filesystem.

mod aggregate;
mod filter;
mod rank;

pub use aggregate::{date_totals, grand_total, melt_to_dated_amounts, summary, team_totals};
pub use filter::{filter_by_teams, select, team_names, Selection};
pub use rank::rank;
