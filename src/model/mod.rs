//! Types that represent the revenue sheet and the views derived from it.
mod amount;
mod mapping;
mod record;
mod table;
mod views;

pub use amount::{Amount, AmountError};
pub use mapping::{Header, IdColumns, Mapping, MappingError, TEAMS, TOTAL};
pub use record::RevenueRecord;
pub use table::RevenueTable;
pub use views::{DateTotal, DatedAmount, RankedTeam, Summary, TeamTotal};
