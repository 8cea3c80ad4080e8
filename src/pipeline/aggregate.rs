use crate::model::{Amount, DateTotal, DatedAmount, RevenueTable, Summary, TeamTotal};
use std::collections::BTreeMap;
use tracing::trace;

/// Groups records by exact team name and sums their stored totals.
///
/// The result is ordered by team name. Use `rank` for ordering by total.
pub fn team_totals(table: &RevenueTable) -> Vec<TeamTotal> {
    let mut sums: BTreeMap<&str, Amount> = BTreeMap::new();
    for record in table.records() {
        let sum = sums.entry(record.team()).or_default();
        *sum = *sum + record.total();
    }
    trace!("Grouped {} records into {} teams", table.len(), sums.len());
    sums.into_iter()
        .map(|(team, total)| TeamTotal::new(team, total))
        .collect()
}

/// Reshapes the sheet into one `DatedAmount` per (record, date column), records in table order
/// and dates in column order. Zero amounts are kept.
pub fn melt_to_dated_amounts(table: &RevenueTable) -> Vec<DatedAmount> {
    table
        .records()
        .iter()
        .flat_map(|record| {
            record.amounts().iter().map(|(date, amount)| DatedAmount {
                team: record.team().to_string(),
                date: date.as_ref().to_string(),
                amount: *amount,
            })
        })
        .collect()
}

/// The sum of every record's stored total.
pub fn grand_total(table: &RevenueTable) -> Amount {
    table.records().iter().map(|r| r.total()).sum()
}

/// Sums each date column over all records, in column order.
pub fn date_totals(table: &RevenueTable) -> Vec<DateTotal> {
    table
        .dates()
        .enumerate()
        .map(|(ix, date)| DateTotal {
            date: date.as_ref().to_string(),
            total: table.records().iter().map(|r| r.amounts()[ix].1).sum(),
        })
        .collect()
}

pub fn summary(table: &RevenueTable) -> Summary {
    Summary {
        records: table.len(),
        teams: team_totals(table).len(),
        dates: table.dates().map(|d| d.as_ref().to_string()).collect(),
        grand_total: grand_total(table),
    }
}
