use crate::model::RevenueTable;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Which teams a view should include.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Every team, i.e. the whole table.
    #[default]
    All,
    /// Only the named teams. An empty set selects nothing.
    Teams(BTreeSet<String>),
}

impl Selection {
    pub fn teams<S, I>(teams: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Selection::Teams(teams.into_iter().map(Into::into).collect())
    }
}

/// Keeps the records whose team is in `selected`, in their original order.
///
/// An empty `selected` yields an empty table. Names that match no record are ignored.
pub fn filter_by_teams(table: &RevenueTable, selected: &BTreeSet<String>) -> RevenueTable {
    let records = table
        .records()
        .iter()
        .filter(|r| selected.contains(r.team()))
        .cloned()
        .collect::<Vec<_>>();
    debug!(
        "Selected {} of {} records for {} team names",
        records.len(),
        table.len(),
        selected.len()
    );
    table.with_records(records)
}

/// Applies a `Selection` to the table.
pub fn select(table: &RevenueTable, selection: &Selection) -> RevenueTable {
    match selection {
        Selection::All => table.clone(),
        Selection::Teams(teams) => filter_by_teams(table, teams),
    }
}

/// The distinct team names in the order they first appear in the sheet.
pub fn team_names(table: &RevenueTable) -> Vec<String> {
    let mut seen = HashSet::new();
    table
        .records()
        .iter()
        .map(|r| r.team())
        .filter(|team| seen.insert(*team))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{example_table, sample_table};

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_example() {
        let table = example_table();
        let filtered = filter_by_teams(&table, &set(&["A"]));
        assert_eq!(filtered.records(), &table.records()[..1]);
        assert_eq!(filtered.mapping(), table.mapping());
    }

    #[test]
    fn test_empty_selection_is_empty_table() {
        let table = sample_table();
        let filtered = filter_by_teams(&table, &BTreeSet::new());
        assert!(filtered.is_empty());
        assert_eq!(filtered.dates().count(), 3);
    }

    #[test]
    fn test_unknown_teams_ignored() {
        let table = sample_table();
        let filtered = filter_by_teams(&table, &set(&["Nobody", "Inspection"]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].team(), "Inspection");
    }

    #[test]
    fn test_filter_correctness() {
        let table = sample_table();
        let selected = set(&["Licensing", "Inspection"]);
        let filtered = filter_by_teams(&table, &selected);
        assert!(filtered.records().iter().all(|r| selected.contains(r.team())));
        let expected: Vec<_> = table
            .records()
            .iter()
            .filter(|r| selected.contains(r.team()))
            .cloned()
            .collect();
        assert_eq!(filtered.records(), expected.as_slice());
        let teams: Vec<&str> = filtered.records().iter().map(|r| r.team()).collect();
        assert_eq!(teams, vec!["Licensing", "Licensing", "Inspection"]);
    }

    #[test]
    fn test_select_all() {
        let table = sample_table();
        assert_eq!(select(&table, &Selection::All), table);
    }

    #[test]
    fn test_select_teams() {
        let table = sample_table();
        let filtered = select(&table, &Selection::teams(["Enforcement"]));
        assert_eq!(filtered.len(), 1);
        let nothing = select(&table, &Selection::teams(Vec::<String>::new()));
        assert!(nothing.is_empty());
    }

    #[test]
    fn test_team_names() {
        assert_eq!(
            team_names(&sample_table()),
            vec!["Licensing", "Enforcement", "Inspection"]
        );
        assert!(team_names(&RevenueTable::default()).is_empty());
    }
}
