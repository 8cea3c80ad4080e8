use crate::error::Res;
use crate::model::{Amount, Header, Mapping};
use anyhow::{bail, Context};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::str::FromStr;

/// Represents a single row of the revenue sheet.
///
/// `total` is the figure stored in the sheet. It is not checked against the sum of `amounts`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RevenueRecord {
    team: String,
    total: Amount,
    #[serde(serialize_with = "serialize_amounts")]
    amounts: Vec<(Header, Amount)>,
}

impl RevenueRecord {
    pub fn new<H, I>(team: impl Into<String>, total: Amount, amounts: I) -> Self
    where
        H: Into<Header>,
        I: IntoIterator<Item = (H, Amount)>,
    {
        Self {
            team: team.into(),
            total,
            amounts: amounts.into_iter().map(|(h, a)| (h.into(), a)).collect(),
        }
    }

    /// Builds a record from the cells of a sheet row. `row` is the 1-based line number used in
    /// error messages.
    pub(crate) fn new_with_sheet_headers<S>(
        mapping: &Mapping,
        values: &[S],
        row: usize,
    ) -> Res<Self>
    where
        S: AsRef<str>,
    {
        if values.len() > mapping.len() {
            bail!("A row longer than the headers list was encountered at row {row}");
        }
        let cell = |ix: usize| values.get(ix).map(|s| s.as_ref().trim()).unwrap_or_default();

        let team = cell(mapping.team_index());
        if team.is_empty() {
            bail!("The team name is empty at row {row}");
        }

        let total_ix = mapping.total_index();
        let total = parse_cell(cell(total_ix), &mapping.headers()[total_ix], row)?;

        let amounts = mapping
            .date_indices()
            .iter()
            .map(|&ix| {
                let header = &mapping.headers()[ix];
                Ok((header.clone(), parse_cell(cell(ix), header, row)?))
            })
            .collect::<Res<Vec<_>>>()?;

        Ok(Self {
            team: team.to_string(),
            total,
            amounts,
        })
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// The per-date amounts in sheet column order.
    pub fn amounts(&self) -> &[(Header, Amount)] {
        &self.amounts
    }

    pub fn amount(&self, date: &str) -> Option<Amount> {
        self.amounts
            .iter()
            .find(|(h, _)| h.as_ref() == date)
            .map(|(_, a)| *a)
    }

    /// Converts the record back to sheet cells in the column order of `mapping`.
    pub(crate) fn to_row(&self, mapping: &Mapping) -> Vec<String> {
        let mut row = vec![String::new(); mapping.len()];
        row[mapping.team_index()] = self.team.clone();
        row[mapping.total_index()] = plain(self.total);
        for (&ix, (_, amount)) in mapping.date_indices().iter().zip(&self.amounts) {
            row[ix] = plain(*amount);
        }
        row
    }
}

fn parse_cell(value: &str, header: &Header, row: usize) -> Res<Amount> {
    Amount::from_str(value).with_context(|| format!("Bad value in column '{header}' at row {row}"))
}

fn plain(amount: Amount) -> String {
    amount.value().normalize().to_string()
}

fn serialize_amounts<S>(amounts: &[(Header, Amount)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(amounts.len()))?;
    for (header, amount) in amounts {
        map.serialize_entry(header.as_ref(), amount)?;
    }
    map.end()
}
