use crate::error::Res;
use crate::model::{Amount, Header, IdColumns, Mapping, RevenueRecord};
use anyhow::{bail, Context};
use serde::Serialize;

/// The loaded revenue sheet: the header mapping plus every data row in sheet order.
///
/// A `RevenueTable` is never modified after it is loaded. Views such as a team filter produce a
/// new table.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RevenueTable {
    mapping: Mapping,
    records: Vec<RevenueRecord>,
}

impl RevenueTable {
    /// Given the rows of a sheet, where the first row is the header, parse them into a
    /// `RevenueTable`. Rows with no non-blank cells are skipped.
    pub fn parse<S, R, I>(sheet_data: I, id_columns: &IdColumns) -> Res<Self>
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
        I: IntoIterator<Item = R>,
    {
        let mut rows = sheet_data.into_iter();
        let mapping = match rows.next() {
            Some(header_row) => Mapping::new(
                header_row.into_iter().map(|s| {
                    let s: String = s.into();
                    s.trim().to_string()
                }),
                id_columns,
            )?,
            None => bail!("An empty data set cannot be parsed into a RevenueTable"),
        };

        let mut records = Vec::new();
        for (row_ix, row) in rows.enumerate() {
            let values: Vec<String> = row.into_iter().map(Into::into).collect();
            if values.iter().all(|v| v.trim().is_empty()) {
                continue;
            }
            // +2 because the header is row 1
            records.push(RevenueRecord::new_with_sheet_headers(
                &mapping,
                &values,
                row_ix + 2,
            )?);
        }

        check_column_sums(&mapping, &records)?;
        Ok(Self { mapping, records })
    }

    /// Reads CSV data from `reader` and parses it into a `RevenueTable`.
    pub(crate) fn from_csv<R: std::io::Read>(reader: R, id_columns: &IdColumns) -> Res<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (ix, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("Unable to read CSV row {}", ix + 1))?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Self::parse(rows, id_columns)
    }

    /// Creates a table with the same columns as `self` but holding `records`.
    pub(crate) fn with_records(&self, records: Vec<RevenueRecord>) -> Self {
        Self {
            mapping: self.mapping.clone(),
            records,
        }
    }

    pub fn records(&self) -> &[RevenueRecord] {
        &self.records
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    /// The date column headers, in sheet order.
    pub fn dates(&self) -> impl Iterator<Item = &Header> + '_ {
        self.mapping.dates()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Converts the table back to sheet rows, header first, in the original column order.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let headers = self
            .mapping
            .headers()
            .iter()
            .map(|h| h.as_ref().to_string())
            .collect();
        let mut rows = vec![headers];
        rows.extend(self.records.iter().map(|r| r.to_row(&self.mapping)));
        rows
    }
}

/// Fails if the absolute values of any amount column add up past what `Amount` can hold. The sum
/// of absolute values bounds every partial sum of the column, so no grouping of a loaded table can
/// overflow.
fn check_column_sums(mapping: &Mapping, records: &[RevenueRecord]) -> Res<()> {
    let total_ix = mapping.total_index();
    let columns = std::iter::once((total_ix, None))
        .chain(mapping.date_indices().iter().enumerate().map(|(pos, &ix)| (ix, Some(pos))));
    for (ix, date_pos) in columns {
        let mut sum = Amount::ZERO;
        for record in records {
            let amount = match date_pos {
                Some(pos) => record.amounts()[pos].1,
                None => record.total(),
            };
            sum = sum.checked_add(amount.abs()).with_context(|| {
                format!(
                    "The values in column '{}' are too large to be summed",
                    mapping.headers()[ix]
                )
            })?;
        }
    }
    Ok(())
}
