//! Rendering of views for the terminal: JSON, a Markdown table, or CSV.

use crate::error::Res;
use crate::model::{Amount, DateTotal, DatedAmount, RankedTeam, RevenueTable, Summary, TeamTotal};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// The format in which command output is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// A Markdown table with amounts formatted for reading.
    #[default]
    Table,
    /// CSV with plain decimal amounts.
    Csv,
}

serde_plain::derive_display_from_serialize!(OutputFormat);
serde_plain::derive_fromstr_from_deserialize!(OutputFormat);

/// A view that can be laid out as rows and columns.
pub trait Tabular {
    fn headers(&self) -> Vec<String>;

    /// The data rows. `pretty` asks for amounts with thousands separators.
    fn rows(&self, pretty: bool) -> Vec<Vec<String>>;
}

/// Renders `value` in the requested `format`.
pub fn render<T>(value: &T, format: OutputFormat) -> Res<String>
where
    T: Serialize + Tabular,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Unable to serialize output to JSON")
        }
        OutputFormat::Table => Ok(markdown_table(&value.headers(), &value.rows(true))),
        OutputFormat::Csv => csv_text(&value.headers(), &value.rows(false)),
    }
}

fn markdown_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(3)).collect();
    for row in rows {
        for (ix, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(ix) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        format!("| {} |", padded.join(" | "))
    };

    let mut out = String::new();
    out.push_str(&line(headers));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&format!("|-{}-|\n", rule.join("-|-")));
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn csv_text(headers: &[String], rows: &[Vec<String>]) -> Res<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(headers)
        .context("Unable to write CSV headers")?;
    for row in rows {
        wtr.write_record(row).context("Unable to write CSV row")?;
    }
    let bytes = wtr.into_inner().context("Unable to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

fn amount(a: Amount, pretty: bool) -> String {
    if pretty {
        a.to_string()
    } else {
        a.value().normalize().to_string()
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Tabular for Vec<TeamTotal> {
    fn headers(&self) -> Vec<String> {
        headers(&["team", "total"])
    }

    fn rows(&self, pretty: bool) -> Vec<Vec<String>> {
        self.iter()
            .map(|t| vec![t.team.clone(), amount(t.total, pretty)])
            .collect()
    }
}

impl Tabular for Vec<RankedTeam> {
    fn headers(&self) -> Vec<String> {
        headers(&["rank", "team", "total", "stars"])
    }

    fn rows(&self, pretty: bool) -> Vec<Vec<String>> {
        self.iter()
            .map(|r| {
                let stars = if pretty {
                    r.star_string()
                } else {
                    r.stars.to_string()
                };
                vec![
                    r.rank.to_string(),
                    r.team.clone(),
                    amount(r.total, pretty),
                    stars,
                ]
            })
            .collect()
    }
}

impl Tabular for Vec<DatedAmount> {
    fn headers(&self) -> Vec<String> {
        headers(&["team", "date", "amount"])
    }

    fn rows(&self, pretty: bool) -> Vec<Vec<String>> {
        self.iter()
            .map(|d| vec![d.team.clone(), d.date.clone(), amount(d.amount, pretty)])
            .collect()
    }
}

impl Tabular for Vec<DateTotal> {
    fn headers(&self) -> Vec<String> {
        headers(&["date", "total"])
    }

    fn rows(&self, pretty: bool) -> Vec<Vec<String>> {
        self.iter()
            .map(|d| vec![d.date.clone(), amount(d.total, pretty)])
            .collect()
    }
}

impl Tabular for Vec<String> {
    fn headers(&self) -> Vec<String> {
        headers(&["team"])
    }

    fn rows(&self, _pretty: bool) -> Vec<Vec<String>> {
        self.iter().map(|t| vec![t.clone()]).collect()
    }
}

impl Tabular for Summary {
    fn headers(&self) -> Vec<String> {
        headers(&["records", "teams", "dates", "grand_total"])
    }

    fn rows(&self, pretty: bool) -> Vec<Vec<String>> {
        vec![vec![
            self.records.to_string(),
            self.teams.to_string(),
            self.dates.len().to_string(),
            amount(self.grand_total, pretty),
        ]]
    }
}

impl Tabular for RevenueTable {
    fn headers(&self) -> Vec<String> {
        self.mapping()
            .headers()
            .iter()
            .map(|h| h.as_ref().to_string())
            .collect()
    }

    fn rows(&self, pretty: bool) -> Vec<Vec<String>> {
        let rows = self.to_rows().into_iter().skip(1);
        if !pretty {
            return rows.collect();
        }
        let team = self.mapping().team_index();
        rows.map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(ix, cell)| match cell.parse::<Amount>() {
                    Ok(a) if ix != team => a.to_string(),
                    _ => cell,
                })
                .collect()
        })
        .collect()
    }
}
