//! The view commands. Each one loads the revenue sheet named by the `Config` and runs one step
//! of the pipeline over it.

use crate::commands::Out;
use crate::model::{DateTotal, DatedAmount, RankedTeam, RevenueTable, Summary, TeamTotal};
use crate::pipeline::{self, Selection};
use crate::{loader, Config, Result};
use tracing::debug;

async fn load_table(config: &Config) -> Result<RevenueTable> {
    let path = config.data_path()?;
    debug!("Loading revenue data from {}", path.display());
    loader::load(path, &config.id_columns()).await
}

/// Record, team and date counts plus the grand total.
pub async fn summary(config: &Config) -> Result<Out<Summary>> {
    let table = load_table(config).await?;
    let summary = pipeline::summary(&table);
    Ok(Out::new(
        format!(
            "{} records for {} teams over {} dates, grand total {}",
            summary.records,
            summary.teams,
            summary.dates.len(),
            summary.grand_total
        ),
        summary,
    ))
}

/// The distinct team names in sheet order.
pub async fn teams(config: &Config) -> Result<Out<Vec<String>>> {
    let table = load_table(config).await?;
    let names = pipeline::team_names(&table);
    Ok(Out::new(format!("Found {} teams", names.len()), names))
}

/// The per-team totals, ordered by team name.
pub async fn totals(config: &Config) -> Result<Out<Vec<TeamTotal>>> {
    let table = load_table(config).await?;
    let totals = pipeline::team_totals(&table);
    Ok(Out::new(
        format!("Computed totals for {} teams", totals.len()),
        totals,
    ))
}

/// The teams ranked by total with their stars.
pub async fn rank(config: &Config) -> Result<Out<Vec<RankedTeam>>> {
    let table = load_table(config).await?;
    let ranked = pipeline::rank(&pipeline::team_totals(&table));
    let message = match ranked.first() {
        Some(top) => format!("Ranked {} teams, {} leads with {}", ranked.len(), top.team, top.total),
        None => String::from("There are no teams to rank"),
    };
    Ok(Out::new(message, ranked))
}

/// The long-format (team, date, amount) series.
pub async fn melt(config: &Config) -> Result<Out<Vec<DatedAmount>>> {
    let table = load_table(config).await?;
    let melted = pipeline::melt_to_dated_amounts(&table);
    Ok(Out::new(
        format!(
            "Melted {} records over {} dates into {} rows",
            table.len(),
            table.dates().count(),
            melted.len()
        ),
        melted,
    ))
}

/// The per-date totals across all teams.
pub async fn dates(config: &Config) -> Result<Out<Vec<DateTotal>>> {
    let table = load_table(config).await?;
    let totals = pipeline::date_totals(&table);
    Ok(Out::new(
        format!("Computed totals for {} dates", totals.len()),
        totals,
    ))
}

/// The sheet narrowed to `selection`.
pub async fn filter(config: &Config, selection: &Selection) -> Result<Out<RevenueTable>> {
    let table = load_table(config).await?;
    let filtered = pipeline::select(&table, selection);
    Ok(Out::new(
        format!("Selected {} of {} records", filtered.len(), table.len()),
        filtered,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorType;
    use crate::model::Amount;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_summary() {
        let env = TestEnv::new().await;
        let out = summary(&env.config()).await.unwrap();
        let s = out.structure().unwrap();
        assert_eq!(s.records, 4);
        assert_eq!(s.grand_total, Amount::from(3700));
        assert!(out.message().contains("grand total 3,700.00"));
    }

    #[tokio::test]
    async fn test_teams() {
        let env = TestEnv::new().await;
        let out = teams(&env.config()).await.unwrap();
        assert_eq!(
            out.structure().unwrap(),
            &vec!["Licensing", "Enforcement", "Inspection"]
        );
    }

    #[tokio::test]
    async fn test_totals() {
        let env = TestEnv::new().await;
        let out = totals(&env.config()).await.unwrap();
        assert_eq!(
            out.structure().unwrap(),
            &vec![
                TeamTotal::new("Enforcement", 1200),
                TeamTotal::new("Inspection", 1000),
                TeamTotal::new("Licensing", 1500),
            ]
        );
    }

    #[tokio::test]
    async fn test_rank() {
        let env = TestEnv::new().await;
        let out = rank(&env.config()).await.unwrap();
        let ranked = out.structure().unwrap();
        assert_eq!(ranked[0].team, "Licensing");
        assert_eq!(ranked[0].stars, 3);
        assert_eq!(out.message(), "Ranked 3 teams, Licensing leads with 1,500.00");
    }

    #[tokio::test]
    async fn test_melt() {
        let env = TestEnv::new().await;
        let out = melt(&env.config()).await.unwrap();
        assert_eq!(out.structure().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_dates() {
        let env = TestEnv::new().await;
        let out = dates(&env.config()).await.unwrap();
        let totals = out.structure().unwrap();
        assert_eq!(totals[0].date, "27/05/2024");
        assert_eq!(totals[0].total, Amount::from(1300));
        assert_eq!(totals[1].total, Amount::from(800));
        assert_eq!(totals[2].total, Amount::from(1600));
    }

    #[tokio::test]
    async fn test_filter() {
        let env = TestEnv::new().await;
        let out = filter(&env.config(), &Selection::teams(["Licensing"]))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().len(), 2);
        assert_eq!(out.message(), "Selected 2 of 4 records");
    }

    #[tokio::test]
    async fn test_missing_data_file() {
        let env = TestEnv::new().await;
        let config = env
            .config()
            .with_data_path(Some(env.root().join("missing.csv")));
        let err = totals(&config).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
    }

    #[tokio::test]
    async fn test_no_data_path() {
        let err = summary(&Config::default()).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
    }
}
