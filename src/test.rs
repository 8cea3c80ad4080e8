//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::model::{IdColumns, RevenueTable};
use crate::{utils, Config};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Four records, three teams (Licensing appears twice), three date columns and one zero amount.
/// Every stored total matches its date columns; the grand total is 3700.
pub const SAMPLE_CSV: &str = "\
TEAMS,TOTAL,27/05/2024,28/05/2024,29/05/2024
Licensing,1000,400,0,600
Enforcement,1200,500,300,400
Licensing,500,100,200,200
Inspection,1000,300,300,400
";

/// `SAMPLE_CSV` as a parsed table.
pub fn sample_table() -> RevenueTable {
    RevenueTable::from_csv(SAMPLE_CSV.as_bytes(), &IdColumns::default()).unwrap()
}

/// Two teams, A with 300 and B with 500, over two dates.
pub fn example_table() -> RevenueTable {
    RevenueTable::parse(
        vec![
            vec!["TEAMS", "TOTAL", "2024-05-27", "2024-05-28"],
            vec!["A", "300", "100", "200"],
            vec!["B", "500", "250", "250"],
        ],
        &IdColumns::default(),
    )
    .unwrap()
}

/// Test environment with `SAMPLE_CSV` and a config file pointing at it written to a temporary
/// directory. Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
    data_path: PathBuf,
    config: Config,
}

impl TestEnv {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let data_path = temp_dir.path().join("revenue.csv");
        utils::write(&data_path, SAMPLE_CSV).await.unwrap();

        let config_path = temp_dir.path().join("config.json");
        let config = Config::create(&config_path, Path::new("revenue.csv"))
            .await
            .unwrap();

        Self {
            temp_dir,
            data_path,
            config,
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }
}
