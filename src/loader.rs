//! Loads a revenue sheet from a CSV file.

use crate::error::{ErrorType, IntoResult};
use crate::model::{IdColumns, RevenueTable};
use crate::{utils, Result};
use anyhow::Context;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Reads the CSV file at `path` into a `RevenueTable`.
///
/// # Errors
/// Returns an error of type `ErrorType::Load` if the file is missing or unreadable, is not valid
/// CSV, lacks the team or total column, or has a cell that cannot be parsed.
pub async fn load(path: &Path, id_columns: &IdColumns) -> Result<RevenueTable> {
    let bytes = utils::read_bytes(path).await.pub_result(ErrorType::Load)?;
    let table = RevenueTable::from_csv(bytes.as_slice(), id_columns)
        .with_context(|| format!("Unable to load revenue data from {}", path.display()))
        .pub_result(ErrorType::Load)?;
    debug!(
        "Loaded {} records with {} date columns from {}",
        table.len(),
        table.dates().count(),
        path.display()
    );
    Ok(table)
}

/// Reads CSV data from any reader into a `RevenueTable`.
pub fn load_from_reader<R: Read>(reader: R, id_columns: &IdColumns) -> Result<RevenueTable> {
    RevenueTable::from_csv(reader, id_columns).pub_result(ErrorType::Load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::test::{TestEnv, SAMPLE_CSV};

    #[tokio::test]
    async fn test_load() {
        let env = TestEnv::new().await;
        let table = load(env.data_path(), &IdColumns::default()).await.unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.records()[1].team(), "Enforcement");
        assert_eq!(table.records()[1].amount("28/05/2024"), Some(Amount::from(300)));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let env = TestEnv::new().await;
        let missing = env.root().join("nope.csv");
        let err = load(&missing, &IdColumns::default()).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
        assert!(err.to_string().contains("nope.csv"));
    }

    #[tokio::test]
    async fn test_load_missing_total_column() {
        let env = TestEnv::new().await;
        let path = env.root().join("bad.csv");
        utils::write(&path, "TEAMS,27/05/2024\nA,1\n").await.unwrap();
        let err = load(&path, &IdColumns::default()).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
        assert!(err.to_string().contains("The required column 'TOTAL' is missing"));
    }

    #[tokio::test]
    async fn test_load_empty_file() {
        let env = TestEnv::new().await;
        let path = env.root().join("empty.csv");
        utils::write(&path, "").await.unwrap();
        let err = load(&path, &IdColumns::default()).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
    }

    #[test]
    fn test_load_from_reader() {
        let table = load_from_reader(SAMPLE_CSV.as_bytes(), &IdColumns::default()).unwrap();
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_load_from_reader_bad_number() {
        let err = load_from_reader("TEAMS,TOTAL\nA,lots\n".as_bytes(), &IdColumns::default())
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
    }

    #[test]
    fn test_load_from_reader_rejects_unsummable_totals() {
        let data = "TEAMS,TOTAL\nA,79228162514264337593543950335\nA,1\n";
        let err = load_from_reader(data.as_bytes(), &IdColumns::default()).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
        assert!(err.to_string().contains("too large to be summed"));
    }

    #[test]
    fn test_load_from_reader_double_sign() {
        let err = load_from_reader("TEAMS,TOTAL\nA,--5\n".as_bytes(), &IdColumns::default())
            .unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Load);
        assert!(err.to_string().contains("Bad value in column 'TOTAL' at row 2"));
    }
}
