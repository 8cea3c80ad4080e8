use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Writes a config file at `config_path` that points at `data_path`.
///
/// # Arguments
/// - `config_path` - Where to write the config file, e.g. `~/.config/team-revenue/config.json`
/// - `data_path` - The revenue CSV. A relative path is interpreted relative to the directory of
///   the config file.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(config_path: &Path, data_path: &Path) -> Result<Out<()>> {
    let config = Config::create(config_path, data_path).await?;
    let data = config.data_path()?;
    Ok(format!(
        "Wrote {} using revenue data from {}",
        config_path.display(),
        data.display()
    )
    .into())
}
