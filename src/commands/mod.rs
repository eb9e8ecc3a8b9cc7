pub mod deploy;
pub mod init;

use anyhow::{Context, Result};
use setup_dotenv::config::{SetupConfig, CONFIG_FILE};
use std::path::Path;

/// Load the config named by `--config`, or `./setup-dotenv.toml` if present.
pub fn load_config(explicit: Option<&Path>) -> Result<SetupConfig> {
    load_config_in(explicit, Path::new("."))
}

/// Same as [`load_config`], looking for the default file in `dir`.
fn load_config_in(explicit: Option<&Path>, dir: &Path) -> Result<SetupConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            SetupConfig::load_from(path)
                .with_context(|| format!("Failed to load {}", path.display()))
        }
        None => SetupConfig::load_in(dir)
            .with_context(|| format!("Failed to load {}", CONFIG_FILE)),
    }
}
