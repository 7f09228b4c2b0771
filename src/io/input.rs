use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tcpb_session::SessionConfiguration;

/// Load the session settings. If the configuration file does not exist in the
/// directory, the default settings are used.
pub fn read_config(config_file_path: &Path) -> Result<SessionConfiguration> {
    let config_string: String = if config_file_path.exists() {
        fs::read_to_string(config_file_path).with_context(|| {
            format!(
                "Unable to read config file {}",
                config_file_path.display()
            )
        })?
    } else {
        String::new()
    };
    toml::from_str(&config_string)
        .with_context(|| format!("Invalid config file {}", config_file_path.display()))
}
