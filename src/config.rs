//! Parses config file
use std::{
    env,
    fs::OpenOptions,
    io::Read,
    path::{Path, PathBuf},
};

use eyre::eyre;
use serde::Deserialize;
use serial::FormatVersion;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Name of the game release, like `de2` or `hd`.
    pub format_version: String,
    /// Default log filter. `RUST_LOG` still wins.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format_version: FormatVersion::LATEST.name().to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn format_version(&self) -> eyre::Result<FormatVersion> {
        Ok(self.format_version.parse()?)
    }
}

pub static CONFIG_FILE_NAME: &str = "config.toml";

/// Parse `config.toml` in the same folder as the binary
///
/// A missing file gives the default config.
pub fn parse_config() -> eyre::Result<Config> {
    let path = match env::current_exe() {
        Ok(path) => path
            .parent()
            .map(|parent| parent.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    parse_config_from_file(path.as_path())
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let mut file = OpenOptions::new().read(true).open(path.as_os_str())?;
    let mut buffer = String::new();

    file.read_to_string(&mut buffer)?;

    parse_config_from_str(&buffer)
}

pub fn parse_config_from_str(s: &str) -> eyre::Result<Config> {
    let config: Config = toml::from_str(s)?;

    if config.format_version().is_err() {
        return Err(eyre!("Unknown format version `{}`", config.format_version));
    }

    if config.log_level.parse::<log::LevelFilter>().is_err() {
        return Err(eyre!("Unknown log level `{}`", config.log_level));
    }

    Ok(config)
}
