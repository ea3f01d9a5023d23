use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::a001_sheet::ConvertOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub convert: ConvertOptions,
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Where the workbook is read from
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Every `*.csv` file in a directory is one sheet
    CsvDir { path: String },
    /// xlsx / xlsm / xlsb / xls / ods workbook
    SpreadsheetFile { path: String },
    GoogleSheets {
        spreadsheet_id: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default)]
        access_token: Option<String>,
        #[serde(default = "default_google_base_url")]
        base_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
}

fn default_google_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[convert]
enabled_column = 2

[source]
kind = "csv_dir"
path = "data"
"#;

/// Load configuration
///
/// Search order:
/// 1. Explicit path (first command line argument)
/// 2. config.toml next to the executable
/// 3. Embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return parse_config_file(path);
    }

    if let Some(exe_dir) = exe_dir() {
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            return parse_config_file(&config_path);
        } else {
            tracing::warn!("config.toml not found at: {}", config_path.display());
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

fn parse_config_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Resolve a configured path
///
/// Absolute paths are used as is. Relative paths are tried next to the
/// executable first, then relative to the current directory.
pub fn resolve_path(path_str: &str) -> PathBuf {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Some(exe_dir) = exe_dir() {
        let resolved = exe_dir.join(path);
        if resolved.exists() {
            return resolved;
        }
    }

    PathBuf::from(path_str)
}

fn exe_dir() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    exe_path.parent().map(Path::to_path_buf)
}
