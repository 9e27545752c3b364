use std::path::Path;

use crate::error::Error;
use crate::types::{ReportFormat, ScanMode};

/// Name of the optional per-directory config file.
pub const CONFIG_FILE: &str = ".cyrscan.toml";

/// Suffix appended to the input stem when no output path is given.
const DEFAULT_SUFFIX: &str = "_en";

/// Defaults loaded from `.cyrscan.toml`. Command-line flags only ever switch
/// these on: `--all-line` forces whole-line mode and `--json` forces JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Report format used when `--json` is absent.
    pub format: ReportFormat,
    /// Scan mode used when `--all-line` is absent.
    pub mode: ScanMode,
    /// Output stem suffix, `_en` unless configured.
    pub suffix: String,
}

/// Raw TOML structure for `.cyrscan.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CyrscanTomlConfig {
    /// Default report format.
    #[serde(default)]
    format: ReportFormat,
    /// Default scan mode.
    #[serde(default)]
    mode: ScanMode,
    /// Output stem suffix.
    suffix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            format: ReportFormat::default(),
            mode: ScanMode::default(),
            suffix: DEFAULT_SUFFIX.to_string(),
        };
    }
}

impl Config {
    /// Load config from `.cyrscan.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist. A file that exists but is
    /// malformed is an error; it is never silently replaced by defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or names unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: CyrscanTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            format: raw.format,
            mode: raw.mode,
            suffix: raw.suffix.unwrap_or_else(|| return DEFAULT_SUFFIX.to_string()),
        });
    }
}
