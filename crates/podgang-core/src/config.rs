//! Plugin configuration.
//!
//! The host hands plugin args over as raw JSON (`{"mode":"Least"}`); the
//! daemon also reads them from a TOML file:
//!
//! ```toml
//! [plugin]
//! mode = "Most"
//! ```
//!
//! The mode is checked once here. A bad value never reaches a scheduling
//! cycle.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// How candidate nodes are ranked by allocatable memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScoringMode {
    /// Nodes with less allocatable memory rank higher.
    #[default]
    Least,
    /// Nodes with more allocatable memory rank higher.
    Most,
}

impl ScoringMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoringMode::Least => "Least",
            ScoringMode::Most => "Most",
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "Least" => Ok(ScoringMode::Least),
            "Most" => Ok(ScoringMode::Most),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl Serialize for ScoringMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScoringMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Validated plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub mode: ScoringMode,
}

/// Layout of the daemon's TOML config file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    plugin: Option<RawArgs>,
}

impl PluginConfig {
    pub fn new(mode: ScoringMode) -> Self {
        Self { mode }
    }

    /// Build from the host's raw plugin args.
    ///
    /// `None` means the host passed no args, which selects the default mode.
    /// Args that are present must name a known mode.
    pub fn from_args(raw: Option<&[u8]>) -> ConfigResult<Self> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        let args: RawArgs = serde_json::from_slice(raw)?;
        let mode = args.mode.unwrap_or_default();
        Ok(Self { mode: mode.parse()? })
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let mode = match file.plugin.and_then(|p| p.mode) {
            Some(mode) => mode.parse()?,
            None => ScoringMode::default(),
        };
        Ok(Self { mode })
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Untyped args as the host framework delivers them.
#[derive(Debug, Deserialize)]
struct RawArgs {
    mode: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_selects_least() {
        let config = PluginConfig::from_args(None).unwrap();
        assert_eq!(config.mode, ScoringMode::Least);
    }

    #[test]
    fn json_args_select_mode() {
        let config = PluginConfig::from_args(Some(br#"{"mode":"Most"}"#)).unwrap();
        assert_eq!(config.mode, ScoringMode::Most);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let err = PluginConfig::from_args(Some(br#"{"mode":"Balanced"}"#)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMode(ref m) if m == "Balanced"));
    }

    #[test]
    fn args_without_mode_are_rejected() {
        // Present-but-empty args do not fall back to the default.
        let err = PluginConfig::from_args(Some(b"{}")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMode(ref m) if m.is_empty()));
    }

    #[test]
    fn malformed_args_are_rejected() {
        let err = PluginConfig::from_args(Some(b"mode=Most")).unwrap_err();
        assert!(matches!(err, ConfigError::Args(_)));
    }

    #[test]
    fn mode_names_are_case_sensitive() {
        assert!("least".parse::<ScoringMode>().is_err());
        assert_eq!("Least".parse::<ScoringMode>().unwrap(), ScoringMode::Least);
    }

    #[test]
    fn parse_toml() {
        let config = PluginConfig::from_toml_str(
            r#"
[plugin]
mode = "Most"
"#,
        )
        .unwrap();
        assert_eq!(config.mode, ScoringMode::Most);
    }

    #[test]
    fn toml_without_plugin_table_uses_default() {
        let config = PluginConfig::from_toml_str("").unwrap();
        assert_eq!(config.mode, ScoringMode::Least);
    }

    #[test]
    fn toml_with_bad_mode_fails() {
        let err = PluginConfig::from_toml_str("[plugin]\nmode = \"Random\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMode(ref m) if m == "Random"));
    }

    #[test]
    fn toml_plugin_table_without_mode_uses_default() {
        let config = PluginConfig::from_toml_str("[plugin]\n").unwrap();
        assert_eq!(config.mode, ScoringMode::Least);
    }

    #[test]
    fn toml_syntax_error_is_a_toml_error() {
        let err = PluginConfig::from_toml_str("[plugin\nmode = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
