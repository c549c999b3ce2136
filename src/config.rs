use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::timefmt::DisplayZone;

fn default_session_file() -> PathBuf {
    PathBuf::from("session.json")
}

fn default_demo_session() -> bool {
    true
}

/// Console configuration file (TOML). Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Offset in minutes east of UTC that absolute dates are shown in (default: 0)
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Where the signed-in administrator is persisted (default: session.json)
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
    /// Start with the demo administrator when no session file exists (default: true)
    #[serde(default = "default_demo_session")]
    pub demo_session: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            session_file: default_session_file(),
            demo_session: default_demo_session(),
        }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.display_zone()?;
        Ok(config)
    }

    /// Reads `path` when given; otherwise every default applies.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))
    }

    pub fn display_zone(&self) -> anyhow::Result<DisplayZone> {
        DisplayZone::from_minutes(self.utc_offset_minutes).with_context(|| {
            format!(
                "utc_offset_minutes must be within a day of UTC, got {}",
                self.utc_offset_minutes
            )
        })
    }
}
