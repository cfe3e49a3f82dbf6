/// Config file loading and creation for the breakroom CLI.
///
/// The config is a TOML file (default `./breakroom.toml`). Everything under
/// `[scheduler]` is optional; participants come from `[[participants]]`.
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use breakroom_core::SchedulerConfig;
use breakroom_core::impls::{AbsencePolicy, ParticipantProfile};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BreakroomConfig {
    /// Directory holding one JSON batch per round.
    #[serde(default = "default_history_dir")]
    pub history_dir: PathBuf,
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub skip_weekends: bool,
    /// Status markers that mean "away". Defaults to palm tree and thermometer.
    #[serde(default)]
    pub absence_markers: Option<Vec<String>>,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub participants: Vec<ParticipantProfile>,
}

fn default_history_dir() -> PathBuf {
    PathBuf::from("runs")
}

impl BreakroomConfig {
    pub fn absence_policy(&self) -> AbsencePolicy {
        match &self.absence_markers {
            Some(markers) => AbsencePolicy {
                absence_markers: markers.clone(),
                ..AbsencePolicy::default()
            },
            None => AbsencePolicy::default(),
        }
    }

    /// Resolve `history_dir` relative to the config file's directory.
    pub fn history_dir_from(&self, config_path: &Path) -> PathBuf {
        if self.history_dir.is_absolute() {
            return self.history_dir.clone();
        }
        config_path
            .parent()
            .map(|dir| dir.join(&self.history_dir))
            .unwrap_or_else(|| self.history_dir.clone())
    }
}

pub const DEFAULT_CONFIG_PATH: &str = "breakroom.toml";

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# breakroom configuration

# Directory with one JSON file per round (created on first run)
history_dir = \"runs\"

# Days on which no round is scheduled
# holidays = [\"2024-12-25\", \"2024-12-26\"]
# skip_weekends = true

# Status emoji that mark someone as away
# absence_markers = [\":palm_tree:\", \":face_with_thermometer:\"]

[scheduler]
# Days someone may go without a coffee break before they must be picked
lookback_days = 30
# \"half\" pairs roughly half the pool; or { fixed = { participants = 6 } }
quota = \"half\"
# Shuffles tried before giving up on avoiding last round's pairs
max_attempts = 1000
# Invitation language: \"en\" or \"de\"
language = \"en\"
# seed = 42

[[participants]]
id = \"U1\"
real_name = \"Ada Lovelace\"

[[participants]]
id = \"U2\"
real_name = \"Grace Hopper\"
# status_marker = \":palm_tree:\"
# status_expiration = 0
";

pub fn load_config(path: &Path) -> Result<BreakroomConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Failed to parse config at {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<BreakroomConfig> {
    Ok(toml::from_str(content)?)
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("Config file already exists at {}", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}
