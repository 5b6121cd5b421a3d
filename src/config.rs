use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Mutex,
};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{DEFAULT_RINK, FLEX_LOCKER};

const DEFAULT_FEED_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSBHs9gkUWmf9ANIWJn6B9JBIRlMbe-IJ0hH_gOIUZxzprhYRk0swY8zd_r83BebKl9Q6Qj7I4m1z5-/pub?output=csv";
const DEFAULT_TIMEZONE: &str = "America/New_York";
const DEFAULT_REFRESH_SECS: u64 = 60;
const DEFAULT_AGENDA_DAYS: i64 = 5;
/// Longest print-view window a config may ask for.
pub const MAX_AGENDA_DAYS: i64 = 366;
const DEFAULT_LOCKER_IDS: [&str; 7] = ["1", "2", "3", "4", "5", "6", FLEX_LOCKER];
const DEFAULT_GENERIC_KEYWORDS: [&str; 4] = ["skate", "lesson", "practice", "public"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown time zone {0:?}: {1}")]
    TimeZone(String, String),
    #[error("unknown feed format {0:?}")]
    FeedFormat(String),
    #[error("agenda_days must be between 0 and {max}, got {0}", max = MAX_AGENDA_DAYS)]
    AgendaDays(i64),
    #[error("config io error: {0}")]
    Io(String),
    #[error("config parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    #[default]
    Csv,
    /// Google Visualization JSON wrapped in a `setResponse(...)` callback.
    Gviz,
}

impl FromStr for FeedFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "csv" => Ok(FeedFormat::Csv),
            "gviz" | "json" => Ok(FeedFormat::Gviz),
            other => Err(ConfigError::FeedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardConfig {
    pub feed_url: String,
    pub feed_format: FeedFormat,
    /// IANA zone used for "today" and every displayed time.
    pub facility_timezone: String,
    pub default_rink: char,
    /// Locker ids the board knows how to show; anything else is dropped.
    pub locker_ids: Vec<String>,
    /// Titles containing one of these are sessions, not teams, and never
    /// label a locker.
    pub generic_keywords: Vec<String>,
    pub refresh_every_secs: u64,
    pub agenda_days: i64,
    /// Re-read `&&` multi-game bookings when the locker list yields nothing.
    pub legacy_locker_fallback: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_format: FeedFormat::Csv,
            facility_timezone: DEFAULT_TIMEZONE.to_string(),
            default_rink: DEFAULT_RINK,
            locker_ids: DEFAULT_LOCKER_IDS.iter().map(|id| id.to_string()).collect(),
            generic_keywords: DEFAULT_GENERIC_KEYWORDS
                .iter()
                .map(|keyword| keyword.to_string())
                .collect(),
            refresh_every_secs: DEFAULT_REFRESH_SECS,
            agenda_days: DEFAULT_AGENDA_DAYS,
            legacy_locker_fallback: true,
        }
    }
}

impl BoardConfig {
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.facility_timezone
            .parse::<Tz>()
            .map_err(|err| ConfigError::TimeZone(self.facility_timezone.clone(), err.to_string()))
    }

    /// Checks the fields the board cannot run without: a resolvable zone and
    /// an agenda window that fits the calendar.
    pub fn validate(&self) -> Result<Tz, ConfigError> {
        if !(0..=MAX_AGENDA_DAYS).contains(&self.agenda_days) {
            return Err(ConfigError::AgendaDays(self.agenda_days));
        }
        self.timezone()
    }

    pub fn is_known_locker(&self, id: &str) -> bool {
        self.locker_ids
            .iter()
            .any(|known| known.trim().eq_ignore_ascii_case(id))
    }

    /// Applies `RINK_BOARD_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var("RINK_BOARD_FEED_URL") {
            self.feed_url = url;
        }
        if let Ok(format) = std::env::var("RINK_BOARD_FEED_FORMAT") {
            self.feed_format = format.parse()?;
        }
        if let Ok(zone) = std::env::var("RINK_BOARD_TIMEZONE") {
            self.facility_timezone = zone;
        }
        if let Some(secs) = std::env::var("RINK_BOARD_REFRESH_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.refresh_every_secs = secs;
        }
        self.validate()?;
        Ok(self)
    }
}

pub struct ConfigStore {
    path: PathBuf,
    data: Mutex<BoardConfig>,
}

impl ConfigStore {
    pub fn load() -> Self {
        Self::load_from(default_config_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        let data = match read_config(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = ?path, error = %err, "falling back to default board config");
                BoardConfig::default()
            }
        };
        Self {
            path,
            data: Mutex::new(data),
        }
    }

    pub fn read(&self) -> BoardConfig {
        self.data.lock().expect("config mutex poisoned").clone()
    }

    pub fn update<F>(&self, transform: F) -> Result<BoardConfig, ConfigError>
    where
        F: FnOnce(&mut BoardConfig),
    {
        let mut guard = self
            .data
            .lock()
            .map_err(|_| ConfigError::Io("config mutex poisoned".to_string()))?;
        let mut candidate = guard.clone();
        transform(&mut candidate);
        candidate.validate()?;
        write_config(&self.path, &candidate)?;
        *guard = candidate;
        Ok(guard.clone())
    }
}

/// `<data dir>/rink-board/config.json`, or the working directory when the
/// platform reports no data dir.
pub fn default_config_path() -> PathBuf {
    dirs::data_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rink-board")
        .join("config.json")
}

fn read_config(path: &Path) -> Result<BoardConfig, ConfigError> {
    if !path.exists() {
        return Ok(BoardConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
    let config: BoardConfig =
        serde_json::from_str(&contents).map_err(|err| ConfigError::Parse(err.to_string()))?;
    config.validate()?;
    Ok(config)
}

fn write_config(path: &Path, config: &BoardConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| ConfigError::Io(err.to_string()))?;
    }
    let contents =
        serde_json::to_string_pretty(config).map_err(|err| ConfigError::Parse(err.to_string()))?;
    fs::write(path, contents).map_err(|err| ConfigError::Io(err.to_string()))
}
