use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MillcalError;
use crate::models::DEFAULT_TIME;

/// Longest generation window and board width, in days.
pub const MAX_WINDOW_DAYS: u32 = 366;

/// Rejects a window of zero days or longer than [`MAX_WINDOW_DAYS`].
pub fn check_window_days(days: u32) -> Result<u32, MillcalError> {
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(MillcalError::validation(format!(
            "window must be 1 to {MAX_WINDOW_DAYS} days, got {days}"
        )));
    }
    Ok(days)
}

/// What happens to an item's id when it is dragged to another day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePolicy {
    /// Keep the id; references held elsewhere stay valid.
    #[default]
    Preserve,
    /// Derive a fresh `<id>-moved-<ulid>` id on every move.
    Remint,
}

impl MovePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Remint => "remint",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_days: u32,
    pub default_time: String,
    pub current_user: String,
    pub move_policy: MovePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_days: 7,
            default_time: DEFAULT_TIME.to_string(),
            current_user: "Current User".to_string(),
            move_policy: MovePolicy::Preserve,
        }
    }
}

impl Config {
    /// Missing file means defaults; a file that exists must parse.
    pub fn load(path: &Path) -> Result<Self, MillcalError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| MillcalError::config(format!("Invalid config {}: {e}", path.display())))?;
        check_window_days(config.window_days)
            .map_err(|e| MillcalError::config(format!("Invalid config {}: {}", path.display(), e.message)))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), MillcalError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
