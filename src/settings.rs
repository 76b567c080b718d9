//! Run settings
//!
//! Loaded from JSON handed over by the page (or a file on native builds).

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::consts::MAX_PLAYERS;
use crate::input::InputMap;

/// Game settings for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// 1 or 2
    pub player_count: usize,
    /// Fixed seed for reproducible runs; a fresh one is picked when absent
    pub seed: Option<u64>,
    pub starting_level: u32,
    /// Custom key bindings (defaults depend on the player count)
    pub bindings: Option<InputMap>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_count: 1,
            seed: None,
            starting_level: 1,
            bindings: None,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Parse(serde_json::Error),
    InvalidPlayerCount(usize),
    /// Custom bindings drive more actors than there are players
    BindingsExceedPlayers { actors: usize, players: usize },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(err) => write!(f, "invalid settings JSON: {err}"),
            SettingsError::InvalidPlayerCount(count) => {
                write!(f, "player count must be 1 to {MAX_PLAYERS}, got {count}")
            }
            SettingsError::BindingsExceedPlayers { actors, players } => write!(
                f,
                "bindings drive {actors} players but only {players} are playing"
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(err) => Some(err),
            SettingsError::InvalidPlayerCount(_) | SettingsError::BindingsExceedPlayers { .. } => {
                None
            }
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

impl Settings {
    /// Parse and validate; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        settings.starting_level = settings.starting_level.max(1);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(SettingsError::InvalidPlayerCount(self.player_count));
        }
        if let Some(map) = &self.bindings {
            let actors = map.actor_count();
            if actors > self.player_count {
                return Err(SettingsError::BindingsExceedPlayers {
                    actors,
                    players: self.player_count,
                });
            }
        }
        Ok(())
    }

    /// Configured bindings, or the defaults for the player count
    pub fn input_map(&self) -> InputMap {
        self.bindings
            .clone()
            .unwrap_or_else(|| InputMap::for_players(self.player_count))
    }
}
