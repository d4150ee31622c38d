//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::calculate::TeamPoints;
use crate::models::{HandicapPercentage, Round, DEFAULT_SINDICATO_POINTS};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Default scoring settings for rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Share of the playing handicap applied: 100 or 75
    #[serde(default = "default_handicap_percentage")]
    pub handicap_percentage: u8,

    /// Sindicato points for 1st..4th
    #[serde(default = "default_sindicato_points")]
    pub sindicato_points: [u32; 4],

    #[serde(default = "default_ball_points")]
    pub best_ball_points: u32,

    #[serde(default = "default_ball_points")]
    pub worst_ball_points: u32,
}

fn default_handicap_percentage() -> u8 {
    100
}

fn default_sindicato_points() -> [u32; 4] {
    DEFAULT_SINDICATO_POINTS
}

fn default_ball_points() -> u32 {
    1
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            handicap_percentage: default_handicap_percentage(),
            sindicato_points: default_sindicato_points(),
            best_ball_points: default_ball_points(),
            worst_ball_points: default_ball_points(),
        }
    }
}

impl ScoringConfig {
    /// Configured handicap percentage.
    pub fn percentage(&self) -> Result<HandicapPercentage, ConfigError> {
        HandicapPercentage::try_from(self.handicap_percentage).map_err(ConfigError::ValidationError)
    }

    pub fn team_points(&self) -> TeamPoints {
        TeamPoints {
            best_ball: self.best_ball_points,
            worst_ball: self.worst_ball_points,
        }
    }

    /// Overwrite a round's scoring settings with the configured ones.
    pub fn apply_to(&self, round: &mut Round) -> Result<(), ConfigError> {
        round.handicap_percentage = self.percentage()?;
        round.sindicato_points = self.sindicato_points;
        round.best_ball_points = self.best_ball_points;
        round.worst_ball_points = self.worst_ball_points;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.percentage()?;

        if self.sindicato_points.windows(2).any(|w| w[0] < w[1]) {
            return Err(ConfigError::ValidationError(format!(
                "Sindicato points must not increase by position: {:?}",
                self.sindicato_points
            )));
        }

        if self.best_ball_points == 0 || self.worst_ball_points == 0 {
            return Err(ConfigError::ValidationError(
                "Team ball points must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Log level must not be empty".to_string(),
            ));
        }

        self.scoring.validate()
    }
}
