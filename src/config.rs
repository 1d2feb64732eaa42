use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{BonusStrategy, MatchingConfig, Normalization, TierWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// CSV or JSON file the job loader reads on every request
    #[serde(default = "default_jobs_path")]
    pub jobs_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            jobs_path: default_jobs_path(),
        }
    }
}

fn default_jobs_path() -> PathBuf { PathBuf::from("job_data.csv") }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub bonus: BonusConfig,
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    #[default]
    Raw,
    MaxScore,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default)]
    pub mode: NormalizationMode,
    #[serde(default = "default_max_score")]
    pub max_score: f64,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            mode: NormalizationMode::default(),
            max_score: default_max_score(),
        }
    }
}

fn default_max_score() -> f64 { 20.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct BonusConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_bonus_cap")]
    pub cap: f64,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            cap: default_bonus_cap(),
        }
    }
}

fn default_true() -> bool { true }
fn default_bonus_cap() -> f64 { 0.3 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_multiplier")]
    pub beginner: f64,
    #[serde(default = "default_multiplier")]
    pub intermediate: f64,
    #[serde(default = "default_multiplier")]
    pub expert: f64,
    #[serde(default = "default_multiplier")]
    pub required: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            beginner: default_multiplier(),
            intermediate: default_multiplier(),
            expert: default_multiplier(),
            required: default_multiplier(),
        }
    }
}

fn default_multiplier() -> f64 { 1.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl From<&ScoringSettings> for MatchingConfig {
    fn from(scoring: &ScoringSettings) -> Self {
        let normalization = match scoring.normalization.mode {
            NormalizationMode::Raw => Normalization::Raw,
            NormalizationMode::MaxScore => Normalization::MaxScore(scoring.normalization.max_score),
        };

        let bonus = if scoring.bonus.enabled {
            BonusStrategy::RequiredCoverage {
                cap: scoring.bonus.cap,
            }
        } else {
            BonusStrategy::None
        };

        let weights = TierWeights {
            beginner: scoring.weights.beginner,
            intermediate: scoring.weights.intermediate,
            expert: scoring.weights.expert,
            required: scoring.weights.required,
        };

        MatchingConfig {
            normalization,
            bonus,
            weights,
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with SKILL_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILL_MATCH__DATA__JOBS_PATH -> data.jobs_path
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    pub fn matching_config(&self) -> MatchingConfig {
        MatchingConfig::from(&self.scoring)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let scoring = &self.scoring;
        if scoring.normalization.mode == NormalizationMode::MaxScore
            && !(scoring.normalization.max_score > 0.0)
        {
            return Err(ConfigError::Message(
                "scoring.normalization.max_score must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&scoring.bonus.cap) {
            return Err(ConfigError::Message(
                "scoring.bonus.cap must be within [0, 1]".to_string(),
            ));
        }
        let weights = &scoring.weights;
        if [weights.beginner, weights.intermediate, weights.expert, weights.required]
            .iter()
            .any(|m| !m.is_finite() || *m < 0.0)
        {
            return Err(ConfigError::Message(
                "scoring.weights multipliers must be finite and non-negative".to_string(),
            ));
        }
        Ok(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SKILL_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("skill_match_{}_{}.toml", name, std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.beginner, 1.0);
        assert_eq!(weights.intermediate, 1.0);
        assert_eq!(weights.expert, 1.0);
        assert_eq!(weights.required, 1.0);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_default_scoring_maps_to_plain_cosine_with_bonus() {
        let config = MatchingConfig::from(&ScoringSettings::default());

        assert_eq!(config.normalization, Normalization::Raw);
        assert_eq!(config.bonus, BonusStrategy::RequiredCoverage { cap: 0.3 });
        assert!(config.weights.is_neutral());
    }

    #[test]
    fn test_load_from_file() {
        let path = write_config(
            "full",
            r#"
            [server]
            port = 9100

            [data]
            jobs_path = "data/jobs.json"

            [scoring.normalization]
            mode = "max_score"
            max_score = 20.0

            [scoring.bonus]
            enabled = false

            [scoring.weights]
            expert = 1.5
            "#,
        );

        let settings = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.data.jobs_path, PathBuf::from("data/jobs.json"));

        let config = settings.matching_config();
        assert_eq!(config.normalization, Normalization::MaxScore(20.0));
        assert_eq!(config.bonus, BonusStrategy::None);
        assert_eq!(config.weights.expert, 1.5);
        assert_eq!(config.weights.beginner, 1.0);
    }

    #[test]
    fn test_rejects_invalid_bonus_cap() {
        let path = write_config("bad_cap", "[scoring.bonus]\ncap = 1.5\n");

        let result = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert!(result.is_err());
    }
}
