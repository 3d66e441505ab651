use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{
    BuildingClassTable, GradeBands, MatchWeights, ScoringPolicy, TierThresholds,
};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
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
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSettings {
    /// JSON seed file loaded into the in-memory store at startup
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_entries(),
        }
    }
}

fn default_cache_ttl() -> u64 { 300 }
fn default_cache_entries() -> u64 { 10_000 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    /// Rayon pool size, defaults to available cores
    pub worker_threads: Option<usize>,
    #[serde(default = "default_max_batch_results")]
    pub max_batch_results: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            parallel_threshold: default_parallel_threshold(),
            worker_threads: None,
            max_batch_results: default_max_batch_results(),
        }
    }
}

fn default_parallel_threshold() -> usize { crate::core::matcher::DEFAULT_PARALLEL_THRESHOLD }
fn default_max_batch_results() -> usize { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_max_location_distance_km")]
    pub max_location_distance_km: f64,
    #[serde(default = "default_max_delay_days")]
    pub max_delay_days: f64,
    #[serde(default = "default_oversize_penalty_rate")]
    pub oversize_penalty_rate: f64,
    #[serde(default = "default_oversize_floor")]
    pub oversize_floor: f64,
    #[serde(default)]
    pub building: BuildingConfig,
    #[serde(default = "default_experience_half_saturation")]
    pub experience_half_saturation: f64,
    #[serde(default = "default_neighborhood_saturation_density")]
    pub neighborhood_saturation_density: f64,
    #[serde(default)]
    pub grades: GradesConfig,
    #[serde(default)]
    pub tiers: TiersConfig,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            max_location_distance_km: default_max_location_distance_km(),
            max_delay_days: default_max_delay_days(),
            oversize_penalty_rate: default_oversize_penalty_rate(),
            oversize_floor: default_oversize_floor(),
            building: BuildingConfig::default(),
            experience_half_saturation: default_experience_half_saturation(),
            neighborhood_saturation_density: default_neighborhood_saturation_density(),
            grades: GradesConfig::default(),
            tiers: TiersConfig::default(),
        }
    }
}

fn default_max_location_distance_km() -> f64 { 50.0 }
fn default_max_delay_days() -> f64 { 180.0 }
fn default_oversize_penalty_rate() -> f64 { 0.5 }
fn default_oversize_floor() -> f64 { 40.0 }
fn default_experience_half_saturation() -> f64 { 3.0 }
fn default_neighborhood_saturation_density() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_space_weight")]
    pub space: f64,
    #[serde(default = "default_building_weight")]
    pub building: f64,
    #[serde(default = "default_timeline_weight")]
    pub timeline: f64,
    #[serde(default = "default_experience_weight")]
    pub experience: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            location: default_location_weight(),
            space: default_space_weight(),
            building: default_building_weight(),
            timeline: default_timeline_weight(),
            experience: default_experience_weight(),
        }
    }
}

fn default_location_weight() -> f64 { 0.30 }
fn default_space_weight() -> f64 { 0.25 }
fn default_building_weight() -> f64 { 0.15 }
fn default_timeline_weight() -> f64 { 0.15 }
fn default_experience_weight() -> f64 { 0.15 }

#[derive(Debug, Clone, Deserialize)]
pub struct BuildingConfig {
    #[serde(default = "default_full_class_score")]
    pub exact_match: f64,
    #[serde(default = "default_full_class_score")]
    pub above_required: f64,
    #[serde(default = "default_one_below")]
    pub one_below: f64,
    #[serde(default = "default_two_or_more_below")]
    pub two_or_more_below: f64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            exact_match: default_full_class_score(),
            above_required: default_full_class_score(),
            one_below: default_one_below(),
            two_or_more_below: default_two_or_more_below(),
        }
    }
}

fn default_full_class_score() -> f64 { 100.0 }
fn default_one_below() -> f64 { 60.0 }
fn default_two_or_more_below() -> f64 { 20.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct GradesConfig {
    #[serde(default = "default_grade_a")]
    pub a: f64,
    #[serde(default = "default_grade_b")]
    pub b: f64,
    #[serde(default = "default_grade_c")]
    pub c: f64,
    #[serde(default = "default_grade_d")]
    pub d: f64,
}

impl Default for GradesConfig {
    fn default() -> Self {
        Self {
            a: default_grade_a(),
            b: default_grade_b(),
            c: default_grade_c(),
            d: default_grade_d(),
        }
    }
}

fn default_grade_a() -> f64 { 90.0 }
fn default_grade_b() -> f64 { 80.0 }
fn default_grade_c() -> f64 { 70.0 }
fn default_grade_d() -> f64 { 60.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    #[serde(default = "default_competitive")]
    pub competitive: f64,
    #[serde(default = "default_qualified")]
    pub qualified: f64,
    #[serde(default = "default_marginal")]
    pub marginal: f64,
}

impl Default for TiersConfig {
    fn default() -> Self {
        Self {
            competitive: default_competitive(),
            qualified: default_qualified(),
            marginal: default_marginal(),
        }
    }
}

fn default_competitive() -> f64 { 85.0 }
fn default_qualified() -> f64 { 70.0 }
fn default_marginal() -> f64 { 55.0 }

impl From<&ScoringSettings> for ScoringPolicy {
    fn from(s: &ScoringSettings) -> Self {
        ScoringPolicy {
            weights: MatchWeights {
                location: s.weights.location,
                space: s.weights.space,
                building: s.weights.building,
                timeline: s.weights.timeline,
                experience: s.weights.experience,
            },
            max_location_distance_km: s.max_location_distance_km,
            max_delay_days: s.max_delay_days,
            oversize_penalty_rate: s.oversize_penalty_rate,
            oversize_floor: s.oversize_floor,
            building: BuildingClassTable {
                exact_match: s.building.exact_match,
                above_required: s.building.above_required,
                one_below: s.building.one_below,
                two_or_more_below: s.building.two_or_more_below,
            },
            experience_half_saturation: s.experience_half_saturation,
            neighborhood_saturation_density: s.neighborhood_saturation_density,
            grade_bands: GradeBands {
                a: s.grades.a,
                b: s.grades.b,
                c: s.grades.c,
                d: s.grades.d,
            },
            tier_thresholds: TierThresholds {
                competitive: s.tiers.competitive,
                qualified: s.tiers.qualified,
                marginal: s.tiers.marginal,
            },
        }
    }
}

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
fn default_log_format() -> String { "json".to_string() }

impl LoggingSettings {
    /// Apply `LOG_LEVEL` / `LOG_FORMAT` from the process environment on top of the file values
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any lookup, keyed by `LOG_LEVEL` and `LOG_FORMAT`
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("LOG_LEVEL").filter(|v| !v.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT").filter(|v| !v.trim().is_empty()) {
            self.format = format;
        }
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FEDLEASE_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FEDLEASE__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy::from(&self.scoring)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("FEDLEASE")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
