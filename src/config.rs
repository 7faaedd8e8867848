use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::core::query::{DEFAULT_QUERY_LIMIT, DEFAULT_SECONDARY_EMAIL_FIELD};
use crate::core::similarity::DEFAULT_NAME_SIMILARITY_THRESHOLD;
use crate::models::MatchWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub crm: CrmSettings,
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

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Threshold used when a request does not supply one
    #[serde(default = "default_min_confidence")]
    pub default_min_confidence: u8,
    #[serde(default = "default_fuzzy_name_threshold")]
    pub fuzzy_name_threshold: f64,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_min_confidence: default_min_confidence(),
            fuzzy_name_threshold: default_fuzzy_name_threshold(),
            max_candidates: default_max_candidates(),
        }
    }
}

fn default_min_confidence() -> u8 { 70 }
fn default_fuzzy_name_threshold() -> f64 { DEFAULT_NAME_SIMILARITY_THRESHOLD }
fn default_max_candidates() -> usize { 500 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_email_weight")]
    pub email: u8,
    #[serde(default = "default_phone_weight")]
    pub phone: u8,
    #[serde(default = "default_secondary_email_weight")]
    pub secondary_email: u8,
    #[serde(default = "default_first_name_weight")]
    pub first_name: u8,
    #[serde(default = "default_last_name_weight")]
    pub last_name: u8,
    #[serde(default = "default_zip_weight")]
    pub zip: u8,
    #[serde(default = "default_city_weight")]
    pub city: u8,
    #[serde(default = "default_state_weight")]
    pub state: u8,
    #[serde(default = "default_street_weight")]
    pub street: u8,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            email: default_email_weight(),
            phone: default_phone_weight(),
            secondary_email: default_secondary_email_weight(),
            first_name: default_first_name_weight(),
            last_name: default_last_name_weight(),
            zip: default_zip_weight(),
            city: default_city_weight(),
            state: default_state_weight(),
            street: default_street_weight(),
        }
    }
}

impl From<&WeightsConfig> for MatchWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            email: config.email,
            phone: config.phone,
            secondary_email: config.secondary_email,
            first_name: config.first_name,
            last_name: config.last_name,
            zip: config.zip,
            city: config.city,
            state: config.state,
            street: config.street,
        }
    }
}

fn default_email_weight() -> u8 { 25 }
fn default_phone_weight() -> u8 { 25 }
fn default_secondary_email_weight() -> u8 { 20 }
fn default_first_name_weight() -> u8 { 15 }
fn default_last_name_weight() -> u8 { 15 }
fn default_zip_weight() -> u8 { 12 }
fn default_city_weight() -> u8 { 10 }
fn default_state_weight() -> u8 { 8 }
fn default_street_weight() -> u8 { 8 }

/// CRM object and field names used when building candidate searches
#[derive(Debug, Clone, Deserialize)]
pub struct CrmSettings {
    #[serde(default = "default_contact_object")]
    pub contact_object: String,
    #[serde(default = "default_secondary_email_field")]
    pub secondary_email_field: String,
    #[serde(default = "default_query_limit")]
    pub query_limit: u32,
}

impl Default for CrmSettings {
    fn default() -> Self {
        Self {
            contact_object: default_contact_object(),
            secondary_email_field: default_secondary_email_field(),
            query_limit: default_query_limit(),
        }
    }
}

fn default_contact_object() -> String { "Contact".to_string() }
fn default_secondary_email_field() -> String { DEFAULT_SECONDARY_EMAIL_FIELD.to_string() }
fn default_query_limit() -> u32 { DEFAULT_QUERY_LIMIT }

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

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CONTACT_MATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CONTACT_MATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Scoring weights as used by the matcher
    pub fn match_weights(&self) -> MatchWeights {
        MatchWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("CONTACT_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
