//! Application settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Prefix for structured overrides, e.g. `AUTOMATION_GATEWAY__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "AUTOMATION_GATEWAY";

/// Default location of the optional settings file
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub rate_limit: RateLimitConfig,
    pub automation: AutomationConfig,
    #[serde(default)]
    pub integrations: IntegrationKeys,
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Problems found in platform variables while loading. Logged once tracing is up.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    30
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

fn default_true() -> bool {
    true
}

fn default_rps() -> u32 {
    50
}

fn default_burst() -> u32 {
    100
}

/// Automation behaviour switches
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutomationConfig {
    #[serde(default = "default_automation_level")]
    pub level: String,
    #[serde(default = "default_daily_revenue_target")]
    pub daily_revenue_target: f64,
    #[serde(default = "default_true")]
    pub auto_respond_emails: bool,
    #[serde(default = "default_true")]
    pub auto_book_meetings: bool,
    #[serde(default = "default_true")]
    pub auto_send_proposals: bool,
    #[serde(default = "default_job_history_limit")]
    pub job_history_limit: usize,
}

fn default_automation_level() -> String {
    "98_percent".to_string()
}

fn default_daily_revenue_target() -> f64 {
    1000.0
}

fn default_job_history_limit() -> usize {
    100
}

fn default_environment() -> String {
    "development".to_string()
}

/// Third-party credentials. Never serialized, redacted in `Debug`.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct IntegrationKeys {
    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub apollo_api_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub calendly_api_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub linkedin_access_token: Option<String>,
    #[serde(default, skip_serializing)]
    pub stripe_api_key: Option<String>,
}

impl IntegrationKeys {
    /// Drop keys that are set but blank
    fn normalize(&mut self) {
        for slot in [
            &mut self.openai_api_key,
            &mut self.apollo_api_key,
            &mut self.calendly_api_key,
            &mut self.linkedin_access_token,
            &mut self.stripe_api_key,
        ] {
            if slot.as_deref().map_or(false, |v| v.trim().is_empty()) {
                *slot = None;
            }
        }
    }
}

impl fmt::Debug for IntegrationKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(key: &Option<String>) -> Option<&'static str> {
            key.as_ref().map(|_| "***")
        }

        f.debug_struct("IntegrationKeys")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("apollo_api_key", &redact(&self.apollo_api_key))
            .field("calendly_api_key", &redact(&self.calendly_api_key))
            .field("linkedin_access_token", &redact(&self.linkedin_access_token))
            .field("stripe_api_key", &redact(&self.stripe_api_key))
            .finish()
    }
}

/// Which integrations are configured and which automation switches are on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub openai: bool,
    pub apollo: bool,
    pub calendly: bool,
    pub linkedin: bool,
    pub stripe: bool,
    pub auto_respond_emails: bool,
    pub auto_book_meetings: bool,
    pub auto_send_proposals: bool,
}

impl Settings {
    /// Load settings from the default file location and the process environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load settings from a specific file path and the process environment
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let env: config::Map<String, String> = std::env::vars().collect();
        Self::load_with_env(path, env)
    }

    /// Load settings from a file path and an explicit environment snapshot
    pub fn load_with_env<P: AsRef<Path>>(path: P, env: config::Map<String, String>) -> Result<Self> {
        let path = path.as_ref();

        // Determine file format
        let format = if path.extension().map_or(false, |ext| ext == "yaml" || ext == "yml") {
            FileFormat::Yaml
        } else {
            FileFormat::Toml
        };

        let mut config_builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("server.request_timeout_secs", default_request_timeout() as i64)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?
            .set_default("rate_limit.enabled", true)?
            .set_default("rate_limit.requests_per_second", default_rps() as i64)?
            .set_default("rate_limit.burst_size", default_burst() as i64)?
            .set_default("automation.level", default_automation_level())?
            .set_default("automation.daily_revenue_target", default_daily_revenue_target())?
            .set_default("automation.auto_respond_emails", true)?
            .set_default("automation.auto_book_meetings", true)?
            .set_default("automation.auto_send_proposals", true)?
            .set_default("automation.job_history_limit", default_job_history_limit() as i64)?
            .set_default("environment", default_environment())?;

        // Add settings file if exists
        if path.exists() {
            config_builder = config_builder.add_source(File::from(path).format(format));
        }

        // Add structured environment overrides
        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        let config = config_builder.build()?;
        let mut settings: Settings = config.try_deserialize()?;

        settings.apply_platform_env(&env);
        settings.integrations.normalize();

        Ok(settings)
    }

    /// Overlay the flat variables a hosting platform injects
    fn apply_platform_env(&mut self, env: &config::Map<String, String>) {
        let lookup = |key: &str| {
            env.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        for (key, slot) in [
            ("OPENAI_API_KEY", &mut self.integrations.openai_api_key),
            ("APOLLO_API_KEY", &mut self.integrations.apollo_api_key),
            ("CALENDLY_API_KEY", &mut self.integrations.calendly_api_key),
            ("LINKEDIN_ACCESS_TOKEN", &mut self.integrations.linkedin_access_token),
            ("STRIPE_API_KEY", &mut self.integrations.stripe_api_key),
        ] {
            if let Some(value) = lookup(key) {
                *slot = Some(value.to_string());
            }
        }

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(parsed) if parsed != 0 => self.server.port = parsed,
                _ => self
                    .warnings
                    .push(format!("PORT={port:?} is not a valid port, keeping {}", self.server.port)),
            }
        }

        if let Some(level) = lookup("AUTOMATION_LEVEL") {
            self.automation.level = level.to_string();
        }

        if let Some(target) = lookup("DAILY_REVENUE_TARGET") {
            match target.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => {
                    self.automation.daily_revenue_target = value;
                }
                _ => self.warnings.push(format!(
                    "DAILY_REVENUE_TARGET={target:?} is not a non-negative number, keeping {}",
                    self.automation.daily_revenue_target
                )),
            }
        }

        for (key, slot) in [
            ("AUTO_RESPOND_EMAILS", &mut self.automation.auto_respond_emails),
            ("AUTO_BOOK_MEETINGS", &mut self.automation.auto_book_meetings),
            ("AUTO_SEND_PROPOSALS", &mut self.automation.auto_send_proposals),
        ] {
            if let Some(raw) = lookup(key) {
                match parse_flag(raw) {
                    Some(flag) => *slot = flag,
                    None => self
                        .warnings
                        .push(format!("{key}={raw:?} is not a boolean, keeping {slot}")),
                }
            }
        }

        if let Some(environment) = lookup("ENVIRONMENT") {
            self.environment = environment.to_string();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Server port cannot be 0".to_string(),
            )));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Request timeout must be at least 1 second".to_string(),
            )));
        }

        if self.rate_limit.enabled
            && (self.rate_limit.requests_per_second == 0 || self.rate_limit.burst_size == 0)
        {
            return Err(AppError::Config(config::ConfigError::Message(
                "Rate limit requests_per_second and burst_size must be positive".to_string(),
            )));
        }

        if self.automation.job_history_limit == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "Job history limit must be at least 1".to_string(),
            )));
        }

        let target = self.automation.daily_revenue_target;
        if !target.is_finite() || target < 0.0 {
            return Err(AppError::Config(config::ConfigError::Message(format!(
                "Daily revenue target must be a non-negative number, got {target}"
            ))));
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            other => {
                return Err(AppError::Config(config::ConfigError::Message(format!(
                    "Unknown log format '{other}', expected 'json' or 'pretty'"
                ))));
            }
        }

        Ok(())
    }

    /// Snapshot of configured integrations and automation switches
    pub fn capabilities(&self) -> Capabilities {
        let keys = &self.integrations;
        Capabilities {
            openai: keys.openai_api_key.is_some(),
            apollo: keys.apollo_api_key.is_some(),
            calendly: keys.calendly_api_key.is_some(),
            linkedin: keys.linkedin_access_token.is_some(),
            stripe: keys.stripe_api_key.is_some(),
            auto_respond_emails: self.automation.auto_respond_emails,
            auto_book_meetings: self.automation.auto_book_meetings,
            auto_send_proposals: self.automation.auto_send_proposals,
        }
    }

    /// Address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse the loose boolean spellings deployment dashboards tend to produce
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            rate_limit: RateLimitConfig {
                enabled: true,
                requests_per_second: default_rps(),
                burst_size: default_burst(),
            },
            automation: AutomationConfig {
                level: default_automation_level(),
                daily_revenue_target: default_daily_revenue_target(),
                auto_respond_emails: true,
                auto_book_meetings: true,
                auto_send_proposals: true,
                job_history_limit: default_job_history_limit(),
            },
            integrations: IntegrationKeys::default(),
            environment: default_environment(),
            warnings: vec![],
        }
    }
}
