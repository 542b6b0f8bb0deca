//! Configuration module

pub mod settings;

pub use settings::{
    parse_flag, AutomationConfig, Capabilities, IntegrationKeys, LoggingConfig, RateLimitConfig,
    ServerConfig, Settings, DEFAULT_CONFIG_PATH, ENV_PREFIX,
};
