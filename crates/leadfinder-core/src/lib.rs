use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod request;
pub mod validate;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use request::{BusinessType, SearchRequest};
pub use validate::{
    parse_zip_codes, sanitize_zip_codes, validate_included_types, ValidationError, MAX_ZIP_CODES,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
