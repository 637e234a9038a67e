#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime configuration, loaded from environment variables.
///
/// The places-search backend URL is always injected through this struct;
/// nothing in the workspace reads it from ambient state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Total timeout for single-shot requests (region search). The streamed
    /// zip-code search intentionally has no total timeout; see
    /// `SearchClient` in `leadfinder-client`.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Radius used when the caller does not pass one explicitly.
    pub default_radius_meters: u32,
}
