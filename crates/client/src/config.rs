/// Default API base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host prepended to every resource path.
    pub api_url: String,
    /// HTTP request timeout in seconds, applied by the HTTP transport.
    pub request_timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("specimark/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `SPECIMARK_API_URL`              | `http://localhost:8080` |
    /// | `SPECIMARK_REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `SPECIMARK_USER_AGENT`           | `specimark/<version>`   |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("SPECIMARK_API_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let request_timeout_secs = match lookup("SPECIMARK_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_REQUEST_TIMEOUT_SECS,
                        "Invalid SPECIMARK_REQUEST_TIMEOUT_SECS, using default"
                    );
                    DEFAULT_REQUEST_TIMEOUT_SECS
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let user_agent = lookup("SPECIMARK_USER_AGENT")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default_user_agent);

        Self {
            api_url,
            request_timeout_secs,
            user_agent,
        }
    }
}
