/// Default OpenWeather API root, used when `API_BASE_URL` is unset.
const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_HISTORY_PATH: &str = "./db/searchHistory.json";
const DEFAULT_STATIC_DIR: &str = "../client/dist";

/// Startup configuration errors. Any of these stops the process before it binds.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_KEY is required - please check your .env file")]
    MissingApiKey,

    #[error("PORT must be a valid u16, got '{0}'")]
    InvalidPort(String),
}

/// Application configuration, parsed from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// OpenWeather API key, sent as `appid` on every upstream request.
    pub api_key: String,
    /// OpenWeather API root, without a trailing slash.
    pub api_base_url: String,
    pub port: u16,
    /// JSON file backing the search history.
    pub history_path: String,
    /// Directory holding the built client (served as static files).
    pub static_dir: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("port", &self.port)
            .field("history_path", &self.history_path)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        let api_key_status = match std::env::var("API_KEY") {
            Ok(k) if !k.trim().is_empty() => "Present",
            _ => "Missing",
        };
        tracing::info!(api_key = api_key_status, "Checking API key");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let api_base_url = lookup("API_BASE_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_key,
            api_base_url,
            port,
            history_path: lookup("HISTORY_PATH")
                .unwrap_or_else(|| DEFAULT_HISTORY_PATH.to_string()),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        })
    }
}
