use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// CSV file with the movie catalog
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// CSV file with the TV show catalog
    #[serde(default = "default_shows_path")]
    pub shows_path: String,

    /// Vocabulary cap for the TF-IDF index (0 disables the cap)
    #[serde(default = "default_max_features")]
    pub max_features: usize,

    /// Recommendation count used when a request omits `top_n`
    #[serde(default = "default_top_n")]
    pub default_top_n: i64,

    /// Upper bound applied to `top_n` at the HTTP boundary
    #[serde(default = "default_max_top_n")]
    pub max_top_n: i64,

    /// OMDb API key; posters are disabled without one
    #[serde(default)]
    pub omdb_api_key: Option<String>,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Timeout for a single poster lookup
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Redis connection URL for the poster cache
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_movies_path() -> String {
    "netflix_movies_detailed_up_to_2025.csv".to_string()
}

fn default_shows_path() -> String {
    "netflix_tv_shows_detailed_up_to_2025.csv".to_string()
}

fn default_max_features() -> usize {
    5000
}

fn default_top_n() -> i64 {
    6
}

fn default_max_top_n() -> i64 {
    50
}

fn default_omdb_api_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_poster_timeout_secs() -> u64 {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.max_features, 5000);
        assert_eq!(config.default_top_n, 6);
        assert_eq!(config.max_top_n, 50);
        assert_eq!(config.omdb_api_key, None);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_overrides() {
        let vars = vec![
            ("MOVIES_PATH".to_string(), "/data/movies.csv".to_string()),
            ("MAX_FEATURES".to_string(), "100".to_string()),
            ("OMDB_API_KEY".to_string(), "secret".to_string()),
            ("PORT".to_string(), "8080".to_string()),
        ];
        let config = Config::from_vars(vars).unwrap();
        assert_eq!(config.movies_path, "/data/movies.csv");
        assert_eq!(config.max_features, 100);
        assert_eq!(config.omdb_api_key.as_deref(), Some("secret"));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let vars = vec![("PORT".to_string(), "not-a-port".to_string())];
        assert!(Config::from_vars(vars).is_err());
    }
}
