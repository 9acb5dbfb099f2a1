use {
    crate::controller::Tab,
    serde::{Deserialize, Serialize},
    std::{env, io, path::Path, str::FromStr, time::Duration},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the LMS proxy, e.g. `http://localhost:8000`.
    pub backend_url: String,
    pub log_level: LogLevel,
    pub port: usize,
    pub request_timeout_secs: u64,
    pub token_store_path: String,
    pub state_channel_size: usize,
    /// Tab shown after a successful connect.
    pub default_tab: Tab,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".into(),
            log_level: LogLevel {
                inner: tracing::Level::INFO,
            },
            port: 5173,
            request_timeout_secs: 10,
            token_store_path: "canvas_token.json".into(),
            state_channel_size: 32,
            default_tab: Tab::Courses,
        }
    }
}

impl Config {
    /// Reads `$CGD_CONFIG_PATH`, falling back to `./config.json`. A missing
    /// file means all defaults; a malformed one is an error.
    pub fn read() -> Result<Self, io::Error> {
        let path = match env::var("CGD_CONFIG_PATH") {
            Ok(path) => Path::new(&path).to_path_buf(),
            Err(_) => env::current_dir()?.join("config.json"),
        };
        let string = match std::fs::read_to_string(path) {
            Ok(string) => string,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e),
        };
        let config: Self = serde_json::from_str(&string)?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogLevel {
    pub inner: tracing::Level,
}

impl TryFrom<String> for LogLevel {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<LogLevel> for String {
    fn from(value: LogLevel) -> Self {
        value.inner.to_string()
    }
}

impl FromStr for LogLevel {
    type Err = tracing::metadata::ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        tracing::Level::from_str(s).map(|inner| Self { inner })
    }
}

#[test]
fn test_partial_config() {
    let config: Config = serde_json::from_str(
        r#"{"backend_url": "http://lms-proxy:9000", "log_level": "debug", "default_tab": "leaderboard"}"#,
    )
    .unwrap();
    assert_eq!(config.backend_url, "http://lms-proxy:9000");
    assert_eq!(config.log_level.inner, tracing::Level::DEBUG);
    assert_eq!(config.default_tab, Tab::Leaderboard);
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.token_store_path, "canvas_token.json");

    assert!(serde_json::from_str::<Config>(r#"{"log_level": "loud"}"#).is_err());
}
