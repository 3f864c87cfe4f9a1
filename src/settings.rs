use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

/// Connection string variables, highest priority first.
pub const DATABASE_URL_FALLBACKS: [&str; 3] = [
    "DATABASE_POOLER_URL",
    "DATABASE_PUBLIC_URL",
    "DATABASE_URL",
];

/// Legacy toggle accepted alongside `APP_CONTENT_SOURCE`.
pub const DATABASE_CONTENT_FLAG: &str = "DATABASE_CONTENT_ENABLED";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Backing store for content, fixed for the lifetime of the process.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Static,
    Database,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_content_source")]
    pub content_source: ContentSource,

    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default = "default_search_index_path")]
    pub search_index_path: PathBuf,

    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_idle_timeout")]
    pub database_idle_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub database_connect_timeout_secs: u64,

    /// Zero disables the read cache.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Content".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_content_source() -> ContentSource {
    ContentSource::Static
}
fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}
fn default_search_index_path() -> PathBuf {
    PathBuf::from("public/search-index.json")
}
fn default_max_connections() -> u32 {
    10
}
fn default_idle_timeout() -> u64 {
    20
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_cache_ttl() -> u64 {
    60
}
fn default_site_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            content_source: default_content_source(),
            content_dir: default_content_dir(),
            search_index_path: default_search_index_path(),
            database_url: None,
            database_max_connections: default_max_connections(),
            database_idle_timeout_secs: default_idle_timeout(),
            database_connect_timeout_secs: default_connect_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            site_url: default_site_url(),
            cors_allowed_origins: default_cors_origins(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .ignore_empty(true)
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        if env::var(DATABASE_CONTENT_FLAG).is_ok_and(|v| v.trim().eq_ignore_ascii_case("true")) {
            config.content_source = ContentSource::Database;
        }

        if config.database_url.as_deref().is_none_or(|url| url.trim().is_empty()) {
            config.database_url = resolve_database_url(|key| env::var(key).ok());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.uses_database() && self.database_url.as_deref().is_none_or(|url| url.trim().is_empty()) {
            errors.push("DATABASE_POOLER_URL, DATABASE_PUBLIC_URL or DATABASE_URL must be set when content_source is database");
        }
        if self.database_max_connections == 0 {
            errors.push("DATABASE_MAX_CONNECTIONS must be at least 1");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }
        if url::Url::parse(&self.site_url).is_err() {
            errors.push("SITE_URL must be an absolute URL");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn uses_database(&self) -> bool {
        self.content_source == ContentSource::Database
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs))
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Picks the first non-empty connection string in fallback order.
pub fn resolve_database_url<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    DATABASE_URL_FALLBACKS
        .iter()
        .filter_map(|key| lookup(key))
        .find(|url| !url.trim().is_empty())
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Static => write!(f, "static"),
            ContentSource::Database => write!(f, "database"),
        }
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self.as_deref() {
            None | Some("") => "[MISSING]",
            Some(_) => "[REDACTED]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("content_source", &self.content_source)
            .field("content_dir", &self.content_dir)
            .field("search_index_path", &self.search_index_path)
            .field("database_url", &self.database_url.redact())
            .field("database_max_connections", &self.database_max_connections)
            .field("database_idle_timeout_secs", &self.database_idle_timeout_secs)
            .field("database_connect_timeout_secs", &self.database_connect_timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("site_url", &self.site_url)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}
