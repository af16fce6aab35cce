use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_SECRET_KEY: &str = "eraya-dev-secret-change-in-production";
pub const DEFAULT_PORT: u16 = 8080;
/// Thirty-one days, matching a long-lived browser session.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 31 * 24 * 60 * 60;

#[derive(Clone)]
pub struct Config {
    pub secret_key: String,
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub static_dir: PathBuf,
    pub session_ttl_secs: u64,
    pub cookie_secure: bool,
    pub log_level: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_path", &self.database_path)
            .field("static_dir", &self.static_dir)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("cookie_secure", &self.cookie_secure)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from("eraya.db"),
            static_dir: PathBuf::from("."),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            cookie_secure: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source, falling back to
    /// defaults for anything missing or unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            secret_key: lookup("SECRET_KEY")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.secret_key),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT", defaults.port),
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            session_ttl_secs: parsed(&lookup, "SESSION_TTL_SECS", defaults.session_ttl_secs),
            cookie_secure: parsed(&lookup, "COOKIE_SECURE", defaults.cookie_secure),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key = key, value = %raw, fallback = ?default, "Ignoring unparseable setting");
            default
        }),
    }
}
