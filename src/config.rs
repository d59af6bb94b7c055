use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Development-only defaults. A strict deployment must override all three.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_SECRET_TOKEN: &str = "demo-token";

/// Whether the admin gate enforces sessions.
///
/// `Relaxed` is the default and lets every request through; only
/// `APP_ENV=production` turns on `Strict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeMode {
    Relaxed,
    Strict,
}

impl RuntimeMode {
    /// Map the raw `APP_ENV` value to a mode. Anything but `production` is relaxed.
    pub fn from_app_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => RuntimeMode::Strict,
            _ => RuntimeMode::Relaxed,
        }
    }

    pub fn is_strict(self) -> bool {
        self == RuntimeMode::Strict
    }

    /// Environment name as reported to the admin console.
    pub fn environment(self) -> &'static str {
        match self {
            RuntimeMode::Relaxed => "development",
            RuntimeMode::Strict => "production",
        }
    }
}

/// Static admin login pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Exact match on both fields. Callers must not reveal which one failed.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    pub mode: RuntimeMode,

    // Admin identity
    pub credentials: Credentials,
    pub secret_token: String,

    // Server
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,

    // Routes
    pub protected_prefix: String,
    pub login_path: String,
    pub dashboard_path: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("mode", &self.mode)
            .field("credentials", &self.credentials)
            .field("secret_token", &"[REDACTED]")
            .field("bind_addr", &self.bind_addr)
            .field("static_dir", &self.static_dir)
            .field("protected_prefix", &self.protected_prefix)
            .field("login_path", &self.login_path)
            .field("dashboard_path", &self.dashboard_path)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Attempt to load .env file, but don't fail if it doesn't exist
        // (env vars may be set directly in production)
        let _ = dotenvy::dotenv();

        let mode = RuntimeMode::from_app_env(env::var("APP_ENV").ok().as_deref());

        let username = non_empty_env_or_default("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME)?;
        let password = non_empty_env_or_default("ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD)?;
        let secret_token =
            non_empty_env_or_default("ADMIN_SECRET_TOKEN", DEFAULT_ADMIN_SECRET_TOKEN)?;

        // The token is written verbatim into a Set-Cookie header
        if !is_cookie_value(&secret_token) {
            return Err(ConfigError::InvalidValue(
                "ADMIN_SECRET_TOKEN".to_string(),
                "may not contain whitespace, quotes, commas, semicolons or backslashes"
                    .to_string(),
            ));
        }

        // Server
        let bind_addr =
            parse_env_or_default("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let static_dir =
            PathBuf::from(env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()));

        // Routes
        let protected_prefix = path_env_or_default("PROTECTED_PREFIX", "/admin")?;
        let login_path = path_env_or_default("LOGIN_PATH", "/admin/login")?;
        let dashboard_path = path_env_or_default("DASHBOARD_PATH", "/admin/dashboard")?;

        // Each path gets its own route
        if login_path == protected_prefix || login_path == dashboard_path {
            return Err(ConfigError::InvalidValue(
                "LOGIN_PATH".to_string(),
                "must differ from PROTECTED_PREFIX and DASHBOARD_PATH".to_string(),
            ));
        }
        if dashboard_path == protected_prefix {
            return Err(ConfigError::InvalidValue(
                "DASHBOARD_PATH".to_string(),
                "must differ from PROTECTED_PREFIX".to_string(),
            ));
        }

        Ok(Config {
            mode,
            credentials: Credentials { username, password },
            secret_token,
            bind_addr,
            static_dir,
            protected_prefix,
            login_path,
            dashboard_path,
        })
    }

    /// True when any admin value still carries its development default.
    pub fn uses_development_defaults(&self) -> bool {
        self.credentials.username == DEFAULT_ADMIN_USERNAME
            || self.credentials.password == DEFAULT_ADMIN_PASSWORD
            || self.secret_token == DEFAULT_ADMIN_SECRET_TOKEN
    }
}

/// Helper function to parse environment variable with a default value
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| ConfigError::ParseError(key.to_string(), format!("{}: {}", e, val))),
        Err(_) => Ok(default),
    }
}

fn non_empty_env_or_default(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    if value.is_empty() {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "cannot be empty".to_string(),
        ));
    }
    Ok(value)
}

fn path_env_or_default(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    if !value.starts_with('/') {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            "must start with '/'".to_string(),
        ));
    }
    Ok(value)
}

/// RFC 6265 cookie-octet check.
fn is_cookie_value(value: &str) -> bool {
    value
        .bytes()
        .all(|b| b.is_ascii_graphic() && !matches!(b, b'"' | b',' | b';' | b'\\'))
}
