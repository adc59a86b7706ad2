//! Configuration module for the Blufacade backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Credentials for the Cloudinary image host.
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to verify admin bearer tokens (HS256)
    pub jwt_secret: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Image host credentials; uploads fail when absent
    pub cloudinary: Option<CloudinaryConfig>,
    /// Timeout applied to every image host request
    pub upload_timeout: Duration,
    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
    /// Require a bearer token for careers page and job posting mutations
    pub protect_careers: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let jwt_secret = non_empty_var("BLUFACADE_JWT_SECRET");

        let db_path = env::var("BLUFACADE_DB_PATH")
            .unwrap_or_else(|_| "./data/blufacade.sqlite".to_string())
            .into();

        let bind_addr = parse_var("BLUFACADE_BIND_ADDR", "127.0.0.1:8080")?;

        let log_level = env::var("BLUFACADE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cloudinary = match (
            non_empty_var("BLUFACADE_CLOUDINARY_CLOUD_NAME"),
            non_empty_var("BLUFACADE_CLOUDINARY_API_KEY"),
            non_empty_var("BLUFACADE_CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        let upload_timeout =
            Duration::from_secs(parse_var("BLUFACADE_UPLOAD_TIMEOUT_SECS", "30")?);
        let max_upload_bytes = parse_var("BLUFACADE_MAX_UPLOAD_BYTES", "10485760")?;
        let protect_careers = parse_var("BLUFACADE_PROTECT_CAREERS", "false")?;

        Ok(Self {
            jwt_secret,
            db_path,
            bind_addr,
            log_level,
            cloudinary,
            upload_timeout,
            max_upload_bytes,
            protect_careers,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: &str) -> Result<T, String> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| format!("Invalid {} value: {:?}", key, raw))
}
