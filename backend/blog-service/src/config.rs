/// Configuration management for Blog Service
///
/// Everything is read from environment variables (optionally seeded from a
/// `.env` file by the binary) with development defaults.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::clients::GeminiConfig;
use crate::services::AuthorDefaults;
use crate::views::DEFAULT_PAGE_SIZE;

/// Sample document shipped with the crate, independent of the working directory.
pub const DEFAULT_CONTENT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/db.json");

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Where the content document comes from
    pub content: ContentConfig,
    /// Presentation settings
    pub site: SiteConfig,
    /// AI drafting
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Local JSON document
    pub path: String,
    /// Remote JSON document; takes precedence over `path` when set
    pub url: Option<String>,
    pub fetch_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub page_size: usize,
    pub default_author: String,
    pub default_avatar_url: String,
    pub launch_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");
        let defaults = AuthorDefaults::default();
        let gemini_defaults = GeminiConfig::default();

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: lookup("BLOG_SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or_default(&lookup, "BLOG_SERVICE_PORT", 8080)?,
            },
            cors: {
                let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
                    Some(value) => value,
                    None if production => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    None => "http://localhost:4200".to_string(),
                };

                if production && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            content: ContentConfig {
                path: lookup("BLOG_CONTENT_PATH")
                    .unwrap_or_else(|| DEFAULT_CONTENT_PATH.to_string()),
                url: lookup("BLOG_CONTENT_URL").filter(|url| !url.trim().is_empty()),
                fetch_timeout_ms: parse_or_default(&lookup, "BLOG_CONTENT_TIMEOUT_MS", 10_000)?,
            },
            site: SiteConfig {
                page_size: match parse_or_default(&lookup, "BLOG_PAGE_SIZE", DEFAULT_PAGE_SIZE)? {
                    0 => return Err("BLOG_PAGE_SIZE must be at least 1".to_string()),
                    size => size,
                },
                default_author: lookup("BLOG_DEFAULT_AUTHOR").unwrap_or(defaults.author),
                default_avatar_url: lookup("BLOG_DEFAULT_AVATAR_URL")
                    .unwrap_or(defaults.avatar_url),
                launch_date: match lookup("BLOG_LAUNCH_DATE") {
                    Some(raw) => DateTime::parse_from_rfc3339(&raw)
                        .map(|date| date.with_timezone(&Utc))
                        .map_err(|e| format!("Failed to parse BLOG_LAUNCH_DATE='{}': {}", raw, e))?,
                    None => default_launch_date(),
                },
            },
            gemini: GeminiSettings {
                api_key: lookup("GEMINI_API_KEY")
                    .or_else(|| lookup("API_KEY"))
                    .filter(|key| !key.trim().is_empty()),
                model: lookup("GEMINI_MODEL").unwrap_or(gemini_defaults.model),
                base_url: lookup("GEMINI_BASE_URL").unwrap_or(gemini_defaults.base_url),
                timeout_ms: parse_or_default(
                    &lookup,
                    "GEMINI_TIMEOUT_MS",
                    gemini_defaults.timeout.as_millis() as u64,
                )?,
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }

    pub fn author_defaults(&self) -> AuthorDefaults {
        AuthorDefaults {
            author: self.site.default_author.clone(),
            avatar_url: self.site.default_avatar_url.clone(),
        }
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini.api_key.clone(),
            model: self.gemini.model.clone(),
            base_url: self.gemini.base_url.clone(),
            timeout: Duration::from_millis(self.gemini.timeout_ms),
            ..GeminiConfig::default()
        }
    }

    pub fn content_timeout(&self) -> Duration {
        Duration::from_millis(self.content.fetch_timeout_ms)
    }
}

/// 2025-09-01T00:00:00Z
pub fn default_launch_date() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_756_684_800, 0).unwrap_or_default()
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse()
            .map_err(|e| format!("Failed to parse {}='{}': {}", key, val, e)),
        None => Ok(default),
    }
}
