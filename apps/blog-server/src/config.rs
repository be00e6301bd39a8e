//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_core::BlogSettings;
use blog_core::pagination::DEFAULT_PAGE_SIZE;
use blog_infra::database::DatabaseConfig;

/// Outgoing mail configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub from: String,
    /// HTTP mail relay; console output when unset.
    pub webhook_url: Option<String>,
    pub timeout: Duration,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub site_url: String,
    pub posts_per_page: usize,
    pub mail: MailConfig,
    /// Fill the in-memory store with a demo author and posts.
    pub seed_demo: bool,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 100),
            min_connections: env_or("DB_MIN_CONNECTIONS", 10),
        });

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env_or("PORT", 8080);
        let site_url = env::var("SITE_URL").unwrap_or_else(|_| format!("http://{host}:{port}"));

        let mail = MailConfig {
            from: env::var("MAIL_FROM").unwrap_or_else(|_| "blog@localhost".to_string()),
            webhook_url: env::var("MAIL_WEBHOOK_URL").ok().filter(|u| !u.is_empty()),
            timeout: Duration::from_secs(env_or("MAIL_TIMEOUT_SECS", 10)),
        };

        Self {
            host,
            port,
            database,
            site_url,
            posts_per_page: env_or("POSTS_PER_PAGE", DEFAULT_PAGE_SIZE),
            mail,
            seed_demo: env_flag("SEED_DEMO"),
        }
    }

    pub fn blog_settings(&self) -> BlogSettings {
        BlogSettings {
            site_url: self.site_url.clone(),
            mail_from: self.mail.from.clone(),
            mail_timeout: self.mail.timeout,
            posts_per_page: self.posts_per_page,
        }
    }
}
