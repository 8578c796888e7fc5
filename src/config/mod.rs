//! Configuration module for the site server.
//!
//! All configuration is loaded from environment variables (and an optional `.env`).
//! Missing backend credentials never abort startup; they are reported and the
//! client is built with placeholders so every backend call fails visibly instead.

use std::env;
use std::net::SocketAddr;

/// Default Cosmic REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.cosmicjs.com/v3";

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Placeholder used in place of a missing credential.
const MISSING_PLACEHOLDER: &str = "missing-configuration";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cosmic bucket slug
    pub bucket_slug: Option<String>,
    /// Read key for the bucket
    pub read_key: Option<String>,
    /// Write key for the bucket
    pub write_key: Option<String>,
    /// Base URL of the content API
    pub api_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Pre-shared key guarding the diagnostics endpoint
    pub diagnostics_psk: Option<String>,
    /// Slug of the page object that carries the FAQ list
    pub faqs_slug: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bucket_slug = non_empty_var("COSMIC_BUCKET_SLUG");
        let read_key = non_empty_var("COSMIC_READ_KEY");
        let write_key = non_empty_var("COSMIC_WRITE_KEY");

        let api_url = env::var("COSMIC_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = env::var("SITE_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().unwrap_or_else(|_| {
            eprintln!(
                "Invalid SITE_BIND_ADDR {:?}, falling back to {}",
                bind_addr, DEFAULT_BIND_ADDR
            );
            default_bind_addr()
        });

        let log_level = env::var("SITE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let diagnostics_psk = non_empty_var("SITE_DIAGNOSTICS_PSK");
        let faqs_slug = env::var("SITE_FAQS_SLUG").unwrap_or_else(|_| "faqs".to_string());

        Self {
            bucket_slug,
            read_key,
            write_key,
            api_url,
            bind_addr,
            log_level,
            diagnostics_psk,
            faqs_slug,
        }
    }

    /// Names of the required backend variables that are not set.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.bucket_slug.is_none() {
            missing.push("COSMIC_BUCKET_SLUG");
        }
        if self.read_key.is_none() {
            missing.push("COSMIC_READ_KEY");
        }
        if self.write_key.is_none() {
            missing.push("COSMIC_WRITE_KEY");
        }
        missing
    }

    /// Bucket slug, or a placeholder that makes backend calls fail.
    pub fn bucket_slug_or_placeholder(&self) -> &str {
        self.bucket_slug.as_deref().unwrap_or(MISSING_PLACEHOLDER)
    }

    pub fn read_key_or_placeholder(&self) -> &str {
        self.read_key.as_deref().unwrap_or(MISSING_PLACEHOLDER)
    }

    pub fn write_key_or_placeholder(&self) -> &str {
        self.write_key.as_deref().unwrap_or(MISSING_PLACEHOLDER)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: &[&str] = &[
        "COSMIC_BUCKET_SLUG",
        "COSMIC_READ_KEY",
        "COSMIC_WRITE_KEY",
        "COSMIC_API_URL",
        "SITE_BIND_ADDR",
        "SITE_LOG_LEVEL",
        "SITE_DIAGNOSTICS_PSK",
        "SITE_FAQS_SLUG",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let config = Config::from_env();

        assert!(config.bucket_slug.is_none());
        assert!(config.diagnostics_psk.is_none());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.faqs_slug, "faqs");
    }

    #[test]
    fn test_missing_credentials_are_listed_not_fatal() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("COSMIC_BUCKET_SLUG", "bugged-night");
        env::set_var("COSMIC_WRITE_KEY", "   ");

        let config = Config::from_env();

        assert_eq!(
            config.missing_credentials(),
            vec!["COSMIC_READ_KEY", "COSMIC_WRITE_KEY"]
        );
        assert_eq!(config.bucket_slug_or_placeholder(), "bugged-night");
        assert_eq!(config.read_key_or_placeholder(), MISSING_PLACEHOLDER);
        clear_env();
    }

    #[test]
    fn test_invalid_bind_addr_falls_back() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();
        env::set_var("SITE_BIND_ADDR", "not-an-address");
        env::set_var("COSMIC_API_URL", "http://localhost:9000/v3/");

        let config = Config::from_env();

        assert_eq!(config.bind_addr, default_bind_addr());
        assert_eq!(config.api_url, "http://localhost:9000/v3");
        clear_env();
    }
}
