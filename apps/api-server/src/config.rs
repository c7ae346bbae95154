//! Application configuration loaded from environment variables.

use std::env;

use blog_core::domain::Locale;

#[cfg(feature = "database")]
use blog_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Locale used when a request names none (or an unsupported one).
    pub default_locale: Locale,
    #[cfg(feature = "database")]
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            default_locale: Self::parse_locale(env::var("APP_LOCALE").ok().as_deref()),
            #[cfg(feature = "database")]
            database: env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
                url,
                max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
                min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
                auto_schema: env::var("DB_AUTO_SCHEMA")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
            }),
        }
    }

    fn parse_locale(raw: Option<&str>) -> Locale {
        match raw {
            None => Locale::default(),
            Some(code) => Locale::from_code(code).unwrap_or_else(|| {
                tracing::warn!(code, "Unsupported APP_LOCALE, falling back to en");
                Locale::default()
            }),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_falls_back_to_english() {
        assert_eq!(AppConfig::parse_locale(None), Locale::En);
        assert_eq!(AppConfig::parse_locale(Some("it")), Locale::It);
        assert_eq!(AppConfig::parse_locale(Some("fr")), Locale::En);
    }
}
