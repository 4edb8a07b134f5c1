//! Build-time configuration.
//!
//! Trunk/cargo pick these up from the environment when the bundle is built:
//!
//! - `FINANZAS_USE_PROD_URL`: `"true"` selects `FINANZAS_PROD_API_URL`
//! - `FINANZAS_PROD_API_URL` / `FINANZAS_DEV_API_URL`: API base URLs
//! - `FINANZAS_LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error`

use tracing::Level;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: Level,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self {
            api_base_url: resolve_base_url(
                option_env!("FINANZAS_USE_PROD_URL"),
                option_env!("FINANZAS_PROD_API_URL"),
                option_env!("FINANZAS_DEV_API_URL"),
            ),
            log_level: parse_log_level(option_env!("FINANZAS_LOG_LEVEL")),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

/// Pick the prod or dev URL, falling back to [DEFAULT_API_BASE_URL] when the
/// selected one is unset or blank.
pub fn resolve_base_url(use_prod: Option<&str>, prod: Option<&str>, dev: Option<&str>) -> String {
    let selected = if use_prod.map(str::trim) == Some("true") {
        prod
    } else {
        dev
    };

    let url = selected
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);

    url.trim_end_matches('/').to_string()
}

pub fn parse_log_level(raw: Option<&str>) -> Level {
    raw.and_then(|level| level.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prod_flag_selects_prod_url() {
        let url = resolve_base_url(
            Some("true"),
            Some("https://finanzas.example.com/"),
            Some("http://192.168.1.11:8000"),
        );

        assert_eq!(url, "https://finanzas.example.com");
    }

    #[test]
    fn anything_else_selects_dev_url() {
        let url = resolve_base_url(
            Some("false"),
            Some("https://finanzas.example.com"),
            Some("http://192.168.1.11:8000"),
        );

        assert_eq!(url, "http://192.168.1.11:8000");
    }

    #[test]
    fn unset_or_blank_urls_use_default() {
        assert_eq!(resolve_base_url(None, None, None), DEFAULT_API_BASE_URL);
        assert_eq!(
            resolve_base_url(Some("true"), Some("  "), Some("http://dev")),
            DEFAULT_API_BASE_URL
        );
    }

    #[test]
    fn log_level_defaults_to_info() {
        assert_eq!(parse_log_level(None), Level::INFO);
        assert_eq!(parse_log_level(Some("nonsense")), Level::INFO);
        assert_eq!(parse_log_level(Some("debug")), Level::DEBUG);
        assert_eq!(parse_log_level(Some("WARN")), Level::WARN);
    }
}
