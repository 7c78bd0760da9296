use crate::app_config::AppConfig;
use crate::ConfigError;

const TIMEOUT_FLOOR_SECS: u64 = 15;
const TIMEOUT_CEIL_SECS: u64 = 25;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = or_default("OEDB_BASE_URL", "https://spareto.com")
        .trim_end_matches('/')
        .to_string();
    let http_timeout_secs =
        parse_u64("OEDB_HTTP_TIMEOUT_SECS", "20")?.clamp(TIMEOUT_FLOOR_SECS, TIMEOUT_CEIL_SECS);
    let user_agent = or_default("OEDB_USER_AGENT", "oedb/0.1 (parts-crossref)");
    let log_level = or_default("OEDB_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("OEDB_DATA_DIR", "./data"));
    let brands_path = lookup("OEDB_BRANDS_PATH").ok().map(PathBuf::from);

    Ok(AppConfig {
        base_url,
        http_timeout_secs,
        user_agent,
        log_level,
        data_dir,
        brands_path,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn defaults_apply_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.base_url, "https://spareto.com");
        assert_eq!(cfg.http_timeout_secs, 20);
        assert_eq!(cfg.user_agent, "oedb/0.1 (parts-crossref)");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.data_dir.to_str(), Some("./data"));
        assert!(cfg.brands_path.is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut map = HashMap::new();
        map.insert("OEDB_BASE_URL", "https://catalog.example.com/");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.base_url, "https://catalog.example.com");
    }

    #[test]
    fn timeout_is_clamped_to_window() {
        let mut map = HashMap::new();
        map.insert("OEDB_HTTP_TIMEOUT_SECS", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.http_timeout_secs, 15);

        let mut map = HashMap::new();
        map.insert("OEDB_HTTP_TIMEOUT_SECS", "120");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.http_timeout_secs, 25);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut map = HashMap::new();
        map.insert("OEDB_HTTP_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OEDB_HTTP_TIMEOUT_SECS"),
            "expected InvalidEnvVar(OEDB_HTTP_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn brands_path_override() {
        let mut map = HashMap::new();
        map.insert("OEDB_BRANDS_PATH", "./config/brands.yaml");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.brands_path.as_deref().and_then(|p| p.to_str()),
            Some("./config/brands.yaml")
        );
    }
}
