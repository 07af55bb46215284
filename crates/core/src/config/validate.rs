use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Site URL is not blank
/// - API base URL has an http(s) scheme and a non-zero timeout
/// - Liveness concurrency and probe deadline are not 0
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.site.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "site.url cannot be empty".to_string(),
        ));
    }

    let base = &config.api.base_url;
    if !base.starts_with("http://") && !base.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "api.base_url must start with http:// or https://, got {:?}",
            base
        )));
    }

    if config.api.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "api.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.liveness.max_concurrent_probes == 0 {
        return Err(ConfigError::ValidationError(
            "liveness.max_concurrent_probes cannot be 0".to_string(),
        ));
    }

    if config.liveness.probe_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "liveness.probe_timeout_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn base_config() -> Config {
        load_config_from_str(
            r#"
[site]
url = "thepiratebay.org"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn test_validate_blank_site_fails() {
        let mut config = base_config();
        config.site.url = "  ".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_api_url_without_scheme_fails() {
        let mut config = base_config();
        config.api.base_url = "apibay.org".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_concurrency_fails() {
        let mut config = base_config();
        config.liveness.max_concurrent_probes = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("max_concurrent_probes"));
    }

    #[test]
    fn test_validate_zero_timeouts_fail() {
        let mut config = base_config();
        config.api.timeout_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = base_config();
        config.liveness.probe_timeout_ms = 0;
        assert!(validate_config(&config).is_err());
    }
}
