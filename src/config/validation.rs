use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.language.trim().is_empty() {
        errors.push("language: must not be empty".to_string());
    }

    if config.history.max_entries == 0 {
        errors.push("history.max_entries: must be at least 1".to_string());
    }

    let narrative = &config.narrative;
    if !(0.0..=2.0).contains(&narrative.temperature) {
        errors.push(format!(
            "narrative.temperature: must be within [0, 2], got {}",
            narrative.temperature
        ));
    }
    if narrative.max_tokens == 0 {
        errors.push("narrative.max_tokens: must be at least 1".to_string());
    }
    if narrative.model.trim().is_empty() {
        errors.push("narrative.model: must not be empty".to_string());
    }
    if !(narrative.endpoint.starts_with("http://") || narrative.endpoint.starts_with("https://")) {
        errors.push(format!(
            "narrative.endpoint: invalid '{}' - must start with http:// or https://",
            narrative.endpoint
        ));
    }
    if let Err(e) = humantime::parse_duration(narrative.timeout.trim()) {
        errors.push(format!(
            "narrative.timeout: invalid '{}' - {}",
            narrative.timeout, e
        ));
    }
    if narrative.api_key_env.trim().is_empty() {
        errors.push("narrative.api_key_env: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_temperature_out_of_range() {
        let mut config = Config::default();
        config.narrative.temperature = 2.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("narrative.temperature"));
    }

    #[test]
    fn test_invalid_timeout() {
        let mut config = Config::default();
        config.narrative.timeout = "soon".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("narrative.timeout"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = Config::default();
        config.narrative.endpoint = "api.openai.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("narrative.endpoint"));
    }

    #[test]
    fn test_zero_max_entries() {
        let mut config = Config::default();
        config.history.max_entries = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("history.max_entries"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = Config::default();
        config.narrative.max_tokens = 0; // Error 1
        config.narrative.model = " ".to_string(); // Error 2
        config.language = String::new(); // Error 3
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
