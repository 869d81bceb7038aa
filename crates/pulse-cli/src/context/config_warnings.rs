use pulse_config::PulseConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &PulseConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &PulseConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.database.is_configured() && has_single_underscore(&env_keys, "PULSE_DATABASE") {
        warnings.push(
            "Database config appears default while PULSE_DATABASE* env vars exist. Use double underscores (example: PULSE_DATABASE__URL)."
                .to_string(),
        );
    }

    if !config.auth.is_configured() && has_single_underscore(&env_keys, "PULSE_AUTH") {
        warnings.push(
            "Auth config appears default while PULSE_AUTH* env vars exist. Use double underscores (example: PULSE_AUTH__JWT_SECRET)."
                .to_string(),
        );
    }

    warnings
}

/// `PULSE_DATABASE_URL` instead of `PULSE_DATABASE__URL`.
fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use pulse_config::{AuthConfig, DatabaseConfig, PulseConfig};

    use super::collect_unconfigured_warnings;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &PulseConfig::default(),
            env(&[
                ("PULSE_DATABASE_URL", "file.db"),
                ("PULSE_AUTH_JWT_SECRET", "s3cret"),
            ]),
        );
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn no_warning_for_correct_keys() {
        let warnings = collect_unconfigured_warnings(
            &PulseConfig::default(),
            env(&[("PULSE_DATABASE__URL", ""), ("PULSE_LOG", "debug")]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn no_warning_when_sections_are_configured() {
        let config = PulseConfig {
            database: DatabaseConfig {
                url: "pulse.db".to_string(),
                auth_token: String::new(),
            },
            auth: AuthConfig {
                jwt_secret: "s3cret".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let warnings = collect_unconfigured_warnings(
            &config,
            env(&[
                ("PULSE_DATABASE_URL", "pulse.db"),
                ("PULSE_AUTH_JWT_SECRET", "s3cret"),
            ]),
        );
        assert!(warnings.is_empty());
    }
}
