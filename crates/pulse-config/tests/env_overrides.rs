//! `PULSE_*` environment variables override every other layer.

use figment::Jail;
use pretty_assertions::assert_eq;
use pulse_config::PulseConfig;

#[test]
fn env_vars_map_to_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("PULSE_DATABASE__URL", "libsql://pulse-prod.turso.io");
        jail.set_env("PULSE_DATABASE__AUTH_TOKEN", "db-token");
        jail.set_env("PULSE_AUTH__JWT_SECRET", "from-env");
        jail.set_env("PULSE_SERVER__PORT", "8088");
        jail.set_env("PULSE_GENERAL__SEED_DEMO_DATA", "false");

        let config = PulseConfig::load().expect("config loads");
        assert_eq!(config.database.url, "libsql://pulse-prod.turso.io");
        assert_eq!(config.database.auth_token, "db-token");
        assert!(config.database.is_remote());
        assert_eq!(config.auth.jwt_secret, "from-env");
        assert_eq!(config.server.port, 8088);
        assert!(!config.general.seed_demo_data);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".pulse")?;
        jail.create_file(
            ".pulse/config.toml",
            r#"
[server]
host = "0.0.0.0"
port = 9000
"#,
        )?;
        jail.set_env("PULSE_SERVER__PORT", "9100");

        let config = PulseConfig::load().expect("config loads");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        Ok(())
    });
}

#[test]
fn malformed_env_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("PULSE_SERVER__PORT", "not-a-port");
        assert!(PulseConfig::load().is_err());
        Ok(())
    });
}
