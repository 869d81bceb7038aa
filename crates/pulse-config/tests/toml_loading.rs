//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use pulse_config::PulseConfig;

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
url = "./pulse.db"

[auth]
jwt_secret = "toml-secret"
token_ttl_hours = 24
bcrypt_cost = 10

[server]
host = "0.0.0.0"
port = 8080
cors_allow_any = false

[general]
seed_demo_data = false
default_limit = 25
trend_days = 14
"#,
        )?;

        let config: PulseConfig = Figment::from(Serialized::defaults(PulseConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.url, "./pulse.db");
        assert!(config.database.is_configured());
        assert!(!config.database.is_remote());
        assert_eq!(config.auth.jwt_secret, "toml-secret");
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.auth.bcrypt_cost, 10);
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
        assert!(!config.server.cors_allow_any);
        assert!(!config.general.seed_demo_data);
        assert_eq!(config.general.default_limit, 25);
        assert_eq!(config.general.trend_days, 14);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[auth]
jwt_secret = "only-the-secret"
"#,
        )?;

        let config: PulseConfig = Figment::from(Serialized::defaults(PulseConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.auth.jwt_secret, "only-the-secret");
        assert_eq!(config.auth.token_ttl_hours, 168);
        assert_eq!(config.auth.bcrypt_cost, 12);
        assert_eq!(config.server.port, 3000);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".pulse")?;
        jail.create_file(
            ".pulse/config.toml",
            r#"
[general]
trend_days = 7
"#,
        )?;

        let config = PulseConfig::load().expect("config loads");
        assert_eq!(config.general.trend_days, 7);
        Ok(())
    });
}

#[test]
fn wrong_type_in_toml_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
port = "eighty"
"#,
        )?;

        let result: Result<PulseConfig, _> =
            Figment::from(Serialized::defaults(PulseConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
