//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed cwd and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use insight_config::InsightsConfig;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
host = "127.0.0.1"
port = 8088
cors_enabled = false

[database]
path = "/var/lib/insights/data.db"

[import]
long_line_warn_chars = 12000
"#,
        )?;

        let config: InsightsConfig = Figment::from(Serialized::defaults(InsightsConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.listen_addr(), "127.0.0.1:8088");
        assert!(!config.server.cors_enabled);
        assert_eq!(config.database.path, "/var/lib/insights/data.db");
        assert_eq!(config.import.long_line_warn_chars, 12000);
        // Untouched keys keep their defaults.
        assert_eq!(config.import.max_upload_bytes, 10 * 1024 * 1024);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".insights")?;
        jail.create_file(".insights/config.toml", "[database]\npath = \"local.db\"\n")?;

        let config = InsightsConfig::load().expect("config loads");
        assert_eq!(config.database.path, "local.db");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".insights")?;
        jail.create_file(".insights/config.toml", "[server]\nport = 4000\n")?;
        jail.set_env("INSIGHTS_SERVER__PORT", "5050");
        jail.set_env("INSIGHTS_DATABASE__PATH", ":memory:");

        let config = InsightsConfig::load().expect("config loads");
        assert_eq!(config.server.port, 5050);
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("INSIGHTS_SERVER__PORT", "0");
        assert!(InsightsConfig::load().is_err());
        Ok(())
    });
}
