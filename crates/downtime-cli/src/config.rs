// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "downtime";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_TOAST_TIMEOUT: &str = "5s";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Data {
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ui {
    pub toast_timeout: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            toast_timeout: Some(DEFAULT_TOAST_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("DOWNTIME_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set DOWNTIME_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value.get("version").and_then(toml::Value::as_integer);
        if version.is_none() {
            bail!(
                "config file {} has no version -- add `version = 1` at the top and retry",
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                self.version,
                path.display()
            );
        }

        if let Some(seed_path) = &self.data.seed_path
            && seed_path.trim().is_empty()
        {
            bail!(
                "data.seed_path in {} is empty -- remove it to use the bundled categories",
                path.display()
            );
        }

        if let Some(timeout) = &self.ui.toast_timeout {
            let parsed = parse_duration(timeout)
                .with_context(|| format!("ui.toast_timeout in {}", path.display()))?;
            if parsed <= Duration::ZERO {
                bail!(
                    "ui.toast_timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        if let Some(level) = &self.log.level
            && level.trim().is_empty()
        {
            bail!(
                "log.level in {} is empty -- use a filter such as \"info\" or \"downtime_app=debug\"",
                path.display()
            );
        }

        Ok(())
    }

    pub fn seed_path(&self) -> Option<PathBuf> {
        self.data.seed_path.as_deref().map(PathBuf::from)
    }

    pub fn toast_timeout(&self) -> Result<Duration> {
        parse_duration(
            self.ui
                .toast_timeout
                .as_deref()
                .unwrap_or(DEFAULT_TOAST_TIMEOUT),
        )
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log] path in the config file")
        })?;
        Ok(data_root.join(APP_NAME).join("downtime.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# downtime config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. Defaults to the bundled category list.\n# seed_path = \"/absolute/path/to/categories.json\"\n\n[ui]\n# How long the selection toast stays up: <N>ms, <N>s or <N>m\ntoast_timeout = \"{}\"\n\n[log]\n# Overridden by DOWNTIME_LOG when set.\nlevel = \"{}\"\n# path = \"/absolute/path/to/downtime.log\"\n",
            path.display(),
            DEFAULT_TOAST_TIMEOUT,
            DEFAULT_LOG_LEVEL,
        )
    }
}

pub fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("duration {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}

#[cfg(test)]
mod tests {
    use super::{Config, parse_duration};
    use anyhow::Result;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.toast_timeout()?, Duration::from_secs(5));
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.seed_path(), None);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_fix() -> Result<()> {
        let (_temp, path) = write_config("[ui]\ntoast_timeout = \"3s\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        assert!(error.to_string().contains("add `version = 1`"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[data]\nseed_path = \"/srv/plant/categories.json\"\n[ui]\ntoast_timeout = \"2500ms\"\n[log]\nlevel = \"debug\"\npath = \"/tmp/downtime-test.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(
            config.seed_path(),
            Some(PathBuf::from("/srv/plant/categories.json"))
        );
        assert_eq!(config.toast_timeout()?, Duration::from_millis(2500));
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_path()?, PathBuf::from("/tmp/downtime-test.log"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\ntheme = \"dark\"\n")?;
        let error = Config::load(&path).expect_err("unknown key should fail");
        assert!(format!("{error:#}").contains("theme"));
        Ok(())
    }

    #[test]
    fn zero_toast_timeout_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\ntoast_timeout = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn blank_seed_path_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[data]\nseed_path = \"  \"\n")?;
        let error = Config::load(&path).expect_err("blank seed path should fail");
        assert!(error.to_string().contains("bundled categories"));
        Ok(())
    }

    #[test]
    fn log_path_defaults_under_data_dir() -> Result<()> {
        let config = Config::default();
        let path = config.log_path()?;
        assert!(
            path.ends_with("downtime/downtime.log"),
            "got {}",
            path.display()
        );
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("DOWNTIME_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("DOWNTIME_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("DOWNTIME_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("downtime/config.toml"));
        Ok(())
    }

    #[test]
    fn durations_parse_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        Ok(())
    }

    #[test]
    fn invalid_duration_is_rejected() {
        let error = parse_duration("soon").expect_err("invalid duration should fail");
        assert!(error.to_string().contains("invalid duration"));
    }

    #[test]
    fn oversized_minutes_are_rejected() {
        let error = parse_duration("307445734561825862m").expect_err("overflow should fail");
        assert!(error.to_string().contains("too large"));
    }

    #[test]
    fn oversized_toast_timeout_fails_config_load() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[ui]\ntoast_timeout = \"307445734561825862m\"\n")?;
        let error = Config::load(&path).expect_err("overflowing timeout should fail");
        assert!(format!("{error:#}").contains("too large"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_loader() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[data]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.toast_timeout()?, Duration::from_secs(5));
        Ok(())
    }
}
