// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DOWNTIME_LOG";

pub fn resolve_filter(configured: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(configured).with_context(|| {
        format!("invalid log level {configured:?} -- fix [log] level or set {LOG_ENV}")
    })
}

pub fn init(path: &Path, configured_level: &str) -> Result<()> {
    let filter = resolve_filter(configured_level)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| {
            format!(
                "open log file {} -- set [log] path to a writable location",
                path.display()
            )
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

#[cfg(test)]
mod tests {
    use super::{LOG_ENV, resolve_filter};
    use anyhow::Result;
    use std::sync::{Mutex, OnceLock};

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn configured_level_is_used_without_env() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_ENV);
        }
        let filter = resolve_filter("downtime_app=debug")?;
        assert_eq!(filter.to_string(), "downtime_app=debug");
        Ok(())
    }

    #[test]
    fn env_filter_overrides_configured_level() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var(LOG_ENV, "warn");
        }
        let filter = resolve_filter("debug");
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_ENV);
        }
        assert_eq!(filter?.to_string(), "warn");
        Ok(())
    }

    #[test]
    fn invalid_level_points_at_config_key() {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var(LOG_ENV);
        }
        let error = resolve_filter("downtime=loud").expect_err("bad filter should fail");
        assert!(error.to_string().contains("[log] level"));
    }
}
