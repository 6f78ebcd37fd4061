// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use downtime_app::{CategoryRecord, bundled_seed, parse_seed};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn load_categories(override_path: Option<&Path>) -> Result<Vec<CategoryRecord>> {
    let Some(path) = override_path else {
        let categories = bundled_seed()?;
        info!(count = categories.len(), "loaded bundled categories");
        return Ok(categories);
    };

    let raw = fs::read_to_string(path).with_context(|| {
        format!(
            "read category seed {} -- check [data] seed_path or --seed",
            path.display()
        )
    })?;
    let categories =
        parse_seed(&raw).with_context(|| format!("load category seed {}", path.display()))?;
    info!(
        count = categories.len(),
        path = %path.display(),
        "loaded categories"
    );
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::load_categories;
    use anyhow::Result;
    use downtime_testkit::{category, sample_categories, write_seed_file};

    #[test]
    fn no_override_uses_bundled_categories() -> Result<()> {
        let categories = load_categories(None)?;
        assert_eq!(categories.len(), 8);
        assert_eq!(categories[0].tag, "MACHINE_FAILURE");
        Ok(())
    }

    #[test]
    fn override_file_replaces_bundled_categories() -> Result<()> {
        let (_dir, path) = write_seed_file(&sample_categories())?;
        assert_eq!(load_categories(Some(&path))?, sample_categories());
        Ok(())
    }

    #[test]
    fn missing_override_file_names_the_path() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("absent.json");
        let error = load_categories(Some(&path)).expect_err("missing file should fail");
        let message = error.to_string();
        assert!(message.contains("absent.json"));
        assert!(message.contains("--seed"));
        Ok(())
    }

    #[test]
    fn override_with_blank_tag_is_rejected() -> Result<()> {
        let (_dir, path) = write_seed_file(&[category("", "Nameless", &["Pump-3"])])?;
        let error = load_categories(Some(&path)).expect_err("blank tag should fail");
        let chain = format!("{error:#}");
        assert!(chain.contains("seed entry 0"), "got {chain}");
        Ok(())
    }

    #[test]
    fn override_with_unknown_field_is_rejected() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("extra.json");
        std::fs::write(
            &path,
            r##"[{"tag":"T","text":"Text","color":"#ff6b6b","items":[],"icon":"error"}]"##,
        )?;
        let error = load_categories(Some(&path)).expect_err("unknown field should fail");
        assert!(format!("{error:#}").contains("icon"));
        Ok(())
    }
}
