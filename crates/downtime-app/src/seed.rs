// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};

use crate::CategoryRecord;

pub const BUNDLED_SEED: &str = include_str!("../data/downtime.json");

pub fn bundled_seed() -> Result<Vec<CategoryRecord>> {
    parse_seed(BUNDLED_SEED).context("parse bundled category seed")
}

pub fn parse_seed(raw: &str) -> Result<Vec<CategoryRecord>> {
    let categories: Vec<CategoryRecord> = serde_json::from_str(raw)
        .context("decode category seed -- expected a JSON array of {tag, text, color, items}")?;
    for (position, category) in categories.iter().enumerate() {
        category
            .validate()
            .with_context(|| format!("seed entry {position} (tag {:?})", category.tag))?;
    }
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::{bundled_seed, parse_seed};
    use anyhow::Result;

    #[test]
    fn bundled_seed_parses() -> Result<()> {
        let categories = bundled_seed()?;
        assert!(!categories.is_empty());
        assert_eq!(categories[0].tag, "MACHINE_FAILURE");
        for category in &categories {
            assert!(category.validate().is_ok(), "tag {}", category.tag);
        }
        Ok(())
    }

    #[test]
    fn bundled_seed_has_no_duplicate_items_within_a_category() -> Result<()> {
        for category in bundled_seed()? {
            let mut seen = std::collections::BTreeSet::new();
            for item in &category.items {
                assert!(seen.insert(item), "duplicate {item} in {}", category.tag);
            }
        }
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = r##"[{"tag":"A","text":"B","color":"#fff","items":[],"icon":"x"}]"##;
        assert!(parse_seed(raw).is_err());
    }

    #[test]
    fn blank_tag_is_rejected_with_position() {
        let raw = r##"[{"tag":"A","text":"B","color":"#fff","items":[]},{"tag":"","text":"C","color":"#000","items":["x"]}]"##;
        let error = parse_seed(raw).expect_err("blank tag should fail");
        assert!(format!("{error:#}").contains("seed entry 1"));
    }

    #[test]
    fn empty_array_is_a_valid_seed() -> Result<()> {
        assert!(parse_seed("[]")?.is_empty());
        Ok(())
    }
}
