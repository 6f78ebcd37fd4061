// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{CoreError, MissingFields};

pub const DEFAULT_COLOR: &str = "#ff6b6b";
pub const CARD_PREVIEW_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryRecord {
    pub tag: String,
    pub text: String,
    pub color: String,
    pub items: Vec<String>,
}

impl Default for CategoryRecord {
    fn default() -> Self {
        Self {
            tag: String::new(),
            text: String::new(),
            color: DEFAULT_COLOR.to_owned(),
            items: Vec::new(),
        }
    }
}

impl CategoryRecord {
    pub fn new(
        tag: impl Into<String>,
        text: impl Into<String>,
        color: impl Into<String>,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
            color: color.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn missing_fields(&self) -> MissingFields {
        MissingFields {
            tag: self.tag.trim().is_empty(),
            text: self.text.trim().is_empty(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation { missing })
        }
    }

    pub fn contains_item(&self, name: &str) -> bool {
        self.items.iter().any(|item| item == name)
    }

    pub fn preview(&self) -> CardPreview<'_> {
        let shown = &self.items[..self.items.len().min(CARD_PREVIEW_LIMIT)];
        CardPreview {
            shown,
            hidden: self.items.len() - shown.len(),
        }
    }

    pub fn icon(&self) -> CategoryIcon {
        CategoryIcon::for_tag(&self.tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPreview<'a> {
    pub shown: &'a [String],
    pub hidden: usize,
}

impl CardPreview<'_> {
    pub fn more_label(&self) -> Option<String> {
        (self.hidden > 0).then(|| format!("+{} more items", self.hidden))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryIcon {
    Error,
    Build,
    Inventory,
    Person,
}

impl CategoryIcon {
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "MACHINE_FAILURE" => Self::Error,
            "PLANNED_MAINTENANCE" => Self::Build,
            "MATERIAL_SHORTAGE" => Self::Inventory,
            "OPERATOR_ISSUE" => Self::Person,
            _ => Self::Error,
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Error => "!",
            Self::Build => "⚒",
            Self::Inventory => "▤",
            Self::Person => "☺",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryIcon, CategoryRecord, DEFAULT_COLOR};
    use crate::CoreError;

    fn record(items: &[&str]) -> CategoryRecord {
        CategoryRecord::new(
            "MACHINE_FAILURE",
            "Machine Failure",
            "#ff0000",
            items.to_vec(),
        )
    }

    #[test]
    fn default_record_is_blank_with_default_color() {
        let blank = CategoryRecord::default();
        assert!(blank.tag.is_empty());
        assert!(blank.text.is_empty());
        assert_eq!(blank.color, DEFAULT_COLOR);
        assert!(blank.items.is_empty());
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let mut candidate = record(&[]);
        candidate.tag = "   ".to_owned();
        let error = candidate.validate().expect_err("blank tag should fail");
        match error {
            CoreError::Validation { missing } => {
                assert!(missing.tag);
                assert!(!missing.text);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn color_is_not_validated() {
        let mut candidate = record(&[]);
        candidate.color = "not a color".to_owned();
        assert!(candidate.validate().is_ok());
    }

    #[test]
    fn preview_caps_at_four_items() {
        let full = record(&["a", "b", "c", "d", "e", "f"]);
        let preview = full.preview();
        assert_eq!(preview.shown, &full.items[..4]);
        assert_eq!(preview.hidden, 2);
        assert_eq!(preview.more_label().as_deref(), Some("+2 more items"));

        let short = record(&["a", "b"]);
        assert_eq!(short.preview().hidden, 0);
        assert_eq!(short.preview().more_label(), None);
    }

    #[test]
    fn icon_follows_tag() {
        assert_eq!(
            CategoryIcon::for_tag("PLANNED_MAINTENANCE"),
            CategoryIcon::Build
        );
        assert_eq!(
            CategoryIcon::for_tag("MATERIAL_SHORTAGE"),
            CategoryIcon::Inventory
        );
        assert_eq!(
            CategoryIcon::for_tag("OPERATOR_ISSUE"),
            CategoryIcon::Person
        );
        assert_eq!(CategoryIcon::for_tag("POWER_OUTAGE"), CategoryIcon::Error);
        assert_eq!(CategoryIcon::for_tag("anything"), CategoryIcon::Error);
    }
}
