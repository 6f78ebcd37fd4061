// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{CategoryRecord, CategoryStore, CoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(usize),
}

impl FormMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Create => "Add Category",
            Self::Edit(_) => "Edit Category",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Created(usize),
    Updated(usize),
}

impl FormOutcome {
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Created(_) => "Category created successfully",
            Self::Updated(_) => "Category updated successfully",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFormState {
    mode: FormMode,
    draft: CategoryRecord,
    instance_input: String,
}

impl CategoryFormState {
    pub fn open_for_create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: CategoryRecord::default(),
            instance_input: String::new(),
        }
    }

    pub fn open_for_edit(index: usize, record: &CategoryRecord) -> Self {
        Self {
            mode: FormMode::Edit(index),
            draft: record.clone(),
            instance_input: String::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &CategoryRecord {
        &self.draft
    }

    pub fn instance_input(&self) -> &str {
        &self.instance_input
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.draft.tag = tag.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.draft.color = color.into();
    }

    pub fn set_instance_input(&mut self, input: impl Into<String>) {
        self.instance_input = input.into();
    }

    pub fn add_item(&mut self, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.draft.contains_item(trimmed) {
            return false;
        }
        self.draft.items.push(trimmed.to_owned());
        true
    }

    /// Adds the pending input box value; the box is cleared only when the
    /// item was actually added.
    pub fn commit_instance_input(&mut self) -> bool {
        let input = std::mem::take(&mut self.instance_input);
        if self.add_item(&input) {
            true
        } else {
            self.instance_input = input;
            false
        }
    }

    pub fn remove_item(&mut self, index: usize) -> Result<String, CoreError> {
        if index >= self.draft.items.len() {
            return Err(CoreError::instance_index(index, self.draft.items.len()));
        }
        Ok(self.draft.items.remove(index))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.draft.validate()
    }

    pub fn rebase_after_removal(&mut self, removed: usize) -> bool {
        match self.mode {
            FormMode::Edit(index) if index == removed => false,
            FormMode::Edit(index) if index > removed => {
                self.mode = FormMode::Edit(index - 1);
                true
            }
            _ => true,
        }
    }

    pub fn submit(&self, store: &mut CategoryStore) -> Result<FormOutcome, CoreError> {
        self.validate()?;
        match self.mode {
            FormMode::Create => store.create(self.draft.clone()).map(FormOutcome::Created),
            FormMode::Edit(index) => store
                .update(index, self.draft.clone())
                .map(|()| FormOutcome::Updated(index)),
        }
    }
}
