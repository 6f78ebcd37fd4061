// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{CategoryRecord, CoreError};

/// Ordered, in-memory list of categories. Position is both identity and
/// display order, so deleting shifts every later index down by one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryStore {
    categories: Vec<CategoryRecord>,
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(categories: Vec<CategoryRecord>) -> Self {
        Self { categories }
    }

    pub fn list(&self) -> &[CategoryRecord] {
        &self.categories
    }

    pub fn get(&self, index: usize) -> Option<&CategoryRecord> {
        self.categories.get(index)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn create(&mut self, record: CategoryRecord) -> Result<usize, CoreError> {
        record.validate()?;
        let index = self.categories.len();
        debug!(index, tag = %record.tag, "category created");
        self.categories.push(record);
        Ok(index)
    }

    pub fn update(&mut self, index: usize, record: CategoryRecord) -> Result<(), CoreError> {
        let len = self.categories.len();
        let slot = self
            .categories
            .get_mut(index)
            .ok_or(CoreError::category_index(index, len))?;
        record.validate()?;
        debug!(index, tag = %record.tag, "category updated");
        *slot = record;
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<CategoryRecord, CoreError> {
        if index >= self.categories.len() {
            return Err(CoreError::category_index(index, self.categories.len()));
        }
        let removed = self.categories.remove(index);
        debug!(index, tag = %removed.tag, "category deleted");
        Ok(removed)
    }
}
