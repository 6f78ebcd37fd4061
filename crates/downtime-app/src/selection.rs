// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::Duration;
use tracing::debug;

use crate::{CoreError, ExpiryScheduler, InstanceSelectionToast};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    List,
    Detail(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailSession {
    pub search_query: String,
    pub toast: InstanceSelectionToast,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorySelection {
    view: View,
    session: DetailSession,
}

impl CategorySelection {
    pub fn with_toast_ttl(ttl: Duration) -> Self {
        Self {
            view: View::List,
            session: DetailSession {
                search_query: String::new(),
                toast: InstanceSelectionToast::with_ttl(ttl),
            },
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self.view {
            View::List => None,
            View::Detail(index) => Some(index),
        }
    }

    pub fn session(&self) -> &DetailSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut DetailSession {
        &mut self.session
    }

    pub fn open(
        &mut self,
        index: usize,
        category_count: usize,
        scheduler: &mut dyn ExpiryScheduler,
    ) -> Result<(), CoreError> {
        if index >= category_count {
            return Err(CoreError::category_index(index, category_count));
        }
        if self.view != View::List {
            self.reset_session(scheduler);
        }
        debug!(index, "category opened");
        self.view = View::Detail(index);
        Ok(())
    }

    pub fn back(&mut self, scheduler: &mut dyn ExpiryScheduler) {
        self.reset_session(scheduler);
        self.view = View::List;
    }

    /// Keeps the selection pointing at the same record after the store
    /// removed `removed`. Returns true when the detail view was closed.
    pub fn forget_removed(&mut self, removed: usize, scheduler: &mut dyn ExpiryScheduler) -> bool {
        match self.view {
            View::Detail(index) if index == removed => {
                self.back(scheduler);
                true
            }
            View::Detail(index) if index > removed => {
                self.view = View::Detail(index - 1);
                false
            }
            _ => false,
        }
    }

    fn reset_session(&mut self, scheduler: &mut dyn ExpiryScheduler) {
        self.session.search_query.clear();
        self.session.toast.reset(scheduler);
    }
}
