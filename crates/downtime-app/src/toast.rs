// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::time::Duration;
use tracing::debug;

pub const TOAST_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastToken(u64);

impl ToastToken {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Schedules one-shot expiry callbacks. Implementations deliver `token` back
/// to the owning event loop after `delay`, which then dispatches
/// `AppCommand::ToastExpired(token)`. A cancelled handle must never deliver.
pub trait ExpiryScheduler {
    fn schedule(&mut self, delay: Duration, token: ToastToken) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceSelectionToast {
    selected: Option<String>,
    message: Option<String>,
    generation: u64,
    pending: Option<TimerHandle>,
    ttl: Duration,
}

impl Default for InstanceSelectionToast {
    fn default() -> Self {
        Self::with_ttl(TOAST_TTL)
    }
}

impl InstanceSelectionToast {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            selected: None,
            message: None,
            generation: 0,
            pending: None,
            ttl,
        }
    }

    pub fn selected_instance(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn select(&mut self, name: &str, scheduler: &mut dyn ExpiryScheduler) -> ToastToken {
        self.cancel_pending(scheduler);
        self.generation = self.generation.wrapping_add(1);
        let token = ToastToken(self.generation);
        self.selected = Some(name.to_owned());
        self.message = Some(format!("Selected: {name}"));
        self.pending = Some(scheduler.schedule(self.ttl, token));
        debug!(instance = name, token = token.get(), "instance selected");
        token
    }

    pub fn undo(&mut self, scheduler: &mut dyn ExpiryScheduler) {
        self.cancel_pending(scheduler);
        self.selected = None;
        self.message = None;
    }

    pub fn dismiss(&mut self, scheduler: &mut dyn ExpiryScheduler) {
        self.cancel_pending(scheduler);
        self.message = None;
    }

    /// Handles a fired timer. Returns whether the toast was hidden; stale
    /// tokens are ignored.
    pub fn expire(&mut self, token: ToastToken) -> bool {
        if token.0 != self.generation || self.pending.is_none() {
            debug!(token = token.get(), "stale toast timer ignored");
            return false;
        }
        self.pending = None;
        self.message = None;
        true
    }

    pub fn reset(&mut self, scheduler: &mut dyn ExpiryScheduler) {
        self.cancel_pending(scheduler);
        self.selected = None;
        self.message = None;
    }

    fn cancel_pending(&mut self, scheduler: &mut dyn ExpiryScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
    }
}
