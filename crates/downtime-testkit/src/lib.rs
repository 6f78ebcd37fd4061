// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use downtime_app::{CategoryRecord, ExpiryScheduler, TimerHandle, ToastToken};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

const TAGS: [(&str, &str); 8] = [
    ("MACHINE_FAILURE", "Machine Failure"),
    ("PLANNED_MAINTENANCE", "Planned Maintenance"),
    ("MATERIAL_SHORTAGE", "Material Shortage"),
    ("OPERATOR_ISSUE", "Operator Issue"),
    ("QUALITY_CONTROL", "Quality Control"),
    ("POWER_OUTAGE", "Power Outage"),
    ("TOOLING_ISSUE", "Tooling Issue"),
    ("ENVIRONMENTAL", "Environmental"),
];

const COLORS: [&str; 6] = [
    "#ff6b6b", "#4dabf7", "#fcc419", "#51cf66", "#cc5de8", "#868e96",
];

const EQUIPMENT: [&str; 12] = [
    "Press", "Pump", "Valve", "Conveyor", "Lathe", "Mixer", "Oven", "Robot", "Compressor",
    "Chiller", "Boiler", "Sealer",
];

#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    pending: BTreeMap<u64, (Duration, ToastToken)>,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }

    /// Moves the clock forward and returns the tokens whose deadlines
    /// passed, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<ToastToken> {
        self.now += by;
        let mut due: Vec<(Duration, u64, ToastToken)> = self
            .pending
            .iter()
            .filter(|(_, (deadline, _))| *deadline <= self.now)
            .map(|(handle, (deadline, token))| (*deadline, *handle, *token))
            .collect();
        due.sort();
        for (_, handle, _) in &due {
            self.pending.remove(handle);
        }
        due.into_iter().map(|(_, _, token)| token).collect()
    }
}

impl ExpiryScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, token: ToastToken) -> TimerHandle {
        self.next_handle += 1;
        self.pending
            .insert(self.next_handle, (self.now + delay, token));
        TimerHandle::new(self.next_handle)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.pending.remove(&handle.get()).is_some() {
            self.cancelled += 1;
        }
    }
}

pub fn category(tag: &str, text: &str, items: &[&str]) -> CategoryRecord {
    CategoryRecord::new(tag, text, "#ff6b6b", items.iter().copied())
}

pub fn sample_categories() -> Vec<CategoryRecord> {
    vec![
        category(
            "MACHINE_FAILURE",
            "Machine Failure",
            &["Press-1", "conveyor", "Pump-3", "Valve-7", "Lathe-2"],
        ),
        category("POWER_OUTAGE", "Power Outage", &["Main Feed", "UPS Fault"]),
        category("ENVIRONMENTAL", "Environmental", &[]),
    ]
}

pub fn write_seed_file(categories: &[CategoryRecord]) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("downtime.json");
    let raw = serde_json::to_string_pretty(categories).context("encode seed")?;
    std::fs::write(&path, raw).with_context(|| format!("write seed {}", path.display()))?;
    Ok((dir, path))
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

#[derive(Debug, Clone)]
pub struct CategoryFaker {
    rng: DeterministicRng,
}

impl CategoryFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn category(&mut self) -> CategoryRecord {
        let (tag, text) = TAGS[self.rng.int_n(TAGS.len())];
        let color = COLORS[self.rng.int_n(COLORS.len())];
        let count = self.rng.int_n(9);
        let mut items: Vec<String> = Vec::with_capacity(count);
        while items.len() < count {
            let name = format!(
                "{}-{}",
                EQUIPMENT[self.rng.int_n(EQUIPMENT.len())],
                self.rng.int_n(20) + 1
            );
            if !items.contains(&name) {
                items.push(name);
            }
        }
        CategoryRecord::new(tag, text, color, items)
    }

    pub fn categories(&mut self, count: usize) -> Vec<CategoryRecord> {
        (0..count).map(|_| self.category()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryFaker, ManualScheduler, sample_categories, write_seed_file};
    use anyhow::Result;
    use downtime_app::{ExpiryScheduler, ToastToken, parse_seed};
    use std::collections::BTreeSet;
    use std::time::Duration;

    #[test]
    fn faker_is_deterministic() {
        let mut left = CategoryFaker::new(42);
        let mut right = CategoryFaker::new(42);
        assert_eq!(left.categories(5), right.categories(5));
    }

    #[test]
    fn faker_output_is_valid() {
        let mut faker = CategoryFaker::new(7);
        for category in faker.categories(50) {
            assert!(category.validate().is_ok());
            let unique: BTreeSet<&String> = category.items.iter().collect();
            assert_eq!(unique.len(), category.items.len());
        }
    }

    #[test]
    fn manual_scheduler_fires_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(300), ToastToken::new(2));
        scheduler.schedule(Duration::from_millis(100), ToastToken::new(1));

        assert!(scheduler.advance(Duration::from_millis(50)).is_empty());
        assert_eq!(
            scheduler.advance(Duration::from_millis(500)),
            vec![ToastToken::new(1), ToastToken::new(2)]
        );
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(10), ToastToken::new(1));
        scheduler.cancel(handle);
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(scheduler.cancelled_count(), 1);
    }

    #[test]
    fn seed_file_round_trips_through_parser() -> Result<()> {
        let (_dir, path) = write_seed_file(&sample_categories())?;
        let raw = std::fs::read_to_string(&path)?;
        assert_eq!(parse_seed(&raw)?, sample_categories());
        Ok(())
    }
}
