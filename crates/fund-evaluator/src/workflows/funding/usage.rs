use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};

use super::collaborators::{UsageError, UsageMeter};
use super::domain::UserId;

type DailyCounts = HashMap<(UserId, NaiveDate), u32>;

/// In-process usage meter keyed by user and UTC calendar day; counts reset at midnight UTC.
pub struct DailyUsageMeter {
    counts: Mutex<DailyCounts>,
    clock: fn() -> NaiveDate,
}

impl Default for DailyUsageMeter {
    fn default() -> Self {
        Self::with_clock(|| Utc::now().date_naive())
    }
}

impl DailyUsageMeter {
    pub fn with_clock(clock: fn() -> NaiveDate) -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Drop counters from previous days.
    pub fn prune(&self) -> Result<usize, UsageError> {
        let today = (self.clock)();
        let mut guard = self.lock()?;
        let before = guard.len();
        guard.retain(|(_, day), _| *day >= today);
        Ok(before - guard.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, DailyCounts>, UsageError> {
        self.counts
            .lock()
            .map_err(|_| UsageError::Unavailable("usage mutex poisoned".to_string()))
    }
}

impl UsageMeter for DailyUsageMeter {
    fn used_today(&self, user: &UserId) -> Result<u32, UsageError> {
        let key = (user.clone(), (self.clock)());
        Ok(self.lock()?.get(&key).copied().unwrap_or(0))
    }

    fn record_use(&self, user: &UserId) -> Result<(), UsageError> {
        let key = (user.clone(), (self.clock)());
        let mut guard = self.lock()?;
        let count = guard.entry(key).or_insert(0);
        *count = count.saturating_add(1);
        Ok(())
    }
}
