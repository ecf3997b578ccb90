//! Daily search-quota gate
//!
//! Searches cost provider API calls, so the number of pipeline invocations
//! per calendar day is capped. The counter lives in a two-line flat file
//! (count, then ISO date) and resets whenever the stored date is not today.
//! This gates invocations of the pipeline, not its internal request rate.

use crate::{PlacelensError, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Daily quota state read from the counter file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaState {
    pub count: u32,
    pub date: NaiveDate,
}

/// Flat-file daily search counter
#[derive(Debug, Clone)]
pub struct QuotaFile {
    path: PathBuf,
    limit: u32,
}

impl QuotaFile {
    pub fn new(path: impl Into<PathBuf>, limit: u32) -> Self {
        Self {
            path: path.into(),
            limit,
        }
    }

    /// Searches used today; a missing file or a stale date counts as zero
    pub fn used_today(&self, today: NaiveDate) -> Result<u32> {
        match self.read()? {
            Some(state) if state.date == today => Ok(state.count),
            _ => Ok(0),
        }
    }

    /// Searches remaining today
    pub fn remaining(&self, today: NaiveDate) -> Result<u32> {
        Ok(self.limit.saturating_sub(self.used_today(today)?))
    }

    /// Checks the quota, returning an error when today's limit is reached
    pub fn check(&self, today: NaiveDate) -> Result<()> {
        if self.used_today(today)? >= self.limit {
            return Err(PlacelensError::QuotaExceeded { limit: self.limit });
        }
        Ok(())
    }

    /// Records one search against today's count
    pub fn record_search(&self, today: NaiveDate) -> Result<u32> {
        let count = self.used_today(today)? + 1;
        self.write(QuotaState { count, date: today })?;
        Ok(count)
    }

    fn read(&self) -> Result<Option<QuotaState>> {
        if !Path::new(&self.path).exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let mut lines = content.lines();

        let count = lines
            .next()
            .ok_or_else(|| PlacelensError::Quota("missing count line".to_string()))?
            .trim()
            .parse::<u32>()
            .map_err(|e| PlacelensError::Quota(format!("bad count: {}", e)))?;

        let date = lines
            .next()
            .ok_or_else(|| PlacelensError::Quota("missing date line".to_string()))?
            .trim()
            .parse::<NaiveDate>()
            .map_err(|e| PlacelensError::Quota(format!("bad date: {}", e)))?;

        Ok(Some(QuotaState { count, date }))
    }

    fn write(&self, state: QuotaState) -> Result<()> {
        let content = format!("{}\n{}", state.count, state.date.format("%Y-%m-%d"));
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
