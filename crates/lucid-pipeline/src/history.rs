//! Explanation history and usage counters.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One explanation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationRecord {
    pub selected_text: String,
    /// The explanation, or the user-facing error message on failure.
    pub explanation: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

/// Bounded history, newest first.
#[derive(Debug, Clone)]
pub struct History {
    records: VecDeque<ExplanationRecord>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit.min(128)),
            limit,
        }
    }

    pub fn push(&mut self, record: ExplanationRecord) {
        if self.limit == 0 {
            return;
        }
        self.records.push_front(record);
        self.records.truncate(self.limit);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExplanationRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&ExplanationRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Request counters. The daily counter resets when the calendar date changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub total_requests: u64,
    pub total_explanations: u64,
    pub daily_requests: u64,
    pub last_reset: NaiveDate,
    pub last_response_time_ms: Option<u64>,
}

impl UsageStats {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            total_requests: 0,
            total_explanations: 0,
            daily_requests: 0,
            last_reset: today,
            last_response_time_ms: None,
        }
    }

    pub fn record_request(&mut self, today: NaiveDate) {
        self.roll_over(today);
        self.total_requests += 1;
        self.daily_requests += 1;
    }

    pub fn record_success(&mut self, elapsed: Duration, today: NaiveDate) {
        self.roll_over(today);
        self.total_explanations += 1;
        self.last_response_time_ms = Some(elapsed.as_millis() as u64);
    }

    /// Reset the daily counter if `today` differs from the last reset date.
    pub fn roll_over(&mut self, today: NaiveDate) {
        if today != self.last_reset {
            self.daily_requests = 0;
            self.last_reset = today;
        }
    }
}

impl Default for UsageStats {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}
