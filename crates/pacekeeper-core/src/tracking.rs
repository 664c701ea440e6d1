//! Per-day deduplication memory for the achievement engine.

use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::goal::MetricType;

/// Fixed step thresholds that trigger milestone notifications, ascending.
pub const MILESTONE_LADDER: [u64; 13] = [
    1_000, 2_500, 5_000, 7_500, 10_000, 15_000, 20_000, 25_000, 30_000, 40_000, 50_000, 75_000,
    100_000,
];

/// Which goal event a [`DedupKey`] guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupKind {
    Achieved,
    Reminder,
}

/// Identifies one goal event for one metric on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DedupKey {
    pub metric: MetricType,
    pub day: NaiveDate,
    pub kind: DedupKind,
}

impl DedupKey {
    pub fn achieved(metric: MetricType, day: NaiveDate) -> Self {
        Self {
            metric,
            day,
            kind: DedupKind::Achieved,
        }
    }

    pub fn reminder(metric: MetricType, day: NaiveDate) -> Self {
        Self {
            metric,
            day,
            kind: DedupKind::Reminder,
        }
    }
}

/// Everything that has already fired on `last_tracked_day`.
///
/// Only the engine mutates this, always under its lock.
#[derive(Debug, Clone, Default)]
pub struct DailyTrackingState {
    daily_step_goal_achieved: bool,
    milestones_reached: HashSet<u64>,
    goals_achieved_today: HashSet<DedupKey>,
    last_tracked_day: Option<NaiveDate>,
}

impl DailyTrackingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all flags if `today` differs from the tracked day.
    ///
    /// Returns `true` when a reset happened (including the first call).
    pub fn reset_if_new_day(&mut self, today: NaiveDate) -> bool {
        if self.last_tracked_day == Some(today) {
            return false;
        }
        self.daily_step_goal_achieved = false;
        self.milestones_reached.clear();
        self.goals_achieved_today.clear();
        self.last_tracked_day = Some(today);
        true
    }

    /// Mark the daily step goal as achieved. `false` if it already was.
    pub(crate) fn mark_step_goal(&mut self) -> bool {
        !std::mem::replace(&mut self.daily_step_goal_achieved, true)
    }

    /// Record a milestone. `false` if it already fired today.
    pub(crate) fn mark_milestone(&mut self, threshold: u64) -> bool {
        self.milestones_reached.insert(threshold)
    }

    /// Record a goal event key. `false` if it already fired today.
    pub(crate) fn mark_goal(&mut self, key: DedupKey) -> bool {
        self.goals_achieved_today.insert(key)
    }

    pub fn daily_step_goal_achieved(&self) -> bool {
        self.daily_step_goal_achieved
    }

    pub fn has_milestone(&self, threshold: u64) -> bool {
        self.milestones_reached.contains(&threshold)
    }

    pub fn has_goal(&self, key: &DedupKey) -> bool {
        self.goals_achieved_today.contains(key)
    }

    pub fn last_tracked_day(&self) -> Option<NaiveDate> {
        self.last_tracked_day
    }

    pub fn snapshot(&self) -> TrackingSnapshot {
        TrackingSnapshot {
            daily_step_goal_achieved: self.daily_step_goal_achieved,
            milestones_reached: self.milestones_reached.iter().copied().collect(),
            goals_achieved_today: self.goals_achieved_today.iter().copied().collect(),
            last_tracked_day: self.last_tracked_day,
        }
    }
}

/// Read-only, ordered copy of [`DailyTrackingState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    pub daily_step_goal_achieved: bool,
    pub milestones_reached: BTreeSet<u64>,
    pub goals_achieved_today: BTreeSet<DedupKey>,
    pub last_tracked_day: Option<NaiveDate>,
}
