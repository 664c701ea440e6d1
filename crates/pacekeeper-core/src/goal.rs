//! Goal definitions and metric snapshots.
//!
//! Goals are owned by the caller and passed in on every evaluation. The
//! engine never mutates them in place; it hands back a [`GoalProgress`]
//! carrying an updated copy instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Health metric a goal can track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Steps,
    Distance,
    Calories,
    ActiveMinutes,
}

impl MetricType {
    pub const ALL: [MetricType; 4] = [
        MetricType::Steps,
        MetricType::Distance,
        MetricType::Calories,
        MetricType::ActiveMinutes,
    ];

    /// Stable identifier used in config files and event payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Steps => "steps",
            MetricType::Distance => "distance",
            MetricType::Calories => "calories",
            MetricType::ActiveMinutes => "active_minutes",
        }
    }

    /// Human-readable name for notification text.
    pub fn label(&self) -> &'static str {
        match self {
            MetricType::Steps => "Steps",
            MetricType::Distance => "Distance",
            MetricType::Calories => "Calories",
            MetricType::ActiveMinutes => "Active minutes",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricType::Steps => "steps",
            MetricType::Distance => "km",
            MetricType::Calories => "kcal",
            MetricType::ActiveMinutes => "min",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "steps" => Ok(MetricType::Steps),
            "distance" => Ok(MetricType::Distance),
            "calories" => Ok(MetricType::Calories),
            "active_minutes" | "activeminutes" => Ok(MetricType::ActiveMinutes),
            _ => Err(ValidationError::UnknownMetric(s.to_string())),
        }
    }
}

/// A user-configured target for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub metric: MetricType,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Goal {
    /// Active goal with no progress yet. The target is not validated.
    pub fn new(metric: MetricType, target_value: f64) -> Self {
        Self {
            metric,
            target_value,
            current_value: 0.0,
            is_active: true,
        }
    }

    /// Like [`Goal::new`], but rejects non-positive or non-finite targets.
    pub fn try_new(metric: MetricType, target_value: f64) -> Result<Self, ValidationError> {
        if !target_value.is_finite() || target_value <= 0.0 {
            return Err(ValidationError::InvalidTarget {
                metric: metric.to_string(),
                target: target_value,
            });
        }
        Ok(Self::new(metric, target_value))
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Unclamped ratio of current to target; 0.0 when the target is not positive.
    pub fn raw_progress(&self) -> f64 {
        if self.target_value > 0.0 {
            self.current_value / self.target_value
        } else {
            0.0
        }
    }

    /// Progress clamped to `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        self.raw_progress().clamp(0.0, 1.0)
    }
}

/// Cumulative metric values for the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub steps: u64,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub active_minutes: u64,
}

impl MetricSnapshot {
    pub fn value_for(&self, metric: MetricType) -> f64 {
        match metric {
            MetricType::Steps => self.steps as f64,
            MetricType::Distance => self.distance,
            MetricType::Calories => self.calories,
            MetricType::ActiveMinutes => self.active_minutes as f64,
        }
    }
}

/// What a single goal evaluation decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GoalOutcome {
    /// Achievement event emitted on this call.
    Achieved { overachiever: bool },
    /// Behind-pace reminder emitted on this call.
    BehindPace,
    /// Target met but the event already fired today.
    AlreadyAchieved,
    /// Nothing to report.
    Pending,
    /// Goal is switched off and was skipped.
    Inactive,
}

/// Result record for one goal after evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Copy of the input goal with `current_value` resolved from the snapshot.
    pub goal: Goal,
    /// Unclamped progress ratio.
    pub raw_progress: f64,
    pub outcome: GoalOutcome,
}
