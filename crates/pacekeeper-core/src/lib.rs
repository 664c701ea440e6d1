//! # PaceKeeper Core Library
//!
//! This library provides the achievement and notification logic for the
//! PaceKeeper step tracker. The platform layer (health data acquisition,
//! UI, push delivery) lives outside this crate; the core only consumes
//! metric snapshots and decides when a notification should be requested.
//!
//! ## Architecture
//!
//! - **Achievement Engine**: A day-scoped state machine that evaluates step
//!   counts and goal progress, firing each event at most once per day
//! - **Clock / Notifier**: Injectable collaborators for time and delivery
//! - **Summary**: Pure weekly statistics over historical step totals
//! - **Monitor**: Polling loop that feeds a [`MetricSource`] into the engine
//! - **Config**: TOML-based user settings (daily goal, haptics, goals)
//!
//! ## Key Components
//!
//! - [`AchievementEngine`]: Core evaluation state machine
//! - [`Notifier`]: Trait for notification and haptic delivery
//! - [`WeeklySummary`]: Aggregated weekly statistics
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod goal;
pub mod monitor;
pub mod notifier;
pub mod summary;
pub mod tracking;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, GoalConfig};
pub use engine::{AchievementEngine, EngineSettings, SnapshotReport};
pub use error::{ConfigError, CoreError, ValidationError};
pub use goal::{Goal, GoalOutcome, GoalProgress, MetricSnapshot, MetricType};
pub use monitor::{MetricSource, Monitor};
pub use notifier::{
    ChannelNotifier, HapticIntensity, NotificationEvent, Notifier, RecordingNotifier,
    TracingNotifier,
};
pub use summary::{generate_weekly_summary, SummaryMessage, WeeklySummary};
pub use tracking::{DailyTrackingState, DedupKey, DedupKind, TrackingSnapshot, MILESTONE_LADDER};
