//! Achievement engine.
//!
//! A day-scoped state machine that turns metric snapshots into notification
//! requests. Each entry point:
//!
//! 1. reads the clock and resets the [`DailyTrackingState`] if the local day
//!    changed,
//! 2. decides which events fire, recording each dedup key as it goes,
//! 3. releases the lock and hands the events to the [`Notifier`].
//!
//! Steps 1 and 2 run under one mutex, so concurrent callers can never both
//! observe "not yet fired" for the same key.
//!
//! ## Usage
//!
//! ```ignore
//! let engine = AchievementEngine::new(settings, Arc::new(SystemClock), notifier);
//! engine.evaluate_steps(10_250);
//! let progress = engine.evaluate_goals(&goals, &snapshot);
//! ```

mod goals;
pub mod policy;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::goal::{Goal, GoalProgress, MetricSnapshot, MetricType};
use crate::notifier::{HapticIntensity, NotificationEvent, Notifier};
use crate::summary::{generate_weekly_summary, WeeklySummary};
use crate::tracking::{DailyTrackingState, TrackingSnapshot, MILESTONE_LADDER};

use goals::{evaluate_goal, DayContext};
use policy::{ENCOURAGEMENT_HOURS, ENCOURAGEMENT_RATIO};

/// User settings the engine consults on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub daily_step_goal: u64,
    pub haptic_feedback_enabled: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            daily_step_goal: 10_000,
            haptic_feedback_enabled: true,
        }
    }
}

/// Everything one [`AchievementEngine::evaluate_snapshot`] call decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotReport {
    pub events: Vec<NotificationEvent>,
    pub goals: Vec<GoalProgress>,
}

#[derive(Debug)]
struct Inner {
    state: DailyTrackingState,
    settings: EngineSettings,
}

/// Core achievement engine.
///
/// Construct once and share through an `Arc`.
pub struct AchievementEngine {
    inner: Mutex<Inner>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for AchievementEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AchievementEngine")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl AchievementEngine {
    pub fn new(
        settings: EngineSettings,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: DailyTrackingState::new(),
                settings,
            }),
            clock,
            notifier,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn settings(&self) -> EngineSettings {
        self.lock().settings
    }

    /// Copy of today's dedup state, as of the last evaluation.
    pub fn tracking_snapshot(&self) -> TrackingSnapshot {
        self.lock().state.snapshot()
    }

    /// Weekly summary against the configured daily step goal.
    pub fn generate_weekly_summary(&self, weekly_steps: &[u64]) -> WeeklySummary {
        generate_weekly_summary(weekly_steps, self.settings().daily_step_goal)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the settings. Today's dedup state is kept.
    pub fn update_settings(&self, settings: EngineSettings) {
        self.lock().settings = settings;
    }

    /// Check the daily step goal and the milestone ladder.
    ///
    /// Returns the requests handed to the notifier, in delivery order.
    pub fn evaluate_steps(&self, current_steps: u64) -> Vec<NotificationEvent> {
        let events = {
            let mut inner = self.lock();
            self.begin_evaluation(&mut inner);
            let mut out = Vec::new();
            Self::decide_steps(&mut inner, current_steps, &mut out);
            out
        };
        self.deliver(&events);
        events
    }

    /// Evaluate every active goal against `snapshot`.
    ///
    /// Returns one [`GoalProgress`] per input goal, in input order, each
    /// carrying a copy of the goal with `current_value` filled in. The input
    /// slice is left untouched.
    pub fn evaluate_goals(&self, goals: &[Goal], snapshot: &MetricSnapshot) -> Vec<GoalProgress> {
        let mut events = Vec::new();
        let progress = {
            let mut inner = self.lock();
            let ctx = self.begin_evaluation(&mut inner);
            Self::decide_goals(&mut inner, &ctx, goals, snapshot, &mut events)
        };
        self.deliver(&events);
        progress
    }

    /// Evening nudge when the day's steps are far behind the goal.
    ///
    /// Unlike every other event this one is not deduplicated: each
    /// qualifying call inside the window fires again.
    pub fn evaluate_encouragement(&self, current_steps: u64) -> bool {
        let fired = {
            let mut inner = self.lock();
            let ctx = self.begin_evaluation(&mut inner);
            Self::decide_encouragement(&inner, &ctx, current_steps)
        };
        if fired {
            self.notifier.notify_encouragement();
        }
        fired
    }

    /// Steps, milestones, goals and encouragement for one snapshot, under a
    /// single lock acquisition and a single clock reading.
    pub fn evaluate_snapshot(&self, goals: &[Goal], snapshot: &MetricSnapshot) -> SnapshotReport {
        let mut events = Vec::new();
        let progress = {
            let mut inner = self.lock();
            let ctx = self.begin_evaluation(&mut inner);
            Self::decide_steps(&mut inner, snapshot.steps, &mut events);
            let progress = Self::decide_goals(&mut inner, &ctx, goals, snapshot, &mut events);
            if Self::decide_encouragement(&inner, &ctx, snapshot.steps) {
                events.push(NotificationEvent::Encouragement);
            }
            progress
        };
        self.deliver(&events);
        SnapshotReport {
            events,
            goals: progress,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A notifier panic elsewhere must not wedge evaluation.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Day-boundary check; must run before any dedup lookup.
    ///
    /// This is the only clock read of an evaluation. Every later decision
    /// in the same call uses the returned context, so dedup keys always
    /// carry the day the state was reset to.
    fn begin_evaluation(&self, inner: &mut Inner) -> DayContext {
        let now = self.clock.now();
        let today = self.clock.start_of_day(now).date_naive();
        if inner.state.reset_if_new_day(today) {
            tracing::debug!(%today, "daily tracking state reset");
        }
        DayContext {
            now,
            today,
            day_end: self.clock.end_of_day(now),
        }
    }

    fn decide_steps(inner: &mut Inner, current_steps: u64, out: &mut Vec<NotificationEvent>) {
        let EngineSettings {
            daily_step_goal,
            haptic_feedback_enabled,
        } = inner.settings;

        if daily_step_goal > 0 && current_steps >= daily_step_goal && inner.state.mark_step_goal() {
            tracing::info!(current_steps, daily_step_goal, "daily step goal achieved");
            out.push(NotificationEvent::GoalAchieved {
                metric: MetricType::Steps,
                current_value: current_steps as f64,
                target_value: daily_step_goal as f64,
                overachiever: false,
            });
            if haptic_feedback_enabled {
                out.push(NotificationEvent::Haptic {
                    intensity: HapticIntensity::Strong,
                });
            }
        }

        for &threshold in MILESTONE_LADDER.iter() {
            if current_steps < threshold {
                break;
            }
            if inner.state.mark_milestone(threshold) {
                tracing::info!(milestone = threshold, current_steps, "milestone reached");
                out.push(NotificationEvent::Milestone {
                    threshold,
                    current_steps,
                });
                if haptic_feedback_enabled {
                    out.push(NotificationEvent::Haptic {
                        intensity: HapticIntensity::Medium,
                    });
                }
            } else {
                tracing::trace!(milestone = threshold, "milestone already reached today");
            }
        }
    }

    fn decide_goals(
        inner: &mut Inner,
        ctx: &DayContext,
        goals: &[Goal],
        snapshot: &MetricSnapshot,
        out: &mut Vec<NotificationEvent>,
    ) -> Vec<GoalProgress> {
        let haptics = inner.settings.haptic_feedback_enabled;
        goals
            .iter()
            .map(|goal| evaluate_goal(&mut inner.state, goal, snapshot, ctx, haptics, out))
            .collect()
    }

    fn decide_encouragement(inner: &Inner, ctx: &DayContext, current_steps: u64) -> bool {
        let daily_goal = inner.settings.daily_step_goal;
        if daily_goal == 0 {
            return false;
        }
        let progress = current_steps as f64 / daily_goal as f64;
        let hour = ctx.now.hour();
        let fire = progress < ENCOURAGEMENT_RATIO && ENCOURAGEMENT_HOURS.contains(&hour);
        if fire {
            tracing::info!(current_steps, daily_goal, hour, "encouragement");
        }
        fire
    }

    fn deliver(&self, events: &[NotificationEvent]) {
        for event in events {
            event.dispatch(self.notifier.as_ref());
        }
    }
}
