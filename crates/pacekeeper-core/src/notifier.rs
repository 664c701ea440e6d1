//! Notification delivery seam.
//!
//! The engine decides *whether* something should be announced; a
//! [`Notifier`] decides *how*. All methods are fire-and-forget: the engine
//! never waits on delivery and never inspects a result.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::goal::MetricType;

/// Strength of a haptic pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticIntensity {
    Medium,
    Strong,
}

/// Receiver of engine decisions.
pub trait Notifier: Send + Sync {
    fn notify_goal_achieved(
        &self,
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        overachiever: bool,
    );

    fn notify_goal_behind_pace(
        &self,
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        time_remaining: &str,
    );

    fn notify_milestone(&self, threshold: u64, current_steps: u64);

    fn notify_encouragement(&self);

    /// Haptic pulse request. Ignored by notifiers without a haptic channel.
    fn haptic(&self, _intensity: HapticIntensity) {}
}

/// Every request the engine can make of a [`Notifier`], as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationEvent {
    GoalAchieved {
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        overachiever: bool,
    },
    GoalBehindPace {
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        time_remaining: String,
    },
    Milestone {
        threshold: u64,
        current_steps: u64,
    },
    Encouragement,
    Haptic {
        intensity: HapticIntensity,
    },
}

impl NotificationEvent {
    /// Forward this event to the matching trait method.
    pub fn dispatch(&self, notifier: &dyn Notifier) {
        match self {
            NotificationEvent::GoalAchieved {
                metric,
                current_value,
                target_value,
                overachiever,
            } => notifier.notify_goal_achieved(*metric, *current_value, *target_value, *overachiever),
            NotificationEvent::GoalBehindPace {
                metric,
                current_value,
                target_value,
                time_remaining,
            } => notifier.notify_goal_behind_pace(*metric, *current_value, *target_value, time_remaining),
            NotificationEvent::Milestone {
                threshold,
                current_steps,
            } => notifier.notify_milestone(*threshold, *current_steps),
            NotificationEvent::Encouragement => notifier.notify_encouragement(),
            NotificationEvent::Haptic { intensity } => notifier.haptic(*intensity),
        }
    }

    pub fn is_haptic(&self) -> bool {
        matches!(self, NotificationEvent::Haptic { .. })
    }

    /// User-facing title and body. `None` for haptic pulses.
    pub fn message(&self) -> Option<(String, String)> {
        match self {
            NotificationEvent::GoalAchieved {
                metric,
                current_value,
                target_value,
                overachiever,
            } => {
                let title = if *overachiever {
                    format!("{} goal crushed!", metric.label())
                } else {
                    format!("{} goal reached!", metric.label())
                };
                let body = if *overachiever {
                    let pct = (current_value / target_value * 100.0).round();
                    format!(
                        "{} of {} {} - that's {pct}% of your goal. Overachiever!",
                        format_value(*current_value),
                        format_value(*target_value),
                        metric.unit()
                    )
                } else {
                    format!(
                        "You hit {} of {} {}. Nice work!",
                        format_value(*current_value),
                        format_value(*target_value),
                        metric.unit()
                    )
                };
                Some((title, body))
            }
            NotificationEvent::GoalBehindPace {
                metric,
                current_value,
                target_value,
                time_remaining,
            } => Some((
                format!("{} goal needs attention", metric.label()),
                format!(
                    "{} of {} {} so far, {time_remaining} left today.",
                    format_value(*current_value),
                    format_value(*target_value),
                    metric.unit()
                ),
            )),
            NotificationEvent::Milestone {
                threshold,
                current_steps,
            } => Some((
                format!("{threshold} steps!"),
                format!("Milestone unlocked at {current_steps} steps today."),
            )),
            NotificationEvent::Encouragement => Some((
                "Time for a walk?".to_string(),
                "A short evening stroll still counts toward today's goal.".to_string(),
            )),
            NotificationEvent::Haptic { .. } => None,
        }
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Keeps every request in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: NotificationEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }

    /// All recorded requests, haptics included.
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded requests without haptic pulses.
    pub fn notifications(&self) -> Vec<NotificationEvent> {
        self.events().into_iter().filter(|e| !e.is_haptic()).collect()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<NotificationEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Notifier for RecordingNotifier {
    fn notify_goal_achieved(
        &self,
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        overachiever: bool,
    ) {
        self.push(NotificationEvent::GoalAchieved {
            metric,
            current_value,
            target_value,
            overachiever,
        });
    }

    fn notify_goal_behind_pace(
        &self,
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        time_remaining: &str,
    ) {
        self.push(NotificationEvent::GoalBehindPace {
            metric,
            current_value,
            target_value,
            time_remaining: time_remaining.to_string(),
        });
    }

    fn notify_milestone(&self, threshold: u64, current_steps: u64) {
        self.push(NotificationEvent::Milestone {
            threshold,
            current_steps,
        });
    }

    fn notify_encouragement(&self) {
        self.push(NotificationEvent::Encouragement);
    }

    fn haptic(&self, intensity: HapticIntensity) {
        self.push(NotificationEvent::Haptic { intensity });
    }
}

/// Forwards requests to an async consumer over an unbounded channel.
///
/// Sending never blocks. If the receiver has gone away the request is
/// dropped with a warning.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<NotificationEvent>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<NotificationEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, event: NotificationEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::warn!(kind = ?e.0, "notification receiver closed, dropping event");
        }
    }
}

impl Notifier for ChannelNotifier {
    fn notify_goal_achieved(
        &self,
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        overachiever: bool,
    ) {
        self.send(NotificationEvent::GoalAchieved {
            metric,
            current_value,
            target_value,
            overachiever,
        });
    }

    fn notify_goal_behind_pace(
        &self,
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        time_remaining: &str,
    ) {
        self.send(NotificationEvent::GoalBehindPace {
            metric,
            current_value,
            target_value,
            time_remaining: time_remaining.to_string(),
        });
    }

    fn notify_milestone(&self, threshold: u64, current_steps: u64) {
        self.send(NotificationEvent::Milestone {
            threshold,
            current_steps,
        });
    }

    fn notify_encouragement(&self) {
        self.send(NotificationEvent::Encouragement);
    }

    fn haptic(&self, intensity: HapticIntensity) {
        self.send(NotificationEvent::Haptic { intensity });
    }
}

/// Writes each request to the tracing log and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_goal_achieved(
        &self,
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        overachiever: bool,
    ) {
        tracing::info!(%metric, current_value, target_value, overachiever, "goal achieved");
    }

    fn notify_goal_behind_pace(
        &self,
        metric: MetricType,
        current_value: f64,
        target_value: f64,
        time_remaining: &str,
    ) {
        tracing::info!(%metric, current_value, target_value, time_remaining, "goal behind pace");
    }

    fn notify_milestone(&self, threshold: u64, current_steps: u64) {
        tracing::info!(threshold, current_steps, "milestone reached");
    }

    fn notify_encouragement(&self) {
        tracing::info!("encouragement");
    }

    fn haptic(&self, intensity: HapticIntensity) {
        tracing::debug!(?intensity, "haptic pulse");
    }
}
