//! Periodic polling of a [`MetricSource`] into the achievement engine.
//!
//! The monitor owns no tracking state of its own. Each tick reads one
//! snapshot and runs it through [`AchievementEngine::evaluate_snapshot`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::engine::{AchievementEngine, SnapshotReport};
use crate::error::Result;
use crate::goal::{Goal, MetricSnapshot};

/// Supplier of today's cumulative metric values (a health data store, a
/// watch sync, a replay file...).
pub trait MetricSource: Send + Sync {
    fn name(&self) -> &str {
        "metric source"
    }

    fn current(&self) -> Result<MetricSnapshot>;
}

pub struct Monitor {
    engine: Arc<AchievementEngine>,
    source: Arc<dyn MetricSource>,
    goals: Vec<Goal>,
}

impl Monitor {
    pub fn new(
        engine: Arc<AchievementEngine>,
        source: Arc<dyn MetricSource>,
        goals: Vec<Goal>,
    ) -> Self {
        Self {
            engine,
            source,
            goals,
        }
    }

    pub fn set_goals(&mut self, goals: Vec<Goal>) {
        self.goals = goals;
    }

    /// Read one snapshot and evaluate it.
    pub fn poll_once(&self) -> Result<SnapshotReport> {
        let snapshot = self.source.current()?;
        Ok(self.engine.evaluate_snapshot(&self.goals, &snapshot))
    }

    /// Poll every `every` until `shutdown` becomes `true` or its sender drops.
    ///
    /// A failing source skips that tick; the loop keeps going.
    pub async fn run(&self, every: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tracing::info!(source = self.source.name(), ?every, "monitor started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match self.poll_once() {
                        Ok(report) => {
                            if !report.events.is_empty() {
                                tracing::debug!(events = report.events.len(), "tick produced events");
                            }
                        }
                        Err(e) => {
                            tracing::warn!(source = self.source.name(), error = %e, "metric read failed, skipping tick");
                        }
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!(source = self.source.name(), "monitor stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::engine::EngineSettings;
    use crate::error::CoreError;
    use crate::goal::MetricType;
    use crate::notifier::{NotificationEvent, RecordingNotifier};
    use chrono::DateTime;
    use std::sync::Mutex;

    struct FixedSource(Mutex<Option<MetricSnapshot>>);

    impl MetricSource for FixedSource {
        fn current(&self) -> Result<MetricSnapshot> {
            let snapshot = *self.0.lock().unwrap();
            snapshot.ok_or_else(|| CoreError::MetricSource {
                source_name: "fixed".into(),
                message: "no data".into(),
            })
        }
    }

    fn engine() -> (Arc<AchievementEngine>, Arc<RecordingNotifier>) {
        let clock = Arc::new(ManualClock::new(
            DateTime::parse_from_rfc3339("2024-06-01T10:00:00Z").unwrap(),
        ));
        let notifier = Arc::new(RecordingNotifier::new());
        let engine = AchievementEngine::new(EngineSettings::default(), clock, notifier.clone());
        (Arc::new(engine), notifier)
    }

    #[test]
    fn poll_once_evaluates_snapshot() {
        let (engine, notifier) = engine();
        let source = Arc::new(FixedSource(Mutex::new(Some(MetricSnapshot {
            steps: 2_600,
            distance: 6.0,
            ..Default::default()
        }))));
        let monitor = Monitor::new(engine, source, vec![Goal::new(MetricType::Distance, 5.0)]);

        let report = monitor.poll_once().unwrap();
        assert_eq!(report.goals.len(), 1);
        let notes = notifier.notifications();
        assert!(notes.contains(&NotificationEvent::Milestone {
            threshold: 2_500,
            current_steps: 2_600
        }));
        assert!(notes
            .iter()
            .any(|e| matches!(e, NotificationEvent::GoalAchieved { metric: MetricType::Distance, .. })));
    }

    #[test]
    fn set_goals_applies_to_next_poll() {
        let (engine, _notifier) = engine();
        let source = Arc::new(FixedSource(Mutex::new(Some(MetricSnapshot {
            calories: 450.0,
            ..Default::default()
        }))));
        let mut monitor = Monitor::new(engine, source, Vec::new());
        assert!(monitor.poll_once().unwrap().goals.is_empty());

        monitor.set_goals(vec![Goal::new(MetricType::Calories, 400.0)]);
        let report = monitor.poll_once().unwrap();
        assert_eq!(report.goals.len(), 1);
        assert_eq!(report.goals[0].goal.current_value, 450.0);
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, NotificationEvent::GoalAchieved { metric: MetricType::Calories, .. })));
    }

    #[test]
    fn poll_once_propagates_source_errors() {
        let (engine, notifier) = engine();
        let monitor = Monitor::new(engine, Arc::new(FixedSource(Mutex::new(None))), Vec::new());
        assert!(monitor.poll_once().is_err());
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let (engine, notifier) = engine();
        let source = Arc::new(FixedSource(Mutex::new(Some(MetricSnapshot {
            steps: 1_500,
            ..Default::default()
        }))));
        let monitor = Arc::new(Monitor::new(engine, source, Vec::new()));
        let (tx, rx) = watch::channel(false);

        let task = {
            let monitor = monitor.clone();
            tokio::spawn(async move { monitor.run(Duration::from_millis(5), rx).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();
        task.await.unwrap();

        // Many ticks, one milestone.
        assert_eq!(notifier.notifications().len(), 1);
    }
}
