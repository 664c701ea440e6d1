use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use clap::Args;
use pacekeeper_core::{
    AchievementEngine, Clock, Config, ManualClock, MetricSnapshot, NotificationEvent,
    RecordingNotifier,
};
use serde::{Deserialize, Serialize};

use super::engine_settings;

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON file: array of {"at": RFC 3339, "steps": .., "distance": .., ...}
    file: PathBuf,
    /// Daily step goal (defaults to the configured goal)
    #[arg(long)]
    goal: Option<u64>,
    /// Include haptic pulses in the output
    #[arg(long)]
    haptics: bool,
}

#[derive(Deserialize)]
struct ReplayEntry {
    at: DateTime<FixedOffset>,
    #[serde(flatten)]
    snapshot: MetricSnapshot,
}

#[derive(Serialize)]
struct ReplayStep {
    at: DateTime<FixedOffset>,
    events: Vec<NotificationEvent>,
}

pub fn run(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&args.file)?;
    let mut entries: Vec<ReplayEntry> = serde_json::from_str(&content)?;
    entries.sort_by_key(|e| e.at);

    let Some(first) = entries.first() else {
        println!("[]");
        return Ok(());
    };

    let config = Config::load_or_default();
    let settings = engine_settings(&config, args.goal);
    let goals = config.goals();

    let clock = Arc::new(ManualClock::new(first.at));
    let notifier = Arc::new(RecordingNotifier::new());
    let engine = AchievementEngine::new(settings, clock.clone(), notifier.clone());

    let mut steps = Vec::with_capacity(entries.len());
    for entry in &entries {
        clock.set(entry.at);
        engine.evaluate_snapshot(&goals, &entry.snapshot);
        let events: Vec<_> = notifier
            .take()
            .into_iter()
            .filter(|e| args.haptics || !e.is_haptic())
            .collect();
        tracing::debug!(at = %clock.now(), events = events.len(), "replayed snapshot");
        steps.push(ReplayStep {
            at: entry.at,
            events,
        });
    }

    println!("{}", serde_json::to_string_pretty(&steps)?);
    Ok(())
}
