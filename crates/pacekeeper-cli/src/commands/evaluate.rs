use std::sync::Arc;

use chrono::{DateTime, Local};
use clap::Args;
use pacekeeper_core::{AchievementEngine, Config, ManualClock, MetricSnapshot, TracingNotifier};

use super::engine_settings;

#[derive(Args)]
pub struct EvaluateArgs {
    /// Steps so far today
    #[arg(long)]
    steps: u64,
    /// Distance so far today (km)
    #[arg(long, default_value = "0")]
    distance: f64,
    /// Calories burned so far today
    #[arg(long, default_value = "0")]
    calories: f64,
    /// Active minutes so far today
    #[arg(long, default_value = "0")]
    active_minutes: u64,
    /// Evaluation time as RFC 3339 (defaults to now)
    #[arg(long)]
    at: Option<String>,
    /// Daily step goal (defaults to the configured goal)
    #[arg(long)]
    goal: Option<u64>,
}

pub fn run(args: EvaluateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let settings = engine_settings(&config, args.goal);

    let now = match args.at.as_deref() {
        Some(s) => DateTime::parse_from_rfc3339(s)?,
        None => Local::now().fixed_offset(),
    };
    let clock = Arc::new(ManualClock::new(now));
    let engine = AchievementEngine::new(settings, clock, Arc::new(TracingNotifier));

    let snapshot = MetricSnapshot {
        steps: args.steps,
        distance: args.distance,
        calories: args.calories,
        active_minutes: args.active_minutes,
    };
    let report = engine.evaluate_snapshot(&config.goals(), &snapshot);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
