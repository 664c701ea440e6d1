use clap::Args;
use pacekeeper_core::{generate_weekly_summary, Config};

use super::engine_settings;

#[derive(Args)]
pub struct SummaryArgs {
    /// Daily step totals, oldest first (e.g. 8000,12000,9500)
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    steps: Vec<u64>,
    /// Daily step goal (defaults to the configured goal)
    #[arg(long)]
    goal: Option<u64>,
    /// Print human-readable text instead of JSON
    #[arg(long)]
    text: bool,
}

pub fn run(args: SummaryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = engine_settings(&Config::load_or_default(), args.goal);
    let summary = generate_weekly_summary(&args.steps, settings.daily_step_goal);
    if args.text {
        println!("{summary}");
    } else {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
