pub mod config;
pub mod evaluate;
pub mod replay;
pub mod summary;

use pacekeeper_core::{Config, EngineSettings};

/// Engine settings from the saved config, with the daily goal overridden by `--goal`.
pub fn engine_settings(config: &Config, goal: Option<u64>) -> EngineSettings {
    EngineSettings {
        daily_step_goal: goal.unwrap_or(config.daily_step_goal),
        ..config.engine_settings()
    }
}
