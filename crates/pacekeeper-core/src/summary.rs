//! Weekly step summary.
//!
//! A pure reducer over a week of daily step totals. No state, no clock:
//! the same input always yields the same summary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative verdict picked from the number of days the goal was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMessage {
    Perfect,
    Excellent,
    GoodProgress,
    EveryStepCounts,
    FreshStart,
}

impl SummaryMessage {
    pub fn from_days_met(days_goal_met: usize) -> Self {
        match days_goal_met {
            0 => SummaryMessage::FreshStart,
            1..=2 => SummaryMessage::EveryStepCounts,
            3..=4 => SummaryMessage::GoodProgress,
            5..=6 => SummaryMessage::Excellent,
            _ => SummaryMessage::Perfect,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            SummaryMessage::Perfect => "Perfect week! You hit your goal every single day.",
            SummaryMessage::Excellent => "Excellent week! You were on target most days.",
            SummaryMessage::GoodProgress => "Good progress this week. Keep building the habit.",
            SummaryMessage::EveryStepCounts => "Every step counts. A few more active days next week!",
            SummaryMessage::FreshStart => "New week, fresh start. Let's get moving!",
        }
    }
}

/// Aggregated statistics for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub total: u64,
    pub average: u64,
    pub best: u64,
    pub days_goal_met: usize,
    pub days_tracked: usize,
    pub daily_goal: u64,
    pub message: SummaryMessage,
}

impl WeeklySummary {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WeeklySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message.headline())?;
        writeln!(f, "Total steps: {}", self.total)?;
        writeln!(f, "Daily average: {}", self.average)?;
        writeln!(f, "Best day: {}", self.best)?;
        write!(
            f,
            "Goal met: {}/{} days (goal {})",
            self.days_goal_met, self.days_tracked, self.daily_goal
        )
    }
}

/// Summarize `weekly_steps` (chronological, one entry per day) against `daily_goal`.
pub fn generate_weekly_summary(weekly_steps: &[u64], daily_goal: u64) -> WeeklySummary {
    let total = weekly_steps.iter().fold(0u64, |acc, &s| acc.saturating_add(s));
    let days_tracked = weekly_steps.len();
    let average = total / days_tracked.max(1) as u64;
    let best = weekly_steps.iter().copied().max().unwrap_or(0);
    let days_goal_met = weekly_steps.iter().filter(|&&s| s >= daily_goal).count();

    WeeklySummary {
        total,
        average,
        best,
        days_goal_met,
        days_tracked,
        daily_goal,
        message: SummaryMessage::from_days_met(days_goal_met),
    }
}
