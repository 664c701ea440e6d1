//! Multi-metric goal evaluation.
//!
//! Runs under the engine lock; pushes decided events onto `out` and leaves
//! delivery to the caller.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};

use super::policy::{
    format_time_remaining, ACHIEVED_RATIO, BEHIND_PACE_RATIO, OVERACHIEVER_RATIO, REMINDER_HOURS,
};
use crate::goal::{Goal, GoalOutcome, GoalProgress, MetricSnapshot};
use crate::notifier::{HapticIntensity, NotificationEvent};
use crate::tracking::{DailyTrackingState, DedupKey};

/// One clock reading, shared by the reset check and every decision in the
/// same evaluation.
pub(super) struct DayContext {
    pub now: DateTime<FixedOffset>,
    /// Tracked day the reset check settled on.
    pub today: NaiveDate,
    pub day_end: DateTime<FixedOffset>,
}

pub(super) fn evaluate_goal(
    state: &mut DailyTrackingState,
    goal: &Goal,
    snapshot: &MetricSnapshot,
    ctx: &DayContext,
    haptics: bool,
    out: &mut Vec<NotificationEvent>,
) -> GoalProgress {
    let mut updated = goal.clone();
    if !goal.is_active {
        return GoalProgress {
            raw_progress: updated.raw_progress(),
            goal: updated,
            outcome: GoalOutcome::Inactive,
        };
    }

    updated.current_value = snapshot.value_for(goal.metric);
    let progress = updated.raw_progress();
    let today = ctx.today;

    let outcome = if progress >= ACHIEVED_RATIO {
        if state.mark_goal(DedupKey::achieved(goal.metric, today)) {
            let overachiever = progress >= OVERACHIEVER_RATIO;
            tracing::info!(
                metric = %goal.metric,
                value = updated.current_value,
                target = updated.target_value,
                overachiever,
                "goal achieved"
            );
            out.push(NotificationEvent::GoalAchieved {
                metric: goal.metric,
                current_value: updated.current_value,
                target_value: updated.target_value,
                overachiever,
            });
            if haptics {
                out.push(NotificationEvent::Haptic {
                    intensity: HapticIntensity::Strong,
                });
            }
            GoalOutcome::Achieved { overachiever }
        } else {
            tracing::trace!(metric = %goal.metric, "goal already achieved today");
            GoalOutcome::AlreadyAchieved
        }
    } else if progress < BEHIND_PACE_RATIO
        && REMINDER_HOURS.contains(&ctx.now.hour())
        && state.mark_goal(DedupKey::reminder(goal.metric, today))
    {
        let time_remaining = format_time_remaining(ctx.day_end - ctx.now);
        tracing::info!(
            metric = %goal.metric,
            value = updated.current_value,
            target = updated.target_value,
            %time_remaining,
            "goal behind pace"
        );
        out.push(NotificationEvent::GoalBehindPace {
            metric: goal.metric,
            current_value: updated.current_value,
            target_value: updated.target_value,
            time_remaining,
        });
        GoalOutcome::BehindPace
    } else {
        GoalOutcome::Pending
    };

    GoalProgress {
        goal: updated,
        raw_progress: progress,
        outcome,
    }
}
