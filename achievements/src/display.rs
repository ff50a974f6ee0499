//! Player-facing progress strings for the achievement list.

use {
    achievement_assets::{AchievementDefinition, CompletionScope, UnlockCondition},
    progress_components::MISSION_COUNT,
    progress_resources::PlayerProgress,
};

/// Short progress line for one achievement. Hidden achievements reveal
/// nothing until unlocked.
pub fn progress_text(
    achievement: &AchievementDefinition,
    progress: &PlayerProgress,
) -> String {
    if achievement.hidden && !progress.is_achievement_unlocked(&achievement.id) {
        return "???".to_string();
    }

    match &achievement.condition {
        UnlockCondition::MissionCompletion { count, scope } => {
            let target = match scope {
                CompletionScope::AnyMission => *count as usize,
                CompletionScope::AllMissions => MISSION_COUNT,
            };
            format!(
                "{} / {} uppdrag slutförda",
                progress.completed_count().min(target),
                target
            )
        }
        UnlockCondition::SynergyCount { count, require_all } => {
            let target = if *require_all { 4 } else { *count as usize };
            format!(
                "{} / {} synergier upplåsta",
                progress.synergy_count().min(target),
                target
            )
        }
        UnlockCondition::CompassExploration { .. } => {
            format!(
                "{:.0}% av kompassen utforskad",
                progress.compass_explored_percent()
            )
        }
        UnlockCondition::SpecificOutcome { .. }
        | UnlockCondition::MetricThreshold { .. }
        | UnlockCondition::RelationshipFloor { .. } => "Framsteg dolt".to_string(),
    }
}
