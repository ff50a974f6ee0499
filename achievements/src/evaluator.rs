use {
    achievement_assets::{
        AchievementCatalog, AchievementDefinition, CompletionScope, UnlockCondition,
    },
    bevy::prelude::*,
    progress_components::{MISSION_COUNT, MissionId},
    progress_events::GameResult,
    progress_resources::PlayerProgress,
};

/// Should this achievement transition locked → unlocked right now?
///
/// Unknown ids evaluate to "not unlocked" (logged, never an error), and
/// already-unlocked achievements always evaluate false so re-checks are
/// idempotent.
pub fn check_achievement(
    catalog: &AchievementCatalog,
    id: &str,
    progress: &PlayerProgress,
    result: Option<&GameResult>,
) -> bool {
    let Some(definition) = catalog.get(id) else {
        debug!(%id, "unknown achievement id, skipping");
        return false;
    };
    if progress.is_achievement_unlocked(id) {
        return false;
    }
    condition_met(&definition.condition, progress, result)
}

/// Pure predicate dispatch over the closed condition union.
pub fn condition_met(
    condition: &UnlockCondition,
    progress: &PlayerProgress,
    result: Option<&GameResult>,
) -> bool {
    match condition {
        UnlockCondition::MissionCompletion { count, scope } => match scope {
            CompletionScope::AnyMission => {
                progress.completed_count() >= *count as usize
            }
            CompletionScope::AllMissions => progress.completed_count() == MISSION_COUNT,
        },
        UnlockCondition::SpecificOutcome {
            mission,
            outcome,
            min_score,
        } => {
            let Some(result) = result_for(result, *mission) else {
                return false;
            };
            result.outcome == *outcome
                && min_score.is_none_or(|floor| result.score_awarded >= floor)
        }
        UnlockCondition::MetricThreshold { mission, floors } => {
            let Some(result) = result_for(result, *mission) else {
                return false;
            };
            floors
                .iter()
                .all(|floor| result.metric(&floor.metric).is_some_and(|v| v >= floor.min))
        }
        UnlockCondition::SynergyCount { count, require_all } => {
            if *require_all {
                progress.all_synergies_unlocked()
            } else {
                progress.synergy_count() >= *count as usize
            }
        }
        UnlockCondition::CompassExploration { percent_unlocked } => {
            progress.compass_explored_percent() >= *percent_unlocked
        }
        UnlockCondition::RelationshipFloor { mission, floor } => {
            let Some(result) = result_for(result, *mission) else {
                return false;
            };
            !result.relationship_scores.is_empty()
                && result.relationship_scores.values().all(|score| score >= floor)
        }
    }
}

/// The result, if it belongs to the condition's mission.
fn result_for(result: Option<&GameResult>, mission: MissionId) -> Option<&GameResult> {
    result.filter(|r| r.mission == Some(mission))
}

/// The achievements worth evaluating after `mission` completes.
///
/// Classification is an exhaustive match on the condition kind so a new
/// kind cannot silently fall through the filter: mission-scoped kinds
/// are checked only when their mission is the one that finished, the
/// rest are always candidates.
pub fn achievements_to_check(
    catalog: &AchievementCatalog,
    mission: MissionId,
) -> impl Iterator<Item = &AchievementDefinition> {
    catalog.achievements.iter().filter(move |achievement| {
        match &achievement.condition {
            UnlockCondition::MissionCompletion { .. }
            | UnlockCondition::SynergyCount { .. }
            | UnlockCondition::CompassExploration { .. } => true,
            UnlockCondition::SpecificOutcome { mission: m, .. }
            | UnlockCondition::MetricThreshold { mission: m, .. }
            | UnlockCondition::RelationshipFloor { mission: m, .. } => *m == mission,
        }
    })
}

/// Total FL score contributed by achievements: a pure fold over the
/// unlocked id list. Re-derivable from `PlayerProgress` alone, in any
/// unlock order. Ids missing from the catalog contribute nothing.
pub fn achievement_score(catalog: &AchievementCatalog, unlocked: &[String]) -> u32 {
    unlocked
        .iter()
        .filter_map(|id| catalog.get(id))
        .map(|achievement| achievement.fl_score_reward)
        .sum()
}
