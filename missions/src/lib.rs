//! The mission-completion pipeline.
//!
//! A mini-game fires one `MissionCompleted` and this crate does the
//! rest: records the run in `PlayerProgress`, raises compass nodes,
//! flips synergy flags, evaluates achievement candidates and awards
//! their FL score. Everything downstream (toasts, HUD, saves) hangs
//! off the events triggered here.


use {
    achievements::{AchievementBook, achievements_to_check, check_achievement},
    bevy::{platform::collections::HashMap, prelude::*},
    bevy_common_assets::ron::RonAssetPlugin,
    progress_components::{CompassNodeStatus, CompletedMission, MissionId, SynergyId},
    progress_events::{AchievementUnlocked, GameResult, MissionCompleted, SynergyUnlocked},
    progress_resources::PlayerProgress,
    scenario_assets::{CompassMap, ScenarioDefinition},
    states::GameState,
};

pub struct MissionsPlugin;

impl Plugin for MissionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RonAssetPlugin::<ScenarioDefinition>::new(&["scenario.ron"]),
            RonAssetPlugin::<CompassMap>::new(&["compass.ron"]),
        ))
        .register_type::<PlayerProgress>()
        .init_resource::<PlayerProgress>()
        .init_resource::<ScenarioLibrary>()
        .add_systems(
            OnEnter(GameState::Running),
            (hydrate_library, seed_compass).chain(),
        )
        .add_observer(on_mission_completed);
    }
}

/// Hydrated scenario content: one definition per mission plus the
/// Digital Compass map. Read-only after `OnEnter(Running)`.
#[derive(Resource, Debug, Default)]
pub struct ScenarioLibrary {
    pub scenarios: HashMap<MissionId, ScenarioDefinition>,
    pub compass: CompassMap,
}

impl ScenarioLibrary {
    pub fn scenario(&self, mission: MissionId) -> Option<&ScenarioDefinition> {
        self.scenarios.get(&mission)
    }
}

fn hydrate_library(
    mut library: ResMut<ScenarioLibrary>,
    scenarios: Res<Assets<ScenarioDefinition>>,
    maps: Res<Assets<CompassMap>>,
) {
    for (_, scenario) in scenarios.iter() {
        library.scenarios.insert(scenario.mission, scenario.clone());
    }
    if let Some((_, map)) = maps.iter().next() {
        library.compass = map.clone();
    }
    info!(
        scenarios = library.scenarios.len(),
        compass_nodes = library.compass.nodes.len(),
        "scenario library hydrated"
    );
}

/// Ensures every compass node has an entry, so exploration percentages
/// are measured against the full map rather than the visited subset.
fn seed_compass(library: Res<ScenarioLibrary>, mut progress: ResMut<PlayerProgress>) {
    for node in &library.compass.nodes {
        progress
            .compass
            .entry(node.id.clone())
            .or_insert(CompassNodeStatus::Locked);
    }
}

/// Builds the `GameResult` for a finished run by scoring its final
/// metrics against the scenario's win tiers.
pub fn build_result(
    scenario: &ScenarioDefinition,
    metrics: std::collections::HashMap<String, f32>,
) -> GameResult {
    let tier = scenario.resolve_tier(&metrics);
    let mut result = GameResult::new(scenario.mission);
    result.outcome = tier.outcome.clone();
    result.score_awarded = tier.fl_score;
    result.metrics = metrics;
    result
}

/// The synergy a mission can demonstrate, if any. The ecosystem mission
/// consumes synergies rather than granting one.
pub fn synergy_for(mission: MissionId) -> Option<SynergyId> {
    match mission {
        MissionId::PusselSpelDatasystem => Some(SynergyId::ExpertDataModel),
        MissionId::ValfardsDilemma => Some(SynergyId::EmpathyTraining),
        MissionId::Kompetensresan => Some(SynergyId::SkilledWorkforce),
        MissionId::Konnektivitetsvakten => Some(SynergyId::ResilientNetwork),
        MissionId::Ekosystembyggaren => None,
    }
}

/// Whether `outcome` is one of the scenario's optimal win tiers. Failure
/// and intermediate tiers are not.
fn outcome_is_optimal(
    library: &ScenarioLibrary,
    mission: MissionId,
    outcome: &str,
) -> bool {
    library
        .scenario(mission)
        .and_then(|s| s.win_tiers.iter().find(|t| t.outcome == outcome))
        .is_some_and(|tier| tier.optimal)
}

pub(crate) fn on_mission_completed(
    trigger: On<MissionCompleted>,
    library: Res<ScenarioLibrary>,
    book: Res<AchievementBook>,
    mut progress: ResMut<PlayerProgress>,
    mut commands: Commands,
) {
    let result = &trigger.event().result;
    let Some(mission) = result.mission else {
        warn!("mission result without a mission id, dropping");
        return;
    };

    let optimal = outcome_is_optimal(&library, mission, &result.outcome);
    record_run(&mut progress, mission, result);
    raise_compass_nodes(&library, &mut progress, mission, optimal);

    // Synergies prove mastery: only the optimal outcome tier earns one.
    if optimal
        && let Some(synergy) = synergy_for(mission)
        && progress.unlock_synergy(synergy)
    {
        info!(?synergy, "synergy unlocked");
        commands.trigger(SynergyUnlocked { synergy });
    }

    for achievement in achievements_to_check(&book.catalog, mission) {
        if !check_achievement(&book.catalog, &achievement.id, &progress, Some(result)) {
            continue;
        }
        progress.unlocked_achievements.push(achievement.id.clone());
        progress.total_fl_score += achievement.fl_score_reward;
        info!(id = %achievement.id, reward = achievement.fl_score_reward, "achievement unlocked");
        commands.trigger(AchievementUnlocked {
            achievement_id: achievement.id.clone(),
            name: achievement.name.clone(),
            fl_score_reward: achievement.fl_score_reward,
        });
    }

    progress.last_updated = chrono::Utc::now().to_rfc3339();
    info!(
        mission = mission.slug(),
        outcome = %result.outcome,
        total_fl_score = progress.total_fl_score,
        "mission completed"
    );
}

/// Records the run. A replay updates the existing record when the new
/// score is better and awards only the improvement, so distinct-mission
/// counts and totals stay consistent.
fn record_run(progress: &mut PlayerProgress, mission: MissionId, result: &GameResult) {
    let completed_at = chrono::Utc::now().to_rfc3339();
    match progress
        .completed_missions
        .iter_mut()
        .find(|c| c.mission == mission)
    {
        Some(record) => {
            if result.score_awarded > record.score_awarded {
                let improvement = result.score_awarded - record.score_awarded;
                record.score_awarded = result.score_awarded;
                record.best_outcome = result.outcome.clone();
                record.completed_at = completed_at;
                progress.total_fl_score += improvement;
            }
        }
        None => {
            progress.completed_missions.push(CompletedMission {
                mission,
                score_awarded: result.score_awarded,
                best_outcome: result.outcome.clone(),
                completed_at,
            });
            progress.total_fl_score += result.score_awarded;
        }
    }
}

fn raise_compass_nodes(
    library: &ScenarioLibrary,
    progress: &mut PlayerProgress,
    mission: MissionId,
    optimal: bool,
) {
    let status = if optimal {
        CompassNodeStatus::Mastered
    } else {
        CompassNodeStatus::Unlocked
    };
    for node in library.compass.nodes_for(mission) {
        progress.raise_compass_node(&node.id, status);
    }
}
