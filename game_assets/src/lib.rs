use {
    achievement_assets::AchievementCatalog,
    bevy::{platform::collections::HashMap, prelude::*},
    dialogue_assets::DialogueTree,
    locale_assets::LocaleTable,
    progress_components::MissionId,
    scenario_assets::{CompassMap, ScenarioDefinition},
    sound_assets::SoundManifest,
    states::GameState,
};

pub struct AssetsPlugin;

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameAssets>()
            .add_systems(Startup, start_loading)
            .add_systems(Update, check_assets.run_if(in_state(GameState::Loading)));
    }
}

/// Handles to every content table. Loaded once at startup; the tables
/// themselves are immutable for the rest of the session.
#[derive(Resource, Default)]
pub struct GameAssets {
    pub achievement_catalog: Handle<AchievementCatalog>,
    pub scenarios: HashMap<MissionId, Handle<ScenarioDefinition>>,
    pub compass_map: Handle<CompassMap>,
    pub welfare_dialogue: Handle<DialogueTree>,
    pub sound_manifest: Handle<SoundManifest>,
    pub locale: Handle<LocaleTable>,
}

fn start_loading(mut assets: ResMut<GameAssets>, asset_server: Res<AssetServer>) {
    info!("started loading content tables");
    assets.achievement_catalog =
        asset_server.load("achievements/achievements.catalog.ron");
    assets.compass_map = asset_server.load("scenarios/digital_kompassen.compass.ron");
    assets.welfare_dialogue =
        asset_server.load("dialogue/valfards_dilemma.dialogue.ron");
    assets.sound_manifest = asset_server.load("audio/sounds.manifest.ron");
    assets.locale = asset_server.load("locale/sv.locale.ron");

    for mission in MissionId::ALL {
        let path = format!("scenarios/{}.scenario.ron", mission.slug().replace('-', "_"));
        assets.scenarios.insert(mission, asset_server.load(path));
    }
}

fn check_assets(
    mut next_state: ResMut<NextState<GameState>>,
    game_assets: Res<GameAssets>,
    asset_server: Res<AssetServer>,
) {
    let scenarios_loaded = game_assets
        .scenarios
        .values()
        .all(|handle| asset_server.is_loaded_with_dependencies(handle));

    let loaded = scenarios_loaded
        && asset_server.is_loaded_with_dependencies(&game_assets.achievement_catalog)
        && asset_server.is_loaded_with_dependencies(&game_assets.compass_map)
        && asset_server.is_loaded_with_dependencies(&game_assets.welfare_dialogue)
        && asset_server.is_loaded_with_dependencies(&game_assets.sound_manifest)
        && asset_server.is_loaded_with_dependencies(&game_assets.locale);

    if loaded {
        info!("content tables loaded");
        next_state.set(GameState::Running);
    }
}
