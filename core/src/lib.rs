use {
    achievements::AchievementsPlugin,
    audio::{GameAudioPlugin, PlayAmbient},
    bevy::prelude::*,
    dialogue::DialoguePlugin,
    game_assets::AssetsPlugin,
    hud::HudPlugin,
    localization::LocalizationPlugin,
    missions::MissionsPlugin,
    notification_ui::NotificationUiPlugin,
    save_load::SaveLoadPlugin,
    states::GameState,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_plugins((
                AssetsPlugin,
                LocalizationPlugin,
                AchievementsPlugin,
                MissionsPlugin,
                DialoguePlugin,
                GameAudioPlugin,
                SaveLoadPlugin,
                HudPlugin,
                NotificationUiPlugin,
            ))
            .add_systems(Startup, setup_camera)
            // First Update of Running, so the hydrated sound manifest is
            // already in place.
            .add_systems(
                Update,
                start_ambient.run_if(in_state(GameState::Running)).run_if(run_once),
            );
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn start_ambient(mut commands: Commands) {
    commands.trigger(PlayAmbient {
        id: "ambient.main_theme".to_string(),
    });
}
