//! Persistence for player progress.
//!
//! One RON file per player under `saves/`, written whole on every
//! progress change, on the autosave interval and on F5; F9 reloads the
//! file on demand. Corrupt or missing saves never stop the game: every
//! failure logs and play continues from the in-memory state.

use {
    bevy::prelude::*,
    progress_resources::PlayerProgress,
    states::GameState,
    std::{fs, path::PathBuf},
};

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutosaveTimer>()
            .add_systems(Startup, load_at_startup)
            .add_systems(
                Update,
                trigger_load_on_keypress.run_if(in_state(GameState::Running)),
            )
            .add_systems(
                PostUpdate,
                (save_on_progress_change, execute_save)
                    .run_if(in_state(GameState::Running)),
            )
            .add_observer(execute_load)
            .add_systems(OnExit(GameState::Running), reset_autosave_timer);
    }
}

/// Reload the player's save file.
#[derive(Event)]
pub struct LoadGame;

#[derive(Resource)]
pub struct AutosaveTimer(Timer);

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(60.0, TimerMode::Repeating))
    }
}

pub fn save_path(user_id: &str) -> PathBuf {
    PathBuf::from("saves").join(format!("{user_id}.ron"))
}

/// Serializes progress to its save file. Failures log and return false.
pub fn write_save(progress: &PlayerProgress) -> bool {
    let path = save_path(&progress.user_id);
    if let Err(e) = fs::create_dir_all("saves") {
        error!("failed to create saves directory: {e}");
        return false;
    }
    let serialized = match ron::ser::to_string_pretty(progress, default_style()) {
        Ok(data) => data,
        Err(e) => {
            error!("failed to serialize progress: {e}");
            return false;
        }
    };
    match fs::write(&path, serialized) {
        Ok(()) => {
            debug!(path = %path.display(), "progress saved");
            true
        }
        Err(e) => {
            error!(path = %path.display(), "failed to write save file: {e}");
            false
        }
    }
}

/// Reads and parses a player's save file, if one exists and is sound.
pub fn read_save(user_id: &str) -> Option<PlayerProgress> {
    let path = save_path(user_id);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            error!(path = %path.display(), "failed to read save file: {e}");
            return None;
        }
    };
    match ron::from_str(&contents) {
        Ok(progress) => Some(progress),
        Err(e) => {
            error!(path = %path.display(), "corrupt save file, starting fresh: {e}");
            None
        }
    }
}

fn default_style() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::default()
}

fn load_at_startup(mut progress: ResMut<PlayerProgress>) {
    match read_save(&progress.user_id) {
        Some(mut saved) => {
            saved.session_count += 1;
            info!(
                user = %saved.user_id,
                sessions = saved.session_count,
                fl_score = saved.total_fl_score,
                "save loaded"
            );
            *progress = saved;
        }
        None => info!(user = %progress.user_id, "no save found, starting fresh"),
    }
}

/// Persists after the progress pipeline mutates anything, so a crash
/// never loses more than the current frame.
fn save_on_progress_change(progress: Res<PlayerProgress>) {
    if progress.is_changed() && !progress.is_added() {
        write_save(&progress);
    }
}

fn execute_save(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut timer: ResMut<AutosaveTimer>,
    progress: Res<PlayerProgress>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        info!("manual save triggered (F5)");
        timer.0.reset();
        write_save(&progress);
        return;
    }
    if timer.0.tick(time.delta()).just_finished() {
        info!("autosave triggered");
        write_save(&progress);
    }
}

fn trigger_load_on_keypress(keyboard: Res<ButtonInput<KeyCode>>, mut commands: Commands) {
    if keyboard.just_pressed(KeyCode::F9) {
        info!("load triggered (F9)");
        commands.trigger(LoadGame);
    }
}

fn execute_load(_trigger: On<LoadGame>, mut progress: ResMut<PlayerProgress>) {
    let Some(saved) = read_save(&progress.user_id) else {
        warn!(user = %progress.user_id, "no save file to load");
        return;
    };
    info!(user = %saved.user_id, "save reloaded");
    *progress = saved;
}

fn reset_autosave_timer(mut timer: ResMut<AutosaveTimer>) {
    *timer = AutosaveTimer::default();
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        progress_components::{CompassNodeStatus, CompletedMission, MissionId, SynergyId},
    };

    #[test]
    fn progress_round_trips_through_ron() {
        let mut progress = PlayerProgress::new("round-trip");
        progress.total_fl_score = 1234;
        progress.completed_missions.push(CompletedMission {
            mission: MissionId::ValfardsDilemma,
            score_awarded: 700,
            best_outcome: "Den Pragmatiska Kompromissen".to_string(),
            completed_at: "2024-01-01T00:00:00Z".to_string(),
        });
        progress.unlocked_achievements.push("first_victory".to_string());
        progress.unlock_synergy(SynergyId::EmpathyTraining);
        progress.raise_compass_node("digital_forvaltning", CompassNodeStatus::Mastered);
        progress.last_updated = "2024-01-01T00:00:00Z".to_string();

        let serialized = ron::ser::to_string_pretty(&progress, default_style())
            .expect("progress should serialize");
        let restored: PlayerProgress =
            ron::from_str(&serialized).expect("progress should parse back");

        assert_eq!(restored.user_id, "round-trip");
        assert_eq!(restored.total_fl_score, 1234);
        assert_eq!(restored.completed_count(), 1);
        assert!(restored.is_achievement_unlocked("first_victory"));
        assert_eq!(restored.synergy_count(), 1);
        assert_eq!(
            restored.compass.get("digital_forvaltning"),
            Some(&CompassNodeStatus::Mastered)
        );
    }

    #[test]
    fn corrupt_save_reports_none() {
        assert!(ron::from_str::<PlayerProgress>("(not a save").is_err());
    }

    #[test]
    fn save_path_is_per_user() {
        assert_eq!(save_path("anna"), PathBuf::from("saves/anna.ron"));
        assert_ne!(save_path("anna"), save_path("bo"));
    }
}
