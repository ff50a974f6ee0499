//! Sound playback driven by the manifest.
//!
//! The `AudioService` resource is the only mutable audio state: the
//! hydrated manifest, the decoded-buffer handles and the active volume
//! mix. Gameplay code never touches sinks directly; it triggers
//! `PlaySound` / `PlayAmbient` / `PlaySequence` and the observers here
//! do the spawning. Unknown sound ids log and play nothing.

use {
    bevy::{audio::Volume, platform::collections::HashMap, prelude::*},
    bevy_common_assets::ron::RonAssetPlugin,
    sound_assets::{SoundCategory, SoundDef, SoundManifest, VolumePreset},
    states::GameState,
};

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<SoundManifest>::new(&["manifest.ron"]))
            .init_resource::<AudioService>()
            .add_systems(OnEnter(GameState::Running), hydrate_service)
            .add_systems(
                Update,
                (tick_cues, fade_in_ambient, fade_out_ambient)
                    .run_if(in_state(GameState::Running)),
            )
            .add_observer(on_play_sound)
            .add_observer(on_play_ambient)
            .add_observer(on_stop_ambient)
            .add_observer(on_play_sequence);
    }
}

/// Play a one-shot sound by manifest id.
#[derive(Event, Debug, Clone)]
pub struct PlaySound {
    pub id: String,
}

impl PlaySound {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Start (or switch) the looping ambient track. The previous track
/// fades out at its manifest rate.
#[derive(Event, Debug, Clone)]
pub struct PlayAmbient {
    pub id: String,
}

#[derive(Event, Debug, Clone)]
pub struct StopAmbient;

/// Play a named cue sequence from the manifest.
#[derive(Event, Debug, Clone)]
pub struct PlaySequence {
    pub name: String,
}

/// Active volume mix. Category and master factors multiply each sound's
/// base volume; muted silences everything without losing the mix.
#[derive(Debug, Clone, Reflect)]
pub struct AudioMix {
    pub master: f32,
    pub ui: f32,
    pub ambient: f32,
    pub feedback: f32,
    pub dialogue: f32,
    pub muted: bool,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self {
            master: 1.0,
            ui: 0.6,
            ambient: 0.4,
            feedback: 0.7,
            dialogue: 0.8,
            muted: false,
        }
    }
}

impl AudioMix {
    pub fn from_preset(preset: &VolumePreset) -> Self {
        Self {
            master: preset.master,
            ui: preset.ui,
            ambient: preset.ambient,
            feedback: preset.feedback,
            dialogue: preset.dialogue,
            muted: false,
        }
    }

    fn category_factor(&self, category: SoundCategory) -> f32 {
        match category {
            SoundCategory::Ui => self.ui,
            SoundCategory::Ambient => self.ambient,
            SoundCategory::Feedback => self.feedback,
            SoundCategory::Dialogue => self.dialogue,
        }
    }
}

/// Final playback volume for a sound: base, scaled by its category and
/// the master factor. Zero while muted.
pub fn effective_volume(mix: &AudioMix, category: SoundCategory, base: f32) -> f32 {
    if mix.muted {
        return 0.0;
    }
    (base * mix.category_factor(category) * mix.master).clamp(0.0, 1.0)
}

#[derive(Resource, Debug, Default)]
pub struct AudioService {
    pub manifest: SoundManifest,
    pub mix: AudioMix,
    handles: HashMap<String, Handle<AudioSource>>,
}

impl AudioService {
    /// Buffer handle for a manifest entry, loading it on first use when
    /// it was not preloaded.
    fn handle_or_load(
        &mut self,
        sound: &SoundDef,
        asset_server: &AssetServer,
    ) -> Handle<AudioSource> {
        self.handles
            .entry(sound.id.clone())
            .or_insert_with(|| asset_server.load(sound.file.clone()))
            .clone()
    }
}

/// The manifest entries to decode up front; everything else streams in
/// on first play.
fn preload_entries(manifest: &SoundManifest) -> impl Iterator<Item = &SoundDef> {
    manifest.sounds.iter().filter(|sound| sound.preload)
}

/// Looped entries keep their sink; one-shots despawn when done.
fn settings_for(sound: &SoundDef) -> PlaybackSettings {
    if sound.looped {
        PlaybackSettings::LOOP
    } else {
        PlaybackSettings::DESPAWN
    }
}

fn hydrate_service(
    mut service: ResMut<AudioService>,
    manifests: Res<Assets<SoundManifest>>,
    asset_server: Res<AssetServer>,
) {
    let Some((_, manifest)) = manifests.iter().next() else {
        warn!("no sound manifest loaded, audio disabled");
        return;
    };
    service.manifest = manifest.clone();
    if let Some(preset) = service.manifest.preset("default") {
        service.mix = AudioMix::from_preset(preset);
    }
    let entries: Vec<(String, String)> = preload_entries(&service.manifest)
        .map(|sound| (sound.id.clone(), sound.file.clone()))
        .collect();
    for (id, file) in entries {
        service.handles.insert(id, asset_server.load(file));
    }
    info!(preloaded = service.handles.len(), "sound manifest hydrated");
}

/// Looping ambient track currently playing.
#[derive(Component)]
struct AmbientTrack;

/// Ramps the sink from silence up to `target` over `seconds`.
#[derive(Component)]
struct FadeIn {
    target: f32,
    seconds: f32,
}

/// Ramps the sink down to silence, then despawns.
#[derive(Component)]
struct FadeOut {
    seconds: f32,
}

fn on_play_sound(
    trigger: On<PlaySound>,
    mut service: ResMut<AudioService>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    let id = &trigger.event().id;
    let Some(sound) = service.manifest.sound(id).cloned() else {
        warn!(%id, "unknown sound id");
        return;
    };
    let handle = service.handle_or_load(&sound, &asset_server);
    let volume = effective_volume(&service.mix, sound.category, sound.volume);
    trace!(%id, volume, "playing sound");
    commands.spawn((
        AudioPlayer(handle),
        settings_for(&sound).with_volume(Volume::Linear(volume)),
    ));
}

fn on_play_ambient(
    trigger: On<PlayAmbient>,
    mut service: ResMut<AudioService>,
    asset_server: Res<AssetServer>,
    playing: Query<Entity, With<AmbientTrack>>,
    mut commands: Commands,
) {
    let id = &trigger.event().id;
    let Some(sound) = service.manifest.sound(id).cloned() else {
        warn!(%id, "unknown ambient id");
        return;
    };
    if !sound.looped {
        warn!(%id, "ambient entry is not marked looped, playing once");
    }
    let handle = service.handle_or_load(&sound, &asset_server);

    for entity in &playing {
        commands.entity(entity).remove::<FadeIn>().insert(FadeOut {
            seconds: sound.fade_out_ms as f32 / 1000.0,
        });
    }

    let target = effective_volume(&service.mix, sound.category, sound.volume);
    debug!(%id, "starting ambient track");
    commands.spawn((
        AmbientTrack,
        AudioPlayer(handle),
        settings_for(&sound).with_volume(Volume::Linear(0.0)),
        FadeIn {
            target,
            seconds: (sound.fade_in_ms as f32 / 1000.0).max(0.001),
        },
    ));
}

fn on_stop_ambient(
    _trigger: On<StopAmbient>,
    service: Res<AudioService>,
    playing: Query<Entity, With<AmbientTrack>>,
    mut commands: Commands,
) {
    for entity in &playing {
        commands.entity(entity).remove::<FadeIn>().insert(FadeOut {
            seconds: default_fade_seconds(&service),
        });
    }
}

fn default_fade_seconds(service: &AudioService) -> f32 {
    service
        .manifest
        .sounds
        .iter()
        .find(|s| s.category == SoundCategory::Ambient)
        .map(|s| s.fade_out_ms as f32 / 1000.0)
        .unwrap_or(1.0)
        .max(0.001)
}

fn fade_in_ambient(
    time: Res<Time>,
    mut tracks: Query<(Entity, &mut AudioSink, &FadeIn)>,
    mut commands: Commands,
) {
    for (entity, mut sink, fade) in &mut tracks {
        let step = fade.target * time.delta_secs() / fade.seconds;
        let volume = (sink.volume().to_linear() + step).min(fade.target);
        sink.set_volume(Volume::Linear(volume));
        if volume >= fade.target {
            commands.entity(entity).remove::<FadeIn>();
        }
    }
}

fn fade_out_ambient(
    time: Res<Time>,
    mut tracks: Query<(Entity, &mut AudioSink, &FadeOut)>,
    mut commands: Commands,
) {
    for (entity, mut sink, fade) in &mut tracks {
        let current = sink.volume().to_linear();
        let step = time.delta_secs() / fade.seconds;
        let volume = (current - step).max(0.0);
        sink.set_volume(Volume::Linear(volume));
        if volume <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// A scheduled cue step waiting for its delay.
#[derive(Component)]
struct PendingCue {
    sound: String,
    timer: Timer,
}

fn on_play_sequence(
    trigger: On<PlaySequence>,
    service: Res<AudioService>,
    mut commands: Commands,
) {
    let name = &trigger.event().name;
    let Some(sequence) = service.manifest.sequence(name) else {
        warn!(%name, "unknown cue sequence");
        return;
    };
    debug!(%name, steps = sequence.steps.len(), "scheduling cue sequence");
    for step in &sequence.steps {
        commands.spawn(PendingCue {
            sound: step.sound.clone(),
            timer: Timer::from_seconds(step.delay_ms as f32 / 1000.0, TimerMode::Once),
        });
    }
}

fn tick_cues(
    time: Res<Time>,
    mut cues: Query<(Entity, &mut PendingCue)>,
    mut commands: Commands,
) {
    for (entity, mut cue) in &mut cues {
        if cue.timer.tick(time.delta()).just_finished() {
            commands.trigger(PlaySound::new(cue.sound.clone()));
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_volume_scales_by_category_and_master() {
        let mix = AudioMix {
            master: 0.5,
            ui: 0.6,
            ambient: 0.4,
            feedback: 0.7,
            dialogue: 0.8,
            muted: false,
        };
        assert!((effective_volume(&mix, SoundCategory::Ui, 1.0) - 0.3).abs() < 1e-6);
        assert!(
            (effective_volume(&mix, SoundCategory::Feedback, 0.5) - 0.175).abs() < 1e-6
        );
    }

    #[test]
    fn muted_mix_is_silent() {
        let mix = AudioMix {
            muted: true,
            ..AudioMix::default()
        };
        assert_eq!(effective_volume(&mix, SoundCategory::Ambient, 1.0), 0.0);
        assert_eq!(effective_volume(&mix, SoundCategory::Dialogue, 0.8), 0.0);
    }

    #[test]
    fn volume_never_exceeds_unity() {
        let mix = AudioMix {
            master: 2.0,
            ui: 2.0,
            ..AudioMix::default()
        };
        assert_eq!(effective_volume(&mix, SoundCategory::Ui, 1.0), 1.0);
    }

    fn sound(id: &str, looped: bool, preload: bool) -> SoundDef {
        SoundDef {
            id: id.to_string(),
            file: format!("audio/{id}.ogg"),
            volume: 0.5,
            category: if looped {
                SoundCategory::Ambient
            } else {
                SoundCategory::Ui
            },
            looped,
            fade_in_ms: 0,
            fade_out_ms: 0,
            preload,
        }
    }

    #[test]
    fn playback_mode_follows_the_loop_flag() {
        use bevy::audio::PlaybackMode;

        assert!(matches!(
            settings_for(&sound("ambient.theme", true, true)).mode,
            PlaybackMode::Loop
        ));
        assert!(matches!(
            settings_for(&sound("ui.click", false, true)).mode,
            PlaybackMode::Despawn
        ));
    }

    #[test]
    fn only_flagged_entries_preload() {
        let manifest = SoundManifest {
            sounds: vec![
                sound("ui.click", false, true),
                sound("feedback.fanfare", false, false),
                sound("ambient.theme", true, true),
            ],
            sequences: Vec::new(),
            presets: Vec::new(),
        };
        let ids: Vec<&str> = preload_entries(&manifest).map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["ui.click", "ambient.theme"]);
    }

    #[test]
    fn preset_round_trips_into_mix() {
        let preset = VolumePreset {
            name: "quiet".to_string(),
            master: 0.3,
            ui: 0.2,
            ambient: 0.1,
            feedback: 0.2,
            dialogue: 0.4,
        };
        let mix = AudioMix::from_preset(&preset);
        assert!(!mix.muted);
        assert!(
            (effective_volume(&mix, SoundCategory::Dialogue, 1.0) - 0.12).abs() < 1e-6
        );
    }
}
