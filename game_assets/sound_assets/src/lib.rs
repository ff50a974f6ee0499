use {
    bevy::prelude::*,
    serde::Deserialize,
};

/// The audio-asset manifest: every sound the game can play, the cue
/// sequences built from them and the selectable volume presets.
#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct SoundManifest {
    pub sounds: Vec<SoundDef>,
    #[serde(default)]
    pub sequences: Vec<CueSequence>,
    #[serde(default)]
    pub presets: Vec<VolumePreset>,
}

impl SoundManifest {
    pub fn sound(&self, id: &str) -> Option<&SoundDef> {
        self.sounds.iter().find(|s| s.id == id)
    }

    pub fn sequence(&self, name: &str) -> Option<&CueSequence> {
        self.sequences.iter().find(|s| s.name == name)
    }

    pub fn preset(&self, name: &str) -> Option<&VolumePreset> {
        self.presets.iter().find(|p| p.name == name)
    }
}

/// One manifest entry. The decoded buffer is cached by the asset server;
/// the entry itself has no runtime identity.
#[derive(Debug, Clone, Deserialize)]
pub struct SoundDef {
    /// Dotted id, e.g. "ui.click" or "ambient.main_menu".
    pub id: String,
    /// Path under `assets/`.
    pub file: String,
    /// Base volume before category/master scaling.
    pub volume: f32,
    pub category: SoundCategory,
    #[serde(default)]
    pub looped: bool,
    /// Fade-in duration in milliseconds (ambient tracks).
    #[serde(default)]
    pub fade_in_ms: u32,
    #[serde(default)]
    pub fade_out_ms: u32,
    /// Required before first play: loaded during the Loading state.
    #[serde(default)]
    pub preload: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SoundCategory {
    Ui,
    Ambient,
    Feedback,
    Dialogue,
}

/// An ordered cue: sounds played with per-step delays, e.g. the
/// unlock-then-fanfare pair on an achievement.
#[derive(Debug, Clone, Deserialize)]
pub struct CueSequence {
    pub name: String,
    pub steps: Vec<CueStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CueStep {
    pub sound: String,
    /// Delay from sequence start, milliseconds.
    pub delay_ms: u32,
}

/// Named volume mix (master + per category).
#[derive(Debug, Clone, Deserialize)]
pub struct VolumePreset {
    pub name: String,
    pub master: f32,
    pub ui: f32,
    pub ambient: f32,
    pub feedback: f32,
    pub dialogue: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_ron_parses() {
        let manifest: SoundManifest = ron::from_str(
            r#"(
            sounds: [
                (id: "ui.click", file: "audio/ui/click.ogg", volume: 0.5, category: Ui, preload: true),
                (id: "ambient.main_menu", file: "audio/ambient/main.ogg", volume: 0.4,
                 category: Ambient, looped: true, fade_in_ms: 2000, fade_out_ms: 1000),
            ],
            sequences: [
                (name: "achievement_unlock", steps: [
                    (sound: "feedback.unlock", delay_ms: 0),
                    (sound: "feedback.achievement", delay_ms: 300),
                ]),
            ],
            presets: [
                (name: "default", master: 1.0, ui: 0.6, ambient: 0.4, feedback: 0.7, dialogue: 0.8),
            ],
        )"#,
        )
        .expect("manifest should parse");

        assert!(manifest.sound("ui.click").is_some());
        assert!(manifest.sound("ui.click").unwrap().preload);
        assert!(manifest.sound("ambient.main_menu").unwrap().looped);
        assert_eq!(
            manifest.sequence("achievement_unlock").unwrap().steps.len(),
            2
        );
        assert!(manifest.preset("default").is_some());
        assert!(manifest.sound("nope").is_none());
    }
}
