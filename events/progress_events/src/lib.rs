use {
    bevy::prelude::*,
    progress_components::MissionId,
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

/// Snapshot a mini-game emits exactly once when it finishes.
///
/// Consumed by the progress pipeline to update `PlayerProgress` and to
/// evaluate achievement conditions, then discarded. Named metrics are
/// whatever the scenario defines ("security", "final_index",
/// "base"/"broad"/"specialist", "unicorns", ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameResult {
    pub mission: Option<MissionId>,
    /// Outcome tier name, e.g. "Konsensuslösningen".
    pub outcome: String,
    /// FL score this run awards.
    pub score_awarded: u32,
    pub metrics: HashMap<String, f32>,
    /// Per-character final relationship scores (welfare mission).
    pub relationship_scores: HashMap<String, f32>,
    /// Fraction of the scenario budget spent, if the mission tracks one.
    pub budget_fraction_used: Option<f32>,
    /// Fraction of the scenario time limit used, if the mission tracks one.
    pub time_fraction_used: Option<f32>,
}

impl GameResult {
    pub fn new(mission: MissionId) -> Self {
        Self {
            mission: Some(mission),
            ..Default::default()
        }
    }

    pub fn metric(&self, name: &str) -> Option<f32> {
        self.metrics.get(name).copied()
    }
}

/// Fired once by a mini-game at completion. The single entry point into
/// the progress / achievement / persistence pipeline.
#[derive(Event, Debug, Clone)]
pub struct MissionCompleted {
    pub result: GameResult,
}

/// Fired after an achievement transitions locked → unlocked. Fires at
/// most once per achievement id for a given player.
#[derive(Event, Debug, Clone)]
pub struct AchievementUnlocked {
    pub achievement_id: String,
    pub name: String,
    pub fl_score_reward: u32,
}

/// Fired when a synergy flag flips false → true.
#[derive(Event, Debug, Clone)]
pub struct SynergyUnlocked {
    pub synergy: progress_components::SynergyId,
}
