use {
    bevy::prelude::*,
    progress_components::MissionId,
    serde::{Deserialize, Serialize},
};

/// The full achievement table, shipped as one RON asset and loaded once
/// at startup. Ids must be unique within a catalog.
#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct AchievementCatalog {
    pub achievements: Vec<AchievementDefinition>,
}

impl AchievementCatalog {
    pub fn get(&self, id: &str) -> Option<&AchievementDefinition> {
        self.achievements.iter().find(|a| a.id == id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AchievementDefinition {
    /// Unique key, e.g. "first_victory".
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: AchievementCategory,
    /// Material icon name used by the UI layer.
    pub icon: String,
    pub rarity: Rarity,
    pub fl_score_reward: u32,
    pub condition: UnlockCondition,
    pub flavor_text: String,
    /// Hidden achievements show "???" until unlocked.
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AchievementCategory {
    Gameplay,
    Mastery,
    Strategy,
    Exploration,
    Social,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn color(&self) -> Color {
        match self {
            Rarity::Common => Color::srgb_u8(158, 158, 158),
            Rarity::Uncommon => Color::srgb_u8(76, 175, 80),
            Rarity::Rare => Color::srgb_u8(33, 150, 243),
            Rarity::Epic => Color::srgb_u8(156, 39, 176),
            Rarity::Legendary => Color::srgb_u8(255, 152, 0),
        }
    }

    /// Swedish display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Rarity::Common => "Vanlig",
            Rarity::Uncommon => "Ovanlig",
            Rarity::Rare => "Sällsynt",
            Rarity::Epic => "Episk",
            Rarity::Legendary => "Legendarisk",
        }
    }
}

/// Which missions a completion-count condition ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CompletionScope {
    AnyMission,
    AllMissions,
}

/// A metric name paired with the minimum value a `GameResult` must carry.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricFloor {
    pub metric: String,
    pub min: f32,
}

/// The closed set of unlock-condition kinds. Every variant is evaluated
/// by a pure predicate over a `PlayerProgress` snapshot and (for
/// mission-scoped kinds) the finishing `GameResult`.
#[derive(Debug, Clone, Deserialize)]
pub enum UnlockCondition {
    /// `AnyMission`: at least `count` missions completed.
    /// `AllMissions`: every mission completed (`count` ignored).
    MissionCompletion {
        count: u32,
        scope: CompletionScope,
    },
    /// The finishing run of `mission` ended with exactly this outcome,
    /// optionally with a score floor.
    SpecificOutcome {
        mission: MissionId,
        outcome: String,
        #[serde(default)]
        min_score: Option<u32>,
    },
    /// Every listed metric of the finishing run meets its floor.
    MetricThreshold {
        mission: MissionId,
        floors: Vec<MetricFloor>,
    },
    /// At least `count` synergy flags set; `require_all` demands all four.
    SynergyCount {
        count: u32,
        #[serde(default)]
        require_all: bool,
    },
    /// At least this percentage of compass nodes explored.
    CompassExploration { percent_unlocked: f32 },
    /// Every relationship score of the finishing run is at or above the
    /// floor. An empty score map does not qualify.
    RelationshipFloor { mission: MissionId, floor: f32 },
}
