use {
    bevy::prelude::*,
    progress_components::MissionId,
    serde::Deserialize,
};

/// Static description of one mini-game: metadata, the metrics it tracks
/// and the tiered win conditions its final metrics are scored against.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct ScenarioDefinition {
    pub mission: MissionId,
    pub title: String,
    pub description: String,
    /// Player-facing estimate, e.g. "15-20 minuter".
    pub estimated_time: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub metrics: Vec<MetricDefinition>,
    /// Ordered best-first. Scoring picks the first tier whose floors are
    /// all met; `failure` applies when none is.
    #[serde(default)]
    pub win_tiers: Vec<WinTier>,
    pub failure: WinTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// A metric the scenario tracks, with its display info and start value.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricDefinition {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub start_value: f32,
    #[serde(default = "default_max_value")]
    pub max_value: f32,
}

fn default_max_value() -> f32 {
    100.0
}

/// One outcome tier: the floors every named metric must reach and the
/// FL score the tier awards.
#[derive(Debug, Clone, Deserialize)]
pub struct WinTier {
    /// Outcome name, e.g. "Konsensuslösningen".
    pub outcome: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<(String, f32)>,
    pub fl_score: u32,
    /// Optimal tiers master the mission's compass nodes instead of just
    /// unlocking them.
    #[serde(default)]
    pub optimal: bool,
}

impl ScenarioDefinition {
    /// Picks the best tier whose requirements the final metrics satisfy.
    pub fn resolve_tier(
        &self,
        metrics: &std::collections::HashMap<String, f32>,
    ) -> &WinTier {
        self.win_tiers
            .iter()
            .find(|tier| {
                tier.requirements
                    .iter()
                    .all(|(id, floor)| metrics.get(id).is_some_and(|v| v >= floor))
            })
            .unwrap_or(&self.failure)
    }
}

/// The Digital Compass strategy map: every node the player can explore,
/// with the mission that unlocks it (if any).
#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct CompassMap {
    pub nodes: Vec<CompassNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompassNode {
    pub id: String,
    pub title: String,
    /// Completing this mission explores the node. Nodes without a
    /// mission are unlocked through onboarding content.
    #[serde(default)]
    pub mission: Option<MissionId>,
}

impl CompassMap {
    pub fn nodes_for(&self, mission: MissionId) -> impl Iterator<Item = &CompassNode> {
        self.nodes
            .iter()
            .filter(move |node| node.mission == Some(mission))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashMap};

    fn welfare_scenario() -> ScenarioDefinition {
        ron::from_str(
            r#"(
            mission: ValfardsDilemma,
            title: "Välfärdens Dilemma",
            description: "Navigera etiska val",
            estimated_time: "15-20 minuter",
            difficulty: Hard,
            metrics: [
                (id: "autonomy", name: "Arnes Autonomi", icon: "person", start_value: 50.0),
                (id: "security", name: "Trygghet", icon: "shield", start_value: 30.0),
                (id: "staff", name: "Personalens Välmående", icon: "favorite", start_value: 40.0),
            ],
            win_tiers: [
                (
                    outcome: "Konsensuslösningen",
                    description: "Alla parter nöjda",
                    requirements: [("autonomy", 75.0), ("security", 75.0), ("staff", 75.0)],
                    fl_score: 1000,
                    optimal: true,
                ),
                (
                    outcome: "Den Pragmatiska Kompromissen",
                    description: "Balanserad lösning",
                    requirements: [("autonomy", 60.0), ("security", 60.0), ("staff", 60.0)],
                    fl_score: 700,
                ),
            ],
            failure: (
                outcome: "Implementeringsstopp",
                description: "Projektet stoppas",
                fl_score: 100,
            ),
        )"#,
        )
        .expect("scenario should parse")
    }

    #[test]
    fn resolve_tier_picks_best_first() {
        let scenario = welfare_scenario();
        let metrics: HashMap<String, f32> = [
            ("autonomy".to_string(), 80.0),
            ("security".to_string(), 76.0),
            ("staff".to_string(), 90.0),
        ]
        .into();
        assert_eq!(scenario.resolve_tier(&metrics).outcome, "Konsensuslösningen");
    }

    #[test]
    fn resolve_tier_falls_through_to_failure() {
        let scenario = welfare_scenario();
        let low: HashMap<String, f32> =
            [("autonomy".to_string(), 10.0), ("security".to_string(), 10.0)].into();
        assert_eq!(scenario.resolve_tier(&low).outcome, "Implementeringsstopp");
        assert_eq!(scenario.resolve_tier(&low).fl_score, 100);
    }

    #[test]
    fn missing_metric_fails_the_tier() {
        let scenario = welfare_scenario();
        // "staff" absent entirely: consensus and compromise both need it.
        let partial: HashMap<String, f32> = [
            ("autonomy".to_string(), 90.0),
            ("security".to_string(), 90.0),
        ]
        .into();
        assert_eq!(scenario.resolve_tier(&partial).outcome, "Implementeringsstopp");
    }
}
