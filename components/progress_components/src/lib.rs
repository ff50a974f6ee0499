use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

/// Number of missions in the campaign. The "all missions" completion
/// predicate compares against this, not against the record count.
pub const MISSION_COUNT: usize = 5;

/// The five mini-games. Serialized with the content slugs the scenario
/// and achievement tables use, so RON content reads naturally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
pub enum MissionId {
    /// "Säker Datasystem" — infrastructure puzzle.
    PusselSpelDatasystem,
    /// "Välfärdens Dilemma" — dialogue scenario.
    ValfardsDilemma,
    /// "Kompetensresan" — 12-month competence planner.
    Kompetensresan,
    /// "Konnektivitetsvakten" — build-and-defend infrastructure.
    Konnektivitetsvakten,
    /// "Ekosystembyggaren" — national innovation ecosystem.
    Ekosystembyggaren,
}

impl MissionId {
    pub const ALL: [MissionId; MISSION_COUNT] = [
        MissionId::PusselSpelDatasystem,
        MissionId::ValfardsDilemma,
        MissionId::Kompetensresan,
        MissionId::Konnektivitetsvakten,
        MissionId::Ekosystembyggaren,
    ];

    /// Stable content id, shared with the original campaign data.
    pub fn slug(&self) -> &'static str {
        match self {
            MissionId::PusselSpelDatasystem => "pussel-spel-datasystem",
            MissionId::ValfardsDilemma => "valfards-dilemma",
            MissionId::Kompetensresan => "kompetensresan",
            MissionId::Konnektivitetsvakten => "konnektivitetsvakten",
            MissionId::Ekosystembyggaren => "ekosystembyggaren",
        }
    }

    pub fn from_slug(slug: &str) -> Option<MissionId> {
        MissionId::ALL.into_iter().find(|m| m.slug() == slug)
    }
}

/// Record of one finished mission inside `PlayerProgress`.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct CompletedMission {
    pub mission: MissionId,
    pub score_awarded: u32,
    pub best_outcome: String,
    /// RFC 3339 timestamp of the completion that produced this record.
    pub completed_at: String,
}

/// Status of one node on the Digital Compass strategy map.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize,
)]
pub enum CompassNodeStatus {
    #[default]
    Locked,
    Unlocked,
    Mastered,
}

impl CompassNodeStatus {
    /// Anything the player has reached counts as explored.
    pub fn is_explored(&self) -> bool {
        !matches!(self, CompassNodeStatus::Locked)
    }
}

/// The four cross-mission bonus flags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
pub enum SynergyId {
    ExpertDataModel,
    EmpathyTraining,
    SkilledWorkforce,
    ResilientNetwork,
}

impl SynergyId {
    pub const ALL: [SynergyId; 4] = [
        SynergyId::ExpertDataModel,
        SynergyId::EmpathyTraining,
        SynergyId::SkilledWorkforce,
        SynergyId::ResilientNetwork,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            SynergyId::ExpertDataModel => "synergy_expert_data_model",
            SynergyId::EmpathyTraining => "synergy_empathy_training",
            SynergyId::SkilledWorkforce => "synergy_skilled_workforce",
            SynergyId::ResilientNetwork => "synergy_resilient_network",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_slugs_round_trip() {
        for mission in MissionId::ALL {
            assert_eq!(MissionId::from_slug(mission.slug()), Some(mission));
        }
        assert_eq!(MissionId::from_slug("not-a-mission"), None);
    }

    #[test]
    fn locked_nodes_are_not_explored() {
        assert!(!CompassNodeStatus::Locked.is_explored());
        assert!(CompassNodeStatus::Unlocked.is_explored());
        assert!(CompassNodeStatus::Mastered.is_explored());
    }
}
