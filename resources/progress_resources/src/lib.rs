pub mod fixtures;

use {
    bevy::prelude::*,
    progress_components::{
        CompassNodeStatus, CompletedMission, MissionId, SynergyId,
    },
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

/// The whole of a player's persistent state. Mutated only by applying a
/// `GameResult` after a mission ends; persisted wholesale by `save_load`.
#[derive(Resource, Reflect, Debug, Clone, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct PlayerProgress {
    pub user_id: String,
    /// Cumulative "change leader" points (mission scores + achievement
    /// rewards). Achievement rewards are re-derivable from
    /// `unlocked_achievements` alone.
    pub total_fl_score: u32,
    pub completed_missions: Vec<CompletedMission>,
    pub unlocked_achievements: Vec<String>,
    pub synergies: HashMap<SynergyId, bool>,
    pub compass: HashMap<String, CompassNodeStatus>,
    pub session_count: u32,
    /// RFC 3339 timestamp of the last mutation.
    pub last_updated: String,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self::new("local-player")
    }
}

impl PlayerProgress {
    pub fn new(user_id: &str) -> Self {
        let synergies = SynergyId::ALL.into_iter().map(|s| (s, false)).collect();
        Self {
            user_id: user_id.to_string(),
            total_fl_score: 0,
            completed_missions: Vec::new(),
            unlocked_achievements: Vec::new(),
            synergies,
            compass: HashMap::new(),
            session_count: 1,
            last_updated: String::new(),
        }
    }

    /// Number of distinct missions completed. Replays do not add records,
    /// so this is bounded by `MISSION_COUNT`.
    pub fn completed_count(&self) -> usize {
        self.completed_missions.len()
    }

    pub fn has_completed(&self, mission: MissionId) -> bool {
        self.completed_missions.iter().any(|c| c.mission == mission)
    }

    pub fn is_achievement_unlocked(&self, id: &str) -> bool {
        self.unlocked_achievements.iter().any(|a| a == id)
    }

    pub fn synergy_count(&self) -> usize {
        self.synergies.values().filter(|&&on| on).count()
    }

    pub fn all_synergies_unlocked(&self) -> bool {
        SynergyId::ALL
            .into_iter()
            .all(|s| self.synergies.get(&s).copied().unwrap_or(false))
    }

    /// Percentage of compass entries that are at least unlocked, over the
    /// entries present. An empty map reports 0.
    pub fn compass_explored_percent(&self) -> f32 {
        if self.compass.is_empty() {
            return 0.0;
        }
        let explored = self
            .compass
            .values()
            .filter(|status| status.is_explored())
            .count();
        explored as f32 / self.compass.len() as f32 * 100.0
    }

    /// Upgrades a compass node, never downgrading Mastered to Unlocked.
    pub fn raise_compass_node(&mut self, node_id: &str, status: CompassNodeStatus) {
        let entry = self
            .compass
            .entry(node_id.to_string())
            .or_insert(CompassNodeStatus::Locked);
        match (*entry, status) {
            (CompassNodeStatus::Mastered, _) => {}
            (_, CompassNodeStatus::Locked) => {}
            _ => *entry = status,
        }
    }

    /// Sets a synergy flag. Returns true only on a false → true flip, so
    /// callers fire `SynergyUnlocked` at most once per flag.
    pub fn unlock_synergy(&mut self, synergy: SynergyId) -> bool {
        let flag = self.synergies.entry(synergy).or_insert(false);
        if *flag {
            false
        } else {
            *flag = true;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synergy_unlock_reports_flip_once() {
        let mut progress = PlayerProgress::new("test");
        assert!(progress.unlock_synergy(SynergyId::ExpertDataModel));
        assert!(!progress.unlock_synergy(SynergyId::ExpertDataModel));
        assert_eq!(progress.synergy_count(), 1);
    }

    #[test]
    fn compass_percent_over_present_entries() {
        let mut progress = PlayerProgress::new("test");
        assert_eq!(progress.compass_explored_percent(), 0.0);

        progress.compass.insert("a".into(), CompassNodeStatus::Mastered);
        progress.compass.insert("b".into(), CompassNodeStatus::Unlocked);
        progress.compass.insert("c".into(), CompassNodeStatus::Locked);
        progress.compass.insert("d".into(), CompassNodeStatus::Locked);
        assert_eq!(progress.compass_explored_percent(), 50.0);
    }

    #[test]
    fn mastered_nodes_never_downgrade() {
        let mut progress = PlayerProgress::new("test");
        progress.raise_compass_node("node", CompassNodeStatus::Mastered);
        progress.raise_compass_node("node", CompassNodeStatus::Unlocked);
        assert_eq!(
            progress.compass.get("node"),
            Some(&CompassNodeStatus::Mastered)
        );
    }
}
