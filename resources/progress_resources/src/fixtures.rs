//! Canned player states for tests and offline development.

use {
    crate::PlayerProgress,
    progress_components::{
        CompassNodeStatus, CompletedMission, MissionId, SynergyId,
    },
};

/// Fresh account, nothing unlocked.
pub fn new_player() -> PlayerProgress {
    let mut progress = PlayerProgress::new("dev-user-new");
    progress.last_updated = "2024-01-01T00:00:00Z".to_string();
    progress
}

/// Three missions in, two synergies, a handful of achievements.
pub fn progressing_player() -> PlayerProgress {
    let mut progress = PlayerProgress::new("dev-user-progressing");
    progress.total_fl_score = 2500;
    progress.session_count = 3;
    progress.last_updated = "2024-01-01T02:00:00Z".to_string();

    progress.completed_missions = vec![
        CompletedMission {
            mission: MissionId::PusselSpelDatasystem,
            score_awarded: 1200,
            best_outcome: "Perfekt säkerhet och effektivitet".to_string(),
            completed_at: "2024-01-01T01:00:00Z".to_string(),
        },
        CompletedMission {
            mission: MissionId::ValfardsDilemma,
            score_awarded: 800,
            best_outcome: "Den Pragmatiska Kompromissen".to_string(),
            completed_at: "2024-01-01T01:30:00Z".to_string(),
        },
        CompletedMission {
            mission: MissionId::Kompetensresan,
            score_awarded: 600,
            best_outcome: "Grundläggande kompetens".to_string(),
            completed_at: "2024-01-01T02:00:00Z".to_string(),
        },
    ];

    progress.unlocked_achievements = vec![
        "first_victory".to_string(),
        "security_expert".to_string(),
        "consensus_builder".to_string(),
    ];

    progress.unlock_synergy(SynergyId::ExpertDataModel);
    progress.unlock_synergy(SynergyId::SkilledWorkforce);

    for node in [
        "digital_transformation",
        "digital_forvaltning",
        "ena_infrastruktur",
        "sakerhet_integritet",
        "digital_kompetens",
    ] {
        progress.raise_compass_node(node, CompassNodeStatus::Mastered);
    }
    for node in ["baskompetens", "breddkompetens", "spetskompetens"] {
        progress.raise_compass_node(node, CompassNodeStatus::Unlocked);
    }
    for node in ["digital_infrastruktur", "cybersecurity_resilience"] {
        progress
            .compass
            .insert(node.to_string(), CompassNodeStatus::Locked);
    }

    progress
}

/// Four missions done, all synergies, compass nearly mastered.
pub fn advanced_player() -> PlayerProgress {
    let mut progress = progressing_player();
    progress.user_id = "dev-user-advanced".to_string();
    progress.total_fl_score = 5200;
    progress.session_count = 8;

    progress.completed_missions.push(CompletedMission {
        mission: MissionId::Konnektivitetsvakten,
        score_awarded: 1100,
        best_outcome: "Krisen avvärjd".to_string(),
        completed_at: "2024-01-02T10:00:00Z".to_string(),
    });

    for synergy in SynergyId::ALL {
        progress.unlock_synergy(synergy);
    }
    for status in progress.compass.values_mut() {
        *status = CompassNodeStatus::Mastered;
    }

    progress
}
