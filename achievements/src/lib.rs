//! Achievement unlock evaluation.
//!
//! All predicates are pure functions over a `PlayerProgress` snapshot
//! and (for mission-scoped conditions) the finishing `GameResult`. The
//! evaluator never mutates progress; the mission pipeline appends the
//! id and the reward exactly once per successful evaluation.

pub mod display;
mod evaluator;


pub use evaluator::{
    achievement_score, achievements_to_check, check_achievement, condition_met,
};

use {
    achievement_assets::AchievementCatalog,
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    states::GameState,
};

pub struct AchievementsPlugin;

impl Plugin for AchievementsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<AchievementCatalog>::new(&["catalog.ron"]))
            .init_resource::<AchievementBook>()
            .add_systems(OnEnter(GameState::Running), hydrate_book);
    }
}

/// The loaded achievement table, copied once out of the asset store and
/// treated as read-only content for the rest of the session.
#[derive(Resource, Debug, Default)]
pub struct AchievementBook {
    pub catalog: AchievementCatalog,
}

fn hydrate_book(
    mut book: ResMut<AchievementBook>,
    catalogs: Res<Assets<AchievementCatalog>>,
) {
    match catalogs.iter().next() {
        Some((_, catalog)) => {
            info!(count = catalog.achievements.len(), "achievement catalog hydrated");
            book.catalog = catalog.clone();
        }
        None => warn!("no achievement catalog loaded"),
    }
}
