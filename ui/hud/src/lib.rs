//! The main dashboard: FL score, mission progress and the next
//! achievement worth chasing. Redrawn whenever progress changes.

pub mod components;

use {
    achievements::AchievementBook,
    bevy::prelude::*,
    crate::components::{DashboardRoot, FlScoreText, MissionProgressText, NextObjectiveText},
    localization::I18n,
    progress_components::MISSION_COUNT,
    progress_resources::PlayerProgress,
    states::GameState,
    widgets::{CardVariant, IconSize, TypographyVariant, theme},
};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        // Spawns on the first Update of Running, so the hydrated locale
        // and catalog are already in place.
        app.add_systems(
            Update,
            (
                spawn_dashboard.run_if(run_once),
                refresh_dashboard.run_if(resource_changed::<PlayerProgress>),
            )
                .run_if(in_state(GameState::Running)),
        );
    }
}

fn spawn_dashboard(
    mut commands: Commands,
    i18n: Res<I18n>,
    progress: Res<PlayerProgress>,
    book: Res<AchievementBook>,
) {
    commands
        .spawn((
            DashboardRoot,
            Name::new("Dashboard"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                left: Val::Px(16.0),
                width: Val::Px(320.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|root| {
            widgets::spawn_card(root, CardVariant::Elevated, |card| {
                widgets::spawn_text(
                    card,
                    &i18n.t("dashboard.title", &[]),
                    TypographyVariant::Subheading,
                    (),
                );
                card.spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    widgets::spawn_icon(row, "star", IconSize::Medium, theme::GOLD);
                    widgets::spawn_text(
                        row,
                        &i18n.format_number(progress.total_fl_score),
                        TypographyVariant::Score,
                        FlScoreText,
                    );
                });
                widgets::spawn_text(
                    card,
                    &mission_progress_line(&progress, &i18n),
                    TypographyVariant::Body,
                    MissionProgressText,
                );
                widgets::spawn_text(
                    card,
                    &next_objective_line(&book, &progress, &i18n),
                    TypographyVariant::Caption,
                    NextObjectiveText,
                );
            });
        });
}

fn refresh_dashboard(
    progress: Res<PlayerProgress>,
    book: Res<AchievementBook>,
    i18n: Res<I18n>,
    mut score_text: Query<
        &mut Text,
        (With<FlScoreText>, Without<MissionProgressText>, Without<NextObjectiveText>),
    >,
    mut progress_text: Query<
        &mut Text,
        (With<MissionProgressText>, Without<FlScoreText>, Without<NextObjectiveText>),
    >,
    mut objective_text: Query<
        &mut Text,
        (With<NextObjectiveText>, Without<FlScoreText>, Without<MissionProgressText>),
    >,
) {
    for mut text in &mut score_text {
        text.0 = i18n.format_number(progress.total_fl_score);
    }
    for mut text in &mut progress_text {
        text.0 = mission_progress_line(&progress, &i18n);
    }
    for mut text in &mut objective_text {
        text.0 = next_objective_line(&book, &progress, &i18n);
    }
}

fn mission_progress_line(progress: &PlayerProgress, i18n: &I18n) -> String {
    i18n.t(
        "dashboard.mission_progress",
        &[
            ("completed", progress.completed_count().to_string()),
            ("total", MISSION_COUNT.to_string()),
        ],
    )
}

/// The first locked, visible achievement with its progress string, or a
/// completion line once everything is unlocked.
fn next_objective_line(
    book: &AchievementBook,
    progress: &PlayerProgress,
    i18n: &I18n,
) -> String {
    book.catalog
        .achievements
        .iter()
        .find(|a| !a.hidden && !progress.is_achievement_unlocked(&a.id))
        .map(|achievement| {
            i18n.t(
                "dashboard.next_objective",
                &[
                    ("name", achievement.name.clone()),
                    (
                        "progress",
                        achievements::display::progress_text(achievement, progress),
                    ),
                ],
            )
        })
        .unwrap_or_else(|| i18n.t("dashboard.all_achievements_done", &[]))
}

#[cfg(test)]
mod tests {
    use {super::*, bevy::ecs::system::RunSystemOnce, locale_assets::LocaleTable};

    fn hydrated_i18n() -> I18n {
        let table: LocaleTable = ron::from_str(
            r#"(
            language: "sv",
            native_name: "Svenska",
            strings: {
                "dashboard.title": "Framtidsbygget",
                "dashboard.mission_progress": "{completed} av {total} uppdrag slutförda",
                "dashboard.all_achievements_done": "Alla utmärkelser upplåsta!",
            },
        )"#,
        )
        .expect("table should parse");
        I18n::from_table(&table)
    }

    #[test]
    fn dashboard_spawns_with_localized_strings() {
        let mut world = World::new();
        world.insert_resource(hydrated_i18n());
        world.init_resource::<PlayerProgress>();
        world.init_resource::<AchievementBook>();

        world
            .run_system_once(spawn_dashboard)
            .expect("spawn should run");

        let mut query = world.query::<&Text>();
        let texts: Vec<String> = query.iter(&world).map(|t| t.0.clone()).collect();
        assert!(texts.iter().any(|t| t == "Framtidsbygget"));
        assert!(texts.iter().any(|t| t == "0 av 5 uppdrag slutförda"));
        // Raw keys must never reach the screen.
        assert!(texts.iter().all(|t| !t.starts_with("dashboard.")));
    }
}
