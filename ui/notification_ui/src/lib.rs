//! Toast notifications for unlocks.
//!
//! Achievement and synergy unlocks queue a toast at the top of the
//! screen; a handful can stack, the rest wait their turn. Each toast
//! despawns after a fixed display time.

use {
    achievements::AchievementBook,
    audio::PlaySequence,
    bevy::prelude::*,
    localization::I18n,
    progress_events::{AchievementUnlocked, SynergyUnlocked},
    states::GameState,
    widgets::theme,
};

const TOAST_DURATION: f32 = 5.0;
const TOAST_HEIGHT: f32 = 56.0;
const TOAST_GAP: f32 = 8.0;
const TOAST_TOP_OFFSET: f32 = 10.0;
const MAX_TOASTS: usize = 5;

pub struct NotificationUiPlugin;

impl Plugin for NotificationUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ToastQueue>()
            .add_observer(on_achievement_unlocked)
            .add_observer(on_synergy_unlocked)
            .add_systems(OnExit(GameState::Running), cleanup_toasts)
            .add_systems(
                Update,
                (spawn_pending_toasts, update_toast_positions, despawn_expired_toasts)
                    .chain()
                    .run_if(in_state(GameState::Running)),
            );
    }
}

#[derive(Clone)]
pub struct ToastData {
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
}

/// Styling per unlock type. Achievement toasts carry the rarity color
/// on their border.
#[derive(Clone, Copy, Debug)]
pub enum ToastKind {
    Achievement { rarity_color: Color },
    Synergy,
}

impl ToastKind {
    fn background_color(&self) -> Color {
        match self {
            ToastKind::Achievement { .. } => Color::srgba(0.12, 0.1, 0.02, 0.92),
            ToastKind::Synergy => Color::srgba(0.04, 0.1, 0.16, 0.92),
        }
    }

    fn border_color(&self) -> Color {
        match self {
            ToastKind::Achievement { rarity_color } => *rarity_color,
            ToastKind::Synergy => theme::PRIMARY,
        }
    }
}

#[derive(Resource, Default)]
pub struct ToastQueue {
    /// Displayed toasts, oldest first.
    active: Vec<Entity>,
    pending: Vec<ToastData>,
}

impl ToastQueue {
    pub fn push(&mut self, data: ToastData) {
        self.pending.push(data);
    }
}

#[derive(Component)]
struct Toast {
    timer: Timer,
}

fn on_achievement_unlocked(
    trigger: On<AchievementUnlocked>,
    book: Res<AchievementBook>,
    i18n: Res<I18n>,
    mut queue: ResMut<ToastQueue>,
    mut commands: Commands,
) {
    let event = trigger.event();
    let rarity_color = book
        .catalog
        .get(&event.achievement_id)
        .map(|a| a.rarity.color())
        .unwrap_or(theme::GOLD);

    queue.push(ToastData {
        title: i18n.t("toast.achievement_unlocked", &[]),
        message: i18n.t(
            "toast.achievement_body",
            &[
                ("name", event.name.clone()),
                ("reward", event.fl_score_reward.to_string()),
            ],
        ),
        kind: ToastKind::Achievement { rarity_color },
    });
    commands.trigger(PlaySequence {
        name: "achievement_unlock".to_string(),
    });
}

fn on_synergy_unlocked(
    trigger: On<SynergyUnlocked>,
    i18n: Res<I18n>,
    mut queue: ResMut<ToastQueue>,
    mut commands: Commands,
) {
    let synergy = trigger.event().synergy;
    queue.push(ToastData {
        title: i18n.t("toast.synergy_unlocked", &[]),
        message: i18n.t(&format!("synergy.{}", synergy.slug()), &[]),
        kind: ToastKind::Synergy,
    });
    commands.trigger(PlaySequence {
        name: "synergy_unlock".to_string(),
    });
}

fn cleanup_toasts(
    mut commands: Commands,
    toasts: Query<Entity, With<Toast>>,
    mut queue: ResMut<ToastQueue>,
) {
    for entity in &toasts {
        commands.entity(entity).despawn();
    }
    queue.active.clear();
    queue.pending.clear();
}

fn spawn_pending_toasts(mut commands: Commands, mut queue: ResMut<ToastQueue>) {
    while !queue.pending.is_empty() && queue.active.len() < MAX_TOASTS {
        let toast = queue.pending.remove(0);
        let entity = spawn_toast(&mut commands, &toast, queue.active.len());
        queue.active.push(entity);
    }
}

fn update_toast_positions(
    queue: Res<ToastQueue>,
    mut toasts: Query<&mut Node, With<Toast>>,
) {
    for (index, &entity) in queue.active.iter().enumerate() {
        if let Ok(mut node) = toasts.get_mut(entity) {
            node.top = Val::Px(top_position(index));
        }
    }
}

fn despawn_expired_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toasts: Query<(Entity, &mut Toast)>,
    mut queue: ResMut<ToastQueue>,
) {
    let mut expired = Vec::new();
    for (entity, mut toast) in &mut toasts {
        toast.timer.tick(time.delta());
        if toast.timer.is_finished() {
            expired.push(entity);
        }
    }
    for entity in expired {
        queue.active.retain(|&e| e != entity);
        commands.entity(entity).despawn();
    }
}

fn top_position(index: usize) -> f32 {
    TOAST_TOP_OFFSET + (index as f32) * (TOAST_HEIGHT + TOAST_GAP)
}

fn spawn_toast(commands: &mut Commands, toast: &ToastData, index: usize) -> Entity {
    commands
        .spawn((
            Text::new(format!("{}: {}", toast.title, toast.message)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(top_position(index)),
                left: Val::Percent(20.0),
                right: Val::Percent(20.0),
                height: Val::Px(TOAST_HEIGHT),
                padding: UiRect::all(Val::Px(12.0)),
                border: UiRect::all(Val::Px(2.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border_radius: BorderRadius::all(Val::Px(8.0)),
                ..default()
            },
            TextColor(theme::TEXT),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            BackgroundColor(toast.kind.background_color()),
            BorderColor::all(toast.kind.border_color()),
            Toast {
                timer: Timer::from_seconds(TOAST_DURATION, TimerMode::Once),
            },
        ))
        .id()
}
