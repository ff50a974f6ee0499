//! Shared presentational primitives: buttons, cards, icons and text.
//!
//! Every visual variant is a closed enum mapped to concrete styling in
//! one place, so adding a variant without styling it is a compile
//! error rather than a silently unstyled widget.

use bevy::prelude::*;

/// Palette and metrics shared by all widgets.
pub mod theme {
    use bevy::prelude::*;

    pub const BACKGROUND: Color = Color::srgb_u8(28, 35, 51);
    pub const SURFACE: Color = Color::srgb_u8(38, 47, 66);
    pub const PRIMARY: Color = Color::srgb_u8(19, 91, 236);
    pub const DANGER: Color = Color::srgb_u8(220, 53, 69);
    pub const TEXT: Color = Color::WHITE;
    pub const TEXT_MUTED: Color = Color::srgb_u8(156, 163, 175);
    pub const GOLD: Color = Color::srgb_u8(255, 193, 7);
    pub const HAIRLINE: Color = Color::srgba(1.0, 1.0, 1.0, 0.05);

    pub const RADIUS: f32 = 12.0;
    pub const PADDING: f32 = 16.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
    Ghost,
}

struct ButtonStyle {
    background: Color,
    border: Color,
    text: Color,
}

impl ButtonVariant {
    fn style(self) -> ButtonStyle {
        match self {
            ButtonVariant::Primary => ButtonStyle {
                background: theme::PRIMARY,
                border: theme::PRIMARY,
                text: theme::TEXT,
            },
            ButtonVariant::Secondary => ButtonStyle {
                background: theme::SURFACE,
                border: theme::HAIRLINE,
                text: theme::TEXT,
            },
            ButtonVariant::Danger => ButtonStyle {
                background: theme::DANGER,
                border: theme::DANGER,
                text: theme::TEXT,
            },
            ButtonVariant::Ghost => ButtonStyle {
                background: Color::NONE,
                border: theme::HAIRLINE,
                text: theme::TEXT_MUTED,
            },
        }
    }
}

/// Spawns a button with a marker component for its click observer.
pub fn spawn_button<M: Component>(
    parent: &mut ChildSpawnerCommands,
    text: &str,
    variant: ButtonVariant,
    marker: M,
) {
    let style = variant.style();
    parent
        .spawn((
            Button,
            Node {
                height: Val::Px(44.0),
                padding: UiRect::horizontal(Val::Px(theme::PADDING)),
                border: UiRect::all(Val::Px(1.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border_radius: BorderRadius::all(Val::Px(theme::RADIUS)),
                ..default()
            },
            BackgroundColor(style.background),
            BorderColor::all(style.border),
            marker,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(style.text),
            ));
        });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    Default,
    Elevated,
    Outlined,
}

impl CardVariant {
    fn background(self) -> Color {
        match self {
            CardVariant::Default => theme::BACKGROUND,
            CardVariant::Elevated => theme::SURFACE,
            CardVariant::Outlined => Color::NONE,
        }
    }

    fn border(self) -> Color {
        match self {
            CardVariant::Default | CardVariant::Elevated => theme::HAIRLINE,
            CardVariant::Outlined => theme::TEXT_MUTED,
        }
    }
}

/// Spawns a card container and hands the body to `children`.
pub fn spawn_card(
    parent: &mut ChildSpawnerCommands,
    variant: CardVariant,
    children: impl FnOnce(&mut ChildSpawnerCommands),
) {
    parent
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(theme::PADDING)),
                border: UiRect::all(Val::Px(1.0)),
                border_radius: BorderRadius::all(Val::Px(theme::RADIUS)),
                ..default()
            },
            BackgroundColor(variant.background()),
            BorderColor::all(variant.border()),
        ))
        .with_children(children);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    Small,
    Medium,
    Large,
}

impl IconSize {
    fn font_size(self) -> f32 {
        match self {
            IconSize::Small => 16.0,
            IconSize::Medium => 24.0,
            IconSize::Large => 40.0,
        }
    }
}

/// Glyph for a content-defined icon name. Unknown names render as a
/// neutral marker instead of failing.
pub fn icon_glyph(name: &str) -> &'static str {
    match name {
        "flag" => "\u{2691}",
        "star" => "\u{2605}",
        "shield" => "\u{26E8}",
        "heart" | "favorite" => "\u{2665}",
        "person" => "\u{263A}",
        "trophy" => "\u{1F3C6}",
        "lock" => "\u{1F512}",
        "map" => "\u{1F5FA}",
        "school" => "\u{1F393}",
        "network" | "hub" => "\u{2B21}",
        "lightbulb" => "\u{1F4A1}",
        "crown" => "\u{265B}",
        _ => "\u{25C6}",
    }
}

pub fn spawn_icon(
    parent: &mut ChildSpawnerCommands,
    name: &str,
    size: IconSize,
    color: Color,
) {
    parent.spawn((
        Text::new(icon_glyph(name)),
        TextFont {
            font_size: size.font_size(),
            ..default()
        },
        TextColor(color),
    ));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypographyVariant {
    Heading,
    Subheading,
    Body,
    Caption,
    Score,
}

struct TextStyle {
    font_size: f32,
    color: Color,
}

impl TypographyVariant {
    fn style(self) -> TextStyle {
        match self {
            TypographyVariant::Heading => TextStyle {
                font_size: 28.0,
                color: theme::TEXT,
            },
            TypographyVariant::Subheading => TextStyle {
                font_size: 20.0,
                color: theme::TEXT,
            },
            TypographyVariant::Body => TextStyle {
                font_size: 14.0,
                color: theme::TEXT,
            },
            TypographyVariant::Caption => TextStyle {
                font_size: 12.0,
                color: theme::TEXT_MUTED,
            },
            TypographyVariant::Score => TextStyle {
                font_size: 24.0,
                color: theme::GOLD,
            },
        }
    }
}

pub fn spawn_text<M: Bundle>(
    parent: &mut ChildSpawnerCommands,
    text: &str,
    variant: TypographyVariant,
    marker: M,
) {
    let style = variant.style();
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: style.font_size,
            ..default()
        },
        TextColor(style.color),
        marker,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_variants_style_distinctly() {
        let backgrounds: Vec<Color> = [
            ButtonVariant::Primary,
            ButtonVariant::Secondary,
            ButtonVariant::Danger,
            ButtonVariant::Ghost,
        ]
        .into_iter()
        .map(|v| v.style().background)
        .collect();
        for (i, a) in backgrounds.iter().enumerate() {
            for b in &backgrounds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_icon_names_fall_back() {
        assert_eq!(icon_glyph("no_such_icon"), "\u{25C6}");
        assert_ne!(icon_glyph("star"), icon_glyph("no_such_icon"));
    }

    #[test]
    fn typography_scales_down_from_heading() {
        assert!(
            TypographyVariant::Heading.style().font_size
                > TypographyVariant::Subheading.style().font_size
        );
        assert!(
            TypographyVariant::Body.style().font_size
                > TypographyVariant::Caption.style().font_size
        );
    }
}
