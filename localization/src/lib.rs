//! Localized UI string lookup with `{name}` placeholder interpolation.
//!
//! Missing keys are fail-soft: `t` returns the key itself so the UI
//! always renders something readable.

use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    locale_assets::LocaleTable,
    states::GameState,
    std::collections::HashMap,
};

pub struct LocalizationPlugin;

impl Plugin for LocalizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<LocaleTable>::new(&["locale.ron"]))
            .init_resource::<I18n>()
            .add_systems(OnEnter(GameState::Running), hydrate_locale);
    }
}

/// The active language table, copied once out of the loaded asset and
/// read-only afterwards.
#[derive(Resource, Debug, Default)]
pub struct I18n {
    pub language: String,
    strings: HashMap<String, String>,
}

impl I18n {
    pub fn from_table(table: &LocaleTable) -> Self {
        Self {
            language: table.language.clone(),
            strings: table.strings.clone(),
        }
    }

    /// Looks up `key` and substitutes `{name}` placeholders from
    /// `params`. Unknown keys return the key itself; placeholders
    /// without a matching parameter are left untouched.
    pub fn t(&self, key: &str, params: &[(&str, String)]) -> String {
        let Some(template) = self.strings.get(key) else {
            // Lookups run every frame from the UI; once is enough.
            warn_once!(%key, "missing localization key");
            return key.to_string();
        };
        interpolate(template, params)
    }

    /// Formats a number with Swedish thousands grouping ("12 500").
    pub fn format_number(&self, value: u32) -> String {
        let digits = value.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('\u{a0}');
            }
            grouped.push(ch);
        }
        grouped
    }

    /// Formats a duration in seconds as "h:mm:ss" or "m:ss".
    pub fn format_duration(&self, total_seconds: u32) -> String {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        if hours > 0 {
            format!("{hours}:{minutes:02}:{seconds:02}")
        } else {
            format!("{minutes}:{seconds:02}")
        }
    }
}

/// Substitutes `{name}` placeholders. Hand-rolled scan; templates are
/// short UI strings.
fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let name = &after_open[..close];
                match params.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => out.push_str(value),
                    // No parameter supplied: keep the placeholder text.
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}

fn hydrate_locale(
    mut i18n: ResMut<I18n>,
    tables: Res<Assets<LocaleTable>>,
) {
    // Exactly one table ships today (sv); a second language is a content
    // addition, not a code change.
    match tables.iter().next() {
        Some((_, table)) => {
            info!(language = %table.language, keys = table.strings.len(), "locale hydrated");
            *i18n = I18n::from_table(table);
        }
        None => warn!("no locale table loaded, keys will render raw"),
    }
}
