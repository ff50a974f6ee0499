use {
    bevy::prelude::*,
    serde::Deserialize,
    std::collections::HashMap,
};

/// One language's UI strings as a flat dotted-key table. Templates use
/// `{name}` placeholders, substituted at lookup time.
#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct LocaleTable {
    /// BCP 47-ish code, e.g. "sv".
    pub language: String,
    /// Display name in the language itself.
    pub native_name: String,
    pub strings: HashMap<String, String>,
}

impl LocaleTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
}
