use {
    bevy::{log::LogPlugin, prelude::*},
    core::CorePlugin,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(LogPlugin {
                filter: "error,game_assets=info,\
                    missions=debug,\
                    achievements=debug,\
                    dialogue=debug,\
                    audio=info,\
                    localization=info,\
                    save_load=trace"
                    .into(),
                level: bevy::log::Level::TRACE,
                ..Default::default()
            }),
        )
        .add_plugins(CorePlugin)
        .run();
}
