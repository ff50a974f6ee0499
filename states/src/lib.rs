use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Content assets are still streaming in.
    #[default]
    Loading,
    /// Dashboard and missions are playable.
    Running,
}
