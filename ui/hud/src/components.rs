use bevy::prelude::*;

#[derive(Component)]
pub struct DashboardRoot;

#[derive(Component)]
pub struct FlScoreText;

#[derive(Component)]
pub struct MissionProgressText;

#[derive(Component)]
pub struct NextObjectiveText;
