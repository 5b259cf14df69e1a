mod action;
mod config;
mod format;
mod frame;
mod launcher;
mod menus;
mod param;
mod popup;
mod quantize;
mod stepper;
mod widgets;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use action::ActionPlugin;
use config::ConfigPlugin;
use launcher::LauncherPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Launchpad".into(),
                resolution: (1280, 720).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins((ConfigPlugin, ActionPlugin, LauncherPlugin))
        .add_systems(Startup, spawn_camera)
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
