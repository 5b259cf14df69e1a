use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use leafwing_input_manager::prelude::*;

use crate::action::LauncherAction;
use crate::config::LauncherConfig;
use crate::frame::{FrameContext, FrameInput};
use crate::menus::{self, Builder, DEFAULT_MAP_LENGTH_SECS, LaunchMode, RecordMode};
use crate::popup::{Popup, PopupSize};

pub struct LauncherPlugin;

impl Plugin for LauncherPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PopupClosed>()
            .init_resource::<FrameContext>()
            .add_systems(Startup, setup_launcher)
            .add_systems(
                Update,
                (begin_frame, launcher_ui_system, handle_popup_closed).chain(),
            );
    }
}

// ─── Palette ────────────────────────────────────────────────────────
const NEON_PURPLE: egui::Color32 = egui::Color32::from_rgb(153, 51, 255);
const ELECTRIC_CYAN: egui::Color32 = egui::Color32::from_rgb(0, 230, 255);
const DIM_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 90, 130);
const PANEL_BG: egui::Color32 = egui::Color32::from_rgba_premultiplied(15, 8, 30, 240);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupKind {
    Difficulty,
    Speed,
    CursorDance,
    Record,
    Preferences,
}

/// Queued once each time a launcher popup closes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupClosed(pub PopupKind);

/// The launcher's popups. The speed popup is nested inside the difficulty one.
struct Popups {
    difficulty: Popup<PopupClosed>,
    speed: Popup<PopupClosed>,
    cursor_dance: Popup<PopupClosed>,
    record: Popup<PopupClosed>,
    preferences: Popup<PopupClosed>,
}

impl Popups {
    fn new() -> Self {
        let popup = |kind: PopupKind, name: &str, size: PopupSize| {
            let mut popup = Popup::new(name, size);
            popup.set_close_listener(PopupClosed(kind));
            popup
        };
        Self {
            difficulty: popup(PopupKind::Difficulty, "difficulty", PopupSize::Medium),
            speed: popup(PopupKind::Speed, "speed", PopupSize::Dynamic),
            cursor_dance: popup(PopupKind::CursorDance, "cursor_dance", PopupSize::Dynamic),
            record: popup(PopupKind::Record, "record", PopupSize::Medium),
            preferences: popup(PopupKind::Preferences, "preferences", PopupSize::Dynamic),
        }
    }

    fn collect_closed(&mut self, closed: &mut Vec<PopupClosed>) {
        for popup in [
            &mut self.speed,
            &mut self.difficulty,
            &mut self.cursor_dance,
            &mut self.record,
            &mut self.preferences,
        ] {
            popup.should_close(closed);
        }
    }
}

#[derive(Resource)]
pub struct LauncherState {
    builder: Builder,
    popups: Popups,
}

fn setup_launcher(mut commands: Commands, config: Res<LauncherConfig>) {
    commands.insert_resource(LauncherState {
        builder: Builder::from_config(&config, DEFAULT_MAP_LENGTH_SECS),
        popups: Popups::new(),
    });
}

/// Opens a new frame for every control and popup drawn after it.
fn begin_frame(action: Res<ActionState<LauncherAction>>, mut frame: ResMut<FrameContext>) {
    frame.begin(FrameInput {
        step_down: action.just_pressed(&LauncherAction::StepDown),
        step_up: action.just_pressed(&LauncherAction::StepUp),
        dismiss: action.just_pressed(&LauncherAction::Dismiss),
    });
}

fn launcher_ui_system(
    mut contexts: EguiContexts,
    state: Option<ResMut<LauncherState>>,
    mut frame: ResMut<FrameContext>,
    mut config: ResMut<LauncherConfig>,
    mut closed_writer: MessageWriter<PopupClosed>,
) {
    let Some(mut state) = state else { return };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    apply_theme(ctx);

    let LauncherState { builder, popups } = &mut *state;
    let frame = &mut *frame;

    main_panel(ctx, builder, popups);

    let Popups {
        difficulty,
        speed,
        cursor_dance,
        record,
        preferences,
    } = &mut *popups;
    difficulty.draw(ctx, frame, |ui, frame| {
        section_heading(ui, "MAP OPTIONS");
        menus::difficulty_menu(ui, frame, builder, speed);
    });
    cursor_dance.draw(ctx, frame, |ui, _| {
        section_heading(ui, "CURSOR DANCE");
        menus::cursor_dance_menu(ui, builder);
    });
    record.draw(ctx, frame, |ui, _| {
        section_heading(ui, "RECORD");
        menus::record_menu(ui, builder);
    });
    preferences.draw(ctx, frame, |ui, frame| {
        section_heading(ui, "LAUNCHER");
        menus::preferences_menu(ui, frame, &mut config);
    });

    let mut closed = Vec::new();
    popups.collect_closed(&mut closed);
    for event in closed {
        closed_writer.write(event);
    }
}

fn handle_popup_closed(mut closed: MessageReader<PopupClosed>, config: Res<LauncherConfig>) {
    for PopupClosed(kind) in closed.read() {
        info!("Popup {:?} closed", kind);
        if *kind == PopupKind::Preferences {
            config.save();
        }
    }
}

// ─── Main panel ─────────────────────────────────────────────────────

fn main_panel(ctx: &egui::Context, builder: &mut Builder, popups: &mut Popups) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading(egui::RichText::new("LAUNCHPAD").color(NEON_PURPLE).size(28.0));
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                for &mode in LaunchMode::ALL {
                    let text = if builder.mode == mode {
                        egui::RichText::new(mode.label()).color(ELECTRIC_CYAN).strong()
                    } else {
                        egui::RichText::new(mode.label()).color(DIM_TEXT)
                    };
                    if ui.selectable_label(builder.mode == mode, text).clicked() {
                        builder.mode = mode;
                    }
                }
                ui.separator();
                ui.selectable_value(&mut builder.record_mode, RecordMode::Video, "VIDEO");
                ui.selectable_value(&mut builder.record_mode, RecordMode::Screenshot, "SCREENSHOT");
            });
            ui.add_space(12.0);

            if ui.button("Map options").clicked() {
                popups.difficulty.open();
            }
            if ui.button("Cursor dance").clicked() {
                popups.cursor_dance.open();
            }
            if ui.button("Record").clicked() {
                popups.record.open();
            }
            if ui.button("Launcher settings").clicked() {
                popups.preferences.open();
            }

            ui.add_space(16.0);
            if ui.button(egui::RichText::new("LAUNCH").color(ELECTRIC_CYAN).strong()).clicked() {
                info!("Launching: {}", builder.summary());
            }
        });
    });
}

// ─── Theme ──────────────────────────────────────────────────────────

fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    let v = &mut style.visuals;
    v.dark_mode = true;
    v.panel_fill = PANEL_BG;
    v.window_fill = PANEL_BG;
    v.extreme_bg_color = egui::Color32::from_rgb(5, 3, 15);
    v.selection.bg_fill = egui::Color32::from_rgba_premultiplied(0, 230, 255, 80);
    v.selection.stroke = egui::Stroke::new(1.0, ELECTRIC_CYAN);
    v.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, NEON_PURPLE);
    v.widgets.active.fg_stroke = egui::Stroke::new(1.0, ELECTRIC_CYAN);
    ctx.set_style(style);
}

fn section_heading(ui: &mut egui::Ui, label: &str) {
    ui.heading(egui::RichText::new(label).color(NEON_PURPLE).size(14.0));
    ui.separator();
}
