use bevy::prelude::*;
use bevy_egui::egui;

use crate::config::LauncherConfig;
use crate::frame::FrameContext;
use crate::param::Param;
use crate::popup::Popup;
use crate::quantize::QuantizedRange;
use crate::widgets::{
    count_field, numeric_text_field, path_char_filter, slider_float_reset, slider_float_reset_step,
    slider_int,
};

const SPEED_MIN: f32 = 0.1;
const SPEED_MAX: f32 = 3.0;
const SPEED_STEP: f32 = 0.05;
const SPEED_RANGE: QuantizedRange = QuantizedRange {
    min: SPEED_MIN,
    max: SPEED_MAX,
    step: SPEED_STEP,
};

/// Length assumed for the selected map until the host reports the real one.
pub const DEFAULT_MAP_LENGTH_SECS: f32 = 180.0;

const HINT_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 90, 130);
const HEADER_COLOR: egui::Color32 = egui::Color32::from_rgb(153, 51, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchMode {
    #[default]
    Watch,
    Play,
    Replay,
}

impl LaunchMode {
    pub const ALL: &[LaunchMode] = &[LaunchMode::Watch, LaunchMode::Play, LaunchMode::Replay];

    pub fn label(self) -> &'static str {
        match self {
            LaunchMode::Watch => "WATCH",
            LaunchMode::Play => "PLAY",
            LaunchMode::Replay => "REPLAY",
        }
    }

    /// OD and HP only matter when someone is actually being judged.
    pub fn judges_input(self) -> bool {
        matches!(self, LaunchMode::Play | LaunchMode::Replay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordMode {
    #[default]
    Video,
    Screenshot,
}

/// Lower bound for AR/CS and upper bound for all four difficulty values.
pub fn difficulty_bounds(extended: bool) -> (f32, f32) {
    if extended { (-10.0, 12.0) } else { (0.0, 10.0) }
}

/// Everything the menus edit for one launch.
#[derive(Debug, Clone)]
pub struct Builder {
    pub mode: LaunchMode,
    pub record_mode: RecordMode,
    pub speed: Param<f32>,
    pub pitch: Param<f32>,
    pub approach_rate: Param<f32>,
    pub overall_difficulty: Param<f32>,
    pub circle_size: Param<f32>,
    pub hp_drain: Param<f32>,
    pub extended_values: bool,
    pub mirrors: i32,
    pub tags: i32,
    pub output_name: String,
    pub screenshot_time: f32,
    pub map_end: Param<f32>,
}

impl Builder {
    pub fn from_config(config: &LauncherConfig, map_length: f32) -> Self {
        let (_, max) = difficulty_bounds(false);
        Self {
            mode: LaunchMode::default(),
            record_mode: RecordMode::default(),
            speed: Param::new(SPEED_RANGE.snap(config.speed)).with_range(SPEED_MIN, SPEED_MAX),
            pitch: Param::new(SPEED_RANGE.snap(config.pitch)).with_range(SPEED_MIN, SPEED_MAX),
            approach_rate: Param::new(config.approach_rate).with_range(0.0, max),
            overall_difficulty: Param::new(config.overall_difficulty).with_range(0.0, max),
            circle_size: Param::new(config.circle_size).with_range(0.0, max),
            hp_drain: Param::new(config.hp_drain).with_range(0.0, max),
            extended_values: false,
            mirrors: config.mirrors.max(1),
            tags: config.tags.max(1),
            output_name: String::new(),
            screenshot_time: 0.0,
            map_end: Param::new(map_length.max(0.0)),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} speed={:.2} pitch={:.2} AR={:.1} OD={:.1} CS={:.1} HP={:.1} mirrors={} tags={}",
            self.mode.label(),
            self.speed.value(),
            self.pitch.value(),
            self.approach_rate.value(),
            self.overall_difficulty.value(),
            self.circle_size.value(),
            self.hp_drain.value(),
            self.mirrors,
            self.tags,
        )
    }
}

// ─── Menus ──────────────────────────────────────────────────────────

pub fn speed_menu(ui: &mut egui::Ui, frame: &mut FrameContext, builder: &mut Builder) {
    slider_float_reset_step(
        ui, frame, "Speed", &mut builder.speed, SPEED_MIN, SPEED_MAX, SPEED_STEP, "%.2f",
    );
    ui.add_space(4.0);

    slider_float_reset_step(
        ui, frame, "Pitch", &mut builder.pitch, SPEED_MIN, SPEED_MAX, SPEED_STEP, "%.2f",
    );
    ui.add_space(4.0);
}

/// Difficulty sliders, with the speed menu as a nested popup.
pub fn difficulty_menu<E: Clone>(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    builder: &mut Builder,
    speed_popup: &mut Popup<E>,
) {
    let (ar_cs_min, max) = difficulty_bounds(builder.extended_values);

    slider_float_reset(ui, frame, "Approach Rate (AR)", &mut builder.approach_rate, ar_cs_min, max, "%.1f");
    ui.add_space(4.0);

    if builder.mode.judges_input() {
        slider_float_reset(ui, frame, "Overall Difficulty (OD)", &mut builder.overall_difficulty, 0.0, max, "%.1f");
        ui.add_space(4.0);
    }

    slider_float_reset(ui, frame, "Circle Size (CS)", &mut builder.circle_size, ar_cs_min, max, "%.1f");
    ui.add_space(4.0);

    if builder.mode.judges_input() {
        slider_float_reset(ui, frame, "Health Drain (HP)", &mut builder.hp_drain, 0.0, max, "%.1f");
        ui.add_space(4.0);
    }

    ui.checkbox(&mut builder.extended_values, "Allow extended values");
    ui.add_space(4.0);

    ui.separator();
    if ui.button("Speed / pitch...").clicked() {
        speed_popup.open();
    }

    let ctx = ui.ctx().clone();
    speed_popup.draw(&ctx, frame, |ui, frame| speed_menu(ui, frame, builder));
}

pub fn cursor_dance_menu(ui: &mut egui::Ui, builder: &mut Builder) {
    egui::Grid::new("cursor_dance_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Mirrored cursors:");
            count_field(ui, "mirrors", &mut builder.mirrors);
            ui.end_row();

            ui.label("Tag cursors:");
            count_field(ui, "tags", &mut builder.tags);
            ui.end_row();
        });
}

pub fn record_menu(ui: &mut egui::Ui, builder: &mut Builder) {
    egui::Grid::new("record_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("Output name:");
            let edited = ui
                .add(egui::TextEdit::singleline(&mut builder.output_name).hint_text("auto"))
                .changed();
            if edited && path_char_filter(&mut builder.output_name) {
                debug!("Stripped forbidden characters from output name");
            }
            ui.end_row();

            if builder.record_mode == RecordMode::Screenshot {
                ui.label("Screenshot at:");
                ui.horizontal(|ui| {
                    let end = builder.map_end.original();
                    numeric_text_field(ui, "sstime", &mut builder.screenshot_time, 0.0, end);
                    ui.label("s");
                });
                ui.end_row();
            }
        });
}

pub fn preferences_menu(ui: &mut egui::Ui, frame: &mut FrameContext, config: &mut LauncherConfig) {
    egui::Grid::new("preferences_grid")
        .num_columns(2)
        .spacing([12.0, 10.0])
        .show(ui, |ui| {
            checkbox_option(ui, "Check for updates on startup", &mut config.check_for_updates);
            checkbox_option(ui, "Load latest replay on startup", &mut config.load_latest_replay);
            checkbox_option(
                ui,
                "Speed up startup on slow HDDs.\nWon't detect deleted/updated\nmaps!",
                &mut config.skip_map_update,
            );
            checkbox_option(ui, "Show JSON paths in config editor", &mut config.show_json_paths);
            checkbox_option(ui, "Show exported videos/images\nin explorer", &mut config.show_file_after);
            checkbox_option(ui, "Preview selected maps", &mut config.preview_selected);
        });

    ui.label(egui::RichText::new("Preview volume").color(HEADER_COLOR));
    let mut volume = config.preview_percent();
    if slider_int(ui, frame, "preview_volume", &mut volume, 0, 100, "%d%%") {
        config.set_preview_percent(volume);
    }
    ui.label(
        egui::RichText::new("Saved when this window closes")
            .color(HINT_COLOR)
            .size(11.0),
    );
}

fn checkbox_option(ui: &mut egui::Ui, text: &str, value: &mut bool) {
    ui.label(text);
    ui.checkbox(value, "");
    ui.end_row();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extended_values_widen_difficulty() {
        assert_eq!(difficulty_bounds(false), (0.0, 10.0));
        assert_eq!(difficulty_bounds(true), (-10.0, 12.0));
    }

    #[test]
    fn od_and_hp_only_when_judged() {
        assert!(!LaunchMode::Watch.judges_input());
        assert!(LaunchMode::Play.judges_input());
        assert!(LaunchMode::Replay.judges_input());
    }

    #[test]
    fn builder_seeds_params_from_config() {
        let config = LauncherConfig {
            speed: 1.5,
            approach_rate: 9.5,
            mirrors: 0,
            ..Default::default()
        };
        let builder = Builder::from_config(&config, 95.0);
        assert_eq!(builder.speed.value(), 1.5);
        assert_eq!(builder.speed.original(), 1.5);
        assert!(!builder.speed.changed());
        assert_eq!(builder.approach_rate.value(), 9.5);
        assert_eq!(builder.mirrors, 1);
        assert_eq!(builder.map_end.original(), 95.0);
    }

    #[test]
    fn off_step_speed_is_snapped() {
        let config = LauncherConfig {
            speed: 1.12,
            pitch: 7.0,
            ..Default::default()
        };
        let builder = Builder::from_config(&config, DEFAULT_MAP_LENGTH_SECS);
        assert!((builder.speed.value() - 1.1).abs() < 1e-5);
        assert!((builder.pitch.value() - SPEED_MAX).abs() < 1e-5);
    }

    #[test]
    fn turning_off_extended_values_pulls_ar_back() {
        let config = LauncherConfig::default();
        let mut builder = Builder::from_config(&config, DEFAULT_MAP_LENGTH_SECS);

        let (min, max) = difficulty_bounds(true);
        builder.approach_rate.set_range(min, max);
        builder.approach_rate.set_value(11.5);
        assert!(builder.approach_rate.changed());

        let (min, max) = difficulty_bounds(false);
        builder.approach_rate.set_range(min, max);
        assert_eq!(builder.approach_rate.value(), 10.0);
        assert!(builder.approach_rate.changed());

        builder.approach_rate.reset();
        assert_eq!(builder.approach_rate.value(), config.approach_rate);
    }
}
