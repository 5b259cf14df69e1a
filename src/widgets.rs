use std::ops::{Add, Sub};

use bevy::prelude::*;
use bevy_egui::egui;

use crate::format::ValueFormat;
use crate::frame::FrameContext;
use crate::param::{Param, ParamValue};
use crate::quantize::QuantizedRange;
use crate::stepper::step_value;

const RESET_BUTTON_WIDTH: f32 = 56.0;
const VALUE_LABEL_WIDTH: f32 = 52.0;
const MIN_SLIDER_WIDTH: f32 = 60.0;
const TEXT_FIELD_DECIMALS: usize = 3;
const TEXT_FIELD_WIDTH: f32 = 80.0;

const LABEL_COLOR: egui::Color32 = egui::Color32::from_rgb(235, 245, 255);
const VALUE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 100);

// ─── Resettable sliders ─────────────────────────────────────────────

/// Float slider with a reset button, stepping by the format's last decimal.
pub fn slider_float_reset(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    label: &str,
    param: &mut Param<f32>,
    min: f32,
    max: f32,
    fmt: &str,
) {
    let fmt = ValueFormat::parse(fmt);
    resettable(ui, label, param, min, max, |ui, value| {
        slider_float(ui, frame, value, min, max, &fmt)
    });
}

/// Float slider restricted to multiples of `step` above `min`.
#[allow(clippy::too_many_arguments)]
pub fn slider_float_reset_step(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    label: &str,
    param: &mut Param<f32>,
    min: f32,
    max: f32,
    step: f32,
    fmt: &str,
) {
    let fmt = ValueFormat::parse(fmt);
    let range = QuantizedRange::new(min, max, step);
    resettable(ui, label, param, min, max, |ui, value| {
        slider_float_step(ui, frame, value, range, &fmt)
    });
}

pub fn slider_int_reset(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    label: &str,
    param: &mut Param<i32>,
    min: i32,
    max: i32,
    fmt: &str,
) {
    let fmt = ValueFormat::parse(fmt);
    resettable(ui, label, param, min, max, |ui, value| {
        slider_int_inner(ui, frame, value, min, max, &fmt)
    });
}

/// Shared body of the resettable controls: legalise the value, draw the
/// slider, then a reset button that is only live while the value is edited.
fn resettable<T: ParamValue>(
    ui: &mut egui::Ui,
    label: &str,
    param: &mut Param<T>,
    min: T,
    max: T,
    slider: impl FnOnce(&mut egui::Ui, &mut T) -> bool,
) {
    let before = param.value();
    param.set_range(min, max);
    if param.value() != before {
        debug!("{label}: {before:?} clamped to {:?}", param.value());
    }

    ui.label(egui::RichText::new(format!("{label}:")).color(LABEL_COLOR));

    let reset_enabled = param.changed();
    let reset_clicked = ui
        .push_id(label, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().slider_width = (ui.available_width()
                    - RESET_BUTTON_WIDTH
                    - VALUE_LABEL_WIDTH)
                    .max(MIN_SLIDER_WIDTH);

                // Quantized sliders may move an off-step value without any input.
                let mut value = param.value();
                if slider(ui, &mut value) || value != param.value() {
                    param.set_value(value);
                }

                ui.add_enabled(reset_enabled, egui::Button::new("Reset"))
                    .clicked()
            })
            .inner
        })
        .inner;

    if reset_clicked {
        param.reset();
    }
}

// ─── Bare sliders ───────────────────────────────────────────────────

/// Integer slider with arrow-key stepping and a formatted value label.
pub fn slider_int(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    id_salt: &str,
    value: &mut i32,
    min: i32,
    max: i32,
    fmt: &str,
) -> bool {
    let fmt = ValueFormat::parse(fmt);
    ui.push_id(id_salt, |ui| {
        ui.horizontal(|ui| slider_int_inner(ui, frame, value, min, max, &fmt))
            .inner
    })
    .inner
}

fn slider_int_inner(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    value: &mut i32,
    min: i32,
    max: i32,
    fmt: &ValueFormat,
) -> bool {
    let changed = slider_index(ui, frame, value, min, max);
    value_label(ui, fmt.render_i32(*value));
    changed
}

fn slider_float(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    value: &mut f32,
    min: f32,
    max: f32,
    fmt: &ValueFormat,
) -> bool {
    let response = ui.add(egui::Slider::new(&mut *value, min..=max).show_value(false));
    let mut changed = response.changed();
    changed |= keyboard_step(&response, frame, value, min, max, fmt.step_unit());
    value_label(ui, fmt.render_f32(*value));
    changed
}

/// Drives an index slider over `[0, total_steps]` and re-derives the float
/// from the index every frame, so `value` only ever sits on a step. Arrow
/// keys move one step.
fn slider_float_step(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    value: &mut f32,
    range: QuantizedRange,
    fmt: &ValueFormat,
) -> bool {
    let mut index = range.index_of(*value).clamp(0, range.total_steps());
    let changed = slider_index(ui, frame, &mut index, 0, range.total_steps());
    *value = range.value_at(index);
    value_label(ui, fmt.render_f32(*value));
    changed
}

fn slider_index(
    ui: &mut egui::Ui,
    frame: &mut FrameContext,
    value: &mut i32,
    min: i32,
    max: i32,
) -> bool {
    let response = ui.add(egui::Slider::new(&mut *value, min..=max).show_value(false));
    let changed = response.changed();
    changed | keyboard_step(&response, frame, value, min, max, 1)
}

/// Arrow-key stepping for a control that is hovered or being dragged.
fn keyboard_step<T>(
    response: &egui::Response,
    frame: &mut FrameContext,
    value: &mut T,
    min: T,
    max: T,
    unit: T,
) -> bool
where
    T: ParamValue + Add<Output = T> + Sub<Output = T>,
{
    // egui sliders step themselves on arrow keys while focused; keep them
    // unfocused so a press is applied once, through the frame claim.
    if response.has_focus() {
        response.surrender_focus();
    }
    if !(response.hovered() || response.dragged()) {
        return false;
    }
    let Some(press) = frame.claim_arrows() else {
        return false;
    };
    step_value(value, min, max, unit, press)
}

fn value_label(ui: &mut egui::Ui, text: String) {
    ui.add_sized(
        [VALUE_LABEL_WIDTH, ui.spacing().interact_size.y],
        egui::Label::new(egui::RichText::new(text).color(VALUE_COLOR).monospace()),
    );
}

// ─── Fields ─────────────────────────────────────────────────────────

/// Smallest value a count field accepts.
pub const MIN_COUNT: i32 = 1;

pub fn floor_count(value: i32) -> i32 {
    value.max(MIN_COUNT)
}

/// Integer entry for counts such as mirrored cursors; anything below one is
/// corrected to one.
pub fn count_field(ui: &mut egui::Ui, id_salt: &str, value: &mut i32) -> bool {
    let changed = ui
        .push_id(id_salt, |ui| {
            ui.add(egui::DragValue::new(&mut *value).speed(0.1)).changed()
        })
        .inner;
    if changed {
        *value = floor_count(*value);
    }
    changed
}

/// Applies an edit of a free-text float field. A parseable entry is clamped
/// into `value`; anything else restores `text` to `previous` and leaves
/// `value` alone.
pub fn apply_numeric_text(
    text: &mut String,
    previous: &str,
    value: &mut f32,
    min: f32,
    max: f32,
) -> bool {
    match text.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => {
            *value = (parsed as f32).clamp_to(min, max);
            true
        }
        _ => {
            *text = previous.to_owned();
            false
        }
    }
}

/// Free-text float entry showing `value` with three decimals.
pub fn numeric_text_field(
    ui: &mut egui::Ui,
    id_salt: &str,
    value: &mut f32,
    min: f32,
    max: f32,
) -> bool {
    let previous = format!("{:.TEXT_FIELD_DECIMALS$}", *value);
    let mut text = previous.clone();
    let edited = ui
        .push_id(id_salt, |ui| {
            ui.add(egui::TextEdit::singleline(&mut text).desired_width(TEXT_FIELD_WIDTH))
                .changed()
        })
        .inner;
    edited && apply_numeric_text(&mut text, &previous, value, min, max)
}

/// Characters that cannot appear in an output file name on any platform.
const FORBIDDEN_PATH_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Strips characters that are not allowed in file names. Returns whether
/// anything was removed.
pub fn path_char_filter(text: &mut String) -> bool {
    let before = text.len();
    text.retain(|c| !c.is_control() && !FORBIDDEN_PATH_CHARS.contains(&c));
    text.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameInput;

    #[test]
    fn count_floors_to_one() {
        assert_eq!(floor_count(0), 1);
        assert_eq!(floor_count(-3), 1);
        assert_eq!(floor_count(1), 1);
        assert_eq!(floor_count(8), 8);
    }

    #[test]
    fn numeric_text_accepts_and_clamps() {
        let mut value = 1.0;
        let mut text = "12.5".to_string();
        assert!(apply_numeric_text(&mut text, "1.000", &mut value, 0.0, 10.0));
        assert_eq!(value, 10.0);

        let mut text = " 2.25 ".to_string();
        assert!(apply_numeric_text(&mut text, "10.000", &mut value, 0.0, 10.0));
        assert_eq!(value, 2.25);
    }

    #[test]
    fn numeric_text_reverts_on_garbage() {
        let mut value = 3.5;
        for bad in ["", "abc", "1.2.3", "NaN", "inf"] {
            let mut text = bad.to_string();
            assert!(!apply_numeric_text(&mut text, "3.500", &mut value, 0.0, 10.0));
            assert_eq!(text, "3.500");
            assert_eq!(value, 3.5);
        }
    }

    #[test]
    fn path_filter_strips_forbidden_chars() {
        let mut name = "my:replay/out?*.mp4".to_string();
        assert!(path_char_filter(&mut name));
        assert_eq!(name, "myreplayout.mp4");

        let mut clean = "danser_2026".to_string();
        assert!(!path_char_filter(&mut clean));
    }

    const SCREEN: egui::Vec2 = egui::vec2(1280.0, 720.0);

    fn headless() -> egui::Context {
        let ctx = egui::Context::default();
        ctx.options_mut(|o| o.max_passes = std::num::NonZeroUsize::MIN);
        ctx
    }

    fn raw_input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, SCREEN)),
            events,
            ..Default::default()
        }
    }

    fn button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// The slider/value/reset row is the bottom line of a resettable control.
    fn row_y(control: egui::Rect) -> f32 {
        control.bottom() - egui::Style::default().spacing.interact_size.y / 2.0
    }

    fn slider_point(control: egui::Rect) -> egui::Pos2 {
        egui::pos2(control.left() + 20.0, row_y(control))
    }

    fn reset_point(control: egui::Rect) -> egui::Pos2 {
        egui::pos2(control.right() - 12.0, row_y(control))
    }

    fn draw_once(mut content: impl FnMut(&mut egui::Ui, &mut FrameContext)) {
        let ctx = headless();
        let _ = ctx.run(raw_input(Vec::new()), |ctx| {
            let mut frame = FrameContext::default();
            egui::CentralPanel::default().show(ctx, |ui| content(ui, &mut frame));
        });
    }

    /// A quantized speed slider above an integer mirrors slider.
    struct Panel {
        ctx: egui::Context,
        speed: Param<f32>,
        mirrors: Param<i32>,
        speed_rect: egui::Rect,
        mirrors_rect: egui::Rect,
    }

    impl Panel {
        fn new(speed: f32, mirrors: i32) -> Self {
            let mut panel = Self {
                ctx: headless(),
                speed: Param::new(speed),
                mirrors: Param::new(mirrors),
                speed_rect: egui::Rect::NOTHING,
                mirrors_rect: egui::Rect::NOTHING,
            };
            panel.frame(FrameInput::default(), Vec::new());
            panel
        }

        fn frame(&mut self, input: FrameInput, events: Vec<egui::Event>) {
            let Self {
                ctx,
                speed,
                mirrors,
                speed_rect,
                mirrors_rect,
            } = self;
            let _ = ctx.run(raw_input(events), |ctx| {
                let mut frame = FrameContext::new(input);
                egui::CentralPanel::default().show(ctx, |ui| {
                    *speed_rect = ui
                        .vertical(|ui| {
                            slider_float_reset_step(
                                ui, &mut frame, "Speed", speed, 0.1, 3.0, 0.05, "%.2f",
                            )
                        })
                        .response
                        .rect;
                    *mirrors_rect = ui
                        .vertical(|ui| {
                            slider_int_reset(ui, &mut frame, "Mirrors", mirrors, 1, 10, "%d")
                        })
                        .response
                        .rect;
                });
            });
        }

        fn hover(&mut self, pos: egui::Pos2) {
            self.frame(FrameInput::default(), vec![egui::Event::PointerMoved(pos)]);
        }

        fn click(&mut self, pos: egui::Pos2) {
            self.frame(
                FrameInput::default(),
                vec![egui::Event::PointerMoved(pos), button(pos, true)],
            );
            self.frame(FrameInput::default(), vec![button(pos, false)]);
        }
    }

    #[test]
    fn only_the_hovered_slider_steps() {
        let mut panel = Panel::new(1.0, 5);
        panel.hover(slider_point(panel.speed_rect));

        panel.frame(FrameInput { step_up: true, ..default() }, Vec::new());
        assert!((panel.speed.value() - 1.05).abs() < 1e-4, "{:?}", panel.speed);
        assert!(panel.speed.changed());
        assert_eq!(panel.mirrors.value(), 5);

        // No press, no movement.
        panel.frame(FrameInput::default(), Vec::new());
        assert!((panel.speed.value() - 1.05).abs() < 1e-4);

        panel.frame(FrameInput { step_down: true, ..default() }, Vec::new());
        assert_eq!(panel.speed.value(), 1.0);
        assert!(!panel.speed.changed());

        panel.hover(slider_point(panel.mirrors_rect));
        panel.frame(FrameInput { step_up: true, ..default() }, Vec::new());
        assert_eq!(panel.mirrors.value(), 6);
        assert!(panel.mirrors.changed());
        assert_eq!(panel.speed.value(), 1.0);
    }

    #[test]
    fn unhovered_sliders_ignore_arrows() {
        let mut panel = Panel::new(1.0, 5);
        panel.frame(FrameInput { step_up: true, ..default() }, Vec::new());
        assert_eq!(panel.speed.value(), 1.0);
        assert_eq!(panel.mirrors.value(), 5);
    }

    #[test]
    fn reset_button_only_acts_on_an_edited_value() {
        let mut panel = Panel::new(1.0, 5);
        let reset = reset_point(panel.mirrors_rect);

        panel.click(reset);
        assert_eq!(panel.mirrors.value(), 5);
        assert!(!panel.mirrors.changed());

        panel.mirrors.set_value(8);
        panel.frame(FrameInput::default(), Vec::new());
        assert_eq!(panel.mirrors.value(), 8);

        panel.click(reset);
        assert_eq!(panel.mirrors.value(), 5);
        assert!(!panel.mirrors.changed());
        assert_eq!(panel.speed.value(), 1.0);
    }

    #[test]
    fn out_of_range_value_is_clamped_before_drawing() {
        let mut ar = Param::new(11.5f32).with_range(-10.0, 12.0);
        draw_once(|ui, frame| {
            slider_float_reset(ui, frame, "Approach Rate", &mut ar, 0.0, 10.0, "%.1f")
        });
        assert_eq!(ar.value(), 10.0);
        assert!(ar.changed());
    }

    #[test]
    fn off_step_value_lands_on_a_step() {
        let mut speed = Param::new(1.23f32).with_range(0.1, 3.0);
        draw_once(|ui, frame| {
            slider_float_reset_step(ui, frame, "Speed", &mut speed, 0.1, 3.0, 0.05, "%.2f")
        });
        assert!((speed.value() - 1.25).abs() < 1e-4, "{:?}", speed);
        assert!(speed.changed());
    }
}
