use bevy::prelude::*;
use bevy_egui::egui;

use crate::frame::FrameContext;

const BACKDROP: egui::Color32 = egui::Color32::from_rgba_premultiplied(3, 2, 8, 150);
const BIG_FRACTION: f32 = 0.9;

/// Width/height policy of a popup. Every class is centered on the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupSize {
    /// Sized to its content.
    #[default]
    Dynamic,
    /// Half the window wide, height from content.
    Medium,
    /// 90% of the window in both directions.
    Big,
}

impl PopupSize {
    /// Fixed size for a window of `window` size; `None` means auto-size, and a
    /// zero component means that axis follows the content.
    pub fn fixed_size(self, window: egui::Vec2) -> Option<egui::Vec2> {
        match self {
            PopupSize::Dynamic => None,
            PopupSize::Medium => Some(egui::vec2(window.x / 2.0, 0.0)),
            PopupSize::Big => Some(window * BIG_FRACTION),
        }
    }
}

/// What happened this frame that could close a popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DismissInput {
    pub escape: bool,
    /// Primary or secondary mouse button went down this frame.
    pub clicked: bool,
    /// The pointer is over this popup (or something drawn inside it).
    pub pointer_inside: bool,
}

/// A long-lived modal overlay.
///
/// Content is supplied to [`Popup::draw`] every frame rather than stored, so
/// nested popups are drawn from inside their parent's content and resolve
/// their dismissal first. `E` is the event queued once per close when a close
/// listener is set.
#[derive(Debug, Clone)]
pub struct Popup<E> {
    name: String,
    size: PopupSize,
    open: bool,
    overlay_requested: bool,
    listener_fired: bool,
    close_listener: Option<E>,
}

impl<E: Clone> Popup<E> {
    pub fn new(name: impl Into<String>, size: PopupSize) -> Self {
        Self {
            name: name.into(),
            size,
            open: false,
            overlay_requested: false,
            // Nothing to report until the popup has been open at least once.
            listener_fired: true,
            close_listener: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.overlay_requested = false;
        self.listener_fired = false;
    }

    pub fn set_close_listener(&mut self, event: E) {
        self.close_listener = Some(event);
    }

    /// True while closed. The first call after an open period queues the
    /// close listener's event onto `closed`; later calls stay quiet until the
    /// popup is opened again.
    pub fn should_close(&mut self, closed: &mut Vec<E>) -> bool {
        if !self.open && !self.listener_fired {
            if let Some(event) = &self.close_listener {
                closed.push(event.clone());
            }
            self.listener_fired = true;
        }
        !self.open
    }

    /// Decides whether this popup closes this frame, then claims the frame's
    /// dismissal so enclosing popups checked after it ignore the same click.
    pub fn resolve_dismissal(&mut self, frame: &mut FrameContext, input: DismissInput) {
        let outside_click =
            input.clicked && !input.pointer_inside && !frame.dismissal_claimed();
        if input.escape || outside_click {
            debug!("Dismissing popup {}", self.name);
            self.open = false;
        }
        frame.claim_dismissal();
    }

    /// Draws the popup while open, running `content` inside it. Returns the
    /// content's result, or `None` when closed.
    pub fn draw<R>(
        &mut self,
        ctx: &egui::Context,
        frame: &mut FrameContext,
        content: impl FnOnce(&mut egui::Ui, &mut FrameContext) -> R,
    ) -> Option<R> {
        if !self.open {
            return None;
        }

        let id = egui::Id::new(("popup", self.name.as_str()));
        let screen = ctx.content_rect();

        if !self.overlay_requested {
            self.overlay_requested = true;
            ctx.move_to_top(egui::LayerId::new(egui::Order::Foreground, id));
        }

        egui::Area::new(id.with("backdrop"))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.painter().rect_filled(screen, 0.0, BACKDROP);
                ui.allocate_rect(screen, egui::Sense::click());
            });

        let fixed = self.size.fixed_size(screen.size());
        let shown = egui::Area::new(id)
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::CENTER_CENTER)
            .fixed_pos(screen.center())
            .show(ctx, |ui| {
                egui::Frame::popup(&ctx.style())
                    .show(ui, |ui| {
                        if let Some(size) = fixed {
                            if size.x > 0.0 {
                                ui.set_width(size.x);
                            }
                            if size.y > 0.0 {
                                ui.set_height(size.y);
                            }
                        }
                        content(ui, frame)
                    })
                    .inner
            });

        let input = DismissInput {
            escape: frame.input().dismiss,
            clicked: ctx.input(|i| i.pointer.primary_pressed() || i.pointer.secondary_pressed()),
            pointer_inside: ctx
                .pointer_interact_pos()
                .is_some_and(|pos| shown.response.rect.contains(pos)),
        };
        self.resolve_dismissal(frame, input);

        Some(shown.inner)
    }
}
