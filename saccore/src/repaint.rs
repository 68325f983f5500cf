//! Repaint scheduling
//!
//! The calculator sits idle most of the time, so egui is only woken when a
//! frame is actually needed:
//!
//! 1. **Input**: a click or key press. egui wakes on its own.
//! 2. **Animating**: the sidebar is sliding. Frames are requested at a fixed
//!    interval until it settles.
//! 3. **State change**: something changed outside an input event, such as a
//!    blocking update check returning. One immediate repaint.
//!
//! Call [`RepaintController::begin_frame`] first thing in `update()` and
//! [`RepaintController::end_frame`] last.

use egui::InputState;
use std::time::Duration;

/// ~60 Hz while the sidebar moves.
const ANIMATION_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaintReason {
    Init,
    Input,
    StateChange,
    Animating,
}

#[derive(Debug)]
pub struct RepaintController {
    animating: bool,
    oneshot: bool,
    animation_interval: Duration,
    frames: u64,
    last_reason: RepaintReason,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            animating: false,
            oneshot: false,
            animation_interval: ANIMATION_INTERVAL,
            frames: 0,
            last_reason: RepaintReason::Init,
        }
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Ask for one more frame once this one ends.
    pub fn mark_needs_repaint(&mut self) {
        self.oneshot = true;
    }

    /// Why the current frame was painted.
    pub fn reason(&self) -> RepaintReason {
        self.last_reason
    }

    /// Frames completed so far.
    pub fn frame(&self) -> u64 {
        self.frames
    }

    pub fn begin_frame(&mut self, ctx: &egui::Context) {
        let input = ctx.input(has_user_input);
        self.last_reason = classify(self.frames, input, self.oneshot, self.animating);
        self.oneshot = false;
    }

    pub fn end_frame(&mut self, ctx: &egui::Context) {
        self.frames += 1;
        if self.animating {
            ctx.request_repaint_after(self.animation_interval);
        } else if self.oneshot {
            ctx.request_repaint();
        }
    }
}

fn has_user_input(i: &InputState) -> bool {
    let pointer = &i.pointer;
    !i.events.is_empty()
        || pointer.any_pressed()
        || pointer.any_released()
        || pointer.is_moving()
        || i.raw_scroll_delta != egui::Vec2::ZERO
}

fn classify(frames: u64, input: bool, oneshot: bool, animating: bool) -> RepaintReason {
    match (frames, input, oneshot, animating) {
        (0, ..) => RepaintReason::Init,
        (_, true, ..) => RepaintReason::Input,
        (_, false, true, _) => RepaintReason::StateChange,
        (_, false, false, true) => RepaintReason::Animating,
        // Woken by egui itself, e.g. a resize
        _ => RepaintReason::Input,
    }
}
