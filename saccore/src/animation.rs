//! Sidebar slide animation
//!
//! The sidebar is a two-state panel: closed (width 0) or open (full width).
//! Toggling starts a width tween that is advanced once per frame with the
//! frame's delta time. Toggling again while a tween is running replaces it
//! with a new tween that starts from the current width, so the panel never
//! jumps and always settles exactly on the latest target.

/// Sidebar width when fully open, in points.
pub const SIDEBAR_WIDTH: f32 = 220.0;

/// Duration of one open/close slide, in seconds.
pub const SLIDE_DURATION: f32 = 0.22;

/// A single in-flight width transition.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: f32,
    to: f32,
    /// Progress from 0.0 to 1.0
    progress: f32,
}

/// Open/closed state plus the animated width that follows it.
#[derive(Debug, Clone)]
pub struct Sidebar {
    open: bool,
    width: f32,
    open_width: f32,
    duration: f32,
    tween: Option<Tween>,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new(SIDEBAR_WIDTH, SLIDE_DURATION)
    }
}

impl Sidebar {
    /// A closed sidebar that slides out to `open_width` over `duration` seconds.
    pub fn new(open_width: f32, duration: f32) -> Self {
        Self {
            open: false,
            width: 0.0,
            open_width: open_width.max(0.0),
            duration: duration.max(0.0),
            tween: None,
        }
    }

    /// Flip between open and closed.
    ///
    /// The target is derived from the state before the flip, and the state is
    /// written in the same call, so rapid toggles always alternate.
    pub fn toggle(&mut self) {
        let target = if self.open { 0.0 } else { self.open_width };
        self.open = !self.open;
        self.tween = Some(Tween {
            from: self.width,
            to: target,
            progress: 0.0,
        });
        tracing::debug!(open = self.open, from = self.width, to = target, "sidebar toggled");
        if self.duration == 0.0 {
            self.finish();
        }
    }

    /// Advance the running tween by `dt` seconds.
    /// Returns true while the sidebar is still moving.
    pub fn update(&mut self, dt: f32) -> bool {
        let duration = self.duration;
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };
        if duration <= 0.0 {
            self.finish();
            return false;
        }

        tween.progress = (tween.progress + dt.max(0.0) / duration).min(1.0);
        if tween.progress >= 1.0 {
            self.finish();
            return false;
        }

        self.width = lerp(tween.from, tween.to, ease_in_out_cubic(tween.progress));
        true
    }

    fn finish(&mut self) {
        if let Some(tween) = self.tween.take() {
            self.width = tween.to;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current on-screen width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Width the sidebar will settle at.
    pub fn target_width(&self) -> f32 {
        match self.tween {
            Some(tween) => tween.to,
            None => self.width,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}

/// Linear interpolation between two values
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-in-out, eased at both ends.
fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
