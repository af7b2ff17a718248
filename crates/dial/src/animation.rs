//! Per-frame animation state: the frame clock, the glyph flip and the
//! confirmation flash.

use std::time::Duration;

/// Tracks the timestamp of the previous frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameClock {
    last: Option<Duration>,
}

impl FrameClock {
    /// Time elapsed since the previous call. The first call only records the
    /// baseline and reports zero.
    pub fn advance(&mut self, now: Duration) -> Duration {
        let elapsed = self
            .last
            .map(|last| now.saturating_sub(last))
            .unwrap_or_default();
        self.last = Some(now);
        elapsed
    }
}

/// Glyph flip progress in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipState {
    progress: f64,
    active: bool,
    target: f64,
}

impl FlipState {
    pub fn new(target: f64) -> Self {
        Self {
            progress: 0.0,
            active: false,
            target,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.active = false;
    }

    /// Returns `true` on the frame the flip reaches its target.
    pub fn advance(&mut self, step: f64) -> bool {
        if !self.active {
            return false;
        }
        self.progress += step;
        if self.progress >= self.target {
            self.progress = self.target;
            self.active = false;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlashState {
    alpha: f64,
}

impl FlashState {
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn trigger(&mut self) {
        self.alpha = 1.0;
    }

    pub fn fade(&mut self, step: f64) {
        if self.alpha <= 0.0 {
            return;
        }
        self.alpha -= step;
        // float residue left after the last full step
        if self.alpha <= step * 1e-6 {
            self.alpha = 0.0;
        }
    }
}
