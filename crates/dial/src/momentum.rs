use crate::geometry::shortest_delta;
use crate::tuning::Tuning;

/// Pointer angles recorded while a drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start_angle: f64,
    pub last_angle: f64,
}

impl DragSession {
    pub fn new(pointer_angle: f64) -> Self {
        Self {
            start_angle: pointer_angle,
            last_angle: pointer_angle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    /// Radians, accumulated without wrapping.
    pub angle: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Momentum {
    state: RotationState,
    drag_gain: f64,
    decay: f64,
    epsilon: f64,
}

impl Momentum {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            state: RotationState::default(),
            drag_gain: tuning.drag_gain,
            decay: tuning.decay,
            epsilon: tuning.velocity_epsilon,
        }
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn halt(&mut self) {
        self.state.velocity = 0.0;
    }

    /// Rotation lags the pointer by `drag_gain`; the raw pointer delta becomes
    /// the velocity carried after release.
    pub fn apply_drag(&mut self, session: &mut DragSession, pointer_angle: f64) {
        let delta = shortest_delta(pointer_angle, session.last_angle);
        self.state.angle += delta * self.drag_gain;
        self.state.velocity = delta;
        session.last_angle = pointer_angle;
    }

    /// Coast for `frames` reference frames. `frames` is 1.0 in fixed step mode.
    pub fn tick(&mut self, frames: f64) {
        if self.state.velocity == 0.0 {
            return;
        }
        self.state.angle += self.state.velocity * frames;
        self.state.velocity *= self.decay.powf(frames);
        if self.state.velocity.abs() < self.epsilon {
            self.state.velocity = 0.0;
        }
    }
}
