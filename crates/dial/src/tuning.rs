use crate::error::DialError;
use serde::Deserialize;
use std::time::Duration;
use strum::Display as StrumDisplay;

/// How per-tick constants relate to elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, StrumDisplay)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StepMode {
    /// One step per frame, regardless of frame interval.
    #[default]
    Fixed,
    /// Steps scaled by elapsed time against `reference_hz`.
    Scaled,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub drag_gain: f64,
    pub decay: f64,
    pub velocity_epsilon: f64,
    /// Flip progress added per frame, in degrees.
    pub flip_step: f64,
    pub flip_target: f64,
    pub flash_step: f64,
    pub step_mode: StepMode,
    pub reference_hz: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drag_gain: 0.25,
            decay: 0.95,
            velocity_epsilon: 1e-4,
            flip_step: 10.0,
            flip_target: 90.0,
            flash_step: 0.02,
            step_mode: StepMode::Fixed,
            reference_hz: 60.0,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), DialError> {
        if !(self.decay >= 0.0 && self.decay < 1.0) {
            return Err(DialError::InvalidTuning("decay must lie in [0, 1)"));
        }
        if !(self.drag_gain > 0.0) {
            return Err(DialError::InvalidTuning("drag_gain must be positive"));
        }
        if !(self.velocity_epsilon > 0.0) {
            return Err(DialError::InvalidTuning("velocity_epsilon must be positive"));
        }
        if !(self.flip_step > 0.0 && self.flip_target > 0.0) {
            return Err(DialError::InvalidTuning(
                "flip_step and flip_target must be positive",
            ));
        }
        if !(self.flash_step > 0.0) {
            return Err(DialError::InvalidTuning("flash_step must be positive"));
        }
        if !(self.reference_hz > 0.0) {
            return Err(DialError::InvalidTuning("reference_hz must be positive"));
        }
        Ok(())
    }

    /// Number of reference frames the elapsed time stands for.
    pub fn frames(&self, elapsed: Duration) -> f64 {
        match self.step_mode {
            StepMode::Fixed => 1.0,
            StepMode::Scaled => elapsed.as_secs_f64() * self.reference_hz,
        }
    }
}
