//! Dial state transitions.
//!
//! [`step`] is pure: it maps the current state and an input to the next state
//! plus the effects the session has to carry out. Nothing here touches audio,
//! momentum or drawing directly.

use crate::audio::Cue;
use crate::hit::Region;
use crate::momentum::DragSession;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Default, StrumDisplay)]
pub enum Phase {
    #[default]
    Idle,
    Expanded,
    Dragging(DragSession),
    Flipping,
    Activated,
}

/// What the renderer shows for a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum DialMode {
    Collapsed,
    Expanded,
    ActivatedButton,
}

impl Phase {
    pub fn mode(&self) -> DialMode {
        match self {
            Self::Idle | Self::Flipping => DialMode::Collapsed,
            Self::Expanded | Self::Dragging(_) => DialMode::Expanded,
            Self::Activated => DialMode::ActivatedButton,
        }
    }

    pub fn drag(&self) -> Option<&DragSession> {
        match self {
            Self::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    /// Momentum only coasts on a visible ring that nobody is holding.
    pub fn is_coasting(&self) -> bool {
        matches!(self, Self::Expanded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Tap(Region),
    Press(Region, f64),
    DragTo(f64),
    Release,
    FlipComplete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    Play(Cue),
    Silence(Cue),
    Flash,
    StartFlip,
    ResetFlip,
    HaltSpin,
    Rotate(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub phase: Phase,
    pub effects: Vec<Effect>,
}

impl Step {
    fn to(phase: Phase, effects: impl Into<Vec<Effect>>) -> Self {
        Self {
            phase,
            effects: effects.into(),
        }
    }

    fn stay(phase: Phase) -> Self {
        Self {
            phase,
            effects: Vec::new(),
        }
    }
}

pub fn step(phase: Phase, input: Input) -> Step {
    use Effect::*;

    match (phase, input) {
        (Phase::Idle, Input::Tap(Region::CenterButton)) => {
            Step::to(Phase::Expanded, [Play(Cue::Open)])
        }
        (Phase::Expanded | Phase::Dragging(_), Input::Tap(Region::CenterButton)) => {
            Step::to(Phase::Idle, [Play(Cue::Pending)])
        }
        (Phase::Expanded | Phase::Dragging(_), Input::Tap(Region::RingBand)) => {
            Step::to(Phase::Flipping, [Play(Cue::Pending), StartFlip])
        }
        (Phase::Flipping, Input::FlipComplete) => Step::stay(Phase::Activated),
        (Phase::Activated, Input::Tap(Region::CenterButton)) => Step::to(
            Phase::Idle,
            [Flash, Silence(Cue::Pending), Play(Cue::Confirm), ResetFlip],
        ),
        (Phase::Expanded, Input::Press(Region::RingBand, angle)) => {
            Step::to(Phase::Dragging(DragSession::new(angle)), [HaltSpin])
        }
        (Phase::Dragging(drag), Input::DragTo(angle)) => {
            Step::to(Phase::Dragging(drag), [Rotate(angle)])
        }
        (Phase::Dragging(_), Input::Release) => Step::stay(Phase::Expanded),
        (phase, _) => Step::stay(phase),
    }
}
