use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialError {
    #[error("Inner radius {inner} must be non-negative and smaller than outer radius {outer}")]
    DegenerateGeometry { inner: f64, outer: f64 },
    #[error("Dial center is not a finite point")]
    UndefinedCenter,
    #[error("Viewport {width}x{height} has no area")]
    EmptyViewport { width: f64, height: f64 },
    #[error("Invalid tuning: {0}")]
    InvalidTuning(&'static str),
}
