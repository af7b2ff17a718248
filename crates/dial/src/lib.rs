//! Interaction and animation engine for a spinnable radial dial.
//!
//! The host feeds pointer events and frame timestamps into a [`DialSession`]
//! and draws each frame through [`render::draw`] onto its own [`Surface`].

pub mod animation;
pub mod audio;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod item;
pub mod machine;
pub mod momentum;
pub mod render;
pub mod session;
pub mod tuning;

pub use audio::{Cue, CueSink};
pub use error::DialError;
pub use geometry::{DialGeometry, Layout, Point, Size};
pub use item::{Assets, Item, ItemId};
pub use machine::DialMode;
pub use render::{Frame, Surface, Theme};
pub use session::{DialSession, PointerEvent, Snapshot};
pub use tuning::{StepMode, Tuning};
