use crate::geometry::{DialGeometry, Point, radial_distance};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum Region {
    CenterButton,
    RingBand,
    Outside,
}

/// Classifies a pointer position. The center button takes precedence over the
/// ring band wherever the two overlap.
pub fn classify(point: Point, geometry: &DialGeometry) -> Region {
    if geometry.button_rect().contains(point) {
        return Region::CenterButton;
    }

    let dist = radial_distance(point, geometry.center);
    if dist >= geometry.inner_radius && dist <= geometry.outer_radius {
        Region::RingBand
    } else {
        Region::Outside
    }
}
