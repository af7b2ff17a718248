use crate::error::DialError;
use serde::Deserialize;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size expressed as a percentage of `self` on each axis.
    pub fn percent(&self, share: Percent) -> Size {
        Size::new(
            self.width * share.width / 100.0,
            self.height * share.height / 100.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn centered(center: Point, size: Size) -> Self {
        Self {
            origin: center.offset(-size.width / 2.0, -size.height / 2.0),
            size,
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x <= self.origin.x + self.size.width
            && p.y >= self.origin.y
            && p.y <= self.origin.y + self.size.height
    }
}

/// A width/height pair in percent of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Percent {
    pub width: f64,
    pub height: f64,
}

impl Percent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

pub fn angle_from_center(point: Point, center: Point) -> f64 {
    (point.y - center.y).atan2(point.x - center.x)
}

/// Plain difference between two pointer angles. Crossing the ±π seam is not
/// normalized, so a single sample across it yields a large jump.
pub fn shortest_delta(a: f64, b: f64) -> f64 {
    a - b
}

pub fn radial_distance(point: Point, center: Point) -> f64 {
    (point.x - center.x).hypot(point.y - center.y)
}

/// Placement angle of item `index` out of `count` evenly spaced items.
pub fn slot_angle(index: usize, count: usize, rotation: f64) -> f64 {
    if count == 0 {
        return rotation;
    }
    index as f64 * (2.0 * PI) / count as f64 + rotation
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Size of the center button hit rectangle.
    pub button: Size,
}

impl DialGeometry {
    pub fn new(
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        button: Size,
    ) -> Result<Self, DialError> {
        if !center.x.is_finite() || !center.y.is_finite() {
            return Err(DialError::UndefinedCenter);
        }
        if !(inner_radius >= 0.0 && inner_radius < outer_radius) || !outer_radius.is_finite() {
            return Err(DialError::DegenerateGeometry {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        Ok(Self {
            center,
            inner_radius,
            outer_radius,
            button,
        })
    }

    /// Geometry for a dial centered in a viewport of the given size.
    pub fn for_viewport(viewport: Size, layout: &Layout) -> Result<Self, DialError> {
        if !(viewport.width > 0.0 && viewport.height > 0.0) {
            return Err(DialError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Self::new(
            Point::new(viewport.width / 2.0, viewport.height / 2.0),
            layout.inner_radius,
            layout.outer_radius,
            viewport.percent(layout.button),
        )
    }

    pub fn button_rect(&self) -> Rect {
        Rect::centered(self.center, self.button)
    }

    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Viewport size this geometry was derived from.
    pub fn viewport(&self) -> Size {
        Size::new(self.center.x * 2.0, self.center.y * 2.0)
    }
}

/// Where an item sits on the ring for the current rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    pub center: Point,
    /// Rotation applied to the item image so it faces the dial center.
    pub rotation: f64,
}

impl ItemPlacement {
    pub fn calculate(index: usize, count: usize, geometry: &DialGeometry, rotation: f64) -> Self {
        let angle = slot_angle(index, count, rotation);
        let radius = geometry.mid_radius();
        Self {
            center: geometry
                .center
                .offset(angle.cos() * radius, angle.sin() * radius),
            rotation: -angle - PI / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Panel {
    pub size: Percent,
    pub corner_radius: f64,
}

/// Sizes that make up the dial, in pixels or viewport percent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub button: Percent,
    pub glyph: Percent,
    pub item_size: f64,
    pub activated_button_radius: f64,
    pub panels: Vec<Panel>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            inner_radius: 300.0,
            outer_radius: 400.0,
            button: Percent::new(10.0, 10.0),
            glyph: Percent::new(10.0, 15.0),
            item_size: 60.0,
            activated_button_radius: 30.0,
            panels: vec![
                Panel {
                    size: Percent::new(10.0, 90.0),
                    corner_radius: 40.0,
                },
                Panel {
                    size: Percent::new(13.0, 20.0),
                    corner_radius: 12.0,
                },
            ],
        }
    }
}
