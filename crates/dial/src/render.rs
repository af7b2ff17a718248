use crate::geometry::{ItemPlacement, Layout, Point, Rect, Size};
use crate::item::{Assets, Item};
use crate::machine::DialMode;
use crate::session::Snapshot;
use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use thiserror::Error;

/// Drawing primitives the dial needs from a host canvas.
pub trait Surface {
    type Image;
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    /// Fills the annulus between `inner` and `outer`. An `inner` of zero fills a disc.
    fn fill_ring(
        &mut self,
        center: Point,
        inner: f64,
        outer: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;
    /// Strokes both edges of the annulus.
    fn stroke_ring(
        &mut self,
        center: Point,
        inner: f64,
        outer: f64,
        color: Srgba<f64>,
        line_width: f64,
    ) -> Result<(), Self::Error>;
    /// Draws `image` scaled to `size`, centered on `center` and rotated by
    /// `rotation` radians around that center.
    fn draw_image_at(
        &mut self,
        image: &Self::Image,
        center: Point,
        size: Size,
        rotation: f64,
    ) -> Result<(), Self::Error>;
    fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;
    /// Covers the whole surface with `color` at opacity `alpha`.
    fn fill_overlay(&mut self, color: Srgba<f64>, alpha: f64) -> Result<(), Self::Error>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid color '{0}', expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

/// A color written as `#rrggbb` or `#rrggbbaa` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, Deref, From, Into)]
pub struct Color(Srgba<f64>);

impl Color {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err());
        }
        let (rgb, alpha) = match hex.len() {
            6 => (hex, 1.0),
            8 => {
                let a = u8::from_str_radix(&hex[6..], 16).map_err(|_| err())?;
                (&hex[..6], a as f64 / 255.0)
            }
            _ => return Err(err()),
        };
        let rgb = palette::Srgb::<u8>::from_str(rgb).map_err(|_| err())?;
        let rgb = rgb.into_format::<f64>();
        Ok(Self(Srgba::new(rgb.red, rgb.green, rgb.blue, alpha)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub body: Color,
    pub ring_fill: Color,
    pub ring_stroke: Color,
    pub ring_line_width: f64,
    pub button: Color,
    pub flash: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            body: Color::new(0xc5 as f64 / 255.0, 0xd4 as f64 / 255.0, 0xcb as f64 / 255.0, 1.0),
            ring_fill: Color::new(0.0, 1.0, 0.0, 0.1),
            ring_stroke: Color::new(0.0, 1.0, 0.0, 1.0),
            ring_line_width: 2.0,
            button: Color::new(0.0, 1.0, 0.0, 1.0),
            flash: Color::new(0.0, 1.0, 0.0, 1.0),
        }
    }
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub snapshot: Snapshot,
    pub items: &'a [Item],
    pub layout: &'a Layout,
}

pub fn draw<S: Surface>(
    surface: &mut S,
    frame: &Frame<'_>,
    assets: &Assets<S::Image>,
    theme: &Theme,
) -> Result<(), S::Error> {
    surface.clear()?;
    draw_body(surface, frame, theme)?;
    draw_glyph(surface, frame, assets, theme)?;

    if frame.snapshot.mode == DialMode::Expanded {
        draw_ring(surface, frame, theme)?;
        draw_items(surface, frame, assets)?;
    }

    if frame.snapshot.flash_alpha > 0.0 {
        surface.fill_overlay(*theme.flash, frame.snapshot.flash_alpha.min(1.0))?;
    }
    Ok(())
}

fn draw_body<S: Surface>(surface: &mut S, frame: &Frame<'_>, theme: &Theme) -> Result<(), S::Error> {
    let geometry = &frame.snapshot.geometry;
    let viewport = geometry.viewport();
    for panel in &frame.layout.panels {
        let rect = Rect::centered(geometry.center, viewport.percent(panel.size));
        surface.fill_rounded_rect(rect, panel.corner_radius, *theme.body)?;
    }
    Ok(())
}

fn draw_glyph<S: Surface>(
    surface: &mut S,
    frame: &Frame<'_>,
    assets: &Assets<S::Image>,
    theme: &Theme,
) -> Result<(), S::Error> {
    let geometry = &frame.snapshot.geometry;
    match frame.snapshot.mode {
        DialMode::ActivatedButton => surface.fill_ring(
            geometry.center,
            0.0,
            frame.layout.activated_button_radius,
            *theme.button,
        ),
        DialMode::Collapsed | DialMode::Expanded => match assets.glyph() {
            Some(image) => surface.draw_image_at(
                image,
                geometry.center,
                geometry.viewport().percent(frame.layout.glyph),
                frame.snapshot.flip_progress.to_radians(),
            ),
            None => Ok(()),
        },
    }
}

fn draw_ring<S: Surface>(surface: &mut S, frame: &Frame<'_>, theme: &Theme) -> Result<(), S::Error> {
    let g = &frame.snapshot.geometry;
    surface.fill_ring(g.center, g.inner_radius, g.outer_radius, *theme.ring_fill)?;
    surface.stroke_ring(
        g.center,
        g.inner_radius,
        g.outer_radius,
        *theme.ring_stroke,
        theme.ring_line_width,
    )
}

fn draw_items<S: Surface>(
    surface: &mut S,
    frame: &Frame<'_>,
    assets: &Assets<S::Image>,
) -> Result<(), S::Error> {
    let count = frame.items.len();
    let size = Size::new(frame.layout.item_size, frame.layout.item_size);

    for (i, item) in frame.items.iter().enumerate() {
        let Some(image) = assets.item(&item.id) else {
            continue;
        };
        let placement =
            ItemPlacement::calculate(i, count, &frame.snapshot.geometry, frame.snapshot.rotation);
        surface.draw_image_at(image, placement.center, size, placement.rotation)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DialGeometry;
    use crate::item::ItemId;
    use std::f64::consts::PI;
    use std::path::Path;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        FillRing { inner: f64, outer: f64 },
        StrokeRing,
        Image { name: &'static str, center: Point, rotation: f64 },
        RoundedRect { radius: f64 },
        Overlay { alpha: f64 },
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Surface for Recorder {
        type Image = &'static str;
        type Error = ();

        fn clear(&mut self) -> Result<(), ()> {
            self.calls.push(Call::Clear);
            Ok(())
        }

        fn fill_ring(&mut self, _: Point, inner: f64, outer: f64, _: Srgba<f64>) -> Result<(), ()> {
            self.calls.push(Call::FillRing { inner, outer });
            Ok(())
        }

        fn stroke_ring(&mut self, _: Point, _: f64, _: f64, _: Srgba<f64>, _: f64) -> Result<(), ()> {
            self.calls.push(Call::StrokeRing);
            Ok(())
        }

        fn draw_image_at(
            &mut self,
            image: &&'static str,
            center: Point,
            _: Size,
            rotation: f64,
        ) -> Result<(), ()> {
            self.calls.push(Call::Image {
                name: *image,
                center,
                rotation,
            });
            Ok(())
        }

        fn fill_rounded_rect(&mut self, _: Rect, radius: f64, _: Srgba<f64>) -> Result<(), ()> {
            self.calls.push(Call::RoundedRect { radius });
            Ok(())
        }

        fn fill_overlay(&mut self, _: Srgba<f64>, alpha: f64) -> Result<(), ()> {
            self.calls.push(Call::Overlay { alpha });
            Ok(())
        }
    }

    fn snapshot(mode: DialMode) -> Snapshot {
        Snapshot {
            mode,
            rotation: 0.0,
            velocity: 0.0,
            flip_progress: 0.0,
            flash_alpha: 0.0,
            dragging: false,
            geometry: DialGeometry::for_viewport(Size::new(1000.0, 1000.0), &Layout::default())
                .unwrap(),
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item::new(ItemId::new("a"), "a.png"),
            Item::new(ItemId::new("b"), "b.png"),
            Item::new(ItemId::new("c"), "c.png"),
            Item::new(ItemId::new("d"), "d.png"),
        ]
    }

    fn assets(items: &[Item]) -> Assets<&'static str> {
        Assets::load(Some(Path::new("logo")), items, |path| {
            match path.to_str() {
                Some("logo") => Ok("logo"),
                Some("a.png") => Ok("a"),
                Some("c.png") => Ok("c"),
                _ => Err("missing"),
            }
        })
    }

    fn render(snapshot: Snapshot) -> Vec<Call> {
        let items = items();
        let layout = Layout::default();
        let frame = Frame {
            snapshot,
            items: &items,
            layout: &layout,
        };
        let mut surface = Recorder::default();
        draw(&mut surface, &frame, &assets(&items), &Theme::default()).unwrap();
        surface.calls
    }

    #[test]
    fn test_collapsed_draws_body_and_glyph_only() {
        let calls = render(snapshot(DialMode::Collapsed));
        assert_eq!(
            calls,
            vec![
                Call::Clear,
                Call::RoundedRect { radius: 40.0 },
                Call::RoundedRect { radius: 12.0 },
                Call::Image {
                    name: "logo",
                    center: Point::new(500.0, 500.0),
                    rotation: 0.0
                },
            ]
        );
    }

    #[test]
    fn test_expanded_draws_ring_and_skips_missing_items() {
        let calls = render(snapshot(DialMode::Expanded));
        assert!(calls.contains(&Call::FillRing {
            inner: 300.0,
            outer: 400.0
        }));
        assert!(calls.contains(&Call::StrokeRing));

        let drawn: Vec<_> = calls
            .iter()
            .filter_map(|c| match c {
                Call::Image { name, .. } if *name != "logo" => Some(*name),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, ["a", "c"]);
    }

    #[test]
    fn test_items_follow_rotation() {
        let mut snap = snapshot(DialMode::Expanded);
        snap.rotation = PI / 2.0;
        let calls = render(snap);
        let Some(Call::Image { center, rotation, .. }) = calls
            .iter()
            .find(|c| matches!(c, Call::Image { name: "a", .. }))
        else {
            panic!("item a not drawn");
        };
        assert!((center.x - 500.0).abs() < 1e-6);
        assert!((center.y - 850.0).abs() < 1e-6);
        assert!((rotation + PI).abs() < 1e-9);
    }

    #[test]
    fn test_activated_button_and_flash() {
        let mut snap = snapshot(DialMode::ActivatedButton);
        snap.flash_alpha = 0.5;
        let calls = render(snap);
        assert!(calls.contains(&Call::FillRing {
            inner: 0.0,
            outer: 30.0
        }));
        assert!(!calls.iter().any(|c| matches!(c, Call::Image { .. })));
        assert_eq!(calls.last(), Some(&Call::Overlay { alpha: 0.5 }));
    }

    #[test]
    fn test_glyph_rotates_with_flip() {
        let mut snap = snapshot(DialMode::Collapsed);
        snap.flip_progress = 90.0;
        let calls = render(snap);
        assert!(calls.iter().any(|c| matches!(
            c,
            Call::Image { name: "logo", rotation, .. } if (rotation - PI / 2.0).abs() < 1e-12
        )));
    }

    #[test]
    fn test_color_parsing() {
        let green: Color = "#00ff00".parse().unwrap();
        assert_eq!(*green, Srgba::new(0.0, 1.0, 0.0, 1.0));

        let faint: Color = "00ff0080".parse().unwrap();
        assert!((faint.alpha - 128.0 / 255.0).abs() < 1e-12);

        assert!("#00ff0".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());

        let theme: Theme = serde_json::from_str(r##"{ "flash": "#ff0000" }"##).unwrap();
        assert_eq!(*theme.flash, Srgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(theme.ring_line_width, 2.0);
    }
}
