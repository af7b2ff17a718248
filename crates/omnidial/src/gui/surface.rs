use cairo::Context;
use dial::geometry::Rect;
use dial::{Point, Size, Surface};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

/// Cairo backed drawing surface for one frame of the drawing area.
pub struct CairoSurface<'a> {
    cr: &'a Context,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    fn set_color(&self, color: Srgba<f64>) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }
}

impl Surface for CairoSurface<'_> {
    type Image = Pixbuf;
    type Error = cairo::Error;

    fn clear(&mut self) -> Result<(), cairo::Error> {
        self.cr.save()?;
        self.cr.set_operator(cairo::Operator::Clear);
        self.cr.paint()?;
        self.cr.restore()
    }

    fn fill_ring(
        &mut self,
        center: Point,
        inner: f64,
        outer: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr.new_path();
        self.cr.arc(center.x, center.y, outer, 0.0, 2.0 * PI);
        if inner > 0.0 {
            self.cr.new_sub_path();
            self.cr.arc_negative(center.x, center.y, inner, 2.0 * PI, 0.0);
        }
        self.cr.set_fill_rule(cairo::FillRule::EvenOdd);
        self.cr.fill()
    }

    fn stroke_ring(
        &mut self,
        center: Point,
        inner: f64,
        outer: f64,
        color: Srgba<f64>,
        line_width: f64,
    ) -> Result<(), cairo::Error> {
        self.set_color(color);
        self.cr.set_line_width(line_width);
        for radius in [outer, inner].into_iter().filter(|r| *r > 0.0) {
            self.cr.new_path();
            self.cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
            self.cr.stroke()?;
        }
        Ok(())
    }

    fn draw_image_at(
        &mut self,
        image: &Pixbuf,
        center: Point,
        size: Size,
        rotation: f64,
    ) -> Result<(), cairo::Error> {
        let (w, h) = (image.width() as f64, image.height() as f64);
        if w <= 0.0 || h <= 0.0 {
            return Ok(());
        }

        self.cr.save()?;
        self.cr.translate(center.x, center.y);
        self.cr.rotate(rotation);
        self.cr.scale(size.width / w, size.height / h);
        self.cr.set_source_pixbuf(image, -w / 2.0, -h / 2.0);
        self.cr.paint()?;
        self.cr.restore()
    }

    fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), cairo::Error> {
        let (x, y) = (rect.origin.x, rect.origin.y);
        let (w, h) = (rect.size.width, rect.size.height);
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);

        self.set_color(color);
        self.cr.new_path();
        self.cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
        self.cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
        self.cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
        self.cr.arc(x + r, y + r, r, PI, 1.5 * PI);
        self.cr.close_path();
        self.cr.fill()
    }

    fn fill_overlay(&mut self, color: Srgba<f64>, alpha: f64) -> Result<(), cairo::Error> {
        self.set_color(Srgba::new(color.red, color.green, color.blue, alpha));
        self.cr.paint()
    }
}
