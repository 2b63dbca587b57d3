//! Drawing paths into an RGBA image.
//!
//! # Implementation notes
//!
//! Coverage is computed with the `ab_glyph` crate, the same way it draws the glyphs of a font: an
//! `ab_glyph::Outline` of line segments goes into `OutlinedGlyph::draw`, which calls us back with a
//! coverage value `c` for every pixel `(x, y)` of the outline's pixel bounds, relative to the
//! top-left corner of those bounds (`px_bounds().min`). Two things to know about that:
//!
//! - `ab_glyph` thinks in font units with y pointing up, and flips y when it scales to pixels.
//!   Our segments are already in device pixels with y pointing down, so we hand it `(x, -y)` with
//!   a scale factor of 1, and the flip puts them back. For the same reason the outline's
//!   `bounds` has its `min.y` and `max.y` swapped, as `ab_glyph`'s own font outlines do.
//! - It allocates a coverage buffer for the whole outline. A glyph zoomed far past the canvas
//!   would need a huge one, so we first clip every segment to the canvas. Pieces above or below
//!   the canvas are dropped (they only affect rows we don't draw); pieces left or right of it are
//!   pushed onto the left or right edge, which keeps each row's winding intact.
//!
//! Paths are `kurbo::BezPath`s in device space by the time they get here. Curves are flattened
//! into line segments with `kurbo::flatten` (0.25px tolerance), and a stroke is the fill of the
//! outline `kurbo::stroke` expands it to.

use std::path::Path;

use ab_glyph::{
    point as ab_point, Glyph, GlyphId, Outline, OutlineCurve, OutlinedGlyph, PxScale,
    PxScaleFactor, Rect,
};
use image::{Rgba, RgbaImage};
use kurbo::{Affine, BezPath, Cap, Circle, Join, PathEl, Shape, StrokeOpts};
use log::debug;
use thiserror::Error;

use crate::path::{GlyphPath, PathSink};
use crate::point::{BoundingBox, Point};
use crate::transform::Camera;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not write image: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba<u8>,
    /// In device pixels, whatever the canvas transform.
    pub width: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Paint {
    pub fill: Option<Rgba<u8>>,
    pub stroke: Option<Stroke>,
}

/// Outline stroke width for a view zoomed by `scale`: thicker when zoomed in, within 1..=6 px.
pub fn stroke_width_for_scale(scale: f32) -> f32 {
    (scale * 3.0).max(1.0).min(6.0)
}

/// Radius of the point markers of the inspector, within 4..=12 px.
pub fn point_radius_for_scale(scale: f32) -> f32 {
    (scale * 5.0).max(4.0).min(12.0)
}

const FLATTEN_TOLERANCE: f64 = 0.25;
/// Discs only need to look round at marker sizes.
const CIRCLE_TOLERANCE: f64 = 0.1;

impl PathSink for BezPath {
    fn move_to(&mut self, x: f32, y: f32) {
        BezPath::move_to(self, (f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        BezPath::line_to(self, (f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        BezPath::quad_to(self, (f64::from(cx), f64::from(cy)), (f64::from(x), f64::from(y)));
    }

    fn close(&mut self) {
        self.close_path();
    }
}

/// The subpaths of `path` as polylines, curves flattened.
fn flatten_to_polylines(path: &BezPath) -> Vec<Vec<Point>> {
    let mut polylines = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    kurbo::flatten(path.iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            if current.len() > 1 {
                polylines.push(std::mem::take(&mut current));
            }
            current.clear();
            current.push(p.into());
        }
        PathEl::LineTo(p) => current.push(p.into()),
        PathEl::ClosePath => {
            if current.len() > 1 {
                polylines.push(std::mem::take(&mut current));
            }
            current.clear();
        }
        // `flatten` only hands out the three above.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    if current.len() > 1 {
        polylines.push(current);
    }
    polylines
}

/// Splits `(a, b)` where it crosses the canvas edges and returns the pieces that matter for the
/// rows of a `width`×`height` canvas (see the module notes).
fn clip_segment(a: Point, b: Point, width: f32, height: f32) -> Vec<(Point, Point)> {
    let d = b - a;
    let mut ts = vec![0.0, 1.0];
    for &(start, delta, edge) in &[
        (a.x, d.x, 0.0),
        (a.x, d.x, width),
        (a.y, d.y, 0.0),
        (a.y, d.y, height),
    ] {
        if delta != 0.0 {
            let t = (edge - start) / delta;
            if t > 0.0 && t < 1.0 {
                ts.push(t);
            }
        }
    }
    ts.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    let at = |t: f32| Point::new(a.x + d.x * t, a.y + d.y * t);
    let clamp = |p: Point| Point::new(p.x.max(0.0).min(width), p.y.max(0.0).min(height));
    ts.windows(2)
        .filter_map(|w| {
            let middle = at((w[0] + w[1]) / 2.0);
            if middle.y < 0.0 || middle.y > height {
                None
            } else {
                Some((clamp(at(w[0])), clamp(at(w[1]))))
            }
        })
        .collect()
}

fn closed_segments(polylines: &[Vec<Point>]) -> Vec<(Point, Point)> {
    polylines
        .iter()
        .flat_map(|polyline| {
            let n = polyline.len();
            (0..n).map(move |i| (polyline[i], polyline[(i + 1) % n]))
        })
        .filter(|(a, b)| a != b)
        .collect()
}

/// An image plus the transform from path coordinates to its pixels.
pub struct Canvas {
    image: RgbaImage,
    transform: Affine,
}

impl Canvas {
    /// A transparent canvas with the identity transform.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_background(width, height, Rgba([0, 0, 0, 0]))
    }

    pub fn with_background(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Canvas {
            image: RgbaImage::from_pixel(width, height, background),
            transform: Affine::IDENTITY,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn save(&self, filename: &Path) -> Result<(), RenderError> {
        self.image.save(filename)?;
        Ok(())
    }

    /// Fills and/or strokes `path`, filling first.
    pub fn draw_path(&mut self, path: &GlyphPath, paint: &Paint) {
        let mut device_path = BezPath::new();
        path.replay(&mut device_path);
        device_path.apply_affine(self.transform);
        if let Some(color) = paint.fill {
            self.fill_path(&device_path, color);
        }
        if let Some(stroke) = paint.stroke {
            self.stroke_path(&device_path, stroke);
        }
    }

    /// A filled circle; `center` and `radius` are in device pixels.
    pub fn draw_disc(&mut self, center: Point, radius: f32, color: Rgba<u8>) {
        let circle = Circle::new(center, f64::from(radius));
        self.fill_path(&circle.to_path(CIRCLE_TOLERANCE), color);
    }

    /// Connects `points` (device pixels) with lines.
    pub fn draw_polyline(&mut self, points: &[Point], stroke: Stroke) {
        let (first, rest) = match points.split_first() {
            Some(split) if !split.1.is_empty() => split,
            _ => return,
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for &p in rest {
            path.line_to(p);
        }
        self.stroke_path(&path, stroke);
    }

    /// The background grid of the inspector, for the view of `camera`.
    ///
    /// Two grids fade into each other as the view zooms: cell sizes are 30 px divided by powers of
    /// 5, and each grid's opacity is the fractional part of its position on that log scale, so a
    /// grid fades in as its cells grow and is replaced by the next, coarser one.
    pub fn draw_grid(&mut self, camera: &Camera) {
        const BASE_CELL: f32 = 30.0;
        const REPEAT: f32 = 5.0;
        let grid_color = Rgba([0x19, 0x19, 0x19, 0x82]);
        for &offset in &[-0.5, 0.0] {
            let log_position = camera.scale.ln() / REPEAT.ln() + offset;
            let alpha = log_position - log_position.floor();
            let cell = BASE_CELL / REPEAT.powf(log_position.floor());
            let color = Rgba([
                grid_color[0],
                grid_color[1],
                grid_color[2],
                (f32::from(grid_color[3]) * alpha) as u8,
            ]);
            self.draw_grid_lines(camera, cell, Stroke { color, width: 1.4 });
        }
        let axes = Stroke { color: Rgba([0x39, 0x3b, 0x40, 0xff]), width: 1.8 };
        let origin = camera.to_screen(Point::default());
        let (w, h) = (self.width() as f32, self.height() as f32);
        self.draw_polyline(&[Point::new(0.0, origin.y), Point::new(w, origin.y)], axes);
        self.draw_polyline(&[Point::new(origin.x, 0.0), Point::new(origin.x, h)], axes);
    }

    fn draw_grid_lines(&mut self, camera: &Camera, cell: f32, stroke: Stroke) {
        if stroke.color[3] == 0 || !(cell * camera.scale).is_finite() || cell * camera.scale < 1.0 {
            return;
        }
        let (w, h) = (self.width() as f32, self.height() as f32);
        let t = camera.translation;
        let s = camera.scale;
        // Visible font-space range along each axis (y is flipped).
        let (x_min, x_max) = (-t.x / s, (w - t.x) / s);
        let (y_min, y_max) = ((t.y - h) / s, t.y / s);
        let first = (x_min / cell).floor() as i64;
        let last = (x_max / cell).ceil() as i64;
        for k in first..=last {
            let x = k as f32 * cell * s + t.x;
            self.draw_polyline(&[Point::new(x, 0.0), Point::new(x, h)], stroke);
        }
        let first = (y_min / cell).floor() as i64;
        let last = (y_max / cell).ceil() as i64;
        for k in first..=last {
            let y = t.y - k as f32 * cell * s;
            self.draw_polyline(&[Point::new(0.0, y), Point::new(w, y)], stroke);
        }
    }

    /// Fills the outline `kurbo::stroke` expands `path` to; `path` is in device pixels.
    fn stroke_path(&mut self, path: &BezPath, stroke: Stroke) {
        let style = kurbo::Stroke::new(f64::from(stroke.width))
            .with_join(Join::Round)
            .with_caps(Cap::Butt);
        let outline = kurbo::stroke(path.iter(), &style, &StrokeOpts::default(), FLATTEN_TOLERANCE);
        self.fill_path(&outline, stroke.color);
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba<u8>) {
        self.fill_segments(&closed_segments(&flatten_to_polylines(path)), color);
    }

    /// Fills the region enclosed by `segments` (device pixels, non-zero winding).
    fn fill_segments(&mut self, segments: &[(Point, Point)], color: Rgba<u8>) {
        let (width, height) = (self.width() as f32, self.height() as f32);
        let clipped: Vec<(Point, Point)> = segments
            .iter()
            .flat_map(|&(a, b)| clip_segment(a, b, width, height))
            .collect();
        let bounds = match BoundingBox::from_points(clipped.iter().flat_map(|&(a, b)| vec![a, b])) {
            Some(bounds) => bounds,
            None => return,
        };
        let outline = Outline {
            bounds: Rect {
                min: ab_point(bounds.x_min, -bounds.y_min),
                max: ab_point(bounds.x_max + 1.0, -(bounds.y_max + 1.0)),
            },
            curves: clipped
                .iter()
                .map(|&(a, b)| OutlineCurve::Line(ab_point(a.x, -a.y), ab_point(b.x, -b.y)))
                .collect(),
        };
        let glyph = Glyph {
            id: GlyphId(0),
            scale: PxScale::from(1.0),
            position: ab_point(0.0, 0.0),
        };
        let scale_factor = PxScaleFactor { horizontal: 1.0, vertical: 1.0 };
        let outlined = OutlinedGlyph::new(glyph, outline, scale_factor);
        let min = outlined.px_bounds().min;
        debug!(
            "Filling {} segments within {:?}",
            clipped.len(),
            outlined.px_bounds()
        );
        let image = &mut self.image;
        outlined.draw(|x, y, c| {
            // As in the module notes: `(x, y)` is relative to the pixel bounds.
            let px = x as i64 + min.x as i64;
            let py = y as i64 + min.y as i64;
            if px >= 0 && py >= 0 && (px as u32) < image.width() && (py as u32) < image.height() {
                blend(image.get_pixel_mut(px as u32, py as u32), color, c);
            }
        });
    }

    /// Copies `other` on top of this canvas with its top-left corner at `(x, y)`.
    pub fn overlay(&mut self, other: &Canvas, x: u32, y: u32) {
        image::imageops::overlay(&mut self.image, &other.image, x, y);
    }
}

/// Source-over compositing of `color` at `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let src_a = f32::from(color[3]) / 255.0 * coverage.max(0.0).min(1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for i in 0..3 {
        let value =
            (f32::from(color[i]) * src_a + f32::from(dst[i]) * dst_a * (1.0 - src_a)) / out_a;
        dst[i] = value.round().max(0.0).min(255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().max(0.0).min(255.0) as u8;
}
