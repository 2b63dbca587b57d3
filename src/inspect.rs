//! The glyph inspector: a pannable, zoomable view of one glyph with its points and bounding box,
//! and tooltips for whatever is under the cursor.

use image::Rgba;
use kurbo::Affine;

use crate::font::GlyphOutline;
use crate::path::build_glyph_path_lossy;
use crate::point::{ContourPoint, Point};
use crate::render::{point_radius_for_scale, stroke_width_for_scale, Canvas, Paint, Stroke};
use crate::transform::{centering, fit_scale, transform_contour, Camera};

const GLYPH_FILL: Rgba<u8> = Rgba([0x7e, 0xb3, 0x34, 0xff]);
const GLYPH_STROKE: Rgba<u8> = Rgba([0x4a, 0x46, 0x44, 0xff]);
const ON_CURVE: Rgba<u8> = Rgba([0xa6, 0xe6, 0x6e, 0xff]);
const OFF_CURVE: Rgba<u8> = Rgba([0xcf, 0x50, 0x06, 0xff]);
const POLYLINE: Rgba<u8> = Rgba([0x20, 0x20, 0x20, 0xa0]);
const BOUNDING_BOX: Rgba<u8> = Rgba([0x3a, 0x6e, 0xc8, 0xff]);
const BACKGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Bounding-box edges are drawn this many pixels thick, and hovered within half of it.
const EDGE_THICKNESS: f32 = 3.0;

/// A point of the glyph, numbered across all contours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointInfo {
    pub index: usize,
    pub contour_index: usize,
    pub point: ContourPoint,
}

/// What to show next to the cursor: a screen position and a small key/value table.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub position: Point,
    pub entries: Vec<(String, String)>,
}

impl Tooltip {
    fn new(position: Point, entries: &[(&str, String)]) -> Self {
        Tooltip {
            position,
            entries: entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        }
    }
}

pub struct Inspector {
    glyph: GlyphOutline,
    pub camera: Camera,
}

impl Inspector {
    pub fn new(glyph: GlyphOutline) -> Self {
        Inspector { glyph, camera: Camera::default() }
    }

    pub fn glyph(&self) -> &GlyphOutline {
        &self.glyph
    }

    /// Points the camera so the bounding box fills a `width`×`height` view, less `margin` pixels
    /// on each side, and sits in its middle.
    pub fn fit_to_view(&mut self, width: f32, height: f32, margin: f32) {
        let bbox = self.glyph.bbox;
        let size = (bbox.width(), bbox.height());
        let scale = fit_scale(size, (width - 2.0 * margin, height - 2.0 * margin)).unwrap_or(1.0);
        let offset = centering((size.0 * scale, size.1 * scale), (width, height));
        self.camera = Camera::new(
            scale,
            Point::new(
                offset.x - bbox.x_min * scale,
                offset.y + bbox.y_max * scale,
            ),
        );
    }

    pub fn points(&self) -> Vec<PointInfo> {
        self.glyph
            .contours
            .iter()
            .enumerate()
            .flat_map(|(contour_index, contour)| {
                contour.points().iter().map(move |&point| (contour_index, point))
            })
            .enumerate()
            .map(|(index, (contour_index, point))| PointInfo { index, contour_index, point })
            .collect()
    }

    /// The tooltip for the cursor at `cursor` (screen pixels), if it is over a point or an edge
    /// of the bounding box. Points win over edges; of several points, the nearest wins.
    pub fn hit_test(&self, cursor: Point) -> Option<Tooltip> {
        self.point_under(cursor).or_else(|| self.edge_under(cursor))
    }

    fn point_under(&self, cursor: Point) -> Option<Tooltip> {
        let radius = point_radius_for_scale(self.camera.scale);
        let (info, screen, _) = self
            .points()
            .into_iter()
            .map(|info| {
                let screen = self.camera.to_screen(info.point.position());
                (info, screen, screen.distance(cursor))
            })
            .filter(|&(_, _, distance)| distance <= radius)
            .fold(None, |best: Option<(PointInfo, Point, f32)>, candidate| match best {
                Some(best) if best.2 < candidate.2 => Some(best),
                _ => Some(candidate),
            })?;
        Some(Tooltip::new(
            screen,
            &[
                ("x", info.point.x.to_string()),
                ("y", info.point.y.to_string()),
                ("index", info.index.to_string()),
                ("contourIndex", info.contour_index.to_string()),
                ("onCurve", info.point.on_curve.to_string()),
            ],
        ))
    }

    fn edge_under(&self, cursor: Point) -> Option<Tooltip> {
        let bbox = self.glyph.bbox;
        let bottom_left = self.camera.to_screen(Point::new(bbox.x_min, bbox.y_min));
        let top_right = self.camera.to_screen(Point::new(bbox.x_max, bbox.y_max));
        let half = EDGE_THICKNESS / 2.0;
        let within_x = cursor.x >= bottom_left.x && cursor.x <= top_right.x;
        let within_y = cursor.y >= top_right.y && cursor.y <= bottom_left.y;
        if within_x && (cursor.y - bottom_left.y).abs() <= half {
            Some(Tooltip::new(
                Point::new(cursor.x, bottom_left.y),
                &[("yMin", bbox.y_min.to_string())],
            ))
        } else if within_x && (cursor.y - top_right.y).abs() <= half {
            Some(Tooltip::new(
                Point::new(cursor.x, top_right.y),
                &[("yMax", bbox.y_max.to_string())],
            ))
        } else if within_y && (cursor.x - bottom_left.x).abs() <= half {
            Some(Tooltip::new(
                Point::new(bottom_left.x, cursor.y),
                &[("xMin", bbox.x_min.to_string())],
            ))
        } else if within_y && (cursor.x - top_right.x).abs() <= half {
            Some(Tooltip::new(
                Point::new(top_right.x, cursor.y),
                &[("xMax", bbox.x_max.to_string())],
            ))
        } else {
            None
        }
    }

    /// Draws the view: grid, the glyph filled and outlined, each contour's points joined in order,
    /// the bounding box, and a disc per point (light green on-curve, orange off-curve).
    pub fn render(&self, width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::with_background(width, height, BACKGROUND);
        canvas.draw_grid(&self.camera);

        let path = build_glyph_path_lossy(&self.glyph.contours);
        canvas.set_transform(self.camera.matrix());
        canvas.draw_path(
            &path,
            &Paint {
                fill: Some(GLYPH_FILL),
                stroke: Some(Stroke {
                    color: GLYPH_STROKE,
                    width: stroke_width_for_scale(self.camera.scale),
                }),
            },
        );
        canvas.set_transform(Affine::IDENTITY);

        let thin = Stroke { color: POLYLINE, width: 1.0 };
        for contour in &self.glyph.contours {
            let mut screen: Vec<Point> = transform_contour(self.camera.matrix(), contour.points())
                .points()
                .iter()
                .map(ContourPoint::position)
                .collect();
            if let Some(&first) = screen.first() {
                screen.push(first);
            }
            canvas.draw_polyline(&screen, thin);
        }

        let bbox = self.glyph.bbox;
        let corners = [
            Point::new(bbox.x_min, bbox.y_min),
            Point::new(bbox.x_max, bbox.y_min),
            Point::new(bbox.x_max, bbox.y_max),
            Point::new(bbox.x_min, bbox.y_max),
        ];
        let edge = Stroke { color: BOUNDING_BOX, width: EDGE_THICKNESS };
        for i in 0..corners.len() {
            let a = self.camera.to_screen(corners[i]);
            let b = self.camera.to_screen(corners[(i + 1) % corners.len()]);
            canvas.draw_polyline(&[a, b], edge);
        }

        let radius = point_radius_for_scale(self.camera.scale);
        for info in self.points() {
            let color = if info.point.on_curve { ON_CURVE } else { OFF_CURVE };
            canvas.draw_disc(self.camera.to_screen(info.point.position()), radius, color);
        }
        canvas
    }
}
