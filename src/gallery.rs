//! Thumbnails of many glyphs, for browsing a whole font.

use image::Rgba;
use kurbo::Affine;
use log::debug;

use crate::font::GlyphOutline;
use crate::path::build_glyph_path_lossy;
use crate::point::{BoundingBox, Point};
use crate::render::{Canvas, Paint, Stroke};
use crate::transform::{centering, fit_scale};

pub const THUMBNAIL_SIZE: u32 = 100;
/// Room left around the glyph in a thumbnail, in total along each side.
pub const THUMBNAIL_MARGIN: f32 = 10.0;
/// Space between thumbnails on a contact sheet.
const SHEET_GAP: u32 = 10;

const INK: Rgba<u8> = Rgba([0, 0, 0, 0xff]);
const BORDER: Rgba<u8> = Rgba([0x80, 0x80, 0x80, 0xff]);
const PAPER: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Maps font units into a `size`×`size` thumbnail: the bounding box, scaled to fit within the
/// margin and centered, y pointing up. `None` for an empty bounding box.
pub fn thumbnail_transform(bbox: &BoundingBox, size: u32) -> Option<Affine> {
    let size = size as f32;
    let rect = (bbox.width(), bbox.height());
    let room = size - THUMBNAIL_MARGIN;
    let scale = fit_scale(rect, (room, room))?;
    let offset = centering((rect.0 * scale, rect.1 * scale), (size, size));
    Some(Affine::new([
        f64::from(scale),
        0.0,
        0.0,
        f64::from(-scale),
        f64::from(offset.x - bbox.x_min * scale),
        f64::from(offset.y + bbox.y_max * scale),
    ]))
}

/// One glyph, filled black on a transparent `size`×`size` canvas. Contours that can't be drawn are
/// logged and left out; glyphs with nothing left give an empty canvas.
pub fn render_thumbnail(glyph: &GlyphOutline, size: u32) -> Canvas {
    let mut canvas = Canvas::new(size, size);
    let path = build_glyph_path_lossy(&glyph.contours);
    if path.is_empty() {
        return canvas;
    }
    // A glyph that is a single line has no area to fit; one font unit per pixel will do.
    let transform = thumbnail_transform(&glyph.bbox, size).unwrap_or_else(|| {
        let center = f64::from(size) / 2.0;
        Affine::new([
            1.0,
            0.0,
            0.0,
            -1.0,
            center - f64::from(glyph.bbox.x_min),
            center + f64::from(glyph.bbox.y_min),
        ])
    });
    canvas.set_transform(transform);
    canvas.draw_path(&path, &Paint { fill: Some(INK), stroke: None });
    canvas
}

pub struct Thumbnail {
    pub id: u16,
    pub canvas: Canvas,
}

/// A thumbnail per glyph. A broken contour costs only itself (see [`build_glyph_path_lossy`]), so
/// every glyph gets one.
pub fn render_gallery<'a, I>(glyphs: I, size: u32) -> Vec<Thumbnail>
where
    I: IntoIterator<Item = &'a GlyphOutline>,
{
    glyphs
        .into_iter()
        .map(|glyph| {
            let canvas = render_thumbnail(glyph, size);
            debug!("Rendered thumbnail for glyph {}", glyph.id);
            Thumbnail { id: glyph.id, canvas }
        })
        .collect()
}

/// Lays `thumbnails` out in rows of `columns`, each in a gray frame, on white.
pub fn contact_sheet(thumbnails: &[Thumbnail], columns: u32) -> Canvas {
    let columns = columns.min(thumbnails.len().max(1) as u32).max(1);
    let cell = thumbnails
        .iter()
        .map(|thumbnail| thumbnail.canvas.width().max(thumbnail.canvas.height()))
        .max()
        .unwrap_or(THUMBNAIL_SIZE);
    let rows = (thumbnails.len() as u32 + columns - 1) / columns;
    let step = cell + SHEET_GAP;
    let width = SHEET_GAP + columns * step;
    let height = SHEET_GAP + rows.max(1) * step;
    let mut sheet = Canvas::with_background(width, height, PAPER);
    let frame = Stroke { color: BORDER, width: 1.0 };
    for (i, thumbnail) in thumbnails.iter().enumerate() {
        let x = SHEET_GAP + (i as u32 % columns) * step;
        let y = SHEET_GAP + (i as u32 / columns) * step;
        sheet.overlay(&thumbnail.canvas, x, y);
        let (left, top) = (x as f32 - 0.5, y as f32 - 0.5);
        let (right, bottom) = (left + cell as f32 + 1.0, top + cell as f32 + 1.0);
        sheet.draw_polyline(
            &[
                Point::new(left, top),
                Point::new(right, top),
                Point::new(right, bottom),
                Point::new(left, bottom),
                Point::new(left, top),
            ],
            frame,
        );
    }
    sheet
}
