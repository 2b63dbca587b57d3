//! Getting contours out of a font file.
//!
//! We use the `ttf-parser` crate to parse the font. Its `outline_glyph` does not hand out the raw
//! points of the `glyf` table: it calls an `OutlineBuilder` with move/line/quad commands, where the
//! implied on-curve points have already been made explicit. [`ContourCollector`] turns those calls
//! back into contours of on- and off-curve points, which the rest of the crate treats like the raw
//! ones (they are already interspersed, so interspersing them again changes nothing). To see the
//! points as the font stores them, use [`GlyphOutline::with_implied_points_dropped`].

use log::debug;
use thiserror::Error;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::contour::{drop_implied_on_curve, Contour};
use crate::point::{BoundingBox, ContourPoint};

#[derive(Error, Debug)]
pub enum FontError {
    #[error("could not parse font: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
    #[error("glyph {id} is out of range: the font has {count} glyphs")]
    GlyphOutOfRange { id: u16, count: u16 },
    #[error("glyph {0} has cubic curves, which TrueType contours can't hold (is this a CFF font?)")]
    CubicOutline(u16),
}

/// Everything the viewer needs about one glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphOutline {
    pub id: u16,
    pub name: Option<String>,
    pub contours: Vec<Contour>,
    pub bbox: BoundingBox,
}

impl GlyphOutline {
    /// A glyph whose bounding box is computed from its points (all zero if it has none).
    pub fn from_contours(id: u16, name: Option<String>, contours: Vec<Contour>) -> Self {
        let bbox = contours
            .iter()
            .filter_map(Contour::bounding_box)
            .fold(None, |acc: Option<BoundingBox>, b| {
                Some(acc.map_or(b, |acc| acc.union(&b)))
            })
            .unwrap_or_default();
        GlyphOutline { id, name, contours, bbox }
    }

    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    /// The same glyph with every implied on-curve point removed again.
    pub fn with_implied_points_dropped(mut self) -> Self {
        for contour in &mut self.contours {
            *contour = Contour(drop_implied_on_curve(contour.points()));
        }
        self
    }
}

/// Records `OutlineBuilder` calls as contours.
#[derive(Default, Debug)]
pub struct ContourCollector {
    contours: Vec<Contour>,
    current: Vec<ContourPoint>,
    saw_cubic: bool,
}

impl ContourCollector {
    fn finish_contour(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut points = std::mem::take(&mut self.current);
        // Drawing back to the start point closes the loop; contours are circular already.
        if points.len() > 1 {
            let first = points[0];
            let last = points[points.len() - 1];
            if last.on_curve && last.x == first.x && last.y == first.y {
                points.pop();
            }
        }
        self.contours.push(Contour(points));
    }

    /// The contours seen so far, or `None` if a cubic curve came along.
    pub fn into_contours(mut self) -> Option<Vec<Contour>> {
        self.finish_contour();
        if self.saw_cubic {
            None
        } else {
            Some(self.contours)
        }
    }
}

impl OutlineBuilder for ContourCollector {
    fn move_to(&mut self, x: f32, y: f32) {
        self.finish_contour();
        self.current.push(ContourPoint::on(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current.push(ContourPoint::on(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.current.push(ContourPoint::off(x1, y1));
        self.current.push(ContourPoint::on(x, y));
    }

    fn curve_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _x: f32, _y: f32) {
        self.saw_cubic = true;
    }

    fn close(&mut self) {
        self.finish_contour();
    }
}

/// A parsed font file.
pub struct FontFile<'a> {
    face: Face<'a>,
}

impl<'a> FontFile<'a> {
    pub fn from_slice(data: &'a [u8]) -> Result<Self, FontError> {
        let face = Face::from_slice(data, 0)?;
        Ok(FontFile { face })
    }

    pub fn glyph_count(&self) -> u16 {
        self.face.number_of_glyphs()
    }

    /// The outline of glyph `id`, or `None` if it has none (a space, for instance).
    pub fn glyph(&self, id: u16) -> Result<Option<GlyphOutline>, FontError> {
        let count = self.glyph_count();
        if id >= count {
            return Err(FontError::GlyphOutOfRange { id, count });
        }
        let mut collector = ContourCollector::default();
        let rect = match self.face.outline_glyph(GlyphId(id), &mut collector) {
            Some(rect) => rect,
            None => return Ok(None),
        };
        let contours = collector
            .into_contours()
            .ok_or(FontError::CubicOutline(id))?;
        debug!("Glyph {} has {} contours, bbox {:?}", id, contours.len(), rect);
        Ok(Some(GlyphOutline {
            id,
            name: self.face.glyph_name(GlyphId(id)).map(str::to_string),
            contours,
            bbox: BoundingBox {
                x_min: f32::from(rect.x_min),
                y_min: f32::from(rect.y_min),
                x_max: f32::from(rect.x_max),
                y_max: f32::from(rect.y_max),
            },
        }))
    }

    pub fn glyph_by_name(&self, name: &str) -> Option<u16> {
        (0..self.glyph_count()).find(|&id| self.face.glyph_name(GlyphId(id)) == Some(name))
    }

    pub fn glyph_by_char(&self, c: char) -> Option<u16> {
        self.face.glyph_index(c).map(|glyph_id| glyph_id.0)
    }

    /// Every glyph id in the font, with its outline.
    pub fn glyphs(&self) -> impl Iterator<Item = (u16, Result<Option<GlyphOutline>, FontError>)> + '_ {
        (0..self.glyph_count()).map(move |id| (id, self.glyph(id)))
    }

    /// The glyphs in `ids`, or every glyph of the font when there are none.
    pub fn select_glyphs(
        &self,
        ids: Option<&[u16]>,
    ) -> Vec<(u16, Result<Option<GlyphOutline>, FontError>)> {
        match ids {
            Some(ids) => ids.iter().map(|&id| (id, self.glyph(id))).collect(),
            None => self.glyphs().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::build_glyph_path;

    #[test]
    fn collector_records_contours() {
        let mut collector = ContourCollector::default();
        collector.move_to(0.0, 0.0);
        collector.quad_to(10.0, 10.0, 15.0, 5.0);
        collector.quad_to(20.0, 0.0, 30.0, 10.0);
        collector.line_to(0.0, 0.0);
        collector.close();
        collector.move_to(50.0, 50.0);
        collector.line_to(60.0, 50.0);
        collector.line_to(60.0, 60.0);
        collector.close();
        let contours = collector.into_contours().unwrap();
        assert_eq!(contours.len(), 2);
        assert_eq!(
            contours[0].points(),
            &[
                ContourPoint::on(0.0, 0.0),
                ContourPoint::off(10.0, 10.0),
                ContourPoint::on(15.0, 5.0),
                ContourPoint::off(20.0, 0.0),
                ContourPoint::on(30.0, 10.0),
            ]
        );
        assert_eq!(contours[1].len(), 3);
    }

    #[test]
    fn collected_glyph_recovers_stored_points() {
        let mut collector = ContourCollector::default();
        collector.move_to(0.0, 0.0);
        collector.quad_to(10.0, 10.0, 15.0, 5.0);
        collector.quad_to(20.0, 0.0, 30.0, 10.0);
        collector.close();
        let glyph = GlyphOutline::from_contours(7, None, collector.into_contours().unwrap());
        assert_eq!(glyph.bbox, BoundingBox { x_min: 0.0, y_min: 0.0, x_max: 30.0, y_max: 10.0 });
        let stored = glyph.clone().with_implied_points_dropped();
        assert_eq!(
            stored.contours[0].points(),
            &[
                ContourPoint::on(0.0, 0.0),
                ContourPoint::off(10.0, 10.0),
                ContourPoint::off(20.0, 0.0),
                ContourPoint::on(30.0, 10.0),
            ]
        );
        // Both forms draw the same path.
        assert_eq!(
            build_glyph_path(&glyph.contours).unwrap(),
            build_glyph_path(&stored.contours).unwrap()
        );
    }

    #[test]
    fn glyph_box_spans_all_contours() {
        let a: Contour = vec![ContourPoint::on(0.0, 0.0), ContourPoint::on(10.0, 5.0)].into();
        let b: Contour = vec![ContourPoint::on(-5.0, 20.0), ContourPoint::off(3.0, 30.0)].into();
        let glyph = GlyphOutline::from_contours(1, None, vec![a, Contour::default(), b]);
        assert_eq!(glyph.bbox, BoundingBox { x_min: -5.0, y_min: 0.0, x_max: 10.0, y_max: 30.0 });
        let empty = GlyphOutline::from_contours(2, None, vec![Contour::default()]);
        assert_eq!(empty.bbox, BoundingBox::default());
    }

    #[test]
    fn cubic_curves_are_refused() {
        let mut collector = ContourCollector::default();
        collector.move_to(0.0, 0.0);
        collector.curve_to(1.0, 1.0, 2.0, 1.0, 3.0, 0.0);
        collector.close();
        assert_eq!(collector.into_contours(), None);
    }

    #[test]
    fn garbage_is_not_a_font() {
        let result = FontFile::from_slice(b"definitely not a font");
        assert!(matches!(result, Err(FontError::Parse(_))));
    }
}
