//! Path commands: the renderer-independent form of a glyph outline.

use std::fmt::Write;

use log::warn;

use crate::contour::{intersperse, Contour};
use crate::error::OutlineError;
use crate::point::{ContourPoint, Point};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo { control: Point, end: Point },
}

impl PathCommand {
    /// Where the pen is after this command.
    pub fn end_point(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::QuadTo { end, .. } => end,
        }
    }
}

impl std::fmt::Display for PathCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y),
            PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            PathCommand::QuadTo { control, end } => {
                write!(f, "Q {} {} {} {}", control.x, control.y, end.x, end.y)
            }
        }
    }
}

/// Anything that can draw a path: a canvas, an SVG writer, a recorder in a test...
///
/// Each contour is a `move_to`, some `line_to`/`quad_to` calls, and a `close`.
pub trait PathSink {
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32);
    fn close(&mut self);
}

/// Emits the commands for one interspersed contour (see [`intersperse`]).
///
/// Starts with a `MoveTo` to the first point, then walks the points circularly from index 1 up to
/// and including index `len`, so the last segment ends back at the first point. An on-curve point
/// gives a `LineTo`; an off-curve point is the control of a `QuadTo` that ends at the next point.
pub fn contour_commands(points: &[ContourPoint]) -> Result<Vec<PathCommand>, OutlineError> {
    let first = points.first().ok_or(OutlineError::EmptyContour)?;
    if !first.on_curve {
        return Err(OutlineError::MalformedContour { index: 0 });
    }
    let n = points.len();
    let mut commands = Vec::with_capacity(n + 1);
    commands.push(PathCommand::MoveTo(first.position()));
    let mut i = 1;
    while i <= n {
        let point = &points[i % n];
        if point.on_curve {
            commands.push(PathCommand::LineTo(point.position()));
            i += 1;
        } else {
            let end = &points[(i + 1) % n];
            if !end.on_curve {
                return Err(OutlineError::MalformedContour { index: i % n });
            }
            commands.push(PathCommand::QuadTo {
                control: point.position(),
                end: end.position(),
            });
            i += 2;
        }
    }
    Ok(commands)
}

/// Commands for one raw contour, as stored in a font.
pub fn build_contour_path(contour: &[ContourPoint]) -> Result<Vec<PathCommand>, OutlineError> {
    contour_commands(&intersperse(contour)?)
}

/// The outline of a whole glyph: one group of commands per contour, each starting with `MoveTo`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphPath {
    groups: Vec<Vec<PathCommand>>,
}

/// Builds every contour of a glyph, failing on the first contour that can't be built.
pub fn build_glyph_path(contours: &[Contour]) -> Result<GlyphPath, OutlineError> {
    let groups = contours
        .iter()
        .map(|contour| build_contour_path(contour.points()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(GlyphPath { groups })
}

/// Builds every contour that can be built, logging and skipping the rest.
pub fn build_glyph_path_lossy(contours: &[Contour]) -> GlyphPath {
    let groups = contours
        .iter()
        .enumerate()
        .filter_map(|(i, contour)| match build_contour_path(contour.points()) {
            Ok(commands) => Some(commands),
            Err(err) => {
                warn!("Skipping contour {}: {}", i, err);
                None
            }
        })
        .collect();
    GlyphPath { groups }
}

impl GlyphPath {
    pub fn groups(&self) -> &[Vec<PathCommand>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Feeds the commands to `sink`, closing each contour.
    pub fn replay<S: PathSink + ?Sized>(&self, sink: &mut S) {
        for group in &self.groups {
            for command in group {
                match *command {
                    PathCommand::MoveTo(p) => sink.move_to(p.x, p.y),
                    PathCommand::LineTo(p) => sink.line_to(p.x, p.y),
                    PathCommand::QuadTo { control, end } => {
                        sink.quad_to(control.x, control.y, end.x, end.y)
                    }
                }
            }
            sink.close();
        }
    }

    /// The path as SVG path data, e.g. `M0 0 Q10 10 15 5 L0 0 Z`.
    pub fn to_svg_path_data(&self) -> String {
        let mut sink = SvgPathSink::default();
        self.replay(&mut sink);
        sink.data.trim_end().to_string()
    }
}

#[derive(Default)]
struct SvgPathSink {
    data: String,
}

impl PathSink for SvgPathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let _ = write!(self.data, "M{} {} ", x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let _ = write!(self.data, "L{} {} ", x, y);
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let _ = write!(self.data, "Q{} {} {} {} ", cx, cy, x, y);
    }

    fn close(&mut self) {
        self.data.push_str("Z ");
    }
}
