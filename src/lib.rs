//! Turns TrueType glyph contours into drawable paths, and draws them.
//!
//! A TrueType glyph is stored as a list of closed contours, each a circular list of points that are
//! either *on* the outline or *off* it (quadratic Bézier control points). Two off-curve points in a
//! row stand for an implied on-curve point halfway between them, and the wrap-around from the last
//! point to the first counts too. This crate makes those implied points explicit ([`contour`]),
//! emits move/line/quadratic commands from the result ([`path`]), and has the pieces the viewer
//! tools need around that: loading outlines from a font ([`font`]) or a TOML file
//! ([`contours_file`]), camera math ([`transform`]), rasterizing ([`render`]), the zoomable
//! inspector ([`inspect`]) and the thumbnail gallery ([`gallery`]).

pub mod contour;
pub mod contours_file;
pub mod error;
pub mod font;
pub mod gallery;
pub mod inspect;
pub mod path;
pub mod point;
pub mod render;
pub mod transform;

pub use contour::{check_interspersed, drop_implied_on_curve, intersperse, Contour};
pub use error::OutlineError;
pub use font::{FontFile, GlyphOutline};
pub use path::{
    build_contour_path, build_glyph_path, build_glyph_path_lossy, contour_commands, GlyphPath,
    PathCommand, PathSink,
};
pub use point::{BoundingBox, ContourPoint, Point};
