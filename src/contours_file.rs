//! Glyph contours written out by hand (or by `dump-paths --toml`), as TOML:
//!
//! ```toml
//! id = 3
//! name = "example"
//!
//! [bbox]            # optional: computed from the points when missing
//! x_min = 0
//! y_min = 0
//! x_max = 30
//! y_max = 10
//!
//! [[contours]]
//! points = [
//!     { x = 0, y = 0, on_curve = true },
//!     { x = 10, y = 10, on_curve = false },
//!     { x = 20, y = 0, on_curve = false },
//!     { x = 30, y = 10, on_curve = true },
//! ]
//! ```

use std::path::{Path, PathBuf};

use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

use crate::contour::Contour;
use crate::font::GlyphOutline;
use crate::point::{BoundingBox, ContourPoint};

#[derive(Error, Debug)]
pub enum ContoursFileError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse contours: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("could not write contours: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Deserialize, Serialize, Debug)]
struct GlyphRecord {
    #[serde(default)]
    id: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bbox: Option<BoundingBox>,
    #[serde(default)]
    contours: Vec<ContourRecord>,
}

#[derive(Deserialize, Serialize, Debug)]
struct ContourRecord {
    points: Vec<ContourPoint>,
}

/// Whether `path` names a contours file rather than a font: anything ending in `.toml`.
pub fn is_contours_file(path: &Path) -> bool {
    path.extension()
        .map_or(false, |extension| extension.eq_ignore_ascii_case("toml"))
}

pub fn parse_glyph(text: &str) -> Result<GlyphOutline, ContoursFileError> {
    let record: GlyphRecord = toml::from_str(text)?;
    let contours: Vec<Contour> = record
        .contours
        .into_iter()
        .map(|contour| Contour(contour.points))
        .collect();
    let mut glyph = GlyphOutline::from_contours(record.id, record.name, contours);
    if let Some(bbox) = record.bbox {
        glyph.bbox = bbox;
    }
    Ok(glyph)
}

pub fn read_glyph(path: &Path) -> Result<GlyphOutline, ContoursFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| ContoursFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_glyph(&text)
}

pub fn to_toml_string(glyph: &GlyphOutline) -> Result<String, ContoursFileError> {
    let record = GlyphRecord {
        id: glyph.id,
        name: glyph.name.clone(),
        bbox: Some(glyph.bbox),
        contours: glyph
            .contours
            .iter()
            .map(|contour| ContourRecord { points: contour.points().to_vec() })
            .collect(),
    };
    Ok(toml::to_string(&record)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
        id = 3
        name = "example"

        [[contours]]
        points = [
            { x = 0, y = 0, on_curve = true },
            { x = 10, y = 10, on_curve = false },
            { x = 20, y = 0, on_curve = false },
            { x = 30, y = 10, on_curve = true },
        ]

        [[contours]]
        points = [{ x = 5.5, y = -2, on_curve = true }]
    "#;

    #[test]
    fn parses_contours_and_computes_bbox() {
        let glyph = parse_glyph(EXAMPLE).unwrap();
        assert_eq!(glyph.id, 3);
        assert_eq!(glyph.name.as_deref(), Some("example"));
        assert_eq!(glyph.contours.len(), 2);
        assert_eq!(glyph.contours[0].points()[1], ContourPoint::off(10.0, 10.0));
        assert_eq!(glyph.contours[1].points(), &[ContourPoint::on(5.5, -2.0)]);
        assert_eq!(
            glyph.bbox,
            BoundingBox { x_min: 0.0, y_min: -2.0, x_max: 30.0, y_max: 10.0 }
        );
    }

    #[test]
    fn explicit_bbox_wins() {
        let text = r#"
            [bbox]
            x_min = -1
            y_min = -1
            x_max = 1
            y_max = 1

            [[contours]]
            points = [{ x = 0, y = 0, on_curve = true }]
        "#;
        let glyph = parse_glyph(text).unwrap();
        assert_eq!(glyph.bbox.x_min, -1.0);
        assert_eq!(glyph.id, 0);
        assert_eq!(glyph.name, None);
    }

    #[test]
    fn written_glyph_reads_back() {
        let glyph = parse_glyph(EXAMPLE).unwrap();
        let text = to_toml_string(&glyph).unwrap();
        assert_eq!(parse_glyph(&text).unwrap(), glyph);
    }

    #[test]
    fn toml_files_are_told_apart_from_fonts() {
        assert!(is_contours_file(Path::new("glyphs/a.toml")));
        assert!(is_contours_file(Path::new("A.TOML")));
        assert!(!is_contours_file(Path::new("font.ttf")));
        assert!(!is_contours_file(Path::new("toml")));
        assert!(!is_contours_file(Path::new("a.toml.ttf")));
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(matches!(
            parse_glyph("[[contours]]\npoints = [{ x = 0 }]"),
            Err(ContoursFileError::Toml(_))
        ));
        assert!(matches!(
            read_glyph(Path::new("/nonexistent/glyph.toml")),
            Err(ContoursFileError::Io { .. })
        ));
    }
}
