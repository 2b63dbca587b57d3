//! Renders the inspector view of one glyph into a PNG: the filled outline over a grid, every
//! point (on-curve light green, off-curve orange), and the bounding box.
//!
//! The view starts out fitted to the glyph. `--scale`/`--translate` set the camera directly;
//! `--pan` and `--zoom-at` then move it the way dragging and the mouse wheel would. `--hover`
//! prints the tooltip for a cursor position in the final view.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Clap;
use glyph_inspector::contours_file::{is_contours_file, read_glyph};
use glyph_inspector::inspect::Inspector;
use glyph_inspector::{FontFile, GlyphOutline, Point};
use log::info;

/// These are the command-line options the program takes.
#[derive(Clap, Debug)]
struct Opts {
    /// Path to a TTF file, or to a `.toml` file of contours.
    input: PathBuf,
    /// Which glyph of the font to inspect.
    #[clap(short, long, default_value = "0")]
    glyph: u16,
    /// Pick the glyph for this character instead.
    #[clap(long = "char")]
    character: Option<char>,
    /// Pick the glyph with this name instead.
    #[clap(long)]
    name: Option<String>,
    /// Where to write the PNG image.
    #[clap(short, long, default_value = "inspector.png")]
    output: PathBuf,
    #[clap(long, default_value = "650")]
    width: u32,
    #[clap(long, default_value = "480")]
    height: u32,
    /// Pixels per font unit (default: fit the glyph into the view).
    #[clap(long)]
    scale: Option<f32>,
    /// Screen position of the font's origin, as `x,y`.
    #[clap(long, allow_hyphen_values = true)]
    translate: Option<String>,
    /// Drag the view by `dx,dy` pixels.
    #[clap(long, allow_hyphen_values = true)]
    pan: Option<String>,
    /// One mouse-wheel event at `x,y` with wheel delta `delta` (negative zooms in): `x,y,delta`.
    #[clap(long, allow_hyphen_values = true)]
    zoom_at: Option<String>,
    /// Print the tooltip for the cursor at `x,y`.
    #[clap(long, allow_hyphen_values = true)]
    hover: Option<String>,
    /// Show the points as the font stores them, without the on-curve points it leaves implied.
    #[clap(long)]
    raw: bool,
}

/// Parses the comma-separated numbers of `--option`, which must be `count` of them, laid out as
/// `shape` (for the error message).
fn numbers(text: &str, count: usize, option: &str, shape: &str) -> Result<Vec<f32>> {
    let values = text
        .split(',')
        .map(|value| value.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("--{} takes numbers, {}; got {:?}", option, shape, text))?;
    if values.len() != count {
        bail!("--{} takes {} numbers, {}; got {:?}", option, count, shape, text);
    }
    Ok(values)
}

fn point_option(text: &str, option: &str) -> Result<Point> {
    let values = numbers(text, 2, option, "x,y")?;
    Ok(Point::new(values[0], values[1]))
}

fn load_glyph(opts: &Opts) -> Result<GlyphOutline> {
    if is_contours_file(&opts.input) {
        return Ok(read_glyph(&opts.input)?);
    }
    info!("Opening file {}", opts.input.display());
    let font_file_contents = std::fs::read(&opts.input)
        .with_context(|| format!("Failed to read {:?}", opts.input))?;
    let font = FontFile::from_slice(&font_file_contents).with_context(|| "Could not parse font.")?;
    let glyph_id = if let Some(c) = opts.character {
        match font.glyph_by_char(c) {
            Some(id) => id,
            None => bail!("The font has no glyph for {:?}", c),
        }
    } else if let Some(name) = &opts.name {
        match font.glyph_by_name(name) {
            Some(id) => id,
            None => bail!("The font has no glyph named {:?}", name),
        }
    } else {
        opts.glyph
    };
    match font.glyph(glyph_id)? {
        Some(glyph) => Ok(glyph),
        // Nothing to draw, but the bounding box and grid still make a picture.
        None => Ok(GlyphOutline::from_contours(glyph_id, None, Vec::new())),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();
    let mut glyph = load_glyph(&opts)?;
    if opts.raw {
        glyph = glyph.with_implied_points_dropped();
    }
    println!(
        "Glyph {} ({}): {} contours, {} points",
        glyph.id,
        glyph.name.as_deref().unwrap_or("unnamed"),
        glyph.contours.len(),
        glyph.point_count()
    );

    let mut inspector = Inspector::new(glyph);
    inspector.fit_to_view(opts.width as f32, opts.height as f32, 40.0);
    if let Some(scale) = opts.scale {
        if !(scale > 0.0) {
            bail!("--scale must be positive, got {}", scale);
        }
        inspector.camera.scale = scale;
    }
    if let Some(text) = &opts.translate {
        inspector.camera.translation = point_option(text, "translate")?;
    }
    if let Some(text) = &opts.pan {
        inspector.camera.pan(point_option(text, "pan")?);
    }
    if let Some(text) = &opts.zoom_at {
        let values = numbers(text, 3, "zoom-at", "x,y,delta")?;
        inspector
            .camera
            .zoom_at(Point::new(values[0], values[1]), values[2]);
    }
    println!(
        "Camera: scale {}, translation ({}, {})",
        inspector.camera.scale, inspector.camera.translation.x, inspector.camera.translation.y
    );

    let canvas = inspector.render(opts.width, opts.height);
    canvas
        .save(&opts.output)
        .with_context(|| format!("Failed to write to {:?}", opts.output))?;
    println!("Generated: {:#?}", opts.output);

    if let Some(text) = &opts.hover {
        let cursor = point_option(text, "hover")?;
        match inspector.hit_test(cursor) {
            Some(tooltip) => {
                println!(
                    "Tooltip at ({}, {}):",
                    tooltip.position.x, tooltip.position.y
                );
                for (key, value) in &tooltip.entries {
                    println!("  {:>12}  {}", key, value);
                }
            }
            None => println!("Nothing under the cursor at ({}, {}).", cursor.x, cursor.y),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_options_take_two_numbers() {
        assert_eq!(point_option("10,-20.5", "pan").unwrap(), Point::new(10.0, -20.5));
        assert_eq!(point_option(" 3 , 4 ", "hover").unwrap(), Point::new(3.0, 4.0));
        let err = point_option("1,2,3", "hover").unwrap_err();
        assert_eq!(err.to_string(), "--hover takes 2 numbers, x,y; got \"1,2,3\"");
        assert!(point_option("", "translate").is_err());
        assert!(point_option("1,up", "translate").is_err());
    }

    #[test]
    fn zoom_takes_three_numbers() {
        assert_eq!(numbers("30,40,-120", 3, "zoom-at", "x,y,delta").unwrap(), vec![30.0, 40.0, -120.0]);
        assert!(numbers("30,40", 3, "zoom-at", "x,y,delta").is_err());
    }

    #[test]
    fn parses_view_options() {
        let opts = Opts::try_parse_from(&[
            "inspect-glyph",
            "glyph.toml",
            "--pan",
            "-5,3",
            "--zoom-at",
            "30,40,120",
            "-o",
            "out.png",
        ])
        .unwrap();
        assert_eq!(opts.input, PathBuf::from("glyph.toml"));
        assert_eq!(opts.pan.as_deref(), Some("-5,3"));
        assert_eq!(opts.zoom_at.as_deref(), Some("30,40,120"));
        assert_eq!(opts.translate, None);
        assert_eq!(opts.output, PathBuf::from("out.png"));
        assert_eq!(opts.glyph, 0);
        assert_eq!((opts.width, opts.height), (650, 480));
        assert_eq!(opts.scale, None);
        assert!(!opts.raw);
    }
}
