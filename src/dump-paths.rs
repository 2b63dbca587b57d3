//! Prints the contours of glyphs and the path commands that draw them.
//!
//! The input is either a TrueType font file, or a `.toml` file of contours (see
//! `glyph_inspector::contours_file` for the format; `--toml` prints glyphs of a font in that
//! format, which is a handy starting point for writing one).
//!
//! For each contour, three lines: the points (`on(x,y)` / `off(x,y)`), the same points with the
//! implied on-curve points filled in, and the path commands, e.g.
//!
//! ```text
//!   contour 0: on(0,0) off(10,10) off(20,0) on(30,10)
//!     interspersed: on(0,0) off(10,10) on(15,5) off(20,0) on(30,10)
//!     commands: M 0 0 | Q 10 10 15 5 | Q 20 0 30 10 | L 0 0
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Clap;
use glyph_inspector::contours_file::{is_contours_file, read_glyph, to_toml_string};
use glyph_inspector::{build_glyph_path_lossy, contour_commands, intersperse, ContourPoint};
use glyph_inspector::{FontFile, GlyphOutline};
use itertools::Itertools;
use log::{info, warn};

/// These are the command-line options the program takes.
#[derive(Clap, Debug)]
struct Opts {
    /// Path to a TTF file, or to a `.toml` file of contours.
    input: PathBuf,
    /// A comma-separated list of which glyphs to dump (default: all glyphs).
    #[clap(short, long, use_delimiter = true)]
    glyphs: Option<Vec<u16>>,
    /// Show the points as the font stores them, without the on-curve points it leaves implied.
    #[clap(long)]
    raw: bool,
    /// Also print each glyph as SVG path data.
    #[clap(long)]
    svg: bool,
    /// Print each glyph's contours as TOML instead.
    #[clap(long)]
    toml: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();
    if is_contours_file(&opts.input) {
        let glyph = read_glyph(&opts.input)?;
        dump_glyph(prepare(glyph, opts.raw), &opts)?;
        return Ok(());
    }

    info!("Opening file {}", opts.input.display());
    let font_file_contents = std::fs::read(&opts.input)
        .with_context(|| format!("Failed to read {:?}", opts.input))?;
    let font = FontFile::from_slice(&font_file_contents).with_context(|| "Could not parse font.")?;
    println!("This font has {} glyphs.", font.glyph_count());

    for (glyph_id, glyph) in font.select_glyphs(opts.glyphs.as_deref()) {
        match glyph {
            Ok(Some(glyph)) => dump_glyph(prepare(glyph, opts.raw), &opts)?,
            // Spaces and the like have no outline: nothing to print.
            Ok(None) => {}
            Err(err) => warn!("Skipping glyph {}: {}", glyph_id, err),
        }
    }
    Ok(())
}

fn prepare(glyph: GlyphOutline, raw: bool) -> GlyphOutline {
    if raw {
        glyph.with_implied_points_dropped()
    } else {
        glyph
    }
}

fn format_point(point: &ContourPoint) -> String {
    let kind = if point.on_curve { "on" } else { "off" };
    format!("{}({},{})", kind, point.x, point.y)
}

fn dump_glyph(glyph: GlyphOutline, opts: &Opts) -> Result<()> {
    if opts.toml {
        println!("{}", to_toml_string(&glyph)?);
        return Ok(());
    }
    let name = glyph
        .name
        .as_ref()
        .map(|name| format!(" ({})", name))
        .unwrap_or_default();
    println!(
        "Glyph {:3} = {:04X}{}: {} contours, {} points, bbox x {}..{} y {}..{}",
        glyph.id,
        glyph.id,
        name,
        glyph.contours.len(),
        glyph.point_count(),
        glyph.bbox.x_min,
        glyph.bbox.x_max,
        glyph.bbox.y_min,
        glyph.bbox.y_max
    );
    for (i, contour) in glyph.contours.iter().enumerate() {
        println!(
            "  contour {}: {}",
            i,
            contour.points().iter().map(format_point).join(" ")
        );
        let commands = intersperse(contour.points()).and_then(|points| {
            println!(
                "    interspersed: {}",
                points.iter().map(format_point).join(" ")
            );
            contour_commands(&points)
        });
        match commands {
            Ok(commands) => println!("    commands: {}", commands.iter().join(" | ")),
            Err(err) => println!("    skipped: {}", err),
        }
    }
    if opts.svg {
        println!(
            "  svg: {}",
            build_glyph_path_lossy(&glyph.contours).to_svg_path_data()
        );
    }
    Ok(())
}
