//! Reads a (TTF) font file, and dumps a thumbnail image of each glyph's outline in it.
//!
//! A TTF font file contains, among other things, a description of the shape of each character (glyph) in the font:
//! contours of points, some on the curve and some off it (control points of quadratic curves).
//! This program turns those contours into paths, fills them, and writes one image per glyph into a directory,
//! plus a contact sheet `gallery.png` with all of them side by side.

use anyhow::{Context, Result};
use clap::Clap;
use glyph_inspector::gallery::{contact_sheet, render_gallery};
use glyph_inspector::FontFile;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// These are the command-line options the program takes.
#[derive(Clap, Debug)]
struct Opts {
    /// Path to the TTF file whose glyphs are to be drawn.
    font_file: PathBuf,
    /// Directory in which to create the images (in a subdirectory named after the font file).
    output_dir: PathBuf,
    /// Width and height in pixels of each generated image.
    #[clap(short, long, default_value = "100")]
    size: u32,
    /// A comma-separated list of which glyphs to dump images for (default: all glyphs).
    #[clap(short, long, use_delimiter = true)]
    glyphs: Option<Vec<u16>>,
    /// How many thumbnails go in each row of the contact sheet.
    #[clap(short, long, default_value = "16")]
    columns: u32,
}

/// As mentioned above: This program reads a font file, and dumps images into a directory.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();
    info!("Opening file {}", opts.font_file.display());
    let font_file_contents = std::fs::read(&opts.font_file)
        .with_context(|| format!("Failed to read {:?}", opts.font_file))?;
    let font_file_name = opts
        .font_file
        .file_name()
        .with_context(|| format!("{:?} does not name a file", opts.font_file))?;
    let output_dir = Path::new(&opts.output_dir).join(font_file_name);
    dump_glyphs(&font_file_contents, &output_dir, &opts)
}

/// Parses `font_file_contents` as a font, and dumps its glyphs into `output_dir`.
///
/// Each glyph is scaled to fit its own `size`×`size` image, so unlike glyphs set in a line of text
/// they do not share a baseline: the point is to see each shape clearly.
fn dump_glyphs(font_file_contents: &[u8], output_dir: &Path, opts: &Opts) -> Result<()> {
    let font = FontFile::from_slice(font_file_contents).with_context(|| "Could not parse font.")?;
    println!("This font has {} glyphs.", font.glyph_count());

    // First pass: collect the outlines.
    let mut glyphs = Vec::new();
    for (glyph_id, glyph) in font.select_glyphs(opts.glyphs.as_deref()) {
        match glyph {
            Ok(Some(glyph)) => {
                println!(
                    "Glyph {:3} = {:04X}: {} contours, bbox x {}..{} y {}..{}",
                    glyph_id,
                    glyph_id,
                    glyph.contours.len(),
                    glyph.bbox.x_min,
                    glyph.bbox.x_max,
                    glyph.bbox.y_min,
                    glyph.bbox.y_max
                );
                glyphs.push(glyph);
            }
            // Spaces and missing glyphs have no outline; not worth logging.
            Ok(None) => {}
            Err(err) => warn!("Skipping glyph {}: {}", glyph_id, err),
        }
    }

    // Second pass: draw them.
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {:?}", output_dir))?;
    let thumbnails = render_gallery(&glyphs, opts.size);
    for thumbnail in &thumbnails {
        let output_filename = output_dir.join(format!("glyph-{:04X}.png", thumbnail.id));
        thumbnail
            .canvas
            .save(&output_filename)
            .with_context(|| format!("Failed to write to {:?}", output_filename))?;
        println!(
            "For glyph {:3}, generated {:#?}.",
            thumbnail.id, output_filename
        );
    }

    let output_filename = output_dir.join("gallery.png");
    contact_sheet(&thumbnails, opts.columns)
        .save(&output_filename)
        .with_context(|| format!("Failed to write to {:?}", output_filename))?;
    println!(
        "Generated {:#?} with {} glyphs.",
        output_filename,
        thumbnails.len()
    );
    Ok(())
}
