use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use swatchbook::{MassMerge, Palette, Speed};

/// Print the dominant colors of images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of colors to pick
    #[arg(short = 'k', long, default_value_t = swatchbook::DEFAULT_COLORS_TO_PICK)]
    colors: usize,

    /// fast, medium or slow
    #[arg(short, long, default_value_t = Speed::Medium)]
    speed: Speed,

    /// Minimum fraction of the image a color has to cover
    #[arg(long, default_value_t = 0.0)]
    min_coverage: f64,

    /// Minimum distance from white, as a fraction of the largest color distance
    #[arg(long, default_value_t = 0.0)]
    min_white: f64,

    /// Minimum distance from black, as a fraction of the largest color distance
    #[arg(long, default_value_t = 0.0)]
    min_black: f64,

    /// Add the full amount of bundled colors instead of scaling it by distance
    #[arg(long)]
    conserve_mass: bool,

    /// Count the colors of the full resolution image
    #[arg(long)]
    no_downscale: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let merge = if args.conserve_mass {
        MassMerge::Full
    } else {
        MassMerge::DistanceScaled
    };

    for input in &args.inputs {
        let image = swatchbook::image::open(input)
            .with_context(|| format!("failed to open {}", input.display()))?
            .to_rgb8();

        let palette = Palette::from_image(image)
            .colors_to_pick(args.colors)
            .speed(args.speed)
            .min_coverage(args.min_coverage)
            .min_white_distance(args.min_white)
            .min_black_distance(args.min_black)
            .merge(merge)
            .downscale(!args.no_downscale)
            .generate()
            .with_context(|| format!("failed to extract a palette from {}", input.display()))?;

        println!("{}:", input.display());
        for (r, g, b) in palette.colors() {
            println!("  #{r:02x}{g:02x}{b:02x}");
        }
    }

    Ok(())
}
