// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A library to extract a small set of dominant colors from an image.
//!
//! The colors of an image are counted exactly, colors covering too little of the image or sitting too close to pure
//! white or black are dropped, and the remaining colors closer to each other than their average distance are bundled
//! together. Every surviving color is then scored by how much of the image it covers and how much it stands out from
//! the rest, and the best scoring colors make up the palette.
//!
//! ```no_run
//! use swatchbook::{ExtremityFilter, Palette, Speed};
//!
//! let image = swatchbook::image::open("cover.jpg").unwrap().to_rgb8();
//! let palette = Palette::from_image(image)
//!     .colors_to_pick(5)
//!     .speed(Speed::Slow)
//!     // any Filter can be added on top of the configured limits
//!     .add_filter(ExtremityFilter::new(0.05, 0.05))
//!     .generate()
//!     .unwrap();
//!
//! for (r, g, b) in palette.colors() {
//!     println!("#{r:02x}{g:02x}{b:02x}");
//! }
//! ```

mod bundler;
mod config;
mod error;
mod filter;
mod histogram;
mod scorer;
mod swatch;

/// The largest possible Euclidean distance between two colors in RGB space, from black to white.
pub const MAX_COLOR_DISTANCE: f64 = 441.672_955_930_063_7;

pub use crate::{
    bundler::{average_distance, bundle},
    config::{Config, MassMerge, Speed, DEFAULT_COLORS_TO_PICK, MAX_COLORS_TO_PICK},
    error::{Error, Result, Stage},
    filter::{retain_allowed, retain_coverage, ExtremityFilter, Filter},
    histogram::Histogram,
    scorer::{centroid, score},
    swatch::Swatch,
};
pub use image;
pub use palette;

use image::ImageBuffer;
use log::debug;
use palette::IntoColor;

/// The dominant colors of an image, ordered from the best scoring to the worst.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    swatches: Vec<Swatch>,
}

pub struct PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>,
    config: Config,
    downscale: bool,
    filters: Vec<Box<dyn Filter>>,
}

impl Palette {
    pub fn from_image<P>(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> PaletteBuilder<P>
    where
        P: image::Pixel<Subpixel = u8> + 'static,
    {
        PaletteBuilder::from_image(image)
    }

    /// Extract a palette from pixels that are already at their final resolution.
    pub fn from_pixels<I>(pixels: I, config: &Config) -> Result<Palette>
    where
        I: IntoIterator<Item = (u8, u8, u8)>,
    {
        extract(pixels, config, &[])
    }

    /// The palette's colors, best scoring first.
    pub fn colors(&self) -> Vec<(u8, u8, u8)> {
        self.swatches.iter().map(|swatch| swatch.rgb()).collect()
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// The best scoring color.
    pub fn dominant_color(&self) -> Option<(u8, u8, u8)> {
        self.swatches.first().map(|swatch| swatch.rgb())
    }

    /// The color with the largest amount, which is not necessarily the best scoring one.
    pub fn most_prominent_color(&self) -> Option<(u8, u8, u8)> {
        self.swatches
            .iter()
            .max_by(|lhs, rhs| lhs.amount().total_cmp(&rhs.amount()))
            .map(|swatch| swatch.rgb())
    }
}

impl<P> PaletteBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    pub fn from_image(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> Self {
        Self {
            image,
            config: Config::default(),
            downscale: true,
            filters: Vec::new(),
        }
    }

    pub fn config(self, config: Config) -> Self {
        Self { config, ..self }
    }

    pub fn colors_to_pick(mut self, colors_to_pick: usize) -> Self {
        self.config.colors_to_pick = colors_to_pick;
        self
    }

    pub fn min_coverage(mut self, min_coverage: f64) -> Self {
        self.config.min_coverage = min_coverage;
        self
    }

    pub fn min_white_distance(mut self, min_white_distance: f64) -> Self {
        self.config.min_white_distance = min_white_distance;
        self
    }

    pub fn min_black_distance(mut self, min_black_distance: f64) -> Self {
        self.config.min_black_distance = min_black_distance;
        self
    }

    pub fn speed(mut self, speed: Speed) -> Self {
        self.config.speed = speed;
        self
    }

    pub fn merge(mut self, merge: MassMerge) -> Self {
        self.config.merge = merge;
        self
    }

    /// Whether to shrink the image by the speed's scale factor before counting its colors. Enabled by default.
    pub fn downscale(self, downscale: bool) -> Self {
        Self { downscale, ..self }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn clear_filters(self) -> Self {
        Self {
            filters: Vec::new(),
            ..self
        }
    }

    pub fn generate(mut self) -> Result<Palette> {
        // fail before spending any time on resizing
        self.config.validate()?;

        if self.downscale {
            self.scale_image_down();
        }

        let pixels = self.image.pixels().map(pixel_to_rgb);
        run_pipeline(pixels, &self.config, &self.filters)
    }

    fn scale_image_down(&mut self) {
        let (width, height) = self.image.dimensions();
        let scale = self.config.speed.scale();

        let new_width = ((width as f32 * scale).ceil() as u32).max(1);
        let new_height = ((height as f32 * scale).ceil() as u32).max(1);

        if width == 0 || height == 0 || (new_width, new_height) == (width, height) {
            return;
        }

        debug!("Scaling image down from {width}x{height} to {new_width}x{new_height}");

        // nearest neighbour keeps every remaining pixel an exact color from the original image
        self.image = image::imageops::resize(&self.image, new_width, new_height, image::imageops::FilterType::Nearest);
    }
}

/// Sort swatches by descending score and keep at most `colors_to_pick` of them.
///
/// Never pads: with fewer swatches than requested, all of them are kept. Equal scores keep their incoming order.
pub fn finalize(mut swatches: Vec<Swatch>, colors_to_pick: usize) -> Vec<Swatch> {
    swatches.sort_by(|lhs, rhs| rhs.score().total_cmp(&lhs.score()));
    swatches.truncate(colors_to_pick);
    swatches
}

/// Euclidean distance between two colors in RGB space.
pub fn distance(lhs: (u8, u8, u8), rhs: (u8, u8, u8)) -> f64 {
    distance_to_point(lhs, (rhs.0 as f64, rhs.1 as f64, rhs.2 as f64))
}

pub(crate) fn distance_to_point((r, g, b): (u8, u8, u8), (x, y, z): (f64, f64, f64)) -> f64 {
    let dr = r as f64 - x;
    let dg = g as f64 - y;
    let db = b as f64 - z;

    (dr * dr + dg * dg + db * db).sqrt()
}

fn extract<I>(pixels: I, config: &Config, filters: &[Box<dyn Filter>]) -> Result<Palette>
where
    I: IntoIterator<Item = (u8, u8, u8)>,
{
    config.validate()?;
    run_pipeline(pixels, config, filters)
}

// expects an already validated config
fn run_pipeline<I>(pixels: I, config: &Config, filters: &[Box<dyn Filter>]) -> Result<Palette>
where
    I: IntoIterator<Item = (u8, u8, u8)>,
{
    let histogram = Histogram::from_pixels(pixels);
    let total_pixels = histogram.total_pixels();
    debug!("Counted {} distinct colors in {total_pixels} pixels", histogram.distinct_colors());

    let swatches = retain_coverage(histogram.into_swatches(), config.min_coverage, total_pixels);
    debug!("{} colors above minimum coverage {}", swatches.len(), config.min_coverage);

    let swatches = ExtremityFilter::new(config.min_white_distance, config.min_black_distance).apply(swatches);
    let swatches = retain_allowed(swatches, filters);
    debug!("{} colors left after filtering", swatches.len());

    let swatches = bundle(swatches, config.speed.stride(), config.merge)?;
    debug!(
        "{} colors left after bundling, total amount {:.3}",
        swatches.len(),
        swatches.iter().map(|swatch| swatch.amount()).sum::<f64>()
    );

    let swatches = score(swatches)?;
    let swatches = finalize(swatches, config.colors_to_pick);
    debug!("Picked {} colors", swatches.len());

    Ok(Palette { swatches })
}

fn pixel_to_rgb<P>(pixel: &P) -> (u8, u8, u8)
where
    P: image::Pixel<Subpixel = u8>,
{
    let rgb = pixel.to_rgb();
    (rgb.0[0], rgb.0[1], rgb.0[2])
}

fn rgb_to_hsl(rgb: (u8, u8, u8)) -> (f32, f32, f32) {
    let raw = palette::Srgb::from_components(rgb);
    let raw_float: palette::Srgb<f32> = raw.into_format();
    let hsl: palette::Hsl = raw_float.into_color();
    let (h, s, l) = hsl.into_components();

    (h.into_positive_degrees(), s, l)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let colors = [(0, 0, 0), (255, 255, 255), (12, 200, 99), (255, 0, 1)];

        for lhs in colors {
            assert_eq!(distance(lhs, lhs), 0.0);

            for rhs in colors {
                assert_eq!(distance(lhs, rhs), distance(rhs, lhs));
            }
        }
    }

    #[test]
    fn max_distance_is_black_to_white() {
        assert!((distance((0, 0, 0), (255, 255, 255)) - MAX_COLOR_DISTANCE).abs() < 1e-9);
        assert_eq!(distance((0, 0, 0), (3, 4, 0)), 5.0);
    }

    fn scored(colors: &[((u8, u8, u8), f64)]) -> Vec<Swatch> {
        colors
            .iter()
            .map(|&(rgb, score)| {
                let mut swatch = Swatch::new(rgb, 1.0);
                swatch.set_score(score);
                swatch
            })
            .collect()
    }

    #[test]
    fn finalize_sorts_and_truncates() {
        let input = scored(&[((1, 1, 1), 0.5), ((2, 2, 2), 3.0), ((3, 3, 3), -1.0), ((4, 4, 4), 1.5)]);
        let output = finalize(input, 3);

        let colors = output.iter().map(|s| s.rgb()).collect::<Vec<_>>();
        assert_eq!(colors, vec![(2, 2, 2), (4, 4, 4), (1, 1, 1)]);
    }

    #[test]
    fn finalize_never_pads() {
        let input = scored(&[((1, 1, 1), 0.5), ((2, 2, 2), 3.0)]);
        assert_eq!(finalize(input, 10).len(), 2);
    }

    #[test]
    fn finalize_is_idempotent() {
        let input = scored(&[((1, 1, 1), 0.5), ((2, 2, 2), 3.0), ((3, 3, 3), 3.0), ((4, 4, 4), 1.5)]);
        let once = finalize(input, 3);
        let twice = finalize(once.clone(), 3);

        assert_eq!(once, twice);
    }

    #[test]
    fn hsl_of_primaries() {
        let (h, s, l) = rgb_to_hsl((255, 0, 0));
        assert!(h.abs() < 1e-3 && (s - 1.0).abs() < 1e-3 && (l - 0.5).abs() < 1e-3);

        let (_, s, l) = rgb_to_hsl((255, 255, 255));
        assert!(s.abs() < 1e-3 && (l - 1.0).abs() < 1e-3);
    }
}
