use crate::{distance, swatch::Swatch, MAX_COLOR_DISTANCE};

const WHITE: (u8, u8, u8) = (255, 255, 255);
const BLACK: (u8, u8, u8) = (0, 0, 0);

/// A trait used to implement filters for the palette extraction process.
///
/// Filters run on the distinct colors of an image after the coverage filter and before bundling, removing colors
/// from any further consideration. This trait allows the library consumer to implement custom filters.
///
/// See [`crate::PaletteBuilder::add_filter`] on how to add filters to the extraction process.
pub trait Filter {
    /// Return whether a given color should be allowed or not. The same color is given in both sRGB
    /// and HSL for convenience.
    fn is_allowed(&self, rgb: (u8, u8, u8), hsl: (f32, f32, f32)) -> bool;
}

/// Removes colors too close to pure white or pure black.
///
/// Both limits are fractions of the largest possible distance in RGB space. A color is allowed only when it is
/// strictly further away from white and from black than the respective limit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtremityFilter {
    min_white_distance: f64,
    min_black_distance: f64,
}

impl ExtremityFilter {
    pub fn new(min_white_distance: f64, min_black_distance: f64) -> Self {
        Self {
            min_white_distance,
            min_black_distance,
        }
    }

    /// A filter with both limits at zero lets every color through untouched.
    pub fn is_noop(&self) -> bool {
        self.min_white_distance == 0.0 && self.min_black_distance == 0.0
    }

    pub fn apply(&self, swatches: Vec<Swatch>) -> Vec<Swatch> {
        if self.is_noop() {
            return swatches;
        }

        swatches
            .into_iter()
            .filter(|swatch| self.allows(swatch.rgb()))
            .collect()
    }

    fn allows(&self, rgb: (u8, u8, u8)) -> bool {
        distance(rgb, WHITE) > self.min_white_distance * MAX_COLOR_DISTANCE
            && distance(rgb, BLACK) > self.min_black_distance * MAX_COLOR_DISTANCE
    }
}

impl Filter for ExtremityFilter {
    fn is_allowed(&self, rgb: (u8, u8, u8), _: (f32, f32, f32)) -> bool {
        self.is_noop() || self.allows(rgb)
    }
}

/// Drop every swatch whose amount is below `min_coverage` of `total_pixels`.
///
/// `total_pixels` is the pixel count of the whole image as counted by the histogram, not the sum of the swatches
/// still remaining, so the cut-off does not move depending on what earlier stages removed.
pub fn retain_coverage(mut swatches: Vec<Swatch>, min_coverage: f64, total_pixels: u64) -> Vec<Swatch> {
    let min_amount = min_coverage * total_pixels as f64;
    swatches.retain(|swatch| swatch.amount() >= min_amount);
    swatches
}

/// Drop every swatch rejected by any of the given filters.
pub fn retain_allowed(mut swatches: Vec<Swatch>, filters: &[Box<dyn Filter>]) -> Vec<Swatch> {
    if filters.is_empty() {
        return swatches;
    }

    swatches.retain(|swatch| {
        let hsl = swatch.hsl();
        filters.iter().all(|filter| filter.is_allowed(swatch.rgb(), hsl))
    });
    swatches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swatches(colors: &[((u8, u8, u8), f64)]) -> Vec<Swatch> {
        colors.iter().map(|&(rgb, amount)| Swatch::new(rgb, amount)).collect()
    }

    #[test]
    fn noop_extremity_filter_passes_everything_through() {
        let input = swatches(&[((0, 0, 0), 4.0), ((255, 255, 255), 2.0), ((12, 200, 7), 1.0)]);
        let output = ExtremityFilter::default().apply(input.clone());

        assert_eq!(input, output);
        assert!(ExtremityFilter::default().is_allowed((0, 0, 0), (0.0, 0.0, 0.0)));
    }

    #[test]
    fn extremity_filter_removes_near_white_and_near_black() {
        let input = swatches(&[
            ((0, 0, 0), 1.0),
            ((10, 10, 10), 1.0),
            ((128, 128, 128), 1.0),
            ((250, 250, 250), 1.0),
            ((255, 255, 255), 1.0),
        ]);
        let output = ExtremityFilter::new(0.1, 0.1).apply(input);

        let colors = output.iter().map(|s| s.rgb()).collect::<Vec<_>>();
        assert_eq!(colors, vec![(128, 128, 128)]);
    }

    #[test]
    fn extremity_limits_are_independent() {
        let input = swatches(&[((1, 1, 1), 1.0), ((254, 254, 254), 1.0)]);

        let no_white = ExtremityFilter::new(0.5, 0.0).apply(input.clone());
        assert_eq!(no_white.iter().map(|s| s.rgb()).collect::<Vec<_>>(), vec![(1, 1, 1)]);

        let no_black = ExtremityFilter::new(0.0, 0.5).apply(input);
        assert_eq!(no_black.iter().map(|s| s.rgb()).collect::<Vec<_>>(), vec![(254, 254, 254)]);
    }

    #[test]
    fn active_filter_drops_pure_extremes() {
        // pure black sits at distance zero from black, which is not strictly greater than a zero limit
        let input = swatches(&[((0, 0, 0), 1.0), ((100, 100, 100), 1.0)]);
        let output = ExtremityFilter::new(0.01, 0.0).apply(input);

        assert_eq!(output.iter().map(|s| s.rgb()).collect::<Vec<_>>(), vec![(100, 100, 100)]);
    }

    #[test]
    fn coverage_uses_total_pixels() {
        let input = swatches(&[((1, 1, 1), 5.0), ((2, 2, 2), 10.0), ((3, 3, 3), 985.0)]);

        let output = retain_coverage(input, 0.01, 1000);
        let colors = output.iter().map(|s| s.rgb()).collect::<Vec<_>>();

        assert_eq!(colors, vec![(2, 2, 2), (3, 3, 3)]);
    }

    #[test]
    fn coverage_excludes_colors_below_fraction() {
        // 0.0005 of the image against a limit of 0.001
        let input = swatches(&[((7, 7, 7), 5.0), ((8, 8, 8), 9995.0)]);
        let output = retain_coverage(input, 0.001, 10_000);

        assert_eq!(output.len(), 1);
        assert_eq!(output[0].rgb(), (8, 8, 8));
    }

    #[test]
    fn zero_coverage_keeps_everything() {
        let input = swatches(&[((1, 1, 1), 1.0), ((2, 2, 2), 1.0)]);
        assert_eq!(retain_coverage(input.clone(), 0.0, 1_000_000), input);
    }

    struct NoGreen;
    impl Filter for NoGreen {
        fn is_allowed(&self, (r, g, b): (u8, u8, u8), _: (f32, f32, f32)) -> bool {
            !(g > r && g > b)
        }
    }

    #[test]
    fn custom_filters_apply() {
        let input = swatches(&[((0, 200, 0), 1.0), ((200, 0, 0), 1.0)]);
        let filters: Vec<Box<dyn Filter>> = vec![Box::new(NoGreen)];

        let output = retain_allowed(input, &filters);
        assert_eq!(output.iter().map(|s| s.rgb()).collect::<Vec<_>>(), vec![(200, 0, 0)]);
    }
}
