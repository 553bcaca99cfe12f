use crate::swatch::Swatch;
use std::collections::HashMap;

/// Exact occurrence counts of every color in a stream of pixels.
///
/// Colors are keyed by packing their channels into a single 24-bit integer, red being the most significant, so only
/// the colors actually present take up memory.
#[derive(Debug, Clone, Default)]
pub struct Histogram {
    counts: HashMap<u32, u64>,
    total_pixels: u64,
}

impl Histogram {
    pub fn from_pixels<I>(pixels: I) -> Self
    where
        I: IntoIterator<Item = (u8, u8, u8)>,
    {
        let mut hist = Histogram::default();
        for rgb in pixels {
            hist.add(rgb);
        }

        hist
    }

    pub fn add(&mut self, rgb: (u8, u8, u8)) {
        *self.counts.entry(pack(rgb)).or_insert(0) += 1;
        self.total_pixels += 1;
    }

    /// Number of pixels counted, including every repeat of a color.
    pub fn total_pixels(&self) -> u64 {
        self.total_pixels
    }

    pub fn distinct_colors(&self) -> usize {
        self.counts.len()
    }

    /// Flatten the histogram into one swatch per distinct color, with the amount set to the color's pixel count.
    ///
    /// The swatches are ordered by their packed color so the rest of the pipeline sees the same order on every run.
    pub fn into_swatches(self) -> Vec<Swatch> {
        let mut colors = self.counts.into_iter().collect::<Vec<_>>();
        colors.sort_unstable_by_key(|(key, _)| *key);

        colors
            .into_iter()
            .map(|(key, count)| Swatch::new(unpack(key), count as f64))
            .collect()
    }
}

fn pack((r, g, b): (u8, u8, u8)) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

fn unpack(key: u32) -> (u8, u8, u8) {
    ((key >> 16) as u8, (key >> 8) as u8, key as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_exactly() {
        let pixels = [(1, 2, 3), (1, 2, 3), (3, 2, 1), (1, 2, 3), (0, 0, 0)];
        let hist = Histogram::from_pixels(pixels);

        assert_eq!(hist.total_pixels(), 5);
        assert_eq!(hist.distinct_colors(), 3);

        let counts = hist.into_swatches().into_iter().map(|s| (s.rgb(), s.amount())).collect::<Vec<_>>();
        assert_eq!(counts, vec![((0, 0, 0), 1.0), ((1, 2, 3), 3.0), ((3, 2, 1), 1.0)]);
    }

    #[test]
    fn empty_stream_yields_no_swatches() {
        let hist = Histogram::from_pixels(std::iter::empty());

        assert_eq!(hist.total_pixels(), 0);
        assert!(hist.into_swatches().is_empty());
    }

    #[test]
    fn swatches_are_unique_and_ordered_by_color() {
        let pixels = [(255, 0, 0), (0, 0, 255), (0, 255, 0), (0, 0, 255), (255, 0, 0), (255, 0, 0)];
        let swatches = Histogram::from_pixels(pixels).into_swatches();

        let colors = swatches.iter().map(|s| s.rgb()).collect::<Vec<_>>();
        assert_eq!(colors, vec![(0, 0, 255), (0, 255, 0), (255, 0, 0)]);

        let amounts = swatches.iter().map(|s| s.amount()).collect::<Vec<_>>();
        assert_eq!(amounts, vec![2.0, 1.0, 3.0]);
        assert!(swatches.iter().all(|s| s.score() == 0.0));
    }

    #[test]
    fn packing_covers_the_whole_lattice() {
        for rgb in [(0, 0, 0), (255, 255, 255), (255, 0, 128), (1, 254, 7)] {
            assert_eq!(unpack(pack(rgb)), rgb);
        }

        assert_eq!(pack((255, 255, 255)), 0xff_ff_ff);
    }
}
