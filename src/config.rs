use crate::error::{Error, Result};
use std::{fmt, str::FromStr};

pub const DEFAULT_COLORS_TO_PICK: usize = 5;
pub const MAX_COLORS_TO_PICK: usize = 256 * 256 * 256;

const FAST_STRIDE: usize = 8;
const MEDIUM_STRIDE: usize = 5;
const SLOW_STRIDE: usize = 3;

const FAST_SCALE: f32 = 0.2;
const MEDIUM_SCALE: f32 = 0.3;
const SLOW_SCALE: f32 = 0.5;

/// Options controlling the palette extraction pipeline.
///
/// Every value is checked by [`Config::validate`] before any pixels are processed. Out-of-range values are never
/// clamped, they fail with [`Error::InvalidConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Maximum number of colors in the resulting palette, between 1 and 256³.
    pub colors_to_pick: usize,
    /// Fraction of the total pixel count a color has to cover to survive, between 0 and 1.
    pub min_coverage: f64,
    /// Minimum distance from pure white as a fraction of the largest possible RGB distance, between 0 and 1.
    pub min_white_distance: f64,
    /// Minimum distance from pure black as a fraction of the largest possible RGB distance, between 0 and 1.
    pub min_black_distance: f64,
    pub speed: Speed,
    pub merge: MassMerge,
}

/// Trades accuracy for speed. Controls both how aggressively an image is downscaled before counting its colors, and
/// how sparsely color pairs are sampled when estimating the bundling threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Speed {
    Fast,
    #[default]
    Medium,
    Slow,
}

/// How much of an absorbed color's amount is added to the color absorbing it during bundling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MassMerge {
    /// Scale the absorbed amount by the ratio of the pair's distance to the bundling threshold.
    #[default]
    DistanceScaled,
    /// Add the absorbed amount in full, conserving the total mass of the sample set.
    Full,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_COLORS_TO_PICK).contains(&self.colors_to_pick) {
            return Err(Error::invalid_config("colors_to_pick", self.colors_to_pick));
        }

        check_fraction("min_coverage", self.min_coverage)?;
        check_fraction("min_white_distance", self.min_white_distance)?;
        check_fraction("min_black_distance", self.min_black_distance)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colors_to_pick: DEFAULT_COLORS_TO_PICK,
            min_coverage: 0.0,
            min_white_distance: 0.0,
            min_black_distance: 0.0,
            speed: Speed::default(),
            merge: MassMerge::default(),
        }
    }
}

impl Speed {
    /// Step between sampled indices when averaging pairwise distances.
    pub fn stride(self) -> usize {
        match self {
            Speed::Fast => FAST_STRIDE,
            Speed::Medium => MEDIUM_STRIDE,
            Speed::Slow => SLOW_STRIDE,
        }
    }

    /// Per-dimension factor an image is resized by before its colors are counted.
    pub fn scale(self) -> f32 {
        match self {
            Speed::Fast => FAST_SCALE,
            Speed::Medium => MEDIUM_SCALE,
            Speed::Slow => SLOW_SCALE,
        }
    }
}

impl FromStr for Speed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Speed::Fast),
            "medium" => Ok(Speed::Medium),
            "slow" => Ok(Speed::Slow),
            _ => Err(Error::invalid_config("speed", s)),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Fast => f.write_str("fast"),
            Speed::Medium => f.write_str("medium"),
            Speed::Slow => f.write_str("slow"),
        }
    }
}

impl MassMerge {
    pub(crate) fn contribution(self, amount: f64, distance: f64, threshold: f64) -> f64 {
        match self {
            MassMerge::DistanceScaled => amount * (distance / threshold),
            MassMerge::Full => amount,
        }
    }
}

fn check_fraction(option: &'static str, value: f64) -> Result<()> {
    // NaN fails the range check as well
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_config(option, value))
    }
}
