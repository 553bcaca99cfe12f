/// A distinct color observed in an image, along with how much of the image it accounts for.
///
/// The amount starts out as a pixel count and may become fractional once nearby colors are bundled into it. The
/// score is zero until the swatch passes through the scoring stage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swatch {
    red: u8,
    green: u8,
    blue: u8,
    amount: f64,
    score: f64,
}

impl Swatch {
    pub fn new((red, green, blue): (u8, u8, u8), amount: f64) -> Swatch {
        Self {
            red,
            green,
            blue,
            amount,
            score: 0.0,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn hsl(self) -> (f32, f32, f32) {
        crate::rgb_to_hsl(self.rgb())
    }

    pub fn amount(self) -> f64 {
        self.amount
    }

    pub fn score(self) -> f64 {
        self.score
    }

    /// Euclidean distance to another swatch in RGB space.
    pub fn distance(self, other: Swatch) -> f64 {
        crate::distance(self.rgb(), other.rgb())
    }

    pub(crate) fn add_amount(&mut self, amount: f64) {
        self.amount += amount;
    }

    pub(crate) fn set_score(&mut self, score: f64) {
        self.score = score;
    }
}
