use crate::{
    distance_to_point,
    error::{Error, Result, Stage},
    swatch::Swatch,
};
use log::debug;

/// The plain average of the swatches' coordinates, every swatch counting once regardless of its amount.
pub fn centroid(swatches: &[Swatch]) -> Option<(f64, f64, f64)> {
    if swatches.is_empty() {
        return None;
    }

    let (red_sum, green_sum, blue_sum) = swatches.iter().fold((0.0, 0.0, 0.0), |(r_sum, g_sum, b_sum), swatch| {
        let (r, g, b) = swatch.rgb();
        (r_sum + r as f64, g_sum + g as f64, b_sum + b as f64)
    });

    let count = swatches.len() as f64;
    Some((red_sum / count, green_sum / count, blue_sum / count))
}

/// Score every swatch by how much of the image it covers and how far it stands out from the other swatches.
///
/// The score is the swatch's share of the total amount, plus its distance to the centroid relative to the average
/// distance to the centroid, dampened by the natural logarithm of its amount. When every swatch sits on the centroid
/// (a single swatch) the distance term is zero. The order of the swatches is left untouched.
pub fn score(mut swatches: Vec<Swatch>) -> Result<Vec<Swatch>> {
    if let Some(invalid) = swatches.iter().find(|swatch| swatch.amount().is_nan() || swatch.amount() <= 0.0) {
        return Err(Error::InvalidSample {
            rgb: invalid.rgb(),
            amount: invalid.amount(),
        });
    }

    let center = centroid(&swatches).ok_or(Error::InsufficientData {
        stage: Stage::Score,
        count: 0,
    })?;

    let total_amount = swatches.iter().map(|swatch| swatch.amount()).sum::<f64>();
    let average_distance = swatches
        .iter()
        .map(|swatch| distance_to_point(swatch.rgb(), center))
        .sum::<f64>()
        / swatches.len() as f64;

    debug!(
        "Scoring {} colors around ({:.1}, {:.1}, {:.1}), average distance {average_distance:.3}",
        swatches.len(),
        center.0,
        center.1,
        center.2
    );

    for swatch in &mut swatches {
        let coverage_score = swatch.amount() / total_amount;
        let distinction_score = if average_distance > 0.0 {
            distance_to_point(swatch.rgb(), center) / average_distance * swatch.amount().ln()
        } else {
            0.0
        };

        swatch.set_score(coverage_score + distinction_score);
    }

    Ok(swatches)
}
