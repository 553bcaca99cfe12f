use crate::{
    config::MassMerge,
    error::{Error, Result, Stage},
    swatch::Swatch,
};
use log::{debug, trace};

/// Average the pairwise distances between swatches, visiting only every `stride`th swatch on both sides of a pair.
///
/// A stride of 1 averages over every pair. Fails if the stride is zero or if it leaves no pair to average over.
pub fn average_distance(swatches: &[Swatch], stride: usize) -> Result<f64> {
    if stride == 0 {
        return Err(Error::invalid_config("stride", stride));
    }

    let mut total_distance = 0.0;
    let mut pairs = 0usize;

    for i in (0..swatches.len()).step_by(stride) {
        for j in (i + stride..swatches.len()).step_by(stride) {
            total_distance += swatches[i].distance(swatches[j]);
            pairs += 1;
        }
    }

    if pairs == 0 {
        return Err(Error::InsufficientData {
            stage: Stage::Bundle,
            count: swatches.len(),
        });
    }

    Ok(total_distance / pairs as f64)
}

/// Merge swatches that lie closer to each other than the average distance between them.
///
/// Swatches are visited in descending order of amount, so a swatch is always absorbed by the largest swatch close
/// enough to it. An absorbed swatch contributes to its absorber according to `merge` and is removed. A single pass is
/// enough: every surviving pair has been compared once and found to be at least the threshold apart. Swatches are
/// returned as-is when the stride leaves no pair to sample, which includes fewer than two swatches.
pub fn bundle(mut swatches: Vec<Swatch>, stride: usize, merge: MassMerge) -> Result<Vec<Swatch>> {
    let threshold = match average_distance(&swatches, stride) {
        Ok(threshold) => threshold,
        Err(Error::InsufficientData { .. }) => {
            debug!("No color pairs at stride {stride} among {} colors, skipping bundling", swatches.len());
            return Ok(swatches);
        }
        Err(e) => return Err(e),
    };
    debug!("Bundling {} colors with threshold {threshold:.3}", swatches.len());

    // stable, so equal amounts keep the color order they came in with
    swatches.sort_by(|lhs, rhs| rhs.amount().total_cmp(&lhs.amount()));

    let mut absorbed = vec![false; swatches.len()];
    for i in 0..swatches.len() {
        if absorbed[i] {
            continue;
        }

        for j in i + 1..swatches.len() {
            if absorbed[j] {
                continue;
            }

            let distance = swatches[i].distance(swatches[j]);
            if distance < threshold {
                let contribution = merge.contribution(swatches[j].amount(), distance, threshold);
                trace!("{:?} absorbs {:?} (+{contribution:.3})", swatches[i].rgb(), swatches[j].rgb());

                swatches[i].add_amount(contribution);
                absorbed[j] = true;
            }
        }
    }

    let mut index = 0;
    swatches.retain(|_| {
        let keep = !absorbed[index];
        index += 1;
        keep
    });

    Ok(swatches)
}
