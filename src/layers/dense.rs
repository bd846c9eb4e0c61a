use crate::{activation::activation::Tanh, math::matrix::Matrix};

/// Pre-activation sum for unit `dest`: Σ_source w[source][dest] · a[source].
pub fn weighted_sum(weights: &Matrix, source: &[f64], dest: usize) -> f64 {
    let mut sum = 0.0;
    for (row, &a) in weights.data.iter().zip(source) {
        sum += row[dest] * a;
    }
    sum
}

/// Fills `dest` with the activated sums of `source` through `weights`.
pub fn feed_from(weights: &Matrix, source: &[f64], dest: &mut [f64]) {
    for (d, unit) in dest.iter_mut().enumerate() {
        *unit = Tanh::function(weighted_sum(weights, source, d));
    }
}

/// Like [`feed_from`], but also keeps each pre-activation sum in `theta`.
pub fn feed_from_recording(weights: &Matrix, source: &[f64], theta: &mut [f64], dest: &mut [f64]) {
    for (d, (unit, th)) in dest.iter_mut().zip(theta.iter_mut()).enumerate() {
        *th = weighted_sum(weights, source, d);
        *unit = Tanh::function(*th);
    }
}
