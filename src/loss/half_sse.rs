pub struct HalfSquaredError;

impl HalfSquaredError {
    /// Per-example error: ½ Σ (expected - predicted)²
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, t)| {
                let omega = t - a;
                omega * omega
            })
            .sum::<f64>() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_the_sum_of_squares() {
        assert_eq!(HalfSquaredError::loss(&[0.5, -1.0], &[1.0, 1.0]), (0.25 + 4.0) / 2.0);
        assert_eq!(HalfSquaredError::loss(&[0.3], &[0.3]), 0.0);
    }
}
