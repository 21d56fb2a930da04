//! Presentation-only mock series for the dashboard charts. These are random
//! walks around the current quote, generated for visual effect — they are
//! not read from (and say nothing about) the stored price history.

use rand::Rng;

/// Per-step variance as a fraction of the base price (0.2%).
const PRICE_VARIANCE: f64 = 0.002;

/// Random walk of `points` prices starting at `base_price`, oldest first.
/// Never goes below zero.
pub fn synthetic_price_series(base_price: f64, points: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    let variance = base_price * PRICE_VARIANCE;
    let mut series = Vec::with_capacity(points);
    let mut previous = base_price;
    for i in 0..points {
        let price = if i == 0 {
            base_price
        } else {
            let step = (rng.gen::<f64>() - 0.5) * variance * 2.0;
            (previous + step).max(0.0)
        };
        series.push(price);
        previous = price;
    }
    series
}

/// Mock volume bars scattered around a base volume (±50%).
pub fn synthetic_volume_series(base_volume: u64, points: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    let base = base_volume as f64;
    (0..points)
        .map(|_| {
            let factor = rng.gen_range(0.5..1.5);
            (base * factor) as u64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_series_starts_at_base_and_stays_close() {
        let series = synthetic_price_series(34256.89, 13);
        assert_eq!(series.len(), 13);
        assert_eq!(series[0], 34256.89);
        // Each step moves at most one variance band.
        let band = 34256.89 * PRICE_VARIANCE;
        for pair in series.windows(2) {
            assert!((pair[0] - pair[1]).abs() <= band + f64::EPSILON);
        }
        assert!(series.iter().all(|p| *p >= 0.0));
    }

    #[test]
    fn price_series_handles_zero_points() {
        assert!(synthetic_price_series(100.0, 0).is_empty());
    }

    #[test]
    fn volume_series_stays_in_band() {
        let series = synthetic_volume_series(2_400_000, 24);
        assert_eq!(series.len(), 24);
        for volume in series {
            assert!((1_200_000..3_600_000).contains(&volume));
        }
    }
}
