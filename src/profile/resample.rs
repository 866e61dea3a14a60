// SPDX-License-Identifier: GPL-3.0-only

//! Fixed-length resampling of a sideview profile
//!
//! Known samples sit at 1-based integer positions `1..=n`. To reach the
//! target length `T`, `T - n` extra positions are placed evenly at
//! `k * n / (T + 1 - n)` for `k = 1..(T + 1 - n)`, values are linearly
//! interpolated there, and known and interpolated samples are merged in
//! position order. Profiles already longer than `T` are instead
//! interpolated at `T` evenly spaced positions over `[1, n]`.

use crate::errors::{FrameError, FrameResult};

/// Linear interpolation of `(xs, ys)` at `x`
///
/// `xs` must be ascending. Positions outside `[xs[0], xs[last]]` clamp to
/// the nearest boundary value.
///
/// # Panics
///
/// Panics if `xs` is empty or `xs` and `ys` differ in length.
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    assert!(!xs.is_empty(), "interp needs at least one sample");
    assert_eq!(xs.len(), ys.len(), "interp sample lengths differ");

    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }

    // First index with xs[i] > x; guaranteed in 1..=last by the checks above
    let hi = xs.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let span = xs[hi] - xs[lo];
    if span == 0.0 {
        return ys[lo];
    }
    let t = (x - xs[lo]) / span;
    ys[lo] + t * (ys[hi] - ys[lo])
}

/// Fractional positions at which to interpolate `n` samples up to `target_len`
pub fn interpolation_positions(n: usize, target_len: usize) -> Vec<f64> {
    if n == 0 || n >= target_len {
        return Vec::new();
    }
    let divisions = target_len + 1 - n;
    let step = n as f64 / divisions as f64;
    (1..divisions).map(|k| step * k as f64).collect()
}

/// Merge known samples (keyed `1..=n`) with `(position, value)` pairs
///
/// The sort is stable with known samples first, so a known sample wins
/// position ties.
pub fn merge(samples: &[f64], interpolated: &[(f64, f64)]) -> Vec<f64> {
    let mut keyed: Vec<(f64, f64)> = Vec::with_capacity(samples.len() + interpolated.len());
    keyed.extend(
        samples
            .iter()
            .enumerate()
            .map(|(i, &value)| ((i + 1) as f64, value)),
    );
    keyed.extend_from_slice(interpolated);
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, value)| value).collect()
}

/// Resample `samples` to exactly `target_len` values
pub fn resample(samples: &[f64], target_len: usize) -> FrameResult<Vec<f64>> {
    let n = samples.len();
    if n == 0 {
        return Err(FrameError::ProfileTooShort { len: 0 });
    }

    let xs: Vec<f64> = (1..=n).map(|i| i as f64).collect();

    if n > target_len {
        let last = (target_len.max(2) - 1) as f64;
        let values = (0..target_len)
            .map(|k| interp(1.0 + (n - 1) as f64 * k as f64 / last, &xs, samples))
            .collect();
        return Ok(values);
    }

    let interpolated: Vec<(f64, f64)> = interpolation_positions(n, target_len)
        .into_iter()
        .map(|x| (x, interp(x, &xs, samples)))
        .collect();

    Ok(merge(samples, &interpolated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp_between_and_clamped() {
        let xs = [1.0, 2.0, 4.0];
        let ys = [10.0, 20.0, 0.0];
        assert_eq!(interp(1.5, &xs, &ys), 15.0);
        assert_eq!(interp(3.0, &xs, &ys), 10.0);
        assert_eq!(interp(2.0, &xs, &ys), 20.0);
        assert_eq!(interp(0.2, &xs, &ys), 10.0);
        assert_eq!(interp(9.0, &xs, &ys), 0.0);
    }

    #[test]
    #[should_panic(expected = "at least one sample")]
    fn test_interp_without_samples_panics() {
        interp(1.0, &[], &[]);
    }

    #[test]
    fn test_interp_single_sample() {
        assert_eq!(interp(-3.0, &[1.0], &[7.0]), 7.0);
        assert_eq!(interp(5.0, &[1.0], &[7.0]), 7.0);
    }

    #[test]
    fn test_position_count() {
        assert_eq!(interpolation_positions(100, 200).len(), 100);
        assert_eq!(interpolation_positions(3, 200).len(), 197);
        assert!(interpolation_positions(200, 200).is_empty());
        assert!(interpolation_positions(250, 200).is_empty());
    }

    #[test]
    fn test_length_is_exact() {
        for n in 1..=450 {
            let samples: Vec<f64> = (0..n).map(|i| 1.0 + (i % 7) as f64).collect();
            assert_eq!(resample(&samples, 200).unwrap().len(), 200, "n = {}", n);
        }
    }

    #[test]
    fn test_monotonic_input_stays_monotonic() {
        for n in [2usize, 5, 37, 120, 199, 321] {
            let samples: Vec<f64> = (0..n).map(|i| 1.0 + (i as f64).sqrt()).collect();
            let out = resample(&samples, 200).unwrap();
            for pair in out.windows(2) {
                assert!(pair[0] <= pair[1] + 1e-12, "n = {}", n);
            }
            assert!(
                out.iter()
                    .all(|&v| v >= samples[0] - 1e-12 && v <= samples[n - 1] + 1e-12)
            );
        }
    }

    #[test]
    fn test_known_samples_survive() {
        let samples = [1.0, 3.0, 2.0, 5.0];
        let out = resample(&samples, 12).unwrap();
        assert_eq!(out.len(), 12);
        for s in samples {
            assert!(out.contains(&s));
        }
    }

    #[test]
    fn test_full_length_is_fixed_point() {
        let descriptor: Vec<f64> = (0..200).map(|i| 1.0 + ((i * 37) % 11) as f64 / 10.0).collect();
        let again = resample(&descriptor, 200).unwrap();
        assert_eq!(again, descriptor);
        assert_eq!(merge(&descriptor, &[]), descriptor);
    }

    #[test]
    fn test_empty_profile() {
        assert_eq!(
            resample(&[], 200),
            Err(FrameError::ProfileTooShort { len: 0 })
        );
    }

    #[test]
    fn test_merge_orders_by_position() {
        let merged = merge(&[10.0, 20.0], &[(1.5, 15.0), (0.5, 10.0), (2.0, 99.0)]);
        assert_eq!(merged, vec![10.0, 10.0, 15.0, 20.0, 99.0]);
    }
}
