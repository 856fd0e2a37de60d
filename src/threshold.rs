//! Magnitude thresholding of wavelet coefficients.
//!
//! Compression drops coefficients whose magnitude falls below a threshold.
//! The threshold is either given directly or derived from a target discard
//! fraction by selecting the k largest magnitudes with a bounded min-heap.
//! Callers apply this between a forward and an inverse transform.
//!
//! no_std + alloc compatible.

extern crate alloc;
use alloc::vec::Vec;

use libm::sqrt;

use crate::dwt::WaveletError;
use crate::num::Float;

/// Outcome of a thresholding pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionStats {
    /// The threshold that was ultimately applied.
    pub threshold: f64,
    /// Number of coefficients zeroed.
    pub zeroed: usize,
    /// Total number of coefficients.
    pub total: usize,
    /// Sum of squared magnitudes of the zeroed coefficients.
    pub sq_error: f64,
}

impl CompressionStats {
    /// Fraction of coefficients zeroed (0 = no compression).
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.zeroed as f64 / self.total as f64
        }
    }

    /// Compression ratio `n : 1`; infinite when everything was zeroed.
    pub fn ratio(&self) -> f64 {
        1.0 / (1.0 - self.fraction())
    }

    /// Root-mean-square error introduced by the zeroed coefficients.
    pub fn rms_error(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            sqrt(self.sq_error / self.total as f64)
        }
    }
}

/// Zero every coefficient with magnitude strictly below `threshold`.
///
/// Returns the count zeroed and the squared error introduced. A threshold
/// of zero (or below) leaves the data untouched.
pub fn threshold_inplace<T: Float>(coeffs: &mut [T], threshold: f64) -> CompressionStats {
    let mut stats = CompressionStats {
        threshold,
        zeroed: 0,
        total: coeffs.len(),
        sq_error: 0.0,
    };
    if threshold > 0.0 {
        for v in coeffs.iter_mut() {
            let y = v.to_f64();
            if -threshold < y && y < threshold {
                stats.sq_error += y * y;
                *v = T::zero();
                stats.zeroed += 1;
            }
        }
    }
    stats
}

/// Find the magnitude threshold that discards `discard_fraction` of the
/// coefficients.
///
/// Keeps the `ceil((1 - discard_fraction) · n)` largest magnitudes by
/// growing a min-heap of that capacity; the heap root is then the smallest
/// surviving magnitude. Returns infinity when nothing survives.
pub fn threshold_for_fraction<T: Float>(
    coeffs: &[T],
    discard_fraction: f64,
) -> Result<f64, WaveletError> {
    if !(0.0..=1.0).contains(&discard_fraction) {
        return Err(WaveletError::InvalidFraction);
    }
    let n = coeffs.len();
    let keep = ceil_mul(1.0 - discard_fraction, n);
    if keep == 0 {
        return Ok(f64::INFINITY);
    }
    if keep >= n {
        return Ok(0.0);
    }

    let mut heap: Vec<f64> = Vec::with_capacity(keep);
    for v in coeffs {
        let mag = v.abs().to_f64();
        if heap.len() < keep {
            // grow phase: sift the new value up
            heap.push(mag);
            let mut lower = heap.len() - 1;
            while lower != 0 {
                let upper = (lower - 1) / 2;
                if heap[upper] <= heap[lower] {
                    break;
                }
                heap.swap(upper, lower);
                lower = upper;
            }
        } else if mag > heap[0] {
            // replace the smallest retained magnitude and sift down
            heap[0] = mag;
            let mut upper = 0;
            loop {
                let mut lower = 2 * upper + 1;
                if lower >= keep {
                    break;
                }
                if lower + 1 < keep && heap[lower + 1] < heap[lower] {
                    lower += 1;
                }
                if heap[upper] < heap[lower] {
                    break;
                }
                heap.swap(upper, lower);
                upper = lower;
            }
        }
    }
    Ok(heap[0])
}

/// Apply an absolute threshold and/or a target discard fraction.
///
/// When both are given, both criteria apply: the fraction-derived threshold
/// is computed over the already-thresholded coefficients and only raises
/// the effective threshold, never lowers it.
pub fn compress_inplace<T: Float>(
    coeffs: &mut [T],
    threshold: f64,
    discard_fraction: f64,
) -> Result<CompressionStats, WaveletError> {
    let mut stats = threshold_inplace(coeffs, threshold);
    if discard_fraction > 0.0 {
        let fraction_threshold = threshold_for_fraction(coeffs, discard_fraction)?;
        if fraction_threshold > threshold {
            let sq_error = stats.sq_error;
            stats = threshold_inplace(coeffs, fraction_threshold);
            stats.sq_error += sq_error;
        }
    }
    Ok(stats)
}

/// `ceil(f · n)` without pulling in a float ceil for one call site.
fn ceil_mul(f: f64, n: usize) -> usize {
    let exact = f * n as f64;
    let floor = exact as usize;
    if exact > floor as f64 {
        floor + 1
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_threshold_zeroes_small_values() {
        let mut data = vec![0.5f64, -2.0, 0.0, 3.0, -0.25];
        let stats = threshold_inplace(&mut data, 1.0);
        assert_eq!(data, vec![0.0, -2.0, 0.0, 3.0, 0.0]);
        assert_eq!(stats.zeroed, 3);
        assert!((stats.sq_error - (0.25 + 0.0625)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_threshold_is_noop() {
        let mut data = vec![0.5f64, -2.0];
        let stats = threshold_inplace(&mut data, 0.0);
        assert_eq!(stats.zeroed, 0);
        assert_eq!(data, vec![0.5, -2.0]);
    }

    #[test]
    fn test_fraction_threshold_matches_sort_oracle() {
        let data = vec![4.0f64, -1.0, 0.5, -8.0, 2.0, 0.25, -3.0, 6.0];
        // discard half: keep the 4 largest magnitudes {8, 6, 4, 3}
        let t = threshold_for_fraction(&data, 0.5).unwrap();
        assert_eq!(t, 3.0);
        // keep everything
        assert_eq!(threshold_for_fraction(&data, 0.0).unwrap(), 0.0);
        // keep nothing
        assert_eq!(threshold_for_fraction(&data, 1.0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_fraction_out_of_range() {
        let data = vec![1.0f64];
        assert_eq!(
            threshold_for_fraction(&data, 1.5),
            Err(WaveletError::InvalidFraction)
        );
        assert_eq!(
            threshold_for_fraction(&data, -0.1),
            Err(WaveletError::InvalidFraction)
        );
    }

    #[test]
    fn test_compress_applies_both_criteria() {
        let mut data = vec![4.0f64, -1.0, 0.5, -8.0, 2.0, 0.25, -3.0, 6.0];
        let stats = compress_inplace(&mut data, 0.0, 0.5).unwrap();
        assert_eq!(stats.threshold, 3.0);
        // magnitudes strictly below 3 are dropped; 3.0 itself survives
        assert_eq!(data, vec![4.0, 0.0, 0.0, -8.0, 0.0, 0.0, -3.0, 6.0]);
        assert_eq!(stats.zeroed, 4);
        assert!((stats.fraction() - 0.5).abs() < 1e-12);
        assert!((stats.ratio() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_compress_keeps_larger_absolute_threshold() {
        let mut data = vec![4.0f64, -1.0, 0.5, -8.0, 2.0, 0.25, -3.0, 6.0];
        // the absolute threshold dominates the fraction-derived one
        let stats = compress_inplace(&mut data, 5.0, 0.5).unwrap();
        assert_eq!(stats.threshold, 5.0);
        assert_eq!(data, vec![0.0, 0.0, 0.0, -8.0, 0.0, 0.0, 0.0, 6.0]);
    }

    #[test]
    fn test_stats_rms() {
        let mut data = vec![3.0f64, 4.0, 10.0, 20.0];
        let stats = threshold_inplace(&mut data, 5.0);
        // zeroed 3 and 4: rms = sqrt(25 / 4) = 2.5
        assert!((stats.rms_error() - 2.5).abs() < 1e-12);
    }
}
