//! Wavelet refinement (smooth interpolation to a finer grid).
//!
//! Refinement is an inverse transform with the detail filter taken to be
//! identically zero: each step scatters the current smooth coefficients
//! through the synthesis lowpass filter, doubling the working size. The
//! result is rescaled so the refined signal keeps the original's energy
//! normalization.
//!
//! no_std + alloc compatible.

extern crate alloc;
use alloc::vec;

use libm::sqrt;

use crate::dwt::WaveletError;
use crate::filter::WaveletFilter;
use crate::index::wrap;
use crate::num::Float;

/// One refinement iteration: grow the smooth prefix of length `n/2` to `n`.
fn refine_step<T: Float>(data: &mut [T], n: usize, wfltr: &WaveletFilter, scratch: &mut [f64]) {
    let half = n / 2;
    scratch[..n].fill(0.0);
    for j in 0..half {
        let smooth = data[j].to_f64();
        for (k, &c) in wfltr.h_tilde.iter().enumerate() {
            // each row of Htilde is offset by 2 from the previous one
            let ia = wrap(2 * j as isize + k as isize - wfltr.off_h_tilde as isize, n);
            scratch[ia] += c * smooth;
        }
    }
    for (i, &v) in scratch[..n].iter().enumerate() {
        data[i] = T::from_f64(v);
    }
}

/// Refine a signal of power-of-two length onto a longer power-of-two grid.
///
/// `output.len()` determines the refined size and must be at least
/// `input.len()`.
pub fn refine_1d<T: Float>(
    input: &[T],
    output: &mut [T],
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    let n = input.len();
    let n_new = output.len();
    if n == 0 {
        return Err(WaveletError::EmptyInput);
    }
    if !n.is_power_of_two() || !n_new.is_power_of_two() {
        return Err(WaveletError::NonPowerOfTwo);
    }
    if n > n_new {
        return Err(WaveletError::MismatchedLengths);
    }

    output[..n].copy_from_slice(input);
    let mut scratch = vec![0.0f64; n_new];
    let mut size = 2 * n;
    while size <= n_new {
        refine_step(output, size, wfltr, &mut scratch);
        size *= 2;
    }

    let scale = sqrt(n_new as f64 / n as f64);
    for v in output.iter_mut() {
        *v = T::from_f64(v.to_f64() * scale);
    }
    Ok(())
}
