//! Discrete wavelet transform, 1-D engine.
//!
//! One convolution step turns a line of `n` samples into `n/2` smooth
//! followed by `n/2` detail coefficients; the multi-level transform repeats
//! the step over the smooth prefix across octave scales. Boundaries are
//! periodic, and filters longer than the working size wrap as well. All
//! accumulation happens in `f64`; results are cast to the storage width on
//! write.
//!
//! no_std + alloc compatible.

extern crate alloc;
use alloc::vec;

use log::debug;

use crate::filter::WaveletFilter;
use crate::index::wrap;
use crate::num::Float;

/// Minimum line size a convolution step can operate on.
pub const MIN_ORDER: usize = 2;

/// Errors reported by the wavelet transforms.
///
/// All of these are configuration errors detected before any data is
/// mutated; once validation passes the transforms are total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveletError {
    /// The signal is empty.
    EmptyInput,
    /// A transformed axis size is not an exact power of two.
    NonPowerOfTwo,
    /// The number of dimensions is outside `1..=MAX_DIMS`.
    DimsOutOfRange,
    /// Input and output lengths differ, or the buffer does not match the
    /// product of the shape.
    MismatchedLengths,
    /// No catalog entry for the requested family/order combination.
    UnknownWavelet,
    /// A custom filter has fewer than [`MIN_ORDER`] taps.
    FilterTooShort,
    /// A compression fraction is outside `[0, 1]`.
    InvalidFraction,
}

impl core::fmt::Display for WaveletError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WaveletError::EmptyInput => write!(f, "input is empty"),
            WaveletError::NonPowerOfTwo => {
                write!(f, "transformed axis size is not a power of two")
            }
            WaveletError::DimsOutOfRange => {
                write!(f, "number of dimensions is out of range")
            }
            WaveletError::MismatchedLengths => write!(f, "buffer lengths do not match"),
            WaveletError::UnknownWavelet => {
                write!(f, "unrecognized wavelet family/order combination")
            }
            WaveletError::FilterTooShort => {
                write!(f, "filter needs at least two taps")
            }
            WaveletError::InvalidFraction => {
                write!(f, "compression fraction must lie in [0, 1]")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WaveletError {}

/// One level of a wavelet transform on a strided line of `n` elements.
///
/// Forward: `scratch[0..n/2]` receives the smooth component (H * a) and
/// `scratch[n/2..n]` the detail component (G * a), where G is built on the
/// fly from the mirrored, sign-alternated synthesis lowpass taps. Inverse:
/// the formal transpose, scatter-accumulating Htilde and Gtilde rows. The
/// caller guarantees `n` is even, at least [`MIN_ORDER`], and that
/// `scratch` holds at least `n` slots.
pub(crate) fn convolve_step<T: Float>(
    data: &mut [T],
    stride: usize,
    n: usize,
    forward: bool,
    wfltr: &WaveletFilter,
    scratch: &mut [f64],
) {
    let half = n / 2;
    // the reconstruction detail filter mirrors the analysis smoothing
    // filter, and vice versa
    let n_g = wfltr.h_tilde.len();
    let n_g_tilde = wfltr.h.len();

    if forward {
        for i in 0..half {
            let mut sum = 0.0;
            for (j, &c) in wfltr.h.iter().enumerate() {
                // each row of H is offset by 2 from the previous one
                let ia = wrap(2 * i as isize + j as isize - wfltr.off_h as isize, n);
                sum += c * data[stride * ia].to_f64();
            }
            scratch[i] = sum;

            let mut sum = 0.0;
            let mut flip = true;
            for j in 0..n_g {
                let ia = wrap(2 * i as isize + j as isize - wfltr.off_g as isize, n);
                let term = wfltr.h_tilde[n_g - 1 - j] * data[stride * ia].to_f64();
                if flip {
                    sum -= term;
                } else {
                    sum += term;
                }
                flip = !flip;
            }
            scratch[half + i] = sum;
        }
    } else {
        scratch[..n].fill(0.0);
        for j in 0..half {
            let smooth = data[stride * j].to_f64();
            for (k, &c) in wfltr.h_tilde.iter().enumerate() {
                let ia = wrap(2 * j as isize + k as isize - wfltr.off_h_tilde as isize, n);
                scratch[ia] += c * smooth;
            }

            let detail = data[stride * (half + j)].to_f64();
            let mut flip = true;
            for k in 0..n_g_tilde {
                let ia = wrap(2 * j as isize + k as isize - wfltr.off_g_tilde as isize, n);
                let term = wfltr.h[n_g_tilde - 1 - k] * detail;
                if flip {
                    scratch[ia] -= term;
                } else {
                    scratch[ia] += term;
                }
                flip = !flip;
            }
        }
    }

    for (i, &v) in scratch[..n].iter().enumerate() {
        data[stride * i] = T::from_f64(v);
    }
}

/// Multi-level 1-D transform along one strided line.
///
/// Forward runs size-descending over the smooth prefix; inverse runs
/// size-ascending. Lines shorter than [`MIN_ORDER`] are left untouched.
pub(crate) fn dwt_1d_strided<T: Float>(
    data: &mut [T],
    stride: usize,
    n: usize,
    forward: bool,
    wfltr: &WaveletFilter,
    scratch: &mut [f64],
) {
    if n < MIN_ORDER {
        return;
    }
    if forward {
        let mut size = n;
        while size >= MIN_ORDER {
            convolve_step(data, stride, size, true, wfltr, scratch);
            size /= 2;
        }
    } else {
        let mut size = MIN_ORDER;
        while size <= n {
            convolve_step(data, stride, size, false, wfltr, scratch);
            size *= 2;
        }
    }
}

fn validate_line(n: usize) -> Result<(), WaveletError> {
    if n == 0 {
        return Err(WaveletError::EmptyInput);
    }
    if !n.is_power_of_two() {
        return Err(WaveletError::NonPowerOfTwo);
    }
    Ok(())
}

/// Forward 1-D wavelet transform, in place.
///
/// `data.len()` must be a power of two; a single-element signal is a no-op.
pub fn dwt_1d_inplace<T: Float>(
    data: &mut [T],
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    validate_line(data.len())?;
    debug!("dwt_1d: n={} taps={}/{}", data.len(), wfltr.h.len(), wfltr.h_tilde.len());
    let mut scratch = vec![0.0f64; data.len()];
    dwt_1d_strided(data, 1, data.len(), true, wfltr, &mut scratch);
    Ok(())
}

/// Inverse 1-D wavelet transform, in place.
pub fn idwt_1d_inplace<T: Float>(
    data: &mut [T],
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    validate_line(data.len())?;
    debug!("idwt_1d: n={} taps={}/{}", data.len(), wfltr.h.len(), wfltr.h_tilde.len());
    let mut scratch = vec![0.0f64; data.len()];
    dwt_1d_strided(data, 1, data.len(), false, wfltr, &mut scratch);
    Ok(())
}

/// Forward 1-D wavelet transform into a separate buffer of the same length.
pub fn dwt_1d_out_of_place<T: Float>(
    input: &[T],
    output: &mut [T],
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    if input.len() != output.len() {
        return Err(WaveletError::MismatchedLengths);
    }
    validate_line(input.len())?;
    output.copy_from_slice(input);
    dwt_1d_inplace(output, wfltr)
}

/// Inverse 1-D wavelet transform into a separate buffer of the same length.
///
/// The copy is required because inversion proceeds size-ascending on a
/// shared buffer.
pub fn idwt_1d_out_of_place<T: Float>(
    input: &[T],
    output: &mut [T],
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    if input.len() != output.len() {
        return Err(WaveletError::MismatchedLengths);
    }
    validate_line(input.len())?;
    output.copy_from_slice(input);
    idwt_1d_inplace(output, wfltr)
}
