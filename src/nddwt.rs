//! N-dimensional discrete wavelet transforms.
//!
//! Two decomposition strategies over the same 1-D engine:
//!
//! - standard basis: each axis is transformed to completion, one at a time
//!   (separable)
//! - non-standard (pyramid) basis: one convolution level is applied across
//!   every active axis before descending to the next octave
//!
//! Shapes are given fastest-varying-first (axis 0 is the innermost axis)
//! and every transformed axis size must be a power of two. All transforms
//! operate in place; out-of-place variants copy first.
//!
//! no_std + alloc compatible.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use crate::dwt::{convolve_step, dwt_1d_strided, WaveletError, MIN_ORDER};
use crate::filter::WaveletFilter;
use crate::index::strides_for;
use crate::num::Float;

/// Maximum number of dimensions a shape may have.
pub const MAX_DIMS: usize = 32;

/// Multi-dimensional decomposition strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Basis {
    /// Separable: each axis transformed independently to completion.
    Standard,
    /// Pyramid: all axes coupled at each resolution level.
    NonStandard,
}

/// Validate a shape against a buffer, returning the longest axis size.
fn validate_shape(len: usize, shape: &[usize]) -> Result<usize, WaveletError> {
    if shape.is_empty() || shape.len() > MAX_DIMS {
        return Err(WaveletError::DimsOutOfRange);
    }
    let mut total = 1usize;
    let mut longest = 1usize;
    for &n in shape {
        if n == 0 || !n.is_power_of_two() {
            return Err(WaveletError::NonPowerOfTwo);
        }
        total *= n;
        longest = longest.max(n);
    }
    if total != len {
        return Err(WaveletError::MismatchedLengths);
    }
    Ok(longest)
}

/// Standard-basis transform: the full 1-D pyramid is applied to every line
/// parallel to each axis in turn. Axes shorter than [`MIN_ORDER`] are left
/// untouched.
fn nd_standard<T: Float>(
    data: &mut [T],
    shape: &[usize],
    forward: bool,
    wfltr: &WaveletFilter,
    scratch: &mut [f64],
) {
    let total = data.len();
    let mut stride = 1usize;
    for &n in shape {
        let next = stride * n;
        if n >= MIN_ORDER {
            let mut base = 0;
            while base < total {
                for i in 0..stride {
                    dwt_1d_strided(&mut data[base + i..], stride, n, forward, wfltr, scratch);
                }
                base += next;
            }
        }
        stride = next;
    }
}

/// Decode a line counter over the axes other than `d0` into a start
/// offset, using their active sizes as mixed-radix digits. Axes excluded
/// by `counted` do not contribute lines and are skipped.
fn line_offset(
    i_conv: usize,
    d0: usize,
    nb: &[usize],
    strides: &[usize],
    counted: Option<&[bool]>,
) -> usize {
    let mut offset = 0;
    let mut rem = i_conv;
    for d in 0..nb.len() {
        if d != d0 && counted.map_or(true, |c| c[d]) {
            offset += strides[d] * (rem % nb[d]);
            rem /= nb[d];
        }
    }
    offset
}

/// Non-standard (pyramid) transform: one convolution level per octave,
/// interleaved across all active axes.
///
/// The active-size vector `nb` is the loop-carried state. Forward shrinks
/// it from the full shape; the inverse grows it from all-ones, where an
/// axis is stretch-eligible iff it is already active (`nb > 1`) or its
/// full/active ratio equals the current maximum (this keeps non-matching
/// axis sizes synchronized on non-hypercubic grids). Ratio comparisons use
/// integer cross-multiplication. Inverse convolutions run in descending
/// axis order, the transpose of the forward's ascending order.
fn nd_nonstandard<T: Float>(
    data: &mut [T],
    shape: &[usize],
    forward: bool,
    wfltr: &WaveletFilter,
    scratch: &mut [f64],
) {
    let nd = shape.len();
    let strides = strides_for(shape);
    let na_tot: usize = shape.iter().product();

    if forward {
        let mut nb: Vec<usize> = shape.to_vec();
        let mut nb_tot = na_tot;
        while nb_tot > 1 {
            for d0 in 0..nd {
                if nb[d0] <= 1 {
                    continue;
                }
                let n_conv = nb_tot / nb[d0];
                for i_conv in 0..n_conv {
                    let offset = line_offset(i_conv, d0, &nb, &strides, None);
                    convolve_step(
                        &mut data[offset..],
                        strides[d0],
                        nb[d0],
                        true,
                        wfltr,
                        scratch,
                    );
                }
            }
            nb_tot = 1;
            for b in nb.iter_mut() {
                if *b > 1 {
                    *b /= 2;
                    nb_tot *= *b;
                }
            }
        }
    } else {
        let mut nb: Vec<usize> = vec![1; nd];
        let mut nb_tot = 1usize;
        while nb_tot < na_tot {
            let mut d_max = 0;
            for d in 1..nd {
                if shape[d] * nb[d_max] >= shape[d_max] * nb[d] {
                    d_max = d;
                }
            }
            let mut eligible: Vec<bool> = Vec::with_capacity(nd);
            for d in 0..nd {
                eligible.push(nb[d] > 1 || shape[d] * nb[d_max] >= shape[d_max] * nb[d]);
            }
            for d0 in (0..nd).rev() {
                if eligible[d0] {
                    nb[d0] *= 2;
                    nb_tot *= 2;
                }
            }
            for d0 in (0..nd).rev() {
                if !eligible[d0] {
                    continue;
                }
                let n_conv = nb_tot / nb[d0];
                for i_conv in 0..n_conv {
                    let offset = line_offset(i_conv, d0, &nb, &strides, Some(&eligible));
                    convolve_step(
                        &mut data[offset..],
                        strides[d0],
                        nb[d0],
                        false,
                        wfltr,
                        scratch,
                    );
                }
            }
        }
    }
}

fn nd_dispatch<T: Float>(
    data: &mut [T],
    shape: &[usize],
    forward: bool,
    basis: Basis,
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    let longest = validate_shape(data.len(), shape)?;
    debug!(
        "dwt_nd: shape={:?} forward={} basis={:?} taps={}/{}",
        shape,
        forward,
        basis,
        wfltr.h().len(),
        wfltr.h_tilde().len()
    );
    let mut scratch = vec![0.0f64; longest];
    match basis {
        Basis::Standard => nd_standard(data, shape, forward, wfltr, &mut scratch),
        Basis::NonStandard => nd_nonstandard(data, shape, forward, wfltr, &mut scratch),
    }
    Ok(())
}

/// Forward N-D wavelet transform, in place.
///
/// `shape` is fastest-varying-first; `data.len()` must equal the product of
/// the shape, every axis size must be a power of two, and the number of
/// axes must lie in `1..=MAX_DIMS`. Validation failures leave the buffer
/// untouched.
pub fn dwt_nd_inplace<T: Float>(
    data: &mut [T],
    shape: &[usize],
    basis: Basis,
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    nd_dispatch(data, shape, true, basis, wfltr)
}

/// Inverse N-D wavelet transform, in place.
pub fn idwt_nd_inplace<T: Float>(
    data: &mut [T],
    shape: &[usize],
    basis: Basis,
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    nd_dispatch(data, shape, false, basis, wfltr)
}

/// Forward N-D wavelet transform into a separate buffer of the same length.
pub fn dwt_nd_out_of_place<T: Float>(
    input: &[T],
    output: &mut [T],
    shape: &[usize],
    basis: Basis,
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    if input.len() != output.len() {
        return Err(WaveletError::MismatchedLengths);
    }
    validate_shape(input.len(), shape)?;
    output.copy_from_slice(input);
    nd_dispatch(output, shape, true, basis, wfltr)
}

/// Inverse N-D wavelet transform into a separate buffer of the same length.
pub fn idwt_nd_out_of_place<T: Float>(
    input: &[T],
    output: &mut [T],
    shape: &[usize],
    basis: Basis,
    wfltr: &WaveletFilter,
) -> Result<(), WaveletError> {
    if input.len() != output.len() {
        return Err(WaveletError::MismatchedLengths);
    }
    validate_shape(input.len(), shape)?;
    output.copy_from_slice(input);
    nd_dispatch(output, shape, false, basis, wfltr)
}
