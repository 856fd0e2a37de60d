//! Index arithmetic shared by every transform level.
//!
//! Periodic (wrap-around) boundary handling and fastest-varying-first stride
//! computation live here so the modular arithmetic is written and tested
//! exactly once. no_std + alloc compatible.

extern crate alloc;
use alloc::vec::Vec;

/// Wrap a possibly-negative convolution index into `[0, n)`.
///
/// Convolution taps are addressed as `2i + j - offset`, which can run below
/// zero or past the working size; both data indices and filter taps wrap
/// periodically.
#[inline(always)]
pub(crate) fn wrap(idx: isize, n: usize) -> usize {
    let n = n as isize;
    (((idx % n) + n) % n) as usize
}

/// Element strides for a shape given fastest-varying-first (axis 0 is the
/// innermost axis). Returns one stride per axis; the product of the last
/// axis' stride and size is the total element count.
pub(crate) fn strides_for(shape: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(shape.len());
    let mut acc = 1usize;
    for &n in shape {
        strides.push(acc);
        acc *= n;
    }
    strides
}
