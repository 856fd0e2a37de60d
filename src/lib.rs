//! # kwt - Discrete wavelet transforms for Rust
//!
//! A filter-bank parameterized discrete wavelet transform (DWT) engine:
//! forward and inverse transforms in one and N dimensions, with a catalog of
//! interchangeable wavelet families. Works on desktop and embedded targets.
//!
//! ## Features
//!
//! - **🔧 One generic engine** over `f32`/`f64` signals; accumulation is
//!   always performed in `f64` and narrowed on write
//! - **📐 Two N-D decompositions**: separable "standard" basis and
//!   interleaved "non-standard" (pyramid) basis, up to 32 dimensions
//! - **🗂 17 wavelet families**: Haar, Daubechies, Coiflets, biorthogonal
//!   splines, Battle-Lemarie, Burt-Adelson, Pseudocoiflets — plus exchange
//!   and manual-offset modifiers
//! - **🔄 In-place and out-of-place APIs**, strided so no axis ever needs a
//!   physical transpose
//! - **📉 Coefficient thresholding** with heap-selected compression targets,
//!   and smooth wavelet refinement onto finer grids
//! - **🌐 no_std + alloc** compatible
//!
//! Boundaries are periodic (wrap-around) and every transformed axis size
//! must be a power of two; validation happens before any data is touched.
//!
//! ## Cargo Features
//!
//! - `std` (default): implement `std::error::Error` for [`WaveletError`]
//!
//! ## Example
//!
//! ```
//! use kwt::{dwt_nd_inplace, idwt_nd_inplace, Basis, Wavelet};
//!
//! let filter = Wavelet::Daubechies4.filter();
//! let mut data: Vec<f64> = (0..64).map(|i| i as f64).collect();
//! // shape is fastest-varying-first: 8 columns, 8 rows
//! dwt_nd_inplace(&mut data, &[8, 8], Basis::NonStandard, &filter).unwrap();
//! idwt_nd_inplace(&mut data, &[8, 8], Basis::NonStandard, &filter).unwrap();
//! assert!((data[9] - 9.0).abs() < 1e-9);
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license ([LICENSE-MIT](LICENSE-MIT) or https://opensource.org/licenses/MIT)
//!
//! at your option.

#![no_std]
#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

/// 1-D discrete wavelet transform
///
/// The convolution step and the multi-level octave pyramid, plus the
/// engine's error type.
pub mod dwt;

/// Wavelet filter banks
///
/// The filter catalog, the exchange and manual-offset modifiers, and a
/// cache for built filters.
pub mod filter;

/// Index arithmetic
///
/// Periodic wraparound and stride computation, shared by every level.
mod index;

/// N-dimensional transforms
///
/// Standard (separable) and non-standard (pyramid) decompositions.
pub mod nddwt;

/// Numeric element trait
///
/// Generic storage width with wide accumulation.
pub mod num;

/// Wavelet refinement
///
/// Smooth interpolation of a signal onto a finer dyadic grid.
pub mod refine;

/// Coefficient thresholding
///
/// Magnitude thresholds, compression targets, and their statistics.
pub mod threshold;

pub use dwt::{
    dwt_1d_inplace, dwt_1d_out_of_place, idwt_1d_inplace, idwt_1d_out_of_place, WaveletError,
    MIN_ORDER,
};
pub use filter::{Wavelet, WaveletBank, WaveletFilter};
pub use nddwt::{
    dwt_nd_inplace, dwt_nd_out_of_place, idwt_nd_inplace, idwt_nd_out_of_place, Basis, MAX_DIMS,
};
pub use num::Float;
pub use refine::refine_1d;
pub use threshold::{compress_inplace, threshold_for_fraction, threshold_inplace, CompressionStats};
