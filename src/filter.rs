//! Wavelet filter banks.
//!
//! A [`WaveletFilter`] holds the two lowpass filters of a (bi)orthogonal
//! wavelet family plus the four alignment offsets used by the convolution
//! engine. The highpass (detail) filters are never stored; they are derived
//! on the fly from the mirrored lowpass coefficients with alternating sign
//! (quadrature-mirror relation). Orthonormal families share one table for
//! analysis and synthesis.
//!
//! Coefficient sources: Daubechies, "Ten Lectures on Wavelets" (Tables 6.1,
//! 8.2, 8.4); Mallat, IEEE PAMI v.11 no.7 Table 1 (Battle-Lemarie); Beylkin,
//! Coifman, Rokhlin, Comm. Pure Appl. Math v.44 App. A (Coiflets); Reissell,
//! UBC TR 93-17 p.33 (Pseudocoiflets).
//!
//! no_std + alloc compatible.

extern crate alloc;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::dwt::{WaveletError, MIN_ORDER};

const SQRT2: f64 = core::f64::consts::SQRT_2;
const SQRT3: f64 = 1.732_050_807_568_877_293_527_45;
const SQRT15: f64 = 3.872_983_346_207_416_885_179_27;

/// One wavelet filter bank: analysis/synthesis lowpass coefficients and the
/// alignment offsets of the four logical filters (H, G, Htilde, Gtilde).
///
/// Coefficients are always `f64` regardless of the signal storage width.
/// Instances are cheap to clone and are never mutated by the transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveletFilter {
    pub(crate) h: Vec<f64>,
    pub(crate) h_tilde: Vec<f64>,
    pub(crate) off_h: i32,
    pub(crate) off_g: i32,
    pub(crate) off_h_tilde: i32,
    pub(crate) off_g_tilde: i32,
}

impl WaveletFilter {
    /// Build a custom filter bank. Both lowpass filters must have at least
    /// [`MIN_ORDER`] taps.
    pub fn new(
        h: Vec<f64>,
        h_tilde: Vec<f64>,
        offsets: [i32; 4],
    ) -> Result<Self, WaveletError> {
        if h.len() < MIN_ORDER || h_tilde.len() < MIN_ORDER {
            return Err(WaveletError::FilterTooShort);
        }
        let [off_h, off_g, off_h_tilde, off_g_tilde] = offsets;
        Ok(Self {
            h,
            h_tilde,
            off_h,
            off_g,
            off_h_tilde,
            off_g_tilde,
        })
    }

    fn orthonormal(h: &[f64], off_h: i32, off_g: i32) -> Self {
        Self {
            h: h.to_vec(),
            h_tilde: h.to_vec(),
            off_h,
            off_g,
            off_h_tilde: off_h,
            off_g_tilde: off_g,
        }
    }

    fn biorthogonal(h: &[f64], h_tilde: &[f64], offsets: [i32; 4]) -> Self {
        let [off_h, off_g, off_h_tilde, off_g_tilde] = offsets;
        Self {
            h: h.to_vec(),
            h_tilde: h_tilde.to_vec(),
            off_h,
            off_g,
            off_h_tilde,
            off_g_tilde,
        }
    }

    /// Analysis (decomposition) lowpass coefficients.
    pub fn h(&self) -> &[f64] {
        &self.h
    }

    /// Synthesis (reconstruction) lowpass coefficients.
    pub fn h_tilde(&self) -> &[f64] {
        &self.h_tilde
    }

    /// Offsets of H, G, Htilde and Gtilde, in that order.
    pub fn offsets(&self) -> [i32; 4] {
        [self.off_h, self.off_g, self.off_h_tilde, self.off_g_tilde]
    }

    /// Swap the analysis and synthesis roles of the filter bank.
    ///
    /// Only meaningful for biorthogonal families; orthonormal filters come
    /// back unchanged.
    pub fn exchanged(&self) -> Self {
        Self {
            h: self.h_tilde.clone(),
            h_tilde: self.h.clone(),
            off_h: self.off_h_tilde,
            off_g: self.off_g_tilde,
            off_h_tilde: self.off_h,
            off_g_tilde: self.off_g,
        }
    }

    /// Override the four alignment offsets (H, G, Htilde, Gtilde).
    pub fn with_offsets(&self, offsets: [i32; 4]) -> Self {
        let [off_h, off_g, off_h_tilde, off_g_tilde] = offsets;
        Self {
            h: self.h.clone(),
            h_tilde: self.h_tilde.clone(),
            off_h,
            off_g,
            off_h_tilde,
            off_g_tilde,
        }
    }
}

// ---------------------------------------------------------------------------
// Coefficient tables
// ---------------------------------------------------------------------------

// taps 5 and 6 carry a sign change relative to Mallat's paper
const H_BATTLE_LEMARIE: [f64; 24] = [
    SQRT2 * -0.002,
    SQRT2 * -0.003,
    SQRT2 * 0.006,
    SQRT2 * 0.006,
    SQRT2 * -0.013,
    SQRT2 * -0.012,
    SQRT2 * 0.030,
    SQRT2 * 0.023,
    SQRT2 * -0.078,
    SQRT2 * -0.035,
    SQRT2 * 0.307,
    SQRT2 * 0.542,
    SQRT2 * 0.307,
    SQRT2 * -0.035,
    SQRT2 * -0.078,
    SQRT2 * 0.023,
    SQRT2 * 0.030,
    SQRT2 * -0.012,
    SQRT2 * -0.013,
    SQRT2 * 0.006,
    SQRT2 * 0.006,
    SQRT2 * -0.003,
    SQRT2 * -0.002,
    0.0,
];

const H_BURT_ADELSON: [f64; 6] = [
    SQRT2 * -1.0 / 20.0,
    SQRT2 * 5.0 / 20.0,
    SQRT2 * 12.0 / 20.0,
    SQRT2 * 5.0 / 20.0,
    SQRT2 * -1.0 / 20.0,
    0.0,
];
const HTILDE_BURT_ADELSON: [f64; 8] = [
    0.0,
    SQRT2 * -3.0 / 280.0,
    SQRT2 * -15.0 / 280.0,
    SQRT2 * 73.0 / 280.0,
    SQRT2 * 170.0 / 280.0,
    SQRT2 * 73.0 / 280.0,
    SQRT2 * -15.0 / 280.0,
    SQRT2 * -3.0 / 280.0,
];

const H_COIFLET_2: [f64; 6] = [
    SQRT2 * (SQRT15 - 3.0) / 32.0,
    SQRT2 * (1.0 - SQRT15) / 32.0,
    SQRT2 * (6.0 - 2.0 * SQRT15) / 32.0,
    SQRT2 * (2.0 * SQRT15 + 6.0) / 32.0,
    SQRT2 * (SQRT15 + 13.0) / 32.0,
    SQRT2 * (9.0 - SQRT15) / 32.0,
];

const H_COIFLET_4: [f64; 12] = [
    0.0011945726958388,
    -0.01284557955324,
    0.024804330519353,
    0.050023519962135,
    -0.15535722285996,
    -0.071638282295294,
    0.57046500145033,
    0.75033630585287,
    0.28061165190244,
    -0.0074103835186718,
    -0.014611552521451,
    -0.0013587990591632,
];

const H_COIFLET_6: [f64; 18] = [
    -0.0016918510194918,
    -0.00348787621998426,
    0.019191160680044,
    0.021671094636352,
    -0.098507213321468,
    -0.056997424478478,
    0.45678712217269,
    0.78931940900416,
    0.38055713085151,
    -0.070438748794943,
    -0.056514193868065,
    0.036409962612716,
    0.0087601307091635,
    -0.011194759273835,
    -0.0019213354141368,
    0.0020413809772660,
    0.00044583039753204,
    -0.00021625727664696,
];

const H_DAUBECHIES_4: [f64; 4] = [
    SQRT2 * (1.0 + SQRT3) / 8.0,
    SQRT2 * (3.0 + SQRT3) / 8.0,
    SQRT2 * (3.0 - SQRT3) / 8.0,
    SQRT2 * (1.0 - SQRT3) / 8.0,
];

const H_DAUBECHIES_6: [f64; 6] = [
    0.332670552950,
    0.806891509311,
    0.459877502118,
    -0.135011020010,
    -0.085441273882,
    0.035226291882,
];

const H_DAUBECHIES_8: [f64; 8] = [
    0.230377813309,
    0.714846570553,
    0.6308807667930,
    -0.027983769417,
    -0.187034811719,
    0.030841381836,
    0.032883011667,
    -0.010597401785,
];

const H_DAUBECHIES_10: [f64; 10] = [
    0.1601023979741929,
    0.6038292697971895,
    0.7243085284377726,
    0.1384281459013203,
    -0.2422948870663823,
    -0.0322448695846381,
    0.0775714938400459,
    -0.0062414902127983,
    -0.0125807519990820,
    0.0033357252854738,
];

const H_DAUBECHIES_12: [f64; 12] = [
    0.1115407433501095,
    0.4946238903984533,
    0.7511339080210959,
    0.3152503517091982,
    -0.2262646939654400,
    -0.1297668675672625,
    0.0975016055873225,
    0.0275228655303053,
    -0.0315820393184862,
    0.0005538422011614,
    0.0047772575119455,
    -0.0010773010853085,
];

const H_DAUBECHIES_20: [f64; 20] = [
    0.026670057901,
    0.188176800078,
    0.527201188932,
    0.688459039454,
    0.281172343661,
    -0.249846424327,
    -0.195946274377,
    0.127369340336,
    0.093057364604,
    -0.071394147166,
    -0.029457536822,
    0.033212674059,
    0.003606553567,
    -0.010733175483,
    0.001395351747,
    0.001992405295,
    -0.000685856695,
    -0.000116466855,
    0.000093588670,
    -0.000013264203,
];

const H_HAAR: [f64; 2] = [SQRT2 * 0.5, SQRT2 * 0.5];

const H_PSEUDOCOIFLET_4: [f64; 14] = [
    SQRT2 * -1.0 / 512.0,
    0.0,
    SQRT2 * 18.0 / 512.0,
    SQRT2 * -16.0 / 512.0,
    SQRT2 * -63.0 / 512.0,
    SQRT2 * 144.0 / 512.0,
    SQRT2 * 348.0 / 512.0,
    SQRT2 * 144.0 / 512.0,
    SQRT2 * -63.0 / 512.0,
    SQRT2 * -16.0 / 512.0,
    SQRT2 * 18.0 / 512.0,
    0.0,
    SQRT2 * -1.0 / 512.0,
    0.0,
];
const HTILDE_PSEUDOCOIFLET_4: [f64; 8] = [
    0.0,
    SQRT2 * -1.0 / 32.0,
    0.0,
    SQRT2 * 9.0 / 32.0,
    SQRT2 * 16.0 / 32.0,
    SQRT2 * 9.0 / 32.0,
    0.0,
    SQRT2 * -1.0 / 32.0,
];

const H_SPLINE_2: [f64; 6] = [
    SQRT2 * -0.125,
    SQRT2 * 0.25,
    SQRT2 * 0.75,
    SQRT2 * 0.25,
    SQRT2 * -0.125,
    0.0,
];
const H_SPLINE_3: [f64; 4] = [
    SQRT2 * 1.0 / 8.0,
    SQRT2 * 3.0 / 8.0,
    SQRT2 * 3.0 / 8.0,
    SQRT2 * 1.0 / 8.0,
];
const H_SPLINE_4: [f64; 10] = [
    SQRT2 * 3.0 / 128.0,
    SQRT2 * -6.0 / 128.0,
    SQRT2 * -16.0 / 128.0,
    SQRT2 * 38.0 / 128.0,
    SQRT2 * 90.0 / 128.0,
    SQRT2 * 38.0 / 128.0,
    SQRT2 * -16.0 / 128.0,
    SQRT2 * -6.0 / 128.0,
    SQRT2 * 3.0 / 128.0,
    0.0,
];
const HTILDE_SPLINE_2: [f64; 4] = [
    0.0,
    SQRT2 * 1.0 / 4.0,
    SQRT2 * 2.0 / 4.0,
    SQRT2 * 1.0 / 4.0,
];
const HTILDE_SPLINE_3: [f64; 8] = [
    SQRT2 * 3.0 / 64.0,
    SQRT2 * -9.0 / 64.0,
    SQRT2 * -7.0 / 64.0,
    SQRT2 * 45.0 / 64.0,
    SQRT2 * 45.0 / 64.0,
    SQRT2 * -7.0 / 64.0,
    SQRT2 * -9.0 / 64.0,
    SQRT2 * 3.0 / 64.0,
];
// taps 4 and 11 corrected ("363" was "336" in the text)
const HTILDE_SPLINE_7: [f64; 16] = [
    SQRT2 * -35.0 / 16384.0,
    SQRT2 * -105.0 / 16384.0,
    SQRT2 * -195.0 / 16384.0,
    SQRT2 * 865.0 / 16384.0,
    SQRT2 * 363.0 / 16384.0,
    SQRT2 * -3489.0 / 16384.0,
    SQRT2 * -307.0 / 16384.0,
    SQRT2 * 11025.0 / 16384.0,
    SQRT2 * 11025.0 / 16384.0,
    SQRT2 * -307.0 / 16384.0,
    SQRT2 * -3489.0 / 16384.0,
    SQRT2 * 363.0 / 16384.0,
    SQRT2 * 865.0 / 16384.0,
    SQRT2 * -195.0 / 16384.0,
    SQRT2 * -105.0 / 16384.0,
    SQRT2 * -35.0 / 16384.0,
];

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The fixed catalog of wavelet families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wavelet {
    Haar,
    Daubechies4,
    Daubechies6,
    Daubechies8,
    Daubechies10,
    Daubechies12,
    Daubechies20,
    Coiflet2,
    Coiflet4,
    Coiflet6,
    Spline2_2,
    Spline2_4,
    Spline3_3,
    Spline3_7,
    BattleLemarie,
    BurtAdelson,
    Pseudocoiflet4_4,
}

impl Wavelet {
    /// Every catalog member, for iteration.
    pub const ALL: [Wavelet; 17] = [
        Wavelet::Haar,
        Wavelet::Daubechies4,
        Wavelet::Daubechies6,
        Wavelet::Daubechies8,
        Wavelet::Daubechies10,
        Wavelet::Daubechies12,
        Wavelet::Daubechies20,
        Wavelet::Coiflet2,
        Wavelet::Coiflet4,
        Wavelet::Coiflet6,
        Wavelet::Spline2_2,
        Wavelet::Spline2_4,
        Wavelet::Spline3_3,
        Wavelet::Spline3_7,
        Wavelet::BattleLemarie,
        Wavelet::BurtAdelson,
        Wavelet::Pseudocoiflet4_4,
    ];

    /// Build the filter bank for this family.
    pub fn filter(self) -> WaveletFilter {
        match self {
            Wavelet::Haar => WaveletFilter::orthonormal(&H_HAAR, 0, 0),
            Wavelet::Daubechies4 => WaveletFilter::orthonormal(&H_DAUBECHIES_4, 1, 1),
            Wavelet::Daubechies6 => WaveletFilter::orthonormal(&H_DAUBECHIES_6, 1, 3),
            Wavelet::Daubechies8 => WaveletFilter::orthonormal(&H_DAUBECHIES_8, 1, 5),
            Wavelet::Daubechies10 => WaveletFilter::orthonormal(&H_DAUBECHIES_10, 1, 7),
            Wavelet::Daubechies12 => WaveletFilter::orthonormal(&H_DAUBECHIES_12, 1, 9),
            Wavelet::Daubechies20 => WaveletFilter::orthonormal(&H_DAUBECHIES_20, 2, 16),
            Wavelet::Coiflet2 => WaveletFilter::orthonormal(&H_COIFLET_2, 3, 1),
            Wavelet::Coiflet4 => WaveletFilter::orthonormal(&H_COIFLET_4, 6, 4),
            Wavelet::Coiflet6 => WaveletFilter::orthonormal(&H_COIFLET_6, 6, 10),
            Wavelet::Spline2_2 => {
                WaveletFilter::biorthogonal(&H_SPLINE_2, &HTILDE_SPLINE_2, [2, 0, 2, 2])
            }
            Wavelet::Spline2_4 => {
                WaveletFilter::biorthogonal(&H_SPLINE_4, &HTILDE_SPLINE_2, [4, 0, 2, 4])
            }
            Wavelet::Spline3_3 => {
                WaveletFilter::biorthogonal(&H_SPLINE_3, &HTILDE_SPLINE_3, [1, 3, 3, 1])
            }
            Wavelet::Spline3_7 => {
                WaveletFilter::biorthogonal(&H_SPLINE_3, &HTILDE_SPLINE_7, [1, 7, 7, 1])
            }
            Wavelet::BattleLemarie => WaveletFilter::orthonormal(&H_BATTLE_LEMARIE, 11, 11),
            Wavelet::BurtAdelson => {
                WaveletFilter::biorthogonal(&H_BURT_ADELSON, &HTILDE_BURT_ADELSON, [2, 2, 4, 2])
            }
            Wavelet::Pseudocoiflet4_4 => WaveletFilter::biorthogonal(
                &H_PSEUDOCOIFLET_4,
                &HTILDE_PSEUDOCOIFLET_4,
                [6, 2, 4, 6],
            ),
        }
    }

    /// Look a family up by name.
    ///
    /// Accepts the short codes used by host applications ("D4", "S2-2",
    /// "BL", ...) as well as "haar", case-insensitively. An unrecognized
    /// family/order combination is a configuration error.
    pub fn from_name(name: &str) -> Result<Wavelet, WaveletError> {
        const NAMES: [(&str, Wavelet); 18] = [
            ("haar", Wavelet::Haar),
            ("d2", Wavelet::Haar),
            ("d4", Wavelet::Daubechies4),
            ("d6", Wavelet::Daubechies6),
            ("d8", Wavelet::Daubechies8),
            ("d10", Wavelet::Daubechies10),
            ("d12", Wavelet::Daubechies12),
            ("d20", Wavelet::Daubechies20),
            ("c2", Wavelet::Coiflet2),
            ("c4", Wavelet::Coiflet4),
            ("c6", Wavelet::Coiflet6),
            ("s2-2", Wavelet::Spline2_2),
            ("s2-4", Wavelet::Spline2_4),
            ("s3-3", Wavelet::Spline3_3),
            ("s3-7", Wavelet::Spline3_7),
            ("bl", Wavelet::BattleLemarie),
            ("ba", Wavelet::BurtAdelson),
            ("pc", Wavelet::Pseudocoiflet4_4),
        ];
        let name = name.trim();
        for (code, wavelet) in NAMES {
            if name.eq_ignore_ascii_case(code) {
                return Ok(wavelet);
            }
        }
        Err(WaveletError::UnknownWavelet)
    }
}

/// Cache of built filter banks, keyed by family.
///
/// Filter construction copies the coefficient tables to the heap; callers
/// that switch between families repeatedly can hold a bank instead.
#[derive(Default)]
pub struct WaveletBank {
    cache: HashMap<Wavelet, WaveletFilter>,
}

impl WaveletBank {
    /// Create a new empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the cached filter bank for `wavelet`, building it on first
    /// use.
    pub fn get(&mut self, wavelet: Wavelet) -> &WaveletFilter {
        self.cache.entry(wavelet).or_insert_with(|| wavelet.filter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_catalog_minimum_order() {
        for wavelet in Wavelet::ALL {
            let f = wavelet.filter();
            assert!(f.h().len() >= MIN_ORDER, "{:?}", wavelet);
            assert!(f.h_tilde().len() >= MIN_ORDER, "{:?}", wavelet);
        }
    }

    #[test]
    fn test_haar_coefficients() {
        let f = Wavelet::Haar.filter();
        assert_eq!(f.h(), f.h_tilde());
        assert!((f.h()[0] - 0.7071067811865476).abs() < 1e-15);
        assert!((f.h()[1] - 0.7071067811865476).abs() < 1e-15);
        assert_eq!(f.offsets(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_orthonormal_families_share_tables() {
        for wavelet in [Wavelet::Daubechies8, Wavelet::Coiflet4, Wavelet::BattleLemarie] {
            let f = wavelet.filter();
            assert_eq!(f.h(), f.h_tilde());
        }
    }

    #[test]
    fn test_exchange_swaps_roles() {
        let f = Wavelet::Spline2_2.filter();
        let e = f.exchanged();
        assert_eq!(e.h(), f.h_tilde());
        assert_eq!(e.h_tilde(), f.h());
        assert_eq!(e.offsets(), [2, 2, 2, 0]);
        // exchanging twice restores the original
        assert_eq!(e.exchanged(), f);
    }

    #[test]
    fn test_with_offsets_overrides() {
        let f = Wavelet::Daubechies4.filter().with_offsets([0, 2, 0, 2]);
        assert_eq!(f.offsets(), [0, 2, 0, 2]);
        assert_eq!(f.h(), Wavelet::Daubechies4.filter().h());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Wavelet::from_name("haar"), Ok(Wavelet::Haar));
        assert_eq!(Wavelet::from_name("D2"), Ok(Wavelet::Haar));
        assert_eq!(Wavelet::from_name("d20"), Ok(Wavelet::Daubechies20));
        assert_eq!(Wavelet::from_name(" S3-7 "), Ok(Wavelet::Spline3_7));
        assert_eq!(Wavelet::from_name("pc"), Ok(Wavelet::Pseudocoiflet4_4));
        assert_eq!(Wavelet::from_name("d5"), Err(WaveletError::UnknownWavelet));
        assert_eq!(
            Wavelet::from_name("s2-3"),
            Err(WaveletError::UnknownWavelet)
        );
    }

    #[test]
    fn test_custom_filter_validation() {
        assert_eq!(
            WaveletFilter::new(vec![1.0], vec![1.0, 1.0], [0; 4]),
            Err(WaveletError::FilterTooShort)
        );
        assert!(WaveletFilter::new(vec![0.5, 0.5], vec![0.5, 0.5], [0; 4]).is_ok());
    }

    #[test]
    fn test_bank_caches() {
        let mut bank = WaveletBank::new();
        let first = bank.get(Wavelet::Daubechies6).clone();
        assert_eq!(bank.get(Wavelet::Daubechies6), &first);
    }
}
