//! RGB Spectrum.

use super::*;
use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Sub};

/// Number of spectral samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents an spectral power distribution (SPD) with
/// a weighted sum of red, green and blue components.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RGBSpectrum {
    /// The sampled spectral values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Create a new `RGBSpectrum` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        let ret = Self {
            c: [v; RGB_SAMPLES],
        };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Create a new `RGBSpectrum` from red, green and blue values.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        let ret = Self { c: [r, g, b] };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Returns a black spectrum.
    pub fn zero() -> Self {
        Self::new(0.0)
    }

    /// Returns a spectrum of ones.
    pub fn one() -> Self {
        Self::new(1.0)
    }
}

impl Default for RGBSpectrum {
    /// Return a black `RGBSpectrum`.
    fn default() -> Self {
        Self {
            c: [0.0; RGB_SAMPLES],
        }
    }
}

impl CoefficientSpectrum for RGBSpectrum {
    /// Returns the coefficients.
    fn samples(&self) -> &[Float] {
        &self.c
    }

    /// Returns the y-coefficient of XYZ colour.
    fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Clamps the values to given [low, high] interval.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self {
        Self {
            c: [
                clamp(self.c[0], low, high),
                clamp(self.c[1], low, high),
                clamp(self.c[2], low, high),
            ],
        }
    }

    /// Returns the RGB coefficients.
    fn to_rgb(&self) -> [Float; 3] {
        self.c
    }
}

impl Add for RGBSpectrum {
    type Output = RGBSpectrum;

    /// Adds the coefficients of 2 spectra.
    ///
    /// * `other` - The other spectrum.
    fn add(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] + other.c[0],
                self.c[1] + other.c[1],
                self.c[2] + other.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    /// Adds the coefficients of another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = RGBSpectrum;

    /// Subtracts the coefficients of another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn sub(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] - other.c[0],
                self.c[1] - other.c[1],
                self.c[2] - other.c[2],
            ],
        }
    }
}

impl Mul for RGBSpectrum {
    type Output = RGBSpectrum;

    /// Multiplies the coefficients of 2 spectra component-wise.
    ///
    /// * `other` - The other spectrum.
    fn mul(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] * other.c[0],
                self.c[1] * other.c[1],
                self.c[2] * other.c[2],
            ],
        }
    }
}

impl MulAssign for RGBSpectrum {
    /// Multiplies by the coefficients of another spectrum.
    ///
    /// * `other` - The other spectrum.
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = RGBSpectrum;

    /// Scales the coefficients.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self {
            c: [self.c[0] * f, self.c[1] * f, self.c[2] * f],
        }
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the coefficients of a spectrum.
    ///
    /// * `s` - The spectrum.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl MulAssign<Float> for RGBSpectrum {
    /// Scales the coefficients.
    ///
    /// * `f` - The scaling factor.
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = RGBSpectrum;

    /// Scales the coefficients by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        Self {
            c: [self.c[0] / f, self.c[1] / f, self.c[2] / f],
        }
    }
}

impl DivAssign<Float> for RGBSpectrum {
    /// Scales the coefficients by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Returns a coefficient.
    ///
    /// * `index` - Coefficient index.
    fn index(&self, index: usize) -> &Self::Output {
        &self.c[index]
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn luminance_of_white_is_one() {
        assert!(approx_eq!(f32, RGBSpectrum::one().y(), 1.0, epsilon = 0.0001));
        assert_eq!(RGBSpectrum::zero().y(), 0.0);
    }

    #[test]
    fn black_and_bad_values() {
        assert!(RGBSpectrum::default().is_black());
        assert!(!RGBSpectrum::from_rgb(0.0, 0.1, 0.0).is_black());
        assert!(RGBSpectrum::from_rgb(0.0, INFINITY, 0.0).has_infs());
        assert_eq!(RGBSpectrum::from_rgb(0.2, 0.9, 0.5).max_component_value(), 0.9);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(r in -2.0f32..2.0f32, g in -2.0f32..2.0f32, b in -2.0f32..2.0f32) {
            let s = RGBSpectrum::from_rgb(r, g, b).clamp(0.0, 1.0);
            prop_assert!(s.samples().iter().all(|v| (0.0..=1.0).contains(v)));
        }

        #[test]
        fn scaling_scales_luminance(v in 0.0f32..10.0f32, f in 0.0f32..10.0f32) {
            let s = RGBSpectrum::from_rgb(v, 0.5 * v, 0.25 * v);
            prop_assert!(approx_eq!(f32, (s * f).y(), s.y() * f, epsilon = 0.001));
        }
    }
}
