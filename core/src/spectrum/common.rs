//! Common.

use crate::pbrt::*;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Sub};

/// Interface for spectra stored as a fixed number of coefficients.
pub trait CoefficientSpectrum:
    Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Mul<Output = Self>
    + MulAssign
    + Mul<Float, Output = Self>
    + MulAssign<Float>
    + Div<Float, Output = Self>
    + DivAssign<Float>
    + Index<usize, Output = Float>
    + Copy
    + Default
    + Sized
{
    /// Returns the coefficients.
    fn samples(&self) -> &[Float];

    /// Returns true if any coefficient is NaN.
    fn has_nans(&self) -> bool {
        self.samples().iter().any(|v| v.is_nan())
    }

    /// Returns true if any coefficient is infinite.
    fn has_infs(&self) -> bool {
        self.samples().iter().any(|v| v.is_infinite())
    }

    /// Returns true if all coefficients are zero.
    fn is_black(&self) -> bool {
        self.samples().iter().all(|v| *v == 0.0)
    }

    /// Returns the maximum coefficient value.
    fn max_component_value(&self) -> Float {
        self.samples().iter().fold(-INFINITY, |m, v| max(m, *v))
    }

    /// Returns the y-coefficient of XYZ colour, which is closely related
    /// to luminance.
    fn y(&self) -> Float;

    /// Returns a spectrum with every coefficient clamped to `[low, high]`.
    ///
    /// * `low`  - Low value.
    /// * `high` - High value.
    fn clamp(&self, low: Float, high: Float) -> Self;

    /// Converts the spectrum to RGB coefficients.
    fn to_rgb(&self) -> [Float; 3];
}
