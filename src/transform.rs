//! Value transforms that linearize an axis scale.
//!
//! A transform maps user-facing values onto an internal linear scale
//! (`forward`) and back (`inverse`). A [`Regular`](crate::axis::Regular) axis
//! bins equidistantly on the internal scale, so pairing it with a transform
//! gives logarithmic, square-root or power-law binning without a separate axis
//! type.
//!
//! # Available Transforms
//!
//! - [`Id`] - identity, plain equidistant bins
//! - [`Log`] - natural logarithm, bins of equal ratio
//! - [`Sqrt`] - square root
//! - [`Pow`] - `x^p` with a runtime power
//!
//! # Domain
//!
//! Transforms are not clamped. Values outside a transform's domain produce
//! NaN or infinities (`Log` of `0.0` is `-inf`, `Log` of `-1.0` is NaN), and
//! the axis turns those into underflow/overflow indices.
//!
//! # Examples
//!
//! ```rust
//! use histaxis::transform::{Log, Transform};
//!
//! let t = Log;
//! assert_eq!(t.forward(1.0_f64), 0.0);
//! assert!((t.inverse(t.forward(10.0_f64)) - 10.0).abs() < 1e-12);
//! assert_eq!(t.forward(0.0_f64), f64::NEG_INFINITY);
//! ```

use std::fmt;

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A pure bidirectional mapping between the value domain and the internal
/// linear scale of an axis.
///
/// `inverse(forward(x))` must equal `x` up to floating-point rounding for
/// every `x` in the transform's domain.
pub trait Transform: Clone + PartialEq + fmt::Debug + 'static {
    fn forward<F: Float>(&self, x: F) -> F;

    fn inverse<F: Float>(&self, x: F) -> F;
}

/// Identity transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id;

impl Transform for Id {
    #[inline]
    fn forward<F: Float>(&self, x: F) -> F {
        x
    }

    #[inline]
    fn inverse<F: Float>(&self, x: F) -> F {
        x
    }
}

/// Natural logarithm; the inverse is `exp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log;

impl Transform for Log {
    #[inline]
    fn forward<F: Float>(&self, x: F) -> F {
        x.ln()
    }

    #[inline]
    fn inverse<F: Float>(&self, x: F) -> F {
        x.exp()
    }
}

/// Square root; the inverse squares.
///
/// Note that the inverse maps `-inf` to `+inf`, so the lower edge of the
/// underflow bin of a sqrt axis is `+inf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sqrt;

impl Transform for Sqrt {
    #[inline]
    fn forward<F: Float>(&self, x: F) -> F {
        x.sqrt()
    }

    #[inline]
    fn inverse<F: Float>(&self, x: F) -> F {
        x * x
    }
}

/// Power law `x^power`; the inverse is `x^(1/power)`.
///
/// # Examples
///
/// ```rust
/// use histaxis::transform::{Pow, Transform};
///
/// let t = Pow::new(2.0);
/// assert_eq!(t.forward(3.0_f64), 9.0);
/// assert_eq!(t.inverse(9.0_f64), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pow {
    pub power: f64,
}

impl Pow {
    pub const fn new(power: f64) -> Self {
        Self { power }
    }

    fn power_as<F: Float>(&self) -> F {
        F::from(self.power).unwrap_or_else(F::nan)
    }
}

impl Default for Pow {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Transform for Pow {
    #[inline]
    fn forward<F: Float>(&self, x: F) -> F {
        x.powf(self.power_as())
    }

    #[inline]
    fn inverse<F: Float>(&self, x: F) -> F {
        x.powf(self.power_as::<F>().recip())
    }
}
