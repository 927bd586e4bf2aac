use std::fmt;
use std::marker::PhantomData;

use num_traits::Float;
use serde::{Deserialize, Deserializer, Serialize};

use super::{Axis, AxisOptions, AxisValue, Bins, Continuous, Interval, Metadata};
use crate::error::{Error, Result};
use crate::transform::{Id, Transform};

/// Full turn in radians, the default period of [`Regular::phase`].
pub const TWO_PI: f64 = std::f64::consts::TAU;

/// Regular axis: `n` equidistant bins over `[start, stop)` on a transformed scale.
///
/// `Regular` is the most common binning rule. Computing a bin index is O(1):
/// the value is transformed, shifted and scaled onto `[0, 1)` and multiplied
/// by the bin count.
///
/// # Type Parameters
///
/// - `V`: Value type (`f64` or `f32`)
/// - `T`: [`Transform`] applied before binning (default [`Id`])
/// - `M`: [`Metadata`] attached to the axis (default `String`)
///
/// # Features
///
/// - **Transforms**: log, sqrt and power binning through the transform parameter
/// - **Circular axes**: values wrap around the range, e.g. for angles
/// - **Inverted ranges**: `start > stop` is allowed; bin 0 starts at `start`
/// - **Well-defined outliers**: `-inf` underflows, `+inf` and NaN overflow
///
/// # Index Sentinels
///
/// `index` returns `-1` for values below the range and `size()` for values
/// above it or NaN. A circular axis never underflows; it returns `size()` only
/// for non-finite values.
///
/// # Examples
///
/// ## Basic Usage
///
/// ```rust
/// use histaxis::axis::{Axis, Regular};
///
/// let axis = Regular::new(4, -2.0, 2.0)?;
///
/// assert_eq!(axis.index(&-10.0), -1);
/// assert_eq!(axis.index(&-2.0), 0);
/// assert_eq!(axis.index(&0.0), 2);
/// assert_eq!(axis.index(&10.0), 4);
/// assert_eq!(axis.index(&f64::NAN), 4);
///
/// // Edges of bin 1
/// assert_eq!(axis.bin(1).lower(), -1.0);
/// assert_eq!(axis.bin(1).upper(), 0.0);
/// # Ok::<(), histaxis::Error>(())
/// ```
///
/// ## Logarithmic Binning
///
/// ```rust
/// use histaxis::{axis::{Axis, Regular}, transform::Log};
///
/// let axis = Regular::with_transform(Log, 2, 1.0, 100.0)?;
///
/// assert_eq!(axis.index(&1.0), 0);
/// assert_eq!(axis.index(&10.0), 1);
/// assert_eq!(axis.index(&100.0), 2);
/// assert_eq!(axis.index(&0.0), -1);
/// # Ok::<(), histaxis::Error>(())
/// ```
///
/// ## Circular Axis
///
/// ```rust
/// use histaxis::axis::{Axis, Regular};
///
/// let axis = Regular::circular(4, 0.0, 1.0)?;
///
/// assert_eq!(axis.index(&0.25), 1);
/// assert_eq!(axis.index(&1.25), 1);
/// assert_eq!(axis.index(&-3.0), 0);
/// # Ok::<(), histaxis::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "T: Serialize, M: Serialize"))]
pub struct Regular<V = f64, T = Id, M = String> {
    transform: T,
    size: i32,
    min: f64,
    delta: f64,
    options: AxisOptions,
    metadata: M,
    #[serde(skip)]
    _value: PhantomData<V>,
}

/// Real value types a [`Regular`] axis can bin.
pub trait RealValue: Float + AxisValue + fmt::Debug + fmt::Display {}

impl<V> RealValue for V where V: Float + AxisValue + fmt::Debug + fmt::Display {}

fn to_internal<V: RealValue>(value: V) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

fn bin_count(bins: u32) -> Result<i32> {
    match i32::try_from(bins) {
        Ok(size) if size > 0 => Ok(size),
        _ => {
            tracing::debug!(bins, "rejected regular axis bin count");
            Err(Error::BinCount(bins))
        }
    }
}

fn check_range(min: f64, delta: f64) -> Result<()> {
    if !min.is_finite() || !delta.is_finite() {
        tracing::debug!(min, delta, "rejected non-finite regular axis range");
        return Err(Error::NonFiniteRange);
    }
    if delta == 0.0 {
        tracing::debug!(min, "rejected zero-width regular axis range");
        return Err(Error::ZeroRange);
    }
    Ok(())
}

impl<V: RealValue> Regular<V, Id, String> {
    /// Creates `bins` equidistant bins over `[start, stop)` with underflow and
    /// overflow bins.
    ///
    /// # Errors
    ///
    /// - [`Error::BinCount`] if `bins` is zero
    /// - [`Error::NonFiniteRange`] if `start` or `stop` is not finite
    /// - [`Error::ZeroRange`] if `start == stop`
    ///
    /// # Examples
    ///
    /// ```
    /// use histaxis::axis::{Axis, Regular};
    ///
    /// let axis = Regular::new(10, 0.0, 1.0)?;
    /// assert_eq!(axis.size(), 10);
    /// assert_eq!(axis.shape(), 12);
    ///
    /// assert!(Regular::new(1, 0.0, 0.0).is_err());
    /// assert!(Regular::new(0, 0.0, 1.0).is_err());
    /// # Ok::<(), histaxis::Error>(())
    /// ```
    pub fn new(bins: u32, start: V, stop: V) -> Result<Self> {
        Self::with_transform(Id, bins, start, stop)
    }

    /// Creates a circular axis with `bins` bins over `[start, stop)`.
    ///
    /// Values outside the range wrap around; non-finite values land in the
    /// overflow bin, which is the only flow bin of a circular axis.
    pub fn circular(bins: u32, start: V, stop: V) -> Result<Self> {
        Self::with_options(
            Id,
            bins,
            start,
            stop,
            AxisOptions::OVERFLOW | AxisOptions::CIRCULAR,
        )
    }

    /// Creates a circular axis covering `[phase, phase + period)`.
    ///
    /// Use [`TWO_PI`] as the period for angles in radians.
    ///
    /// # Examples
    ///
    /// ```
    /// use histaxis::axis::{Axis, Regular, TWO_PI};
    ///
    /// let axis = Regular::phase(4, 0.0, TWO_PI)?;
    /// assert_eq!(axis.index(&(0.5 * TWO_PI + 0.1)), 2);
    /// assert_eq!(axis.index(&(-0.5 * TWO_PI + 0.1)), 2);
    /// # Ok::<(), histaxis::Error>(())
    /// ```
    pub fn phase(bins: u32, phase: V, period: V) -> Result<Self> {
        Self::circular(bins, phase, phase + period)
    }
}

impl<V: RealValue, T: Transform> Regular<V, T, String> {
    /// Creates `bins` equidistant bins over the transformed range
    /// `[forward(start), forward(stop))`.
    ///
    /// # Errors
    ///
    /// Same as [`Regular::new`], checked on the transformed range.
    pub fn with_transform(transform: T, bins: u32, start: V, stop: V) -> Result<Self> {
        Self::with_options(transform, bins, start, stop, AxisOptions::DEFAULT)
    }

    /// Creates an axis with explicit options.
    ///
    /// # Errors
    ///
    /// [`Error::CircularUnderflow`] if `options` combines circular and
    /// underflow, plus the errors of [`Regular::with_transform`].
    pub fn with_options(
        transform: T,
        bins: u32,
        start: V,
        stop: V,
        options: AxisOptions,
    ) -> Result<Self> {
        Self::build(transform, bins, start, stop, String::new(), options)
    }
}

impl<V: RealValue, T: Transform, M: Metadata> Regular<V, T, M> {
    /// Creates an axis from every parameter at once.
    pub fn build(
        transform: T,
        bins: u32,
        start: V,
        stop: V,
        metadata: M,
        options: AxisOptions,
    ) -> Result<Self> {
        let options = options.validate()?;
        let size = bin_count(bins)?;
        let min = transform.forward(to_internal(start));
        let delta = transform.forward(to_internal(stop)) - min;
        check_range(min, delta)?;

        Ok(Self {
            transform,
            size,
            min,
            delta,
            options,
            metadata,
            _value: PhantomData,
        })
    }

    /// Replaces the metadata, possibly changing its type.
    ///
    /// # Examples
    ///
    /// ```
    /// use histaxis::axis::{Axis, Regular};
    ///
    /// let axis = Regular::new(4, 0.0, 1.0)?.with_metadata("energy".to_owned());
    /// assert_eq!(axis.metadata(), "energy");
    ///
    /// let unlabeled = axis.with_metadata(());
    /// assert_eq!(unlabeled.size(), 4);
    /// # Ok::<(), histaxis::Error>(())
    /// ```
    pub fn with_metadata<N: Metadata>(self, metadata: N) -> Regular<V, T, N> {
        Regular {
            transform: self.transform,
            size: self.size,
            min: self.min,
            delta: self.delta,
            options: self.options,
            metadata,
            _value: PhantomData,
        }
    }

    /// Shrinks the axis to the bins `[begin, end)` and merges every `merge`
    /// adjacent bins into one.
    ///
    /// The result has `(end - begin) / merge` bins covering the same values as
    /// the selected bins. Metadata, transform and options carry over.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidShrink`] if the range is empty or outside `[0, size]`,
    ///   `merge` is zero, or `end - begin` is not a multiple of `merge`
    /// - [`Error::CircularShrink`] if the axis is circular and the range is not
    ///   the whole axis
    ///
    /// # Examples
    ///
    /// ```
    /// use histaxis::axis::{Axis, Regular};
    ///
    /// let axis = Regular::new(5, 0.0, 5.0)?;
    /// let shrunk = axis.shrink(1, 5, 2)?;
    ///
    /// assert_eq!(shrunk.size(), 2);
    /// assert_eq!(shrunk.value(0.0), 1.0);
    /// assert_eq!(shrunk.value(2.0), 5.0);
    /// assert!(axis.shrink(0, 5, 2).is_err());
    /// # Ok::<(), histaxis::Error>(())
    /// ```
    pub fn shrink(&self, begin: i32, end: i32, merge: u32) -> Result<Self> {
        let invalid = || {
            tracing::debug!(begin, end, merge, size = self.size, "rejected shrink request");
            Error::InvalidShrink {
                begin,
                end,
                merge,
                size: self.size,
            }
        };

        if begin < 0 || end > self.size || begin >= end {
            return Err(invalid());
        }
        let merge_bins = match i32::try_from(merge) {
            Ok(m) if m > 0 => m,
            _ => return Err(invalid()),
        };
        let span = end - begin;
        if span % merge_bins != 0 {
            return Err(invalid());
        }
        if self.options.circular() && !(begin == 0 && end == self.size) {
            tracing::debug!(begin, end, size = self.size, "rejected circular shrink");
            return Err(Error::CircularShrink);
        }

        let min = self.internal_edge(f64::from(begin));
        let delta = self.internal_edge(f64::from(end)) - min;
        check_range(min, delta)?;

        Ok(Self {
            transform: self.transform.clone(),
            size: span / merge_bins,
            min,
            delta,
            options: self.options,
            metadata: self.metadata.clone(),
            _value: PhantomData,
        })
    }
}

impl<V: RealValue, T: Transform, M> Regular<V, T, M> {
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Position of fractional index `index` on the internal linear scale.
    ///
    /// Outside `[0, size]` a bounded axis maps to signed infinity, with the
    /// sign following the direction of the range.
    fn internal_edge(&self, index: f64) -> f64 {
        let z = index / f64::from(self.size);
        let circular = self.options.circular();
        if !circular && z < 0.0 {
            f64::NEG_INFINITY * self.delta
        } else if circular || z <= 1.0 {
            (1.0 - z) * self.min + z * (self.min + self.delta)
        } else {
            f64::INFINITY * self.delta
        }
    }

    /// Value at fractional index `index`.
    ///
    /// For an integer `i`, `value(i)` is the lower edge of bin `i` and exactly
    /// the value at which `index` starts returning `i`.
    ///
    /// # Examples
    ///
    /// ```
    /// use histaxis::axis::Regular;
    ///
    /// let axis = Regular::new(4, -2.0, 2.0)?;
    /// assert_eq!(axis.value(0.0), -2.0);
    /// assert_eq!(axis.value(0.5), -1.5);
    /// assert_eq!(axis.value(4.0), 2.0);
    /// assert_eq!(axis.value(-1.0), f64::NEG_INFINITY);
    /// assert_eq!(axis.value(5.0), f64::INFINITY);
    /// # Ok::<(), histaxis::Error>(())
    /// ```
    pub fn value(&self, index: f64) -> V {
        let x = self.transform.inverse(self.internal_edge(index));
        V::from(x).unwrap_or_else(V::nan)
    }

    /// View of bin `index`.
    pub fn bin(&self, index: i32) -> Interval<'_, Self> {
        Interval::new(self, index)
    }

    /// Iterator over the bins `0..size()`, excluding flow bins.
    pub fn bins(&self) -> Bins<'_, Self> {
        Bins::new(self, self.size)
    }
}

impl<V: RealValue, T: Transform, M> Continuous for Regular<V, T, M> {
    fn continuous_value(&self, index: f64) -> f64 {
        to_internal(self.value(index))
    }
}

impl<V: RealValue, T: Transform, M: Metadata> Axis for Regular<V, T, M> {
    type Value = V;
    type Metadata = M;

    fn size(&self) -> i32 {
        self.size
    }

    fn options(&self) -> AxisOptions {
        self.options
    }

    #[inline]
    fn index(&self, value: &V) -> i32 {
        // Hot path: measure before adding branches.
        let z = (self.transform.forward(to_internal(*value)) - self.min) / self.delta;
        if self.options.circular() {
            if z.is_finite() {
                let z = z - z.floor();
                // z - floor(z) may round up to 1.0 for tiny negative z
                return ((z * f64::from(self.size)) as i32).min(self.size - 1);
            }
        } else if z < 1.0 {
            return if z >= 0.0 {
                (z * f64::from(self.size)) as i32
            } else {
                -1
            };
        }
        // also reached for NaN
        self.size
    }

    fn metadata(&self) -> &M {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut M {
        &mut self.metadata
    }

    fn as_continuous(&self) -> Option<&dyn Continuous> {
        Some(self)
    }

    fn as_display(&self) -> Option<&dyn fmt::Display> {
        Some(self)
    }
}

impl<V: RealValue, T: Transform, M: fmt::Debug> fmt::Display for Regular<V, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "regular({}, {}, {}, transform={:?}, metadata={:?}, options={})",
            self.size,
            self.value(0.0),
            self.value(f64::from(self.size)),
            self.transform,
            self.metadata,
            self.options
        )
    }
}

#[derive(Deserialize)]
struct RegularData<T, M> {
    transform: T,
    size: i32,
    min: f64,
    delta: f64,
    options: AxisOptions,
    metadata: M,
}

impl<'de, V, T, M> Deserialize<'de> for Regular<V, T, M>
where
    T: Deserialize<'de>,
    M: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let data = RegularData::<T, M>::deserialize(deserializer)?;
        let checked = data
            .options
            .validate()
            .and_then(|_| bin_count(u32::try_from(data.size).unwrap_or(0)))
            .and_then(|_| check_range(data.min, data.delta));
        checked.map_err(serde::de::Error::custom)?;

        Ok(Self {
            transform: data.transform,
            size: data.size,
            min: data.min,
            delta: data.delta,
            options: data.options,
            metadata: data.metadata,
            _value: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Log, Pow, Sqrt};
    use approx::assert_relative_eq;

    #[test]
    fn test_regular_index() {
        let axis = Regular::new(4, -2.0, 2.0).unwrap();

        assert_eq!(axis.index(&-10.0), -1);
        assert_eq!(axis.index(&-2.1), -1);
        assert_eq!(axis.index(&-2.0), 0);
        assert_eq!(axis.index(&-1.1), 0);
        assert_eq!(axis.index(&0.0), 2);
        assert_eq!(axis.index(&0.9), 2);
        assert_eq!(axis.index(&1.0), 3);
        assert_eq!(axis.index(&10.0), 4);
        assert_eq!(axis.index(&f64::NEG_INFINITY), -1);
        assert_eq!(axis.index(&f64::INFINITY), 4);
        assert_eq!(axis.index(&f64::NAN), 4);
    }

    #[test]
    fn test_regular_f32() {
        let axis = Regular::new(4, -2.0_f32, 2.0).unwrap();

        assert_eq!(axis.index(&-1.5_f32), 0);
        assert_eq!(axis.index(&1.5_f32), 3);
        assert_eq!(axis.value(2.0), 0.0_f32);
    }

    #[test]
    fn test_regular_value_edges() {
        let axis = Regular::new(4, -2.0, 2.0).unwrap();

        assert_eq!(axis.value(0.0), -2.0);
        assert_eq!(axis.value(1.0), -1.0);
        assert_eq!(axis.value(2.0), 0.0);
        assert_eq!(axis.value(4.0), 2.0);
        assert_eq!(axis.value(-1.0), f64::NEG_INFINITY);
        assert_eq!(axis.value(5.0), f64::INFINITY);
    }

    #[test]
    fn test_regular_inverted_value_edges() {
        let axis = Regular::new(2, 1.0, -2.0).unwrap();

        assert_eq!(axis.value(-1.0), f64::INFINITY);
        assert_eq!(axis.value(0.0), 1.0);
        assert_eq!(axis.value(1.0), -0.5);
        assert_eq!(axis.value(2.0), -2.0);
        assert_eq!(axis.value(3.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_regular_bad_construction() {
        assert_eq!(Regular::new(1, 0.0, 0.0), Err(Error::ZeroRange));
        assert_eq!(Regular::new(0, 0.0, 1.0), Err(Error::BinCount(0)));
        assert_eq!(Regular::new(1, 0.0, f64::INFINITY), Err(Error::NonFiniteRange));
        assert_eq!(Regular::new(1, f64::NAN, 1.0), Err(Error::NonFiniteRange));
        assert_eq!(
            Regular::with_transform(Log, 2, 0.0, 1.0),
            Err(Error::NonFiniteRange)
        );
        assert_eq!(
            Regular::new(u32::MAX, 0.0, 1.0),
            Err(Error::BinCount(u32::MAX))
        );
    }

    #[test]
    fn test_regular_circular_underflow_rejected() {
        let result = Regular::with_options(
            Id,
            4,
            0.0,
            1.0,
            AxisOptions::UNDERFLOW | AxisOptions::CIRCULAR,
        );
        assert_eq!(result, Err(Error::CircularUnderflow));
    }

    #[test]
    fn test_regular_shape_follows_options() {
        let plain = Regular::with_options(Id, 3, 0.0, 1.0, AxisOptions::NONE).unwrap();
        assert_eq!(plain.shape(), 3);
        // no flow bins, sentinels are still reported
        assert_eq!(plain.index(&-1.0), -1);
        assert_eq!(plain.index(&2.0), 3);

        let circular = Regular::circular(3, 0.0, 1.0).unwrap();
        assert_eq!(circular.shape(), 4);
    }

    #[test]
    fn test_regular_circular_wraps() {
        let axis = Regular::circular(4, 0.0, 1.0).unwrap();

        assert_eq!(axis.index(&-3.0), 0);
        assert_eq!(axis.index(&0.0), 0);
        assert_eq!(axis.index(&0.25), 1);
        assert_eq!(axis.index(&0.5), 2);
        assert_eq!(axis.index(&0.75), 3);
        assert_eq!(axis.index(&1.0), 0);
        assert_eq!(axis.index(&-1e-17), 3);
        assert_eq!(axis.index(&f64::INFINITY), 4);
        assert_eq!(axis.index(&f64::NEG_INFINITY), 4);
        assert_eq!(axis.index(&f64::NAN), 4);
    }

    #[test]
    fn test_regular_circular_value_is_unbounded() {
        let axis = Regular::circular(4, 0.0, 1.0).unwrap();
        assert_eq!(axis.value(-1.0), axis.value(3.0) - 1.0);
        assert_eq!(axis.value(5.0), 1.25);
    }

    #[test]
    fn test_regular_sqrt_and_pow() {
        let sqrt = Regular::with_transform(Sqrt, 2, 0.0, 4.0).unwrap();
        assert_eq!(sqrt.index(&0.99), 0);
        assert_eq!(sqrt.index(&1.0), 1);
        assert_eq!(sqrt.index(&-1.0), 2);
        assert_eq!(sqrt.value(-1.0), f64::INFINITY);

        let pow = Regular::with_transform(Pow::new(2.0), 2, 0.0, 2.0).unwrap();
        assert_relative_eq!(pow.value(1.0), 2.0_f64.sqrt(), max_relative = 1e-12);
        assert_eq!(pow.index(&1.0), 0);
        assert_eq!(pow.index(&1.5), 1);
    }

    #[test]
    fn test_regular_equality() {
        let a = Regular::new(4, -2.0, 2.0).unwrap();
        let b = Regular::new(4, -2.0, 2.0).unwrap();
        assert_eq!(a, b);

        assert_ne!(a, Regular::new(5, -2.0, 2.0).unwrap());
        assert_ne!(a, Regular::circular(4, -2.0, 2.0).unwrap());
        assert_ne!(a, b.clone().with_metadata("x".to_owned()));

        let p2 = Regular::with_transform(Pow::new(2.0), 4, 1.0, 2.0).unwrap();
        let p3 = Regular::with_transform(Pow::new(3.0), 4, 1.0, 2.0).unwrap();
        assert_ne!(p2, p3);
    }

    #[test]
    fn test_regular_relabel() {
        let mut axis = Regular::new(2, 0.0, 1.0).unwrap();
        assert_eq!(axis.metadata(), "");
        axis.metadata_mut().push_str("pt");
        assert_eq!(axis.metadata(), "pt");
    }

    #[test]
    fn test_regular_shrink() {
        let axis = Regular::new(5, 0.0, 5.0).unwrap();

        let b = axis.shrink(1, 4, 1).unwrap();
        assert_eq!(b.size(), 3);
        assert_eq!(b.value(0.0), 1.0);
        assert_eq!(b.value(3.0), 4.0);

        let c = axis.shrink(0, 4, 2).unwrap();
        assert_eq!(c.size(), 2);
        assert_eq!(c.value(0.0), 0.0);
        assert_eq!(c.value(2.0), 4.0);
    }

    #[test]
    fn test_regular_shrink_rejects_bad_ranges() {
        let axis = Regular::new(5, 0.0, 5.0).unwrap();

        assert!(matches!(axis.shrink(0, 5, 2), Err(Error::InvalidShrink { .. })));
        assert!(matches!(axis.shrink(0, 5, 0), Err(Error::InvalidShrink { .. })));
        assert!(matches!(axis.shrink(-1, 3, 1), Err(Error::InvalidShrink { .. })));
        assert!(matches!(axis.shrink(2, 6, 1), Err(Error::InvalidShrink { .. })));
        assert!(matches!(axis.shrink(3, 3, 1), Err(Error::InvalidShrink { .. })));
    }

    #[test]
    fn test_regular_shrink_keeps_transform_and_metadata() {
        let axis = Regular::with_transform(Log, 4, 1.0, 1e4)
            .unwrap()
            .with_metadata("energy".to_owned());
        let shrunk = axis.shrink(1, 3, 1).unwrap();

        assert_eq!(shrunk.metadata(), "energy");
        assert_relative_eq!(shrunk.value(0.0), 10.0, max_relative = 1e-12);
        assert_relative_eq!(shrunk.value(2.0), 1000.0, max_relative = 1e-12);
        assert_eq!(shrunk.index(&50.0), 0);
    }

    #[test]
    fn test_regular_display() {
        let axis = Regular::new(2, 0.0, 1.0)
            .unwrap()
            .with_metadata("x".to_owned());
        assert_eq!(
            axis.to_string(),
            "regular(2, 0, 1, transform=Id, metadata=\"x\", options=underflow | overflow)"
        );
    }
}
