use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Axis, AxisOptions, Bins, Continuous, Interval, Metadata};
use crate::error::{Error, Result};

/// Integer axis: one bin per integer in `[start, stop)`.
///
/// With the circular option, integers outside the range wrap around and the
/// axis never underflows.
///
/// # Examples
///
/// ```rust
/// use histaxis::axis::{Axis, Integer};
///
/// let axis = Integer::new(-1, 2)?;
///
/// assert_eq!(axis.size(), 3);
/// assert_eq!(axis.index(&-2), -1);
/// assert_eq!(axis.index(&-1), 0);
/// assert_eq!(axis.index(&1), 2);
/// assert_eq!(axis.index(&2), 3);
/// assert_eq!(axis.bin(0).to_string(), "[-1, 0)");
/// # Ok::<(), histaxis::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Integer<M = String> {
    min: i32,
    size: i32,
    options: AxisOptions,
    metadata: M,
}

fn bin_count(start: i32, stop: i32) -> Result<i32> {
    let span = i64::from(stop) - i64::from(start);
    if span <= 0 {
        tracing::debug!(start, stop, "rejected integer axis range");
        return Err(Error::ZeroRange);
    }
    i32::try_from(span).map_err(|_| {
        tracing::debug!(start, stop, "integer axis span exceeds i32");
        Error::BinCount(u32::try_from(span).unwrap_or(u32::MAX))
    })
}

impl Integer<String> {
    pub fn new(start: i32, stop: i32) -> Result<Self> {
        Self::build(start, stop, String::new(), AxisOptions::DEFAULT)
    }

    /// Creates a circular axis over `[start, stop)`.
    ///
    /// ```rust
    /// use histaxis::axis::{Axis, Integer};
    ///
    /// let weekday = Integer::circular(0, 7)?;
    /// assert_eq!(weekday.index(&8), 1);
    /// assert_eq!(weekday.index(&-1), 6);
    /// # Ok::<(), histaxis::Error>(())
    /// ```
    pub fn circular(start: i32, stop: i32) -> Result<Self> {
        Self::build(
            start,
            stop,
            String::new(),
            AxisOptions::OVERFLOW | AxisOptions::CIRCULAR,
        )
    }
}

impl<M: Metadata> Integer<M> {
    /// Creates an axis over `[start, stop)`.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroRange`] if `stop <= start`
    /// - [`Error::BinCount`] if the range holds more than `i32::MAX` integers
    /// - [`Error::CircularUnderflow`] for invalid options
    pub fn build(start: i32, stop: i32, metadata: M, options: AxisOptions) -> Result<Self> {
        let options = options.validate()?;
        let size = bin_count(start, stop)?;
        Ok(Self {
            min: start,
            size,
            options,
            metadata,
        })
    }

    pub fn with_metadata<N: Metadata>(self, metadata: N) -> Integer<N> {
        Integer {
            min: self.min,
            size: self.size,
            options: self.options,
            metadata,
        }
    }
}

impl<M> Integer<M> {
    /// Value at fractional index `index`, `start + index`.
    pub fn value(&self, index: f64) -> f64 {
        f64::from(self.min) + index
    }

    pub fn bin(&self, index: i32) -> Interval<'_, Self> {
        Interval::new(self, index)
    }

    pub fn bins(&self) -> Bins<'_, Self> {
        Bins::new(self, self.size)
    }
}

impl<M> Continuous for Integer<M> {
    fn continuous_value(&self, index: f64) -> f64 {
        self.value(index)
    }
}

impl<M: Metadata> Axis for Integer<M> {
    type Value = i32;
    type Metadata = M;

    fn size(&self) -> i32 {
        self.size
    }

    fn options(&self) -> AxisOptions {
        self.options
    }

    fn index(&self, value: &i32) -> i32 {
        let z = i64::from(*value) - i64::from(self.min);
        let size = i64::from(self.size);
        if self.options.circular() {
            z.rem_euclid(size) as i32
        } else if z < 0 {
            -1
        } else if z < size {
            z as i32
        } else {
            self.size
        }
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

impl<M: fmt::Debug> fmt::Display for Integer<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "integer({}, {}, metadata={:?}, options={})",
            self.min,
            i64::from(self.min) + i64::from(self.size),
            self.metadata,
            self.options
        )
    }
}

#[derive(Deserialize)]
struct IntegerData<M> {
    min: i32,
    size: i32,
    options: AxisOptions,
    metadata: M,
}

impl<'de, M: Deserialize<'de>> Deserialize<'de> for Integer<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let data = IntegerData::<M>::deserialize(deserializer)?;
        let options = data.options.validate().map_err(serde::de::Error::custom)?;
        if data.size <= 0 {
            tracing::debug!(size = data.size, "rejected integer axis size");
            let bins = u32::try_from(data.size).unwrap_or(0);
            return Err(serde::de::Error::custom(Error::BinCount(bins)));
        }
        Ok(Self {
            min: data.min,
            size: data.size,
            options,
            metadata: data.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_index_extremes() {
        let axis = Integer::new(i32::MIN, i32::MIN + 2).unwrap();
        assert_eq!(axis.index(&i32::MIN), 0);
        assert_eq!(axis.index(&i32::MAX), 2);

        let axis = Integer::new(0, 3).unwrap();
        assert_eq!(axis.index(&i32::MIN), -1);
    }

    #[test]
    fn test_integer_rejects_empty_range() {
        assert_eq!(Integer::new(2, 2), Err(Error::ZeroRange));
        assert_eq!(Integer::new(3, 1), Err(Error::ZeroRange));
    }

    #[test]
    fn test_integer_rejects_span_beyond_i32() {
        assert_eq!(
            Integer::new(i32::MIN, i32::MAX),
            Err(Error::BinCount(u32::MAX))
        );
        assert_eq!(
            Integer::new(-1, i32::MAX),
            Err(Error::BinCount(1 << 31))
        );
        assert_eq!(Integer::new(0, i32::MAX).unwrap().size(), i32::MAX);
    }

    #[test]
    fn test_integer_circular_wraps() {
        let axis = Integer::build(0, 4, (), AxisOptions::OVERFLOW | AxisOptions::CIRCULAR).unwrap();

        assert!(axis.options().circular());
        assert_eq!(axis.shape(), 5);
        assert_eq!(axis.index(&0), 0);
        assert_eq!(axis.index(&3), 3);
        assert_eq!(axis.index(&4), 0);
        assert_eq!(axis.index(&5), 1);
        assert_eq!(axis.index(&-1), 3);
        assert_eq!(axis.index(&i32::MIN), 0);
        assert_eq!(axis.index(&i32::MAX), 3);
    }

    #[test]
    fn test_integer_circular_rejects_underflow() {
        let err = Integer::build(0, 4, (), AxisOptions::UNDERFLOW | AxisOptions::CIRCULAR);
        assert_eq!(err, Err(Error::CircularUnderflow));
    }

    #[test]
    fn test_integer_value() {
        let axis = Integer::new(5, 8).unwrap();
        assert_eq!(axis.value(0.0), 5.0);
        assert_eq!(axis.value(1.5), 6.5);
        assert_eq!(axis.value_f64(3.0), Ok(8.0));
        let edges: Vec<f64> = axis.bins().map(|b| b.upper()).collect();
        assert_eq!(edges, vec![6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_integer_shape() {
        let axis = Integer::build(0, 4, (), AxisOptions::OVERFLOW).unwrap();
        assert_eq!(axis.shape(), 5);
    }

    #[test]
    fn test_integer_display() {
        let axis = Integer::new(-1, 2).unwrap().with_metadata("n".to_owned());
        assert_eq!(
            axis.to_string(),
            "integer(-1, 2, metadata=\"n\", options=underflow | overflow)"
        );
    }
}
