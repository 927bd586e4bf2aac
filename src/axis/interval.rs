use std::fmt;

use super::Continuous;

/// View of one bin of an axis with a continuous value mapping.
///
/// An `Interval` is a reference to the axis plus an index; its edges are
/// computed on every call and never stored. Index `-1` and `size()` address
/// the flow bins, whose outer edges are infinite.
///
/// # Examples
///
/// ```rust
/// use histaxis::axis::Regular;
///
/// let axis = Regular::new(2, 0.0, 1.0)?;
/// let bin = axis.bin(0);
///
/// assert_eq!(bin.lower(), 0.0);
/// assert_eq!(bin.upper(), 0.5);
/// assert_eq!(bin.to_string(), "[0, 0.5)");
///
/// assert_eq!(axis.bin(-1).lower(), f64::NEG_INFINITY);
/// assert_eq!(axis.bin(2).upper(), f64::INFINITY);
/// # Ok::<(), histaxis::Error>(())
/// ```
pub struct Interval<'a, A: ?Sized> {
    axis: &'a A,
    index: i32,
}

impl<'a, A: ?Sized> Interval<'a, A> {
    pub(crate) fn new(axis: &'a A, index: i32) -> Self {
        Self { axis, index }
    }

    pub fn index(&self) -> i32 {
        self.index
    }

    pub fn axis(&self) -> &'a A {
        self.axis
    }
}

impl<A: Continuous + ?Sized> Interval<'_, A> {
    pub fn lower(&self) -> f64 {
        self.axis.continuous_value(f64::from(self.index))
    }

    pub fn upper(&self) -> f64 {
        self.axis.continuous_value(f64::from(self.index) + 1.0)
    }

    /// Value at the middle of the bin on the axis's internal scale.
    ///
    /// For a transformed axis this differs from the arithmetic mean of the
    /// edges (a log axis returns the geometric mean).
    pub fn center(&self) -> f64 {
        self.axis.continuous_value(f64::from(self.index) + 0.5)
    }

    pub fn width(&self) -> f64 {
        self.upper() - self.lower()
    }
}

impl<A: ?Sized> Clone for Interval<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized> Copy for Interval<'_, A> {}

impl<A: Continuous + ?Sized, B: Continuous + ?Sized> PartialEq<Interval<'_, B>>
    for Interval<'_, A>
{
    fn eq(&self, other: &Interval<'_, B>) -> bool {
        self.lower() == other.lower() && self.upper() == other.upper()
    }
}

impl<A: Continuous + ?Sized> fmt::Debug for Interval<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interval")
            .field("index", &self.index)
            .field("lower", &self.lower())
            .field("upper", &self.upper())
            .finish()
    }
}

impl<A: Continuous + ?Sized> fmt::Display for Interval<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower(), self.upper())
    }
}
