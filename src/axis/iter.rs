use std::iter::FusedIterator;

use super::Interval;

/// Iterator over the bins of an axis.
///
/// Yields an [`Interval`] per bin in `0..size`, front to back, or back to
/// front through [`DoubleEndedIterator`]. Both ends share one borrowed axis;
/// the axis is never copied or mutated. Cloning the iterator, or asking the
/// axis for a new one, restarts the sequence.
///
/// Two iterators compare equal when they borrow the same axis instance and
/// have the same remaining range.
///
/// # Examples
///
/// ```rust
/// use histaxis::axis::Regular;
///
/// let axis = Regular::new(4, 0.0, 1.0)?;
///
/// let lower: Vec<f64> = axis.bins().map(|bin| bin.lower()).collect();
/// assert_eq!(lower, vec![0.0, 0.25, 0.5, 0.75]);
///
/// let last = axis.bins().next_back().map(|bin| bin.index());
/// assert_eq!(last, Some(3));
/// # Ok::<(), histaxis::Error>(())
/// ```
pub struct Bins<'a, A: ?Sized> {
    axis: &'a A,
    front: i32,
    back: i32,
}

impl<'a, A: ?Sized> Bins<'a, A> {
    pub(crate) fn new(axis: &'a A, size: i32) -> Self {
        Self {
            axis,
            front: 0,
            back: size.max(0),
        }
    }

    /// Index the next call to `next` yields, or the end index when exhausted.
    pub fn position(&self) -> i32 {
        self.front
    }
}

impl<'a, A: ?Sized> Iterator for Bins<'a, A> {
    type Item = Interval<'a, A>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front;
        self.front += 1;
        Some(Interval::new(self.axis, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.back - self.front).unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl<A: ?Sized> DoubleEndedIterator for Bins<'_, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(Interval::new(self.axis, self.back))
    }
}

impl<A: ?Sized> ExactSizeIterator for Bins<'_, A> {}

impl<A: ?Sized> FusedIterator for Bins<'_, A> {}

impl<A: ?Sized> Clone for Bins<'_, A> {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            front: self.front,
            back: self.back,
        }
    }
}

impl<A: ?Sized> PartialEq for Bins<'_, A> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(self.axis, other.axis)
            && self.front == other.front
            && self.back == other.back
    }
}

impl<A: ?Sized> std::fmt::Debug for Bins<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bins")
            .field("axis", &std::ptr::from_ref(self.axis).cast::<()>())
            .field("front", &self.front)
            .field("back", &self.back)
            .finish()
    }
}
