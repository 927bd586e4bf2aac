//! Axis types and the traits they share.
//!
//! An axis maps a value to an integer bin index. Index `-1` is the underflow
//! bin and index `size()` the overflow bin; whether those bins are counted is
//! reported by [`AxisOptions`].
//!
//! Available axis types:
//! - [`Regular`] - equidistant bins on a (optionally transformed) real line,
//!   with optional circular wraparound
//! - [`Integer`] - unit bins over a range of integers
//! - [`Category`] - one bin per listed value
//!
//! Every axis implements [`Axis`]. Axes with a continuous value mapping also
//! implement [`Continuous`], which is what [`Interval`] and [`Bins`] need to
//! compute bin edges.

use std::any::Any;
use std::fmt;

mod category;
mod integer;
mod interval;
mod iter;
mod options;
mod regular;

pub use category::Category;
pub use integer::Integer;
pub use interval::Interval;
pub use iter::Bins;
pub use options::AxisOptions;
pub use regular::{RealValue, Regular, TWO_PI};

use crate::error::{Error, Result};

/// Common interface of all binning rules.
///
/// Optional capabilities have default implementations that report the
/// capability as missing, so an axis only overrides what it supports. The
/// axis variant relies on this to dispatch uniformly over heterogeneous axes.
pub trait Axis: PartialEq + fmt::Debug + 'static {
    /// Argument type accepted by [`Axis::index`].
    type Value: AxisValue;
    /// Metadata attached to the axis.
    type Metadata: Metadata;

    /// Number of bins, excluding underflow and overflow.
    fn size(&self) -> i32;

    fn options(&self) -> AxisOptions;

    /// Bin index of `value`; `-1` for underflow and `size()` for overflow.
    fn index(&self, value: &Self::Value) -> i32;

    fn metadata(&self) -> &Self::Metadata;

    fn metadata_mut(&mut self) -> &mut Self::Metadata;

    /// Number of bins including the underflow and overflow bins that exist.
    fn shape(&self) -> i32 {
        self.size() + self.options().extra_bins()
    }

    /// Continuous value mapping of this axis, if it has one.
    fn as_continuous(&self) -> Option<&dyn Continuous> {
        None
    }

    /// Text rendering of this axis, if it has one.
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        None
    }

    /// Value at fractional index `index` as `f64`.
    ///
    /// Fails when the axis has no value mapping or its values do not convert
    /// to `f64`.
    fn value_f64(&self, index: f64) -> Result<f64> {
        self.as_continuous()
            .map(|c| c.continuous_value(index))
            .ok_or(Error::NoValueMethod {
                axis: std::any::type_name::<Self>(),
            })
    }
}

/// Axes whose fractional indices map to real values.
///
/// `continuous_value(i)` is the lower edge of bin `i` for integer `i`; the
/// upper edge is `continuous_value(i + 1)`.
pub trait Continuous {
    fn continuous_value(&self, index: f64) -> f64;
}

/// Metadata payload of an axis.
///
/// The payload is opaque to binning. It only needs to be cloned, compared
/// and, where it makes sense, expose a label.
pub trait Metadata: Clone + PartialEq + fmt::Debug + 'static {
    fn label(&self) -> Option<&str>;

    /// Replaces the label; returns `false` if this metadata cannot carry one.
    fn set_label(&mut self, label: &str) -> bool;
}

impl Metadata for String {
    fn label(&self) -> Option<&str> {
        Some(self)
    }

    fn set_label(&mut self, label: &str) -> bool {
        label.clone_into(self);
        true
    }
}

impl Metadata for () {
    fn label(&self) -> Option<&str> {
        None
    }

    fn set_label(&mut self, _label: &str) -> bool {
        false
    }
}

/// Value type an axis bins, with the argument conversions it accepts.
///
/// Dispatch through an axis variant receives arguments of arbitrary type;
/// `from_arg` converts those that losslessly represent a value of `Self`.
pub trait AxisValue: Sized + 'static {
    fn from_arg(arg: &dyn Any) -> Option<Self>;
}

macro_rules! lossless_from_arg {
    ($arg:expr => $target:ty: $($source:ty),+) => {{
        let arg = $arg;
        if let Some(v) = arg.downcast_ref::<$target>() {
            return Some(*v);
        }
        $(
            if let Some(v) = arg.downcast_ref::<$source>() {
                return Some(<$target>::from(*v));
            }
        )+
        None
    }};
}

impl AxisValue for f64 {
    fn from_arg(arg: &dyn Any) -> Option<Self> {
        lossless_from_arg!(arg => f64: f32, i32, u32, i16, u16, i8, u8)
    }
}

impl AxisValue for f32 {
    fn from_arg(arg: &dyn Any) -> Option<Self> {
        lossless_from_arg!(arg => f32: i16, u16, i8, u8)
    }
}

impl AxisValue for i32 {
    fn from_arg(arg: &dyn Any) -> Option<Self> {
        lossless_from_arg!(arg => i32: i16, u16, i8, u8)
    }
}

impl AxisValue for String {
    fn from_arg(arg: &dyn Any) -> Option<Self> {
        if let Some(s) = arg.downcast_ref::<String>() {
            return Some(s.clone());
        }
        arg.downcast_ref::<&'static str>().map(|s| (*s).to_owned())
    }
}
