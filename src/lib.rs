//! Histogram axes
//!
//! `histaxis` provides the axis layer of a histogram: types that map a value
//! to an integer bin index and a bin index back to values. It focuses on the
//! binning itself; storage, filling and statistics live elsewhere.
//!
//! # Core Concepts
//!
//! ## Axes
//!
//! An axis has `size()` regular bins indexed `0..size`. Index `-1` is the
//! underflow bin and index `size()` the overflow bin; [`axis::AxisOptions`]
//! reports which of them are counted. Available axis types:
//! - [`axis::Regular`] - equidistant bins, optionally on a transformed scale
//!   or with circular wraparound
//! - [`axis::Integer`] - one bin per integer
//! - [`axis::Category`] - one bin per listed value
//!
//! ## Transforms
//!
//! A [`transform::Transform`] maps values onto the internal linear scale a
//! regular axis bins on, giving logarithmic, square-root or power-law bins.
//!
//! ## Variants
//!
//! An axis variant holds one axis out of a closed set of axis types and
//! forwards every operation to it. Declare one with [`axis_variant!`] or use
//! the predefined [`AnyAxis`].
//!
//! # Examples
//!
//! ## Regular Axis
//!
//! ```rust
//! use histaxis::axis::{Axis, Regular};
//!
//! let axis = Regular::new(4, -2.0, 2.0)?;
//!
//! assert_eq!(axis.index(&-2.5), -1);
//! assert_eq!(axis.index(&-0.5), 1);
//! assert_eq!(axis.index(&2.0), 4);
//!
//! assert_eq!(axis.value(1.0), -1.0);
//! assert_eq!(axis.bin(1).to_string(), "[-1, 0)");
//! # Ok::<(), histaxis::Error>(())
//! ```
//!
//! ## Transformed and Circular Axes
//!
//! ```rust
//! use histaxis::axis::{Axis, Regular};
//! use histaxis::transform::Log;
//!
//! // decades between 1 and 1000
//! let axis = Regular::with_transform(Log, 3, 1.0, 1000.0)?;
//! assert_eq!(axis.index(&50.0), 1);
//! assert!((axis.value(1.0) - 10.0_f64).abs() < 1e-9);
//!
//! // hours of the day wrap around
//! let hours = Regular::circular(24, 0.0, 24.0)?;
//! assert_eq!(hours.index(&25.5), 1);
//! assert_eq!(hours.index(&-0.5), 23);
//! # Ok::<(), histaxis::Error>(())
//! ```
//!
//! ## Shrinking
//!
//! ```rust
//! use histaxis::axis::{Axis, Regular};
//!
//! let axis = Regular::new(10, 0.0, 10.0)?;
//! let coarse = axis.shrink(2, 10, 2)?;
//!
//! assert_eq!(coarse.size(), 4);
//! assert_eq!(coarse.value(0.0), 2.0);
//! assert!(axis.shrink(0, 10, 3).is_err());
//! # Ok::<(), histaxis::Error>(())
//! ```
//!
//! ## Variant
//!
//! ```rust
//! use histaxis::{AnyAxis, AxisVariant};
//! use histaxis::axis::{Category, Integer};
//!
//! let axes = vec![
//!     AnyAxis::from(Integer::new(0, 10)?),
//!     AnyAxis::from(Category::new(["a", "b"].map(String::from))),
//! ];
//!
//! assert_eq!(axes[0].index(&3)?, 3);
//! assert_eq!(axes[1].index(&"b")?, 1);
//!
//! // categories have no numeric edges
//! assert!(axes[0].bin(0).is_ok());
//! assert!(axes[1].bin(0).is_err());
//! # Ok::<(), histaxis::Error>(())
//! ```

pub mod axis;
pub mod error;
pub mod transform;
pub mod variant;

pub use axis::{Axis, AxisOptions};
pub use error::{Error, ErrorKind, Result};
pub use num_traits::Float;
pub use variant::{AnyAxis, AxisVariant, Narrow};
