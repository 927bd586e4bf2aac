use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Set of axis options drawn from `{underflow, overflow, circular}`.
///
/// Options are fixed when an axis is built. `circular` and `underflow`
/// exclude each other: a wrapped domain has no region below its range.
///
/// # Examples
///
/// ```rust
/// use histaxis::axis::AxisOptions;
///
/// let opts = AxisOptions::UNDERFLOW | AxisOptions::OVERFLOW;
/// assert!(opts.contains(AxisOptions::OVERFLOW));
/// assert!(!opts.contains(AxisOptions::CIRCULAR));
/// assert_eq!(opts.extra_bins(), 2);
/// assert!((AxisOptions::CIRCULAR | AxisOptions::UNDERFLOW).validate().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisOptions(u8);

impl AxisOptions {
    pub const NONE: Self = Self(0);
    pub const UNDERFLOW: Self = Self(1);
    pub const OVERFLOW: Self = Self(1 << 1);
    pub const CIRCULAR: Self = Self(1 << 2);

    /// Options of a plain bounded axis: underflow and overflow bins.
    pub const DEFAULT: Self = Self(Self::UNDERFLOW.0 | Self::OVERFLOW.0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn underflow(self) -> bool {
        self.contains(Self::UNDERFLOW)
    }

    pub const fn overflow(self) -> bool {
        self.contains(Self::OVERFLOW)
    }

    pub const fn circular(self) -> bool {
        self.contains(Self::CIRCULAR)
    }

    /// Number of flow bins these options add to an axis shape.
    pub const fn extra_bins(self) -> i32 {
        self.underflow() as i32 + self.overflow() as i32
    }

    pub fn validate(self) -> Result<Self> {
        if self.circular() && self.underflow() {
            tracing::debug!(options = ?self, "rejected axis options");
            return Err(Error::CircularUnderflow);
        }
        Ok(self)
    }
}

impl BitOr for AxisOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AxisOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for AxisOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for AxisOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::UNDERFLOW, "underflow"),
            (Self::OVERFLOW, "overflow"),
            (Self::CIRCULAR, "circular"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}
