use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Axis, AxisOptions, AxisValue, Metadata};
use crate::error::{Error, Result};

/// Category axis: one bin per listed value, plus an overflow bin for
/// everything else.
///
/// The bins have no numeric edges, so this axis has no continuous value
/// mapping; [`Category::value`] returns the category itself.
///
/// # Examples
///
/// ```rust
/// use histaxis::axis::{Axis, Category};
///
/// let axis = Category::new(["red", "green", "blue"].map(String::from));
///
/// assert_eq!(axis.index(&"green".to_owned()), 1);
/// assert_eq!(axis.index(&"black".to_owned()), 3);
/// assert_eq!(axis.value(2).map(String::as_str), Some("blue"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category<T = String, M = String> {
    categories: Vec<T>,
    metadata: M,
}

impl<T: AxisValue + PartialEq> Category<T, String> {
    pub fn new(categories: impl IntoIterator<Item = T>) -> Self {
        Self::build(categories, String::new())
    }
}

impl<T: AxisValue + PartialEq, M: Metadata> Category<T, M> {
    pub fn build(categories: impl IntoIterator<Item = T>, metadata: M) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            metadata,
        }
    }

    pub fn with_metadata<N: Metadata>(self, metadata: N) -> Category<T, N> {
        Category {
            categories: self.categories,
            metadata,
        }
    }
}

impl<T, M> Category<T, M> {
    /// Category of bin `index`, or `None` outside `0..size`.
    pub fn value(&self, index: i32) -> Option<&T> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.categories.get(i))
    }
}

impl<T, M> Axis for Category<T, M>
where
    T: AxisValue + PartialEq + fmt::Debug,
    M: Metadata,
{
    type Value = T;
    type Metadata = M;

    fn size(&self) -> i32 {
        i32::try_from(self.categories.len()).unwrap_or(i32::MAX)
    }

    fn options(&self) -> AxisOptions {
        AxisOptions::OVERFLOW
    }

    fn index(&self, value: &T) -> i32 {
        self.categories
            .iter()
            .position(|c| c == value)
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or_else(|| self.size())
    }

    fn metadata(&self) -> &M {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut M {
        &mut self.metadata
    }

    fn value_f64(&self, _index: f64) -> Result<f64> {
        Err(Error::ValueNotConvertible {
            output: std::any::type_name::<T>(),
            axis: std::any::type_name::<Self>(),
        })
    }

    fn as_display(&self) -> Option<&dyn fmt::Display> {
        Some(self)
    }
}

impl<T: fmt::Debug, M: fmt::Debug> fmt::Display for Category<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("category(")?;
        for c in &self.categories {
            write!(f, "{c:?}, ")?;
        }
        write!(
            f,
            "metadata={:?}, options={})",
            self.metadata,
            AxisOptions::OVERFLOW
        )
    }
}

#[derive(Deserialize)]
struct CategoryData<T, M> {
    categories: Vec<T>,
    metadata: M,
}

impl<'de, T, M> Deserialize<'de> for Category<T, M>
where
    T: Deserialize<'de>,
    M: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let data = CategoryData::<T, M>::deserialize(deserializer)?;
        if i32::try_from(data.categories.len()).is_err() {
            tracing::debug!(len = data.categories.len(), "too many categories");
            let bins = u32::try_from(data.categories.len()).unwrap_or(u32::MAX);
            return Err(serde::de::Error::custom(Error::BinCount(bins)));
        }
        Ok(Self {
            categories: data.categories,
            metadata: data.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Category {
        Category::new(["red", "green", "blue"].map(String::from))
    }

    #[test]
    fn test_category_index() {
        let axis = colors();
        assert_eq!(axis.size(), 3);
        assert_eq!(axis.shape(), 4);
        assert_eq!(axis.index(&"red".to_owned()), 0);
        assert_eq!(axis.index(&"blue".to_owned()), 2);
        assert_eq!(axis.index(&"".to_owned()), 3);
    }

    #[test]
    fn test_category_value() {
        let axis = colors();
        assert_eq!(axis.value(0).map(String::as_str), Some("red"));
        assert_eq!(axis.value(3), None);
        assert_eq!(axis.value(-1), None);
    }

    #[test]
    fn test_category_value_not_convertible() {
        let axis = colors();
        assert!(matches!(
            axis.value_f64(0.0),
            Err(Error::ValueNotConvertible { .. })
        ));
        assert!(axis.as_continuous().is_none());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(
            colors().to_string(),
            "category(\"red\", \"green\", \"blue\", metadata=\"\", options=overflow)"
        );
        let axis = Category::build([1, 2], ());
        assert_eq!(axis.to_string(), "category(1, 2, metadata=(), options=overflow)");
        assert!(axis.as_display().is_some());
    }

    #[test]
    fn test_category_integer_values() {
        let axis = Category::build([10, 20, 30], ());
        assert_eq!(axis.index(&20), 1);
        assert_eq!(axis.index(&25), 3);
    }
}
