//! Closed-set polymorphic axis.
//!
//! An axis variant holds exactly one axis out of a fixed list of axis types
//! and forwards the [`Axis`] operations to whichever one is active. Variants
//! are plain enums declared with [`axis_variant!`](crate::axis_variant), so
//! dispatch is a `match` and every arm is monomorphized.
//!
//! # Capability Checks
//!
//! Not every bound type supports every operation. The operations that depend
//! on a capability return [`Result`] and fail with a descriptive error naming
//! the offending types:
//!
//! - [`AxisVariant::index`] when the argument does not convert to the active
//!   axis's value type
//! - [`AxisVariant::value`], [`AxisVariant::lower`], [`AxisVariant::bin`] and
//!   [`AxisVariant::bins`] when the active axis has no continuous value mapping
//! - [`AxisVariant::metadata`] when the active axis's metadata type differs
//!   from the metadata type of the first bound type
//!
//! NaN or infinite values passed to `index` are not errors; they land in the
//! flow bins like they do on the concrete axis.
//!
//! # Examples
//!
//! ```rust
//! use histaxis::{axis_variant, axis::{Integer, Regular}};
//! use histaxis::variant::{AxisVariant, Narrow};
//!
//! axis_variant! {
//!     /// Either a regular or an integer axis.
//!     pub enum MyAxis {
//!         Regular(Regular),
//!         Integer(Integer),
//!     }
//! }
//!
//! let axis = MyAxis::from(Regular::new(4, -2.0, 2.0)?);
//!
//! assert_eq!(axis.size(), 4);
//! assert_eq!(axis.index(&0.5)?, 2);
//! assert_eq!(axis.index(&1_i32)?, 3);
//! assert!(axis.index(&"one").is_err());
//!
//! assert!(axis.get::<Regular>().is_some());
//! assert!(axis.get::<Integer>().is_none());
//! # Ok::<(), histaxis::Error>(())
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;

use crate::axis::{
    Axis, AxisOptions, AxisValue, Bins, Category, Continuous, Integer, Interval, Metadata,
    Regular,
};
use crate::error::{Error, Result};
use crate::transform::{Log, Pow, Sqrt};

/// Operation applied to the active axis of a variant.
pub trait AxisVisitor<'a> {
    type Output;

    fn visit<A: Axis>(self, axis: &'a A) -> Self::Output;
}

/// Operation applied to the active axis of a variant through a mutable
/// reference.
pub trait AxisVisitorMut<'a> {
    type Output;

    fn visit<A: Axis>(self, axis: &'a mut A) -> Self::Output;
}

/// Uniform interface of an axis variant.
///
/// Implemented by [`axis_variant!`](crate::axis_variant); implementors only
/// provide the dispatch primitives and get every axis operation on top.
pub trait AxisVariant: Sized + 'static {
    /// Metadata type of the first bound axis type.
    type Metadata: Metadata;

    fn visit<'a, V: AxisVisitor<'a>>(&'a self, visitor: V) -> V::Output;

    fn visit_mut<'a, V: AxisVisitorMut<'a>>(&'a mut self, visitor: V) -> V::Output;

    /// Clones `axis` into a new variant if its type is one of the bound types.
    fn from_bound(axis: &dyn Any) -> Option<Self>;

    fn size(&self) -> i32 {
        self.visit(Size)
    }

    /// Number of bins including existing flow bins.
    fn shape(&self) -> i32 {
        self.visit(Shape)
    }

    fn options(&self) -> AxisOptions {
        self.visit(Options)
    }

    /// Bin index of `value` on the active axis.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleArgument`] if `U` does not convert to the active
    /// axis's value type.
    fn index<U: 'static>(&self, value: &U) -> Result<i32> {
        self.visit(IndexOf(value))
    }

    /// Value at fractional index `index` on the active axis.
    ///
    /// # Errors
    ///
    /// [`Error::NoValueMethod`] or [`Error::ValueNotConvertible`] if the
    /// active axis has no value mapping to `f64`.
    fn value(&self, index: f64) -> Result<f64> {
        self.visit(ValueAt(index))
    }

    /// Lower edge of bin `index`.
    fn lower(&self, index: i32) -> Result<f64> {
        self.value(f64::from(index))
    }

    /// Metadata of the active axis.
    ///
    /// # Errors
    ///
    /// [`Error::MetadataMismatch`] if the active axis's metadata type is not
    /// [`AxisVariant::Metadata`]. Narrow the variant with [`Narrow::get`] to
    /// reach that metadata.
    fn metadata(&self) -> Result<&Self::Metadata> {
        self.visit(MetadataOf::<Self::Metadata>(PhantomData))
    }

    fn metadata_mut(&mut self) -> Result<&mut Self::Metadata> {
        self.visit_mut(MetadataOf::<Self::Metadata>(PhantomData))
    }

    /// Label of the active axis's metadata.
    fn label(&self) -> Result<&str> {
        self.visit(Label)
    }

    /// Relabels the active axis.
    fn set_label(&mut self, label: &str) -> Result<()> {
        self.visit_mut(SetLabel(label))
    }

    /// Continuous value mapping of the active axis.
    fn as_continuous(&self) -> Result<&dyn Continuous> {
        self.visit(AsContinuous)
    }

    /// Text rendering of the active axis.
    ///
    /// Fails with [`Error::NotDisplayable`] when the active axis has none.
    fn as_display(&self) -> Result<&dyn fmt::Display> {
        self.visit(AsDisplay)
    }

    /// View of bin `index` of the active axis.
    fn bin(&self, index: i32) -> Result<Interval<'_, dyn Continuous + '_>> {
        Ok(Interval::new(self.as_continuous()?, index))
    }

    /// Iterator over the bins of the active axis.
    fn bins(&self) -> Result<Bins<'_, dyn Continuous + '_>> {
        Ok(Bins::new(self.as_continuous()?, self.size()))
    }

    /// The active axis as [`Any`].
    fn as_any(&self) -> &dyn Any {
        self.visit(AsAny)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self.visit_mut(AsAny)
    }

    fn active_type_name(&self) -> &'static str {
        self.visit(TypeName)
    }

    /// Builds a variant from the active axis of another variant type.
    ///
    /// # Errors
    ///
    /// [`Error::NotBound`] if the active axis of `other` is not one of the
    /// bound types of `Self`.
    fn try_from_variant<W: AxisVariant>(other: &W) -> Result<Self> {
        tracing::trace!(
            from = type_name::<W>(),
            to = type_name::<Self>(),
            active = other.active_type_name(),
            "converting axis variant"
        );
        Self::from_bound(other.as_any()).ok_or_else(|| Error::NotBound {
            axis: other.active_type_name(),
            variant: type_name::<Self>(),
        })
    }

    /// Replaces `self` with the active axis of `other`.
    ///
    /// On error `self` is left unchanged.
    fn assign<W: AxisVariant>(&mut self, other: &W) -> Result<()> {
        *self = Self::try_from_variant(other)?;
        Ok(())
    }

    /// True if `other` holds an axis of the same type and equal value.
    fn eq_variant<W: AxisVariant>(&self, other: &W) -> bool {
        self.visit(EqAny(other.as_any()))
    }

    /// True if the active axis is of type `T` and equal to `axis`.
    fn eq_axis<T: Axis>(&self, axis: &T) -> bool {
        self.as_any().downcast_ref::<T>().is_some_and(|a| a == axis)
    }
}

/// Typed access to a concrete axis.
///
/// Implemented for every [`Axis`] as a pass-through (it narrows to itself
/// only) and for every variant, so generic code can be written against either.
///
/// # Examples
///
/// ```rust
/// use histaxis::axis::{Integer, Regular};
/// use histaxis::variant::{AnyAxis, Narrow};
///
/// let regular = Regular::new(4, 0.0, 1.0)?;
/// assert!(regular.get::<Regular>().is_some());
/// assert!(regular.cast::<Integer>().is_err());
///
/// let variant = AnyAxis::from(regular.clone());
/// assert_eq!(variant.cast::<Regular>()?, &regular);
/// # Ok::<(), histaxis::Error>(())
/// ```
pub trait Narrow {
    /// The active axis if it is a `T`.
    fn get<T: Axis>(&self) -> Option<&T>;

    fn get_mut<T: Axis>(&mut self) -> Option<&mut T>;

    /// The active axis if it is a `T`, else [`Error::TypeMismatch`].
    fn cast<T: Axis>(&self) -> Result<&T>;
}

/// Error returned by [`Narrow::cast`].
pub fn type_mismatch<T>(active: &'static str) -> Error {
    Error::TypeMismatch {
        requested: type_name::<T>(),
        active,
    }
}

impl<A: Axis> Narrow for A {
    fn get<T: Axis>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref()
    }

    fn get_mut<T: Axis>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut()
    }

    fn cast<T: Axis>(&self) -> Result<&T> {
        self.get::<T>().ok_or_else(|| type_mismatch::<T>(type_name::<A>()))
    }
}

struct Size;

impl AxisVisitor<'_> for Size {
    type Output = i32;

    fn visit<A: Axis>(self, axis: &A) -> i32 {
        axis.size()
    }
}

struct Shape;

impl AxisVisitor<'_> for Shape {
    type Output = i32;

    fn visit<A: Axis>(self, axis: &A) -> i32 {
        axis.shape()
    }
}

struct Options;

impl AxisVisitor<'_> for Options {
    type Output = AxisOptions;

    fn visit<A: Axis>(self, axis: &A) -> AxisOptions {
        axis.options()
    }
}

struct IndexOf<'x, U>(&'x U);

impl<U: 'static> AxisVisitor<'_> for IndexOf<'_, U> {
    type Output = Result<i32>;

    fn visit<A: Axis>(self, axis: &A) -> Result<i32> {
        let value = <A::Value as AxisValue>::from_arg(self.0).ok_or_else(|| {
            Error::IncompatibleArgument {
                arg: type_name::<U>(),
                expected: type_name::<A::Value>(),
                axis: type_name::<A>(),
            }
        })?;
        Ok(axis.index(&value))
    }
}

struct ValueAt(f64);

impl AxisVisitor<'_> for ValueAt {
    type Output = Result<f64>;

    fn visit<A: Axis>(self, axis: &A) -> Result<f64> {
        axis.value_f64(self.0)
    }
}

struct MetadataOf<M>(PhantomData<M>);

fn metadata_mismatch<A: Axis, M>() -> Error {
    Error::MetadataMismatch {
        found: type_name::<A::Metadata>(),
        expected: type_name::<M>(),
    }
}

impl<'a, M: Metadata> AxisVisitor<'a> for MetadataOf<M> {
    type Output = Result<&'a M>;

    fn visit<A: Axis>(self, axis: &'a A) -> Result<&'a M> {
        let metadata: &dyn Any = axis.metadata();
        metadata
            .downcast_ref::<M>()
            .ok_or_else(metadata_mismatch::<A, M>)
    }
}

impl<'a, M: Metadata> AxisVisitorMut<'a> for MetadataOf<M> {
    type Output = Result<&'a mut M>;

    fn visit<A: Axis>(self, axis: &'a mut A) -> Result<&'a mut M> {
        let metadata: &mut dyn Any = axis.metadata_mut();
        metadata
            .downcast_mut::<M>()
            .ok_or_else(metadata_mismatch::<A, M>)
    }
}

struct Label;

impl<'a> AxisVisitor<'a> for Label {
    type Output = Result<&'a str>;

    fn visit<A: Axis>(self, axis: &'a A) -> Result<&'a str> {
        axis.metadata().label().ok_or(Error::Unlabeled {
            metadata: type_name::<A::Metadata>(),
        })
    }
}

struct SetLabel<'l>(&'l str);

impl AxisVisitorMut<'_> for SetLabel<'_> {
    type Output = Result<()>;

    fn visit<A: Axis>(self, axis: &mut A) -> Result<()> {
        if axis.metadata_mut().set_label(self.0) {
            Ok(())
        } else {
            Err(Error::Unlabeled {
                metadata: type_name::<A::Metadata>(),
            })
        }
    }
}

struct AsContinuous;

impl<'a> AxisVisitor<'a> for AsContinuous {
    type Output = Result<&'a dyn Continuous>;

    fn visit<A: Axis>(self, axis: &'a A) -> Result<&'a dyn Continuous> {
        match axis.as_continuous() {
            Some(continuous) => Ok(continuous),
            // report why the value mapping is missing if the axis knows
            None => axis.value_f64(0.0).and(Err(Error::NoValueMethod {
                axis: type_name::<A>(),
            })),
        }
    }
}

struct AsDisplay;

impl<'a> AxisVisitor<'a> for AsDisplay {
    type Output = Result<&'a dyn fmt::Display>;

    fn visit<A: Axis>(self, axis: &'a A) -> Result<&'a dyn fmt::Display> {
        axis.as_display().ok_or(Error::NotDisplayable {
            axis: type_name::<A>(),
        })
    }
}

struct AsAny;

impl<'a> AxisVisitor<'a> for AsAny {
    type Output = &'a dyn Any;

    fn visit<A: Axis>(self, axis: &'a A) -> &'a dyn Any {
        axis
    }
}

impl<'a> AxisVisitorMut<'a> for AsAny {
    type Output = &'a mut dyn Any;

    fn visit<A: Axis>(self, axis: &'a mut A) -> &'a mut dyn Any {
        axis
    }
}

struct TypeName;

impl AxisVisitor<'_> for TypeName {
    type Output = &'static str;

    fn visit<A: Axis>(self, _axis: &A) -> &'static str {
        type_name::<A>()
    }
}

struct EqAny<'o>(&'o dyn Any);

impl AxisVisitor<'_> for EqAny<'_> {
    type Output = bool;

    fn visit<A: Axis>(self, axis: &A) -> bool {
        self.0.downcast_ref::<A>().is_some_and(|other| other == axis)
    }
}

/// Declares an axis variant: an enum over a fixed list of axis types that
/// implements [`AxisVariant`] and [`Narrow`].
///
/// Each arm wraps one axis type; the types must be distinct and implement
/// [`Axis`] and [`Clone`]. The first arm determines the variant's nominal
/// metadata type. The macro also generates `From<T>` and `PartialEq<T>` for
/// every bound type `T`.
///
/// # Examples
///
/// ```rust
/// use histaxis::{axis_variant, axis::{Category, Regular}, transform::Log};
/// use histaxis::variant::AxisVariant;
///
/// axis_variant! {
///     #[derive(serde::Serialize)]
///     pub enum Observable {
///         Linear(Regular),
///         Log(Regular<f64, Log>),
///         Label(Category),
///     }
/// }
///
/// let mut axis = Observable::from(Regular::with_transform(Log, 3, 1.0, 1e3)?);
/// axis.set_label("energy")?;
/// assert_eq!(axis.label()?, "energy");
/// assert_eq!(axis.index(&50.0)?, 1);
/// # Ok::<(), histaxis::Error>(())
/// ```
#[macro_export]
macro_rules! axis_variant {
    (@bound $name:ident, $arm:ident($ty:ty)) => {
        impl ::std::convert::From<$ty> for $name {
            fn from(axis: $ty) -> Self {
                Self::$arm(axis)
            }
        }

        impl ::std::cmp::PartialEq<$ty> for $name {
            fn eq(&self, other: &$ty) -> bool {
                $crate::variant::AxisVariant::eq_axis(self, other)
            }
        }

        impl ::std::cmp::PartialEq<$name> for $ty {
            fn eq(&self, other: &$name) -> bool {
                $crate::variant::AxisVariant::eq_axis(other, self)
            }
        }
    };

    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $first:ident($first_ty:ty)
            $(, $arm:ident($arm_ty:ty))*
            $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $first($first_ty),
            $($arm($arm_ty),)*
        }

        impl $crate::variant::AxisVariant for $name {
            type Metadata = <$first_ty as $crate::axis::Axis>::Metadata;

            fn visit<'a, V: $crate::variant::AxisVisitor<'a>>(&'a self, visitor: V) -> V::Output {
                match self {
                    Self::$first(axis) => visitor.visit(axis),
                    $(Self::$arm(axis) => visitor.visit(axis),)*
                }
            }

            fn visit_mut<'a, V: $crate::variant::AxisVisitorMut<'a>>(
                &'a mut self,
                visitor: V,
            ) -> V::Output {
                match self {
                    Self::$first(axis) => visitor.visit(axis),
                    $(Self::$arm(axis) => visitor.visit(axis),)*
                }
            }

            fn from_bound(axis: &dyn ::std::any::Any) -> ::std::option::Option<Self> {
                if let Some(axis) = axis.downcast_ref::<$first_ty>() {
                    return Some(Self::$first(::std::clone::Clone::clone(axis)));
                }
                $(
                    if let Some(axis) = axis.downcast_ref::<$arm_ty>() {
                        return Some(Self::$arm(::std::clone::Clone::clone(axis)));
                    }
                )*
                None
            }
        }

        impl $crate::variant::Narrow for $name {
            fn get<T: $crate::axis::Axis>(&self) -> ::std::option::Option<&T> {
                $crate::variant::AxisVariant::as_any(self).downcast_ref::<T>()
            }

            fn get_mut<T: $crate::axis::Axis>(&mut self) -> ::std::option::Option<&mut T> {
                $crate::variant::AxisVariant::as_any_mut(self).downcast_mut::<T>()
            }

            fn cast<T: $crate::axis::Axis>(&self) -> $crate::Result<&T> {
                <Self as $crate::variant::Narrow>::get::<T>(self).ok_or_else(|| {
                    $crate::variant::type_mismatch::<T>(
                        $crate::variant::AxisVariant::active_type_name(self),
                    )
                })
            }
        }

        $crate::axis_variant!(@bound $name, $first($first_ty));
        $($crate::axis_variant!(@bound $name, $arm($arm_ty));)*
    };

}

axis_variant! {
    /// Variant over the axis types shipped with this crate.
    ///
    /// Circular axes are [`Regular`] axes with the circular option and live in
    /// the `Regular` arm.
    #[derive(serde::Serialize, serde::Deserialize)]
    pub enum AnyAxis {
        Regular(Regular),
        Log(Regular<f64, Log>),
        Sqrt(Regular<f64, Sqrt>),
        Pow(Regular<f64, Pow>),
        Integer(Integer),
        Category(Category),
    }
}
