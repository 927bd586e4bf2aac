//! Error type shared by axis construction and variant dispatch.

/// Coarse classification of an [`Error`].
///
/// Construction problems are caller input errors, capability problems mean an
/// operation was dispatched to an axis type that cannot serve it, and
/// conversion problems come from narrowing or re-binding a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidConfiguration,
    Capability,
    Conversion,
}

/// Errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("number of bins must be in 1..=i32::MAX, got {0}")]
    BinCount(u32),
    #[error("forward transform of start or stop invalid")]
    NonFiniteRange,
    #[error("range of axis is zero")]
    ZeroRange,
    #[error("circular axis cannot have underflow")]
    CircularUnderflow,
    #[error("cannot shrink [{begin}, {end}) with merge {merge} on axis of size {size}")]
    InvalidShrink {
        begin: i32,
        end: i32,
        merge: u32,
        size: i32,
    },
    #[error("cannot shrink circular axis")]
    CircularShrink,
    #[error("cannot convert {arg} to {expected} for {axis}")]
    IncompatibleArgument {
        arg: &'static str,
        expected: &'static str,
        axis: &'static str,
    },
    #[error("{axis} has no value method")]
    NoValueMethod { axis: &'static str },
    #[error("return value {output} of {axis}::value is not convertible to f64")]
    ValueNotConvertible {
        output: &'static str,
        axis: &'static str,
    },
    #[error(
        "cannot return metadata of type {found} through axis variant interface which uses type {expected}"
    )]
    MetadataMismatch {
        found: &'static str,
        expected: &'static str,
    },
    #[error("{axis} is not displayable")]
    NotDisplayable { axis: &'static str },
    #[error("metadata of type {metadata} carries no label")]
    Unlabeled { metadata: &'static str },
    #[error("{axis} is not a bound type of {variant}")]
    NotBound {
        axis: &'static str,
        variant: &'static str,
    },
    #[error("requested axis type {requested} but active type is {active}")]
    TypeMismatch {
        requested: &'static str,
        active: &'static str,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BinCount(_)
            | Error::NonFiniteRange
            | Error::ZeroRange
            | Error::InvalidShrink { .. }
            | Error::CircularShrink => ErrorKind::InvalidArgument,
            Error::CircularUnderflow => ErrorKind::InvalidConfiguration,
            Error::IncompatibleArgument { .. }
            | Error::NoValueMethod { .. }
            | Error::ValueNotConvertible { .. }
            | Error::NotDisplayable { .. }
            | Error::MetadataMismatch { .. }
            | Error::Unlabeled { .. } => ErrorKind::Capability,
            Error::NotBound { .. } | Error::TypeMismatch { .. } => ErrorKind::Conversion,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::ZeroRange.kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::CircularShrink.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            Error::CircularUnderflow.kind(),
            ErrorKind::InvalidConfiguration
        );
        assert_eq!(
            Error::NoValueMethod { axis: "Foo" }.kind(),
            ErrorKind::Capability
        );
        assert_eq!(
            Error::NotDisplayable { axis: "Foo" }.kind(),
            ErrorKind::Capability
        );
        assert_eq!(
            Error::NotBound {
                axis: "Foo",
                variant: "Bar"
            }
            .kind(),
            ErrorKind::Conversion
        );
    }

    #[test]
    fn test_error_messages_name_types() {
        let err = Error::IncompatibleArgument {
            arg: "alloc::string::String",
            expected: "f64",
            axis: "histaxis::axis::Regular",
        };
        assert_eq!(
            err.to_string(),
            "cannot convert alloc::string::String to f64 for histaxis::axis::Regular"
        );
    }
}
