use alloc::borrow::Cow;
use core::{error, fmt};
use std::io;

use crate::checksum::Checksum;

/// Result type of every encode and decode operation.
pub type Result<T, E = SerialError> = core::result::Result<T, E>;

/// A enumeration of all error outcomes of (de)serialization.
///
/// None of them is recoverable locally: the whole root-level operation is
/// abandoned and the destination value is left in an unspecified state.
#[derive(Debug)]
pub enum SerialError {
    /// The value has no representation in the target format.
    UnsupportedType { type_name: Cow<'static, str> },
    /// The input ended early or contains bytes that cannot be decoded.
    ///
    /// `position` is the stream cursor when the failure was detected. JSON
    /// documents carry no cursor after parsing, so they report `None` and
    /// name the JSON path in `reason` instead.
    MalformedData {
        position: Option<u64>,
        reason: Cow<'static, str>,
    },
    /// The stored structural fingerprint differs from the expected one.
    ChecksumMismatch {
        type_name: Cow<'static, str>,
        expected: Checksum,
        found: Checksum,
    },
    /// A polymorphic slot could not be rebuilt.
    InstantiationFailure {
        class_name: Cow<'static, str>,
        reason: Cow<'static, str>,
    },
    /// The underlying byte source or sink failed.
    Io { position: u64, source: io::Error },
}

impl SerialError {
    #[inline]
    pub(crate) fn malformed(position: u64, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedData {
            position: Some(position),
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn instantiation(
        class_name: impl Into<Cow<'static, str>>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::InstantiationFailure {
            class_name: class_name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType { type_name } => {
                write!(f, "type `{type_name}` is not supported by this format")
            }
            Self::MalformedData {
                position: Some(position),
                reason,
            } => {
                write!(f, "malformed data at byte {position}: {reason}")
            }
            Self::MalformedData {
                position: None,
                reason,
            } => {
                write!(f, "malformed data: {reason}")
            }
            Self::ChecksumMismatch {
                type_name,
                expected,
                found,
            } => {
                write!(
                    f,
                    "checksum mismatch for `{type_name}`: expected {expected}, found {found}"
                )
            }
            Self::InstantiationFailure { class_name, reason } => {
                write!(f, "cannot instantiate `{class_name}`: {reason}")
            }
            Self::Io { position, source } => {
                write!(f, "i/o failure at byte {position}: {source}")
            }
        }
    }
}

impl error::Error for SerialError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SerialError;
    use crate::checksum::Checksum;
    use alloc::string::ToString;

    #[test]
    fn display() {
        let err = SerialError::malformed(12, "unexpected end of stream");
        assert_eq!(
            err.to_string(),
            "malformed data at byte 12: unexpected end of stream"
        );

        let err = SerialError::ChecksumMismatch {
            type_name: "Point".into(),
            expected: Checksum::of("f32 x; f32 y; "),
            found: Checksum::from_raw(7),
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch for `Point`: expected 0x4D094F2C, found 0x00000007"
        );
    }
}
