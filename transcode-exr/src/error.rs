//! OpenEXR error types

use crate::types::Box2i;
use thiserror::Error;

/// Result type for OpenEXR operations
pub type Result<T> = std::result::Result<T, ExrError>;

/// OpenEXR error types
///
/// Every variant is terminal for the decode session that produced it: the
/// meaning of each byte depends on the structure parsed before it, so there
/// is no point at which a corrupt stream can be resumed.
#[derive(Error, Debug)]
pub enum ExrError {
    /// The first four bytes are not the EXR signature
    #[error("Invalid EXR magic number: expected {expected}, found {found}")]
    BadMagic { expected: u32, found: u32 },

    /// The stream ended, or failed, in the middle of a field
    #[error("Truncated input while reading {field} at byte {offset}: {source}")]
    Truncated {
        field: &'static str,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    /// Attribute name longer than the format allows
    #[error("Attribute name too long: {} bytes (maximum {})", .length, crate::MAX_ATTRIBUTE_NAME_LEN)]
    NameTooLong { length: usize },

    /// Missing required attribute
    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    /// Required attribute present but unusable
    #[error("Invalid attribute {name}: {reason}")]
    InvalidAttribute { name: String, reason: String },

    /// Data window with max below min
    #[error("Invalid data window {0}")]
    InvalidDataWindow(Box2i),

    /// Attribute name seen twice in one header
    #[error("Duplicate attribute: {0}")]
    DuplicateAttribute(String),

    /// Rejected decoder configuration
    #[error("Invalid decoder configuration: {0}")]
    InvalidConfig(String),

    /// I/O error outside of field parsing (opening the input)
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ExrError {
    /// Build an `InvalidAttribute` error
    pub fn invalid_attribute(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ExrError::InvalidAttribute {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// True if the input ended (or failed) before the structure was complete
    pub fn is_truncated(&self) -> bool {
        matches!(self, ExrError::Truncated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::V2i;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = ExrError::BadMagic {
            expected: 20000630,
            found: 1,
        };
        let text = format!("{}", err);
        assert!(text.contains("20000630"));
        assert!(text.contains("found 1"));

        let err = ExrError::NameTooLong { length: 300 };
        assert!(format!("{}", err).contains("300"));
        assert!(format!("{}", err).contains("255"));

        let err = ExrError::MissingAttribute("dataWindow".into());
        assert!(format!("{}", err).contains("dataWindow"));
    }

    #[test]
    fn test_truncated_keeps_source() {
        let err = ExrError::Truncated {
            field: "attribute value",
            offset: 42,
            source: io::Error::from(io::ErrorKind::UnexpectedEof),
        };
        assert!(err.is_truncated());
        assert!(err.source().is_some());
        assert!(format!("{}", err).contains("attribute value"));
        assert!(format!("{}", err).contains("42"));
    }

    #[test]
    fn test_invalid_data_window_display() {
        let err = ExrError::InvalidDataWindow(Box2i::new(V2i::new(0, 5), V2i::new(3, 1)));
        assert_eq!(format!("{}", err), "Invalid data window [(0, 5) - (3, 1)]");
        assert!(!err.is_truncated());
    }
}
