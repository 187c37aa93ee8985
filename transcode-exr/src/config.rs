//! Decoder configuration.

use crate::cursor::{DEFAULT_MAX_READ_CHUNK, DEFAULT_READ_BUFFER_SIZE};
use crate::error::{ExrError, Result};
use crate::header::DuplicatePolicy;

/// Structural decoder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Upper bound, in bytes, for one underlying read while collecting an
    /// attribute value.
    pub max_read_chunk: usize,
    /// Capacity of the read buffer wrapped around the input.
    pub read_buffer_size: usize,
    /// Fail on a repeated attribute name instead of keeping the last value.
    pub reject_duplicate_attributes: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_read_chunk: DEFAULT_MAX_READ_CHUNK,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            reject_duplicate_attributes: false,
        }
    }
}

impl DecoderConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_read_chunk == 0 {
            return Err(ExrError::InvalidConfig(
                "max_read_chunk must be non-zero".into(),
            ));
        }

        if self.read_buffer_size == 0 {
            return Err(ExrError::InvalidConfig(
                "read_buffer_size must be non-zero".into(),
            ));
        }

        Ok(())
    }

    /// Duplicate handling as a header policy.
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        if self.reject_duplicate_attributes {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::LastWriteWins
        }
    }
}
