//! OpenEXR container structure reader
//!
//! OpenEXR is a high dynamic range (HDR) image format developed by Industrial Light & Magic.
//! Before any pixel data can be decompressed, a reader has to walk the container layout:
//! a magic number and version word, a self-describing table of typed attributes, and a
//! table of byte offsets locating each chunk of pixel data. This crate reads that layout
//! and hands the result to chunk decoders.
//!
//! # Features
//!
//! - Magic number and version flag validation
//! - Topology classification (scanline, tiled, deep, multi-part)
//! - Generic attribute table parsing with values of any length
//! - Offset tables sized per topology (rows, tile levels, declared chunk counts)
//!
//! # Example
//!
//! ```ignore
//! use transcode_exr::ExrDecoder;
//!
//! let file = ExrDecoder::new().open("beauty.exr")?;
//! println!("{} with {} parts", file.topology, file.parts.len());
//! for offset in file.offsets().unwrap().iter() {
//!     println!("chunk at {offset}");
//! }
//! ```

pub mod attribute;
pub mod config;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod header;
pub mod layout;
pub mod offsets;
pub mod types;
pub mod version;

pub use attribute::Attribute;
pub use config::DecoderConfig;
pub use cursor::ByteCursor;
pub use decoder::{ExrDecoder, ExrFile, Part};
pub use error::{ExrError, Result};
pub use header::{DuplicatePolicy, Header};
pub use layout::{layout_for, ChunkAddressing, ChunkLayout, TileLevel};
pub use offsets::OffsetTable;
pub use types::{Box2i, DataWindow, LevelMode, RoundingMode, TileDescription, V2i};
pub use version::{Topology, Version, VersionFlags};

/// EXR magic number
pub const EXR_MAGIC: u32 = 20000630;

/// Longest attribute name accepted, in bytes
pub const MAX_ATTRIBUTE_NAME_LEN: usize = 255;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_number() {
        assert_eq!(EXR_MAGIC, 0x01312F76);
        assert_eq!(EXR_MAGIC.to_le_bytes(), [0x76, 0x2F, 0x31, 0x01]);
    }

    #[test]
    fn test_version_flags() {
        assert_eq!(VersionFlags::TILED.bits(), 0x200);
        assert_eq!(VersionFlags::LONG_NAMES.bits(), 0x400);
        assert_eq!(VersionFlags::NON_IMAGE.bits(), 0x800);
        assert_eq!(VersionFlags::MULTI_PART.bits(), 0x1000);
    }
}
