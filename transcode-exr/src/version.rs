//! Magic number, version word and file topology.

use crate::cursor::ByteCursor;
use crate::error::{ExrError, Result};
use bitflags::bitflags;
use std::fmt;
use std::io::Read;

bitflags! {
    /// Flags carried in the version word.
    ///
    /// Unknown bits are retained rather than rejected.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct VersionFlags: u32 {
        /// Single-part tiled image
        const TILED = 0x200;
        /// Attribute names and type names may be longer than 31 bytes
        const LONG_NAMES = 0x400;
        /// Deep data (non-image) parts present
        const NON_IMAGE = 0x800;
        /// Multi-part file
        const MULTI_PART = 0x1000;
    }
}

/// Mutually exclusive file shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// One part of scanline chunks
    ScanlineSinglePart,
    /// One part of tiles
    TiledSinglePart,
    /// One part of deep data
    DeepSinglePart,
    /// Several parts, none deep
    MultiPart,
    /// Several parts, deep data present
    MultiPartDeep,
}

impl Topology {
    /// Classify a version word.
    ///
    /// The tiled bit wins outright; otherwise the deep and multi-part bits
    /// select one of the four remaining shapes. Every word maps to exactly
    /// one variant.
    pub fn from_version_word(word: u32) -> Self {
        let flags = VersionFlags::from_bits_retain(word);
        if flags.contains(VersionFlags::TILED) {
            return Topology::TiledSinglePart;
        }

        let deep = flags.contains(VersionFlags::NON_IMAGE);
        let multi = flags.contains(VersionFlags::MULTI_PART);
        match (multi, deep) {
            (true, false) => Topology::MultiPart,
            (true, true) => Topology::MultiPartDeep,
            (false, true) => Topology::DeepSinglePart,
            (false, false) => Topology::ScanlineSinglePart,
        }
    }

    /// True for the two multi-part shapes
    pub fn is_multi_part(self) -> bool {
        matches!(self, Topology::MultiPart | Topology::MultiPartDeep)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::ScanlineSinglePart => "single-part scanline",
            Topology::TiledSinglePart => "single-part tiled",
            Topology::DeepSinglePart => "single-part deep",
            Topology::MultiPart => "multi-part",
            Topology::MultiPartDeep => "multi-part deep",
        };
        f.write_str(name)
    }
}

/// Decoded version word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    /// Low byte of the version word. Informational only.
    pub number: u8,
    /// Full version word as flags
    pub flags: VersionFlags,
}

impl Version {
    pub fn from_word(word: u32) -> Self {
        Version {
            number: (word & 0xFF) as u8,
            flags: VersionFlags::from_bits_retain(word),
        }
    }

    /// Raw version word
    pub fn word(&self) -> u32 {
        self.flags.bits()
    }

    pub fn topology(&self) -> Topology {
        Topology::from_version_word(self.word())
    }

    /// Whether the file announces long attribute names.
    ///
    /// This is a hint only; the parser enforces the 255-byte limit either way.
    pub fn has_long_names(&self) -> bool {
        self.flags.contains(VersionFlags::LONG_NAMES)
    }
}

/// Read and validate the 8-byte preamble.
///
/// On a magic mismatch nothing past the magic is consumed.
pub fn read_preamble<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Version> {
    let magic = cursor.read_u32_le("magic number")?;
    if magic != crate::EXR_MAGIC {
        return Err(ExrError::BadMagic {
            expected: crate::EXR_MAGIC,
            found: magic,
        });
    }

    let version = Version::from_word(cursor.read_u32_le("version")?);
    tracing::debug!(
        version = version.number,
        flags = ?version.flags,
        topology = %version.topology(),
        "read EXR preamble"
    );
    Ok(version)
}
