//! OpenEXR structure decoder

use crate::config::DecoderConfig;
use crate::cursor::ByteCursor;
use crate::error::Result;
use crate::header::{DuplicatePolicy, Header};
use crate::layout::{layout_for, ChunkAddressing};
use crate::offsets::OffsetTable;
use crate::version::{read_preamble, Topology, Version};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// One part of a file: its header and the location of its chunks
#[derive(Debug, Clone)]
pub struct Part {
    /// Attribute table
    pub header: Header,
    /// How offset table entries map to chunks
    pub addressing: ChunkAddressing,
    /// Absolute chunk offsets
    pub offsets: OffsetTable,
}

/// Decoded file structure
#[derive(Debug, Clone)]
pub struct ExrFile {
    /// Version number and flags
    pub version: Version,
    /// File shape
    pub topology: Topology,
    /// Parts in file order. Single-part files have exactly one.
    pub parts: Vec<Part>,
}

impl ExrFile {
    /// Header of the first part
    pub fn header(&self) -> Option<&Header> {
        self.parts.first().map(|part| &part.header)
    }

    /// Offset table of the first part
    pub fn offsets(&self) -> Option<&OffsetTable> {
        self.parts.first().map(|part| &part.offsets)
    }
}

/// OpenEXR structure decoder
#[derive(Debug, Clone, Default)]
pub struct ExrDecoder {
    config: DecoderConfig,
}

impl ExrDecoder {
    /// Create new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create decoder from a validated configuration
    pub fn with_config(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(ExrDecoder { config })
    }

    /// Set the largest single read used while collecting attribute values
    pub fn max_read_chunk(mut self, bytes: usize) -> Self {
        self.config.max_read_chunk = bytes;
        self
    }

    /// Fail on repeated attribute names instead of keeping the last value
    pub fn reject_duplicate_attributes(mut self, reject: bool) -> Self {
        self.config.reject_duplicate_attributes = reject;
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    fn cursor<R: Read>(&self, reader: R) -> Result<ByteCursor<R>> {
        self.config.validate()?;
        Ok(ByteCursor::with_limits(
            reader,
            self.config.read_buffer_size,
            self.config.max_read_chunk,
        ))
    }

    /// Decode preamble, headers and offset tables from a stream positioned
    /// at the start of the file
    pub fn decode<R: Read>(&self, reader: R) -> Result<ExrFile> {
        let mut cursor = self.cursor(reader)?;
        let version = read_preamble(&mut cursor)?;
        let topology = version.topology();
        let headers = read_headers(&mut cursor, topology, self.config.duplicate_policy())?;

        let layout = layout_for(topology);
        let mut parts = Vec::with_capacity(headers.len());
        for (index, header) in headers.into_iter().enumerate() {
            let addressing = layout.addressing(&header)?;
            let count = addressing.chunk_count();
            tracing::debug!(part = index, chunks = count, "reading offset table");

            let offsets = OffsetTable::read(&mut cursor, count)?;
            parts.push(Part {
                header,
                addressing,
                offsets,
            });
        }

        tracing::debug!(
            topology = %topology,
            parts = parts.len(),
            bytes = cursor.position(),
            "decoded EXR structure"
        );
        Ok(ExrFile {
            version,
            topology,
            parts,
        })
    }

    /// Decode from an in-memory buffer
    pub fn decode_bytes(&self, data: &[u8]) -> Result<ExrFile> {
        self.decode(Cursor::new(data))
    }

    /// Open and decode a file
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<ExrFile> {
        let file = File::open(path.as_ref())?;
        self.decode(file)
    }

    /// Read only the preamble and headers, skipping the offset tables
    pub fn probe<R: Read>(&self, reader: R) -> Result<(Version, Vec<Header>)> {
        let mut cursor = self.cursor(reader)?;
        let version = read_preamble(&mut cursor)?;
        let headers = read_headers(
            &mut cursor,
            version.topology(),
            self.config.duplicate_policy(),
        )?;
        Ok((version, headers))
    }

    /// Check if data starts with the EXR magic number
    pub fn is_exr(data: &[u8]) -> bool {
        if data.len() < 4 {
            return false;
        }
        u32::from_le_bytes([data[0], data[1], data[2], data[3]]) == crate::EXR_MAGIC
    }
}

/// Read one header, or for multi-part files every header up to the empty
/// header that ends the sequence
fn read_headers<R: Read>(
    cursor: &mut ByteCursor<R>,
    topology: Topology,
    policy: DuplicatePolicy,
) -> Result<Vec<Header>> {
    if !topology.is_multi_part() {
        return Ok(vec![Header::read(cursor, policy)?]);
    }

    let mut headers = Vec::new();
    loop {
        let header = Header::read(cursor, policy)?;
        if header.is_empty() {
            break;
        }
        headers.push(header);
    }
    tracing::debug!(parts = headers.len(), "read multi-part headers");
    Ok(headers)
}
