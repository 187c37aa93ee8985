//! OpenEXR header: the attribute table of one part

use crate::attribute::{name, read_attribute, Attribute};
use crate::cursor::ByteCursor;
use crate::error::{ExrError, Result};
use crate::types::{DataWindow, TileDescription};
use std::collections::HashMap;
use std::io::Read;

/// How to treat an attribute name that appears twice in one header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Later value replaces the earlier one, keeping its position
    #[default]
    LastWriteWins,
    /// Fail with `ExrError::DuplicateAttribute`
    Reject,
}

/// Attribute table of one part.
///
/// Names are unique. Iteration follows the order in which names first
/// appeared in the stream.
#[derive(Debug, Clone, Default)]
pub struct Header {
    attributes: Vec<Attribute>,
    index: HashMap<String, usize>,
}

impl Header {
    /// Create an empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Read attribute records up to and including the empty-name terminator
    pub fn read<R: Read>(cursor: &mut ByteCursor<R>, policy: DuplicatePolicy) -> Result<Self> {
        let mut header = Header::new();
        while let Some(attribute) = read_attribute(cursor)? {
            header.insert(attribute, policy)?;
        }
        tracing::trace!(attributes = header.len(), "read header");
        Ok(header)
    }

    /// Insert an attribute, applying `policy` if the name is already present
    pub fn insert(&mut self, attribute: Attribute, policy: DuplicatePolicy) -> Result<()> {
        match self.index.get(&attribute.name) {
            Some(&slot) => {
                if policy == DuplicatePolicy::Reject {
                    return Err(ExrError::DuplicateAttribute(attribute.name));
                }
                tracing::warn!(name = %attribute.name, "duplicate attribute overwrites earlier value");
                self.attributes[slot] = attribute;
            }
            None => {
                self.index.insert(attribute.name.clone(), self.attributes.len());
                self.attributes.push(attribute);
            }
        }
        Ok(())
    }

    /// Get attribute
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.index.get(name).map(|&slot| &self.attributes[slot])
    }

    /// Get attribute or fail with `MissingAttribute`
    pub fn require(&self, name: &str) -> Result<&Attribute> {
        self.get(name)
            .ok_or_else(|| ExrError::MissingAttribute(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attributes in stream order
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    /// The `dataWindow` box, validated
    pub fn data_window(&self) -> Result<DataWindow> {
        let window = self.require(name::DATA_WINDOW)?.as_box2i()?;
        if !window.is_valid() {
            return Err(ExrError::InvalidDataWindow(window));
        }
        Ok(window)
    }

    /// The `tiles` description
    pub fn tiles(&self) -> Result<TileDescription> {
        self.require(name::TILES)?.as_tile_description()
    }

    /// The `chunkCount` attribute, required for deep and multi-part files
    pub fn chunk_count(&self) -> Result<usize> {
        let attribute = self.require(name::CHUNK_COUNT)?;
        let count = attribute.as_i32()?;
        usize::try_from(count).map_err(|_| {
            ExrError::invalid_attribute(&attribute.name, format!("negative chunk count {}", count))
        })
    }

    /// Part name, present in multi-part files
    pub fn part_name(&self) -> Option<String> {
        self.get(name::PART_NAME).map(Attribute::as_string)
    }

    /// Part type (`scanlineimage`, `tiledimage`, `deepscanline`, `deeptile`)
    pub fn part_type(&self) -> Option<String> {
        self.get(name::PART_TYPE).map(Attribute::as_string)
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
