//! Header attribute records

use crate::cursor::ByteCursor;
use crate::error::{ExrError, Result};
use crate::types::{Box2i, TileDescription};
use byteorder::{ByteOrder, LittleEndian};
use std::io::Read;

/// Well-known attribute names
pub mod name {
    pub const DATA_WINDOW: &str = "dataWindow";
    pub const TILES: &str = "tiles";
    pub const CHUNK_COUNT: &str = "chunkCount";
    pub const PART_NAME: &str = "name";
    pub const PART_TYPE: &str = "type";
}

/// One `(name, type, value)` record from a header.
///
/// The value is kept as raw bytes; the typed accessors below cover the few
/// types the structural reader itself depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub type_name: String,
    pub value: Vec<u8>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, value: Vec<u8>) -> Self {
        Attribute {
            name: name.into(),
            type_name: type_name.into(),
            value,
        }
    }

    /// Declared value length
    pub fn size(&self) -> usize {
        self.value.len()
    }

    /// Value as `box2i`
    pub fn as_box2i(&self) -> Result<Box2i> {
        Box2i::from_le_bytes(&self.value).ok_or_else(|| {
            ExrError::invalid_attribute(
                &self.name,
                format!("expected {} bytes, got {}", Box2i::SIZE, self.value.len()),
            )
        })
    }

    /// Value as `int`
    pub fn as_i32(&self) -> Result<i32> {
        if self.value.len() != 4 {
            return Err(ExrError::invalid_attribute(
                &self.name,
                format!("expected 4 bytes, got {}", self.value.len()),
            ));
        }
        Ok(LittleEndian::read_i32(&self.value))
    }

    /// Value as `tiledesc`
    pub fn as_tile_description(&self) -> Result<TileDescription> {
        TileDescription::from_le_bytes(&self.value)
            .map_err(|reason| ExrError::invalid_attribute(&self.name, reason))
    }

    /// Value as `string`, decoded lossily
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}

/// Read one attribute record.
///
/// Returns `Ok(None)` when the record has an empty name, which marks the end
/// of the header.
pub fn read_attribute<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Option<Attribute>> {
    let name = cursor.read_null_terminated("attribute name")?;
    if name.is_empty() {
        return Ok(None);
    }
    if name.len() > crate::MAX_ATTRIBUTE_NAME_LEN {
        return Err(ExrError::NameTooLong { length: name.len() });
    }

    let type_name = cursor.read_null_terminated("attribute type")?;
    let size = cursor.read_u32_le("attribute size")?;
    let value = cursor.read_bytes(size as usize, "attribute value")?;

    let attribute = Attribute {
        name: String::from_utf8_lossy(&name).into_owned(),
        type_name: String::from_utf8_lossy(&type_name).into_owned(),
        value,
    };
    tracing::trace!(
        name = %attribute.name,
        type_name = %attribute.type_name,
        size,
        "read attribute"
    );
    Ok(Some(attribute))
}
