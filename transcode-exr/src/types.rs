//! OpenEXR value types read by the structural layer

use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

/// 2D integer vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct V2i {
    pub x: i32,
    pub y: i32,
}

impl V2i {
    pub fn new(x: i32, y: i32) -> Self {
        V2i { x, y }
    }
}

/// 2D integer bounding box (`box2i`), inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Box2i {
    pub min: V2i,
    pub max: V2i,
}

impl Box2i {
    /// Wire size of a `box2i` value
    pub const SIZE: usize = 16;

    pub fn new(min: V2i, max: V2i) -> Self {
        Box2i { min, max }
    }

    /// Decode `(xMin, yMin, xMax, yMax)` from a 16-byte little-endian value.
    ///
    /// Returns `None` if `bytes` is not exactly 16 bytes long.
    pub fn from_le_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::SIZE {
            return None;
        }
        Some(Box2i {
            min: V2i::new(
                LittleEndian::read_i32(&bytes[0..4]),
                LittleEndian::read_i32(&bytes[4..8]),
            ),
            max: V2i::new(
                LittleEndian::read_i32(&bytes[8..12]),
                LittleEndian::read_i32(&bytes[12..16]),
            ),
        })
    }

    /// Width in pixels, computed without overflow
    pub fn width(&self) -> i64 {
        self.max.x as i64 - self.min.x as i64 + 1
    }

    /// Height in pixels (number of scanlines), computed without overflow
    pub fn height(&self) -> i64 {
        self.max.y as i64 - self.min.y as i64 + 1
    }

    /// Check if box is valid
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl fmt::Display for Box2i {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}) - ({}, {})]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

/// Data window (actual pixel data bounds)
pub type DataWindow = Box2i;

/// Tile level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelMode {
    /// Single resolution level
    #[default]
    OneLevel,
    /// Mipmap levels
    MipmapLevels,
    /// Ripmap levels
    RipmapLevels,
}

impl LevelMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LevelMode::OneLevel),
            1 => Some(LevelMode::MipmapLevels),
            2 => Some(LevelMode::RipmapLevels),
            _ => None,
        }
    }
}

/// Tile rounding mode, used when halving level sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    #[default]
    RoundDown,
    RoundUp,
}

impl RoundingMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(RoundingMode::RoundDown),
            1 => Some(RoundingMode::RoundUp),
            _ => None,
        }
    }

    /// Integer division rounded in this mode
    pub fn divide(self, dividend: u32, divisor: u32) -> u32 {
        match self {
            RoundingMode::RoundDown => dividend / divisor,
            RoundingMode::RoundUp => dividend.div_ceil(divisor),
        }
    }

    /// Base-2 logarithm rounded in this mode. `log2(0)` and `log2(1)` are 0.
    pub fn log2(self, value: u32) -> u32 {
        if value <= 1 {
            return 0;
        }
        let floor = 31 - value.leading_zeros();
        match self {
            RoundingMode::RoundDown => floor,
            RoundingMode::RoundUp if value.is_power_of_two() => floor,
            RoundingMode::RoundUp => floor + 1,
        }
    }
}

/// Tile description (`tiledesc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDescription {
    pub x_size: u32,
    pub y_size: u32,
    pub level_mode: LevelMode,
    pub rounding_mode: RoundingMode,
}

impl TileDescription {
    /// Wire size of a `tiledesc` value
    pub const SIZE: usize = 9;

    /// Decode from the 9-byte wire form: two `u32` sizes, then one byte with
    /// the level mode in the low nibble and the rounding mode in the high one.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, String> {
        if bytes.len() != Self::SIZE {
            return Err(format!(
                "expected {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            ));
        }

        let x_size = LittleEndian::read_u32(&bytes[0..4]);
        let y_size = LittleEndian::read_u32(&bytes[4..8]);
        if x_size == 0 || y_size == 0 {
            return Err(format!("tile size {}x{} is empty", x_size, y_size));
        }

        let mode = bytes[8];
        let level_mode = LevelMode::from_u8(mode & 0x0F)
            .ok_or_else(|| format!("unknown level mode {}", mode & 0x0F))?;
        let rounding_mode = RoundingMode::from_u8(mode >> 4)
            .ok_or_else(|| format!("unknown rounding mode {}", mode >> 4))?;

        Ok(TileDescription {
            x_size,
            y_size,
            level_mode,
            rounding_mode,
        })
    }
}

impl Default for TileDescription {
    fn default() -> Self {
        TileDescription {
            x_size: 64,
            y_size: 64,
            level_mode: LevelMode::OneLevel,
            rounding_mode: RoundingMode::RoundDown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_bytes(values: [i32; 4]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_box2i_from_bytes() {
        let b = Box2i::from_le_bytes(&box_bytes([-2, 10, 1919, 1089])).unwrap();
        assert_eq!(b.min, V2i::new(-2, 10));
        assert_eq!(b.max, V2i::new(1919, 1089));
        assert_eq!(b.width(), 1922);
        assert_eq!(b.height(), 1080);
        assert!(b.is_valid());
    }

    #[test]
    fn test_box2i_wrong_size() {
        assert!(Box2i::from_le_bytes(&[0u8; 15]).is_none());
        assert!(Box2i::from_le_bytes(&[0u8; 17]).is_none());
    }

    #[test]
    fn test_box2i_extreme_height() {
        let b = Box2i::new(V2i::new(0, i32::MIN), V2i::new(0, i32::MAX));
        assert_eq!(b.height(), 1i64 << 32);
    }

    #[test]
    fn test_inverted_box_invalid() {
        let b = Box2i::new(V2i::new(0, 5), V2i::new(0, 4));
        assert!(!b.is_valid());
        assert_eq!(b.height(), 0);
    }

    #[test]
    fn test_rounding_divide() {
        assert_eq!(RoundingMode::RoundUp.divide(10, 3), 4);
        assert_eq!(RoundingMode::RoundUp.divide(9, 3), 3);
        assert_eq!(RoundingMode::RoundDown.divide(10, 3), 3);
    }

    #[test]
    fn test_rounding_log2() {
        assert_eq!(RoundingMode::RoundDown.log2(1), 0);
        assert_eq!(RoundingMode::RoundDown.log2(8), 3);
        assert_eq!(RoundingMode::RoundDown.log2(9), 3);
        assert_eq!(RoundingMode::RoundUp.log2(8), 3);
        assert_eq!(RoundingMode::RoundUp.log2(9), 4);
    }

    #[test]
    fn test_tile_description() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&32u32.to_le_bytes());
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.push(0x11);

        let desc = TileDescription::from_le_bytes(&bytes).unwrap();
        assert_eq!(desc.x_size, 32);
        assert_eq!(desc.y_size, 16);
        assert_eq!(desc.level_mode, LevelMode::MipmapLevels);
        assert_eq!(desc.rounding_mode, RoundingMode::RoundUp);
    }

    #[test]
    fn test_tile_description_rejects_garbage() {
        let mut bytes = vec![0u8; 8];
        bytes.push(0);
        assert!(TileDescription::from_le_bytes(&bytes).is_err());

        let mut bytes = Vec::new();
        bytes.extend_from_slice(&8u32.to_le_bytes());
        bytes.extend_from_slice(&8u32.to_le_bytes());
        bytes.push(0x03);
        assert!(TileDescription::from_le_bytes(&bytes).is_err());

        assert!(TileDescription::from_le_bytes(&[0u8; 4]).is_err());
    }

    #[test]
    fn test_level_mode() {
        assert_eq!(LevelMode::from_u8(0), Some(LevelMode::OneLevel));
        assert_eq!(LevelMode::from_u8(2), Some(LevelMode::RipmapLevels));
        assert_eq!(LevelMode::from_u8(3), None);
    }
}
