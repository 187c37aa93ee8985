//! Chunk enumeration per file topology.
//!
//! The number of entries in an offset table, and what each entry points at,
//! depend on the shape of the part: scanline parts have one chunk per row,
//! tiled parts one chunk per tile per resolution level, and deep or
//! multi-part files declare their chunk count in the header.

use crate::error::{ExrError, Result};
use crate::header::Header;
use crate::types::{LevelMode, RoundingMode, TileDescription};
use crate::version::Topology;

/// Tiles of one resolution level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLevel {
    /// Level index along x and y. Mip-map levels use the same index on both.
    pub level: (u32, u32),
    /// Level size in pixels
    pub size: (u32, u32),
    /// Number of tiles along x and y
    pub tiles: (u32, u32),
}

impl TileLevel {
    pub fn tile_count(&self) -> u64 {
        self.tiles.0 as u64 * self.tiles.1 as u64
    }
}

/// How offset table entries map to chunks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkAddressing {
    /// Entry `i` holds scanline `first_y + i`
    Scanlines { first_y: i32, rows: u64 },
    /// Entries run level by level, then row-major over the tiles of a level
    Tiles {
        description: TileDescription,
        levels: Vec<TileLevel>,
    },
    /// Chunk identity is carried by each chunk's own header
    Declared { count: u64 },
}

impl ChunkAddressing {
    /// Number of offset table entries
    pub fn chunk_count(&self) -> u64 {
        match self {
            ChunkAddressing::Scanlines { rows, .. } => *rows,
            ChunkAddressing::Tiles { levels, .. } => levels.iter().map(TileLevel::tile_count).sum(),
            ChunkAddressing::Declared { count } => *count,
        }
    }
}

/// Chunk enumeration strategy for one topology
pub trait ChunkLayout: Send + Sync {
    /// Describe the chunks of the part with this header
    fn addressing(&self, header: &Header) -> Result<ChunkAddressing>;

    /// Number of offset table entries for the part with this header
    fn chunk_count(&self, header: &Header) -> Result<u64> {
        Ok(self.addressing(header)?.chunk_count())
    }
}

/// One chunk per scanline of the data window.
///
/// Scanline compression schemes that pack several rows into one chunk are
/// not taken into account here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineLayout;

impl ChunkLayout for ScanlineLayout {
    fn addressing(&self, header: &Header) -> Result<ChunkAddressing> {
        let window = header.data_window()?;
        Ok(ChunkAddressing::Scanlines {
            first_y: window.min.y,
            rows: window.height() as u64,
        })
    }
}

/// Tiles over every resolution level of the data window
#[derive(Debug, Clone, Copy, Default)]
pub struct TiledLayout;

impl ChunkLayout for TiledLayout {
    fn addressing(&self, header: &Header) -> Result<ChunkAddressing> {
        let window = header.data_window()?;
        let description = header.tiles()?;

        let to_u32 = |len: i64, axis: &str| {
            u32::try_from(len).map_err(|_| {
                ExrError::invalid_attribute(
                    crate::attribute::name::DATA_WINDOW,
                    format!("{} of {} pixels is too large for a tiled image", axis, len),
                )
            })
        };
        let width = to_u32(window.width(), "width")?;
        let height = to_u32(window.height(), "height")?;

        Ok(ChunkAddressing::Tiles {
            description,
            levels: tile_levels(&description, width, height),
        })
    }
}

/// Chunk count taken from the `chunkCount` attribute
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclaredLayout;

impl ChunkLayout for DeclaredLayout {
    fn addressing(&self, header: &Header) -> Result<ChunkAddressing> {
        Ok(ChunkAddressing::Declared {
            count: header.chunk_count()? as u64,
        })
    }
}

/// Strategy used for parts of a file with this topology
pub fn layout_for(topology: Topology) -> &'static dyn ChunkLayout {
    match topology {
        Topology::ScanlineSinglePart => &ScanlineLayout,
        Topology::TiledSinglePart => &TiledLayout,
        Topology::DeepSinglePart | Topology::MultiPart | Topology::MultiPartDeep => {
            &DeclaredLayout
        }
    }
}

fn level_count(round: RoundingMode, full_size: u32) -> u32 {
    round.log2(full_size) + 1
}

fn level_size(round: RoundingMode, full_size: u32, level: u32) -> u32 {
    // Shifting by 32 or more would overflow; such levels are one pixel wide.
    if level >= 32 {
        return 1;
    }
    round.divide(full_size, 1 << level).max(1)
}

fn tiles_at(description: &TileDescription, level: (u32, u32), width: u32, height: u32) -> TileLevel {
    let round = description.rounding_mode;
    let size = (
        level_size(round, width, level.0),
        level_size(round, height, level.1),
    );
    TileLevel {
        level,
        size,
        tiles: (
            size.0.div_ceil(description.x_size),
            size.1.div_ceil(description.y_size),
        ),
    }
}

/// Enumerate resolution levels in file order
pub fn tile_levels(description: &TileDescription, width: u32, height: u32) -> Vec<TileLevel> {
    let round = description.rounding_mode;
    match description.level_mode {
        LevelMode::OneLevel => vec![tiles_at(description, (0, 0), width, height)],
        LevelMode::MipmapLevels => (0..level_count(round, width.max(height)))
            .map(|level| tiles_at(description, (level, level), width, height))
            .collect(),
        LevelMode::RipmapLevels => {
            let x_levels = level_count(round, width);
            let y_levels = level_count(round, height);
            (0..y_levels)
                .flat_map(|ly| (0..x_levels).map(move |lx| (lx, ly)))
                .map(|level| tiles_at(description, level, width, height))
                .collect()
        }
    }
}
