//! # blocklinear
//! blocklinear implements the block linear memory layout used for textures on the Tegra X1.
//!
//! # Getting Started
//! The following example untiles a 2D R8G8B8A8 surface into a tightly packed buffer.
/*!
```rust no_run
use blocklinear::{
    block_linear_layer_size, copy_block_linear_to_pitch, pitch_surface_size, BlockDepth,
    BlockDim, BlockHeight, Dimensions,
};
# fn main() -> Result<(), blocklinear::SwizzleError> {
let dimensions = Dimensions::new(300, 200, 1);
let tiled = vec![0u8; block_linear_layer_size(
    dimensions,
    BlockDim::uncompressed(),
    4,
    BlockHeight::Sixteen,
    BlockDepth::One,
)];

let mut linear = vec![0u8; pitch_surface_size(dimensions, BlockDim::uncompressed(), 4, 0)];
copy_block_linear_to_pitch(
    dimensions,
    BlockDim::uncompressed(),
    4,
    0,
    BlockHeight::Sixteen,
    BlockDepth::One,
    &tiled,
    &mut linear,
)?;
# Ok(())
# }
```
*/
//! # Block Linear
//! Block linear arranges the bytes of a surface into GOBs ("group of bytes").
//! Each GOB is 64x8 bytes made of 16x2 byte sectors.
//! The 32 lines of 16 bytes in a GOB are stored in a fixed interleaved order.
//! GOBs stack vertically into blocks of `block_height` GOBs and into the depth axis
//! with `block_depth` GOBs. Blocks are always one GOB wide.
//! A row of blocks spanning the surface width is a ROB.
//!
//! The tiled surface size is padded to whole blocks, so tiled surfaces
//! may be larger than the corresponding pitch linear data.
//!
//! # Copies
//! [copy_block_linear_to_pitch] and [copy_pitch_to_block_linear] transcode an entire surface.
//! [copy_block_linear_to_pitch_subrect] and [copy_pitch_to_block_linear_subrect]
//! transcode a region of a larger tiled surface at any origin.
//! All copy functions check their buffers up front and never write outside the destination region.
//!
//! The [surface] module handles surfaces with multiple array layers and mipmaps.
//! The [dma] module selects the copy for a DMA engine transfer between guest surfaces.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use core::num::NonZeroU32;

mod arrays;
mod blockdepth;
mod blockheight;
pub mod dma;
mod gob;
mod layout;
mod pitch;
mod subrect;
pub mod surface;
mod swizzle;
pub mod texture;

// Avoid making this module public to prevent people importing it accidentally.
#[cfg(feature = "ffi")]
mod ffi;

pub use blockdepth::*;
pub use blockheight::*;
pub use gob::{sector_offset, SECTOR_OFFSETS};
pub use layout::*;
pub use pitch::*;
pub use subrect::*;
pub use swizzle::*;

pub(crate) const SECTOR_WIDTH_IN_BYTES: usize = 16;
pub(crate) const GOB_WIDTH_IN_BYTES: usize = 64;
pub(crate) const GOB_HEIGHT_IN_LINES: usize = 8;
pub(crate) const GOB_SIZE_IN_BYTES: usize = GOB_WIDTH_IN_BYTES * GOB_HEIGHT_IN_LINES;
// Each 16 byte line of a 16x2 sector is addressed separately.
pub(crate) const SECTORS_IN_GOB: usize = GOB_SIZE_IN_BYTES / SECTOR_WIDTH_IN_BYTES;

/// The width, height, and depth of a surface in pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// The dimensions of the given mip level.
    /// Each axis is halved per level and never goes below 1.
    /**
    ```rust
    use blocklinear::Dimensions;

    assert_eq!(Dimensions::new(150, 1, 1), Dimensions::new(300, 3, 2).mip(1));
    assert_eq!(Dimensions::new(1, 1, 1), Dimensions::new(300, 3, 2).mip(31));
    ```
    */
    pub const fn mip(&self, level: u32) -> Self {
        Self {
            width: mip_extent(self.width, level),
            height: mip_extent(self.height, level),
            depth: mip_extent(self.depth, level),
        }
    }

    // Geometry treats empty axes as a single pixel to keep sizes well defined.
    pub(crate) const fn clamped(&self) -> Self {
        self.mip(0)
    }
}

const fn mip_extent(value: u32, level: u32) -> u32 {
    let value = if level >= u32::BITS { 0 } else { value >> level };
    if value == 0 {
        1
    } else {
        value
    }
}

/// The dimensions of a compressed block. Compressed block sizes are usually 4x4 pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDim {
    /// The width of the block in pixels.
    pub width: NonZeroU32,
    /// The height of the block in pixels.
    pub height: NonZeroU32,
}

impl BlockDim {
    /// A 1x1 block for formats that do not use block compression like R8G8B8A8.
    pub const fn uncompressed() -> Self {
        BlockDim {
            width: NON_ZERO_ONE,
            height: NON_ZERO_ONE,
        }
    }

    /// A 4x4 compressed block. This includes any of the BCN formats like BC1, BC3, or BC7.
    pub const fn block_4x4() -> Self {
        BlockDim {
            width: NON_ZERO_FOUR,
            height: NON_ZERO_FOUR,
        }
    }
}

const NON_ZERO_ONE: NonZeroU32 = match NonZeroU32::new(1) {
    Some(n) => n,
    None => unreachable!(),
};

const NON_ZERO_FOUR: NonZeroU32 = match NonZeroU32::new(4) {
    Some(n) => n,
    None => unreachable!(),
};

/// A texture format described by its block dimensions and the bytes for each block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub block_dim: BlockDim,
    pub bytes_per_block: u32,
}

impl Format {
    pub const fn new(block_dim: BlockDim, bytes_per_block: u32) -> Self {
        Self {
            block_dim,
            bytes_per_block,
        }
    }

    /// The size in bytes of a `width` by `height` pixel region in this format.
    pub fn size(&self, width: u32, height: u32) -> usize {
        div_round_up(width as usize, self.block_dim.width.get() as usize)
            * div_round_up(height as usize, self.block_dim.height.get() as usize)
            * self.bytes_per_block as usize
    }
}

/// The tiling parameters of a guest surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileConfig {
    pub block_height: BlockHeight,
    pub block_depth: BlockDepth,
    /// The row stride in bytes for pitch linear surfaces or 0 for tightly packed rows.
    pub pitch: u32,
}

// Block height can only have certain values based on the Tegra TRM page 1189 table 79.

/// An enumeration of supported block heights in GOBs.
///
/// Texture file formats differ in how they encode the block height parameter.
/// Some formats may encode block height using log2, so a block height of 8 would be encoded as 3.
/// For formats that do not explicitly store block height, see [block_height_mip0].
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum BlockHeight {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
    Sixteen = 16,
    ThirtyTwo = 32,
}

impl BlockHeight {
    /// Attempts to construct a block height from `value`.
    /// Returns [None] if `value` is not a supported block height.
    /// # Examples
    /**
    ```rust
    use blocklinear::BlockHeight;

    assert_eq!(Some(BlockHeight::Eight), BlockHeight::new(8));
    assert_eq!(None, BlockHeight::new(5));
    ```
    */
    pub const fn new(value: u32) -> Option<Self> {
        match value {
            1 => Some(BlockHeight::One),
            2 => Some(BlockHeight::Two),
            4 => Some(BlockHeight::Four),
            8 => Some(BlockHeight::Eight),
            16 => Some(BlockHeight::Sixteen),
            32 => Some(BlockHeight::ThirtyTwo),
            _ => None,
        }
    }

    /// The block height in GOBs.
    pub const fn gobs(self) -> usize {
        self as usize
    }
}

/// An enumeration of supported block depths in GOBs.
/// A GOB is always a single slice deep.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum BlockDepth {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
    Sixteen = 16,
    ThirtyTwo = 32,
}

impl BlockDepth {
    /// Attempts to construct a block depth from `value`.
    /// Returns [None] if `value` is not a supported block depth.
    pub const fn new(value: u32) -> Option<Self> {
        match value {
            1 => Some(BlockDepth::One),
            2 => Some(BlockDepth::Two),
            4 => Some(BlockDepth::Four),
            8 => Some(BlockDepth::Eight),
            16 => Some(BlockDepth::Sixteen),
            32 => Some(BlockDepth::ThirtyTwo),
            _ => None,
        }
    }

    /// The block depth in GOBs.
    pub const fn gobs(self) -> usize {
        self as usize
    }
}

/// The direction of a copy between block linear and pitch linear memory.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    /// Pitch linear to block linear.
    Swizzle,
    /// Block linear to pitch linear.
    Deswizzle,
}

/// Errors than can occur while swizzling or deswizzling.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SwizzleError {
    /// The source or destination does not contain enough bytes.
    NotEnoughData {
        expected_size: usize,
        actual_size: usize,
    },
    /// The surface dimensions would overflow when calculating the surface size.
    InvalidSurface {
        width: u32,
        height: u32,
        depth: u32,
        bytes_per_block: u32,
        mipmap_count: u32,
    },
    /// The row pitch is smaller than a row of pixels.
    InvalidPitch { pitch: u32, row_size: usize },
    /// The sub rectangle does not fit inside the block linear surface.
    SubrectOutOfBounds {
        origin_x: u32,
        origin_y: u32,
        subrect: Dimensions,
        surface: Dimensions,
    },
    /// Block linear surfaces with a block width other than 1 are not supported.
    UnsupportedBlockWidth { block_width: u32 },
    /// Copies between two block linear surfaces are not supported.
    BlockLinearToBlockLinear,
    /// The memory for a copy is split across multiple mappings.
    SplitSurface {
        source_mappings: usize,
        destination_mappings: usize,
    },
}

impl core::fmt::Display for SwizzleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SwizzleError::NotEnoughData {
                expected_size,
                actual_size,
            } => write!(
                f,
                "Not enough data. Expected {} bytes but found {} bytes.",
                expected_size, actual_size
            ),
            SwizzleError::InvalidSurface {
                width,
                height,
                depth,
                bytes_per_block,
                mipmap_count,
            } => write!(
                f,
                "Invalid surface dimensions {}x{}x{} with {} bytes per block and {} mipmaps.",
                width, height, depth, bytes_per_block, mipmap_count
            ),
            SwizzleError::InvalidPitch { pitch, row_size } => write!(
                f,
                "Pitch of {} bytes is smaller than the row size of {} bytes.",
                pitch, row_size
            ),
            SwizzleError::SubrectOutOfBounds {
                origin_x,
                origin_y,
                subrect,
                surface,
            } => write!(
                f,
                "Sub rectangle {}x{}x{} at ({}, {}) does not fit in a {}x{}x{} surface.",
                subrect.width,
                subrect.height,
                subrect.depth,
                origin_x,
                origin_y,
                surface.width,
                surface.height,
                surface.depth
            ),
            SwizzleError::UnsupportedBlockWidth { block_width } => write!(
                f,
                "Block linear surfaces with a block width of {} are unsupported.",
                block_width
            ),
            SwizzleError::BlockLinearToBlockLinear => {
                write!(f, "Block linear to block linear copies are unsupported.")
            }
            SwizzleError::SplitSurface {
                source_mappings,
                destination_mappings,
            } => write!(
                f,
                "Copies for split surfaces are unsupported. Found {} source and {} destination mappings.",
                source_mappings, destination_mappings
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SwizzleError {}

/// Calculates the division of `x` by `d` but rounds up rather than truncating.
///
/// # Examples
/// Use this function when calculating dimensions for block compressed formats like BC7.
/**
```rust
# use blocklinear::div_round_up;
assert_eq!(2, div_round_up(8, 4));
assert_eq!(3, div_round_up(10, 4));
```
 */
#[inline]
pub const fn div_round_up(x: usize, d: usize) -> usize {
    (x + d - 1) / d
}

#[inline]
pub(crate) const fn align_up(x: usize, n: usize) -> usize {
    div_round_up(x, n) * n
}

#[inline]
pub(crate) const fn align_down(x: usize, n: usize) -> usize {
    x / n * n
}
