//! Functions for working with surfaces stored in a combined buffer for all array layers and mipmaps.
//!
//! It's common for texture surfaces to be represented
//! as a single allocated region of memory that contains all array layers and mipmaps.
//! This also applies to the tiled surfaces used for most textures on the Tegra X1.
//!
//! Use [deswizzle_surface] for untiling surfaces into a single `Vec<u8>`.
//! Use [swizzle_surface] for tiling a surface from a combined buffer like the result of [deswizzle_surface].
//!
//! # Examples
//! Array layers and mipmaps are ordered by layer and then mipmap.
//! A surface with `L` layers and `M` mipmaps would have the following layout.
/*!
```no_compile
Layer 0 Mip 0
Layer 0 Mip 1
...
Layer 0 Mip M-1
Layer 1 Mip 0
Layer 1 Mip 1
...
Layer L-1 Mip M-1
```
*/
//! The convention is for the untiled or linear layout to be tightly packed.
//! Tiled surfaces add additional padding and alignment between layers and mipmaps.
use alloc::{vec, vec::Vec};

use tracing::trace;

use crate::{
    arrays::align_layer_size, block_depth_mip0, block_linear_layer_size,
    blockheight::height_in_gobs, copy_block_linear_to_pitch, copy_pitch_to_block_linear,
    div_round_up, layout::line_count, mip_block_depth, mip_block_height, swizzle::check_length,
    BlockDepth, BlockDim, BlockHeight, Dimensions, Direction, Format, SwizzleError,
};

/// Tiles all the array layers and mipmaps in `source` using the block linear algorithm
/// to a combined vector with appropriate mipmap and layer alignment.
///
/// The `width`, `height`, and `depth` are in pixels with the pixels per block defined by `block_dim`.
/// Use a `block_height_mip0` of [None] to infer the block height from the specified dimensions.
/// 3D surfaces always use a block height of 1 and infer the block depth.
///
/// Returns [SwizzleError::NotEnoughData] if `source` does not have
/// at least as many bytes as the result of [deswizzled_surface_size].
///
/// # Examples
/// Compressed formats should still use pixel dimensions and set the appropriate block dimensions.
/**
```rust no_run
use blocklinear::{surface::swizzle_surface, BlockDim};
# let deswizzled_surface = vec![0u8; 10];

// 16x16 BC7 cube map with 5 mipmaps.
let surface = swizzle_surface(
    16,
    16,
    1,
    &deswizzled_surface,
    BlockDim::block_4x4(),
    None,
    16,
    5,
    6,
);
```
 */
/// Uncompressed formats use a 1x1 pixel block.
/**
```rust no_run
use blocklinear::{surface::swizzle_surface, BlockDim};
# let deswizzled_surface = vec![0u8; 10];

// 16x16x16 R8G8B8A8 3D texture with no mipmaps.
let surface = swizzle_surface(
    16,
    16,
    16,
    &deswizzled_surface,
    BlockDim::uncompressed(),
    None,
    4,
    1,
    1,
);
```
 */
pub fn swizzle_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> Result<Vec<u8>, SwizzleError> {
    transcode_surface(
        width,
        height,
        depth,
        source,
        block_dim,
        block_height_mip0,
        bytes_per_block,
        mipmap_count,
        layer_count,
        Direction::Swizzle,
    )
}

/// Untiles all the array layers and mipmaps in `source` using the block linear algorithm
/// to a new vector without any padding between layers or mipmaps.
///
/// The `width`, `height`, and `depth` are in pixels with the pixels per block defined by `block_dim`.
/// Use a `block_height_mip0` of [None] to infer the block height from the specified dimensions.
///
/// Returns [SwizzleError::NotEnoughData] if `source` does not have
/// at least as many bytes as the result of [swizzled_surface_size].
/**
```rust no_run
use blocklinear::{surface::deswizzle_surface, BlockDim};
# let swizzled_surface = vec![0u8; 10];

// 128x128 R8G8B8A8 2D texture with no mipmaps.
let surface = deswizzle_surface(
    128,
    128,
    1,
    &swizzled_surface,
    BlockDim::uncompressed(),
    None,
    4,
    1,
    1,
);
```
 */
pub fn deswizzle_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> Result<Vec<u8>, SwizzleError> {
    transcode_surface(
        width,
        height,
        depth,
        source,
        block_dim,
        block_height_mip0,
        bytes_per_block,
        mipmap_count,
        layer_count,
        Direction::Deswizzle,
    )
}

fn transcode_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: &[u8],
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
    direction: Direction,
) -> Result<Vec<u8>, SwizzleError> {
    // Check for empty surfaces first to more reliably handle overflow.
    if width == 0
        || height == 0
        || depth == 0
        || bytes_per_block == 0
        || mipmap_count == 0
        || layer_count == 0
    {
        return Ok(Vec::new());
    }

    validate_surface(width, height, depth, bytes_per_block, mipmap_count)?;

    let layout = SurfaceLayout::new(
        Dimensions::new(width, height, depth),
        block_dim,
        block_height_mip0,
        bytes_per_block,
        mipmap_count,
        layer_count,
    );
    let (source_size, destination_size) = layout.sizes(direction);

    // Validate the source length before attempting to allocate.
    // This reduces potential out of memory panics.
    check_length(source.len(), source_size)?;

    // The calculated size is accurate, so the result is never reallocated.
    let mut result = vec![0u8; destination_size];
    layout.transcode(source, &mut result, direction)?;
    Ok(result)
}

/// Tiles or untiles all layers and mipmaps from `source` into the preallocated `destination`.
pub(crate) fn transcode_surface_inner(
    dimensions: Dimensions,
    source: &[u8],
    destination: &mut [u8],
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
    direction: Direction,
) -> Result<(), SwizzleError> {
    validate_surface(
        dimensions.width,
        dimensions.height,
        dimensions.depth,
        bytes_per_block,
        mipmap_count,
    )?;

    let layout = SurfaceLayout::new(
        dimensions,
        block_dim,
        block_height_mip0,
        bytes_per_block,
        mipmap_count,
        layer_count,
    );
    let (source_size, destination_size) = layout.sizes(direction);
    check_length(source.len(), source_size)?;
    check_length(destination.len(), destination_size)?;

    layout.transcode(source, destination, direction)
}

fn validate_surface(
    width: u32,
    height: u32,
    depth: u32,
    bytes_per_block: u32,
    mipmap_count: u32,
) -> Result<(), SwizzleError> {
    // Check dimensions to prevent overflow.
    if width
        .checked_mul(height)
        .and_then(|u| u.checked_mul(depth))
        .and_then(|u| u.checked_mul(bytes_per_block))
        .is_none()
        || width.checked_mul(bytes_per_block).is_none()
        || depth.checked_add(depth / 2).is_none()
        || mipmap_count > u32::BITS
    {
        Err(SwizzleError::InvalidSurface {
            width,
            height,
            depth,
            bytes_per_block,
            mipmap_count,
        })
    } else {
        Ok(())
    }
}

/// Calculates the size in bytes for the tiled data for the given surface.
/// Compare with [deswizzled_surface_size].
///
/// Dimensions should be in pixels.
/// Use a `block_height_mip0` of [None] to infer the block height from the specified dimensions.
/**
```rust
use blocklinear::{surface::swizzled_surface_size, BlockDim};

// 128x128 BC7 cube map with 8 mipmaps.
let size = swizzled_surface_size(128, 128, 1, BlockDim::block_4x4(), None, 16, 8, 6);
assert_eq!(147456, size);
```
 */
pub fn swizzled_surface_size(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> usize {
    SurfaceLayout::new(
        Dimensions::new(width, height, depth),
        block_dim,
        block_height_mip0,
        bytes_per_block,
        mipmap_count,
        layer_count,
    )
    .swizzled_size()
}

/// Calculates the size in bytes for the untiled or linear data for the given surface.
/// Compare with [swizzled_surface_size].
///
/// Dimensions should be in pixels.
/**
```rust
use blocklinear::{surface::deswizzled_surface_size, BlockDim};

// 128x128 BC7 cube map with 8 mipmaps.
let size = deswizzled_surface_size(128, 128, 1, BlockDim::block_4x4(), 16, 8, 6);
assert_eq!(131232, size);
```
 */
pub fn deswizzled_surface_size(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> usize {
    // The block height does not affect the linear size.
    SurfaceLayout::new(
        Dimensions::new(width, height, depth),
        block_dim,
        Some(BlockHeight::One),
        bytes_per_block,
        mipmap_count,
        layer_count,
    )
    .deswizzled_size()
}

/// A single mipmap of a surface.
struct SurfaceLevel {
    dimensions: Dimensions,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    swizzled_size: usize,
    deswizzled_size: usize,
}

/// The offsets and sizes of every mipmap in a single array layer.
struct SurfaceLayout {
    format: Format,
    levels: Vec<SurfaceLevel>,
    layer_count: usize,
    /// The aligned size of a single tiled layer.
    swizzled_layer_size: usize,
    deswizzled_layer_size: usize,
}

impl SurfaceLayout {
    fn new(
        dimensions: Dimensions,
        block_dim: BlockDim,
        block_height_mip0: Option<BlockHeight>,
        bytes_per_block: u32,
        mipmap_count: u32,
        layer_count: u32,
    ) -> Self {
        let (block_height_mip0, block_depth_mip0) =
            surface_block_size(dimensions, block_dim, block_height_mip0);
        let format = Format::new(block_dim, bytes_per_block);

        // Each mipmap is tiled using its own dimensions,
        // so the GOB counts are rounded up for every level.
        let mut block_height = block_height_mip0;
        let mut block_depth = block_depth_mip0;
        let levels: Vec<_> = (0..mipmap_count)
            .map(|mip| {
                let dimensions = dimensions.mip(mip);
                if mip > 0 {
                    block_height = mip_block_height(
                        height_in_gobs(line_count(dimensions.height, block_dim)),
                        block_height,
                    );
                    block_depth = mip_block_depth(dimensions.depth as usize, block_depth);
                }

                SurfaceLevel {
                    dimensions,
                    block_height,
                    block_depth,
                    swizzled_size: block_linear_layer_size(
                        dimensions,
                        block_dim,
                        bytes_per_block,
                        block_height,
                        block_depth,
                    ),
                    deswizzled_size: format.size(dimensions.width, dimensions.height)
                        * dimensions.depth as usize,
                }
            })
            .collect();

        let swizzled_size: usize = levels.iter().map(|level| level.swizzled_size).sum();
        let swizzled_layer_size = if layer_count > 1 {
            align_layer_size(swizzled_size, block_height_mip0, block_depth_mip0)
        } else {
            swizzled_size
        };
        let deswizzled_layer_size = levels.iter().map(|level| level.deswizzled_size).sum();

        Self {
            format,
            levels,
            layer_count: layer_count as usize,
            swizzled_layer_size,
            deswizzled_layer_size,
        }
    }

    fn swizzled_size(&self) -> usize {
        self.swizzled_layer_size * self.layer_count
    }

    fn deswizzled_size(&self) -> usize {
        self.deswizzled_layer_size * self.layer_count
    }

    // The expected (source, destination) sizes for the copy direction.
    fn sizes(&self, direction: Direction) -> (usize, usize) {
        match direction {
            Direction::Swizzle => (self.deswizzled_size(), self.swizzled_size()),
            Direction::Deswizzle => (self.swizzled_size(), self.deswizzled_size()),
        }
    }

    fn transcode(
        &self,
        source: &[u8],
        destination: &mut [u8],
        direction: Direction,
    ) -> Result<(), SwizzleError> {
        for layer in 0..self.layer_count {
            let mut swizzled_offset = layer * self.swizzled_layer_size;
            let mut deswizzled_offset = layer * self.deswizzled_layer_size;

            for (mip, level) in self.levels.iter().enumerate() {
                trace!(
                    layer,
                    mip,
                    width = level.dimensions.width,
                    height = level.dimensions.height,
                    depth = level.dimensions.depth,
                    block_height = level.block_height.gobs(),
                    block_depth = level.block_depth.gobs(),
                    "transcode mipmap"
                );

                let swizzled = swizzled_offset..swizzled_offset + level.swizzled_size;
                let deswizzled = deswizzled_offset..deswizzled_offset + level.deswizzled_size;

                match direction {
                    Direction::Swizzle => copy_pitch_to_block_linear(
                        level.dimensions,
                        self.format.block_dim,
                        self.format.bytes_per_block,
                        0,
                        level.block_height,
                        level.block_depth,
                        &source[deswizzled],
                        &mut destination[swizzled],
                    )?,
                    Direction::Deswizzle => copy_block_linear_to_pitch(
                        level.dimensions,
                        self.format.block_dim,
                        self.format.bytes_per_block,
                        0,
                        level.block_height,
                        level.block_depth,
                        &source[swizzled],
                        &mut destination[deswizzled],
                    )?,
                }

                swizzled_offset += level.swizzled_size;
                deswizzled_offset += level.deswizzled_size;
            }
        }

        Ok(())
    }
}

// 3D surfaces use a block height of 1 and tile along the depth instead.
fn surface_block_size(
    dimensions: Dimensions,
    block_dim: BlockDim,
    block_height_mip0: Option<BlockHeight>,
) -> (BlockHeight, BlockDepth) {
    if dimensions.depth <= 1 {
        let block_height = block_height_mip0.unwrap_or_else(|| {
            crate::block_height_mip0(div_round_up(
                dimensions.height as usize,
                block_dim.height.get() as usize,
            ) as u32)
        });
        (block_height, BlockDepth::One)
    } else {
        (BlockHeight::One, block_depth_mip0(dimensions.depth))
    }
}
