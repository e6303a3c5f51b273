//! Functions for swizzling and deswizzling entire surfaces.
use alloc::{vec, vec::Vec};
use core::cmp::min;

use crate::{
    div_round_up,
    gob::SECTOR_OFFSETS,
    layout::{line_count, pitch_or_row_size, row_size},
    BlockDepth, BlockDim, BlockHeight, Dimensions, Direction, SwizzleError, GOB_HEIGHT_IN_LINES,
    GOB_SIZE_IN_BYTES, GOB_WIDTH_IN_BYTES, SECTOR_WIDTH_IN_BYTES,
};

/// Untiles the block linear surface in `block_linear` into `pitch_linear`.
///
/// A `pitch` of 0 uses tightly packed rows.
/// Returns [SwizzleError::NotEnoughData] if `block_linear` is smaller than [crate::block_linear_layer_size]
/// or `pitch_linear` is smaller than [crate::pitch_surface_size].
/// Bytes in `pitch_linear` between the end of a row and the pitch are left unchanged.
/// # Examples
/**
```rust
use blocklinear::{
    block_linear_layer_size, copy_block_linear_to_pitch, pitch_surface_size, BlockDepth,
    BlockDim, BlockHeight, Dimensions,
};

let dimensions = Dimensions::new(128, 128, 1);
let tiled = vec![0u8; block_linear_layer_size(dimensions, BlockDim::block_4x4(), 16, BlockHeight::Four, BlockDepth::One)];
let mut linear = vec![0u8; pitch_surface_size(dimensions, BlockDim::block_4x4(), 16, 0)];
copy_block_linear_to_pitch(
    dimensions,
    BlockDim::block_4x4(),
    16,
    0,
    BlockHeight::Four,
    BlockDepth::One,
    &tiled,
    &mut linear,
)
.unwrap();
```
 */
pub fn copy_block_linear_to_pitch(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    block_linear: &[u8],
    pitch_linear: &mut [u8],
) -> Result<(), SwizzleError> {
    let surface = BlockLinearSurface::new(
        dimensions,
        block_dim,
        bytes_per_block,
        block_height,
        block_depth,
    )?;
    let pitch = surface.pitch(pitch)?;
    check_length(block_linear.len(), surface.size())?;
    check_length(pitch_linear.len(), surface.pitch_size(pitch))?;

    swizzle_inner(
        &surface,
        pitch,
        block_linear,
        pitch_linear,
        Direction::Deswizzle,
    );
    Ok(())
}

/// Tiles the pitch linear surface in `pitch_linear` into `block_linear`.
///
/// A `pitch` of 0 uses tightly packed rows.
/// Returns [SwizzleError::NotEnoughData] if `pitch_linear` is smaller than [crate::pitch_surface_size]
/// or `block_linear` is smaller than [crate::block_linear_layer_size].
/// Padding bytes in `block_linear` outside the surface are left unchanged.
pub fn copy_pitch_to_block_linear(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    pitch_linear: &[u8],
    block_linear: &mut [u8],
) -> Result<(), SwizzleError> {
    let surface = BlockLinearSurface::new(
        dimensions,
        block_dim,
        bytes_per_block,
        block_height,
        block_depth,
    )?;
    let pitch = surface.pitch(pitch)?;
    check_length(pitch_linear.len(), surface.pitch_size(pitch))?;
    check_length(block_linear.len(), surface.size())?;

    swizzle_inner(
        &surface,
        pitch,
        pitch_linear,
        block_linear,
        Direction::Swizzle,
    );
    Ok(())
}

/// Tiles the tightly packed bytes from `source` into a new block linear surface.
/// # Examples
/// Uncompressed formats like R8G8B8A8 use a 1x1 block.
/**
```rust
use blocklinear::{swizzle_block_linear, BlockDepth, BlockDim, BlockHeight, Dimensions};

let dimensions = Dimensions::new(512, 512, 1);
# let input = vec![0u8; 512 * 512 * 4];
let output = swizzle_block_linear(
    dimensions,
    BlockDim::uncompressed(),
    4,
    BlockHeight::Sixteen,
    BlockDepth::One,
    &input,
);
```
 */
/// Compressed formats still use the dimensions in pixels.
/**
```rust
use blocklinear::{swizzle_block_linear, BlockDepth, BlockDim, BlockHeight, Dimensions};

// BC7 has 4x4 pixel blocks that each take up 16 bytes.
let dimensions = Dimensions::new(512, 512, 1);
# let input = vec![0u8; 128 * 128 * 16];
let output = swizzle_block_linear(
    dimensions,
    BlockDim::block_4x4(),
    16,
    BlockHeight::Sixteen,
    BlockDepth::One,
    &input,
);
```
 */
pub fn swizzle_block_linear(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    source: &[u8],
) -> Result<Vec<u8>, SwizzleError> {
    let surface = BlockLinearSurface::new(
        dimensions,
        block_dim,
        bytes_per_block,
        block_height,
        block_depth,
    )?;
    let pitch = surface.row_size;

    // Validate the source length before attempting to allocate.
    check_length(source.len(), surface.pitch_size(pitch))?;
    let mut destination = vec![0u8; surface.size()];

    swizzle_inner(&surface, pitch, source, &mut destination, Direction::Swizzle);
    Ok(destination)
}

/// Untiles the block linear surface in `source` into a new tightly packed buffer.
/**
```rust
use blocklinear::{deswizzle_block_linear, BlockDepth, BlockDim, BlockHeight, Dimensions};

// 300x300 BC1 has 75x75 blocks of 8 bytes.
let dimensions = Dimensions::new(300, 300, 1);
# let input = vec![0u8; 640 * 80 * 8];
let output = deswizzle_block_linear(
    dimensions,
    BlockDim::block_4x4(),
    8,
    BlockHeight::Eight,
    BlockDepth::One,
    &input,
)
.unwrap();
assert_eq!(75 * 75 * 8, output.len());
```
 */
pub fn deswizzle_block_linear(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    source: &[u8],
) -> Result<Vec<u8>, SwizzleError> {
    let surface = BlockLinearSurface::new(
        dimensions,
        block_dim,
        bytes_per_block,
        block_height,
        block_depth,
    )?;
    let pitch = surface.row_size;

    check_length(source.len(), surface.size())?;
    let mut destination = vec![0u8; surface.pitch_size(pitch)];

    swizzle_inner(&surface, pitch, source, &mut destination, Direction::Deswizzle);
    Ok(destination)
}

pub(crate) fn check_length(actual_size: usize, expected_size: usize) -> Result<(), SwizzleError> {
    if actual_size < expected_size {
        Err(SwizzleError::NotEnoughData {
            expected_size,
            actual_size,
        })
    } else {
        Ok(())
    }
}

pub(crate) fn resolve_pitch(pitch: u32, row_size: usize) -> Result<usize, SwizzleError> {
    if pitch != 0 && (pitch as usize) < row_size {
        Err(SwizzleError::InvalidPitch { pitch, row_size })
    } else {
        Ok(pitch_or_row_size(pitch, row_size))
    }
}

// Saturate so very large pitches fail the length check instead of wrapping.
pub(crate) fn pitch_size(row_size: usize, line_count: usize, pitch: usize) -> usize {
    (line_count - 1)
        .saturating_mul(pitch)
        .saturating_add(row_size)
}

/// The block linear geometry of a single image layer in blocks and bytes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockLinearSurface {
    /// The width of a row in bytes without padding.
    pub row_size: usize,
    /// The width of the surface in GOBs including the padding GOB.
    pub gobs_width: usize,
    /// The height of the surface in rows of blocks.
    pub lines: usize,
    pub depth: usize,
    pub block_height: usize,
    pub block_depth: usize,
    /// The height of the surface in ROBs including the padding ROB.
    pub robs: usize,
}

impl BlockLinearSurface {
    pub fn new(
        dimensions: Dimensions,
        block_dim: BlockDim,
        bytes_per_block: u32,
        block_height: BlockHeight,
        block_depth: BlockDepth,
    ) -> Result<Self, SwizzleError> {
        let invalid_surface = SwizzleError::InvalidSurface {
            width: dimensions.width,
            height: dimensions.height,
            depth: dimensions.depth,
            bytes_per_block,
            mipmap_count: 1,
        };
        // Empty rows would leave nothing to address within a GOB.
        if bytes_per_block == 0 {
            return Err(invalid_surface);
        }

        let clamped = dimensions.clamped();

        let row_size = row_size(clamped.width, block_dim, bytes_per_block);
        let lines = line_count(clamped.height, block_dim);
        let depth = clamped.depth as usize;
        let block_height = block_height.gobs();
        let block_depth = block_depth.gobs();

        let surface = Self {
            row_size,
            gobs_width: div_round_up(row_size, GOB_WIDTH_IN_BYTES),
            lines,
            depth,
            block_height,
            block_depth,
            robs: div_round_up(lines, GOB_HEIGHT_IN_LINES * block_height),
        };

        // Check dimensions to prevent overflow.
        surface
            .checked_size()
            .and_then(|_| lines.checked_mul(depth))
            .and_then(|u| u.checked_mul(row_size))
            .map(|_| surface)
            .ok_or(invalid_surface)
    }

    fn checked_size(&self) -> Option<usize> {
        self.gobs_width
            .checked_mul(self.robs)?
            .checked_mul(div_round_up(self.depth, self.block_depth))?
            .checked_mul(self.block_size())
    }

    /// The resolved row pitch for `pitch` with 0 meaning tightly packed.
    pub fn pitch(&self, pitch: u32) -> Result<usize, SwizzleError> {
        resolve_pitch(pitch, self.row_size)
    }

    /// The size in bytes of the tiled surface.
    pub fn size(&self) -> usize {
        self.depth_group_size() * div_round_up(self.depth, self.block_depth)
    }

    /// The minimum size in bytes for the surface with rows `pitch` bytes apart.
    pub fn pitch_size(&self, pitch: usize) -> usize {
        pitch_size(self.row_size, self.lines * self.depth, pitch)
    }

    pub fn rob_height(&self) -> usize {
        GOB_HEIGHT_IN_LINES * self.block_height
    }

    pub fn block_size(&self) -> usize {
        GOB_SIZE_IN_BYTES * self.block_height * self.block_depth
    }

    fn rob_size(&self) -> usize {
        self.gobs_width * self.block_size()
    }

    // Each group of block_depth slices stores all of its ROBs before the next group.
    fn depth_group_size(&self) -> usize {
        self.rob_size() * self.robs
    }

    /// The offset of the block at `column` in the ROB `rob` for the slices starting at `slice`.
    pub fn block_address(&self, column: usize, rob: usize, slice: usize) -> usize {
        (slice / self.block_depth) * self.depth_group_size()
            + rob * self.rob_size()
            + column * self.block_size()
    }

    /// The offset of a GOB within its block.
    pub fn gob_address_in_block(&self, gob_y: usize, slice: usize) -> usize {
        (slice % self.block_depth) * self.block_height * GOB_SIZE_IN_BYTES
            + gob_y * GOB_SIZE_IN_BYTES
    }
}

/// The region of a GOB to copy in bytes and lines relative to the start of the GOB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GobRegion {
    pub x_start: usize,
    pub x_end: usize,
    pub y_start: usize,
    pub y_end: usize,
}

impl GobRegion {
    pub fn new(x_start: usize, x_end: usize, y_start: usize, y_end: usize) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.x_start == 0
            && self.x_end == GOB_WIDTH_IN_BYTES
            && self.y_start == 0
            && self.y_end == GOB_HEIGHT_IN_LINES
    }
}

// Traverse in the same order for both directions so tiling and untiling are exact inverses.
fn swizzle_inner(
    surface: &BlockLinearSurface,
    pitch: usize,
    source: &[u8],
    destination: &mut [u8],
    direction: Direction,
) {
    let slice_size = pitch * surface.lines;
    let rob_height = surface.rob_height();

    for slice_group in (0..surface.depth).step_by(surface.block_depth) {
        // The last block may extend past the surface depth.
        let slices = min(surface.block_depth, surface.depth - slice_group);

        for rob in 0..surface.robs {
            let rob_line = rob * rob_height;
            let rob_lines = min(rob_height, surface.lines - rob_line);
            // Skip the padding GOBs at the bottom of the last ROB.
            let rob_gobs = div_round_up(rob_lines, GOB_HEIGHT_IN_LINES);

            for column in 0..surface.gobs_width {
                let x = column * GOB_WIDTH_IN_BYTES;
                // Only copy the bytes before the end of the row for the last GOB.
                let width = min(GOB_WIDTH_IN_BYTES, surface.row_size - x);
                let block_address = surface.block_address(column, rob, slice_group);

                for z in 0..slices {
                    let slice = slice_group + z;
                    for gob_y in 0..rob_gobs {
                        let line = rob_line + gob_y * GOB_HEIGHT_IN_LINES;
                        let height = min(GOB_HEIGHT_IN_LINES, surface.lines - line);

                        copy_gob(
                            source,
                            destination,
                            block_address + surface.gob_address_in_block(gob_y, slice),
                            slice * slice_size + line * pitch + x,
                            pitch,
                            GobRegion::new(0, width, 0, height),
                            direction,
                        );
                    }
                }
            }
        }
    }
}

/// Copies the sectors of the GOB at `gob_address` that overlap `region`.
///
/// The `pitch_address` is the pitch linear offset of the region's top left corner.
#[inline(always)]
pub(crate) fn copy_gob(
    source: &[u8],
    destination: &mut [u8],
    gob_address: usize,
    pitch_address: usize,
    pitch: usize,
    region: GobRegion,
    direction: Direction,
) {
    if region.is_complete() {
        for (i, (x, y)) in SECTOR_OFFSETS.iter().enumerate() {
            copy_bytes(
                source,
                destination,
                gob_address + i * SECTOR_WIDTH_IN_BYTES,
                pitch_address + y * pitch + x,
                SECTOR_WIDTH_IN_BYTES,
                direction,
            );
        }
    } else {
        for (i, (x, y)) in SECTOR_OFFSETS.iter().enumerate() {
            let (x, y) = (*x, *y);
            if y < region.y_start || y >= region.y_end {
                continue;
            }

            // Clip the sector to the pixels inside the region.
            let start = x.max(region.x_start);
            let end = (x + SECTOR_WIDTH_IN_BYTES).min(region.x_end);
            if start >= end {
                continue;
            }

            copy_bytes(
                source,
                destination,
                gob_address + i * SECTOR_WIDTH_IN_BYTES + (start - x),
                pitch_address + (y - region.y_start) * pitch + (start - region.x_start),
                end - start,
                direction,
            );
        }
    }
}

#[inline(always)]
fn copy_bytes(
    source: &[u8],
    destination: &mut [u8],
    block_linear_address: usize,
    pitch_address: usize,
    length: usize,
    direction: Direction,
) {
    // Swap the addresses for swizzling vs deswizzling.
    let (source_address, destination_address) = match direction {
        Direction::Swizzle => (pitch_address, block_linear_address),
        Direction::Deswizzle => (block_linear_address, pitch_address),
    };
    destination[destination_address..destination_address + length]
        .copy_from_slice(&source[source_address..source_address + length]);
}
