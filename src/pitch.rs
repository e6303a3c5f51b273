//! Copies between pitch linear surfaces and tightly packed buffers.
//!
//! These surfaces are not tiled, so each row is a single contiguous copy.
use crate::{
    layout::{line_count, row_size},
    swizzle::{check_length, pitch_size, resolve_pitch},
    BlockDim, Dimensions, SwizzleError,
};

/// Copies the rows of the surface in `pitch_linear` with rows `pitch` bytes apart
/// into the tightly packed `linear`.
///
/// A `pitch` of 0 uses tightly packed rows for both buffers.
/**
```rust
use blocklinear::{copy_pitch_linear_to_linear, BlockDim, Dimensions};

// Remove the 16 bytes of padding after each row.
let pitch_linear = vec![0u8; 80 * 3 + 64];
let mut linear = vec![0u8; 64 * 4];
copy_pitch_linear_to_linear(
    Dimensions::new(16, 4, 1),
    BlockDim::uncompressed(),
    4,
    80,
    &pitch_linear,
    &mut linear,
)
.unwrap();
```
 */
pub fn copy_pitch_linear_to_linear(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    pitch_linear: &[u8],
    linear: &mut [u8],
) -> Result<(), SwizzleError> {
    let rows = Rows::new(dimensions, block_dim, bytes_per_block, pitch)?;
    check_length(pitch_linear.len(), rows.pitch_size())?;
    check_length(linear.len(), rows.linear_size())?;

    for line in 0..rows.count {
        let source = line * rows.pitch;
        let destination = line * rows.row_size;
        linear[destination..destination + rows.row_size]
            .copy_from_slice(&pitch_linear[source..source + rows.row_size]);
    }
    Ok(())
}

/// Copies the rows of the tightly packed `linear` into `pitch_linear` with rows `pitch` bytes apart.
///
/// The bytes between the end of each row and the pitch are left unchanged.
pub fn copy_linear_to_pitch_linear(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    linear: &[u8],
    pitch_linear: &mut [u8],
) -> Result<(), SwizzleError> {
    let rows = Rows::new(dimensions, block_dim, bytes_per_block, pitch)?;
    check_length(linear.len(), rows.linear_size())?;
    check_length(pitch_linear.len(), rows.pitch_size())?;

    for line in 0..rows.count {
        let source = line * rows.row_size;
        let destination = line * rows.pitch;
        pitch_linear[destination..destination + rows.row_size]
            .copy_from_slice(&linear[source..source + rows.row_size]);
    }
    Ok(())
}

struct Rows {
    row_size: usize,
    pitch: usize,
    // Rows of all slices since slices are stored one after another.
    count: usize,
}

impl Rows {
    fn new(
        dimensions: Dimensions,
        block_dim: BlockDim,
        bytes_per_block: u32,
        pitch: u32,
    ) -> Result<Self, SwizzleError> {
        let dimensions = dimensions.clamped();
        let row_size = row_size(dimensions.width, block_dim, bytes_per_block);

        let count = line_count(dimensions.height, block_dim)
            .checked_mul(dimensions.depth as usize)
            .filter(|count| row_size > 0 && count.checked_mul(row_size).is_some())
            .ok_or(SwizzleError::InvalidSurface {
                width: dimensions.width,
                height: dimensions.height,
                depth: dimensions.depth,
                bytes_per_block,
                mipmap_count: 1,
            })?;

        Ok(Self {
            row_size,
            pitch: resolve_pitch(pitch, row_size)?,
            count,
        })
    }

    fn linear_size(&self) -> usize {
        self.row_size * self.count
    }

    fn pitch_size(&self) -> usize {
        pitch_size(self.row_size, self.count, self.pitch)
    }
}
