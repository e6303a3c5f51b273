//! Copies for guest textures described by a single [GuestTexture].
//!
//! The texture's dimensions are used for both the tiled and the linear side,
//! so the linear buffers are always tightly packed.
use crate::{
    copy_block_linear_to_pitch, copy_pitch_to_block_linear, pitch, Dimensions, Format,
    SwizzleError, TileConfig,
};

/// A texture in guest memory with its format and tiling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestTexture<'a> {
    pub dimensions: Dimensions,
    pub format: &'a Format,
    pub tile_config: TileConfig,
}

impl<'a> GuestTexture<'a> {
    pub fn new(dimensions: Dimensions, format: &'a Format, tile_config: TileConfig) -> Self {
        Self {
            dimensions,
            format,
            tile_config,
        }
    }

    /// The size in bytes of the texture stored tightly packed.
    pub fn linear_size(&self) -> usize {
        let dimensions = self.dimensions.clamped();
        self.format.size(dimensions.width, dimensions.height) * dimensions.depth as usize
    }
}

/// Untiles the block linear `guest` texture in `block_linear` into `linear`.
/**
```rust
use blocklinear::{
    texture::{copy_block_linear_to_linear, GuestTexture},
    BlockDepth, BlockDim, BlockHeight, Dimensions, Format, TileConfig,
};

let format = Format::new(BlockDim::uncompressed(), 4);
let guest = GuestTexture::new(
    Dimensions::new(64, 64, 1),
    &format,
    TileConfig {
        block_height: BlockHeight::Eight,
        block_depth: BlockDepth::One,
        pitch: 0,
    },
);

let tiled = vec![0u8; 64 * 64 * 4];
let mut linear = vec![0u8; guest.linear_size()];
copy_block_linear_to_linear(&guest, &tiled, &mut linear).unwrap();
```
 */
pub fn copy_block_linear_to_linear(
    guest: &GuestTexture,
    block_linear: &[u8],
    linear: &mut [u8],
) -> Result<(), SwizzleError> {
    copy_block_linear_to_pitch(
        guest.dimensions,
        guest.format.block_dim,
        guest.format.bytes_per_block,
        0,
        guest.tile_config.block_height,
        guest.tile_config.block_depth,
        block_linear,
        linear,
    )
}

/// Tiles the tightly packed `linear` into the block linear `guest` texture in `block_linear`.
pub fn copy_linear_to_block_linear(
    guest: &GuestTexture,
    linear: &[u8],
    block_linear: &mut [u8],
) -> Result<(), SwizzleError> {
    copy_pitch_to_block_linear(
        guest.dimensions,
        guest.format.block_dim,
        guest.format.bytes_per_block,
        0,
        guest.tile_config.block_height,
        guest.tile_config.block_depth,
        linear,
        block_linear,
    )
}

/// Copies the pitch linear `guest` texture in `guest_input` into the tightly packed `linear_output`
/// using the pitch from the texture's [TileConfig].
pub fn copy_pitch_linear_to_linear(
    guest: &GuestTexture,
    guest_input: &[u8],
    linear_output: &mut [u8],
) -> Result<(), SwizzleError> {
    pitch::copy_pitch_linear_to_linear(
        guest.dimensions,
        guest.format.block_dim,
        guest.format.bytes_per_block,
        guest.tile_config.pitch,
        guest_input,
        linear_output,
    )
}

/// Copies the tightly packed `linear_input` into the pitch linear `guest` texture in `guest_output`.
pub fn copy_linear_to_pitch_linear(
    guest: &GuestTexture,
    linear_input: &[u8],
    guest_output: &mut [u8],
) -> Result<(), SwizzleError> {
    pitch::copy_linear_to_pitch_linear(
        guest.dimensions,
        guest.format.block_dim,
        guest.format.bytes_per_block,
        guest.tile_config.pitch,
        linear_input,
        guest_output,
    )
}
