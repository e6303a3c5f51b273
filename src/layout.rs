//! Size and layout calculations for block linear surfaces.
use alloc::vec::Vec;

use crate::{
    align_up, arrays::align_layer_size, blockheight::height_in_gobs, div_round_up,
    mip_block_depth, mip_block_height, BlockDepth, BlockDim, BlockHeight, Dimensions, Format,
    GOB_HEIGHT_IN_LINES, GOB_SIZE_IN_BYTES, GOB_WIDTH_IN_BYTES,
};

/// The layout of a single mip level in a block linear mip chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLevelLayout {
    /// The dimensions of the level in pixels.
    pub dimensions: Dimensions,
    /// The size in bytes of the level stored tightly packed in the source format.
    pub linear_size: usize,
    /// The size in bytes of the level stored tightly packed in the target format.
    pub target_linear_size: usize,
    /// The size in bytes of the tiled level without the other levels.
    pub block_linear_size: usize,
    /// The block height used for tiling this level.
    pub block_height: BlockHeight,
    /// The block depth used for tiling this level.
    pub block_depth: BlockDepth,
}

/// Calculates the size in bytes of a single tiled image layer.
///
/// The width is padded to whole GOBs, the height to whole ROBs,
/// and the depth to whole blocks.
/// # Examples
/// Uncompressed formats like R8G8B8A8 use a 1x1 block.
/**
```rust
use blocklinear::{block_linear_layer_size, BlockDepth, BlockDim, BlockHeight, Dimensions};

assert_eq!(
    262144,
    block_linear_layer_size(
        Dimensions::new(256, 256, 1),
        BlockDim::uncompressed(),
        4,
        BlockHeight::Sixteen,
        BlockDepth::One,
    )
);
```
 */
/// Compressed formats still use the dimensions in pixels.
/**
```rust
# use blocklinear::{block_linear_layer_size, BlockDepth, BlockDim, BlockHeight, Dimensions};
// BC7 has 4x4 pixel blocks that each take up 16 bytes.
assert_eq!(
    131072,
    block_linear_layer_size(
        Dimensions::new(256, 256, 1),
        BlockDim::block_4x4(),
        16,
        BlockHeight::Sixteen,
        BlockDepth::One,
    )
);
```
 */
pub fn block_linear_layer_size(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
) -> usize {
    let dimensions = dimensions.clamped();

    let rob_line_bytes = align_up(
        row_size(dimensions.width, block_dim, bytes_per_block),
        GOB_WIDTH_IN_BYTES,
    );
    let rob_height = GOB_HEIGHT_IN_LINES * block_height.gobs();
    let surface_height_robs = div_round_up(line_count(dimensions.height, block_dim), rob_height);
    let rob_depth = align_up(dimensions.depth as usize, block_depth.gobs());

    rob_line_bytes * rob_height * surface_height_robs * rob_depth
}

/// Calculates the size in bytes of `level_count` tiled mip levels.
///
/// The block height and depth apply to the first level and shrink for smaller levels.
/// The GOB counts of the first level are halved for each following level,
/// so levels with an odd number of GOBs round down.
/// Set `is_multi_layer` for array surfaces to pad the size so the next layer
/// starts on a block boundary.
/**
```rust
use blocklinear::{block_linear_chain_size, BlockDepth, BlockDim, BlockHeight, Dimensions};

// 128x128 BC7 with 8 mipmaps.
let size = block_linear_chain_size(
    Dimensions::new(128, 128, 1),
    BlockDim::block_4x4(),
    16,
    BlockHeight::Four,
    BlockDepth::One,
    8,
    false,
);
assert_eq!(24064, size);
```
 */
pub fn block_linear_chain_size(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    level_count: u32,
    is_multi_layer: bool,
) -> usize {
    let total_size = MipLevels::new(
        dimensions,
        block_dim,
        bytes_per_block,
        block_height,
        block_depth,
        level_count,
    )
    .map(|level| level.block_linear_size)
    .sum();

    if is_multi_layer {
        align_layer_size(total_size, block_height, block_depth)
    } else {
        total_size
    }
}

/// Calculates the layout of each of the `level_count` mip levels starting from the largest level.
///
/// The `target_format` describes a format the levels will be reinterpreted as
/// for format converting copies. The target linear size matches the linear size
/// if there is no target format.
/**
```rust
use blocklinear::{
    block_linear_mip_layout, BlockDepth, BlockDim, BlockHeight, Dimensions, Format,
};

let levels = block_linear_mip_layout(
    Dimensions::new(64, 64, 1),
    Format::new(BlockDim::uncompressed(), 4),
    None,
    BlockHeight::Eight,
    BlockDepth::One,
    7,
);
assert_eq!(7, levels.len());
assert_eq!(Dimensions::new(32, 32, 1), levels[1].dimensions);
assert_eq!(BlockHeight::Four, levels[1].block_height);
```
 */
pub fn block_linear_mip_layout(
    dimensions: Dimensions,
    format: Format,
    target_format: Option<Format>,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    level_count: u32,
) -> Vec<MipLevelLayout> {
    MipLevels::new(
        dimensions,
        format.block_dim,
        format.bytes_per_block,
        block_height,
        block_depth,
        level_count,
    )
    .map(|level| {
        let Dimensions {
            width,
            height,
            depth,
        } = level.dimensions;
        let linear_size = format.size(width, height) * depth as usize;
        let target_linear_size = target_format
            .map(|target| target.size(width, height) * depth as usize)
            .unwrap_or(linear_size);

        MipLevelLayout {
            dimensions: level.dimensions,
            linear_size,
            target_linear_size,
            block_linear_size: level.block_linear_size,
            block_height: level.block_height,
            block_depth: level.block_depth,
        }
    })
    .collect()
}

/// Calculates the minimum size in bytes for a pitch linear surface.
/// A `pitch` of 0 uses tightly packed rows.
///
/// The last row only needs the bytes for its pixels rather than the full pitch.
/**
```rust
use blocklinear::{pitch_surface_size, BlockDim, Dimensions};

assert_eq!(48 * 8, pitch_surface_size(Dimensions::new(48, 8, 1), BlockDim::uncompressed(), 1, 0));
assert_eq!(64 * 7 + 48, pitch_surface_size(Dimensions::new(48, 8, 1), BlockDim::uncompressed(), 1, 64));
```
 */
pub fn pitch_surface_size(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
) -> usize {
    let dimensions = dimensions.clamped();

    let row_size = row_size(dimensions.width, block_dim, bytes_per_block);
    let pitch = pitch_or_row_size(pitch, row_size);
    let lines = line_count(dimensions.height, block_dim) * dimensions.depth as usize;
    (lines - 1).saturating_mul(pitch).saturating_add(row_size)
}

/// The size in bytes of a row of blocks without padding.
pub(crate) fn row_size(width: u32, block_dim: BlockDim, bytes_per_block: u32) -> usize {
    div_round_up(width as usize, block_dim.width.get() as usize) * bytes_per_block as usize
}

/// The number of rows of blocks.
pub(crate) fn line_count(height: u32, block_dim: BlockDim) -> usize {
    div_round_up(height as usize, block_dim.height.get() as usize)
}

pub(crate) fn pitch_or_row_size(pitch: u32, row_size: usize) -> usize {
    if pitch == 0 {
        row_size
    } else {
        pitch as usize
    }
}

/// A single level yielded by [MipLevels].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MipLevel {
    pub dimensions: Dimensions,
    pub block_height: BlockHeight,
    pub block_depth: BlockDepth,
    pub block_linear_size: usize,
}

/// Iterates over the levels of a mip chain while shrinking the block height and depth.
///
/// The GOB counts of the first level are halved for each following level
/// instead of being recalculated from the level's dimensions.
pub(crate) struct MipLevels {
    dimensions: Dimensions,
    gobs_width: usize,
    gobs_height: usize,
    gobs_depth: usize,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    level: u32,
    level_count: u32,
}

impl MipLevels {
    pub fn new(
        dimensions: Dimensions,
        block_dim: BlockDim,
        bytes_per_block: u32,
        block_height: BlockHeight,
        block_depth: BlockDepth,
        level_count: u32,
    ) -> Self {
        let dimensions = dimensions.clamped();
        Self {
            dimensions,
            gobs_width: div_round_up(
                row_size(dimensions.width, block_dim, bytes_per_block),
                GOB_WIDTH_IN_BYTES,
            ),
            gobs_height: height_in_gobs(line_count(dimensions.height, block_dim)),
            gobs_depth: dimensions.depth as usize,
            block_height,
            block_depth,
            level: 0,
            level_count,
        }
    }
}

impl Iterator for MipLevels {
    type Item = MipLevel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.level >= self.level_count {
            return None;
        }

        if self.level > 0 {
            self.gobs_width = (self.gobs_width / 2).max(1);
            self.gobs_height = (self.gobs_height / 2).max(1);
            self.gobs_depth = (self.gobs_depth / 2).max(1);

            // Levels after the first may use smaller blocks than the base level.
            self.block_height = mip_block_height(self.gobs_height, self.block_height);
            self.block_depth = mip_block_depth(self.gobs_depth, self.block_depth);
        }

        let block_linear_size = self.gobs_width
            * align_up(self.gobs_height, self.block_height.gobs())
            * align_up(self.gobs_depth, self.block_depth.gobs())
            * GOB_SIZE_IN_BYTES;

        let dimensions = self.dimensions.mip(self.level);
        self.level += 1;

        Some(MipLevel {
            dimensions,
            block_height: self.block_height,
            block_depth: self.block_depth,
            block_linear_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_height_mip0;

    fn bc(bytes_per_block: u32) -> Format {
        Format::new(BlockDim::block_4x4(), bytes_per_block)
    }

    fn rgba() -> Format {
        Format::new(BlockDim::uncompressed(), 4)
    }

    // Expected sizes are taken from the nutexb footer of Smash Ultimate textures.
    fn nutexb_size(
        width: u32,
        height: u32,
        format: Format,
        mipmap_count: u32,
        layer_count: u32,
    ) -> usize {
        let block_height = block_height_mip0(div_round_up(
            height as usize,
            format.block_dim.height.get() as usize,
        ) as u32);
        block_linear_chain_size(
            Dimensions::new(width, height, 1),
            format.block_dim,
            format.bytes_per_block,
            block_height,
            BlockDepth::One,
            mipmap_count,
            layer_count > 1,
        ) * layer_count as usize
    }

    #[test]
    fn layer_size_single_gob() {
        assert_eq!(
            512,
            block_linear_layer_size(
                Dimensions::new(64, 8, 1),
                BlockDim::uncompressed(),
                1,
                BlockHeight::One,
                BlockDepth::One
            )
        );
    }

    #[test]
    fn layer_size_pads_to_rob() {
        // 48 bytes pad to one GOB width and 9 lines pad to a 16 line ROB.
        assert_eq!(
            1024,
            block_linear_layer_size(
                Dimensions::new(48, 9, 1),
                BlockDim::uncompressed(),
                1,
                BlockHeight::Two,
                BlockDepth::One
            )
        );
    }

    #[test]
    fn layer_sizes_block16() {
        assert_eq!(
            163840,
            block_linear_layer_size(
                Dimensions::new(320, 320, 1),
                BlockDim::block_4x4(),
                16,
                BlockHeight::Sixteen,
                BlockDepth::One
            )
        );
        assert_eq!(
            40960,
            block_linear_layer_size(
                Dimensions::new(160, 160, 1),
                BlockDim::block_4x4(),
                16,
                BlockHeight::Four,
                BlockDepth::One
            )
        );
        assert_eq!(
            1024,
            block_linear_layer_size(
                Dimensions::new(32, 32, 1),
                BlockDim::block_4x4(),
                16,
                BlockHeight::One,
                BlockDepth::One
            )
        );
    }

    #[test]
    fn layer_size_3d() {
        assert_eq!(
            16384,
            block_linear_layer_size(
                Dimensions::new(16, 16, 16),
                BlockDim::uncompressed(),
                4,
                BlockHeight::One,
                BlockDepth::Sixteen
            )
        );
        assert_eq!(
            368640,
            block_linear_layer_size(
                Dimensions::new(33, 33, 33),
                BlockDim::uncompressed(),
                4,
                BlockHeight::One,
                BlockDepth::Sixteen
            )
        );
    }

    #[test]
    fn layer_size_empty_dimensions() {
        // Empty axes are treated as a single pixel.
        assert_eq!(
            512 * 4,
            block_linear_layer_size(
                Dimensions::new(0, 0, 0),
                BlockDim::uncompressed(),
                4,
                BlockHeight::Four,
                BlockDepth::One
            )
        );
    }

    #[test]
    fn chain_size_single_level_matches_layer_size() {
        let cases = [
            (Dimensions::new(64, 8, 1), rgba(), BlockHeight::One, BlockDepth::One),
            (Dimensions::new(300, 200, 1), rgba(), BlockHeight::Sixteen, BlockDepth::One),
            (Dimensions::new(1028, 256, 1), bc(16), BlockHeight::Sixteen, BlockDepth::One),
            (Dimensions::new(33, 33, 33), rgba(), BlockHeight::Two, BlockDepth::Sixteen),
            (Dimensions::new(7, 3, 5), bc(8), BlockHeight::ThirtyTwo, BlockDepth::Four),
        ];
        for (dimensions, format, block_height, block_depth) in cases {
            assert_eq!(
                block_linear_layer_size(
                    dimensions,
                    format.block_dim,
                    format.bytes_per_block,
                    block_height,
                    block_depth
                ),
                block_linear_chain_size(
                    dimensions,
                    format.block_dim,
                    format.bytes_per_block,
                    block_height,
                    block_depth,
                    1,
                    false
                ),
                "{:?}",
                dimensions
            );
        }
    }

    #[test]
    fn chain_sizes_arrays_no_mipmaps() {
        assert_eq!(6144, nutexb_size(16, 16, rgba(), 1, 6));
        assert_eq!(3072, nutexb_size(16, 16, bc(8), 1, 6));
        assert_eq!(25165824, nutexb_size(2048, 2048, bc(16), 1, 6));
        assert_eq!(1572864, nutexb_size(256, 256, rgba(), 1, 6));
        assert_eq!(98304, nutexb_size(64, 64, rgba(), 1, 6));
    }

    #[test]
    fn chain_sizes_arrays_mipmaps() {
        assert_eq!(147456, nutexb_size(128, 128, bc(16), 8, 6));
        assert_eq!(540672, nutexb_size(256, 256, bc(16), 9, 6));
    }

    #[test]
    fn chain_size_halves_odd_gob_counts() {
        // 192 bytes is 3 GOBs wide, so the second level is 1 GOB wide rather than 2.
        assert_eq!(
            4608 + 512,
            block_linear_chain_size(
                Dimensions::new(192, 24, 1),
                BlockDim::uncompressed(),
                1,
                BlockHeight::One,
                BlockDepth::One,
                2,
                false
            )
        );
        assert_eq!(
            block_linear_layer_size(
                Dimensions::new(192, 24, 1),
                BlockDim::uncompressed(),
                1,
                BlockHeight::One,
                BlockDepth::One
            ) + block_linear_layer_size(
                Dimensions::new(64, 8, 1),
                BlockDim::uncompressed(),
                1,
                BlockHeight::One,
                BlockDepth::One
            ),
            block_linear_chain_size(
                Dimensions::new(192, 24, 1),
                BlockDim::uncompressed(),
                1,
                BlockHeight::One,
                BlockDepth::One,
                2,
                false
            )
        );
    }

    #[test]
    fn chain_sizes_mipmaps() {
        assert_eq!(12800, nutexb_size(100, 100, bc(8), 7, 1));
        assert_eq!(2048, nutexb_size(4, 24, rgba(), 1, 1));
    }

    #[test]
    fn chain_size_zero_levels() {
        assert_eq!(
            0,
            block_linear_chain_size(
                Dimensions::new(64, 64, 1),
                BlockDim::uncompressed(),
                4,
                BlockHeight::Eight,
                BlockDepth::One,
                0,
                false
            )
        );
    }

    #[test]
    fn mip_layout_shape() {
        let dimensions = Dimensions::new(300, 77, 9);
        let levels = block_linear_mip_layout(
            dimensions,
            rgba(),
            None,
            BlockHeight::Sixteen,
            BlockDepth::Eight,
            12,
        );
        assert_eq!(12, levels.len());
        assert_eq!(dimensions, levels[0].dimensions);
        for pair in levels.windows(2) {
            assert_eq!(pair[0].dimensions.mip(1), pair[1].dimensions);
            assert!(pair[1].block_height <= pair[0].block_height);
            assert!(pair[1].block_depth <= pair[0].block_depth);
        }
        assert_eq!(Dimensions::new(1, 1, 1), levels[11].dimensions);
    }

    #[test]
    fn mip_layout_sizes_sum_to_chain_size() {
        let dimensions = Dimensions::new(288, 288, 1);
        let levels = block_linear_mip_layout(
            dimensions,
            bc(16),
            None,
            BlockHeight::Eight,
            BlockDepth::One,
            9,
        );
        let total: usize = levels.iter().map(|l| l.block_linear_size).sum();
        assert_eq!(173568, total);
        assert_eq!(
            total,
            block_linear_chain_size(
                dimensions,
                BlockDim::block_4x4(),
                16,
                BlockHeight::Eight,
                BlockDepth::One,
                9,
                false
            )
        );
    }

    #[test]
    fn mip_layout_block_heights_288_bc7() {
        let levels = block_linear_mip_layout(
            Dimensions::new(288, 288, 1),
            bc(16),
            None,
            BlockHeight::Eight,
            BlockDepth::One,
            5,
        );
        let block_heights: Vec<_> = levels.iter().map(|l| l.block_height).collect();
        assert_eq!(
            vec![
                BlockHeight::Eight,
                BlockHeight::Four,
                BlockHeight::Two,
                BlockHeight::One,
                BlockHeight::One
            ],
            block_heights
        );
        // The first level is 18x9 GOBs and the second level is 9x4 GOBs.
        assert_eq!(147456, levels[0].block_linear_size);
        assert_eq!(18432, levels[1].block_linear_size);
    }

    #[test]
    fn mip_layout_target_format() {
        // Reinterpret BC1 blocks as R32G32 pixels with the same block size in bytes.
        let target = Format::new(BlockDim::uncompressed(), 8);
        let levels = block_linear_mip_layout(
            Dimensions::new(64, 64, 1),
            bc(8),
            Some(target),
            BlockHeight::Two,
            BlockDepth::One,
            3,
        );
        assert_eq!(64 / 4 * 64 / 4 * 8, levels[0].linear_size);
        assert_eq!(64 * 64 * 8, levels[0].target_linear_size);
        assert_eq!(32 * 32 * 8, levels[1].target_linear_size);
        assert_eq!(8 * 8 * 8, levels[1].linear_size);
    }

    #[test]
    fn mip_layout_without_target_format() {
        let levels = block_linear_mip_layout(
            Dimensions::new(17, 5, 3),
            rgba(),
            None,
            BlockHeight::One,
            BlockDepth::Four,
            2,
        );
        assert_eq!(17 * 5 * 3 * 4, levels[0].linear_size);
        assert_eq!(levels[0].linear_size, levels[0].target_linear_size);
        assert_eq!(8 * 2 * 1 * 4, levels[1].linear_size);
        assert_eq!(BlockDepth::One, levels[1].block_depth);
    }

    #[test]
    fn pitch_surface_sizes() {
        assert_eq!(
            256 * 256 * 4,
            pitch_surface_size(Dimensions::new(256, 256, 1), BlockDim::uncompressed(), 4, 0)
        );
        assert_eq!(
            16 * 16 * 16 * 4,
            pitch_surface_size(Dimensions::new(16, 16, 16), BlockDim::uncompressed(), 4, 0)
        );
        assert_eq!(
            2048 * 63 + 1024,
            pitch_surface_size(Dimensions::new(256, 256, 1), BlockDim::block_4x4(), 16, 2048)
        );
    }
}
