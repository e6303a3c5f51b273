use crate::{div_round_up, BlockHeight, GOB_HEIGHT_IN_LINES};

// Block height inference ported from C# implementations of driver code by gdkchan.
// The code can be found here: https://github.com/KillzXGaming/Switch-Toolbox/pull/419#issuecomment-959980096
// This comes from the Ryujinx emulator: https://github.com/Ryujinx/Ryujinx/blob/master/LICENSE.txt.

/// Calculates the block height parameter to use for the first mip level if no block height is specified.
///
/// # Examples
/// Uncompressed formats like R8G8B8A8 can use the height in pixels.
/**
```rust
use blocklinear::{block_height_mip0, BlockHeight};

assert_eq!(BlockHeight::Sixteen, block_height_mip0(300));
```
 */
/// For compressed formats with multiple pixels in a block, divide the height by the block dimensions.
/**
```rust
// BC7 has 4x4 pixel blocks that each take up 16 bytes.
use blocklinear::{block_height_mip0, div_round_up, BlockHeight};

assert_eq!(BlockHeight::Eight, block_height_mip0(div_round_up(300, 4) as u32));
```
 */
pub fn block_height_mip0(height: u32) -> BlockHeight {
    let height_and_half = height as usize + (height as usize / 2);

    if height_and_half >= 128 {
        BlockHeight::Sixteen
    } else if height_and_half >= 64 {
        BlockHeight::Eight
    } else if height_and_half >= 32 {
        BlockHeight::Four
    } else if height_and_half >= 16 {
        BlockHeight::Two
    } else {
        BlockHeight::One
    }
}

/// Calculates the block height to use for a mip level that is `height_in_gobs` GOBs tall.
///
/// The block height shrinks to the smallest power of two covering the level
/// once the level is shorter than a single block and never grows.
/**
```rust
use blocklinear::{mip_block_height, BlockHeight};

assert_eq!(BlockHeight::Sixteen, mip_block_height(40, BlockHeight::Sixteen));
assert_eq!(BlockHeight::Eight, mip_block_height(5, BlockHeight::Sixteen));
assert_eq!(BlockHeight::One, mip_block_height(1, BlockHeight::Four));
```
 */
pub fn mip_block_height(height_in_gobs: usize, block_height: BlockHeight) -> BlockHeight {
    if height_in_gobs > block_height.gobs() {
        block_height
    } else {
        // The result is never larger than the original power of two block height.
        BlockHeight::new(height_in_gobs.max(1).next_power_of_two() as u32).unwrap_or(block_height)
    }
}

pub(crate) fn height_in_gobs(lines: usize) -> usize {
    div_round_up(lines, GOB_HEIGHT_IN_LINES)
}
