// Block depth code ported from C# implementations of driver code by gdkchan.
// The code can be found here: https://github.com/KillzXGaming/Switch-Toolbox/pull/419#issuecomment-959980096
// This comes from the Ryujinx emulator: https://github.com/Ryujinx/Ryujinx/blob/master/LICENSE.txt.
use crate::BlockDepth;

/// Calculates the block depth to use for the first mip level of a 3D surface
/// if no block depth is specified.
/**
```rust
use blocklinear::{block_depth_mip0, BlockDepth};

assert_eq!(BlockDepth::Sixteen, block_depth_mip0(16));
assert_eq!(BlockDepth::One, block_depth_mip0(1));
```
 */
pub fn block_depth_mip0(depth: u32) -> BlockDepth {
    let depth_and_half = depth as usize + (depth as usize / 2);
    if depth_and_half >= 16 {
        BlockDepth::Sixteen
    } else if depth_and_half >= 8 {
        BlockDepth::Eight
    } else if depth_and_half >= 4 {
        BlockDepth::Four
    } else if depth_and_half >= 2 {
        BlockDepth::Two
    } else {
        BlockDepth::One
    }
}

/// Calculates the block depth to use for a mip level that is `depth_in_gobs` slices deep.
/// GOBs are a single slice deep, so this is the depth of the mip level.
pub fn mip_block_depth(depth_in_gobs: usize, block_depth: BlockDepth) -> BlockDepth {
    if depth_in_gobs > block_depth.gobs() {
        block_depth
    } else {
        BlockDepth::new(depth_in_gobs.max(1).next_power_of_two() as u32).unwrap_or(block_depth)
    }
}
