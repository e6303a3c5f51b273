// Array layers start on a block boundary of the first mip level.
use crate::{align_up, BlockDepth, BlockHeight, GOB_SIZE_IN_BYTES};

/// Aligns the size of a single array layer so the next layer starts on a block boundary.
pub(crate) fn align_layer_size(
    layer_size: usize,
    block_height_mip0: BlockHeight,
    block_depth_mip0: BlockDepth,
) -> usize {
    let alignment = GOB_SIZE_IN_BYTES * block_height_mip0.gobs() * block_depth_mip0.gobs();
    align_up(layer_size, alignment)
}
