//! Copies performed by the DMA copy engine between surfaces in guest memory.
//!
//! A copy describes its source and destination as pitch linear or block linear surfaces.
//! The guest memory for each side is passed as the runs of host memory
//! the guest address range translates to.
//! Only ranges that translate to a single run are supported.
//!
//! DMA surfaces always use byte dimensions with a 1x1 block of 1 byte.
use tracing::{debug, warn};

use crate::{
    block_linear_layer_size, copy_block_linear_to_pitch, copy_block_linear_to_pitch_subrect,
    copy_pitch_to_block_linear, copy_pitch_to_block_linear_subrect,
    swizzle::{check_length, pitch_size},
    BlockDepth, BlockDim, BlockHeight, Dimensions, SwizzleError,
};

/// The memory layout of one side of a copy.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum MemoryLayout {
    BlockLinear,
    Pitch,
}

/// The parameters of a block linear surface used by a copy.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct DmaSurface {
    /// The surface dimensions with the width in bytes.
    pub dimensions: Dimensions,
    /// The block width in GOBs. Only a width of 1 is supported.
    pub block_width: u32,
    pub block_height: BlockHeight,
    pub block_depth: BlockDepth,
    /// The array layer to copy.
    pub layer: u32,
    /// The start of the copied region in bytes.
    pub origin_x: u32,
    /// The start of the copied region in lines.
    pub origin_y: u32,
}

/// The register state of a DMA copy.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct DmaCopy {
    /// Copies `line_count` lines if `true` or a single run of `line_length` bytes if `false`.
    pub multi_line: bool,
    pub source_layout: MemoryLayout,
    pub destination_layout: MemoryLayout,
    /// The length of each line in bytes.
    pub line_length: u32,
    pub line_count: u32,
    /// The distance between lines in the source if the source is pitch linear.
    pub pitch_in: u32,
    /// The distance between lines in the destination if the destination is pitch linear.
    pub pitch_out: u32,
    /// The source surface if the source is block linear.
    pub source_surface: DmaSurface,
    /// The destination surface if the destination is block linear.
    pub destination_surface: DmaSurface,
}

/// Performs the `copy` from the memory runs in `source` to the memory runs in `destination`.
///
/// Each side must translate to exactly one run of memory.
/// Block linear memory starts at the first layer of the surface.
/// Block linear to block linear copies are not supported.
/**
```rust
use blocklinear::{
    dma::{launch_dma, DmaCopy, DmaSurface, MemoryLayout},
    BlockDepth, BlockHeight, Dimensions,
};

let surface = DmaSurface {
    dimensions: Dimensions::new(256, 64, 1),
    block_width: 1,
    block_height: BlockHeight::Eight,
    block_depth: BlockDepth::One,
    layer: 0,
    origin_x: 0,
    origin_y: 0,
};
let copy = DmaCopy {
    multi_line: true,
    source_layout: MemoryLayout::Pitch,
    destination_layout: MemoryLayout::BlockLinear,
    line_length: 256,
    line_count: 64,
    pitch_in: 256,
    pitch_out: 0,
    source_surface: surface,
    destination_surface: surface,
};

let source = vec![0u8; 256 * 64];
let mut destination = vec![0u8; 256 * 64];
launch_dma(&copy, &[&source], &mut [&mut destination]).unwrap();
```
 */
pub fn launch_dma(
    copy: &DmaCopy,
    source: &[&[u8]],
    destination: &mut [&mut [u8]],
) -> Result<(), SwizzleError> {
    if source.len() != 1 || destination.len() != 1 {
        warn!(
            source_mappings = source.len(),
            destination_mappings = destination.len(),
            "DMA copies for split surfaces are unsupported"
        );
        return Err(SwizzleError::SplitSurface {
            source_mappings: source.len(),
            destination_mappings: destination.len(),
        });
    }
    let source = source[0];
    let destination = &mut *destination[0];

    if !copy.multi_line {
        debug!(length = copy.line_length, "1D copy");
        let length = copy.line_length as usize;
        check_length(source.len(), length)?;
        check_length(destination.len(), length)?;
        destination[..length].copy_from_slice(&source[..length]);
        return Ok(());
    }

    match (copy.source_layout, copy.destination_layout) {
        (MemoryLayout::Pitch, MemoryLayout::Pitch) => copy_pitch_to_pitch(copy, source, destination),
        (MemoryLayout::BlockLinear, MemoryLayout::Pitch) => {
            copy_block_linear_to_pitch_dma(copy, source, destination)
        }
        (MemoryLayout::Pitch, MemoryLayout::BlockLinear) => {
            copy_pitch_to_block_linear_dma(copy, source, destination)
        }
        (MemoryLayout::BlockLinear, MemoryLayout::BlockLinear) => {
            warn!("Block linear to block linear DMA copies are unsupported");
            Err(SwizzleError::BlockLinearToBlockLinear)
        }
    }
}

fn copy_pitch_to_pitch(
    copy: &DmaCopy,
    source: &[u8],
    destination: &mut [u8],
) -> Result<(), SwizzleError> {
    let line_length = copy.line_length as usize;
    let line_count = copy.line_count as usize;
    let pitch_in = copy.pitch_in as usize;
    let pitch_out = copy.pitch_out as usize;
    debug!(line_length, line_count, pitch_in, pitch_out, "pitch to pitch copy");

    if line_count == 0 {
        return Ok(());
    }

    check_length(source.len(), pitch_size(line_length, line_count, pitch_in))?;
    check_length(
        destination.len(),
        pitch_size(line_length, line_count, pitch_out),
    )?;

    if pitch_in == line_length && pitch_out == line_length {
        // Both sides are tightly packed.
        let size = line_length * line_count;
        destination[..size].copy_from_slice(&source[..size]);
    } else {
        for line in 0..line_count {
            let input = line * pitch_in;
            let output = line * pitch_out;
            destination[output..output + line_length]
                .copy_from_slice(&source[input..input + line_length]);
        }
    }
    Ok(())
}

fn copy_block_linear_to_pitch_dma(
    copy: &DmaCopy,
    source: &[u8],
    destination: &mut [u8],
) -> Result<(), SwizzleError> {
    if copy.line_length == 0 || copy.line_count == 0 {
        return Ok(());
    }

    let surface = &copy.source_surface;
    let block_linear = layer_memory(surface, source)?;
    let pitch_dimensions = Dimensions::new(
        copy.line_length,
        copy.line_count,
        surface.dimensions.depth,
    );
    debug!(
        width = surface.dimensions.width,
        height = surface.dimensions.height,
        layer = surface.layer,
        pitch_width = pitch_dimensions.width,
        pitch_height = pitch_dimensions.height,
        "block linear to pitch copy"
    );

    if is_full_surface(surface, pitch_dimensions) {
        copy_block_linear_to_pitch(
            pitch_dimensions,
            BlockDim::uncompressed(),
            1,
            copy.pitch_out,
            surface.block_height,
            surface.block_depth,
            block_linear,
            destination,
        )
    } else {
        copy_block_linear_to_pitch_subrect(
            pitch_dimensions,
            surface.dimensions,
            BlockDim::uncompressed(),
            1,
            copy.pitch_out,
            surface.block_height,
            surface.block_depth,
            block_linear,
            destination,
            surface.origin_x,
            surface.origin_y,
        )
    }
}

fn copy_pitch_to_block_linear_dma(
    copy: &DmaCopy,
    source: &[u8],
    destination: &mut [u8],
) -> Result<(), SwizzleError> {
    if copy.line_length == 0 || copy.line_count == 0 {
        return Ok(());
    }

    let surface = &copy.destination_surface;
    let block_linear = layer_memory_mut(surface, destination)?;
    let pitch_dimensions = Dimensions::new(
        copy.line_length,
        copy.line_count,
        surface.dimensions.depth,
    );
    debug!(
        pitch_width = pitch_dimensions.width,
        pitch_height = pitch_dimensions.height,
        width = surface.dimensions.width,
        height = surface.dimensions.height,
        layer = surface.layer,
        "pitch to block linear copy"
    );

    if is_full_surface(surface, pitch_dimensions) {
        copy_pitch_to_block_linear(
            pitch_dimensions,
            BlockDim::uncompressed(),
            1,
            copy.pitch_in,
            surface.block_height,
            surface.block_depth,
            source,
            block_linear,
        )
    } else {
        copy_pitch_to_block_linear_subrect(
            pitch_dimensions,
            surface.dimensions,
            BlockDim::uncompressed(),
            1,
            copy.pitch_in,
            surface.block_height,
            surface.block_depth,
            source,
            block_linear,
            surface.origin_x,
            surface.origin_y,
        )
    }
}

fn is_full_surface(surface: &DmaSurface, pitch_dimensions: Dimensions) -> bool {
    surface.origin_x == 0
        && surface.origin_y == 0
        && surface.dimensions.width == pitch_dimensions.width
        && surface.dimensions.height == pitch_dimensions.height
}

fn check_block_width(surface: &DmaSurface) -> Result<(), SwizzleError> {
    if surface.block_width != 1 {
        warn!(
            block_width = surface.block_width,
            "Block linear surfaces with a non-one block width are unsupported"
        );
        Err(SwizzleError::UnsupportedBlockWidth {
            block_width: surface.block_width,
        })
    } else {
        Ok(())
    }
}

// Layers are stored one after another at the size of a single mip level.
fn layer_offset(surface: &DmaSurface) -> Result<usize, SwizzleError> {
    check_block_width(surface)?;
    let layer_size = block_linear_layer_size(
        surface.dimensions,
        BlockDim::uncompressed(),
        1,
        surface.block_height,
        surface.block_depth,
    );
    layer_size
        .checked_mul(surface.layer as usize)
        .ok_or(SwizzleError::InvalidSurface {
            width: surface.dimensions.width,
            height: surface.dimensions.height,
            depth: surface.dimensions.depth,
            bytes_per_block: 1,
            mipmap_count: 1,
        })
}

fn layer_memory<'a>(surface: &DmaSurface, memory: &'a [u8]) -> Result<&'a [u8], SwizzleError> {
    let offset = layer_offset(surface)?;
    memory
        .get(offset..)
        .ok_or(SwizzleError::NotEnoughData {
            expected_size: offset,
            actual_size: memory.len(),
        })
}

fn layer_memory_mut<'a>(
    surface: &DmaSurface,
    memory: &'a mut [u8],
) -> Result<&'a mut [u8], SwizzleError> {
    let offset = layer_offset(surface)?;
    let actual_size = memory.len();
    memory
        .get_mut(offset..)
        .ok_or(SwizzleError::NotEnoughData {
            expected_size: offset,
            actual_size,
        })
}
