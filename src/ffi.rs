//! Documentation for the C API.
//!
//! For easier integration, none of the FFI methods allocate memory.
//! When tiling or untiling, make sure to allocate
//! the appropriate amount of memory for the destination array
//! by calling functions like [swizzled_surface_size] or [pitch_surface_size].
//!
//! Copies return `false` without modifying the destination if the parameters are invalid
//! or the arrays are too small.
//! For block height parameters, always use the result of [block_height_mip0]
//! or [mip_block_height] unless the format explicitly specifies a block height.
use core::slice;

use crate::{BlockDepth, BlockDim, BlockHeight, Dimensions, Direction};

/// See [crate::surface::swizzle_surface].
///
/// # Safety
/// `source` and `source_len` should refer to an array with at least as many bytes as the result of [deswizzled_surface_size].
/// Similarly, `destination` and `destination_len` should refer to an array with at least as many bytes as the result of [swizzled_surface_size].
///
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn swizzle_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: *const u8,
    source_len: usize,
    destination: *mut u8,
    destination_len: usize,
    block_dim: BlockDim,
    block_height_mip0: u32,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> bool {
    transcode_surface(
        Dimensions::new(width, height, depth),
        slice::from_raw_parts(source, source_len),
        slice::from_raw_parts_mut(destination, destination_len),
        block_dim,
        block_height_mip0,
        bytes_per_block,
        mipmap_count,
        layer_count,
        Direction::Swizzle,
    )
}

/// See [crate::surface::deswizzle_surface].
///
/// # Safety
/// `source` and `source_len` should refer to an array with at least as many bytes as the result of [swizzled_surface_size].
/// Similarly, `destination` and `destination_len` should refer to an array with at least as many bytes as the result of [deswizzled_surface_size].
///
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn deswizzle_surface(
    width: u32,
    height: u32,
    depth: u32,
    source: *const u8,
    source_len: usize,
    destination: *mut u8,
    destination_len: usize,
    block_dim: BlockDim,
    block_height_mip0: u32,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> bool {
    transcode_surface(
        Dimensions::new(width, height, depth),
        slice::from_raw_parts(source, source_len),
        slice::from_raw_parts_mut(destination, destination_len),
        block_dim,
        block_height_mip0,
        bytes_per_block,
        mipmap_count,
        layer_count,
        Direction::Deswizzle,
    )
}

fn transcode_surface(
    dimensions: Dimensions,
    source: &[u8],
    destination: &mut [u8],
    block_dim: BlockDim,
    block_height_mip0: u32,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
    direction: Direction,
) -> bool {
    match BlockHeight::new(block_height_mip0) {
        Some(block_height_mip0) => crate::surface::transcode_surface_inner(
            dimensions,
            source,
            destination,
            block_dim,
            Some(block_height_mip0),
            bytes_per_block,
            mipmap_count,
            layer_count,
            direction,
        )
        .is_ok(),
        None => false,
    }
}

/// See [crate::surface::swizzled_surface_size].
///
/// Returns 0 if `block_height_mip0` is not one of the supported values in [BlockHeight].
///
/// # Safety
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn swizzled_surface_size(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    block_height_mip0: u32,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> usize {
    BlockHeight::new(block_height_mip0)
        .map(|block_height_mip0| {
            crate::surface::swizzled_surface_size(
                width,
                height,
                depth,
                block_dim,
                Some(block_height_mip0),
                bytes_per_block,
                mipmap_count,
                layer_count,
            )
        })
        .unwrap_or(0)
}

/// See [crate::surface::deswizzled_surface_size].
///
/// # Safety
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn deswizzled_surface_size(
    width: u32,
    height: u32,
    depth: u32,
    block_dim: BlockDim,
    bytes_per_block: u32,
    mipmap_count: u32,
    layer_count: u32,
) -> usize {
    crate::surface::deswizzled_surface_size(
        width,
        height,
        depth,
        block_dim,
        bytes_per_block,
        mipmap_count,
        layer_count,
    )
}

/// See [crate::copy_block_linear_to_pitch].
///
/// # Safety
/// `block_linear` and `block_linear_len` should refer to an array with at least as many bytes as the result of [block_linear_layer_size].
/// Similarly, `pitch_linear` and `pitch_linear_len` should refer to an array with at least as many bytes as the result of [pitch_surface_size].
///
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn copy_block_linear_to_pitch(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    block_height: u32,
    block_depth: u32,
    block_linear: *const u8,
    block_linear_len: usize,
    pitch_linear: *mut u8,
    pitch_linear_len: usize,
) -> bool {
    match (BlockHeight::new(block_height), BlockDepth::new(block_depth)) {
        (Some(block_height), Some(block_depth)) => crate::copy_block_linear_to_pitch(
            dimensions,
            block_dim,
            bytes_per_block,
            pitch,
            block_height,
            block_depth,
            slice::from_raw_parts(block_linear, block_linear_len),
            slice::from_raw_parts_mut(pitch_linear, pitch_linear_len),
        )
        .is_ok(),
        _ => false,
    }
}

/// See [crate::copy_pitch_to_block_linear].
///
/// # Safety
/// `pitch_linear` and `pitch_linear_len` should refer to an array with at least as many bytes as the result of [pitch_surface_size].
/// Similarly, `block_linear` and `block_linear_len` should refer to an array with at least as many bytes as the result of [block_linear_layer_size].
///
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn copy_pitch_to_block_linear(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    block_height: u32,
    block_depth: u32,
    pitch_linear: *const u8,
    pitch_linear_len: usize,
    block_linear: *mut u8,
    block_linear_len: usize,
) -> bool {
    match (BlockHeight::new(block_height), BlockDepth::new(block_depth)) {
        (Some(block_height), Some(block_depth)) => crate::copy_pitch_to_block_linear(
            dimensions,
            block_dim,
            bytes_per_block,
            pitch,
            block_height,
            block_depth,
            slice::from_raw_parts(pitch_linear, pitch_linear_len),
            slice::from_raw_parts_mut(block_linear, block_linear_len),
        )
        .is_ok(),
        _ => false,
    }
}

/// See [crate::copy_block_linear_to_pitch_subrect].
///
/// # Safety
/// `block_linear` and `block_linear_len` should refer to an array with at least as many bytes as the result of [block_linear_layer_size]
/// for `block_linear_dimensions`.
/// Similarly, `pitch_linear` and `pitch_linear_len` should refer to an array with at least as many bytes as the result of [pitch_surface_size]
/// for `pitch_dimensions`.
///
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn copy_block_linear_to_pitch_subrect(
    pitch_dimensions: Dimensions,
    block_linear_dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    block_height: u32,
    block_depth: u32,
    block_linear: *const u8,
    block_linear_len: usize,
    pitch_linear: *mut u8,
    pitch_linear_len: usize,
    origin_x: u32,
    origin_y: u32,
) -> bool {
    match (BlockHeight::new(block_height), BlockDepth::new(block_depth)) {
        (Some(block_height), Some(block_depth)) => crate::copy_block_linear_to_pitch_subrect(
            pitch_dimensions,
            block_linear_dimensions,
            block_dim,
            bytes_per_block,
            pitch,
            block_height,
            block_depth,
            slice::from_raw_parts(block_linear, block_linear_len),
            slice::from_raw_parts_mut(pitch_linear, pitch_linear_len),
            origin_x,
            origin_y,
        )
        .is_ok(),
        _ => false,
    }
}

/// See [crate::copy_pitch_to_block_linear_subrect].
///
/// # Safety
/// `pitch_linear` and `pitch_linear_len` should refer to an array with at least as many bytes as the result of [pitch_surface_size]
/// for `pitch_dimensions`.
/// Similarly, `block_linear` and `block_linear_len` should refer to an array with at least as many bytes as the result of [block_linear_layer_size]
/// for `block_linear_dimensions`.
///
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn copy_pitch_to_block_linear_subrect(
    pitch_dimensions: Dimensions,
    block_linear_dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    block_height: u32,
    block_depth: u32,
    pitch_linear: *const u8,
    pitch_linear_len: usize,
    block_linear: *mut u8,
    block_linear_len: usize,
    origin_x: u32,
    origin_y: u32,
) -> bool {
    match (BlockHeight::new(block_height), BlockDepth::new(block_depth)) {
        (Some(block_height), Some(block_depth)) => crate::copy_pitch_to_block_linear_subrect(
            pitch_dimensions,
            block_linear_dimensions,
            block_dim,
            bytes_per_block,
            pitch,
            block_height,
            block_depth,
            slice::from_raw_parts(pitch_linear, pitch_linear_len),
            slice::from_raw_parts_mut(block_linear, block_linear_len),
            origin_x,
            origin_y,
        )
        .is_ok(),
        _ => false,
    }
}

/// See [crate::block_linear_layer_size].
///
/// Returns 0 if `block_height` or `block_depth` is not a supported value.
///
/// # Safety
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn block_linear_layer_size(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    block_height: u32,
    block_depth: u32,
) -> usize {
    match (BlockHeight::new(block_height), BlockDepth::new(block_depth)) {
        (Some(block_height), Some(block_depth)) => crate::block_linear_layer_size(
            dimensions,
            block_dim,
            bytes_per_block,
            block_height,
            block_depth,
        ),
        _ => 0,
    }
}

/// See [crate::pitch_surface_size].
///
/// # Safety
/// All the fields of `block_dim` must be non zero.
#[no_mangle]
pub unsafe extern "C" fn pitch_surface_size(
    dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
) -> usize {
    crate::pitch_surface_size(dimensions, block_dim, bytes_per_block, pitch)
}

/// See [crate::block_height_mip0].
#[no_mangle]
pub extern "C" fn block_height_mip0(height: u32) -> u32 {
    super::block_height_mip0(height) as u32
}

/// See [crate::mip_block_height].
///
/// Returns 0 if `block_height_mip0` is not one of the supported values in [BlockHeight].
#[no_mangle]
pub extern "C" fn mip_block_height(height_in_gobs: usize, block_height_mip0: u32) -> u32 {
    BlockHeight::new(block_height_mip0)
        .map(|block_height| super::mip_block_height(height_in_gobs, block_height) as u32)
        .unwrap_or(0)
}

/// See [crate::block_depth_mip0].
#[no_mangle]
pub extern "C" fn block_depth_mip0(depth: u32) -> u32 {
    super::block_depth_mip0(depth) as u32
}
