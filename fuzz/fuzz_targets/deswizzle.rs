#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};

use blocklinear::{BlockDepth, BlockDim, BlockHeight, Dimensions};

#[derive(Debug)]
struct Input {
    width: u32,
    height: u32,
    depth: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    bytes_per_pixel: u32,
    pitch: u32,
    input_size: usize,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Input {
            width: u.int_in_range(0..=4096)?,
            height: u.int_in_range(0..=4096)?,
            depth: u.int_in_range(0..=16)?,
            block_height: u.arbitrary()?,
            block_depth: u.arbitrary()?,
            bytes_per_pixel: u.int_in_range(0..=32)?,
            pitch: u.arbitrary()?,
            input_size: u.int_in_range(0..=16777216)?,
        })
    }
}

fuzz_target!(|input: Input| {
    let swizzled = vec![0u8; input.input_size];
    let mut deswizzled = vec![0u8; input.input_size];

    // This should never panic even if the input size is incorrect.
    let _ = blocklinear::copy_block_linear_to_pitch(
        Dimensions::new(input.width, input.height, input.depth),
        BlockDim::uncompressed(),
        input.bytes_per_pixel,
        input.pitch,
        input.block_height,
        input.block_depth,
        &swizzled,
        &mut deswizzled,
    );
});
