#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};

use blocklinear::{BlockDepth, BlockDim, BlockHeight, Dimensions};

#[derive(Debug)]
struct Input {
    surface: Dimensions,
    subrect: Dimensions,
    origin_x: u32,
    origin_y: u32,
    block_height: BlockHeight,
    bytes_per_pixel: u32,
    pitch: u32,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Input {
            surface: Dimensions::new(u.int_in_range(0..=512)?, u.int_in_range(0..=512)?, 1),
            subrect: Dimensions::new(u.int_in_range(0..=512)?, u.int_in_range(0..=512)?, 1),
            origin_x: u.int_in_range(0..=512)?,
            origin_y: u.int_in_range(0..=512)?,
            block_height: u.arbitrary()?,
            bytes_per_pixel: u.int_in_range(0..=16)?,
            pitch: u.int_in_range(0..=8192)?,
        })
    }
}

fuzz_target!(|input: Input| {
    let block_linear_size = blocklinear::block_linear_layer_size(
        input.surface,
        BlockDim::uncompressed(),
        input.bytes_per_pixel,
        input.block_height,
        BlockDepth::One,
    );
    let pitch_size = blocklinear::pitch_surface_size(
        input.subrect,
        BlockDim::uncompressed(),
        input.bytes_per_pixel,
        input.pitch,
    );

    let pitch_linear: Vec<u8> = (0..pitch_size).map(|i| i as u8).collect();
    let mut block_linear = vec![0u8; block_linear_size];

    // Out of bounds regions and invalid pitches should return errors instead of panicking.
    let result = blocklinear::copy_pitch_to_block_linear_subrect(
        input.subrect,
        input.surface,
        BlockDim::uncompressed(),
        input.bytes_per_pixel,
        input.pitch,
        input.block_height,
        BlockDepth::One,
        &pitch_linear,
        &mut block_linear,
        input.origin_x,
        input.origin_y,
    );

    if result.is_ok() {
        let mut new_pitch_linear = pitch_linear.clone();
        blocklinear::copy_block_linear_to_pitch_subrect(
            input.subrect,
            input.surface,
            BlockDim::uncompressed(),
            input.bytes_per_pixel,
            input.pitch,
            input.block_height,
            BlockDepth::One,
            &block_linear,
            &mut new_pitch_linear,
            input.origin_x,
            input.origin_y,
        )
        .unwrap();

        if pitch_linear != new_pitch_linear {
            panic!("Subrect copy is not 1:1");
        }
    }
});
