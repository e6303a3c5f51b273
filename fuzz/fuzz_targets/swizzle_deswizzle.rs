#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};

extern crate rand;
use rand::{rngs::StdRng, Rng, SeedableRng};

use blocklinear::{BlockDepth, BlockDim, BlockHeight, Dimensions};

#[derive(Debug)]
struct Input {
    width: u32,
    height: u32,
    depth: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    bytes_per_pixel: u32,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Input {
            width: u.int_in_range(0..=256)?,
            height: u.int_in_range(0..=256)?,
            depth: u.int_in_range(0..=16)?,
            block_height: u.arbitrary()?,
            block_depth: u.arbitrary()?,
            bytes_per_pixel: u.int_in_range(1..=32)?,
        })
    }
}

fuzz_target!(|input: Input| {
    let dimensions = Dimensions::new(input.width, input.height, input.depth);
    let deswizzled_size = blocklinear::pitch_surface_size(
        dimensions,
        BlockDim::uncompressed(),
        input.bytes_per_pixel,
        0,
    );

    let seed = [13u8; 32];
    let mut rng: StdRng = SeedableRng::from_seed(seed);
    let deswizzled: Vec<_> = (0..deswizzled_size)
        .map(|_| rng.gen_range::<u8, _>(0..=255))
        .collect();

    let swizzled = blocklinear::swizzle_block_linear(
        dimensions,
        BlockDim::uncompressed(),
        input.bytes_per_pixel,
        input.block_height,
        input.block_depth,
        &deswizzled,
    )
    .unwrap();

    let new_deswizzled = blocklinear::deswizzle_block_linear(
        dimensions,
        BlockDim::uncompressed(),
        input.bytes_per_pixel,
        input.block_height,
        input.block_depth,
        &swizzled,
    )
    .unwrap();

    if deswizzled != new_deswizzled {
        panic!("Swizzle deswizzle is not 1:1");
    }
});
