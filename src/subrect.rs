//! Copies between a region of a block linear surface and a pitch linear buffer.
//!
//! The region can start at any pixel, so the GOBs along its edges
//! only copy the bytes and lines inside the region.
use core::cmp::min;

use crate::{
    layout::{line_count, row_size},
    swizzle::{check_length, copy_gob, pitch_size, resolve_pitch, BlockLinearSurface, GobRegion},
    BlockDepth, BlockDim, BlockHeight, Dimensions, Direction, SwizzleError, GOB_HEIGHT_IN_LINES,
    GOB_WIDTH_IN_BYTES,
};

/// Untiles a `pitch_dimensions` region at (`origin_x`, `origin_y`) of the block linear surface
/// with `block_linear_dimensions` into `pitch_linear`.
///
/// The origin is in pixels and the region always starts at the first slice.
/// A `pitch` of 0 uses the row size of the region.
/// Only formats with a block width of 1 are supported.
/// Bytes of either buffer outside the region are never read or written.
/**
```rust
use blocklinear::{
    block_linear_layer_size, copy_block_linear_to_pitch_subrect, BlockDepth, BlockDim,
    BlockHeight, Dimensions,
};

let surface = Dimensions::new(128, 64, 1);
let tiled = vec![0u8; block_linear_layer_size(surface, BlockDim::uncompressed(), 4, BlockHeight::Eight, BlockDepth::One)];

// Untile the 40x20 pixels starting at (20, 10).
let region = Dimensions::new(40, 20, 1);
let mut linear = vec![0u8; 40 * 20 * 4];
copy_block_linear_to_pitch_subrect(
    region,
    surface,
    BlockDim::uncompressed(),
    4,
    0,
    BlockHeight::Eight,
    BlockDepth::One,
    &tiled,
    &mut linear,
    20,
    10,
)
.unwrap();
```
 */
pub fn copy_block_linear_to_pitch_subrect(
    pitch_dimensions: Dimensions,
    block_linear_dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    block_linear: &[u8],
    pitch_linear: &mut [u8],
    origin_x: u32,
    origin_y: u32,
) -> Result<(), SwizzleError> {
    let subrect = Subrect::new(
        pitch_dimensions,
        block_linear_dimensions,
        block_dim,
        bytes_per_block,
        pitch,
        block_height,
        block_depth,
        origin_x,
        origin_y,
    )?;
    check_length(block_linear.len(), subrect.surface.size())?;
    check_length(pitch_linear.len(), subrect.pitch_size())?;

    subrect_inner(&subrect, block_linear, pitch_linear, Direction::Deswizzle);
    Ok(())
}

/// Tiles the pitch linear bytes in `pitch_linear` into a `pitch_dimensions` region
/// at (`origin_x`, `origin_y`) of the block linear surface with `block_linear_dimensions`.
///
/// See [copy_block_linear_to_pitch_subrect] for the supported parameters.
pub fn copy_pitch_to_block_linear_subrect(
    pitch_dimensions: Dimensions,
    block_linear_dimensions: Dimensions,
    block_dim: BlockDim,
    bytes_per_block: u32,
    pitch: u32,
    block_height: BlockHeight,
    block_depth: BlockDepth,
    pitch_linear: &[u8],
    block_linear: &mut [u8],
    origin_x: u32,
    origin_y: u32,
) -> Result<(), SwizzleError> {
    let subrect = Subrect::new(
        pitch_dimensions,
        block_linear_dimensions,
        block_dim,
        bytes_per_block,
        pitch,
        block_height,
        block_depth,
        origin_x,
        origin_y,
    )?;
    check_length(pitch_linear.len(), subrect.pitch_size())?;
    check_length(block_linear.len(), subrect.surface.size())?;

    subrect_inner(&subrect, pitch_linear, block_linear, Direction::Swizzle);
    Ok(())
}

/// How a span lines up with the units of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// The span starts and ends on unit boundaries.
    Aligned,
    /// Only the first unit is partially covered.
    StartMisaligned,
    /// Only the last unit is partially covered.
    EndMisaligned,
    /// The first and last units are both partially covered.
    BothMisaligned,
    /// The span is inside a single partially covered unit.
    SingleUnit,
}

/// A range `[start, end)` along one axis measured against fixed size units.
///
/// The X axis uses bytes with 64 byte GOB columns.
/// The Y axis uses lines with ROBs as the unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AxisSpan {
    pub start: usize,
    pub end: usize,
    pub unit: usize,
    pub alignment: Alignment,
}

impl AxisSpan {
    pub fn new(start: usize, end: usize, unit: usize) -> Self {
        let start_misaligned = start % unit != 0;
        let end_misaligned = end % unit != 0;
        let single_unit = start / unit == (end - 1) / unit;

        let alignment = match (start_misaligned, end_misaligned) {
            (false, false) => Alignment::Aligned,
            _ if single_unit => Alignment::SingleUnit,
            (true, false) => Alignment::StartMisaligned,
            (false, true) => Alignment::EndMisaligned,
            (true, true) => Alignment::BothMisaligned,
        };

        Self {
            start,
            end,
            unit,
            alignment,
        }
    }

    fn first_unit(&self) -> usize {
        self.start / self.unit
    }

    fn last_unit(&self) -> usize {
        (self.end - 1) / self.unit
    }

    /// Yields the index of each covered unit with the covered range relative to the unit start.
    pub fn units(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (self.first_unit()..=self.last_unit()).map(move |index| {
            let (start_clipped, end_clipped) = match self.alignment {
                Alignment::Aligned => (false, false),
                Alignment::StartMisaligned => (true, false),
                Alignment::EndMisaligned => (false, true),
                Alignment::BothMisaligned | Alignment::SingleUnit => (true, true),
            };

            let unit_start = index * self.unit;
            let lo = if start_clipped && index == self.first_unit() {
                self.start - unit_start
            } else {
                0
            };
            let hi = if end_clipped && index == self.last_unit() {
                self.end - unit_start
            } else {
                self.unit
            };
            (index, lo, hi)
        })
    }
}

/// A validated region of a block linear surface.
struct Subrect {
    surface: BlockLinearSurface,
    x: AxisSpan,
    y: AxisSpan,
    depth: usize,
    row_size: usize,
    lines: usize,
    pitch: usize,
}

impl Subrect {
    fn new(
        pitch_dimensions: Dimensions,
        block_linear_dimensions: Dimensions,
        block_dim: BlockDim,
        bytes_per_block: u32,
        pitch: u32,
        block_height: BlockHeight,
        block_depth: BlockDepth,
        origin_x: u32,
        origin_y: u32,
    ) -> Result<Self, SwizzleError> {
        if block_dim.width.get() != 1 {
            return Err(SwizzleError::UnsupportedBlockWidth {
                block_width: block_dim.width.get(),
            });
        }

        let region = pitch_dimensions.clamped();
        let bounds = block_linear_dimensions.clamped();
        let fits = |origin: u32, size: u32, max: u32| origin as u64 + size as u64 <= max as u64;
        if !fits(origin_x, region.width, bounds.width)
            || !fits(origin_y, region.height, bounds.height)
            || region.depth > bounds.depth
        {
            return Err(SwizzleError::SubrectOutOfBounds {
                origin_x,
                origin_y,
                subrect: pitch_dimensions,
                surface: block_linear_dimensions,
            });
        }

        let surface = BlockLinearSurface::new(
            block_linear_dimensions,
            block_dim,
            bytes_per_block,
            block_height,
            block_depth,
        )?;

        let row_size = row_size(region.width, block_dim, bytes_per_block);
        let lines = line_count(region.height, block_dim);
        let pitch = resolve_pitch(pitch, row_size)?;

        // The origin is in pixels, so convert to bytes and lines using the block size.
        let start_x = origin_x as usize * bytes_per_block as usize;
        let start_y = origin_y as usize / block_dim.height.get() as usize;

        Ok(Self {
            x: AxisSpan::new(start_x, start_x + row_size, GOB_WIDTH_IN_BYTES),
            y: AxisSpan::new(start_y, start_y + lines, surface.rob_height()),
            depth: region.depth as usize,
            row_size,
            lines,
            pitch,
            surface,
        })
    }

    fn pitch_size(&self) -> usize {
        pitch_size(self.row_size, self.lines * self.depth, self.pitch)
    }
}

fn subrect_inner(subrect: &Subrect, source: &[u8], destination: &mut [u8], direction: Direction) {
    let surface = &subrect.surface;
    let slice_size = subrect.pitch * subrect.lines;

    for slice_group in (0..subrect.depth).step_by(surface.block_depth) {
        let slices = min(surface.block_depth, subrect.depth - slice_group);

        for (rob, rob_start, rob_end) in subrect.y.units() {
            let rob_line = rob * surface.rob_height();

            for (column, x_start, x_end) in subrect.x.units() {
                let x = column * GOB_WIDTH_IN_BYTES;
                let block_address = surface.block_address(column, rob, slice_group);

                for z in 0..slices {
                    let slice = slice_group + z;

                    // Only visit the GOBs of the block that overlap the region.
                    let first_gob = rob_start / GOB_HEIGHT_IN_LINES;
                    let last_gob = (rob_end - 1) / GOB_HEIGHT_IN_LINES;
                    for gob_y in first_gob..=last_gob {
                        let gob_line = gob_y * GOB_HEIGHT_IN_LINES;
                        let y_start = rob_start.max(gob_line) - gob_line;
                        let y_end = min(rob_end, gob_line + GOB_HEIGHT_IN_LINES) - gob_line;

                        let line = rob_line + gob_line + y_start;
                        let pitch_address = slice * slice_size
                            + (line - subrect.y.start) * subrect.pitch
                            + (x + x_start - subrect.x.start);

                        copy_gob(
                            source,
                            destination,
                            block_address + surface.gob_address_in_block(gob_y, slice),
                            pitch_address,
                            subrect.pitch,
                            GobRegion::new(x_start, x_end, y_start, y_end),
                            direction,
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        block_linear_layer_size, copy_block_linear_to_pitch, deswizzle_block_linear,
        pitch_surface_size, swizzle_block_linear,
    };
    use core::num::NonZeroU32;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_bytes(size: usize, seed: u8) -> Vec<u8> {
        let mut rng: StdRng = SeedableRng::from_seed([seed; 32]);
        (0..size).map(|_| rng.gen_range::<u8, _>(0..=255)).collect()
    }

    // Crop a tightly packed surface to the given byte columns, lines, and slices.
    fn crop(
        linear: &[u8],
        row_size: usize,
        lines: usize,
        x: (usize, usize),
        y: (usize, usize),
        depth: usize,
    ) -> Vec<u8> {
        let mut output = Vec::new();
        for z in 0..depth {
            for line in y.0..y.1 {
                let start = (z * lines + line) * row_size;
                output.extend_from_slice(&linear[start + x.0..start + x.1]);
            }
        }
        output
    }

    fn deswizzle_subrect(
        region: Dimensions,
        surface: Dimensions,
        block_dim: BlockDim,
        bytes_per_block: u32,
        block_height: BlockHeight,
        block_depth: BlockDepth,
        tiled: &[u8],
        origin_x: u32,
        origin_y: u32,
    ) -> Vec<u8> {
        let mut linear = vec![0u8; pitch_surface_size(region, block_dim, bytes_per_block, 0)];
        copy_block_linear_to_pitch_subrect(
            region,
            surface,
            block_dim,
            bytes_per_block,
            0,
            block_height,
            block_depth,
            tiled,
            &mut linear,
            origin_x,
            origin_y,
        )
        .unwrap();
        linear
    }

    #[test]
    fn axis_span_alignment() {
        assert_eq!(Alignment::Aligned, AxisSpan::new(64, 192, 64).alignment);
        assert_eq!(Alignment::Aligned, AxisSpan::new(0, 64, 64).alignment);
        assert_eq!(Alignment::StartMisaligned, AxisSpan::new(20, 128, 64).alignment);
        assert_eq!(Alignment::EndMisaligned, AxisSpan::new(0, 100, 64).alignment);
        assert_eq!(Alignment::BothMisaligned, AxisSpan::new(20, 100, 64).alignment);
        assert_eq!(Alignment::SingleUnit, AxisSpan::new(20, 60, 64).alignment);
        assert_eq!(Alignment::SingleUnit, AxisSpan::new(64, 70, 64).alignment);
    }

    #[test]
    fn axis_span_units() {
        let units: Vec<_> = AxisSpan::new(20, 140, 64).units().collect();
        assert_eq!(vec![(0, 20, 64), (1, 0, 64), (2, 0, 12)], units);

        let units: Vec<_> = AxisSpan::new(20, 60, 64).units().collect();
        assert_eq!(vec![(0, 20, 60)], units);

        let units: Vec<_> = AxisSpan::new(128, 256, 64).units().collect();
        assert_eq!(vec![(2, 0, 64), (3, 0, 64)], units);
    }

    #[test]
    fn subrect_full_surface_matches_copy() {
        let cases = [
            (Dimensions::new(64, 8, 1), 1, BlockHeight::One, BlockDepth::One),
            (Dimensions::new(300, 77, 1), 4, BlockHeight::Four, BlockDepth::One),
            (Dimensions::new(33, 20, 9), 4, BlockHeight::Two, BlockDepth::Four),
        ];
        for (dimensions, bpp, block_height, block_depth) in cases {
            let tiled = random_bytes(
                block_linear_layer_size(
                    dimensions,
                    BlockDim::uncompressed(),
                    bpp,
                    block_height,
                    block_depth,
                ),
                3,
            );
            let expected = deswizzle_block_linear(
                dimensions,
                BlockDim::uncompressed(),
                bpp,
                block_height,
                block_depth,
                &tiled,
            )
            .unwrap();
            let actual = deswizzle_subrect(
                dimensions,
                dimensions,
                BlockDim::uncompressed(),
                bpp,
                block_height,
                block_depth,
                &tiled,
                0,
                0,
            );
            assert!(expected == actual, "{:?}", dimensions);
        }
    }

    #[test]
    fn deswizzle_subrect_misaligned_x() {
        let surface = Dimensions::new(128, 16, 1);
        for bpp in [1, 4] {
            let tiled = random_bytes(
                block_linear_layer_size(
                    surface,
                    BlockDim::uncompressed(),
                    bpp,
                    BlockHeight::Two,
                    BlockDepth::One,
                ),
                5,
            );
            let full = deswizzle_block_linear(
                surface,
                BlockDim::uncompressed(),
                bpp,
                BlockHeight::Two,
                BlockDepth::One,
                &tiled,
            )
            .unwrap();

            let bpp_bytes = bpp as usize;
            let expected = crop(
                &full,
                128 * bpp_bytes,
                16,
                (20 * bpp_bytes, 60 * bpp_bytes),
                (0, 16),
                1,
            );
            let actual = deswizzle_subrect(
                Dimensions::new(40, 16, 1),
                surface,
                BlockDim::uncompressed(),
                bpp,
                BlockHeight::Two,
                BlockDepth::One,
                &tiled,
                20,
                0,
            );
            assert!(expected == actual, "{}", bpp);
        }
    }

    #[test]
    fn deswizzle_subrect_misaligned_y() {
        // The region starts and ends inside a ROB and inside a GOB.
        let surface = Dimensions::new(96, 70, 1);
        let tiled = random_bytes(
            block_linear_layer_size(
                surface,
                BlockDim::uncompressed(),
                4,
                BlockHeight::Two,
                BlockDepth::One,
            ),
            7,
        );
        let full = deswizzle_block_linear(
            surface,
            BlockDim::uncompressed(),
            4,
            BlockHeight::Two,
            BlockDepth::One,
            &tiled,
        )
        .unwrap();

        let expected = crop(&full, 96 * 4, 70, (12, 380), (5, 51), 1);
        let actual = deswizzle_subrect(
            Dimensions::new(92, 46, 1),
            surface,
            BlockDim::uncompressed(),
            4,
            BlockHeight::Two,
            BlockDepth::One,
            &tiled,
            3,
            5,
        );
        assert!(expected == actual);
    }

    #[test]
    fn deswizzle_subrect_single_gob() {
        let surface = Dimensions::new(64, 8, 1);
        let tiled = random_bytes(512, 9);
        let full = deswizzle_block_linear(
            surface,
            BlockDim::uncompressed(),
            1,
            BlockHeight::One,
            BlockDepth::One,
            &tiled,
        )
        .unwrap();

        let expected = crop(&full, 64, 8, (3, 13), (2, 5), 1);
        let actual = deswizzle_subrect(
            Dimensions::new(10, 3, 1),
            surface,
            BlockDim::uncompressed(),
            1,
            BlockHeight::One,
            BlockDepth::One,
            &tiled,
            3,
            2,
        );
        assert_eq!(expected, actual);
    }

    #[test]
    fn deswizzle_subrect_block_height_origin() {
        // A 1x4 block format has 4 pixel rows per line.
        let block_dim = BlockDim {
            width: NonZeroU32::new(1).unwrap(),
            height: NonZeroU32::new(4).unwrap(),
        };
        let surface = Dimensions::new(32, 64, 1);
        let tiled = random_bytes(
            block_linear_layer_size(surface, block_dim, 8, BlockHeight::One, BlockDepth::One),
            11,
        );
        let full = deswizzle_block_linear(
            surface,
            block_dim,
            8,
            BlockHeight::One,
            BlockDepth::One,
            &tiled,
        )
        .unwrap();

        // Pixel row 8 is line 2.
        let expected = crop(&full, 256, 16, (64, 192), (2, 10), 1);
        let actual = deswizzle_subrect(
            Dimensions::new(16, 32, 1),
            surface,
            block_dim,
            8,
            BlockHeight::One,
            BlockDepth::One,
            &tiled,
            8,
            8,
        );
        assert_eq!(expected, actual);
    }

    #[test]
    fn deswizzle_subrect_3d() {
        let surface = Dimensions::new(40, 24, 6);
        let tiled = random_bytes(
            block_linear_layer_size(
                surface,
                BlockDim::uncompressed(),
                4,
                BlockHeight::Two,
                BlockDepth::Four,
            ),
            13,
        );
        let full = deswizzle_block_linear(
            surface,
            BlockDim::uncompressed(),
            4,
            BlockHeight::Two,
            BlockDepth::Four,
            &tiled,
        )
        .unwrap();

        let expected = crop(&full, 160, 24, (40, 120), (7, 19), 5);
        let actual = deswizzle_subrect(
            Dimensions::new(20, 12, 5),
            surface,
            BlockDim::uncompressed(),
            4,
            BlockHeight::Two,
            BlockDepth::Four,
            &tiled,
            10,
            7,
        );
        assert!(expected == actual);
    }

    #[test]
    fn swizzle_subrect_preserves_surrounding_bytes() {
        let surface = Dimensions::new(128, 40, 1);
        let original = random_bytes(128 * 40 * 4, 17);
        let mut tiled = swizzle_block_linear(
            surface,
            BlockDim::uncompressed(),
            4,
            BlockHeight::Four,
            BlockDepth::One,
            &original,
        )
        .unwrap();

        let region = random_bytes(40 * 30 * 4, 19);
        copy_pitch_to_block_linear_subrect(
            Dimensions::new(40, 30, 1),
            surface,
            BlockDim::uncompressed(),
            4,
            0,
            BlockHeight::Four,
            BlockDepth::One,
            &region,
            &mut tiled,
            20,
            3,
        )
        .unwrap();

        let result = deswizzle_block_linear(
            surface,
            BlockDim::uncompressed(),
            4,
            BlockHeight::Four,
            BlockDepth::One,
            &tiled,
        )
        .unwrap();

        for y in 0..40 {
            for x in 0..128 * 4 {
                let actual = result[y * 512 + x];
                if (3..33).contains(&y) && (80..240).contains(&x) {
                    assert_eq!(region[(y - 3) * 160 + x - 80], actual, "({}, {})", x, y);
                } else {
                    assert_eq!(original[y * 512 + x], actual, "({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn subrect_custom_pitch() {
        let surface = Dimensions::new(64, 16, 1);
        let tiled = random_bytes(1024, 23);
        let full = deswizzle_block_linear(
            surface,
            BlockDim::uncompressed(),
            1,
            BlockHeight::Two,
            BlockDepth::One,
            &tiled,
        )
        .unwrap();

        let mut linear = vec![0xAAu8; 32 * 9 + 20];
        copy_block_linear_to_pitch_subrect(
            Dimensions::new(20, 10, 1),
            surface,
            BlockDim::uncompressed(),
            1,
            32,
            BlockHeight::Two,
            BlockDepth::One,
            &tiled,
            &mut linear,
            40,
            4,
        )
        .unwrap();

        for line in 0..10 {
            let source = (line + 4) * 64 + 40;
            assert_eq!(&full[source..source + 20], &linear[line * 32..line * 32 + 20]);
            if line < 9 {
                assert!(linear[line * 32 + 20..line * 32 + 32].iter().all(|b| *b == 0xAA));
            }
        }
    }

    #[test]
    fn subrect_unsupported_block_width() {
        let mut linear = vec![0u8; 1024];
        let result = copy_block_linear_to_pitch_subrect(
            Dimensions::new(16, 16, 1),
            Dimensions::new(32, 32, 1),
            BlockDim::block_4x4(),
            16,
            0,
            BlockHeight::One,
            BlockDepth::One,
            &[0u8; 1024],
            &mut linear,
            0,
            0,
        );
        assert_eq!(
            result,
            Err(SwizzleError::UnsupportedBlockWidth { block_width: 4 })
        );
    }

    #[test]
    fn subrect_out_of_bounds() {
        let mut tiled = vec![0u8; 2048];
        let result = copy_pitch_to_block_linear_subrect(
            Dimensions::new(40, 8, 1),
            Dimensions::new(64, 8, 1),
            BlockDim::uncompressed(),
            4,
            0,
            BlockHeight::One,
            BlockDepth::One,
            &[0u8; 40 * 8 * 4],
            &mut tiled,
            30,
            0,
        );
        assert_eq!(
            result,
            Err(SwizzleError::SubrectOutOfBounds {
                origin_x: 30,
                origin_y: 0,
                subrect: Dimensions::new(40, 8, 1),
                surface: Dimensions::new(64, 8, 1),
            })
        );

        let result = copy_pitch_to_block_linear_subrect(
            Dimensions::new(8, 8, 2),
            Dimensions::new(64, 8, 1),
            BlockDim::uncompressed(),
            4,
            0,
            BlockHeight::One,
            BlockDepth::One,
            &[0u8; 8 * 8 * 4 * 2],
            &mut tiled,
            0,
            0,
        );
        assert!(matches!(
            result,
            Err(SwizzleError::SubrectOutOfBounds { .. })
        ));
    }

    #[test]
    fn subrect_origin_overflow() {
        let mut tiled = vec![0u8; 512];
        let result = copy_pitch_to_block_linear_subrect(
            Dimensions::new(8, 8, 1),
            Dimensions::new(64, 8, 1),
            BlockDim::uncompressed(),
            1,
            0,
            BlockHeight::One,
            BlockDepth::One,
            &[0u8; 64],
            &mut tiled,
            u32::MAX,
            0,
        );
        assert!(matches!(
            result,
            Err(SwizzleError::SubrectOutOfBounds { .. })
        ));
    }

    #[test]
    fn subrect_not_enough_data() {
        let mut linear = vec![0u8; 16 * 8 * 4];
        let result = copy_block_linear_to_pitch_subrect(
            Dimensions::new(16, 8, 1),
            Dimensions::new(32, 8, 1),
            BlockDim::uncompressed(),
            4,
            0,
            BlockHeight::One,
            BlockDepth::One,
            &[0u8; 512],
            &mut linear,
            0,
            0,
        );
        assert_eq!(
            result,
            Err(SwizzleError::NotEnoughData {
                expected_size: 1024,
                actual_size: 512
            })
        );

        let result = copy_block_linear_to_pitch_subrect(
            Dimensions::new(16, 8, 1),
            Dimensions::new(32, 8, 1),
            BlockDim::uncompressed(),
            4,
            0,
            BlockHeight::One,
            BlockDepth::One,
            &[0u8; 1024],
            &mut linear[..100],
            0,
            0,
        );
        assert_eq!(
            result,
            Err(SwizzleError::NotEnoughData {
                expected_size: 512,
                actual_size: 100
            })
        );
    }

    #[test]
    fn subrect_zero_bytes_per_block() {
        let mut linear = vec![0xAAu8; 64];
        let result = copy_block_linear_to_pitch_subrect(
            Dimensions::new(4, 4, 1),
            Dimensions::new(8, 8, 1),
            BlockDim::uncompressed(),
            0,
            0,
            BlockHeight::One,
            BlockDepth::One,
            &[0u8; 512],
            &mut linear,
            1,
            1,
        );
        assert_eq!(
            result,
            Err(SwizzleError::InvalidSurface {
                width: 8,
                height: 8,
                depth: 1,
                bytes_per_block: 0,
                mipmap_count: 1
            })
        );
        assert!(linear.iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn subrect_invalid_pitch() {
        let mut linear = vec![0u8; 1024];
        let result = copy_block_linear_to_pitch_subrect(
            Dimensions::new(16, 8, 1),
            Dimensions::new(32, 8, 1),
            BlockDim::uncompressed(),
            4,
            32,
            BlockHeight::One,
            BlockDepth::One,
            &[0u8; 1024],
            &mut linear,
            0,
            0,
        );
        assert_eq!(
            result,
            Err(SwizzleError::InvalidPitch {
                pitch: 32,
                row_size: 64
            })
        );
    }

    #[test]
    fn subrect_uses_copy_for_aligned_region() {
        // An aligned region in the middle of the surface matches cropping the full copy.
        let surface = Dimensions::new(256, 64, 1);
        let tiled = random_bytes(256 * 64, 29);
        let mut full = vec![0u8; 256 * 64];
        copy_block_linear_to_pitch(
            surface,
            BlockDim::uncompressed(),
            1,
            0,
            BlockHeight::Two,
            BlockDepth::One,
            &tiled,
            &mut full,
        )
        .unwrap();

        let expected = crop(&full, 256, 64, (64, 192), (16, 48), 1);
        let actual = deswizzle_subrect(
            Dimensions::new(128, 32, 1),
            surface,
            BlockDim::uncompressed(),
            1,
            BlockHeight::Two,
            BlockDepth::One,
            &tiled,
            64,
            16,
        );
        assert_eq!(expected, actual);
    }
}
