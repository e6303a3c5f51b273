//! The fixed sector order within a GOB.
//!
//! A GOB is 64x8 bytes stored as 16x2 byte sectors.
//! The 32 sector lines of 16 bytes are stored sequentially,
//! but their positions interleave the X and Y bits of the line index.
use crate::SECTORS_IN_GOB;

/// Returns the byte offset `x` and the line offset `y` within a GOB for the sector line at `index`.
///
/// Bit 1 and bit 4 of `index` select the 16 byte column and bit 0 with bits 2-3 select the line.
/// `index` must be less than 32.
/**
```rust
use blocklinear::sector_offset;

assert_eq!((0, 0), sector_offset(0));
assert_eq!((0, 1), sector_offset(1));
assert_eq!((16, 0), sector_offset(2));
assert_eq!((32, 0), sector_offset(16));
```
*/
#[inline(always)]
pub const fn sector_offset(index: usize) -> (usize, usize) {
    let x = ((index << 3) & 0b10000) | ((index << 1) & 0b100000);
    let y = ((index >> 1) & 0b110) | (index & 0b1);
    (x, y)
}

/// The `(x, y)` offset of each 16 byte sector line in storage order.
pub const SECTOR_OFFSETS: [(usize, usize); SECTORS_IN_GOB] = sector_offsets();

const fn sector_offsets() -> [(usize, usize); SECTORS_IN_GOB] {
    let mut offsets = [(0, 0); SECTORS_IN_GOB];
    let mut i = 0;
    while i < SECTORS_IN_GOB {
        offsets[i] = sector_offset(i);
        i += 1;
    }
    offsets
}
