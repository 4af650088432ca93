pub mod bitblock;
pub use bitblock::{BitBlock, Word, WORDS_PER_BLOCK};

mod bitbuffer;
pub use bitbuffer::AlignedBits;

/// Number of 256-bit blocks needed to hold `bit_count` bits.
#[must_use]
pub fn block_count(bit_count: usize) -> usize {
    bit_count.div_ceil(BitBlock::BITS)
}
