use rand::Rng;
use sorted_iter::assume::AssumeSortedByItemExt;
use sorted_iter::SortedIterator;

use super::bitblock::{BitBlock, Word, WORDS_PER_BLOCK};
use super::block_count;

/// Word-addressable, zero-initialized storage rounded up to whole 256-bit
/// blocks. Pure storage: the Pauli layer defines all semantics over slices
/// of these blocks. Allocation failure aborts the process.
#[derive(Eq, Clone, Debug, Hash, PartialEq)]
pub struct AlignedBits {
    blocks: Vec<BitBlock>,
}

impl AlignedBits {
    /// Storage for at least `bit_count` bits, all clear.
    #[must_use]
    pub fn zeros(bit_count: usize) -> Self {
        Self {
            blocks: vec![BitBlock::zeros(); block_count(bit_count)],
        }
    }

    #[must_use]
    pub fn bit_count(&self) -> usize {
        self.blocks.len() * BitBlock::BITS
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.blocks.len() * WORDS_PER_BLOCK
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn blocks(&self) -> &[BitBlock] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [BitBlock] {
        &mut self.blocks
    }

    #[must_use]
    pub fn word(&self, index: usize) -> Word {
        self.blocks[index / WORDS_PER_BLOCK].words[index % WORDS_PER_BLOCK]
    }

    pub fn word_mut(&mut self, index: usize) -> &mut Word {
        &mut self.blocks[index / WORDS_PER_BLOCK].words[index % WORDS_PER_BLOCK]
    }

    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.blocks[index / BitBlock::BITS].get(index % BitBlock::BITS)
    }

    pub fn set(&mut self, index: usize, to: bool) {
        self.blocks[index / BitBlock::BITS].set(index % BitBlock::BITS, to);
    }

    pub fn negate(&mut self, index: usize) {
        self.blocks[index / BitBlock::BITS].negate(index % BitBlock::BITS);
    }

    #[must_use]
    pub fn weight(&self) -> usize {
        self.blocks.iter().map(BitBlock::weight).sum()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.blocks.iter().all(BitBlock::is_zero)
    }

    /// Indices of set bits, in increasing order.
    pub fn support(&self) -> impl SortedIterator<Item = usize> + '_ {
        (0..self.bit_count())
            .filter(|index| self.get(*index))
            .assume_sorted_by_item()
    }

    pub fn set_random(&mut self, bit_count: usize, random_number_generator: &mut impl Rng) {
        for index in 0..bit_count {
            self.set(index, random_number_generator.gen());
        }
    }

    pub fn clear(&mut self) {
        for block in &mut self.blocks {
            *block = BitBlock::zeros();
        }
    }
}
