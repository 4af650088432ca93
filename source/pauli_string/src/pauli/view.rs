// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use itertools::izip;
use sorted_iter::assume::AssumeSortedByItemExt;
use sorted_iter::SortedIterator;
use std::fmt::{self, Debug, Display};

use super::{PauliError, PauliTerm, Sign};
use crate::bits::{block_count, BitBlock, Word};

/// A borrowed, non-owning view of a signed Pauli string: a sign location
/// plus X-plane and Z-plane block ranges. The referenced storage may belong
/// to a [`super::PauliString`] or to any caller-managed buffer (rows of a
/// stabilizer tableau, for instance); it must outlive the view. Shared
/// views may alias freely.
#[derive(Clone, Copy)]
pub struct PauliStringRef<'a> {
    qubit_count: usize,
    sign: &'a Sign,
    x_blocks: &'a [BitBlock],
    z_blocks: &'a [BitBlock],
}

/// The mutable counterpart of [`PauliStringRef`]. All algebra mutates the
/// referenced storage in place; no operation allocates.
pub struct PauliStringMut<'a> {
    qubit_count: usize,
    sign: &'a mut Sign,
    x_blocks: &'a mut [BitBlock],
    z_blocks: &'a mut [BitBlock],
}

fn word_total(qubit_count: usize) -> usize {
    qubit_count.div_ceil(Word::BITS as usize)
}

fn word_mask(qubit_count: usize, word_index: usize) -> Word {
    let remaining = qubit_count - word_index * (Word::BITS as usize);
    if remaining >= Word::BITS as usize {
        Word::MAX
    } else {
        (1 << remaining) - 1
    }
}

/// Words of one plane with bits at positions `>= qubit_count` read as zero.
fn plane_words(blocks: &[BitBlock], qubit_count: usize) -> impl Iterator<Item = Word> + '_ {
    blocks
        .iter()
        .flat_map(|block| block.words.iter().copied())
        .take(word_total(qubit_count))
        .enumerate()
        .map(move |(index, word)| word & word_mask(qubit_count, index))
}

fn plane_bit(blocks: &[BitBlock], index: usize) -> bool {
    blocks[index / BitBlock::BITS].get(index % BitBlock::BITS)
}

fn set_plane_bit(blocks: &mut [BitBlock], index: usize, to: bool) {
    blocks[index / BitBlock::BITS].set(index % BitBlock::BITS, to);
}

/// XOR `from` into `into`, leaving bits at positions `>= qubit_count`
/// untouched.
fn xor_plane(into: &mut [BitBlock], from: &[BitBlock], qubit_count: usize) {
    let into_words = into.iter_mut().flat_map(|block| block.words.iter_mut());
    for (into_word, from_word) in into_words.zip(plane_words(from, qubit_count)) {
        *into_word ^= from_word;
    }
}

/// Parity of the AND of two planes (the GF(2) dot product).
fn dot(left: &[BitBlock], right: &[BitBlock], qubit_count: usize) -> bool {
    plane_words(left, qubit_count)
        .zip(plane_words(right, qubit_count))
        .fold(false, |parity, (a, b)| parity ^ ((a & b).count_ones() & 1 == 1))
}

impl<'a> PauliStringRef<'a> {
    /// # Panics
    ///
    /// Will panic if either plane holds fewer blocks than `qubit_count`
    /// requires.
    #[must_use]
    pub fn new(
        qubit_count: usize,
        sign: &'a Sign,
        x_blocks: &'a [BitBlock],
        z_blocks: &'a [BitBlock],
    ) -> Self {
        assert!(x_blocks.len() >= block_count(qubit_count));
        assert!(z_blocks.len() >= block_count(qubit_count));
        Self {
            qubit_count,
            sign,
            x_blocks,
            z_blocks,
        }
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[must_use]
    pub fn sign(&self) -> Sign {
        *self.sign
    }

    /// # Panics
    ///
    /// Will panic if index is out of range
    #[must_use]
    pub fn term(&self, index: usize) -> PauliTerm {
        assert!(index < self.qubit_count);
        PauliTerm::from_bits(
            plane_bit(self.x_blocks, index),
            plane_bit(self.z_blocks, index),
        )
    }

    /// Number of non-identity terms.
    #[must_use]
    pub fn weight(&self) -> usize {
        plane_words(self.x_blocks, self.qubit_count)
            .zip(plane_words(self.z_blocks, self.qubit_count))
            .map(|(x, z)| (x | z).count_ones() as usize)
            .sum()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.weight() == 0 && !self.sign.is_negative()
    }

    /// Qubit indices carrying a non-identity term, in increasing order.
    pub fn support(&self) -> impl SortedIterator<Item = usize> + '_ {
        let x_support = (0..self.qubit_count)
            .filter(|index| plane_bit(self.x_blocks, *index))
            .assume_sorted_by_item();
        let z_support = (0..self.qubit_count)
            .filter(|index| plane_bit(self.z_blocks, *index))
            .assume_sorted_by_item();
        x_support.union(z_support)
    }

    /// The mod-4 exponent `k` such that composing the unsigned terms of
    /// `self` then `other`, position by position, carries a residual scalar
    /// factor of `i^k`. Both signs are ignored; neither operand is mutated.
    ///
    /// Exponent 0 means the operands commute with trivial phase, 2 that
    /// they commute up to a sign flip, 1 or 3 that they anticommute with an
    /// imaginary residual.
    pub fn log_i_scalar_byproduct(&self, other: &PauliStringRef<'_>) -> Result<u8, PauliError> {
        self.require_equal_length(other.qubit_count)?;
        let mut cyclic = 0usize;
        let mut anticyclic = 0usize;
        for (a_x, a_z, b_x, b_z) in izip!(
            plane_words(self.x_blocks, self.qubit_count),
            plane_words(self.z_blocks, self.qubit_count),
            plane_words(other.x_blocks, other.qubit_count),
            plane_words(other.z_blocks, other.qubit_count),
        ) {
            // Cyclic pairs (XY, YZ, ZX) contribute +1, anticyclic pairs
            // (XZ, YX, ZY) contribute -1, every other pair contributes 0.
            let cyclic_mask = (a_x & !a_z & b_x & b_z)
                | (a_x & a_z & !b_x & b_z)
                | (!a_x & a_z & b_x & !b_z);
            let anticyclic_mask = (a_x & !a_z & !b_x & b_z)
                | (a_x & a_z & b_x & !b_z)
                | (!a_x & a_z & b_x & b_z);
            cyclic += cyclic_mask.count_ones() as usize;
            anticyclic += anticyclic_mask.count_ones() as usize;
        }
        Ok((cyclic.wrapping_sub(anticyclic) & 3) as u8)
    }

    pub fn anticommutes_with(&self, other: &PauliStringRef<'_>) -> Result<bool, PauliError> {
        self.require_equal_length(other.qubit_count)?;
        Ok(dot(self.x_blocks, other.z_blocks, self.qubit_count)
            ^ dot(self.z_blocks, other.x_blocks, self.qubit_count))
    }

    pub fn commutes_with(&self, other: &PauliStringRef<'_>) -> Result<bool, PauliError> {
        Ok(!self.anticommutes_with(other)?)
    }

    /// Copies the term at `source_indices[j]` into `destination[j]` for
    /// every output position, overwriting the destination's terms entirely
    /// and forcing its sign positive. Every index is validated before the
    /// first write, so a failed call leaves the destination unchanged.
    pub fn gather_into(
        &self,
        destination: &mut PauliStringMut<'_>,
        source_indices: &[usize],
    ) -> Result<(), PauliError> {
        if destination.qubit_count != source_indices.len() {
            return Err(PauliError::LengthMismatch {
                left: destination.qubit_count,
                right: source_indices.len(),
            });
        }
        self.require_in_range(source_indices)?;
        *destination.sign = Sign::Plus;
        for (position, index) in source_indices.iter().enumerate() {
            destination.set_term(position, self.term(*index));
        }
        Ok(())
    }

    /// Overwrites `destination[target_indices[j]]` with `self[j]` for every
    /// source position (term assignment, not multiplication) and combines
    /// signs by exclusive-or. Destination positions not named by
    /// `target_indices` keep their terms. Every index is validated before
    /// the first write.
    pub fn scatter_into(
        &self,
        destination: &mut PauliStringMut<'_>,
        target_indices: &[usize],
    ) -> Result<(), PauliError> {
        if target_indices.len() != self.qubit_count {
            return Err(PauliError::LengthMismatch {
                left: self.qubit_count,
                right: target_indices.len(),
            });
        }
        destination.as_ref().require_in_range(target_indices)?;
        for (position, index) in target_indices.iter().enumerate() {
            destination.set_term(*index, self.term(position));
        }
        *destination.sign ^= *self.sign;
        Ok(())
    }

    fn require_equal_length(&self, other_count: usize) -> Result<(), PauliError> {
        if self.qubit_count == other_count {
            Ok(())
        } else {
            Err(PauliError::LengthMismatch {
                left: self.qubit_count,
                right: other_count,
            })
        }
    }

    fn require_in_range(&self, indices: &[usize]) -> Result<(), PauliError> {
        match indices.iter().find(|index| **index >= self.qubit_count) {
            Some(index) => Err(PauliError::IndexOutOfRange {
                index: *index,
                qubit_count: self.qubit_count,
            }),
            None => Ok(()),
        }
    }
}

impl<'a> PauliStringMut<'a> {
    /// # Panics
    ///
    /// Will panic if either plane holds fewer blocks than `qubit_count`
    /// requires.
    #[must_use]
    pub fn new(
        qubit_count: usize,
        sign: &'a mut Sign,
        x_blocks: &'a mut [BitBlock],
        z_blocks: &'a mut [BitBlock],
    ) -> Self {
        assert!(x_blocks.len() >= block_count(qubit_count));
        assert!(z_blocks.len() >= block_count(qubit_count));
        Self {
            qubit_count,
            sign,
            x_blocks,
            z_blocks,
        }
    }

    /// Reborrows as a shared view.
    #[must_use]
    pub fn as_ref(&self) -> PauliStringRef<'_> {
        PauliStringRef {
            qubit_count: self.qubit_count,
            sign: &*self.sign,
            x_blocks: &*self.x_blocks,
            z_blocks: &*self.z_blocks,
        }
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[must_use]
    pub fn sign(&self) -> Sign {
        *self.sign
    }

    pub fn set_sign(&mut self, sign: Sign) {
        *self.sign = sign;
    }

    /// Flips the overall sign in place.
    pub fn negate(&mut self) {
        self.sign.flip();
    }

    /// # Panics
    ///
    /// Will panic if index is out of range
    #[must_use]
    pub fn term(&self, index: usize) -> PauliTerm {
        self.as_ref().term(index)
    }

    /// # Panics
    ///
    /// Will panic if index is out of range
    pub fn set_term(&mut self, index: usize, term: PauliTerm) {
        assert!(index < self.qubit_count);
        set_plane_bit(self.x_blocks, index, term.x_bit());
        set_plane_bit(self.z_blocks, index, term.z_bit());
    }

    /// Term-level right multiplication `self *= other`: XOR-composes every
    /// term of `other` into `self` and XORs the two signs, then returns the
    /// mod-4 phase exponent of the pre-mutation operands (the same value
    /// [`PauliStringRef::log_i_scalar_byproduct`] would have reported).
    /// The returned exponent is NOT folded into the sign.
    pub fn mul_assign_reporting_phase(
        &mut self,
        other: &PauliStringRef<'_>,
    ) -> Result<u8, PauliError> {
        let exponent = self.as_ref().log_i_scalar_byproduct(other)?;
        *self.sign ^= *other.sign;
        xor_plane(self.x_blocks, other.x_blocks, self.qubit_count);
        xor_plane(self.z_blocks, other.z_blocks, self.qubit_count);
        Ok(exponent)
    }

    /// Full in-place multiplication `self *= other`: multiplies at the term
    /// level and folds the resulting phase exponent into the sign.
    ///
    /// # Panics
    ///
    /// Will panic if the accumulated phase exponent is odd. An odd exponent
    /// means the product carries a factor of ±i that a ±1 sign cannot
    /// represent; callers must only compose operands that close over real
    /// phases (e.g. mutually commuting stabilizer generators), or use
    /// [`Self::mul_assign_reporting_phase`] and resolve the exponent
    /// themselves.
    pub fn mul_assign(&mut self, other: &PauliStringRef<'_>) -> Result<(), PauliError> {
        let exponent = self.mul_assign_reporting_phase(other)?;
        assert!(
            exponent & 1 == 0,
            "residual phase i^{exponent} cannot be folded into a ±1 sign"
        );
        if exponent == 2 {
            self.sign.flip();
        }
        Ok(())
    }
}

impl PartialEq for PauliStringRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.qubit_count == other.qubit_count
            && self.sign == other.sign
            && plane_words(self.x_blocks, self.qubit_count)
                .eq(plane_words(other.x_blocks, other.qubit_count))
            && plane_words(self.z_blocks, self.qubit_count)
                .eq(plane_words(other.z_blocks, other.qubit_count))
    }
}

impl Eq for PauliStringRef<'_> {}

impl Display for PauliStringRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = String::with_capacity(self.qubit_count + 1);
        text.push(self.sign.character());
        for index in 0..self.qubit_count {
            text.push(self.term(index).character());
        }
        f.pad(&text)
    }
}

impl Debug for PauliStringRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for PauliStringMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <PauliStringRef<'_> as Display>::fmt(&self.as_ref(), f)
    }
}

impl Debug for PauliStringMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}
