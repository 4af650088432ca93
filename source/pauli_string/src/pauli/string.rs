// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use rand::Rng;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use super::{PauliError, PauliStringMut, PauliStringRef, PauliTerm, Sign};
use crate::bits::{block_count, AlignedBits, BitBlock};

/// An owning signed Pauli string: an overall sign, a qubit count, and one
/// aligned buffer holding the X-plane blocks followed by the Z-plane
/// blocks. Cloning duplicates the buffer; moving transfers it. All algebra
/// goes through the views returned by [`Self::view`] and [`Self::view_mut`].
///
/// Bits at plane positions `>= qubit_count` are always zero; every
/// constructor and mutation preserves this.
#[derive(Clone)]
pub struct PauliString {
    sign: Sign,
    qubit_count: usize,
    planes: AlignedBits,
}

impl PauliString {
    /// The all-identity operator on `qubit_count` qubits, positive sign.
    #[must_use]
    pub fn identity(qubit_count: usize) -> Self {
        Self {
            sign: Sign::Plus,
            qubit_count,
            planes: AlignedBits::zeros(2 * block_count(qubit_count) * BitBlock::BITS),
        }
    }

    /// Builds a string of the given length by asking `term_of` for the
    /// character of every index in `0..qubit_count`. The callback must be
    /// stateless per index; it sees the same alphabet as [`FromStr`]
    /// (`_` and `I` both identity).
    pub fn from_pattern(
        sign: Sign,
        qubit_count: usize,
        term_of: impl Fn(usize) -> char,
    ) -> Result<Self, PauliError> {
        let mut result = Self::identity(qubit_count);
        result.sign = sign;
        let mut view = result.view_mut();
        for index in 0..qubit_count {
            let character = term_of(index);
            let term = PauliTerm::from_character(character).ok_or(
                PauliError::UnexpectedCharacter {
                    character,
                    position: index,
                },
            )?;
            view.set_term(index, term);
        }
        Ok(result)
    }

    /// A uniformly random string: random term at every index, random sign.
    #[must_use]
    pub fn random(qubit_count: usize, random_number_generator: &mut impl Rng) -> Self {
        let mut result = Self::identity(qubit_count);
        result.sign = Sign::from_negative(random_number_generator.gen());
        let mut view = result.view_mut();
        for index in 0..qubit_count {
            view.set_term(
                index,
                PauliTerm::from_bits(
                    random_number_generator.gen(),
                    random_number_generator.gen(),
                ),
            );
        }
        result
    }

    /// An owning copy of the string a view references.
    #[must_use]
    pub fn from_view(view: &PauliStringRef<'_>) -> Self {
        let mut result = Self::identity(view.qubit_count());
        result.sign = view.sign();
        let mut result_view = result.view_mut();
        for index in 0..view.qubit_count() {
            result_view.set_term(index, view.term(index));
        }
        result
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn set_sign(&mut self, sign: Sign) {
        self.sign = sign;
    }

    /// # Panics
    ///
    /// Will panic if index is out of range
    #[must_use]
    pub fn term(&self, index: usize) -> PauliTerm {
        self.view().term(index)
    }

    /// # Panics
    ///
    /// Will panic if index is out of range
    pub fn set_term(&mut self, index: usize, term: PauliTerm) {
        self.view_mut().set_term(index, term);
    }

    #[must_use]
    pub fn weight(&self) -> usize {
        self.view().weight()
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.view().is_identity()
    }

    /// A shared view over this string's own storage.
    #[must_use]
    pub fn view(&self) -> PauliStringRef<'_> {
        let (x_blocks, z_blocks) = self.planes.blocks().split_at(block_count(self.qubit_count));
        PauliStringRef::new(self.qubit_count, &self.sign, x_blocks, z_blocks)
    }

    /// A mutable view over this string's own storage.
    pub fn view_mut(&mut self) -> PauliStringMut<'_> {
        let plane_blocks = block_count(self.qubit_count);
        let (x_blocks, z_blocks) = self.planes.blocks_mut().split_at_mut(plane_blocks);
        PauliStringMut::new(self.qubit_count, &mut self.sign, x_blocks, z_blocks)
    }

    /// Canonical text form: the sign character, then one of `_XYZ` per
    /// qubit (identity always `_`).
    #[must_use]
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    pub fn log_i_scalar_byproduct(&self, other: &Self) -> Result<u8, PauliError> {
        self.view().log_i_scalar_byproduct(&other.view())
    }

    pub fn mul_assign_reporting_phase(&mut self, other: &Self) -> Result<u8, PauliError> {
        self.view_mut().mul_assign_reporting_phase(&other.view())
    }

    /// Full in-place multiplication; see [`PauliStringMut::mul_assign`].
    pub fn mul_assign(&mut self, other: &Self) -> Result<(), PauliError> {
        self.view_mut().mul_assign(&other.view())
    }
}

impl FromStr for PauliString {
    type Err = PauliError;

    /// Parses an optional leading `+` or `-` (default `+`) followed by one
    /// character per qubit from `{_, I, X, Y, Z}`. An empty body is the
    /// zero-qubit operator.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (sign, body) = match text.strip_prefix('+') {
            Some(body) => (Sign::Plus, body),
            None => match text.strip_prefix('-') {
                Some(body) => (Sign::Minus, body),
                None => (Sign::Plus, text),
            },
        };
        let sign_offset = usize::from(body.len() != text.len());
        let mut result = Self::identity(body.chars().count());
        result.sign = sign;
        let mut view = result.view_mut();
        for (index, character) in body.chars().enumerate() {
            let term = PauliTerm::from_character(character).ok_or(
                PauliError::UnexpectedCharacter {
                    character,
                    position: index + sign_offset,
                },
            )?;
            view.set_term(index, term);
        }
        Ok(result)
    }
}

impl PartialEq for PauliString {
    fn eq(&self, other: &Self) -> bool {
        self.view() == other.view()
    }
}

impl Eq for PauliString {}

impl PartialEq<PauliStringRef<'_>> for PauliString {
    fn eq(&self, other: &PauliStringRef<'_>) -> bool {
        self.view() == *other
    }
}

impl PartialEq<PauliString> for PauliStringRef<'_> {
    fn eq(&self, other: &PauliString) -> bool {
        *self == other.view()
    }
}

impl Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <PauliStringRef<'_> as Display>::fmt(&self.view(), f)
    }
}

impl Debug for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}
