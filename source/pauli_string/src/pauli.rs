// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

mod string;
pub use string::PauliString;

mod view;
pub use view::{PauliStringMut, PauliStringRef};

use num_derive::FromPrimitive;
use num_traits::FromPrimitive as _;
use std::fmt::{self, Display};
use std::ops::{BitXor, BitXorAssign};
use thiserror::Error;

/// A single-qubit Pauli term over the symplectic `(x, z)` bit pair:
/// `I = (0, 0)`, `X = (1, 0)`, `Z = (0, 1)`, `Y = (1, 1)`.
///
/// The discriminant is the two-bit code `x | z << 1`, so XOR-ing codes is
/// group composition up to phase.
#[derive(Clone, Copy, Debug, Eq, FromPrimitive, Hash, PartialEq)]
#[repr(u8)]
pub enum PauliTerm {
    Identity = 0b00,
    X = 0b01,
    Z = 0b10,
    Y = 0b11,
}

impl PauliTerm {
    #[must_use]
    pub fn from_bits(x: bool, z: bool) -> Self {
        Self::from_u8(u8::from(x) | u8::from(z) << 1).expect("every two-bit code is a Pauli term")
    }

    #[must_use]
    pub fn x_bit(self) -> bool {
        self as u8 & 1 != 0
    }

    #[must_use]
    pub fn z_bit(self) -> bool {
        self as u8 & 2 != 0
    }

    /// The parse alphabet: `_` and `I` both read as identity.
    #[must_use]
    pub fn from_character(character: char) -> Option<Self> {
        match character {
            '_' | 'I' => Some(Self::Identity),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    /// Canonical character; identity always renders as `_`.
    #[must_use]
    pub fn character(self) -> char {
        match self {
            Self::Identity => '_',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }
}

/// Phase exponent `L(a, b)`: composing `a` then `b` equals
/// `i^L(a, b)` times the term whose bit pair is the XOR of theirs.
#[must_use]
pub fn phase_exponent(left: PauliTerm, right: PauliTerm) -> u8 {
    use PauliTerm::{Identity, X, Y, Z};
    match (left, right) {
        _ if left == Identity || right == Identity || left == right => 0,
        (X, Y) | (Y, Z) | (Z, X) => 1,
        _ => 3,
    }
}

/// Overall ±1 sign of a Pauli string. Sign combination is exclusive-or.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Sign {
    #[default]
    Plus,
    Minus,
}

impl Sign {
    #[must_use]
    pub fn from_negative(negative: bool) -> Self {
        if negative {
            Self::Minus
        } else {
            Self::Plus
        }
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self == Self::Minus
    }

    pub fn flip(&mut self) {
        *self = *self ^ Self::Minus;
    }

    #[must_use]
    pub fn character(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl BitXor for Sign {
    type Output = Sign;

    fn bitxor(self, other: Self) -> Sign {
        Self::from_negative(self.is_negative() ^ other.is_negative())
    }
}

impl BitXorAssign for Sign {
    fn bitxor_assign(&mut self, other: Self) {
        *self = *self ^ other;
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.character().to_string())
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PauliError {
    #[error("unexpected character `{character}` at position {position} in Pauli string")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("Pauli string lengths differ: {left} vs {right} qubits")]
    LengthMismatch { left: usize, right: usize },
    #[error("qubit index {index} is out of range for a {qubit_count}-qubit Pauli string")]
    IndexOutOfRange { index: usize, qubit_count: usize },
}
