//! Bit-packed signed Pauli strings: the algebraic primitive underneath a
//! stabilizer simulator.
//!
//! An `n`-qubit Pauli operator is stored as two bit planes (one `x` bit and
//! one `z` bit per qubit, in the standard symplectic encoding) plus an
//! overall ±1 sign. The planes live in 256-bit-aligned storage so that
//! multiplication, commutation checks, and sub-register gather/scatter run
//! word-parallel at qubit counts in the thousands. All algebra is defined on
//! borrowed views, which may reference a [`PauliString`]'s own storage or any
//! caller-managed pair of block slices (for example, rows of a stabilizer
//! tableau).

pub mod bits;
pub mod pauli;

pub use pauli::{PauliError, PauliString, PauliStringMut, PauliStringRef, PauliTerm, Sign};
