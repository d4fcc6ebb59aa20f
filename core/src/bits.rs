//! Bit-ordering convention shared by every encoder.
//!
//! Throughout the whole system, bit index 0 is the most significant bit of a word and index
//! `width - 1` is the least significant. Carry chains ripple from high indices towards index 0.
//! No encoder may re-derive this convention on its own; anything that needs to go between
//! integers and bit vectors goes through this module.

use alloc::vec::Vec;

/// Index of the most significant bit of any word.
pub const MSB_INDEX: usize = 0;

/// Returns the index of the least significant bit of a `width`-bit word.
pub const fn lsb_index(width: usize) -> usize {
    width - 1
}

/// Expands `value` into `width` bits, most significant bit first.
///
/// Bits above `width` are discarded, i.e. the value is reduced mod 2^width.
pub fn value_to_bits(value: u64, width: usize) -> Vec<u8> {
    (0..width).map(|i| ((value >> (width - 1 - i)) & 1) as u8).collect()
}

/// Folds a most-significant-bit-first bit slice back into an integer.
pub fn bits_to_value(bits: &[u8]) -> u64 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | u64::from(bit))
}

// TESTS
// ================================================================================================
