//! Deterministic variable naming shared by every backend encoder.
//!
//! Every auxiliary symbol a component introduces (carries, intermediates, staging arrays, ring
//! variables) embeds the owning component's id, so two components with distinct ids can never
//! produce overlapping names. All identifier shapes live here; encoders never format names
//! inline.

use alloc::{string::String, vec::Vec};

// BIT-LEVEL IDENTIFIERS
// ================================================================================================

/// Returns the identifier of a single bit of a component's output word, e.g. `modadd_0_1_003`.
pub fn bit_id(link: &str, position: usize) -> String {
    format!("{link}_{position:03}")
}

/// Returns the identifiers of all `width` output bits of the component with the given id.
pub fn output_bit_ids(component_id: &str, width: usize) -> Vec<String> {
    (0..width).map(|i| bit_id(component_id, i)).collect()
}

/// Flattens a component's wiring into the ordered list of upstream bit identifiers.
pub fn input_bit_ids(links: &[String], positions: &[Vec<usize>]) -> Vec<String> {
    links
        .iter()
        .zip(positions)
        .flat_map(|(link, positions)| positions.iter().map(|&pos| bit_id(link, pos)))
        .collect()
}

// CARRY-CHAIN AUXILIARIES
// ================================================================================================

/// Carry bit of a single-stage addition chain, e.g. `carry_modsub_0_7_003`.
pub fn carry_id(output_bit_id: &str) -> String {
    format!("carry_{output_bit_id}")
}

/// Carry bit of addition stage `stage`, e.g. `carry_000_modadd_0_1_003`.
pub fn stage_carry_id(stage: usize, output_bit_id: &str) -> String {
    format!("carry_{stage:03}_{output_bit_id}")
}

/// Intermediate 2-input XOR of a single-stage addition, e.g. `intermediate_modsub_0_7_003`.
pub fn intermediate_id(output_bit_id: &str) -> String {
    format!("intermediate_{output_bit_id}")
}

/// Intermediate 2-input XOR of addition stage `stage` of a multi-operand chain.
pub fn stage_intermediate_id(kind: &str, stage: usize, output_bit_id: &str) -> String {
    format!("{kind}_intermediate_{stage:03}_{output_bit_id}")
}

/// Result bit of a non-final stage of a multi-operand chain, e.g. `modadd_output_000_...`.
pub fn stage_output_id(kind: &str, stage: usize, output_bit_id: &str) -> String {
    format!("{kind}_output_{stage:03}_{output_bit_id}")
}

// TWO'S-COMPLEMENT AUXILIARIES
// ================================================================================================

/// Carry bit of a two's-complement chain over the named input bit.
///
/// `stage` is `None` for a plain two-operand subtraction (the form the original single-stage
/// chain uses) and carries the fold-stage index otherwise, so that an operand wired twice into
/// the same component still yields distinct chains.
pub fn twocomp_carry_id(stage: Option<usize>, input_bit_id: &str) -> String {
    match stage {
        None => format!("twocomp_carry_{input_bit_id}"),
        Some(stage) => format!("twocomp_carry_{stage:03}_{input_bit_id}"),
    }
}

/// Result bit of a two's-complement chain over the named input bit.
pub fn twocomp_result_id(stage: Option<usize>, input_bit_id: &str) -> String {
    match stage {
        None => format!("twocomp_result_{input_bit_id}"),
        Some(stage) => format!("twocomp_result_{stage:03}_{input_bit_id}"),
    }
}

// LOGICAL-REDUCTION AUXILIARIES
// ================================================================================================

/// Intermediate result of fold step `stage` of a multi-input logical reduction,
/// e.g. `int_000_and_0_8_003`.
pub fn logical_intermediate_id(stage: usize, output_bit_id: &str) -> String {
    format!("int_{stage:03}_{output_bit_id}")
}

// CP ARRAY NAMES
// ================================================================================================

/// Staging array holding operand `index` of a CP encoding, e.g. `pre_modadd_0_1_0`.
pub fn cp_pre_array(component_id: &str, index: usize) -> String {
    format!("pre_{component_id}_{index}")
}

/// Intermediate fold-result array of a CP reduction chain, e.g. `temp_or_0_4_0`.
pub fn cp_temp_array(component_id: &str, index: usize) -> String {
    format!("temp_{component_id}_{index}")
}

/// Carry array of a CP two-term addition producing `out_array`.
pub fn cp_carry_array(out_array: &str) -> String {
    format!("carry_{out_array}")
}

/// The 0…01 constant array a CP modular subtraction adds to the bit complement.
pub fn cp_constant_array(component_id: &str) -> String {
    format!("constant_{component_id}")
}

/// Bitwise complement of `array` inside a CP two's-complement chain.
pub fn cp_pre_minus_array(array: &str) -> String {
    format!("pre_minus_{array}")
}

/// Arithmetic negation of `array` inside a CP two's-complement chain.
pub fn cp_minus_array(array: &str) -> String {
    format!("minus_{array}")
}

/// Left-shifted copy of `array` used by the CP differential-probability encoding.
pub fn cp_shift_array(array: &str) -> String {
    format!("Shi_{array}")
}

/// Equality-indicator array of the CP differential-probability encoding.
pub fn cp_eq_array(out_array: &str) -> String {
    format!("eq_{out_array}")
}

/// Per-bit weight array of the CP linear-mask propagation encoding.
pub fn cp_weight_array(component_id: &str) -> String {
    format!("p_{component_id}")
}

/// Input-mask array of the CP linear-mask propagation encoding.
pub fn cp_input_mask_array(component_id: &str) -> String {
    format!("{component_id}_i")
}

/// Output-mask array of the CP linear-mask propagation encoding.
pub fn cp_output_mask_array(component_id: &str) -> String {
    format!("{component_id}_o")
}

/// Name of the precomputed linear approximation table for an `operand_count`-input operator.
pub fn lat_table_name(operand_count: usize) -> String {
    format!("and{operand_count}inputs_LAT")
}

// ALGEBRAIC RING VARIABLES
// ================================================================================================

/// Ring variable for input bit `index` (flat, operand-major) of a component.
pub fn ring_input_var(component_id: &str, index: usize) -> String {
    format!("{component_id}_x{index}")
}

/// Ring variable for output bit `index` of a component.
pub fn ring_output_var(component_id: &str, index: usize) -> String {
    format!("{component_id}_y{index}")
}

/// Ring variable for carry bit `index` of addition stage `stage`.
pub fn ring_carry_var(component_id: &str, stage: usize, index: usize) -> String {
    format!("{component_id}_c{stage}_{index}")
}

/// Ring variable for output bit `index` of a non-final addition stage.
pub fn ring_stage_output_var(component_id: &str, stage: usize, index: usize) -> String {
    format!("{component_id}_o{stage}_{index}")
}

/// Ring variable for a two's-complement carry bit of subtraction stage `stage`.
pub fn ring_twocomp_carry_var(component_id: &str, stage: usize, index: usize) -> String {
    format!("{component_id}_d{stage}_{index}")
}

/// Ring variable for a two's-complement result bit of subtraction stage `stage`.
pub fn ring_twocomp_result_var(component_id: &str, stage: usize, index: usize) -> String {
    format!("{component_id}_t{stage}_{index}")
}

// TESTS
// ================================================================================================
