use alloc::string::String;

// ENCODE ERROR
// ================================================================================================

/// Contract violations surfaced while constructing a component or selecting an encoder for it.
///
/// Constraint generation itself is a pure transform with no recoverable runtime errors: every
/// precondition is checked up front, so a caller never receives a partially built artifact.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("component {component} must combine at least 2 operands, but was declared with {operand_count}")]
    InvalidOperandCount { component: String, operand_count: usize },
    #[error("component {component} wires {wired_bits} input bits, but {expected_bits} are required ({operand_count} operands of {output_bit_size} bits)")]
    WiringMismatch {
        component: String,
        expected_bits: usize,
        wired_bits: usize,
        operand_count: usize,
        output_bit_size: usize,
    },
    #[error("component {component} has malformed wiring: every input link needs a non-empty bit selection")]
    MalformedWiring { component: String },
    #[error("component {component} has operation kind {kind}, which the {family} component family does not encode")]
    UnsupportedOperation {
        component: String,
        kind: String,
        family: &'static str,
    },
    #[error("weight bound {requested} exceeds the {available} available weight variables")]
    InvalidWeight { requested: usize, available: usize },
}
