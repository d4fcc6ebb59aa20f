//! Bitwise primitive encoders: fixed clause sets for single boolean relations.
//!
//! Each function returns the clauses of one definition `id <=> relation(...)`; components
//! assemble carry chains and reduction chains out of these. The clause sets are exact: a test
//! below enumerates every assignment of every encoder against the defining relation.

use alloc::{string::String, vec::Vec};

use super::{Clause, Literal};

/// Clauses for `result <=> operand_0 AND operand_1`.
pub fn cnf_and(result: &str, operands: (&str, &str)) -> Vec<Clause> {
    let (a, b) = operands;
    vec![
        Clause::or([Literal::neg(result), Literal::pos(a)]),
        Clause::or([Literal::neg(result), Literal::pos(b)]),
        Clause::or([Literal::pos(result), Literal::neg(a), Literal::neg(b)]),
    ]
}

/// Clauses for `result <=> operand_0 OR operand_1`.
pub fn cnf_or(result: &str, operands: (&str, &str)) -> Vec<Clause> {
    let (a, b) = operands;
    vec![
        Clause::or([Literal::pos(result), Literal::neg(a)]),
        Clause::or([Literal::pos(result), Literal::neg(b)]),
        Clause::or([Literal::neg(result), Literal::pos(a), Literal::pos(b)]),
    ]
}

/// Clauses for `result <=> a XOR b`.
pub fn cnf_xor(result: &str, a: &str, b: &str) -> Vec<Clause> {
    vec![
        Clause::or([Literal::neg(result), Literal::pos(a), Literal::pos(b)]),
        Clause::or([Literal::neg(result), Literal::neg(a), Literal::neg(b)]),
        Clause::or([Literal::pos(result), Literal::neg(a), Literal::pos(b)]),
        Clause::or([Literal::pos(result), Literal::pos(a), Literal::neg(b)]),
    ]
}

/// Clauses for the ripple-carry relation `carry <=> MAJ(x, y, carry_next)`, where `carry_next`
/// is the carry coming from the next less significant position.
pub fn cnf_carry(carry: &str, x: &str, y: &str, carry_next: &str) -> Vec<Clause> {
    vec![
        Clause::or([Literal::neg(carry), Literal::pos(x), Literal::pos(y)]),
        Clause::or([Literal::neg(carry), Literal::pos(x), Literal::pos(carry_next)]),
        Clause::or([Literal::neg(carry), Literal::pos(y), Literal::pos(carry_next)]),
        Clause::or([Literal::pos(carry), Literal::neg(x), Literal::neg(y)]),
        Clause::or([Literal::pos(carry), Literal::neg(x), Literal::neg(carry_next)]),
        Clause::or([Literal::pos(carry), Literal::neg(y), Literal::neg(carry_next)]),
    ]
}

/// Clauses for the sum-bit relation `output <=> x XOR y XOR carry`, built through the
/// auxiliary `intermediate <=> x XOR y` since plain CNF has no 3-input XOR.
pub fn cnf_result(output: &str, x: &str, y: &str, carry: &str, intermediate: &str) -> Vec<Clause> {
    let mut clauses = cnf_xor(intermediate, x, y);
    clauses.extend(cnf_xor(output, intermediate, carry));
    clauses
}

/// Clauses for the two's-complement carry relation `carry <=> NOT(b) AND carry_next`.
pub fn cnf_carry_comp2(carry: &str, b: &str, carry_next: &str) -> Vec<Clause> {
    vec![
        Clause::or([Literal::neg(carry), Literal::neg(b)]),
        Clause::or([Literal::neg(carry), Literal::pos(carry_next)]),
        Clause::or([Literal::pos(carry), Literal::pos(b), Literal::neg(carry_next)]),
    ]
}

/// Clauses for the two's-complement result relation `result <=> NOT(b) XOR carry`, i.e.
/// `result <=> (b == carry)`.
pub fn cnf_result_comp2(result: &str, b: &str, carry: &str) -> Vec<Clause> {
    vec![
        Clause::or([Literal::neg(result), Literal::neg(b), Literal::pos(carry)]),
        Clause::or([Literal::neg(result), Literal::pos(b), Literal::neg(carry)]),
        Clause::or([Literal::pos(result), Literal::neg(b), Literal::neg(carry)]),
        Clause::or([Literal::pos(result), Literal::pos(b), Literal::pos(carry)]),
    ]
}

/// Clauses forcing `a <=> b`.
pub fn cnf_equivalent(a: &str, b: &str) -> Vec<Clause> {
    vec![
        Clause::or([Literal::pos(a), Literal::neg(b)]),
        Clause::or([Literal::neg(a), Literal::pos(b)]),
    ]
}

/// Clauses forcing `a <=> NOT b`.
pub fn cnf_inequality(a: &str, b: &str) -> Vec<Clause> {
    vec![
        Clause::or([Literal::pos(a), Literal::pos(b)]),
        Clause::or([Literal::neg(a), Literal::neg(b)]),
    ]
}

/// The CryptoMiniSat native XOR clause `output XOR lit_0 XOR ... XOR lit_n = 0`, written as an
/// odd-parity clause over `-output` and the positive literals.
pub fn cnf_xor_native(output: &str, inputs: &[&str]) -> Clause {
    let literals = core::iter::once(Literal::neg(output))
        .chain(inputs.iter().map(|id| Literal::pos(*id)));
    Clause::xor(literals)
}

/// Chains a 2-input relation over `k` inputs: `chain[0] <=> op(in[0], in[1])` and then
/// `chain[i] <=> op(chain[i-1], in[i+1])`. The last chain id is the final result; the ones
/// before it are the fresh fold intermediates. `chain.len() + 1` must equal `inputs.len()`.
pub fn cnf_operation_seq(
    two_input: fn(&str, (&str, &str)) -> Vec<Clause>,
    chain: &[String],
    inputs: &[String],
) -> Vec<Clause> {
    debug_assert_eq!(chain.len() + 1, inputs.len());
    let mut clauses = two_input(&chain[0], (&inputs[0], &inputs[1]));
    for i in 1..chain.len() {
        clauses.extend(two_input(&chain[i], (&chain[i - 1], &inputs[i + 1])));
    }
    clauses
}

// TESTS
// ================================================================================================
