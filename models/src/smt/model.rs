//! Model-level SMT helpers: constant declarations, value-fixing constraints, and the
//! sequential-counter cardinality encoding used to bound solution weight.

use alloc::{format, string::String, vec, vec::Vec};

use trailforge_core::{EncodeError, naming};

use super::{SmtAssertion, SmtExpr, and_of, implies, not_of, or_of, var};

// DECLARATIONS
// ================================================================================================

/// Renders one `(declare-const ... Bool)` line per variable, in input order.
pub fn declarations<'a>(variables: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    variables
        .into_iter()
        .map(|variable| format!("(declare-const {variable} Bool)"))
        .collect()
}

// FIXED VARIABLES
// ================================================================================================

/// How a fixed-variable constraint binds the named bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FixKind {
    /// Every listed bit must equal its value.
    Equal,
    /// At least one listed bit must differ from its value.
    NotEqual,
}

/// A request to pin (or exclude) a concrete bit pattern on a component's bits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedVariable {
    pub component_id: String,
    pub bit_positions: Vec<usize>,
    pub bit_values: Vec<u8>,
    pub kind: FixKind,
}

/// Builds the assertions binding each [`FixedVariable`].
///
/// An `Equal` fix contributes one assertion per bit. A `NotEqual` fix contributes a single
/// disjunction of flipped literals, satisfied exactly when the bits differ from the pattern
/// somewhere. Bit positions and values are paired in order; a fix listing more positions than
/// values (or vice versa) is rejected before any assertion is produced.
pub fn fix_variable_constraints(
    fixed: &[FixedVariable],
) -> Result<Vec<SmtAssertion>, EncodeError> {
    for fix in fixed {
        if fix.bit_positions.len() != fix.bit_values.len() || fix.bit_positions.is_empty() {
            return Err(EncodeError::MalformedWiring { component: fix.component_id.clone() });
        }
    }
    let mut constraints = Vec::new();
    for fix in fixed {
        let literals = fix.bit_positions.iter().zip(&fix.bit_values).map(|(&position, &value)| {
            let literal = var(naming::bit_id(&fix.component_id, position));
            match (fix.kind, value & 1) {
                (FixKind::Equal, 1) | (FixKind::NotEqual, 0) => literal,
                _ => not_of(literal),
            }
        });
        match fix.kind {
            FixKind::Equal => constraints.extend(literals.map(SmtAssertion)),
            FixKind::NotEqual => constraints.push(SmtAssertion(or_of(literals))),
        }
    }
    Ok(constraints)
}

// SEQUENTIAL COUNTER
// ================================================================================================

/// Encodes `sum(hw) <= weight` over boolean weight variables with Sinz's sequential counter.
///
/// Introduces `(n - 1) * weight` dummy variables named `{dummy_id}_{i}_{j}`. Weight 0
/// short-circuits to one negation per weight variable, and a bound at or above the variable
/// count is trivially true and produces nothing. Returns the dummy variable ids (flattened row
/// by row) alongside the assertions.
pub fn sequential_counter(
    hw: &[String],
    weight: usize,
    dummy_id: &str,
) -> (Vec<String>, Vec<SmtAssertion>) {
    if weight == 0 {
        let negations = hw.iter().map(|id| SmtAssertion(not_of(var(id.clone())))).collect();
        return (Vec::new(), negations);
    }
    if weight >= hw.len() {
        return (Vec::new(), Vec::new());
    }
    sequential_counter_algorithm(hw.iter().map(|id| var(id.clone())).collect(), weight, dummy_id)
}

/// Encodes `sum(hw) >= weight` by bounding the count of unset weight variables.
///
/// A weight equal to the variable count forces every variable instead of running the counter,
/// and a weight above the variable count is unsatisfiable and rejected.
pub fn sequential_counter_greater_or_equal(
    hw: &[String],
    weight: usize,
    dummy_id: &str,
) -> Result<(Vec<String>, Vec<SmtAssertion>), EncodeError> {
    if weight > hw.len() {
        return Err(EncodeError::InvalidWeight { requested: weight, available: hw.len() });
    }
    if weight == 0 {
        return Ok((Vec::new(), Vec::new()));
    }
    let complement = hw.len() - weight;
    if complement == 0 {
        let assertions = hw.iter().map(|id| SmtAssertion(var(id.clone()))).collect();
        return Ok((Vec::new(), assertions));
    }
    Ok(sequential_counter_algorithm(
        hw.iter().map(|id| not_of(var(id.clone()))).collect(),
        complement,
        dummy_id,
    ))
}

fn sequential_counter_algorithm(
    hw: Vec<SmtExpr>,
    weight: usize,
    dummy_id: &str,
) -> (Vec<String>, Vec<SmtAssertion>) {
    let n = hw.len();
    debug_assert!(n >= 2 && weight >= 1);
    let dummy: Vec<Vec<String>> = (0..n - 1)
        .map(|i| (0..weight).map(|j| format!("{dummy_id}_{i}_{j}")).collect())
        .collect();

    let mut constraints = vec![SmtAssertion(implies(hw[0].clone(), var(&dummy[0][0])))];
    for j in 1..weight {
        constraints.push(SmtAssertion(not_of(var(&dummy[0][j]))));
    }
    for i in 1..n - 1 {
        constraints.push(SmtAssertion(implies(hw[i].clone(), var(&dummy[i][0]))));
        constraints.push(SmtAssertion(implies(var(&dummy[i - 1][0]), var(&dummy[i][0]))));
        for j in 1..weight {
            let antecedent = and_of([hw[i].clone(), var(&dummy[i - 1][j - 1])]);
            constraints.push(SmtAssertion(implies(antecedent, var(&dummy[i][j]))));
            constraints.push(SmtAssertion(implies(var(&dummy[i - 1][j]), var(&dummy[i][j]))));
        }
        constraints
            .push(SmtAssertion(implies(hw[i].clone(), not_of(var(&dummy[i - 1][weight - 1])))));
    }
    constraints
        .push(SmtAssertion(implies(hw[n - 1].clone(), not_of(var(&dummy[n - 2][weight - 1])))));

    (dummy.into_iter().flatten().collect(), constraints)
}

// TESTS
// ================================================================================================
