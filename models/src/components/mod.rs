//! Component families and their per-backend encoders.
//!
//! A component family wraps a validated [`Component`] and knows how to express its operation in
//! each backend formalism. All wiring and arity checks happen at construction, so every encode
//! method is infallible and returns a complete artifact.

use alloc::vec::Vec;

use trailforge_core::{Component, naming};

use crate::{
    AlgebraicArtifact, SatArtifact, SmtArtifact,
    cp::{CpArtifact, CpConstraint, CpDeclaration, ElementRef},
};

mod logical;
mod modular;

pub use logical::LogicalComponent;
pub use modular::ModularComponent;

/// Declares one `pre_{id}_{i}` staging array per operand and wires each element to the upstream
/// bit it selects.
pub(crate) fn cp_staging(
    component: &Component,
    declarations: &mut Vec<CpDeclaration>,
    constraints: &mut Vec<CpConstraint>,
) {
    let w = component.output_bit_size();
    for (i, chunk) in component.cp_input_refs().chunks(w).enumerate() {
        let pre = naming::cp_pre_array(component.id(), i);
        declarations.push(CpDeclaration::BoolArray { name: pre.clone(), len: w });
        for (j, (link, pos)) in chunk.iter().enumerate() {
            constraints.push(CpConstraint::ElementEq {
                lhs: ElementRef::new(&pre, j),
                rhs: ElementRef::new(link.clone(), *pos),
            });
        }
    }
}

// CONSTRAINT ENCODER TRAIT
// ================================================================================================

/// The encoding surface shared by every component family.
///
/// Family-specific encodings (native-XOR clauses, differential and linear probability
/// constraints) live on the concrete types.
pub trait ConstraintEncoder {
    /// The wrapped component.
    fn component(&self) -> &Component;

    /// CNF clauses over named boolean variables.
    fn sat_constraints(&self) -> SatArtifact;

    /// SMT-LIB boolean assertions.
    fn smt_constraints(&self) -> SmtArtifact;

    /// MiniZinc declarations and constraints.
    fn cp_constraints(&self) -> CpArtifact;

    /// GF(2) polynomials, each implicitly asserted equal to zero.
    fn algebraic_polynomials(&self) -> AlgebraicArtifact;
}
