use alloc::{string::String, vec::Vec};

use trailforge_core::algebra::Polynomial;

use crate::{sat::Clause, smt::SmtAssertion};

// ARTIFACT
// ================================================================================================

/// Output of a single encode call: the newly introduced variable names (carries, intermediates,
/// sub-chain outputs, final outputs) in deterministic order, and the backend-native constraints.
///
/// An artifact is created fresh per encode call and immutable once returned; the caller merges
/// it into the whole-cipher constraint system keyed by variable id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Artifact<C> {
    variables: Vec<String>,
    constraints: Vec<C>,
}

impl<C> Artifact<C> {
    pub fn new(variables: Vec<String>, constraints: Vec<C>) -> Self {
        Self { variables, constraints }
    }

    /// Names of every variable this encode call introduced, in deterministic order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// The ordered backend-native constraint records.
    pub fn constraints(&self) -> &[C] {
        &self.constraints
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<C>) {
        (self.variables, self.constraints)
    }
}

/// Artifact of the CNF backend.
pub type SatArtifact = Artifact<Clause>;

/// Artifact of the SMT-LIB backend.
pub type SmtArtifact = Artifact<SmtAssertion>;

/// Artifact of the algebraic backend: polynomials over GF(2), each asserted equal to zero.
pub type AlgebraicArtifact = Artifact<Polynomial>;
