//! Solver-backend constraint encoders for trailforge cipher components.
//!
//! A component (see [`trailforge_core::Component`]) describes one bit-level operation of a
//! cipher's data-flow graph. This crate compiles the two non-linear component families,
//! modular arithmetic (MODADD/MODSUB) and multi-input logical operators (OR/AND), into
//! equivalent constraint systems for four solver back-ends:
//!
//! - [`sat`]: DIMACS-like CNF clauses (with an optional CryptoMiniSat native-XOR form);
//! - [`smt`]: SMT-LIB boolean assertions;
//! - [`cp`]: MiniZinc-dialect array declarations and constraints;
//! - the algebraic backend: polynomials over GF(2), implicitly asserted zero.
//!
//! All four encodings of a component are bit-exact equivalent; constraints are built as typed
//! records and rendered to text only at the serialization boundary. Solver invocation, output
//! parsing and trail reconstruction live outside this crate.

#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod cp;
pub mod sat;
pub mod smt;

mod artifact;
pub use artifact::{AlgebraicArtifact, Artifact, SatArtifact, SmtArtifact};

mod components;
pub use components::{ConstraintEncoder, LogicalComponent, ModularComponent};

// RE-EXPORTS
// ================================================================================================

pub use trailforge_core::{
    Component, ComponentDescription, EncodeError, OperationKind, algebra::Polynomial,
};
