//! CNF clause records for the boolean-satisfiability backend.
//!
//! A clause is an OR (or, for the CryptoMiniSat dialect, an XOR) of signed literals over named
//! boolean variables. Clauses are built as typed records and rendered to the DIMACS-like
//! textual form (`-a b c`, XOR clauses prefixed with `x`) only at the serialization boundary.

use alloc::{collections::BTreeMap, string::String};
use core::fmt;

use smallvec::SmallVec;

pub mod encoders;

// LITERAL
// ================================================================================================

/// A possibly negated occurrence of a named boolean variable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Literal {
    id: String,
    negated: bool,
}

impl Literal {
    /// Returns a positive literal over the named variable.
    pub fn pos(id: impl Into<String>) -> Self {
        Self { id: id.into(), negated: false }
    }

    /// Returns a negated literal over the named variable.
    pub fn neg(id: impl Into<String>) -> Self {
        Self { id: id.into(), negated: true }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Evaluates the literal under a 0/1 assignment. Unassigned variables evaluate to 0.
    pub fn evaluate(&self, assignment: &BTreeMap<String, u8>) -> bool {
        let bit = assignment.get(&self.id).copied().unwrap_or(0) & 1;
        (bit == 1) != self.negated
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "-")?;
        }
        f.write_str(&self.id)
    }
}

// CLAUSE
// ================================================================================================

/// A single CNF clause: a disjunction of literals, or an XOR of literals when targeting the
/// CryptoMiniSat native-XOR dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    literals: SmallVec<[Literal; 4]>,
    is_xor: bool,
}

impl Clause {
    /// Returns an OR clause over the given literals.
    pub fn or(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self { literals: literals.into_iter().collect(), is_xor: false }
    }

    /// Returns a native XOR clause over the given literals; satisfied when the literals XOR
    /// to true.
    pub fn xor(literals: impl IntoIterator<Item = Literal>) -> Self {
        Self { literals: literals.into_iter().collect(), is_xor: true }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn is_xor(&self) -> bool {
        self.is_xor
    }

    /// Evaluates the clause under a 0/1 assignment.
    pub fn evaluate(&self, assignment: &BTreeMap<String, u8>) -> bool {
        if self.is_xor {
            self.literals.iter().fold(false, |acc, lit| acc ^ lit.evaluate(assignment))
        } else {
            self.literals.iter().any(|lit| lit.evaluate(assignment))
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_xor {
            write!(f, "x")?;
        }
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 || self.is_xor {
                write!(f, " ")?;
            }
            write!(f, "{literal}")?;
        }
        Ok(())
    }
}

/// Returns true if every clause in the slice is satisfied by the assignment.
pub fn all_satisfied(clauses: &[Clause], assignment: &BTreeMap<String, u8>) -> bool {
    clauses.iter().all(|clause| clause.evaluate(assignment))
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn clauses_render_dimacs_like_lines() {
        let clause = Clause::or([
            Literal::neg("modadd_0_1_015"),
            Literal::pos("rot_0_0_015"),
            Literal::pos("plaintext_031"),
        ]);
        assert_eq!(clause.to_string(), "-modadd_0_1_015 rot_0_0_015 plaintext_031");
    }

    #[test]
    fn xor_clauses_carry_the_x_prefix() {
        let clause = Clause::xor([
            Literal::neg("modadd_0_1_014"),
            Literal::pos("rot_0_0_014"),
            Literal::pos("plaintext_030"),
            Literal::pos("carry_000_modadd_0_1_014"),
        ]);
        assert_eq!(
            clause.to_string(),
            "x -modadd_0_1_014 rot_0_0_014 plaintext_030 carry_000_modadd_0_1_014"
        );
    }

    #[test]
    fn xor_clause_evaluates_to_parity() {
        let clause = Clause::xor([Literal::neg("a"), Literal::pos("b")]);
        let mut assignment = BTreeMap::new();
        assignment.insert("a".to_string(), 1);
        assignment.insert("b".to_string(), 1);
        // -a xor b = 0 xor 1 = 1
        assert!(clause.evaluate(&assignment));
        assignment.insert("a".to_string(), 0);
        assert!(!clause.evaluate(&assignment));
    }
}
