//! SMT-LIB expression records for the satisfiability-modulo-theories backend.
//!
//! Constraints are equivalences over the boolean connectives `and`, `or`, `xor`, `not` (plus
//! `distinct` and `=>` where the two's-complement chain and the weight counter need them),
//! wrapped in `(assert ...)` at the serialization boundary. The theory supports n-ary XOR
//! directly, so the SMT encodings need no auxiliary intermediate variables.

use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use derive_more::From;

pub mod model;

// EXPRESSION
// ================================================================================================

/// A boolean SMT-LIB expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmtExpr {
    Var(String),
    Not(Box<SmtExpr>),
    And(Vec<SmtExpr>),
    Or(Vec<SmtExpr>),
    Xor(Vec<SmtExpr>),
    Equivalent(Box<SmtExpr>, Box<SmtExpr>),
    Distinct(Box<SmtExpr>, Box<SmtExpr>),
    Implies(Box<SmtExpr>, Box<SmtExpr>),
}

impl SmtExpr {
    /// Evaluates the expression under a 0/1 assignment. Unassigned variables evaluate to false.
    pub fn evaluate(&self, assignment: &BTreeMap<String, u8>) -> bool {
        match self {
            Self::Var(id) => assignment.get(id).copied().unwrap_or(0) & 1 == 1,
            Self::Not(inner) => !inner.evaluate(assignment),
            Self::And(args) => args.iter().all(|arg| arg.evaluate(assignment)),
            Self::Or(args) => args.iter().any(|arg| arg.evaluate(assignment)),
            Self::Xor(args) => args.iter().fold(false, |acc, arg| acc ^ arg.evaluate(assignment)),
            Self::Equivalent(a, b) => a.evaluate(assignment) == b.evaluate(assignment),
            Self::Distinct(a, b) => a.evaluate(assignment) != b.evaluate(assignment),
            Self::Implies(a, b) => !a.evaluate(assignment) || b.evaluate(assignment),
        }
    }
}

impl fmt::Display for SmtExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_nary(f: &mut fmt::Formatter<'_>, op: &str, args: &[SmtExpr]) -> fmt::Result {
            write!(f, "({op}")?;
            for arg in args {
                write!(f, " {arg}")?;
            }
            write!(f, ")")
        }
        match self {
            Self::Var(id) => f.write_str(id),
            Self::Not(inner) => write!(f, "(not {inner})"),
            Self::And(args) => write_nary(f, "and", args),
            Self::Or(args) => write_nary(f, "or", args),
            Self::Xor(args) => write_nary(f, "xor", args),
            Self::Equivalent(a, b) => write!(f, "(= {a} {b})"),
            Self::Distinct(a, b) => write!(f, "(distinct {a} {b})"),
            Self::Implies(a, b) => write!(f, "(=> {a} {b})"),
        }
    }
}

// CONSTRUCTORS
// ================================================================================================

pub fn var(id: impl Into<String>) -> SmtExpr {
    SmtExpr::Var(id.into())
}

pub fn not_of(inner: SmtExpr) -> SmtExpr {
    SmtExpr::Not(Box::new(inner))
}

pub fn and_of(args: impl IntoIterator<Item = SmtExpr>) -> SmtExpr {
    SmtExpr::And(args.into_iter().collect())
}

pub fn or_of(args: impl IntoIterator<Item = SmtExpr>) -> SmtExpr {
    SmtExpr::Or(args.into_iter().collect())
}

pub fn xor_of(args: impl IntoIterator<Item = SmtExpr>) -> SmtExpr {
    SmtExpr::Xor(args.into_iter().collect())
}

pub fn equivalent(a: SmtExpr, b: SmtExpr) -> SmtExpr {
    SmtExpr::Equivalent(Box::new(a), Box::new(b))
}

pub fn distinct(a: SmtExpr, b: SmtExpr) -> SmtExpr {
    SmtExpr::Distinct(Box::new(a), Box::new(b))
}

pub fn implies(a: SmtExpr, b: SmtExpr) -> SmtExpr {
    SmtExpr::Implies(Box::new(a), Box::new(b))
}

/// The ripple-carry relation `(or (and x y) (and x carry_next) (and y carry_next))`.
pub fn carry(x: &str, y: &str, carry_next: &str) -> SmtExpr {
    or_of([
        and_of([var(x), var(y)]),
        and_of([var(x), var(carry_next)]),
        and_of([var(y), var(carry_next)]),
    ])
}

// ASSERTION
// ================================================================================================

/// An asserted expression; renders as `(assert ...)`.
#[derive(Debug, Clone, PartialEq, Eq, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmtAssertion(pub SmtExpr);

impl SmtAssertion {
    pub fn expr(&self) -> &SmtExpr {
        &self.0
    }

    /// Evaluates the asserted expression under a 0/1 assignment.
    pub fn holds(&self, assignment: &BTreeMap<String, u8>) -> bool {
        self.0.evaluate(assignment)
    }
}

impl fmt::Display for SmtAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(assert {})", self.0)
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn carry_renders_like_the_smt_lib_dialect() {
        let assertion = SmtAssertion(equivalent(
            var("carry_000_modadd_0_1_000"),
            carry("shift_0_0_001", "key_001", "carry_000_modadd_0_1_001"),
        ));
        assert_eq!(
            assertion.to_string(),
            "(assert (= carry_000_modadd_0_1_000 (or (and shift_0_0_001 key_001) \
             (and shift_0_0_001 carry_000_modadd_0_1_001) \
             (and key_001 carry_000_modadd_0_1_001))))"
        );
    }

    #[test]
    fn nary_xor_renders_flat() {
        let expr = xor_of([var("a"), var("b"), var("c")]);
        assert_eq!(expr.to_string(), "(xor a b c)");
    }

    #[test]
    fn evaluation_matches_boolean_semantics() {
        let expr = equivalent(var("r"), xor_of([var("a"), var("b"), var("c")]));
        for pattern in 0..16u8 {
            let assignment: BTreeMap<String, u8> = [
                ("r".to_string(), pattern >> 3 & 1),
                ("a".to_string(), pattern >> 2 & 1),
                ("b".to_string(), pattern >> 1 & 1),
                ("c".to_string(), pattern & 1),
            ]
            .into_iter()
            .collect();
            let expected = (pattern >> 3 & 1) == (pattern >> 2 & 1) ^ (pattern >> 1 & 1) ^ (pattern & 1);
            assert_eq!(expr.evaluate(&assignment), expected);
        }
    }

    #[test]
    fn distinct_is_inequality() {
        let expr = distinct(var("a"), var("b"));
        let assignment: BTreeMap<String, u8> =
            [("a".to_string(), 1), ("b".to_string(), 0)].into_iter().collect();
        assert!(expr.evaluate(&assignment));
        assert_eq!(expr.to_string(), "(distinct a b)");
    }
}
