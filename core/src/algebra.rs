//! Boolean polynomial ring over GF(2).
//!
//! The algebraic backend expresses every carry and output relation as a polynomial over the
//! field with two elements, implicitly asserted equal to zero. Coefficients are in {0, 1},
//! addition is XOR (x + x = 0) and variables are idempotent (x * x = x), so a polynomial is a
//! set of square-free monomials. This module provides just enough ring arithmetic to build,
//! print and evaluate those polynomials; full ring setup (term orders, ideals) stays outside.

use alloc::{
    collections::{BTreeMap, BTreeSet},
    string::{String, ToString},
};
use core::{
    fmt,
    ops::{Add, Mul},
};

// MONOMIAL
// ================================================================================================

/// A square-free product of variables; the empty product is the constant 1.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monomial {
    vars: BTreeSet<String>,
}

impl Monomial {
    /// Returns the constant monomial 1.
    pub fn one() -> Self {
        Self { vars: BTreeSet::new() }
    }

    /// Returns the monomial consisting of a single variable.
    pub fn var(name: impl Into<String>) -> Self {
        let mut vars = BTreeSet::new();
        vars.insert(name.into());
        Self { vars }
    }

    /// Returns true if this is the constant monomial 1.
    pub fn is_one(&self) -> bool {
        self.vars.is_empty()
    }

    /// Returns the variables of this monomial in lexicographic order.
    pub fn vars(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(String::as_str)
    }

    /// Multiplies two monomials; x * x = x.
    pub fn product(&self, other: &Self) -> Self {
        let vars = self.vars.union(&other.vars).cloned().collect();
        Self { vars }
    }

    /// Evaluates the monomial under a 0/1 assignment. Unassigned variables evaluate to 0.
    pub fn evaluate(&self, assignment: &BTreeMap<String, u8>) -> u8 {
        self.vars
            .iter()
            .map(|var| assignment.get(var).copied().unwrap_or(0) & 1)
            .fold(1, |acc, bit| acc & bit)
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (i, var) in self.vars.iter().enumerate() {
            if i > 0 {
                write!(f, "*")?;
            }
            write!(f, "{var}")?;
        }
        Ok(())
    }
}

// POLYNOMIAL
// ================================================================================================

/// A polynomial over GF(2): an XOR-set of monomials. The empty set is the zero polynomial.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polynomial {
    monomials: BTreeSet<Monomial>,
}

impl Polynomial {
    /// Returns the zero polynomial.
    pub fn zero() -> Self {
        Self { monomials: BTreeSet::new() }
    }

    /// Returns the constant polynomial 1.
    pub fn one() -> Self {
        Monomial::one().into()
    }

    /// Returns the polynomial consisting of a single variable.
    pub fn var(name: impl Into<String>) -> Self {
        Monomial::var(name).into()
    }

    /// Returns true if this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.monomials.is_empty()
    }

    /// Returns the monomials of this polynomial in canonical order.
    pub fn monomials(&self) -> impl Iterator<Item = &Monomial> {
        self.monomials.iter()
    }

    /// Returns the distinct variables appearing in this polynomial.
    pub fn variables(&self) -> BTreeSet<String> {
        self.monomials.iter().flat_map(|m| m.vars().map(ToString::to_string)).collect()
    }

    /// Evaluates the polynomial under a 0/1 assignment. Unassigned variables evaluate to 0.
    pub fn evaluate(&self, assignment: &BTreeMap<String, u8>) -> u8 {
        self.monomials.iter().map(|m| m.evaluate(assignment)).fold(0, |acc, bit| acc ^ bit)
    }

    fn toggle(&mut self, monomial: Monomial) {
        // adding over GF(2): a monomial appearing twice cancels
        if !self.monomials.remove(&monomial) {
            self.monomials.insert(monomial);
        }
    }
}

impl From<Monomial> for Polynomial {
    fn from(monomial: Monomial) -> Self {
        let mut monomials = BTreeSet::new();
        monomials.insert(monomial);
        Self { monomials }
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, other: Polynomial) -> Polynomial {
        let mut result = self;
        for monomial in other.monomials {
            result.toggle(monomial);
        }
        result
    }
}

impl Add<&Polynomial> for Polynomial {
    type Output = Polynomial;

    fn add(self, other: &Polynomial) -> Polynomial {
        let mut result = self;
        for monomial in other.monomials.iter().cloned() {
            result.toggle(monomial);
        }
        result
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, other: Polynomial) -> Polynomial {
        &self * &other
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, other: &Polynomial) -> Polynomial {
        let mut result = Polynomial::zero();
        for lhs in &self.monomials {
            for rhs in &other.monomials {
                result.toggle(lhs.product(rhs));
            }
        }
        result
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, monomial) in self.monomials.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{monomial}")?;
        }
        Ok(())
    }
}

// TESTS
// ================================================================================================
