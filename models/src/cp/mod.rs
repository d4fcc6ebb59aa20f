//! MiniZinc declaration and constraint records for the constraint-programming backend.
//!
//! The dialect targets a solver profile carrying the `modadd`, `or`, `and`, `table`, `LShift`
//! and `Eq` builtins. Rendering is normalized: one space after `:` in declarations, spaces
//! around `=`, products unspaced, and `, ` between arguments.

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

use itertools::Itertools;

// ELEMENT REFERENCES
// ================================================================================================

/// A reference to one element of a declared array, rendered as `name[index]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementRef {
    pub array: String,
    pub index: usize,
}

impl ElementRef {
    pub fn new(array: impl Into<String>, index: usize) -> Self {
        Self { array: array.into(), index }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.array, self.index)
    }
}

// DECLARATIONS
// ================================================================================================

/// A MiniZinc variable-array declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CpDeclaration {
    /// `array[0..len-1] of var 0..1: name;`
    BoolArray { name: String, len: usize },
    /// `array[1..len-1] of var 0..1: name;` carry arrays skip the top bit.
    CarryArray { name: String, len: usize },
    /// `array[0..len-1] of var 0..1: name = array1d(0..len-1,[v, v, ...]);`
    BoolArrayInit { name: String, values: Vec<u8> },
    /// `array[0..len-1] of var 0..1: name = LShift(source,1);`
    BoolArrayLShift { name: String, len: usize, source: String },
    /// `array[0..len-1] of var 0..1: name = Eq(a, b, c);`
    BoolArrayEq { name: String, len: usize, args: [String; 3] },
    /// `array[0..len-1] of var int: name;`
    IntArray { name: String, len: usize },
}

impl CpDeclaration {
    /// The declared array's name.
    pub fn name(&self) -> &str {
        match self {
            Self::BoolArray { name, .. }
            | Self::CarryArray { name, .. }
            | Self::BoolArrayInit { name, .. }
            | Self::BoolArrayLShift { name, .. }
            | Self::BoolArrayEq { name, .. }
            | Self::IntArray { name, .. } => name,
        }
    }
}

impl fmt::Display for CpDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoolArray { name, len } => {
                write!(f, "array[0..{}] of var 0..1: {name};", len - 1)
            },
            Self::CarryArray { name, len } => {
                write!(f, "array[1..{}] of var 0..1: {name};", len - 1)
            },
            Self::BoolArrayInit { name, values } => {
                write!(
                    f,
                    "array[0..{top}] of var 0..1: {name} = array1d(0..{top},[{values}]);",
                    top = values.len() - 1,
                    values = values.iter().join(", "),
                )
            },
            Self::BoolArrayLShift { name, len, source } => {
                write!(f, "array[0..{}] of var 0..1: {name} = LShift({source},1);", len - 1)
            },
            Self::BoolArrayEq { name, len, args } => {
                write!(
                    f,
                    "array[0..{}] of var 0..1: {name} = Eq({}, {}, {});",
                    len - 1,
                    args[0],
                    args[1],
                    args[2],
                )
            },
            Self::IntArray { name, len } => {
                write!(f, "array[0..{}] of var int: {name};", len - 1)
            },
        }
    }
}

// CONSTRAINTS
// ================================================================================================

/// A MiniZinc constraint over declared arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CpConstraint {
    /// `constraint lhs = rhs;` wiring one array element to another.
    ElementEq { lhs: ElementRef, rhs: ElementRef },
    /// `constraint lhs = (t + t + ...) mod 2;` where each term is a product of elements.
    ///
    /// An empty product renders as the constant `1`.
    Mod2Sum { lhs: ElementRef, terms: Vec<Vec<ElementRef>> },
    /// `constraint name(arg, arg, ...);` invoking a solver builtin over whole arrays.
    Relation { name: String, args: Vec<String> },
    /// `constraint table(e++e++...,table_name);`
    Table { entries: Vec<ElementRef>, table: String },
    /// `constraint p[slot] = sum(array);`
    ProbabilitySum { slot: usize, array: String },
    /// The guarded parity condition of two-term addition differentials, conjoined with its
    /// weight assignment `p[slot] = 100*width - 100 * sum(eq_array)`.
    XorDifferentialProbability {
        width: usize,
        input_1: String,
        input_2: String,
        output: String,
        shifted_input_2: String,
        eq_array: String,
        slot: usize,
    },
}

impl fmt::Display for CpConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElementEq { lhs, rhs } => write!(f, "constraint {lhs} = {rhs};"),
            Self::Mod2Sum { lhs, terms } => {
                let sum = terms
                    .iter()
                    .map(|product| {
                        if product.is_empty() {
                            "1".into()
                        } else {
                            product.iter().join("*")
                        }
                    })
                    .join(" + ");
                write!(f, "constraint {lhs} = ({sum}) mod 2;")
            },
            Self::Relation { name, args } => {
                write!(f, "constraint {name}({});", args.iter().join(", "))
            },
            Self::Table { entries, table } => {
                write!(f, "constraint table({},{table});", entries.iter().join("++"))
            },
            Self::ProbabilitySum { slot, array } => {
                write!(f, "constraint p[{slot}] = sum({array});")
            },
            Self::XorDifferentialProbability {
                width,
                input_1,
                input_2,
                output,
                shifted_input_2,
                eq_array,
                slot,
            } => {
                write!(
                    f,
                    "constraint forall(j in 0..{top})(if {eq_array}[j] = 1 then \
                     (sum([{input_1}[j], {input_2}[j], {output}[j]]) mod 2) = \
                     {shifted_input_2}[j] else true endif) /\\ \
                     p[{slot}] = {total}-100 * sum({eq_array});",
                    top = width - 1,
                    total = 100 * width,
                )
            },
        }
    }
}

// ARTIFACT
// ================================================================================================

/// Declarations and constraints produced by one component's CP encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpArtifact {
    pub declarations: Vec<CpDeclaration>,
    pub constraints: Vec<CpConstraint>,
}

impl CpArtifact {
    pub fn new(declarations: Vec<CpDeclaration>, constraints: Vec<CpConstraint>) -> Self {
        Self { declarations, constraints }
    }

    /// Renders declarations then constraints, one per line.
    pub fn render(&self) -> String {
        use core::fmt::Write;
        let mut out = String::new();
        for declaration in &self.declarations {
            let _ = writeln!(out, "{declaration}");
        }
        for constraint in &self.constraints {
            let _ = writeln!(out, "{constraint}");
        }
        out
    }
}

// MODEL CONTEXT
// ================================================================================================

/// Mutable model-wide state threaded through probability-aware CP encoders.
///
/// Tracks the next free slot of the global weight array `p`, which component owns which slot,
/// and which arrays already carry a left-shifted copy so repeated operands are declared once.
#[derive(Debug, Clone, Default)]
pub struct CpModelContext {
    weight_slot: usize,
    component_probability: BTreeMap<String, usize>,
    lshifted: Vec<String>,
}

impl CpModelContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the next weight slot for `component_id` and returns it.
    pub fn claim_weight_slot(&mut self, component_id: &str) -> usize {
        let slot = self.weight_slot;
        self.component_probability.insert(component_id.into(), slot);
        self.weight_slot += 1;
        slot
    }

    /// Number of weight slots claimed so far.
    pub fn weight_slot_count(&self) -> usize {
        self.weight_slot
    }

    /// The weight slot claimed by `component_id`, if any.
    pub fn weight_slot_of(&self, component_id: &str) -> Option<usize> {
        self.component_probability.get(component_id).copied()
    }

    /// Returns true the first time `array` is seen, marking it as carrying a shifted copy.
    pub fn mark_shifted(&mut self, array: &str) -> bool {
        if self.lshifted.iter().any(|seen| seen == array) {
            false
        } else {
            self.lshifted.push(array.into());
            true
        }
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn declarations_render_normalized() {
        let decl = CpDeclaration::BoolArray { name: "pre_modadd_0_1_0".to_string(), len: 16 };
        assert_eq!(decl.to_string(), "array[0..15] of var 0..1: pre_modadd_0_1_0;");

        let carry = CpDeclaration::CarryArray { name: "carry_modadd_0_1".to_string(), len: 16 };
        assert_eq!(carry.to_string(), "array[1..15] of var 0..1: carry_modadd_0_1;");

        let constant = CpDeclaration::BoolArrayInit {
            name: "constant_modsub_0_7".to_string(),
            values: vec![0, 0, 0, 1],
        };
        assert_eq!(
            constant.to_string(),
            "array[0..3] of var 0..1: constant_modsub_0_7 = array1d(0..3,[0, 0, 0, 1]);"
        );

        let shift = CpDeclaration::BoolArrayLShift {
            name: "Shi_pre_modadd_0_1_0".to_string(),
            len: 16,
            source: "pre_modadd_0_1_0".to_string(),
        };
        assert_eq!(
            shift.to_string(),
            "array[0..15] of var 0..1: Shi_pre_modadd_0_1_0 = LShift(pre_modadd_0_1_0,1);"
        );
    }

    #[test]
    fn mod2_sum_renders_products_and_constants() {
        let carry = CpConstraint::Mod2Sum {
            lhs: ElementRef::new("carry_modadd_0_1", 1),
            terms: vec![
                vec![ElementRef::new("x", 1), ElementRef::new("y", 1)],
                vec![ElementRef::new("x", 1), ElementRef::new("carry_modadd_0_1", 2)],
                vec![ElementRef::new("carry_modadd_0_1", 2), ElementRef::new("y", 1)],
            ],
        };
        assert_eq!(
            carry.to_string(),
            "constraint carry_modadd_0_1[1] = \
             (x[1]*y[1] + x[1]*carry_modadd_0_1[2] + carry_modadd_0_1[2]*y[1]) mod 2;"
        );

        let complement = CpConstraint::Mod2Sum {
            lhs: ElementRef::new("pre_minus_pre_modsub_0_7_1", 31),
            terms: vec![vec![ElementRef::new("pre_modsub_0_7_1", 31)], vec![]],
        };
        assert_eq!(
            complement.to_string(),
            "constraint pre_minus_pre_modsub_0_7_1[31] = (pre_modsub_0_7_1[31] + 1) mod 2;"
        );
    }

    #[test]
    fn relation_and_table_render() {
        let relation = CpConstraint::Relation {
            name: "modadd".to_string(),
            args: vec![
                "pre_modsub_0_7_0".to_string(),
                "minus_pre_modsub_0_7_1".to_string(),
                "modsub_0_7".to_string(),
            ],
        };
        assert_eq!(
            relation.to_string(),
            "constraint modadd(pre_modsub_0_7_0, minus_pre_modsub_0_7_1, modsub_0_7);"
        );

        let table = CpConstraint::Table {
            entries: vec![
                ElementRef::new("or_39_6_i", 0),
                ElementRef::new("or_39_6_i", 32),
                ElementRef::new("or_39_6_o", 0),
                ElementRef::new("p_or_39_6", 0),
            ],
            table: "and2inputs_LAT".to_string(),
        };
        assert_eq!(
            table.to_string(),
            "constraint table(or_39_6_i[0]++or_39_6_i[32]++or_39_6_o[0]++p_or_39_6[0],\
             and2inputs_LAT);"
        );
    }

    #[test]
    fn differential_probability_renders_guarded_parity() {
        let constraint = CpConstraint::XorDifferentialProbability {
            width: 16,
            input_1: "pre_modadd_0_1_1".to_string(),
            input_2: "pre_modadd_0_1_0".to_string(),
            output: "modadd_0_1".to_string(),
            shifted_input_2: "Shi_pre_modadd_0_1_0".to_string(),
            eq_array: "eq_modadd_0_1".to_string(),
            slot: 0,
        };
        assert_eq!(
            constraint.to_string(),
            "constraint forall(j in 0..15)(if eq_modadd_0_1[j] = 1 then \
             (sum([pre_modadd_0_1_1[j], pre_modadd_0_1_0[j], modadd_0_1[j]]) mod 2) = \
             Shi_pre_modadd_0_1_0[j] else true endif) /\\ \
             p[0] = 1600-100 * sum(eq_modadd_0_1);"
        );
    }

    #[test]
    fn context_claims_slots_in_order_and_deduplicates_shifts() {
        let mut ctx = CpModelContext::new();
        assert_eq!(ctx.claim_weight_slot("modadd_0_1"), 0);
        assert_eq!(ctx.claim_weight_slot("modadd_1_2"), 1);
        assert_eq!(ctx.weight_slot_of("modadd_0_1"), Some(0));
        assert_eq!(ctx.weight_slot_count(), 2);

        assert!(ctx.mark_shifted("pre_modadd_0_1_0"));
        assert!(!ctx.mark_shifted("pre_modadd_0_1_0"));
        assert!(ctx.mark_shifted("modadd_0_1"));
    }
}
