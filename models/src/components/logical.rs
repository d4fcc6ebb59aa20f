//! Multi-input OR and AND encoders.
//!
//! Both operators share one reduction pattern: each output bit combines the bit at the same
//! offset of every operand, folding left through `int_{n:03}_*` intermediates when more than two
//! operands are wired. Only the 2-input relation differs between the two kinds.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use trailforge_core::{Component, EncodeError, OperationKind, algebra::Polynomial, naming};

use super::ConstraintEncoder;
use crate::{
    AlgebraicArtifact, SatArtifact, SmtArtifact,
    cp::{CpArtifact, CpConstraint, CpDeclaration, CpModelContext, ElementRef},
    sat::{Clause, encoders},
    smt::{self, SmtAssertion, SmtExpr},
};

// SIGN TABLES
// ================================================================================================

// 2-input linear approximation sign tables, indexed [first mask][second mask][output mask]
const OR_LAT: [[[i64; 2]; 2]; 2] = [[[1, -1], [0, 1]], [[0, 1], [0, 1]]];
const AND_LAT: [[[i64; 2]; 2]; 2] = [[[1, 1], [0, 1]], [[0, 1], [0, -1]]];

// LOGICAL COMPONENT
// ================================================================================================

/// Encoders for OR and AND components.
#[derive(Debug)]
pub struct LogicalComponent {
    component: Component,
}

impl LogicalComponent {
    /// Wraps a component of logical kind; any other kind is rejected.
    pub fn new(component: Component) -> Result<Self, EncodeError> {
        if !component.description().kind.is_logical() {
            return Err(EncodeError::UnsupportedOperation {
                component: component.id().to_string(),
                kind: component.description().kind.to_string(),
                family: "logical",
            });
        }
        Ok(Self { component })
    }

    fn width(&self) -> usize {
        self.component.output_bit_size()
    }

    fn two_input_cnf(&self) -> fn(&str, (&str, &str)) -> Vec<Clause> {
        match self.component.description().kind {
            OperationKind::And => encoders::cnf_and,
            _ => encoders::cnf_or,
        }
    }

    fn nary_smt(&self, args: Vec<SmtExpr>) -> SmtExpr {
        match self.component.description().kind {
            OperationKind::And => SmtExpr::And(args),
            _ => SmtExpr::Or(args),
        }
    }

    fn fold_polynomial(&self, acc: Polynomial, operand: Polynomial) -> Polynomial {
        match self.component.description().kind {
            OperationKind::And => acc * operand,
            _ => &acc * &operand + acc + operand,
        }
    }

    /// The bits feeding output bit `i`: offset `i` of every operand word.
    fn column(&self, i: usize) -> Vec<String> {
        let w = self.width();
        self.component.input_bit_ids().into_iter().skip(i).step_by(w).collect()
    }

    // LINEAR ANALYSIS
    // --------------------------------------------------------------------------------------------

    /// Per-bit linear-mask propagation through the precomputed `and{k}inputs_LAT` table, plus
    /// the weight sum claiming this component's slot of the global `p` array.
    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    pub fn cp_xor_linear_mask_propagation_constraints(
        &self,
        ctx: &mut CpModelContext,
    ) -> CpArtifact {
        let w = self.width();
        let k = self.component.operand_count();
        let id = self.component.id();
        let weight = naming::cp_weight_array(id);
        let input_mask = naming::cp_input_mask_array(id);
        let output_mask = naming::cp_output_mask_array(id);
        let declarations = vec![
            CpDeclaration::IntArray { name: weight.clone(), len: w },
            CpDeclaration::BoolArray { name: input_mask.clone(), len: k * w },
            CpDeclaration::BoolArray { name: output_mask.clone(), len: w },
        ];
        let mut constraints = Vec::new();
        for i in 0..w {
            let mut entries: Vec<ElementRef> =
                (0..k).map(|j| ElementRef::new(input_mask.clone(), i + w * j)).collect();
            entries.push(ElementRef::new(output_mask.clone(), i));
            entries.push(ElementRef::new(weight.clone(), i));
            constraints
                .push(CpConstraint::Table { entries, table: naming::lat_table_name(k) });
        }
        let slot = ctx.claim_weight_slot(id);
        constraints.push(CpConstraint::ProbabilitySum { slot, array: weight });
        CpArtifact::new(declarations, constraints)
    }

    /// Sign of a fixed linear approximation: the product over output bits of the LAT entry
    /// selected by the two input mask bits and the output mask bit. Assumes two operands.
    pub fn generic_sign_linear_constraints(&self, inputs: &[u8], outputs: &[u8]) -> i64 {
        let lat = match self.component.description().kind {
            OperationKind::And => AND_LAT,
            _ => OR_LAT,
        };
        let half = self.component.input_bit_size() / 2;
        let mut sign = 1;
        for i in 0..self.width() {
            sign *= lat[inputs[i] as usize][inputs[half + i] as usize][outputs[i] as usize];
        }
        sign
    }
}

// CONSTRAINT ENCODER IMPLEMENTATION
// ================================================================================================

impl ConstraintEncoder for LogicalComponent {
    fn component(&self) -> &Component {
        &self.component
    }

    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    fn sat_constraints(&self) -> SatArtifact {
        let k = self.component.operand_count();
        let outputs = self.component.output_bit_ids();
        let mut variables = outputs.clone();
        let mut clauses = Vec::new();
        for (i, output) in outputs.iter().enumerate() {
            let mut chain: Vec<String> =
                (0..k - 2).map(|n| naming::logical_intermediate_id(n, output)).collect();
            variables.extend(chain.iter().cloned());
            chain.push(output.clone());
            clauses.extend(encoders::cnf_operation_seq(
                self.two_input_cnf(),
                &chain,
                &self.column(i),
            ));
        }
        SatArtifact::new(variables, clauses)
    }

    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    fn smt_constraints(&self) -> SmtArtifact {
        let outputs = self.component.output_bit_ids();
        let assertions = outputs
            .iter()
            .enumerate()
            .map(|(i, output)| {
                let args = self.column(i).iter().map(smt::var).collect();
                SmtAssertion(smt::equivalent(smt::var(output), self.nary_smt(args)))
            })
            .collect();
        SmtArtifact::new(outputs, assertions)
    }

    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    fn cp_constraints(&self) -> CpArtifact {
        let w = self.width();
        let k = self.component.operand_count();
        let id = self.component.id();
        let relation = self.component.description().kind.label().to_string();
        let mut declarations =
            vec![CpDeclaration::BoolArray { name: id.to_string(), len: w }];
        let mut constraints = Vec::new();
        super::cp_staging(&self.component, &mut declarations, &mut constraints);
        for i in 0..k - 2 {
            declarations.push(CpDeclaration::BoolArray {
                name: naming::cp_temp_array(id, i),
                len: w,
            });
        }
        let pre = |i: usize| naming::cp_pre_array(id, i);
        let temp = |i: usize| naming::cp_temp_array(id, i);
        if k == 2 {
            constraints.push(CpConstraint::Relation {
                name: relation,
                args: vec![pre(0), pre(1), id.to_string()],
            });
        } else {
            constraints.push(CpConstraint::Relation {
                name: relation.clone(),
                args: vec![pre(0), pre(1), temp(0)],
            });
            for i in 1..k - 2 {
                constraints.push(CpConstraint::Relation {
                    name: relation.clone(),
                    args: vec![pre(i + 1), temp(i - 1), temp(i)],
                });
            }
            constraints.push(CpConstraint::Relation {
                name: relation,
                args: vec![pre(k - 1), temp(k - 3), id.to_string()],
            });
        }
        CpArtifact::new(declarations, constraints)
    }

    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    fn algebraic_polynomials(&self) -> AlgebraicArtifact {
        let w = self.width();
        let k = self.component.operand_count();
        let id = self.component.id();
        let input_names: Vec<String> =
            (0..k * w).map(|i| naming::ring_input_var(id, i)).collect();
        let output_names: Vec<String> = (0..w).map(|i| naming::ring_output_var(id, i)).collect();

        // fold seeded from the first operand's bits
        let mut folded: Vec<Polynomial> =
            input_names[..w].iter().map(Polynomial::var).collect();
        for word in 1..k {
            for i in 0..w {
                let operand = Polynomial::var(&input_names[word * w + i]);
                folded[i] = self.fold_polynomial(folded[i].clone(), operand);
            }
        }
        let polynomials = output_names
            .iter()
            .zip(folded)
            .map(|(output, fold)| Polynomial::var(output) + fold)
            .collect();

        let mut variables = input_names;
        variables.extend(output_names);
        AlgebraicArtifact::new(variables, polynomials)
    }
}

// TESTS
// ================================================================================================
