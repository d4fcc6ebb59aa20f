//! Modular addition and subtraction encoders.
//!
//! Both operations reduce to chains of two-term ripple-carry additions over words of
//! `output_bit_size` bits, most significant bit first: the carry into a bit lives at the next
//! higher index, so chains ripple from index `w-1` toward index 0. A `k`-operand component folds
//! left-associatively through `k-1` stages; subtraction first rewrites each right-hand operand
//! into its two's complement (bitwise complement plus a forced carry-in of one) and then reuses
//! the addition chain unchanged.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use itertools::izip;
use trailforge_core::{Component, EncodeError, OperationKind, algebra::Polynomial, naming};

use super::ConstraintEncoder;
use crate::{
    AlgebraicArtifact, SatArtifact, SmtArtifact,
    cp::{CpArtifact, CpConstraint, CpDeclaration, CpModelContext, ElementRef},
    sat::{Clause, encoders},
    smt::{self, SmtAssertion},
};

// STAGE PLAN
// ================================================================================================

/// One two-term addition stage: `out = x + y` with its ripple-carry auxiliaries.
///
/// `carries` and `intermediates` hold `w - 1` identifiers each (none when `w == 1`); the
/// intermediates only appear in the plain CNF encoding of the 3-input output XOR.
struct AddStage {
    x: Vec<String>,
    y: Vec<String>,
    out: Vec<String>,
    carries: Vec<String>,
    intermediates: Vec<String>,
}

/// The two's-complement rewrite of one subtrahend word.
struct TwocompChain {
    input: Vec<String>,
    carries: Vec<String>,
    results: Vec<String>,
}

// MODULAR COMPONENT
// ================================================================================================

/// Encoders for MODADD and MODSUB components.
#[derive(Debug)]
pub struct ModularComponent {
    component: Component,
}

impl ModularComponent {
    /// Wraps a component of modular kind; any other kind is rejected.
    pub fn new(component: Component) -> Result<Self, EncodeError> {
        if !component.description().kind.is_modular() {
            return Err(EncodeError::UnsupportedOperation {
                component: component.id().to_string(),
                kind: component.description().kind.to_string(),
                family: "modular",
            });
        }
        Ok(Self { component })
    }

    fn width(&self) -> usize {
        self.component.output_bit_size()
    }

    fn is_subtraction(&self) -> bool {
        self.component.description().kind == OperationKind::ModSub
    }

    /// Lays out the fold: one addition stage per extra operand, plus (for MODSUB) one
    /// two's-complement chain per right-hand operand.
    fn stage_plan(&self) -> (Vec<TwocompChain>, Vec<AddStage>) {
        let w = self.width();
        let k = self.component.operand_count();
        let label = self.component.description().kind.label();
        let operands = self.component.operand_bit_ids();
        let outputs = self.component.output_bit_ids();
        let subtract = self.is_subtraction();
        let stage_count = k - 1;

        let mut chains = Vec::new();
        let mut stages = Vec::new();
        let mut acc = operands[0].clone();
        for n in 0..stage_count {
            let y = if subtract {
                // a single-stage subtraction keeps unnumbered auxiliary names
                let stage = (stage_count > 1).then_some(n);
                let chain = TwocompChain {
                    carries: operands[n + 1][..w - 1]
                        .iter()
                        .map(|bit| naming::twocomp_carry_id(stage, bit))
                        .collect(),
                    results: operands[n + 1]
                        .iter()
                        .map(|bit| naming::twocomp_result_id(stage, bit))
                        .collect(),
                    input: operands[n + 1].clone(),
                };
                let results = chain.results.clone();
                chains.push(chain);
                results
            } else {
                operands[n + 1].clone()
            };
            let (carries, intermediates) = if subtract && stage_count == 1 {
                (
                    outputs[..w - 1].iter().map(|bit| naming::carry_id(bit)).collect(),
                    outputs[..w - 1].iter().map(|bit| naming::intermediate_id(bit)).collect(),
                )
            } else {
                (
                    outputs[..w - 1].iter().map(|bit| naming::stage_carry_id(n, bit)).collect(),
                    outputs[..w - 1]
                        .iter()
                        .map(|bit| naming::stage_intermediate_id(label, n, bit))
                        .collect(),
                )
            };
            let out = if n == stage_count - 1 {
                outputs.clone()
            } else {
                outputs.iter().map(|bit| naming::stage_output_id(label, n, bit)).collect()
            };
            stages.push(AddStage { x: acc, y, out: out.clone(), carries, intermediates });
            acc = out;
        }
        (chains, stages)
    }

    fn variables(
        &self,
        chains: &[TwocompChain],
        stages: &[AddStage],
        with_intermediates: bool,
    ) -> Vec<String> {
        let mut variables = Vec::new();
        for chain in chains {
            variables.extend(chain.carries.iter().cloned());
        }
        for chain in chains {
            variables.extend(chain.results.iter().cloned());
        }
        for stage in stages {
            variables.extend(stage.carries.iter().cloned());
        }
        if with_intermediates {
            for stage in stages {
                variables.extend(stage.intermediates.iter().cloned());
            }
        }
        for stage in stages {
            variables.extend(stage.out.iter().cloned());
        }
        variables
    }
}

// SAT / CMS ENCODING
// ================================================================================================

fn twocomp_clauses(chain: &TwocompChain) -> Vec<Clause> {
    let w = chain.input.len();
    if w == 1 {
        return encoders::cnf_equivalent(&chain.results[0], &chain.input[0]);
    }
    let mut clauses = Vec::new();
    for (carry, input, next) in izip!(&chain.carries, &chain.input[1..], &chain.carries[1..]) {
        clauses.extend(encoders::cnf_carry_comp2(carry, input, next));
    }
    clauses.extend(encoders::cnf_inequality(&chain.carries[w - 2], &chain.input[w - 1]));
    for (result, input, carry) in izip!(&chain.results, &chain.input, &chain.carries) {
        clauses.extend(encoders::cnf_result_comp2(result, input, carry));
    }
    clauses.extend(encoders::cnf_equivalent(&chain.results[w - 1], &chain.input[w - 1]));
    clauses
}

fn stage_carry_clauses(stage: &AddStage) -> Vec<Clause> {
    let w = stage.x.len();
    let mut clauses = Vec::new();
    for (carry, x, y, next) in izip!(&stage.carries, &stage.x[1..], &stage.y[1..], &stage.carries[1..])
    {
        clauses.extend(encoders::cnf_carry(carry, x, y, next));
    }
    clauses.extend(encoders::cnf_and(&stage.carries[w - 2], (&stage.x[w - 1], &stage.y[w - 1])));
    clauses
}

fn stage_sat_clauses(stage: &AddStage) -> Vec<Clause> {
    let w = stage.x.len();
    if w == 1 {
        return encoders::cnf_xor(&stage.out[0], &stage.x[0], &stage.y[0]);
    }
    let mut clauses = stage_carry_clauses(stage);
    for (out, x, y, carry, intermediate) in
        izip!(&stage.out, &stage.x, &stage.y, &stage.carries, &stage.intermediates)
    {
        clauses.extend(encoders::cnf_result(out, x, y, carry, intermediate));
    }
    clauses.extend(encoders::cnf_xor(&stage.out[w - 1], &stage.x[w - 1], &stage.y[w - 1]));
    clauses
}

fn stage_cms_clauses(stage: &AddStage) -> Vec<Clause> {
    let w = stage.x.len();
    if w == 1 {
        return vec![encoders::cnf_xor_native(&stage.out[0], &[&stage.x[0], &stage.y[0]])];
    }
    let mut clauses = stage_carry_clauses(stage);
    for (out, x, y, carry) in izip!(&stage.out, &stage.x, &stage.y, &stage.carries) {
        clauses.push(encoders::cnf_xor_native(out, &[x, y, carry]));
    }
    clauses.push(encoders::cnf_xor_native(&stage.out[w - 1], &[&stage.x[w - 1], &stage.y[w - 1]]));
    clauses
}

impl ModularComponent {
    /// CNF clauses in the CryptoMiniSat dialect: carries stay in plain CNF, output bits become
    /// native XOR clauses and need no intermediates.
    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    pub fn cms_constraints(&self) -> SatArtifact {
        let (chains, stages) = self.stage_plan();
        let mut clauses: Vec<Clause> = chains.iter().flat_map(twocomp_clauses).collect();
        clauses.extend(stages.iter().flat_map(stage_cms_clauses));
        SatArtifact::new(self.variables(&chains, &stages, false), clauses)
    }
}

// SMT ENCODING
// ================================================================================================

fn twocomp_assertions(chain: &TwocompChain) -> Vec<SmtAssertion> {
    let w = chain.input.len();
    if w == 1 {
        return vec![SmtAssertion(smt::equivalent(
            smt::var(&chain.results[0]),
            smt::var(&chain.input[0]),
        ))];
    }
    let mut assertions = Vec::new();
    for (carry, input, next) in izip!(&chain.carries, &chain.input[1..], &chain.carries[1..]) {
        let operation = smt::and_of([smt::not_of(smt::var(input)), smt::var(next)]);
        assertions.push(SmtAssertion(smt::equivalent(smt::var(carry), operation)));
    }
    assertions.push(SmtAssertion(smt::distinct(
        smt::var(&chain.carries[w - 2]),
        smt::var(&chain.input[w - 1]),
    )));
    for (result, input, carry) in izip!(&chain.results, &chain.input, &chain.carries) {
        let operation = smt::xor_of([smt::not_of(smt::var(input)), smt::var(carry)]);
        assertions.push(SmtAssertion(smt::equivalent(smt::var(result), operation)));
    }
    assertions.push(SmtAssertion(smt::equivalent(
        smt::var(&chain.results[w - 1]),
        smt::var(&chain.input[w - 1]),
    )));
    assertions
}

fn stage_assertions(stage: &AddStage) -> Vec<SmtAssertion> {
    let w = stage.x.len();
    if w == 1 {
        let operation = smt::xor_of([smt::var(&stage.x[0]), smt::var(&stage.y[0])]);
        return vec![SmtAssertion(smt::equivalent(smt::var(&stage.out[0]), operation))];
    }
    let mut assertions = Vec::new();
    for (carry, x, y, next) in izip!(&stage.carries, &stage.x[1..], &stage.y[1..], &stage.carries[1..])
    {
        assertions.push(SmtAssertion(smt::equivalent(smt::var(carry), smt::carry(x, y, next))));
    }
    let top_carry = smt::and_of([smt::var(&stage.x[w - 1]), smt::var(&stage.y[w - 1])]);
    assertions
        .push(SmtAssertion(smt::equivalent(smt::var(&stage.carries[w - 2]), top_carry)));
    for (out, x, y, carry) in izip!(&stage.out, &stage.x, &stage.y, &stage.carries) {
        let operation = smt::xor_of([smt::var(x), smt::var(y), smt::var(carry)]);
        assertions.push(SmtAssertion(smt::equivalent(smt::var(out), operation)));
    }
    let top_xor = smt::xor_of([smt::var(&stage.x[w - 1]), smt::var(&stage.y[w - 1])]);
    assertions.push(SmtAssertion(smt::equivalent(smt::var(&stage.out[w - 1]), top_xor)));
    assertions
}

// CP ENCODING
// ================================================================================================

/// Emits the mod-2 carry and output equations of `out = x + y` over whole arrays.
fn cp_twoterms_add(
    x: &str,
    y: &str,
    out: &str,
    w: usize,
    declarations: &mut Vec<CpDeclaration>,
    constraints: &mut Vec<CpConstraint>,
) {
    if w > 1 {
        let carry = naming::cp_carry_array(out);
        declarations.push(CpDeclaration::CarryArray { name: carry.clone(), len: w });
        for i in 1..w - 1 {
            constraints.push(CpConstraint::Mod2Sum {
                lhs: ElementRef::new(&carry, i),
                terms: vec![
                    vec![ElementRef::new(x, i), ElementRef::new(y, i)],
                    vec![ElementRef::new(x, i), ElementRef::new(&carry, i + 1)],
                    vec![ElementRef::new(&carry, i + 1), ElementRef::new(y, i)],
                ],
            });
        }
        constraints.push(CpConstraint::Mod2Sum {
            lhs: ElementRef::new(&carry, w - 1),
            terms: vec![vec![ElementRef::new(x, w - 1), ElementRef::new(y, w - 1)]],
        });
        for i in 0..w - 1 {
            constraints.push(CpConstraint::Mod2Sum {
                lhs: ElementRef::new(out, i),
                terms: vec![
                    vec![ElementRef::new(x, i)],
                    vec![ElementRef::new(y, i)],
                    vec![ElementRef::new(&carry, i + 1)],
                ],
            });
        }
    }
    constraints.push(CpConstraint::Mod2Sum {
        lhs: ElementRef::new(out, w - 1),
        terms: vec![vec![ElementRef::new(x, w - 1)], vec![ElementRef::new(y, w - 1)]],
    });
}

/// Emits `out = x - y` through the two's complement of `y` and the builtin `modadd` relation.
fn cp_twoterms_sub(
    x: &str,
    y: &str,
    out: &str,
    component_id: &str,
    w: usize,
    declarations: &mut Vec<CpDeclaration>,
    constraints: &mut Vec<CpConstraint>,
) {
    let pre_minus = naming::cp_pre_minus_array(y);
    let minus = naming::cp_minus_array(y);
    declarations.push(CpDeclaration::BoolArray { name: pre_minus.clone(), len: w });
    declarations.push(CpDeclaration::BoolArray { name: minus.clone(), len: w });
    for i in 0..w {
        constraints.push(CpConstraint::Mod2Sum {
            lhs: ElementRef::new(&pre_minus, i),
            terms: vec![vec![ElementRef::new(y, i)], vec![]],
        });
    }
    constraints.push(CpConstraint::Relation {
        name: "modadd".to_string(),
        args: vec![pre_minus, naming::cp_constant_array(component_id), minus.clone()],
    });
    constraints.push(CpConstraint::Relation {
        name: "modadd".to_string(),
        args: vec![x.to_string(), minus, out.to_string()],
    });
}

impl ModularComponent {
    fn cp_modadd(&self) -> CpArtifact {
        let w = self.width();
        let k = self.component.operand_count();
        let id = self.component.id();
        let mut declarations = Vec::new();
        let mut constraints = Vec::new();
        super::cp_staging(&self.component, &mut declarations, &mut constraints);
        for i in k..=2 * k - 3 {
            declarations.push(CpDeclaration::BoolArray {
                name: naming::cp_pre_array(id, i),
                len: w,
            });
        }
        if k == 2 {
            let (a, b) = (naming::cp_pre_array(id, 0), naming::cp_pre_array(id, 1));
            cp_twoterms_add(&a, &b, id, w, &mut declarations, &mut constraints);
        } else {
            let first = naming::cp_pre_array(id, k);
            cp_twoterms_add(
                &naming::cp_pre_array(id, 0),
                &naming::cp_pre_array(id, 1),
                &first,
                w,
                &mut declarations,
                &mut constraints,
            );
            for s in 1..k - 2 {
                cp_twoterms_add(
                    &naming::cp_pre_array(id, k + s - 1),
                    &naming::cp_pre_array(id, s + 1),
                    &naming::cp_pre_array(id, k + s),
                    w,
                    &mut declarations,
                    &mut constraints,
                );
            }
            cp_twoterms_add(
                &naming::cp_pre_array(id, 2 * k - 3),
                &naming::cp_pre_array(id, k - 1),
                id,
                w,
                &mut declarations,
                &mut constraints,
            );
        }
        CpArtifact::new(declarations, constraints)
    }

    fn cp_modsub(&self) -> CpArtifact {
        let w = self.width();
        let k = self.component.operand_count();
        let id = self.component.id();
        let mut declarations = Vec::new();
        let mut constraints = Vec::new();
        let mut constant = vec![0; w - 1];
        constant.push(1);
        declarations.push(CpDeclaration::BoolArrayInit {
            name: naming::cp_constant_array(id),
            values: constant,
        });
        declarations.push(CpDeclaration::BoolArray { name: id.to_string(), len: w });
        super::cp_staging(&self.component, &mut declarations, &mut constraints);
        for i in 0..k - 2 {
            declarations.push(CpDeclaration::BoolArray {
                name: naming::cp_temp_array(id, i),
                len: w,
            });
        }
        if k == 2 {
            let (a, b) = (naming::cp_pre_array(id, 0), naming::cp_pre_array(id, 1));
            cp_twoterms_sub(&a, &b, id, id, w, &mut declarations, &mut constraints);
        } else {
            cp_twoterms_sub(
                &naming::cp_pre_array(id, 0),
                &naming::cp_pre_array(id, 1),
                &naming::cp_temp_array(id, 0),
                id,
                w,
                &mut declarations,
                &mut constraints,
            );
            for s in 1..k - 2 {
                cp_twoterms_sub(
                    &naming::cp_temp_array(id, s - 1),
                    &naming::cp_pre_array(id, s + 1),
                    &naming::cp_temp_array(id, s),
                    id,
                    w,
                    &mut declarations,
                    &mut constraints,
                );
            }
            cp_twoterms_sub(
                &naming::cp_temp_array(id, k - 3),
                &naming::cp_pre_array(id, k - 1),
                id,
                id,
                w,
                &mut declarations,
                &mut constraints,
            );
        }
        CpArtifact::new(declarations, constraints)
    }

    /// Differential probability of a two-term addition over the named arrays.
    ///
    /// Declares left-shifted copies of the three arrays (memoized through `ctx` so an array
    /// shared by several additions is shifted once), the `Eq` indicator array, and the guarded
    /// parity constraint that also assigns this component's slot of the global weight array.
    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    pub fn cp_twoterms_xor_differential_probability(
        &self,
        input_1: &str,
        input_2: &str,
        output: &str,
        ctx: &mut CpModelContext,
    ) -> CpArtifact {
        let w = self.width();
        let mut declarations = Vec::new();
        for array in [input_1, input_2, output] {
            if ctx.mark_shifted(array) {
                declarations.push(CpDeclaration::BoolArrayLShift {
                    name: naming::cp_shift_array(array),
                    len: w,
                    source: array.to_string(),
                });
            }
        }
        let eq_array = naming::cp_eq_array(output);
        declarations.push(CpDeclaration::BoolArrayEq {
            name: eq_array.clone(),
            len: w,
            args: [
                naming::cp_shift_array(input_1),
                naming::cp_shift_array(input_2),
                naming::cp_shift_array(output),
            ],
        });
        let slot = ctx.claim_weight_slot(self.component.id());
        let constraints = vec![CpConstraint::XorDifferentialProbability {
            width: w,
            input_1: input_1.to_string(),
            input_2: input_2.to_string(),
            output: output.to_string(),
            shifted_input_2: naming::cp_shift_array(input_2),
            eq_array,
            slot,
        }];
        CpArtifact::new(declarations, constraints)
    }
}

// ALGEBRAIC ENCODING
// ================================================================================================

fn maj(a: &Polynomial, b: &Polynomial, c: &Polynomial) -> Polynomial {
    a * b + a * c + b * c
}

// CONSTRAINT ENCODER IMPLEMENTATION
// ================================================================================================

impl ConstraintEncoder for ModularComponent {
    fn component(&self) -> &Component {
        &self.component
    }

    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    fn sat_constraints(&self) -> SatArtifact {
        let (chains, stages) = self.stage_plan();
        let mut clauses: Vec<Clause> = chains.iter().flat_map(twocomp_clauses).collect();
        clauses.extend(stages.iter().flat_map(stage_sat_clauses));
        SatArtifact::new(self.variables(&chains, &stages, true), clauses)
    }

    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    fn smt_constraints(&self) -> SmtArtifact {
        let (chains, stages) = self.stage_plan();
        let mut assertions: Vec<SmtAssertion> =
            chains.iter().flat_map(twocomp_assertions).collect();
        assertions.extend(stages.iter().flat_map(stage_assertions));
        SmtArtifact::new(self.variables(&chains, &stages, false), assertions)
    }

    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    fn cp_constraints(&self) -> CpArtifact {
        if self.is_subtraction() { self.cp_modsub() } else { self.cp_modadd() }
    }

    #[tracing::instrument(skip_all, fields(component = %self.component.id()))]
    fn algebraic_polynomials(&self) -> AlgebraicArtifact {
        let w = self.width();
        let k = self.component.operand_count();
        let id = self.component.id();
        let subtract = self.is_subtraction();

        let input_names: Vec<String> =
            (0..k * w).map(|i| naming::ring_input_var(id, i)).collect();
        let output_names: Vec<String> = (0..w).map(|i| naming::ring_output_var(id, i)).collect();
        let inputs: Vec<Polynomial> = input_names.iter().map(Polynomial::var).collect();
        let outputs: Vec<Polynomial> = output_names.iter().map(Polynomial::var).collect();

        let mut variables = input_names;
        variables.extend(output_names);
        let mut polynomials = Vec::new();
        let mut acc: Vec<Polynomial> = inputs[..w].to_vec();
        for n in 0..k - 1 {
            let word = &inputs[(n + 1) * w..(n + 2) * w];
            let rhs: Vec<Polynomial> = if subtract {
                let carry_names: Vec<String> =
                    (0..w - 1).map(|i| naming::ring_twocomp_carry_var(id, n, i)).collect();
                let result_names: Vec<String> =
                    (0..w).map(|i| naming::ring_twocomp_result_var(id, n, i)).collect();
                let d: Vec<Polynomial> = carry_names.iter().map(Polynomial::var).collect();
                let t: Vec<Polynomial> = result_names.iter().map(Polynomial::var).collect();
                variables.extend(carry_names);
                variables.extend(result_names);
                if w > 1 {
                    polynomials
                        .push(d[w - 2].clone() + word[w - 1].clone() + Polynomial::one());
                    for i in (0..w.saturating_sub(2)).rev() {
                        let complement = word[i + 1].clone() + Polynomial::one();
                        polynomials.push(d[i].clone() + complement * d[i + 1].clone());
                    }
                    for i in 0..w - 1 {
                        polynomials.push(
                            t[i].clone() + word[i].clone() + Polynomial::one() + d[i].clone(),
                        );
                    }
                }
                polynomials.push(t[w - 1].clone() + word[w - 1].clone());
                t
            } else {
                word.to_vec()
            };

            let z: Vec<Polynomial> = if n == k - 2 {
                outputs.clone()
            } else {
                let stage_names: Vec<String> =
                    (0..w).map(|i| naming::ring_stage_output_var(id, n, i)).collect();
                let stage_outputs = stage_names.iter().map(Polynomial::var).collect();
                variables.extend(stage_names);
                stage_outputs
            };
            let carry_names: Vec<String> =
                (0..w).map(|i| naming::ring_carry_var(id, n, i)).collect();
            let c: Vec<Polynomial> = carry_names.iter().map(Polynomial::var).collect();
            variables.extend(carry_names);

            // the least significant bit takes no carry in
            polynomials.push(c[w - 1].clone());
            polynomials
                .push(acc[w - 1].clone() + rhs[w - 1].clone() + z[w - 1].clone() + &c[w - 1]);
            for i in (0..w - 1).rev() {
                polynomials.push(c[i].clone() + maj(&acc[i + 1], &rhs[i + 1], &c[i + 1]));
                polynomials.push(acc[i].clone() + rhs[i].clone() + z[i].clone() + &c[i]);
            }
            acc = z;
        }
        AlgebraicArtifact::new(variables, polynomials)
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use trailforge_core::{Component, ComponentDescription, OperationKind};

    use super::*;

    fn modadd(width: usize, operand_count: usize) -> ModularComponent {
        let links: Vec<String> = (0..operand_count).map(|i| format!("xor_0_{i}")).collect();
        let positions = vec![(0..width).collect::<Vec<_>>(); operand_count];
        let component = Component::new(
            0,
            1,
            links,
            positions,
            width,
            ComponentDescription { kind: OperationKind::ModAdd, operand_count },
        )
        .unwrap();
        ModularComponent::new(component).unwrap()
    }

    fn modsub(width: usize) -> ModularComponent {
        let component = Component::new(
            0,
            7,
            vec!["modadd_0_4".to_string(), "plaintext".to_string()],
            vec![(0..width).collect(), (width..2 * width).collect()],
            width,
            ComponentDescription { kind: OperationKind::ModSub, operand_count: 2 },
        )
        .unwrap();
        ModularComponent::new(component).unwrap()
    }

    #[test]
    fn logical_kind_is_rejected() {
        let component = Component::new(
            0,
            4,
            vec!["a".to_string(), "b".to_string()],
            vec![vec![0, 1], vec![0, 1]],
            2,
            ComponentDescription { kind: OperationKind::Or, operand_count: 2 },
        )
        .unwrap();
        trailforge_core::assert_matches!(
            ModularComponent::new(component),
            Err(EncodeError::UnsupportedOperation { family: "modular", .. })
        );
    }

    #[test]
    fn debug_output_names_the_component() {
        let rendered = format!("{:?}", modadd(2, 2));
        assert!(rendered.contains("modadd_0_1"));
    }

    #[test]
    fn two_operand_sat_variables_follow_carry_intermediate_output_order() {
        let artifact = modadd(4, 2).sat_constraints();
        let variables: Vec<&str> = artifact.variables().iter().map(String::as_str).collect();
        assert_eq!(variables, [
            "carry_000_modadd_0_1_000",
            "carry_000_modadd_0_1_001",
            "carry_000_modadd_0_1_002",
            "modadd_intermediate_000_modadd_0_1_000",
            "modadd_intermediate_000_modadd_0_1_001",
            "modadd_intermediate_000_modadd_0_1_002",
            "modadd_0_1_000",
            "modadd_0_1_001",
            "modadd_0_1_002",
            "modadd_0_1_003",
        ]);
    }

    #[test]
    fn three_operand_add_folds_through_stage_outputs() {
        let artifact = modadd(2, 3).smt_constraints();
        assert!(artifact.variables().contains(&"modadd_output_000_modadd_0_1_000".to_string()));
        assert!(artifact.variables().contains(&"carry_001_modadd_0_1_000".to_string()));
        // stage 1 reads stage 0's result
        let rendered: Vec<String> =
            artifact.constraints().iter().map(ToString::to_string).collect();
        assert!(
            rendered
                .iter()
                .any(|line| line.contains("(xor modadd_output_000_modadd_0_1_001 xor_0_2_001)"))
        );
    }

    #[test]
    fn width_one_addition_is_a_single_xor() {
        let artifact = modadd(1, 2).sat_constraints();
        assert_eq!(artifact.variables(), ["modadd_0_1_000".to_string()]);
        assert_eq!(artifact.constraints().len(), 4);
        assert!(artifact.variables().iter().all(|v| !v.starts_with("carry")));
    }

    #[test]
    fn subtraction_smt_uses_distinct_at_the_carry_base() {
        let artifact = modsub(4).smt_constraints();
        let rendered: Vec<String> =
            artifact.constraints().iter().map(ToString::to_string).collect();
        assert!(rendered.contains(
            &"(assert (distinct twocomp_carry_plaintext_006 plaintext_007))".to_string()
        ));
        assert!(rendered.contains(
            &"(assert (= twocomp_result_plaintext_007 plaintext_007))".to_string()
        ));
    }

    #[test]
    fn subtraction_cp_declares_constant_and_output() {
        let artifact = modsub(4).cp_constraints();
        let rendered: Vec<String> =
            artifact.declarations.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered[0],
            "array[0..3] of var 0..1: constant_modsub_0_7 = array1d(0..3,[0, 0, 0, 1]);"
        );
        assert_eq!(rendered[1], "array[0..3] of var 0..1: modsub_0_7;");
        let constraints: Vec<String> =
            artifact.constraints.iter().map(ToString::to_string).collect();
        assert!(constraints.contains(
            &"constraint modadd(pre_modsub_0_7_0, minus_pre_modsub_0_7_1, modsub_0_7);"
                .to_string()
        ));
    }

    #[test]
    fn differential_probability_memoizes_shift_declarations() {
        let mut ctx = CpModelContext::new();
        let component = modadd(4, 2);
        let first = component.cp_twoterms_xor_differential_probability(
            "pre_modadd_0_1_0",
            "pre_modadd_0_1_1",
            "modadd_0_1",
            &mut ctx,
        );
        assert_eq!(first.declarations.len(), 4);
        let again = component.cp_twoterms_xor_differential_probability(
            "pre_modadd_0_1_0",
            "pre_modadd_0_1_1",
            "modadd_0_1",
            &mut ctx,
        );
        // shifted arrays are declared once; only the Eq indicator repeats
        assert_eq!(again.declarations.len(), 1);
        assert_eq!(ctx.weight_slot_count(), 2);
    }
}
