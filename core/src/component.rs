use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{EncodeError, naming};

// OPERATION KIND
// ================================================================================================

/// Bit-level operation performed by a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperationKind {
    /// Modular addition of `operand_count` words, reduced mod 2^width.
    ModAdd,
    /// Modular subtraction, folded left-to-right via two's-complement addition.
    ModSub,
    /// Bitwise OR of `operand_count` words.
    Or,
    /// Bitwise AND of `operand_count` words.
    And,
}

impl OperationKind {
    /// Returns the lowercase label used in component ids and auxiliary variable names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ModAdd => "modadd",
            Self::ModSub => "modsub",
            Self::Or => "or",
            Self::And => "and",
        }
    }

    /// Returns true for the modular-arithmetic component family.
    pub fn is_modular(&self) -> bool {
        matches!(self, Self::ModAdd | Self::ModSub)
    }

    /// Returns true for the multi-input logical component family.
    pub fn is_logical(&self) -> bool {
        matches!(self, Self::Or | Self::And)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// COMPONENT DESCRIPTION
// ================================================================================================

/// Tagged descriptor of a component: the operation kind and the number of same-width operands
/// the component combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentDescription {
    pub kind: OperationKind,
    pub operand_count: usize,
}

impl ComponentDescription {
    pub const fn new(kind: OperationKind, operand_count: usize) -> Self {
        Self { kind, operand_count }
    }
}

// COMPONENT
// ================================================================================================

/// A node in a cipher's data-flow graph: one bit-level operation with explicit input wiring and
/// an output width.
///
/// The wiring is an ordered list of upstream component ids, each with the ordered bit offsets
/// selected from that source; this allows arbitrary bit-level rewiring and slicing. The total
/// number of wired bits must equal `output_bit_size * operand_count`, and the constructor
/// rejects anything else, so encoders can assume a well-formed component throughout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    id: String,
    round: usize,
    position: usize,
    input_id_links: Vec<String>,
    input_bit_positions: Vec<Vec<usize>>,
    output_bit_size: usize,
    description: ComponentDescription,
}

impl Component {
    /// Creates a new component at the given round and per-round position.
    ///
    /// The id is derived as `{kind}_{round}_{position}` and is unique within a cipher instance
    /// as long as (round, position) pairs are.
    ///
    /// # Errors
    /// Returns an error if the operand count is below 2, the wiring is empty or inconsistent,
    /// the output width is zero, or the wired bit total does not match
    /// `output_bit_size * operand_count`.
    pub fn new(
        round: usize,
        position: usize,
        input_id_links: Vec<String>,
        input_bit_positions: Vec<Vec<usize>>,
        output_bit_size: usize,
        description: ComponentDescription,
    ) -> Result<Self, EncodeError> {
        let id = format!("{}_{round}_{position}", description.kind.label());

        if description.operand_count < 2 {
            return Err(EncodeError::InvalidOperandCount {
                component: id,
                operand_count: description.operand_count,
            });
        }
        let wiring_is_malformed = input_id_links.is_empty()
            || input_id_links.len() != input_bit_positions.len()
            || input_bit_positions.iter().any(Vec::is_empty)
            || output_bit_size == 0;
        if wiring_is_malformed {
            return Err(EncodeError::MalformedWiring { component: id });
        }
        let wired_bits: usize = input_bit_positions.iter().map(Vec::len).sum();
        let expected_bits = output_bit_size * description.operand_count;
        if wired_bits != expected_bits {
            return Err(EncodeError::WiringMismatch {
                component: id,
                expected_bits,
                wired_bits,
                operand_count: description.operand_count,
                output_bit_size,
            });
        }

        Ok(Self {
            id,
            round,
            position,
            input_id_links,
            input_bit_positions,
            output_bit_size,
            description,
        })
    }

    // ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Globally unique id of this component within a cipher instance.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Ordered upstream component ids, one per distinct input source.
    pub fn input_id_links(&self) -> &[String] {
        &self.input_id_links
    }

    /// Per input source, the ordered bit offsets selected from it.
    pub fn input_bit_positions(&self) -> &[Vec<usize>] {
        &self.input_bit_positions
    }

    /// Width of this component's result word.
    pub fn output_bit_size(&self) -> usize {
        self.output_bit_size
    }

    pub fn description(&self) -> ComponentDescription {
        self.description
    }

    /// Number of same-width words this component combines.
    pub fn operand_count(&self) -> usize {
        self.description.operand_count
    }

    /// Total number of wired input bits; always `output_bit_size * operand_count`.
    pub fn input_bit_size(&self) -> usize {
        self.input_bit_positions.iter().map(Vec::len).sum()
    }

    // DERIVED IDENTIFIERS
    // --------------------------------------------------------------------------------------------

    /// Flat ordered list of upstream bit identifiers, operand-major.
    pub fn input_bit_ids(&self) -> Vec<String> {
        naming::input_bit_ids(&self.input_id_links, &self.input_bit_positions)
    }

    /// Identifiers of this component's output bits.
    pub fn output_bit_ids(&self) -> Vec<String> {
        naming::output_bit_ids(&self.id, self.output_bit_size)
    }

    /// Upstream bit identifiers grouped into `operand_count` words of `output_bit_size` bits.
    pub fn operand_bit_ids(&self) -> Vec<Vec<String>> {
        let width = self.output_bit_size;
        let flat = self.input_bit_ids();
        flat.chunks(width).map(<[String]>::to_vec).collect()
    }

    /// Flat ordered list of CP element references (`link[position]`) for the wired input bits.
    pub fn cp_input_refs(&self) -> Vec<(String, usize)> {
        self.input_id_links
            .iter()
            .zip(&self.input_bit_positions)
            .flat_map(|(link, positions)| positions.iter().map(|&pos| (link.clone(), pos)))
            .collect()
    }
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn wiring(bits: &[usize]) -> (Vec<String>, Vec<Vec<usize>>) {
        let links = (0..bits.len()).map(|i| format!("source_{i}")).collect();
        let positions = bits.iter().map(|&n| (0..n).collect()).collect();
        (links, positions)
    }

    #[test]
    fn id_is_derived_from_kind_round_and_position() {
        let (links, positions) = wiring(&[4, 4]);
        let description = ComponentDescription::new(OperationKind::ModAdd, 2);
        let component = Component::new(0, 1, links, positions, 4, description).unwrap();
        assert_eq!(component.id(), "modadd_0_1");
        assert_eq!(component.input_bit_size(), 8);
        assert_eq!(component.operand_bit_ids().len(), 2);
    }

    #[test]
    fn operand_count_below_two_is_rejected() {
        let (links, positions) = wiring(&[4]);
        let description = ComponentDescription::new(OperationKind::ModAdd, 1);
        let err = Component::new(0, 0, links, positions, 4, description).unwrap_err();
        assert_eq!(err, EncodeError::InvalidOperandCount {
            component: "modadd_0_0".to_string(),
            operand_count: 1,
        });
    }

    #[test]
    fn wired_bit_total_must_match_description() {
        let (links, positions) = wiring(&[4, 3]);
        let description = ComponentDescription::new(OperationKind::Or, 2);
        let err = Component::new(1, 2, links, positions, 4, description).unwrap_err();
        crate::assert_matches!(err, EncodeError::WiringMismatch {
            expected_bits: 8,
            wired_bits: 7,
            ..
        });
    }

    #[test]
    fn empty_wiring_is_rejected() {
        let description = ComponentDescription::new(OperationKind::Or, 2);
        let err = Component::new(0, 0, vec![], vec![], 4, description).unwrap_err();
        crate::assert_matches!(err, EncodeError::MalformedWiring { .. });

        let err = Component::new(
            0,
            0,
            vec!["key".to_string()],
            vec![vec![]],
            4,
            ComponentDescription::new(OperationKind::Or, 2),
        )
        .unwrap_err();
        crate::assert_matches!(err, EncodeError::MalformedWiring { .. });
    }

    #[test]
    fn bit_slicing_preserves_order() {
        let description = ComponentDescription::new(OperationKind::Or, 2);
        let component = Component::new(
            0,
            9,
            vec!["xor_0_7".to_string(), "key".to_string()],
            vec![vec![1, 0], vec![12, 13]],
            2,
            description,
        )
        .unwrap();
        assert_eq!(component.input_bit_ids(), vec![
            "xor_0_7_001",
            "xor_0_7_000",
            "key_012",
            "key_013"
        ]);
        assert_eq!(component.output_bit_ids(), vec!["or_0_9_000", "or_0_9_001"]);
    }
}
