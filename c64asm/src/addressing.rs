//! Addressing modes and operand-shape handling

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// The 14 operand-encoding shapes of the 6502. The discriminant is the slot
/// index inside an [`InstructionRecord`](crate::opcodes::InstructionRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumCount, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AddressingMode {
    Implied,
    Immediate,
    Zeropage,
    ZeropageX,
    ZeropageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    JumpRelative,
    JumpAbsolute,
    Accumulator,
}

impl AddressingMode {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of operand bytes that follow the opcode.
    pub fn operand_len(self) -> usize {
        use AddressingMode::*;
        match self {
            Implied | Accumulator => 0,
            Immediate | Zeropage | ZeropageX | ZeropageY | IndirectX | IndirectY | JumpRelative => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect | JumpAbsolute => 2,
        }
    }

    /// Total encoded instruction length, opcode included.
    pub fn instruction_len(self) -> usize {
        1 + self.operand_len()
    }

    /// Jump-class modes get the historical `-1` adjustment when they are
    /// resolved against a label.
    pub fn is_jump(self) -> bool {
        matches!(self, AddressingMode::JumpAbsolute | AddressingMode::JumpRelative)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRegister {
    X,
    Y,
}

impl IndexRegister {
    /// Matches `x` / `y` in either case.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "x" | "X" => Some(IndexRegister::X),
            "y" | "Y" => Some(IndexRegister::Y),
            _ => None,
        }
    }
}

/// Candidate modes for a one-byte literal, most specific first. An index the
/// instruction has no encoding for falls back to the plain mode.
pub fn zeropage_candidates(index: Option<IndexRegister>) -> &'static [AddressingMode] {
    use AddressingMode::*;
    match index {
        Some(IndexRegister::X) => &[ZeropageX, Zeropage],
        Some(IndexRegister::Y) => &[ZeropageY, Zeropage],
        None => &[Zeropage],
    }
}

/// Candidate modes for a two-byte literal, most specific first. A plain word
/// also fits `JMP`/`JSR`, which only have the jump encoding.
pub fn absolute_candidates(index: Option<IndexRegister>) -> &'static [AddressingMode] {
    use AddressingMode::*;
    match index {
        Some(IndexRegister::X) => &[AbsoluteX, Absolute, JumpAbsolute],
        Some(IndexRegister::Y) => &[AbsoluteY, Absolute, JumpAbsolute],
        None => &[Absolute, JumpAbsolute],
    }
}

/// Candidate modes for a label operand. A label's address is unknown when it
/// is used, so only word-sized (or relative) encodings are considered.
pub fn label_candidates(index: Option<IndexRegister>) -> &'static [AddressingMode] {
    use AddressingMode::*;
    match index {
        Some(IndexRegister::X) => &[AbsoluteX, Absolute, JumpAbsolute, JumpRelative],
        Some(IndexRegister::Y) => &[AbsoluteY, Absolute, JumpAbsolute, JumpRelative],
        None => &[Absolute, JumpAbsolute, JumpRelative],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_slot_indices_are_dense() {
        for (i, mode) in AddressingMode::iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
        assert_eq!(AddressingMode::COUNT, 14);
    }

    #[test]
    fn test_instruction_lengths() {
        assert_eq!(AddressingMode::Implied.instruction_len(), 1);
        assert_eq!(AddressingMode::Accumulator.instruction_len(), 1);
        assert_eq!(AddressingMode::Immediate.instruction_len(), 2);
        assert_eq!(AddressingMode::ZeropageY.instruction_len(), 2);
        assert_eq!(AddressingMode::JumpRelative.instruction_len(), 2);
        assert_eq!(AddressingMode::AbsoluteX.instruction_len(), 3);
        assert_eq!(AddressingMode::JumpAbsolute.instruction_len(), 3);
        assert_eq!(AddressingMode::Indirect.instruction_len(), 3);
    }

    #[test]
    fn test_index_register_case() {
        assert_eq!(IndexRegister::parse("x"), Some(IndexRegister::X));
        assert_eq!(IndexRegister::parse("Y"), Some(IndexRegister::Y));
        assert_eq!(IndexRegister::parse("z"), None);
    }

    #[test]
    fn test_candidate_order() {
        use AddressingMode::*;
        assert_eq!(zeropage_candidates(Some(IndexRegister::Y)), &[ZeropageY, Zeropage]);
        assert_eq!(absolute_candidates(None), &[Absolute, JumpAbsolute]);
        assert_eq!(absolute_candidates(Some(IndexRegister::X)), &[AbsoluteX, Absolute, JumpAbsolute]);
        assert_eq!(label_candidates(None), &[Absolute, JumpAbsolute, JumpRelative]);
        assert_eq!(
            label_candidates(Some(IndexRegister::X)),
            &[AbsoluteX, Absolute, JumpAbsolute, JumpRelative]
        );
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(AddressingMode::ZeropageX.to_string(), "zeropage_x");
        let name: &'static str = AddressingMode::JumpAbsolute.into();
        assert_eq!(name, "jump_absolute");
    }
}
