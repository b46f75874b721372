//! Reference decoder: turns an image back into instructions

use std::fmt;

use crate::addressing::AddressingMode;
use crate::opcodes::InstructionTable;

/// One decoded instruction, or a stray byte with no opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub address: u16,
    /// `None` for a byte that is not a known opcode.
    pub mnemonic: Option<&'static str>,
    pub mode: Option<AddressingMode>,
    /// Opcode followed by its operand bytes.
    pub bytes: Vec<u8>,
}

impl Decoded {
    fn operand_word(&self) -> u16 {
        u16::from_le_bytes([self.bytes[1], self.bytes[2]])
    }

    /// Branch target for relative instructions.
    pub fn branch_target(&self) -> Option<u16> {
        match self.mode {
            Some(AddressingMode::JumpRelative) => {
                let disp = self.bytes[1] as i8 as i16;
                Some(self.address.wrapping_add(2).wrapping_add(disp as u16))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AddressingMode::*;
        let (Some(mnemonic), Some(mode)) = (self.mnemonic, self.mode) else {
            return write!(f, ".byte ${:02X}", self.bytes[0]);
        };
        let mnemonic = mnemonic.to_ascii_lowercase();
        match mode {
            Implied | Accumulator => write!(f, "{mnemonic}"),
            Immediate => write!(f, "{mnemonic} #${:02X}", self.bytes[1]),
            Zeropage => write!(f, "{mnemonic} ${:02X}", self.bytes[1]),
            ZeropageX => write!(f, "{mnemonic} ${:02X},x", self.bytes[1]),
            ZeropageY => write!(f, "{mnemonic} ${:02X},y", self.bytes[1]),
            IndirectX => write!(f, "{mnemonic} (${:02X},x)", self.bytes[1]),
            IndirectY => write!(f, "{mnemonic} (${:02X}),y", self.bytes[1]),
            Absolute | JumpAbsolute => write!(f, "{mnemonic} ${:04X}", self.operand_word()),
            AbsoluteX => write!(f, "{mnemonic} ${:04X},x", self.operand_word()),
            AbsoluteY => write!(f, "{mnemonic} ${:04X},y", self.operand_word()),
            Indirect => write!(f, "{mnemonic} (${:04X})", self.operand_word()),
            JumpRelative => {
                let target = self.branch_target().unwrap_or_default();
                write!(f, "{mnemonic} ${target:04X}")
            }
        }
    }
}

/// Decodes `bytes` loaded at `origin`. A trailing instruction cut short by the
/// end of the buffer is reported byte by byte.
pub fn disassemble(table: &InstructionTable, bytes: &[u8], origin: u16) -> Vec<Decoded> {
    let mut out = Vec::new();
    let mut pc = 0;
    while pc < bytes.len() {
        let address = origin.wrapping_add(pc as u16);
        let decoded = table
            .decode(bytes[pc])
            .filter(|(_, mode)| pc + mode.instruction_len() <= bytes.len())
            .map(|(record, mode)| Decoded {
                address,
                mnemonic: Some(record.mnemonic),
                mode: Some(mode),
                bytes: bytes[pc..pc + mode.instruction_len()].to_vec(),
            })
            .unwrap_or_else(|| Decoded {
                address,
                mnemonic: None,
                mode: None,
                bytes: vec![bytes[pc]],
            });
        pc += decoded.bytes.len();
        out.push(decoded);
    }
    out
}
