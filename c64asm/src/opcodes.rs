//! 6502 instruction table

use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::{EnumCount, IntoEnumIterator};

use crate::addressing::AddressingMode;

/// Opcodes of one mnemonic, one slot per [`AddressingMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    pub mnemonic: &'static str,
    pub description: &'static str,
    opcodes: [Option<u8>; AddressingMode::COUNT],
}

impl InstructionRecord {
    pub fn opcode(&self, mode: AddressingMode) -> Option<u8> {
        self.opcodes[mode.index()]
    }

    pub fn supports(&self, mode: AddressingMode) -> bool {
        self.opcode(mode).is_some()
    }

    /// Supported modes paired with their opcodes, in slot order.
    pub fn modes(&self) -> impl Iterator<Item = (AddressingMode, u8)> + '_ {
        AddressingMode::iter().filter_map(|m| self.opcode(m).map(|op| (m, op)))
    }
}

pub struct InstructionTable {
    records: HashMap<&'static str, InstructionRecord>,
    decode: HashMap<u8, (&'static str, AddressingMode)>,
}

static SHARED: Lazy<InstructionTable> = Lazy::new(InstructionTable::new);

impl InstructionTable {
    pub fn new() -> Self {
        let mut records = HashMap::with_capacity(MOS6502.len());
        let mut decode = HashMap::new();
        for &(mnemonic, opcodes, description) in MOS6502 {
            let record = InstructionRecord { mnemonic, description, opcodes };
            for (mode, op) in record.modes() {
                decode.insert(op, (mnemonic, mode));
            }
            records.insert(mnemonic, record);
        }
        Self { records, decode }
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> &'static InstructionTable {
        &SHARED
    }

    /// Looks up an upper-case mnemonic.
    pub fn get(&self, mnemonic: &str) -> Option<&InstructionRecord> {
        self.records.get(mnemonic)
    }

    /// Reverse lookup used by the disassembler.
    pub fn decode(&self, opcode: u8) -> Option<(&InstructionRecord, AddressingMode)> {
        let (mnemonic, mode) = self.decode.get(&opcode)?;
        Some((self.records.get(mnemonic)?, *mode))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstructionRecord> {
        self.records.values()
    }
}

impl Default for InstructionTable {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! opc {
    (__) => {
        None
    };
    ($op:literal) => {
        Some($op)
    };
}

macro_rules! instructions {
    ($($mne:literal [$($op:tt)*] $desc:literal;)*) => {
        &[$(($mne, [$(opc!($op)),*], $desc),)*]
    };
}

type Row = (&'static str, [Option<u8>; AddressingMode::COUNT], &'static str);

// Columns: ** IM ZP ZX ZY AB AX AY IN IX IY JR JA AC
#[rustfmt::skip]
static MOS6502: &[Row] = instructions! {
    "ADC" [__   0x69 0x65 0x75 __   0x6D 0x7D 0x79 __   0x61 0x71 __   __   __  ] "Add Memory to Accu with Carry";
    "AND" [__   0x29 0x25 0x35 __   0x2D 0x3D 0x39 __   0x21 0x31 __   __   __  ] "AND Memory with Accu";
    "ASL" [__   __   0x06 0x16 __   0x0E 0x1E __   __   __   __   __   __   0x0A] "Shift Left One Bit";
    "BCC" [__   __   __   __   __   __   __   __   __   __   __   0x90 __   __  ] "Branch on Carry Clear";
    "BCS" [__   __   __   __   __   __   __   __   __   __   __   0xB0 __   __  ] "Branch on Carry Set";
    "BEQ" [__   __   __   __   __   __   __   __   __   __   __   0xF0 __   __  ] "Branch on Result Zero";
    "BIT" [__   __   0x24 __   __   0x2C __   __   __   __   __   __   __   __  ] "Test Bits in Memory with Accu";
    "BMI" [__   __   __   __   __   __   __   __   __   __   __   0x30 __   __  ] "Branch on Result Minus";
    "BNE" [__   __   __   __   __   __   __   __   __   __   __   0xD0 __   __  ] "Branch on Result not Zero";
    "BPL" [__   __   __   __   __   __   __   __   __   __   __   0x10 __   __  ] "Branch on Result Plus";
    "BRK" [0x00 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Force Break";
    "BVC" [__   __   __   __   __   __   __   __   __   __   __   0x50 __   __  ] "Branch on Overflow Clear";
    "BVS" [__   __   __   __   __   __   __   __   __   __   __   0x70 __   __  ] "Branch on Overflow Set";
    "CLC" [0x18 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Clear Carry Flag";
    "CLD" [0xD8 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Clear Decimal Flag";
    "CLI" [0x58 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Clear Interrupt Disable Bit";
    "CLV" [0xB8 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Clear Overflow Flag";
    "CMP" [__   0xC9 0xC5 0xD5 __   0xCD 0xDD 0xD9 __   0xC1 0xD1 __   __   __  ] "Compare Memory with Accu";
    "CPX" [__   0xE0 0xE4 __   __   0xEC __   __   __   __   __   __   __   __  ] "Compare Memory and Index X";
    "CPY" [__   0xC0 0xC4 __   __   0xCC __   __   __   __   __   __   __   __  ] "Compare Memory and Index Y";
    "DEC" [__   __   0xC6 0xD6 __   0xCE 0xDE __   __   __   __   __   __   __  ] "Decrement Memory by One";
    "DEX" [0xCA __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Decrement Index X by One";
    "DEY" [0x88 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Decrement Index Y by One";
    "EOR" [__   0x49 0x45 0x55 __   0x4D 0x5D 0x59 __   0x41 0x51 __   __   __  ] "Exclusive-OR Memory with Accu";
    "INC" [__   __   0xE6 0xF6 __   0xEE 0xFE __   __   __   __   __   __   __  ] "Increment Memory by One";
    "INX" [0xE8 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Increment Index X by One";
    "INY" [0xC8 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Increment Index Y by One";
    "JMP" [__   __   __   __   __   __   __   __   0x6C __   __   __   0x4C __  ] "Jump to New Location";
    "JSR" [__   __   __   __   __   __   __   __   __   __   __   __   0x20 __  ] "Jump to New Location, Save Return";
    "LDA" [__   0xA9 0xA5 0xB5 __   0xAD 0xBD 0xB9 __   0xA1 0xB1 __   __   __  ] "Load Accu with Memory";
    "LDX" [__   0xA2 0xA6 __   0xB6 0xAE __   0xBE __   __   __   __   __   __  ] "Load Index X";
    "LDY" [__   0xA0 0xA4 0xB4 __   0xAC 0xBC __   __   __   __   __   __   __  ] "Load Index Y";
    "LSR" [__   __   0x46 0x56 __   0x4E 0x5E __   __   __   __   __   __   0x4A] "Shift One Bit Right";
    "NOP" [0xEA __   __   __   __   __   __   __   __   __   __   __   __   __  ] "No Operation";
    "ORA" [__   0x09 0x05 0x15 __   0x0D 0x1D 0x19 __   0x01 0x11 __   __   __  ] "OR Memory with Accu";
    "PHA" [0x48 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Push Accu on Stack";
    "PHP" [0x08 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Push Processor Status on Stack";
    "PLA" [0x68 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Pull Accu from Stack";
    "PLP" [0x28 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Pull Processor Status from Stack";
    "ROL" [__   __   0x26 0x36 __   0x2E 0x3E __   __   __   __   __   __   0x2A] "Rotate One Bit Left";
    "ROR" [__   __   0x66 0x76 __   0x6E 0x7E __   __   __   __   __   __   0x6A] "Rotate One Bit Right";
    "RTI" [0x40 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Return from Interrupt";
    "RTS" [0x60 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Return from Subroutine";
    "SBC" [__   0xE9 0xE5 0xF5 __   0xED 0xFD 0xF9 __   0xE1 0xF1 __   __   __  ] "Subtract Memory from Accu with Borrow";
    "SEC" [0x38 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Set Carry Flag";
    "SED" [0xF8 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Set Decimal Flag";
    "SEI" [0x78 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Set Interrupt Disable Status";
    "STA" [__   __   0x85 0x95 __   0x8D 0x9D 0x99 __   0x81 0x91 __   __   __  ] "Store Accu in Memory";
    "STX" [__   __   0x86 __   0x96 0x8E __   __   __   __   __   __   __   __  ] "Store Index X in Memory";
    "STY" [__   __   0x84 0x94 __   0x8C __   __   __   __   __   __   __   __  ] "Store Index Y in Memory";
    "TAX" [0xAA __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Transfer Accu to Index X";
    "TAY" [0xA8 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Transfer Accu to Index Y";
    "TSX" [0xBA __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Transfer Stack Pointer to Index X";
    "TXA" [0x8A __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Transfer Index X to Accu";
    "TXS" [0x9A __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Transfer Index X to Stack Pointer";
    "TYA" [0x98 __   __   __   __   __   __   __   __   __   __   __   __   __  ] "Transfer Index Y to Accu";
};
