//! Main assembler implementation

use tracing::{debug, trace, warn};

use crate::addressing::{
    absolute_candidates, label_candidates, zeropage_candidates, AddressingMode, IndexRegister,
};
use crate::error::{AsmError, Diagnostics};
use crate::fixup;
use crate::image::AssemblyImage;
use crate::opcodes::{InstructionRecord, InstructionTable};
use crate::parser::{HexValue, Item, Line, NumberParser, Operand, Parser, Pos, Target};
use crate::symbol::{SymbolTable, UnresolvedReference};

/// What to do when a label is defined a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// Later definition wins; a warning is logged.
    #[default]
    Overwrite,
    /// Redefinition is an error.
    Reject,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblerOptions {
    pub label_policy: LabelPolicy,
}

/// Assembles source text against an instruction table. Holds no state between
/// runs, so one instance can be shared freely.
pub struct Assembler<'t> {
    table: &'t InstructionTable,
    options: AssemblerOptions,
}

impl<'t> Assembler<'t> {
    pub fn new(table: &'t InstructionTable) -> Self {
        Self::with_options(table, AssemblerOptions::default())
    }

    pub fn with_options(table: &'t InstructionTable, options: AssemblerOptions) -> Self {
        Self { table, options }
    }

    pub fn options(&self) -> AssemblerOptions {
        self.options
    }

    // ===== Public API =====

    pub fn assemble(&self, source: &str) -> Result<AssemblyImage, Diagnostics> {
        self.run(source).map_err(|err| {
            debug!(error = %err, "assembly failed");
            Diagnostics::from(err)
        })
    }

    pub fn assemble_bytes(&self, source: &str) -> Result<Vec<u8>, Diagnostics> {
        Ok(self.assemble(source)?.bytes)
    }

    fn run(&self, source: &str) -> Result<AssemblyImage, AsmError> {
        debug!(lines = source.lines().count(), "assembly started");
        let mut run = Run::new(source, self.options);
        let mut parser = Parser::new(self.table, source)?;
        while let Some(line) = parser.next_line()? {
            run.statement(line)?;
        }

        let Run { mut image, symbols, references, .. } = run;
        fixup::resolve(&mut image, &symbols, &references)?;
        image.labels = symbols.addresses(image.start_address);
        debug!(
            bytes = image.len(),
            labels = symbols.len(),
            references = references.len(),
            start = image.start_address,
            "assembly finished"
        );
        Ok(image)
    }
}

/// Mutable state of one assembly run.
struct Run {
    image: AssemblyImage,
    symbols: SymbolTable,
    references: Vec<UnresolvedReference>,
    options: AssemblerOptions,
}

impl Run {
    fn new(source: &str, options: AssemblerOptions) -> Self {
        Self {
            image: AssemblyImage::new(source),
            symbols: SymbolTable::new(),
            references: Vec::new(),
            options,
        }
    }

    fn statement(&mut self, line: Line<'_>) -> Result<(), AsmError> {
        let row = line.pos.row;
        match line.item {
            Item::Org(address) => {
                trace!(row, address, "origin");
                self.image.start_address = address;
            }
            Item::Label(name) => self.define_label(name, line.pos)?,
            Item::Instruction { record, operand, operand_pos } => {
                let at = self.image.len();
                self.instruction(record, &operand, operand_pos, row)?;
                trace!(row, mnemonic = record.mnemonic, offset = at, len = self.image.len() - at, "instruction");
            }
            Item::Text { encoding, text, text_pos } => {
                for byte in encoding.encode(&text, text_pos)? {
                    self.image.push(byte, row);
                }
                trace!(row, %encoding, len = text.chars().count(), "text");
            }
        }
        Ok(())
    }

    fn define_label(&mut self, name: String, pos: Pos) -> Result<(), AsmError> {
        let Some(previous) = self.symbols.define(name.clone(), self.image.len(), pos.row) else {
            trace!(row = pos.row, label = %name, offset = self.image.len(), "label");
            return Ok(());
        };
        match self.options.label_policy {
            LabelPolicy::Overwrite => {
                warn!(label = %name, row = pos.row, first_row = previous.row, "Re-defined label");
                Ok(())
            }
            LabelPolicy::Reject => Err(AsmError::RedefinedLabel {
                pos,
                label: name,
                first_row: previous.row,
            }),
        }
    }

    fn instruction(
        &mut self,
        record: &InstructionRecord,
        operand: &Operand,
        pos: Pos,
        row: usize,
    ) -> Result<(), AsmError> {
        use AddressingMode::*;
        match operand {
            Operand::None => {
                let (_, op) = select(record, &[Implied, Accumulator], pos)?;
                self.image.push(op, row);
            }
            Operand::Immediate(digits) => {
                let value = NumberParser::byte(digits).ok_or(AsmError::ImmediateWidth { pos })?;
                let (_, op) = select(record, &[Immediate], pos)?;
                self.image.push(op, row);
                self.image.push(value, row);
            }
            Operand::Direct { target: Target::Hex(digits), index } => match NumberParser::parse(digits) {
                HexValue::Byte(value) => {
                    let (_, op) = select(record, zeropage_candidates(*index), pos)?;
                    self.image.push(op, row);
                    self.image.push(value, row);
                }
                HexValue::Word(value) => {
                    let (_, op) = select(record, absolute_candidates(*index), pos)?;
                    self.image.push(op, row);
                    self.image.push_word(value, row);
                }
                HexValue::Other => return Err(AsmError::InvalidOperand { pos }),
            },
            Operand::Direct { target: Target::Label(name), index } => {
                let (mode, op) = select(record, label_candidates(*index), pos)?;
                self.image.push(op, row);
                self.reference(name, mode, row);
            }
            Operand::Indirect { target: Target::Hex(digits), index } => {
                match (NumberParser::parse(digits), index) {
                    (HexValue::Word(value), None) => {
                        let (_, op) = select(record, &[Indirect], pos)?;
                        self.image.push(op, row);
                        self.image.push_word(value, row);
                    }
                    (HexValue::Byte(value), Some(reg)) => {
                        let mode = match reg {
                            IndexRegister::X => IndirectX,
                            IndexRegister::Y => IndirectY,
                        };
                        let (_, op) = select(record, &[mode], pos)?;
                        self.image.push(op, row);
                        self.image.push(value, row);
                    }
                    _ => return Err(AsmError::InvalidOperand { pos }),
                }
            }
            Operand::Indirect { target: Target::Label(name), index: None } => {
                let (mode, op) = select(record, &[Indirect], pos)?;
                self.image.push(op, row);
                self.reference(name, mode, row);
            }
            // pointers live in the zero page, labels are always words
            Operand::Indirect { target: Target::Label(_), index: Some(_) } => {
                return Err(AsmError::InvalidOperand { pos });
            }
            Operand::CurrentAddress => {
                let (_, op) = select(record, &[JumpAbsolute], pos)?;
                let here = self.image.address_of(self.image.len());
                self.image.push(op, row);
                self.image.push_word(here, row);
            }
        }
        Ok(())
    }

    /// Records a pending reference and emits its zero placeholder.
    fn reference(&mut self, label: &str, mode: AddressingMode, row: usize) {
        self.references.push(UnresolvedReference {
            label: label.to_string(),
            patch_position: self.image.len(),
            source_row: row,
            is_relative: mode == AddressingMode::JumpRelative,
            is_branch_adjusted: mode.is_jump(),
        });
        for _ in 0..mode.operand_len() {
            self.image.push(0, row);
        }
    }
}

/// First candidate mode the instruction has an opcode for.
fn select(
    record: &InstructionRecord,
    candidates: &[AddressingMode],
    pos: Pos,
) -> Result<(AddressingMode, u8), AsmError> {
    candidates
        .iter()
        .find_map(|&mode| record.opcode(mode).map(|op| (mode, op)))
        .ok_or(AsmError::InvalidOperand { pos })
}
