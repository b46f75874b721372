//! C64 6502 assembler with optional human-readable listing (feature: "listing")
//! - Strict hex-only syntax (`$` for hex numbers)
//! - Column-sensitive lines: labels start in column 1, instructions are indented
//! - Two passes: bytes are emitted with placeholders, label references are patched afterwards
//!
//! ## Features
//! - **Directives**:
//!   - `* = $xxxx`: set the image start address (last one wins).
//!   - `.text "..."`: PETSCII bytes.
//!   - `.screen "..."`: screen-code bytes.
//! - **Addressing modes**: implied, accumulator, immediate, zeropage[,x/y],
//!   absolute[,x/y], indirect, (zp,x), (zp),y, relative branches.
//! - **Current address**: `jmp *` jumps to itself.
//! - **Reference decoder**: [`disasm::disassemble`] turns an image back into instructions.
//!
//! ## Optional Features
//! - `listing`: hex listings of an image and the flat [`assemble6502`] result record.
//!
//! ## Basic Usage
//! ```rust
//! fn main() -> Result<(), c64asm::Diagnostics> {
//!     let src = "* = $0800\nstart\n    lda #$42\n    sta $0200\n    bne start\n";
//!
//!     let image = c64asm::assemble(src)?;
//!     assert_eq!(image.start_address, 0x0800);
//!     assert_eq!(image.bytes, vec![0xA9, 0x42, 0x8D, 0x00, 0x02, 0xD0, 0xF9]);
//!     Ok(())
//! }
//! ```

mod addressing;
mod assembler;
pub mod disasm;
mod error;
mod fixup;
mod image;
#[cfg(feature = "listing")]
mod listing;
mod opcodes;
pub mod parser;
#[cfg(feature = "listing")]
mod report;
mod symbol;
mod text;

// Public exports
pub use addressing::{AddressingMode, IndexRegister};
pub use assembler::{Assembler, AssemblerOptions, LabelPolicy};
pub use error::{AsmError, Diagnostics, ErrorClass};
pub use image::AssemblyImage;
#[cfg(feature = "listing")]
pub use listing::ListingFormat;
pub use opcodes::{InstructionRecord, InstructionTable};
#[cfg(feature = "listing")]
pub use report::{assemble6502, AssembleResult};
pub use text::Encoding;

/// Assembles `source` with the process-wide instruction table and default options.
pub fn assemble(source: &str) -> Result<AssemblyImage, Diagnostics> {
    Assembler::new(InstructionTable::shared()).assemble(source)
}
