//! Recursive-descent line parser
//!
//! ```text
//! line     := "*" "=" HEX newline
//!           | IDENTIFIER newline
//!           | indent IDENTIFIER operand newline
//!           | indent "." ("text"|"screen") STRING newline
//!           | indent newline
//! operand  := "#" HEX
//!           | (IDENTIFIER|HEX) [ "," ("x"|"y") ]
//!           | "(" (IDENTIFIER|HEX) [ "," "x" ] ")" [ "," "y" ]
//!           | "*"
//!           | ε
//! ```

use std::mem;

use super::lexer::{Lexer, Pos, Token, TokenKind};
use super::number::NumberParser;
use crate::addressing::IndexRegister;
use crate::error::AsmError;
use crate::opcodes::{InstructionRecord, InstructionTable};
use crate::text::Encoding;

/// Address part of an operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Hex digits without the `$`.
    Hex(String),
    Label(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Nothing before the end of the line.
    None,
    /// `#HEX`, digits only.
    Immediate(String),
    /// `target`, `target,x`, `target,y`
    Direct { target: Target, index: Option<IndexRegister> },
    /// `(target)`, `(target,x)`, `(target),y`
    Indirect { target: Target, index: Option<IndexRegister> },
    /// `*`
    CurrentAddress,
}

#[derive(Clone, Debug)]
pub enum Item<'t> {
    Org(u16),
    Label(String),
    Instruction {
        record: &'t InstructionRecord,
        operand: Operand,
        operand_pos: Pos,
    },
    Text {
        encoding: Encoding,
        text: String,
        text_pos: Pos,
    },
}

/// One parsed source line. `pos` is where its first significant token starts.
#[derive(Clone, Debug)]
pub struct Line<'t> {
    pub pos: Pos,
    pub item: Item<'t>,
}

pub struct Parser<'t> {
    table: &'t InstructionTable,
    lexer: Lexer,
    tok: Token,
}

impl<'t> Parser<'t> {
    pub fn new(table: &'t InstructionTable, source: &str) -> Result<Self, AsmError> {
        let mut lexer = Lexer::new(source);
        let tok = lexer.next_token()?;
        Ok(Self { table, lexer, tok })
    }

    /// Parses the next non-blank line, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<Line<'t>>, AsmError> {
        loop {
            if self.tok.is_end() {
                return Ok(None);
            }
            if self.tok.is_newline() {
                self.advance()?;
                continue;
            }

            let pos = self.tok.pos;
            if self.tok.is_delim("*") {
                self.advance()?;
                self.expect_delim("=")?;
                let hex = self.expect_kind(TokenKind::HexLiteral, "HEX")?;
                let address = NumberParser::word(&hex.text)
                    .ok_or(AsmError::StartAddressWidth { pos: hex.pos })?;
                self.expect_delim("\n")?;
                return Ok(Some(Line { pos, item: Item::Org(address) }));
            }

            if self.tok.is(TokenKind::Identifier) {
                let name = self.advance()?.text;
                self.expect_delim("\n")?;
                return Ok(Some(Line { pos, item: Item::Label(name) }));
            }

            if self.tok.is_indent() {
                self.advance()?;
                if self.tok.is_newline() {
                    continue;
                }
                let pos = self.tok.pos;
                let item = self.parse_statement()?;
                self.expect_delim("\n")?;
                return Ok(Some(Line { pos, item }));
            }

            return Err(AsmError::expected(self.tok.pos, "label or instruction"));
        }
    }

    fn parse_statement(&mut self) -> Result<Item<'t>, AsmError> {
        if self.tok.is(TokenKind::Identifier) {
            let mnemonic = self.advance()?;
            let upper = mnemonic.text.to_ascii_uppercase();
            let record = self.table.get(&upper).ok_or(AsmError::UnknownInstruction {
                pos: mnemonic.pos,
                mnemonic: upper,
            })?;
            let operand_pos = self.tok.pos;
            let operand = self.parse_operand()?;
            return Ok(Item::Instruction { record, operand, operand_pos });
        }

        self.expect_delim(".")?;
        let encoding = match self.tok.kind {
            TokenKind::Identifier => self.tok.text.parse::<Encoding>().ok(),
            _ => None,
        }
        .ok_or_else(|| AsmError::expected(self.tok.pos, "'text' or 'screen'"))?;
        self.advance()?;
        let text = self.expect_kind(TokenKind::StringLiteral, "STR")?;
        Ok(Item::Text { encoding, text: text.text, text_pos: text.pos })
    }

    fn parse_operand(&mut self) -> Result<Operand, AsmError> {
        if self.tok.is_delim("#") {
            self.advance()?;
            let hex = self.expect_kind(TokenKind::HexLiteral, "HEX")?;
            return Ok(Operand::Immediate(hex.text));
        }

        if self.tok.is(TokenKind::Identifier) || self.tok.is(TokenKind::HexLiteral) {
            let target = self.parse_target()?;
            let index = if self.tok.is_delim(",") {
                self.advance()?;
                Some(self.parse_register(&[IndexRegister::X, IndexRegister::Y])?)
            } else {
                None
            };
            return Ok(Operand::Direct { target, index });
        }

        if self.tok.is_delim("(") {
            self.advance()?;
            let target = self.parse_target()?;
            if self.tok.is_delim(",") {
                self.advance()?;
                let index = self.parse_register(&[IndexRegister::X])?;
                self.expect_delim(")")?;
                return Ok(Operand::Indirect { target, index: Some(index) });
            }
            self.expect_delim(")")?;
            if self.tok.is_delim(",") {
                self.advance()?;
                let index = self.parse_register(&[IndexRegister::Y])?;
                return Ok(Operand::Indirect { target, index: Some(index) });
            }
            return Ok(Operand::Indirect { target, index: None });
        }

        if self.tok.is_delim("*") {
            self.advance()?;
            return Ok(Operand::CurrentAddress);
        }

        if self.tok.is_newline() {
            return Ok(Operand::None);
        }

        Err(AsmError::InvalidOperand { pos: self.tok.pos })
    }

    fn parse_target(&mut self) -> Result<Target, AsmError> {
        match self.tok.kind {
            TokenKind::Identifier => Ok(Target::Label(self.advance()?.text)),
            TokenKind::HexLiteral => Ok(Target::Hex(self.advance()?.text)),
            _ => Err(AsmError::expected(self.tok.pos, "ID or HEX")),
        }
    }

    fn parse_register(&mut self, allowed: &[IndexRegister]) -> Result<IndexRegister, AsmError> {
        let reg = match self.tok.kind {
            TokenKind::Identifier => IndexRegister::parse(&self.tok.text),
            _ => None,
        }
        .filter(|r| allowed.contains(r));
        match reg {
            Some(reg) => {
                self.advance()?;
                Ok(reg)
            }
            None if allowed.len() == 1 && allowed[0] == IndexRegister::X => {
                Err(AsmError::expected(self.tok.pos, "'x'"))
            }
            None if allowed.len() == 1 => Err(AsmError::expected(self.tok.pos, "'y'")),
            None => Err(AsmError::expected(self.tok.pos, "'x' or 'y'")),
        }
    }

    /// Consumes the current token and returns it.
    fn advance(&mut self) -> Result<Token, AsmError> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.tok, next))
    }

    fn expect_delim(&mut self, text: &str) -> Result<Token, AsmError> {
        if self.tok.is_delim(text) {
            return self.advance();
        }
        let shown = text.replace('\n', "\\n").replace('\t', "\\t");
        Err(AsmError::expected(self.tok.pos, format!("'{shown}'")))
    }

    fn expect_kind(&mut self, kind: TokenKind, what: &str) -> Result<Token, AsmError> {
        if self.tok.is(kind) {
            return self.advance();
        }
        Err(AsmError::expected(self.tok.pos, what))
    }
}
