//! Parser module for assembly source

pub mod lexer;
pub mod line;
pub mod number;

pub use lexer::{Lexer, Pos, Token, TokenKind};
pub use line::{Item, Line, Operand, Parser, Target};
pub use number::{HexValue, NumberParser};
