//! Error types for the assembler

use thiserror::Error;

use crate::parser::Pos;

/// Broad category of an [`AsmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Lexical,
    Syntax,
    Semantic,
    UnresolvedSymbol,
    Io,
}

/// A single fatal assembly error. The `Display` form is the diagnostic line
/// (`row:col:message`, or `row:message` for unresolved labels).
#[derive(Debug, Error)]
pub enum AsmError {
    #[error("{pos}:unterminated string")]
    UnterminatedString { pos: Pos },

    #[error("{pos}:expected hex digits after '$'")]
    EmptyHex { pos: Pos },

    #[error("{pos}:unexpected character '{ch}'")]
    UnexpectedChar { pos: Pos, ch: char },

    #[error("{pos}:expected {expected}")]
    Expected { pos: Pos, expected: String },

    #[error("{pos}:start address must be 2 bytes long")]
    StartAddressWidth { pos: Pos },

    #[error("{pos}:immediate value must be 1 byte long")]
    ImmediateWidth { pos: Pos },

    #[error("{pos}:unknown instruction '{mnemonic}'")]
    UnknownInstruction { pos: Pos, mnemonic: String },

    #[error("{pos}:invalid operand")]
    InvalidOperand { pos: Pos },

    #[error("{pos}:unknown character '{ch}'")]
    UnmappableChar { pos: Pos, ch: char },

    #[error("{pos}:label '{label}' already defined in row {first_row}")]
    RedefinedLabel { pos: Pos, label: String, first_row: usize },

    #[error("{row}:unresolved label '{label}'")]
    UnresolvedLabel { row: usize, label: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AsmError {
    pub(crate) fn expected(pos: Pos, expected: impl Into<String>) -> Self {
        AsmError::Expected { pos, expected: expected.into() }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            AsmError::UnterminatedString { .. }
            | AsmError::EmptyHex { .. }
            | AsmError::UnexpectedChar { .. } => ErrorClass::Lexical,
            AsmError::Expected { .. } => ErrorClass::Syntax,
            AsmError::StartAddressWidth { .. }
            | AsmError::ImmediateWidth { .. }
            | AsmError::UnknownInstruction { .. }
            | AsmError::InvalidOperand { .. }
            | AsmError::UnmappableChar { .. }
            | AsmError::RedefinedLabel { .. } => ErrorClass::Semantic,
            AsmError::UnresolvedLabel { .. } => ErrorClass::UnresolvedSymbol,
            AsmError::Io(_) => ErrorClass::Io,
        }
    }

    /// Source row the error refers to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            AsmError::UnterminatedString { pos }
            | AsmError::EmptyHex { pos }
            | AsmError::UnexpectedChar { pos, .. }
            | AsmError::Expected { pos, .. }
            | AsmError::StartAddressWidth { pos }
            | AsmError::ImmediateWidth { pos }
            | AsmError::UnknownInstruction { pos, .. }
            | AsmError::InvalidOperand { pos }
            | AsmError::UnmappableChar { pos, .. }
            | AsmError::RedefinedLabel { pos, .. } => Some(pos.row),
            AsmError::UnresolvedLabel { row, .. } => Some(*row),
            AsmError::Io(_) => None,
        }
    }
}

/// Accumulated diagnostics of a failed run. Assembly stops at the first
/// error, so in practice this holds exactly one entry.
#[derive(Debug, Default, Error)]
#[error("{}", render_lines(.errors))]
pub struct Diagnostics {
    errors: Vec<AsmError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: AsmError) {
        self.errors.push(err);
    }

    pub fn errors(&self) -> &[AsmError] {
        &self.errors
    }

    pub fn first(&self) -> Option<&AsmError> {
        self.errors.first()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// One diagnostic per line, each terminated by `\n`.
    pub fn render(&self) -> String {
        render_lines(&self.errors)
    }
}

fn render_lines(errors: &[AsmError]) -> String {
    errors.iter().map(|e| format!("{e}\n")).collect()
}

impl From<AsmError> for Diagnostics {
    fn from(err: AsmError) -> Self {
        Self { errors: vec![err] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let err = AsmError::UnknownInstruction {
            pos: Pos::new(3, 5),
            mnemonic: "FOO".to_string(),
        };
        assert_eq!(err.to_string(), "3:5:unknown instruction 'FOO'");
        assert_eq!(err.class(), ErrorClass::Semantic);
        assert_eq!(err.row(), Some(3));
    }

    #[test]
    fn test_unresolved_has_row_only() {
        let err = AsmError::UnresolvedLabel { row: 7, label: "loop".to_string() };
        assert_eq!(err.to_string(), "7:unresolved label 'loop'");
        assert_eq!(err.class(), ErrorClass::UnresolvedSymbol);
    }

    #[test]
    fn test_diagnostics_render() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());
        diags.push(AsmError::expected(Pos::new(1, 3), "'='"));
        assert_eq!(diags.render(), "1:3:expected '='\n");
        assert_eq!(diags.to_string(), "1:3:expected '='\n");
        assert_eq!(diags.errors().len(), 1);
    }

    #[test]
    fn test_diagnostics_as_error() {
        let diags = Diagnostics::from(AsmError::UnresolvedLabel { row: 2, label: "end".to_string() });
        let err: &dyn std::error::Error = &diags;
        assert_eq!(err.to_string(), "2:unresolved label 'end'\n");
        assert!(err.source().is_none());
    }
}
