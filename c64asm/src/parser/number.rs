//! Hex literal width handling

/// A hex literal classified by its digit count. Only two- and four-digit
/// literals have a meaning downstream; anything else is kept so the caller
/// can report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexValue {
    Byte(u8),
    Word(u16),
    Other,
}

pub struct NumberParser;

impl NumberParser {
    /// Classify lexer hex digits (without the `$` prefix).
    pub fn parse(digits: &str) -> HexValue {
        match digits.len() {
            2 => u8::from_str_radix(digits, 16).map_or(HexValue::Other, HexValue::Byte),
            4 => u16::from_str_radix(digits, 16).map_or(HexValue::Other, HexValue::Word),
            _ => HexValue::Other,
        }
    }

    /// Exactly two hex digits.
    pub fn byte(digits: &str) -> Option<u8> {
        match Self::parse(digits) {
            HexValue::Byte(b) => Some(b),
            _ => None,
        }
    }

    /// Exactly four hex digits.
    pub fn word(digits: &str) -> Option<u16> {
        match Self::parse(digits) {
            HexValue::Word(w) => Some(w),
            _ => None,
        }
    }
}
