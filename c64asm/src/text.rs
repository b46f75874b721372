//! `.text` / `.screen` character encodings

use strum::{Display, EnumString};

use crate::error::AsmError;
use crate::parser::Pos;

/// PETSCII codes 32..=95.
const PETSCII: [char; 64] = [
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '£', ']', '↑', '←',
];

/// Screen codes 0..=63.
const SCREEN: [char; 64] = [
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '£', ']', '↑', '←',
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Encoding {
    #[strum(serialize = "text")]
    Petscii,
    #[strum(serialize = "screen")]
    Screen,
}

impl Encoding {
    pub fn encode_char(self, ch: char) -> Option<u8> {
        let (page, base) = match self {
            Encoding::Petscii => (&PETSCII, 32),
            Encoding::Screen => (&SCREEN, 0),
        };
        page.iter().position(|&c| c == ch).map(|i| (i + base) as u8)
    }

    /// Encodes a string literal whose opening quote sits at `pos`.
    pub fn encode(self, text: &str, pos: Pos) -> Result<Vec<u8>, AsmError> {
        text.chars()
            .enumerate()
            .map(|(i, ch)| {
                self.encode_char(ch).ok_or(AsmError::UnmappableChar {
                    pos: Pos::new(pos.row, pos.col + 1 + i),
                    ch,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_petscii() {
        assert_eq!(Encoding::Petscii.encode_char(' '), Some(0x20));
        assert_eq!(Encoding::Petscii.encode_char('A'), Some(0x41));
        assert_eq!(Encoding::Petscii.encode_char('H'), Some(0x48));
        assert_eq!(Encoding::Petscii.encode_char('0'), Some(0x30));
        assert_eq!(Encoding::Petscii.encode_char('£'), Some(0x5C));
        assert_eq!(Encoding::Petscii.encode_char('a'), None);
    }

    #[test]
    fn test_screen_codes() {
        assert_eq!(Encoding::Screen.encode_char('@'), Some(0x00));
        assert_eq!(Encoding::Screen.encode_char('A'), Some(0x01));
        assert_eq!(Encoding::Screen.encode_char(' '), Some(0x20));
        assert_eq!(Encoding::Screen.encode_char('#'), Some(0x23));
        assert_eq!(Encoding::Screen.encode_char('?'), Some(0x3F));
        assert_eq!(Encoding::Screen.encode_char('~'), None);
    }

    #[test]
    fn test_encode_reports_column() {
        let err = Encoding::Petscii.encode("HI!x", Pos::new(4, 11)).unwrap_err();
        assert!(matches!(err, AsmError::UnmappableChar { pos, ch: 'x' } if pos == Pos::new(4, 15)));
        assert_eq!(Encoding::Screen.encode("HI", Pos::default()).unwrap(), vec![0x08, 0x09]);
    }

    #[test]
    fn test_directive_names() {
        assert_eq!("text".parse::<Encoding>().unwrap(), Encoding::Petscii);
        assert_eq!("screen".parse::<Encoding>().unwrap(), Encoding::Screen);
        assert!("TEXT".parse::<Encoding>().is_err());
        assert!("SCREEN".parse::<Encoding>().is_err());
        assert!("byte".parse::<Encoding>().is_err());
        assert_eq!(Encoding::Screen.to_string(), "screen");
    }
}
