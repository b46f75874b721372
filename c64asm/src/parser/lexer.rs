//! Column-sensitive tokenizer for assembly source

use std::fmt;

use crate::error::AsmError;

/// 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    /// Hex digits without the leading `$`.
    HexLiteral,
    /// String contents without the quotes.
    StringLiteral,
    Delimiter,
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, pos: Pos) -> Self {
        Self { kind, text: text.into(), pos }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for a delimiter token with exactly this text.
    pub fn is_delim(&self, text: &str) -> bool {
        self.kind == TokenKind::Delimiter && self.text == text
    }

    /// The indent token produced for leading whitespace.
    pub fn is_indent(&self) -> bool {
        self.is_delim(" ") || self.is_delim("\t")
    }

    pub fn is_newline(&self) -> bool {
        self.is_delim("\n")
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }

    /// Token text as it should appear in an "expected ..." message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::EndOfInput => "end of input".to_string(),
            _ => self.text.replace('\n', "\\n").replace('\t', "\\t"),
        }
    }
}

/// Pull tokenizer. Whitespace is skipped everywhere except at the start of a
/// line, where a leading run of spaces/tabs becomes a single indent token.
/// That token is what separates instruction lines from label lines.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    row: usize,
    col: usize,
    at_line_start: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut src: Vec<char> = source.trim_end().chars().collect();
        src.push('\n');
        Self {
            src,
            pos: 0,
            row: 1,
            col: 1,
            at_line_start: true,
        }
    }

    /// Current scan position (the character after the last token).
    pub fn position(&self) -> Pos {
        Pos::new(self.row, self.col)
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.row += 1;
            self.col = 1;
            self.at_line_start = true;
        } else {
            self.col += 1;
            self.at_line_start = false;
        }
        Some(c)
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.bump();
        }
        out
    }

    fn skip_insignificant(&mut self) {
        loop {
            match self.peek() {
                Some(';') => {
                    while matches!(self.peek(), Some(c) if c != '\n') {
                        self.bump();
                    }
                }
                Some('\r') => {
                    // keep the start-of-line state across a stray CR
                    let line_start = self.at_line_start;
                    self.bump();
                    self.at_line_start = line_start;
                }
                Some(' ' | '\t') if !self.at_line_start => {
                    self.bump();
                }
                _ => return,
            }
        }
    }

    pub fn next_token(&mut self) -> Result<Token, AsmError> {
        self.skip_insignificant();
        let start = self.position();
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::EndOfInput, "", start));
        };

        if self.at_line_start && (c == ' ' || c == '\t') {
            self.take_while(|c| c == ' ' || c == '\t');
            return Ok(Token::new(TokenKind::Delimiter, c.to_string(), start));
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let ident = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
            return Ok(Token::new(TokenKind::Identifier, ident, start));
        }

        if c == '$' {
            self.bump();
            let digits = self.take_while(|c| c.is_ascii_hexdigit());
            if digits.is_empty() {
                return Err(AsmError::EmptyHex { pos: start });
            }
            return Ok(Token::new(TokenKind::HexLiteral, digits, start));
        }

        if c == '"' {
            self.bump();
            let text = self.take_while(|c| c != '"' && c != '\n');
            if self.peek() != Some('"') {
                return Err(AsmError::UnterminatedString { pos: start });
            }
            self.bump();
            return Ok(Token::new(TokenKind::StringLiteral, text, start));
        }

        if c == '\n' || c.is_ascii_graphic() {
            self.bump();
            return Ok(Token::new(TokenKind::Delimiter, c.to_string(), start));
        }

        Err(AsmError::UnexpectedChar { pos: start, ch: c })
    }

    /// Tokenizes the whole input, end-of-input token included.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, AsmError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let end = tok.is_end();
            tokens.push(tok);
            if end {
                return Ok(tokens);
            }
        }
    }
}
