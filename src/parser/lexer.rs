//! Lexer (tokenizer) for noot source code
//!
//! Reads a byte stream one character at a time and produces a flat [`Token`]
//! list consumed by the parser. Newlines are significant: a line that ends on
//! an identifier, an integer or `)` gets an implicit `;`.

use super::ast::SourceLocation;
use std::fmt;
use std::io::{self, BufReader, Read};

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Illegal,
    Ident,
    Int,
    Semi,
    Comma,

    // Infix operators
    Add,
    Sub,
    Mul,
    Div,

    Assign,

    LParen,
    RParen,
    LBrace,
    RBrace,
}

impl TokenKind {
    /// Upper-case kind name, used in diagnostics and graph node ids.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Ident => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::Semi => "SEMI",
            TokenKind::Comma => "COMMA",
            TokenKind::Add => "ADD",
            TokenKind::Sub => "SUB",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::Assign => "ASSIGN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
        }
    }

    /// Canonical source text: the symbol for punctuation and operators, the
    /// kind name for everything else.
    pub fn canonical_text(self) -> &'static str {
        match self {
            TokenKind::Semi => ";",
            TokenKind::Comma => ",",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::Assign => "=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            other => other.name(),
        }
    }

    /// Single-character punctuation and operators.
    fn from_symbol(ch: char) -> Option<Self> {
        let kind = match ch {
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '+' => TokenKind::Add,
            '-' => TokenKind::Sub,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '=' => TokenKind::Assign,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => return None,
        };
        Some(kind)
    }

    /// Kinds after which a newline terminates the statement.
    fn ends_statement(self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::RParen | TokenKind::Int)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified token with its literal text and start location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        literal: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.literal)
    }
}

/// Lexer error type. Only raised for I/O failures; unknown characters become
/// [`TokenKind::Illegal`] tokens instead.
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Streaming lexer over any byte source
pub struct Lexer<R: Read> {
    reader: BufReader<R>,
    /// One character of lookahead handed back by [`Lexer::unread`]
    pushback: Option<char>,
    location: SourceLocation,
    last_kind: TokenKind,
}

impl<'a> Lexer<&'a [u8]> {
    /// Create a lexer over an in-memory source string.
    pub fn from_source(source: &'a str) -> Self {
        Lexer::new(source.as_bytes())
    }
}

impl<R: Read> Lexer<R> {
    /// Create a new lexer reading from `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            pushback: None,
            location: SourceLocation::new(1, 0),
            last_kind: TokenKind::Illegal,
        }
    }

    /// Tokenize the entire input. The result always ends with exactly one
    /// EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan the next token. Once the input is exhausted every call returns
    /// an EOF token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let Some(ch) = self.read_char()? else {
                return Ok(Token::new(TokenKind::Eof, "EOF", self.location));
            };
            let loc = self.location;

            if ch == '\n' {
                self.new_line();
                if self.last_kind.ends_statement() {
                    return Ok(self.emit(TokenKind::Semi, ";", loc));
                }
                continue;
            }

            if let Some(kind) = TokenKind::from_symbol(ch) {
                return Ok(self.emit(kind, kind.canonical_text(), loc));
            }

            if ch.is_whitespace() {
                continue;
            }

            if ch.is_numeric() {
                let literal = self.scan_while(ch, char::is_numeric)?;
                return Ok(self.emit(TokenKind::Int, literal, loc));
            }

            if ch.is_alphabetic() {
                let literal = self.scan_while(ch, char::is_alphanumeric)?;
                return Ok(self.emit(TokenKind::Ident, literal, loc));
            }

            return Ok(self.emit(TokenKind::Illegal, ch.to_string(), loc));
        }
    }

    /// Maximal munch: extend `first` while characters satisfy `belongs`.
    /// The first character that does not belong is pushed back.
    fn scan_while(
        &mut self,
        first: char,
        belongs: fn(char) -> bool,
    ) -> Result<String, LexError> {
        let mut literal = String::from(first);

        while let Some(ch) = self.read_char()? {
            if belongs(ch) {
                literal.push(ch);
            } else {
                self.unread(ch);
                break;
            }
        }

        Ok(literal)
    }

    fn emit(
        &mut self,
        kind: TokenKind,
        literal: impl Into<String>,
        location: SourceLocation,
    ) -> Token {
        self.last_kind = kind;
        Token::new(kind, literal, location)
    }

    fn new_line(&mut self) {
        self.location.line += 1;
        self.location.column = 0;
    }

    /// Read the next character, advancing the column.
    fn read_char(&mut self) -> Result<Option<char>, LexError> {
        let ch = match self.pushback.take() {
            Some(ch) => Some(ch),
            None => self.decode_char()?,
        };

        if ch.is_some() {
            self.location.column += 1;
        }

        Ok(ch)
    }

    /// Hand `ch` back to the stream; the next read returns it again.
    fn unread(&mut self, ch: char) {
        self.pushback = Some(ch);
        self.location.column -= 1;
    }

    /// Decode one UTF-8 character from the underlying reader.
    fn decode_char(&mut self) -> Result<Option<char>, LexError> {
        let mut buf = [0u8; 4];

        if !self.read_byte(&mut buf[0])? {
            return Ok(None);
        }

        let width = match buf[0] {
            0x00..=0x7f => 1,
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Err(self.invalid_utf8()),
        };

        for byte in buf.iter_mut().take(width).skip(1) {
            if !self.read_byte(byte)? {
                return Err(self.invalid_utf8());
            }
        }

        std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or_else(|| self.invalid_utf8())
    }

    /// Returns `false` on clean end of input.
    fn read_byte(&mut self, byte: &mut u8) -> Result<bool, LexError> {
        loop {
            match self.reader.read(std::slice::from_mut(byte)) {
                Ok(0) => return Ok(false),
                Ok(_) => return Ok(true),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(LexError {
                        message: format!("Failed to read input: {}", e),
                        location: self.next_location(),
                    });
                }
            }
        }
    }

    fn invalid_utf8(&self) -> LexError {
        LexError {
            message: "Input is not valid UTF-8".to_string(),
            location: self.next_location(),
        }
    }

    fn next_location(&self) -> SourceLocation {
        SourceLocation::new(self.location.line, self.location.column + 1)
    }
}
