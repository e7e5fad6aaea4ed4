//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token helpers, and the file-level entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with one token of lookahead:
//! - This module: Parser struct, helper methods, `parse_file` / `parse_until`
//! - `declarations`: keyword dispatch, functions, argument lists, blocks
//! - `statements`: `return`
//! - `expressions`: flat and parenthesized expressions
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! Every error is fatal: the first violation is returned through `?` and no
//! partial tree escapes.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use crate::parser::tokens::TokenStream;
use std::fmt;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    /// `expected` did not match the token actually found
    pub(crate) fn unexpected(expected: impl fmt::Display, found: &Token) -> Self {
        ParseError {
            message: format!("expected {}, got {}", expected, found),
            location: found.location,
        }
    }

    /// The token stream ran dry while `expected` was still required
    pub(crate) fn end_of_input(
        expected: impl fmt::Display,
        location: SourceLocation,
    ) -> Self {
        ParseError {
            message: format!("expected {}, got end of input", expected),
            location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for noot
pub struct Parser {
    pub(crate) tokens: TokenStream,
    /// Location of the most recently consumed token
    pub(crate) last_location: SourceLocation,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self {
            tokens,
            last_location: SourceLocation::new(1, 0),
        }
    }

    /// Tokenize `source` completely, then build a parser over the result.
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::from_source(source).tokenize()?;
        Ok(Self::new(TokenStream::new(tokens)))
    }

    /// Parse a whole file into its root node
    pub fn parse_file(&mut self, name: impl Into<String>) -> Result<FileNode, ParseError> {
        let children = self.parse_until(TokenKind::Eof)?;

        Ok(FileNode {
            filename: name.into(),
            children,
        })
    }

    /// Parse declarations until `stop` is consumed.
    ///
    /// Separators (`;`) between declarations are dropped. Any other token
    /// that does not start a declaration is an error.
    pub(crate) fn parse_until(&mut self, stop: TokenKind) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();

        while !self.tokens.is_empty() {
            if let Some(node) = self.parse_decl()? {
                nodes.push(node);
                continue;
            }

            let token = self.advance(stop)?;
            if token.kind == stop {
                return Ok(nodes);
            }
            if token.kind != TokenKind::Semi {
                return Err(ParseError::unexpected(stop, &token));
            }
        }

        Ok(nodes)
    }

    // ===== Helper methods =====

    /// Peek at the front token; running out while `expected` is still
    /// needed is an error.
    pub(crate) fn peek(&self, expected: impl fmt::Display) -> Result<&Token, ParseError> {
        self.tokens
            .peek()
            .ok_or_else(|| ParseError::end_of_input(expected, self.last_location))
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.tokens.peek().is_some_and(|t| t.kind == kind)
    }

    /// Consume the front token whatever its kind
    pub(crate) fn advance(&mut self, expected: impl fmt::Display) -> Result<Token, ParseError> {
        match self.tokens.next() {
            Some(token) => {
                self.last_location = token.location;
                Ok(token)
            }
            None => Err(ParseError::end_of_input(expected, self.last_location)),
        }
    }

    /// Consume the front token, which must be of `kind`
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.advance(kind)?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::unexpected(kind, &token))
        }
    }

    /// Consume the front token only if it is of `kind`
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        self.check(kind) && self.advance(kind).is_ok()
    }
}
