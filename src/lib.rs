//! # Introduction
//!
//! noot is the front end of a tiny C-like toy language. It tokenizes a
//! source stream, parses the tokens into an AST and exports that tree as a
//! Graphviz graph for visualisation.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Token list → TokenStream → Parser → AST → DOT text
//! ```
//!
//! 1. [`parser::lexer`] — character stream to tokens, with an implicit `;`
//!    at the end of a line that ends on an identifier, integer or `)`.
//! 2. [`parser::tokens`] — FIFO over the fully materialized token list.
//! 3. [`parser::parse`] — recursive descent parser producing a
//!    [`parser::ast::FileNode`].
//! 4. [`graph`] — pre-order walk writing `strict digraph` text.
//!
//! ## Language
//!
//! ```text
//! func add(x int, y int) {
//!     return (x + y)
//! }
//! ```
//!
//! Functions with typed argument lists, blocks, `return`, and arithmetic
//! expressions recorded as flat token runs. Nothing is type checked or
//! evaluated, and the first structural error aborts the parse.

pub mod graph;
pub mod parser;

use parser::ast::FileNode;
use parser::lexer::{LexError, Lexer, Token};
use parser::parse::{ParseError, Parser};
use parser::tokens::TokenStream;
use std::fmt;
use std::io::{self, Read};

/// Any failure of the whole pipeline
#[derive(Debug)]
pub enum NootError {
    Io(io::Error),
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for NootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NootError::Io(e) => write!(f, "I/O error: {}", e),
            NootError::Lex(e) => write!(f, "{}", e),
            NootError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for NootError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NootError::Io(e) => Some(e),
            NootError::Lex(e) => Some(e),
            NootError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for NootError {
    fn from(err: io::Error) -> Self {
        NootError::Io(err)
    }
}

impl From<LexError> for NootError {
    fn from(err: LexError) -> Self {
        NootError::Lex(err)
    }
}

impl From<ParseError> for NootError {
    fn from(err: ParseError) -> Self {
        NootError::Parse(err)
    }
}

/// Read `reader` to exhaustion and return every token, EOF included.
pub fn tokenize<R: Read>(reader: R) -> Result<Vec<Token>, LexError> {
    Lexer::new(reader).tokenize()
}

/// Parse an already tokenized file named `name`.
pub fn parse_tokens(name: &str, tokens: Vec<Token>) -> Result<FileNode, ParseError> {
    Parser::new(TokenStream::new(tokens)).parse_file(name)
}

/// Run the whole pipeline over `reader`, returning the DOT text.
pub fn compile_to_dot<R: Read>(reader: R, name: &str) -> Result<String, NootError> {
    let tokens = tokenize(reader)?;
    let file = parse_tokens(name, tokens)?;
    Ok(graph::render(&file))
}

/// One `line:column<TAB>KIND<TAB>literal` row per token
pub fn token_table(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| {
            format!(
                "{}:{}\t{}\t{}\n",
                t.location.line, t.location.column, t.kind, t.literal
            )
        })
        .collect()
}
