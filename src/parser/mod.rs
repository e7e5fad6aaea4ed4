//! noot source code parser
//!
//! This module transforms noot source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (character stream → tokens)
//! - [`tokens`]: FIFO view over the token list
//! - [`parse`]: Parser entry point and shared helpers (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported Language
//!
//! - Declarations: `func name(arg type, ...) { ... }`, nestable
//! - Statements: `return <expr>`
//! - Expressions: identifiers, integers, `+ - * / =`, parentheses
//! - Statements end with `;` or a newline after an identifier, integer or `)`
//! - `func` and `return` are contextual: recognised by their text where a
//!   declaration may start, plain identifiers everywhere else
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! Expressions are kept as flat token runs; no precedence is resolved.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
pub mod tokens;
