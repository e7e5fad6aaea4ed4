//! Declaration parsing implementation
//!
//! This module handles keyword dispatch and function declarations:
//!
//! - Keyword dispatch: `func` and `return` are recognised by their literal
//!   text, they are ordinary identifiers to the lexer
//! - Function declarations: `func name(args) { body }`
//! - Typed argument lists: `(x int, y int)`, commas optional
//! - Blocks: `{ declarations }`
//!
//! # Grammar
//!
//! ```text
//! decl     ::= "func" func | "return" expr
//! func     ::= IDENT args block
//! args     ::= "(" (IDENT IDENT ","?)* ")"
//! block    ::= "{" decl* "}"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

const FUNC_KEYWORD: &str = "func";
const RETURN_KEYWORD: &str = "return";

impl Parser {
    /// Parse a declaration if the front token's text starts one.
    ///
    /// Returns `None` without consuming anything otherwise, leaving the
    /// caller to decide what the token means.
    pub(crate) fn parse_decl(&mut self) -> Result<Option<Node>, ParseError> {
        let keyword = match self.tokens.peek().map(|t| t.literal.as_str()) {
            Some(FUNC_KEYWORD) => FUNC_KEYWORD,
            Some(RETURN_KEYWORD) => RETURN_KEYWORD,
            _ => return Ok(None),
        };

        self.advance(keyword)?;
        let node: Node = match keyword {
            FUNC_KEYWORD => self.parse_func()?.into(),
            _ => self.parse_return()?.into(),
        };

        Ok(Some(node))
    }

    /// Parse function declaration: name(args) { body }
    pub(crate) fn parse_func(&mut self) -> Result<FuncNode, ParseError> {
        let name = self.expect(TokenKind::Ident)?;
        let arguments = self.parse_args()?;
        let body = self.parse_block()?;

        Ok(FuncNode {
            name: name.literal,
            arguments,
            body,
            location: name.location,
        })
    }

    /// Parse argument list: (name kind, name kind, ...)
    pub(crate) fn parse_args(&mut self) -> Result<ArgNode, ParseError> {
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        while self.peek(TokenKind::RParen)?.kind != TokenKind::RParen {
            args.push(self.parse_typed_arg()?);
            self.match_token(TokenKind::Comma);
        }

        self.expect(TokenKind::RParen)?;

        Ok(ArgNode { args })
    }

    /// Parse one `name kind` pair
    pub(crate) fn parse_typed_arg(&mut self) -> Result<Arg, ParseError> {
        let name = self.expect(TokenKind::Ident)?;
        let kind = self.expect(TokenKind::Ident)?;

        Ok(Arg::new(name.literal, kind.literal))
    }

    /// Parse block: { declarations }
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let statements = self.parse_until(TokenKind::RBrace)?;

        Ok(Block { statements })
    }
}
