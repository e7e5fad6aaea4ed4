//! Statement parsing implementation
//!
//! The only statement form besides declarations is `return <expr>`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse return statement; the `return` keyword is already consumed
    pub(crate) fn parse_return(&mut self) -> Result<ReturnNode, ParseError> {
        let location = self.last_location;
        let expr = self.parse_expr()?;

        Ok(ReturnNode { expr, location })
    }
}
