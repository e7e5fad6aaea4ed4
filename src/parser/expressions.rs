//! Expression parsing implementation
//!
//! Expressions are recorded structurally, token by token. There is no
//! precedence climbing and no operator application: `a + b * c` is the flat
//! run `[a, +, b, *, c]`.
//!
//! # Forms
//!
//! - Parenthesized: `( expr` wraps exactly one inner expression. The closing
//!   `)` is consumed by the inner flat run, not checked here.
//! - Flat: leaves and nested expressions up to and including the first `)`
//!   or `;`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// What a flat expression is waiting for, for error messages
const EXPR_TERMINATOR: &str = "SEMI or RPAREN";

// Nested parentheses recurse; grow the stack instead of overflowing it.
const STACK_RED_ZONE: usize = 32 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expr(&mut self) -> Result<ExprNode, ParseError> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || {
            if self.match_token(TokenKind::LParen) {
                let inner = self.parse_expr()?;
                return Ok(ExprNode {
                    operands: vec![inner.into()],
                });
            }

            self.parse_flat_expr()
        })
    }

    /// Parse a flat run of operands up to a terminator
    fn parse_flat_expr(&mut self) -> Result<ExprNode, ParseError> {
        let mut operands = Vec::new();

        for index in 0.. {
            let kind = self.peek(EXPR_TERMINATOR)?.kind;
            match kind {
                TokenKind::RParen | TokenKind::Semi => {
                    self.advance(EXPR_TERMINATOR)?;
                    break;
                }
                TokenKind::LParen => operands.push(self.parse_expr()?.into()),
                TokenKind::Eof => {
                    let token = self.advance(EXPR_TERMINATOR)?;
                    return Err(ParseError::unexpected(EXPR_TERMINATOR, &token));
                }
                _ => {
                    let token = self.advance(EXPR_TERMINATOR)?;
                    operands.push(UnaryNode { index, token }.into());
                }
            }
        }

        Ok(ExprNode { operands })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::TokenKind;
    use crate::parser::parse::Parser;

    fn parse_return_expr(source: &str) -> ExprNode {
        let file = Parser::from_source(source)
            .unwrap()
            .parse_file("test")
            .unwrap();

        match file.children.into_iter().next() {
            Some(Node::Return(ret)) => ret.expr,
            other => panic!("Expected return, got {:?}", other),
        }
    }

    fn leaf(node: &Node) -> &UnaryNode {
        match node {
            Node::Unary(leaf) => leaf,
            other => panic!("Expected leaf, got {:?}", other),
        }
    }

    fn sub_expr(node: &Node) -> &ExprNode {
        match node {
            Node::Expr(expr) => expr,
            other => panic!("Expected expression, got {:?}", other),
        }
    }

    #[test]
    fn test_flat_expression_keeps_token_order() {
        let expr = parse_return_expr("return a + 2 * b;");

        let kinds: Vec<TokenKind> = expr.operands.iter().map(|n| leaf(n).token.kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Ident,
                TokenKind::Add,
                TokenKind::Int,
                TokenKind::Mul,
                TokenKind::Ident,
            ]
        );
        let indices: Vec<usize> = expr.operands.iter().map(|n| leaf(n).index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_parenthesized_expression_wraps_single_operand() {
        let expr = parse_return_expr("return (x)");

        assert_eq!(expr.operands.len(), 1);
        let inner = sub_expr(&expr.operands[0]);
        assert_eq!(inner.operands.len(), 1);
        assert_eq!(leaf(&inner.operands[0]).token.literal, "x");
    }

    #[test]
    fn test_nested_group_inside_flat_run() {
        let expr = parse_return_expr("return a * (b + c) - d;");

        assert_eq!(expr.operands.len(), 5);
        assert_eq!(leaf(&expr.operands[1]).token.kind, TokenKind::Mul);

        let group = sub_expr(&expr.operands[2]);
        let inner = sub_expr(&group.operands[0]);
        assert_eq!(inner.operands.len(), 3);

        // indices follow the loop position, the group took slot 2
        assert_eq!(leaf(&expr.operands[3]).index, 3);
        assert_eq!(leaf(&expr.operands[4]).token.literal, "d");
    }

    #[test]
    fn test_unbalanced_group_is_accepted() {
        // the outer `(` never gets its own `)`
        let expr = parse_return_expr("return ((x)\n");

        let group = sub_expr(&expr.operands[0]);
        assert_eq!(group.operands.len(), 1);
    }

    #[test]
    fn test_illegal_and_assign_are_leaves() {
        let expr = parse_return_expr("return a = $;");

        assert_eq!(leaf(&expr.operands[1]).token.kind, TokenKind::Assign);
        assert_eq!(leaf(&expr.operands[2]).token.kind, TokenKind::Illegal);
    }

    #[test]
    fn test_empty_expression() {
        let expr = parse_return_expr("return ;");

        assert!(expr.operands.is_empty());
    }

    #[test]
    fn test_deeply_nested_parentheses() {
        let depth = 10_000;
        let source = format!("return {}x;", "(".repeat(depth));

        let mut expr = parse_return_expr(&source);
        let mut levels = 0;
        while let Some(Node::Expr(inner)) = expr.operands.pop() {
            expr = inner;
            levels += 1;
        }
        assert_eq!(levels, depth);
    }

    #[test]
    fn test_dropping_deep_nesting() {
        let depth = 200_000;
        let source = format!("return {}x;\n", "(".repeat(depth));

        let file = Parser::from_source(&source)
            .unwrap()
            .parse_file("deep")
            .unwrap();
        assert_eq!(file.children.len(), 1);

        drop(file);
    }
}
