//! FIFO view over a fully materialized token list
//!
//! The parser reads through this instead of the lexer so that tokenizing
//! finishes before parsing starts.

use crate::parser::lexer::Token;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Front token without consuming it
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    /// Remove and return the front token
    fn next(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tokens.len(), Some(self.tokens.len()))
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
