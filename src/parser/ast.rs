// AST (Abstract Syntax Tree) definitions for the noot front end

use crate::parser::lexer::Token;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Root of a parsed translation unit
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    pub filename: String,
    pub children: Vec<Node>,
}

/// Function declaration: `func name(args) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncNode {
    pub name: String,
    pub arguments: ArgNode,
    pub body: Block,
    pub location: SourceLocation,
}

/// Brace-delimited group of statements.
///
/// A block has no graph node of its own; the exporter hands its parent's
/// name straight to the statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Node>,
}

/// `return <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnNode {
    pub expr: ExprNode,
    pub location: SourceLocation,
}

/// A single typed argument, e.g. `x int`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub name: String,
    pub kind: String,
}

impl Arg {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Argument list in declaration order. Duplicate names are not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgNode {
    pub args: Vec<Arg>,
}

/// Structural record of an expression.
///
/// Either one wrapped sub-expression (the parenthesized form) or a flat run
/// of leaves and nested expressions in source order. Operators are kept as
/// leaves; nothing is applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExprNode {
    pub operands: Vec<Node>,
}

// Parsing and rendering grow the stack for deep nesting; dropping has to
// unwind that nesting without recursing.
impl Drop for ExprNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_nested(&mut self.operands, &mut pending);

        while let Some(mut expr) = pending.pop() {
            take_nested(&mut expr.operands, &mut pending);
        }
    }
}

fn take_nested(operands: &mut Vec<Node>, pending: &mut Vec<ExprNode>) {
    for operand in std::mem::take(operands) {
        if let Node::Expr(inner) = operand {
            pending.push(inner);
        }
    }
}

/// Leaf wrapping one token of a flat expression
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryNode {
    /// Position inside the enclosing flat expression, used for naming only
    pub index: usize,
    pub token: Token,
}

/// Nodes that can appear in a statement list or an expression.
///
/// `ArgNode` and `Block` only ever hang off a `FuncNode`, so they are held
/// by value there instead of being variants here.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Func(FuncNode),
    Return(ReturnNode),
    Expr(ExprNode),
    Unary(UnaryNode),
}

impl From<FuncNode> for Node {
    fn from(node: FuncNode) -> Self {
        Node::Func(node)
    }
}

impl From<ReturnNode> for Node {
    fn from(node: ReturnNode) -> Self {
        Node::Return(node)
    }
}

impl From<ExprNode> for Node {
    fn from(node: ExprNode) -> Self {
        Node::Expr(node)
    }
}

impl From<UnaryNode> for Node {
    fn from(node: UnaryNode) -> Self {
        Node::Unary(node)
    }
}
