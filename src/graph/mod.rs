//! Graphviz export of a parsed file
//!
//! Walks the AST pre-order and writes a `strict digraph`: one
//! `"parent" -> "child"` edge and one `"child" [label="..."]` line per node.
//! Blocks are transparent, their statements hang directly off the
//! enclosing function.
//!
//! Node ids are derived from the parent id plus a fixed tag (`_args`,
//! `_return`, `_expr`, `_<index>_<KIND>` for leaves). [`NodeNamer`] makes
//! them unique within one render, so two `return`s in the same function do
//! not collapse into a single graph node.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use rustc_hash::FxHashMap;

const HEADER: &str = "strict digraph {\nnode [shape=box]\n";
const FOOTER: &str = "}\n";

// Nested expressions recurse once per level
const STACK_RED_ZONE: usize = 32 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

/// Render `root` as DOT text. Rendering the same tree twice yields the same
/// bytes.
pub fn render(root: &FileNode) -> String {
    let mut exporter = GraphExporter::default();
    exporter.file(root);
    exporter.out
}

/// Hands out graph node ids, suffixing `_<n>` when an id is already taken
#[derive(Debug, Default)]
pub struct NodeNamer {
    /// id -> highest suffix issued for it so far
    issued: FxHashMap<String, usize>,
}

impl NodeNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`, or the first free `base_<n>` if `base` is taken.
    pub fn claim(&mut self, base: String) -> String {
        let Some(&last) = self.issued.get(&base) else {
            self.issued.insert(base.clone(), 1);
            return base;
        };

        let mut n = last + 1;
        loop {
            let candidate = format!("{}_{}", base, n);
            if !self.issued.contains_key(&candidate) {
                self.issued.insert(base, n);
                self.issued.insert(candidate.clone(), 1);
                return candidate;
            }
            n += 1;
        }
    }
}

#[derive(Default)]
struct GraphExporter {
    out: String,
    namer: NodeNamer,
}

impl GraphExporter {
    fn file(&mut self, file: &FileNode) {
        self.out.push_str(HEADER);

        let root = self.namer.claim(file.filename.clone());
        self.out.push_str(&quote(&root));
        self.out.push('\n');

        for child in &file.children {
            self.node(child, &root);
        }

        self.out.push_str(FOOTER);
    }

    fn node(&mut self, node: &Node, parent: &str) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || match node {
            Node::Func(func) => self.func(func, parent),
            Node::Return(ret) => self.ret(ret, parent),
            Node::Expr(expr) => self.expr(expr, parent),
            Node::Unary(leaf) => self.leaf(leaf, parent),
        })
    }

    fn func(&mut self, func: &FuncNode, parent: &str) {
        let id = self.namer.claim(func.name.clone());
        self.attach(parent, &id, &func.name);

        self.args(&func.arguments, &id);
        self.block(&func.body, &id);
    }

    fn block(&mut self, block: &Block, parent: &str) {
        for statement in &block.statements {
            self.node(statement, parent);
        }
    }

    fn args(&mut self, args: &ArgNode, parent: &str) {
        let id = self.namer.claim(format!("{}_args", parent));
        self.attach(parent, &id, "args");

        for (i, arg) in args.args.iter().enumerate() {
            let arg_id = self.namer.claim(format!("{}_{}", id, i));
            self.attach(&id, &arg_id, &format!("{} {}", arg.name, arg.kind));
        }
    }

    fn ret(&mut self, ret: &ReturnNode, parent: &str) {
        let id = self.namer.claim(format!("{}_return", parent));
        self.attach(parent, &id, "return");

        self.expr(&ret.expr, &id);
    }

    fn expr(&mut self, expr: &ExprNode, parent: &str) {
        let id = self.namer.claim(format!("{}_expr", parent));
        self.attach(parent, &id, "expr");

        for operand in &expr.operands {
            self.node(operand, &id);
        }
    }

    fn leaf(&mut self, leaf: &UnaryNode, parent: &str) {
        let kind = leaf.token.kind;
        let id = self
            .namer
            .claim(format!("{}_{}_{}", parent, leaf.index, kind.name()));

        let label = match kind {
            TokenKind::Ident | TokenKind::Int => leaf.token.literal.as_str(),
            _ => kind.canonical_text(),
        };
        self.attach(parent, &id, label);
    }

    /// Edge from `parent` plus the label line for `id`
    fn attach(&mut self, parent: &str, id: &str, label: &str) {
        self.out
            .push_str(&format!("{} -> {}\n", quote(parent), quote(id)));
        self.out
            .push_str(&format!("{} [label={}]\n", quote(id), quote(label)));
    }
}

/// DOT double-quoted string
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn render_source(name: &str, source: &str) -> String {
        let file = Parser::from_source(source).unwrap().parse_file(name).unwrap();
        render(&file)
    }

    #[test]
    fn test_render_function() {
        let dot = render_source("test", "func add(x int, y int) { return (x) }");

        let expected = "\
strict digraph {
node [shape=box]
\"test\"
\"test\" -> \"add\"
\"add\" [label=\"add\"]
\"add\" -> \"add_args\"
\"add_args\" [label=\"args\"]
\"add_args\" -> \"add_args_0\"
\"add_args_0\" [label=\"x int\"]
\"add_args\" -> \"add_args_1\"
\"add_args_1\" [label=\"y int\"]
\"add\" -> \"add_return\"
\"add_return\" [label=\"return\"]
\"add_return\" -> \"add_return_expr\"
\"add_return_expr\" [label=\"expr\"]
\"add_return_expr\" -> \"add_return_expr_expr\"
\"add_return_expr_expr\" [label=\"expr\"]
\"add_return_expr_expr\" -> \"add_return_expr_expr_0_IDENT\"
\"add_return_expr_expr_0_IDENT\" [label=\"x\"]
}
";
        assert_eq!(dot, expected);
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(
            render_source("empty", ""),
            "strict digraph {\nnode [shape=box]\n\"empty\"\n}\n"
        );
    }

    #[test]
    fn test_operator_leaves_use_symbols() {
        let dot = render_source("ops", "return a - 1;");

        assert!(dot.contains("\"ops_return_expr_0_IDENT\" [label=\"a\"]"));
        assert!(dot.contains("\"ops_return_expr_1_SUB\" [label=\"-\"]"));
        assert!(dot.contains("\"ops_return_expr_2_INT\" [label=\"1\"]"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let file = Parser::from_source("func f(a int) {\nreturn a * (b + 1)\nreturn 2\n}\n")
            .unwrap()
            .parse_file("twice")
            .unwrap();

        assert_eq!(render(&file), render(&file));
    }

    #[test]
    fn test_duplicate_ids_are_disambiguated() {
        let dot = render_source("dup", "func f() {\nreturn a\nreturn b\n}\nfunc f() {}\n");

        assert!(dot.contains("\"f\" -> \"f_return\"\n"));
        assert!(dot.contains("\"f\" -> \"f_return_2\"\n"));
        assert!(dot.contains("\"f_return_2_expr\" -> \"f_return_2_expr_0_IDENT\"\n"));
        assert!(dot.contains("\"dup\" -> \"f_2\"\n"));
        assert!(dot.contains("\"f_2\" [label=\"f\"]\n"));
    }

    #[test]
    fn test_arg_edges_match_arg_count() {
        let file = Parser::from_source("func f(a int, b int c str) {}")
            .unwrap()
            .parse_file("args")
            .unwrap();
        let Some(Node::Func(func)) = file.children.first() else {
            panic!("Expected function");
        };

        let dot = render(&file);
        let edges = dot.lines().filter(|l| l.starts_with("\"f_args\" -> ")).count();
        assert_eq!(edges, func.arguments.args.len());
    }

    #[test]
    fn test_names_are_quoted() {
        let dot = render_source("my \"prog\".noot", "func main() {}");

        assert!(dot.contains("\"my \\\"prog\\\".noot\" -> \"main\""));
    }

    #[test]
    fn test_namer_skips_taken_suffixes() {
        let mut namer = NodeNamer::new();

        assert_eq!(namer.claim("a_2".to_string()), "a_2");
        assert_eq!(namer.claim("a".to_string()), "a");
        assert_eq!(namer.claim("a".to_string()), "a_3");
        assert_eq!(namer.claim("a".to_string()), "a_4");
    }
}
