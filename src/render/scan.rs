use std::collections::{HashMap, HashSet};

use tera::ast::{Expr, ExprVal, FunctionCall, Node};

use crate::args::Arguments;

/// Variables Tera provides on its own.
const BUILTIN_VARIABLES: &[&str] = &["loop", "__tera_context"];

/// Collect every variable a parsed template refers to that is neither an
/// argument nor bound inside the template itself, in source order.
///
/// Tera quietly treats some undefined names as falsy (`{% if x %}`), so the
/// tree is checked up front instead of relying on render errors. Names are
/// reported by their root: `{{ user.name }}` needs `user`. Uses guarded by
/// `is defined`, and values piped through `default`, are not required.
pub fn undefined_variables(ast: &[Node], arguments: &Arguments) -> Vec<String> {
    let mut scanner = Scanner {
        arguments,
        frames: vec![HashSet::new()],
        guards: Vec::new(),
        missing: Vec::new(),
    };
    scanner.nodes(ast);
    scanner.missing
}

/// The variable an identifier path starts from: `user` for `user.name` or `items[0]`.
pub fn root_name(ident: &str) -> &str {
    ident.split(['.', '[']).next().unwrap_or(ident)
}

struct Scanner<'a> {
    arguments: &'a Arguments,
    /// Names bound by `set` and `for`, innermost loop last.
    frames: Vec<HashSet<String>>,
    /// Names checked with `is defined` by an enclosing `if`.
    guards: Vec<String>,
    missing: Vec<String>,
}

impl Scanner<'_> {
    fn nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn node(&mut self, node: &Node) {
        match node {
            Node::VariableBlock(_, expr) => self.expr(expr),
            Node::Set(_, set) => {
                self.expr(&set.value);
                self.bind(&set.key, set.global);
            }
            Node::Forloop(_, forloop, _) => {
                self.expr(&forloop.container);
                self.frames.push(HashSet::new());
                if let Some(key) = &forloop.key {
                    self.bind(key, false);
                }
                self.bind(&forloop.value, false);
                self.nodes(&forloop.body);
                self.frames.pop();
                if let Some(empty_body) = &forloop.empty_body {
                    self.nodes(empty_body);
                }
            }
            Node::If(if_node, _) => {
                let guard_len = self.guards.len();
                for (_, condition, _) in &if_node.conditions {
                    definition_tests(condition, &mut self.guards);
                }
                for (_, condition, body) in &if_node.conditions {
                    self.expr(condition);
                    self.nodes(body);
                }
                if let Some((_, body)) = &if_node.otherwise {
                    self.nodes(body);
                }
                self.guards.truncate(guard_len);
            }
            Node::FilterSection(_, section, _) => {
                self.call(&section.filter);
                self.nodes(&section.body);
            }
            Node::Block(_, block, _) => self.nodes(&block.body),
            _ => {}
        }
    }

    fn expr(&mut self, expr: &Expr) {
        let has_default = expr.filters.iter().any(|f| f.name == "default");
        match &expr.val {
            ExprVal::Ident(ident) if !has_default => self.reference(ident),
            ExprVal::Math(math) => {
                self.expr(&math.lhs);
                self.expr(&math.rhs);
            }
            ExprVal::Logic(logic) => {
                self.expr(&logic.lhs);
                self.expr(&logic.rhs);
            }
            ExprVal::In(in_expr) => {
                self.expr(&in_expr.lhs);
                self.expr(&in_expr.rhs);
            }
            ExprVal::Test(test) => {
                if !is_definition_test(&test.name) {
                    self.reference(&test.ident);
                }
                for arg in &test.args {
                    self.expr(arg);
                }
            }
            ExprVal::FunctionCall(call) => self.call(call),
            ExprVal::MacroCall(call) => self.args(&call.args),
            ExprVal::Array(items) => {
                for item in items {
                    self.expr(item);
                }
            }
            ExprVal::StringConcat(concat) => {
                for value in &concat.values {
                    if let ExprVal::Ident(ident) = value {
                        self.reference(ident);
                    }
                }
            }
            _ => {}
        }
        for filter in &expr.filters {
            self.call(filter);
        }
    }

    fn call(&mut self, call: &FunctionCall) {
        self.args(&call.args);
    }

    fn args(&mut self, args: &HashMap<String, Expr>) {
        let mut args: Vec<_> = args.iter().collect();
        args.sort_by(|a, b| a.0.cmp(b.0));
        for (_, arg) in args {
            self.expr(arg);
        }
    }

    fn bind(&mut self, name: &str, global: bool) {
        let frame = if global {
            self.frames.first_mut()
        } else {
            self.frames.last_mut()
        };
        if let Some(frame) = frame {
            frame.insert(name.to_string());
        }
    }

    fn reference(&mut self, ident: &str) {
        let name = root_name(ident);
        let bound = self.arguments.contains_key(name)
            || BUILTIN_VARIABLES.contains(&name)
            || self.guards.iter().any(|g| g == name)
            || self.frames.iter().any(|f| f.contains(name));
        if !bound && !self.missing.iter().any(|m| m == name) {
            self.missing.push(name.to_string());
        }
    }
}

fn is_definition_test(name: &str) -> bool {
    name == "defined" || name == "undefined"
}

/// Names tested with `is defined` / `is undefined` anywhere in a condition.
fn definition_tests(expr: &Expr, guards: &mut Vec<String>) {
    match &expr.val {
        ExprVal::Test(test) if is_definition_test(&test.name) => {
            guards.push(root_name(&test.ident).to_string());
        }
        ExprVal::Logic(logic) => {
            definition_tests(&logic.lhs, guards);
            definition_tests(&logic.rhs, guards);
        }
        _ => {}
    }
}
