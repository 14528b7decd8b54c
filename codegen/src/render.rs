//! Writes the code model as Rust source text.
//!
//! The layout is fixed: four space indents and one statement per line.
//! Struct expressions, and vectors or arrays of anything but plain values,
//! get one element per line. Every string literal is written through Rust's
//! own escaping so that any text in a NodeSet yields a valid literal.

use crate::code::{Expr, Function, Module, Stmt, Use, UseTree};

const INDENT: &str = "    ";

/// Returns the source text of the module.
pub fn render(module: &Module) -> String {
    let mut renderer = ModuleRenderer::new();
    renderer.module(module);
    renderer.buffer
}

struct ModuleRenderer {
    buffer: String,
    indents: usize,
}

impl ModuleRenderer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
            indents: 0,
        }
    }

    fn write(&mut self, val: &str) {
        self.buffer.push_str(val);
    }

    fn write_indent(&mut self) {
        self.buffer.push_str(INDENT.repeat(self.indents).as_str());
    }

    fn newline(&mut self) {
        self.buffer.push('\n');
    }

    fn indent(&mut self) {
        self.indents += 1;
    }

    fn outdent(&mut self) {
        self.indents -= 1;
    }

    /// Starts a new top level item, separated by a blank line from the
    /// previous one.
    fn separate(&mut self) {
        if !self.buffer.is_empty() {
            self.newline();
        }
    }

    fn module(&mut self, module: &Module) {
        for line in &module.header {
            if line.is_empty() {
                self.write("//");
            } else {
                self.write("// ");
                self.write(line);
            }
            self.newline();
        }

        if !module.children.is_empty() {
            self.separate();
            for child in &module.children {
                self.write("mod ");
                self.write(child);
                self.write(";");
                self.newline();
            }
        }

        for declaration in &module.uses {
            self.separate();
            self.use_declaration(declaration);
        }

        for function in &module.functions {
            self.separate();
            self.function(function);
        }
    }

    fn attributes(&mut self, attributes: &[String]) {
        for attribute in attributes {
            self.write_indent();
            self.write("#[");
            self.write(attribute);
            self.write("]");
            self.newline();
        }
    }

    fn use_declaration(&mut self, declaration: &Use) {
        self.attributes(&declaration.attributes);
        self.write("use ");
        match &declaration.tree {
            UseTree::Group(prefix, items)
                if items.iter().any(|item| matches!(item, UseTree::Group(..))) =>
            {
                self.write(prefix);
                self.write("::{");
                self.newline();
                self.indent();
                for item in items {
                    self.write_indent();
                    self.use_tree(item);
                    self.write(",");
                    self.newline();
                }
                self.outdent();
                self.write("}");
            }
            tree => self.use_tree(tree),
        }
        self.write(";");
        self.newline();
    }

    fn use_tree(&mut self, tree: &UseTree) {
        match tree {
            UseTree::Path(path) => self.write(path),
            UseTree::Group(prefix, items) => {
                self.write(prefix);
                self.write("::{");
                let mut it = items.iter().peekable();
                while let Some(item) = it.next() {
                    self.use_tree(item);
                    if it.peek().is_some() {
                        self.write(", ");
                    }
                }
                self.write("}");
            }
        }
    }

    fn function(&mut self, function: &Function) {
        self.attributes(&function.attributes);
        if function.public {
            self.write("pub ");
        }
        self.write("fn ");
        self.write(&function.name);
        self.write("(");
        let params: Vec<String> = function
            .params
            .iter()
            .map(|param| format!("{}: {}", param.name, param.ty))
            .collect();
        self.write(&params.join(", "));
        self.write(") {");
        self.newline();

        self.indent();
        for stmt in &function.body {
            self.stmt(stmt);
        }
        self.outdent();

        self.write("}");
        self.newline();
    }

    fn stmt(&mut self, stmt: &Stmt) {
        self.write_indent();
        match stmt {
            Stmt::Comment(text) => {
                self.write("// ");
                self.write(text);
            }
            Stmt::Let {
                name,
                mutable,
                value,
            } => {
                self.write("let ");
                if *mutable {
                    self.write("mut ");
                }
                self.write(name);
                self.write(" = ");
                self.expr(value);
                self.write(";");
            }
            Stmt::Expr(expr) => {
                self.expr(expr);
                self.write(";");
            }
        }
        self.newline();
    }

    fn comma_separated(&mut self, items: &[Expr]) {
        let mut it = items.iter().peekable();
        while let Some(item) = it.next() {
            self.expr(item);
            if it.peek().is_some() {
                self.write(", ");
            }
        }
    }

    /// Writes the items one per line, each followed by a comma. Lists of
    /// plain values stay on one line.
    fn lines(&mut self, open: &str, items: &[Expr], close: &str) {
        self.write(open);
        if items.iter().all(is_atom) {
            self.comma_separated(items);
            self.write(close);
            return;
        }
        self.newline();
        self.indent();
        for item in items {
            self.write_indent();
            self.expr(item);
            self.write(",");
            self.newline();
        }
        self.outdent();
        self.write_indent();
        self.write(close);
    }

    fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Path(path) => self.write(path),
            Expr::Str(text) => self.write(&format!("{:?}", text)),
            Expr::Bool(value) => self.write(if *value { "true" } else { "false" }),
            Expr::Number(value) => self.write(value),
            Expr::Ref(inner) => {
                self.write("&");
                self.expr(inner);
            }
            Expr::Call { callee, args } => {
                self.write(callee);
                self.write("(");
                self.comma_separated(args);
                self.write(")");
            }
            Expr::MethodCall {
                receiver,
                method,
                generics,
                args,
            } => {
                self.expr(receiver);
                self.write(".");
                self.write(method);
                if !generics.is_empty() {
                    self.write("::<");
                    self.write(&generics.join(", "));
                    self.write(">");
                }
                self.write("(");
                self.comma_separated(args);
                self.write(")");
            }
            Expr::Macro { name, args } => {
                self.write(name);
                self.write("!(");
                self.comma_separated(args);
                self.write(")");
            }
            Expr::Tuple(items) => {
                self.write("(");
                self.comma_separated(items);
                if items.len() == 1 {
                    self.write(",");
                }
                self.write(")");
            }
            Expr::Vec(items) => self.lines("vec![", items, "]"),
            Expr::Array(items) => self.lines("[", items, "]"),
            Expr::Struct { path, fields } => {
                self.write(path);
                self.write(" {");
                if fields.is_empty() {
                    self.write("}");
                    return;
                }
                self.newline();
                self.indent();
                for (name, value) in fields {
                    self.write_indent();
                    self.write(name);
                    self.write(": ");
                    self.expr(value);
                    self.write(",");
                    self.newline();
                }
                self.outdent();
                self.write_indent();
                self.write("}");
            }
        }
    }
}

fn is_atom(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Path(_) | Expr::Str(_) | Expr::Bool(_) | Expr::Number(_)
    )
}
