//! A small model of the Rust code that the emitter generates.
//!
//! The emitter builds values of these types and [`crate::render`] turns them
//! into text. Free text such as names and descriptions is held as
//! [`Expr::Str`] and only becomes a string literal when rendered.

/// A generated source file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    /// Comment lines at the top of the file, without the `//` marker.
    pub header: Vec<String>,
    /// Child modules, declared as `mod <name>;`.
    pub children: Vec<String>,
    pub uses: Vec<Use>,
    pub functions: Vec<Function>,
}

/// A `use` declaration with its attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Use {
    pub attributes: Vec<String>,
    pub tree: UseTree,
}

impl Use {
    pub fn new(tree: UseTree) -> Self {
        Self {
            attributes: vec![],
            tree,
        }
    }

    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attributes.push(attribute.to_string());
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UseTree {
    /// A path such as `log::trace` or `types::*`.
    Path(String),
    /// A path prefix with a group of trees, `prefix::{a, b}`.
    Group(String, Vec<UseTree>),
}

impl UseTree {
    pub fn path(path: &str) -> Self {
        UseTree::Path(path.to_string())
    }

    pub fn group(prefix: &str, items: Vec<UseTree>) -> Self {
        UseTree::Group(prefix.to_string(), items)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub attributes: Vec<String>,
    pub public: bool,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            name: name.to_string(),
            ty: ty.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Comment(String),
    Let {
        name: String,
        mutable: bool,
        value: Expr,
    },
    Expr(Expr),
}

impl Stmt {
    pub fn let_(name: &str, value: Expr) -> Self {
        Stmt::Let {
            name: name.to_string(),
            mutable: false,
            value,
        }
    }

    pub fn let_mut(name: &str, value: Expr) -> Self {
        Stmt::Let {
            name: name.to_string(),
            mutable: true,
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A path or name, written as is.
    Path(String),
    /// Text, written as an escaped string literal.
    Str(String),
    Bool(bool),
    /// A number, already written with any suffix it needs.
    Number(String),
    /// A borrow, `&expr`.
    Ref(Box<Expr>),
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    MethodCall {
        receiver: Box<Expr>,
        method: String,
        generics: Vec<String>,
        args: Vec<Expr>,
    },
    /// A macro invocation with parentheses, `name!(args)`.
    Macro {
        name: String,
        args: Vec<Expr>,
    },
    Tuple(Vec<Expr>),
    /// A `vec![...]` with one element per line.
    Vec(Vec<Expr>),
    /// An array `[...]` with one element per line.
    Array(Vec<Expr>),
    /// A struct expression with one field per line.
    Struct {
        path: String,
        fields: Vec<(String, Expr)>,
    },
}

impl Expr {
    pub fn path(path: &str) -> Self {
        Expr::Path(path.to_string())
    }

    pub fn str(text: &str) -> Self {
        Expr::Str(text.to_string())
    }

    pub fn number(value: impl ToString) -> Self {
        Expr::Number(value.to_string())
    }

    pub fn reference(expr: Expr) -> Self {
        Expr::Ref(Box::new(expr))
    }

    pub fn call(callee: &str, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: callee.to_string(),
            args,
        }
    }

    pub fn method(receiver: Expr, method: &str, args: Vec<Expr>) -> Self {
        Expr::MethodCall {
            receiver: Box::new(receiver),
            method: method.to_string(),
            generics: vec![],
            args,
        }
    }

    pub fn some(expr: Expr) -> Self {
        Expr::call("Some", vec![expr])
    }

    pub fn none() -> Self {
        Expr::path("None")
    }

    /// `Some(expr)` when there is a value, otherwise `None`.
    pub fn option(expr: Option<Expr>) -> Self {
        match expr {
            Some(expr) => Expr::some(expr),
            None => Expr::none(),
        }
    }
}
