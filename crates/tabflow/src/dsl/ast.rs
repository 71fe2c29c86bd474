//! A minimal compiled DSL syntax tree.
//!
//! SPEC_FULL.md §4.11 scopes this deliberately small: the original grammar
//! and its parser are out of scope (SPEC_FULL.md §1), so there is no DSL
//! source text here, only the AST shapes a parser would produce, built
//! directly by callers (or by tests) in Rust. Because there is no separate
//! textual compilation step, `Stmt`/`Expr` double as both the "AST node"
//! and the "compiled statement" SPEC_FULL.md §2/§4.6 describe. Each
//! variant carries exactly the data its evaluator needs, and dispatch in
//! `exec_block` (dsl/statement.rs) plays the role of the per-node handler.

/// A DSL expression, evaluating to an `Mv`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Lit(crate::mv::Mv),
    /// Read of a local (bind-stack) variable.
    Local(String),
    /// A binary arithmetic operation.
    BinOp(BinOp, Box<Expr>, Box<Expr>),
    /// A call to a user-defined function, by name.
    Call(String, Vec<Expr>),
}

/// The arithmetic operators the worked DSL examples exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A DSL statement. Top-level children of a `def`/`subr` body are a
/// `Vec<Stmt>` (SPEC_FULL.md §3, "Statement block").
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `return <expr>;` (legal only inside a UDF body).
    ReturnValue(Expr),
    /// `return;` (legal only inside a subroutine body).
    ReturnVoid,
    /// `local <name> = <expr>;`. Binds in the current (topmost) frame.
    LocalAssign(String, Expr),
    /// `if (<cond>) { <then> } else { <else> }`.
    If {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    /// `while (<cond>) { <body> }`.
    While { cond: Expr, body: Vec<Stmt> },
    /// `break;` inside a loop body.
    Break,
    /// `continue;` inside a loop body.
    Continue,
    /// `call <name>(<args>);`. Invokes a subroutine for side effects.
    CallSubr(String, Vec<Expr>),
    /// Build a record from name/expr pairs and emit it to `outputs`.
    /// Legal only inside a subroutine body, matching the contract that
    /// functions never emit records (SPEC_FULL.md §4.7 last paragraph).
    Emit(Vec<(String, Expr)>),
}

/// Sentinel meaning "not yet assigned" for the AST-annotation fields an
/// upstream compiler pass is required to fill in before `def`/`subr`
/// compilation (SPEC_FULL.md §4.7 step 5, §9 "AST preconditions"). Modeled
/// as `Option<usize>` rather than a magic integer; `UNUSED` is `None`.
pub const UNUSED: Option<usize> = None;

/// A `def` (function) or `subr` (subroutine) AST node, as a parser would
/// hand it to the compiler: parameter names and a body, plus the two
/// slot-allocation annotations a preceding compiler pass must have filled
/// in.
#[derive(Debug, Clone)]
pub struct DefNode {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Stmt>,
    pub max_var_depth: Option<usize>,
    pub frame_var_count: Option<usize>,
}

impl DefNode {
    /// Construct a node with both annotations left as `UNUSED`, for tests
    /// that want to exercise the "unassigned annotation" internal-coding
    /// error path.
    pub fn new_unannotated(name: impl Into<String>, parameters: Vec<String>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            parameters,
            body,
            max_var_depth: UNUSED,
            frame_var_count: UNUSED,
        }
    }

    /// Construct a fully annotated node, as if an upstream compiler pass
    /// had already run.
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<String>,
        body: Vec<Stmt>,
        max_var_depth: usize,
        frame_var_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            body,
            max_var_depth: Some(max_var_depth),
            frame_var_count: Some(frame_var_count),
        }
    }
}
