//! Compilation and invocation of `def` (UDF) and `subr` (subroutine) nodes
//! into callable def-sites, and a small registry to resolve calls by name
//! (SPEC_FULL.md §4.7, §4.8, §4.10).

// dependencies
use std::collections::HashMap;

use crate::dsl::ast::{DefNode, Stmt};
use crate::dsl::bind_stack::Frame;
use crate::dsl::statement::{exec_block, StatementBlock, Vars};
use crate::mv::Mv;
use crate::record::Record;

/// A compiled `def` site: name, arity, parameter names, the fenced frame
/// template cloned on every call, and the top-level statement block
/// (SPEC_FULL.md §2, "UDF definition site").
pub struct UdfDefSite {
    pub name: String,
    pub arity: usize,
    pub parameter_names: Vec<String>,
    pub frame_template: Frame,
    pub body: StatementBlock,
}

/// A compiled `subr` site. Same shape as `UdfDefSite`; the distinction is
/// enforced at compile time by `alloc_subr`'s return-statement checks
/// (SPEC_FULL.md §4.8).
pub struct SubrDefSite {
    pub name: String,
    pub arity: usize,
    pub parameter_names: Vec<String>,
    pub frame_template: Frame,
    pub body: StatementBlock,
}

/// Compile a `def` AST node into a `UdfDefSite` (SPEC_FULL.md §4.7,
/// "Compilation"). Fatal on a duplicate parameter name or a top-level
/// value-less `return` in the body; both terminate the process with a
/// nonzero exit, matching the spec's "not recoverable" contract for DSL
/// static errors (spec.md §7.2).
pub fn alloc_udf(node: &DefNode) -> UdfDefSite {
    check_duplicate_parameters(&node.name, &node.parameters);
    if contains_return_void(&node.body) {
        diagnostic_exit(&format!(
            "function \"{}\": value-less `return;` is not legal in a function body",
            node.name
        ));
    }
    UdfDefSite {
        name: node.name.clone(),
        arity: node.parameters.len(),
        parameter_names: node.parameters.clone(),
        frame_template: Frame::new_fenced(),
        body: StatementBlock::from_def_node(node),
    }
}

/// Compile a `subr` AST node into a `SubrDefSite` (SPEC_FULL.md §4.8).
/// Fatal on a duplicate parameter name or a top-level value-returning
/// `return` in the body.
pub fn alloc_subr(node: &DefNode) -> SubrDefSite {
    check_duplicate_parameters(&node.name, &node.parameters);
    if contains_return_value(&node.body) {
        diagnostic_exit(&format!(
            "subroutine \"{}\": value-returning `return <expr>;` is not legal in a subroutine body",
            node.name
        ));
    }
    SubrDefSite {
        name: node.name.clone(),
        arity: node.parameters.len(),
        parameter_names: node.parameters.clone(),
        frame_template: Frame::new_fenced(),
        body: StatementBlock::from_def_node(node),
    }
}

fn check_duplicate_parameters(name: &str, parameters: &[String]) {
    let mut seen = std::collections::HashSet::new();
    for p in parameters {
        if !seen.insert(p.as_str()) {
            diagnostic_exit(&format!(
                "function/subroutine \"{name}\": duplicate parameter name \"{p}\"; full parameter list: {parameters:?}"
            ));
        }
    }
}

// SPEC_FULL.md §4.7 step 6 / §3: "every top-level child of the body... no
// child is a value-less return". Only the direct children of the body are
// checked; a void return nested inside an if/while is legal (it just
// yields Absent at that point).
fn contains_return_void(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| matches!(stmt, Stmt::ReturnVoid))
}

fn contains_return_value(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| matches!(stmt, Stmt::ReturnValue(_)))
}

fn diagnostic_exit(msg: &str) -> ! {
    eprintln!("tabflow: {msg}");
    std::process::exit(1);
}

/// A registry mapping function/subroutine name to its def-site, consulted
/// during statement execution to resolve `Call`/`CallSubr` nodes
/// (SPEC_FULL.md §4.10, ambient supplement to the distilled spec).
#[derive(Default)]
pub struct FunctionManager {
    udfs: HashMap<String, UdfDefSite>,
    subrs: HashMap<String, SubrDefSite>,
}

impl FunctionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register a `def` node.
    pub fn register_udf(&mut self, node: &DefNode) {
        let site = alloc_udf(node);
        self.udfs.insert(site.name.clone(), site);
    }

    /// Compile and register a `subr` node.
    pub fn register_subr(&mut self, node: &DefNode) {
        let site = alloc_subr(node);
        self.subrs.insert(site.name.clone(), site);
    }

    /// Invoke a UDF by name (SPEC_FULL.md §4.7, "Invocation"). An unknown
    /// name or arity mismatch is a caller-side runtime error, represented as
    /// `Mv::Error` rather than a panic (SPEC_FULL.md §4.10).
    pub fn call_udf(&self, name: &str, args: Vec<Mv>, vars: &mut Vars) -> Mv {
        let Some(site) = self.udfs.get(name) else {
            return Mv::Error(format!("call to undefined function \"{name}\""));
        };
        if args.len() != site.arity {
            return Mv::Error(format!(
                "function \"{name}\" expects {} argument(s), got {}",
                site.arity,
                args.len()
            ));
        }
        vars.bind_stack.push(site.frame_template.clone());
        for (param, arg) in site.parameter_names.iter().zip(args) {
            vars.bind_stack.set(param, arg);
        }
        exec_block(&site.body.statements, vars, None);
        let retval = vars.return_state.take();
        vars.bind_stack.pop();
        retval
    }

    /// Invoke a subroutine by name (SPEC_FULL.md §4.8). `outputs` receives
    /// any `Emit` records the subroutine body writes.
    pub fn call_subr(&self, name: &str, args: Vec<Mv>, vars: &mut Vars, outputs: Option<&mut Vec<Record>>) {
        let Some(site) = self.subrs.get(name) else {
            eprintln!("tabflow: call to undefined subroutine \"{name}\" ignored");
            return;
        };
        if args.len() != site.arity {
            eprintln!(
                "tabflow: subroutine \"{name}\" expects {} argument(s), got {} (call ignored)",
                site.arity,
                args.len()
            );
            return;
        }
        vars.bind_stack.push(site.frame_template.clone());
        for (param, arg) in site.parameter_names.iter().zip(args) {
            vars.bind_stack.set(param, arg);
        }
        exec_block(&site.body.statements, vars, outputs);
        vars.return_state.take();
        vars.bind_stack.pop();
    }
}
