//! The statement-execution loop (SPEC_FULL.md §4.6): run a block's
//! statements in order, checking `loop_stack`/`return_state` after each
//! one to decide whether to short-circuit the rest of the block. This is
//! the DSL's sole mechanism for non-local control flow, with no unwinding.

// dependencies
use crate::dsl::ast::{BinOp, DefNode, Expr, Stmt};
use crate::dsl::bind_stack::BindStack;
use crate::dsl::control::{LoopStack, ReturnState};
use crate::dsl::function_manager::FunctionManager;
use crate::mv::Mv;
use crate::record::Record;

/// Per-evaluation runtime state threaded through statement execution:
/// the bind stack, the loop stack, the return state, and the function
/// manager used to resolve calls. By convention, instances are named
/// `vars`, matching the C `variables_t` this groups together.
pub struct Vars<'a> {
    pub bind_stack: BindStack,
    pub loop_stack: LoopStack,
    pub return_state: ReturnState,
    pub functions: &'a FunctionManager,
}

impl<'a> Vars<'a> {
    pub fn new(functions: &'a FunctionManager) -> Self {
        Self {
            bind_stack: BindStack::new(),
            loop_stack: LoopStack::new(),
            return_state: ReturnState::new(),
            functions,
        }
    }
}

/// A compiled top-level statement block: its statements plus the two
/// slot-allocation annotations captured at compile time (SPEC_FULL.md §3,
/// "Statement block"). This implementation does not use a separate local
/// variable slot array (SPEC_FULL.md Open Questions / §9 "xxx" markers);
/// the fields are retained so a future slot-based local store could be
/// added without changing the def-site shape.
#[derive(Debug, Clone)]
pub struct StatementBlock {
    pub statements: Vec<Stmt>,
    pub max_var_depth: usize,
    pub frame_var_count: usize,
}

impl StatementBlock {
    /// Build a top-level statement block from a `DefNode`'s body,
    /// asserting its slot-allocation annotations were assigned by an
    /// earlier compiler pass. An unassigned annotation is an
    /// internal-coding error (SPEC_FULL.md §4.7 step 5), not a
    /// recoverable condition.
    pub fn from_def_node(node: &DefNode) -> Self {
        let max_var_depth = node
            .max_var_depth
            .unwrap_or_else(|| internal_coding_error("max_var_depth is UNUSED"));
        let frame_var_count = node
            .frame_var_count
            .unwrap_or_else(|| internal_coding_error("frame_var_count is UNUSED"));
        Self {
            statements: node.body.clone(),
            max_var_depth,
            frame_var_count,
        }
    }
}

fn internal_coding_error(msg: &str) -> ! {
    panic!("internal coding error: {msg} ({}:{})", file!(), line!());
}

/// Run a statement block to completion or until `loop_stack.top() != 0` or
/// `return_state.returned` (SPEC_FULL.md §4.6). `outputs` is `Some` only
/// inside a subroutine body; UDF bodies are driven with `outputs = None`.
pub fn exec_block(block: &[Stmt], vars: &mut Vars, mut outputs: Option<&mut Vec<Record>>) {
    for stmt in block {
        exec_stmt(stmt, vars, outputs.as_deref_mut());
        if vars.loop_stack.top() != 0 {
            break;
        }
        if vars.return_state.returned {
            break;
        }
    }
}

fn exec_stmt(stmt: &Stmt, vars: &mut Vars, mut outputs: Option<&mut Vec<Record>>) {
    match stmt {
        Stmt::ReturnValue(expr) => {
            let value = eval_expr(expr, vars);
            vars.return_state.set_value(value);
        }
        Stmt::ReturnVoid => {
            vars.return_state.set_void();
        }
        Stmt::LocalAssign(name, expr) => {
            let value = eval_expr(expr, vars);
            vars.bind_stack.set(name, value);
        }
        Stmt::If { cond, then_body, else_body } => {
            let branch = if is_truthy(&eval_expr(cond, vars)) { then_body } else { else_body };
            exec_block(branch, vars, outputs.as_deref_mut());
        }
        Stmt::While { cond, body } => {
            vars.loop_stack.enter_loop();
            while is_truthy(&eval_expr(cond, vars)) {
                exec_block(body, vars, outputs.as_deref_mut());
                match vars.loop_stack.top() {
                    0 => { /* fell through normally, keep looping */ }
                    1 => {
                        // continue: clear and re-test the loop condition
                        vars.loop_stack.set_top(0);
                    }
                    _ => {
                        // break: stop the loop, leaving the signal for exit_loop to clear
                        break;
                    }
                }
                if vars.return_state.returned {
                    break;
                }
            }
            vars.loop_stack.exit_loop();
        }
        Stmt::Break => vars.loop_stack.set_top(2),
        Stmt::Continue => vars.loop_stack.set_top(1),
        Stmt::CallSubr(name, args) => {
            let arg_values: Vec<Mv> = args.iter().map(|a| eval_expr(a, vars)).collect();
            vars.functions.call_subr(name, arg_values, vars, outputs.as_deref_mut());
        }
        Stmt::Emit(field_exprs) => {
            let mut rec = Record::new();
            for (name, expr) in field_exprs {
                let value = eval_expr(expr, vars);
                rec.put(name.clone(), display_mv(&value));
            }
            if let Some(outputs) = outputs.as_deref_mut() {
                outputs.push(rec);
            }
        }
    }
}

fn is_truthy(value: &Mv) -> bool {
    match value {
        Mv::Int(i) => *i != 0,
        Mv::Float(f) => *f != 0.0,
        Mv::String(s) | Mv::Error(s) => !s.is_empty(),
        Mv::Empty | Mv::Absent => false,
    }
}

fn display_mv(value: &Mv) -> String {
    match value {
        Mv::Absent | Mv::Empty => String::new(),
        Mv::String(s) | Mv::Error(s) => s.clone(),
        Mv::Int(i) => i.to_string(),
        Mv::Float(f) => f.to_string(),
    }
}

/// Evaluate a DSL expression against the current bind stack and function
/// manager.
pub fn eval_expr(expr: &Expr, vars: &mut Vars) -> Mv {
    match expr {
        Expr::Lit(value) => value.clone(),
        Expr::Local(name) => vars.bind_stack.get(name).cloned().unwrap_or(Mv::Absent),
        Expr::BinOp(op, lhs, rhs) => {
            let a = eval_expr(lhs, vars);
            let b = eval_expr(rhs, vars);
            match op {
                BinOp::Add => a.add(&b),
                BinOp::Sub => a.sub(&b),
                BinOp::Mul => a.mul(&b),
                BinOp::Div => a.div(&b),
            }
        }
        Expr::Call(name, args) => {
            let arg_values: Vec<Mv> = args.iter().map(|a| eval_expr(a, vars)).collect();
            vars.functions.call_udf(name, arg_values, vars)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::function_manager::FunctionManager;

    #[test]
    fn local_assign_then_read() {
        let functions = FunctionManager::new();
        let mut vars = Vars::new(&functions);
        let block = vec![
            Stmt::LocalAssign("a".to_string(), Expr::Lit(Mv::Int(1))),
            Stmt::ReturnValue(Expr::Local("a".to_string())),
        ];
        exec_block(&block, &mut vars, None);
        assert_eq!(vars.return_state.value, Mv::Int(1));
    }

    #[test]
    fn loop_stack_short_circuits_block_on_break() {
        let functions = FunctionManager::new();
        let mut vars = Vars::new(&functions);
        let block = vec![
            Stmt::Break,
            Stmt::LocalAssign("never".to_string(), Expr::Lit(Mv::Int(99))),
        ];
        exec_block(&block, &mut vars, None);
        assert_eq!(vars.bind_stack.get("never"), None);
    }

    #[test]
    fn while_loop_clears_loop_stack_on_exit() {
        let functions = FunctionManager::new();
        let mut vars = Vars::new(&functions);
        // local i = 0; while (i) { i = i - 1; }  -- trivially exits immediately
        let block = vec![
            Stmt::LocalAssign("i".to_string(), Expr::Lit(Mv::Int(0))),
            Stmt::While {
                cond: Expr::Local("i".to_string()),
                body: vec![Stmt::LocalAssign(
                    "i".to_string(),
                    Expr::BinOp(BinOp::Sub, Box::new(Expr::Local("i".to_string())), Box::new(Expr::Lit(Mv::Int(1)))),
                )],
            },
        ];
        exec_block(&block, &mut vars, None);
        assert_eq!(vars.loop_stack.top(), 0);
    }

    #[test]
    fn while_loop_break_exits_and_clears_stack() {
        let functions = FunctionManager::new();
        let mut vars = Vars::new(&functions);
        // local i = 0; while (1) { i = i + 1; if (i) { break; } }
        let block = vec![
            Stmt::LocalAssign("i".to_string(), Expr::Lit(Mv::Int(0))),
            Stmt::While {
                cond: Expr::Lit(Mv::Int(1)),
                body: vec![
                    Stmt::LocalAssign(
                        "i".to_string(),
                        Expr::BinOp(BinOp::Add, Box::new(Expr::Local("i".to_string())), Box::new(Expr::Lit(Mv::Int(1)))),
                    ),
                    Stmt::If {
                        cond: Expr::Local("i".to_string()),
                        then_body: vec![Stmt::Break],
                        else_body: vec![],
                    },
                ],
            },
        ];
        exec_block(&block, &mut vars, None);
        assert_eq!(vars.loop_stack.top(), 0);
        assert_eq!(vars.bind_stack.get("i"), Some(&Mv::Int(1)));
    }

    #[test]
    fn emit_writes_record_to_outputs() {
        let functions = FunctionManager::new();
        let mut vars = Vars::new(&functions);
        let mut outputs = Vec::new();
        let block = vec![Stmt::Emit(vec![("a".to_string(), Expr::Lit(Mv::Int(3)))])];
        exec_block(&block, &mut vars, Some(&mut outputs));
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].get("a"), Some("3"));
    }
}
