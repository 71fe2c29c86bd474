//! A small embedded DSL runtime: compiled syntax tree (`ast`), lexical
//! scoping (`bind_stack`), non-local control flow (`control`), the
//! statement-execution loop (`statement`), and UDF/subroutine compilation
//! and invocation (`function_manager`). See SPEC_FULL.md §4.5-§4.11.

pub mod ast;
pub mod bind_stack;
pub mod control;
pub mod function_manager;
pub mod statement;

pub use ast::{BinOp, DefNode, Expr, Stmt};
pub use bind_stack::{BindStack, Frame};
pub use control::{LoopStack, ReturnState};
pub use function_manager::{FunctionManager, SubrDefSite, UdfDefSite};
pub use statement::{exec_block, StatementBlock, Vars};
