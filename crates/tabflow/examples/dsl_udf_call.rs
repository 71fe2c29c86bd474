//! Compile and invoke a small `def` by hand, the way a DSL embedding would
//! after parsing `def f(x, y) { return x + y * 2; }` (SPEC_FULL.md §8
//! scenario 5).

use tabflow::dsl::{BinOp, DefNode, Expr, FunctionManager, Stmt, Vars};
use tabflow::Mv;

fn main() {
    let f = DefNode::new(
        "f",
        vec!["x".to_string(), "y".to_string()],
        vec![Stmt::ReturnValue(Expr::BinOp(
            BinOp::Add,
            Box::new(Expr::Local("x".to_string())),
            Box::new(Expr::BinOp(BinOp::Mul, Box::new(Expr::Local("y".to_string())), Box::new(Expr::Lit(Mv::Int(2))))),
        ))],
        0,
        2,
    );

    let mut functions = FunctionManager::new();
    functions.register_udf(&f);

    let mut vars = Vars::new(&functions);
    let result = functions.call_udf("f", vec![Mv::Int(3), Mv::Int(4)], &mut vars);
    println!("f(3, 4) = {result:?}"); // Int(11)
}
