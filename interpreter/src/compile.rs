use crate::instruction::{self, Instruction};
use crate::program::{Condition, Expr, Operation, Statement, Test};

/// Turn a statement list into one instruction that runs them in order.
pub fn compile(statements: &[Statement]) -> Instruction<()> {
    instruction::sequence(statements.iter().map(compile_statement).collect())
}

pub fn compile_statement(statement: &Statement) -> Instruction<()> {
    match statement {
        Statement::Set { variable, value } => {
            let variable = variable.clone();
            compile_expr(value).bind(move |v| instruction::set_variable(variable.as_str(), v))
        }
        Statement::Increment(name) => instruction::increment_variable(name.as_str()),
        Statement::Log(message) => instruction::log_message(message.as_str()),
        Statement::Trace(label) => instruction::log_memory(label.as_str()),
        Statement::If {
            condition,
            then,
            otherwise,
        } => instruction::if_then_else(
            compile_condition(condition),
            compile(then),
            compile(otherwise),
        ),
        Statement::While { condition, body } => {
            instruction::while_loop(compile_condition(condition), compile(body))
        }
        Statement::Try { attempt, recover } => {
            instruction::try_catch(compile(attempt), compile(recover))
        }
    }
}

pub fn compile_expr(expr: &Expr) -> Instruction<f64> {
    match expr {
        Expr::Number(n) => instruction::constant(*n),
        Expr::Variable(name) => instruction::get_variable(name.as_str()),
        Expr::Operation(Operation::Add(lhs, rhs)) => arithmetic(lhs, rhs, |a, b| a + b),
        Expr::Operation(Operation::Sub(lhs, rhs)) => arithmetic(lhs, rhs, |a, b| a - b),
        Expr::Operation(Operation::Mul(lhs, rhs)) => arithmetic(lhs, rhs, |a, b| a * b),
        Expr::Operation(Operation::Neg(operand)) => compile_expr(operand).map(|v| -v),
    }
}

pub fn compile_condition(condition: &Condition) -> Instruction<bool> {
    match condition {
        Condition::Literal(value) => instruction::constant(*value),
        Condition::Test(test) => compile_test(test),
    }
}

fn compile_test(test: &Test) -> Instruction<bool> {
    match test {
        Test::Less(lhs, rhs) => comparison(lhs, rhs, |a, b| a < b),
        Test::LessEqual(lhs, rhs) => comparison(lhs, rhs, |a, b| a <= b),
        Test::Greater(lhs, rhs) => comparison(lhs, rhs, |a, b| a > b),
        Test::GreaterEqual(lhs, rhs) => comparison(lhs, rhs, |a, b| a >= b),
        Test::Equal(lhs, rhs) => comparison(lhs, rhs, |a, b| a == b),
        Test::NotEqual(lhs, rhs) => comparison(lhs, rhs, |a, b| a != b),
        Test::Not(inner) => compile_condition(inner).map(|holds| !holds),
        // Folded from the right so a deciding operand skips the rest.
        Test::All(conditions) => conditions
            .iter()
            .rev()
            .fold(instruction::constant(true), |rest, condition| {
                compile_condition(condition).bind(move |holds| {
                    if holds {
                        rest.clone()
                    } else {
                        instruction::constant(false)
                    }
                })
            }),
        Test::Any(conditions) => conditions
            .iter()
            .rev()
            .fold(instruction::constant(false), |rest, condition| {
                compile_condition(condition).bind(move |holds| {
                    if holds {
                        instruction::constant(true)
                    } else {
                        rest.clone()
                    }
                })
            }),
        Test::Defined(name) => instruction::has_variable(name.as_str()),
    }
}

fn arithmetic(lhs: &Expr, rhs: &Expr, op: fn(f64, f64) -> f64) -> Instruction<f64> {
    let rhs = compile_expr(rhs);
    compile_expr(lhs).bind(move |a| rhs.clone().map(move |b| op(a, b)))
}

fn comparison(lhs: &Expr, rhs: &Expr, op: fn(f64, f64) -> bool) -> Instruction<bool> {
    let rhs = compile_expr(rhs);
    compile_expr(lhs).bind(move |a| rhs.clone().map(move |b| op(a, b)))
}
