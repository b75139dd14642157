pub mod engine;

pub use engine::{Builtin, Engine, EvalError, FunctionRegistry, Operator, Token, VARIABLE};

/// Evaluates a one-off expression with the variable bound to `x`, using a
/// fresh engine with no saved functions.
pub fn evaluate_expression(expression: &str, x: f64) -> Result<f64, EvalError> {
    Engine::new().evaluate(expression, x)
}
