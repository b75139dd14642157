use crate::engine::substitute::{find_call, matching_paren};
use crate::engine::{
    bind_variable, tokenize, Builtin, EvalError, FunctionRegistry, Operator, Token, VARIABLE,
};
use log::debug;

/// Default ceiling on recursive function expansion. A saved function that
/// (directly or transitively) calls itself hits this limit and reports an
/// error instead of overflowing the call stack.
pub const MAX_EXPANSION_DEPTH: usize = 64;

/// Expression engine: owns the saved-function registry and runs the
/// substitute -> expand -> tokenize -> evaluate pipeline.
///
/// Evaluation takes `&self` and saving takes `&mut self`, so the registry
/// cannot change underneath an in-flight evaluation; sharing an `Engine`
/// across threads is the host's job (e.g. behind an `RwLock`).
pub struct Engine {
    registry: FunctionRegistry,
    max_depth: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_depth_limit(MAX_EXPANSION_DEPTH)
    }

    /// Creates an engine with a custom expansion-depth ceiling.
    pub fn with_depth_limit(max_depth: usize) -> Self {
        Self {
            registry: FunctionRegistry::new(),
            max_depth,
        }
    }

    /// Evaluates `expression` with the variable bound to `x`.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` with the single resulting value.
    /// * `Err(EvalError)` on the first failure anywhere in the pipeline;
    ///   there is no partial result.
    pub fn evaluate(&self, expression: &str, x: f64) -> Result<f64, EvalError> {
        debug!("evaluating {:?} at {}={}", expression, VARIABLE, x);
        self.evaluate_at_depth(expression, x, 0)
    }

    /// Evaluates an expression that uses no variable (binds it to 0).
    pub fn evaluate_at_zero(&self, expression: &str) -> Result<f64, EvalError> {
        self.evaluate(expression, 0.0)
    }

    /// Wraps an expression as a sampling callback for a plotting consumer.
    ///
    /// This is the only place an error is downgraded: any failure becomes a
    /// NaN sample, so the plotter can skip the point and keep sampling the
    /// rest of the curve.
    pub fn callback(&self, expression: &str) -> impl Fn(f64) -> f64 + '_ {
        let expression = expression.to_string();
        move |x| self.evaluate(&expression, x).unwrap_or(f64::NAN)
    }

    /// Saves (or overwrites) a named function body. The body is not
    /// validated here; a bad body fails when the function is invoked.
    pub fn save_function(&mut self, name: &str, body: &str) {
        debug!("saving function {}({}) = {:?}", name, VARIABLE, body);
        self.registry.save(name, body);
    }

    pub fn function_body(&self, name: &str) -> Option<&str> {
        self.registry.body(name)
    }

    /// Saved function names, sorted.
    pub fn function_names(&self) -> Vec<String> {
        self.registry.names()
    }

    fn evaluate_at_depth(&self, expression: &str, x: f64, depth: usize) -> Result<f64, EvalError> {
        if depth > self.max_depth {
            return Err(EvalError::DepthExceeded(self.max_depth));
        }
        let bound = bind_variable(expression, x);
        let expanded = self.expand_calls(&bound, x, depth)?;
        let tokens = tokenize(&expanded, &self.registry)?;
        evaluate_tokens(&tokens)
    }

    /// Rewrites every saved-function call site into the decimal literal of
    /// its value.
    ///
    /// For each call `name(argument)` found at an identifier boundary: the
    /// argument (balanced-paren scan, so it may contain its own parentheses)
    /// is evaluated under the current binding, then the stored body is
    /// evaluated with that result as its local binding, and the literal
    /// replaces the whole call-site text. Both recursive evaluations run one
    /// level deeper, which is what the depth ceiling counts.
    fn expand_calls(&self, expression: &str, x: f64, depth: usize) -> Result<String, EvalError> {
        if self.registry.is_empty() {
            return Ok(expression.to_string());
        }

        let mut expr = expression.to_string();
        for (name, body) in self.registry.iter() {
            while let Some((start, open)) = find_call(&expr, name) {
                let close = matching_paren(&expr, open)?;
                let argument = self.evaluate_at_depth(&expr[open + 1..close], x, depth + 1)?;
                let result = self.evaluate_at_depth(body, argument, depth + 1)?;
                debug!(
                    "expanded {}({}) -> {} in {:?}",
                    name,
                    &expr[open + 1..close],
                    result,
                    expr
                );
                expr.replace_range(start..=close, &result.to_string());
            }
        }
        Ok(expr)
    }
}

/// Entries of the operator stack. `LeftParen` is the 0-precedence barrier;
/// a function binds tighter than any operator.
#[derive(Debug, Copy, Clone, PartialEq)]
enum StackEntry {
    Op(Operator),
    Func(Builtin),
    LeftParen,
}

impl StackEntry {
    fn precedence(&self) -> u8 {
        match self {
            StackEntry::Op(op) => op.precedence(),
            StackEntry::Func(_) => 4,
            StackEntry::LeftParen => 0,
        }
    }
}

/// Two-stack parse-and-reduce over a token stream.
///
/// Every operator is left-associative, including `^`: `2^3^2` reduces as
/// `(2^3)^2`. Reduction happens while the stack top's precedence is greater
/// than or equal to the incoming operator's.
fn evaluate_tokens(tokens: &[Token]) -> Result<f64, EvalError> {
    if tokens.is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let mut operands: Vec<f64> = Vec::new();
    let mut operators: Vec<StackEntry> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(value) => operands.push(*value),

            Token::LeftParen => operators.push(StackEntry::LeftParen),

            Token::RightParen => {
                loop {
                    match operators.pop() {
                        Some(StackEntry::LeftParen) => break,
                        Some(entry) => apply_entry(entry, &mut operands)?,
                        None => return Err(EvalError::MismatchedParentheses),
                    }
                }
                // A function on top bound to the group that just closed.
                if let Some(&StackEntry::Func(function)) = operators.last() {
                    operators.pop();
                    apply_entry(StackEntry::Func(function), &mut operands)?;
                }
            }

            Token::Op(op) => {
                while let Some(&top) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    operators.pop();
                    apply_entry(top, &mut operands)?;
                }
                operators.push(StackEntry::Op(*op));
            }

            Token::Builtin(function) => operators.push(StackEntry::Func(*function)),

            Token::Variable => return Err(EvalError::UnboundVariable(VARIABLE)),

            Token::UserFunction(name) => {
                return Err(EvalError::UnexpandedFunction(name.clone()))
            }
        }
    }

    while let Some(entry) = operators.pop() {
        if entry == StackEntry::LeftParen {
            return Err(EvalError::MismatchedParentheses);
        }
        apply_entry(entry, &mut operands)?;
    }

    match operands.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::InvalidExpression),
    }
}

fn apply_entry(entry: StackEntry, operands: &mut Vec<f64>) -> Result<(), EvalError> {
    match entry {
        StackEntry::Op(op) => {
            let b = operands.pop();
            let a = operands.pop();
            match (a, b) {
                (Some(a), Some(b)) => {
                    operands.push(op.apply(a, b)?);
                    Ok(())
                }
                _ => Err(EvalError::InsufficientOperands(format!(
                    "operator '{}'",
                    op.symbol()
                ))),
            }
        }
        StackEntry::Func(function) => {
            let a = operands.pop().ok_or_else(|| {
                EvalError::InsufficientOperands(format!("function '{}'", function.name()))
            })?;
            operands.push(function.apply(a)?);
            Ok(())
        }
        StackEntry::LeftParen => Err(EvalError::MismatchedParentheses),
    }
}
