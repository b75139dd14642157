use thiserror::Error;

mod evaluator;
mod registry;
mod substitute;
mod tokenizer;

pub use evaluator::{Engine, MAX_EXPANSION_DEPTH};
pub use registry::FunctionRegistry;

pub(crate) use substitute::bind_variable;
pub(crate) use tokenizer::tokenize;

/// Single-character name of the free variable in every expression.
pub const VARIABLE: char = 'x';

/// One typed element of a tokenized expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Op(Operator),
    LeftParen,
    RightParen,
    Builtin(Builtin),
    /// A registry-defined function name that survived expansion. Reaching the
    /// evaluator with one of these means the expansion stage was bypassed.
    UserFunction(String),
    /// The free variable. Only valid before substitution; the evaluator
    /// rejects it.
    Variable,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// Binding strength used by the evaluator's reduction loop. `(` acts as
    /// the 0-precedence barrier and function application sits at 4.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
            Operator::Power => 3,
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
            Operator::Power => Ok(left.powf(right)),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = EvalError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '^' => Ok(Operator::Power),
            _ => Err(EvalError::InvalidCharacter(value)),
        }
    }
}

/// Built-in unary functions. All take one argument and bind to the
/// parenthesized group that follows them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Abs,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "sin" => Some(Builtin::Sin),
            "cos" => Some(Builtin::Cos),
            "tan" => Some(Builtin::Tan),
            "log" => Some(Builtin::Log),
            "ln" => Some(Builtin::Ln),
            "sqrt" => Some(Builtin::Sqrt),
            "abs" => Some(Builtin::Abs),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Log => "log",
            Builtin::Ln => "ln",
            Builtin::Sqrt => "sqrt",
            Builtin::Abs => "abs",
        }
    }

    pub fn apply(&self, value: f64) -> Result<f64, EvalError> {
        match self {
            Builtin::Sin => Ok(value.sin()),
            Builtin::Cos => Ok(value.cos()),
            Builtin::Tan => Ok(value.tan()),
            // log is base 10, ln is natural; both reject non-positive input.
            Builtin::Log => {
                if value <= 0.0 {
                    Err(EvalError::Domain {
                        function: self.name(),
                        value,
                    })
                } else {
                    Ok(value.log10())
                }
            }
            Builtin::Ln => {
                if value <= 0.0 {
                    Err(EvalError::Domain {
                        function: self.name(),
                        value,
                    })
                } else {
                    Ok(value.ln())
                }
            }
            Builtin::Sqrt => {
                if value < 0.0 {
                    Err(EvalError::Domain {
                        function: self.name(),
                        value,
                    })
                } else {
                    Ok(value.sqrt())
                }
            }
            Builtin::Abs => Ok(value.abs()),
        }
    }
}

/// Everything that can go wrong between an expression string and its value.
/// Evaluation stops at the first error; nothing is coerced or retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("invalid character in expression: '{0}'")]
    InvalidCharacter(char),

    #[error("unknown function or variable: {0}")]
    UnknownIdentifier(String),

    #[error("invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("mismatched parentheses")]
    MismatchedParentheses,

    #[error("insufficient operands for {0}")]
    InsufficientOperands(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("domain error: {function}({value}) is undefined")]
    Domain { function: &'static str, value: f64 },

    #[error("empty expression")]
    EmptyExpression,

    #[error("invalid expression")]
    InvalidExpression,

    #[error("variable '{0}' has no bound value")]
    UnboundVariable(char),

    #[error("call to saved function '{0}' was never expanded")]
    UnexpandedFunction(String),

    #[error("function expansion exceeded the depth limit of {0}")]
    DepthExceeded(usize),
}
