use crate::engine::{Builtin, EvalError, FunctionRegistry, Operator, Token, VARIABLE};
use log::debug;

const OPERATOR_CHARS: &str = "+-*/^";

/// Converts a fully substituted expression string into a token stream.
///
/// Whitespace is insignificant and dropped up front. A `-` fuses into the
/// numeric literal that follows it when it starts the expression, follows a
/// `(`, or follows another operator; that is the only unary handling. Letter
/// runs are collected greedily and must resolve to a saved function (checked
/// first, so saved names shadow built-ins), a built-in, or the variable.
pub(crate) fn tokenize(
    expression: &str,
    registry: &FunctionRegistry,
) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '(' {
            tokens.push(Token::LeftParen);
            i += 1;
            continue;
        }
        if c == ')' {
            tokens.push(Token::RightParen);
            i += 1;
            continue;
        }

        // Unary minus: fused into the number that follows it.
        let unary_minus = c == '-'
            && (i == 0 || chars[i - 1] == '(' || OPERATOR_CHARS.contains(chars[i - 1]));

        if c.is_ascii_digit() || c == '.' || unary_minus {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            let value = literal
                .parse::<f64>()
                .map_err(|_| EvalError::InvalidNumber(literal))?;
            tokens.push(Token::Number(value));
            continue;
        }

        if OPERATOR_CHARS.contains(c) {
            tokens.push(Token::Op(Operator::try_from(c)?));
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();

            // Saved functions take priority over identically named built-ins.
            let token = if registry.contains(&word) {
                Token::UserFunction(word)
            } else if let Some(builtin) = Builtin::from_name(&word) {
                Token::Builtin(builtin)
            } else if word.len() == 1 && word.starts_with(VARIABLE) {
                Token::Variable
            } else {
                return Err(EvalError::UnknownIdentifier(word));
            };

            let is_function = !matches!(token, Token::Variable);
            tokens.push(token);

            // A function name pulls its opening parenthesis in as a separate
            // token.
            if is_function && i < chars.len() && chars[i] == '(' {
                tokens.push(Token::LeftParen);
                i += 1;
            }
            continue;
        }

        return Err(EvalError::InvalidCharacter(c));
    }

    debug!("tokenized {:?} -> {:?}", expression, tokens);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(expression: &str) -> Result<Vec<Token>, EvalError> {
        tokenize(expression, &FunctionRegistry::new())
    }

    #[test]
    fn test_numbers_and_operators() {
        assert_eq!(
            toks("2+3*4").unwrap(),
            vec![
                Token::Number(2.0),
                Token::Op(Operator::Add),
                Token::Number(3.0),
                Token::Op(Operator::Multiply),
                Token::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_insignificant() {
        assert_eq!(toks("  2 +   3 ").unwrap(), toks("2+3").unwrap());
    }

    #[test]
    fn test_decimal_literal() {
        assert_eq!(toks("3.25").unwrap(), vec![Token::Number(3.25)]);
    }

    #[test]
    fn test_unary_minus_at_start() {
        assert_eq!(
            toks("-3+5").unwrap(),
            vec![
                Token::Number(-3.0),
                Token::Op(Operator::Add),
                Token::Number(5.0),
            ]
        );
    }

    #[test]
    fn test_unary_minus_after_paren_and_operator() {
        assert_eq!(
            toks("(-2)").unwrap(),
            vec![Token::LeftParen, Token::Number(-2.0), Token::RightParen]
        );
        assert_eq!(
            toks("4*-2").unwrap(),
            vec![
                Token::Number(4.0),
                Token::Op(Operator::Multiply),
                Token::Number(-2.0),
            ]
        );
    }

    #[test]
    fn test_minus_after_number_is_binary() {
        assert_eq!(
            toks("4-2").unwrap(),
            vec![
                Token::Number(4.0),
                Token::Op(Operator::Subtract),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_builtin_pulls_in_left_paren() {
        assert_eq!(
            toks("sin(1)").unwrap(),
            vec![
                Token::Builtin(Builtin::Sin),
                Token::LeftParen,
                Token::Number(1.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_variable_token() {
        assert_eq!(
            toks("x+1").unwrap(),
            vec![Token::Variable, Token::Op(Operator::Add), Token::Number(1.0)]
        );
    }

    #[test]
    fn test_saved_function_name_shadows_builtin() {
        let mut registry = FunctionRegistry::new();
        registry.save("sin", "x*2");
        assert_eq!(
            tokenize("sin(1)", &registry).unwrap()[0],
            Token::UserFunction("sin".to_string())
        );
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(
            toks("z+1"),
            Err(EvalError::UnknownIdentifier("z".to_string()))
        );
        // Greedy letter runs: "xs" is one identifier, not variable + 's'.
        assert_eq!(
            toks("xs"),
            Err(EvalError::UnknownIdentifier("xs".to_string()))
        );
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(toks("2@3"), Err(EvalError::InvalidCharacter('@')));
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(
            toks("1.2.3"),
            Err(EvalError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(toks("*-*"), Err(EvalError::InvalidNumber("-".to_string())));
    }
}
