use crate::engine::{EvalError, VARIABLE};
use log::debug;

/// Replaces every standalone occurrence of the variable with a decimal
/// literal of `value`.
///
/// Only identifier-boundary occurrences are touched: an `x` with a letter on
/// either side belongs to a longer name (a built-in or a saved function) and
/// must survive untouched, otherwise the corrupted name shows up much later
/// as a bogus unknown-identifier error. `f64`'s `Display` never produces
/// exponent notation, so the spliced literal always re-tokenizes as a plain
/// number.
pub(crate) fn bind_variable(expression: &str, value: f64) -> String {
    let chars: Vec<char> = expression.chars().collect();
    let literal = value.to_string();
    let mut out = String::with_capacity(expression.len());

    for (i, &c) in chars.iter().enumerate() {
        if c == VARIABLE {
            let prev_is_letter = i > 0 && chars[i - 1].is_ascii_alphabetic();
            let next_is_letter = i + 1 < chars.len() && chars[i + 1].is_ascii_alphabetic();
            if !prev_is_letter && !next_is_letter {
                out.push_str(&literal);
                continue;
            }
        }
        out.push(c);
    }

    debug!("bound {}={} in {:?} -> {:?}", VARIABLE, value, expression, out);
    out
}

/// Locates the next call site `name(` at an identifier boundary.
///
/// Returns byte offsets of the name and of its opening parenthesis. A match
/// preceded by a letter is part of a longer identifier and is skipped, so a
/// saved `f` never fires inside `gf(...)`.
pub(crate) fn find_call(expression: &str, name: &str) -> Option<(usize, usize)> {
    for (start, _) in expression.match_indices(name) {
        let open = start + name.len();
        if !expression[open..].starts_with('(') {
            continue;
        }
        let at_boundary = expression[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphabetic());
        if at_boundary {
            return Some((start, open));
        }
    }
    None
}

/// Byte offset of the parenthesis matching the `(` at `open`.
///
/// Balanced scan, so a call argument may itself contain parenthesized
/// sub-expressions.
pub(crate) fn matching_paren(expression: &str, open: usize) -> Result<usize, EvalError> {
    let mut depth: usize = 0;
    for (idx, c) in expression[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + idx);
                }
            }
            _ => {}
        }
    }
    Err(EvalError::MismatchedParentheses)
}
