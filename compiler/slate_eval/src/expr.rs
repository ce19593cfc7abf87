//! Expression evaluation.
//!
//! An expression is a whitespace-separated line. A single token is a
//! literal or variable reference; several tokens are a builtin call whose
//! first token names the builtin and whose remaining tokens are its
//! arguments. Quoted literals therefore cannot contain whitespace.

use tracing::trace;

use slate_ir::Value;

use crate::errors::{EvalError, EvalResult};
use crate::{Builtin, Namespace, RuntimeContext};

/// Resolve one token.
///
/// Rules, in order: `$name` is a variable reference; `True` and `False`
/// are booleans; `"text"` is text; anything else must parse as a number.
pub fn resolve_token(token: &str, namespace: &Namespace) -> EvalResult<Value> {
    let token = token.trim();
    let value = if let Some(name) = token.strip_prefix('$') {
        namespace
            .lookup(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable {
                name: name.to_string(),
            })?
    } else if token == "True" {
        Value::Boolean(true)
    } else if token == "False" {
        Value::Boolean(false)
    } else if let Some(inner) = token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Value::text(inner)
    } else {
        token
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| EvalError::UnparseableLiteral {
                token: token.to_string(),
            })?
    };
    trace!(token, %value, "resolved token");
    Ok(value)
}

/// Evaluate a whole expression line.
pub fn evaluate(line: &str, namespace: &Namespace, ctx: &RuntimeContext) -> EvalResult<Value> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Err(EvalError::EmptyExpression);
    };
    let rest: Vec<&str> = tokens.collect();
    if rest.is_empty() {
        return resolve_token(first, namespace);
    }

    let builtin = Builtin::from_name(first).ok_or_else(|| EvalError::UnknownFunction {
        name: first.to_ascii_uppercase(),
    })?;
    let args = rest
        .iter()
        .map(|token| resolve_token(token, namespace))
        .collect::<EvalResult<Vec<_>>>()?;
    builtin.call(&args, ctx)
}
