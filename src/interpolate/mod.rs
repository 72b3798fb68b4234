//! In-document variable interpolation.
//!
//! Resolves `${a.b.c}` expressions against the document's own root before any
//! structural reference resolution happens. Dotted segments index mappings by
//! key and sequences by number. A string that consists of a single expression
//! takes the referenced value's type (`x: ${dims}` can substitute a list); an
//! expression embedded in a longer string must reference a scalar, which is
//! stringified in place.
//!
//! Chained interpolations (`a: ${b}`, `b: ${c}`) resolve through repeated
//! passes up to [`MAX_PASSES`]; hitting the limit means the document contains
//! a reference cycle and resolution fails.

use regex::Regex;
use serde_yaml::Value;
use std::sync::OnceLock;

use crate::core::{NetvizError, Result};

/// Upper bound on substitution passes before a cycle is assumed.
pub const MAX_PASSES: usize = 8;

fn expression_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z0-9_][A-Za-z0-9_.\-]*)\}").expect("valid regex"))
}

/// Resolve every interpolation expression in the tree, in place.
///
/// # Errors
///
/// Returns [`NetvizError::Interpolation`] when an expression names a missing
/// value, embeds a non-scalar, or participates in a cycle.
pub fn resolve_interpolations(root: &mut Value) -> Result<()> {
    for _ in 0..MAX_PASSES {
        // The lookup source is a snapshot of the current pass so substitution
        // order within a pass cannot observe partially-updated values.
        let snapshot = root.clone();
        let mut pending = false;
        substitute(root, &snapshot, &mut pending)?;
        if !pending {
            return Ok(());
        }
    }
    Err(NetvizError::Interpolation {
        expression: "...".to_string(),
        reason: format!("interpolation did not converge after {MAX_PASSES} passes (reference cycle?)"),
    })
}

/// Look up a dotted expression (`a.b.0.c`) in a value tree.
#[must_use]
pub fn lookup<'a>(root: &'a Value, expression: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in expression.split('.') {
        current = match current {
            Value::Mapping(_) => current.get(segment)?,
            Value::Sequence(seq) => seq.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn substitute(node: &mut Value, snapshot: &Value, pending: &mut bool) -> Result<()> {
    match node {
        Value::String(text) => {
            if let Some(replacement) = interpolate_string(text, snapshot, pending)? {
                *node = replacement;
            }
            Ok(())
        }
        Value::Sequence(items) => {
            for item in items {
                substitute(item, snapshot, pending)?;
            }
            Ok(())
        }
        Value::Mapping(map) => {
            for (_, value) in map.iter_mut() {
                substitute(value, snapshot, pending)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Resolve the expressions within one string, if it has any.
fn interpolate_string(text: &str, snapshot: &Value, pending: &mut bool) -> Result<Option<Value>> {
    let pattern = expression_pattern();
    let Some(first) = pattern.captures(text) else {
        return Ok(None);
    };

    // Whole-string expression: adopt the referenced value, whatever its type.
    let whole = first.get(0).map(|m| m.as_str()) == Some(text);
    if whole {
        let expression = &first[1];
        let target = lookup(snapshot, expression).ok_or_else(|| NetvizError::Interpolation {
            expression: expression.to_string(),
            reason: "no such value in this document".to_string(),
        })?;
        if value_contains_expression(target) {
            *pending = true;
        }
        return Ok(Some(target.clone()));
    }

    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for captures in pattern.captures_iter(text) {
        let whole_match = captures.get(0).expect("capture 0 always present");
        let expression = &captures[1];
        let target = lookup(snapshot, expression).ok_or_else(|| NetvizError::Interpolation {
            expression: expression.to_string(),
            reason: "no such value in this document".to_string(),
        })?;
        let rendered = render_scalar(target).ok_or_else(|| NetvizError::Interpolation {
            expression: expression.to_string(),
            reason: "embedded expressions must reference a scalar value".to_string(),
        })?;
        result.push_str(&text[last..whole_match.start()]);
        result.push_str(&rendered);
        last = whole_match.end();
    }
    result.push_str(&text[last..]);

    if pattern.is_match(&result) {
        *pending = true;
    }
    Ok(Some(Value::String(result)))
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some("null".to_string()),
        _ => None,
    }
}

fn value_contains_expression(value: &Value) -> bool {
    match value {
        Value::String(s) => expression_pattern().is_match(s),
        Value::Sequence(items) => items.iter().any(value_contains_expression),
        Value::Mapping(map) => map.iter().any(|(_, v)| value_contains_expression(v)),
        _ => false,
    }
}
