//! Reference resolution.
//!
//! A token value may refer to another token with `{path.to.token}`. When the
//! reference is the whole string the referenced value is substituted as-is
//! (keeping its type); when it is embedded in a longer string it is
//! interpolated. References inside structured values are resolved too.

use std::collections::HashMap;
use std::ops::Range;

use serde_json::Value;

use crate::error::{DtkError, Result};
use crate::types::TokenGroup;

/// Resolve every reference in the tree, returning a resolved copy.
///
/// `original_value` is left untouched on each token.
pub fn resolve_references(tree: &TokenGroup) -> Result<TokenGroup> {
    let mut resolver = Resolver::new(tree);
    let mut resolved = tree.clone();

    for token in resolved.tokens_mut() {
        token.value = resolver.resolve_token(&token.dotted_path())?;
    }

    Ok(resolved)
}

/// Check whether a value contains at least one reference.
pub fn has_references(value: &Value) -> bool {
    match value {
        Value::String(s) => !find_references(s).is_empty(),
        Value::Array(items) => items.iter().any(has_references),
        Value::Object(map) => map.values().any(has_references),
        _ => false,
    }
}

/// Memoising resolver with cycle detection.
struct Resolver<'a> {
    tree: &'a TokenGroup,
    resolved: HashMap<String, Value>,
    /// Tokens currently being resolved, outermost first.
    stack: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn new(tree: &'a TokenGroup) -> Self {
        Self {
            tree,
            resolved: HashMap::new(),
            stack: Vec::new(),
        }
    }

    fn resolve_token(&mut self, key: &str) -> Result<Value> {
        if let Some(value) = self.resolved.get(key) {
            return Ok(value.clone());
        }

        let tree = self.tree;
        let token = tree
            .find_token(key)
            .or_else(|| key.strip_suffix(".value").and_then(|k| tree.find_token(k)))
            .ok_or_else(|| {
                let referrer = self
                    .stack
                    .last()
                    .map(|r| format!(" (referenced by '{}')", r))
                    .unwrap_or_default();
                DtkError::Reference {
                    message: format!("Unknown token '{}'{}", key, referrer),
                    help: Some("References use the dot-joined token path, e.g. {color.brand.primary}".to_string()),
                }
            })?;

        let key = token.dotted_path();
        if let Some(value) = self.resolved.get(&key) {
            return Ok(value.clone());
        }

        if let Some(start) = self.stack.iter().position(|k| *k == key) {
            let mut cycle: Vec<&str> = self.stack[start..].iter().map(|s| s.as_str()).collect();
            cycle.push(&key);
            return Err(DtkError::Reference {
                message: format!("Circular reference: {}", cycle.join(" -> ")),
                help: Some("Break the cycle by giving one of these tokens a literal value".to_string()),
            });
        }

        self.stack.push(key.clone());
        let value = self.resolve_value(&token.value);
        self.stack.pop();

        let value = value?;
        self.resolved.insert(key, value.clone());
        Ok(value)
    }

    fn resolve_value(&mut self, value: &Value) -> Result<Value> {
        match value {
            Value::String(s) => self.resolve_string(s),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), self.resolve_value(v)?);
                }
                Ok(Value::Object(out))
            }
            other => Ok(other.clone()),
        }
    }

    fn resolve_string(&mut self, s: &str) -> Result<Value> {
        let references = find_references(s);

        match references.as_slice() {
            [] => return Ok(Value::String(s.to_string())),
            [(range, key)] if *range == (0..s.len()) => return self.resolve_token(key),
            _ => {}
        }

        let mut out = String::with_capacity(s.len());
        let mut last = 0;
        for (range, key) in references {
            out.push_str(&s[last..range.start]);
            let value = self.resolve_token(&key)?;
            out.push_str(&value_to_string(&value));
            last = range.end;
        }
        out.push_str(&s[last..]);

        Ok(Value::String(out))
    }
}

/// Interpolation form of a value: strings unquoted, everything else as JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Find `{path}` references: byte range of the braces and the inner path.
///
/// The inner path must be non-empty and free of whitespace and braces.
fn find_references(s: &str) -> Vec<(Range<usize>, String)> {
    let mut out = Vec::new();
    let mut start = None;

    for (i, c) in s.char_indices() {
        match c {
            '{' => start = Some(i),
            '}' => {
                if let Some(open) = start.take() {
                    let inner = &s[open + 1..i];
                    if !inner.is_empty() {
                        out.push((open..i + 1, inner.to_string()));
                    }
                }
            }
            c if c.is_whitespace() => start = None,
            _ => {}
        }
    }

    out
}
