//! Custom Tera filters for B syntax.
//!
//! Lists render without embedded whitespace, and an empty list still renders
//! its delimiters (`{}`, `[]`) so the artifact never has a missing operand.

use std::collections::HashMap;

use tera::{Result, Value};

use crate::context::symbols::sanitize_ident;

fn joined_items(value: &Value, filter: &str) -> Result<String> {
    let items = value
        .as_array()
        .ok_or_else(|| tera::Error::msg(format!("{filter} filter expects an array")))?;

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        let s = item
            .as_str()
            .ok_or_else(|| tera::Error::msg(format!("{filter} filter expects string items")))?;
        parts.push(s);
    }
    Ok(parts.join(","))
}

/// `["a","b"]` → `{a,b}`; `[]` → `{}`.
pub fn b_set(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(format!("{{{}}}", joined_items(value, "b_set")?)))
}

/// `["a","b"]` → `[a,b]`; `[]` → `[]`.
pub fn b_seq(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    Ok(Value::String(format!("[{}]", joined_items(value, "b_seq")?)))
}

/// Sanitize a string to `[A-Za-z0-9_]`.
pub fn b_ident(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("b_ident filter expects a string"))?;
    Ok(Value::String(sanitize_ident(s).into_owned()))
}
