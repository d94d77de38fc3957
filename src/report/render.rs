//! Python-flavoured rendering of YAML values
//!
//! Inspected configs belong to Python projects, so the report prints values
//! the way `str()` would there: `True`, `None`, `{'k': 'v'}`.

use serde_yaml::Value;

/// `str()`-style rendering: top-level strings are bare
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => repr_value(other),
    }
}

/// `repr()`-style rendering used inside containers
pub fn repr_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Sequence(items) => {
            let inner: Vec<String> = items.iter().map(repr_value).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Mapping(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", repr_value(k), repr_value(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
        Value::Tagged(tagged) => repr_value(&tagged.value),
    }
}

pub fn display_bool(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}

fn quote(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", s)
    } else {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}
