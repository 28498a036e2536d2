use serde_json::Value;

use super::Fields;

// Row predicate. Rendered to a store formula with every literal escaped, and
// evaluated directly by in-process backends.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq { field: String, value: String },
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &str, value: &str) -> Self {
        Filter::Eq {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn to_formula(&self) -> String {
        match self {
            Filter::Eq { field, value } => {
                format!("{}={}", field_ref(field), string_literal(value))
            }
            Filter::And(parts) => {
                let inner: Vec<String> = parts.iter().map(Filter::to_formula).collect();
                format!("AND({})", inner.join(","))
            }
        }
    }

    pub fn matches(&self, fields: &Fields) -> bool {
        match self {
            Filter::Eq { field, value } => match fields.get(field) {
                Some(Value::String(s)) => s == value,
                Some(Value::Number(n)) => n.to_string() == *value,
                Some(Value::Bool(b)) => b.to_string() == *value,
                // Blank cells compare equal to the empty string.
                None | Some(Value::Null) => value.is_empty(),
                _ => false,
            },
            Filter::And(parts) => parts.iter().all(|p| p.matches(fields)),
        }
    }
}

fn field_ref(name: &str) -> String {
    format!("{{{}}}", name.replace('\\', "\\\\").replace('}', "\\}"))
}

fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
