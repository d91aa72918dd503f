//! Relative-name rendering.
//!
//! A template mixes literal text with `{field}` and `{[field]}` placeholders.
//! Each placeholder is replaced by the matching string attribute; the
//! bracketed form wraps the value as `[value]`. Lookups never fail: a missing
//! or non-string attribute renders as an empty string, and an unterminated
//! placeholder is dropped from the output.

use serde_json::{Map, Value};

#[derive(Debug, Default)]
struct Placeholder {
    field: String,
    bracketed: bool,
}

pub fn render(template: &str, attributes: &Map<String, Value>) -> String {
    let mut rn = String::with_capacity(template.len());
    let mut open: Option<Placeholder> = None;

    for c in template.chars() {
        let Some(p) = open.as_mut() else {
            if c == '{' {
                open = Some(Placeholder::default());
            } else {
                rn.push(c);
            }
            continue;
        };

        match c {
            '{' => {}
            '[' | ']' => p.bracketed = true,
            '}' => {
                let value = attributes
                    .get(&p.field)
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if p.bracketed {
                    rn.push('[');
                    rn.push_str(value);
                    rn.push(']');
                } else {
                    rn.push_str(value);
                }
                open = None;
            }
            _ => p.field.push(c),
        }
    }

    rn
}
