use crate::classify::{classify, unwrap, Kind};
use crate::errors::DereferenceError;
use crate::model::{Mapping, Value};
use crate::registry::VariantRegistry;

/// Render a value on a single line
///
/// Recognised cells render as `variant(held)` with an optional
/// `, { id: '<label>' }` suffix; cells with unregistered tags render as
/// `[cell <tag>]` without being dereferenced. A reference already being
/// rendered further up renders as `[Circular]`.
///
/// # Errors
/// * `DereferenceError` - a recognised cell failed to produce its value
pub fn render_inline(value: &Value, registry: &VariantRegistry) -> Result<String, DereferenceError> {
    let mut output = String::new();
    let mut active = Vec::new();
    write_value(value, registry, &mut active, &mut output)?;
    Ok(output)
}

fn write_value(
    value: &Value,
    registry: &VariantRegistry,
    active: &mut Vec<usize>,
    output: &mut String,
) -> Result<(), DereferenceError> {
    let Some(id) = value.identity() else {
        write_scalar(value, output);
        return Ok(());
    };
    if active.contains(&id) {
        output.push_str("[Circular]");
        return Ok(());
    }

    active.push(id);
    let result = write_reference(value, registry, active, output);
    active.pop();
    result
}

fn write_reference(
    value: &Value,
    registry: &VariantRegistry,
    active: &mut Vec<usize>,
    output: &mut String,
) -> Result<(), DereferenceError> {
    match value {
        Value::Seq(items) => {
            if items.is_empty() {
                output.push_str("[]");
                return Ok(());
            }
            output.push_str("[ ");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                write_value(item, registry, active, output)?;
            }
            output.push_str(" ]");
        }
        Value::Map(map) => write_mapping(map, registry, active, output)?,
        Value::Object(obj) => {
            output.push_str(&format!("{}(", obj.type_name));
            write_mapping(&obj.fields, registry, active, output)?;
            output.push(')');
        }
        Value::Cell(cell) => match classify(value, registry) {
            Kind::WrapperCell(spec) => {
                let held = unwrap(cell.as_ref())?;
                output.push_str(&format!("{}(", spec.display_prefix()));
                write_value(&held, registry, active, output)?;
                output.push_str(&label_suffix(cell.label()));
            }
            _ => output.push_str(&format!("[cell {}]", cell.variant())),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_) => write_scalar(value, output),
    }
    Ok(())
}

fn write_mapping(
    map: &Mapping,
    registry: &VariantRegistry,
    active: &mut Vec<usize>,
    output: &mut String,
) -> Result<(), DereferenceError> {
    if map.is_empty() {
        output.push_str("{}");
        return Ok(());
    }
    output.push_str("{ ");
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        output.push_str(&format!("{}: ", format_key(key)));
        write_value(value, registry, active, output)?;
    }
    output.push_str(" }");
    Ok(())
}

fn write_scalar(value: &Value, output: &mut String) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => output.push_str(&format_number(*n)),
        Value::Str(s) => output.push_str(&quote(s)),
        _ => {}
    }
}

/// Closing part of a cell rendering, including the identity label
pub(crate) fn label_suffix(label: Option<&str>) -> String {
    match label {
        Some(label) => format!(", {{ id: {} }})", quote(label)),
        None => ")".to_string(),
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        n.to_string()
    }
}

/// Single-quoted string literal
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Bare identifier keys print as-is; anything else is quoted
pub(crate) fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if is_ident {
        key.to_string()
    } else {
        quote(key)
    }
}
