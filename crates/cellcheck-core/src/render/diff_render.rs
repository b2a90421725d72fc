//! Multi-line diff rendering.
//!
//! Output mirrors the actual side: recognised cells print as nested calls,
//! leaf mismatches carry a `// should equal <expected>` comment and runs of
//! equal siblings collapse to `...`. Lines are built as `(depth, text,
//! comment)` triples so that separators can be placed before a trailing
//! comment.

use crate::config::InspectConfig;
use crate::diff::model::{Change, DiffEntry, DiffKey, DiffNode, Shape};
use crate::errors::DereferenceError;
use crate::registry::VariantRegistry;
use crate::render::value_render::{format_key, label_suffix, render_inline};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    depth: usize,
    text: String,
    comment: Option<String>,
}

impl Line {
    fn text(text: impl Into<String>) -> Self {
        Self {
            depth: 0,
            text: text.into(),
            comment: None,
        }
    }

    fn comment(comment: impl Into<String>) -> Self {
        Self {
            depth: 0,
            text: String::new(),
            comment: Some(comment.into()),
        }
    }

    fn annotated(text: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            depth: 0,
            text: text.into(),
            comment: Some(comment.into()),
        }
    }
}

/// Whether a line carries a value that a following sibling must be separated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Value,
    Elided,
    Missing,
}

/// Render a diff tree as indented text
///
/// # Errors
/// * `DereferenceError` - a cell held by an equal or extra entry failed to
///   produce its value while being printed
pub fn render_diff(
    node: &DiffNode,
    registry: &VariantRegistry,
    config: &InspectConfig,
) -> Result<String, DereferenceError> {
    let renderer = DiffRenderer { registry, config };
    let lines = renderer.node_lines(node)?;
    Ok(renderer.join(&lines))
}

struct DiffRenderer<'a> {
    registry: &'a VariantRegistry,
    config: &'a InspectConfig,
}

impl DiffRenderer<'_> {
    fn node_lines(&self, node: &DiffNode) -> Result<Vec<Line>, DereferenceError> {
        let body = match &node.change {
            Change::Mismatch { actual, expected } => {
                let expected = render_inline(expected, self.registry)?;
                vec![Line::annotated(
                    render_inline(actual, self.registry)?,
                    format!("should equal {}", expected),
                )]
            }
            Change::Composite { shape, entries } => self.composite_lines(shape, entries)?,
        };

        if node.frames.is_empty() {
            return Ok(body);
        }

        let open: String = node.frames.iter().map(|f| format!("{}(", f.prefix)).collect();
        let close: String = node
            .frames
            .iter()
            .rev()
            .map(|f| label_suffix(f.label.as_deref()))
            .collect();

        // A leaf inside cells goes on its own indented line so the comment
        // does not swallow the closing parentheses.
        if matches!(node.change, Change::Mismatch { .. }) {
            let mut lines = vec![Line::text(open)];
            lines.extend(indent(body));
            lines.push(Line::text(close));
            return Ok(lines);
        }

        let mut lines = body;
        if let Some(first) = lines.first_mut() {
            first.text.insert_str(0, &open);
        }
        if let Some(last) = lines.last_mut() {
            last.text.push_str(&close);
        }
        Ok(lines)
    }

    fn composite_lines(&self, shape: &Shape, entries: &[DiffEntry]) -> Result<Vec<Line>, DereferenceError> {
        let (open, close) = match shape {
            Shape::Sequence => ("[".to_string(), "]".to_string()),
            Shape::Mapping => ("{".to_string(), "}".to_string()),
            Shape::Object { type_name } => (format!("{}({{", type_name), "})".to_string()),
        };

        let mut items: Vec<(Item, Vec<Line>)> = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.is_equal() && self.config.elide_equal {
                if !matches!(items.last(), Some((Item::Elided, _))) {
                    items.push((Item::Elided, vec![Line::text("...")]));
                }
                continue;
            }
            items.push(self.entry_lines(entry)?);
        }

        for i in 0..items.len() {
            let needs_separator = items[i].0 == Item::Value
                && items[i + 1..].iter().any(|(kind, _)| *kind == Item::Value);
            if needs_separator {
                if let Some(last) = items[i].1.last_mut() {
                    last.text.push(',');
                }
            }
        }

        let mut lines = vec![Line::text(open)];
        lines.extend(indent(items.into_iter().flat_map(|(_, lines)| lines).collect()));
        lines.push(Line::text(close));
        Ok(lines)
    }

    fn entry_lines(&self, entry: &DiffEntry) -> Result<(Item, Vec<Line>), DereferenceError> {
        let key_prefix = key_prefix(entry.key());
        Ok(match entry {
            DiffEntry::Equal { value, .. } => (
                Item::Value,
                vec![Line::text(format!("{}{}", key_prefix, render_inline(value, self.registry)?))],
            ),
            DiffEntry::Changed { node, .. } => {
                let mut lines = self.node_lines(node)?;
                if let Some(first) = lines.first_mut() {
                    first.text.insert_str(0, &key_prefix);
                }
                (Item::Value, lines)
            }
            DiffEntry::Missing { expected, .. } => (
                Item::Missing,
                vec![Line::comment(format!(
                    "missing {}{}",
                    key_prefix,
                    render_inline(expected, self.registry)?
                ))],
            ),
            DiffEntry::Extra { actual, .. } => (
                Item::Value,
                vec![Line::annotated(
                    format!("{}{}", key_prefix, render_inline(actual, self.registry)?),
                    "should be removed",
                )],
            ),
        })
    }

    fn join(&self, lines: &[Line]) -> String {
        let mut output = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&" ".repeat(line.depth * self.config.indent_width));
            match (&line.comment, line.text.is_empty()) {
                (Some(comment), true) => output.push_str(&format!("// {}", comment)),
                (Some(comment), false) => output.push_str(&format!("{} // {}", line.text, comment)),
                (None, _) => output.push_str(&line.text),
            }
        }
        output
    }
}

fn indent(lines: Vec<Line>) -> Vec<Line> {
    lines
        .into_iter()
        .map(|mut line| {
            line.depth += 1;
            line
        })
        .collect()
}

fn key_prefix(key: &DiffKey) -> String {
    match key {
        DiffKey::Index(_) => String::new(),
        DiffKey::Key(name) => format!("{}: ", format_key(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::engine::equals;
    use crate::model::{computed, observable, Value};

    fn diff_text(actual: &Value, expected: &Value) -> String {
        let diff = equals(actual, expected).unwrap().into_diff().unwrap();
        render_diff(&diff, &VariantRegistry::default(), &InspectConfig::default()).unwrap()
    }

    #[test]
    fn test_leaf_inside_nested_cells() {
        let text = diff_text(&computed(|| computed(|| 42)), &computed(|| computed(|| 24)));
        assert_eq!(text, "computed(computed(\n  42 // should equal 24\n))");
    }

    #[test]
    fn test_composite_elides_equal_siblings() {
        let actual = observable(Value::map([("a", 1), ("b", 2), ("c", 3), ("d", 4)]));
        let expected = Value::map([("a", 1), ("b", 2), ("c", 30), ("d", 4)]);
        assert_eq!(
            diff_text(&actual, &expected),
            "observable({\n  ...\n  c: 3 // should equal 30\n  ...\n})"
        );
    }

    #[test]
    fn test_missing_and_extra_keys() {
        let actual = Value::map([("foo", observable(42))]);
        let expected = Value::map([("bar", observable(42))]);
        assert_eq!(
            diff_text(&actual, &expected),
            "{\n  foo: observable(42) // should be removed\n  // missing bar: observable(42)\n}"
        );
    }

    #[test]
    fn test_separator_precedes_comment() {
        let actual = Value::seq([1, 2]);
        let expected = Value::seq([3, 4]);
        assert_eq!(
            diff_text(&actual, &expected),
            "[\n  1, // should equal 3\n  2 // should equal 4\n]"
        );
    }

    #[test]
    fn test_labels_close_in_reverse_order() {
        let actual = Value::from(crate::model::Observable::with_id(
            computed(|| 1),
            "outer",
        ));
        let text = diff_text(&actual, &Value::from(2));
        assert_eq!(text, "observable(computed(\n  1 // should equal 2\n), { id: 'outer' })");
    }

    #[test]
    fn test_without_elision() {
        let diff = equals(&Value::seq([1, 2]), &Value::seq([1, 3]))
            .unwrap()
            .into_diff()
            .unwrap();
        let config = InspectConfig::default().with_elide_equal(false).with_indent_width(4);
        let text = render_diff(&diff, &VariantRegistry::default(), &config).unwrap();
        assert_eq!(text, "[\n    1,\n    2 // should equal 3\n]");
    }
}
