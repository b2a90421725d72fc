//! Structural equality engine.
//!
//! The entry points are [`equals`] and [`Comparator`]. Each top-level call
//! allocates its own comparison context holding the identity pairs on the
//! active recursion path; the context is dropped when the call returns.

use std::collections::HashSet;
use std::time::Instant;

use cellcheck_core_types::schema::{OUTCOME_EQUAL, OUTCOME_NOT_EQUAL};
use cellcheck_core_types::RequestContext;

use crate::classify::{classify, unwrap, Kind};
use crate::diff::model::{CellFrame, Change, DiffEntry, DiffKey, DiffNode, Shape};
use crate::errors::{CompareError, ExError, Result};
use crate::model::{Mapping, Value};
use crate::registry::VariantRegistry;
use crate::{log_op_end, log_op_error, log_op_start};

/// Result of a comparison that ran to completion
#[derive(Debug, Clone)]
pub enum Outcome {
    Equal,
    NotEqual(DiffNode),
}

impl Outcome {
    pub fn is_equal(&self) -> bool {
        matches!(self, Outcome::Equal)
    }

    pub fn diff(&self) -> Option<&DiffNode> {
        match self {
            Outcome::Equal => None,
            Outcome::NotEqual(diff) => Some(diff),
        }
    }

    pub fn into_diff(self) -> Option<DiffNode> {
        match self {
            Outcome::Equal => None,
            Outcome::NotEqual(diff) => Some(diff),
        }
    }
}

/// Compare two values using the standard variant registry
///
/// # Errors
/// * `CircularStructure` - a self-referential graph was reached on both sides
/// * `Dereference` - a wrapper cell failed to produce its value
pub fn equals(actual: &Value, expected: &Value) -> Result<Outcome> {
    let registry = VariantRegistry::default();
    Comparator::new(&registry).equals(actual, expected)
}

/// Equality engine bound to a variant registry
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'r> {
    registry: &'r VariantRegistry,
}

impl<'r> Comparator<'r> {
    pub fn new(registry: &'r VariantRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r VariantRegistry {
        self.registry
    }

    /// Compare `actual` against `expected`
    ///
    /// Wrapper cells on either side are unwrapped transparently; their
    /// variant and label never influence the verdict.
    ///
    /// # Errors
    /// * `CircularStructure` - an identity pair was revisited on the active path
    /// * `Dereference` - a wrapper cell failed to produce its value
    pub fn equals(&self, actual: &Value, expected: &Value) -> Result<Outcome> {
        self.equals_with_context(&RequestContext::new(), actual, expected)
    }

    /// [`equals`](Self::equals) with caller-supplied correlation context
    ///
    /// # Errors
    /// Same as `equals`.
    pub fn equals_with_context(
        &self,
        ctx: &RequestContext,
        actual: &Value,
        expected: &Value,
    ) -> Result<Outcome> {
        self.run("equals", ctx, |cx| cx.compare(actual, expected))
    }

    /// Check that every key of `properties` exists on `subject` with an equal
    /// value. Keys present only on the subject are ignored.
    ///
    /// # Errors
    /// Same as `equals`.
    pub fn compare_properties(&self, subject: &Value, properties: &Value) -> Result<Outcome> {
        self.run("compare_properties", &RequestContext::new(), |cx| {
            cx.compare_properties(subject, properties)
        })
    }

    fn run<F>(&self, op: &'static str, ctx: &RequestContext, f: F) -> Result<Outcome>
    where
        F: FnOnce(&mut ComparisonContext<'r>) -> Result<Option<DiffNode>>,
    {
        let started = Instant::now();
        let id = &ctx.comparison_id;
        log_op_start!(op, comparison_id = %id, parent = ?ctx.parent);

        let mut cx = ComparisonContext::new(self.registry);
        let result = f(&mut cx);
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(None) => {
                log_op_end!(op, duration_ms = duration_ms, comparison_id = %id, outcome = OUTCOME_EQUAL);
                Ok(Outcome::Equal)
            }
            Ok(Some(diff)) => {
                let mismatch_count = diff.mismatch_count() as u64;
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    comparison_id = %id,
                    outcome = OUTCOME_NOT_EQUAL,
                    mismatch_count = mismatch_count
                );
                Ok(Outcome::NotEqual(diff))
            }
            Err(err) => {
                let ex = ExError::from(err.clone())
                    .with_op(op)
                    .with_comparison_id(id.clone());
                log_op_error!(op, ex, duration_ms = duration_ms);
                Err(err)
            }
        }
    }
}

/// Per-call state: identity pairs on the active path and the current key path
struct ComparisonContext<'r> {
    registry: &'r VariantRegistry,
    active: HashSet<(usize, usize)>,
    path: Vec<DiffKey>,
}

impl<'r> ComparisonContext<'r> {
    fn new(registry: &'r VariantRegistry) -> Self {
        Self {
            registry,
            active: HashSet::new(),
            path: Vec::new(),
        }
    }

    fn compare(&mut self, actual: &Value, expected: &Value) -> Result<Option<DiffNode>> {
        let pair = match (actual.identity(), expected.identity()) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        };
        if let Some(pair) = pair {
            if !self.active.insert(pair) {
                return Err(self.circular());
            }
        }

        let result = self.compare_unwrapped(actual, expected);

        if let Some(pair) = pair {
            self.active.remove(&pair);
        }
        result
    }

    fn compare_unwrapped(&mut self, actual: &Value, expected: &Value) -> Result<Option<DiffNode>> {
        let (frames, inner_actual) = self.unwrap_all(actual)?;
        let (expected_frames, inner_expected) = self.unwrap_all(expected)?;

        if frames.is_empty() && expected_frames.is_empty() {
            return self.compare_structure(actual, expected);
        }

        // The unwrapped pair gets its own cycle guard.
        let diff = self.compare(&inner_actual, &inner_expected)?;
        Ok(diff.map(|mut node| {
            let mut all = frames;
            all.append(&mut node.frames);
            node.frames = all;
            node
        }))
    }

    /// Unwrap while the value classifies as a recognised wrapper cell
    fn unwrap_all(&self, value: &Value) -> Result<(Vec<CellFrame>, Value)> {
        let mut frames = Vec::new();
        // Cells already unwrapped in this chain. Holding them keeps freshly
        // computed cells alive so their addresses cannot be reused.
        let mut chain: Vec<Value> = Vec::new();
        let mut current = value.clone();

        loop {
            let spec = match classify(&current, self.registry) {
                Kind::WrapperCell(spec) => spec,
                _ => break,
            };
            let Value::Cell(cell) = &current else {
                break;
            };
            if chain.iter().any(|seen| seen.same_reference(&current)) {
                return Err(self.circular());
            }
            chain.push(current.clone());

            tracing::trace!(variant = spec.tag(), depth = frames.len(), "unwrapping cell");
            frames.push(CellFrame {
                prefix: spec.display_prefix().to_string(),
                label: cell.label().map(str::to_string),
            });
            let next = unwrap(cell.as_ref())?;
            current = next;
        }

        Ok((frames, current))
    }

    fn compare_structure(&mut self, actual: &Value, expected: &Value) -> Result<Option<DiffNode>> {
        match (actual, expected) {
            (Value::Seq(a), Value::Seq(b)) => self.compare_sequences(a, b),
            (Value::Map(a), Value::Map(b)) => self.compare_entries(Shape::Mapping, a, b),
            (Value::Object(a), Value::Object(b)) if a.type_name == b.type_name => {
                let shape = Shape::Object {
                    type_name: a.type_name.clone(),
                };
                self.compare_entries(shape, &a.fields, &b.fields)
            }
            _ if scalar_equal(actual, expected) => Ok(None),
            _ => Ok(Some(DiffNode::leaf(
                Vec::new(),
                actual.clone(),
                expected.clone(),
            ))),
        }
    }

    fn compare_sequences(&mut self, actual: &[Value], expected: &[Value]) -> Result<Option<DiffNode>> {
        let len = actual.len().max(expected.len());
        let mut entries = Vec::with_capacity(len);

        for index in 0..len {
            let key = DiffKey::Index(index);
            let entry = match (actual.get(index), expected.get(index)) {
                (Some(a), Some(b)) => self.compare_child(key, a, b)?,
                (Some(a), None) => DiffEntry::Extra {
                    key,
                    actual: a.clone(),
                },
                (None, Some(b)) => DiffEntry::Missing {
                    key,
                    expected: b.clone(),
                },
                (None, None) => break,
            };
            entries.push(entry);
        }

        Ok(composite(Shape::Sequence, entries))
    }

    fn compare_entries(
        &mut self,
        shape: Shape,
        actual: &Mapping,
        expected: &Mapping,
    ) -> Result<Option<DiffNode>> {
        let mut entries = Vec::with_capacity(actual.len());

        for (name, a) in actual.iter() {
            let key = DiffKey::Key(name.to_string());
            let entry = match expected.get(name) {
                Some(b) => self.compare_child(key, a, b)?,
                None => DiffEntry::Extra {
                    key,
                    actual: a.clone(),
                },
            };
            entries.push(entry);
        }
        for (name, b) in expected.iter() {
            if !actual.contains_key(name) {
                entries.push(DiffEntry::Missing {
                    key: DiffKey::Key(name.to_string()),
                    expected: b.clone(),
                });
            }
        }

        Ok(composite(shape, entries))
    }

    fn compare_properties(&mut self, subject: &Value, properties: &Value) -> Result<Option<DiffNode>> {
        let (frames, subject) = self.unwrap_all(subject)?;
        let (_, properties) = self.unwrap_all(properties)?;

        let (Some(have), Some(want)) = (subject.entries(), properties.entries()) else {
            return Ok(Some(DiffNode::leaf(frames, subject.clone(), properties.clone())));
        };
        let shape = match &subject {
            Value::Object(obj) => Shape::Object {
                type_name: obj.type_name.clone(),
            },
            _ => Shape::Mapping,
        };

        let mut entries = Vec::with_capacity(have.len());
        for (name, a) in have.iter() {
            let key = DiffKey::Key(name.to_string());
            let entry = match want.get(name) {
                Some(b) => self.compare_child(key, a, b)?,
                // Keys the caller did not ask about never count as a mismatch.
                None => DiffEntry::Equal {
                    key,
                    value: a.clone(),
                },
            };
            entries.push(entry);
        }
        for (name, b) in want.iter() {
            if !have.contains_key(name) {
                entries.push(DiffEntry::Missing {
                    key: DiffKey::Key(name.to_string()),
                    expected: b.clone(),
                });
            }
        }

        Ok(composite(shape, entries).map(|mut node| {
            node.frames = frames;
            node
        }))
    }

    fn compare_child(&mut self, key: DiffKey, actual: &Value, expected: &Value) -> Result<DiffEntry> {
        self.path.push(key.clone());
        let result = self.compare(actual, expected);
        self.path.pop();

        Ok(match result? {
            None => DiffEntry::Equal {
                key,
                value: actual.clone(),
            },
            Some(node) => DiffEntry::Changed { key, node },
        })
    }

    fn circular(&self) -> CompareError {
        let path = self.path_string();
        tracing::debug!(path = %path, "circular structure detected");
        CompareError::CircularStructure { path }
    }

    fn path_string(&self) -> String {
        let mut path = String::from("$");
        for key in &self.path {
            path.push_str(&key.to_string());
        }
        path
    }
}

fn composite(shape: Shape, entries: Vec<DiffEntry>) -> Option<DiffNode> {
    if entries.iter().all(DiffEntry::is_equal) {
        return None;
    }
    Some(DiffNode {
        frames: Vec::new(),
        change: Change::Composite { shape, entries },
    })
}

/// Strict scalar equality: no coercion between kinds; NaN equals NaN; opaque
/// cells compare by identity.
fn scalar_equal(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Cell(_), Value::Cell(_)) => actual.same_reference(expected),
        _ => false,
    }
}
