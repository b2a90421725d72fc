use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::cell::WrapperCell;

/// A datum under comparison
///
/// Composites and cells are reference-counted: cloning a `Value` is cheap and
/// keeps the allocation's address, which is what cycle detection keys on.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Seq(Rc<Vec<Value>>),
    Map(Rc<Mapping>),
    Object(Rc<PlainObject>),
    Cell(Rc<dyn WrapperCell>),
}

impl Value {
    /// Build a string value
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Build an ordered sequence
    pub fn seq<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Seq(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build a mapping; later duplicates of a key replace earlier ones in place
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(Rc::new(entries.into_iter().collect()))
    }

    /// Build a named plain object
    pub fn object<I, K, V>(type_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Rc::new(PlainObject {
            type_name: type_name.into(),
            fields: fields.into_iter().collect(),
        }))
    }

    /// Address of the underlying allocation, for reference-typed values
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Seq(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Map(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Object(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Cell(rc) => Some(Rc::as_ptr(rc) as *const () as usize),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_) => None,
        }
    }

    /// Whether both values point at the same allocation
    pub fn same_reference(&self, other: &Value) -> bool {
        matches!((self.identity(), other.identity()), (Some(a), Some(b)) if a == b)
    }

    pub fn as_cell(&self) -> Option<&dyn WrapperCell> {
        match self {
            Value::Cell(cell) => Some(cell.as_ref()),
            _ => None,
        }
    }

    /// Keyed entries of a mapping or plain object
    pub fn entries(&self) -> Option<&Mapping> {
        match self {
            Value::Map(map) => Some(map),
            Value::Object(obj) => Some(&obj.fields),
            _ => None,
        }
    }
}

// Cells may reach back to the value that holds them, so Debug never descends
// into a cell.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Seq(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Map(map) => f
                .debug_map()
                .entries(map.iter().map(|(k, v)| (k, v)))
                .finish(),
            Value::Object(obj) => {
                let mut s = f.debug_struct(&obj.type_name);
                for (k, v) in obj.fields.iter() {
                    s.field(k, v);
                }
                s.finish()
            }
            Value::Cell(cell) => match cell.label() {
                Some(label) => write!(f, "Cell({}, id: {:?})", cell.variant(), label),
                None => write!(f, "Cell({})", cell.variant()),
            },
        }
    }
}

/// Insertion-ordered keyed entries
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; a replaced key keeps its original position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A keyed record carrying a type name, e.g. an instance of a host class
///
/// Two plain objects are only comparable when their type names match.
#[derive(Debug, Clone)]
pub struct PlainObject {
    pub type_name: String,
    pub fields: Mapping,
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Map(Rc::new(map))
    }
}

impl<C: WrapperCell + 'static> From<Rc<C>> for Value {
    fn from(cell: Rc<C>) -> Self {
        Value::Cell(cell)
    }
}

/// Plain JSON data maps onto primitives, sequences and mappings; object key
/// order follows the parsed document when serde_json preserves it.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::from(s),
            serde_json::Value::Array(items) => Value::seq(items),
            serde_json::Value::Object(fields) => Value::map(fields),
        }
    }
}
