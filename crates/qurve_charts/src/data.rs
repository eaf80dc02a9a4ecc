//! Tabular chart data and key accessors.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::IndexMap;

/// A single cell value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Numeric coercion. Anything that is not a number (or numeric text)
    /// comes back as NaN so callers can apply their own fallback.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(v) => *v,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Text(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Value::Null => f64::NAN,
        }
    }

    pub fn as_finite(&self) -> Option<f64> {
        let v = self.to_number();
        v.is_finite().then_some(v)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// One row of a dataset. Field order is insertion order.
pub type Record = IndexMap<String, Value>;

/// Build a record from `(field, value)` pairs.
pub fn record<I, K, V>(fields: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// First field holding an actual number, in field order.
pub fn first_numeric(record: &Record) -> Option<f64> {
    record.values().find_map(|v| match v {
        Value::Number(n) => Some(*n),
        _ => None,
    })
}

/// Shared, immutable sequence of records.
///
/// Cloning is cheap; identity (see [`Dataset::ptr_eq`]) is what charts use to
/// decide whether derived geometry is stale.
#[derive(Clone, Default)]
pub struct Dataset(Rc<Vec<Record>>);

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self(Rc::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    pub fn ptr_eq(&self, other: &Dataset) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset").field("len", &self.len()).finish()
    }
}

/// Accessor function `(record, index) -> value`. Must be pure.
pub type AccessorFn = dyn Fn(&Record, usize) -> Value;

/// How a value is pulled out of a record.
#[derive(Clone)]
pub enum DataKey {
    Field(String),
    Func(Rc<AccessorFn>),
}

impl DataKey {
    pub fn field(name: impl Into<String>) -> Self {
        DataKey::Field(name.into())
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&Record, usize) -> Value + 'static,
    {
        DataKey::Func(Rc::new(f))
    }

    pub fn resolve(&self, record: &Record, index: usize) -> Value {
        match self {
            DataKey::Field(name) => record.get(name).cloned().unwrap_or_default(),
            DataKey::Func(f) => f(record, index),
        }
    }

    /// Display name: the field name, or empty for function accessors.
    pub fn name(&self) -> &str {
        match self {
            DataKey::Field(name) => name,
            DataKey::Func(_) => "",
        }
    }

    /// Identity used for caching. Two function keys are the same only if they
    /// share the same closure allocation; the id keeps that allocation alive
    /// so its address cannot be handed to another closure meanwhile.
    pub(crate) fn cache_id(&self) -> CacheId {
        match self {
            DataKey::Field(name) => CacheId::Field(name.clone()),
            DataKey::Func(f) => CacheId::Func(f.clone()),
        }
    }
}

impl From<&str> for DataKey {
    fn from(name: &str) -> Self {
        DataKey::field(name)
    }
}

impl From<String> for DataKey {
    fn from(name: String) -> Self {
        DataKey::Field(name)
    }
}

impl fmt::Debug for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKey::Field(name) => f.debug_tuple("Field").field(name).finish(),
            DataKey::Func(_) => f.write_str("Func(..)"),
        }
    }
}

#[derive(Clone)]
pub(crate) enum CacheId {
    Field(String),
    Func(Rc<AccessorFn>),
}

impl CacheId {
    fn func_addr(f: &Rc<AccessorFn>) -> *const () {
        Rc::as_ptr(f) as *const ()
    }
}

impl PartialEq for CacheId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CacheId::Field(a), CacheId::Field(b)) => a == b,
            (CacheId::Func(a), CacheId::Func(b)) => Self::func_addr(a) == Self::func_addr(b),
            _ => false,
        }
    }
}

impl Eq for CacheId {}

impl Hash for CacheId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            CacheId::Field(name) => {
                0u8.hash(state);
                name.hash(state);
            }
            CacheId::Func(f) => {
                1u8.hash(state);
                Self::func_addr(f).hash(state);
            }
        }
    }
}

impl fmt::Debug for CacheId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheId::Field(name) => f.debug_tuple("Field").field(name).finish(),
            CacheId::Func(func) => write!(f, "Func({:p})", Self::func_addr(func)),
        }
    }
}

/// Numeric x for a record: the accessor's value, or the index when there is
/// no accessor or the value is not finite.
pub fn resolve_x(record: &Record, index: usize, key: Option<&DataKey>) -> f64 {
    key.and_then(|k| k.resolve(record, index).as_finite())
        .unwrap_or(index as f64)
}

/// Numeric y for a record: the accessor's value (first numeric field when
/// there is no accessor), or 0 when not finite.
pub fn resolve_y(record: &Record, index: usize, key: Option<&DataKey>) -> f64 {
    let raw = match key {
        Some(k) => k.resolve(record, index).as_finite(),
        None => first_numeric(record).filter(|v| v.is_finite()),
    };
    raw.unwrap_or(0.0)
}

/// Finite values an accessor yields over the dataset. `None` means "first
/// numeric field".
pub(crate) fn finite_values<'a>(
    data: &'a Dataset,
    key: Option<&'a DataKey>,
) -> impl Iterator<Item = f64> + 'a {
    data.iter().enumerate().filter_map(move |(i, r)| {
        let v = match key {
            Some(k) => k.resolve(r, i).as_finite(),
            None => first_numeric(r),
        };
        v.filter(|v| v.is_finite())
    })
}
