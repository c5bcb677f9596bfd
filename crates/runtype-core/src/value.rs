//! Dynamic values checked by runtime types
//!
//! Candidates are expressed as a discriminated [`Value`] so that field
//! lookup, extraneous-key detection and element iteration are explicit
//! operations rather than reflection.
//!
//! Two record-like shapes exist:
//! - [`Value::Record`]: fields in insertion order (struct literals, JSON objects)
//! - [`Value::Map`]: unordered attributes backed by `im::HashMap`
//!
//! Opaque handles ([`Resource`]) and callables ([`Function`]) compare by
//! identity, never by content.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use either::Either;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use strum::{Display, EnumIter};

use crate::Result;

// ============================================================================
// KIND
// ============================================================================

/// Observed runtime kind of a [`Value`].
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Null,
    Bool,
    Int,
    Float,
    #[strum(serialize = "string")]
    Str,
    List,
    Map,
    Record,
    Resource,
    Function,
}

// ============================================================================
// VALUE
// ============================================================================

/// A dynamically typed value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The absent marker
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// Unordered key/value attributes
    Map(im::HashMap<String, Value>),
    /// Ordered key/value fields
    Record(Record),
    Resource(Resource),
    Function(Function),
}

impl Value {
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Str(_) => Kind::Str,
            Self::List(_) => Kind::List,
            Self::Map(_) => Kind::Map,
            Self::Record(_) => Kind::Record,
            Self::Resource(_) => Kind::Resource,
            Self::Function(_) => Kind::Function,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for values the struct checker and `map_of` can look into.
    pub const fn is_record_like(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Map(_))
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a field of a record-like value.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Record(record) => record.get(key),
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Iterate the entries of a record-like value.
    ///
    /// Records yield fields in insertion order; maps in unspecified order.
    pub fn entries(&self) -> Option<impl Iterator<Item = (&str, &Self)> + '_> {
        match self {
            Self::Record(record) => Some(Either::Left(record.iter())),
            Self::Map(map) => Some(Either::Right(
                map.iter().map(|(key, value)| (key.as_str(), value)),
            )),
            _ => None,
        }
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// Ordered collection of named fields.
///
/// Inserting an existing key replaces its value in place, so keys stay unique
/// and keep their first position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |record, (key, value)| record.with(key, value))
    }
}

// ============================================================================
// RESOURCE
// ============================================================================

/// Opaque handle to something owned outside the type system
/// (a socket, a file, a buffer).
#[derive(Clone)]
pub struct Resource {
    label: Arc<str>,
    handle: Arc<dyn Any + Send + Sync>,
}

impl Resource {
    pub fn new<T: Any + Send + Sync>(label: impl Into<String>, handle: T) -> Self {
        Self {
            label: Arc::from(label.into()),
            handle: Arc::new(handle),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handle, &other.handle)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FUNCTION
// ============================================================================

type Body = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A callable value.
#[derive(Clone)]
pub struct Function {
    label: Arc<str>,
    body: Arc<Body>,
}

impl Function {
    /// Wrap an unchecked native function.
    pub fn native<F>(label: impl Into<String>, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            label: Arc::from(label.into()),
            body: Arc::new(body),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn call(&self, args: &[Value]) -> Result<Value> {
        (self.body)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SERIALIZATION
// ============================================================================

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Str(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Record(record) => {
                let mut out = serializer.serialize_map(Some(record.len()))?;
                for (key, value) in record.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Resource(resource) => {
                serializer.serialize_str(&format!("<resource {}>", resource.label()))
            }
            Self::Function(function) => {
                serializer.serialize_str(&format!("<function {}>", function.label()))
            }
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<im::HashMap<String, Self>> for Value {
    fn from(map: im::HashMap<String, Self>) -> Self {
        Self::Map(map)
    }
}

impl From<Resource> for Value {
    fn from(resource: Resource) -> Self {
        Self::Resource(resource)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

/// JSON objects become ordered records; integral numbers become `Int`.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(object) => Self::Record(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}
