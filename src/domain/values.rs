//! Flat value maps: parse results, extracted groups and resolved configurations

use super::schema::GroupSchema;
use super::value::{ParamKind, ParamValue};
use crate::error::SchemaError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Read access to a flat name → value source.
///
/// `None` values are entries that exist but were not supplied.
pub trait ArgValues {
    fn values(&self) -> Box<dyn Iterator<Item = (&str, Option<&ParamValue>)> + '_>;
}

/// Values produced by parsing one set of process arguments.
///
/// Every registered option has an entry; `None` marks "not supplied" for options
/// registered with `fill_none`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    values: BTreeMap<String, Option<ParamValue>>,
}

impl ParseResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<ParamValue>) {
        self.values.insert(name.into(), value);
    }

    /// The entry for `name`: outer `None` if unknown, inner `None` if not supplied.
    pub fn entry(&self, name: &str) -> Option<Option<&ParamValue>> {
        self.values.get(name).map(Option::as_ref)
    }

    /// The supplied value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Entries whose value was supplied (or defaulted), skipping the sentinel.
    pub fn supplied(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }
}

impl ArgValues for ParseResult {
    fn values(&self) -> Box<dyn Iterator<Item = (&str, Option<&ParamValue>)> + '_> {
        Box::new(self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref())))
    }
}

impl<K: Into<String>> FromIterator<(K, Option<ParamValue>)> for ParseResult {
    fn from_iter<I: IntoIterator<Item = (K, Option<ParamValue>)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

/// The final merged configuration handed to the downstream computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig {
    values: BTreeMap<String, ParamValue>,
}

impl ResolvedConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn overlay(mut self, other: impl IntoIterator<Item = (String, ParamValue)>) -> Self {
        self.values.extend(other);
        self
    }

    /// Render as `Namespace(key=value, ...)` with sorted keys.
    pub fn to_namespace_string(&self) -> String {
        let args: Vec<String> =
            self.values.iter().map(|(k, v)| format!("{}={}", k, v.to_literal())).collect();
        format!("Namespace({})", args.join(", "))
    }
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_namespace_string())
    }
}

impl ArgValues for ResolvedConfig {
    fn values(&self) -> Box<dyn Iterator<Item = (&str, Option<&ParamValue>)> + '_> {
        Box::new(self.values.iter().map(|(k, v)| (k.as_str(), Some(v))))
    }
}

impl IntoIterator for ResolvedConfig {
    type Item = (String, ParamValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for ResolvedConfig {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

/// The values of one parameter group, filtered out of a larger source.
///
/// Typed getters fall back to the schema default when a value was not supplied.
#[derive(Debug, Clone)]
pub struct GroupParams {
    schema: GroupSchema,
    values: BTreeMap<String, Option<ParamValue>>,
}

impl GroupParams {
    pub(crate) fn new(schema: GroupSchema) -> Self {
        Self { schema, values: BTreeMap::new() }
    }

    pub(crate) fn set(&mut self, name: &str, value: Option<ParamValue>) {
        self.values.insert(name.to_string(), value);
    }

    pub fn schema(&self) -> &GroupSchema {
        &self.schema
    }

    /// Names present in the group, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The raw extracted value; `None` if absent or not supplied.
    pub fn raw(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// The extracted value, or the schema default.
    pub fn value(&self, name: &str) -> Result<&ParamValue, SchemaError> {
        if let Some(value) = self.raw(name) {
            return Ok(value);
        }
        self.schema.find(name).map(|spec| spec.default()).ok_or_else(|| SchemaError::UnknownParam {
            group: self.schema.title().to_string(),
            name: name.to_string(),
        })
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, SchemaError> {
        let value = self.value(name)?;
        value.as_bool().ok_or_else(|| mismatch(name, ParamKind::Bool, value))
    }

    pub fn get_int(&self, name: &str) -> Result<i64, SchemaError> {
        let value = self.value(name)?;
        value.as_int().ok_or_else(|| mismatch(name, ParamKind::Int, value))
    }

    pub fn get_float(&self, name: &str) -> Result<f64, SchemaError> {
        let value = self.value(name)?;
        value.as_float().ok_or_else(|| mismatch(name, ParamKind::Float, value))
    }

    pub fn get_str(&self, name: &str) -> Result<&str, SchemaError> {
        let value = self.value(name)?;
        value.as_str().ok_or_else(|| mismatch(name, ParamKind::Str, value))
    }
}

fn mismatch(name: &str, expected: ParamKind, found: &ParamValue) -> SchemaError {
    SchemaError::TypeMismatch { name: name.to_string(), expected, found: found.kind() }
}
