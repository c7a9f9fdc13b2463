//! Captured path parameters
//!
//! Parameters flow both ways through the router:
//!
//! - **Matching** accumulates the values each converter captured
//! - **Reverse lookup** consumes caller-supplied values segment by segment
//!
//! `Params` keeps insertion order. Reverse lookup of regex segments scans
//! the remaining values in that order, so the order callers insert in is
//! the order they are tried in.

use smallvec::SmallVec;
use std::fmt;

// ============================================================================
// Constants
// ============================================================================

/// Maximum number of inline parameters before heap allocation.
pub const INLINE_PARAM_COUNT: usize = 8;

// ============================================================================
// Values
// ============================================================================

/// A single captured or supplied parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    /// Integer value (produced by the `int` converter)
    Int(i64),
    /// Text value (produced by every other built-in converter)
    Str(String),
}

impl ParamValue {
    /// Get the integer, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(value) => Some(*value),
            ParamValue::Str(_) => None,
        }
    }

    /// Get the text, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Int(_) => None,
            ParamValue::Str(value) => Some(value),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(value) => write!(f, "{}", value),
            ParamValue::Str(value) => f.write_str(value),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

// ============================================================================
// Params
// ============================================================================

/// Insertion-ordered parameter map.
///
/// Stores up to 8 parameters inline, which covers typical routes without
/// touching the heap. Equality compares contents, not order.
#[derive(Clone, Default)]
pub struct Params {
    entries: SmallVec<[(String, ParamValue); INLINE_PARAM_COUNT]>,
}

impl Params {
    /// Create empty params.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Create params holding a single entry.
    pub fn single(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        let mut params = Self::new();
        params.insert(name, value);
        params
    }

    /// Builder-style insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use waymark_core::Params;
    ///
    /// let params = Params::new().with("year", 2020).with("slug", "hello-world");
    /// assert_eq!(params.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a value, replacing any previous value under the same name.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Join a value onto an existing one with `/`, or insert it.
    ///
    /// Used for converters that consume several raw segments into one
    /// logical value.
    pub fn append_segment(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = ParamValue::Str(format!("{}/{}", entry.1, value)),
            None => self.entries.push((name, value)),
        }
    }

    /// Get a value by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Check if a name is present.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove a value by name, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Get number of parameters.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if params are stored inline.
    #[inline]
    pub fn is_inline(&self) -> bool {
        !self.entries.spilled()
    }
}

impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for Params {}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (name, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            match value {
                ParamValue::Int(int) => write!(f, "'{}': {}", name, int)?,
                ParamValue::Str(text) => write!(f, "'{}': '{}'", name, text)?,
            }
        }
        f.write_str("}")
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl From<&Params> for Params {
    fn from(params: &Params) -> Self {
        params.clone()
    }
}
