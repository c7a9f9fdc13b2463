//! Converter registry
//!
//! Maps converter tags (the `int` in `<int:id>`) to factories that build a
//! converter from a segment description. Route building resolves every
//! bracketed segment through a registry.
//!
//! A process-wide default registry, seeded with the built-in converters, is
//! available through [`global`]. Mutate it during start-up, before routes
//! are built and queried; route builders that need isolation can use their
//! own [`ConverterRegistry`] via `Route::build_with`.
//!
//! # Examples
//!
//! ```
//! use waymark_core::{ConverterRegistry, ExactConverter, Params, SegmentSpec};
//!
//! let mut registry = ConverterRegistry::with_defaults();
//! assert!(registry.contains("int"));
//!
//! let previous = registry.register("home", |spec: SegmentSpec| {
//!     Ok(Box::new(ExactConverter::new(spec.identifier().unwrap_or_default())))
//! });
//! assert!(previous.is_none());
//!
//! let converter = registry.converter_for("<home:index>").unwrap();
//! assert_eq!(converter.accepts("index"), Some(Params::new()));
//! ```

use crate::converter::{
    Converter, ExactConverter, IntConverter, PathConverter, RegexConverter, SegmentSpec,
    SlugConverter, StrConverter, UuidConverter,
};
use crate::error::{Result, RouterError};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Opening delimiter of a placeholder segment.
pub const START_DESCRIPTION: char = '<';

/// Closing delimiter of a placeholder segment.
pub const END_DESCRIPTION: char = '>';

/// Separator between tag and identifier inside a placeholder.
pub const DESCRIPTION_DELIMITER: char = ':';

/// Builds a converter from a placeholder description.
pub type ConverterFactory =
    Arc<dyn Fn(SegmentSpec) -> Result<Box<dyn Converter>> + Send + Sync>;

/// Tag-to-factory mapping used by route building.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    factories: HashMap<String, ConverterFactory>,
}

impl ConverterRegistry {
    /// Create a registry without any converters.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in converters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register("int", |spec| Ok(Box::new(IntConverter::new(spec)?)));
        registry.register("str", |spec| Ok(Box::new(StrConverter::new(spec)?)));
        registry.register("slug", |spec| Ok(Box::new(SlugConverter::new(spec)?)));
        registry.register("uuid", |spec| Ok(Box::new(UuidConverter::new(spec)?)));
        registry.register("path", |spec| Ok(Box::new(PathConverter::new(spec)?)));
        registry.register("re", |spec| Ok(Box::new(RegexConverter::new(spec)?)));
        registry
    }

    /// Register a factory under a tag, returning the factory it replaced.
    pub fn register<F>(&mut self, tag: impl Into<String>, factory: F) -> Option<ConverterFactory>
    where
        F: Fn(SegmentSpec) -> Result<Box<dyn Converter>> + Send + Sync + 'static,
    {
        let tag = tag.into();
        debug!(tag = %tag, "Registering converter");
        self.factories.insert(tag, Arc::new(factory))
    }

    /// Look up the factory registered under a tag.
    pub fn lookup(&self, tag: &str) -> Option<ConverterFactory> {
        self.factories.get(tag).cloned()
    }

    /// Remove a tag, returning its factory.
    pub fn unregister(&mut self, tag: &str) -> Option<ConverterFactory> {
        let removed = self.factories.remove(tag);
        if removed.is_some() {
            debug!(tag = %tag, "Unregistered converter");
        }
        removed
    }

    /// Check if a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Resolve one path segment to its converter.
    ///
    /// Segments of the form `<tag:payload>` go through the factory
    /// registered under `tag`. Everything else, including bracketed text
    /// without a `:`, becomes an [`ExactConverter`] over the raw text.
    pub fn converter_for(&self, segment: &str) -> Result<Box<dyn Converter>> {
        let Some(inner) = segment
            .strip_prefix(START_DESCRIPTION)
            .and_then(|rest| rest.strip_suffix(END_DESCRIPTION))
        else {
            return Ok(Box::new(ExactConverter::new(segment)));
        };

        let Some((tag, identifier)) = inner.split_once(DESCRIPTION_DELIMITER) else {
            return Ok(Box::new(ExactConverter::new(segment)));
        };

        let factory = self
            .factories
            .get(tag)
            .ok_or_else(|| RouterError::UnknownConverter(tag.to_string()))?;
        factory(SegmentSpec::placeholder(tag, segment, identifier))
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

// ============================================================================
// Process-wide Registry
// ============================================================================

static GLOBAL: Lazy<RwLock<ConverterRegistry>> =
    Lazy::new(|| RwLock::new(ConverterRegistry::with_defaults()));

/// The process-wide registry used by `Route::build`.
pub fn global() -> &'static RwLock<ConverterRegistry> {
    &GLOBAL
}

/// Register a converter in the process-wide registry.
pub fn register_converter<F>(tag: impl Into<String>, factory: F) -> Option<ConverterFactory>
where
    F: Fn(SegmentSpec) -> Result<Box<dyn Converter>> + Send + Sync + 'static,
{
    GLOBAL.write().register(tag, factory)
}

/// Remove a converter from the process-wide registry.
pub fn unregister_converter(tag: &str) -> Option<ConverterFactory> {
    GLOBAL.write().unregister(tag)
}
