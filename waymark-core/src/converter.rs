//! Path segment converters
//!
//! A converter decides whether a single path segment belongs to a route
//! node and which parameters it carries. The same converter drives reverse
//! lookup, rendering supplied parameters back into segment text.
//!
//! # Built-in Converters
//!
//! | Tag    | Accepts                                 | Captured value         |
//! |--------|-----------------------------------------|------------------------|
//! | (none) | the exact literal text                  | nothing                |
//! | `int`  | ASCII digits, no sign, no decimals      | `ParamValue::Int`      |
//! | `str`  | one or more alphabetic characters       | `ParamValue::Str`      |
//! | `slug` | one or more of `[-a-zA-Z0-9_]`          | `ParamValue::Str`      |
//! | `uuid` | hyphenated UUID text, any case          | lowercase hyphenated   |
//! | `path` | anything, including the empty string    | `/`-joined segments    |
//! | `re`   | the pattern, anchored at position 0     | named groups           |
//!
//! `re` patterns use the `regex` crate syntax, which has no look-around and
//! no backreferences. Such patterns fail at build time with
//! [`RouterError::InvalidConverter`].
//!
//! # Custom Converters
//!
//! ```
//! use waymark_core::{Converter, Params, SegmentSpec};
//!
//! #[derive(Debug)]
//! struct MagicConverter(SegmentSpec);
//!
//! impl Converter for MagicConverter {
//!     fn spec(&self) -> &SegmentSpec {
//!         &self.0
//!     }
//!
//!     fn accepts(&self, segment: &str) -> Option<Params> {
//!         (segment == "magic").then(|| Params::single(self.0.identifier().unwrap_or("magic"), segment))
//!     }
//! }
//! ```

use crate::error::{Result, RouterError};
use crate::params::{ParamValue, Params};
use regex::Regex;
use std::fmt;

// ============================================================================
// Segment Description
// ============================================================================

/// The textual description a converter was built from.
///
/// For `<int:id>` the tag is `int`, the description is `<int:id>` and the
/// identifier is `id`. Literal segments have no tag and no identifier. For
/// regex segments the identifier is the pattern source itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpec {
    tag: Option<String>,
    description: String,
    identifier: Option<String>,
}

impl SegmentSpec {
    /// Describe a literal segment.
    pub fn literal(description: impl Into<String>) -> Self {
        Self {
            tag: None,
            description: description.into(),
            identifier: None,
        }
    }

    /// Describe a placeholder segment.
    pub fn placeholder(
        tag: impl Into<String>,
        description: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            tag: Some(tag.into()),
            description: description.into(),
            identifier: Some(identifier.into()),
        }
    }

    /// Registry tag, `None` for literal segments.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Raw segment text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Capture name (or regex source), `None` for literal segments.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Identifier of a placeholder, rejecting an empty payload.
    fn required_identifier(&self) -> Result<&str> {
        match self.identifier() {
            Some(identifier) if !identifier.is_empty() => Ok(identifier),
            _ => Err(RouterError::invalid_converter(
                &self.description,
                "placeholder requires an identifier",
            )),
        }
    }
}

// ============================================================================
// Converter Trait
// ============================================================================

/// Capability shared by every segment converter.
///
/// `accepts` is total: an ordinary mismatch returns `None`, never an error.
pub trait Converter: Send + Sync {
    /// Description this converter was built from.
    fn spec(&self) -> &SegmentSpec;

    /// Test a segment, returning the captured parameters on acceptance.
    fn accepts(&self, segment: &str) -> Option<Params>;

    /// Raw segment text.
    fn description(&self) -> &str {
        self.spec().description()
    }

    /// Capture name, `None` for literal segments.
    fn identifier(&self) -> Option<&str> {
        self.spec().identifier()
    }

    /// Whether one captured value may span several raw segments.
    ///
    /// Nodes built from such converters loop back onto themselves, and
    /// repeated captures are joined with `/` instead of overwritten.
    fn spans_segments(&self) -> bool {
        false
    }

    /// Render this segment from supplied parameters, consuming what it uses.
    ///
    /// Returns `None` when the parameters cannot produce a valid segment.
    fn render(&self, params: &mut Params) -> Option<String> {
        let Some(identifier) = self.identifier() else {
            return Some(self.description().to_string());
        };

        let supplied = params.get(identifier)?.to_string();
        let accepted = self.accepts(&supplied)?;
        let rendered = accepted
            .get(identifier)
            .map(ToString::to_string)
            .unwrap_or(supplied);
        params.remove(identifier);
        Some(rendered)
    }
}

impl fmt::Debug for dyn Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} converter: description={}; identifier={}>",
            self.spec().tag().unwrap_or("exact"),
            self.description(),
            self.identifier().unwrap_or("None")
        )
    }
}

// ============================================================================
// Built-in Converters
// ============================================================================

/// Matches its own description exactly.
#[derive(Debug, Clone)]
pub struct ExactConverter {
    spec: SegmentSpec,
}

impl ExactConverter {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            spec: SegmentSpec::literal(description),
        }
    }

    /// The empty-description converter of the tree root.
    pub fn root() -> Self {
        Self::new("")
    }
}

impl Converter for ExactConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        (segment == self.spec.description()).then(Params::new)
    }
}

/// Matches non-negative integers.
///
/// Signs and decimals are rejected, as are values that overflow `i64`.
#[derive(Debug, Clone)]
pub struct IntConverter {
    spec: SegmentSpec,
    identifier: String,
}

impl IntConverter {
    pub fn new(spec: SegmentSpec) -> Result<Self> {
        let identifier = spec.required_identifier()?.to_string();
        Ok(Self { spec, identifier })
    }
}

impl Converter for IntConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let value = segment.parse::<i64>().ok()?;
        Some(Params::single(&self.identifier, value))
    }
}

/// Matches alphabetic-only text.
#[derive(Debug, Clone)]
pub struct StrConverter {
    spec: SegmentSpec,
    identifier: String,
}

impl StrConverter {
    pub fn new(spec: SegmentSpec) -> Result<Self> {
        let identifier = spec.required_identifier()?.to_string();
        Ok(Self { spec, identifier })
    }
}

impl Converter for StrConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        if segment.is_empty() || !segment.chars().all(char::is_alphabetic) {
            return None;
        }
        Some(Params::single(&self.identifier, segment))
    }
}

/// Matches one or more of `[-a-zA-Z0-9_]`.
#[derive(Debug, Clone)]
pub struct SlugConverter {
    spec: SegmentSpec,
    identifier: String,
}

impl SlugConverter {
    pub fn new(spec: SegmentSpec) -> Result<Self> {
        let identifier = spec.required_identifier()?.to_string();
        Ok(Self { spec, identifier })
    }
}

impl Converter for SlugConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        let is_slug = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
        if segment.is_empty() || !segment.chars().all(is_slug) {
            return None;
        }
        Some(Params::single(&self.identifier, segment))
    }
}

/// Matches hyphenated UUID text and captures its canonical lowercase form.
#[derive(Debug, Clone)]
pub struct UuidConverter {
    spec: SegmentSpec,
    identifier: String,
}

/// Length of the 8-4-4-4-12 hyphenated form.
const HYPHENATED_UUID_LEN: usize = 36;

impl UuidConverter {
    pub fn new(spec: SegmentSpec) -> Result<Self> {
        let identifier = spec.required_identifier()?.to_string();
        Ok(Self { spec, identifier })
    }
}

impl Converter for UuidConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        // The parser also takes simple, braced and URN forms; only the
        // hyphenated one is a valid path segment here.
        if segment.len() != HYPHENATED_UUID_LEN {
            return None;
        }
        let uuid = uuid::Uuid::try_parse(segment).ok()?;
        Some(Params::single(
            &self.identifier,
            uuid.hyphenated().to_string(),
        ))
    }
}

/// Matches anything, including the empty string.
///
/// A node built from this converter consumes any number of consecutive
/// segments into a single `/`-joined value.
#[derive(Debug, Clone)]
pub struct PathConverter {
    spec: SegmentSpec,
    identifier: String,
}

impl PathConverter {
    pub fn new(spec: SegmentSpec) -> Result<Self> {
        let identifier = spec.required_identifier()?.to_string();
        Ok(Self { spec, identifier })
    }
}

impl Converter for PathConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        Some(Params::single(&self.identifier, segment))
    }

    fn spans_segments(&self) -> bool {
        true
    }
}

/// Matches a regular expression anchored at the start of the segment.
///
/// The pattern is not implicitly anchored at the end; use `$` for a full
/// match. Named groups become parameters, so a pattern without named
/// groups acts as a pure filter.
#[derive(Debug, Clone)]
pub struct RegexConverter {
    spec: SegmentSpec,
    regex: Regex,
}

impl RegexConverter {
    pub fn new(spec: SegmentSpec) -> Result<Self> {
        let pattern = spec.required_identifier()?;
        let regex = Regex::new(&format!(r"\A(?:{})", pattern))
            .map_err(|err| RouterError::invalid_converter(spec.description(), err.to_string()))?;
        Ok(Self { spec, regex })
    }

    /// Names of the capture groups in declaration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.regex.capture_names().flatten()
    }
}

impl Converter for RegexConverter {
    fn spec(&self) -> &SegmentSpec {
        &self.spec
    }

    fn accepts(&self, segment: &str) -> Option<Params> {
        let captures = self.regex.captures(segment)?;
        Some(
            self.group_names()
                .filter_map(|name| {
                    captures
                        .name(name)
                        .map(|group| (name, ParamValue::from(group.as_str())))
                })
                .collect(),
        )
    }

    /// Consume the first supplied value the pattern accepts under its own name.
    ///
    /// When no supplied value fits, the segment renders as its own
    /// bracketed description.
    fn render(&self, params: &mut Params) -> Option<String> {
        let found = params.iter().find_map(|(name, value)| {
            let accepted = self.accepts(&value.to_string())?;
            let captured = accepted.get(name)?;
            Some((name.to_string(), captured.to_string()))
        });

        match found {
            Some((name, rendered)) => {
                params.remove(&name);
                Some(rendered)
            }
            None => Some(self.description().to_string()),
        }
    }
}
