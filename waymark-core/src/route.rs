//! Route declaration
//!
//! A route turns one `/`-delimited path into a chain of [`RouteNode`]s, one
//! node per segment. The tail of the chain receives the handler and name,
//! and declared subroutes are attached below it.
//!
//! # Examples
//!
//! ```
//! use waymark_core::route;
//!
//! let users = route("users/")
//!     .subroute(route("<int:id>").handler("user_details").name("user-details").build()?)
//!     .build()?;
//!
//! assert_eq!(users.description(), "users");
//! assert_eq!(users.children()[0].name(), Some("user-details"));
//! # Ok::<(), waymark_core::RouterError>(())
//! ```

use crate::converter::ExactConverter;
use crate::error::Result;
use crate::node::RouteNode;
use crate::registry::{self, ConverterRegistry};
use tracing::trace;

/// Separator between path segments.
pub const PATH_DELIMITER: char = '/';

/// Split a path into its segments.
///
/// One leading and one trailing `/` are ignored, so `""`, `"/"` and `"//"`
/// yield no segments at all. Inner runs of `/` produce empty segments.
pub fn split_segments(path: &str) -> Vec<&str> {
    let path = path.strip_prefix(PATH_DELIMITER).unwrap_or(path);
    let path = path.strip_suffix(PATH_DELIMITER).unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }
    path.split(PATH_DELIMITER).collect()
}

/// Start declaring a route for `path`.
pub fn route<H>(path: impl Into<String>) -> Route<H> {
    Route::new(path)
}

/// Builder for one route chain.
pub struct Route<H> {
    path: String,
    handler: Option<H>,
    name: Option<String>,
    subroutes: Vec<RouteNode<H>>,
}

impl<H> Route<H> {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            handler: None,
            name: None,
            subroutes: Vec::new(),
        }
    }

    /// Handler returned when a match ends on this route.
    pub fn handler(mut self, handler: H) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Name used for reverse lookup.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach one built route below this one.
    pub fn subroute(mut self, subroute: RouteNode<H>) -> Self {
        self.subroutes.push(subroute);
        self
    }

    /// Attach several built routes below this one, in order.
    pub fn subroutes<I>(mut self, subroutes: I) -> Self
    where
        I: IntoIterator<Item = RouteNode<H>>,
    {
        self.subroutes.extend(subroutes);
        self
    }

    /// The declared path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Build against the process-wide converter registry.
    pub fn build(self) -> Result<RouteNode<H>> {
        let registry = registry::global().read();
        self.build_with(&registry)
    }

    /// Build against an explicit converter registry.
    ///
    /// Every segment is resolved before any node is created, so an unknown
    /// converter tag fails the whole route.
    pub fn build_with(self, registry: &ConverterRegistry) -> Result<RouteNode<H>> {
        let segments = split_segments(&self.path);

        let mut converters = Vec::with_capacity(segments.len().max(1));
        for segment in &segments {
            converters.push(registry.converter_for(segment)?);
        }
        if converters.is_empty() {
            converters.push(Box::new(ExactConverter::root()));
        }

        let mut nodes: Vec<RouteNode<H>> = converters.into_iter().map(RouteNode::new).collect();

        let mut tail = nodes.pop().unwrap_or_else(RouteNode::root);
        tail.set_endpoint(self.handler, self.name);
        tail.attach(self.subroutes)?;

        let chain = nodes.into_iter().rev().fold(tail, |child, mut parent| {
            parent.push_child(child);
            parent
        });

        trace!(path = %self.path, segments = segments.len(), "Built route");
        Ok(chain)
    }
}
