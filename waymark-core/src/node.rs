//! Route tree nodes
//!
//! A node pairs one converter with an optional handler and name, and owns
//! its children in declaration order. Nodes whose converter spans segments
//! are flagged `recursive`: they act as their own last child, which lets a
//! single node consume any number of consecutive segments while the tree
//! itself stays acyclic.

use crate::converter::{Converter, ExactConverter};
use crate::error::{Result, RouterError};
use crate::match_cache::{CacheStatsSnapshot, CachedStep, MatchCache, StepTarget};
use crate::params::Params;
use std::collections::HashSet;
use std::fmt;

/// One segment of the route tree.
pub struct RouteNode<H> {
    converter: Box<dyn Converter>,
    handler: Option<H>,
    name: Option<String>,
    children: Vec<RouteNode<H>>,
    recursive: bool,
    cache: MatchCache,
}

impl<H> RouteNode<H> {
    /// Create a childless node around a converter.
    pub fn new(converter: Box<dyn Converter>) -> Self {
        let recursive = converter.spans_segments();
        Self {
            converter,
            handler: None,
            name: None,
            children: Vec::new(),
            recursive,
            cache: MatchCache::new(),
        }
    }

    /// Create an empty root node.
    pub fn root() -> Self {
        Self::new(Box::new(ExactConverter::root()))
    }

    pub(crate) fn set_endpoint(&mut self, handler: Option<H>, name: Option<String>) {
        self.handler = handler;
        self.name = name;
    }

    pub(crate) fn push_child(&mut self, child: RouteNode<H>) {
        self.children.push(child);
    }

    /// The converter of this node.
    pub fn converter(&self) -> &dyn Converter {
        self.converter.as_ref()
    }

    /// Raw segment text of this node.
    pub fn description(&self) -> &str {
        self.converter.description()
    }

    /// Handler, set only on nodes that terminate a route.
    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    /// Name used for reverse lookup.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Children in declaration order (the implicit self-loop excluded).
    pub fn children(&self) -> &[RouteNode<H>] {
        &self.children
    }

    /// Whether this node loops back onto itself.
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Whether a match may end on this node.
    pub fn can_match(&self) -> bool {
        self.handler.is_some()
    }

    /// Whether this node stands for the path root.
    pub fn is_root(&self) -> bool {
        self.converter.identifier().is_none() && self.description().is_empty()
    }

    /// Whether this node's segment is literal text.
    pub fn is_literal(&self) -> bool {
        self.converter.identifier().is_none()
    }

    /// Attach a batch of sibling nodes under this one.
    ///
    /// Fails if a literal sibling repeats the description of a literal
    /// child already attached (or attached earlier in the same batch).
    /// Placeholders never collide.
    pub fn attach<I>(&mut self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = RouteNode<H>>,
    {
        let mut described: HashSet<String> = self
            .children
            .iter()
            .filter(|child| child.is_literal())
            .map(|child| child.description().to_string())
            .collect();

        for node in nodes {
            if node.is_literal() && !described.insert(node.description().to_string()) {
                return Err(RouterError::configuration(format!(
                    "A node matching '{}' already exists at this level of the tree.",
                    node.description()
                )));
            }
            self.children.push(node);
        }

        Ok(())
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Pick the node that consumes `segment` after this one.
    ///
    /// Children are tried in declaration order and the first acceptor wins;
    /// a recursive node tries itself last.
    pub fn step(&self, segment: &str) -> Option<(&RouteNode<H>, Params)> {
        let step = match self.cache.get(segment) {
            Some(cached) => cached,
            None => {
                let computed = self.compute_step(segment);
                self.cache.insert(segment, computed.clone());
                computed
            }
        }?;

        let node = match step.target {
            StepTarget::Child(index) => self.children.get(index)?,
            StepTarget::Itself => self,
        };
        Some((node, step.params))
    }

    fn compute_step(&self, segment: &str) -> Option<CachedStep> {
        let from_children = self
            .children
            .iter()
            .enumerate()
            .find_map(|(index, child)| {
                child.converter.accepts(segment).map(|params| CachedStep {
                    target: StepTarget::Child(index),
                    params,
                })
            });

        from_children.or_else(|| {
            if !self.recursive {
                return None;
            }
            self.converter.accepts(segment).map(|params| CachedStep {
                target: StepTarget::Itself,
                params,
            })
        })
    }

    // ========================================================================
    // Reverse Lookup
    // ========================================================================

    /// Build the path below (and including) this node for a named route.
    ///
    /// Each node renders its own segment from `params`, consuming what it
    /// uses; the lookup succeeds on the first named node reached with no
    /// parameters left over.
    pub fn find(&self, name: &str, mut params: Params) -> Option<String> {
        let mut matched = self.converter.render(&mut params)?;
        matched.push('/');

        if self.name.as_deref() == Some(name) && params.is_empty() {
            return Some(matched);
        }

        self.children.iter().find_map(|child| {
            child
                .find(name, params.clone())
                .map(|found| format!("{}{}", matched, found))
        })
    }

    // ========================================================================
    // Tree Utilities
    // ========================================================================

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RouteNode::node_count).sum::<usize>()
    }

    pub(crate) fn collect_names(&self, names: &mut HashSet<String>) {
        if let Some(name) = &self.name {
            names.insert(name.clone());
        }
        for child in &self.children {
            child.collect_names(names);
        }
    }

    pub(crate) fn set_cache_capacity(&mut self, capacity: usize) {
        self.cache = MatchCache::with_capacity(capacity);
        for child in &mut self.children {
            child.set_cache_capacity(capacity);
        }
    }

    pub(crate) fn cache_stats(&self) -> CacheStatsSnapshot {
        self.children
            .iter()
            .map(RouteNode::cache_stats)
            .fold(self.cache.stats().snapshot(), |total, stats| total + stats)
    }

    pub(crate) fn clear_cache(&self) {
        self.cache.clear();
        for child in &self.children {
            child.clear_cache();
        }
    }

    /// Write the indented tree dump, four spaces per level.
    pub fn write_tree(&self, f: &mut impl fmt::Write, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", self, indent = depth * 4)?;
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }

    /// Indented tree dump as a string.
    pub fn display(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_tree(&mut out, 0);
        out
    }
}

impl<H> fmt::Display for RouteNode<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.description())
    }
}

impl<H> fmt::Debug for RouteNode<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<RouteNode: converter={:?}; name={}; handler={}; children={}>",
            self.converter,
            self.name.as_deref().unwrap_or("None"),
            if self.handler.is_some() { "Some" } else { "None" },
            self.children.len()
        )
    }
}
