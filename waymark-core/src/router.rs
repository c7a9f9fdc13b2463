//! The router
//!
//! Assembles route chains into a single tree and answers two queries:
//!
//! - [`Router::match_path`] resolves a path to a handler and parameters
//! - [`Router::find`] rebuilds a path from a route name and parameters
//!
//! Construction is the only phase that can fail. Once built, a router is
//! read-only (apart from its internal memoization) and can be shared
//! across threads.
//!
//! # Examples
//!
//! ```
//! use waymark_core::{route, Params, Router};
//!
//! let router = Router::new(vec![
//!     route("").build()?,
//!     route("users/")
//!         .subroute(route("<int:id>").handler("user_details").name("user-details").build()?)
//!         .build()?,
//! ])?;
//!
//! let matched = router.match_path("/users/66");
//! let full = matched.as_full().unwrap();
//! assert_eq!(full.handler(), &"user_details");
//! assert_eq!(full.params(), &Params::single("id", 66));
//! assert_eq!(full.redirect_to(), Some("/users/66/"));
//!
//! assert_eq!(router.find("user-details", [("id", 66)]).as_deref(), Some("/users/66/"));
//! # Ok::<(), waymark_core::RouterError>(())
//! ```

use crate::config::{RootPolicy, RouterConfig};
use crate::error::{Result, RouterError};
use crate::match_cache::CacheStatsSnapshot;
use crate::match_result::{FullMatch, Match};
use crate::node::RouteNode;
use crate::params::Params;
use crate::route::{split_segments, PATH_DELIMITER};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// Route tree plus the policy used to query it.
pub struct Router<H> {
    tree: RouteNode<H>,
    config: RouterConfig,
    names: HashSet<String>,
}

impl<H> Router<H> {
    /// Build a router with the default configuration.
    pub fn new<I>(routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = RouteNode<H>>,
    {
        Self::with_config(routes, RouterConfig::default())
    }

    /// Build a router with an explicit configuration.
    ///
    /// When the first route is the root path it becomes the tree root and
    /// the others hang below it. Otherwise the root policy decides: an
    /// empty root is synthesized above every route, or construction fails.
    pub fn with_config<I>(routes: I, config: RouterConfig) -> Result<Self>
    where
        I: IntoIterator<Item = RouteNode<H>>,
    {
        let mut routes = routes.into_iter();
        let Some(first) = routes.next() else {
            return Err(RouterError::configuration(
                "Trying to initialize router with empty routes.",
            ));
        };

        let mut tree = if first.is_root() {
            let mut root = first;
            root.attach(routes)?;
            root
        } else {
            match config.root_policy {
                RootPolicy::Strict => {
                    return Err(RouterError::configuration("First route must be '' or '/'."));
                }
                RootPolicy::Synthesize => {
                    let mut root = RouteNode::root();
                    root.attach(std::iter::once(first).chain(routes))?;
                    root
                }
            }
        };
        tree.set_cache_capacity(config.cache_capacity);

        let mut names = HashSet::new();
        tree.collect_names(&mut names);

        debug!(
            nodes = tree.node_count(),
            names = names.len(),
            append_slash = config.append_slash,
            "Router assembled"
        );

        Ok(Self {
            tree,
            config,
            names,
        })
    }

    /// Resolve a path to its handler and captured parameters.
    ///
    /// `""` and `"/"` are the home path and match the root directly. Each
    /// segment goes to the first child (in declaration order) whose
    /// converter accepts it; there is no backtracking.
    pub fn match_path(&self, path: &str) -> Match<'_, H> {
        let mut node = &self.tree;
        let mut params = Params::new();

        for segment in split_segments(path) {
            let Some((next, captured)) = node.step(segment) else {
                trace!(path, segment, "No route accepts segment");
                return Match::NoMatch;
            };

            if next.converter().spans_segments() {
                for (name, value) in captured.iter() {
                    params.append_segment(name, value.clone());
                }
            } else {
                for (name, value) in captured.iter() {
                    params.insert(name, value.clone());
                }
            }
            node = next;
        }

        let Some(handler) = node.handler() else {
            trace!(path, "Matched node has no handler");
            return Match::NoMatch;
        };

        let redirect_to = self.redirect_target(path);
        trace!(path, name = ?node.name(), redirect = ?redirect_to, "Matched route");
        Match::Full(FullMatch::new(node, handler, params, redirect_to))
    }

    fn redirect_target(&self, path: &str) -> Option<String> {
        if is_home(path) {
            return None;
        }

        let has_slash = path.ends_with(PATH_DELIMITER);
        if self.config.append_slash && !has_slash {
            Some(format!("{}{}", path, PATH_DELIMITER))
        } else if !self.config.append_slash && has_slash {
            Some(path[..path.len() - 1].to_string())
        } else {
            None
        }
    }

    /// Rebuild the path of a named route from parameters.
    ///
    /// Returns `None` for unknown names, and when the parameters are
    /// missing, rejected by a converter, or not all used.
    pub fn find(&self, name: &str, params: impl Into<Params>) -> Option<String> {
        if !self.names.contains(name) {
            trace!(name, "Unknown route name");
            return None;
        }

        let mut found = self.tree.find(name, params.into())?;
        if !self.config.append_slash {
            found.pop();
        }

        trace!(name, path = %found, "Found route");
        Some(found)
    }

    /// The tree root.
    pub fn tree(&self) -> &RouteNode<H> {
        &self.tree
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn append_slash(&self) -> bool {
        self.config.append_slash
    }

    /// Every route name in the tree.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Check if a route name is registered.
    pub fn has_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Memoization counters summed over every node.
    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.tree.cache_stats()
    }

    /// Forget every memoized segment.
    pub fn clear_cache(&self) {
        self.tree.clear_cache();
    }

    /// Indented dump of the tree, one segment per line.
    pub fn display(&self) -> String {
        self.tree.display()
    }
}

impl<H> fmt::Display for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tree.write_tree(f, 0)
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("nodes", &self.tree.node_count())
            .field("config", &self.config)
            .finish()
    }
}

fn is_home(path: &str) -> bool {
    path.is_empty() || path == "/"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::route;

    fn router(config: RouterConfig) -> Router<&'static str> {
        Router::with_config(
            vec![
                route("").handler("home").name("home").build().unwrap(),
                route("users/")
                    .subroute(route("<int:id>").handler("user").name("user-details").build().unwrap())
                    .build()
                    .unwrap(),
            ],
            config,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_routes() {
        let err = Router::<()>::new(Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Trying to initialize router with empty routes.");
    }

    #[test]
    fn test_root_policy() {
        let strict = RouterConfig::new().root_policy(RootPolicy::Strict);
        let err = Router::with_config(vec![route::<()>("home/").build().unwrap()], strict)
            .unwrap_err();
        assert_eq!(err.to_string(), "First route must be '' or '/'.");

        let router = Router::new(vec![route("home/").handler(()).build().unwrap()]).unwrap();
        assert!(router.tree().is_root());
        assert!(router.match_path("/home/").is_match());
        assert!(!router.match_path("/").is_match());
    }

    #[test]
    fn test_redirect_target() {
        let router = router(RouterConfig::default());
        assert_eq!(router.redirect_target(""), None);
        assert_eq!(router.redirect_target("/"), None);
        assert_eq!(router.redirect_target("/users/1"), Some("/users/1/".to_string()));
        assert_eq!(router.redirect_target("/users/1/"), None);

        let router = self::router(RouterConfig::new().append_slash(false));
        assert_eq!(router.redirect_target("/users/1/"), Some("/users/1".to_string()));
        assert_eq!(router.redirect_target("/users/1"), None);
    }

    #[test]
    fn test_find_strips_every_trailing_slash() {
        let router = router(RouterConfig::new().append_slash(false));
        assert_eq!(router.find("home", Params::new()).as_deref(), Some(""));
        assert_eq!(router.find("user-details", [("id", 3)]).as_deref(), Some("/users/3"));
    }

    #[test]
    fn test_names_and_cache() {
        let router = router(RouterConfig::default());
        let mut names: Vec<_> = router.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["home", "user-details"]);
        assert!(router.has_name("home"));

        router.match_path("/users/1/");
        router.match_path("/users/1/");
        assert!(router.cache_stats().hits > 0);

        router.clear_cache();
        router.match_path("/users/1/");
        assert!(router.cache_stats().misses >= 3);
    }

    #[test]
    fn test_display() {
        let router = router(RouterConfig::default());
        assert_eq!(router.display(), "/\n    users/\n        <int:id>/\n");
        assert_eq!(router.to_string(), router.display());
    }
}
