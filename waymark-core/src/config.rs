//! Router configuration
//!
//! All fields have defaults, so partial configuration documents and empty
//! environments both yield a working router.
//!
//! # Environment Variables
//!
//! | Variable                 | Field            | Values                   |
//! |--------------------------|------------------|--------------------------|
//! | `WAYMARK_APPEND_SLASH`   | `append_slash`   | `1`/`true`, `0`/`false`  |
//! | `WAYMARK_ROOT_POLICY`    | `root_policy`    | `synthesize`, `strict`   |
//! | `WAYMARK_CACHE_CAPACITY` | `cache_capacity` | entries per node, `0` off|

use crate::match_cache::DEFAULT_CACHE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::env;

/// How the router treats a first route that is not the root path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootPolicy {
    /// Insert an empty root and hang every route below it.
    #[default]
    Synthesize,
    /// Refuse to build the router.
    Strict,
}

impl RootPolicy {
    /// Parse from a case-insensitive name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "synthesize" => Some(RootPolicy::Synthesize),
            "strict" => Some(RootPolicy::Strict),
            _ => None,
        }
    }
}

/// Settings fixed when a router is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Canonical paths end with `/`.
    pub append_slash: bool,
    pub root_policy: RootPolicy,
    /// Memoized segments per node, 0 disables memoization.
    pub cache_capacity: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            append_slash: true,
            root_policy: RootPolicy::Synthesize,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl RouterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let append_slash = env::var("WAYMARK_APPEND_SLASH")
            .ok()
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.append_slash);

        let root_policy = env::var("WAYMARK_ROOT_POLICY")
            .ok()
            .and_then(|v| RootPolicy::parse(&v))
            .unwrap_or(defaults.root_policy);

        let cache_capacity = env::var("WAYMARK_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.cache_capacity);

        Self {
            append_slash,
            root_policy,
            cache_capacity,
        }
    }

    pub fn append_slash(mut self, append_slash: bool) -> Self {
        self.append_slash = append_slash;
        self
    }

    pub fn root_policy(mut self, root_policy: RootPolicy) -> Self {
        self.root_policy = root_policy;
        self
    }

    pub fn cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
