//! Result of forward matching

use crate::node::RouteNode;
use crate::params::Params;
use std::fmt;

/// Outcome of [`Router::match_path`](crate::Router::match_path).
pub enum Match<'r, H> {
    /// No route accepts the path.
    NoMatch,
    /// A route accepts the path and has a handler.
    Full(FullMatch<'r, H>),
}

impl<'r, H> Match<'r, H> {
    /// Check if a route matched.
    #[inline]
    pub fn is_match(&self) -> bool {
        matches!(self, Match::Full(_))
    }

    /// Borrow the full match, if any.
    pub fn as_full(&self) -> Option<&FullMatch<'r, H>> {
        match self {
            Match::Full(full) => Some(full),
            Match::NoMatch => None,
        }
    }

    /// Take the full match, if any.
    pub fn into_full(self) -> Option<FullMatch<'r, H>> {
        match self {
            Match::Full(full) => Some(full),
            Match::NoMatch => None,
        }
    }

    /// Matched handler, if any.
    pub fn handler(&self) -> Option<&'r H> {
        self.as_full().map(FullMatch::handler)
    }

    /// Name of the matched route, if it matched and has one.
    pub fn handler_name(&self) -> Option<&'r str> {
        self.as_full().and_then(FullMatch::handler_name)
    }
}

/// A successful match.
pub struct FullMatch<'r, H> {
    node: &'r RouteNode<H>,
    handler: &'r H,
    params: Params,
    should_redirect: bool,
    redirect_to: Option<String>,
}

impl<'r, H> FullMatch<'r, H> {
    pub(crate) fn new(
        node: &'r RouteNode<H>,
        handler: &'r H,
        params: Params,
        redirect_to: Option<String>,
    ) -> Self {
        Self {
            node,
            handler,
            params,
            should_redirect: redirect_to.is_some(),
            redirect_to,
        }
    }

    /// The node the match ended on.
    pub fn node(&self) -> &'r RouteNode<H> {
        self.node
    }

    pub fn handler(&self) -> &'r H {
        self.handler
    }

    pub fn handler_name(&self) -> Option<&'r str> {
        self.node.name()
    }

    /// Parameters captured along the way.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_params(self) -> Params {
        self.params
    }

    /// Whether the path is not in its canonical trailing-slash form.
    pub fn should_redirect(&self) -> bool {
        self.should_redirect
    }

    /// Canonical form of the path, set whenever a redirect is due.
    pub fn redirect_to(&self) -> Option<&str> {
        self.redirect_to.as_deref()
    }
}

impl<H> PartialEq for FullMatch<'_, H> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node)
            && self.params == other.params
            && self.should_redirect == other.should_redirect
            && self.redirect_to == other.redirect_to
    }
}

impl<H> PartialEq for Match<'_, H> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Match::NoMatch, Match::NoMatch) => true,
            (Match::Full(a), Match::Full(b)) => a == b,
            _ => false,
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for FullMatch<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<FullMatch: handler=")?;
        match self.handler_name() {
            Some(name) => f.write_str(name)?,
            None => write!(f, "{:?}", self.handler)?,
        }
        write!(
            f,
            ", kwargs={}, should_redirect={}>",
            self.params, self.should_redirect
        )
    }
}

impl<H: fmt::Debug> fmt::Debug for Match<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Match::NoMatch => f.write_str("<NoMatch>"),
            Match::Full(full) => full.fmt(f),
        }
    }
}
