// Core library for the waymark URL router
// Route tree construction, typed segment converters, forward matching and reverse lookup

pub mod config;
pub mod converter;
pub mod error;
pub mod logging;
pub mod match_cache;
pub mod match_result;
pub mod node;
pub mod params;
pub mod registry;
pub mod route;
pub mod router;

// Re-export commonly used types
pub use config::{RootPolicy, RouterConfig};
pub use converter::{
    Converter, ExactConverter, IntConverter, PathConverter, RegexConverter, SegmentSpec,
    SlugConverter, StrConverter, UuidConverter,
};
pub use error::{Result, RouterError};
pub use match_cache::{CacheStatsSnapshot, MatchCache};
pub use match_result::{FullMatch, Match};
pub use node::RouteNode;
pub use params::{ParamValue, Params};
pub use registry::{ConverterFactory, ConverterRegistry, register_converter, unregister_converter};
pub use route::{Route, route, split_segments};
pub use router::Router;
