// Waymark - a URL path router with typed converters and reverse lookup
//
// Routes are declared as `/`-delimited patterns mixing literal segments,
// typed placeholders (`<int:id>`) and regex captures. The router resolves a
// path to its handler and parameters, and rebuilds a path from a route name.

// Re-export core functionality
pub use waymark_core::*;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Converter,
        ConverterRegistry,
        FullMatch,
        Match,
        ParamValue,
        Params,
        RootPolicy,
        RouteNode,
        Router,
        RouterConfig,
        RouterError,
        SegmentSpec,
        register_converter,
        route,
    };
}
