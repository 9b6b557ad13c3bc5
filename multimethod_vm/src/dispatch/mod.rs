//! Multiple dispatch
//!
//! - `method`: methods and their bodies
//! - `cache`: memoized pairwise comparisons
//! - `graph`: specificity-sorted candidates and selection
//! - `multimethod`: the method list, graph slot and call entry points

pub mod cache;
pub mod graph;
pub mod method;
pub mod multimethod;

pub use cache::ComparisonCache;
pub use graph::MethodGraph;
pub use method::{Method, MethodBody, MethodId, NativeArgs, NativeFn};
pub use multimethod::Multimethod;
