//! Structural profiling of JSON records
//!
//! Counts how often each field path appears, which value types it takes,
//! and recursively profiles structured values.

pub mod accumulator;
pub mod classify;
pub mod finalize;
pub mod policy;
pub mod profiler;

pub use accumulator::{FieldAccumulator, ScopeAccumulator};
pub use classify::{classify, TypeTag};
pub use finalize::{finalize, format_percent};
pub use policy::{MergePolicy, PolicyTable, PICTURE_FIELD, REPOST_FIELD};
pub use profiler::{profile_object, StructureProfiler};
