//! High-level operations.
//!
//! The amalgamation pipeline stages, in the order they run:
//! [`resolve`], [`hoist`], [`license`], [`format`], tied together by
//! [`amalgamate`]. The remaining modules implement the other commands.

pub mod amalgamate;
pub mod bench;
pub mod fetch;
pub mod format;
pub mod hoist;
pub mod license;
pub mod report;
pub mod resolve;
pub mod tree;

pub use amalgamate::{amalgamate, amalgamate_repository, AmalgamateOptions, AmalgamateResult};
pub use bench::{run_benchmarks, BenchOptions, BenchReport, VariantTiming};
pub use fetch::{fetch_files, FetchOptions, FetchSummary};
pub use format::{normalize, write_output};
pub use hoist::{hoist, hoist_includes, Hoisted};
pub use license::{comment_block, inject_license};
pub use report::render_report;
pub use resolve::{resolve, Resolution, Resolver};
pub use tree::{include_tree, render_tree, IncludeNode};
