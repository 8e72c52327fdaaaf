#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Plans the preallocation of fixed-size memory blocks so that a bounded recycling pool and a
//! bounded cache can be warmed up before first use, avoiding allocation stalls on a cold start.
//!
//! The caller describes which block shapes it expects to need, each with a relative weight. The
//! planner divides the byte budget of the pool and, independently, the byte budget of the cache
//! between those shapes in proportion to their weights, rounding down so that no budget is ever
//! exceeded. The resulting per-shape counts are emitted as an [`AllocationQueue`] that
//! interleaves the shapes round robin, so that a consumer which stops draining the queue early
//! has still made fair progress on every shape.
//!
//! This crate only produces the plan. Performing the allocations, and owning the pool and the
//! cache, is up to the caller.
//!
//! # Example
//!
//! ```
//! use pool_prefill::{FixedCapacity, PixelFormat, PrefillPlanner, ShapeBuilder};
//!
//! let planner = PrefillPlanner::new(FixedCapacity::new(4 * 1024 * 1024, 2 * 1024 * 1024));
//!
//! let queue = planner
//!     .prefill([
//!         ShapeBuilder::new(256, 256).weight(2),
//!         ShapeBuilder::square(64).format(PixelFormat::Alpha8),
//!     ])
//!     .unwrap();
//!
//! let planned_bytes: u64 = queue.map(|shape| shape.byte_size()).sum();
//! assert!(planned_bytes <= 6 * 1024 * 1024);
//! ```
//!
//! Lower level building blocks are also available: [`compute_counts()`] divides a single budget,
//! [`AllocationPlan`] accumulates counts per shape and [`AllocationQueue`] interleaves them.

mod capacity;
mod distribution;
mod error;
mod pixel_format;
mod plan;
mod planner;
mod queue;
mod shape;

pub use capacity::*;
pub use distribution::*;
pub use error::Error;
pub(crate) use error::Result;
pub use pixel_format::*;
pub use plan::*;
pub use planner::*;
pub use queue::*;
pub use shape::*;
