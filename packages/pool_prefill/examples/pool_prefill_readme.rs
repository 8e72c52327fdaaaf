//! Plans a prefill for a handful of bitmap shapes and drains the allocation order,
//! the way a background worker warming up a pool and a cache would.
//!
//! Run with: `cargo run --example pool_prefill_readme`.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use pool_prefill::{DecodePreference, FixedCapacity, PixelFormat, PrefillPlanner, ShapeBuilder};

fn main() {
    println!("=== pool_prefill README Example ===");

    let planner = PrefillPlanner::builder(FixedCapacity::new(2 * 1024 * 1024, 1024 * 1024))
        .decode_preference(DecodePreference::PreferArgb8888)
        .build();

    let mut queue = planner
        .prefill([
            ShapeBuilder::new(320, 240).weight(2),
            ShapeBuilder::square(128),
            ShapeBuilder::new(64, 64).format(PixelFormat::Rgb565),
        ])
        .unwrap();

    println!("Planned {} blocks", queue.len());

    let mut allocated_bytes = 0_u64;

    // Stop after the first few rounds; progress is already spread over every shape.
    for _ in 0..9 {
        let Ok(shape) = queue.remove() else {
            break;
        };

        allocated_bytes += shape.byte_size();
        println!("Allocating {shape:?}");
    }

    println!(
        "Allocated {allocated_bytes} bytes, {} blocks left for later",
        queue.len()
    );

    println!("README example completed successfully!");
}
