use tracing::{debug, trace};

use crate::{AllocationPlan, ShapeDescriptor};

/// Divides a byte budget between shapes in proportion to their weights and returns how many
/// blocks of each shape fit in its share.
///
/// Each shape receives `budget_bytes * weight / total_weight` bytes, truncated, and the count is
/// that share divided by the byte size of the shape, again truncated. Rounding always goes down,
/// so the planned bytes never exceed `budget_bytes`. A shape whose share is smaller than one of
/// its blocks gets a count of zero; the bytes it leaves unused are not redistributed to other
/// shapes.
///
/// Every request appears in the returned plan, in request order, even if its count is zero.
/// Equal requests each receive their own share, accumulated into one entry.
///
/// # Examples
///
/// ```
/// use pool_prefill::{ShapeDescriptor, compute_counts};
///
/// let shape = ShapeDescriptor::new(20_000, 1).unwrap();
///
/// let plan = compute_counts(&[shape], 200_000);
/// assert_eq!(plan.count_of(&shape), 10);
/// ```
#[must_use]
pub fn compute_counts(requests: &[ShapeDescriptor], budget_bytes: u64) -> AllocationPlan {
    // A sum of u32 weights cannot overflow a u128.
    let total_weight: u128 = requests
        .iter()
        .map(|request| u128::from(request.weight()))
        .sum();

    let mut plan = AllocationPlan::new();

    for request in requests {
        let count = if budget_bytes == 0 || total_weight == 0 {
            0
        } else {
            count_within_share(request, budget_bytes, total_weight)
        };

        trace!(
            byte_size = request.byte_size(),
            weight = request.weight(),
            count,
            "planned shape"
        );

        plan.add(*request, count);
    }

    debug!(
        budget_bytes,
        shapes = requests.len(),
        planned_blocks = plan.total_count(),
        planned_bytes = plan.total_bytes(),
        "computed counts for budget"
    );

    plan
}

/// Runs [`compute_counts()`] once per budget and merges the results per shape.
///
/// This models several independently sized containers that are all filled by the same
/// proportional rule, each up to its own capacity. Without any budgets the plan is empty.
///
/// # Examples
///
/// ```
/// use pool_prefill::{ShapeDescriptor, compute_counts_for_budgets};
///
/// let shape = ShapeDescriptor::new(20_000, 1).unwrap();
///
/// let plan = compute_counts_for_budgets(&[shape], [200_000, 200_000]);
/// assert_eq!(plan.count_of(&shape), 20);
/// ```
#[must_use]
pub fn compute_counts_for_budgets(
    requests: &[ShapeDescriptor],
    budgets: impl IntoIterator<Item = u64>,
) -> AllocationPlan {
    let mut plan = AllocationPlan::new();

    for budget_bytes in budgets {
        plan.merge(compute_counts(requests, budget_bytes));
    }

    plan
}

// The share is truncated before it is divided by the block size.
#[expect(clippy::integer_division, reason = "shares and counts are truncated")]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "u128 product of a u64 and a u32 cannot overflow; divisors are non-zero"
)]
fn count_within_share(request: &ShapeDescriptor, budget_bytes: u64, total_weight: u128) -> u64 {
    let share = u128::from(budget_bytes) * u128::from(request.weight()) / total_weight;

    let share = u64::try_from(share).expect("a weighted share never exceeds the whole budget");

    share / request.byte_size()
}
