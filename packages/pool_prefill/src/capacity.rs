use std::fmt::Debug;

/// Supplies the byte budgets of the two containers that a prefill plan fills: a pool that
/// recycles blocks and a cache that holds them.
///
/// The planner queries each budget once per planning pass. Implementations typically report the
/// maximum size of the real containers.
#[cfg_attr(test, mockall::automock)]
pub trait CapacitySource: Debug {
    /// The number of bytes the recycling pool can hold.
    fn pool_budget_bytes(&self) -> u64;

    /// The number of bytes the cache can hold.
    fn cache_budget_bytes(&self) -> u64;
}

/// A [`CapacitySource`] with budgets that are known up front.
///
/// # Examples
///
/// ```
/// use pool_prefill::{CapacitySource, FixedCapacity};
///
/// let capacity = FixedCapacity::new(4 * 1024 * 1024, 8 * 1024 * 1024);
///
/// assert_eq!(capacity.pool_budget_bytes(), 4 * 1024 * 1024);
/// assert_eq!(capacity.cache_budget_bytes(), 8 * 1024 * 1024);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FixedCapacity {
    pool_bytes: u64,
    cache_bytes: u64,
}

impl FixedCapacity {
    /// Creates a capacity source reporting the given pool and cache budgets.
    #[must_use]
    pub const fn new(pool_bytes: u64, cache_bytes: u64) -> Self {
        Self {
            pool_bytes,
            cache_bytes,
        }
    }
}

impl CapacitySource for FixedCapacity {
    fn pool_budget_bytes(&self) -> u64 {
        self.pool_bytes
    }

    fn cache_budget_bytes(&self) -> u64 {
        self.cache_bytes
    }
}

impl<C: CapacitySource + ?Sized> CapacitySource for &C {
    fn pool_budget_bytes(&self) -> u64 {
        (**self).pool_budget_bytes()
    }

    fn cache_budget_bytes(&self) -> u64 {
        (**self).cache_budget_bytes()
    }
}
