use tracing::debug;

use crate::{
    AllocationPlan, AllocationQueue, CapacitySource, DecodePreference, PixelFormat,
    ShapeBuilder, ShapeDescriptor, compute_counts,
};

/// Plans how to prefill a recycling pool and a cache with blocks of the requested shapes.
///
/// Each budget reported by the [`CapacitySource`] is divided between the shapes in proportion to
/// their weights, independently of the other budget, and the resulting counts are summed per
/// shape. The combined plan is returned as an [`AllocationQueue`] that interleaves the shapes,
/// ready to be drained by whatever performs the real allocations.
///
/// Planning is a pure computation. The planner keeps no state between calls other than its
/// configuration.
///
/// # Examples
///
/// ```
/// use pool_prefill::{FixedCapacity, PrefillPlanner, ShapeBuilder};
///
/// // Room for ten 100x50 RGB_565 blocks in the pool and ten in the cache.
/// let planner = PrefillPlanner::new(FixedCapacity::new(100_000, 100_000));
///
/// let mut queue = planner
///     .prefill([ShapeBuilder::new(100, 50), ShapeBuilder::new(50, 50)])
///     .unwrap();
///
/// // Each budget is split evenly: 5 of the larger blocks and 10 of the smaller ones.
/// assert_eq!(queue.len(), 30);
///
/// while let Ok(shape) = queue.remove() {
///     // Allocate a block of `shape.byte_size()` bytes and hand it to the pool or cache.
///     assert!(shape.byte_size() > 0);
/// }
/// ```
#[derive(Debug)]
pub struct PrefillPlanner<C> {
    capacity: C,
    default_format: PixelFormat,
}

impl<C: CapacitySource> PrefillPlanner<C> {
    /// Creates a planner with default configuration that fills the budgets reported by
    /// `capacity`.
    ///
    /// For custom configuration, use [`PrefillPlanner::builder()`].
    #[must_use]
    pub fn new(capacity: C) -> Self {
        Self::builder(capacity).build()
    }

    /// Creates a builder for configuring a planner that fills the budgets reported by
    /// `capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pool_prefill::{DecodePreference, FixedCapacity, PixelFormat, PrefillPlanner};
    ///
    /// let planner = PrefillPlanner::builder(FixedCapacity::new(1024, 1024))
    ///     .decode_preference(DecodePreference::PreferArgb8888)
    ///     .build();
    ///
    /// assert_eq!(planner.default_format(), PixelFormat::Argb8888);
    /// ```
    pub fn builder(capacity: C) -> PrefillPlannerBuilder<C> {
        PrefillPlannerBuilder::new(capacity)
    }

    /// The pixel format applied to shape builders that do not set one.
    #[must_use]
    pub fn default_format(&self) -> PixelFormat {
        self.default_format
    }

    /// The capacity source whose budgets this planner fills.
    #[must_use]
    pub fn capacity(&self) -> &C {
        &self.capacity
    }

    /// Computes how many blocks of each shape to preallocate.
    ///
    /// The pool budget and the cache budget are each queried once and planned independently;
    /// the resulting counts are summed per shape. The planned bytes never exceed the sum of
    /// both budgets.
    #[must_use]
    pub fn plan(&self, shapes: &[ShapeDescriptor]) -> AllocationPlan {
        let pool_budget_bytes = self.capacity.pool_budget_bytes();
        let cache_budget_bytes = self.capacity.cache_budget_bytes();

        let mut plan = compute_counts(shapes, pool_budget_bytes);
        plan.merge(compute_counts(shapes, cache_budget_bytes));

        debug!(
            pool_budget_bytes,
            cache_budget_bytes,
            shapes = shapes.len(),
            planned_blocks = plan.total_count(),
            planned_bytes = plan.total_bytes(),
            "planned prefill"
        );

        plan
    }

    /// Computes the interleaved order in which blocks of the given shapes should be allocated
    /// to fill the pool and the cache.
    ///
    /// # Examples
    ///
    /// ```
    /// use pool_prefill::{FixedCapacity, PrefillPlanner, ShapeDescriptor};
    ///
    /// let a = ShapeDescriptor::new(1000, 1).unwrap();
    /// let b = ShapeDescriptor::new(2000, 2).unwrap();
    ///
    /// let planner = PrefillPlanner::new(FixedCapacity::new(6000, 0));
    /// let order: Vec<_> = planner.generate_allocation_order(&[a, b]).collect();
    ///
    /// assert_eq!(order, vec![a, b, a, b]);
    /// ```
    #[must_use]
    pub fn generate_allocation_order(&self, shapes: &[ShapeDescriptor]) -> AllocationQueue {
        self.plan(shapes).into_queue()
    }

    /// Builds the given shapes, applying the planner's [default format][Self::default_format]
    /// to those that do not set a format, and computes their allocation order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`][crate::Error::InvalidShape] for the first builder that
    /// describes an invalid shape. Nothing is planned in that case.
    pub fn prefill(
        &self,
        builders: impl IntoIterator<Item = ShapeBuilder>,
    ) -> crate::Result<AllocationQueue> {
        let shapes = builders
            .into_iter()
            .map(|builder| builder.build_with_default_format(self.default_format))
            .collect::<crate::Result<Vec<_>>>()?;

        Ok(self.generate_allocation_order(&shapes))
    }
}

/// Builder for creating an instance of [`PrefillPlanner`].
///
/// The capacity source is mandatory and provided when the builder is created, whereas other
/// settings are optional.
#[derive(Debug)]
#[must_use]
pub struct PrefillPlannerBuilder<C> {
    capacity: C,
    decode_preference: DecodePreference,
}

impl<C: CapacitySource> PrefillPlannerBuilder<C> {
    pub(crate) fn new(capacity: C) -> Self {
        Self {
            capacity,
            decode_preference: DecodePreference::default(),
        }
    }

    /// Sets the [decode preference][DecodePreference] that determines the pixel format of shapes
    /// that do not set one explicitly.
    pub fn decode_preference(mut self, preference: DecodePreference) -> Self {
        self.decode_preference = preference;
        self
    }

    /// Builds the planner with the specified configuration.
    #[must_use]
    pub fn build(self) -> PrefillPlanner<C> {
        PrefillPlanner {
            capacity: self.capacity,
            default_format: self.decode_preference.default_format(),
        }
    }
}
