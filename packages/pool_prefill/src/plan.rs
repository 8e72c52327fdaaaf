use foldhash::{HashMap, HashMapExt};

use crate::{AllocationQueue, ShapeDescriptor};

/// The number of blocks of one shape to preallocate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct AllocationPlanEntry {
    /// The shape of the blocks.
    pub shape: ShapeDescriptor,

    /// How many blocks of `shape` to allocate.
    pub count: u64,
}

impl AllocationPlanEntry {
    /// Creates an entry planning `count` blocks of `shape`.
    #[must_use]
    pub fn new(shape: ShapeDescriptor, count: u64) -> Self {
        Self { shape, count }
    }

    /// The total number of bytes the blocks of this entry occupy, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.shape.byte_size().saturating_mul(self.count)
    }
}

/// Per-shape block counts, in the order the shapes were first added.
///
/// Adding a shape that is already in the plan accumulates into the existing entry, which keeps
/// the position of the first appearance. This is how the counts computed for independent budgets
/// are combined into one plan.
///
/// # Examples
///
/// ```
/// use pool_prefill::{AllocationPlan, ShapeDescriptor};
///
/// let small = ShapeDescriptor::new(100, 1).unwrap();
/// let large = ShapeDescriptor::new(1000, 1).unwrap();
///
/// let mut plan = AllocationPlan::new();
/// plan.add(small, 3);
/// plan.add(large, 1);
/// plan.add(small, 2);
///
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan.count_of(&small), 5);
/// assert_eq!(plan.total_count(), 6);
/// assert_eq!(plan.total_bytes(), 1500);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AllocationPlan {
    entries: Vec<AllocationPlanEntry>,

    /// Position of each shape in `entries`.
    index_of: HashMap<ShapeDescriptor, usize>,
}

impl AllocationPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index_of: HashMap::new(),
        }
    }

    /// Adds `count` blocks of `shape` to the plan.
    ///
    /// A shape added with a count of zero still gets an entry, so the plan reports every shape
    /// that was considered, including those no budget had room for. The count of a shape
    /// saturates at `u64::MAX`.
    pub fn add(&mut self, shape: ShapeDescriptor, count: u64) {
        if let Some(entry) = self
            .index_of
            .get(&shape)
            .and_then(|&index| self.entries.get_mut(index))
        {
            entry.count = entry.count.saturating_add(count);
            return;
        }

        self.index_of.insert(shape, self.entries.len());
        self.entries.push(AllocationPlanEntry::new(shape, count));
    }

    /// Adds all entries of `other` to this plan.
    pub fn merge(&mut self, other: Self) {
        for entry in other.entries {
            self.add(entry.shape, entry.count);
        }
    }

    /// The number of blocks planned for `shape`, or 0 if the shape is not in the plan.
    #[must_use]
    pub fn count_of(&self, shape: &ShapeDescriptor) -> u64 {
        self.index_of
            .get(shape)
            .and_then(|&index| self.entries.get(index))
            .map_or(0, |entry| entry.count)
    }

    /// The entries of the plan, in the order their shapes were first added.
    #[must_use]
    pub fn entries(&self) -> &[AllocationPlanEntry] {
        &self.entries
    }

    /// Iterates over the entries of the plan, in the order their shapes were first added.
    pub fn iter(&self) -> std::slice::Iter<'_, AllocationPlanEntry> {
        self.entries.iter()
    }

    /// The number of distinct shapes in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of blocks planned across all shapes, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.entries
            .iter()
            .fold(0, |total, entry| total.saturating_add(entry.count))
    }

    /// The number of bytes planned across all shapes, saturating at `u64::MAX`.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.entries
            .iter()
            .fold(0, |total, entry| total.saturating_add(entry.total_bytes()))
    }

    /// Converts the plan into the interleaved order in which its blocks should be allocated.
    #[must_use]
    pub fn into_queue(self) -> AllocationQueue {
        AllocationQueue::new(self.entries)
    }
}

impl IntoIterator for AllocationPlan {
    type Item = AllocationPlanEntry;
    type IntoIter = std::vec::IntoIter<AllocationPlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a AllocationPlan {
    type Item = &'a AllocationPlanEntry;
    type IntoIter = std::slice::Iter<'a, AllocationPlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
