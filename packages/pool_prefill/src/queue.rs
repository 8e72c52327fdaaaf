use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::num::NonZero;

use tracing::trace;

use crate::{AllocationPlan, AllocationPlanEntry, Error, ShapeDescriptor};

/// The order in which planned blocks should be allocated, one emission per block.
///
/// Shapes are emitted round robin in the order they were planned: every round emits one block of
/// each shape that still has blocks remaining. Shapes with larger counts keep appearing in later
/// rounds after the smaller ones are exhausted. Draining the queue from the front therefore
/// spreads partial progress evenly across all shapes, which matters if the consumer stops early.
///
/// The queue is built once and then drained by a single consumer at its own pace. It is not
/// internally synchronized; consumers on multiple threads must serialize calls to
/// [`remove()`](Self::remove) themselves.
///
/// # Examples
///
/// ```
/// use pool_prefill::{AllocationPlanEntry, AllocationQueue, ShapeDescriptor};
///
/// let a = ShapeDescriptor::new(100, 1).unwrap();
/// let b = ShapeDescriptor::new(200, 1).unwrap();
///
/// let mut queue = AllocationQueue::new([
///     AllocationPlanEntry::new(a, 2),
///     AllocationPlanEntry::new(b, 1),
/// ]);
///
/// assert_eq!(queue.len(), 3);
/// assert_eq!(queue.remove().unwrap(), a);
/// assert_eq!(queue.remove().unwrap(), b);
/// assert_eq!(queue.remove().unwrap(), a);
/// assert!(queue.is_empty());
/// assert!(queue.remove().is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct AllocationQueue {
    /// Shapes with emissions remaining. The front slot emits next; a slot that still has
    /// emissions remaining after emitting moves to the back.
    slots: VecDeque<Slot>,

    /// Sum of `remaining` over all slots, saturating at `u64::MAX`.
    len: u64,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    shape: ShapeDescriptor,
    remaining: NonZero<u64>,
}

impl AllocationQueue {
    /// Builds the allocation order for the given entries.
    ///
    /// Entries with a count of zero are discarded. An empty input yields an empty queue.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = AllocationPlanEntry>) -> Self {
        let slots: VecDeque<Slot> = entries
            .into_iter()
            .filter_map(|entry| {
                NonZero::new(entry.count).map(|remaining| Slot {
                    shape: entry.shape,
                    remaining,
                })
            })
            .collect();

        let len = slots
            .iter()
            .fold(0_u64, |total, slot| total.saturating_add(slot.remaining.get()));

        Self { slots, len }
    }

    /// The number of emissions remaining in the queue.
    ///
    /// The count saturates at `u64::MAX`. A queue whose planned blocks add up to more than that
    /// reports `u64::MAX` until enough blocks have been removed.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the queue has no emissions remaining.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The number of distinct shapes that still have emissions remaining.
    #[must_use]
    pub fn distinct_shapes(&self) -> usize {
        self.slots.len()
    }

    /// The shape that the next call to [`remove()`](Self::remove) will return, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&ShapeDescriptor> {
        self.slots.front().map(|slot| &slot.shape)
    }

    /// Removes and returns the next shape to allocate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] if the queue has no emissions remaining.
    pub fn remove(&mut self) -> crate::Result<ShapeDescriptor> {
        let slot = self.slots.pop_front().ok_or(Error::EmptyQueue)?;

        self.len = self.len.saturating_sub(1);

        let Some(remaining) = NonZero::new(slot.remaining.get().saturating_sub(1)) else {
            trace!(
                byte_size = slot.shape.byte_size(),
                shapes_left = self.slots.len(),
                "shape exhausted in allocation queue"
            );
            return Ok(slot.shape);
        };

        self.slots.push_back(Slot {
            shape: slot.shape,
            remaining,
        });

        Ok(slot.shape)
    }
}

impl From<AllocationPlan> for AllocationQueue {
    fn from(plan: AllocationPlan) -> Self {
        Self::new(plan)
    }
}

impl FromIterator<AllocationPlanEntry> for AllocationQueue {
    fn from_iter<I: IntoIterator<Item = AllocationPlanEntry>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Draining the queue as an iterator yields the same order as repeated [`remove()`] calls.
///
/// [`remove()`]: AllocationQueue::remove
impl Iterator for AllocationQueue {
    type Item = ShapeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        self.remove().ok()
    }

    #[cfg_attr(test, mutants::skip)] // The conversion failure is unreachable on 64-bit targets.
    fn size_hint(&self) -> (usize, Option<usize>) {
        // A saturated length is only a lower bound.
        match usize::try_from(self.len) {
            Ok(len) if self.len < u64::MAX => (len, Some(len)),
            _ => (usize::MAX, None),
        }
    }
}

impl FusedIterator for AllocationQueue {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(AllocationQueue: Send, Sync, Debug, Clone, Default);

    fn shape(byte_size: u64) -> ShapeDescriptor {
        ShapeDescriptor::new(byte_size, 1).unwrap()
    }

    #[test]
    fn empty_entries_yield_empty_queue() {
        let mut queue = AllocationQueue::new(Vec::<AllocationPlanEntry>::new());

        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.peek(), None);
        assert_eq!(queue.remove(), Err(Error::EmptyQueue));
    }

    #[test]
    fn zero_counts_are_discarded() {
        let queue = AllocationQueue::new([
            AllocationPlanEntry::new(shape(1), 0),
            AllocationPlanEntry::new(shape(2), 0),
        ]);

        assert!(queue.is_empty());
        assert_eq!(queue.distinct_shapes(), 0);
    }

    #[test]
    fn equal_counts_alternate_in_input_order() {
        let a = shape(1);
        let b = shape(2);

        let queue = AllocationQueue::new([
            AllocationPlanEntry::new(a, 3),
            AllocationPlanEntry::new(b, 3),
        ]);

        let order: Vec<_> = queue.collect();
        assert_eq!(order, vec![a, b, a, b, a, b]);
    }

    #[test]
    fn larger_counts_continue_in_later_rounds() {
        let a = shape(1);
        let b = shape(2);
        let c = shape(3);

        let queue = AllocationQueue::new([
            AllocationPlanEntry::new(a, 1),
            AllocationPlanEntry::new(b, 3),
            AllocationPlanEntry::new(c, 2),
        ]);

        let order: Vec<_> = queue.collect();
        assert_eq!(order, vec![a, b, c, b, c, b]);
    }

    #[test]
    fn zero_count_entry_does_not_disturb_order() {
        let a = shape(1);
        let b = shape(2);

        let queue = AllocationQueue::new([
            AllocationPlanEntry::new(a, 2),
            AllocationPlanEntry::new(shape(3), 0),
            AllocationPlanEntry::new(b, 2),
        ]);

        let order: Vec<_> = queue.collect();
        assert_eq!(order, vec![a, b, a, b]);
    }

    #[test]
    fn len_tracks_removals() {
        let mut queue = AllocationQueue::new([
            AllocationPlanEntry::new(shape(1), 2),
            AllocationPlanEntry::new(shape(2), 1),
        ]);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.distinct_shapes(), 2);

        queue.remove().unwrap();
        assert_eq!(queue.len(), 2);

        queue.remove().unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.distinct_shapes(), 1);

        queue.remove().unwrap();
        assert!(queue.is_empty());
        assert_eq!(queue.remove(), Err(Error::EmptyQueue));
    }

    #[test]
    fn peek_matches_next_removal() {
        let a = shape(1);
        let b = shape(2);

        let mut queue = AllocationQueue::new([
            AllocationPlanEntry::new(a, 1),
            AllocationPlanEntry::new(b, 1),
        ]);

        assert_eq!(queue.peek(), Some(&a));
        assert_eq!(queue.remove(), Ok(a));
        assert_eq!(queue.peek(), Some(&b));
        assert_eq!(queue.remove(), Ok(b));
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn len_saturates_without_losing_blocks() {
        let a = shape(1);
        let b = shape(2);

        let mut queue = AllocationQueue::new([
            AllocationPlanEntry::new(a, u64::MAX),
            AllocationPlanEntry::new(b, 2),
        ]);

        assert_eq!(queue.len(), u64::MAX);
        assert_eq!(queue.distinct_shapes(), 2);

        assert_eq!(queue.remove(), Ok(a));
        assert_eq!(queue.remove(), Ok(b));
        assert!(!queue.is_empty());
        assert_eq!(queue.distinct_shapes(), 2);
        assert_eq!(queue.size_hint(), (usize::MAX, None));
    }

    #[test]
    fn iterator_reports_exact_size() {
        let mut queue = AllocationQueue::new([AllocationPlanEntry::new(shape(1), 4)]);

        assert_eq!(queue.size_hint(), (4, Some(4)));
        queue.next();
        assert_eq!(queue.size_hint(), (3, Some(3)));
    }

    #[test]
    fn iterator_is_fused() {
        let mut queue = AllocationQueue::new([AllocationPlanEntry::new(shape(1), 1)]);

        assert!(queue.next().is_some());
        assert!(queue.next().is_none());
        assert!(queue.next().is_none());
    }

    #[test]
    fn collects_from_entries() {
        let queue: AllocationQueue = [AllocationPlanEntry::new(shape(1), 2)]
            .into_iter()
            .collect();

        assert_eq!(queue.len(), 2);
    }
}
