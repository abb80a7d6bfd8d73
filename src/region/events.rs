use super::polygon::{RegionPolygon, VertexId};
use std::cell::RefCell;
use std::rc::Rc;

/// Change notifications emitted by a [`RegionPolygon`].
///
/// Notifications are delivered synchronously, after the mutation that
/// caused them has completed, in the order the mutations happened.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionChange {
    /// A vertex was spliced into the ring at `index`.
    Inserted { id: VertexId, index: usize },
    /// A vertex left the ring; `index` is where it used to be.
    Removed { id: VertexId, index: usize },
    /// A vertex was dragged to a new (rectified) position.
    Moved { id: VertexId },
    /// The active vertex changed.
    ActiveChanged {
        previous: Option<VertexId>,
        current: Option<VertexId>,
    },
    /// Editing was abandoned; the display handles of `released` can go.
    Destroyed { released: Vec<VertexId> },
}

impl RegionChange {
    /// True for changes that alter the ring's boundary.
    pub fn changes_boundary(&self) -> bool {
        !matches!(self, RegionChange::ActiveChanged { .. })
    }
}

/// Observer of region changes. The region is passed in its post-mutation
/// state so listeners can query it directly.
pub trait RegionListener {
    fn on_change(&mut self, region: &RegionPolygon, change: &RegionChange);
}

impl<F> RegionListener for F
where
    F: FnMut(&RegionPolygon, &RegionChange),
{
    fn on_change(&mut self, region: &RegionPolygon, change: &RegionChange) {
        self(region, change)
    }
}

/// Listener that records every change. Clones share one buffer, so keep a
/// clone and subscribe the other.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    changes: Rc<RefCell<Vec<RegionChange>>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<RegionChange> {
        std::mem::take(&mut *self.changes.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RegionListener for ChangeLog {
    fn on_change(&mut self, _region: &RegionPolygon, change: &RegionChange) {
        self.changes.borrow_mut().push(change.clone());
    }
}
