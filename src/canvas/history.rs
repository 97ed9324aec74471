//! Bounded undo history of raster snapshots

use image::RgbaImage;
use std::collections::VecDeque;

/// Snapshot stack that forgets its oldest entry once full
#[derive(Debug, Clone)]
pub struct UndoHistory {
    snapshots: VecDeque<RgbaImage>,
    capacity: usize,
}

impl UndoHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a snapshot, evicting the oldest one on overflow
    pub fn push(&mut self, snapshot: RgbaImage) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<RgbaImage> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
