//! Photo Capture - Edit History
//!
//! Linear undo/redo over owned snapshots. One vector holds every state
//! from the anchor forward; `cursor` marks the current one. Pushing while
//! the cursor is behind the end truncates the redo segment.

/// Linear snapshot history with a fixed anchor at index 0
#[derive(Debug, Clone)]
pub struct EditHistory<T> {
    snapshots: Vec<T>,
    cursor: usize,
    /// Maximum number of states kept above the anchor
    max_depth: usize,
}

impl<T> EditHistory<T> {
    /// New history whose only state is `anchor`
    pub fn new(anchor: T, max_depth: usize) -> Self {
        Self {
            snapshots: vec![anchor],
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Current state
    pub fn current(&self) -> &T {
        &self.snapshots[self.cursor]
    }

    /// The floor of the history
    pub fn anchor(&self) -> &T {
        &self.snapshots[0]
    }

    /// Make `state` current. Discards every redo state. When the depth
    /// limit is exceeded the oldest state above the anchor is evicted.
    pub fn push(&mut self, state: T) -> &T {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(state);
        self.cursor += 1;

        while self.snapshots.len() - 1 > self.max_depth {
            self.snapshots.remove(1);
            self.cursor -= 1;
        }

        self.current()
    }

    /// Step back one state. At the anchor this is a no-op returning the anchor.
    pub fn undo(&mut self) -> &T {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Step forward one state, if any was undone
    pub fn redo(&mut self) -> Option<&T> {
        if self.can_redo() {
            self.cursor += 1;
            Some(self.current())
        } else {
            None
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of undo steps available
    pub fn depth(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps available
    pub fn redo_depth(&self) -> usize {
        self.snapshots.len() - 1 - self.cursor
    }
}
