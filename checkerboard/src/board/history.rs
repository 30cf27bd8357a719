//! Snapshot history backing [`Board::undo`][crate::Board::undo].
//!
//! Every position the board reaches is stored whole, together with the number of
//! capture hops the turn that produced it had made so far. A chain of `k` hops is
//! recorded as `k` snapshots numbered `1..=k`, so reading the count on the newest
//! snapshot tells undo how far back the current turn started.

use log::trace;

use crate::board::Grid;

/// Initial capacity reserved for a game's worth of snapshots.
const TYPICAL_GAME_LEN: usize = 128;

/// One entry of the [`History`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Snapshot {
    grid: Grid,
    capture_series: usize,
}

impl Snapshot {
    /// The position after the move that produced this snapshot.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of capture hops recorded with this snapshot. Zero for quiet moves,
    /// promotions and the starting position.
    pub fn capture_series(&self) -> usize {
        self.capture_series
    }
}

/// Ordered list of every position reached since the last reset. Never empty.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Start a history whose only entry is `start`.
    pub(super) fn new(start: Grid) -> Self {
        let mut snapshots = Vec::with_capacity(TYPICAL_GAME_LEN);
        snapshots.push(Snapshot {
            grid: start,
            capture_series: 0,
        });
        Self { snapshots }
    }

    /// Append a position.
    pub(super) fn push(&mut self, grid: Grid, capture_series: usize) {
        self.snapshots.push(Snapshot {
            grid,
            capture_series,
        });
    }

    /// Drop the snapshots that make up the most recent turn: as many as the newest
    /// snapshot's capture series, at least one, but never the starting position.
    /// Returns how many snapshots were removed.
    pub(super) fn roll_back(&mut self) -> usize {
        let series = self.last().capture_series.max(1);
        let keep = self.snapshots.len().saturating_sub(series).max(1);
        let removed = self.snapshots.len() - keep;
        self.snapshots.truncate(keep);
        trace!(
            "rolled back {} of {} requested snapshots, {} remain",
            removed,
            series,
            keep
        );
        removed
    }

    /// Number of snapshots, including the starting position.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// The most recent snapshot. Always equal to the board's current grid.
    pub fn last(&self) -> &Snapshot {
        // The constructor pushes the starting position and roll_back always keeps one.
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Iterate the snapshots from the starting position to the newest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }
}
