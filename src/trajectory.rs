use std::collections::VecDeque;

use glam::DVec2;

/// How many past positions a [`Trajectory`] keeps.
///
/// [`HistoryLimit::Unbounded`] grows by one point every tick for the whole lifetime of the
/// simulation. Long-running simulations should use [`HistoryLimit::Bounded`] instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryLimit {
    /// Keep every recorded position.
    #[default]
    Unbounded,
    /// Keep only the most recent `n` positions, dropping the oldest first.
    Bounded(usize),
}

/// Recorded positions of a body, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    limit: HistoryLimit,
    points: VecDeque<DVec2>,
}

impl Trajectory {
    /// Creates an empty [`Trajectory`] with the given limit.
    #[inline]
    pub fn new(limit: HistoryLimit) -> Self {
        let points = match limit {
            HistoryLimit::Unbounded => VecDeque::new(),
            HistoryLimit::Bounded(capacity) => VecDeque::with_capacity(capacity.min(4096)),
        };

        Self { limit, points }
    }

    /// Returns the limit of this trajectory.
    #[inline]
    pub const fn limit(&self) -> HistoryLimit {
        self.limit
    }

    /// Changes the limit, dropping the oldest points if the new limit is smaller than the
    /// current length.
    pub fn set_limit(&mut self, limit: HistoryLimit) {
        self.limit = limit;
        self.truncate_front();
    }

    /// Appends a copy of `position`.
    #[inline]
    pub fn push(&mut self, position: DVec2) {
        if self.limit == HistoryLimit::Bounded(0) {
            return;
        }

        self.points.push_back(position);
        self.truncate_front();
    }

    fn truncate_front(&mut self) {
        if let HistoryLimit::Bounded(capacity) = self.limit {
            while self.points.len() > capacity {
                self.points.pop_front();
            }
        }
    }

    /// Number of recorded positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest recorded position still kept.
    #[inline]
    pub fn first(&self) -> Option<DVec2> {
        self.points.front().copied()
    }

    /// Most recently recorded position.
    #[inline]
    pub fn last(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    /// Iterates over the recorded positions, oldest first.
    #[inline]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = DVec2> + ExactSizeIterator + '_ {
        self.points.iter().copied()
    }

    /// Iterates over the `n` most recent positions, oldest first.
    #[inline]
    pub fn tail(&self, n: usize) -> impl Iterator<Item = DVec2> + '_ {
        self.iter().skip(self.len().saturating_sub(n))
    }
}
