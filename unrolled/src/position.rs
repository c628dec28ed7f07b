use super::*;

/// A location inside a chain: a segment, an index into it, and cached
/// counters.
///
/// The counters (`len` and `node_count`) are exact for the position owned by
/// a [`Framer`]. A copy taken with [`Framer::position`] keeps the values it
/// had when it was taken and drifts once the container mutates afterwards.
/// Feeding a drifted or stale position back into the container is checked:
/// see [`Framer::set_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
  pub(crate) segment: SegmentId,
  pub(crate) index: usize,
  pub(crate) capacity: usize,
  pub(crate) len: usize,
  pub(crate) segments: usize,
}

impl Position {
  #[inline]
  pub(crate) const fn new(segment: SegmentId, capacity: usize) -> Self {
    Self {
      segment,
      index: 0,
      capacity,
      len: 0,
      segments: 1,
    }
  }

  /// Returns the segment the position refers to.
  #[inline]
  pub const fn segment(&self) -> SegmentId {
    self.segment
  }

  /// Returns the index inside the segment.
  #[inline]
  pub const fn index(&self) -> usize {
    self.index
  }

  /// Returns the segment capacity of the container.
  #[inline]
  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Returns the cached number of items.
  #[inline]
  pub const fn len(&self) -> usize {
    self.len
  }

  /// Returns `true` if the cached number of items is zero.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns the cached number of segments.
  #[inline]
  pub const fn node_count(&self) -> usize {
    self.segments
  }

  /// Half of the capacity, rounded up.
  #[inline]
  pub(crate) const fn half(&self) -> usize {
    self.capacity.div_ceil(2)
  }
}

/// A read-only view into a chain.
///
/// A cursor borrows the container immutably and carries its own
/// [`Position`], so any number of cursors can navigate and search at the
/// same time. Moving a cursor never moves the container's own position.
pub struct Cursor<'a, T> {
  pub(crate) chain: &'a Chain<T>,
  pub(crate) pos: Position,
}

impl<T> Clone for Cursor<'_, T> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> core::fmt::Debug for Cursor<'_, T> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Cursor").field("position", &self.pos).finish()
  }
}

impl<'a, T: Copy> Cursor<'a, T> {
  #[inline]
  pub(crate) const fn new(chain: &'a Chain<T>, pos: Position) -> Self {
    Self { chain, pos }
  }

  /// Returns the position of the cursor.
  #[inline]
  pub const fn position(&self) -> Position {
    self.pos
  }

  /// Returns a cursor at the first item of the chain.
  #[inline]
  pub fn first(&self) -> Self {
    Self::new(self.chain, self.pos.first_in(self.chain))
  }

  /// Returns a cursor at the last item of the chain.
  #[inline]
  pub fn last(&self) -> Self {
    Self::new(self.chain, self.pos.last_in(self.chain))
  }

  navigation!();

  /// Returns an iterator over the items from the cursor to the end of the
  /// chain.
  #[inline]
  pub fn iter(&self) -> Iter<'a, T> {
    Iter::new(self.chain, self.pos)
  }
}
