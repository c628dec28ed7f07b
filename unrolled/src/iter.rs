use core::iter::FusedIterator;

use super::*;

/// An iterator over the items of a chain, from a starting position to the
/// end of the chain.
///
/// Cloning the iterator restarts from the same point.
pub struct Iter<'a, T> {
  chain: &'a Chain<T>,
  segment: Option<SegmentId>,
  index: usize,
}

impl<'a, T> Iter<'a, T> {
  #[inline]
  pub(crate) const fn new(chain: &'a Chain<T>, pos: Position) -> Self {
    Self {
      chain,
      segment: Some(pos.segment),
      index: pos.index,
    }
  }
}

impl<T> Clone for Iter<'_, T> {
  #[inline]
  fn clone(&self) -> Self {
    Self {
      chain: self.chain,
      segment: self.segment,
      index: self.index,
    }
  }
}

impl<T> core::fmt::Debug for Iter<'_, T> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Iter")
      .field("segment", &self.segment)
      .field("index", &self.index)
      .finish()
  }
}

impl<T: Copy> Iterator for Iter<'_, T> {
  type Item = T;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let segment = &self.chain[self.segment?];
      if self.index < segment.used {
        let item = segment.data[self.index];
        self.index += 1;
        return item;
      }
      self.segment = segment.next;
      self.index = 0;
    }
  }
}

impl<T: Copy> FusedIterator for Iter<'_, T> {}
