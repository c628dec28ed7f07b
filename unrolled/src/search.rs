use core::cmp::Ordering;

use super::*;

impl Position {
  /// Scans forward from the position for the first item `cmp` reports as
  /// equal to `item`.
  pub(crate) fn find_with<T, F>(&self, chain: &Chain<T>, item: &T, mut cmp: F) -> Option<Self>
  where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
  {
    let mut next = Some(self.segment);
    let mut skip = self.index;
    while let Some(id) = next {
      let segment = &chain[id];
      let found = segment.data[..segment.used]
        .iter()
        .enumerate()
        .skip(skip)
        .find_map(|(index, slot)| match slot {
          Some(stored) if cmp(stored, item) == Ordering::Equal => Some(index),
          _ => None,
        });
      if let Some(index) = found {
        return Some(Self {
          segment: id,
          index,
          ..*self
        });
      }
      next = segment.next;
      skip = 0;
    }
    None
  }

  /// Like `find_with`, but skips every segment whose first item is less
  /// than `item`, except the last one skipped.
  pub(crate) fn find_sorted_with<T, F>(&self, chain: &Chain<T>, item: &T, mut cmp: F) -> Option<Self>
  where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
  {
    let mut id = self.segment;
    let mut index = self.index;
    let mut last_less = None;
    loop {
      let segment = &chain[id];
      match segment.item(index) {
        Some(head) if cmp(&head, item) == Ordering::Less => last_less = Some(id),
        _ => break,
      }
      match segment.next {
        Some(next) => {
          id = next;
          index = 0;
        }
        None => break,
      }
    }

    let from = match last_less {
      Some(id) if id != self.segment => Self {
        segment: id,
        index: 0,
        ..*self
      },
      _ => *self,
    };
    from.find_with(chain, item, cmp)
  }
}

/// Search methods shared by [`Cursor`] and [`Framer`]. Both turn a found
/// [`Position`] into their result with a `found` method.
macro_rules! search {
  ($out:ty) => {
    /// Returns the first item equal to `item`, from the current one to the
    /// end of the chain.
    #[inline]
    pub fn find(&self, item: &T) -> Option<$out>
    where
      T: PartialEq,
    {
      self.find_with(item, |a, b| {
        if a == b {
          Ordering::Equal
        } else {
          Ordering::Less
        }
      })
    }

    /// Returns the first item for which `cmp(stored, item)` is
    /// [`Ordering::Equal`], from the current one to the end of the chain.
    #[inline]
    pub fn find_with<F>(&self, item: &T, cmp: F) -> Option<$out>
    where
      F: FnMut(&T, &T) -> Ordering,
    {
      let chain: &Chain<T> = &self.chain;
      self.pos.find_with(chain, item, cmp).map(|pos| self.found(pos))
    }

    /// Like [`find_with`](Self::find_with), for chains sorted in ascending
    /// order by `cmp`.
    ///
    /// Segments whose successor still starts below `item` are skipped as a
    /// whole, so the scan begins in the last segment that can hold a match.
    /// Runs of equal items are still scanned linearly.
    #[inline]
    pub fn find_sorted_with<F>(&self, item: &T, cmp: F) -> Option<$out>
    where
      F: FnMut(&T, &T) -> Ordering,
    {
      let chain: &Chain<T> = &self.chain;
      self.pos.find_sorted_with(chain, item, cmp).map(|pos| self.found(pos))
    }
  };
}

impl<'a, T: Copy> Cursor<'a, T> {
  #[inline]
  fn found(&self, pos: Position) -> Self {
    Self::new(self.chain, pos)
  }

  search!(Cursor<'a, T>);
}

impl<T: Copy, A: SegmentAllocator<T>> Framer<T, A> {
  #[inline]
  fn found(&self, pos: Position) -> Position {
    pos
  }

  search!(Position);
}
