use super::*;

impl Position {
  /// Moves one item forward. Fails, leaving the position untouched, at the
  /// last item.
  pub(crate) fn step_next<T: Copy>(&mut self, chain: &Chain<T>) -> bool {
    let segment = &chain[self.segment];
    if self.index + 1 < segment.used {
      self.index += 1;
      return true;
    }

    match segment.next {
      Some(next) => {
        self.segment = next;
        self.index = 0;
        true
      }
      None => false,
    }
  }

  /// Moves one item backward. Fails, leaving the position untouched, at the
  /// first item.
  pub(crate) fn step_prev<T: Copy>(&mut self, chain: &Chain<T>) -> bool {
    if self.index > 0 {
      self.index -= 1;
      return true;
    }

    match chain[self.segment].prev {
      Some(prev) => {
        self.segment = prev;
        self.index = chain[prev].used.saturating_sub(1);
        true
      }
      None => false,
    }
  }

  /// Moves `n` items forward, all or nothing.
  pub(crate) fn advance<T: Copy>(&mut self, chain: &Chain<T>, n: usize) -> usize {
    let segment = &chain[self.segment];

    if let Some(next) = segment.next.filter(|_| n > self.capacity) {
      // whole segments are skipped by their fill counts
      let mut steps = n - (segment.used - self.index);
      let mut id = next;
      let mut current = &chain[id];
      while steps >= current.used {
        match current.next {
          Some(next) => {
            steps -= current.used;
            id = next;
            current = &chain[id];
          }
          None => break,
        }
      }

      if steps < current.used {
        self.segment = id;
        self.index = steps;
        return n;
      }
      return 0;
    }

    let mut pos = *self;
    for _ in 0..n {
      if !pos.step_next(chain) {
        return 0;
      }
    }
    *self = pos;
    n
  }

  /// Moves `n` items backward, all or nothing.
  pub(crate) fn retreat<T: Copy>(&mut self, chain: &Chain<T>, n: usize) -> usize {
    if n > self.capacity {
      let mut steps = n - self.index;
      let mut id = self.segment;
      while let Some(prev) = chain[id].prev {
        let used = chain[prev].used;
        if steps < used {
          break;
        }
        steps -= used;
        id = prev;
      }

      if steps == 0 {
        self.segment = id;
        self.index = 0;
        return n;
      }

      return match chain[id].prev {
        Some(prev) => {
          self.segment = prev;
          self.index = chain[prev].used - steps;
          n
        }
        None => 0,
      };
    }

    let mut pos = *self;
    for _ in 0..n {
      if !pos.step_prev(chain) {
        return 0;
      }
    }
    *self = pos;
    n
  }

  pub(crate) fn first_in<T: Copy>(&self, chain: &Chain<T>) -> Self {
    Self {
      segment: chain.head(self.segment),
      index: 0,
      ..*self
    }
  }

  pub(crate) fn last_in<T: Copy>(&self, chain: &Chain<T>) -> Self {
    let segment = chain.tail(self.segment);
    Self {
      segment,
      index: chain[segment].used.saturating_sub(1),
      ..*self
    }
  }

  pub(crate) fn is_first<T: Copy>(&self, chain: &Chain<T>) -> bool {
    self.index == 0 && chain[self.segment].prev.is_none()
  }

  pub(crate) fn is_last<T: Copy>(&self, chain: &Chain<T>) -> bool {
    let segment = &chain[self.segment];
    segment.next.is_none() && self.index + 1 == segment.used
  }

  /// Items from the position, inclusive, to the end of the chain.
  pub(crate) fn tail_len<T: Copy>(&self, chain: &Chain<T>) -> usize {
    let mut walk = chain.walk(self.segment);
    let head = walk
      .next()
      .map_or(0, |(_, s)| s.used.saturating_sub(self.index));
    head + walk.map(|(_, s)| s.used).sum::<usize>()
  }
}

/// Accessors and navigation shared by [`Cursor`] and [`Framer`].
///
/// Both carry a `chain` field (owned or borrowed) and a `pos` field.
macro_rules! navigation {
  () => {
    /// Returns the index inside the current segment.
    #[inline]
    pub const fn index(&self) -> usize {
      self.pos.index
    }

    /// Returns the segment capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
      self.pos.capacity
    }

    /// Returns the number of items.
    #[inline]
    pub const fn len(&self) -> usize {
      self.pos.len
    }

    /// Returns `true` if there are no items.
    #[inline]
    pub const fn is_empty(&self) -> bool {
      self.pos.len == 0
    }

    /// Returns the number of segments.
    #[inline]
    pub const fn node_count(&self) -> usize {
      self.pos.segments
    }

    /// Returns the fill count of the current segment.
    #[inline]
    pub fn used(&self) -> usize {
      let chain: &Chain<T> = &self.chain;
      chain[self.pos.segment].used
    }

    /// Returns the current item, or `None` if there are no items.
    #[inline]
    pub fn item(&self) -> Option<T> {
      let chain: &Chain<T> = &self.chain;
      chain[self.pos.segment].item(self.pos.index)
    }

    /// Returns the item at `idx` of the current segment.
    ///
    /// Indices at or past the fill count of the segment yield `None`.
    #[inline]
    pub fn item_at(&self, idx: usize) -> Option<T> {
      let chain: &Chain<T> = &self.chain;
      chain[self.pos.segment].item(idx)
    }

    /// Moves to the next item and returns it.
    ///
    /// Returns `None`, without moving, at the last item.
    #[inline]
    pub fn next_item(&mut self) -> Option<T> {
      let chain: &Chain<T> = &self.chain;
      if self.pos.step_next(chain) {
        chain[self.pos.segment].item(self.pos.index)
      } else {
        None
      }
    }

    /// Moves one item forward, crossing into the next segment when the
    /// current one is exhausted.
    ///
    /// Returns `false`, without moving, at the last item.
    #[inline]
    pub fn move_next(&mut self) -> bool {
      let chain: &Chain<T> = &self.chain;
      self.pos.step_next(chain)
    }

    /// Moves one item backward, crossing into the previous segment at a
    /// segment start.
    ///
    /// Returns `false`, without moving, at the first item.
    #[inline]
    pub fn move_prev(&mut self) -> bool {
      let chain: &Chain<T> = &self.chain;
      self.pos.step_prev(chain)
    }

    /// Moves `n` items forward and returns `n`.
    ///
    /// Distances larger than the capacity skip whole segments by their fill
    /// counts. If fewer than `n` items follow, nothing moves and `0` is
    /// returned.
    #[inline]
    pub fn next_n(&mut self, n: usize) -> usize {
      let chain: &Chain<T> = &self.chain;
      self.pos.advance(chain, n)
    }

    /// Moves `n` items backward and returns `n`.
    ///
    /// If fewer than `n` items precede the current one, nothing moves and
    /// `0` is returned.
    #[inline]
    pub fn prev_n(&mut self, n: usize) -> usize {
      let chain: &Chain<T> = &self.chain;
      self.pos.retreat(chain, n)
    }

    /// Moves to the first item.
    #[inline]
    pub fn to_first(&mut self) {
      let chain: &Chain<T> = &self.chain;
      self.pos = self.pos.first_in(chain);
    }

    /// Moves to the last item.
    #[inline]
    pub fn to_last(&mut self) {
      let chain: &Chain<T> = &self.chain;
      self.pos = self.pos.last_in(chain);
    }

    /// Returns `true` at the first item, or when there are no items.
    #[inline]
    pub fn at_first(&self) -> bool {
      let chain: &Chain<T> = &self.chain;
      self.pos.is_first(chain)
    }

    /// Returns `true` at the last item.
    #[inline]
    pub fn at_last(&self) -> bool {
      let chain: &Chain<T> = &self.chain;
      self.pos.is_last(chain)
    }

    /// Counts the items from the current one, inclusive, to the end of the
    /// chain.
    ///
    /// Walks every remaining segment.
    #[inline]
    pub fn tail_length(&self) -> usize {
      let chain: &Chain<T> = &self.chain;
      self.pos.tail_len(chain)
    }
  };
}
