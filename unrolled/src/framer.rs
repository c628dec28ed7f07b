use core::mem::ManuallyDrop;

use super::*;

/// An unrolled doubly linked list.
///
/// Items live in a chain of segments of [`capacity`](Framer::capacity) slots
/// each. The framer owns the chain, the segment allocator, and one primary
/// [`Position`]: every mutation happens at that position. Read-only
/// [`Cursor`]s can be taken at any time to navigate and search without
/// moving it.
///
/// # Example
///
/// ```
/// use unrolled::Framer;
///
/// let mut framer = Framer::<u32>::with_capacity(4);
/// for i in 0..5 {
///   framer.push(i).unwrap();
/// }
/// assert_eq!(framer.node_count(), 2);
///
/// framer.to_first();
/// framer.next_n(2);
/// assert_eq!(framer.delete(), Some(2));
/// assert_eq!(framer.iter().collect::<Vec<_>>(), [0, 1, 3, 4]);
/// ```
pub struct Framer<T, A: SegmentAllocator<T> = Heap> {
  pub(crate) chain: Chain<T>,
  pub(crate) pos: Position,
  pub(crate) alloc: A,
}

impl<T: Copy> Framer<T> {
  /// Creates an empty framer with the [default capacity](default_capacity).
  ///
  /// # Panics
  ///
  /// Panics if the first segment cannot be allocated. Use
  /// [`Options::build`] to handle the error instead.
  #[inline]
  pub fn new() -> Self {
    Self::with_capacity(default_capacity::<T>())
  }

  /// Creates an empty framer with `capacity` slots per segment.
  ///
  /// # Panics
  ///
  /// Panics if `capacity` is below [`MIN_CAPACITY`], or if the first segment
  /// cannot be allocated. Use [`Options::build`] to handle the errors
  /// instead.
  #[inline]
  pub fn with_capacity(capacity: usize) -> Self {
    match Options::new().with_capacity(capacity).build() {
      Ok(framer) => framer,
      Err(e) => panic!("{e}"),
    }
  }
}

impl<T: Copy> Default for Framer<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Copy, A: SegmentAllocator<T>> Framer<T, A> {
  pub(crate) fn from_options(opts: Options, mut alloc: A) -> Result<Self, Error> {
    let capacity = opts.resolve::<T>()?;
    let block = reserve_block(&mut alloc, capacity)?;
    let mut chain = Chain::new();
    let segment = chain.insert(Segment::new(block));

    #[cfg(feature = "tracing")]
    tracing::debug!(capacity, "create chain");

    Ok(Self {
      chain,
      pos: Position::new(segment, capacity),
      alloc,
    })
  }

  /// Returns the segment allocator.
  #[inline]
  pub const fn allocator(&self) -> &A {
    &self.alloc
  }

  /// Tears the chain down and hands the allocator back.
  ///
  /// Every segment block is released to the allocator first.
  pub fn into_allocator(self) -> A {
    let mut this = ManuallyDrop::new(self);
    this.teardown();

    // SAFETY: `this` is never dropped or used again, so the chain is dropped
    // exactly once here and the allocator is moved out exactly once.
    unsafe {
      core::ptr::drop_in_place(&mut this.chain);
      core::ptr::read(&this.alloc)
    }
  }

  /// Returns a copy of the primary position.
  ///
  /// The copy's counters do not follow later mutations.
  #[inline]
  pub const fn position(&self) -> Position {
    self.pos
  }

  /// Moves the primary position to `pos`.
  ///
  /// Only the location is taken from `pos`; the item and segment counters
  /// stay those of the framer.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidPosition`] if `pos` refers to a segment that is
  /// no longer part of the chain, or to an index past its fill count.
  pub fn set_position(&mut self, pos: Position) -> Result<(), Error> {
    self.check(&pos)?;
    self.pos.segment = pos.segment;
    self.pos.index = pos.index;
    Ok(())
  }

  /// Returns a read-only cursor at the primary position.
  #[inline]
  pub fn cursor(&self) -> Cursor<'_, T> {
    Cursor::new(&self.chain, self.pos)
  }

  /// Returns a read-only cursor at `pos`, with the framer's counters.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidPosition`] under the same conditions as
  /// [`set_position`](Framer::set_position).
  pub fn cursor_at(&self, pos: Position) -> Result<Cursor<'_, T>, Error> {
    self.check(&pos)?;
    Ok(Cursor::new(
      &self.chain,
      Position {
        segment: pos.segment,
        index: pos.index,
        ..self.pos
      },
    ))
  }

  /// Returns the position of the first item, without moving.
  #[inline]
  pub fn first(&self) -> Position {
    self.pos.first_in(&self.chain)
  }

  /// Returns the position of the last item, without moving.
  #[inline]
  pub fn last(&self) -> Position {
    self.pos.last_in(&self.chain)
  }

  navigation!();

  /// Returns `true` when pushing or popping is allowed: the primary position
  /// is at the last item, or the framer is empty.
  #[inline]
  pub fn at_end(&self) -> bool {
    self.is_empty() || self.at_last()
  }

  /// Returns an iterator over all items, front to back.
  #[inline]
  pub fn iter(&self) -> Iter<'_, T> {
    Iter::new(&self.chain, self.first())
  }

  /// Pushes every item of `iter` at the end of the chain.
  ///
  /// The primary position moves to the end first and stays on the last
  /// pushed item.
  ///
  /// # Errors
  ///
  /// Stops at the first allocation error. Items pushed before the error
  /// stay in the chain.
  pub fn try_extend<I>(&mut self, iter: I) -> Result<(), Error>
  where
    I: IntoIterator<Item = T>,
  {
    self.to_last();
    iter.into_iter().try_for_each(|item| self.push(item))
  }

  /// Checks that `pos` refers to a live item slot of the chain.
  pub(crate) fn check(&self, pos: &Position) -> Result<(), Error> {
    let segment = self
      .chain
      .get(pos.segment)
      .ok_or(Error::InvalidPosition)?;
    if pos.index < segment.used || (segment.used == 0 && pos.index == 0) {
      Ok(())
    } else {
      Err(Error::InvalidPosition)
    }
  }

  /// Reserves a block and stores it as a detached segment.
  ///
  /// Nothing in the chain changes if the allocator fails.
  pub(crate) fn reserve_segment(&mut self) -> Result<SegmentId, Error> {
    let block = reserve_block(&mut self.alloc, self.pos.capacity)?;
    let id = self.chain.insert(Segment::new(block));

    #[cfg(feature = "tracing")]
    tracing::debug!(
      segment = id.index(),
      segments = self.pos.segments + 1,
      "reserve segment"
    );

    Ok(id)
  }

  /// Hands the block of a segment that left the chain back to the allocator.
  pub(crate) fn release_segment(&mut self, segment: Segment<T>) {
    #[cfg(feature = "tracing")]
    tracing::debug!(used = segment.used, "release segment");

    self.alloc.release(segment.data);
  }

  #[cfg(test)]
  pub(crate) fn verify(&self) {
    let head = self.chain.head(self.pos.segment);
    let mut len = 0;
    let mut segments = 0;
    let mut prev = None;
    for (id, segment) in self.chain.walk(head) {
      assert_eq!(segment.prev, prev, "broken back link");
      assert_eq!(segment.capacity(), self.pos.capacity);
      assert!(segment.used <= segment.capacity());
      len += segment.used;
      segments += 1;
      prev = Some(id);
    }
    assert_eq!(len, self.pos.len, "item count drifted");
    assert_eq!(segments, self.pos.segments, "segment count drifted");
    if len == 0 {
      assert_eq!(segments, 1, "an empty chain keeps exactly one segment");
      assert_eq!(self.pos.index, 0);
      assert!(self.chain[head].data[0].is_none());
    } else {
      assert!(self.chain.walk(head).all(|(_, s)| s.used > 0), "empty segment in a non-empty chain");
      assert!(self.pos.index < self.used(), "position past the fill count");
    }
  }
}

impl<T, A: SegmentAllocator<T>> Framer<T, A> {
  /// Walks the chain from its head and releases every block.
  fn teardown(&mut self) {
    let mut next = Some(self.chain.head(self.pos.segment));
    while let Some(id) = next {
      match self.chain.remove(id) {
        Some(segment) => {
          next = segment.next;
          self.alloc.release(segment.data);
        }
        None => break,
      }
    }
  }
}

impl<T, A: SegmentAllocator<T>> Drop for Framer<T, A> {
  fn drop(&mut self) {
    self.teardown();
  }
}

impl<T: Copy + core::fmt::Debug, A: SegmentAllocator<T>> core::fmt::Debug for Framer<T, A> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<'a, T: Copy, A: SegmentAllocator<T>> IntoIterator for &'a Framer<T, A> {
  type Item = T;
  type IntoIter = Iter<'a, T>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

/// Reserves a block of `capacity` slots and checks its length.
fn reserve_block<T, A: SegmentAllocator<T>>(alloc: &mut A, capacity: usize) -> Result<Block<T>, Error> {
  let block = alloc.reserve(capacity)?;
  if block.len() != capacity {
    let found = block.len();
    alloc.release(block);
    return Err(Error::Alloc(AllocError::BlockSize {
      expected: capacity,
      found,
    }));
  }
  Ok(block)
}
