use super::*;

impl<T: Copy, A: SegmentAllocator<T>> Framer<T, A> {
  /// Inserts `item` at the primary position, shifting the items after it
  /// one place to the right. The position ends up on the new item.
  ///
  /// A full segment first tries to hand the items on one side of the
  /// position to a neighbour with enough room; only when neither neighbour
  /// can take them is a new segment allocated and the pair evened out.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Alloc`] if a new segment is needed and cannot be
  /// allocated. The chain and the position are unchanged in that case.
  pub fn insert(&mut self, item: T) -> Result<(), Error> {
    let id = self.pos.segment;
    let idx = self.pos.index;
    let (used, prev) = {
      let segment = &self.chain[id];
      (segment.used, segment.prev)
    };

    if idx > 0 && used < self.pos.capacity {
      self.chain[id].insert(idx, item);
    } else if let Some(prev) = prev.filter(|&p| idx == 0 && !self.chain[p].is_full()) {
      // spill onto the tail of the previous segment
      let segment = &mut self.chain[prev];
      segment.push(item);
      self.pos.segment = prev;
      self.pos.index = segment.used - 1;
    } else if used < self.pos.capacity {
      self.chain[id].insert(idx, item);
    } else if idx >= used {
      let fresh = self.reserve_segment()?;
      self.chain.link_after(id, fresh);
      self.chain[fresh].push(item);
      self.pos.segment = fresh;
      self.pos.index = 0;
      self.pos.segments += 1;
    } else if !self.shift_to_peer(id, idx, item) {
      self.split(id, idx, item)?;
    }

    self.pos.len += 1;
    Ok(())
  }

  /// Inserts `item` right after the primary position and moves onto it.
  ///
  /// Appending at the last item of a chain whose last segment has room
  /// never shifts anything. On an empty framer this is [`insert`](Framer::insert).
  ///
  /// # Errors
  ///
  /// Returns [`Error::Alloc`] if a new segment cannot be allocated. The
  /// chain and the position are unchanged in that case.
  pub fn append(&mut self, item: T) -> Result<(), Error> {
    let id = self.pos.segment;
    let (used, full, next) = {
      let segment = &self.chain[id];
      (segment.used, segment.is_full(), segment.next)
    };

    if self.pos.len != 0 && self.pos.index + 1 == used && next.is_none() && !full {
      self.chain[id].push(item);
      self.pos.index += 1;
      self.pos.len += 1;
      return Ok(());
    }

    if self.pos.len == 0 {
      return self.insert(item);
    }

    let saved = self.pos;
    if !full || next.is_none() {
      self.pos.index += 1;
    } else {
      self.pos.step_next(&self.chain);
    }

    let res = self.insert(item);
    if res.is_err() {
      self.pos = saved;
    }
    res
  }

  /// Removes and returns the item at the primary position.
  ///
  /// The position moves onto the item that followed, or onto the new last
  /// item when the removed one was last. A segment left empty is unlinked
  /// and released, unless it is the only one.
  ///
  /// Returns `None` if the framer is empty.
  pub fn delete(&mut self) -> Option<T> {
    if self.pos.len == 0 {
      return None;
    }

    let id = self.pos.segment;
    let idx = self.pos.index;
    let (used, prev, next) = {
      let segment = &self.chain[id];
      (segment.used, segment.prev, segment.next)
    };

    let item = if used > 1 {
      let item = self.chain[id].remove(idx);
      if idx + 1 == used {
        match next {
          Some(next) => {
            self.pos.segment = next;
            self.pos.index = 0;
          }
          None => self.pos.index -= 1,
        }
      }
      item
    } else if prev.is_none() && next.is_none() {
      self.pos.index = 0;
      self.chain[id].remove(0)
    } else {
      let segment = self.chain.unlink(id);
      let item = segment.data[idx];
      if let Some(next) = next {
        self.pos.segment = next;
        self.pos.index = 0;
      } else if let Some(prev) = prev {
        self.pos.segment = prev;
        self.pos.index = self.chain[prev].used - 1;
      }
      self.release_segment(segment);
      self.pos.segments -= 1;
      item
    };

    self.pos.len -= 1;
    item
  }

  /// Removes the item at the primary position, then [evens](Framer::even)
  /// the segment the position lands on.
  pub fn delete_even(&mut self) -> Option<T> {
    let item = self.delete()?;
    self.even();
    Some(item)
  }

  /// Pushes `item` after the last item and moves onto it.
  ///
  /// # Errors
  ///
  /// Returns [`Error::NotAtEnd`] unless the primary position is at the last
  /// item (see [`at_end`](Framer::at_end)), and [`Error::Alloc`] if a new
  /// segment cannot be allocated.
  pub fn push(&mut self, item: T) -> Result<(), Error> {
    if !self.at_end() {
      return Err(Error::NotAtEnd);
    }

    let id = self.pos.segment;
    if self.pos.len != 0 && !self.chain[id].is_full() {
      self.chain[id].push(item);
      self.pos.index += 1;
      self.pos.len += 1;
      return Ok(());
    }

    self.append(item)
  }

  /// Removes and returns the last item, moving onto the one before it.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Empty`] if there is nothing to pop, and
  /// [`Error::NotAtEnd`] unless the primary position is at the last item.
  pub fn pop(&mut self) -> Result<T, Error> {
    if self.pos.len == 0 {
      return Err(Error::Empty);
    }
    if !self.at_last() {
      return Err(Error::NotAtEnd);
    }

    let item = if self.pos.index > 0 {
      let item = self.chain[self.pos.segment].truncate_last();
      self.pos.index -= 1;
      self.pos.len -= 1;
      item
    } else {
      self.delete()
    };
    item.ok_or(Error::Empty)
  }

  /// Makes room in the full segment `id` by moving the items on one side of
  /// `idx` into a neighbour, then stores `item` at the freed slot.
  ///
  /// Returns `false`, changing nothing, if the neighbour on that side lacks
  /// room.
  fn shift_to_peer(&mut self, id: SegmentId, idx: usize, item: T) -> bool {
    let segment = &self.chain[id];

    if idx < self.pos.half() {
      let Some(prev) = segment.prev else {
        return false;
      };
      if idx == 0 || idx > self.chain[prev].room() {
        return false;
      }

      let (left, current) = self.chain.pair_mut(prev, id);
      left.data[left.used..left.used + idx].copy_from_slice(&current.data[..idx]);
      left.used += idx;
      current.data.copy_within(idx..current.used, 1);
      current.data[0] = Some(item);
      current.used = current.used - idx + 1;
      self.pos.index = 0;

      #[cfg(feature = "tracing")]
      tracing::trace!(moved = idx, "shift head into previous segment");

      return true;
    }

    let Some(next) = segment.next else {
      return false;
    };
    let cnt = segment.used - idx;
    if cnt > self.chain[next].room() {
      return false;
    }

    let (current, right) = self.chain.pair_mut(id, next);
    right.data.copy_within(..right.used, cnt);
    right.data[..cnt].copy_from_slice(&current.data[idx..current.used]);
    right.used += cnt;
    current.data[idx] = Some(item);
    current.used = idx + 1;

    #[cfg(feature = "tracing")]
    tracing::trace!(moved = cnt, "shift tail into next segment");

    true
  }

  /// Moves `[idx, used)` of the full segment `id` into a new segment linked
  /// after it, stores `item` at `idx`, and evens the pair.
  fn split(&mut self, id: SegmentId, idx: usize, item: T) -> Result<(), Error> {
    let fresh = self.reserve_segment()?;
    self.chain.link_after(id, fresh);

    let (current, tail) = self.chain.pair_mut(id, fresh);
    let moved = current.used - idx;
    tail.data[..moved].copy_from_slice(&current.data[idx..current.used]);
    tail.used = moved;
    current.data[idx] = Some(item);
    current.used = idx + 1;
    self.pos.segments += 1;

    #[cfg(feature = "tracing")]
    tracing::debug!(at = idx, moved, "split segment");

    self.even();
    Ok(())
  }
}
