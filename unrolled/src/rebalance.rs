use super::*;

/// The outcome of [`Framer::even`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Even {
  /// The segment is balanced already, or has no neighbour to balance with.
  Noop = 0,
  /// Items were moved from a neighbour to fill the segment up to half.
  Rebalanced = 1,
  /// The segment and a neighbour fit in one segment and were merged.
  Merged = 2,
}

/// The outcome of [`Framer::pack_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Pack {
  /// The target fill is out of range, or the span has nothing to pack.
  Rejected = 0,
  /// The span was packed.
  Packed = 1,
}

impl<T: Copy, A: SegmentAllocator<T>> Framer<T, A> {
  /// Balances the segment at the primary position with one neighbour.
  ///
  /// With a next segment, the pair is merged when it fits in one segment,
  /// otherwise a segment under half full takes items from the front of the
  /// next one. The last segment of the chain balances with the previous one
  /// instead: filled up to half from its tail, or merged into it when taking
  /// those items would leave the previous segment under half full. The
  /// position stays on the same item.
  pub fn even(&mut self) -> Even {
    let id = self.pos.segment;
    let capacity = self.pos.capacity;
    let half = self.pos.half();
    let (used, prev, next) = {
      let segment = &self.chain[id];
      (segment.used, segment.prev, segment.next)
    };

    if let Some(next) = next {
      let next_used = self.chain[next].used;
      if used + next_used <= capacity {
        let (current, right) = self.chain.pair_mut(id, next);
        current.data[used..used + next_used].copy_from_slice(&right.data[..next_used]);
        current.used += next_used;

        let segment = self.chain.unlink(next);
        self.release_segment(segment);
        self.pos.segments -= 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(used = used + next_used, "merge next segment");

        return Even::Merged;
      }

      if used * 2 < capacity {
        let cnt = half - used;
        let (current, right) = self.chain.pair_mut(id, next);
        current.data[used..half].copy_from_slice(&right.data[..cnt]);
        current.used = half;
        right.data.copy_within(cnt..right.used, 0);
        right.used -= cnt;

        #[cfg(feature = "tracing")]
        tracing::trace!(moved = cnt, "fill segment from next");

        return Even::Rebalanced;
      }

      return Even::Noop;
    }

    let Some(prev) = prev else {
      return Even::Noop;
    };
    if used * 2 >= capacity {
      return Even::Noop;
    }

    let prev_used = self.chain[prev].used;
    let cnt = half - used;
    let (left, current) = self.chain.pair_mut(prev, id);
    // pulling would drop the previous segment below half, so both fit in one
    if prev_used < half + cnt {
      debug_assert!(prev_used + used <= capacity);
      left.data[prev_used..prev_used + used].copy_from_slice(&current.data[..used]);
      left.used += used;

      let segment = self.chain.unlink(id);
      self.release_segment(segment);
      self.pos.segment = prev;
      self.pos.index += prev_used;
      self.pos.segments -= 1;

      #[cfg(feature = "tracing")]
      tracing::debug!(used = prev_used + used, "merge into previous segment");

      return Even::Merged;
    }

    current.data.copy_within(..used, cnt);
    current.data[..cnt].copy_from_slice(&left.data[prev_used - cnt..prev_used]);
    current.used = half;
    left.used -= cnt;
    self.pos.index += cnt;

    #[cfg(feature = "tracing")]
    tracing::trace!(moved = cnt, "fill segment from previous");

    Even::Rebalanced
  }

  /// Packs the whole chain so that every segment but the last holds at
  /// least `limit` items. See [`pack_range`](Framer::pack_range).
  pub fn pack(&mut self, limit: usize) -> Pack {
    let start = self.first();
    self.pack_range(start, None, limit).unwrap_or(Pack::Rejected)
  }

  /// Packs the segments from `start` up to `end` (exclusive), or up to the
  /// end of the chain, so that each holds at least `limit` items, except
  /// possibly the last one written. Segments emptied by the packing are
  /// released.
  ///
  /// Packing is rejected when `limit` exceeds the capacity or does not
  /// exceed the average fill of the chain, and when the span holds fewer
  /// than two segments after the leading ones already filled to `limit`.
  ///
  /// The primary position stays on the same item, and item order is kept.
  ///
  /// # Errors
  ///
  /// Returns [`Error::InvalidPosition`] if `start` or `end` refers to a
  /// segment that is not part of the chain, or if `end` does not follow
  /// `start`.
  pub fn pack_range(&mut self, start: Position, end: Option<Position>, limit: usize) -> Result<Pack, Error> {
    if !self.chain.contains(start.segment) {
      return Err(Error::InvalidPosition);
    }
    let end = match end {
      Some(end) => {
        let reachable = self.chain.walk(start.segment).any(|(id, _)| id == end.segment);
        if !reachable {
          return Err(Error::InvalidPosition);
        }
        Some(end.segment)
      }
      None => None,
    };

    if limit > self.pos.capacity || limit <= self.pos.len / self.pos.segments {
      return Ok(Pack::Rejected);
    }

    // leading segments that are full enough stay as they are
    let mut first = start.segment;
    loop {
      if Some(first) == end {
        return Ok(Pack::Rejected);
      }
      let segment = &self.chain[first];
      if segment.used < limit {
        break;
      }
      match segment.next {
        Some(next) => first = next,
        None => return Ok(Pack::Rejected),
      }
    }
    let reader = match self.chain[first].next {
      Some(next) if Some(next) != end => next,
      _ => return Ok(Pack::Rejected),
    };

    let offset = self.offset_in(first, end);

    let (mut w, mut wi) = (first, self.chain[first].used);
    let (mut r, mut ri, mut r_used) = (reader, 0, self.chain[reader].used);
    let stop = loop {
      if ri >= r_used {
        match self.chain[r].next {
          Some(next) if Some(next) != end => {
            r = next;
            ri = 0;
            r_used = self.chain[r].used;
          }
          next => break next,
        }
      }

      // the writer never moves past the segment being read
      if wi >= limit && w != r {
        w = self.chain[w].next.unwrap_or(r);
        wi = 0;
      }

      let item = self.chain[r].data[ri];
      let writer = &mut self.chain[w];
      writer.data[wi] = item;
      wi += 1;
      writer.used = wi;
      ri += 1;
    };

    let mut freed = 0;
    let mut next = self.chain[w].next;
    while next != stop {
      let Some(segment) = next.and_then(|id| self.chain.remove(id)) else {
        break;
      };
      next = segment.next;
      self.release_segment(segment);
      freed += 1;
    }
    self.chain[w].next = stop;
    if let Some(stop) = stop {
      self.chain[stop].prev = Some(w);
    }
    self.pos.segments -= freed;

    if let Some(offset) = offset {
      self.seek_from(first, offset);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
      limit,
      freed,
      segments = self.pos.segments,
      "pack segments"
    );

    Ok(Pack::Packed)
  }

  /// Returns the number of items between the start of `from` and the
  /// primary position, if the position lies in `[from, end)`.
  fn offset_in(&self, from: SegmentId, end: Option<SegmentId>) -> Option<usize> {
    let mut offset = 0;
    for (id, segment) in self.chain.walk(from) {
      if Some(id) == end {
        break;
      }
      if id == self.pos.segment {
        return Some(offset + self.pos.index);
      }
      offset += segment.used;
    }
    None
  }

  /// Moves the primary position `offset` items past the start of `from`.
  fn seek_from(&mut self, from: SegmentId, mut offset: usize) {
    for (id, segment) in self.chain.walk(from) {
      if offset < segment.used {
        self.pos.segment = id;
        self.pos.index = offset;
        return;
      }
      offset -= segment.used;
    }
  }
}
