use core::ops::{Index, IndexMut};

use std::vec::Vec;

use super::Block;

/// A stable handle to a segment of a chain.
///
/// Handles carry a generation, so a handle to a segment that was merged
/// away or packed is detected as stale even after its slot is recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId {
  index: usize,
  generation: u32,
}

impl SegmentId {
  /// Returns the slot of the segment record inside the chain.
  #[inline]
  pub const fn index(&self) -> usize {
    self.index
  }

  /// Returns the generation of the segment record.
  #[inline]
  pub const fn generation(&self) -> u32 {
    self.generation
  }
}

/// A fixed-capacity run of items plus its chain links.
#[derive(Debug)]
pub(crate) struct Segment<T> {
  pub(crate) data: Block<T>,
  pub(crate) used: usize,
  pub(crate) prev: Option<SegmentId>,
  pub(crate) next: Option<SegmentId>,
}

impl<T: Copy> Segment<T> {
  #[inline]
  pub(crate) const fn new(data: Block<T>) -> Self {
    Self {
      data,
      used: 0,
      prev: None,
      next: None,
    }
  }

  #[inline]
  pub(crate) fn capacity(&self) -> usize {
    self.data.len()
  }

  /// Free slots left in the segment.
  #[inline]
  pub(crate) fn room(&self) -> usize {
    self.capacity() - self.used
  }

  #[inline]
  pub(crate) fn is_full(&self) -> bool {
    self.used >= self.capacity()
  }

  #[inline]
  pub(crate) fn item(&self, idx: usize) -> Option<T> {
    if idx < self.used {
      self.data[idx]
    } else {
      None
    }
  }

  /// Shifts `[idx, used)` right by one and stores `item` at `idx`.
  pub(crate) fn insert(&mut self, idx: usize, item: T) {
    debug_assert!(idx <= self.used && !self.is_full());
    self.data.copy_within(idx..self.used, idx + 1);
    self.data[idx] = Some(item);
    self.used += 1;
  }

  #[inline]
  pub(crate) fn push(&mut self, item: T) {
    debug_assert!(!self.is_full());
    self.data[self.used] = Some(item);
    self.used += 1;
  }

  /// Removes the item at `idx`, closing the gap.
  pub(crate) fn remove(&mut self, idx: usize) -> Option<T> {
    debug_assert!(idx < self.used);
    let item = self.data[idx];
    self.data.copy_within(idx + 1..self.used, idx);
    self.used -= 1;
    self.data[self.used] = None;
    item
  }

  /// Drops the item at `used - 1`.
  #[inline]
  pub(crate) fn truncate_last(&mut self) -> Option<T> {
    self.used -= 1;
    self.data[self.used].take()
  }
}

#[derive(Debug)]
struct Record<T> {
  generation: u32,
  segment: Option<Segment<T>>,
}

/// The arena owning every segment of one container.
#[derive(Debug)]
pub(crate) struct Chain<T> {
  records: Vec<Record<T>>,
  free: Vec<usize>,
}

impl<T> Chain<T> {
  #[inline]
  pub(crate) const fn new() -> Self {
    Self {
      records: Vec::new(),
      free: Vec::new(),
    }
  }

  /// Stores a detached segment and returns its handle.
  pub(crate) fn insert(&mut self, segment: Segment<T>) -> SegmentId {
    match self.free.pop() {
      Some(index) => {
        let record = &mut self.records[index];
        record.segment = Some(segment);
        SegmentId {
          index,
          generation: record.generation,
        }
      }
      None => {
        let index = self.records.len();
        self.records.push(Record {
          generation: 0,
          segment: Some(segment),
        });
        SegmentId {
          index,
          generation: 0,
        }
      }
    }
  }

  /// Takes a segment out of the arena without touching its neighbours' links.
  pub(crate) fn remove(&mut self, id: SegmentId) -> Option<Segment<T>> {
    let record = self.records.get_mut(id.index)?;
    if record.generation != id.generation {
      return None;
    }
    let segment = record.segment.take()?;
    record.generation = record.generation.wrapping_add(1);
    self.free.push(id.index);
    Some(segment)
  }

  #[inline]
  pub(crate) fn get(&self, id: SegmentId) -> Option<&Segment<T>> {
    self
      .records
      .get(id.index)
      .filter(|r| r.generation == id.generation)
      .and_then(|r| r.segment.as_ref())
  }

  #[inline]
  pub(crate) fn get_mut(&mut self, id: SegmentId) -> Option<&mut Segment<T>> {
    self
      .records
      .get_mut(id.index)
      .filter(|r| r.generation == id.generation)
      .and_then(|r| r.segment.as_mut())
  }

  #[inline]
  pub(crate) fn contains(&self, id: SegmentId) -> bool {
    self.get(id).is_some()
  }

  /// Borrows two distinct segments mutably at once.
  pub(crate) fn pair_mut(&mut self, a: SegmentId, b: SegmentId) -> (&mut Segment<T>, &mut Segment<T>) {
    assert_ne!(a.index, b.index, "cannot borrow a segment twice");
    let (lo, hi, swapped) = if a.index < b.index {
      (a, b, false)
    } else {
      (b, a, true)
    };
    let (left, right) = self.records.split_at_mut(hi.index);
    let lo = live_mut(&mut left[lo.index], lo);
    let hi = live_mut(&mut right[0], hi);
    if swapped {
      (hi, lo)
    } else {
      (lo, hi)
    }
  }

  /// Links the detached segment `id` right after `at`.
  pub(crate) fn link_after(&mut self, at: SegmentId, id: SegmentId) {
    let next = self[at].next;
    {
      let segment = &mut self[id];
      segment.prev = Some(at);
      segment.next = next;
    }
    if let Some(next) = next {
      self[next].prev = Some(id);
    }
    self[at].next = Some(id);
  }

  /// Unlinks `id` from its neighbours and takes it out of the arena.
  pub(crate) fn unlink(&mut self, id: SegmentId) -> Segment<T> {
    let (prev, next) = {
      let segment = &self[id];
      (segment.prev, segment.next)
    };
    if let Some(prev) = prev {
      self[prev].next = next;
    }
    if let Some(next) = next {
      self[next].prev = prev;
    }
    match self.remove(id) {
      Some(segment) => segment,
      None => stale(id),
    }
  }

  /// Walks back to the first segment of the chain.
  pub(crate) fn head(&self, mut from: SegmentId) -> SegmentId {
    while let Some(prev) = self[from].prev {
      from = prev;
    }
    from
  }

  /// Walks forward to the last segment of the chain.
  pub(crate) fn tail(&self, mut from: SegmentId) -> SegmentId {
    while let Some(next) = self[from].next {
      from = next;
    }
    from
  }

  /// Iterates over `from` and every segment after it.
  pub(crate) fn walk(&self, from: SegmentId) -> Walk<'_, T> {
    Walk {
      chain: self,
      next: Some(from),
    }
  }
}

impl<T> Index<SegmentId> for Chain<T> {
  type Output = Segment<T>;

  #[inline]
  fn index(&self, id: SegmentId) -> &Self::Output {
    match self.get(id) {
      Some(segment) => segment,
      None => stale(id),
    }
  }
}

impl<T> IndexMut<SegmentId> for Chain<T> {
  #[inline]
  fn index_mut(&mut self, id: SegmentId) -> &mut Self::Output {
    match self.get_mut(id) {
      Some(segment) => segment,
      None => stale(id),
    }
  }
}

pub(crate) struct Walk<'a, T> {
  chain: &'a Chain<T>,
  next: Option<SegmentId>,
}

impl<'a, T> Iterator for Walk<'a, T> {
  type Item = (SegmentId, &'a Segment<T>);

  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let id = self.next?;
    let segment = &self.chain[id];
    self.next = segment.next;
    Some((id, segment))
  }
}

#[inline]
fn live_mut<T>(record: &mut Record<T>, id: SegmentId) -> &mut Segment<T> {
  match record.segment.as_mut() {
    Some(segment) if record.generation == id.generation => segment,
    _ => stale(id),
  }
}

#[cold]
#[inline(never)]
fn stale(id: SegmentId) -> ! {
  panic!(
    "segment {} (generation {}) is not part of the chain",
    id.index, id.generation
  )
}
