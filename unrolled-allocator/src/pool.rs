use std::vec::Vec;

use super::*;

/// Counters kept by a [`Pool`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
  reserved: usize,
  released: usize,
  reused: usize,
  idle: usize,
}

impl Stats {
  /// Returns the number of successful reservations.
  #[inline]
  pub const fn reserved(&self) -> usize {
    self.reserved
  }

  /// Returns the number of blocks given back to the pool.
  #[inline]
  pub const fn released(&self) -> usize {
    self.released
  }

  /// Returns how many reservations were served from idle blocks.
  #[inline]
  pub const fn reused(&self) -> usize {
    self.reused
  }

  /// Returns the number of blocks currently handed out.
  #[inline]
  pub const fn live(&self) -> usize {
    self.reserved - self.released
  }

  /// Returns the number of released blocks waiting for reuse.
  #[inline]
  pub const fn idle(&self) -> usize {
    self.idle
  }
}

/// A pooling segment allocator.
///
/// Released blocks are kept and handed out again by later reservations of
/// the same capacity. The pool can also cap the number of live blocks, which
/// bounds the memory a chain may hold.
#[derive(Debug)]
pub struct Pool<T> {
  idle: Vec<Block<T>>,
  opts: PoolOptions,
  stats: Stats,
}

impl<T> Default for Pool<T> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl<T> Pool<T> {
  /// Creates a pool with default [`PoolOptions`].
  #[inline]
  pub const fn new() -> Self {
    Self::with_options(PoolOptions::new())
  }

  /// Creates a pool with the given options.
  #[inline]
  pub const fn with_options(opts: PoolOptions) -> Self {
    Self {
      idle: Vec::new(),
      opts,
      stats: Stats {
        reserved: 0,
        released: 0,
        reused: 0,
        idle: 0,
      },
    }
  }

  /// Returns the options of the pool.
  #[inline]
  pub const fn options(&self) -> &PoolOptions {
    &self.opts
  }

  /// Returns the counters of the pool.
  #[inline]
  pub const fn stats(&self) -> Stats {
    self.stats
  }

  /// Drops every idle block.
  pub fn shrink(&mut self) {
    self.idle.clear();
    self.stats.idle = 0;
  }
}

impl<T> SegmentAllocator<T> for Pool<T> {
  fn reserve(&mut self, capacity: usize) -> Result<Block<T>, Error> {
    if let Some(limit) = self.opts.max_live() {
      let live = self.stats.live();
      if live >= limit {
        #[cfg(feature = "tracing")]
        tracing::debug!(live, limit, "segment pool exhausted");

        return Err(Error::Exhausted { live, limit });
      }
    }

    let block = match self.idle.iter().rposition(|b| b.len() == capacity) {
      Some(pos) => {
        let mut block = self.idle.swap_remove(pos);
        block.iter_mut().for_each(|slot| *slot = None);
        self.stats.reused += 1;
        self.stats.idle -= 1;
        block
      }
      None => heap::reserve_block(capacity)?,
    };

    self.stats.reserved += 1;
    Ok(block)
  }

  fn release(&mut self, block: Block<T>) {
    self.stats.released += 1;
    if self.idle.len() < self.opts.max_idle() {
      self.idle.push(block);
      self.stats.idle += 1;
    }
  }
}
