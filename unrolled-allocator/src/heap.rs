use std::vec::Vec;

use super::*;

/// The default segment allocator, backed by the global allocator.
///
/// Blocks are reserved with a fallible reservation, so running out of memory
/// surfaces as [`Error::OutOfMemory`] instead of aborting the process.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Heap;

impl<T> SegmentAllocator<T> for Heap {
  #[inline]
  fn reserve(&mut self, capacity: usize) -> Result<Block<T>, Error> {
    reserve_block(capacity)
  }

  #[inline]
  fn release(&mut self, block: Block<T>) {
    drop(block);
  }
}

/// Reserves a fresh block of `capacity` empty slots from the global allocator.
pub(crate) fn reserve_block<T>(capacity: usize) -> Result<Block<T>, Error> {
  let mut slots = Vec::new();
  if slots.try_reserve_exact(capacity).is_err() {
    #[cfg(feature = "tracing")]
    tracing::debug!(capacity, "failed to reserve segment block");

    return Err(Error::out_of_memory::<T>(capacity));
  }
  slots.resize_with(capacity, || None);
  Ok(slots.into_boxed_slice())
}
