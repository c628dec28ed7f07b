#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("`unrolled-allocator` requires either the 'std' or 'alloc' feature to be enabled");

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

use std::boxed::Box;

mod error;
pub use error::*;

mod heap;
pub use heap::*;

mod options;
pub use options::*;

mod pool;
pub use pool::*;

#[cfg(test)]
mod tests;

/// The slot block backing one segment.
///
/// The length of the block is the segment capacity. Slots past the segment's
/// fill count hold stale or `None` values and are never read.
pub type Block<T> = Box<[Option<T>]>;

/// Reserves and releases the slot blocks of a segment chain.
///
/// The allocator value doubles as the environment of the allocation
/// functions: pooling, arena or instrumented allocators keep their state in
/// `self`.
///
/// # Contract
///
/// - [`reserve`](SegmentAllocator::reserve) must return a block of exactly
///   `capacity` slots, or an error. The chain checks the length and refuses
///   blocks of the wrong size.
/// - Every block handed out is given back through
///   [`release`](SegmentAllocator::release) exactly once, when its segment
///   leaves the chain.
pub trait SegmentAllocator<T> {
  /// Reserves a block of `capacity` slots.
  fn reserve(&mut self, capacity: usize) -> Result<Block<T>, Error>;

  /// Takes back a block previously returned by [`reserve`](SegmentAllocator::reserve).
  fn release(&mut self, block: Block<T>);
}

impl<T, A: SegmentAllocator<T> + ?Sized> SegmentAllocator<T> for &mut A {
  #[inline]
  fn reserve(&mut self, capacity: usize) -> Result<Block<T>, Error> {
    (**self).reserve(capacity)
  }

  #[inline]
  fn release(&mut self, block: Block<T>) {
    (**self).release(block)
  }
}

impl<T, A: SegmentAllocator<T> + ?Sized> SegmentAllocator<T> for Box<A> {
  #[inline]
  fn reserve(&mut self, capacity: usize) -> Result<Block<T>, Error> {
    (**self).reserve(capacity)
  }

  #[inline]
  fn release(&mut self, block: Block<T>) {
    (**self).release(block)
  }
}
