/// An error returned by a [`SegmentAllocator`](crate::SegmentAllocator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The global allocator could not provide the block.
  OutOfMemory {
    /// The requested size in bytes.
    requested: usize,
  },

  /// The allocator budget does not allow another live block.
  Exhausted {
    /// The number of blocks currently handed out.
    live: usize,
    /// The configured maximum number of live blocks.
    limit: usize,
  },

  /// The allocator returned a block of the wrong length.
  BlockSize {
    /// The segment capacity that was requested.
    expected: usize,
    /// The length of the block that was returned.
    found: usize,
  },
}

impl Error {
  #[inline]
  pub(crate) const fn out_of_memory<T>(capacity: usize) -> Self {
    Self::OutOfMemory {
      requested: capacity.saturating_mul(core::mem::size_of::<Option<T>>()),
    }
  }
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::OutOfMemory { requested } => write!(
        f,
        "Allocation failed: could not reserve a segment block of {} bytes",
        requested
      ),
      Self::Exhausted { live, limit } => write!(
        f,
        "Allocation failed: {} segment blocks are live, but the limit is {}",
        live, limit
      ),
      Self::BlockSize { expected, found } => write!(
        f,
        "Allocation failed: expected a segment block of {} slots, but got {}",
        expected, found
      ),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
