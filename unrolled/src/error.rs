pub use unrolled_allocator::Error as AllocError;

/// An error returned by a [`Framer`](crate::Framer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// The requested segment capacity is below [`MIN_CAPACITY`](crate::MIN_CAPACITY).
  CapacityTooSmall {
    /// The requested capacity.
    capacity: usize,
    /// The minimum capacity.
    minimum: usize,
  },

  /// The segment allocator failed. The chain is left as it was before the
  /// call.
  Alloc(AllocError),

  /// The position refers to a segment that is no longer part of the chain,
  /// or to an index past the segment's fill count.
  InvalidPosition,

  /// The operation requires the position to be at the last item.
  NotAtEnd,

  /// The container holds no items.
  Empty,
}

impl From<AllocError> for Error {
  #[inline]
  fn from(e: AllocError) -> Self {
    Self::Alloc(e)
  }
}

impl core::fmt::Display for Error {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::CapacityTooSmall { capacity, minimum } => write!(
        f,
        "segment capacity {} is too small, the minimum is {}",
        capacity, minimum
      ),
      Self::Alloc(e) => write!(f, "{}", e),
      Self::InvalidPosition => write!(f, "position does not refer to a live item of the chain"),
      Self::NotAtEnd => write!(f, "position is not at the end of the chain"),
      Self::Empty => write!(f, "the chain holds no items"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Alloc(e) => Some(e),
      _ => None,
    }
  }
}
