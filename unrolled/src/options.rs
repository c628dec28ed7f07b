use super::*;

/// The smallest segment capacity a chain accepts.
pub const MIN_CAPACITY: usize = 4;

/// The number of bytes one segment aims to fit in, header included.
const CACHE_LINE: usize = 64;

/// Returns the default segment capacity for items of type `T`.
///
/// The capacity is chosen so that a segment header (two links and a fill
/// count) plus its slots fit one cache line, but never drops below
/// [`MIN_CAPACITY`].
///
/// # Example
///
/// ```
/// use unrolled::{default_capacity, MIN_CAPACITY};
///
/// assert!(default_capacity::<u64>() >= MIN_CAPACITY);
/// ```
pub const fn default_capacity<T>() -> usize {
  let header = 3 * core::mem::size_of::<usize>();
  let slot = core::mem::size_of::<Option<T>>();
  if slot == 0 || header >= CACHE_LINE {
    return MIN_CAPACITY;
  }

  let capacity = (CACHE_LINE - header) / slot;
  if capacity < MIN_CAPACITY {
    MIN_CAPACITY
  } else {
    capacity
  }
}

/// Options for creating a [`Framer`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Options {
  capacity: Option<usize>,
}

impl Options {
  /// Creates options with default values.
  #[inline]
  pub const fn new() -> Self {
    Self { capacity: None }
  }

  /// Sets the number of item slots per segment.
  ///
  /// The capacity must be at least [`MIN_CAPACITY`], which is checked by
  /// [`build`](Options::build). When unset, [`default_capacity`] is used.
  ///
  /// # Example
  ///
  /// ```
  /// use unrolled::Options;
  ///
  /// let opts = Options::new().with_capacity(16);
  /// assert_eq!(opts.capacity(), Some(16));
  /// ```
  #[inline]
  pub const fn with_capacity(mut self, capacity: usize) -> Self {
    self.capacity = Some(capacity);
    self
  }

  /// Returns the configured segment capacity, if any.
  ///
  /// # Example
  ///
  /// ```
  /// use unrolled::Options;
  ///
  /// assert_eq!(Options::new().capacity(), None);
  /// ```
  #[inline]
  pub const fn capacity(&self) -> Option<usize> {
    self.capacity
  }

  /// Creates an empty [`Framer`] backed by the [`Heap`] allocator.
  ///
  /// # Example
  ///
  /// ```
  /// use unrolled::Options;
  ///
  /// let framer = Options::new().with_capacity(8).build::<u32>().unwrap();
  /// assert_eq!(framer.capacity(), 8);
  /// assert!(framer.is_empty());
  /// ```
  #[inline]
  pub fn build<T: Copy>(self) -> Result<Framer<T>, Error> {
    self.build_with(Heap)
  }

  /// Creates an empty [`Framer`] whose segments are reserved from `alloc`.
  ///
  /// # Example
  ///
  /// ```
  /// use unrolled::{Options, Pool};
  ///
  /// let framer = Options::new()
  ///   .with_capacity(8)
  ///   .build_with::<u32, _>(Pool::new())
  ///   .unwrap();
  /// assert_eq!(framer.allocator().stats().live(), 1);
  /// ```
  #[inline]
  pub fn build_with<T: Copy, A: SegmentAllocator<T>>(self, alloc: A) -> Result<Framer<T, A>, Error> {
    Framer::from_options(self, alloc)
  }

  /// Resolves the capacity for items of type `T`.
  pub(crate) const fn resolve<T>(&self) -> Result<usize, Error> {
    match self.capacity {
      None => Ok(default_capacity::<T>()),
      Some(capacity) if capacity < MIN_CAPACITY => Err(Error::CapacityTooSmall {
        capacity,
        minimum: MIN_CAPACITY,
      }),
      Some(capacity) => Ok(capacity),
    }
  }
}
