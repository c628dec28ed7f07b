/// Options for creating a [`Pool`](crate::Pool).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
  max_idle: usize,
  max_live: Option<usize>,
}

impl Default for PoolOptions {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl PoolOptions {
  /// Create options for a pool with default values.
  #[inline]
  pub const fn new() -> Self {
    Self {
      max_idle: 64,
      max_live: None,
    }
  }

  /// Set how many released blocks the pool keeps for reuse.
  ///
  /// Blocks released while the pool already holds this many idle blocks are
  /// returned to the global allocator.
  ///
  /// The default is `64`.
  ///
  /// # Example
  ///
  /// ```
  /// use unrolled_allocator::PoolOptions;
  ///
  /// let opts = PoolOptions::new().with_max_idle(8);
  /// assert_eq!(opts.max_idle(), 8);
  /// ```
  #[inline]
  pub const fn with_max_idle(mut self, max_idle: usize) -> Self {
    self.max_idle = max_idle;
    self
  }

  /// Set the maximum number of blocks that may be handed out at once.
  ///
  /// Reserving past this budget fails with
  /// [`Error::Exhausted`](crate::Error::Exhausted). `None` means unbounded,
  /// which is the default.
  ///
  /// # Example
  ///
  /// ```
  /// use unrolled_allocator::PoolOptions;
  ///
  /// let opts = PoolOptions::new().with_max_live(Some(16));
  /// assert_eq!(opts.max_live(), Some(16));
  /// ```
  #[inline]
  pub const fn with_max_live(mut self, max_live: Option<usize>) -> Self {
    self.max_live = max_live;
    self
  }

  /// Get the maximum number of idle blocks.
  #[inline]
  pub const fn max_idle(&self) -> usize {
    self.max_idle
  }

  /// Get the maximum number of live blocks.
  #[inline]
  pub const fn max_live(&self) -> Option<usize> {
    self.max_live
  }
}
