use super::*;

#[test]
fn heap_reserves_empty_blocks() {
  let mut heap = Heap;
  let block: Block<u64> = heap.reserve(8).unwrap();
  assert_eq!(block.len(), 8);
  assert!(block.iter().all(Option::is_none));
  heap.release(block);
}

#[test]
fn heap_reports_out_of_memory() {
  let mut heap = Heap;
  let err = SegmentAllocator::<u64>::reserve(&mut heap, usize::MAX).unwrap_err();
  assert!(matches!(err, Error::OutOfMemory { .. }));
}

#[test]
fn pool_reuses_released_blocks() {
  let mut pool = Pool::<u32>::new();
  let mut block = pool.reserve(4).unwrap();
  block[0] = Some(7);
  block[3] = Some(9);
  pool.release(block);
  assert_eq!(pool.stats().idle(), 1);

  let block = pool.reserve(4).unwrap();
  assert!(block.iter().all(Option::is_none));
  let stats = pool.stats();
  assert_eq!(stats.reserved(), 2);
  assert_eq!(stats.released(), 1);
  assert_eq!(stats.reused(), 1);
  assert_eq!(stats.live(), 1);
  assert_eq!(stats.idle(), 0);
}

#[test]
fn pool_only_reuses_matching_capacity() {
  let mut pool = Pool::<u32>::new();
  let small = pool.reserve(4).unwrap();
  pool.release(small);

  let large = pool.reserve(16).unwrap();
  assert_eq!(large.len(), 16);
  assert_eq!(pool.stats().reused(), 0);
  assert_eq!(pool.stats().idle(), 1);
}

#[test]
fn pool_caps_idle_blocks() {
  let mut pool = Pool::<u32>::with_options(PoolOptions::new().with_max_idle(2));
  let blocks: std::vec::Vec<_> = (0..4).map(|_| pool.reserve(4).unwrap()).collect();
  for block in blocks {
    pool.release(block);
  }
  assert_eq!(pool.stats().idle(), 2);
  assert_eq!(pool.stats().live(), 0);

  pool.shrink();
  assert_eq!(pool.stats().idle(), 0);
}

#[test]
fn pool_enforces_live_budget() {
  let mut pool = Pool::<u32>::with_options(PoolOptions::new().with_max_live(Some(2)));
  let a = pool.reserve(4).unwrap();
  let _b = pool.reserve(4).unwrap();
  assert_eq!(
    pool.reserve(4).unwrap_err(),
    Error::Exhausted { live: 2, limit: 2 }
  );

  pool.release(a);
  assert!(pool.reserve(4).is_ok());
}

#[test]
fn allocator_by_reference() {
  fn reserve_through<A: SegmentAllocator<u8>>(mut alloc: A) -> Block<u8> {
    alloc.reserve(5).unwrap()
  }

  let mut pool = Pool::new();
  let block = reserve_through(&mut pool);
  assert_eq!(block.len(), 5);
  assert_eq!(pool.stats().live(), 1);
}

#[test]
fn error_display() {
  let err = Error::BlockSize {
    expected: 4,
    found: 3,
  };
  assert_eq!(
    std::format!("{err}"),
    "Allocation failed: expected a segment block of 4 slots, but got 3"
  );
}
