use rand::{rngs::StdRng, Rng, SeedableRng};

use super::*;

/// A framer driven alongside a plain vector and a cursor offset.
struct Model {
  framer: Framer<u32>,
  items: Vec<u32>,
  offset: usize,
}

impl Model {
  fn new(capacity: usize) -> Self {
    Self {
      framer: framer(capacity),
      items: Vec::new(),
      offset: 0,
    }
  }

  fn insert(&mut self, item: u32) {
    self.framer.insert(item).unwrap();
    self.items.insert(self.offset, item);
  }

  fn append(&mut self, item: u32) {
    self.framer.append(item).unwrap();
    if self.items.is_empty() {
      self.items.push(item);
    } else {
      self.offset += 1;
      self.items.insert(self.offset, item);
    }
  }

  fn delete(&mut self, even: bool) {
    let removed = if even {
      self.framer.delete_even()
    } else {
      self.framer.delete()
    };
    if self.items.is_empty() {
      assert_eq!(removed, None);
      return;
    }
    assert_eq!(removed, Some(self.items.remove(self.offset)));
    if self.offset == self.items.len() && self.offset > 0 {
      self.offset -= 1;
    }
  }

  fn push(&mut self, item: u32) {
    self.framer.push(item).unwrap();
    self.items.push(item);
    self.offset = self.items.len() - 1;
  }

  fn pop(&mut self) {
    assert_eq!(self.framer.pop().ok(), self.items.pop());
    self.offset = self.items.len().saturating_sub(1);
  }

  fn forward(&mut self, n: usize) {
    let expected = if self.offset + n < self.items.len() { n } else { 0 };
    assert_eq!(self.framer.next_n(n), expected);
    self.offset += expected;
  }

  fn backward(&mut self, n: usize) {
    let expected = if n <= self.offset { n } else { 0 };
    assert_eq!(self.framer.prev_n(n), expected);
    self.offset -= expected;
  }

  fn check(&self) {
    self.framer.verify();
    assert_eq!(self.framer.len(), self.items.len());
    assert_eq!(offset(&self.framer), self.offset);
    assert_eq!(items(&self.framer), self.items);
  }
}

fn workload(capacity: usize) {
  let mut rng = StdRng::seed_from_u64(capacity as u64);
  let mut model = Model::new(capacity);

  for _ in 0..4000 {
    match rng.random_range(0..10) {
      0..=2 => model.insert(rng.random_range(0..1000)),
      3 => model.append(rng.random_range(0..1000)),
      4 => model.delete(false),
      5 => model.delete(true),
      6 if model.framer.at_end() => {
        if !model.items.is_empty() && rng.random_bool(0.4) {
          model.pop();
        } else {
          model.push(rng.random_range(0..1000));
        }
      }
      6 => assert_eq!(model.framer.push(0), Err(Error::NotAtEnd)),
      7 => {
        let n = rng.random_range(0..2 * capacity + 3);
        if rng.random_bool(0.5) {
          model.forward(n);
        } else {
          model.backward(n);
        }
      }
      8 => {
        let limit = rng.random_range(1..=capacity);
        if model.framer.pack(limit) == Pack::Packed {
          let packed = fills(&model.framer);
          assert!(packed[..packed.len() - 1].iter().all(|&used| used >= limit));
        }
      }
      _ => {
        if model.framer.even() == Even::Rebalanced {
          // both segments of the pair end at least half full
          let half = capacity.div_ceil(2);
          let chain = &model.framer.chain;
          let segment = &chain[model.framer.pos.segment];
          let peer = segment.next.or(segment.prev).map(|id| chain[id].used);
          assert!(segment.used >= half);
          assert!(peer.is_some_and(|used| used >= half));
        }
      }
    }
    model.check();
  }
}

fn fill_then_drain(capacity: usize) {
  let mut rng = StdRng::seed_from_u64(0x5eed ^ capacity as u64);
  let mut model = Model::new(capacity);

  for i in 0..500 {
    let len = model.items.len();
    model.framer.to_first();
    model.offset = 0;
    model.forward(rng.random_range(0..len.max(1)));
    model.insert(i);
  }
  model.check();

  while !model.items.is_empty() {
    let len = model.items.len();
    model.framer.to_first();
    model.offset = 0;
    model.forward(rng.random_range(0..len));
    model.delete(true);
    model.check();
  }
  assert_eq!(model.framer.node_count(), 1);
  assert!(model.framer.is_empty());
}

capacity_tests!(workload, fill_then_drain);
