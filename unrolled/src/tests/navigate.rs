use super::*;

#[test]
fn positions() {
  let limit = 12;
  let mut framer = pushed(4, limit as u32);

  framer.to_first();
  assert!(framer.at_first());
  assert!(!framer.at_last());
  assert_eq!(framer.tail_length(), limit);

  assert!(framer.move_next());
  assert!(!framer.at_first());
  assert!(!framer.at_last());
  assert_eq!(framer.tail_length(), limit - 1);

  framer.to_first();
  assert_eq!(framer.next_n(limit - 1), limit - 1);
  assert!(!framer.at_first());
  assert!(framer.at_last());
  assert_eq!(framer.tail_length(), 1);

  framer.to_first();
  framer.move_next();
  assert_eq!(framer.next_n(limit - 2), limit - 2);
  assert!(framer.at_last());

  assert!(!framer.move_next());
  assert!(framer.at_last());
  assert_eq!(framer.tail_length(), 1);

  framer.to_first();
  assert_eq!(framer.next_n(limit), 0);
  assert!(framer.at_first());
  assert_eq!(framer.tail_length(), limit);

  framer.to_last();
  assert!(!framer.at_first());
  assert!(framer.at_last());
  assert_eq!(framer.tail_length(), 1);

  assert!(framer.move_prev());
  assert!(!framer.at_last());
  assert_eq!(framer.tail_length(), 2);

  framer.to_last();
  assert_eq!(framer.prev_n(limit - 1), limit - 1);
  assert!(framer.at_first());
  assert_eq!(framer.tail_length(), limit);

  framer.to_last();
  framer.move_prev();
  assert_eq!(framer.prev_n(limit - 2), limit - 2);
  assert!(framer.at_first());
  assert!(!framer.move_prev());
  assert!(framer.at_first());

  framer.to_last();
  assert_eq!(framer.prev_n(limit), 0);
  assert!(framer.at_last());
  assert_eq!(framer.tail_length(), 1);
}

fn every_distance(capacity: usize) {
  let n = 5 * capacity + 3;
  let framer = pushed(capacity, n as u32);
  let first = framer.cursor().first();

  for start in 0..n {
    let mut from = first;
    assert_eq!(from.next_n(start), start);
    for step in 0..=n {
      let mut forward = from;
      if start + step < n {
        assert_eq!(forward.next_n(step), step);
        assert_eq!(forward.item(), Some((start + step) as u32));
      } else {
        assert_eq!(forward.next_n(step), 0);
        assert_eq!(forward.position(), from.position());
      }

      let mut backward = from;
      if step <= start {
        assert_eq!(backward.prev_n(step), step);
        assert_eq!(backward.item(), Some((start - step) as u32));
      } else {
        assert_eq!(backward.prev_n(step), 0);
        assert_eq!(backward.position(), from.position());
      }
    }
  }
}

capacity_tests!(every_distance);

#[test]
fn empty_chain_boundaries() {
  let mut framer = framer(4);
  assert!(framer.at_first());
  assert!(!framer.at_last());
  assert!(framer.at_end());
  assert!(!framer.move_next());
  assert!(!framer.move_prev());
  assert_eq!(framer.next_n(1), 0);
  assert_eq!(framer.prev_n(9), 0);
  assert_eq!(framer.tail_length(), 0);
  assert_eq!(framer.first(), framer.last());
  assert_eq!(framer.iter().next(), None);
}

#[test]
fn cursors_do_not_move_the_framer() {
  let mut framer = pushed(4, 10);
  framer.to_first();
  framer.next_n(2);

  let mut a = framer.cursor();
  let mut b = a.last();
  assert_eq!(a.next_n(3), 3);
  assert_eq!(b.prev_n(1), 1);
  assert_eq!(a.item(), Some(5));
  assert_eq!(b.item(), Some(8));
  assert_eq!(b.tail_length(), 2);
  assert_eq!(a.len(), 10);
  assert_eq!(a.node_count(), 3);
  assert_eq!(framer.item(), Some(2));

  let (a, b) = (a.position(), b.position());
  framer.set_position(a).unwrap();
  assert_eq!(framer.item(), Some(5));
  let c = framer.cursor_at(b).unwrap();
  assert_eq!(c.item(), Some(8));
  assert_eq!(c.index(), 0);
}

#[test]
fn next_item_walks_to_the_end() {
  let framer = pushed(4, 9);
  let mut cursor = framer.cursor().first();
  let mut seen = vec![cursor.item().unwrap()];
  while let Some(item) = cursor.next_item() {
    seen.push(item);
  }
  assert_eq!(seen, (0..9).collect::<Vec<_>>());
  assert!(cursor.at_last());
}

#[test]
fn iteration() {
  let mut framer = Framer::<u32>::new();
  framer.try_extend(0..16).unwrap();

  let mut i = 0;
  for item in &framer {
    assert_eq!(item, i);
    i += 1;
  }
  assert_eq!(i, 16);

  let mut cursor = framer.cursor().first();
  cursor.next_n(10);
  let iter = cursor.iter();
  assert_eq!(iter.clone().count(), 6);
  assert_eq!(iter.collect::<Vec<_>>(), (10..16).collect::<Vec<_>>());

  let mut iter = framer.iter();
  iter.by_ref().for_each(drop);
  assert_eq!(iter.next(), None);
  assert_eq!(iter.next(), None);
}
