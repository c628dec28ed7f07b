#![doc = include_str!("../README.md")]
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![deny(missing_docs)]

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("`unrolled` requires either the 'std' or 'alloc' feature to be enabled");

#[cfg(not(feature = "std"))]
extern crate alloc as std;

#[cfg(feature = "std")]
extern crate std;

pub use unrolled_allocator as allocator;
pub use unrolled_allocator::{Block, Heap, Pool, PoolOptions, SegmentAllocator};

#[macro_use]
mod navigate;

mod error;
pub use error::*;

mod options;
pub use options::*;

mod segment;
pub use segment::SegmentId;
use segment::{Chain, Segment};

mod position;
pub use position::*;

mod iter;
pub use iter::*;

mod framer;
pub use framer::*;

mod mutate;

mod rebalance;
pub use rebalance::*;

mod search;
