//! Van Emde Boas ordered set over fixed-width unsigned integers.
//!
//! Membership, insertion, removal, successor and predecessor cost
//! `O(log w)` recursive steps for a `w`-bit universe, independent of the
//! number of stored elements. `min` and `max` are cached.

use std::fmt;
use std::iter::FusedIterator;

mod codec;
mod error;
mod keyed;
mod leaf;
mod node;

pub use error::{Error, Result};
pub use keyed::{KeyHasher, KeyedSet, SeededHash};

use codec::low_mask;
use node::Node;

/// Widest supported universe: values are `u64`.
pub const MAX_WIDTH: u32 = 64;
/// Branches with at most this many cluster-index bits keep their clusters in a
/// dense table of `2^bits` slots; wider ones use a hash map keyed by index.
pub const DENSE_CLUSTER_BITS: u32 = 8;

/// Ordered set of the values in `[0, 2^width)`, checking every argument against the universe.
pub struct VebSet {
    width: u32,
    len: usize,
    root: Node,
}

impl VebSet {
    /// Creates an empty set over `[0, 2^width)`.
    pub fn new(width: u32) -> Result<Self> {
        if !(1..=MAX_WIDTH).contains(&width) {
            return Err(Error::InvalidWidth(width));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(width, "veb set created");

        Ok(VebSet {
            width,
            len: 0,
            root: Node::new(width),
        })
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Largest value the universe can hold.
    #[inline(always)]
    pub fn universe_max(&self) -> u64 {
        low_mask(self.width)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    fn check(&self, value: u64) -> Result<u64> {
        if value > self.universe_max() {
            #[cfg(feature = "tracing")]
            tracing::trace!(value, width = self.width, "value outside universe");
            return Err(Error::OutOfRange {
                value,
                width: self.width,
            });
        }
        Ok(value)
    }

    /// Adds `value`, returning whether it was newly inserted.
    #[inline(always)]
    pub fn insert(&mut self, value: u64) -> Result<bool> {
        let value = self.check(value)?;
        if self.root.contains(value) {
            return Ok(false);
        }
        self.root.insert(value);
        self.len += 1;
        Ok(true)
    }

    /// Removes `value`. Absent values are reported as [`Error::NotFound`] and
    /// leave the set untouched.
    #[inline(always)]
    pub fn remove(&mut self, value: u64) -> Result<()> {
        let value = self.check(value)?;
        if !self.root.contains(value) {
            return Err(Error::NotFound(value));
        }
        self.root.remove(value);
        self.len -= 1;
        Ok(())
    }

    #[inline(always)]
    pub fn contains(&self, value: u64) -> Result<bool> {
        Ok(self.root.contains(self.check(value)?))
    }

    #[inline(always)]
    pub fn min(&self) -> Option<u64> {
        self.root.min()
    }

    #[inline(always)]
    pub fn max(&self) -> Option<u64> {
        self.root.max()
    }

    /// Smallest member strictly greater than `value`.
    #[inline(always)]
    pub fn succ(&self, value: u64) -> Result<Option<u64>> {
        Ok(self.root.succ(self.check(value)?))
    }

    /// Largest member strictly smaller than `value`.
    #[inline(always)]
    pub fn pred(&self, value: u64) -> Result<Option<u64>> {
        Ok(self.root.pred(self.check(value)?))
    }

    /// Drops every node; the set keeps its width.
    pub fn clear(&mut self) {
        self.root = Node::new(self.width);
        self.len = 0;
    }

    /// Members in ascending order, walked with `succ` (and `pred` from the back).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            root: &self.root,
            front: self.root.min(),
            back: self.root.max(),
            remaining: self.len,
        }
    }
}

impl fmt::Debug for VebSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a VebSet {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Ascending iterator over a [`VebSet`], created by [`VebSet::iter`].
pub struct Iter<'a> {
    root: &'a Node,
    front: Option<u64>,
    back: Option<u64>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = u64;

    #[inline(always)]
    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front?;
        self.remaining -= 1;
        self.front = self.root.succ(current);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back?;
        self.remaining -= 1;
        self.back = self.root.pred(current);
        Some(current)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod proptests;

include!("tests.rs");
