use std::fmt;
use std::hash::Hash;

use ahash::{AHashMap as HashMap, RandomState};

use crate::codec::low_mask;
use crate::{Error, Result, VebSet};

/// Forward map from a key into the `[0, 2^width)` universe.
pub trait KeyHasher<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

impl<K: ?Sized, F: Fn(&K) -> u64> KeyHasher<K> for F {
    #[inline(always)]
    fn hash_key(&self, key: &K) -> u64 {
        self(key)
    }
}

const SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

/// `ahash` with fixed seeds, truncated to the universe width. The same key
/// always lands on the same value, across sets and runs.
#[derive(Clone, Debug)]
pub struct SeededHash {
    state: RandomState,
    mask: u64,
}

impl SeededHash {
    pub fn new(width: u32) -> Self {
        let [k0, k1, k2, k3] = SEEDS;
        Self {
            state: RandomState::with_seeds(k0, k1, k2, k3),
            mask: low_mask(width),
        }
    }
}

impl<K: Hash + ?Sized> KeyHasher<K> for SeededHash {
    #[inline(always)]
    fn hash_key(&self, key: &K) -> u64 {
        self.state.hash_one(key) & self.mask
    }
}

/// Ordered set of arbitrary keys, ordered by their hash.
///
/// Each key occupies the membership bit of its hash in an underlying
/// [`VebSet`]; a reverse table maps hashes back to the stored keys so that
/// `min`, `max`, `succ` and `pred` return the keys themselves. Keys with equal
/// hashes are indistinguishable: the first one inserted is kept.
pub struct KeyedSet<K, H = SeededHash> {
    set: VebSet,
    hasher: H,
    keys: HashMap<u64, K>,
}

impl<K: Hash> KeyedSet<K, SeededHash> {
    pub fn with_ahash(width: u32) -> Result<Self> {
        Self::new(width, SeededHash::new(width))
    }
}

impl<K, H: KeyHasher<K>> KeyedSet<K, H> {
    pub fn new(width: u32, hasher: H) -> Result<Self> {
        Ok(KeyedSet {
            set: VebSet::new(width)?,
            hasher,
            keys: HashMap::new(),
        })
    }

    #[inline(always)]
    pub fn hash_of(&self, key: &K) -> u64 {
        self.hasher.hash_key(key)
    }

    #[inline(always)]
    pub fn width(&self) -> u32 {
        self.set.width()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Adds `key`; `Ok(false)` if its hash is already taken.
    pub fn insert(&mut self, key: K) -> Result<bool> {
        let hash = self.hash_of(&key);
        if !self.set.insert(hash)? {
            #[cfg(feature = "tracing")]
            tracing::debug!(hash, "hash already present, keeping the stored key");
            return Ok(false);
        }
        self.keys.insert(hash, key);
        Ok(true)
    }

    /// Removes the key stored under `key`'s hash and hands it back.
    pub fn remove(&mut self, key: &K) -> Result<K> {
        let hash = self.hash_of(key);
        self.set.remove(hash)?;
        self.keys.remove(&hash).ok_or(Error::NotFound(hash))
    }

    #[inline(always)]
    pub fn contains(&self, key: &K) -> Result<bool> {
        self.set.contains(self.hash_of(key))
    }

    #[inline(always)]
    pub fn min(&self) -> Option<&K> {
        self.set.min().and_then(|hash| self.keys.get(&hash))
    }

    #[inline(always)]
    pub fn max(&self) -> Option<&K> {
        self.set.max().and_then(|hash| self.keys.get(&hash))
    }

    #[inline(always)]
    pub fn succ(&self, key: &K) -> Result<Option<&K>> {
        let next = self.set.succ(self.hash_of(key))?;
        Ok(next.and_then(|hash| self.keys.get(&hash)))
    }

    #[inline(always)]
    pub fn pred(&self, key: &K) -> Result<Option<&K>> {
        let prev = self.set.pred(self.hash_of(key))?;
        Ok(prev.and_then(|hash| self.keys.get(&hash)))
    }

    /// Keys in ascending hash order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.set.iter().filter_map(|hash| self.keys.get(&hash))
    }
}

impl<K: fmt::Debug, H: KeyHasher<K>> fmt::Debug for KeyedSet<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
