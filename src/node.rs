use ahash::AHashMap as HashMap;

use crate::DENSE_CLUSTER_BITS;
use crate::codec::Split;
#[cfg(test)]
use crate::codec::low_mask;
use crate::leaf::LeafCell;

const OUT_OF_SYNC: &str = "summary and clusters out of sync";

/// A set over a `width`-bit universe: either the width-1 terminal cell or a
/// recursive branch.
#[derive(Debug)]
pub(crate) enum Node {
    Leaf(LeafCell),
    Branch(Box<Branch>),
}

impl Node {
    pub fn new(width: u32) -> Self {
        if width == 1 {
            Node::Leaf(LeafCell::Empty)
        } else {
            Node::Branch(Box::new(Branch::new(Split::new(width))))
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Leaf(leaf) => leaf.is_empty(),
            Node::Branch(branch) => branch.min.is_none(),
        }
    }

    #[inline(always)]
    pub fn insert(&mut self, x: u64) {
        match self {
            Node::Leaf(leaf) => leaf.insert(x),
            Node::Branch(branch) => branch.insert(x),
        }
    }

    /// `x` must be a member; callers check first.
    #[inline(always)]
    pub fn remove(&mut self, x: u64) {
        match self {
            Node::Leaf(leaf) => leaf.remove(x),
            Node::Branch(branch) => branch.remove(x),
        }
    }

    #[inline(always)]
    pub fn contains(&self, x: u64) -> bool {
        match self {
            Node::Leaf(leaf) => leaf.contains(x),
            Node::Branch(branch) => branch.contains(x),
        }
    }

    #[inline(always)]
    pub fn min(&self) -> Option<u64> {
        match self {
            Node::Leaf(leaf) => leaf.min(),
            Node::Branch(branch) => branch.min,
        }
    }

    #[inline(always)]
    pub fn max(&self) -> Option<u64> {
        match self {
            Node::Leaf(leaf) => leaf.max(),
            Node::Branch(branch) => branch.max,
        }
    }

    #[inline(always)]
    pub fn succ(&self, x: u64) -> Option<u64> {
        match self {
            Node::Leaf(leaf) => leaf.succ(x),
            Node::Branch(branch) => branch.succ(x),
        }
    }

    #[inline(always)]
    pub fn pred(&self, x: u64) -> Option<u64> {
        match self {
            Node::Leaf(leaf) => leaf.pred(x),
            Node::Branch(branch) => branch.pred(x),
        }
    }
}

/// Cluster slots indexed by high bits. Narrow branches use a dense table that
/// is sized on first insert; wide ones key a map by the high bits instead of
/// reserving `2^cluster_bits` slots up front. Slots are never freed.
#[derive(Debug)]
enum Clusters {
    Dense(Vec<Option<Node>>),
    Sparse(HashMap<u64, Node>),
}

impl Clusters {
    fn new(split: Split) -> Self {
        if split.cluster_bits() <= DENSE_CLUSTER_BITS {
            Clusters::Dense(Vec::new())
        } else {
            Clusters::Sparse(HashMap::new())
        }
    }

    #[inline(always)]
    fn get(&self, high: u64) -> Option<&Node> {
        match self {
            Clusters::Dense(slots) => slots.get(high as usize)?.as_ref(),
            Clusters::Sparse(map) => map.get(&high),
        }
    }

    #[inline(always)]
    fn get_mut(&mut self, high: u64) -> Option<&mut Node> {
        match self {
            Clusters::Dense(slots) => slots.get_mut(high as usize)?.as_mut(),
            Clusters::Sparse(map) => map.get_mut(&high),
        }
    }

    #[inline(always)]
    fn get_or_create(&mut self, high: u64, split: Split) -> &mut Node {
        match self {
            Clusters::Dense(slots) => {
                if slots.is_empty() {
                    slots.resize_with(1usize << split.cluster_bits(), || None);
                }
                slots[high as usize].get_or_insert_with(|| Node::new(split.element_bits()))
            }
            Clusters::Sparse(map) => map
                .entry(high)
                .or_insert_with(|| Node::new(split.element_bits())),
        }
    }

    #[cfg(test)]
    fn iter(&self) -> Box<dyn Iterator<Item = (u64, &Node)> + '_> {
        match self {
            Clusters::Dense(slots) => Box::new(
                slots
                    .iter()
                    .enumerate()
                    .filter_map(|(high, slot)| slot.as_ref().map(|node| (high as u64, node))),
            ),
            Clusters::Sparse(map) => Box::new(map.iter().map(|(&high, node)| (high, node))),
        }
    }
}

/// Recursive van Emde Boas node of width >= 2.
///
/// `min` is cached and never stored in the clusters; every other member `x`
/// lives as `low(x)` inside `clusters[high(x)]`, and `summary` holds exactly
/// the indices of the non-empty clusters.
#[derive(Debug)]
pub(crate) struct Branch {
    split: Split,
    min: Option<u64>,
    max: Option<u64>,
    summary: Option<Node>,
    clusters: Clusters,
}

impl Branch {
    fn new(split: Split) -> Self {
        Self {
            split,
            min: None,
            max: None,
            summary: None,
            clusters: Clusters::new(split),
        }
    }

    fn insert(&mut self, mut x: u64) {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            self.min = Some(x);
            self.max = Some(x);
            return;
        };
        // The minimum must stay out of the clusters, or removing it would
        // promote itself.
        if x == min {
            return;
        }
        if x < min {
            self.min = Some(x);
            x = min;
        }
        if x > max {
            self.max = Some(x);
        }

        let split = self.split;
        let (high, low) = split.split(x);
        let cluster = self.clusters.get_or_create(high, split);
        if cluster.is_empty() {
            self.summary
                .get_or_insert_with(|| Node::new(split.cluster_bits()))
                .insert(high);
        }
        cluster.insert(low);
    }

    fn remove(&mut self, mut x: u64) {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return;
        };
        if min == max {
            self.min = None;
            self.max = None;
            return;
        }

        let split = self.split;
        if x == min {
            let first = self.summary.as_ref().and_then(Node::min).expect(OUT_OF_SYNC);
            let offset = self.clusters.get(first).and_then(Node::min).expect(OUT_OF_SYNC);
            x = split.combine(first, offset);
            self.min = Some(x);
        }

        let (high, low) = split.split(x);
        let cluster = self.clusters.get_mut(high).expect(OUT_OF_SYNC);
        cluster.remove(low);

        match cluster.max() {
            None => {
                let summary = self.summary.as_mut().expect(OUT_OF_SYNC);
                summary.remove(high);
                if x == max {
                    self.max = match summary.max() {
                        None => self.min,
                        Some(last) => {
                            let offset = self.clusters.get(last).and_then(Node::max);
                            Some(split.combine(last, offset.expect(OUT_OF_SYNC)))
                        }
                    };
                }
            }
            Some(offset) => {
                if x == max {
                    self.max = Some(split.combine(high, offset));
                }
            }
        }
    }

    fn contains(&self, x: u64) -> bool {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return false;
        };
        if x == min || x == max {
            return true;
        }
        if x < min || x > max {
            return false;
        }
        let (high, low) = self.split.split(x);
        self.clusters.get(high).is_some_and(|cluster| cluster.contains(low))
    }

    fn succ(&self, x: u64) -> Option<u64> {
        let min = self.min?;
        if x < min {
            return Some(min);
        }

        let (high, low) = self.split.split(x);
        if let Some(cluster) = self.clusters.get(high) {
            if cluster.max().is_some_and(|offset| low < offset) {
                let offset = cluster.succ(low).expect(OUT_OF_SYNC);
                return Some(self.split.combine(high, offset));
            }
        }

        let next = self.summary.as_ref()?.succ(high)?;
        let offset = self.clusters.get(next).and_then(Node::min).expect(OUT_OF_SYNC);
        Some(self.split.combine(next, offset))
    }

    fn pred(&self, x: u64) -> Option<u64> {
        let max = self.max?;
        if x > max {
            return Some(max);
        }

        let (high, low) = self.split.split(x);
        if let Some(cluster) = self.clusters.get(high) {
            if cluster.min().is_some_and(|offset| low > offset) {
                let offset = cluster.pred(low).expect(OUT_OF_SYNC);
                return Some(self.split.combine(high, offset));
            }
        }

        if let Some(prev) = self.summary.as_ref().and_then(|summary| summary.pred(high)) {
            let offset = self.clusters.get(prev).and_then(Node::max).expect(OUT_OF_SYNC);
            return Some(self.split.combine(prev, offset));
        }

        // The cached minimum is not stored in any cluster.
        self.min.filter(|&min| min < x)
    }
}

#[cfg(test)]
impl Node {
    /// Walks the whole subtree, asserting the cached extrema, the summary and
    /// the minimum elision, and returns the members in ascending order.
    pub(crate) fn validate(&self) -> Vec<u64> {
        match self {
            Node::Leaf(leaf) => (0..=1).filter(|&v| leaf.contains(v)).collect(),
            Node::Branch(branch) => branch.validate(),
        }
    }

    /// Dense cluster slots reserved beneath and including this node.
    pub(crate) fn dense_slots(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch(branch) => {
                let own = match &branch.clusters {
                    Clusters::Dense(slots) => slots.len(),
                    Clusters::Sparse(_) => 0,
                };
                own + branch.summary.as_ref().map_or(0, Node::dense_slots)
                    + branch
                        .clusters
                        .iter()
                        .map(|(_, cluster)| cluster.dense_slots())
                        .sum::<usize>()
            }
        }
    }

    /// Number of nodes allocated beneath and including this one.
    pub(crate) fn allocated(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Branch(branch) => {
                1 + branch.summary.as_ref().map_or(0, Node::allocated)
                    + branch
                        .clusters
                        .iter()
                        .map(|(_, cluster)| cluster.allocated())
                        .sum::<usize>()
            }
        }
    }
}

#[cfg(test)]
impl Branch {
    fn validate(&self) -> Vec<u64> {
        let summary = self.summary.as_ref().map(Node::validate).unwrap_or_default();
        let mut members = Vec::new();
        for (high, cluster) in self.clusters.iter() {
            let lows = cluster.validate();
            assert_eq!(
                !lows.is_empty(),
                summary.contains(&high),
                "summary disagrees with cluster {high}"
            );
            assert_eq!(cluster.min(), lows.first().copied());
            assert_eq!(cluster.max(), lows.last().copied());
            members.extend(lows.into_iter().map(|low| self.split.combine(high, low)));
        }
        for &high in &summary {
            assert!(
                self.clusters.get(high).is_some_and(|cluster| !cluster.is_empty()),
                "summary lists empty cluster {high}"
            );
        }

        let Some(min) = self.min else {
            assert!(self.max.is_none(), "max cached on an empty node");
            assert!(members.is_empty(), "empty node with stored clusters");
            assert!(summary.is_empty(), "empty node with non-empty summary");
            return members;
        };

        members.sort_unstable();
        assert!(
            members.first().is_none_or(|&first| first > min),
            "minimum {min} is physically stored"
        );
        members.insert(0, min);
        assert_eq!(self.max, members.last().copied());
        let mask = low_mask(self.split.width());
        assert!(members.iter().all(|&x| x & !mask == 0), "member outside universe");
        members
    }
}
