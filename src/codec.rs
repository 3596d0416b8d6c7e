/// High/low decomposition of a `width`-bit value.
///
/// The high part (`cluster_bits = floor(width / 2)` bits) indexes a cluster and
/// is what the summary stores; the low part (`element_bits = ceil(width / 2)`
/// bits) is the value handed to that cluster. Both halves are narrower than
/// `width` for every `width >= 2`, so recursion bottoms out at width 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Split {
    cluster_bits: u8,
    element_bits: u8,
}

impl Split {
    #[inline(always)]
    pub fn new(width: u32) -> Self {
        assert!(
            (2..=crate::MAX_WIDTH).contains(&width),
            "split width {width} out of 2..={}",
            crate::MAX_WIDTH
        );
        Self {
            cluster_bits: (width / 2) as u8,
            element_bits: width.div_ceil(2) as u8,
        }
    }

    #[cfg(test)]
    pub fn width(self) -> u32 {
        self.cluster_bits() + self.element_bits()
    }

    /// Width of the summary, and the number of bits in a cluster index.
    #[inline(always)]
    pub fn cluster_bits(self) -> u32 {
        self.cluster_bits as u32
    }

    /// Width of every cluster.
    #[inline(always)]
    pub fn element_bits(self) -> u32 {
        self.element_bits as u32
    }

    #[inline(always)]
    pub fn high(self, x: u64) -> u64 {
        x >> self.element_bits
    }

    #[inline(always)]
    pub fn low(self, x: u64) -> u64 {
        x & low_mask(self.element_bits as u32)
    }

    #[inline(always)]
    pub fn split(self, x: u64) -> (u64, u64) {
        (self.high(x), self.low(x))
    }

    #[inline(always)]
    pub fn combine(self, high: u64, low: u64) -> u64 {
        (high << self.element_bits) | low
    }
}

/// Mask of the `bits` lowest bits; `bits == 64` yields `u64::MAX`.
#[inline(always)]
pub(crate) fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}
