/// Width-1 terminal set over `{0, 1}`.
///
/// Every operation is a single match on the state. Values other than 0 and 1
/// never reach a leaf: the root rejects them and branches mask to one bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LeafCell {
    #[default]
    Empty,
    Zero,
    One,
    Both,
}

impl LeafCell {
    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self == LeafCell::Empty
    }

    #[inline(always)]
    pub fn insert(&mut self, value: u64) {
        debug_assert!(value <= 1, "leaf value {value} wider than one bit");
        *self = match (*self, value) {
            (LeafCell::Empty, 0) => LeafCell::Zero,
            (LeafCell::Empty, _) => LeafCell::One,
            (LeafCell::Zero, 0) => LeafCell::Zero,
            (LeafCell::One, 0) | (LeafCell::Zero, _) => LeafCell::Both,
            (state, _) => state,
        };
    }

    #[inline(always)]
    pub fn remove(&mut self, value: u64) {
        debug_assert!(value <= 1, "leaf value {value} wider than one bit");
        *self = match (*self, value) {
            (LeafCell::Zero, 0) => LeafCell::Empty,
            (LeafCell::One, 1) => LeafCell::Empty,
            (LeafCell::Both, 0) => LeafCell::One,
            (LeafCell::Both, 1) => LeafCell::Zero,
            (state, _) => state,
        };
    }

    #[inline(always)]
    pub fn contains(self, value: u64) -> bool {
        match self {
            LeafCell::Empty => false,
            LeafCell::Zero => value == 0,
            LeafCell::One => value == 1,
            LeafCell::Both => value <= 1,
        }
    }

    #[inline(always)]
    pub fn min(self) -> Option<u64> {
        match self {
            LeafCell::Empty => None,
            LeafCell::Zero | LeafCell::Both => Some(0),
            LeafCell::One => Some(1),
        }
    }

    #[inline(always)]
    pub fn max(self) -> Option<u64> {
        match self {
            LeafCell::Empty => None,
            LeafCell::Zero => Some(0),
            LeafCell::One | LeafCell::Both => Some(1),
        }
    }

    #[inline(always)]
    pub fn succ(self, value: u64) -> Option<u64> {
        match self {
            LeafCell::One | LeafCell::Both if value == 0 => Some(1),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn pred(self, value: u64) -> Option<u64> {
        match self {
            LeafCell::Zero | LeafCell::Both if value == 1 => Some(0),
            _ => None,
        }
    }
}
