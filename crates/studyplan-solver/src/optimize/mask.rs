//! Subset masks: bit `i` set means chapter `i` is in the subset.

use fixedbitset::FixedBitSet;

/// Operations the subset search needs from a mask representation.
///
/// `width` is the chapter count; bits at or above it are never set.
pub trait SubsetMask: Clone + Send + Sync {
    /// The empty subset.
    fn empty(width: usize) -> Self;

    /// Add chapter `bit`.
    fn insert(&mut self, bit: usize);

    /// `true` if chapter `bit` is in the subset.
    fn has(&self, bit: usize) -> bool;

    /// `(self & other) == self`.
    fn within(&self, other: &Self) -> bool;

    /// Step to the next subset in counting order.
    ///
    /// Returns `false` once every subset of `width` bits has been visited.
    fn advance(&mut self, width: usize) -> bool;
}

/// Single-word mask for fewer than 64 chapters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct WordMask(pub u64);

/// Widest chapter list [`WordMask`] can enumerate: `1 << width` must fit.
pub const WORD_MASK_MAX_WIDTH: usize = 63;

impl SubsetMask for WordMask {
    fn empty(_width: usize) -> Self {
        Self(0)
    }

    fn insert(&mut self, bit: usize) {
        self.0 |= 1_u64 << bit;
    }

    fn has(&self, bit: usize) -> bool {
        (self.0 >> bit) & 1 == 1
    }

    fn within(&self, other: &Self) -> bool {
        self.0 & other.0 == self.0
    }

    fn advance(&mut self, width: usize) -> bool {
        debug_assert!(width <= WORD_MASK_MAX_WIDTH);
        self.0 += 1;
        self.0 < 1_u64 << width
    }
}

impl SubsetMask for FixedBitSet {
    fn empty(width: usize) -> Self {
        Self::with_capacity(width)
    }

    fn insert(&mut self, bit: usize) {
        self.set(bit, true);
    }

    fn has(&self, bit: usize) -> bool {
        self.contains(bit)
    }

    fn within(&self, other: &Self) -> bool {
        self.is_subset(other)
    }

    // Ripple-carry increment; clearing every bit means the counter wrapped.
    fn advance(&mut self, width: usize) -> bool {
        for bit in 0..width {
            if self.contains(bit) {
                self.set(bit, false);
            } else {
                self.set(bit, true);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit_all<M: SubsetMask>(width: usize) -> Vec<Vec<usize>> {
        let mut mask = M::empty(width);
        let mut seen = Vec::new();
        loop {
            seen.push((0..width).filter(|&b| mask.has(b)).collect());
            if !mask.advance(width) {
                break;
            }
        }
        seen
    }

    #[test]
    fn word_mask_counts_through_every_subset() {
        let subsets = visit_all::<WordMask>(3);
        assert_eq!(subsets.len(), 8);
        assert_eq!(subsets[0], Vec::<usize>::new());
        assert_eq!(subsets[5], vec![0, 2]);
        assert_eq!(subsets[7], vec![0, 1, 2]);
    }

    #[test]
    fn bitset_visits_in_same_order_as_word() {
        assert_eq!(visit_all::<FixedBitSet>(4), visit_all::<WordMask>(4));
    }

    #[test]
    fn zero_width_has_single_empty_subset() {
        assert_eq!(visit_all::<WordMask>(0).len(), 1);
        assert_eq!(visit_all::<FixedBitSet>(0).len(), 1);
    }

    #[test]
    fn containment() {
        let mut req = WordMask::empty(4);
        req.insert(1);
        req.insert(3);
        assert!(req.within(&WordMask(0b1010)));
        assert!(req.within(&WordMask(0b1111)));
        assert!(!req.within(&WordMask(0b0010)));
        assert!(WordMask(0).within(&WordMask(0)));

        let mut big_req = <FixedBitSet as SubsetMask>::empty(70);
        big_req.insert(65);
        let mut subset = <FixedBitSet as SubsetMask>::empty(70);
        assert!(!big_req.within(&subset));
        SubsetMask::insert(&mut subset, 65);
        assert!(big_req.within(&subset));
    }

    #[test]
    fn bitset_counter_carries_across_words() {
        let width = 70;
        let mut mask = <FixedBitSet as SubsetMask>::empty(width);
        for bit in 0..64 {
            SubsetMask::insert(&mut mask, bit);
        }
        assert!(mask.advance(width));
        assert!(mask.has(64));
        assert!((0..64).all(|b| !mask.has(b)));
    }
}
