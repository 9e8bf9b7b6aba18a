use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Delete the K from the tree
    Delete(K),
    /// Rebuild the tree if it's out of balance
    Rebalance,
    /// Compare iterators
    Iter,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are weighted up so that
    /// trees actually grow (and skew) between rebalances.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2, 3]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Delete(K::arbitrary(g)),
            2 => Op::Rebalance,
            3 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
