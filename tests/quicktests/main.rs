mod tree;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Delete the K from the tree
    Delete(K),
    /// Rebuild the tree if it's out of balance
    Rebalance,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Delete(K::arbitrary(g)),
            2 => Op::Rebalance,
            _ => unreachable!(),
        }
    }
}
