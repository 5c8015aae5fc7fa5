//! Property tests for reference-count bookkeeping and exactly-once frees.

use crab_own::{ExclusiveOwner, SharedOwner};
use crab_test_utils::{DropCounter, Tracked};
use proptest::prelude::*;

/// One step applied to a pool of handles from a single lineage.
#[derive(Clone, Debug)]
enum Op {
    /// Clone the handle at this index (modulo pool size).
    Clone(usize),
    /// Drop the handle at this index (modulo pool size).
    Drop(usize),
    /// Move the handle at this index to the end of the pool.
    Move(usize),
    /// Overwrite the handle at `0` with a clone of the handle at `1`.
    Assign(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<usize>().prop_map(Op::Clone),
        any::<usize>().prop_map(Op::Drop),
        any::<usize>().prop_map(Op::Move),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Assign(a, b)),
    ]
}

proptest! {
    #[test]
    fn count_tracks_live_handles(ops in proptest::collection::vec(arb_op(), 0..64)) {
        let drops = DropCounter::new();
        let mut pool: Vec<SharedOwner<Tracked<u32>>> = vec![SharedOwner::new(drops.track(0))];

        for op in ops {
            if pool.is_empty() {
                break;
            }
            let len = pool.len();
            match op {
                Op::Clone(i) => {
                    let copy = pool[i % len].clone();
                    pool.push(copy);
                }
                Op::Drop(i) => {
                    drop(pool.swap_remove(i % len));
                }
                Op::Move(i) => {
                    let moved = pool.remove(i % len);
                    pool.push(moved);
                }
                Op::Assign(to, from) => {
                    pool[to % len] = pool[from % len].clone();
                }
            }
            if let Some(first) = pool.first() {
                prop_assert_eq!(SharedOwner::count(first), pool.len());
                prop_assert_eq!(drops.count(), 0);
            }
        }

        drop(pool);
        prop_assert_eq!(drops.count(), 1);
    }

    #[test]
    fn exclusive_chain_of_moves_frees_once(hops in 0usize..32, unwrap_at_end in any::<bool>()) {
        let drops = DropCounter::new();
        let mut owner = ExclusiveOwner::make(drops.track(hops));
        let addr = ExclusiveOwner::as_ptr(&owner);
        for _ in 0..hops {
            let next = owner;
            owner = next;
        }
        prop_assert_eq!(ExclusiveOwner::as_ptr(&owner), addr);
        prop_assert_eq!(drops.count(), 0);

        if unwrap_at_end {
            let raw = ExclusiveOwner::unwrap(owner);
            prop_assert_eq!(drops.count(), 0);
            // SAFETY: `raw` came from `unwrap` and is reclaimed once.
            drop(unsafe { ExclusiveOwner::<Tracked<usize>>::wrap_unchecked(raw) });
        } else {
            drop(owner);
        }
        prop_assert_eq!(drops.count(), 1);
    }

    #[test]
    fn array_indices_below_len_are_valid(len in 1usize..64, fill in any::<i16>()) {
        let owner = ExclusiveOwner::<[i16]>::make_array_filled(len, &fill);
        prop_assert_eq!(owner.len(), len);
        for i in 0..len {
            prop_assert_eq!(owner[i], fill);
        }
    }
}
