use super::*;

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

#[derive(Debug, Clone)]
enum Op {
    Insert(u64),
    Remove(u64),
    Contains(u64),
    Succ(u64),
    Pred(u64),
}

fn ops_strategy(width: u32, len: usize) -> impl Strategy<Value = Vec<Op>> {
    let mask = low_mask(width);
    let value = any::<u64>().prop_map(move |v| v & mask);
    let op = prop_oneof![
        40 => value.clone().prop_map(Op::Insert),
        25 => value.clone().prop_map(Op::Remove),
        15 => value.clone().prop_map(Op::Contains),
        10 => value.clone().prop_map(Op::Succ),
        10 => value.clone().prop_map(Op::Pred),
    ];
    prop::collection::vec(op, 0..=len)
}

fn narrow_case() -> impl Strategy<Value = (u32, Vec<Op>)> {
    (1u32..=12).prop_flat_map(|width| (Just(width), ops_strategy(width, 400)))
}

fn wide_case() -> impl Strategy<Value = (u32, Vec<Op>)> {
    prop_oneof![Just(33u32), Just(37), Just(48), Just(64)]
        .prop_flat_map(|width| (Just(width), ops_strategy(width, 200)))
}

fn run_against_btree(width: u32, ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut set = VebSet::new(width).unwrap();
    let mut model: BTreeSet<u64> = BTreeSet::new();

    for op in ops {
        match op {
            Op::Insert(v) => {
                prop_assert_eq!(set.insert(v), Ok(model.insert(v)));
            }
            Op::Remove(v) => {
                let expected = if model.remove(&v) {
                    Ok(())
                } else {
                    Err(Error::NotFound(v))
                };
                prop_assert_eq!(set.remove(v), expected);
            }
            Op::Contains(v) => {
                prop_assert_eq!(set.contains(v), Ok(model.contains(&v)));
            }
            Op::Succ(v) => {
                let expected = model.range((Excluded(v), Unbounded)).next().copied();
                prop_assert_eq!(set.succ(v), Ok(expected));
            }
            Op::Pred(v) => {
                let expected = model.range(..v).next_back().copied();
                prop_assert_eq!(set.pred(v), Ok(expected));
            }
        }

        prop_assert_eq!(set.len(), model.len());
        prop_assert_eq!(set.min(), model.first().copied());
        prop_assert_eq!(set.max(), model.last().copied());
    }

    let stored = set.root.validate();
    prop_assert!(stored.iter().eq(model.iter()));
    prop_assert!(set.iter().eq(model.iter().copied()));
    prop_assert!(set.iter().rev().eq(model.iter().rev().copied()));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_narrow((width, ops) in narrow_case()) {
        run_against_btree(width, ops)?;
    }

    #[test]
    fn prop_equivalence_wide((width, ops) in wide_case()) {
        run_against_btree(width, ops)?;
    }

    #[test]
    fn prop_invariants_hold_after_every_op((width, ops) in narrow_case()) {
        let mut set = VebSet::new(width).unwrap();
        for op in ops {
            match op {
                Op::Insert(v) => {
                    let _ = set.insert(v);
                }
                Op::Remove(v) => {
                    let _ = set.remove(v);
                }
                _ => {}
            }
            prop_assert_eq!(set.root.validate().len(), set.len());
        }
    }

    #[test]
    fn prop_drain_in_any_order(values in prop::collection::btree_set(0u64..(1 << 16), 0..300), seed in any::<u64>()) {
        let mut set = VebSet::new(16).unwrap();
        for &v in &values {
            set.insert(v).unwrap();
        }
        let mut order: Vec<u64> = values.into_iter().collect();
        let len = order.len();
        for i in 0..len {
            let j = i + (seed.wrapping_mul(i as u64 + 1) as usize) % (len - i);
            order.swap(i, j);
        }
        for v in order {
            set.remove(v).unwrap();
            prop_assert_eq!(set.contains(v), Ok(false));
        }
        prop_assert!(set.is_empty());
        prop_assert_eq!((set.min(), set.max()), (None, None));
        prop_assert!(set.root.validate().is_empty());
    }
}
