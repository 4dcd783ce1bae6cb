//! Property tests for the `Any` container.

use std::any::TypeId;

use anyhold::{Any, markers::NoType};
use proptest::prelude::*;

/// A model of what a container should hold.
#[derive(Clone, Debug, PartialEq)]
enum Held {
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
}

impl Held {
    fn store(&self) -> Any {
        match self {
            Held::Int(v) => Any::new(*v),
            Held::Text(v) => Any::new(v.clone()),
            Held::Bytes(v) => Any::new(v.clone()),
        }
    }

    fn type_id(&self) -> TypeId {
        match self {
            Held::Int(_) => TypeId::of::<i64>(),
            Held::Text(_) => TypeId::of::<String>(),
            Held::Bytes(_) => TypeId::of::<Vec<u8>>(),
        }
    }

    fn matches(&self, any: &Any) -> bool {
        match self {
            Held::Int(v) => any.downcast_ref::<i64>() == Ok(v),
            Held::Text(v) => any.downcast_ref::<String>() == Ok(v),
            Held::Bytes(v) => any.downcast_ref::<Vec<u8>>() == Ok(v),
        }
    }
}

#[derive(Clone, Debug)]
enum Op {
    Set(Held),
    Emplace(Held),
    Reset,
    SwapWithFresh(Option<Held>),
    Take,
    CloneFrom(Option<Held>),
}

fn held() -> impl Strategy<Value = Held> {
    prop_oneof![
        any::<i64>().prop_map(Held::Int),
        ".{0,16}".prop_map(Held::Text),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Held::Bytes),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        held().prop_map(Op::Set),
        held().prop_map(Op::Emplace),
        Just(Op::Reset),
        prop::option::of(held()).prop_map(Op::SwapWithFresh),
        Just(Op::Take),
        prop::option::of(held()).prop_map(Op::CloneFrom),
    ]
}

fn store(held: &Option<Held>) -> Any {
    held.as_ref().map_or_else(Any::empty, Held::store)
}

fn assert_consistent(any: &Any, model: &Option<Held>) -> Result<(), TestCaseError> {
    prop_assert_eq!(any.has_value(), any.type_id() != TypeId::of::<NoType>());
    match model {
        Some(held) => {
            prop_assert!(held.matches(any));
            prop_assert_eq!(any.type_id(), held.type_id());
        }
        None => {
            prop_assert!(!any.has_value());
            prop_assert!(any.downcast_ref::<i64>().is_err());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn stored_value_round_trips(held in held()) {
        let any = held.store();
        prop_assert!(held.matches(&any));
        prop_assert!(held.matches(&any.clone()));
    }

    #[test]
    fn mismatched_types_always_fail(held in held()) {
        let any = held.store();
        let hits = [
            any.downcast_ref::<i64>().is_ok(),
            any.downcast_ref::<String>().is_ok(),
            any.downcast_ref::<Vec<u8>>().is_ok(),
            any.downcast_ref::<u8>().is_ok(),
            any.downcast_ref::<()>().is_ok(),
        ];
        prop_assert_eq!(hits.iter().filter(|hit| **hit).count(), 1);

        let err = any.downcast_ref::<u8>().unwrap_err();
        prop_assert_eq!(err.requested(), "u8");
        prop_assert_eq!(err.held(), any.type_name());
    }

    #[test]
    fn clones_are_independent(held in held(), other in held()) {
        let mut original = held.store();
        let copy = original.clone();

        original.clone_from(&other.store());
        prop_assert!(other.matches(&original));
        drop(original);

        prop_assert!(held.matches(&copy));
    }

    #[test]
    fn take_moves_value_and_empties_source(model in prop::option::of(held())) {
        let mut source = store(&model);
        let target = source.take();

        assert_consistent(&target, &model)?;
        assert_consistent(&source, &None)?;
    }

    #[test]
    fn swap_is_symmetric(a in prop::option::of(held()), b in prop::option::of(held())) {
        let mut left = store(&a);
        let mut right = store(&b);

        left.swap(&mut right);
        assert_consistent(&left, &b)?;
        assert_consistent(&right, &a)?;

        right.swap(&mut left);
        assert_consistent(&left, &a)?;
        assert_consistent(&right, &b)?;
    }

    #[test]
    fn every_reachable_state_is_consistent(ops in prop::collection::vec(op(), 0..32)) {
        let mut any = Any::empty();
        let mut model: Option<Held> = None;

        for op in ops {
            match op {
                Op::Set(held) => {
                    match &held {
                        Held::Int(v) => any.set(*v),
                        Held::Text(v) => any.set(v.clone()),
                        Held::Bytes(v) => any.set(v.clone()),
                    }
                    model = Some(held);
                }
                Op::Emplace(held) => {
                    match &held {
                        Held::Int(v) => *any.emplace::<i64, _>(*v) += 0,
                        Held::Text(v) => any.emplace::<String, _>(v.as_str()).push_str(""),
                        Held::Bytes(v) => any.emplace_from_iter::<Vec<u8>, _>(v.iter().copied()).shrink_to_fit(),
                    }
                    model = Some(held);
                }
                Op::Reset => {
                    any.reset();
                    model = None;
                }
                Op::SwapWithFresh(held) => {
                    let mut fresh = store(&held);
                    any.swap(&mut fresh);
                    assert_consistent(&fresh, &model)?;
                    model = held;
                }
                Op::Take => {
                    let taken = any.take();
                    assert_consistent(&taken, &model)?;
                    model = None;
                }
                Op::CloneFrom(held) => {
                    let source = store(&held);
                    any.clone_from(&source);
                    assert_consistent(&source, &held)?;
                    model = held;
                }
            }
            assert_consistent(&any, &model)?;
        }
    }
}
