//! Counter core tests

use super::*;
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Counter whose callback records every value into a shared vector
fn recording(start: i32, trigger: i32) -> (PingPong<impl FnMut(i32)>, Rc<RefCell<Vec<i32>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut pp = PingPong::new(start, trigger);
    pp.set_callback(Some(move |v| sink.borrow_mut().push(v)));

    (pp, seen)
}

#[test]
fn test_new_counter() {
    let pp: PingPong = PingPong::new(5, 2);
    assert_eq!(pp.current(), 5);
    assert_eq!(pp.trigger(), 2);
    assert!(!pp.has_callback());
}

#[test]
fn test_reference_sequence() {
    let (mut pp, seen) = recording(0, 3);

    for _ in 0..11 {
        pp.ping();
    }

    assert_eq!(*seen.borrow(), vec![3, 6, 9]);
    assert_eq!(pp.current(), 11);
}

#[test]
fn test_zero_trigger_never_fires() {
    let (mut pp, seen) = recording(-10, 0);

    for _ in 0..50 {
        assert_eq!(pp.ping(), None);
    }

    assert!(seen.borrow().is_empty());
    assert_eq!(pp.current(), 40);
}

#[test]
fn test_negative_trigger() {
    let (mut pp, seen) = recording(-7, -2);

    for _ in 0..6 {
        pp.ping();
    }

    assert_eq!(*seen.borrow(), vec![-6, -4, -2]);
}

#[test]
fn test_wraps_on_overflow() {
    let (mut pp, seen) = recording(i32::MAX, 1);

    pp.ping();

    assert_eq!(pp.current(), i32::MIN);
    assert_eq!(*seen.borrow(), vec![i32::MIN]);
}

#[test]
fn test_min_value_with_minus_one_trigger() {
    let (mut pp, seen) = recording(i32::MAX, -1);

    assert_eq!(pp.ping(), Some(i32::MIN));
    assert_eq!(*seen.borrow(), vec![i32::MIN]);
}

#[test]
fn test_replace_callback_mid_sequence() {
    let first = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(RefCell::new(Vec::new()));

    let mut pp: PingPong<Box<dyn FnMut(i32)>> = PingPong::new(0, 2);

    let sink = Rc::clone(&first);
    pp.set_callback(Some(Box::new(move |v| sink.borrow_mut().push(v))));
    for _ in 0..4 {
        pp.ping();
    }

    let sink = Rc::clone(&second);
    let previous = pp.set_callback(Some(Box::new(move |v| sink.borrow_mut().push(v))));
    assert!(previous.is_some());
    for _ in 0..4 {
        pp.ping();
    }

    assert_eq!(*first.borrow(), vec![2, 4]);
    assert_eq!(*second.borrow(), vec![6, 8]);
}

#[test]
fn test_clear_callback() {
    let (mut pp, seen) = recording(0, 1);

    pp.ping();
    pp.set_callback(None);
    assert!(!pp.has_callback());

    // Still fires, nothing is dispatched
    assert_eq!(pp.ping(), Some(2));
    assert_eq!(pp.ping(), Some(3));

    assert_eq!(*seen.borrow(), vec![1]);
    assert_eq!(pp.current(), 3);
}

#[test]
fn test_set_callback_does_not_invoke() {
    let (pp, seen) = recording(2, 1);
    assert!(pp.has_callback());
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_drop_without_pings_has_no_effect() {
    let (pp, seen) = recording(0, 1);
    drop(pp);
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_advance_does_not_dispatch() {
    let (mut pp, seen) = recording(0, 2);

    assert_eq!(pp.advance(), None);
    assert_eq!(pp.advance(), Some(2));
    assert!(seen.borrow().is_empty());
}

extern "C" fn ignore(_value: i32) {}

#[test]
fn test_c_callback_type() {
    let mut pp: PingPong = PingPong::new(0, 1);
    pp.set_callback(Some(ignore as PongFn));

    assert_eq!(pp.ping(), Some(1));
    assert!(pp.callback().is_some());
}

#[test]
fn test_debug_output() {
    let pp: PingPong = PingPong::new(1, 4);
    let text = format!("{:?}", pp);
    assert!(text.contains("current: 1"));
    assert!(text.contains("has_callback: false"));
}

proptest! {
    #[test]
    fn prop_fires_on_multiples(start in -1000i32..1000, trigger in -50i32..50, n in 0usize..200) {
        prop_assume!(trigger != 0);

        let (mut pp, seen) = recording(start, trigger);
        for _ in 0..n {
            pp.ping();
        }

        let expected: Vec<i32> = (1..=n as i32)
            .map(|i| start + i)
            .filter(|v| v % trigger == 0)
            .collect();

        prop_assert_eq!(seen.borrow().clone(), expected);
        prop_assert_eq!(pp.current(), start + n as i32);
    }

    #[test]
    fn prop_zero_trigger_is_silent(start in any::<i32>(), n in 0usize..100) {
        let (mut pp, seen) = recording(start, 0);
        for _ in 0..n {
            prop_assert_eq!(pp.ping(), None);
        }
        prop_assert!(seen.borrow().is_empty());
    }
}
