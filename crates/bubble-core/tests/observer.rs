// File: crates/bubble-core/tests/observer.rs
// Purpose: Channel subscribe/unsubscribe/send semantics and registry identity.

use std::cell::RefCell;
use std::rc::Rc;

use bubble_core::{handler, predicate, Channel, Handler, ObserverRegistry};

type Seen = Rc<RefCell<Vec<(&'static str, i32)>>>;

fn recorder(seen: &Seen, tag: &'static str) -> Handler<i32> {
    let seen = Rc::clone(seen);
    handler(move |v: &i32| {
        seen.borrow_mut().push((tag, *v));
        Ok(())
    })
}

#[test]
fn get_returns_same_channel_for_same_name() {
    let reg: ObserverRegistry<i32> = ObserverRegistry::new();
    let a = reg.get("test-cafej");
    let b = reg.get("test-cafej");
    let other = reg.get("other");
    assert!(Rc::ptr_eq(&a, &b));
    assert!(!Rc::ptr_eq(&a, &other));
    assert_eq!(reg.len(), 2);
}

#[test]
fn create_replaces_existing_channel() {
    let reg: ObserverRegistry<i32> = ObserverRegistry::new();
    let first = reg.get("bus");
    first.on("ping", handler(|_| Ok(())));
    let fresh = reg.create("bus");
    assert!(!Rc::ptr_eq(&first, &fresh));
    assert!(Rc::ptr_eq(&fresh, &reg.get("bus")));
    assert_eq!(fresh.subscriber_count("ping"), 0);
    assert_eq!(first.subscriber_count("ping"), 1, "old handle keeps its detached subscribers");
}

#[test]
fn registries_are_independent() {
    let one: ObserverRegistry<i32> = ObserverRegistry::default();
    let two: ObserverRegistry<i32> = ObserverRegistry::default();
    assert!(!Rc::ptr_eq(&one.get("x"), &two.get("x")));
    assert!(one.contains("x") && two.contains("x"));
}

#[test]
fn predicate_false_suppresses_only_its_handler() {
    let seen: Seen = Rc::default();
    let ch = Channel::new("c");
    ch.on("ping", recorder(&seen, "h1"));
    ch.on_filtered("ping", recorder(&seen, "h2"), predicate(|_| false));
    ch.send("ping", &42).expect("send");
    assert_eq!(*seen.borrow(), vec![("h1", 42)]);
}

#[test]
fn predicate_sees_payload() {
    let seen: Seen = Rc::default();
    let ch = Channel::new("c");
    ch.on_filtered("n", recorder(&seen, "even"), predicate(|v: &i32| v % 2 == 0));
    for v in 1..=4 {
        ch.send("n", &v).expect("send");
    }
    assert_eq!(*seen.borrow(), vec![("even", 2), ("even", 4)]);
}

#[test]
fn handlers_fire_once_each_in_registration_order() {
    let seen: Seen = Rc::default();
    let ch = Channel::new("c");
    ch.on("n", recorder(&seen, "a"));
    ch.on("n", recorder(&seen, "b"));
    ch.on("other", recorder(&seen, "x"));
    ch.send("n", &1).expect("send");
    assert_eq!(*seen.borrow(), vec![("a", 1), ("b", 1)]);
}

#[test]
fn duplicate_registration_fires_twice_and_off_removes_one() {
    let seen: Seen = Rc::default();
    let ch = Channel::new("c");
    let h = recorder(&seen, "h");
    ch.on("n", Rc::clone(&h));
    ch.on("n", Rc::clone(&h));
    ch.send("n", &1).expect("send");
    assert_eq!(seen.borrow().len(), 2);

    assert!(ch.off("n", &h));
    assert_eq!(ch.subscriber_count("n"), 1);
    ch.send("n", &2).expect("send");
    assert_eq!(seen.borrow().last(), Some(&("h", 2)));
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn off_unknown_handler_is_noop() {
    let seen: Seen = Rc::default();
    let ch = Channel::new("c");
    ch.on("n", recorder(&seen, "kept"));
    let stranger = recorder(&seen, "stranger");
    assert!(!ch.off("n", &stranger));
    assert!(!ch.off("missing", &stranger));
    ch.send("n", &5).expect("send");
    assert_eq!(*seen.borrow(), vec![("kept", 5)]);
}

#[test]
fn off_notification_clears_that_name_only() {
    let seen: Seen = Rc::default();
    let ch = Channel::new("c");
    ch.on("a", recorder(&seen, "a1"));
    ch.on("a", recorder(&seen, "a2"));
    ch.on("b", recorder(&seen, "b"));
    assert_eq!(ch.off_notification("a"), 2);
    ch.send("a", &1).expect("send");
    ch.send("b", &1).expect("send");
    assert_eq!(*seen.borrow(), vec![("b", 1)]);
}

#[test]
fn off_all_clears_every_notification() {
    let seen: Seen = Rc::default();
    let ch = Channel::new("c");
    ch.on("a", recorder(&seen, "a"));
    ch.on("b", recorder(&seen, "b"));
    ch.off_all();
    ch.send("a", &1).expect("send");
    ch.send("b", &1).expect("send");
    assert!(seen.borrow().is_empty());
    assert!(ch.notifications().is_empty());
}

#[test]
fn send_without_subscribers_is_noop() {
    let ch: Channel<i32> = Channel::new("c");
    ch.send("nobody", &0).expect("send");
}

#[test]
fn handler_added_during_send_waits_for_next_send() {
    let seen: Seen = Rc::default();
    let ch = Rc::new(Channel::new("c"));
    let late = recorder(&seen, "h3");
    {
        let ch2 = Rc::clone(&ch);
        let seen2 = Rc::clone(&seen);
        ch.on(
            "click",
            handler(move |v: &i32| {
                seen2.borrow_mut().push(("adder", *v));
                ch2.on("click", Rc::clone(&late));
                Ok(())
            }),
        );
    }
    ch.send("click", &1).expect("first send");
    assert_eq!(*seen.borrow(), vec![("adder", 1)]);

    ch.send("click", &2).expect("second send");
    assert_eq!(*seen.borrow(), vec![("adder", 1), ("adder", 2), ("h3", 2)]);
}

#[test]
fn handler_removed_during_send_still_gets_current_delivery() {
    let seen: Seen = Rc::default();
    let ch = Rc::new(Channel::new("c"));
    let victim = recorder(&seen, "victim");
    {
        let ch2 = Rc::clone(&ch);
        let victim2 = Rc::clone(&victim);
        ch.on("n", handler(move |_: &i32| { ch2.off("n", &victim2); Ok(()) }));
    }
    ch.on("n", Rc::clone(&victim));
    ch.send("n", &1).expect("send");
    ch.send("n", &2).expect("send");
    assert_eq!(*seen.borrow(), vec![("victim", 1)]);
}

#[test]
fn reentrant_send_is_allowed() {
    let seen: Seen = Rc::default();
    let ch = Rc::new(Channel::new("c"));
    ch.on("inner", recorder(&seen, "inner"));
    {
        let ch2 = Rc::clone(&ch);
        ch.on("outer", handler(move |v: &i32| ch2.send("inner", &(v + 1))));
    }
    ch.send("outer", &1).expect("send");
    assert_eq!(*seen.borrow(), vec![("inner", 2)]);
}

#[test]
fn handler_error_stops_remaining_handlers() {
    let seen: Seen = Rc::default();
    let ch = Channel::new("c");
    ch.on("n", recorder(&seen, "first"));
    ch.on("n", handler(|_: &i32| anyhow::bail!("handler failed")));
    ch.on("n", recorder(&seen, "never"));
    let err = ch.send("n", &9).expect_err("should fail");
    assert!(err.to_string().contains("handler failed"));
    assert_eq!(*seen.borrow(), vec![("first", 9)]);
}
