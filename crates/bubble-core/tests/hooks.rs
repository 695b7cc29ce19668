// File: crates/bubble-core/tests/hooks.rs
// Purpose: Hook composition order, short-circuiting, error propagation and frozen chains.

use std::cell::RefCell;
use std::rc::Rc;

use bubble_core::{after, before, hook, HookComposer};

type Log = Rc<RefCell<Vec<String>>>;

struct State {
    log: Vec<String>,
}

fn base() -> HookComposer<State, u32, u32> {
    HookComposer::new(
        "setup",
        hook(|s: &mut State, n: u32| {
            s.log.push(format!("base({n})"));
            Ok(n * 10)
        }),
    )
}

#[test]
fn after_wrappers_run_augments_in_install_order() {
    let mut c = base();
    c.install("e1", |orig| after(orig, |s: &mut State, _| { s.log.push("e1".into()); Ok(()) }));
    c.install("e2", |orig| after(orig, |s: &mut State, _| { s.log.push("e2".into()); Ok(()) }));
    let chain = c.build();

    let mut st = State { log: Vec::new() };
    let out = chain.call(&mut st, 4).expect("call");
    assert_eq!(out, 40, "original result propagates through every layer");
    assert_eq!(st.log, vec!["base(4)", "e1", "e2"]);
}

#[test]
fn before_wrappers_run_augments_in_reverse_install_order() {
    let mut c = base();
    c.install("e1", |orig| before(orig, |s: &mut State, _| { s.log.push("e1".into()); Ok(()) }));
    c.install("e2", |orig| before(orig, |s: &mut State, _| { s.log.push("e2".into()); Ok(()) }));
    let chain = c.build();

    let mut st = State { log: Vec::new() };
    chain.call(&mut st, 1).expect("call");
    assert_eq!(st.log, vec!["e2", "e1", "base(1)"]);
}

#[test]
fn mixed_styles_only_order_relative_to_captured_original() {
    let mut c = base();
    c.install("after", |orig| after(orig, |s: &mut State, _| { s.log.push("after".into()); Ok(()) }));
    c.install("before", |orig| before(orig, |s: &mut State, _| { s.log.push("before".into()); Ok(()) }));
    let mut st = State { log: Vec::new() };
    c.build().call(&mut st, 2).expect("call");
    assert_eq!(st.log, vec!["before", "base(2)", "after"]);
}

#[test]
fn every_layer_runs_exactly_once() {
    let calls: Log = Rc::new(RefCell::new(Vec::new()));
    let mut c = base();
    for name in ["a", "b", "c", "d"] {
        let calls = Rc::clone(&calls);
        c.install(name, move |orig| {
            after(orig, move |_: &mut State, _| { calls.borrow_mut().push(name.to_string()); Ok(()) })
        });
    }
    let mut st = State { log: Vec::new() };
    c.build().call(&mut st, 0).expect("call");
    assert_eq!(*calls.borrow(), vec!["a", "b", "c", "d"]);
    assert_eq!(st.log.iter().filter(|l| l.starts_with("base")).count(), 1);
}

#[test]
fn short_circuit_skips_original_and_earlier_layers() {
    let mut c = base();
    c.install("inner", |orig| after(orig, |s: &mut State, _| { s.log.push("inner".into()); Ok(()) }));
    c.install("gate", |_orig| hook(|s: &mut State, _n: u32| { s.log.push("gate".into()); Ok(7) }));
    let mut st = State { log: Vec::new() };
    let out = c.build().call(&mut st, 3).expect("call");
    assert_eq!(out, 7);
    assert_eq!(st.log, vec!["gate"]);
}

#[test]
fn error_before_original_propagates_and_stops_chain() {
    let mut c = base();
    c.install("after", |orig| after(orig, |s: &mut State, _| { s.log.push("after".into()); Ok(()) }));
    c.install("boom", |orig| before(orig, |_: &mut State, _| anyhow::bail!("extension failed")));
    let mut st = State { log: Vec::new() };
    let err = c.build().call(&mut st, 3).expect_err("should fail");
    assert!(err.to_string().contains("extension failed"));
    assert!(st.log.is_empty(), "nothing below the failing wrapper ran: {:?}", st.log);
}

#[test]
fn error_from_original_skips_after_augment() {
    let mut c: HookComposer<State, u32, u32> =
        HookComposer::new("reset", hook(|_: &mut State, _| anyhow::bail!("base failed")));
    c.install("after", |orig| after(orig, |s: &mut State, _| { s.log.push("after".into()); Ok(()) }));
    let mut st = State { log: Vec::new() };
    assert!(c.build().call(&mut st, 0).is_err());
    assert!(st.log.is_empty());
}

#[test]
fn factory_receives_current_composition() {
    let mut c = base();
    c.install("e1", |orig| after(orig, |s: &mut State, _| { s.log.push("e1".into()); Ok(()) }));
    let current = c.current().clone();
    let mut st = State { log: Vec::new() };
    current(&mut st, 5).expect("call current");
    assert_eq!(st.log, vec!["base(5)", "e1"]);
}

#[test]
fn frozen_chain_records_layers_and_clones_share_entry() {
    let mut c = base();
    c.install("central-click", |orig| orig);
    c.install("lines", |orig| orig);
    assert_eq!(c.layers(), ["central-click", "lines"]);
    let chain = c.build();
    assert_eq!(chain.method(), "setup");
    assert_eq!(chain.layers(), ["central-click", "lines"]);

    let copy = chain.clone();
    let mut st = State { log: Vec::new() };
    assert_eq!(copy.call(&mut st, 2).expect("call"), 20);
    assert_eq!(chain.call(&mut st, 3).expect("call"), 30);
    assert_eq!(st.log, vec!["base(2)", "base(3)"]);
}
