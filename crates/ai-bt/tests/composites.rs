mod common;

use ai_bt::{BehaviorTree, BtNode, BtStatus, Parallel, Selector, Sequence};
use common::{ctx, Scripted, Trace};

use BtStatus::{Failure, Running, Success};

#[test]
fn selector_stops_at_first_success() {
    let mut sel = Selector::new(vec![
        Scripted::always("a", Failure),
        Scripted::always("b", Failure),
        Scripted::always("c", Success),
        Scripted::always("d", Success),
    ]);
    let mut trace = Trace::default();

    assert_eq!(sel.tick(&ctx(0), &mut trace, &mut ()), Ok(Success));
    assert_eq!(trace.calls, vec!["a", "b", "c"]);
}

#[test]
fn sequence_stops_at_first_failure() {
    let mut seq = Sequence::new(vec![
        Scripted::always("a", Success),
        Scripted::always("b", Failure),
        Scripted::always("c", Success),
    ]);
    let mut trace = Trace::default();

    assert_eq!(seq.tick(&ctx(0), &mut trace, &mut ()), Ok(Failure));
    assert_eq!(trace.calls, vec!["a", "b"]);
}

#[test]
fn sequence_resumes_at_running_child() {
    let mut seq = Sequence::new(vec![
        Scripted::always("check", Success),
        Scripted::new("walk", &[Running, Running, Success]),
        Scripted::always("bite", Success),
    ]);
    let mut trace = Trace::default();

    assert_eq!(seq.tick(&ctx(0), &mut trace, &mut ()), Ok(Running));
    assert_eq!(seq.tick(&ctx(1), &mut trace, &mut ()), Ok(Running));
    assert_eq!(seq.tick(&ctx(2), &mut trace, &mut ()), Ok(Success));

    // "check" ran once; the two resumed ticks went straight to "walk".
    assert_eq!(trace.calls, vec!["check", "walk", "walk", "walk", "bite"]);
}

#[test]
fn selector_resumes_at_running_child() {
    let mut sel = Selector::new(vec![
        Scripted::always("flee", Failure),
        Scripted::new("chase", &[Running, Failure]),
        Scripted::always("idle", Success),
    ]);
    let mut trace = Trace::default();

    assert_eq!(sel.tick(&ctx(0), &mut trace, &mut ()), Ok(Running));
    assert_eq!(sel.tick(&ctx(1), &mut trace, &mut ()), Ok(Success));
    assert_eq!(trace.calls, vec!["flee", "chase", "chase", "idle"]);
}

#[test]
fn composite_restarts_from_first_child_after_finishing() {
    let mut seq = Sequence::new(vec![
        Scripted::always("a", Success),
        Scripted::always("b", Success),
    ]);
    let mut trace = Trace::default();

    seq.tick(&ctx(0), &mut trace, &mut ()).unwrap();
    seq.tick(&ctx(1), &mut trace, &mut ()).unwrap();
    assert_eq!(trace.calls, vec!["a", "b", "a", "b"]);
}

#[test]
fn forced_reset_discards_resumption_point() {
    let mut tree = BehaviorTree::<Trace, ()>::from_node(Sequence::new(vec![
        Scripted::always("guard", Success),
        Scripted::always("long", Running),
    ]));
    let mut trace = Trace::default();

    tree.tick(&ctx(0), &mut trace, &mut ()).unwrap();
    tree.tick(&ctx(1), &mut trace, &mut ()).unwrap();
    tree.reset();
    tree.tick(&ctx(2), &mut trace, &mut ()).unwrap();

    assert_eq!(trace.calls, vec!["guard", "long", "long", "guard", "long"]);
    assert_eq!(tree.last_status(), Running);
}

#[test]
fn parallel_evaluates_every_child_every_tick() {
    let mut par = Parallel::new(
        2,
        vec![
            Scripted::always("alert", Running),
            Scripted::new("engage", &[Running, Success]),
            Scripted::new("howl", &[Running, Success]),
        ],
    );
    let mut trace = Trace::default();

    assert_eq!(par.tick(&ctx(0), &mut trace, &mut ()), Ok(Running));
    assert_eq!(par.tick(&ctx(1), &mut trace, &mut ()), Ok(Success));
    assert_eq!(
        trace.calls,
        vec!["alert", "engage", "howl", "alert", "engage", "howl"]
    );
}

#[test]
fn parallel_fails_once_threshold_is_unreachable() {
    let mut par = Parallel::new(
        2,
        vec![
            Scripted::always("a", Failure),
            Scripted::always("b", Failure),
            Scripted::always("c", Running),
        ],
    );
    let mut trace = Trace::default();

    assert_eq!(par.tick(&ctx(0), &mut trace, &mut ()), Ok(Failure));
    assert_eq!(trace.calls, vec!["a", "b", "c"]);
}

#[test]
fn parallel_threshold_is_capped_by_child_count() {
    let par: Parallel<Trace, ()> = Parallel::new(5, vec![Scripted::always("a", Success)]);
    assert_eq!(par.success_threshold(), 1);
}
