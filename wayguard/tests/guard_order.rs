use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use wayguard::{
    GuardPhase, GuardResult, NavigationContext, NavigationError, Navigator, RouteNode, RouteTree,
    guard_chain,
    guards::{async_guard_fn, guard_fn},
    testing::{CountingGuard, FailingGuard, GuardLog, RecordingGuard, RecordingRedirector},
};

mod common;
use common::View;

#[tokio::test]
async fn test_first_denial_skips_remaining_guards() {
    let g1 = CountingGuard::deny();
    let g2 = CountingGuard::allow();
    let g3 = CountingGuard::allow();
    let tree = RouteTree::new([RouteNode::path("admin")
        .activate_guard(g1.clone())
        .activate_guard(g2.clone())
        .activate_guard(g3.clone())
        .payload(View::Dashboard)])
    .unwrap();
    let navigator = Navigator::builder(tree).build();

    assert!(navigator.navigate("/admin").await.is_blocked());
    assert_eq!((g1.count(), g2.count(), g3.count()), (1, 0, 0));
}

#[tokio::test]
async fn test_ancestor_child_guards_run_before_activate_guards() {
    let log = GuardLog::new();
    let tree = RouteTree::new([RouteNode::path("crisis-center")
        .child_guard(RecordingGuard::allow("center:child", &log))
        .child(
            RouteNode::index()
                .child_guard(RecordingGuard::allow("list:child", &log))
                .payload(View::CrisisList)
                .child(RouteNode::index().payload(View::CrisisHome))
                .child(
                    RouteNode::path(":id")
                        .child_guard(RecordingGuard::allow("detail:child", &log))
                        .activate_guard(RecordingGuard::allow("detail:activate", &log))
                        .payload(View::CrisisDetail),
                ),
        )])
    .unwrap();
    let navigator = Navigator::builder(tree).build();

    let outcome = navigator.navigate("/crisis-center/3").await;
    assert_eq!(outcome.payload(), Some(&View::CrisisDetail));

    let calls = log.calls();
    let observed: Vec<_> = calls
        .iter()
        .map(|call| (call.label.as_str(), call.phase, call.route.as_str()))
        .collect();
    assert_eq!(
        observed,
        [
            ("center:child", GuardPhase::Child, "/crisis-center"),
            ("list:child", GuardPhase::Child, "/crisis-center"),
            ("detail:activate", GuardPhase::Activate, "/crisis-center/:id"),
        ]
    );
}

#[tokio::test]
async fn test_ancestor_denial_wins_with_its_own_target() {
    let terminal = CountingGuard::with_result(GuardResult::redirect("/inner"));
    let tree = RouteTree::new([RouteNode::<View>::path("admin")
        .child_guard(CountingGuard::with_result(GuardResult::redirect("/outer")))
        .child(RouteNode::path("crises").activate_guard(terminal.clone()))])
    .unwrap();
    let navigator = Navigator::builder(tree).build();

    let outcome = navigator.navigate("/admin/crises").await;
    assert_eq!(outcome.redirect_to(), Some("/outer"));
    assert_eq!(outcome.denial().unwrap().phase(), GuardPhase::Child);
    assert_eq!(terminal.count(), 0);
}

#[tokio::test]
async fn test_async_guards_complete_in_declared_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let slow = {
        let order = Arc::clone(&order);
        async_guard_fn("slow", move |_ctx: NavigationContext| {
            let order = Arc::clone(&order);
            async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                order.lock().unwrap().push("slow");
                true
            }
        })
    };
    let fast = {
        let order = Arc::clone(&order);
        guard_fn("fast", move |_ctx: &NavigationContext| {
            order.lock().unwrap().push("fast");
            true
        })
    };
    let tree = RouteTree::new([RouteNode::path("heroes")
        .activate_guard(slow)
        .activate_guard(fast)
        .payload(View::HeroList)])
    .unwrap();
    let navigator = Navigator::builder(tree).build();

    assert!(navigator.navigate("/heroes").await.is_activated());
    assert_eq!(*order.lock().unwrap(), ["slow", "fast"]);
}

#[tokio::test]
async fn test_guard_fault_blocks_with_default_redirect() {
    let redirector = RecordingRedirector::new();
    let after = CountingGuard::allow();
    let tree = RouteTree::new([RouteNode::<View>::path("admin")
        .activate_guard(FailingGuard::new("session backend unreachable"))
        .activate_guard(after.clone())])
    .unwrap();
    let navigator = Navigator::builder(tree)
        .redirector(redirector.clone())
        .build();

    let outcome = navigator.navigate("/admin").await;

    let denial = outcome.denial().expect("fault should block");
    assert!(denial.is_fault());
    assert_eq!(denial.redirect_to(), Some("/login"));
    assert_eq!(redirector.targets(), ["/login"]);
    assert_eq!(navigator.store().peek().as_deref(), Some("/admin"));
    assert_eq!(after.count(), 0);

    match outcome.into_result() {
        Err(NavigationError::GuardFault(fault)) => {
            assert_eq!(fault.phase, GuardPhase::Activate);
            assert_eq!(fault.route, "/admin");
            assert_eq!(fault.source.to_string(), "session backend unreachable");
        }
        other => panic!("expected a guard fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_static_chain_as_single_guard() {
    let log = GuardLog::new();
    let tree = RouteTree::new([RouteNode::path("heroes")
        .activate_guard(guard_chain![
            RecordingGuard::allow("a", &log),
            RecordingGuard::new("b", &log, GuardResult::Deny),
            RecordingGuard::allow("c", &log),
        ])
        .payload(View::HeroList)])
    .unwrap();
    let navigator = Navigator::builder(tree).build();

    assert!(navigator.navigate("/heroes").await.is_blocked());
    assert_eq!(log.labels(), ["a", "b"]);
}
