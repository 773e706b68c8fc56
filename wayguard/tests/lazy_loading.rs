use std::{
    sync::{Arc, atomic::Ordering},
    time::Duration,
};
use wayguard::{
    GuardPhase, LoadError, NavigationOutcome, Navigator, RouteNode, RouteTree,
    testing::{CountingGuard, FailingLoader, GuardLog, RecordingGuard, RecordingRedirector, StaticLoader},
};

mod common;
use common::{Auth, View, admin_routes};

fn lazy_admin(guard: impl wayguard::Guard) -> RouteTree<View> {
    RouteTree::new([
        RouteNode::path("login").payload(View::Login),
        RouteNode::path("admin").load_guard(guard).lazy("admin"),
    ])
    .unwrap()
}

#[tokio::test]
async fn test_load_denial_never_fetches() {
    let loader = StaticLoader::new().with_subtree("admin", admin_routes);
    let fetches = loader.fetch_counter();
    let navigator = Navigator::builder(lazy_admin(CountingGuard::deny()))
        .loader(loader)
        .build();

    for _ in 0..3 {
        assert!(navigator.navigate("/admin/crises").await.is_blocked());
    }
    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_subtree_is_fetched_once_and_load_guards_stop_running() {
    let auth = Auth::signed_in();
    let log = GuardLog::new();
    let loader = StaticLoader::new().with_subtree("admin", admin_routes);
    let fetches = loader.fetch_counter();
    let tree = RouteTree::new([RouteNode::path("admin")
        .load_guard(auth.guard.clone())
        .load_guard(RecordingGuard::allow("admin:load", &log))
        .lazy("admin")])
    .unwrap();
    let navigator = Navigator::builder(tree).loader(loader).build();

    let outcome = navigator.navigate("/admin").await;
    assert_eq!(outcome.payload(), Some(&View::Dashboard));
    assert_eq!(outcome.chain().unwrap().patterns(), ["admin", ""]);

    let call = &log.calls()[0];
    assert_eq!(call.phase, GuardPhase::Load);
    assert_eq!(call.route, "/admin");

    let outcome = navigator.navigate("/admin/heroes").await;
    assert_eq!(outcome.payload(), Some(&View::ManageHeroes));
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(log.count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_fetches_once() {
    let (loader, gate) = StaticLoader::new().with_subtree("admin", admin_routes).gated();
    let fetches = loader.fetch_counter();
    let navigator = Arc::new(Navigator::builder(lazy_admin(CountingGuard::allow())).loader(loader).build());

    let tasks: Vec<_> = ["/admin", "/admin/crises", "/admin/heroes"]
        .into_iter()
        .map(|url| {
            let navigator = Arc::clone(&navigator);
            tokio::spawn(async move { navigator.navigate(url).await })
        })
        .collect();

    gate.entered().await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    gate.release();

    let mut payloads = Vec::new();
    for task in tasks {
        payloads.push(*task.await.unwrap().payload().unwrap());
    }
    assert_eq!(payloads, [View::Dashboard, View::ManageCrises, View::ManageHeroes]);
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_load_failure_is_not_blocked_and_is_retried() {
    let loader = FailingLoader::new("chunk 404");
    let redirector = RecordingRedirector::new();
    let navigator = Navigator::builder(lazy_admin(CountingGuard::allow()))
        .loader(loader.clone())
        .redirector(redirector.clone())
        .build();

    match navigator.navigate("/admin").await {
        NavigationOutcome::LoadFailed(error) => {
            assert!(matches!(*error, LoadError::Fetch { ref source_ref, .. } if source_ref == "admin"));
        }
        other => panic!("expected LoadFailed, got {other:?}"),
    }
    assert!(!navigator.store().is_pending());
    assert_eq!(redirector.count(), 0);

    assert!(matches!(
        navigator.navigate("/admin").await,
        NavigationOutcome::LoadFailed(_)
    ));
    assert_eq!(loader.fetches(), 2);
}

#[tokio::test]
async fn test_malformed_subtree_fails_to_load() {
    let loader = StaticLoader::new().with_subtree("admin", || {
        vec![RouteNode::wildcard().child(RouteNode::index().payload(View::Dashboard))]
    });
    let navigator = Navigator::builder(lazy_admin(CountingGuard::allow()))
        .loader(loader)
        .build();

    match navigator.navigate("/admin").await {
        NavigationOutcome::LoadFailed(error) => {
            assert!(matches!(*error, LoadError::Invalid { .. }));
        }
        other => panic!("expected LoadFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_nested_lazy_subtrees_resolve_in_one_navigation() {
    let loader = StaticLoader::new()
        .with_subtree("admin", || {
            let mut routes = admin_routes();
            routes.push(RouteNode::path("reports").lazy("reports"));
            routes
        })
        .with_subtree("reports", || vec![RouteNode::index().payload(View::Reports)]);
    let fetches = loader.fetch_counter();
    let navigator = Navigator::builder(lazy_admin(CountingGuard::allow()))
        .loader(loader)
        .build();

    let outcome = navigator.navigate("/admin/reports").await;
    assert_eq!(outcome.payload(), Some(&View::Reports));
    assert_eq!(outcome.chain().unwrap().patterns(), ["admin", "reports", ""]);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unmatched_url_inside_loaded_subtree_is_not_found() {
    let loader = StaticLoader::new().with_subtree("admin", admin_routes);
    let navigator = Navigator::builder(lazy_admin(CountingGuard::allow()))
        .loader(loader)
        .build();

    assert!(navigator.navigate("/admin/unknown").await.is_not_found());
    assert!(navigator.navigate("/admin").await.is_activated());
}
