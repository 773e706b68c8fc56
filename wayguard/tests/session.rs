use std::sync::Arc;
use wayguard::{
    GuardPhase, GuardResult, NavigationOutcome, Navigator, RedirectIntentStore, RouteNode, RouteTree, Session,
    testing::{CountingGuard, GatedGuard, GuardLog, RecordingGuard, RecordingRedirector},
};

mod common;
use common::{Auth, View, admin_routes, hero_routes};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_superseded_navigation_has_no_side_effects() {
    let (gated, gate) = GatedGuard::new(GuardResult::redirect("/login"));
    let redirector = RecordingRedirector::new();
    let tree = RouteTree::new(
        hero_routes()
            .into_iter()
            .chain([RouteNode::path("admin").activate_guard(gated)]),
    )
    .unwrap();
    let navigator = Navigator::builder(tree)
        .redirector(redirector.clone())
        .build();
    let session = Arc::new(Session::new(Arc::new(navigator)));

    let stale = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.navigate("/admin").await }
    });
    gate.entered().await;

    let fresh = session.navigate("/heroes").await;
    gate.release();

    assert_eq!(fresh.payload(), Some(&View::HeroList));
    assert!(stale.await.unwrap().is_cancelled());
    assert_eq!(redirector.count(), 0);
    assert!(!session.navigator().store().is_pending());
    assert_eq!(session.current().unwrap().payload(), Some(&View::HeroList));
}

#[tokio::test]
async fn test_denied_deactivation_keeps_user_in_place() {
    let redirector = RecordingRedirector::new();
    let tree = RouteTree::new(hero_routes().into_iter().chain([RouteNode::path("editor")
        .deactivate_guard(CountingGuard::deny())
        .payload(View::CrisisDetail)]))
    .unwrap();
    let navigator = Navigator::builder(tree)
        .redirector(redirector.clone())
        .build();
    let session = Session::new(Arc::new(navigator));

    assert!(session.navigate("/editor").await.is_activated());
    let outcome = session.navigate("/heroes").await;

    let denial = outcome.denial().expect("leaving should be blocked");
    assert_eq!(denial.phase(), GuardPhase::Deactivate);
    assert_eq!(denial.route(), "/editor");
    assert_eq!(denial.redirect_to(), None);
    assert!(!denial.remembers_intent());
    assert_eq!(redirector.count(), 0);
    assert_eq!(session.current().unwrap().payload(), Some(&View::CrisisDetail));
}

#[tokio::test]
async fn test_unmatched_url_never_asks_to_leave() {
    let leave = CountingGuard::deny();
    let tree = RouteTree::new(hero_routes().into_iter().chain([RouteNode::path("editor")
        .deactivate_guard(leave.clone())
        .payload(View::CrisisDetail)]))
    .unwrap();
    let session = Session::new(Arc::new(Navigator::builder(tree).build()));

    assert!(session.navigate("/editor").await.is_activated());
    let outcome = session.navigate("/nonexistent").await;

    assert!(matches!(outcome, NavigationOutcome::NotFound(ref url) if url == "/nonexistent"));
    assert_eq!(leave.count(), 0);
    assert_eq!(session.current().unwrap().payload(), Some(&View::CrisisDetail));
}

#[tokio::test]
async fn test_sibling_navigation_keeps_guarded_parent() {
    let leave_admin = CountingGuard::deny();
    let tree = RouteTree::new(hero_routes().into_iter().chain([RouteNode::path("admin")
        .deactivate_guard(leave_admin.clone())
        .children(admin_routes())]))
    .unwrap();
    let session = Session::new(Arc::new(Navigator::builder(tree).build()));

    assert!(session.navigate("/admin/crises").await.is_activated());
    let sibling = session.navigate("/admin/heroes").await;
    assert_eq!(sibling.payload(), Some(&View::ManageHeroes));
    assert_eq!(leave_admin.count(), 0);

    let outcome = session.navigate("/heroes").await;
    let denial = outcome.denial().expect("leaving admin should be blocked");
    assert_eq!(denial.phase(), GuardPhase::Deactivate);
    assert_eq!(denial.route(), "/admin");
    assert_eq!(leave_admin.count(), 1);
    assert_eq!(session.current().unwrap().payload(), Some(&View::ManageHeroes));
}

#[tokio::test]
async fn test_changed_param_leaves_only_the_param_level() {
    let log = GuardLog::new();
    let tree = RouteTree::new([RouteNode::path("crisis-center")
        .deactivate_guard(RecordingGuard::allow("center", &log))
        .child(
            RouteNode::path(":id")
                .deactivate_guard(RecordingGuard::allow("detail", &log))
                .payload(View::CrisisDetail),
        )])
    .unwrap();
    let session = Session::new(Arc::new(Navigator::builder(tree).build()));

    session.navigate("/crisis-center/4").await;
    session.navigate("/crisis-center/4").await;
    assert!(log.labels().is_empty());

    assert!(session.navigate("/crisis-center/5").await.is_activated());
    assert_eq!(log.labels(), ["detail"]);
    assert_eq!(log.calls()[0].url, "/crisis-center/5");
}

#[tokio::test]
async fn test_deactivate_guards_run_leaf_to_root_before_entering() {
    let log = GuardLog::new();
    let tree = RouteTree::new([
        RouteNode::path("crisis-center")
            .deactivate_guard(RecordingGuard::allow("center", &log))
            .child(
                RouteNode::path(":id")
                    .deactivate_guard(RecordingGuard::allow("detail", &log))
                    .payload(View::CrisisDetail),
            ),
        RouteNode::path("heroes")
            .activate_guard(RecordingGuard::allow("heroes", &log))
            .payload(View::HeroList),
    ])
    .unwrap();
    let session = Session::new(Arc::new(Navigator::builder(tree).build()));

    session.navigate("/crisis-center/4").await;
    assert!(log.labels().is_empty());

    assert!(session.navigate("/heroes").await.is_activated());
    assert_eq!(log.labels(), ["detail", "center", "heroes"]);
    assert_eq!(log.calls()[0].phase, GuardPhase::Deactivate);
}

#[tokio::test]
async fn test_resume_returns_to_denied_url_once() {
    let auth = Auth::signed_out();
    let store = Arc::new(RedirectIntentStore::new());
    let redirector = RecordingRedirector::new();
    let tree = RouteTree::new(hero_routes().into_iter().chain([
        RouteNode::path("login").payload(View::Login),
        RouteNode::path("admin")
            .child_guard(auth.guard.clone())
            .children(admin_routes()),
    ]))
    .unwrap();
    let navigator = Navigator::builder(tree)
        .store(Arc::clone(&store))
        .redirector(redirector.clone())
        .build();
    let session = Session::new(Arc::new(navigator));

    let outcome = session.navigate("/admin/crises?sort=asc").await;
    assert_eq!(outcome.redirect_to(), Some("/login"));
    assert_eq!(store.peek().as_deref(), Some("/admin/crises?sort=asc"));

    auth.sign_in();
    let resumed = session.resume("/heroes").await;
    assert_eq!(resumed.payload(), Some(&View::ManageCrises));
    assert!(!store.is_pending());

    let again = session.resume("/heroes").await;
    assert_eq!(again.payload(), Some(&View::HeroList));
    assert_eq!(redirector.targets(), ["/login"]);
}

#[tokio::test]
async fn test_not_found_keeps_previous_intent() {
    let store = Arc::new(RedirectIntentStore::new());
    store.remember("/admin");
    let tree = RouteTree::new(hero_routes()).unwrap();
    let navigator = Navigator::builder(tree).store(Arc::clone(&store)).build();
    let session = Session::new(Arc::new(navigator));

    assert!(session.navigate("/nowhere").await.is_not_found());
    assert_eq!(store.consume().as_deref(), Some("/admin"));
    assert_eq!(store.consume(), None);
}
