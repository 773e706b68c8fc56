#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use wayguard::{RouteNode, guards::AuthGuard};

// ============================================================================
// Test Views
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    HeroList,
    HeroDetail,
    CrisisList,
    CrisisHome,
    CrisisDetail,
    Dashboard,
    ManageCrises,
    ManageHeroes,
    Reports,
    Forbidden,
    PageNotFound,
}

// ============================================================================
// Authentication
// ============================================================================

pub struct Auth {
    pub signed_in: Arc<AtomicBool>,
    pub guard: Arc<AuthGuard<Arc<AtomicBool>>>,
}

impl Auth {
    pub fn signed_out() -> Self {
        let signed_in = Arc::new(AtomicBool::new(false));
        let guard = Arc::new(AuthGuard::new(signed_in.clone(), "/login"));
        Self { signed_in, guard }
    }

    pub fn signed_in() -> Self {
        let auth = Self::signed_out();
        auth.sign_in();
        auth
    }

    pub fn sign_in(&self) {
        self.signed_in.store(true, Ordering::SeqCst);
    }
}

// ============================================================================
// Route Fixtures
// ============================================================================

/// The children served for the lazy `admin` source.
pub fn admin_routes() -> Vec<RouteNode<View>> {
    vec![
        RouteNode::index().payload(View::Dashboard),
        RouteNode::path("crises").payload(View::ManageCrises),
        RouteNode::path("heroes").payload(View::ManageHeroes),
    ]
}

pub fn hero_routes() -> Vec<RouteNode<View>> {
    vec![
        RouteNode::path("heroes").payload(View::HeroList),
        RouteNode::path("hero").child(RouteNode::path(":id").payload(View::HeroDetail)),
    ]
}
