use chrono::{Duration, Utc};
use invoice_portal::guard::{
    AuthState, AuthenticatedUser, GuardOutcome, GuardState, Navigation, ROLE_ADMIN, ROLE_CLIENT,
    RedirectTargets, RoleGuard, RouteTable,
};

// --- Test Utilities ---

#[derive(Debug, Clone, PartialEq, Eq)]
enum Page {
    Login,
    Home,
    InvoiceList,
    InvoiceEdit,
    AdminUsers,
}

fn session(role: &str) -> AuthState {
    AuthState::SignedIn(AuthenticatedUser::new("session-token", role))
}

fn app_routes() -> RouteTable<Page> {
    RouteTable::new()
        .route_public("/login", Page::Login)
        .and_then(|t| t.route_public("/", Page::Home))
        .and_then(|t| t.route_for_role("/invoices", ROLE_CLIENT, Page::InvoiceList))
        .and_then(|t| t.route_for_role("/invoices/{id}/edit", ROLE_CLIENT, Page::InvoiceEdit))
        .and_then(|t| t.route_for_role("/admin/users", ROLE_ADMIN, Page::AdminUsers))
        .expect("valid route table")
}

// --- Guard Properties ---

#[test]
fn test_no_user_redirects_to_login_for_any_role() {
    let signed_out = AuthState::from_user(None);

    for role in [ROLE_ADMIN, ROLE_CLIENT, "auditor", ""] {
        let outcome = RoleGuard::new(role, &signed_out).render(Page::AdminUsers);
        assert_eq!(outcome, GuardOutcome::Redirect("/login".to_string()));
    }
}

#[test]
fn test_matching_role_renders_children() {
    let admin = session(ROLE_ADMIN);

    let outcome = RoleGuard::new(ROLE_ADMIN, &admin).render(Page::AdminUsers);

    assert_eq!(outcome, GuardOutcome::Render(Page::AdminUsers));
}

#[test]
fn test_wrong_role_redirects_home_not_login() {
    let client = session(ROLE_CLIENT);

    let outcome = RoleGuard::new(ROLE_ADMIN, &client).render(Page::AdminUsers);

    assert_eq!(outcome.redirect_target(), Some("/"));
    assert_ne!(outcome.redirect_target(), Some("/login"));
}

#[test]
fn test_guard_reevaluates_on_context_change() {
    let mut auth = AuthState::Loading;
    assert_eq!(RoleGuard::new(ROLE_CLIENT, &auth).state(), GuardState::Loading);

    auth.sign_in(AuthenticatedUser::new("tok", ROLE_CLIENT));
    assert_eq!(
        RoleGuard::new(ROLE_CLIENT, &auth).state(),
        GuardState::AuthenticatedCorrectRole
    );

    auth.sign_out();
    assert_eq!(
        RoleGuard::new(ROLE_CLIENT, &auth).state(),
        GuardState::Unauthenticated
    );
}

#[test]
fn test_guard_does_not_touch_session() {
    let auth = session(ROLE_CLIENT);
    let before = auth.clone();

    let _ = RoleGuard::new(ROLE_ADMIN, &auth).render(());

    assert_eq!(auth, before);
}

#[test]
fn test_session_expiry_is_unauthenticated() {
    let now = Utc::now();
    let auth = AuthState::SignedIn(
        AuthenticatedUser::new("tok", ROLE_CLIENT).with_expiry(now + Duration::minutes(10)),
    );
    let guard = RoleGuard::new(ROLE_CLIENT, &auth);

    assert_eq!(guard.state_at(now), GuardState::AuthenticatedCorrectRole);
    assert_eq!(
        guard.state_at(now + Duration::minutes(10)),
        GuardState::Unauthenticated
    );
    assert_eq!(
        guard.render_at(Page::InvoiceList, now + Duration::hours(1)),
        GuardOutcome::Redirect("/login".to_string())
    );
}

// --- Route Table ---

#[test]
fn test_route_table_flow() {
    let routes = app_routes();
    let client = session(ROLE_CLIENT);
    let admin = session(ROLE_ADMIN);

    match routes.navigate("/invoices/INV-9/edit", &client) {
        Navigation::Render { view, params } => {
            assert_eq!(view, &Page::InvoiceEdit);
            assert_eq!(params["id"], "INV-9");
        }
        other => panic!("expected render, got {other:?}"),
    }

    // Admins do not own invoice views.
    assert_eq!(
        routes.navigate("/invoices", &admin),
        Navigation::Redirect("/".to_string())
    );
    assert!(matches!(
        routes.navigate("/admin/users", &admin),
        Navigation::Render { view: Page::AdminUsers, .. }
    ));
    assert_eq!(
        routes.navigate("/admin/users", &AuthState::SignedOut),
        Navigation::Redirect("/login".to_string())
    );
    assert!(matches!(
        routes.navigate("/", &AuthState::Loading),
        Navigation::Render { view: Page::Home, .. }
    ));
    assert_eq!(
        routes.navigate("/admin/users", &AuthState::Loading),
        Navigation::Loading
    );
}

#[test]
fn test_route_table_custom_targets() {
    let routes = app_routes().with_targets(RedirectTargets {
        login: "/sign-in".to_string(),
        home: "/invoices".to_string(),
    });

    assert_eq!(
        routes.navigate("/admin/users", &session(ROLE_CLIENT)),
        Navigation::Redirect("/invoices".to_string())
    );
    assert_eq!(
        routes.navigate("/invoices", &AuthState::SignedOut),
        Navigation::Redirect("/sign-in".to_string())
    );
}
