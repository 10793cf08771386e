use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{redirect, StatusCode};

use flock_api::app::{build_app, AppState};
use flock_api::session::SessionClaims;
use flock_auth::Role;
use flock_core::{AssignmentId, MemberId, UserId};
use flock_store::{
    InMemoryDirectory, InMemoryUserStore, Member, ShepherdAssignment, UserRecord, UserStore,
};

const SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(state: AppState) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct Seed {
    users: Arc<InMemoryUserStore>,
    directory: Arc<InMemoryDirectory>,
    member_user_id: UserId,
    pastor_user_id: UserId,
    assigned: Vec<MemberId>,
    unassigned: MemberId,
}

fn seed_user(users: &InMemoryUserStore, identity: &str, role: Role) -> UserId {
    let user_id = UserId::new();
    users.insert(UserRecord {
        user_id,
        identity: identity.to_string(),
        email: format!("{}@example.com", identity.trim_start_matches("auth0|")),
        role,
        member_id: None,
        display_name: None,
        photo_url: None,
        created_at: Utc::now(),
    });
    user_id
}

fn seed_member(directory: &InMemoryDirectory, name: &str) -> MemberId {
    let id = MemberId::new();
    directory.insert_member(Member {
        id,
        name: name.to_string(),
        email: None,
        department_id: None,
        active: true,
    });
    id
}

fn seed() -> Seed {
    let users = Arc::new(InMemoryUserStore::new());
    let directory = Arc::new(InMemoryDirectory::new());

    seed_user(&users, "auth0|admin", Role::Admin);
    let pastor_user_id = seed_user(&users, "auth0|pastor", Role::Pastor);
    let member_user_id = seed_user(&users, "auth0|member", Role::Member);
    seed_user(&users, "auth0|shepherd", Role::Shepherd);

    let shepherd = seed_member(&directory, "Sam Shepherd");
    directory.link_identity("auth0|shepherd", shepherd);

    let ada = seed_member(&directory, "Ada Obi");
    let ben = seed_member(&directory, "Ben Udo");
    let unassigned = seed_member(&directory, "Cyn Eze");
    for assigned in [ada, ben] {
        directory.insert_assignment(ShepherdAssignment {
            id: AssignmentId::new(),
            shepherd_member_id: shepherd,
            member_id: assigned,
            active: true,
        });
    }

    Seed {
        users,
        directory,
        member_user_id,
        pastor_user_id,
        assigned: vec![ada, ben],
        unassigned,
    }
}

async fn spawn_seeded() -> (TestServer, Seed) {
    let seed = seed();
    let state = AppState::new(
        SECRET.as_bytes(),
        seed.users.clone(),
        seed.directory.clone(),
    );
    (TestServer::spawn(state).await, seed)
}

fn mint_token(identity: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: identity.to_string(),
        email: format!("{}@example.com", identity.trim_start_matches("auth0|")),
        iat: now,
        exp: now + 600,
    };
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("failed to encode session token")
}

/// Client that does not follow redirects, so 303 targets can be asserted.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

fn cookies(identity: &str, role_hint: Option<&str>) -> String {
    let token = mint_token(identity);
    match role_hint {
        Some(role) => format!("flock_session={token}; role_hint={role}"),
        None => format!("flock_session={token}"),
    }
}

fn location(res: &reqwest::Response) -> &str {
    res.headers()["location"].to_str().unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Edge interceptor
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unauthenticated_finance_redirects_to_login() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .get(format!("{}/finance", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login");
}

#[tokio::test]
async fn member_role_on_finance_redirects_to_unauthorized() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .get(format!("{}/finance", server.base_url))
        .header("Cookie", cookies("auth0|member", Some("member")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/unauthorized");
}

#[tokio::test]
async fn admin_on_finance_gets_the_handler_response() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .get(format!("{}/finance", server.base_url))
        .header("Cookie", cookies("auth0|admin", Some("admin")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["page"], "finance");
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn missing_role_hint_fails_closed_at_the_edge() {
    let (server, _seed) = spawn_seeded().await;

    // Valid admin session but no hint cookie: the edge assumes the lowest
    // role and bounces the coarse check.
    let res = client()
        .get(format!("{}/finance", server.base_url))
        .header("Cookie", cookies("auth0|admin", None))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/unauthorized");
}

#[tokio::test]
async fn unmatched_prefix_is_authenticated_only() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .get(format!("{}/whoami", server.base_url))
        .header("Cookie", cookies("auth0|member", Some("member")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "member");
}

#[tokio::test]
async fn reverse_guard_bounces_authenticated_login_visit() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .get(format!("{}/login", server.base_url))
        .header("Cookie", cookies("auth0|member", Some("member")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/dashboard");
}

// ─────────────────────────────────────────────────────────────────────────────
// Page guard
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn shepherd_gets_soft_redirect_from_event_creation() {
    let (server, _seed) = spawn_seeded().await;

    // /events admits shepherds at the edge, but events:create is not granted:
    // soft landing, not a bounce to login.
    let res = client()
        .get(format!("{}/events/new", server.base_url))
        .header("Cookie", cookies("auth0|shepherd", Some("shepherd")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/dashboard?error=unauthorized");
}

#[tokio::test]
async fn forged_role_hint_cannot_reach_member_data() {
    let (server, _seed) = spawn_seeded().await;

    // A member forging role_hint=admin slips past the coarse edge check, but
    // the page guard re-resolves the role from the store.
    let res = client()
        .get(format!("{}/members", server.base_url))
        .header("Cookie", cookies("auth0|member", Some("admin")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/dashboard?error=unauthorized");
}

// ─────────────────────────────────────────────────────────────────────────────
// Query-level scoping
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn shepherd_member_list_is_scoped_to_assignments() {
    let (server, seed) = spawn_seeded().await;

    let res = client()
        .get(format!("{}/members", server.base_url))
        .header("Cookie", cookies("auth0|shepherd", Some("shepherd")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let mut ids: Vec<String> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect();
    ids.sort();

    let mut expected: Vec<String> = seed.assigned.iter().map(|id| id.to_string()).collect();
    expected.sort();
    assert_eq!(ids, expected);
    assert!(!ids.contains(&seed.unassigned.to_string()));
}

#[tokio::test]
async fn admin_member_list_is_unrestricted() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .get(format!("{}/members", server.base_url))
        .header("Cookie", cookies("auth0|admin", Some("admin")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    // Sam, Ada, Ben, Cyn
    assert_eq!(body["items"].as_array().unwrap().len(), 4);
}

// ─────────────────────────────────────────────────────────────────────────────
// Login / session refresh
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn login_sets_session_and_role_hint_cookies() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .post(format!("{}/login", server.base_url))
        .json(&serde_json::json!({ "token": mint_token("auth0|shepherd") }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    let set_cookies: Vec<String> = res
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();

    let session = set_cookies
        .iter()
        .find(|c| c.starts_with("flock_session="))
        .expect("session cookie not set");
    assert!(session.contains("HttpOnly"));

    let hint = set_cookies
        .iter()
        .find(|c| c.starts_with("role_hint="))
        .expect("role hint cookie not set");
    assert!(hint.starts_with("role_hint=shepherd"));
    assert!(hint.contains("Max-Age=604800"));
    assert!(hint.contains("SameSite=Lax"));
    assert!(!hint.contains("HttpOnly"));

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["role"], "shepherd");
}

#[tokio::test]
async fn login_rejects_invalid_token() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .post(format!("{}/login", server.base_url))
        .json(&serde_json::json!({ "token": "garbage" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_session");
}

#[tokio::test]
async fn first_login_lazily_creates_a_member_record() {
    let (server, seed) = spawn_seeded().await;

    let res = client()
        .post(format!("{}/login", server.base_url))
        .json(&serde_json::json!({ "token": mint_token("auth0|newcomer") }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["role"], "member");

    let record = seed
        .users
        .find_by_identity("auth0|newcomer")
        .unwrap()
        .expect("record not created");
    assert_eq!(record.role, Role::Member);
}

// ─────────────────────────────────────────────────────────────────────────────
// Administrative role reassignment
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_reassigns_a_member_to_shepherd() {
    let (server, seed) = spawn_seeded().await;

    let res = client()
        .patch(format!(
            "{}/admin/users/{}/role",
            server.base_url, seed.member_user_id
        ))
        .header("Cookie", cookies("auth0|admin", Some("admin")))
        .json(&serde_json::json!({ "role": "shepherd" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["role"], "shepherd");

    assert_eq!(
        seed.users.find_role_by_identity("auth0|member").unwrap(),
        Some(Role::Shepherd)
    );
}

#[tokio::test]
async fn admin_cannot_manage_a_senior_role() {
    let (server, seed) = spawn_seeded().await;

    let res = client()
        .patch(format!(
            "{}/admin/users/{}/role",
            server.base_url, seed.pastor_user_id
        ))
        .header("Cookie", cookies("auth0|admin", Some("admin")))
        .json(&serde_json::json!({ "role": "member" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "cannot_manage");

    // No silent change either.
    assert_eq!(
        seed.users.find_role_by_identity("auth0|pastor").unwrap(),
        Some(Role::Pastor)
    );
}

#[tokio::test]
async fn admin_cannot_grant_a_role_at_or_above_its_own() {
    let (server, seed) = spawn_seeded().await;

    let res = client()
        .patch(format!(
            "{}/admin/users/{}/role",
            server.base_url, seed.member_user_id
        ))
        .header("Cookie", cookies("auth0|admin", Some("admin")))
        .json(&serde_json::json!({ "role": "super_admin" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "cannot_manage");
}

#[tokio::test]
async fn unknown_role_name_is_rejected() {
    let (server, seed) = spawn_seeded().await;

    let res = client()
        .patch(format!(
            "{}/admin/users/{}/role",
            server.base_url, seed.member_user_id
        ))
        .header("Cookie", cookies("auth0|admin", Some("admin")))
        .json(&serde_json::json!({ "role": "warlord" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_role");
}

#[tokio::test]
async fn registry_introspection_requires_users_manage() {
    let (server, _seed) = spawn_seeded().await;

    let res = client()
        .get(format!("{}/admin/roles", server.base_url))
        .header("Cookie", cookies("auth0|admin", Some("admin")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let roles = body["roles"].as_array().unwrap();
    assert_eq!(roles.len(), 7);
    let finance_roles: Vec<&str> = roles
        .iter()
        .filter(|r| {
            r["permissions"]
                .as_array()
                .unwrap()
                .iter()
                .any(|p| p == "finance:view")
        })
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert!(finance_roles.contains(&"treasurer"));
    assert!(!finance_roles.contains(&"shepherd"));

    // A shepherd forging the hint passes the edge but fails the strict guard.
    let res = client()
        .get(format!("{}/admin/roles", server.base_url))
        .header("Cookie", cookies("auth0|shepherd", Some("admin")))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");
}
