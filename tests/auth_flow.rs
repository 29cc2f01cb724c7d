//! End-to-end tests for the auth gate, login flow, and role-gated routes.
//!
//! Each test builds the full router against a throwaway SQLite file and
//! drives it with `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use newsdesk_backend::{
    api::{create_router, AppState},
    auth::{models::Role, password::hash_password, JwtHandler, UserStore, AUTH_HEADER},
    news::PostStore,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    app: Router,
    user_store: Arc<UserStore>,
    post_store: Arc<PostStore>,
    jwt_handler: Arc<JwtHandler>,
    _db: NamedTempFile,
}

fn test_app() -> TestApp {
    let db = NamedTempFile::new().unwrap();
    let db_path = db.path().to_str().unwrap();

    let user_store = Arc::new(UserStore::new(db_path).unwrap());
    let post_store = Arc::new(PostStore::new(db_path).unwrap());
    let jwt_handler = Arc::new(JwtHandler::new("integration-test-secret".to_string()));

    let state = AppState::new(
        user_store.clone(),
        post_store.clone(),
        jwt_handler.clone(),
    );

    TestApp {
        app: create_router(state),
        user_store,
        post_store,
        jwt_handler,
        _db: db,
    }
}

impl TestApp {
    fn seed_user(&self, email: &str, password: &str, role: Role) -> (Uuid, String) {
        let hash = hash_password(password).unwrap();
        let user = self
            .user_store
            .create_user(email.split('@').next().unwrap(), email, &hash, role)
            .unwrap();
        let token = self.jwt_handler.issue_token(user.id, user.role).unwrap();
        (user.id, token)
    }

    async fn request(&self, req: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTH_HEADER, token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn request_no_body(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTH_HEADER, token);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn gate_rejects_missing_token() {
    let t = test_app();

    let (status, body) = t.request(request_no_body("POST", "/news-posts", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        body["message"],
        json!("No authentication token, access denied")
    );
}

#[tokio::test]
async fn gate_rejects_foreign_signature() {
    let t = test_app();

    let stranger = JwtHandler::new("some-other-secret".to_string());
    let token = stranger.issue_token(Uuid::new_v4(), Role::Admin).unwrap();

    let (status, body) = t
        .request(request_no_body("POST", "/news-posts", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        json!("Token verification failed, authorization denied")
    );
}

#[tokio::test]
async fn gate_accepts_token_of_deleted_identity() {
    // The gate trusts the token alone; it never re-checks the store, so a
    // deleted user's token still passes.
    let t = test_app();

    let (id, token) = t.seed_user("ghost@example.com", "pw", Role::User);
    t.user_store.delete_user(&id).unwrap();

    let (status, body) = t
        .request(request_no_body("POST", "/news-posts", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn login_returns_token_and_sanitized_user() {
    let t = test_app();
    t.seed_user("reader@example.com", "secretpw", Role::User);

    let (status, body) = t
        .request(post_json(
            "/login",
            None,
            json!({ "email": "reader@example.com", "password": "secretpw" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], json!("reader@example.com"));
    // The hash must never appear in a response body
    assert!(body["user"].get("password_hash").is_none());

    // The issued token passes the gate
    let token = body["token"].as_str().unwrap().to_string();
    let (status, _) = t
        .request(request_no_body("POST", "/news-posts", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_rejects_wrong_password_with_401() {
    let t = test_app();
    t.seed_user("reader@example.com", "secretpw", Role::User);

    let (status, body) = t
        .request(post_json(
            "/login",
            None,
            json!({ "email": "reader@example.com", "password": "wrong" }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    // Unknown email gets the same answer
    let (status, _) = t
        .request(post_json(
            "/login",
            None,
            json!({ "email": "nobody@example.com", "password": "wrong" }),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_short_circuits_for_live_session() {
    let t = test_app();
    let (_, token) = t.seed_user("reader@example.com", "secretpw", Role::User);

    // Wrong credentials in the body, valid session in the header: success
    // without a fresh token.
    let (status, body) = t
        .request(post_json(
            "/login",
            Some(&token),
            json!({ "email": "reader@example.com", "password": "wrong" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn register_is_gated() {
    let t = test_app();

    let (status, _) = t
        .request(post_json(
            "/register",
            None,
            json!({ "name": "new", "email": "new@example.com", "password": "pw", "role": "user" }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_validates_and_detects_duplicates() {
    let t = test_app();
    let (_, token) = t.seed_user("existing@example.com", "pw", Role::User);

    // Blank field
    let (status, body) = t
        .request(post_json(
            "/register",
            Some(&token),
            json!({ "name": "", "email": "a@example.com", "password": "pw", "role": "user" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("One or more of the fields is not present")
    );

    // Duplicate email
    let (status, body) = t
        .request(post_json(
            "/register",
            Some(&token),
            json!({ "name": "dup", "email": "existing@example.com", "password": "pw", "role": "user" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        json!("An account with the email specified exists")
    );

    // Happy path, no auto-login
    let (status, body) = t
        .request(post_json(
            "/register",
            Some(&token),
            json!({ "name": "new", "email": "new@example.com", "password": "pw", "role": "user" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Account created successfully"));
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn register_accepts_self_assigned_admin_role() {
    // Any authenticated caller can mint an admin account. Undesirable, but
    // it is how the service behaves; this test pins the behavior down.
    let t = test_app();
    let (_, token) = t.seed_user("pleb@example.com", "pw", Role::User);

    let (status, _) = t
        .request(post_json(
            "/register",
            Some(&token),
            json!({ "name": "shadow", "email": "shadow@example.com", "password": "pw", "role": "admin" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let created = t
        .user_store
        .find_by_email("shadow@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(created.role, Role::Admin);
}

#[tokio::test]
async fn token_is_valid_reports_session_state() {
    let t = test_app();

    // No token: not a session, but not a rejection either
    let (status, body) = t
        .request(request_no_body("POST", "/users/token-is-valid", None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["user"], Value::Null);

    // Valid session
    let (id, token) = t.seed_user("live@example.com", "pw", Role::User);
    let (status, body) = t
        .request(request_no_body(
            "POST",
            "/users/token-is-valid",
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["email"], json!("live@example.com"));

    // Unlike the gate, the session check consults the store: a deleted
    // identity is no longer a session.
    t.user_store.delete_user(&id).unwrap();
    let (status, body) = t
        .request(request_no_body(
            "POST",
            "/users/token-is-valid",
            Some(&token),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn publish_post_is_admin_only() {
    let t = test_app();
    let (user_id, user_token) = t.seed_user("author@example.com", "pw", Role::User);
    let (_, admin_token) = t.seed_user("chief@example.com", "pw", Role::Admin);

    let post = t
        .post_store
        .create_post("Scoop", "politics", "Exclusive.", &user_id)
        .unwrap();

    let (status, _) = t
        .request(post_json(
            "/publish-post",
            Some(&user_token),
            json!({ "postId": post.id }),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .request(post_json(
            "/publish-post",
            Some(&admin_token),
            json!({ "postId": post.id }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["published"], json!(true));

    // Published posts surface on the public feed
    let (status, body) = t
        .request(request_no_body("GET", "/all-news-posts", None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn post_listing_is_scoped_by_role() {
    let t = test_app();
    let (alice_id, alice_token) = t.seed_user("alice@example.com", "pw", Role::User);
    let (bob_id, _) = t.seed_user("bob@example.com", "pw", Role::User);
    let (_, admin_token) = t.seed_user("chief@example.com", "pw", Role::Admin);

    t.post_store
        .create_post("Alice's", "tech", "a", &alice_id)
        .unwrap();
    t.post_store
        .create_post("Bob's", "tech", "b", &bob_id)
        .unwrap();

    let (_, body) = t
        .request(request_no_body("POST", "/news-posts", Some(&alice_token)))
        .await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);
    assert_eq!(body["posts"][0]["postTitle"], json!("Alice's"));

    let (_, body) = t
        .request(request_no_body("POST", "/news-posts", Some(&admin_token)))
        .await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_post_rejects_duplicate_title() {
    let t = test_app();
    let (_, token) = t.seed_user("author@example.com", "pw", Role::User);

    let body = json!({ "postTitle": "Once", "category": "tech", "newsContent": "first" });
    let (status, _) = t
        .request(post_json("/create-news-post", Some(&token), body.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, resp) = t
        .request(post_json("/create-news-post", Some(&token), body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        resp["message"],
        json!("A post with that title already exists, Please choose another title")
    );
}

#[tokio::test]
async fn profile_update_enforces_ownership() {
    let t = test_app();
    let (alice_id, alice_token) = t.seed_user("alice@example.com", "pw", Role::User);
    let (bob_id, _) = t.seed_user("bob@example.com", "pw", Role::User);
    let (_, admin_token) = t.seed_user("chief@example.com", "pw", Role::Admin);

    // A user may not touch someone else's record
    let (status, _) = t
        .request(post_json(
            "/update-user-record",
            Some(&alice_token),
            json!({ "userId": bob_id, "name": "hacked", "email": "", "role": "", "password": "" }),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Self-service works
    let (status, _) = t
        .request(post_json(
            "/update-user-record",
            Some(&alice_token),
            json!({ "userId": alice_id, "name": "alicia", "email": "", "role": "", "password": "" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let alice = t.user_store.find_by_id(&alice_id).unwrap().unwrap();
    assert_eq!(alice.name, "alicia");

    // Admins may touch anyone, and an invalid role string is ignored
    let (status, _) = t
        .request(post_json(
            "/update-user-record",
            Some(&admin_token),
            json!({ "userId": bob_id, "name": "robert", "email": "", "role": "overlord", "password": "" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let bob = t.user_store.find_by_id(&bob_id).unwrap().unwrap();
    assert_eq!(bob.name, "robert");
    assert_eq!(bob.role, Role::User);
}

#[tokio::test]
async fn user_deletion_is_admin_only() {
    let t = test_app();
    let (_, user_token) = t.seed_user("pleb@example.com", "pw", Role::User);
    let (_, admin_token) = t.seed_user("chief@example.com", "pw", Role::Admin);
    let (victim_id, _) = t.seed_user("victim@example.com", "pw", Role::User);

    let (status, _) = t
        .request(request_no_body(
            "DELETE",
            &format!("/delete-user/{victim_id}"),
            Some(&user_token),
        ))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .request(request_no_body(
            "DELETE",
            &format!("/delete-user/{victim_id}"),
            Some(&admin_token),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User's record deleted"));
    assert!(t.user_store.find_by_id(&victim_id).unwrap().is_none());
}

#[tokio::test]
async fn fetch_post_is_public_and_404s_on_miss() {
    let t = test_app();
    let (author_id, _) = t.seed_user("author@example.com", "pw", Role::User);
    let post = t
        .post_store
        .create_post("Readable", "tech", "r", &author_id)
        .unwrap();

    let (status, body) = t
        .request(request_no_body(
            "POST",
            &format!("/fetch-post/{}", post.id),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["postTitle"], json!("Readable"));

    let (status, _) = t
        .request(request_no_body(
            "POST",
            &format!("/fetch-post/{}", Uuid::new_v4()),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_post_reowns_to_caller_and_unpublishes() {
    let t = test_app();
    let (author_id, _) = t.seed_user("author@example.com", "pw", Role::User);
    let (editor_id, editor_token) = t.seed_user("editor@example.com", "pw", Role::User);

    let post = t
        .post_store
        .create_post("Draft", "tech", "d", &author_id)
        .unwrap();
    t.post_store.toggle_published(&post.id).unwrap();

    let req = Request::builder()
        .method("PUT")
        .uri("/update-news-post")
        .header("content-type", "application/json")
        .header(AUTH_HEADER, editor_token.as_str())
        .body(Body::from(
            json!({
                "_id": post.id,
                "postTitle": "Edited",
                "category": "tech",
                "newsContent": "edited"
            })
            .to_string(),
        ))
        .unwrap();
    let (status, _) = t.request(req).await;
    assert_eq!(status, StatusCode::OK);

    let updated = t.post_store.find_by_id(&post.id).unwrap().unwrap();
    assert_eq!(updated.post_title, "Edited");
    assert_eq!(updated.user_id, editor_id);
    assert!(!updated.published);
}
