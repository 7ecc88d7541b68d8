//! Integrationstests fuer die Gatehouse-REST-API
//!
//! Baut die komplette Axum-App mit einer In-Memory-Datenbank und feuert
//! echte Requests ueber `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use gatehouse_auth::{passwort_hashen, AuthService, TokenDienst, BENUTZER_TOKEN_SEKUNDEN};
use gatehouse_db::{models::NeuerAdmin, AdminRepository, SqliteDb};
use gatehouse_server::rest::{app, GatehouseState};

const GEHEIMNIS: &str = "integrations_geheimnis";

/// Baut die App mit In-Memory-Datenbank und einem geseedeten Admin
/// ("root" / "admin_pw")
async fn test_app() -> Router {
    let db = Arc::new(SqliteDb::in_memory().await.unwrap());

    let hash = passwort_hashen("admin_pw").unwrap();
    AdminRepository::create(
        db.as_ref(),
        NeuerAdmin {
            username: "root",
            email: "root@x.com",
            password_hash: &hash,
        },
    )
    .await
    .unwrap();

    let token_dienst = TokenDienst::neu(GEHEIMNIS);
    let auth = Arc::new(AuthService::neu(
        Arc::clone(&db),
        Arc::clone(&db),
        token_dienst.clone(),
    ));

    app(GatehouseState::neu(auth, token_dienst), &[])
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request_mit_token(method: Method, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn antwort_json(antwort: axum::response::Response) -> Value {
    let bytes = antwort.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn registrieren(app: &Router, username: &str, email: &str, passwort: &str) -> StatusCode {
    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/register",
            json!({ "username": username, "email": email, "password": passwort }),
        ))
        .await
        .unwrap();
    antwort.status()
}

async fn admin_token(app: &Router) -> String {
    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/admin/login",
            json!({ "username": "root", "password": "admin_pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    antwort_json(antwort).await["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpunkt() {
    let app = test_app().await;

    let antwort = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    assert_eq!(antwort_json(antwort).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn vollstaendiger_freigabe_ablauf() {
    let app = test_app().await;

    // Registrierung legt ein PENDING-Konto an, ohne Token
    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/register",
            json!({ "username": "alice", "email": "a@x.com", "password": "Pw1!" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CREATED);
    let body = antwort_json(antwort).await;
    assert_eq!(body["message"], "Registration successful. Awaiting approval.");
    assert!(body.get("token").is_none(), "Registrierung stellt nie einen Token aus");

    // Login vor der Freigabe ist blockiert
    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/login",
            json!({ "username": "alice", "password": "Pw1!" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::FORBIDDEN);
    assert_eq!(antwort_json(antwort).await["error"], "Account status: PENDING.");

    // Admin meldet sich an und sieht alice in der Warteliste
    let token = admin_token(&app).await;
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::GET,
            "/admin/pending-users",
            &token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let wartende = antwort_json(antwort).await;
    let eintrag = &wartende.as_array().unwrap()[0];
    assert_eq!(eintrag["username"], "alice");
    assert_eq!(eintrag["status"], "PENDING");
    assert!(eintrag.get("password_hash").is_none(), "Hash darf nie auf den Draht");
    let alice_id = eintrag["id"].as_str().unwrap().to_string();

    // Freigabe
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::PATCH,
            &format!("/admin/user/{alice_id}/status"),
            &token,
            json!({ "action": "APPROVE" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    assert_eq!(antwort_json(antwort).await["message"], "User approved.");

    // Jetzt klappt der Login
    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/login",
            json!({ "username": "alice", "password": "Pw1!" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let body = antwort_json(antwort).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@x.com");
    assert!(!body["token"].as_str().unwrap().is_empty());

    // Falsches Passwort bleibt 401, identisch zu unbekanntem Benutzer
    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/login",
            json!({ "username": "alice", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(antwort_json(antwort).await["error"], "Invalid credentials.");

    // Ablehnung nach Freigabe blockiert sofort wieder
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::PATCH,
            &format!("/admin/user/{alice_id}/status"),
            &token,
            json!({ "action": "REJECT" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort_json(antwort).await["message"], "User rejected.");

    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/login",
            json!({ "username": "alice", "password": "Pw1!" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::FORBIDDEN);
    assert_eq!(antwort_json(antwort).await["error"], "Account status: REJECTED.");
}

#[tokio::test]
async fn doppelte_registrierung_ist_konflikt() {
    let app = test_app().await;
    assert_eq!(registrieren(&app, "bob", "b@x.com", "pw").await, StatusCode::CREATED);

    // Gleicher Username, andere E-Mail
    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/register",
            json!({ "username": "bob", "email": "neu@x.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CONFLICT);
    assert_eq!(antwort_json(antwort).await["error"], "Username or email already exists.");

    // Gleiche E-Mail, anderer Username – identische Meldung
    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/register",
            json!({ "username": "neu", "email": "b@x.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::CONFLICT);
    assert_eq!(antwort_json(antwort).await["error"], "Username or email already exists.");
}

#[tokio::test]
async fn fehlende_felder_sind_validierungsfehler() {
    let app = test_app().await;

    let antwort = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users/register",
            json!({ "username": "alice" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);
    assert_eq!(antwort_json(antwort).await["error"], "All fields are required.");

    let antwort = app
        .clone()
        .oneshot(json_request(Method::POST, "/users/login", json!({})))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        antwort_json(antwort).await["error"],
        "Username and password are required."
    );
}

#[tokio::test]
async fn admin_routen_sind_geschuetzt() {
    let app = test_app().await;

    // Ohne Authorization-Header
    let antwort = app
        .clone()
        .oneshot(get_request("/admin/pending-users"))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(antwort_json(antwort).await["error"], "No token provided.");

    // Mit Muell-Token
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::GET,
            "/admin/pending-users",
            "kein.echter.token",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(antwort_json(antwort).await["error"], "Invalid or expired token.");

    // Mit korrekt signiertem Benutzer-Token (ohne Admin-Anspruch)
    let benutzer_token = TokenDienst::neu(GEHEIMNIS)
        .ausstellen(Uuid::new_v4(), "alice", "a@x.com", false, BENUTZER_TOKEN_SEKUNDEN)
        .unwrap();
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::GET,
            "/admin/pending-users",
            &benutzer_token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::FORBIDDEN);
    assert_eq!(antwort_json(antwort).await["error"], "Admin access required.");

    // Mit fremd signiertem Admin-Token
    let fremder_token = TokenDienst::neu("anderes_geheimnis")
        .ausstellen(Uuid::new_v4(), "root", "root@x.com", true, BENUTZER_TOKEN_SEKUNDEN)
        .unwrap();
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::GET,
            "/admin/pending-users",
            &fremder_token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn status_setzen_randfaelle() {
    let app = test_app().await;
    let token = admin_token(&app).await;

    // Unbekannte ID
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::PATCH,
            &format!("/admin/user/{}/status", Uuid::new_v4()),
            &token,
            json!({ "action": "APPROVE" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::NOT_FOUND);
    assert_eq!(antwort_json(antwort).await["error"], "User not found.");

    // Nicht parsbare ID
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::PATCH,
            "/admin/user/keine-uuid/status",
            &token,
            json!({ "action": "APPROVE" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::NOT_FOUND);

    // Unbekannte Aktion auf bekannter ID
    registrieren(&app, "carol", "c@x.com", "pw").await;
    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(Method::GET, "/admin/pending-users", &token, json!({})))
        .await
        .unwrap();
    let wartende = antwort_json(antwort).await;
    let carol_id = wartende.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();

    let antwort = app
        .clone()
        .oneshot(json_request_mit_token(
            Method::PATCH,
            &format!("/admin/user/{carol_id}/status"),
            &token,
            json!({ "action": "MAYBE" }),
        ))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);
    assert_eq!(antwort_json(antwort).await["error"], "Invalid action.");
}

#[tokio::test]
async fn statusabfrage() {
    let app = test_app().await;
    registrieren(&app, "dora", "d@x.com", "pw").await;

    let antwort = app
        .clone()
        .oneshot(get_request("/users/status?username=dora"))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let body = antwort_json(antwort).await;
    assert_eq!(body["username"], "dora");
    assert_eq!(body["email"], "d@x.com");
    assert_eq!(body["status"], "PENDING");

    let antwort = app
        .clone()
        .oneshot(get_request("/users/status?email=d@x.com"))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);

    let antwort = app.clone().oneshot(get_request("/users/status")).await.unwrap();
    assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);
    assert_eq!(antwort_json(antwort).await["error"], "Username or email is required.");

    let antwort = app
        .clone()
        .oneshot(get_request("/users/status?username=niemand"))
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::NOT_FOUND);
    assert_eq!(antwort_json(antwort).await["error"], "User not found.");
}
