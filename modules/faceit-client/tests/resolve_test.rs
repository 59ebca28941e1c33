//! Resolve tests against an in-process stub of the FACEIT Data API.
//!
//! Each test: configure canned responses → resolve() → assert the outcome and
//! which endpoints were hit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use faceit_client::{ClientSettings, FaceitClient, LookupOutcome};

const STEAM_ID: &str = "76561198000000000";

#[derive(Default)]
struct StubApi {
    primary: (u16, String),
    fallback: (u16, String),
    profiles: HashMap<String, (u16, String)>,
    /// One entry per request: "primary", "fallback" or "profile:<id>".
    hits: Mutex<Vec<String>>,
    auth_headers: Mutex<Vec<String>>,
}

impl StubApi {
    fn primary(mut self, status: u16, body: &str) -> Self {
        self.primary = (status, body.to_string());
        self
    }

    fn fallback(mut self, status: u16, body: &str) -> Self {
        self.fallback = (status, body.to_string());
        self
    }

    fn profile(mut self, account_id: &str, status: u16, body: &str) -> Self {
        self.profiles
            .insert(account_id.to_string(), (status, body.to_string()));
        self
    }

    fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    fn record(&self, hit: String, headers: &HeaderMap) {
        self.hits.lock().unwrap().push(hit);
        if let Some(auth) = headers.get("authorization") {
            self.auth_headers
                .lock()
                .unwrap()
                .push(auth.to_str().unwrap_or_default().to_string());
        }
    }
}

fn reply((status, body): &(u16, String)) -> (StatusCode, String) {
    (StatusCode::from_u16(*status).unwrap(), body.clone())
}

async fn players(
    State(api): State<Arc<StubApi>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    assert_eq!(query.get("game").map(String::as_str), Some("cs2"));
    assert_eq!(query.get("game_player_id").map(String::as_str), Some(STEAM_ID));

    if let Some(name) = query.get("game_player_name") {
        api.record(format!("fallback:{name}"), &headers);
        reply(&api.fallback)
    } else {
        api.record("primary".to_string(), &headers);
        reply(&api.primary)
    }
}

async fn profile(
    State(api): State<Arc<StubApi>>,
    headers: HeaderMap,
    Path(account_id): Path<String>,
) -> (StatusCode, String) {
    api.record(format!("profile:{account_id}"), &headers);
    match api.profiles.get(&account_id) {
        Some(canned) => reply(canned),
        None => (StatusCode::NOT_FOUND, "{}".to_string()),
    }
}

/// Serve the stub on an ephemeral port and return a client pointed at it.
async fn start(api: StubApi) -> (FaceitClient, Arc<StubApi>) {
    let api = Arc::new(api);
    let app = Router::new()
        .route("/players", get(players))
        .route("/players/{account_id}", get(profile))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = FaceitClient::new(
        ClientSettings::new("test-key")
            .with_base_url(format!("http://{addr}"))
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap();
    (client, api)
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn found_level_from_profile() {
    let (client, api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc-123","nickname":"s1mple"}"#)
            .profile("abc-123", 200, r#"{"games":{"cs2":{"skill_level":7}}}"#),
    )
    .await;

    let outcome = client.resolve(STEAM_ID, "player").await;

    assert_eq!(outcome, LookupOutcome::Found { level: 7 });
    assert_eq!(api.hits(), vec!["primary", "profile:abc-123"]);
}

#[tokio::test]
async fn sends_bearer_credential_on_every_request() {
    let (client, api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc-123"}"#)
            .profile("abc-123", 200, r#"{"games":{"cs2":{"skill_level":1}}}"#),
    )
    .await;

    client.resolve(STEAM_ID, "player").await;

    let auth = api.auth_headers.lock().unwrap().clone();
    assert_eq!(auth, vec!["Bearer test-key", "Bearer test-key"]);
}

#[tokio::test]
async fn level_zero_is_found() {
    let (client, _api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc-123"}"#)
            .profile("abc-123", 200, r#"{"games":{"cs2":{"skill_level":0}}}"#),
    )
    .await;

    assert_eq!(
        client.resolve(STEAM_ID, "player").await,
        LookupOutcome::Found { level: 0 }
    );
}

#[tokio::test]
async fn realistic_profile_with_other_games() {
    let (client, _api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc-123","nickname":"s1mple","games":{"cs2":{}}}"#)
            .profile(
                "abc-123",
                200,
                r#"{
                    "player_id": "abc-123",
                    "nickname": "s1mple",
                    "country": "ua",
                    "games": {
                        "cs2": {"skill_level": 7, "faceit_elo": 1850, "region": "EU"},
                        "csgo": null,
                        "lol": {"skill_level": "gold"},
                        "other": {"skill_level": -1}
                    }
                }"#,
            ),
    )
    .await;

    assert_eq!(
        client.resolve(STEAM_ID, "player").await,
        LookupOutcome::Found { level: 7 }
    );
}

#[tokio::test]
async fn account_id_stays_one_path_segment() {
    let (client, api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc/def?x=1"}"#)
            .profile("abc/def?x=1", 200, r#"{"games":{"cs2":{"skill_level":2}}}"#),
    )
    .await;

    assert_eq!(
        client.resolve(STEAM_ID, "player").await,
        LookupOutcome::Found { level: 2 }
    );
    assert_eq!(api.hits(), vec!["primary", "profile:abc/def?x=1"]);
}

// ---------------------------------------------------------------------------
// Fallback query
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_retries_with_player_name() {
    let (client, api) = start(
        StubApi::default()
            .primary(400, r#"{"errors":[{"message":"bad request"}]}"#)
            .fallback(200, r#"{"player_id":"from-fallback"}"#)
            .profile("from-fallback", 200, r#"{"games":{"cs2":{"skill_level":4}}}"#),
    )
    .await;

    let outcome = client.resolve(STEAM_ID, "Some Player").await;

    assert_eq!(outcome, LookupOutcome::Found { level: 4 });
    assert_eq!(
        api.hits(),
        vec!["primary", "fallback:Some Player", "profile:from-fallback"]
    );
}

#[tokio::test]
async fn server_error_does_not_retry() {
    let (client, api) = start(StubApi::default().primary(500, "internal error")).await;

    let outcome = client.resolve(STEAM_ID, "player").await;

    assert!(matches!(outcome, LookupOutcome::Failed { .. }), "got {outcome:?}");
    assert_eq!(api.hits(), vec!["primary"]);
}

#[tokio::test]
async fn failed_fallback_is_failure() {
    let (client, api) = start(
        StubApi::default()
            .primary(404, r#"{"errors":[]}"#)
            .fallback(404, r#"{"errors":[]}"#),
    )
    .await;

    let outcome = client.resolve(STEAM_ID, "player").await;

    match outcome {
        LookupOutcome::Failed { reason } => assert!(reason.contains("404"), "reason: {reason}"),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(api.hits(), vec!["primary", "fallback:player"]);
}

// ---------------------------------------------------------------------------
// NotFound vs Failed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_game_rating_is_not_found() {
    let (client, _api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc-123"}"#)
            .profile("abc-123", 200, r#"{"games":{"csgo":{"skill_level":9}}}"#),
    )
    .await;

    assert_eq!(client.resolve(STEAM_ID, "player").await, LookupOutcome::NotFound);
}

#[tokio::test]
async fn empty_account_id_is_not_found() {
    let (client, api) = start(StubApi::default().primary(200, r#"{"player_id":""}"#)).await;

    assert_eq!(client.resolve(STEAM_ID, "player").await, LookupOutcome::NotFound);
    assert_eq!(api.hits(), vec!["primary"]);
}

#[tokio::test]
async fn null_account_id_is_not_found() {
    let (client, api) = start(StubApi::default().primary(
        200,
        r#"{"player_id":null,"nickname":"ghost","games":{"cs2":{"skill_level":5}}}"#,
    ))
    .await;

    assert_eq!(client.resolve(STEAM_ID, "player").await, LookupOutcome::NotFound);
    assert_eq!(api.hits(), vec!["primary"]);
}

#[tokio::test]
async fn null_game_entry_is_not_found() {
    let (client, _api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc-123"}"#)
            .profile("abc-123", 200, r#"{"games":{"cs2":null,"csgo":{"skill_level":9}}}"#),
    )
    .await;

    assert_eq!(client.resolve(STEAM_ID, "player").await, LookupOutcome::NotFound);
}

#[tokio::test]
async fn malformed_lookup_body_is_failure() {
    let (client, _api) = start(StubApi::default().primary(200, "<html>oops</html>")).await;

    let outcome = client.resolve(STEAM_ID, "player").await;

    assert!(matches!(outcome, LookupOutcome::Failed { .. }), "got {outcome:?}");
}

#[tokio::test]
async fn negative_rating_is_failure() {
    let (client, _api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc-123"}"#)
            .profile("abc-123", 200, r#"{"games":{"cs2":{"skill_level":-1}}}"#),
    )
    .await;

    let outcome = client.resolve(STEAM_ID, "player").await;

    assert!(matches!(outcome, LookupOutcome::Failed { .. }), "got {outcome:?}");
}

#[tokio::test]
async fn profile_error_status_is_failure() {
    let (client, _api) = start(
        StubApi::default()
            .primary(200, r#"{"player_id":"abc-123"}"#)
            .profile("abc-123", 503, "unavailable"),
    )
    .await;

    let outcome = client.resolve(STEAM_ID, "player").await;

    assert!(matches!(outcome, LookupOutcome::Failed { .. }), "got {outcome:?}");
}

#[tokio::test]
async fn unreachable_host_is_failure() {
    let client = FaceitClient::new(
        ClientSettings::new("test-key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2)),
    )
    .unwrap();

    let outcome = client.resolve(STEAM_ID, "player").await;

    assert!(matches!(outcome, LookupOutcome::Failed { .. }), "got {outcome:?}");
}
