use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use genresort::{
    config::Config,
    error::OrganizeError,
    gemini::GeminiClient,
    organize::{ArtistGenreSource, PlaylistSource, TextModel},
    spotify::{MAX_RETRIES, SpotifyClient},
};
use serde_json::{Value, json};

/// Local stand-in for the Spotify and Gemini APIs. Artist and Gemini
/// requests answer with the scripted statuses first, then succeed.
#[derive(Default)]
struct Upstream {
    base: String,
    token_requests: AtomicUsize,
    token_auth: Mutex<Vec<String>>,
    artist_auth: Mutex<Vec<String>>,
    artist_script: Mutex<VecDeque<(StatusCode, Option<&'static str>)>>,
    playlist_queries: Mutex<Vec<HashMap<String, String>>>,
    gemini_calls: Mutex<Vec<(String, String)>>,
    gemini_script: Mutex<VecDeque<StatusCode>>,
}

impl Upstream {
    fn artist_requests(&self) -> usize {
        self.artist_auth.lock().unwrap().len()
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn token(Extension(up): Extension<Arc<Upstream>>, headers: HeaderMap) -> Json<Value> {
    let n = up.token_requests.fetch_add(1, Ordering::SeqCst) + 1;
    up.token_auth
        .lock()
        .unwrap()
        .push(header_value(&headers, header::AUTHORIZATION));
    Json(json!({
        "access_token": format!("token-{}", n),
        "token_type": "Bearer",
        "expires_in": 3600
    }))
}

async fn artist(
    Extension(up): Extension<Arc<Upstream>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    up.artist_auth
        .lock()
        .unwrap()
        .push(header_value(&headers, header::AUTHORIZATION));

    let scripted = up.artist_script.lock().unwrap().pop_front();
    match scripted {
        Some((status, Some(retry_after))) => {
            (status, [(header::RETRY_AFTER, retry_after)]).into_response()
        }
        Some((status, None)) => status.into_response(),
        None => Json(json!({ "id": id, "name": "Band", "genres": ["shoegaze", "dream pop"] }))
            .into_response(),
    }
}

async fn playlist_tracks(
    Extension(up): Extension<Arc<Upstream>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let second_page = query.get("page").map(String::as_str) == Some("2");
    up.playlist_queries.lock().unwrap().push(query);

    if second_page {
        Json(json!({
            "items": [
                { "track": { "name": "Third", "artists": [{ "id": "a3", "name": "C" }] } }
            ],
            "next": null
        }))
    } else {
        Json(json!({
            "items": [
                { "track": { "name": "First", "artists": [{ "id": "a1", "name": "A" }] } },
                { "track": null },
                { "track": { "name": "Second", "artists": [{ "id": null, "name": "B" }] } }
            ],
            "next": format!("{}/v1/playlists/{}/tracks?limit=100&page=2", up.base, id),
            "total": 4
        }))
    }
}

async fn generate_content(
    Extension(up): Extension<Arc<Upstream>>,
    Path(call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let key = query.get("key").cloned().unwrap_or_default();
    up.gemini_calls.lock().unwrap().push((call, key));

    let scripted = up.gemini_script.lock().unwrap().pop_front();
    match scripted {
        Some(status) => (status, "upstream unavailable").into_response(),
        None => Json(json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": "A - B: Rock" }] } }]
        }))
        .into_response(),
    }
}

/// Starts the stand-in API and returns it with a config pointing at it.
async fn spawn_upstream(
    artist_script: Vec<(StatusCode, Option<&'static str>)>,
    gemini_script: Vec<StatusCode>,
) -> (Arc<Upstream>, Config) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let up = Arc::new(Upstream {
        base: base.clone(),
        artist_script: Mutex::new(artist_script.into()),
        gemini_script: Mutex::new(gemini_script.into()),
        ..Default::default()
    });

    let app = Router::new()
        .route("/token", post(token))
        .route("/v1/artists/{id}", get(artist))
        .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
        .route("/v1beta/models/{call}", post(generate_content))
        .layer(Extension(Arc::clone(&up)));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config::from_lookup(move |key| match key {
        "CLIENT_ID" => Some("client-id".to_string()),
        "CLIENT_SECRET" => Some("client-secret".to_string()),
        "GEMINI_API_KEY" => Some("gemini-key".to_string()),
        "GEMINI_MODEL" => Some("models/test-model".to_string()),
        "SPOTIFY_API_URL" => Some(format!("{}/v1", base)),
        "SPOTIFY_API_TOKEN_URL" => Some(format!("{}/token", base)),
        "GEMINI_API_URL" => Some(format!("{}/v1beta", base)),
        _ => None,
    })
    .unwrap();

    (up, config)
}

#[tokio::test]
async fn test_playlist_pages_are_followed_in_order() {
    let (up, config) = spawn_upstream(Vec::new(), Vec::new()).await;
    let spotify = SpotifyClient::new(&config).unwrap();

    let items = spotify.playlist_tracks("pl1").await.unwrap();

    let names: Vec<Option<&str>> = items
        .iter()
        .map(|i| i.track.as_ref().map(|t| t.name.as_str()))
        .collect();
    assert_eq!(names, vec![Some("First"), None, Some("Second"), Some("Third")]);

    let queries = up.playlist_queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("100"));

    // one token serves both pages
    assert_eq!(up.token_requests.load(Ordering::SeqCst), 1);
    assert!(up.token_auth.lock().unwrap()[0].starts_with("Basic "));
}

#[tokio::test]
async fn test_artist_genres_are_returned_in_order() {
    let (up, config) = spawn_upstream(Vec::new(), Vec::new()).await;
    let spotify = SpotifyClient::new(&config).unwrap();

    let genres = spotify.artist_genres("a1").await.unwrap();

    assert_eq!(genres, vec!["shoegaze", "dream pop"]);
    assert_eq!(up.artist_auth.lock().unwrap()[0], "Bearer token-1");
}

#[tokio::test]
async fn test_bad_gateway_is_retried_a_bounded_number_of_times() {
    let script = vec![(StatusCode::BAD_GATEWAY, None); 10];
    let (up, config) = spawn_upstream(script, Vec::new()).await;
    let spotify = SpotifyClient::new(&config).unwrap();

    let result = spotify.artist_genres("a1").await;

    assert!(matches!(result, Err(OrganizeError::Upstream(_))));
    assert_eq!(up.artist_requests(), MAX_RETRIES as usize + 1);
}

#[tokio::test]
async fn test_single_bad_gateway_recovers() {
    let (up, config) = spawn_upstream(vec![(StatusCode::BAD_GATEWAY, None)], Vec::new()).await;
    let spotify = SpotifyClient::new(&config).unwrap();

    assert!(spotify.artist_genres("a1").await.is_ok());
    assert_eq!(up.artist_requests(), 2);
}

#[tokio::test]
async fn test_too_many_requests_waits_for_retry_after() {
    let script = vec![(StatusCode::TOO_MANY_REQUESTS, Some("0"))];
    let (up, config) = spawn_upstream(script, Vec::new()).await;
    let spotify = SpotifyClient::new(&config).unwrap();

    assert!(spotify.artist_genres("a1").await.is_ok());
    assert_eq!(up.artist_requests(), 2);
}

#[tokio::test]
async fn test_excessive_retry_after_is_not_honoured() {
    let script = vec![(StatusCode::TOO_MANY_REQUESTS, Some("500"))];
    let (up, config) = spawn_upstream(script, Vec::new()).await;
    let spotify = SpotifyClient::new(&config).unwrap();

    let result = spotify.artist_genres("a1").await;

    assert!(matches!(result, Err(OrganizeError::Upstream(_))));
    assert_eq!(up.artist_requests(), 1);
}

#[tokio::test]
async fn test_unauthorized_requests_a_new_token() {
    let (up, config) = spawn_upstream(vec![(StatusCode::UNAUTHORIZED, None)], Vec::new()).await;
    let spotify = SpotifyClient::new(&config).unwrap();

    assert!(spotify.artist_genres("a1").await.is_ok());
    assert_eq!(up.token_requests.load(Ordering::SeqCst), 2);
    assert_eq!(
        *up.artist_auth.lock().unwrap(),
        vec!["Bearer token-1".to_string(), "Bearer token-2".to_string()]
    );
}

#[tokio::test]
async fn test_repeated_unauthorized_gives_up_after_the_retry_bound() {
    let script = vec![(StatusCode::UNAUTHORIZED, None); 10];
    let (up, config) = spawn_upstream(script, Vec::new()).await;
    let spotify = SpotifyClient::new(&config).unwrap();

    let result = spotify.artist_genres("a1").await;

    assert!(matches!(result, Err(OrganizeError::Upstream(_))));
    assert_eq!(up.artist_requests(), MAX_RETRIES as usize + 1);
    assert_eq!(
        up.token_requests.load(Ordering::SeqCst),
        MAX_RETRIES as usize + 1
    );
}

#[tokio::test]
async fn test_gemini_reply_text_is_returned() {
    let (up, config) = spawn_upstream(Vec::new(), Vec::new()).await;
    let gemini = GeminiClient::new(&config).unwrap();

    let reply = gemini.complete("Classify...").await.unwrap();

    assert_eq!(reply.as_deref(), Some("A - B: Rock"));
    assert_eq!(
        up.gemini_calls.lock().unwrap()[0],
        (
            "test-model:generateContent".to_string(),
            "gemini-key".to_string()
        )
    );
}

#[tokio::test]
async fn test_gemini_error_status_is_a_classification_error() {
    let (_up, config) =
        spawn_upstream(Vec::new(), vec![StatusCode::INTERNAL_SERVER_ERROR]).await;
    let gemini = GeminiClient::new(&config).unwrap();

    let result = gemini.complete("Classify...").await;

    assert!(matches!(result, Err(OrganizeError::Classification(_))));
}
