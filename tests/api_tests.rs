use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use courier_route_planner::config::EnvironmentConfig;
use courier_route_planner::services::{
    MapsProvider, RoutePlannerService, UpstreamKind, UpstreamRequest, WaypointTranslator,
};
use courier_route_planner::utils::errors::{AppError, AppResult};
use courier_route_planner::{create_router, AppState};

const FRONTEND: &str = "https://planner.example.com";

/// Proveedor falso: responde según el tipo de request y guarda lo recibido
struct FakeMaps {
    directions: Value,
    geocode: Value,
    fail_with_network: bool,
    seen: Mutex<Vec<UpstreamRequest>>,
}

impl FakeMaps {
    fn new(directions: Value, geocode: Value) -> Arc<Self> {
        Arc::new(Self {
            directions,
            geocode,
            fail_with_network: false,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            directions: Value::Null,
            geocode: Value::Null,
            fail_with_network: true,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<UpstreamRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MapsProvider for FakeMaps {
    async fn fetch(&self, request: &UpstreamRequest) -> AppResult<Value> {
        self.seen.lock().unwrap().push(request.clone());
        if self.fail_with_network {
            return Err(AppError::Network("connection refused".to_string()));
        }
        Ok(match request.kind {
            UpstreamKind::Directions => self.directions.clone(),
            UpstreamKind::Geocode => self.geocode.clone(),
        })
    }
}

fn test_config() -> EnvironmentConfig {
    EnvironmentConfig::from_lookup(|name| match name {
        "GOOGLE_MAPS_KEY" => Some("test-key".to_string()),
        "CLIENT_ORIGIN" => Some(FRONTEND.to_string()),
        _ => None,
    })
    .unwrap()
}

// Función helper para crear la app de test
fn create_test_app(provider: Arc<FakeMaps>) -> Router {
    let config = test_config();
    let translator = WaypointTranslator::new(&config.maps_api_base_url, &config.google_maps_key);
    let planner = RoutePlannerService::new(translator, provider);
    create_router(AppState::new(config, planner))
}

fn ok_directions() -> Value {
    json!({
        "status": "OK",
        "routes": [{ "waypoint_order": [0], "legs": [{}, {}] }],
        "geocoded_waypoints": []
    })
}

fn ok_geocode() -> Value {
    json!({
        "status": "OK",
        "results": [{ "geometry": { "location": { "lat": 1, "lng": 2 } } }]
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));
    let (status, body) = send(app, Request::get("/").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["frontend"], FRONTEND);

    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));
    let (status, body) = send(app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_optimize_three_stops() {
    let provider = FakeMaps::new(ok_directions(), ok_geocode());
    let app = create_test_app(provider.clone());

    let (status, body) = send(
        app,
        post_json(
            "/optimize",
            json!({ "stops": [{ "lat": 1, "lon": 1 }, { "lat": 2, "lon": 2 }, { "lat": 3, "lon": 3 }] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ok_directions());

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].kind, UpstreamKind::Directions);
    assert_eq!(requests[0].query_param("origin"), Some("1,1"));
    assert_eq!(requests[0].query_param("destination"), Some("3,3"));
    assert_eq!(requests[0].query_param("waypoints"), Some("optimize:true|2,2"));
    assert_eq!(requests[0].query_param("key"), Some("test-key"));
    assert!(requests[0]
        .url()
        .starts_with("https://maps.googleapis.com/maps/api/directions/json?"));
}

#[tokio::test]
async fn test_optimize_accepts_lng_key() {
    let provider = FakeMaps::new(ok_directions(), ok_geocode());
    let app = create_test_app(provider.clone());

    let (status, _) = send(
        app,
        post_json("/optimize", json!({ "stops": [{ "lat": 1, "lng": 5 }, { "lat": 2, "lng": 6 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(provider.requests()[0].query_param("origin"), Some("1,5"));
    assert_eq!(provider.requests()[0].query_param("waypoints"), None);
}

#[tokio::test]
async fn test_optimize_requires_two_stops() {
    for body in [json!({ "stops": [{ "lat": 1, "lon": 1 }] }), json!({ "stops": [] }), json!({})] {
        let provider = FakeMaps::new(ok_directions(), ok_geocode());
        let app = create_test_app(provider.clone());

        let (status, response) = send(app, post_json("/optimize", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "at least two stops required");
        assert!(provider.requests().is_empty());
    }
}

#[tokio::test]
async fn test_optimize_invalid_json_is_bad_request() {
    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/optimize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_optimize_upstream_rejection_is_bad_gateway() {
    let rejected = json!({ "status": "ZERO_RESULTS", "routes": [] });
    let app = create_test_app(FakeMaps::new(rejected.clone(), ok_geocode()));

    let (status, body) = send(
        app,
        post_json("/optimize", json!({ "stops": [{ "lat": 1, "lon": 1 }, { "lat": 2, "lon": 2 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Google Directions API failed");
    assert_eq!(body["details"], rejected);
}

#[tokio::test]
async fn test_optimize_network_failure_is_server_error() {
    let app = create_test_app(FakeMaps::unreachable());

    let (status, body) = send(
        app,
        post_json("/optimize", json!({ "stops": [{ "lat": 1, "lon": 1 }, { "lat": 2, "lon": 2 }] })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "NETWORK_ERROR");
}

#[tokio::test]
async fn test_geocode_success() {
    let provider = FakeMaps::new(ok_directions(), ok_geocode());
    let app = create_test_app(provider.clone());

    let (status, body) = send(app, post_json("/geocode", json!({ "address": "1600 Amphitheatre Pkwy" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "lat": 1.0, "lng": 2.0 }));
    assert_eq!(provider.requests()[0].kind, UpstreamKind::Geocode);
    assert_eq!(provider.requests()[0].query_param("address"), Some("1600 Amphitheatre Pkwy"));
}

#[tokio::test]
async fn test_geocode_requires_address() {
    for body in [json!({ "address": "" }), json!({})] {
        let provider = FakeMaps::new(ok_directions(), ok_geocode());
        let app = create_test_app(provider.clone());

        let (status, response) = send(app, post_json("/geocode", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], "address required");
        assert!(provider.requests().is_empty());
    }
}

#[tokio::test]
async fn test_geocode_upstream_failures_are_bad_gateway() {
    let denied = json!({ "status": "REQUEST_DENIED", "results": [] });
    let app = create_test_app(FakeMaps::new(ok_directions(), denied.clone()));
    let (status, body) = send(app, post_json("/geocode", json!({ "address": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["details"], denied);

    let empty = json!({ "status": "OK", "results": [] });
    let app = create_test_app(FakeMaps::new(ok_directions(), empty));
    let (status, body) = send(app, post_json("/geocode", json!({ "address": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "MALFORMED_UPSTREAM_RESPONSE");
}

#[tokio::test]
async fn test_mark_delivered_accumulates() {
    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));

    let (status, body) = send(app.clone(), post_json("/mark-delivered", json!({ "stopId": "stop-1" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deliveredStops": ["stop-1"] }));

    let (_, body) = send(app.clone(), post_json("/mark-delivered", json!({ "stopId": 2 }))).await;
    assert_eq!(body, json!({ "deliveredStops": ["stop-1", 2] }));

    let (_, body) = send(app.clone(), post_json("/mark-delivered", json!({ "stopId": "stop-1" }))).await;
    assert_eq!(body, json!({ "deliveredStops": ["stop-1", 2, "stop-1"] }));

    let (status, body) = send(app, Request::get("/delivered").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_mark_delivered_accepts_non_integer_ids() {
    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));

    let (status, body) = send(app.clone(), post_json("/mark-delivered", json!({ "stopId": 1.5 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deliveredStops": [1.5] }));

    let (status, body) = send(app, post_json("/mark-delivered", json!({ "stopId": true }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deliveredStops": [1.5, true] }));
}

#[tokio::test]
async fn test_mark_delivered_requires_stop_id() {
    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));

    let (status, body) = send(app.clone(), post_json("/mark-delivered", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "stopId required");

    let (status, _) = send(app.clone(), post_json("/mark-delivered", json!({ "stopId": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app, post_json("/mark-delivered", json!({ "stopId": null }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));
    let request = Request::get("/")
        .header(header::ORIGIN, FRONTEND)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        FRONTEND
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_preflight_for_configured_origin() {
    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/optimize")
        .header(header::ORIGIN, FRONTEND)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        FRONTEND
    );
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let provider = FakeMaps::new(ok_directions(), ok_geocode());
    let app = create_test_app(provider.clone());

    let mut request = post_json("/optimize", json!({ "stops": [{ "lat": 1, "lon": 1 }, { "lat": 2, "lon": 2 }] }));
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://evil.example.com".parse().unwrap());

    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin_preflight() {
    let app = create_test_app(FakeMaps::new(ok_directions(), ok_geocode()));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/geocode")
        .header(header::ORIGIN, "https://evil.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
