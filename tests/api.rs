//! HTTP surface tests: request validation must happen before any upstream
//! fetch, and transport failures must map to a gateway-style error.

use actix_web::{test, web, App, HttpResponse, HttpServer};
use serde_json::json;
use song_recommender_api::config::StrategyKind;
use song_recommender_api::routes::api_routes;
use song_recommender_api::services::{CatalogClient, RecommendationService};

// Points at a port nothing listens on; any fetch attempt fails fast.
fn test_data() -> (web::Data<CatalogClient>, web::Data<RecommendationService>) {
    (
        web::Data::new(CatalogClient::new(
            "http://127.0.0.1:1/user",
            "http://127.0.0.1:1/music",
        )),
        web::Data::new(RecommendationService::new(StrategyKind::Lexical)),
    )
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
    let (catalog, service) = test_data();
    let app = test::init_service(
        App::new()
            .app_data(catalog)
            .app_data(service)
            .service(api_routes()),
    )
    .await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(response.status().is_success());

    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn missing_user_id_is_rejected_without_an_upstream_fetch() {
    let (catalog, service) = test_data();
    let app = test::init_service(
        App::new()
            .app_data(catalog)
            .app_data(service)
            .service(api_routes()),
    )
    .await;

    // The upstream client is unreachable, so a 400 here proves validation
    // runs first.
    let response =
        test::call_service(&app, test::TestRequest::get().uri("/recommend").to_request()).await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("User ID is required"));
}

#[actix_web::test]
async fn non_integer_user_id_is_rejected_without_an_upstream_fetch() {
    let (catalog, service) = test_data();
    let app = test::init_service(
        App::new()
            .app_data(catalog)
            .app_data(service)
            .service(api_routes()),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/recommend?user_id=abc")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("integer"));
}

/// Serve fixed user/song payloads on a random local port so the handler
/// exercises a real fetch.
fn spawn_upstream(users: serde_json::Value, songs: serde_json::Value) -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = HttpServer::new(move || {
        let users = users.clone();
        let songs = songs.clone();
        App::new()
            .route(
                "/user",
                web::get().to(move || {
                    let body = users.clone();
                    async move { HttpResponse::Ok().json(body) }
                }),
            )
            .route(
                "/music",
                web::get().to(move || {
                    let body = songs.clone();
                    async move { HttpResponse::Ok().json(body) }
                }),
            )
    })
    .listen(listener)
    .unwrap()
    .workers(1)
    .run();
    actix_web::rt::spawn(server);
    port
}

fn upstream_data(port: u16) -> (web::Data<CatalogClient>, web::Data<RecommendationService>) {
    (
        web::Data::new(CatalogClient::new(
            &format!("http://127.0.0.1:{}/user", port),
            &format!("http://127.0.0.1:{}/music", port),
        )),
        web::Data::new(RecommendationService::new(StrategyKind::Lexical)),
    )
}

#[actix_web::test]
async fn empty_song_catalog_is_a_distinct_server_error() {
    let port = spawn_upstream(json!({"user": [{"id": 1}]}), json!({"songs": []}));
    let (catalog, service) = upstream_data(port);
    let app = test::init_service(
        App::new()
            .app_data(catalog)
            .app_data(service)
            .service(api_routes()),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/recommend?user_id=1")
            .to_request(),
    )
    .await;
    // Request-level error, but not a 404: the user exists, the catalog
    // does not.
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Catalog is empty"));
}

#[actix_web::test]
async fn empty_user_snapshot_is_a_distinct_server_error() {
    let port = spawn_upstream(
        json!({"user": []}),
        json!({"songs": [{"id": 1, "nome": "Song A"}]}),
    );
    let (catalog, service) = upstream_data(port);
    let app = test::init_service(
        App::new()
            .app_data(catalog)
            .app_data(service)
            .service(api_routes()),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/recommend?user_id=1")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 500);

    let body: serde_json::Value = test::read_body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("Catalog is empty"));
}

#[actix_web::test]
async fn unknown_user_id_maps_to_not_found() {
    let port = spawn_upstream(
        json!({"user": [{"id": 1}]}),
        json!({"songs": [{"id": 1, "nome": "Song A"}]}),
    );
    let (catalog, service) = upstream_data(port);
    let app = test::init_service(
        App::new()
            .app_data(catalog)
            .app_data(service)
            .service(api_routes()),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/recommend?user_id=99")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 404);
}

#[actix_web::test]
async fn unreachable_upstream_maps_to_bad_gateway() {
    let (catalog, service) = test_data();
    let app = test::init_service(
        App::new()
            .app_data(catalog)
            .app_data(service)
            .service(api_routes()),
    )
    .await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/recommend?user_id=1")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), 502);
}
