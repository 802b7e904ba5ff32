//! Wire-level tests against an in-process fake server
//!
//! Each test binds a `warp` server on an ephemeral port, points an
//! [`HttpCatalogClient`] at it, and asserts the request shape or the
//! error mapping.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use vitrine_client::{ApiError, AuthClient, CatalogApi, ClientConfig, HttpCatalogClient};
use vitrine_model::{ImageFile, ProductFields, ProductId};
use warp::filters::BoxedFilter;
use warp::Filter;

fn spawn(routes: BoxedFilter<(impl warp::Reply + 'static,)>) -> String {
    let (addr, server): (SocketAddr, _) =
        warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    format!("http://{addr}")
}

fn client_for(base_url: &str) -> HttpCatalogClient {
    HttpCatalogClient::new(
        ClientConfig::new()
            .with_base_url(base_url)
            .with_timeout_ms(2_000),
    )
    .unwrap()
}

fn product_json(id: &str) -> String {
    format!(
        r#"{{"id":"{id}","title":"Chair","description":"Wood chair",
            "status":true,"createdAt":"2024-01-01T00:00:00Z",
            "updatedAt":"2024-01-02T00:00:00Z",
            "thumbnail":{{"id":"a1","url":"https://cdn.example/a1.jpg",
                          "size":2048,"originalName":"chair.jpg",
                          "mimeType":"image/jpeg"}},
            "idUser":"ignored-extra-field"}}"#
    )
}

#[tokio::test]
async fn list_sends_bearer_token_and_query() {
    let seen: Arc<Mutex<Option<(String, String)>>> = Arc::new(Mutex::new(None));
    let capture = Arc::clone(&seen);

    let routes = warp::path("products")
        .and(warp::get())
        .and(warp::header::<String>("authorization"))
        .and(warp::query::raw())
        .map(move |auth: String, query: String| {
            *capture.lock().unwrap() = Some((auth, query));
            let body = format!(
                r#"{{"data":[{}],"meta":{{"page":2,"pageSize":10,"total":11,"totalPages":2}}}}"#,
                product_json("p1")
            );
            warp::reply::with_header(body, "content-type", "application/json")
        });

    let client = client_for(&spawn(routes.boxed()));
    let page = client.list("tok", 2, 10, Some("chair")).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.meta.page, 2);
    assert_eq!(page.meta.total_pages, 2);

    let (auth, query) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(auth, "Bearer tok");
    assert!(query.contains("page=2"));
    assert!(query.contains("pageSize=10"));
    assert!(query.contains("filter=chair"));
}

#[tokio::test]
async fn list_omits_an_empty_filter() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let capture = Arc::clone(&seen);

    let routes = warp::path("products")
        .and(warp::get())
        .and(warp::query::raw())
        .map(move |query: String| {
            *capture.lock().unwrap() = Some(query);
            warp::reply::with_header(
                r#"{"data":[],"meta":{"page":1,"pageSize":10,"total":0,"totalPages":0}}"#,
                "content-type",
                "application/json",
            )
        });

    let client = client_for(&spawn(routes.boxed()));
    client.list("tok", 1, 10, Some("")).await.unwrap();

    let query = seen.lock().unwrap().clone().unwrap();
    assert!(!query.contains("filter"));
}

#[tokio::test]
async fn fetch_one_decodes_the_detail_envelope() {
    let routes = warp::path!("products" / String).and(warp::get()).map(|id: String| {
        warp::reply::with_header(
            format!(r#"{{"data":{}}}"#, product_json(&id)),
            "content-type",
            "application/json",
        )
    });

    let client = client_for(&spawn(routes.boxed()));
    let product = client.fetch_one("tok", &ProductId::from("p1")).await.unwrap();

    assert_eq!(product.id, ProductId::from("p1"));
    assert!(product.thumbnail.is_some());
    assert_eq!(product.thumbnail.unwrap().mime_type, "image/jpeg");
}

#[tokio::test]
async fn fetch_one_maps_missing_records() {
    let routes = warp::path!("products" / String)
        .and(warp::get())
        .map(|_id: String| warp::reply::with_status("", warp::http::StatusCode::NOT_FOUND));

    let client = client_for(&spawn(routes.boxed()));
    let err = client.fetch_one("tok", &ProductId::from("ghost")).await.unwrap_err();

    assert!(matches!(err, ApiError::NotFound(id) if id == ProductId::from("ghost")));
}

#[tokio::test]
async fn rejected_credentials_map_to_unauthorized() {
    let routes = warp::path("products").map(|| {
        warp::reply::with_status(
            r#"{"codeIntern":"AUTH001","message":"invalid token"}"#,
            warp::http::StatusCode::UNAUTHORIZED,
        )
    });

    let client = client_for(&spawn(routes.boxed()));
    let err = client.list("stale", 1, 10, None).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn server_failures_carry_the_reported_message() {
    let routes = warp::path!("products" / String).and(warp::delete()).map(|_id: String| {
        warp::reply::with_status(
            r#"{"codeIntern":"PRD500","message":"storage offline"}"#,
            warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        )
    });

    let client = client_for(&spawn(routes.boxed()));
    let err = client.delete("tok", &ProductId::from("p1")).await.unwrap_err();

    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "storage offline");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn create_returns_the_assigned_id() {
    let routes = warp::path("products").and(warp::post()).map(|| {
        warp::reply::with_header(
            r#"{"codeIntern":"PRD201","message":"created","id":"p-new"}"#,
            "content-type",
            "application/json",
        )
    });

    let client = client_for(&spawn(routes.boxed()));
    let image = ImageFile::new("chair.jpg", "image/jpeg", vec![0u8; 64]);
    let id = client
        .create("tok", &ProductFields::new("Chair", "Wood chair"), &image)
        .await
        .unwrap();

    assert_eq!(id, ProductId::from("p-new"));
}

#[tokio::test]
async fn create_without_an_id_is_a_server_error() {
    let routes = warp::path("products").and(warp::post()).map(|| {
        warp::reply::with_status(
            warp::reply::with_header(
                r#"{"codeIntern":"PRD201","message":"created"}"#,
                "content-type",
                "application/json",
            ),
            warp::http::StatusCode::CREATED,
        )
    });

    let client = client_for(&spawn(routes.boxed()));
    let image = ImageFile::new("chair.jpg", "image/jpeg", vec![0u8; 64]);
    let err = client
        .create("tok", &ProductFields::new("Chair", "Wood chair"), &image)
        .await
        .unwrap_err();

    // The error reports the status the server actually answered with
    assert!(matches!(err, ApiError::Server { status: 201, .. }));
}

#[tokio::test]
async fn update_fields_sends_the_json_payload() {
    let seen: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
    let capture = Arc::clone(&seen);

    let routes = warp::path!("products" / String)
        .and(warp::put())
        .and(warp::body::json())
        .map(move |_id: String, body: serde_json::Value| {
            *capture.lock().unwrap() = Some(body);
            warp::reply()
        });

    let client = client_for(&spawn(routes.boxed()));
    client
        .update_fields(
            "tok",
            &ProductId::from("p1"),
            &ProductFields::new("Recliner", "Leather recliner").with_status(false),
        )
        .await
        .unwrap();

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["title"], "Recliner");
    assert_eq!(body["description"], "Leather recliner");
    assert_eq!(body["status"], false);
}

#[tokio::test]
async fn replace_image_hits_the_thumbnail_route() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let capture = Arc::clone(&seen);

    let routes = warp::path!("products" / "thumbnail" / String)
        .and(warp::patch())
        .map(move |id: String| {
            *capture.lock().unwrap() = Some(id);
            warp::reply()
        });

    let client = client_for(&spawn(routes.boxed()));
    let image = ImageFile::new("new.png", "image/png", vec![0u8; 64]);
    client
        .replace_image("tok", &ProductId::from("p1"), &image)
        .await
        .unwrap();

    assert_eq!(seen.lock().unwrap().clone().unwrap(), "p1");
}

#[tokio::test]
async fn login_decodes_token_and_identity() {
    let seen: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
    let capture = Arc::clone(&seen);

    let routes = warp::path!("auth" / "login")
        .and(warp::post())
        .and(warp::body::json())
        .map(move |body: serde_json::Value| {
            *capture.lock().unwrap() = Some(body);
            warp::reply::with_header(
                r#"{"token":"jwt-1","user":{"id":"u1","name":"Ana","email":"ana@example.com"}}"#,
                "content-type",
                "application/json",
            )
        });

    let auth = AuthClient::new(
        ClientConfig::new()
            .with_base_url(spawn(routes.boxed()))
            .with_timeout_ms(2_000),
    )
    .unwrap();
    let response = auth.login("ana@example.com", "secret1").await.unwrap();

    assert_eq!(response.token, "jwt-1");
    assert_eq!(response.identity.email, "ana@example.com");

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["password"], "secret1");
}

#[tokio::test]
async fn rejected_login_maps_to_unauthorized() {
    let routes = warp::path!("auth" / "login").and(warp::post()).map(|| {
        warp::reply::with_status(
            r#"{"codeIntern":"AUTH002","message":"wrong password"}"#,
            warp::http::StatusCode::UNAUTHORIZED,
        )
    });

    let auth = AuthClient::new(
        ClientConfig::new()
            .with_base_url(spawn(routes.boxed()))
            .with_timeout_ms(2_000),
    )
    .unwrap();
    let err = auth.login("ana@example.com", "nope").await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
}

#[tokio::test]
async fn failed_registration_carries_the_reported_message() {
    let routes = warp::path("users").and(warp::post()).map(|| {
        warp::reply::with_status(
            r#"{"codeIntern":"USR409","message":"email already registered"}"#,
            warp::http::StatusCode::CONFLICT,
        )
    });

    let auth = AuthClient::new(
        ClientConfig::new()
            .with_base_url(spawn(routes.boxed()))
            .with_timeout_ms(2_000),
    )
    .unwrap();
    let registration = vitrine_client::Registration {
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        password: "secret1".to_string(),
        verify_password: "secret1".to_string(),
        phone: vitrine_client::Phone {
            country: "55".to_string(),
            ddd: "11".to_string(),
            number: "999999999".to_string(),
        },
    };
    let err = auth.register(&registration).await.unwrap_err();

    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "email already registered");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn refresh_session_attaches_the_old_token() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let capture = Arc::clone(&seen);

    let routes = warp::path!("auth" / "session")
        .and(warp::post())
        .and(warp::header::<String>("authorization"))
        .map(move |auth_header: String| {
            *capture.lock().unwrap() = Some(auth_header);
            warp::reply::with_header(
                r#"{"token":"jwt-2","user":{"id":"u1","name":"Ana","email":"ana@example.com"}}"#,
                "content-type",
                "application/json",
            )
        });

    let auth = AuthClient::new(
        ClientConfig::new()
            .with_base_url(spawn(routes.boxed()))
            .with_timeout_ms(2_000),
    )
    .unwrap();
    let response = auth.refresh_session("jwt-1").await.unwrap();

    assert_eq!(response.token, "jwt-2");
    assert_eq!(seen.lock().unwrap().clone().unwrap(), "Bearer jwt-1");
}

#[tokio::test]
async fn malformed_bodies_surface_as_decode_errors() {
    let routes = warp::path("products")
        .and(warp::get())
        .map(|| warp::reply::with_header("not json", "content-type", "application/json"));

    let client = client_for(&spawn(routes.boxed()));
    let err = client.list("tok", 1, 10, None).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}
