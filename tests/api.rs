use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use readinglist_kernel::settings::{DecodeMode, Environment, Settings};
use tower::ServiceExt;

fn settings(decode_mode: DecodeMode) -> Settings {
    let mut settings = Settings::default();
    settings.environment = Environment::Test;
    settings.version = "1.0".to_string();
    settings.books.decode_mode = decode_mode;
    settings
}

fn app() -> Router {
    readinglist_app::app(&settings(DecodeMode::Lenient))
}

fn strict_app() -> Router {
    readinglist_app::app(&settings(DecodeMode::Strict))
}

async fn send(router: Router, method: &str, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_else(|err| panic!("failed to build request: {err}"));

    match router.oneshot(request).await {
        Ok(response) => response,
        Err(err) => panic!("router request failed: {err}"),
    }
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap_or_else(|err| panic!("failed to read response body: {err}"));
    String::from_utf8(bytes.to_vec()).unwrap_or_else(|err| panic!("body is not UTF-8: {err}"))
}

#[tokio::test]
async fn healthcheck_reports_environment_and_version() {
    let response = send(app(), "GET", "/v1/healthcheck", "").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        body_text(response).await,
        "{\"environment\":\"test\",\"status\":\"available\",\"version\":\"1.0\"}\n"
    );
}

#[tokio::test]
async fn healthcheck_rejects_other_methods() {
    for method in ["POST", "PUT", "DELETE"] {
        let response = send(app(), method, "/v1/healthcheck", "").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(body_text(response).await, "Method Not Allowed\n");
    }
}

#[tokio::test]
async fn list_returns_two_books_in_order() {
    let response = send(app(), "GET", "/v1/books", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    let books = value["books"].as_array().unwrap();

    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["title"], "Thus spoke zarathustra");
    assert_eq!(books[0]["id"], 1);
    assert_eq!(books[1]["title"], "XD");
    assert_eq!(books[1]["id"], 2);
}

#[tokio::test]
async fn create_echoes_decoded_input() {
    let payload = r#"{"title":"Dune","published":1965,"pages":412,"genres":["SciFi"],"rating":4.8}"#;
    let response = send(app(), "POST", "/v1/books", payload).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "title=\"Dune\" published=1965 pages=412 genres=[SciFi] rating=4.8\n"
    );
}

#[tokio::test]
async fn books_collection_rejects_other_methods() {
    let response = send(app(), "DELETE", "/v1/books", "").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn get_wraps_book_in_envelope() {
    let response = send(app(), "GET", "/v1/books/42", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let value: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(value["book"]["id"], 42);
    assert_eq!(value["book"]["title"], "Echoes in the darkness");
    assert!(value["book"]["createdAt"].is_string());
}

#[tokio::test]
async fn get_accepts_prefixed_ids() {
    for (raw, expected) in [("0x2A", 42), ("052", 42), ("0b11", 3), ("-5", -5)] {
        let response = send(app(), "GET", &format!("/v1/books/{raw}"), "").await;
        assert_eq!(response.status(), StatusCode::OK, "{raw}");

        let value: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["book"]["id"], expected, "{raw}");
    }
}

#[tokio::test]
async fn malformed_id_is_bad_request_for_every_verb() {
    for method in ["GET", "PUT", "DELETE"] {
        for raw in ["abc", "4x2", "0x", "1.5"] {
            let response = send(app(), method, &format!("/v1/books/{raw}"), "{}").await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {raw}");
            assert_eq!(body_text(response).await, "Bad Request\n");
        }
    }
}

#[tokio::test]
async fn empty_trailing_and_nested_ids_are_bad_requests() {
    for method in ["GET", "PUT", "DELETE"] {
        for path in ["/v1/books/", "/v1/books/42/", "/v1/books/1/2"] {
            let response = send(app(), method, path, "{}").await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{method} {path}");
            assert_eq!(body_text(response).await, "Bad Request\n");
        }
    }
}

#[tokio::test]
async fn update_merges_title_onto_defaults() {
    let response = send(app(), "PUT", "/v1/books/42", r#"{"title":"New Title"}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "id=42 title=\"New Title\" published=2019 pages=300 \
         genres=[Fiction, Thriller] rating=4.5 version=1\n"
    );
}

#[tokio::test]
async fn update_with_empty_genres_keeps_existing() {
    let response = send(app(), "PUT", "/v1/books/42", r#"{"genres":[]}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("genres=[Fiction, Thriller]"));
}

#[tokio::test]
async fn delete_acknowledges_id() {
    let response = send(app(), "DELETE", "/v1/books/7", "").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Delete the book with id: 7");
}

#[tokio::test]
async fn unsupported_method_on_item_is_not_allowed() {
    for method in ["POST", "PATCH", "OPTIONS"] {
        let response = send(app(), method, "/v1/books/42", "").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }
}

#[tokio::test]
async fn method_is_checked_before_id() {
    let response = send(app(), "PATCH", "/v1/books/not-a-number", "").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn lenient_mode_ignores_malformed_bodies() {
    let response = send(app(), "PUT", "/v1/books/9", "{broken").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .starts_with("id=9 title=\"Echoes in the darkness\""));

    let response = send(app(), "POST", "/v1/books", "not json").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "title=\"\" published=0 pages=0 genres=[] rating=none\n"
    );
}

#[tokio::test]
async fn lenient_mode_keeps_fields_next_to_a_bad_one() {
    let response = send(app(), "PUT", "/v1/books/1", r#"{"title":"X","pages":"abc"}"#).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "id=1 title=\"X\" published=2019 pages=300 \
         genres=[Fiction, Thriller] rating=4.5 version=1\n"
    );
}

#[tokio::test]
async fn strict_mode_rejects_malformed_bodies() {
    let response = send(strict_app(), "PUT", "/v1/books/9", "{broken").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Bad Request\n");

    let response = send(strict_app(), "POST", "/v1/books", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn strict_mode_accepts_valid_bodies() {
    let response = send(strict_app(), "PUT", "/v1/books/9", r#"{"pages":0}"#).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("pages=0"));
}

#[tokio::test]
async fn openapi_document_lists_book_routes() {
    let response = send(app(), "GET", "/docs/openapi.json", "").await;
    assert_eq!(response.status(), StatusCode::OK);

    let value: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(value["paths"]["/v1/books"].is_object());
    assert!(value["paths"]["/v1/books/{id}"].is_object());
    assert!(value["paths"]["/v1/healthcheck"].is_object());
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = send(app(), "GET", "/v1/healthcheck", "").await;
    assert!(response.headers().contains_key("x-request-id"));
}
