//! HTTP REST API routes

mod attribute_routes;
mod character_routes;
mod error;
mod inventory_routes;

use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::infrastructure::state::AppState;

pub use error::{ApiError, ApiResult};

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Character routes
        .route("/characters", get(character_routes::list_characters))
        .route("/character", post(character_routes::create_character))
        .route("/character/{id}", get(character_routes::get_character))
        .route("/character/{id}", patch(character_routes::update_character))
        .route("/character/{id}", delete(character_routes::delete_character))
        // Attribute routes
        .route(
            "/character/{id}/atributes",
            post(attribute_routes::add_attribute),
        )
        .route(
            "/character/{character_id}/atributes/{atr_id}",
            patch(attribute_routes::update_attribute),
        )
        .route(
            "/character/{character_id}/atributes/{atr_id}",
            delete(attribute_routes::delete_attribute),
        )
        // Inventory routes
        .route("/character/{id}/inventory", post(inventory_routes::add_item))
        .route(
            "/character/{character_id}/inventory/{item_id}",
            patch(inventory_routes::update_item),
        )
        .route(
            "/character/{character_id}/inventory/{item_id}",
            delete(inventory_routes::delete_item),
        )
}

/// Parse a path segment into a typed id
fn parse_id<T: From<Uuid>>(raw: &str, what: &str) -> Result<T, ApiError> {
    Uuid::parse_str(raw)
        .map(T::from)
        .map_err(|_| DomainError::validation(format!("invalid {what} id: {raw}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, Bytes};
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use tower_http::services::ServeDir;

    use crate::infrastructure::config::AppConfig;

    const BOUNDARY: &str = "charkeeper-test-boundary";

    async fn test_app() -> (Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            database_path: dir.path().join("test.db").to_string_lossy().into_owned(),
            uploads_dir: dir.path().join("uploads").to_string_lossy().into_owned(),
            max_avatar_bytes: 1024 * 1024,
            server_port: 0,
        };
        let uploads_dir = config.uploads_dir.clone();
        let state = Arc::new(AppState::new(config).await.unwrap());

        let app = Router::new()
            .merge(create_routes())
            .nest_service("/images", ServeDir::new(uploads_dir))
            .with_state(state);
        (app, dir)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes)
    }

    async fn send_json(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(value) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let (status, bytes) = send(app, request).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn multipart_text(name: &str, value: &str) -> Vec<u8> {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
        .into_bytes()
    }

    fn multipart_file(name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
        let mut part = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        part.extend_from_slice(bytes);
        part.extend_from_slice(b"\r\n");
        part
    }

    async fn send_multipart(
        app: &Router,
        method: Method,
        uri: &str,
        parts: Vec<Vec<u8>>,
    ) -> (StatusCode, Value) {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(&part);
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn create_aria(app: &Router) -> String {
        let (status, body) = send_multipart(
            app,
            Method::POST,
            "/character",
            vec![
                multipart_text("name", "Aria"),
                multipart_text("description", "scout"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 1);
        body["character"]["_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_created_character_comes_back_empty() {
        let (app, _dir) = test_app().await;

        let (_, body) = send_multipart(
            &app,
            Method::POST,
            "/character",
            vec![
                multipart_text("name", "Aria"),
                multipart_text("description", "scout"),
            ],
        )
        .await;

        let character = &body["character"];
        assert_eq!(character["name"], "Aria");
        assert_eq!(character["description"], "scout");
        assert_eq!(character["avatar"], "none");
        assert_eq!(character["atributes"], json!([]));
        assert_eq!(character["inventory"], json!([]));
    }

    #[tokio::test]
    async fn test_sheet_lifecycle_over_http() {
        let (app, _dir) = test_app().await;
        let id = create_aria(&app).await;

        // Add an attribute
        let (status, body) = send_json(
            &app,
            Method::POST,
            &format!("/character/{id}/atributes"),
            Some(json!({"name": "HP", "value": "10", "maxvalue": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], 1);
        let attributes = body["character"]["atributes"].as_array().unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0]["name"], "HP");
        assert_eq!(attributes[0]["value"], "10");
        assert_eq!(attributes[0]["maxvalue"], 10.0);
        let atr_id = attributes[0]["_id"].as_str().unwrap().to_string();

        // Edit it in place
        let (status, body) = send_json(
            &app,
            Method::PATCH,
            &format!("/character/{id}/atributes/{atr_id}"),
            Some(json!({"name": "HP", "value": "8", "maxvalue": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["character"]["atributes"][0]["_id"], atr_id.as_str());
        assert_eq!(body["character"]["atributes"][0]["value"], "8");

        // Remove it
        let (status, body) = send_json(
            &app,
            Method::DELETE,
            &format!("/character/{id}/atributes/{atr_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["character"]["atributes"], json!([]));

        // Inventory works the same way
        let (_, body) = send_json(
            &app,
            Method::POST,
            &format!("/character/{id}/inventory"),
            Some(json!({"name": "Rope", "description": "50ft"})),
        )
        .await;
        let item_id = body["character"]["inventory"][0]["_id"]
            .as_str()
            .unwrap()
            .to_string();
        let (status, body) = send_json(
            &app,
            Method::DELETE,
            &format!("/character/{id}/inventory/{item_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["character"]["inventory"], json!([]));

        // Delete the character; reads must now fail
        let (status, body) =
            send_json(&app, Method::DELETE, &format!("/character/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": 1 }));

        let (status, body) = send_json(&app, Method::GET, &format!("/character/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "result": 0 }));
    }

    #[tokio::test]
    async fn test_list_returns_bare_array_in_creation_order() {
        let (app, _dir) = test_app().await;
        create_aria(&app).await;
        send_multipart(
            &app,
            Method::POST,
            "/character",
            vec![multipart_text("name", "Borin")],
        )
        .await;

        let (status, body) = send_json(&app, Method::GET, "/characters", None).await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "Aria");
        assert_eq!(list[1]["name"], "Borin");
    }

    #[tokio::test]
    async fn test_missing_sub_resource_is_reported_not_found() {
        let (app, _dir) = test_app().await;
        let id = create_aria(&app).await;

        let ghost = uuid::Uuid::new_v4();
        let (status, body) = send_json(
            &app,
            Method::PATCH,
            &format!("/character/{id}/atributes/{ghost}"),
            Some(json!({"name": "HP", "value": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "result": 0 }));
    }

    #[tokio::test]
    async fn test_malformed_ids_and_bodies_are_rejected() {
        let (app, _dir) = test_app().await;
        let id = create_aria(&app).await;

        let (status, body) =
            send_json(&app, Method::GET, "/character/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "result": 0 }));

        let request = Request::builder()
            .method(Method::POST)
            .uri(format!("/character/{id}/atributes"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, bytes) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::from_slice::<Value>(&bytes).unwrap(),
            json!({ "result": 0 })
        );
    }

    #[tokio::test]
    async fn test_avatar_upload_serves_and_replaces_the_image() {
        let (app, _dir) = test_app().await;

        let (status, body) = send_multipart(
            &app,
            Method::POST,
            "/character",
            vec![
                multipart_text("name", "Aria"),
                multipart_file("avatar", "portrait.png", "image/png", &[1, 2, 3]),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["character"]["_id"].as_str().unwrap().to_string();
        let avatar = body["character"]["avatar"].as_str().unwrap().to_string();
        assert_ne!(avatar, "none");
        assert!(avatar.ends_with(".png"));

        let request = Request::builder()
            .uri(format!("/images/{avatar}"))
            .body(Body::empty())
            .unwrap();
        let (status, bytes) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes.as_ref(), &[1, 2, 3]);

        // Replacing the avatar retires the old file
        let (status, body) = send_multipart(
            &app,
            Method::PATCH,
            &format!("/character/{id}"),
            vec![multipart_file("avatar", "new.png", "image/png", &[4, 5])],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let replacement = body["character"]["avatar"].as_str().unwrap().to_string();
        assert_ne!(replacement, avatar);

        let request = Request::builder()
            .uri(format!("/images/{avatar}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_image_avatar_is_rejected_with_failure_envelope() {
        let (app, _dir) = test_app().await;

        let (status, body) = send_multipart(
            &app,
            Method::POST,
            "/character",
            vec![
                multipart_text("name", "Aria"),
                multipart_file("avatar", "notes.txt", "text/plain", b"hello"),
            ],
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "result": 0 }));

        // Nothing was created
        let (_, body) = send_json(&app, Method::GET, "/characters", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_update_leaves_absent_form_fields_untouched() {
        let (app, _dir) = test_app().await;
        let id = create_aria(&app).await;

        let (status, body) = send_multipart(
            &app,
            Method::PATCH,
            &format!("/character/{id}"),
            vec![multipart_text("description", "veteran scout")],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["character"]["name"], "Aria");
        assert_eq!(body["character"]["description"], "veteran scout");
    }
}
