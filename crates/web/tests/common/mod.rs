//! Shared helpers for the flow tests.
//!
//! Builds the real router and drives it in process, carrying the session
//! cookie between requests the way a browser would.

#![allow(clippy::unwrap_used)]
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use tower::ServiceExt;

use user_directory_web::config::AppConfig;
use user_directory_web::middleware::create_session_layer;
use user_directory_web::routes;
use user_directory_web::state::AppState;

/// Build the application exactly as `main` wires it, minus the listener.
fn test_app() -> Router {
    let config = AppConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("k9#mQ2$vX7!pL4&wZ8*rT3%nB6^dF1@j"),
    };

    let state = AppState::new(config.clone());
    let session_layer = create_session_layer(&config);

    Router::new()
        .merge(routes::routes())
        .layer(session_layer)
        .with_state(state)
}

/// A minimal browser stand-in: one app instance plus the session cookie.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    pub fn new() -> Self {
        Self {
            app: test_app(),
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let request = self.builder("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Send a POST with a urlencoded form body.
    pub async fn post_form(&mut self, uri: &str, body: &str) -> Response<Body> {
        let request = self
            .builder("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a POST with a multipart body of text fields.
    pub async fn post_multipart(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            push_text_part(&mut body, name, value);
        }
        self.post_multipart_raw(uri, body).await
    }

    /// Send a POST with a multipart body of text fields plus one file.
    pub async fn post_multipart_with_file(
        &mut self,
        uri: &str,
        fields: &[(&str, &str)],
        file_field: &str,
        filename: &str,
        content_type: &str,
        contents: &[u8],
    ) -> Response<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            push_text_part(&mut body, name, value);
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{file_field}\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(contents);
        body.extend_from_slice(b"\r\n");
        self.post_multipart_raw(uri, body).await
    }

    async fn post_multipart_raw(&mut self, uri: &str, mut body: Vec<u8>) -> Response<Body> {
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        let request = self
            .builder("POST", uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    fn builder(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        let response = self.app.clone().oneshot(request).await.unwrap();

        // Adopt any refreshed session cookie, like a browser would.
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let value = set_cookie.to_str().unwrap();
            let pair = value.split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }

        response
    }
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

fn push_text_part(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(
        format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
            .as_bytes(),
    );
}

/// Collect a response body into a string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

/// Entry ids in display order, scraped from the dashboard's edit links.
pub fn entry_ids(body: &str) -> Vec<String> {
    body.match_indices("/home/entries/")
        .filter_map(|(idx, _)| {
            let rest = &body[idx + "/home/entries/".len()..];
            let end = rest.find('/')?;
            let candidate = &rest[..end];
            rest[end..].starts_with("/edit").then(|| candidate.to_string())
        })
        .collect()
}

/// Run the full signup + login flow for a standard test account.
pub async fn sign_up_and_log_in(client: &mut TestClient) {
    let response = client
        .post_form("/signup", "name=A&email=a%40x.com&password=p")
        .await;
    assert_eq!(location(&response), "/login?success=registered");

    let response = client
        .post_form("/login", "email=a%40x.com&password=p")
        .await;
    assert_eq!(location(&response), "/home");
}
