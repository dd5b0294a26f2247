//! HTTP client wrapper - executes composed requests and formats responses

use std::time::Instant;

use reqwest::Method;

use crate::composer::RequestDescriptor;
use crate::messages::NetworkResponse;
use crate::models::HttpMethod;

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::GET => Method::GET,
        HttpMethod::POST => Method::POST,
        HttpMethod::PUT => Method::PUT,
        HttpMethod::PATCH => Method::PATCH,
        HttpMethod::DELETE => Method::DELETE,
        HttpMethod::HEAD => Method::HEAD,
        HttpMethod::OPTIONS => Method::OPTIONS,
    }
}

/// Build a request from the descriptor. The URL and body are the descriptor's
/// own encoded forms, the same text the renderers show.
fn build_request(client: &reqwest::Client, request: &RequestDescriptor) -> reqwest::RequestBuilder {
    let mut req_builder = client.request(to_reqwest_method(request.method()), request.url());

    // Add headers
    for (name, value) in request.headers().iter() {
        req_builder = req_builder.header(name, value);
    }

    // Add body
    if let Some(body) = request.form_body() {
        req_builder = req_builder.body(body);
    }

    req_builder
}

fn pretty_body(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or(body),
        Err(_) => body,
    }
}

/// Execute a request once. Every failure is folded into the returned value.
pub async fn execute_request(
    client: &reqwest::Client,
    request: &RequestDescriptor,
    request_id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let result = build_request(client, request).send().await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(resp) => {
            let status = resp.status();
            let body = match resp.text().await {
                Ok(body) => pretty_body(body),
                Err(e) => {
                    return NetworkResponse::Error {
                        id: request_id,
                        status: Some(status.as_u16()),
                        message: format!("Error reading body: {}", e),
                        time_ms: elapsed,
                    }
                }
            };

            if status.is_success() {
                NetworkResponse::Success {
                    id: request_id,
                    status: status.as_u16(),
                    body,
                    time_ms: elapsed,
                }
            } else {
                let mut message = format!("Request failed with status code {}", status.as_u16());
                if !body.is_empty() {
                    message.push_str("\n\n");
                    message.push_str(&body);
                }
                NetworkResponse::Error {
                    id: request_id,
                    status: Some(status.as_u16()),
                    message,
                    time_ms: elapsed,
                }
            }
        }
        Err(e) => {
            let msg = if e.is_timeout() {
                format!("Request timed out: {}", e)
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else if e.is_builder() {
                format!("Invalid request: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            NetworkResponse::Error {
                id: request_id,
                status: None,
                message: msg,
                time_ms: elapsed,
            }
        }
    }
}

/// Create an HTTP client with reqwest's default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder().build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "HTTP client build failed, using fallback client");
        reqwest::Client::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::{compose, FieldKind, FieldSet};
    use crate::constants::FORM_CONTENT_TYPE;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fields(entries: &[(FieldKind, &str, &str)]) -> FieldSet {
        let mut set = FieldSet::new();
        for (kind, name, value) in entries {
            let id = set.add(*kind);
            set.rename(id, *name);
            set.set_value(id, *value);
        }
        set
    }

    #[tokio::test]
    async fn test_post_sends_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items/7"))
            .and(header("content-type", FORM_CONTENT_TYPE))
            .and(header("x-token", "abc"))
            .and(body_string("name=widget"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1)
            .mount(&server)
            .await;

        let set = fields(&[
            (FieldKind::Header, "X-Token", "abc"),
            (FieldKind::Body, "id", "7"),
            (FieldKind::Body, "name", "widget"),
        ]);
        let descriptor = compose(&server.uri(), HttpMethod::POST, "/items/:id", &set);

        let response = execute_request(&create_client(), &descriptor, 1).await;
        match response {
            NetworkResponse::Success { id, status, body, .. } => {
                assert_eq!(id, 1);
                assert_eq!(status, 200);
                assert_eq!(body, "{\n  \"ok\": true\n}");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "blue shoes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain"))
            .mount(&server)
            .await;

        let set = fields(&[(FieldKind::Query, "q", "blue shoes")]);
        let descriptor = compose(&server.uri(), HttpMethod::GET, "/search", &set);

        let response = execute_request(&create_client(), &descriptor, 2).await;
        assert!(response.is_success(), "{:?}", response);
    }

    #[tokio::test]
    async fn test_non_2xx_is_captured() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
            .mount(&server)
            .await;

        let descriptor = compose(&server.uri(), HttpMethod::DELETE, "/items/:id", &FieldSet::new());
        let response = execute_request(&create_client(), &descriptor, 3).await;

        match response {
            NetworkResponse::Error { status, message, .. } => {
                assert_eq!(status, Some(404));
                assert_eq!(message, "Request failed with status code 404\n\nmissing");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_captured() {
        let descriptor = compose("http://127.0.0.1:1", HttpMethod::GET, "/", &FieldSet::new());
        let response = execute_request(&create_client(), &descriptor, 4).await;

        match response {
            NetworkResponse::Error { id, status, .. } => {
                assert_eq!(id, 4);
                assert_eq!(status, None);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_relative_url_is_captured() {
        let descriptor = compose("", HttpMethod::GET, "/items", &FieldSet::new());
        let response = execute_request(&create_client(), &descriptor, 5).await;
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_timeout_is_captured_without_fixed_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
            .mount(&server)
            .await;

        // the default client sets no total timeout; a caller-configured one still folds into an error
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(50))
            .build()
            .unwrap();
        let descriptor = compose(&server.uri(), HttpMethod::GET, "/slow", &FieldSet::new());
        let response = execute_request(&client, &descriptor, 6).await;

        match response {
            NetworkResponse::Error { status, message, .. } => {
                assert_eq!(status, None);
                assert!(message.starts_with("Request timed out: "), "{}", message);
                assert!(!message.contains("30s"));
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_default_client_waits_for_slow_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(std::time::Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let descriptor = compose(&server.uri(), HttpMethod::GET, "/slow", &FieldSet::new());
        let response = execute_request(&create_client(), &descriptor, 7).await;
        assert!(response.is_success(), "{:?}", response);
    }
}
