//! One-shot request helpers.
//!
//! Each call builds a throwaway client against an absolute URL, sends a
//! single request, and drops the client. The `*_with` variants accept a
//! configurer that can adjust the request before it goes out.
//!
//! ```ignore
//! use vouch_client::oneshot;
//!
//! let response = oneshot::put_json_with(
//!     "http://localhost:5555/api/people/1",
//!     r#"{"name":"Dan"}"#,
//!     |request| request.with_if_match(etag),
//! )
//! .await?;
//! ```

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::request::{Method, Request};
use crate::response::TextResponse;

pub async fn get(url: &str) -> Result<TextResponse, Error> {
    get_with(url, |request| request).await
}

pub async fn get_with(
    url: &str,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    send(url, Method::GET, None, configure).await
}

pub async fn head(url: &str) -> Result<TextResponse, Error> {
    head_with(url, |request| request).await
}

pub async fn head_with(
    url: &str,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    send(url, Method::HEAD, None, configure).await
}

pub async fn delete(url: &str) -> Result<TextResponse, Error> {
    delete_with(url, |request| request).await
}

pub async fn delete_with(
    url: &str,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    send(url, Method::DELETE, None, configure).await
}

pub async fn put(url: &str) -> Result<TextResponse, Error> {
    put_with(url, |request| request).await
}

pub async fn put_with(
    url: &str,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    send(url, Method::PUT, None, configure).await
}

pub async fn post(url: &str) -> Result<TextResponse, Error> {
    post_with(url, |request| request).await
}

pub async fn post_with(
    url: &str,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    send(url, Method::POST, None, configure).await
}

pub async fn put_json(url: &str, content: &str) -> Result<TextResponse, Error> {
    put_json_with(url, content, |request| request).await
}

pub async fn put_json_with(
    url: &str,
    content: &str,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    send(url, Method::PUT, Some(content), configure).await
}

pub async fn post_json(url: &str, content: &str) -> Result<TextResponse, Error> {
    post_json_with(url, content, |request| request).await
}

pub async fn post_json_with(
    url: &str,
    content: &str,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    send(url, Method::POST, Some(content), configure).await
}

pub async fn put_entity<T: Serialize>(url: &str, entity: &T) -> Result<TextResponse, Error> {
    put_entity_with(url, entity, |request| request).await
}

pub async fn put_entity_with<T: Serialize>(
    url: &str,
    entity: &T,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    let json = serde_json::to_string(entity)?;
    send(url, Method::PUT, Some(&json), configure).await
}

pub async fn post_entity<T: Serialize>(url: &str, entity: &T) -> Result<TextResponse, Error> {
    post_entity_with(url, entity, |request| request).await
}

pub async fn post_entity_with<T: Serialize>(
    url: &str,
    entity: &T,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    let json = serde_json::to_string(entity)?;
    send(url, Method::POST, Some(&json), configure).await
}

async fn send(
    url: &str,
    method: Method,
    json: Option<&str>,
    configure: impl FnOnce(Request) -> Request,
) -> Result<TextResponse, Error> {
    if url.trim().is_empty() {
        return Err(Error::BlankArgument { name: "url" });
    }

    let mut request = Request::new(method);
    if let Some(content) = json {
        if content.trim().is_empty() {
            return Err(Error::BlankArgument { name: "content" });
        }
        request = request.with_json(content);
    }

    let client = ApiClient::new(url)?;
    client.send(&configure(request)).await
}
