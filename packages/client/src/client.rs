//! The client that sends built requests and maps transport responses.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::codec::{self, DefaultJsonCodec, JsonCodec};
use crate::config::ClientConfig;
use crate::content_types;
use crate::error::Error;
use crate::request::{Body, Method, Request};
use crate::response::{EntityResponse, Response, TextResponse};

/// HTTP client bound to a base address.
///
/// All sends are `&self` and may be issued concurrently; reqwest's pool is
/// thread-safe. Automatic redirect following is disabled at the transport
/// layer so the client's own bounded 301 handling is authoritative.
///
/// # Example
///
/// ```ignore
/// use vouch_client::{ApiClient, Request};
///
/// let client = ApiClient::new("http://localhost:5555/api")?;
///
/// let person = client.get_as::<Person>("people/1").await?;
///
/// let response = client
///     .send(&Request::put("people/1").with_json(json).with_if_match(etag))
///     .await?;
/// ```
pub struct ApiClient {
    http: Mutex<Option<reqwest::Client>>,
    config: ClientConfig,
    codec: Arc<dyn JsonCodec>,
}

impl ApiClient {
    /// Build a client from a URL. Embedded `user:password` becomes a
    /// default Basic `Authorization` header; see [`ClientConfig::new`].
    pub fn new(url: &str) -> Result<Self, Error> {
        Self::with_config(ClientConfig::new(url)?)
    }

    /// Build a client from an explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            http: Mutex::new(Some(http)),
            config,
            codec: Arc::new(DefaultJsonCodec),
        })
    }

    /// Substitute the JSON codec used for typed sends and entity bodies.
    pub fn with_codec(mut self, codec: impl JsonCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Release the underlying connection pool. Idempotent; any send after
    /// closing fails with [`Error::Closed`].
    pub fn close(&self) {
        self.http.lock().unwrap().take();
    }

    fn transport(&self) -> Result<reqwest::Client, Error> {
        self.http.lock().unwrap().as_ref().cloned().ok_or(Error::Closed)
    }

    /// Send a built request, returning the raw text response.
    pub async fn send(&self, request: &Request) -> Result<TextResponse, Error> {
        self.execute(request).await
    }

    /// Send a built request, deserializing the body into `T` through the
    /// codec. An absent body yields `content: None`.
    pub async fn send_as<T: DeserializeOwned>(
        &self,
        request: &Request,
    ) -> Result<EntityResponse<T>, Error> {
        let response = self.execute(request).await?;
        let content = match &response.content {
            Some(text) => Some(codec::deserialize(self.codec.as_ref(), text)?),
            None => None,
        };
        Ok(response.with_content(content))
    }

    pub async fn get(&self, relative_url: impl Into<String>) -> Result<TextResponse, Error> {
        self.send(&Request::get(relative_url)).await
    }

    pub async fn get_as<T: DeserializeOwned>(
        &self,
        relative_url: impl Into<String>,
    ) -> Result<EntityResponse<T>, Error> {
        self.send_as(&Request::get(relative_url)).await
    }

    pub async fn head(&self, relative_url: impl Into<String>) -> Result<TextResponse, Error> {
        self.send(&Request::head(relative_url)).await
    }

    pub async fn delete(&self, relative_url: impl Into<String>) -> Result<TextResponse, Error> {
        self.send(&Request::delete(relative_url)).await
    }

    pub async fn put(&self, relative_url: impl Into<String>) -> Result<TextResponse, Error> {
        self.send(&Request::put(relative_url)).await
    }

    pub async fn put_as<T: DeserializeOwned>(
        &self,
        relative_url: impl Into<String>,
    ) -> Result<EntityResponse<T>, Error> {
        self.send_as(&Request::put(relative_url)).await
    }

    /// PUT pre-serialized JSON. The content must not be blank.
    pub async fn put_json(
        &self,
        content: &str,
        relative_url: impl Into<String>,
    ) -> Result<TextResponse, Error> {
        require_content(content)?;
        self.send(&Request::put(relative_url).with_json(content)).await
    }

    pub async fn put_json_as<T: DeserializeOwned>(
        &self,
        content: &str,
        relative_url: impl Into<String>,
    ) -> Result<EntityResponse<T>, Error> {
        require_content(content)?;
        self.send_as(&Request::put(relative_url).with_json(content)).await
    }

    /// PUT an entity serialized to JSON through the codec.
    pub async fn put_entity<T: Serialize>(
        &self,
        entity: &T,
        relative_url: impl Into<String>,
    ) -> Result<TextResponse, Error> {
        let json = codec::serialize(self.codec.as_ref(), entity)?;
        self.send(&Request::put(relative_url).with_json(json)).await
    }

    pub async fn put_entity_as<T: Serialize, O: DeserializeOwned>(
        &self,
        entity: &T,
        relative_url: impl Into<String>,
    ) -> Result<EntityResponse<O>, Error> {
        let json = codec::serialize(self.codec.as_ref(), entity)?;
        self.send_as(&Request::put(relative_url).with_json(json)).await
    }

    pub async fn post(&self, relative_url: impl Into<String>) -> Result<TextResponse, Error> {
        self.send(&Request::post(relative_url)).await
    }

    pub async fn post_as<T: DeserializeOwned>(
        &self,
        relative_url: impl Into<String>,
    ) -> Result<EntityResponse<T>, Error> {
        self.send_as(&Request::post(relative_url)).await
    }

    /// POST pre-serialized JSON. The content must not be blank.
    pub async fn post_json(
        &self,
        content: &str,
        relative_url: impl Into<String>,
    ) -> Result<TextResponse, Error> {
        require_content(content)?;
        self.send(&Request::post(relative_url).with_json(content)).await
    }

    pub async fn post_json_as<T: DeserializeOwned>(
        &self,
        content: &str,
        relative_url: impl Into<String>,
    ) -> Result<EntityResponse<T>, Error> {
        require_content(content)?;
        self.send_as(&Request::post(relative_url).with_json(content)).await
    }

    /// POST an entity serialized to JSON through the codec.
    pub async fn post_entity<T: Serialize>(
        &self,
        entity: &T,
        relative_url: impl Into<String>,
    ) -> Result<TextResponse, Error> {
        let json = codec::serialize(self.codec.as_ref(), entity)?;
        self.send(&Request::post(relative_url).with_json(json)).await
    }

    pub async fn post_entity_as<T: Serialize, O: DeserializeOwned>(
        &self,
        entity: &T,
        relative_url: impl Into<String>,
    ) -> Result<EntityResponse<O>, Error> {
        let json = codec::serialize(self.codec.as_ref(), entity)?;
        self.send_as(&Request::post(relative_url).with_json(json)).await
    }

    async fn execute(&self, request: &Request) -> Result<TextResponse, Error> {
        let client = self.transport()?;
        let mut url = self.resolve_url(request.relative_url.as_deref())?;
        let mut hops = 0usize;

        loop {
            log::debug!("{} {}", request.method, url);
            let raw = self.dispatch(&client, request, url.clone()).await?;

            // Only 301 is followed; other 3xx codes map through as-is.
            let location = if raw.status().as_u16() == 301 {
                raw.headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string)
            } else {
                None
            };

            if let Some(location) = location {
                if hops >= self.config.redirect_limit {
                    return Err(Error::RedirectLimitExceeded {
                        limit: self.config.redirect_limit,
                        url: url.to_string(),
                    });
                }
                hops += 1;
                url = url.join(&location)?;
                log::debug!("following 301 to {}", url);
                continue;
            }

            return map_response(request.method, &url, raw).await;
        }
    }

    async fn dispatch(
        &self,
        client: &reqwest::Client,
        request: &Request,
        url: Url,
    ) -> Result<reqwest::Response, Error> {
        let mut builder = client.request(request.method.into(), url);

        // Client defaults first, then request headers; last write wins.
        let mut header_map = HeaderMap::new();
        for (name, value) in self.config.headers.iter().chain(request.headers.iter()) {
            let name = HeaderName::try_from(name.as_str())?;
            let value = HeaderValue::try_from(value.as_str())?;
            header_map.insert(name, value);
        }
        builder = builder.headers(header_map);

        match &request.body {
            Some(Body::Bytes { content, content_type }) => {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, content_type.as_str())
                    .body(content.clone());
            }
            Some(Body::Json(text)) => {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, content_types::APPLICATION_JSON)
                    .body(text.clone());
            }
            None => {}
        }

        Ok(builder.send().await?)
    }

    fn resolve_url(&self, relative_url: Option<&str>) -> Result<Url, Error> {
        let base = self.config.base_url.as_str().trim_end_matches('/');

        match relative_url.map(str::trim).filter(|r| !r.is_empty()) {
            None => Ok(Url::parse(base)?),
            Some(relative) => Ok(Url::parse(&format!(
                "{}/{}",
                base,
                relative.trim_start_matches('/')
            ))?),
        }
    }
}

fn require_content(content: &str) -> Result<(), Error> {
    if content.trim().is_empty() {
        return Err(Error::BlankArgument { name: "content" });
    }
    Ok(())
}

async fn map_response(
    method: Method,
    url: &Url,
    raw: reqwest::Response,
) -> Result<TextResponse, Error> {
    let status = raw.status().as_u16();
    let reason = raw
        .status()
        .canonical_reason()
        .unwrap_or("Unknown")
        .to_string();

    let mut headers = HashMap::new();
    for (name, value) in raw.headers() {
        if let Ok(v) = value.to_str() {
            headers.insert(name.to_string(), v.to_string());
        }
    }

    let etag = headers.get("etag").map(|v| v.trim_matches('"').to_string());
    let location = headers.get("location").cloned();
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_string());
    let content_length = headers.get("content-length").and_then(|v| v.parse().ok());

    let text = raw.text().await?;
    let content = if text.is_empty() { None } else { Some(text) };

    log::debug!("{} {} -> {}", method, url, status);

    Ok(Response {
        status,
        reason,
        request_url: url.to_string(),
        request_method: method,
        headers,
        etag,
        location,
        content_type,
        content_length,
        content,
    })
}
