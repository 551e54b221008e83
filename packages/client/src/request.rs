//! Request builder types.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::auth::BasicAuthString;
use crate::content_types;
use crate::error::Error;
use crate::headers;

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    PUT,
    POST,
    DELETE,
    HEAD,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::PUT => http::Method::PUT,
            Method::POST => http::Method::POST,
            Method::DELETE => http::Method::DELETE,
            Method::HEAD => http::Method::HEAD,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Method::GET => "GET",
            Method::PUT => "PUT",
            Method::POST => "POST",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
        };
        f.write_str(token)
    }
}

/// Request body content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Raw bytes with an explicit content type.
    Bytes { content: Bytes, content_type: String },
    /// Pre-serialized JSON text; the content type is always `application/json`.
    Json(String),
}

impl Body {
    pub fn content_type(&self) -> &str {
        match self {
            Body::Bytes { content_type, .. } => content_type,
            Body::Json(_) => content_types::APPLICATION_JSON,
        }
    }
}

/// A single HTTP request under construction.
///
/// The header map starts with `Accept: application/json`. Every mutator is
/// a pure, chainable `with_*` that consumes and returns the builder; no
/// operation performs I/O.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub relative_url: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Body>,
}

impl Request {
    pub fn new(method: Method) -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            headers::ACCEPT.to_string(),
            content_types::APPLICATION_JSON.to_string(),
        );

        Self {
            method,
            relative_url: None,
            headers,
            body: None,
        }
    }

    pub fn get(relative_url: impl Into<String>) -> Self {
        Self::new(Method::GET).with_relative_url(relative_url)
    }

    pub fn put(relative_url: impl Into<String>) -> Self {
        Self::new(Method::PUT).with_relative_url(relative_url)
    }

    pub fn post(relative_url: impl Into<String>) -> Self {
        Self::new(Method::POST).with_relative_url(relative_url)
    }

    pub fn delete(relative_url: impl Into<String>) -> Self {
        Self::new(Method::DELETE).with_relative_url(relative_url)
    }

    pub fn head(relative_url: impl Into<String>) -> Self {
        Self::new(Method::HEAD).with_relative_url(relative_url)
    }

    /// Insert or overwrite a header. Keys are unique; last write wins.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_accept(self, value: impl Into<String>) -> Self {
        self.with_header(headers::ACCEPT, value)
    }

    pub fn with_if_match(self, etag: impl Into<String>) -> Self {
        self.with_header(headers::IF_MATCH, etag)
    }

    pub fn with_if_none_match(self, etag: impl Into<String>) -> Self {
        self.with_header(headers::IF_NONE_MATCH, etag)
    }

    pub fn with_authorization(self, value: impl Into<String>) -> Self {
        self.with_header(headers::AUTHORIZATION, value)
    }

    pub fn with_bearer(self, token: impl Into<String>) -> Self {
        self.with_header(headers::AUTHORIZATION, format!("Bearer {}", token.into()))
    }

    /// Set a Basic `Authorization` header computed from the credentials.
    pub fn with_basic_auth(self, username: &str, password: &str) -> Result<Self, Error> {
        Ok(self.with_basic_auth_string(&BasicAuthString::new(username, password)?))
    }

    pub fn with_basic_auth_string(self, auth: &BasicAuthString) -> Self {
        self.with_header(headers::AUTHORIZATION, auth.header_value())
    }

    /// Attach raw bytes with an explicit content type. Empty content is
    /// ignored.
    pub fn with_bytes(mut self, content: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            self.body = Some(Body::Bytes {
                content,
                content_type: content_type.into(),
            });
        }
        self
    }

    /// Attach pre-serialized JSON text. Blank text yields an empty JSON
    /// body rather than no body at all.
    pub fn with_json(mut self, content: impl Into<String>) -> Self {
        let content = content.into();
        self.body = Some(if content.trim().is_empty() {
            Body::Json(String::new())
        } else {
            Body::Json(content)
        });
        self
    }

    /// Override the target path.
    pub fn with_relative_url(mut self, url: impl Into<String>) -> Self {
        self.relative_url = Some(url.into());
        self
    }

    /// Override the target path, substituting each `{}` in the template
    /// with the next argument in order.
    pub fn with_relative_url_format(self, template: &str, args: &[&dyn fmt::Display]) -> Self {
        let mut out = String::with_capacity(template.len());
        let mut args = args.iter();
        let mut rest = template;

        while let Some(idx) = rest.find("{}") {
            out.push_str(&rest[..idx]);
            match args.next() {
                Some(arg) => out.push_str(&arg.to_string()),
                None => out.push_str("{}"),
            }
            rest = &rest[idx + 2..];
        }
        out.push_str(rest);

        self.with_relative_url(out)
    }
}
