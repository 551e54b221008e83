//! Typed response model.

use std::collections::HashMap;
use std::fmt::Write as _;

use crate::request::Method;

/// Placeholder used when dumping absent fields.
pub(crate) const NULL_TEXT: &str = "<NULL>";

/// A mapped HTTP response, generic over its content.
///
/// [`TextResponse`] carries the raw body text; [`EntityResponse`] carries
/// the body deserialized into a typed entity. An empty body is normalized
/// to `None` when the response is mapped.
#[derive(Debug, Clone)]
pub struct Response<C> {
    pub status: u16,
    /// Canonical reason phrase, `"Unknown"` when the status has none.
    pub reason: String,
    /// The URL actually fetched, after any redirect hops.
    pub request_url: String,
    pub request_method: Method,
    /// Response headers with lowercase names.
    pub headers: HashMap<String, String>,
    /// ETag with surrounding quotes trimmed.
    pub etag: Option<String>,
    pub location: Option<String>,
    /// Media type only; parameters like `charset` are stripped.
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub content: Option<C>,
}

pub type TextResponse = Response<String>;
pub type EntityResponse<T> = Response<T>;

impl<C> Response<C> {
    /// True exactly when the status is in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Replace the content, keeping every other field.
    pub fn with_content<D>(self, content: Option<D>) -> Response<D> {
        Response {
            status: self.status,
            reason: self.reason,
            request_url: self.request_url,
            request_method: self.request_method,
            headers: self.headers,
            etag: self.etag,
            location: self.location,
            content_type: self.content_type,
            content_length: self.content_length,
            content,
        }
    }

    /// Diagnostic dump used in assertion failures. The content itself is
    /// omitted to keep failure messages readable.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "RequestUrl: {}", self.request_url);
        let _ = writeln!(out, "RequestMethod: {}", self.request_method);
        let _ = writeln!(out, "Status: {}", self.status);
        let _ = writeln!(out, "Reason: {}", self.reason);
        let _ = writeln!(out, "ETag: {}", self.etag.as_deref().unwrap_or(NULL_TEXT));
        let _ = writeln!(
            out,
            "ContentType: {}",
            self.content_type.as_deref().unwrap_or(NULL_TEXT)
        );
        let _ = writeln!(out, "HasContent: {}", self.has_content());
        let _ = write!(out, "Content: <NOT BEING SHOWN>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> TextResponse {
        Response {
            status,
            reason: "OK".to_string(),
            request_url: "http://localhost/people/1".to_string(),
            request_method: Method::GET,
            headers: HashMap::new(),
            etag: None,
            location: None,
            content_type: Some("application/json".to_string()),
            content_length: None,
            content: Some("{}".to_string()),
        }
    }

    #[test]
    fn is_success_boundaries() {
        assert!(!response(199).is_success());
        assert!(response(200).is_success());
        assert!(response(299).is_success());
        assert!(!response(300).is_success());
    }

    #[test]
    fn with_content_preserves_other_fields() {
        let text = response(200);
        let typed: Response<u64> = text.with_content(Some(7));
        assert_eq!(typed.status, 200);
        assert_eq!(typed.request_url, "http://localhost/people/1");
        assert_eq!(typed.content, Some(7));
    }

    #[test]
    fn describe_includes_fields_but_not_content() {
        let dump = response(404).describe();
        assert!(dump.contains("RequestUrl: http://localhost/people/1"));
        assert!(dump.contains("RequestMethod: GET"));
        assert!(dump.contains("Status: 404"));
        assert!(dump.contains("ETag: <NULL>"));
        assert!(dump.contains("HasContent: true"));
        assert!(dump.contains("<NOT BEING SHOWN>"));
        assert!(!dump.contains("{}"));
    }
}
