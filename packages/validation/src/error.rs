//! Assertion failure type.

use std::fmt;

use vouch_client::Response;

/// Raised when a response fails an expectation.
///
/// Carries the assertion message plus a diagnostic dump of the offending
/// response when one is available. An ordinary [`std::error::Error`]; host
/// test frameworks adapt it at their boundary.
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub response_dump: Option<String>,
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response_dump: None,
        }
    }

    /// Build a failure that includes the response's diagnostic dump.
    pub fn for_response<C>(message: impl Into<String>, response: &Response<C>) -> Self {
        Self {
            message: message.into(),
            response_dump: Some(response.describe()),
        }
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(dump) = &self.response_dump {
            write!(f, "\n{}", dump)?;
        }
        Ok(())
    }
}

impl std::error::Error for AssertionError {}
