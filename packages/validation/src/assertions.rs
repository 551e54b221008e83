//! The assertion DSL over responses.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use vouch_client::{content_types, Response, TextResponse};

use crate::error::AssertionError;
use crate::path::JsonPath;
use crate::structural;

/// Start a chain of assertions over a response.
pub fn verify<C>(response: &Response<C>) -> ResponseAssertions<'_, C> {
    ResponseAssertions { response }
}

/// Assertions applicable to any response. A non-owning view; never mutates
/// the response.
#[derive(Debug)]
pub struct ResponseAssertions<'a, C> {
    response: &'a Response<C>,
}

impl<'a, C> ResponseAssertions<'a, C> {
    pub fn response(&self) -> &'a Response<C> {
        self.response
    }

    /// Fails unless the status equals `status` exactly.
    pub fn has_status(self, status: u16) -> Result<Self, AssertionError> {
        if self.response.status != status {
            return Err(AssertionError::for_response(
                format!(
                    "Expected status to be '{}', but got '{}'.",
                    status, self.response.status
                ),
                self.response,
            ));
        }
        Ok(self)
    }

    pub fn is_successful(self) -> Result<Self, AssertionError> {
        if !self.response.is_success() {
            return Err(AssertionError::for_response(
                "Expected response to be successful, but it had failed.",
                self.response,
            ));
        }
        Ok(self)
    }

    pub fn has_failed(self) -> Result<Self, AssertionError> {
        if self.response.is_success() {
            return Err(AssertionError::for_response(
                "Expected response to have failed, but it succeeded.",
                self.response,
            ));
        }
        Ok(self)
    }
}

impl<'a> ResponseAssertions<'a, String> {
    /// Require `application/json` content exactly and move to the JSON
    /// assertions.
    pub fn as_json(self) -> Result<JsonAssertions<'a>, AssertionError> {
        let content_type = self.response.content_type.as_deref();
        if content_type != Some(content_types::APPLICATION_JSON) {
            return Err(AssertionError::for_response(
                format!(
                    "Expected response content type to be '{}', but got '{}'.",
                    content_types::APPLICATION_JSON,
                    content_type.unwrap_or("<NULL>")
                ),
                self.response,
            ));
        }
        Ok(JsonAssertions {
            response: self.response,
        })
    }
}

/// Assertions over a JSON text response.
#[derive(Debug)]
pub struct JsonAssertions<'a> {
    response: &'a TextResponse,
}

impl<'a> JsonAssertions<'a> {
    pub fn response(&self) -> &'a TextResponse {
        self.response
    }

    /// Fails when the body is absent or blank.
    pub fn has_content(self) -> Result<Self, AssertionError> {
        self.content()?;
        Ok(self)
    }

    /// Fails unless the path resolves and the resolved value equals
    /// `expected`.
    pub fn has_value_at<T: Serialize>(self, path: &str, expected: T) -> Result<Self, AssertionError> {
        let document = self.document()?;
        let node = self.resolve(&document, path)?;
        let expected = self.to_json(&expected)?;

        if *node != expected {
            return Err(AssertionError::for_response(
                format!(
                    "Expected path '{}' to hold '{}', but got '{}'.",
                    path, expected, node
                ),
                self.response,
            ));
        }
        Ok(self)
    }

    /// Fails unless the path resolves to a value other than `unexpected`.
    pub fn lacks_value_at<T: Serialize>(
        self,
        path: &str,
        unexpected: T,
    ) -> Result<Self, AssertionError> {
        let document = self.document()?;
        let node = self.resolve(&document, path)?;
        let unexpected = self.to_json(&unexpected)?;

        if *node == unexpected {
            return Err(AssertionError::for_response(
                format!(
                    "Expected path '{}' to NOT hold '{}', but it did.",
                    path, unexpected
                ),
                self.response,
            ));
        }
        Ok(self)
    }

    /// Decode the content into `T` and compare it structurally with
    /// `entity`. Any leaf difference fails naming the offending path;
    /// sequence length mismatches are reported distinctly.
    pub fn matches<T: Serialize + DeserializeOwned>(self, entity: &T) -> Result<Self, AssertionError> {
        let content = self.content()?;
        let decoded: T = serde_json::from_str(content).map_err(|e| {
            AssertionError::for_response(
                format!(
                    "Expected response content to decode into the entity's type, but it did not: {}.",
                    e
                ),
                self.response,
            )
        })?;

        let left = self.to_json(&decoded)?;
        let right = self.to_json(entity)?;

        if let Some(mismatch) = structural::compare(&left, &right) {
            return Err(AssertionError::for_response(
                format!(
                    "Expected response content to match the sent entity, but {}.",
                    mismatch
                ),
                self.response,
            ));
        }
        Ok(self)
    }

    /// Validate the content against a caller-supplied JSON Schema,
    /// reporting every violation.
    pub fn conforms_to_schema(self, schema_text: &str) -> Result<Self, AssertionError> {
        let schema: Value = serde_json::from_str(schema_text).map_err(|e| {
            AssertionError::new(format!("Expected schema text to be valid JSON: {}.", e))
        })?;
        let validator = jsonschema::validator_for(&schema).map_err(|e| {
            AssertionError::new(format!("Expected schema text to be a valid JSON Schema: {}.", e))
        })?;

        let document = self.document()?;
        let violations: Vec<String> = validator
            .iter_errors(&document)
            .enumerate()
            .map(|(i, error)| format!("Err#{}:{}:{}", i + 1, error.instance_path, error))
            .collect();

        if violations.is_empty() {
            return Ok(self);
        }

        Err(AssertionError::for_response(
            format!(
                "Expected content to conform to the supplied JSON schema.\nDetails:\n{}",
                violations.join("\n")
            ),
            self.response,
        ))
    }

    fn content(&self) -> Result<&'a str, AssertionError> {
        match &self.response.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(AssertionError::for_response(
                "Expected response content to not be absent or blank.",
                self.response,
            )),
        }
    }

    fn document(&self) -> Result<Value, AssertionError> {
        serde_json::from_str(self.content()?).map_err(|e| {
            AssertionError::for_response(
                format!("Expected response content to be valid JSON: {}.", e),
                self.response,
            )
        })
    }

    fn resolve<'d>(&self, document: &'d Value, path: &str) -> Result<&'d Value, AssertionError> {
        let parsed = JsonPath::parse(path).map_err(|e| {
            AssertionError::for_response(
                format!("Invalid JSON path '{}': {}.", path, e),
                self.response,
            )
        })?;

        parsed.resolve(document).ok_or_else(|| {
            AssertionError::for_response(
                format!(
                    "Expected path '{}' to map to a node in the JSON document, but it did not.",
                    path
                ),
                self.response,
            )
        })
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<Value, AssertionError> {
        serde_json::to_value(value).map_err(|e| {
            AssertionError::for_response(
                format!("Could not serialize the comparison value: {}.", e),
                self.response,
            )
        })
    }
}
