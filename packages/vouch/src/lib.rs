//! Vouch: issue HTTP requests against a web API and assert on the responses.
//!
//! This umbrella crate re-exports the client ([`vouch_client`]) and the
//! assertion DSL ([`vouch_validation`]) so tests can depend on one crate:
//!
//! ```ignore
//! use vouch::{verify, ApiClient};
//!
//! let client = ApiClient::new("http://localhost:5555/api")?;
//! let response = client.get("people/1").await?;
//!
//! verify(&response)
//!     .has_status(200)?
//!     .as_json()?
//!     .has_value_at("address.zip", 54321)?;
//! ```

pub use vouch_client as client;
pub use vouch_validation as validation;

pub use vouch_client::{
    oneshot, ApiClient, BasicAuthString, Body, ClientConfig, DefaultJsonCodec, EntityResponse,
    Error, JsonCodec, Method, Request, Response, TextResponse,
};
pub use vouch_validation::{verify, AssertionError, JsonAssertions, ResponseAssertions};
