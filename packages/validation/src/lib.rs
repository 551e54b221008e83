//! # vouch-validation
//!
//! Fluent assertions over [`vouch_client`] responses.
//!
//! Checks chain with `?`; each failed check produces an [`AssertionError`]
//! carrying the assertion message and a diagnostic dump of the response.
//!
//! ```ignore
//! use vouch_validation::verify;
//!
//! let response = client.get("people/1").await?;
//!
//! verify(&response)
//!     .has_status(200)?
//!     .as_json()?
//!     .has_content()?
//!     .has_value_at("address.zip", 54321)?
//!     .matches(&expected_person)?;
//! ```

pub mod error;
pub mod path;
pub mod structural;

mod assertions;

pub use assertions::{verify, JsonAssertions, ResponseAssertions};
pub use error::AssertionError;
pub use path::{JsonPath, JsonPathError, Segment};
pub use structural::{compare, Mismatch};
