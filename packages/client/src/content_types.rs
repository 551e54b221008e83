//! Content type (MIME) constants.

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";
pub const APPLICATION_JSON_LD: &str = "application/ld+json";
pub const APPLICATION_GEO_JSON: &str = "application/vnd.geo+json";
pub const APPLICATION_FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";
pub const TEXT_JSON: &str = "text/json";
