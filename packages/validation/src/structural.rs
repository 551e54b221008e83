//! Structural comparison of JSON value trees.
//!
//! Both sides of a `matches` assertion are serialized to
//! `serde_json::Value` and walked together, so any `Serialize` type
//! participates without a bespoke equality implementation. Leaves cover
//! primitives, enums, strings, UUIDs, date-times and decimals in their
//! serialized forms.

use std::fmt;

use serde_json::Value;

/// A single point of difference between two value trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Dotted/bracketed path to the differing node; empty at the root.
    pub path: String,
    pub description: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "the root values differ: {}", self.description)
        } else {
            write!(f, "the value at '{}' differs: {}", self.path, self.description)
        }
    }
}

/// Compare two JSON trees, returning the first difference found.
///
/// Arrays are compared element-wise in lock step; differing lengths are
/// reported as a distinct mismatch rather than silently stopping at the
/// shorter side. Objects compare the union of their keys, so a key present
/// on only one side is a mismatch too.
pub fn compare(left: &Value, right: &Value) -> Option<Mismatch> {
    compare_at(String::new(), left, right)
}

fn compare_at(path: String, left: &Value, right: &Value) -> Option<Mismatch> {
    match (left, right) {
        (Value::Array(a), Value::Array(b)) => {
            for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
                if let Some(mismatch) = compare_at(format!("{}[{}]", path, i), x, y) {
                    return Some(mismatch);
                }
            }
            if a.len() != b.len() {
                return Some(Mismatch {
                    path,
                    description: format!("sequence lengths differ: {} vs {}", a.len(), b.len()),
                });
            }
            None
        }
        (Value::Object(a), Value::Object(b)) => {
            for (key, x) in a {
                let child = join(&path, key);
                match b.get(key) {
                    Some(y) => {
                        if let Some(mismatch) = compare_at(child, x, y) {
                            return Some(mismatch);
                        }
                    }
                    None => {
                        return Some(Mismatch {
                            path: child,
                            description: "present on the left side only".to_string(),
                        })
                    }
                }
            }
            for key in b.keys() {
                if !a.contains_key(key) {
                    return Some(Mismatch {
                        path: join(&path, key),
                        description: "present on the right side only".to_string(),
                    });
                }
            }
            None
        }
        _ => {
            if left == right {
                None
            } else {
                Some(Mismatch {
                    path,
                    description: format!("'{}' != '{}'", left, right),
                })
            }
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
