//! Dotted/bracketed JSON path expressions.
//!
//! A path like `address.zip` or `hobbies[0].name` is parsed into key and
//! index segments and resolved against a `serde_json::Value`.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Errors from parsing a JSON path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonPathError {
    /// A key segment is missing, e.g. a leading/trailing dot or `a..b`.
    EmptySegment { position: usize },
    /// An index bracket is never closed.
    UnterminatedIndex { position: usize },
    /// The text between brackets is not a non-negative integer.
    InvalidIndex { position: usize, text: String },
    /// A character appeared where a separator was expected, e.g. `a[0]b`.
    UnexpectedCharacter { position: usize, character: char },
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonPathError::EmptySegment { position } => {
                write!(f, "empty segment at position {}", position)
            }
            JsonPathError::UnterminatedIndex { position } => {
                write!(f, "unterminated index at position {}", position)
            }
            JsonPathError::InvalidIndex { position, text } => {
                write!(f, "invalid index '{}' at position {}", text, position)
            }
            JsonPathError::UnexpectedCharacter { position, character } => {
                write!(f, "unexpected character '{}' at position {}", character, position)
            }
        }
    }
}

impl std::error::Error for JsonPathError {}

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A parsed pointer like `address.zip` or `hobbies[0].name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn parse(text: &str) -> Result<Self, JsonPathError> {
        let chars: Vec<char> = text.chars().collect();
        let mut segments = Vec::new();
        let mut i = 0;
        let mut expect_segment = true;

        while i < chars.len() {
            match chars[i] {
                '.' => {
                    if expect_segment {
                        return Err(JsonPathError::EmptySegment { position: i });
                    }
                    expect_segment = true;
                    i += 1;
                }
                '[' => {
                    // An index may open the path or follow a segment, but
                    // never a dot.
                    if expect_segment && i != 0 {
                        return Err(JsonPathError::EmptySegment { position: i });
                    }

                    let start = i + 1;
                    let mut j = start;
                    while j < chars.len() && chars[j] != ']' {
                        j += 1;
                    }
                    if j == chars.len() {
                        return Err(JsonPathError::UnterminatedIndex { position: i });
                    }

                    let digits: String = chars[start..j].iter().collect();
                    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                        return Err(JsonPathError::InvalidIndex {
                            position: start,
                            text: digits,
                        });
                    }
                    let index = digits.parse().map_err(|_| JsonPathError::InvalidIndex {
                        position: start,
                        text: digits.clone(),
                    })?;

                    segments.push(Segment::Index(index));
                    expect_segment = false;
                    i = j + 1;
                }
                c => {
                    if !expect_segment {
                        return Err(JsonPathError::UnexpectedCharacter {
                            position: i,
                            character: c,
                        });
                    }

                    let start = i;
                    while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                        i += 1;
                    }
                    segments.push(Segment::Key(chars[start..i].iter().collect()));
                    expect_segment = false;
                }
            }
        }

        if expect_segment {
            return Err(JsonPathError::EmptySegment { position: text.len() });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk the document; `None` when any step fails to match (missing
    /// key, index out of bounds, or a node of the wrong shape).
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                Segment::Key(key) => current.as_object()?.get(key)?,
                Segment::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for JsonPath {
    type Err = JsonPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
