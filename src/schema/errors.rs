//! Validation violation types
//!
//! A failed validation is a value, not an error path: callers receive a
//! `ValidationErrors` list and decide what to do with it. Each `Violation`
//! names the offending field (and array index, for genre elements), an
//! issue code, and the client-facing message.

use std::fmt;

use serde::Serialize;

/// Kind of rule a value broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Missing, null, or wrong JSON type
    InvalidType,
    /// Below a minimum (including empty strings and arrays)
    TooSmall,
    /// Above a maximum
    TooBig,
    /// Number with a fractional part where an integer is required
    NotInteger,
    /// String with the wrong format
    InvalidString,
    /// Value outside the genre enumeration
    InvalidEnumValue,
    /// Body is not parseable JSON
    InvalidJson,
}

impl IssueCode {
    /// Returns the wire name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::TooSmall => "too_small",
            IssueCode::TooBig => "too_big",
            IssueCode::NotInteger => "not_integer",
            IssueCode::InvalidString => "invalid_string",
            IssueCode::InvalidEnumValue => "invalid_enum_value",
            IssueCode::InvalidJson => "invalid_json",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a violation path: a field name or an array index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A single field-scoped validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl Violation {
    /// Violation on a top-level field
    pub fn field(code: IssueCode, field: &str, message: impl Into<String>) -> Self {
        Self::at(code, vec![PathSegment::Key(field.to_string())], message)
    }

    /// Violation at an arbitrary path
    pub fn at(code: IssueCode, path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
        }
    }

    /// Violation on the document itself
    pub fn root(code: IssueCode, message: impl Into<String>) -> Self {
        Self::at(code, Vec::new(), message)
    }

    /// The top-level field this violation is about, if any
    pub fn field_name(&self) -> Option<&str> {
        match self.path.first() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{} ({})", self.message, self.code);
        }
        let mut path = String::new();
        for segment in &self.path {
            if let PathSegment::Key(_) = segment {
                if !path.is_empty() {
                    path.push('.');
                }
            }
            path.push_str(&segment.to_string());
        }
        write!(f, "{}: {} ({})", path, self.message, self.code)
    }
}

/// Every violation found in one validation pass, in field order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// True if some violation names `field` at the top of its path
    pub fn mentions(&self, field: &str) -> bool {
        self.iter().any(|v| v.field_name() == Some(field))
    }

    /// Distinct top-level field names, in first-seen order
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for name in self.iter().filter_map(Violation::field_name) {
            if !fields.contains(&name) {
                fields.push(name);
            }
        }
        fields
    }
}

impl From<Violation> for ValidationErrors {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_violation_serialization() {
        let v = Violation::at(
            IssueCode::InvalidEnumValue,
            vec![PathSegment::Key("genre".into()), PathSegment::Index(1)],
            "bad genre",
        );
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!({"code": "invalid_enum_value", "path": ["genre", 1], "message": "bad genre"})
        );
    }

    #[test]
    fn test_errors_serialize_as_array() {
        let errors = ValidationErrors::from(Violation::field(
            IssueCode::InvalidType,
            "title",
            "Title is required.",
        ));
        let value = serde_json::to_value(&errors).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["path"], json!(["title"]));
    }

    #[test]
    fn test_fields_are_distinct() {
        let mut errors = ValidationErrors::new();
        errors.push(Violation::field(IssueCode::NotInteger, "year", "a"));
        errors.push(Violation::field(IssueCode::TooSmall, "year", "b"));
        errors.push(Violation::field(IssueCode::InvalidType, "title", "c"));

        assert_eq!(errors.fields(), vec!["year", "title"]);
        assert!(errors.mentions("title"));
        assert!(!errors.mentions("rate"));
    }

    #[test]
    fn test_display_includes_path() {
        let v = Violation::at(
            IssueCode::InvalidEnumValue,
            vec![PathSegment::Key("genre".into()), PathSegment::Index(0)],
            "nope",
        );
        assert_eq!(v.to_string(), "genre[0]: nope (invalid_enum_value)");
        assert_eq!(
            Violation::root(IssueCode::InvalidJson, "bad").to_string(),
            "bad (invalid_json)"
        );
    }
}
