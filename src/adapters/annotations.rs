//! Raw annotation records and their normalization.
//!
//! These records are the output contract of whatever docblock or attribute
//! parser sits in front of the engine; the parsing itself is out of scope.
//! They are plain serde data, so fixture definitions can be written directly
//! in YAML or JSON:
//!
//! ```yaml
//! name: User
//! fields:
//!   - name: email
//!     type: string
//!     mock: { provider: email }
//!   - name: roles
//!     type: array<string>
//!     count: { min: 1, max: 3 }
//! ```
//!
//! Normalization turns each record into the engine's [`FieldMetadata`]:
//! the declared hint becomes a [`TypeDescriptor`], the mock/count/ignore
//! annotations collapse into one [`FieldDirective`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::{MockError, MockResult};
use crate::domain::{FieldDirective, FieldMetadata, TypeDescriptor, TypeDirective};

/// Annotation record for one type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TypeAnnotation {
    pub name: String,
    /// Restrict auto-population to explicitly overridden fields
    #[serde(default)]
    pub whitelist: bool,
    /// Declared fields, in declaration order
    #[serde(default)]
    pub fields: Vec<FieldAnnotation>,
}

impl TypeAnnotation {
    pub fn directive(&self) -> TypeDirective {
        TypeDirective {
            whitelist: self.whitelist,
        }
    }
}

/// Annotation record for one declared field.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FieldAnnotation {
    pub name: String,
    /// Declared type hint: `string`, `Bar`, `Bar[]`, `array<int>` or bare
    /// `array`
    #[serde(rename = "type")]
    pub type_hint: Option<String>,
    /// Element-type note, consulted for the bare `array` form
    pub element: Option<String>,
    pub mock: Option<MockAnnotation>,
    pub count: Option<CountAnnotation>,
    #[serde(default)]
    pub ignore: bool,
    /// Default literal applied at construction time; defaulted fields are
    /// left alone by the mocker
    pub default: Option<Value>,
}

/// Override annotation: a custom callback or an explicit formatter name.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MockAnnotation {
    pub provider: Option<String>,
    pub callback: Option<String>,
}

/// Element-count annotation for collection fields. Bounds are signed so
/// malformed fixture files can be rejected rather than wrap.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CountAnnotation {
    pub count: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl FieldAnnotation {
    /// Normalize this record into the engine's metadata value. Derived
    /// fresh on every call; malformed counts are fatal.
    pub fn resolve(&self) -> MockResult<FieldMetadata> {
        let directive = self.directive()?;
        let descriptor = self
            .type_hint
            .as_deref()
            .and_then(|hint| parse_type_hint(hint, self.element.as_deref()));
        Ok(FieldMetadata {
            descriptor,
            directive,
        })
    }

    fn directive(&self) -> MockResult<FieldDirective> {
        let mut directive = FieldDirective {
            ignored: self.ignore,
            ..FieldDirective::default()
        };

        if let Some(mock) = &self.mock {
            directive.callback = mock.callback.clone();
            directive.provider = mock.provider.clone();
        }

        if let Some(count) = &self.count {
            if let Some(n) = count.count {
                if n < 0 {
                    return Err(MockError::InvalidCount {
                        field: self.name.clone(),
                        count: n,
                    });
                }
                directive.count = Some(n as usize);
            } else if let (Some(min), Some(max)) = (count.min, count.max) {
                if min < 0 || max < 0 || min > max {
                    return Err(MockError::InvalidCountRange {
                        field: self.name.clone(),
                        min,
                        max,
                    });
                }
                directive.count_range = Some((min as usize, max as usize));
            }
        }

        Ok(directive)
    }
}

/// Parse a declared type hint into a descriptor.
///
/// Returns `None` for hints the grammar does not recognize; such fields are
/// skipped by the mocker, not errors. Unknown identifier-shaped names stay
/// `Named` and only fail if generation actually reaches them.
pub fn parse_type_hint(hint: &str, element_note: Option<&str>) -> Option<TypeDescriptor> {
    let hint = hint.trim();

    if let Some(inner) = hint.strip_suffix("[]") {
        return parse_type_hint(inner, None).map(|e| TypeDescriptor::Collection(Box::new(e)));
    }
    if let Some(inner) = hint
        .strip_prefix("array<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return parse_type_hint(inner, None).map(|e| TypeDescriptor::Collection(Box::new(e)));
    }
    if hint.eq_ignore_ascii_case("array") {
        let element = element_note
            .and_then(|note| parse_type_hint(note, None))
            .unwrap_or_else(|| TypeDescriptor::Scalar("string".to_string()));
        return Some(TypeDescriptor::Collection(Box::new(element)));
    }

    if hint.is_empty()
        || !hint
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }

    match hint.to_ascii_lowercase().as_str() {
        "string" => Some(TypeDescriptor::Scalar("string".to_string())),
        "int" | "integer" => Some(TypeDescriptor::Scalar("int".to_string())),
        "float" | "double" => Some(TypeDescriptor::Scalar("float".to_string())),
        "bool" | "boolean" => Some(TypeDescriptor::Scalar("bool".to_string())),
        _ => Some(TypeDescriptor::Named(hint.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(name: &str) -> TypeDescriptor {
        TypeDescriptor::Scalar(name.to_string())
    }

    fn collection(element: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::Collection(Box::new(element))
    }

    #[test]
    fn test_parse_scalars_and_aliases() {
        assert_eq!(parse_type_hint("string", None), Some(scalar("string")));
        assert_eq!(parse_type_hint("int", None), Some(scalar("int")));
        assert_eq!(parse_type_hint("integer", None), Some(scalar("int")));
        assert_eq!(parse_type_hint("float", None), Some(scalar("float")));
        assert_eq!(parse_type_hint("double", None), Some(scalar("float")));
        assert_eq!(parse_type_hint("bool", None), Some(scalar("bool")));
        assert_eq!(parse_type_hint("boolean", None), Some(scalar("bool")));
    }

    #[test]
    fn test_parse_named_type() {
        assert_eq!(
            parse_type_hint("Bar", None),
            Some(TypeDescriptor::Named("Bar".to_string()))
        );
    }

    #[test]
    fn test_parse_collection_grammars_agree() {
        let expected = collection(scalar("int"));
        assert_eq!(parse_type_hint("int[]", None), Some(expected.clone()));
        assert_eq!(parse_type_hint("array<int>", None), Some(expected.clone()));
        assert_eq!(parse_type_hint("array", Some("int")), Some(expected));
    }

    #[test]
    fn test_parse_bare_array_defaults_to_string() {
        assert_eq!(
            parse_type_hint("array", None),
            Some(collection(scalar("string")))
        );
    }

    #[test]
    fn test_parse_nested_collections() {
        let expected = collection(collection(scalar("int")));
        assert_eq!(parse_type_hint("int[][]", None), Some(expected.clone()));
        assert_eq!(parse_type_hint("array<array<int>>", None), Some(expected));
        assert_eq!(
            parse_type_hint("array<Bar[]>", None),
            Some(collection(collection(TypeDescriptor::Named(
                "Bar".to_string()
            ))))
        );
    }

    #[test]
    fn test_parse_unrecognizable_hints() {
        assert_eq!(parse_type_hint("", None), None);
        assert_eq!(parse_type_hint("   ", None), None);
        assert_eq!(parse_type_hint("Foo|Bar", None), None);
        assert_eq!(parse_type_hint("?", None), None);
    }

    #[test]
    fn test_resolve_without_type_hint_skips() {
        let field: FieldAnnotation =
            serde_json::from_value(serde_json::json!({ "name": "meta" })).unwrap();
        let metadata = field.resolve().unwrap();
        assert!(metadata.descriptor.is_none());
        assert!(!metadata.directive.ignored);
    }

    #[test]
    fn test_resolve_merges_mock_and_count() {
        let field: FieldAnnotation = serde_json::from_value(serde_json::json!({
            "name": "tags",
            "type": "string[]",
            "mock": { "provider": "word", "callback": "make_tags" },
            "count": { "count": 4 }
        }))
        .unwrap();

        let metadata = field.resolve().unwrap();
        let directive = metadata.directive;
        assert_eq!(directive.callback.as_deref(), Some("make_tags"));
        assert_eq!(directive.provider.as_deref(), Some("word"));
        assert_eq!(directive.count, Some(4));
    }

    #[test]
    fn test_resolve_count_wins_over_range() {
        let field: FieldAnnotation = serde_json::from_value(serde_json::json!({
            "name": "tags",
            "type": "string[]",
            "count": { "count": 2, "min": 5, "max": 9 }
        }))
        .unwrap();

        let directive = field.resolve().unwrap().directive;
        assert_eq!(directive.count, Some(2));
        assert_eq!(directive.count_range, None);
    }

    #[test]
    fn test_resolve_partial_range_is_ignored() {
        // Both bounds are required for a range, matching the annotation
        // grammar.
        let field: FieldAnnotation = serde_json::from_value(serde_json::json!({
            "name": "tags",
            "type": "string[]",
            "count": { "min": 2 }
        }))
        .unwrap();

        let directive = field.resolve().unwrap().directive;
        assert_eq!(directive.count, None);
        assert_eq!(directive.count_range, None);
    }

    #[test]
    fn test_resolve_negative_count_is_fatal() {
        let field: FieldAnnotation = serde_json::from_value(serde_json::json!({
            "name": "tags",
            "type": "string[]",
            "count": { "count": -1 }
        }))
        .unwrap();

        assert!(matches!(
            field.resolve(),
            Err(MockError::InvalidCount { count: -1, .. })
        ));
    }

    #[test]
    fn test_resolve_inverted_range_is_fatal() {
        let field: FieldAnnotation = serde_json::from_value(serde_json::json!({
            "name": "tags",
            "type": "string[]",
            "count": { "min": 7, "max": 3 }
        }))
        .unwrap();

        assert!(matches!(
            field.resolve(),
            Err(MockError::InvalidCountRange { min: 7, max: 3, .. })
        ));
    }
}
