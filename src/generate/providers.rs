//! Formatter catalog and provider registry.
//!
//! Two-level resolution: the registry maps a scalar-kind name ("string",
//! "int", ...) to a formatter name ("sentence", "random_digit_not_null",
//! ...), and the catalog maps formatter names to the zero-argument
//! functions that actually produce values. Explicit provider overrides
//! bypass the registry and sample the catalog directly.

use std::collections::HashMap;

use fake::faker::address::en::{CityName, CountryName, PostCode, StateAbbr, StreetName};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name, Title};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;
use serde_json::{json, Value};

use crate::domain::error::{MockError, MockResult};

/// Zero-argument generation function producing one synthetic value per call.
pub type Formatter = Box<dyn Fn() -> Value + Send + Sync>;

/// Named formatters, seeded with the builtin catalog.
pub struct FormatterCatalog {
    formatters: HashMap<String, Formatter>,
}

impl FormatterCatalog {
    pub fn new() -> Self {
        let mut catalog = Self {
            formatters: HashMap::new(),
        };

        catalog.register("sentence", || json!(Sentence(1..10).fake::<String>()));
        catalog.register("word", || json!(Word().fake::<String>()));
        catalog.register("paragraph", || json!(Paragraph(1..3).fake::<String>()));
        catalog.register("name", || json!(Name().fake::<String>()));
        catalog.register("first_name", || json!(FirstName().fake::<String>()));
        catalog.register("last_name", || json!(LastName().fake::<String>()));
        catalog.register("title", || json!(Title().fake::<String>()));
        catalog.register("username", || json!(Username().fake::<String>()));
        catalog.register("email", || json!(SafeEmail().fake::<String>()));
        catalog.register("phone_number", || json!(PhoneNumber().fake::<String>()));
        catalog.register("street_name", || json!(StreetName().fake::<String>()));
        catalog.register("city", || json!(CityName().fake::<String>()));
        catalog.register("state_abbr", || json!(StateAbbr().fake::<String>()));
        catalog.register("country", || json!(CountryName().fake::<String>()));
        catalog.register("post_code", || json!(PostCode().fake::<String>()));
        catalog.register("random_digit_not_null", || {
            json!(rand::thread_rng().gen_range(1..=9))
        });
        catalog.register("random_float", || {
            json!(rand::thread_rng().gen_range(0.0..100.0))
        });
        catalog.register("boolean", || json!(rand::thread_rng().gen_bool(0.5)));
        catalog.register("uuid", || json!(uuid::Uuid::new_v4().to_string()));

        catalog
    }

    /// Register a formatter under the given name, replacing any existing
    /// one.
    pub fn register<F>(&mut self, name: &str, f: F)
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.formatters.insert(name.to_string(), Box::new(f));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Sample the named formatter. Unknown names are a directive-resolution
    /// error.
    pub fn sample(&self, name: &str) -> MockResult<Value> {
        self.formatters
            .get(name)
            .map(|f| f())
            .ok_or_else(|| MockError::ProviderNotFound(name.to_string()))
    }
}

impl Default for FormatterCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Scalar-kind to formatter-name mapping, consulted before object
/// recursion. Configured at startup, read-only during a mock call.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, String>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        let mut providers = HashMap::new();
        providers.insert("string".to_string(), "sentence".to_string());
        providers.insert("int".to_string(), "random_digit_not_null".to_string());
        providers.insert("float".to_string(), "random_float".to_string());
        providers.insert("bool".to_string(), "boolean".to_string());
        Self { providers }
    }

    /// Replace the whole mapping.
    pub fn set_all(&mut self, providers: HashMap<String, String>) {
        self.providers = providers;
    }

    /// Map one kind to a formatter name.
    pub fn set(&mut self, kind: &str, formatter: &str) {
        self.providers
            .insert(kind.to_string(), formatter.to_string());
    }

    /// Merge a mapping into the registry; later keys override existing
    /// ones.
    pub fn add_all(&mut self, providers: HashMap<String, String>) {
        self.providers.extend(providers);
    }

    /// Formatter name registered for the kind, if any.
    pub fn get(&self, kind: &str) -> Option<&str> {
        self.providers.get(kind).map(String::as_str)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kinds_are_seeded() {
        let registry = ProviderRegistry::new();
        assert_eq!(registry.get("string"), Some("sentence"));
        assert_eq!(registry.get("int"), Some("random_digit_not_null"));
        assert_eq!(registry.get("float"), Some("random_float"));
        assert_eq!(registry.get("bool"), Some("boolean"));
        assert_eq!(registry.get("date"), None);
    }

    #[test]
    fn test_set_all_replaces_mapping() {
        let mut registry = ProviderRegistry::new();
        registry.set_all(HashMap::from([(
            "string".to_string(),
            "word".to_string(),
        )]));

        assert_eq!(registry.get("string"), Some("word"));
        assert_eq!(registry.get("int"), None);
    }

    #[test]
    fn test_add_all_merges_with_override() {
        let mut registry = ProviderRegistry::new();
        registry.add_all(HashMap::from([
            ("string".to_string(), "paragraph".to_string()),
            ("money".to_string(), "random_float".to_string()),
        ]));

        assert_eq!(registry.get("string"), Some("paragraph"));
        assert_eq!(registry.get("money"), Some("random_float"));
        // Untouched defaults survive the merge.
        assert_eq!(registry.get("bool"), Some("boolean"));
    }

    #[test]
    fn test_every_default_formatter_produces_a_value() {
        let catalog = FormatterCatalog::new();
        let registry = ProviderRegistry::new();

        for kind in ["string", "int", "float", "bool"] {
            let formatter = registry.get(kind).unwrap();
            let value = catalog.sample(formatter).unwrap();
            assert!(!value.is_null(), "{} produced null", kind);
        }
    }

    #[test]
    fn test_sample_unknown_formatter_is_an_error() {
        let catalog = FormatterCatalog::new();
        assert!(matches!(
            catalog.sample("no_such_formatter"),
            Err(MockError::ProviderNotFound(_))
        ));
    }

    #[test]
    fn test_custom_formatter_registration() {
        let mut catalog = FormatterCatalog::new();
        catalog.register("answer", || json!(42));

        assert!(catalog.contains("answer"));
        assert_eq!(catalog.sample("answer").unwrap(), json!(42));
    }

    #[test]
    fn test_random_digit_not_null_is_nonzero() {
        let catalog = FormatterCatalog::new();
        for _ in 0..50 {
            let value = catalog.sample("random_digit_not_null").unwrap();
            let n = value.as_i64().unwrap();
            assert!((1..=9).contains(&n));
        }
    }
}
