//! # Mimus - Test Fixture Mocker
//!
//! Mimus is a recursive test-fixture generator built in Rust. Given a type
//! described by annotation records, it produces an instance with every
//! unset field populated by a plausible fake value, recursively, for use in
//! unit and integration tests.
//!
//! ## Features
//!
//! - **Type-driven generation**: scalar kinds sample fake-data formatters,
//!   collection hints (`T[]`, `array<T>`, bare `array`) expand into sized
//!   arrays, named types recurse into nested instances
//! - **Per-field overrides**: custom callbacks, explicit formatter names,
//!   ignore flags, exact counts and count ranges
//! - **Whitelist policy**: per-type opt-in mode where only explicitly
//!   overridden fields are populated
//! - **Bounded recursion**: a depth ceiling for object graphs and an
//!   element budget for collection width
//! - **Fill-only**: fields already holding a value are never overwritten
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use mimus::{GenerationSettings, Mocker, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.register(serde_json::from_value(serde_json::json!({
//!     "name": "User",
//!     "fields": [
//!         { "name": "email", "type": "string", "mock": { "provider": "email" } },
//!         { "name": "age", "type": "int" },
//!         { "name": "tags", "type": "array<string>", "count": { "count": 2 } }
//!     ]
//! })).unwrap());
//!
//! let registry = Arc::new(registry);
//! let mocker = Mocker::new(GenerationSettings::default(), registry.clone(), registry);
//!
//! let user = mocker.mock("User").unwrap();
//! assert!(user["email"].is_string());
//! assert_eq!(user["tags"].as_array().unwrap().len(), 2);
//! ```
//!
//! ## Architecture
//!
//! Mimus follows Hexagonal Architecture:
//! - **Domain**: the normalized data model (type descriptors, directives)
//!   and the two collaborator ports (metadata, reflection)
//! - **Generate**: the recursive engine: value generator, instance
//!   mocker, provider registry, formatter catalog
//! - **Adapters**: annotation normalization and the dynamic type registry
//!   over JSON instances
//! - **Config**: settings loading and validation

pub mod adapters;
pub mod config;
pub mod domain;
pub mod generate;

pub use adapters::annotations::{
    parse_type_hint, CountAnnotation, FieldAnnotation, MockAnnotation, TypeAnnotation,
};
pub use adapters::type_registry::TypeRegistry;
pub use config::{GenerationSettings, Settings};
pub use domain::error::{MockError, MockResult};
pub use domain::{
    FieldDirective, FieldMetadata, MetadataPort, ReflectPort, TypeDescriptor, TypeDirective,
};
pub use generate::mocker::Mocker;
pub use generate::providers::{FormatterCatalog, ProviderRegistry};
