//! Dynamic type registry: the concrete metadata and reflection collaborator
//! used by the engine. Types are described by annotation records; instances
//! are plain JSON objects, so a field is "unset" exactly when it is `Null`.
//!
//! The registry is configured up front (registration, callbacks, directory
//! loading) and read-only while a mock call is in flight; concurrent
//! configuration mutation during generation is unsupported.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::adapters::annotations::TypeAnnotation;
use crate::domain::error::{MockError, MockResult};
use crate::domain::{FieldMetadata, MetadataPort, ReflectPort, TypeDirective};

/// Zero-argument callback invoked with the owning instance.
pub type Callback = Box<dyn Fn(&Value) -> Value + Send + Sync>;

#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeAnnotation>,
    callbacks: HashMap<(String, String), Callback>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one type annotation, replacing any previous definition.
    pub fn register(&mut self, annotation: TypeAnnotation) {
        self.types.insert(annotation.name.clone(), annotation);
    }

    pub fn register_all(&mut self, annotations: impl IntoIterator<Item = TypeAnnotation>) {
        for annotation in annotations {
            self.register(annotation);
        }
    }

    /// Register a named zero-argument callback for a type. Mock annotations
    /// referencing a callback resolve against these.
    pub fn register_callback<F>(&mut self, type_name: &str, callback: &str, f: F)
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.callbacks
            .insert((type_name.to_string(), callback.to_string()), Box::new(f));
    }

    /// Load annotation files (YAML or JSON, one type per file) from a
    /// directory.
    pub fn load_from_dir(&mut self, path: &str) -> MockResult<()> {
        let pattern = format!("{}/*", path);
        let entries =
            glob::glob(&pattern).map_err(|e| MockError::AnnotationLoad(e.to_string()))?;
        for entry in entries {
            match entry {
                Ok(path) => {
                    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                        if matches!(ext, "json" | "yaml" | "yml") {
                            let content = std::fs::read_to_string(&path)?;
                            let annotation: TypeAnnotation = if ext == "json" {
                                serde_json::from_str(&content)?
                            } else {
                                serde_yaml::from_str(&content)?
                            };
                            self.register(annotation);
                        }
                    }
                }
                Err(e) => warn!("Failed to read glob entry: {}", e),
            }
        }
        Ok(())
    }

    fn annotation(&self, type_name: &str) -> MockResult<&TypeAnnotation> {
        self.types
            .get(type_name)
            .ok_or_else(|| MockError::UnknownType(type_name.to_string()))
    }
}

impl MetadataPort for TypeRegistry {
    fn type_directive(&self, type_name: &str) -> TypeDirective {
        self.types
            .get(type_name)
            .map(|a| a.directive())
            .unwrap_or_default()
    }

    fn field_metadata(&self, type_name: &str, field: &str) -> MockResult<FieldMetadata> {
        let annotation = self.annotation(type_name)?;
        match annotation.fields.iter().find(|f| f.name == field) {
            Some(field) => field.resolve(),
            None => Ok(FieldMetadata::default()),
        }
    }
}

impl ReflectPort for TypeRegistry {
    fn list_fields(&self, type_name: &str) -> MockResult<Vec<String>> {
        Ok(self
            .annotation(type_name)?
            .fields
            .iter()
            .map(|f| f.name.clone())
            .collect())
    }

    fn get_field(&self, instance: &Value, field: &str) -> Value {
        instance.get(field).cloned().unwrap_or(Value::Null)
    }

    fn set_field(
        &self,
        type_name: &str,
        instance: &mut Value,
        field: &str,
        value: Value,
    ) -> MockResult<()> {
        let Value::Object(map) = instance else {
            return Err(MockError::NotAnObject(type_name.to_string()));
        };
        map.insert(field.to_string(), value);
        Ok(())
    }

    fn construct(&self, type_name: &str) -> MockResult<Value> {
        let annotation = self.annotation(type_name)?;
        let mut map = Map::new();
        for field in &annotation.fields {
            map.insert(
                field.name.clone(),
                field.default.clone().unwrap_or(Value::Null),
            );
        }
        Ok(Value::Object(map))
    }

    fn invoke(&self, type_name: &str, instance: &Value, callback: &str) -> MockResult<Value> {
        let key = (type_name.to_string(), callback.to_string());
        let f = self
            .callbacks
            .get(&key)
            .ok_or_else(|| MockError::CallbackNotFound {
                type_name: type_name.to_string(),
                callback: callback.to_string(),
            })?;
        Ok(f(instance))
    }
}
