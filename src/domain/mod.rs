use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod error;

use error::MockResult;

/// Normalized description of a field's declared type.
///
/// Produced by the annotation resolver from the hint grammar (`string`,
/// `Bar`, `Bar[]`, `array<int>`, bare `array` with an element note) and
/// consumed by the value generator. Collections nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// Builtin scalar kind: "string", "int", "float" or "bool"
    Scalar(String),
    /// Reference to another annotated type
    Named(String),
    /// Ordered collection of elements. The element descriptor is always
    /// present; the resolver fills in the string default when the source
    /// grammar omitted it.
    Collection(Box<TypeDescriptor>),
}

/// Per-field generation instructions, normalized from raw annotations.
///
/// A default directive means "generate from the declared type with no
/// overrides". At most one of `callback` / `provider` is honored; callback
/// takes precedence when both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldDirective {
    /// Zero-argument method on the owning instance whose return value is
    /// used verbatim
    pub callback: Option<String>,
    /// Formatter name sampled directly, bypassing the type-inferred one
    pub provider: Option<String>,
    /// Never auto-populate this field
    #[serde(default)]
    pub ignored: bool,
    /// Exact element count for collection fields
    pub count: Option<usize>,
    /// Inclusive (min, max) bounds for collection fields, used only when
    /// `count` is absent
    pub count_range: Option<(usize, usize)>,
}

impl FieldDirective {
    /// True when the field carries an explicit override. In whitelist mode
    /// only overridden fields are eligible for auto-population.
    pub fn has_override(&self) -> bool {
        self.callback.is_some() || self.provider.is_some()
    }
}

/// Per-type generation policy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TypeDirective {
    /// Restrict auto-population to explicitly overridden fields
    #[serde(default)]
    pub whitelist: bool,
}

/// Resolved metadata for one declared field: its type descriptor (if the
/// hint was recognizable) plus its directive. Derived fresh per mocking
/// call and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct FieldMetadata {
    /// None when the field carries no recognizable type hint; such fields
    /// are skipped, not errors
    pub descriptor: Option<TypeDescriptor>,
    pub directive: FieldDirective,
}

/// Metadata collaborator: yields the normalized directive set per type and
/// per field. Implementations may cache raw annotation records, but the
/// derived values are produced fresh on every call.
pub trait MetadataPort: Send + Sync {
    /// Type-level policy; defaults for unknown types.
    fn type_directive(&self, type_name: &str) -> TypeDirective;

    /// Descriptor and directive for one declared field. Malformed count
    /// directives surface here as fatal errors.
    fn field_metadata(&self, type_name: &str, field: &str) -> MockResult<FieldMetadata>;
}

/// Reflection collaborator: the capability interface the engine uses
/// instead of concrete type internals.
pub trait ReflectPort: Send + Sync {
    /// Declared fields of the type, in declaration order.
    fn list_fields(&self, type_name: &str) -> MockResult<Vec<String>>;

    /// Current value of a field; `Null` when absent.
    fn get_field(&self, instance: &Value, field: &str) -> Value;

    /// Write a generated value back into the instance.
    fn set_field(
        &self,
        type_name: &str,
        instance: &mut Value,
        field: &str,
        value: Value,
    ) -> MockResult<()>;

    /// Default instance of the named type, declared defaults applied.
    fn construct(&self, type_name: &str) -> MockResult<Value>;

    /// Invoke a registered zero-argument callback on the instance.
    fn invoke(&self, type_name: &str, instance: &Value, callback: &str) -> MockResult<Value>;
}
