//! The instance mocker: walks declared fields and fills the eligible empty
//! ones.

use std::sync::Arc;

use rand::Rng;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::GenerationSettings;
use crate::domain::error::MockResult;
use crate::domain::{MetadataPort, ReflectPort};
use crate::generate::generator::ValueGenerator;
use crate::generate::providers::{FormatterCatalog, ProviderRegistry};

/// Uniform inclusive-range draw used for collection counts.
pub type CountFn = Box<dyn Fn(usize, usize) -> usize + Send + Sync>;

/// Fixture mocker.
///
/// Owns the generation settings, the provider registry, the formatter
/// catalog and the two collaborator ports, and is passed explicitly into
/// every call; there is no process-wide instance. Configure it fully
/// before mocking: the registry and catalog are read-only while a call is
/// in flight.
pub struct Mocker {
    settings: GenerationSettings,
    providers: ProviderRegistry,
    formatters: FormatterCatalog,
    metadata: Arc<dyn MetadataPort>,
    reflector: Arc<dyn ReflectPort>,
    count_fn: CountFn,
}

impl Mocker {
    pub fn new(
        settings: GenerationSettings,
        metadata: Arc<dyn MetadataPort>,
        reflector: Arc<dyn ReflectPort>,
    ) -> Self {
        let mut providers = ProviderRegistry::new();
        providers.add_all(settings.providers.clone());

        Self {
            settings,
            providers,
            formatters: FormatterCatalog::new(),
            metadata,
            reflector,
            count_fn: Box::new(|min, max| rand::thread_rng().gen_range(min..=max)),
        }
    }

    /// Replace the count draw, e.g. with a deterministic one in tests.
    pub fn with_count_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize) -> usize + Send + Sync + 'static,
    {
        self.count_fn = Box::new(f);
        self
    }

    /// Mutable access for configuration-time registry changes.
    pub fn providers_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.providers
    }

    /// Mutable access for configuration-time formatter registration.
    pub fn formatters_mut(&mut self) -> &mut FormatterCatalog {
        &mut self.formatters
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn formatters(&self) -> &FormatterCatalog {
        &self.formatters
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub(crate) fn reflector(&self) -> &dyn ReflectPort {
        self.reflector.as_ref()
    }

    pub(crate) fn draw_count(&self, min: usize, max: usize) -> usize {
        (self.count_fn)(min, max)
    }

    /// Construct a default instance of the named type and mock it.
    pub fn mock(&self, type_name: &str) -> MockResult<Value> {
        let instance = self.reflector.construct(type_name)?;
        self.mock_instance(type_name, instance)
    }

    /// Fill every eligible empty field of the given instance and return it.
    /// Fields already holding a non-null value are never touched.
    pub fn mock_instance(&self, type_name: &str, mut instance: Value) -> MockResult<Value> {
        let generator = ValueGenerator::new(self);
        self.fill_fields(&generator, type_name, &mut instance, 1)?;
        Ok(instance)
    }

    pub(crate) fn fill_fields(
        &self,
        generator: &ValueGenerator,
        type_name: &str,
        instance: &mut Value,
        depth: usize,
    ) -> MockResult<()> {
        let whitelist = self.metadata.type_directive(type_name).whitelist;
        debug!("mocking instance of {} at depth {}", type_name, depth);

        for field in self.reflector.list_fields(type_name)? {
            if !self.reflector.get_field(instance, &field).is_null() {
                trace!("{}.{}: already set, skipping", type_name, field);
                continue;
            }

            let metadata = self.metadata.field_metadata(type_name, &field)?;
            let Some(descriptor) = &metadata.descriptor else {
                trace!("{}.{}: no usable type hint, skipping", type_name, field);
                continue;
            };

            let directive = &metadata.directive;
            let eligible = if whitelist {
                directive.has_override()
            } else {
                !directive.ignored
            };
            if !eligible {
                continue;
            }

            let value =
                generator.generate(type_name, instance, &field, descriptor, directive, depth)?;
            self.reflector
                .set_field(type_name, instance, &field, value)?;
        }

        Ok(())
    }
}
