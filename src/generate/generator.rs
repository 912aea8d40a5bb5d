//! The recursive value generator: one descriptor plus one directive in, one
//! concrete value out.

use std::cell::Cell;

use serde_json::Value;
use tracing::{debug, trace};

use crate::domain::error::{MockError, MockResult};
use crate::domain::{FieldDirective, TypeDescriptor};
use crate::generate::mocker::Mocker;

/// Per-call generation state. One generator is created for each top-level
/// mock call, carries the element budget across the whole recursion, and is
/// dropped when the call returns.
pub struct ValueGenerator<'a> {
    mocker: &'a Mocker,
    elements: Cell<usize>,
}

impl<'a> ValueGenerator<'a> {
    pub(crate) fn new(mocker: &'a Mocker) -> Self {
        Self {
            mocker,
            elements: Cell::new(0),
        }
    }

    /// Produce one value for a field of `owner_type`.
    ///
    /// Priority order: override callback, explicit provider, collection
    /// expansion, registry-mapped formatter, nested object. A nested object
    /// past the recursion ceiling resolves to `Null`.
    pub fn generate(
        &self,
        owner_type: &str,
        owner: &Value,
        field: &str,
        descriptor: &TypeDescriptor,
        directive: &FieldDirective,
        depth: usize,
    ) -> MockResult<Value> {
        if let Some(callback) = &directive.callback {
            trace!("{}.{}: override callback {}", owner_type, field, callback);
            return self.mocker.reflector().invoke(owner_type, owner, callback);
        }
        if let Some(provider) = &directive.provider {
            trace!("{}.{}: override provider {}", owner_type, field, provider);
            return self.mocker.formatters().sample(provider);
        }

        match descriptor {
            TypeDescriptor::Collection(element) => {
                let count = self.element_count(field, directive)?;
                self.charge(count)?;

                // Count and override directives apply to the outer
                // collection only; elements generate under a fresh
                // directive at the same depth.
                let element_directive = FieldDirective::default();
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.generate(
                        owner_type,
                        owner,
                        field,
                        element,
                        &element_directive,
                        depth,
                    )?);
                }
                Ok(Value::Array(items))
            }
            TypeDescriptor::Scalar(kind) | TypeDescriptor::Named(kind) => {
                // The registry is consulted before object recursion, so a
                // named kind mapped to a formatter is sampled as a scalar.
                if let Some(formatter) = self.mocker.providers().get(kind) {
                    return self.mocker.formatters().sample(formatter);
                }
                self.nested_object(kind, depth)
            }
        }
    }

    fn nested_object(&self, type_name: &str, depth: usize) -> MockResult<Value> {
        let budget = self.mocker.settings().max_recursion_depth;
        if depth > budget {
            debug!(
                "recursion ceiling reached for {} at depth {}, leaving field null",
                type_name, depth
            );
            return Ok(Value::Null);
        }

        let mut instance = self.mocker.reflector().construct(type_name)?;
        self.mocker
            .fill_fields(self, type_name, &mut instance, depth + 1)?;
        Ok(instance)
    }

    fn element_count(&self, field: &str, directive: &FieldDirective) -> MockResult<usize> {
        if let Some(count) = directive.count {
            return Ok(count);
        }
        let (min, max) = match directive.count_range {
            Some((min, max)) => {
                if min > max {
                    return Err(MockError::InvalidCountRange {
                        field: field.to_string(),
                        min: min as i64,
                        max: max as i64,
                    });
                }
                (min, max)
            }
            None => (
                self.mocker.settings().default_count_min,
                self.mocker.settings().default_count_max,
            ),
        };
        Ok(self.mocker.draw_count(min, max))
    }

    fn charge(&self, count: usize) -> MockResult<()> {
        let limit = self.mocker.settings().max_elements;
        let total = self.elements.get().saturating_add(count);
        if total > limit {
            return Err(MockError::ElementBudgetExceeded {
                requested: count,
                limit,
            });
        }
        self.elements.set(total);
        Ok(())
    }
}
