use thiserror::Error;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let generation = &settings.generation;

        if generation.default_count_min > generation.default_count_max {
            errors.push(ValidationError::InvalidValue {
                field: "generation.default_count_min".to_string(),
                reason: format!(
                    "min {} is greater than max {}",
                    generation.default_count_min, generation.default_count_max
                ),
            });
        }

        if generation.max_elements == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "generation.max_elements".to_string(),
                reason: "element budget must be greater than 0".to_string(),
            });
        }

        for (kind, formatter) in &generation.providers {
            if kind.is_empty() {
                errors.push(ValidationError::MissingField(
                    "generation.providers key".to_string(),
                ));
            }
            if formatter.is_empty() {
                errors.push(ValidationError::InvalidValue {
                    field: format!("generation.providers.{}", kind),
                    reason: "formatter name must not be empty".to_string(),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationSettings;

    #[test]
    fn test_validate_defaults() {
        let settings = Settings::default();
        assert!(SettingsValidator::validate(&settings).is_ok());
    }

    #[test]
    fn test_validate_inverted_count_range() {
        let settings = Settings {
            generation: GenerationSettings {
                default_count_min: 5,
                default_count_max: 2,
                ..GenerationSettings::default()
            },
        };

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("default_count_min"));
    }

    #[test]
    fn test_validate_zero_element_budget() {
        let settings = Settings {
            generation: GenerationSettings {
                max_elements: 0,
                ..GenerationSettings::default()
            },
        };

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors[0].to_string().contains("max_elements"));
    }

    #[test]
    fn test_validate_empty_formatter_name() {
        let mut settings = Settings::default();
        settings
            .generation
            .providers
            .insert("money".to_string(), String::new());

        let errors = SettingsValidator::validate(&settings).unwrap_err();
        assert!(errors[0].to_string().contains("providers.money"));
    }
}
