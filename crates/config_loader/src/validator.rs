//! Config validation
//!
//! Rules:
//! - logger name and sink names non-empty (derived `Validate` rules)
//! - sink names unique
//! - file sinks have a path
//! - console-only / file-only options not set on other variants

use std::collections::HashSet;

use contracts::{ContractError, LoggerBlueprint, SinkType};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Validate a LoggerBlueprint
///
/// Returns the first error found, or Ok(()).
pub fn validate(blueprint: &LoggerBlueprint) -> Result<(), ContractError> {
    validate_fields(blueprint)?;
    validate_sink_names(blueprint)?;
    validate_sink_options(blueprint)?;
    Ok(())
}

/// Run the derived field rules
fn validate_fields(blueprint: &LoggerBlueprint) -> Result<(), ContractError> {
    blueprint
        .validate()
        .map_err(|errors| first_error("", &errors))
}

/// Flatten nested validator errors into a single path + message
fn first_error(prefix: &str, errors: &ValidationErrors) -> ContractError {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                let message = list
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "invalid value".to_string());
                return ContractError::config_validation(path, message);
            }
            ValidationErrorsKind::Struct(inner) => return first_error(&path, inner),
            ValidationErrorsKind::List(items) => {
                if let Some((idx, inner)) = items.iter().next() {
                    return first_error(&format!("{path}[{idx}]"), inner);
                }
            }
        }
    }
    ContractError::config_validation(prefix, "invalid configuration")
}

/// Sink names must be unique
fn validate_sink_names(blueprint: &LoggerBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for sink in &blueprint.sinks {
        if !seen.insert(sink.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
    }
    Ok(())
}

/// Variant-specific options
fn validate_sink_options(blueprint: &LoggerBlueprint) -> Result<(), ContractError> {
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        match sink.sink_type {
            SinkType::File => {
                if sink.path.as_ref().is_none_or(|p| p.as_os_str().is_empty()) {
                    return Err(ContractError::config_validation(
                        format!("sinks[{idx}].path"),
                        "file sink requires a path",
                    ));
                }
            }
            SinkType::Console | SinkType::Memory => {
                if sink.path.is_some() {
                    return Err(ContractError::config_validation(
                        format!("sinks[{idx}].path"),
                        "path is only valid for file sinks",
                    ));
                }
                if sink.clear_on_open {
                    return Err(ContractError::config_validation(
                        format!("sinks[{idx}].clear_on_open"),
                        "clear_on_open is only valid for file sinks",
                    ));
                }
            }
        }
    }
    Ok(())
}
