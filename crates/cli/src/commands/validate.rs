//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::{LoggerBlueprint, Severity, SinkType};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    name: String,
    sink_count: usize,
    console_sinks: usize,
    file_sinks: usize,
    memory_sinks: usize,
    sinks: Vec<SinkSummary>,
}

#[derive(Serialize)]
struct SinkSummary {
    name: String,
    sink_type: SinkType,
    threshold: Severity,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(summarize(&blueprint)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn summarize(blueprint: &LoggerBlueprint) -> ConfigSummary {
    let count = |kind: SinkType| blueprint.sinks.iter().filter(|s| s.sink_type == kind).count();

    ConfigSummary {
        version: format!("{:?}", blueprint.version),
        name: blueprint.name.clone(),
        sink_count: blueprint.sinks.len(),
        console_sinks: count(SinkType::Console),
        file_sinks: count(SinkType::File),
        memory_sinks: count(SinkType::Memory),
        sinks: blueprint
            .sinks
            .iter()
            .map(|s| SinkSummary {
                name: s.name.clone(),
                sink_type: s.sink_type,
                threshold: s.threshold,
            })
            .collect(),
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &LoggerBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.sinks.is_empty() {
        warnings.push("No sinks configured - every record will be dropped".to_string());
    }

    let consoles = blueprint
        .sinks
        .iter()
        .filter(|s| s.sink_type == SinkType::Console)
        .count();
    if consoles > 1 {
        warnings.push(format!(
            "{consoles} console sinks configured - terminal output will be duplicated"
        ));
    }

    for sink in &blueprint.sinks {
        if sink.clear_on_open {
            warnings.push(format!(
                "Sink '{}' truncates its file every time the logger starts",
                sink.name
            ));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Logger: {}", summary.name);
            println!(
                "  Sinks: {} (console {}, file {}, memory {})",
                summary.sink_count, summary.console_sinks, summary.file_sinks, summary.memory_sinks
            );
            for sink in &summary.sinks {
                println!("    - {} [{:?}] >= {}", sink.name, sink.sink_type, sink.threshold);
            }
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
