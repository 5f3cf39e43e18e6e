use anyhow::Context;
use clap::Parser;
use field_mask::utils::{logger, validation::Validate};
use field_mask::{
    format_for, CliConfig, MaskConfig, MaskError, MaskKind, MaskTarget, MemoryField,
};
use serde::Serialize;
use std::io::BufRead;
use std::rc::Rc;

#[derive(Debug, Serialize)]
struct FormattedValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    selector: Option<String>,
    kind: MaskKind,
    input: String,
    output: String,
}

fn main() {
    let config = CliConfig::parse();

    if let Err(e) = run(&config) {
        match e.downcast_ref::<MaskError>() {
            Some(mask_error) => {
                tracing::error!(
                    "❌ field-mask failed: {} (Category: {:?}, Severity: {:?})",
                    mask_error,
                    mask_error.category(),
                    mask_error.severity()
                );
                eprintln!("❌ {}", mask_error.user_friendly_message());
                eprintln!("💡 {}", mask_error.recovery_suggestion());
                std::process::exit(mask_error.severity().exit_code());
            }
            None => {
                tracing::error!("❌ field-mask failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    let mask_config = match &config.config {
        Some(path) => Some(
            MaskConfig::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        ),
        None => None,
    };

    let verbose = config.verbose || mask_config.as_ref().is_some_and(|c| c.verbose());
    if mask_config.as_ref().is_some_and(|c| c.json_logs()) {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    config.validate()?;
    if let Some(mask_config) = &mask_config {
        mask_config.validate()?;
    }

    let results = match (&mask_config, config.kind) {
        (Some(mask_config), _) => run_form(config, mask_config)?,
        (None, Some(kind)) => format_values(kind, &input_values(config)?),
        (None, None) => anyhow::bail!("either --kind or --config must be given"),
    };

    if config.json {
        let json = serde_json::to_string_pretty(&results).map_err(MaskError::from)?;
        println!("{}", json);
    } else {
        for result in &results {
            match &result.selector {
                Some(selector) => println!("{}\t{}", selector, result.output),
                None => println!("{}", result.output),
            }
        }
    }

    Ok(())
}

fn input_values(config: &CliConfig) -> anyhow::Result<Vec<String>> {
    if !config.values.is_empty() {
        return Ok(config.values.clone());
    }

    let stdin = std::io::stdin();
    let mut values = Vec::new();
    for line in stdin.lock().lines() {
        values.push(line.map_err(MaskError::from)?);
    }
    Ok(values)
}

fn format_values(kind: MaskKind, values: &[String]) -> Vec<FormattedValue> {
    values
        .iter()
        .map(|value| FormattedValue {
            selector: None,
            kind,
            input: value.clone(),
            output: format_for(kind, value),
        })
        .collect()
}

/// Builds the configured form, binds its masks, then types each `--type`
/// entry into its field and commits it.
fn run_form(config: &CliConfig, mask_config: &MaskConfig) -> anyhow::Result<Vec<FormattedValue>> {
    let form = mask_config.build_form();
    let bindings = mask_config.bind_all(&form)?;
    tracing::info!("🔗 Bound {} masked field(s)", bindings.len());

    let mut typed_inputs: Vec<(Rc<MemoryField>, String)> = Vec::new();
    for (selector, text) in config.typed_entries()? {
        let field = form
            .field(&selector)
            .ok_or_else(|| MaskError::TargetNotFound {
                selector: selector.clone(),
            })?;
        field.type_text(&text);
        field.dispatch("change");
        typed_inputs.push((field, text));
    }

    let results = mask_config
        .fields
        .iter()
        .filter_map(|field_config| {
            let field = form.field(&field_config.selector)?;
            let input = typed_inputs
                .iter()
                .rev()
                .find(|(typed, _)| Rc::ptr_eq(typed, &field))
                .map(|(_, text)| text.clone())
                .or_else(|| field_config.initial_value.clone())
                .unwrap_or_default();
            Some(FormattedValue {
                selector: Some(field_config.selector.clone()),
                kind: field_config.kind,
                input,
                output: field.value(),
            })
        })
        .collect();

    Ok(results)
}
