use crate::domain::model::MaskKind;
use crate::utils::error::{MaskError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "field-mask")]
#[command(about = "Format CPF, CNPJ, CEP, phone and date values the way a masked input would")]
pub struct CliConfig {
    /// Mask to apply: cpf, cnpj, cpfcnpj, cep, tel or databr
    #[arg(short, long)]
    pub kind: Option<MaskKind>,

    /// Values to format; read from stdin, one per line, when omitted
    pub values: Vec<String>,

    /// TOML file describing a form and its masked fields
    #[arg(short, long, conflicts_with = "kind")]
    pub config: Option<PathBuf>,

    /// Type TEXT into the configured field SELECTOR (repeatable)
    #[arg(long = "type", value_name = "SELECTOR=TEXT", requires = "config")]
    pub typed: Vec<String>,

    #[arg(long, help = "Print results as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Splits every `--type` entry into `(selector, text)`.
    pub fn typed_entries(&self) -> Result<Vec<(String, String)>> {
        self.typed
            .iter()
            .map(|entry| {
                let (selector, text) =
                    entry
                        .split_once('=')
                        .ok_or_else(|| MaskError::InvalidConfigValue {
                            field: "type".to_string(),
                            value: entry.clone(),
                            reason: "Expected SELECTOR=TEXT".to_string(),
                        })?;
                validate_non_empty_string("type", selector)?;
                Ok((selector.trim().to_string(), text.to_string()))
            })
            .collect()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.kind.is_none() && self.config.is_none() {
            return Err(MaskError::ConfigValidation {
                field: "kind".to_string(),
                message: "either --kind or --config must be given".to_string(),
            });
        }
        self.typed_entries().map(|_| ())
    }
}
