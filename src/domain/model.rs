use crate::utils::error::MaskError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaskKind {
    /// CPF, `ddd.ddd.ddd-dd`
    DocumentId,
    /// CNPJ, `dd.ddd.ddd/dddd-dd`
    CompanyId,
    /// CPF while it fits, CNPJ once more digits arrive
    DocumentOrCompanyId,
    /// CEP, `dd.ddd-ddd`
    PostalCode,
    /// `(dd)nnnn-nnnn` or `(dd)nnnnn-nnnn`
    Phone,
    /// `dd/mm/aaaa`
    DateBr,
}

impl MaskKind {
    pub const ALL: [MaskKind; 6] = [
        MaskKind::DocumentId,
        MaskKind::CompanyId,
        MaskKind::DocumentOrCompanyId,
        MaskKind::PostalCode,
        MaskKind::Phone,
        MaskKind::DateBr,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MaskKind::DocumentId => "document-id",
            MaskKind::CompanyId => "company-id",
            MaskKind::DocumentOrCompanyId => "document-or-company-id",
            MaskKind::PostalCode => "postal-code",
            MaskKind::Phone => "phone",
            MaskKind::DateBr => "date-br",
        }
    }

    /// The fully formatted shape, `d` standing for a digit.
    pub fn canonical_shape(&self) -> &'static str {
        match self {
            MaskKind::DocumentId => "ddd.ddd.ddd-dd",
            MaskKind::CompanyId | MaskKind::DocumentOrCompanyId => "dd.ddd.ddd/dddd-dd",
            MaskKind::PostalCode => "dd.ddd-ddd",
            MaskKind::Phone => "(dd)ddddd-dddd",
            MaskKind::DateBr => "dd/dd/dddd",
        }
    }

    /// Number of digits kept once the value reaches its canonical shape.
    pub fn digit_capacity(&self) -> usize {
        self.canonical_shape().chars().filter(|c| *c == 'd').count()
    }
}

impl fmt::Display for MaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaskKind {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "cpf" | "document-id" => Ok(MaskKind::DocumentId),
            "cnpj" | "company-id" => Ok(MaskKind::CompanyId),
            "cpfcnpj" | "cpf-cnpj" | "document-or-company-id" => {
                Ok(MaskKind::DocumentOrCompanyId)
            }
            "cep" | "postal-code" => Ok(MaskKind::PostalCode),
            "tel" | "phone" => Ok(MaskKind::Phone),
            "databr" | "data-br" | "date-br" => Ok(MaskKind::DateBr),
            _ => Err(MaskError::UnknownMaskKind {
                name: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for MaskKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Events a running mask reports to an optional observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MaskDiagnostic {
    /// The dual identifier mask outgrew the CPF shape and switched to CNPJ.
    DualModeOverflow { interim_len: usize },
}

/// Result of `MaskEngine::add_event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerBinding {
    pub event: String,
    pub kind: MaskKind,
    pub selector: Option<String>,
    /// False when the target was missing and nothing was registered.
    pub attached: bool,
}

impl TriggerBinding {
    pub fn is_attached(&self) -> bool {
        self.attached
    }
}
