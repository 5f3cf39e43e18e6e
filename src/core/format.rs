use crate::core::rules::{
    apply_rules, COMPANY_ID_GROUPING, COMPANY_ID_TRUNCATE, COMPANY_ID_TRUNCATE_UNANCHORED,
    DATE_BR, DOCUMENT_ID_GROUPING, DOCUMENT_ID_TRUNCATE, PHONE_AREA_CODE, PHONE_FIXED_LINE,
    PHONE_MOBILE, PHONE_TRUNCATE, POSTAL_CODE,
};
use crate::domain::model::{MaskDiagnostic, MaskKind};

/// Longest text the CPF grouping may produce before the dual mask switches to CNPJ.
const DOCUMENT_ID_MAX_LEN: usize = 14;

/// Below this length a phone number is still in its fixed-line shape.
const PHONE_MOBILE_MIN_LEN: usize = 13;

/// Formats `raw` with the rules of `kind`.
///
/// Total over any input: text that never reaches the canonical shape comes back
/// partially formatted.
pub fn format_for(kind: MaskKind, raw: &str) -> String {
    format_observed(kind, raw, None)
}

/// Like [`format_for`], reporting diagnostics to `hook` when one is given.
pub fn format_observed(
    kind: MaskKind,
    raw: &str,
    hook: Option<&dyn Fn(&MaskDiagnostic)>,
) -> String {
    let formatted = match kind {
        MaskKind::DocumentId => document_id(raw),
        MaskKind::CompanyId => company_id(raw),
        MaskKind::DocumentOrCompanyId => document_or_company_id(raw, hook),
        MaskKind::PostalCode => apply_rules(&POSTAL_CODE, raw),
        MaskKind::Phone => phone(raw),
        MaskKind::DateBr => apply_rules(&DATE_BR, raw),
    };

    tracing::trace!(
        %kind,
        raw_len = raw.len(),
        formatted_len = formatted.len(),
        "mask applied"
    );
    formatted
}

fn document_id(raw: &str) -> String {
    let grouped = apply_rules(&DOCUMENT_ID_GROUPING, raw);
    DOCUMENT_ID_TRUNCATE.apply(&grouped).into_owned()
}

fn company_id(raw: &str) -> String {
    let grouped = apply_rules(&COMPANY_ID_GROUPING, raw);
    COMPANY_ID_TRUNCATE.apply(&grouped).into_owned()
}

fn document_or_company_id(raw: &str, hook: Option<&dyn Fn(&MaskDiagnostic)>) -> String {
    let interim = apply_rules(&DOCUMENT_ID_GROUPING, raw);
    if interim.len() <= DOCUMENT_ID_MAX_LEN {
        return interim;
    }

    let interim_len = interim.len();
    tracing::debug!(interim_len, "document id overflowed, regrouping as company id");
    if let Some(hook) = hook {
        hook(&MaskDiagnostic::DualModeOverflow { interim_len });
    }

    let grouped = apply_rules(&COMPANY_ID_GROUPING, raw);
    COMPANY_ID_TRUNCATE_UNANCHORED.apply(&grouped).into_owned()
}

fn phone(raw: &str) -> String {
    let text = apply_rules(&PHONE_AREA_CODE, raw);
    if text.len() < PHONE_MOBILE_MIN_LEN {
        PHONE_FIXED_LINE.apply(&text).into_owned()
    } else {
        // Only the mobile branch truncates. A fixed-line value is at most 12
        // characters, too short for the truncate pattern to match anyway.
        let text = PHONE_MOBILE.apply(&text);
        PHONE_TRUNCATE.apply(&text).into_owned()
    }
}
