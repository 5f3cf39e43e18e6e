use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Replace the leftmost match only.
    First,
    /// Replace every non-overlapping match.
    All,
}

/// One substitution step of a mask: a pattern and a `${n}` replacement template.
#[derive(Debug, Clone)]
pub struct MaskRule {
    pattern: Regex,
    replacement: &'static str,
    scope: RuleScope,
}

impl MaskRule {
    fn new(pattern: &str, replacement: &'static str, scope: RuleScope) -> Self {
        let pattern = Regex::new(pattern).expect("mask patterns are valid regular expressions");
        Self {
            pattern,
            replacement,
            scope,
        }
    }

    pub fn first(pattern: &str, replacement: &'static str) -> Self {
        Self::new(pattern, replacement, RuleScope::First)
    }

    pub fn all(pattern: &str, replacement: &'static str) -> Self {
        Self::new(pattern, replacement, RuleScope::All)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        self.replacement
    }

    pub fn scope(&self) -> RuleScope {
        self.scope
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.scope {
            RuleScope::First => self.pattern.replace(text, self.replacement),
            RuleScope::All => self.pattern.replace_all(text, self.replacement),
        }
    }
}

/// Runs `rules` in order, each on the previous rule's output.
pub fn apply_rules(rules: &[MaskRule], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc).into_owned())
}

// Digit classes are spelled `[0-9]`: `\d` in `regex` also matches non-ASCII digits.

fn strip() -> MaskRule {
    MaskRule::all(r"[^0-9]+", "")
}

pub static DOCUMENT_ID_GROUPING: Lazy<Vec<MaskRule>> = Lazy::new(|| {
    vec![
        strip(),
        MaskRule::first(r"([0-9]{3})([0-9])", "${1}.${2}"),
        MaskRule::first(r"([0-9]{3})([0-9])", "${1}.${2}"),
        MaskRule::first(r"([0-9]{3})([0-9]{1,2})", "${1}-${2}"),
    ]
});

pub static DOCUMENT_ID_TRUNCATE: Lazy<MaskRule> = Lazy::new(|| {
    MaskRule::first(
        r"^([0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2})(.+)$",
        "${1}",
    )
});

pub static COMPANY_ID_GROUPING: Lazy<Vec<MaskRule>> = Lazy::new(|| {
    vec![
        strip(),
        MaskRule::first(r"([0-9]{2})([0-9])", "${1}.${2}"),
        MaskRule::first(r"([0-9]{3})([0-9])", "${1}.${2}"),
        MaskRule::first(r"([0-9]{3})([0-9])", "${1}/${2}"),
        MaskRule::first(r"([0-9]{4})([0-9]{1,2})", "${1}-${2}"),
    ]
});

pub static COMPANY_ID_TRUNCATE: Lazy<MaskRule> = Lazy::new(|| {
    MaskRule::first(
        r"^([0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2})(.+)$",
        "${1}",
    )
});

/// Unanchored variant used by the dual identifier mask after it switches to CNPJ.
pub static COMPANY_ID_TRUNCATE_UNANCHORED: Lazy<MaskRule> = Lazy::new(|| {
    MaskRule::first(
        r"([0-9]{2}\.[0-9]{3}\.[0-9]{3}/[0-9]{4}-[0-9]{2})(.+)",
        "${1}",
    )
});

pub static POSTAL_CODE: Lazy<Vec<MaskRule>> = Lazy::new(|| {
    vec![
        strip(),
        MaskRule::first(r"([0-9]{2})([0-9])", "${1}.${2}"),
        MaskRule::first(r"([0-9]{3})([0-9])", "${1}-${2}"),
        MaskRule::first(r"^([0-9]{2}\.[0-9]{3}-[0-9]{3})(.+)$", "${1}"),
    ]
});

pub static PHONE_AREA_CODE: Lazy<Vec<MaskRule>> = Lazy::new(|| {
    vec![
        strip(),
        MaskRule::first(r"([0-9]{2})([0-9])", "(${1})${2}"),
    ]
});

pub static PHONE_FIXED_LINE: Lazy<MaskRule> =
    Lazy::new(|| MaskRule::first(r"([0-9]{4})([0-9])", "${1}-${2}"));

pub static PHONE_MOBILE: Lazy<MaskRule> =
    Lazy::new(|| MaskRule::first(r"([0-9]{5})([0-9]{4})", "${1}-${2}"));

pub static PHONE_TRUNCATE: Lazy<MaskRule> = Lazy::new(|| {
    MaskRule::first(r"^(\([0-9]{2}\)[0-9]{5}-[0-9]{4})(.+)$", "${1}")
});

pub static DATE_BR: Lazy<Vec<MaskRule>> = Lazy::new(|| {
    vec![
        strip(),
        MaskRule::first(r"([0-9]{2})([0-9])", "${1}/${2}"),
        MaskRule::first(r"([0-9]{2})([0-9]{1,4})", "${1}/${2}"),
        MaskRule::first(r"^([0-9]{2}/[0-9]{2}/[0-9]{4})(.+)$", "${1}"),
    ]
});
