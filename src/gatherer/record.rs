//! The version record a gatherer produces for each discovered release

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Key holding the release identifier (e.g. a tag name)
pub const KEY_IDENTIFIER: &str = "identifier";
/// Key holding the optional free-text note
pub const KEY_NOTE: &str = "note";
/// Key holding the optional end-of-life marker
pub const KEY_EOL: &str = "eol";

/// End-of-life marker attached to a release
///
/// Producers pick whichever representation their source offers. A marker is
/// "truthy" (the release is end-of-life) when it is `Flag(true)`, a nonzero
/// number, a date that has been reached, or text other than `""` and `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Eol {
    Flag(bool),
    Number(serde_json::Number),
    Date(NaiveDate),
    Text(String),
}

impl Eol {
    /// Returns true if the marker says the release is end-of-life on `today`
    pub fn applies_on(&self, today: NaiveDate) -> bool {
        match self {
            Eol::Flag(flag) => *flag,
            Eol::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Eol::Date(date) => *date <= today,
            Eol::Text(text) => !matches!(text.trim(), "" | "0"),
        }
    }
}

/// A single discovered release of a binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eol: Option<Eol>,
}

impl VersionRecord {
    /// Creates a record without note or EOL marker.
    ///
    /// Returns `None` if the identifier is empty after trimming.
    pub fn new(identifier: impl Into<String>) -> Option<Self> {
        let identifier = identifier.into().trim().to_string();
        if identifier.is_empty() {
            return None;
        }
        Some(Self {
            identifier,
            note: None,
            eol: None,
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.trim().is_empty()).then_some(note);
        self
    }

    pub fn with_eol(mut self, eol: Eol) -> Self {
        self.eol = Some(eol);
        self
    }

    /// Returns true if this release is end-of-life as of today
    pub fn is_eol(&self) -> bool {
        self.is_eol_on(Local::now().date_naive())
    }

    pub fn is_eol_on(&self, today: NaiveDate) -> bool {
        self.eol.as_ref().is_some_and(|eol| eol.applies_on(today))
    }
}
