//! Structured query module - the output of the extraction pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognised gaine prefixes, longest first so `gsb` wins over `gs`
pub const GAINE_PREFIXES: [&str; 4] = ["gsb", "gab", "gl", "gs"];

/// Maximum number of digits after a gaine prefix
pub const MAX_GAINE_DIGITS: usize = 5;

/// Category of inventory query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// Incoming movements ("les entrées")
    Entrees,

    /// Outgoing movements ("les sorties")
    Sorties,

    /// Current stock level
    Stock,
}

impl Intent {
    /// Word stems, in priority order, for accent-folded lowercase text
    pub const STEMS: [(&'static str, Intent); 3] = [
        ("entree", Intent::Entrees),
        ("sorti", Intent::Sorties),
        ("stock", Intent::Stock),
    ];

    /// Get the intent name as used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Entrees => "entrees",
            Intent::Sorties => "sorties",
            Intent::Stock => "stock",
        }
    }

    /// Map a single accent-folded, lowercase word to an intent by stem prefix
    ///
    /// # Examples
    ///
    /// ```
    /// use gaine_domain::Intent;
    ///
    /// assert_eq!(Intent::from_folded_word("entrees"), Some(Intent::Entrees));
    /// assert_eq!(Intent::from_folded_word("sortie"), Some(Intent::Sorties));
    /// assert_eq!(Intent::from_folded_word("inventaire"), None);
    /// ```
    pub fn from_folded_word(word: &str) -> Option<Self> {
        Self::STEMS
            .iter()
            .find(|(stem, _)| word.starts_with(stem))
            .map(|(_, intent)| *intent)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of the inventory object being queried
///
/// The value is always lowercase, prefix immediately followed by digits,
/// with no separators (e.g. `gsb11`, `gl90`). Construction goes through
/// [`Gaine::parse`] or [`Gaine::from_spoken`], which enforce that shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GaineWire", into = "GaineWire")]
pub struct Gaine {
    value: String,
}

impl Gaine {
    /// Validate an identifier value without correcting it
    ///
    /// Only surrounding whitespace and letter case are normalised; anything
    /// else that does not match `^(gsb|gab|gl|gs)\d{1,5}$` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use gaine_domain::Gaine;
    ///
    /// assert_eq!(Gaine::parse("GSB11").unwrap().value(), "gsb11");
    /// assert!(Gaine::parse("gsb 11").is_none());
    /// assert!(Gaine::parse("gx12").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        if Self::is_canonical(&value) {
            Some(Self { value })
        } else {
            None
        }
    }

    /// Normalise a loosely transcribed identifier ("GSB 11", "gl-90")
    ///
    /// Internal spaces and hyphens are stripped before validation.
    pub fn from_spoken(raw: &str) -> Option<Self> {
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        Self::parse(&compact)
    }

    /// The canonical identifier, e.g. `gsb11`
    pub fn value(&self) -> &str {
        &self.value
    }

    fn is_canonical(value: &str) -> bool {
        GAINE_PREFIXES.iter().any(|prefix| {
            value.strip_prefix(prefix).is_some_and(|digits| {
                (1..=MAX_GAINE_DIGITS).contains(&digits.len())
                    && digits.bytes().all(|b| b.is_ascii_digit())
            })
        })
    }
}

impl fmt::Display for Gaine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Serialize, Deserialize)]
struct GaineWire {
    #[serde(rename = "type")]
    kind: GaineKind,
    value: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum GaineKind {
    Prefix,
}

impl From<Gaine> for GaineWire {
    fn from(gaine: Gaine) -> Self {
        Self {
            kind: GaineKind::Prefix,
            value: gaine.value,
        }
    }
}

impl TryFrom<GaineWire> for Gaine {
    type Error = String;

    fn try_from(wire: GaineWire) -> Result<Self, Self::Error> {
        Gaine::parse(&wire.value).ok_or_else(|| format!("Invalid gaine identifier: {}", wire.value))
    }
}

/// Calendar date in `YYYY-MM-DD` form
///
/// Only the shape is enforced; the date is not checked against a calendar.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoDate(String);

impl IsoDate {
    /// Build a date from numeric components
    ///
    /// # Examples
    ///
    /// ```
    /// use gaine_domain::IsoDate;
    ///
    /// assert_eq!(IsoDate::from_ymd(2025, 3, 1).as_str(), "2025-03-01");
    /// ```
    pub fn from_ymd(year: u32, month: u32, day: u32) -> Self {
        Self(format!("{:04}-{:02}-{:02}", year, month, day))
    }

    /// Accept a string already in canonical `YYYY-MM-DD` shape
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        shaped.then(|| Self(s.to_string()))
    }

    /// Get the date as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IsoDate {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        IsoDate::parse(&s).ok_or_else(|| format!("Invalid ISO date: {}", s))
    }
}

impl From<IsoDate> for String {
    fn from(date: IsoDate) -> Self {
        date.0
    }
}

/// Temporal reference of a query
///
/// Serialises to `{}`, `{"date": ..}` or `{"from": .., "to": ..}`; a single
/// date and a range can never be present together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeRef {
    /// Inclusive date range
    Range {
        /// First day of the range
        from: IsoDate,
        /// Last day of the range
        to: IsoDate,
    },

    /// A single day
    Day {
        /// The day
        date: IsoDate,
    },

    /// No temporal filter
    Unspecified {},
}

impl TimeRef {
    /// Single-day reference
    pub fn day(date: IsoDate) -> Self {
        TimeRef::Day { date }
    }

    /// Inclusive range reference
    pub fn range(from: IsoDate, to: IsoDate) -> Self {
        TimeRef::Range { from, to }
    }

    /// Whether no temporal filter was found
    pub fn is_unspecified(&self) -> bool {
        matches!(self, TimeRef::Unspecified {})
    }
}

impl Default for TimeRef {
    fn default() -> Self {
        TimeRef::Unspecified {}
    }
}

/// A structured inventory query extracted from an utterance
///
/// A query with `intent` or `gaine` absent is a partial result; deciding
/// what to tell the user in that case is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Query category, if recognised
    pub intent: Option<Intent>,

    /// Target identifier, if recognised
    pub gaine: Option<Gaine>,

    /// Temporal filter
    #[serde(default)]
    pub time: TimeRef,
}

impl StructuredQuery {
    /// Create a new query
    pub fn new(intent: Option<Intent>, gaine: Option<Gaine>, time: TimeRef) -> Self {
        Self { intent, gaine, time }
    }

    /// Both intent and gaine are present
    pub fn is_complete(&self) -> bool {
        self.intent.is_some() && self.gaine.is_some()
    }

    /// Nothing at all was recognised
    pub fn is_empty(&self) -> bool {
        self.intent.is_none() && self.gaine.is_none() && self.time.is_unspecified()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: every canonical identifier survives parsing unchanged
        #[test]
        fn test_gaine_canonical_roundtrip(prefix in prop::sample::select(GAINE_PREFIXES.to_vec()), n in 0u32..100_000) {
            let value = format!("{}{}", prefix, n);
            let gaine = Gaine::parse(&value).unwrap();
            prop_assert_eq!(gaine.value(), value.as_str());
        }

        /// Property: spoken separators never leak into the stored value
        #[test]
        fn test_gaine_spoken_is_compact(prefix in prop::sample::select(GAINE_PREFIXES.to_vec()), n in 0u32..100_000, sep in "[ -]{0,2}") {
            let raw = format!("{}{}{}", prefix.to_uppercase(), sep, n);
            let gaine = Gaine::from_spoken(&raw).unwrap();
            prop_assert!(!gaine.value().contains(' ') && !gaine.value().contains('-'));
            prop_assert_eq!(gaine.value(), gaine.value().to_lowercase());
        }
    }
}
