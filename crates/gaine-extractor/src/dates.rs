//! Date phrase resolution
//!
//! Turns the date expressions people actually say into `YYYY-MM-DD`:
//!
//! 1. already canonical `2025-10-01`
//! 2. numeric `01-10-2025`, `1/10/25` (one separator kind per token, two-digit years are `20YY`)
//! 3. textual `1er mars 2025`, `premier mars 2025`, `15 février 2025`
//!
//! Day and month are bounded (1-31, 1-12) but not checked against a
//! calendar, so `31 février 2025` resolves to `2025-02-31`.

use crate::normalize::fold;
use gaine_domain::IsoDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// French month names, accent-folded, in calendar order
pub const MONTHS: [&str; 12] = [
    "janvier", "fevrier", "mars", "avril", "mai", "juin",
    "juillet", "aout", "septembre", "octobre", "novembre", "decembre",
];

/// Regex fragment matching any date phrase surface form inside a sentence
pub(crate) const DATE_PHRASE: &str =
    r"\d{4}-\d{2}-\d{2}|\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|(?:1er|premier|\d{1,2})\s+\w+\s+\d{4}";

static CANONICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap());

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})([/-])(\d{1,2})([/-])(\d{4}|\d{2})$").unwrap());

static TEXTUAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(1er|premier|\d{1,2})\s+(\w+)\s+(\d{4})$").unwrap());

/// Resolve a French date phrase to an ISO calendar date
///
/// Returns `None` when no surface form matches or a component is out of
/// range; never fails otherwise.
///
/// # Examples
///
/// ```
/// use gaine_extractor::dates::resolve_date;
///
/// assert_eq!(resolve_date("01-10-2025").unwrap().as_str(), "2025-10-01");
/// assert_eq!(resolve_date("1er mars 2025").unwrap().as_str(), "2025-03-01");
/// assert_eq!(resolve_date("15 Février 2025").unwrap().as_str(), "2025-02-15");
/// assert!(resolve_date("demain").is_none());
/// ```
pub fn resolve_date(phrase: &str) -> Option<IsoDate> {
    let phrase = fold(phrase);
    let phrase = phrase.trim_end_matches(['.', ',', ';', '!', '?']);

    if let Some(caps) = CANONICAL.captures(phrase) {
        let year: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return build(year, month, day);
    }

    if let Some(caps) = NUMERIC.captures(phrase) {
        if caps[2] != caps[4] {
            return None;
        }
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[3].parse().ok()?;
        let year = expand_year(&caps[5])?;
        return build(year, month, day);
    }

    if let Some(caps) = TEXTUAL.captures(phrase) {
        let day = match &caps[1] {
            "1er" | "premier" => 1,
            digits => digits.parse().ok()?,
        };
        let month = month_number(&caps[2])?;
        let year: u32 = caps[3].parse().ok()?;
        return build(year, month, day);
    }

    None
}

/// Month number (1-12) for a French month name, accents optional
///
/// ```
/// use gaine_extractor::dates::month_number;
///
/// assert_eq!(month_number("août"), Some(8));
/// assert_eq!(month_number("aout"), Some(8));
/// assert_eq!(month_number("march"), None);
/// ```
pub fn month_number(name: &str) -> Option<u32> {
    let folded = fold(name);
    MONTHS
        .iter()
        .position(|month| *month == folded)
        .map(|idx| idx as u32 + 1)
}

fn expand_year(digits: &str) -> Option<u32> {
    let year: u32 = digits.parse().ok()?;
    if digits.len() == 2 {
        Some(2000 + year)
    } else {
        Some(year)
    }
}

fn build(year: u32, month: u32, day: u32) -> Option<IsoDate> {
    if (1..=12).contains(&month) && (1..=31).contains(&day) {
        Some(IsoDate::from_ymd(year, month, day))
    } else {
        None
    }
}
