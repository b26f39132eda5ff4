//! Keyword and pattern fallback
//!
//! Three independent lookups over the whole utterance. Each one returns its
//! field or nothing; composing them into a query is the orchestrator's job.
//! Only a single date is ever recovered here, never a range.

use crate::dates::{resolve_date, MONTHS};
use crate::normalize::fold;
use gaine_domain::{Gaine, Intent, IsoDate};
use once_cell::sync::Lazy;
use regex::Regex;

static GAINE_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:gsb|gab|gl|gs)[\s-]?\d{1,5}\b").unwrap());

static TEXTUAL_DATE_ANY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:1er|premier|\d{{1,2}})\s+(?:{})\s+\d{{4}}\b", MONTHS.join("|"))).unwrap()
});

static NUMERIC_DATE_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:\d{4}-\d{2}-\d{2}|\d{1,2}[/-]\d{1,2}[/-]\d{2,4})\b").unwrap());

/// First intent stem present anywhere, by priority entrées > sorties > stock
///
/// ```
/// use gaine_extractor::fallback::find_intent;
/// use gaine_domain::Intent;
///
/// assert_eq!(find_intent("STOCK gl90"), Some(Intent::Stock));
/// assert_eq!(find_intent("sorties puis entrées"), Some(Intent::Entrees));
/// ```
pub fn find_intent(text: &str) -> Option<Intent> {
    let folded = fold(text);
    let words: Vec<&str> = folded.split(|c: char| !c.is_alphanumeric()).collect();

    Intent::STEMS
        .iter()
        .find(|(stem, _)| words.iter().any(|word| word.starts_with(stem)))
        .map(|(_, intent)| *intent)
}

/// First prefix-then-digits identifier anywhere in the text
pub fn find_gaine(text: &str) -> Option<Gaine> {
    let folded = fold(text);
    GAINE_ANY
        .find_iter(&folded)
        .find_map(|m| Gaine::from_spoken(m.as_str()))
}

/// A single date: textual phrases first, then numeric tokens
pub fn find_date(text: &str) -> Option<IsoDate> {
    let folded = fold(text);

    TEXTUAL_DATE_ANY
        .find_iter(&folded)
        .find_map(|m| resolve_date(m.as_str()))
        .or_else(|| {
            NUMERIC_DATE_ANY
                .find_iter(&folded)
                .find_map(|m| resolve_date(m.as_str()))
        })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: shuffling filler words does not change what is found
        #[test]
        fn test_order_independent(
            filler in prop::collection::vec(prop::sample::select(vec!["bonjour", "merci", "svp", "alors", "je", "voudrais"]), 0..6),
            seed in any::<u64>(),
        ) {
            let mut words: Vec<&str> = filler.clone();
            words.extend(["sorties", "gsb42", "3/4/2025"]);
            let forward = words.join(" ");

            let shift = (seed % words.len() as u64) as usize;
            words.rotate_left(shift);
            words.reverse();
            let permuted = words.join(" ");

            prop_assert_eq!(find_intent(&forward), find_intent(&permuted));
            prop_assert_eq!(find_gaine(&forward), find_gaine(&permuted));
            prop_assert_eq!(find_date(&forward), find_date(&permuted));
        }
    }
}
