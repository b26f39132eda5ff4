//! Anchor-syntax extraction
//!
//! Recognises the sentence shape `les <intent> de <gaine> [le <date> | du <date> au <date>]`
//! without any language model. Both the intent and the gaine anchor must be
//! present; otherwise the sentence is left to the next strategy.

use crate::dates::{resolve_date, DATE_PHRASE};
use crate::normalize::{fold, squash};
use crate::strategy::{ExtractionStrategy, StrategyKind};
use async_trait::async_trait;
use gaine_domain::{Gaine, Intent, StructuredQuery, TimeRef};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static INTENT_ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bles\s+(\w+)").unwrap());

static GAINE_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bde\s+(?:la\s+gaine\s+)?((?:gsb|gab|gl|gs)[\s-]?\d{1,5})\b").unwrap()
});

static RANGE_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\bdu\s+({0})\s+au\s+({0})", DATE_PHRASE)).unwrap()
});

static DAY_ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"\ble\s+({})", DATE_PHRASE)).unwrap());

/// Extract a complete query from anchor syntax, or `None`
///
/// # Examples
///
/// ```
/// use gaine_extractor::anchor::extract_anchored;
///
/// let query = extract_anchored("les sorties de gsb11 le 01-10-2025").unwrap();
/// assert_eq!(query.gaine.unwrap().value(), "gsb11");
///
/// assert!(extract_anchored("les sorties").is_none());
/// ```
pub fn extract_anchored(text: &str) -> Option<StructuredQuery> {
    let text = squash(text);

    let intent = anchor_intent(&text)?;
    let gaine = anchor_gaine(&text)?;
    let time = anchor_time(&text);

    Some(StructuredQuery::new(Some(intent), Some(gaine), time))
}

fn anchor_intent(text: &str) -> Option<Intent> {
    INTENT_ANCHOR
        .captures_iter(text)
        .find_map(|caps| Intent::from_folded_word(&fold(&caps[1])))
}

fn anchor_gaine(text: &str) -> Option<Gaine> {
    GAINE_ANCHOR
        .captures_iter(text)
        .find_map(|caps| Gaine::from_spoken(&caps[1]))
}

fn anchor_time(text: &str) -> TimeRef {
    if let Some(caps) = RANGE_ANCHOR.captures(text) {
        match (resolve_date(&caps[1]), resolve_date(&caps[2])) {
            (Some(from), Some(to)) => return TimeRef::range(from, to),
            _ => debug!("Discarding half-resolved range '{}'", &caps[0]),
        }
    }

    DAY_ANCHOR
        .captures_iter(text)
        .find_map(|caps| resolve_date(&caps[1]))
        .map(TimeRef::day)
        .unwrap_or_default()
}

/// Anchor syntax as a chain step
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorStrategy;

#[async_trait]
impl ExtractionStrategy for AnchorStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Anchor
    }

    async fn extract(&self, text: &str) -> Option<StructuredQuery> {
        extract_anchored(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaine_domain::IsoDate;

    #[test]
    fn test_single_day() {
        let query = extract_anchored("les sorties de gsb11 le 01-10-2025").unwrap();
        assert_eq!(query.intent, Some(Intent::Sorties));
        assert_eq!(query.gaine.unwrap().value(), "gsb11");
        assert_eq!(query.time, TimeRef::day(IsoDate::from_ymd(2025, 10, 1)));
    }

    #[test]
    fn test_textual_range() {
        let query = extract_anchored("les entrées de gab22 du 1er mars 2025 au 15 mars 2025").unwrap();
        assert_eq!(query.intent, Some(Intent::Entrees));
        assert_eq!(query.gaine.unwrap().value(), "gab22");
        assert_eq!(
            query.time,
            TimeRef::range(IsoDate::from_ymd(2025, 3, 1), IsoDate::from_ymd(2025, 3, 15))
        );
    }

    #[test]
    fn test_spoken_identifier_normalised() {
        let query = extract_anchored("Les Entrées de GSB 11").unwrap();
        assert_eq!(query.gaine.unwrap().value(), "gsb11");

        let query = extract_anchored("les sorties de la gaine gl-90").unwrap();
        assert_eq!(query.gaine.unwrap().value(), "gl90");
    }

    #[test]
    fn test_missing_intent_anchor() {
        assert!(extract_anchored("sorties de gsb11").is_none());
        assert!(extract_anchored("les chiffres de gsb11").is_none());
    }

    #[test]
    fn test_missing_gaine_anchor() {
        assert!(extract_anchored("les sorties").is_none());
        assert!(extract_anchored("les sorties gsb11").is_none());
        assert!(extract_anchored("les sorties de xyz12").is_none());
    }

    #[test]
    fn test_time_is_best_effort() {
        let query = extract_anchored("les stocks de gl90 le 45 mars 2025").unwrap();
        assert_eq!(query.intent, Some(Intent::Stock));
        assert!(query.time.is_unspecified());

        let query = extract_anchored("les stocks de gl90").unwrap();
        assert!(query.time.is_unspecified());
    }

    #[test]
    fn test_half_resolved_range_discarded() {
        let query = extract_anchored("les sorties de gs5 du 1er mars 2025 au 15 marz 2025").unwrap();
        assert!(query.time.is_unspecified());
    }

    #[test]
    fn test_numeric_range() {
        let query = extract_anchored("les sorties de gs5 du 01/03/25 au 15/03/25").unwrap();
        assert_eq!(
            query.time,
            TimeRef::range(IsoDate::from_ymd(2025, 3, 1), IsoDate::from_ymd(2025, 3, 15))
        );
    }

    #[test]
    fn test_anchor_words_in_any_order() {
        let query = extract_anchored("le 2025-01-05 je veux les sorties de gsb7").unwrap();
        assert_eq!(query.time, TimeRef::day(IsoDate::from_ymd(2025, 1, 5)));
    }

    #[tokio::test]
    async fn test_strategy_kind() {
        let strategy = AnchorStrategy;
        assert_eq!(strategy.kind(), StrategyKind::Anchor);
        assert!(strategy.extract("les sorties de gsb11").await.is_some());
    }

    #[test]
    fn test_strategy_from_sync_context() {
        let query = tokio_test::block_on(AnchorStrategy.extract("les stock de gl90")).unwrap();
        assert_eq!(query.intent, Some(Intent::Stock));
        assert!(tokio_test::block_on(AnchorStrategy.extract("stock gl90")).is_none());
    }
}
