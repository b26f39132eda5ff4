//! What to do with a resolved query

use gaine_domain::StructuredQuery;

/// Decision taken once extraction is over
///
/// An unspecified time is a valid "no temporal filter" query, so only the
/// intent and the gaine are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No intent: ask what the user wants to know
    MissingIntent,

    /// Intent but no identifier: ask for an identifier
    MissingGaine,

    /// Hand the query to the downstream router
    Ready(StructuredQuery),
}

impl Outcome {
    /// Decide from a (possibly partial) query
    ///
    /// ```
    /// use gaine_domain::{Intent, StructuredQuery, TimeRef};
    /// use gaine_extractor::Outcome;
    ///
    /// let query = StructuredQuery::new(Some(Intent::Sorties), None, TimeRef::default());
    /// assert_eq!(Outcome::decide(query), Outcome::MissingGaine);
    /// ```
    pub fn decide(query: StructuredQuery) -> Self {
        if query.intent.is_none() {
            Outcome::MissingIntent
        } else if query.gaine.is_none() {
            Outcome::MissingGaine
        } else {
            Outcome::Ready(query)
        }
    }

    /// Short label for logs and CLI output
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::MissingIntent => "missing_intent",
            Outcome::MissingGaine => "missing_gaine",
            Outcome::Ready(_) => "ready",
        }
    }
}
