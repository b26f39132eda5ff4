//! Default downstream router.

use async_trait::async_trait;
use gaine_domain::{QueryRouter, StructuredQuery};

/// Renders the structured query as its JSON wire shape.
///
/// Stands in for the inventory API so the CLI works end to end without it.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEchoRouter;

#[async_trait]
impl QueryRouter for JsonEchoRouter {
    type Error = serde_json::Error;

    async fn route(&self, query: &StructuredQuery, _caller: &str) -> Result<String, Self::Error> {
        serde_json::to_string(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaine_domain::{Gaine, Intent, IsoDate, TimeRef};

    #[tokio::test]
    async fn test_echo_wire_shape() {
        let query = StructuredQuery::new(
            Some(Intent::Sorties),
            Gaine::parse("gsb11"),
            TimeRef::day(IsoDate::from_ymd(2025, 10, 1)),
        );
        let reply = JsonEchoRouter.route(&query, "caller-1").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "intent": "sorties",
                "gaine": {"type": "prefix", "value": "gsb11"},
                "time": {"date": "2025-10-01"}
            })
        );
    }
}
