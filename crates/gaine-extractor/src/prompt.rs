//! Instructions and output schema for model-based extraction

/// System instructions sent with every utterance
pub const EXTRACTION_INSTRUCTIONS: &str = r#"Tu extrais une requête d'inventaire à partir d'une phrase en français issue d'une transcription vocale.

Réponds uniquement avec un objet JSON de la forme :
{"intent": "entrees" | "sorties" | "stock" | null, "gaine": {"value": "<identifiant>"} | null, "time": {}}

Règles :
- intent : "entrees" pour les entrées, "sorties" pour les sorties, "stock" pour l'état du stock.
- gaine.value : préfixe gsb, gab, gl ou gs suivi de 1 à 5 chiffres, en minuscules, sans espace ni tiret (ex. "gsb11").
- time : {} si aucune date, {"date": "AAAA-MM-JJ"} pour un jour, {"from": "AAAA-MM-JJ", "to": "AAAA-MM-JJ"} pour une période.
- N'invente rien : si une information manque, mets null (ou {} pour time)."#;

/// JSON schema constraining the model output
pub const RESPONSE_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "intent": {"type": ["string", "null"], "enum": ["entrees", "sorties", "stock", null]},
    "gaine": {
      "type": ["object", "null"],
      "properties": {"value": {"type": "string"}},
      "required": ["value"]
    },
    "time": {
      "type": "object",
      "properties": {
        "date": {"type": "string"},
        "from": {"type": "string"},
        "to": {"type": "string"}
      }
    }
  },
  "required": ["intent", "gaine", "time"]
}"#;
