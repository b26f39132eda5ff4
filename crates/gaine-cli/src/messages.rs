//! Fixed replies shown to the caller.

/// The utterance carried no recognisable intent.
pub const MISSING_INTENT_PROMPT: &str =
    "Je n'ai pas compris votre demande. Souhaitez-vous connaître les entrées, les sorties ou le stock d'une gaine ?";

/// An intent was found but no gaine identifier.
pub const MISSING_GAINE_PROMPT: &str =
    "De quelle gaine s'agit-il ? Précisez son identifiant, par exemple : « les sorties de gsb11 ».";

/// Transcription gave up (throttled or failed).
pub const TRANSCRIPTION_UNAVAILABLE: &str =
    "La transcription est momentanément indisponible. Merci de réessayer dans quelques instants.";
