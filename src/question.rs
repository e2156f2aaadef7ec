use crate::error::{CheckError, Result};

/// Openers that make a claim a closed question when they start the text.
pub const CLOSED_OPENERS: &[&str] = &["est-ce que", "est ce que"];

/// Interrogative-affirmation markers accepted anywhere in the text.
pub const AFFIRMATION_MARKERS: &[&str] = &[
    "est-il vrai que",
    "est il vrai que",
    "a-t-il",
    "a t il",
    "a-t elle",
    "a t elle",
    "peut-on dire que",
    "peut on dire que",
];

pub const EMPTY_CLAIM_MESSAGE: &str = "Veuillez entrer une question.";

pub const NOT_CLOSED_MESSAGE: &str = "Pour obtenir une conclusion VRAI / FAUX, la question doit \
être une affirmation à vérifier (ex : \"Est-il vrai que ... ?\", \"X a-t-il fait Y ?\").";

/// True when the claim is phrased as a proposition that can be answered VRAI/FAUX.
pub fn is_closed_question(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    CLOSED_OPENERS.iter().any(|o| lowered.starts_with(o))
        || AFFIRMATION_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Trims the claim and rejects it before any network work is done.
pub fn validate_claim(text: &str) -> Result<&str> {
    let claim = text.trim();
    if claim.is_empty() {
        return Err(CheckError::Validation { message: EMPTY_CLAIM_MESSAGE.into() });
    }
    if !is_closed_question(claim) {
        return Err(CheckError::Validation { message: NOT_CLOSED_MESSAGE.into() });
    }
    Ok(claim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openers_are_case_insensitive_and_anchored() {
        assert!(is_closed_question("Est-ce que la Terre est ronde ?"));
        assert!(is_closed_question("  EST CE QUE Paris est en France ?"));
        assert!(!is_closed_question("Pourquoi est-ce que le ciel est bleu ?"));
    }

    #[test]
    fn markers_match_anywhere() {
        assert!(is_closed_question("Napoléon a-t-il perdu à Waterloo ?"));
        assert!(is_closed_question("Alors, peut-on dire que l'eau bout à 100 degrés ?"));
        assert!(is_closed_question("Est-il vrai que la Lune est un satellite ?"));
        assert!(is_closed_question("Marie Curie a t elle reçu deux prix Nobel ?"));
    }

    #[test]
    fn open_questions_are_rejected() {
        assert!(!is_closed_question("Qui a inventé le téléphone ?"));
        assert!(!is_closed_question("Comment fonctionne un moteur ?"));
        assert!(!is_closed_question(""));
    }

    #[test]
    fn validate_trims_and_explains() {
        assert_eq!(validate_claim("  Est-ce que 2+2=4 ?  ").unwrap(), "Est-ce que 2+2=4 ?");
        match validate_claim("   ") {
            Err(CheckError::Validation { message }) => assert_eq!(message, EMPTY_CLAIM_MESSAGE),
            other => panic!("unexpected {other:?}"),
        }
        match validate_claim("Quelle heure est-il ?") {
            Err(CheckError::Validation { message }) => assert!(message.contains("VRAI / FAUX")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
