//! Pipeline stages and the legacy vocabulary table

use serde::{Deserialize, Serialize};

/// One position on the client pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    FormSent,
    FormReceived,
    DraftReviewed,
    DraftApproved,
    CertificateSent,
    ClosedWon,
    ClosedLost,
}

/// The ordinary chain, in order, decision point last. Terminals are
/// not part of the chain.
pub const ORDINARY_CHAIN: [Stage; 5] = [
    Stage::FormSent,
    Stage::FormReceived,
    Stage::DraftReviewed,
    Stage::DraftApproved,
    Stage::CertificateSent,
];

/// Authored mapping from legacy status strings to chain positions.
/// Older records carry these; they are parsed, never rewritten.
const LEGACY_VOCABULARY: [(&str, Stage); 7] = [
    ("contact_form_sent", Stage::FormSent),
    ("contact_form_received", Stage::FormReceived),
    ("draft_checked", Stage::DraftReviewed),
    ("draft_accepted", Stage::DraftApproved),
    ("certificate_issued", Stage::CertificateSent),
    ("won", Stage::ClosedWon),
    ("lost", Stage::ClosedLost),
];

impl Stage {
    /// Canonical stored value of this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::FormSent => "form_sent",
            Stage::FormReceived => "form_received",
            Stage::DraftReviewed => "draft_reviewed",
            Stage::DraftApproved => "draft_approved",
            Stage::CertificateSent => "certificate_sent",
            Stage::ClosedWon => "closed_won",
            Stage::ClosedLost => "closed_lost",
        }
    }

    /// Parse a stored status string, accepting both the current and
    /// the legacy vocabulary. `None` for anything outside both.
    pub fn parse(value: &str) -> Option<Stage> {
        let canonical = match value {
            "form_sent" => Some(Stage::FormSent),
            "form_received" => Some(Stage::FormReceived),
            "draft_reviewed" => Some(Stage::DraftReviewed),
            "draft_approved" => Some(Stage::DraftApproved),
            "certificate_sent" => Some(Stage::CertificateSent),
            "closed_won" => Some(Stage::ClosedWon),
            "closed_lost" => Some(Stage::ClosedLost),
            _ => None,
        };
        canonical.or_else(|| {
            LEGACY_VOCABULARY
                .iter()
                .find(|(legacy, _)| *legacy == value)
                .map(|(_, stage)| *stage)
        })
    }

    /// Position on the timeline for progress rendering. Both terminals
    /// sit one step beyond the decision point.
    pub fn chain_position(&self) -> usize {
        match self {
            Stage::FormSent => 0,
            Stage::FormReceived => 1,
            Stage::DraftReviewed => 2,
            Stage::DraftApproved => 3,
            Stage::CertificateSent => 4,
            Stage::ClosedWon | Stage::ClosedLost => 5,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::ClosedWon | Stage::ClosedLost)
    }

    /// Human label of the canonical value, for explicit user-driven
    /// rewrites of legacy records only.
    pub fn canonical_label(&self) -> String {
        atrium_types::FieldName::new(self.as_str()).humanize()
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_values_parse() {
        for stage in [
            Stage::FormSent,
            Stage::FormReceived,
            Stage::DraftReviewed,
            Stage::DraftApproved,
            Stage::CertificateSent,
            Stage::ClosedWon,
            Stage::ClosedLost,
        ] {
            assert_eq!(Stage::parse(stage.as_str()), Some(stage));
        }
    }

    #[test]
    fn test_every_legacy_value_maps_onto_the_chain() {
        for (legacy, expected) in LEGACY_VOCABULARY {
            let parsed = Stage::parse(legacy).expect(legacy);
            assert_eq!(parsed, expected);
            // Same timeline position as its canonical twin
            assert_eq!(parsed.chain_position(), expected.chain_position());
        }
    }

    #[test]
    fn test_unknown_status_does_not_parse() {
        assert_eq!(Stage::parse("parked"), None);
        assert_eq!(Stage::parse(""), None);
    }

    #[test]
    fn test_terminals_sit_beyond_certificate_sent() {
        assert!(Stage::ClosedWon.chain_position() > Stage::CertificateSent.chain_position());
        assert_eq!(
            Stage::ClosedWon.chain_position(),
            Stage::ClosedLost.chain_position()
        );
    }

    #[test]
    fn test_catalog_and_chain_agree() {
        // The option catalog and the state machine must list the same
        // stored values
        let chain_values: Vec<&str> = ORDINARY_CHAIN
            .iter()
            .map(Stage::as_str)
            .chain([Stage::ClosedWon.as_str(), Stage::ClosedLost.as_str()])
            .collect();
        assert_eq!(chain_values, atrium_types::catalog::STATUS_VALUES.to_vec());
    }
}
