//! Identifier transplant: rename `IONIQ5_TP_FL` to `WRX_TP_FL` when copying a
//! signal from one vehicle to another.
//!
//! This is string surgery on a naming convention, not a guaranteed-unique
//! rename. The result is not checked against the target's existing ids.

use serde::Serialize;

use crate::signal::VehicleRef;

/// How the new identifier was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransplantConfidence {
    /// The id started with `<SOURCE>_`, which was replaced. This also covers
    /// ids whose first `_`-separated token is the source prefix.
    PrefixReplaced,
    /// No source prefix found; the target prefix was prepended.
    PrefixPrepended,
}

impl TransplantConfidence {
    /// Returns `true` when the rename should be reviewed by hand.
    #[must_use]
    pub fn needs_review(self) -> bool {
        matches!(self, Self::PrefixPrepended)
    }
}

/// A derived identifier plus how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transplant {
    /// The new identifier.
    pub id: String,
    /// Derivation used.
    pub confidence: TransplantConfidence,
}

/// Model-derived id prefix: upper-cased, keeping only `A-Z` and `0-9`
/// (`IONIQ-5` becomes `IONIQ5`).
#[must_use]
pub fn model_prefix(model: &str) -> String {
    model.to_uppercase().chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Derives an identifier for `target` from `original_id` defined on `source`.
#[must_use]
pub fn transplant_id(original_id: &str, source: &VehicleRef, target: &VehicleRef) -> Transplant {
    let source_prefix = model_prefix(&source.model);
    let target_prefix = model_prefix(&target.model);

    if let Some(rest) = original_id.strip_prefix(&format!("{source_prefix}_")) {
        return Transplant {
            id: format!("{target_prefix}_{rest}"),
            confidence: TransplantConfidence::PrefixReplaced,
        };
    }

    Transplant {
        id: format!("{target_prefix}_{original_id}"),
        confidence: TransplantConfidence::PrefixPrepended,
    }
}

/// Convenience wrapper returning only the new identifier.
#[must_use]
pub fn adjust_id(original_id: &str, source: &VehicleRef, target: &VehicleRef) -> String {
    transplant_id(original_id, source, target).id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ioniq() -> VehicleRef {
        VehicleRef::new("Hyundai", "Ioniq5")
    }

    fn wrx() -> VehicleRef {
        VehicleRef::new("Subaru", "WRX")
    }

    #[test]
    fn prefix_is_uppercased_alphanumeric() {
        assert_eq!(model_prefix("IONIQ-5"), "IONIQ5");
        assert_eq!(model_prefix("Model 3"), "MODEL3");
        assert_eq!(model_prefix("e-Golf"), "EGOLF");
    }

    #[test]
    fn replaces_source_prefix() {
        let t = transplant_id("IONIQ5_TP_FL", &ioniq(), &wrx());
        assert_eq!(t.id, "WRX_TP_FL");
        assert_eq!(t.confidence, TransplantConfidence::PrefixReplaced);
        assert!(!t.confidence.needs_review());
    }

    #[test]
    fn leading_token_match_is_a_prefix_replacement() {
        let t = transplant_id("IONIQ5_SOC_RAW", &ioniq(), &wrx());
        assert_eq!(t.id, "WRX_SOC_RAW");
        assert_eq!(t.confidence, TransplantConfidence::PrefixReplaced);

        // A bare prefix has no `_` after it, so nothing is replaced.
        let bare = transplant_id("IONIQ5", &ioniq(), &wrx());
        assert_eq!(bare.id, "WRX_IONIQ5");
        assert_eq!(bare.confidence, TransplantConfidence::PrefixPrepended);
    }

    #[test]
    fn prepends_when_pattern_unknown() {
        let t = transplant_id("TP_FL", &ioniq(), &wrx());
        assert_eq!(t.id, "WRX_TP_FL");
        assert_eq!(t.confidence, TransplantConfidence::PrefixPrepended);
        assert!(t.confidence.needs_review());

        assert_eq!(adjust_id("KONA_SOC", &ioniq(), &wrx()), "WRX_KONA_SOC");
    }

    #[test]
    fn prefix_match_is_case_sensitive() {
        assert_eq!(adjust_id("ioniq5_SOC", &ioniq(), &wrx()), "WRX_ioniq5_SOC");
    }

    #[test]
    fn same_vehicle_is_a_no_op_for_matching_ids() {
        assert_eq!(adjust_id("IONIQ5_TP_FL", &ioniq(), &ioniq()), "IONIQ5_TP_FL");
        assert_eq!(adjust_id("WRX_OIL", &wrx(), &wrx()), "WRX_OIL");
    }

    #[test]
    fn generic_source_without_model() {
        let sae = VehicleRef::new("SAEJ1979", "");
        let t = transplant_id("_VSS", &sae, &wrx());
        assert_eq!(t.id, "WRX_VSS");
        assert_eq!(adjust_id("VSS", &sae, &wrx()), "WRX_VSS");
    }
}
