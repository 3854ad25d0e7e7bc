/// Strategy for deciding whether a piece of evidence (a document or risk
/// name) is linked to a compliance item. Kept behind a trait so a stricter
/// matcher (tokenized, fuzzy) can be swapped in without touching the
/// reconciler's control flow.
pub trait NameMatcher: Send + Sync {
    fn matches(&self, item_name: &str, candidate_name: &str) -> bool;
}

/// Case-insensitive substring containment: the compliance item's name must
/// appear inside the candidate's name. Deliberately coarse: a short item
/// name can false-positive against unrelated records sharing that substring.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringNameMatcher;

impl NameMatcher for SubstringNameMatcher {
    fn matches(&self, item_name: &str, candidate_name: &str) -> bool {
        candidate_name
            .to_lowercase()
            .contains(&item_name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_case_insensitive() {
        let m = SubstringNameMatcher;
        assert!(m.matches("GDPR Consent", "gdpr consent form"));
        assert!(m.matches("gdpr consent", "GDPR CONSENT FORM v2"));
    }

    #[test]
    fn item_name_must_be_contained_whole() {
        let m = SubstringNameMatcher;
        assert!(!m.matches("GDPR Consent", "GDPR Form"));
        assert!(!m.matches("Access Control Policy", "Access Control Gap"));
    }

    #[test]
    fn short_names_can_false_positive() {
        // Known coarse behavior, preserved on purpose.
        let m = SubstringNameMatcher;
        assert!(m.matches("SOC", "Socket hardening notes"));
    }
}
