//! Ticket reference extraction from change request titles.

use regex::Regex;

use crate::error::GateError;

/// A compiled ticket-reference pattern.
///
/// Wraps the tracker-specific regular expression that recognizes a
/// ticket reference inside arbitrary text (e.g. `PROJECT-1234` or
/// `[JENKINS-1234]`). The pattern must carry exactly one explicit
/// capture group holding the bare identifier; this contract is
/// validated once at construction so a malformed pattern surfaces as a
/// configuration error instead of silently dropping matches per call.
#[derive(Debug, Clone)]
pub struct TicketPattern {
    regex: Regex,
}

impl TicketPattern {
    /// Compile a pattern, enforcing the identifier-group contract.
    ///
    /// `captures_len` counts the implicit whole-match group, so a
    /// valid pattern reports exactly 2.
    pub fn new(pattern: &str) -> Result<Self, GateError> {
        let regex = Regex::new(pattern)?;
        let groups = regex.captures_len();
        if groups != 2 {
            return Err(GateError::WrongGroupCount { found: groups });
        }
        Ok(Self { regex })
    }

    /// The pattern source string.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// All non-overlapping ticket references in `title`, left to right.
    ///
    /// An empty result is a valid outcome. A match whose identifier
    /// group did not participate (optional group) contributes nothing.
    pub fn find_references(&self, title: &str) -> Vec<TicketReference> {
        self.regex
            .captures_iter(title)
            .filter_map(|caps| {
                let raw = caps.get(0)?;
                let id = caps.get(1)?;
                Some(TicketReference {
                    raw: raw.as_str().to_string(),
                    id: id.as_str().to_string(),
                })
            })
            .collect()
    }
}

/// A parsed ticket reference: the raw matched substring and the
/// extracted bare identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketReference {
    /// The full matched substring, e.g. `[JENKINS-1234]`.
    pub raw: String,

    /// The bare identifier captured by the pattern, e.g. `JENKINS-1234`.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_reference() {
        let pattern = TicketPattern::new(r"\[([A-Z]+-\d+)\]").unwrap();
        let refs = pattern.find_references("Fix bug [JIRA-42]");
        assert_eq!(
            refs,
            vec![TicketReference {
                raw: "[JIRA-42]".to_string(),
                id: "JIRA-42".to_string(),
            }]
        );
    }

    #[test]
    fn extracts_references_in_order() {
        let pattern = TicketPattern::new(r"([A-Z]+-\d+)").unwrap();
        let refs = pattern.find_references("Touches JIRA-1 and JIRA-2");
        let ids: Vec<_> = refs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["JIRA-1", "JIRA-2"]);
    }

    #[test]
    fn no_match_is_empty() {
        let pattern = TicketPattern::new(r"([A-Z]+-\d+)").unwrap();
        assert!(pattern.find_references("misc cleanup").is_empty());
    }

    #[test]
    fn rejects_pattern_without_identifier_group() {
        let err = TicketPattern::new(r"[A-Z]+-\d+").unwrap_err();
        assert!(matches!(err, GateError::WrongGroupCount { found: 1 }));
    }

    #[test]
    fn rejects_pattern_with_extra_groups() {
        let err = TicketPattern::new(r"([A-Z]+)-(\d+)").unwrap_err();
        assert!(matches!(err, GateError::WrongGroupCount { found: 3 }));
    }

    #[test]
    fn rejects_invalid_regex() {
        let err = TicketPattern::new(r"([A-Z").unwrap_err();
        assert!(matches!(err, GateError::InvalidPattern(_)));
    }

    #[test]
    fn non_capturing_groups_do_not_count() {
        let pattern = TicketPattern::new(r"(?:\[)([A-Z]+-\d+)(?:\])").unwrap();
        let refs = pattern.find_references("[JIRA-7] done");
        assert_eq!(refs[0].id, "JIRA-7");
    }
}
