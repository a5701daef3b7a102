//! Violations and the per-pass validation report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distinguishes ordinary rule failures from misconfigured descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// The value failed a rule's check.
    Constraint,
    /// The rule itself is misconfigured for the type it is attached to
    /// (e.g. a cross-field reference to a missing or wrong-typed sibling).
    Configuration,
}

/// One recorded rule failure: a formatted message plus the member names it
/// applies to (empty for instance-level checks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    message: String,
    members: Vec<String>,
    kind: ViolationKind,
}

impl Violation {
    /// Record an ordinary rule failure.
    pub fn constraint(message: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            message: message.into(),
            members,
            kind: ViolationKind::Constraint,
        }
    }

    /// Record a descriptor misconfiguration.
    pub fn configuration(message: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            message: message.into(),
            members,
            kind: ViolationKind::Configuration,
        }
    }

    /// The formatted failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Member names this violation applies to, path-qualified once merged
    /// into a parent report.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Failure classification.
    #[must_use]
    pub const fn kind(&self) -> ViolationKind {
        self.kind
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            formatter.write_str(&self.message)
        } else {
            write!(formatter, "{}: {}", self.members.join(","), self.message)
        }
    }
}

/// Ordered collection of violations produced by one validation pass.
///
/// Insertion order is discovery order (depth-first, pre-order); an empty
/// report means the instance is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    violations: Vec<Violation>,
}

impl Report {
    /// Create an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// True when no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Iterate violations in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Append one violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Merge a nested instance's report under the given member name.
    ///
    /// Each message is prefixed `'member' -> '<inner message>'` and each
    /// member name is qualified `member.inner` so violations stay traceable
    /// from the root through arbitrary descent depth.
    pub fn absorb_nested(&mut self, member: &str, nested: Self) {
        for violation in nested.violations {
            let message = format!("'{member}' -> '{}'", violation.message);
            let members = violation
                .members
                .iter()
                .map(|inner| format!("{member}.{inner}"))
                .collect();
            self.violations.push(Violation {
                message,
                members,
                kind: violation.kind,
            });
        }
    }

    /// Comma-joined messages of every violation, for aggregate errors.
    #[must_use]
    pub fn combined_messages(&self) -> String {
        self.violations
            .iter()
            .map(Violation::message)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Comma-joined member names of every violation, for aggregate errors.
    #[must_use]
    pub fn combined_members(&self) -> String {
        self.violations
            .iter()
            .flat_map(|violation| violation.members.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = Report::new();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
    }

    #[test]
    fn absorb_nested_prefixes_messages_and_qualifies_members() {
        let mut inner = Report::new();
        inner.push(Violation::constraint(
            "'name' is required.",
            vec!["name".to_string()],
        ));

        let mut outer = Report::new();
        outer.absorb_nested("child", inner);

        let violation = outer.iter().next();
        assert_eq!(
            violation.map(Violation::message),
            Some("'child' -> ''name' is required.'")
        );
        assert_eq!(
            violation.map(Violation::members),
            Some(&["child.name".to_string()][..])
        );
    }

    #[test]
    fn absorb_nested_preserves_kind() {
        let mut inner = Report::new();
        inner.push(Violation::configuration("bad rule", vec![]));

        let mut outer = Report::new();
        outer.absorb_nested("child", inner);

        assert_eq!(
            outer.iter().next().map(Violation::kind),
            Some(ViolationKind::Configuration)
        );
    }

    #[test]
    fn combined_accessors_join_with_commas() {
        let mut report = Report::new();
        report.push(Violation::constraint("first", vec!["a".to_string()]));
        report.push(Violation::constraint(
            "second",
            vec!["b".to_string(), "c".to_string()],
        ));

        assert_eq!(report.combined_messages(), "first,second");
        assert_eq!(report.combined_members(), "a,b,c");
    }

    #[test]
    fn violation_display_includes_members() {
        let violation = Violation::constraint("broken", vec!["field".to_string()]);
        assert_eq!(violation.to_string(), "field: broken");
    }
}
