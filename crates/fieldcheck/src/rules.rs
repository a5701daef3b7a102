//! Built-in leaf rules: pure predicates over a single member value.

use crate::descriptor::{Descriptor, Verdict};
use crate::value::Value;

/// The member must be present; text counts as missing when whitespace-only.
///
/// A failure suppresses later rules on the same member, since format checks
/// on a missing value are meaningless.
#[must_use]
pub fn required() -> Descriptor {
    Descriptor::value_rule("'{0}' is required.", |value| match value {
        Value::Absent => Verdict::Fail,
        Value::Text(text) if text.trim().is_empty() => Verdict::Fail,
        _ => Verdict::Pass,
    })
    .halting()
}

/// Like [`required`], but an empty or whitespace-only string counts as
/// present.
#[must_use]
pub fn required_allow_empty() -> Descriptor {
    Descriptor::value_rule("'{0}' is required.", |value| match value {
        Value::Absent => Verdict::Fail,
        _ => Verdict::Pass,
    })
    .halting()
}

/// Text must contain at least one ASCII digit.
#[must_use]
pub fn one_or_more_digits() -> Descriptor {
    text_rule("'{0}' must have at least one digit ('0'-'9').", |text| {
        text.chars().any(|c| c.is_ascii_digit())
    })
}

/// Text must contain at least one ASCII uppercase letter.
#[must_use]
pub fn one_or_more_upper_case() -> Descriptor {
    text_rule(
        "'{0}' must have at least one upper-case character ('A'-'Z').",
        |text| text.chars().any(|c| c.is_ascii_uppercase()),
    )
}

/// Text must contain at least one non-alphanumeric character.
#[must_use]
pub fn one_or_more_non_alpha() -> Descriptor {
    text_rule(
        "'{0}' must have at least one non alpha-numeric character.",
        |text| text.chars().any(|c| !c.is_ascii_alphanumeric()),
    )
}

/// Every entry of a `;`-separated text (or text list) must be a plausible
/// email address.
#[must_use]
pub fn email_list() -> Descriptor {
    list_rule("'{0}' contains an invalid email address.", is_email)
}

/// Every entry of a `;`-separated text (or text list) must be a plausible
/// phone number.
#[must_use]
pub fn phone_list() -> Descriptor {
    list_rule("'{0}' contains an invalid phone number.", is_phone)
}

/// Escape hatch: caller-supplied predicate with its own message template
/// (`{0}` is replaced with the member name).
pub fn custom(
    template: &'static str,
    check: impl Fn(&Value<'_>) -> bool + Send + Sync + 'static,
) -> Descriptor {
    Descriptor::value_rule(template, move |value| {
        if check(value) { Verdict::Pass } else { Verdict::Fail }
    })
}

// Format rules judge a value that exists; presence is `required`'s job, so
// an absent member passes them.
fn text_rule(
    template: &'static str,
    check: impl Fn(&str) -> bool + Send + Sync + 'static,
) -> Descriptor {
    Descriptor::value_rule(template, move |value| match value {
        Value::Absent => Verdict::Pass,
        Value::Text(text) => {
            if check(text) {
                Verdict::Pass
            } else {
                Verdict::Fail
            }
        },
        _ => Verdict::Unsupported,
    })
}

fn list_rule(
    template: &'static str,
    check: impl Fn(&str) -> bool + Send + Sync + 'static,
) -> Descriptor {
    Descriptor::value_rule(template, move |value| match value {
        Value::Absent => Verdict::Pass,
        Value::Text(text) => {
            if text.split(';').all(|entry| check(entry)) {
                Verdict::Pass
            } else {
                Verdict::Fail
            }
        },
        Value::TextList(list) => {
            if list.iter().all(|entry| check(entry)) {
                Verdict::Pass
            } else {
                Verdict::Fail
            }
        },
        _ => Verdict::Unsupported,
    })
}

/// Minimal email shape: exactly one `@`, non-empty local and domain parts,
/// no whitespace.
fn is_email(entry: &str) -> bool {
    let entry = entry.trim();
    if entry.chars().any(char::is_whitespace) {
        return false;
    }
    match entry.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        },
        None => false,
    }
}

/// Minimal phone shape: after an optional leading `+`, at least one digit
/// and only digits, whitespace, and `- . ( )` separators.
fn is_phone(entry: &str) -> bool {
    let entry = entry.trim();
    let digits = entry.strip_prefix('+').unwrap_or(entry);
    digits.chars().any(|c| c.is_ascii_digit())
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '.' | '(' | ')'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::member::{Member, Validatable};
    use crate::report::ViolationKind;

    struct Empty;

    impl Validatable for Empty {
        fn type_name(&self) -> &'static str {
            "Empty"
        }

        fn members(&self) -> Vec<Member<'_>> {
            Vec::new()
        }
    }

    fn fails(rule: &Descriptor, value: &Value<'_>) -> bool {
        let empty = Empty;
        let context = Context::new(&empty);
        rule.evaluate("field", value, &context).is_some()
    }

    #[test]
    fn required_rejects_absent_and_whitespace() {
        let rule = required();
        assert!(fails(&rule, &Value::Absent));
        assert!(fails(&rule, &Value::Text("   ")));
        assert!(!fails(&rule, &Value::Text("x")));
        assert!(!fails(&rule, &Value::Bool(false)));
        assert!(rule.halts_member());
    }

    #[test]
    fn required_allow_empty_accepts_blank_text() {
        let rule = required_allow_empty();
        assert!(fails(&rule, &Value::Absent));
        assert!(!fails(&rule, &Value::Text("")));
    }

    #[test]
    fn digit_rule_needs_a_digit() {
        let rule = one_or_more_digits();
        assert!(fails(&rule, &Value::Text("abc")));
        assert!(!fails(&rule, &Value::Text("abc1")));
    }

    #[test]
    fn format_rules_pass_on_absent_values() {
        assert!(!fails(&one_or_more_digits(), &Value::Absent));
        assert!(!fails(&email_list(), &Value::Absent));
        assert!(!fails(&phone_list(), &Value::Absent));
    }

    #[test]
    fn upper_case_rule_needs_an_upper_case_letter() {
        let rule = one_or_more_upper_case();
        assert!(fails(&rule, &Value::Text("abc1")));
        assert!(!fails(&rule, &Value::Text("aBc")));
    }

    #[test]
    fn non_alpha_rule_needs_a_symbol() {
        let rule = one_or_more_non_alpha();
        assert!(fails(&rule, &Value::Text("abc123")));
        assert!(!fails(&rule, &Value::Text("abc-123")));
    }

    #[test]
    fn email_list_checks_every_entry() {
        let rule = email_list();
        assert!(!fails(&rule, &Value::Text("a@b.com")));
        assert!(!fails(&rule, &Value::Text("a@b.com;c@d.org")));
        assert!(fails(&rule, &Value::Text("a@b.com;not-an-email")));
        assert!(fails(&rule, &Value::Text("@missing-local.com")));
        assert!(fails(&rule, &Value::Text("two@@ats.com")));
    }

    #[test]
    fn email_list_accepts_text_lists() {
        let rule = email_list();
        let good = vec!["a@b.com".to_string(), "c@d.org".to_string()];
        let bad = vec!["a@b.com".to_string(), "nope".to_string()];
        assert!(!fails(&rule, &Value::TextList(&good)));
        assert!(fails(&rule, &Value::TextList(&bad)));
    }

    #[test]
    fn phone_list_checks_every_entry() {
        let rule = phone_list();
        assert!(!fails(&rule, &Value::Text("+1 (555) 123-4567")));
        assert!(!fails(&rule, &Value::Text("555-1234;555-5678")));
        assert!(fails(&rule, &Value::Text("555-1234;not-a-phone")));
        assert!(fails(&rule, &Value::Text("+")));
    }

    #[test]
    fn list_rules_report_configuration_on_wrong_type() {
        let rule = email_list();
        let empty = Empty;
        let context = Context::new(&empty);
        let violation = rule.evaluate("field", &Value::Bool(true), &context);
        assert_eq!(
            violation.map(|v| v.kind()),
            Some(ViolationKind::Configuration)
        );
    }

    #[test]
    fn custom_rule_wraps_a_plain_predicate() {
        let rule = custom("'{0}' must be positive.", |value| {
            matches!(value, Value::Int(n) if *n > 0)
        });
        assert!(!fails(&rule, &Value::Int(5)));
        assert!(fails(&rule, &Value::Int(-5)));
    }
}
