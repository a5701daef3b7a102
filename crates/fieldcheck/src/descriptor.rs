//! Rule descriptors: an immutable predicate plus a message template.

use crate::context::Context;
use crate::report::Violation;
use crate::value::Value;

/// Result of a pure value predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The value satisfies the rule.
    Pass,
    /// The value violates the rule.
    Fail,
    /// The rule cannot judge this value's type; reported as a
    /// configuration violation rather than a crash.
    Unsupported,
}

type ValueCheck = dyn Fn(&Value<'_>) -> Verdict + Send + Sync;
type ContextCheck =
    dyn Fn(&Value<'_>, &Context<'_>, &'static str) -> Option<Violation> + Send + Sync;

enum Eval {
    /// Pure predicate over the member's own value.
    Value(Box<ValueCheck>),
    /// Cross-field check with access to the full context; returns the
    /// violation directly so it can shape its own messages.
    Context(Box<ContextCheck>),
}

/// One declarative rule attachable to a member.
///
/// Descriptors are constructed once at registration time (usually by the
/// derive macro) and are stateless across evaluations; per-instance
/// configuration such as "invert" flags is fixed at construction.
pub struct Descriptor {
    template: &'static str,
    halts_member: bool,
    eval: Eval,
}

impl Descriptor {
    /// Build a descriptor from a pure value predicate and a message
    /// template (`{0}` is replaced with the member name).
    pub fn value_rule(
        template: &'static str,
        check: impl Fn(&Value<'_>) -> Verdict + Send + Sync + 'static,
    ) -> Self {
        Self {
            template,
            halts_member: false,
            eval: Eval::Value(Box::new(check)),
        }
    }

    /// Build a descriptor that needs the validation context (cross-field
    /// rules). The check receives the value, the context, and the member
    /// name, and produces its own violation on failure.
    pub fn context_rule(
        template: &'static str,
        check: impl Fn(&Value<'_>, &Context<'_>, &'static str) -> Option<Violation>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            template,
            halts_member: false,
            eval: Eval::Context(Box::new(check)),
        }
    }

    /// Mark this rule as suppressing later rules on the same member when it
    /// fails (required-ness failures make format checks meaningless).
    #[must_use]
    pub const fn halting(mut self) -> Self {
        self.halts_member = true;
        self
    }

    /// Whether a failure of this rule stops further rules on the member.
    #[must_use]
    pub const fn halts_member(&self) -> bool {
        self.halts_member
    }

    /// The raw message template.
    #[must_use]
    pub const fn template(&self) -> &'static str {
        self.template
    }

    /// Evaluate the rule against one member value. Success produces nothing.
    #[must_use]
    pub fn evaluate(
        &self,
        member: &'static str,
        value: &Value<'_>,
        context: &Context<'_>,
    ) -> Option<Violation> {
        match &self.eval {
            Eval::Value(check) => match check(value) {
                Verdict::Pass => None,
                Verdict::Fail => Some(Violation::constraint(
                    format_template(self.template, member, ""),
                    vec![member.to_string()],
                )),
                Verdict::Unsupported => Some(Violation::configuration(
                    format!(
                        "'{member}' has a {} value that this rule can't validate.",
                        value.kind_label()
                    ),
                    vec![member.to_string()],
                )),
            },
            Eval::Context(check) => check(value, context, member),
        }
    }
}

impl std::fmt::Debug for Descriptor {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Descriptor")
            .field("template", &self.template)
            .field("halts_member", &self.halts_member)
            .finish_non_exhaustive()
    }
}

/// Fill the positional placeholders of a message template: `{0}` is the
/// member display name, `{1}` a rule-specific argument.
#[must_use]
pub fn format_template(template: &str, arg0: &str, arg1: &str) -> String {
    template.replace("{0}", arg0).replace("{1}", arg1)
}
