//! Cross-field rule: a member is required when a sibling boolean is set.

use crate::context::Context;
use crate::descriptor::{Descriptor, format_template};
use crate::report::Violation;
use crate::value::Value;

/// Builder for the "required when sibling is true" rule.
///
/// At evaluation time the rule resolves the named sibling on the instance
/// currently being inspected. A misconfigured reference (missing sibling,
/// non-boolean sibling, unreadable sibling) degrades into a configuration
/// violation rather than aborting the pass.
#[derive(Debug, Clone, Copy)]
pub struct RequiredWhen {
    other: &'static str,
    invert: bool,
    allow_empty_strings: bool,
}

impl RequiredWhen {
    /// Require the annotated member when `other` is true.
    #[must_use]
    pub const fn new(other: &'static str) -> Self {
        Self {
            other,
            invert: false,
            allow_empty_strings: false,
        }
    }

    /// Use inverse logic: required when the sibling is false.
    #[must_use]
    pub const fn invert(mut self) -> Self {
        self.invert = true;
        self
    }

    /// Treat empty and whitespace-only strings as present.
    #[must_use]
    pub const fn allow_empty_strings(mut self) -> Self {
        self.allow_empty_strings = true;
        self
    }

    /// Finish the builder into an attachable rule descriptor.
    #[must_use]
    pub fn into_rule(self) -> Descriptor {
        let template = if self.invert {
            "'{0}' is required when '{1}' is false!"
        } else {
            "'{0}' is required when '{1}' is true!"
        };
        Descriptor::context_rule(template, move |value, context, member| {
            self.evaluate(value, context, member, template)
        })
    }

    fn evaluate(
        self,
        value: &Value<'_>,
        context: &Context<'_>,
        member: &'static str,
        template: &'static str,
    ) -> Option<Violation> {
        let members = context.current().members();
        let Some(sibling) = members.iter().find(|candidate| candidate.name == self.other) else {
            return Some(Violation::configuration(
                format!("Member '{}' was not found!", self.other),
                vec![member.to_string()],
            ));
        };
        let Some(sibling_value) = sibling.value else {
            return Some(Violation::configuration(
                format!("Member '{}' must be readable!", self.other),
                vec![member.to_string()],
            ));
        };
        let Some(flag) = sibling_value.as_bool() else {
            return Some(Violation::configuration(
                format!("Member '{}' must be a boolean type!", self.other),
                vec![member.to_string()],
            ));
        };

        // Required iff the sibling matches the configured polarity.
        if flag == self.invert {
            return None;
        }

        let missing = match value {
            Value::Absent => true,
            Value::Text(text) => !self.allow_empty_strings && text.trim().is_empty(),
            _ => false,
        };
        missing.then(|| {
            Violation::constraint(
                format_template(template, member, self.other),
                vec![member.to_string()],
            )
        })
    }
}
