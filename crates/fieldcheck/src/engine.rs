//! The recursive validation engine.

use crate::context::Context;
use crate::member::Validatable;
use crate::report::Report;
use crate::value::Value;
use tracing::trace;

/// Aggregation policy for one validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Evaluate everything and aggregate all violations (the default).
    #[default]
    CollectAll,
    /// Stop the entire pass on the first violation; cheapest path for
    /// callers who only need a boolean.
    FailFast,
}

/// Identity of an instance on the active descent path.
///
/// The address alone is not enough: a struct and its first field share an
/// address, so the type name disambiguates.
type Identity = (usize, &'static str);

fn identity_of(instance: &dyn Validatable) -> Identity {
    (
        std::ptr::from_ref(instance).cast::<()>() as usize,
        instance.type_name(),
    )
}

/// Orchestrates one depth-first, pre-order pass over an object graph.
///
/// The engine is stateless across calls: each pass allocates its own report
/// and active-path set, so concurrent validation of different graphs needs
/// no locking. Violations travel by value; no exception-style control flow
/// happens inside a pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    mode: Mode,
}

impl Engine {
    /// Engine with the default collect-all policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: Mode::CollectAll,
        }
    }

    /// Engine with an explicit aggregation policy.
    #[must_use]
    pub const fn with_mode(mode: Mode) -> Self {
        Self { mode }
    }

    /// Run one validation pass over `instance`, seeded with `context`.
    ///
    /// The pass never mutates the graph; it assumes member reads are
    /// side-effect-free and that the graph is not mutated concurrently.
    pub fn run<'a>(&self, instance: &'a dyn Validatable, context: &Context<'a>) -> Report {
        let mut report = Report::new();
        let mut active = Vec::new();
        self.walk(instance, context, &mut active, &mut report);
        trace!(
            type_name = instance.type_name(),
            violations = report.len(),
            "validation pass finished"
        );
        report
    }

    /// Validate one instance and descend into its validatable members.
    /// Returns true when a fail-fast pass has been halted.
    fn walk<'a>(
        &self,
        instance: &'a dyn Validatable,
        context: &Context<'a>,
        active: &mut Vec<Identity>,
        report: &mut Report,
    ) -> bool {
        active.push(identity_of(instance));
        let mut halted = false;

        'members: for member in instance.members() {
            let Some(value) = member.value else {
                // No accessible getter: nothing to evaluate directly. A
                // cross-field rule on a sibling surfaces this as a
                // configuration violation when it tries to read the member.
                continue;
            };

            for rule in &member.rules {
                if let Some(violation) = rule.evaluate(member.name, &value, context) {
                    let halts_member = rule.halts_member();
                    report.push(violation);
                    if self.mode == Mode::FailFast {
                        halted = true;
                        break 'members;
                    }
                    if halts_member {
                        break;
                    }
                }
            }

            if member.recursive {
                if let Value::Nested(child) = value {
                    if active.contains(&identity_of(child)) {
                        // Already on the descent path: break the cycle and
                        // treat the instance as handled for this edge.
                        trace!(
                            member = member.name,
                            path = %context.path_display(),
                            "skipping re-descent into active instance"
                        );
                        continue;
                    }
                    let child_context = context.descend(member.name, child);
                    let mut nested = Report::new();
                    halted = self.walk(child, &child_context, active, &mut nested);
                    report.absorb_nested(member.name, nested);
                    if halted {
                        break 'members;
                    }
                }
            }
        }

        active.pop();
        halted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Member;
    use crate::rules;
    use std::cell::Cell;

    #[derive(Default)]
    struct Child {
        name: Option<String>,
    }

    impl Validatable for Child {
        fn type_name(&self) -> &'static str {
            "Child"
        }

        fn members(&self) -> Vec<Member<'_>> {
            vec![
                Member::new("name", Value::opt_text(self.name.as_deref()))
                    .with_rules(vec![rules::required()]),
            ]
        }
    }

    #[derive(Default)]
    struct Parent {
        label: Option<String>,
        child: Option<Child>,
    }

    impl Validatable for Parent {
        fn type_name(&self) -> &'static str {
            "Parent"
        }

        fn members(&self) -> Vec<Member<'_>> {
            vec![
                Member::new("label", Value::opt_text(self.label.as_deref()))
                    .with_rules(vec![rules::required()]),
                Member::new(
                    "child",
                    Value::opt_nested(
                        self.child.as_ref().map(|c| -> &dyn Validatable { c }),
                    ),
                )
                .recursive(),
            ]
        }
    }

    fn validate(instance: &dyn Validatable) -> Report {
        Engine::new().run(instance, &Context::new(instance))
    }

    #[test]
    fn violations_appear_in_declaration_then_descent_order() {
        let parent = Parent {
            label: None,
            child: Some(Child { name: None }),
        };
        let report = validate(&parent);
        let messages: Vec<_> = report.iter().map(|v| v.message().to_string()).collect();
        assert_eq!(
            messages,
            [
                "'label' is required.",
                "'child' -> ''name' is required.'"
            ]
        );
    }

    #[test]
    fn nested_member_names_are_path_qualified() {
        let parent = Parent {
            label: Some("ok".to_string()),
            child: Some(Child { name: None }),
        };
        let report = validate(&parent);
        assert_eq!(report.len(), 1);
        assert_eq!(
            report.iter().next().map(|v| v.members().to_vec()),
            Some(vec!["child.name".to_string()])
        );
    }

    #[test]
    fn absent_nested_member_is_not_descended() {
        let parent = Parent {
            label: Some("ok".to_string()),
            child: None,
        };
        assert!(validate(&parent).is_empty());
    }

    #[test]
    fn fail_fast_stops_after_the_first_violation() {
        let parent = Parent {
            label: None,
            child: Some(Child { name: None }),
        };
        let report =
            Engine::with_mode(Mode::FailFast).run(&parent, &Context::new(&parent));
        assert_eq!(report.len(), 1);
    }

    /// Self- and ancestor-cycles must terminate without revisiting.
    struct Node<'n> {
        name: Option<String>,
        next: Cell<Option<&'n Node<'n>>>,
    }

    impl<'n> Node<'n> {
        fn new(name: Option<&str>) -> Self {
            Self {
                name: name.map(str::to_string),
                next: Cell::new(None),
            }
        }
    }

    impl Validatable for Node<'_> {
        fn type_name(&self) -> &'static str {
            "Node"
        }

        fn members(&self) -> Vec<Member<'_>> {
            vec![
                Member::new("name", Value::opt_text(self.name.as_deref()))
                    .with_rules(vec![rules::required()]),
                Member::new(
                    "next",
                    Value::opt_nested(
                        self.next.get().map(|n| -> &dyn Validatable { n }),
                    ),
                )
                .recursive(),
            ]
        }
    }

    #[test]
    fn self_cycle_terminates_with_a_finite_report() {
        let node = Node::new(None);
        node.next.set(Some(&node));
        let report = validate(&node);
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn ancestor_cycle_terminates_and_reports_each_level_once() {
        let first = Node::new(None);
        let second = Node::new(None);
        first.next.set(Some(&second));
        second.next.set(Some(&first));
        let report = validate(&first);
        // One violation for `first.name`, one for `second.name` via descent.
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn sibling_but_not_ancestor_instances_are_revisited() {
        // The same leaf hangs off two members; both edges must be walked.
        struct Fork<'n> {
            left: &'n Node<'n>,
            right: &'n Node<'n>,
        }

        impl Validatable for Fork<'_> {
            fn type_name(&self) -> &'static str {
                "Fork"
            }

            fn members(&self) -> Vec<Member<'_>> {
                vec![
                    Member::new("left", Value::Nested(self.left)).recursive(),
                    Member::new("right", Value::Nested(self.right)).recursive(),
                ]
            }
        }

        let shared = Node::new(None);
        let fork = Fork {
            left: &shared,
            right: &shared,
        };
        let report = validate(&fork);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn repeated_passes_are_idempotent() {
        let parent = Parent {
            label: None,
            child: Some(Child { name: None }),
        };
        assert_eq!(validate(&parent), validate(&parent));
    }
}
