//! Traversal state threaded through one validation pass.

use crate::member::Validatable;

/// Context for one point in a validation pass: the root instance, the
/// instance currently being inspected, and the member path walked to reach
/// it.
///
/// Contexts are derived, never mutated: each recursive descent builds a new
/// context whose path is the parent's path with the member name appended, so
/// a single pass forms a tree of contexts mirroring the validated subgraph.
#[derive(Clone)]
pub struct Context<'a> {
    root: &'a dyn Validatable,
    current: &'a dyn Validatable,
    path: Vec<&'static str>,
}

impl<'a> Context<'a> {
    /// Root context for an outer validation call: current = root, empty path.
    #[must_use]
    pub fn new(root: &'a dyn Validatable) -> Self {
        Self {
            root,
            current: root,
            path: Vec::new(),
        }
    }

    /// Derive the context for descending into `child` through `member`.
    #[must_use]
    pub fn descend(&self, member: &'static str, child: &'a dyn Validatable) -> Self {
        let mut path = self.path.clone();
        path.push(member);
        Self {
            root: self.root,
            current: child,
            path,
        }
    }

    /// The instance the outer validation call was made on.
    #[must_use]
    pub fn root(&self) -> &'a dyn Validatable {
        self.root
    }

    /// The instance currently being inspected; cross-field rules resolve
    /// sibling members against this.
    #[must_use]
    pub fn current(&self) -> &'a dyn Validatable {
        self.current
    }

    /// Member names walked from the root to the current instance.
    #[must_use]
    pub fn path(&self) -> &[&'static str] {
        &self.path
    }

    /// Dotted rendering of the member path, empty at the root.
    #[must_use]
    pub fn path_display(&self) -> String {
        self.path.join(".")
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Context")
            .field("root", &self.root.type_name())
            .field("current", &self.current.type_name())
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Member;

    struct Probe;

    impl Validatable for Probe {
        fn type_name(&self) -> &'static str {
            "Probe"
        }

        fn members(&self) -> Vec<Member<'_>> {
            Vec::new()
        }
    }

    #[test]
    fn root_context_has_empty_path() {
        let probe = Probe;
        let context = Context::new(&probe);
        assert!(context.path().is_empty());
        assert_eq!(context.path_display(), "");
    }

    #[test]
    fn descend_appends_without_touching_parent() {
        let outer = Probe;
        let inner = Probe;
        let root = Context::new(&outer);
        let child = root.descend("child", &inner);
        let grandchild = child.descend("leaf", &inner);

        assert_eq!(root.path_display(), "");
        assert_eq!(child.path_display(), "child");
        assert_eq!(grandchild.path_display(), "child.leaf");
        assert_eq!(child.current().type_name(), "Probe");
    }
}
