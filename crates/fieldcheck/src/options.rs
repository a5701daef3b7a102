//! Marker for validatable configuration settings.

use crate::member::Validatable;

/// Marker trait tagging a settings object that participates in validation.
///
/// Configuration loaders accept `&dyn ValidatableOptions` and validate
/// settings through the ordinary convenience API right after
/// deserialization, before anything consumes them.
pub trait ValidatableOptions: Validatable {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ValidatableExt;
    use crate::member::Member;
    use crate::rules;
    use crate::value::Value;

    struct ServerOptions {
        host: Option<String>,
    }

    impl Validatable for ServerOptions {
        fn type_name(&self) -> &'static str {
            "ServerOptions"
        }

        fn members(&self) -> Vec<Member<'_>> {
            vec![
                Member::new("host", Value::opt_text(self.host.as_deref()))
                    .with_rules(vec![rules::required()]),
            ]
        }
    }

    impl ValidatableOptions for ServerOptions {}

    #[test]
    fn options_validate_like_any_validatable() {
        let options = ServerOptions { host: None };
        assert!(!options.is_valid());
        let options = ServerOptions {
            host: Some("localhost".to_string()),
        };
        assert!(options.is_valid());
    }
}
