//! Error surface of the convenience API.

use thiserror::Error;

/// Errors surfaced by the convenience entry points.
///
/// Individual rule failures are never errors while a pass is in progress;
/// only [`crate::api::ensure_valid`] converts the aggregate report into an
/// error, and only as a single value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// An instance (or context) was absent where one is required.
    #[error("an instance to validate must be supplied")]
    InvalidArgument,

    /// The instance failed validation; carries the combined messages and
    /// member names of every violation.
    #[error("The '{type_name}' instance is invalid! Errors: {messages} Members: {members}")]
    Invalid {
        /// Short name of the validated type.
        type_name: &'static str,
        /// Comma-joined violation messages.
        messages: String,
        /// Comma-joined implicated member names.
        members: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_error_message_names_type_and_members() {
        let error = CheckError::Invalid {
            type_name: "Profile",
            messages: "'name' is required.".to_string(),
            members: "name".to_string(),
        };
        let rendered = error.to_string();
        assert!(rendered.contains("Profile"));
        assert!(rendered.contains("'name' is required."));
        assert!(rendered.contains("Members: name"));
    }
}
