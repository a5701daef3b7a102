//! Runtime view of a member's current value.

use crate::member::Validatable;
use std::fmt;

/// Snapshot of one member's value as seen by rule descriptors.
///
/// Inspectors map `Option<T>` fields to [`Value::Absent`] when unset, so a
/// rule never has to distinguish "optional and missing" from "null".
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// The member is unset (`Option::None`).
    Absent,
    /// Text-like value (`String`, `Box<str>`, `&str`).
    Text(&'a str),
    /// Boolean value.
    Bool(bool),
    /// Signed integer value, widened to `i64`.
    Int(i64),
    /// Unsigned integer value, widened to `u64`.
    Uint(u64),
    /// Floating-point value, widened to `f64`.
    Float(f64),
    /// List of text values (`Vec<String>`).
    TextList(&'a [String]),
    /// A nested instance that itself participates in validation.
    Nested(&'a dyn Validatable),
    /// A value the inspector cannot expose to rules; carries the type name.
    Unsupported(&'static str),
}

impl<'a> Value<'a> {
    /// Map an optional text value, treating `None` as [`Value::Absent`].
    #[must_use]
    pub fn opt_text(value: Option<&'a str>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }

    /// Map an optional nested instance, treating `None` as [`Value::Absent`].
    #[must_use]
    pub fn opt_nested(value: Option<&'a dyn Validatable>) -> Self {
        value.map_or(Self::Absent, Self::Nested)
    }

    /// Map an optional boolean, treating `None` as [`Value::Absent`].
    #[must_use]
    pub fn opt_bool(value: Option<bool>) -> Self {
        value.map_or(Self::Absent, Self::Bool)
    }

    /// Returns true unless the value is [`Value::Absent`].
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Borrow the text content, if this is a text value.
    #[must_use]
    pub const fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(*text),
            _ => None,
        }
    }

    /// Return the boolean content, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Short label for diagnostics and configuration-error messages.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Text(_) => "text",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Uint(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::TextList(_) => "text list",
            Self::Nested(_) => "nested instance",
            Self::Unsupported(_) => "unsupported",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => formatter.write_str("Absent"),
            Self::Text(text) => formatter.debug_tuple("Text").field(text).finish(),
            Self::Bool(flag) => formatter.debug_tuple("Bool").field(flag).finish(),
            Self::Int(value) => formatter.debug_tuple("Int").field(value).finish(),
            Self::Uint(value) => formatter.debug_tuple("Uint").field(value).finish(),
            Self::Float(value) => formatter.debug_tuple("Float").field(value).finish(),
            Self::TextList(list) => formatter.debug_tuple("TextList").field(list).finish(),
            Self::Nested(instance) => formatter
                .debug_tuple("Nested")
                .field(&instance.type_name())
                .finish(),
            Self::Unsupported(name) => {
                formatter.debug_tuple("Unsupported").field(name).finish()
            },
        }
    }
}
