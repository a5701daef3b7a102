//! The validatable capability and per-member metadata.

use crate::descriptor::Descriptor;
use crate::value::Value;

/// Capability marker for types that participate in validation.
///
/// Implementations enumerate their checkable members in declaration order;
/// the engine drives everything else. Usually generated by
/// `#[derive(Validatable)]` from the `fieldcheck-derive` crate, but hand
/// implementations are fully supported and are the escape hatch for dynamic
/// shapes the derive cannot express.
pub trait Validatable {
    /// Short type name used in error messages and cycle tracking.
    fn type_name(&self) -> &'static str;

    /// Members with attached rules or recursive capability, in declaration
    /// order. Members without either are not enumerated.
    fn members(&self) -> Vec<Member<'_>>;
}

/// One checkable member of a validatable type.
#[derive(Debug)]
pub struct Member<'a> {
    /// Member name as declared on the type.
    pub name: &'static str,
    /// Current value, or `None` when the member has no accessible getter.
    pub value: Option<Value<'a>>,
    /// Attached rule descriptors, evaluated in declaration order.
    pub rules: Vec<Descriptor>,
    /// True when the declared type is itself validatable and the engine
    /// should descend into present values.
    pub recursive: bool,
}

impl<'a> Member<'a> {
    /// Create a readable member with no rules attached.
    #[must_use]
    pub const fn new(name: &'static str, value: Value<'a>) -> Self {
        Self {
            name,
            value: Some(value),
            rules: Vec::new(),
            recursive: false,
        }
    }

    /// Create a member whose value cannot be read (no accessible getter).
    #[must_use]
    pub const fn unreadable(name: &'static str) -> Self {
        Self {
            name,
            value: None,
            rules: Vec::new(),
            recursive: false,
        }
    }

    /// Attach rule descriptors.
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Descriptor>) -> Self {
        self.rules = rules;
        self
    }

    /// Mark the member's declared type as itself validatable.
    #[must_use]
    pub const fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }
}

/// Well-known value types excluded from recursive descent.
///
/// The deny list is explicit rather than inferred so that descent depth stays
/// bounded and the engine never walks into framework-internal state. The
/// derive macro enforces the same list at compile time; keep the two in sync.
pub const LEAF_TYPES: &[&str] = &[
    "String",
    "str",
    "bool",
    "char",
    "u8",
    "u16",
    "u32",
    "u64",
    "u128",
    "usize",
    "i8",
    "i16",
    "i32",
    "i64",
    "i128",
    "isize",
    "f32",
    "f64",
    "Duration",
    "Instant",
    "SystemTime",
    "DateTime",
    "NaiveDate",
    "NaiveDateTime",
    "NaiveTime",
    "Uuid",
    "Url",
    "Decimal",
    "PathBuf",
    "Path",
    "IpAddr",
    "Ipv4Addr",
    "Ipv6Addr",
    "SocketAddr",
];

/// Returns true when `type_name` names a well-known leaf type that must not
/// be descended into.
#[must_use]
pub fn is_leaf_type(type_name: &str) -> bool {
    LEAF_TYPES.contains(&type_name)
}
