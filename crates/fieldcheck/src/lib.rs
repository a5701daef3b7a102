//! # fieldcheck
//!
//! Declarative object-graph validation. Types describe their own validity
//! constraints through per-member rule descriptors; a generic engine walks
//! the object graph, evaluates every descriptor against the current member
//! value, recurses into validatable members, and aggregates the failures
//! into an ordered [`Report`].
//!
//! Consumers call three entry points and never write per-type validation
//! code:
//!
//! - [`is_valid`] — boolean check (fail-fast underneath)
//! - [`validate`] — full collect-all report
//! - [`ensure_valid`] — single aggregated error when invalid
//!
//! The member registry is usually generated with `#[derive(Validatable)]`
//! from the `fieldcheck-derive` crate; hand implementations of
//! [`Validatable`] are the escape hatch for dynamic shapes.
//!
//! ## Known gap
//!
//! Sequence-typed members are never validated element-by-element; the derive
//! rejects `nested` on collections and the engine does not descend into
//! them. Element-wise validation is an explicit extension point.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod api;
pub mod context;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod member;
pub mod options;
pub mod report;
pub mod required_when;
pub mod rules;
pub mod value;

pub use api::{
    ValidatableExt, ensure_valid, ensure_valid_opt, is_valid, is_valid_opt, validate, validate_opt,
};
pub use context::Context;
pub use descriptor::{Descriptor, Verdict, format_template};
pub use engine::{Engine, Mode};
pub use error::CheckError;
pub use member::{LEAF_TYPES, Member, Validatable, is_leaf_type};
pub use options::ValidatableOptions;
pub use report::{Report, Violation, ViolationKind};
pub use required_when::RequiredWhen;
pub use value::Value;

/// Returns the crate version.
#[must_use]
pub const fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
