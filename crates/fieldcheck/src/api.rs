//! Convenience entry points layered over the engine.

use crate::context::Context;
use crate::engine::{Engine, Mode};
use crate::error::CheckError;
use crate::member::Validatable;
use crate::report::Report;

/// True iff a validation pass records no violation.
///
/// Runs the engine in fail-fast mode: the boolean answer does not need the
/// full report.
#[must_use]
pub fn is_valid(instance: &dyn Validatable) -> bool {
    Engine::with_mode(Mode::FailFast)
        .run(instance, &Context::new(instance))
        .is_empty()
}

/// Run a collect-all validation pass and return the report unfiltered.
#[must_use]
pub fn validate(instance: &dyn Validatable) -> Report {
    Engine::new().run(instance, &Context::new(instance))
}

/// Run a validation pass and convert a non-empty report into a single
/// aggregated [`CheckError::Invalid`], never one error per violation.
pub fn ensure_valid(instance: &dyn Validatable) -> Result<(), CheckError> {
    let report = validate(instance);
    if report.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Invalid {
            type_name: instance.type_name(),
            messages: report.combined_messages(),
            members: report.combined_members(),
        })
    }
}

/// [`is_valid`] for callers holding an optional instance; absence is an
/// [`CheckError::InvalidArgument`], surfaced immediately.
pub fn is_valid_opt(instance: Option<&dyn Validatable>) -> Result<bool, CheckError> {
    instance.map(is_valid).ok_or(CheckError::InvalidArgument)
}

/// [`validate`] for callers holding an optional instance.
pub fn validate_opt(instance: Option<&dyn Validatable>) -> Result<Report, CheckError> {
    instance.map(validate).ok_or(CheckError::InvalidArgument)
}

/// [`ensure_valid`] for callers holding an optional instance.
pub fn ensure_valid_opt(instance: Option<&dyn Validatable>) -> Result<(), CheckError> {
    instance.map_or(Err(CheckError::InvalidArgument), ensure_valid)
}

/// Method-call sugar over the free functions.
pub trait ValidatableExt: Validatable + Sized {
    /// True iff no violation is found; fail-fast underneath.
    fn is_valid(&self) -> bool {
        is_valid(self)
    }

    /// Full collect-all report.
    fn validation_report(&self) -> Report {
        validate(self)
    }

    /// Error with every violation's message and member names when invalid.
    fn ensure_valid(&self) -> Result<(), CheckError> {
        ensure_valid(self)
    }
}

impl<T: Validatable> ValidatableExt for T {}
