//! Property tests for pass-level invariants.
#![allow(missing_docs)]

use fieldcheck::{is_valid, validate};
use fieldcheck_derive::Validatable;
use proptest::prelude::*;

#[derive(Debug, Validatable)]
struct Form {
    #[check(required)]
    title: Option<String>,
    #[check(one_or_more_digits)]
    code: Option<String>,
    subscribed: bool,
    #[check(required_when(other = "subscribed"))]
    email: Option<String>,
}

fn arb_form() -> impl Strategy<Value = Form> {
    (
        proptest::option::of(".{0,12}"),
        proptest::option::of("[a-z0-9]{0,8}"),
        any::<bool>(),
        proptest::option::of(".{0,12}"),
    )
        .prop_map(|(title, code, subscribed, email)| Form {
            title,
            code,
            subscribed,
            email,
        })
}

proptest! {
    /// `is_valid` and report emptiness must never disagree.
    #[test]
    fn boolean_check_matches_report(form in arb_form()) {
        prop_assert_eq!(is_valid(&form), validate(&form).is_empty());
    }

    /// Two passes over the same unmodified instance yield equal reports,
    /// violation for violation, in the same order.
    #[test]
    fn validation_is_idempotent(form in arb_form()) {
        prop_assert_eq!(validate(&form), validate(&form));
    }
}
