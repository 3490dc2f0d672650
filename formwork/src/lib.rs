//! Form validation engine.
//!
//! `formwork` tracks the values, errors and touched status of a form and
//! validates fields against a catalog of named rules, inline predicates, or
//! ordered sequences of both. It is UI-agnostic: feed it change and blur
//! events, read back values and the errors that may be shown.
//!
//! Errors stay hidden until a field is touched. After that, every change
//! re-validates the field so errors clear (or appear) as the user types.
//! [`FormController::validate_all`] checks every field regardless of touched
//! status and is the gate to call before submitting.
//!
//! # Example
//!
//! ```
//! use formwork::{ChangeEvent, FormController, RuleArg, RuleSet, RuleSpec, Values};
//!
//! let rules = RuleSet::new()
//!     .field("email", "email")
//!     .field("password", RuleSpec::with_args("password", [8]))
//!     .field(
//!         "confirm",
//!         RuleSpec::with_args("confirmPassword", [RuleArg::field("password")]),
//!     )
//!     .field("terms", "checkbox");
//!
//! let mut form = FormController::new(Values::new());
//!
//! form.on_change(ChangeEvent::text("email", "ada@example.com"), &rules);
//! form.on_change(ChangeEvent::text("password", "abc"), &rules);
//! form.blur("password", &rules);
//! assert_eq!(
//!     form.visible_error("password"),
//!     Some("Password must be at least 8 characters long")
//! );
//!
//! form.on_change(ChangeEvent::text("password", "correct horse"), &rules);
//! form.on_change(ChangeEvent::text("confirm", "correct horse"), &rules);
//! form.on_change(ChangeEvent::checkbox("terms", true), &rules);
//!
//! assert!(form.validate_all(&rules));
//! ```
//!
//! # Misconfiguration
//!
//! A rule name missing from the catalog, or a named rule bound with bad
//! arguments, never blocks a form. The rule is treated as passing and the
//! problem is logged under the `formwork::misconfig` target. Call
//! [`RuleSet::lint`] at startup to catch these early.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod resolver;
pub mod result;
pub mod rule_set;
pub mod rules;
pub mod state;
pub mod value;

pub use catalog::{RuleCatalog, RuleFn};
pub use config::FormConfig;
pub use controller::FormController;
pub use error::{ConfigError, RuleError};
pub use event::{BlurEvent, ChangeEvent, FieldKind};
pub use resolver::Resolver;
pub use result::{FieldError, Submission, ValidationResult};
pub use rule_set::{CustomRule, RuleArg, RuleSet, RuleSpec};
pub use state::{Errors, FormState, Values};
pub use value::FieldValue;

pub mod prelude {
    pub use crate::config::FormConfig;
    pub use crate::controller::FormController;
    pub use crate::event::{BlurEvent, ChangeEvent, FieldKind};
    pub use crate::result::{Submission, ValidationResult};
    pub use crate::rule_set::{RuleArg, RuleSet, RuleSpec};
    pub use crate::state::Values;
    pub use crate::value::FieldValue;
    pub use crate::{RuleCatalog, rules};
}
