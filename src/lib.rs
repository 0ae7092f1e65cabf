//! Mortgage repayment calculator core.
//!
//! Field editing, form state transitions, completeness checks and the two
//! repayment formulas. Rendering lives in the binary, which drives the
//! [`Calculator`] store.

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod form;
pub mod format;

pub use calculator::{on_field_change, on_submit, on_type_select, Calculator, FieldUpdate, SubmitOutcome};
pub use engine::{CalculationResult, MortgageType, Repayments};
pub use error::FieldError;
pub use form::{apply, Action, Field, FieldName, FormState};
