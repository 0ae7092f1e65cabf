//! Entry points used by the front end and the store that applies them.

use serde::Serialize;
use tracing::{debug, info};

use crate::engine::{self, CalculationResult, MortgageType};
use crate::error::FieldError;
use crate::form::{apply, Action, FieldName, FormState};
use crate::format::{format_with_commas, parse_decimal, strip_separators};

/// Accepted edit: the value to store and its validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldUpdate {
    pub field: FieldName,
    pub value: String,
    pub invalid: bool,
}

impl FieldUpdate {
    pub fn into_action(self) -> Action {
        Action::update(self.field, self.value, Some(self.invalid))
    }
}

/// Validate and reformat one edit (keystroke or blur).
///
/// Numeric fields reject anything that is not a plain decimal once
/// separators are stripped; an empty value is let through and flagged
/// invalid. No range checks happen here. The type field only takes one of
/// the [`MortgageType`] labels or an empty value.
pub fn on_field_change(field: FieldName, raw: &str) -> Result<FieldUpdate, FieldError> {
    if !field.is_numeric() {
        if !raw.is_empty() && MortgageType::from_label(raw).is_none() {
            debug!(label = raw, "rejected unknown mortgage type");
            return Err(FieldError::UnknownMortgageType {
                label: raw.to_string(),
            });
        }
        return Ok(on_type_select(raw));
    }

    let stripped = strip_separators(raw);
    if !stripped.is_empty() && parse_decimal(&stripped).is_none() {
        debug!(%field, input = raw, "rejected unparseable edit");
        return Err(FieldError::Unparseable {
            input: raw.to_string(),
        });
    }

    Ok(FieldUpdate {
        field,
        value: format_with_commas(&stripped),
        invalid: stripped.is_empty(),
    })
}

/// Selection of a mortgage type label.
pub fn on_type_select(label: &str) -> FieldUpdate {
    FieldUpdate {
        field: FieldName::Type,
        value: label.to_string(),
        invalid: label.is_empty(),
    }
}

/// Outcome of a submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    /// No field was empty.
    pub valid: bool,
    /// One entry per empty field, in form order.
    pub errors: Vec<FieldError>,
    /// `None` when invalid, when the type label is unrecognised, or when the
    /// figures are not finite.
    pub result: Option<CalculationResult>,
}

impl SubmitOutcome {
    /// Actions that flag every empty field as invalid.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.errors
            .iter()
            .filter_map(|err| match err {
                FieldError::Required { field } => Some(*field),
                _ => None,
            })
            .map(|field| Action::update(field, "", Some(true)))
    }
}

/// Completeness gate followed by the calculation.
///
/// Every field is checked; one empty field does not hide another.
pub fn on_submit(state: &FormState) -> SubmitOutcome {
    let errors: Vec<FieldError> = state
        .iter()
        .filter(|(_, field)| field.is_empty())
        .map(|(name, _)| FieldError::Required { field: name })
        .collect();

    if !errors.is_empty() {
        debug!(missing = errors.len(), "submit blocked by required fields");
        return SubmitOutcome {
            valid: false,
            errors,
            result: None,
        };
    }

    SubmitOutcome {
        valid: true,
        errors,
        result: compute(state),
    }
}

fn compute(state: &FormState) -> Option<CalculationResult> {
    let number = |name: FieldName| parse_decimal(&strip_separators(&state.get(name).value));

    let Some(kind) = MortgageType::from_label(&state.mortgage_type.value) else {
        debug!(label = %state.mortgage_type.value, "unrecognised mortgage type, nothing computed");
        return None;
    };
    let principal = number(FieldName::Amount)?;
    let term_years = number(FieldName::Term)?;
    let annual_rate = number(FieldName::Rate)?;

    let result = CalculationResult::from(engine::calculate(kind, principal, annual_rate, term_years)?);
    info!(
        %kind,
        monthly = %result.monthly_payment,
        total = %result.total_repayments,
        "calculated repayments"
    );
    Some(result)
}

/// Owns the form and the latest result; every change goes through [`apply`].
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: FormState,
    result: CalculationResult,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn result(&self) -> &CalculationResult {
        &self.result
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state = apply(std::mem::take(&mut self.state), action);
    }

    /// Decode and dispatch a JSON action message.
    pub fn dispatch_json(&mut self, message: &str) -> serde_json::Result<()> {
        let action = Action::from_json(message)?;
        self.dispatch(action);
        Ok(())
    }

    /// Apply an edit. A rejected edit leaves the stored value untouched.
    pub fn edit(&mut self, field: FieldName, raw: &str) -> Result<(), FieldError> {
        let update = on_field_change(field, raw)?;
        self.dispatch(update.into_action());
        Ok(())
    }

    /// Pick a mortgage type. Picking the current one again does nothing.
    pub fn select_type(&mut self, kind: MortgageType) {
        if self.state.mortgage_type.value == kind.label() {
            return;
        }
        self.dispatch(on_type_select(kind.label()).into_action());
    }

    /// Flag empty fields, or store the new result. The previous result is
    /// kept when nothing could be computed.
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = on_submit(&self.state);
        let actions: Vec<Action> = outcome.actions().collect();
        for action in actions {
            self.dispatch(action);
        }
        if let Some(result) = &outcome.result {
            self.result = result.clone();
        }
        outcome
    }

    /// Blank every field and drop the result.
    pub fn clear(&mut self) {
        self.dispatch(Action::ResetFields);
        self.result = CalculationResult::pending();
    }
}
