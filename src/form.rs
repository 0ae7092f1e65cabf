//! Form state and the reducer that transitions it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Amount,
    Term,
    Rate,
    Type,
}

impl FieldName {
    /// Form order.
    pub const ALL: [FieldName; 4] = [
        FieldName::Amount,
        FieldName::Term,
        FieldName::Rate,
        FieldName::Type,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldName::Amount => "Mortgage Amount",
            FieldName::Term => "Mortgage Term",
            FieldName::Rate => "Interest Rate",
            FieldName::Type => "Mortgage Type",
        }
    }

    /// Whether edits go through the numeric parse-and-format path.
    pub fn is_numeric(self) -> bool {
        !matches!(self, FieldName::Type)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw text of one input plus its validity.
///
/// `invalid` is `None` until the field has been validated once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub value: String,
    pub invalid: Option<bool>,
}

impl Field {
    pub fn new(value: impl Into<String>, invalid: Option<bool>) -> Self {
        Self {
            value: value.into(),
            invalid,
        }
    }

    /// True only when the last validation failed.
    pub fn is_invalid(&self) -> bool {
        self.invalid == Some(true)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// All four fields, always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub amount: Field,
    pub term: Field,
    pub rate: Field,
    #[serde(rename = "type")]
    pub mortgage_type: Field,
}

impl FormState {
    pub fn get(&self, name: FieldName) -> &Field {
        match name {
            FieldName::Amount => &self.amount,
            FieldName::Term => &self.term,
            FieldName::Rate => &self.rate,
            FieldName::Type => &self.mortgage_type,
        }
    }

    fn slot(&mut self, name: FieldName) -> &mut Field {
        match name {
            FieldName::Amount => &mut self.amount,
            FieldName::Term => &mut self.term,
            FieldName::Rate => &mut self.rate,
            FieldName::Type => &mut self.mortgage_type,
        }
    }

    /// Fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &Field)> {
        FieldName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}

/// State transitions understood by [`apply`].
///
/// Decodes from messages tagged by `"type"`; unknown tags become
/// [`Action::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    UpdateField {
        field: FieldName,
        value: String,
        invalid: Option<bool>,
    },
    ResetFields,
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn update(field: FieldName, value: impl Into<String>, invalid: Option<bool>) -> Self {
        Action::UpdateField {
            field,
            value: value.into(),
            invalid,
        }
    }

    pub fn from_json(message: &str) -> serde_json::Result<Self> {
        serde_json::from_str(message)
    }
}

/// Pure transition function. Never fails; unknown actions return `state`.
pub fn apply(state: FormState, action: Action) -> FormState {
    match action {
        Action::UpdateField {
            field,
            value,
            invalid,
        } => {
            let mut next = state;
            *next.slot(field) = Field { value, invalid };
            next
        }
        Action::ResetFields => FormState::default(),
        Action::Unknown => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> FormState {
        FormState {
            amount: Field::new("100,000", Some(false)),
            term: Field::new("30", Some(false)),
            rate: Field::new("5.25", Some(false)),
            mortgage_type: Field::new("Repayment", Some(false)),
        }
    }

    #[test]
    fn test_initial_state_is_blank() {
        let state = FormState::default();
        for (_, field) in state.iter() {
            assert_eq!(field, &Field::default());
            assert_eq!(field.invalid, None);
        }
        assert_eq!(state.iter().count(), 4);
    }

    #[test]
    fn test_update_field_touches_only_named_field() {
        let before = filled();
        let after = apply(before.clone(), Action::update(FieldName::Term, "", Some(true)));

        assert_eq!(after.term, Field::new("", Some(true)));
        assert_eq!(after.amount, before.amount);
        assert_eq!(after.rate, before.rate);
        assert_eq!(after.mortgage_type, before.mortgage_type);
    }

    #[test]
    fn test_reset_fields_returns_initial_state() {
        assert_eq!(apply(filled(), Action::ResetFields), FormState::default());
    }

    #[test]
    fn test_unknown_action_is_noop() {
        assert_eq!(apply(filled(), Action::Unknown), filled());
    }

    #[test]
    fn test_action_from_json() {
        let action = Action::from_json(
            r#"{"type":"UPDATE_FIELD","field":"rate","value":"4.5","invalid":false}"#,
        )
        .unwrap();
        assert_eq!(action, Action::update(FieldName::Rate, "4.5", Some(false)));

        let reset = Action::from_json(r#"{"type":"RESET_FIELDS"}"#).unwrap();
        assert_eq!(reset, Action::ResetFields);

        let other = Action::from_json(r#"{"type":"TOGGLE_THEME"}"#).unwrap();
        assert_eq!(other, Action::Unknown);
    }

    #[test]
    fn test_unset_invalid_round_trips_as_null() {
        let json = serde_json::to_value(FormState::default()).unwrap();
        assert_eq!(json["type"]["invalid"], serde_json::Value::Null);
        assert_eq!(json["amount"]["value"], "");
    }
}
