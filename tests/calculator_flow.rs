use mortgage_calc::{
    format::{format_with_commas, strip_separators},
    on_submit, CalculationResult, Calculator, Field, FieldError, FieldName, FormState, MortgageType,
};
use pretty_assertions::assert_eq;

fn fill(calc: &mut Calculator, amount: &str, term: &str, rate: &str, kind: MortgageType) {
    calc.edit(FieldName::Amount, amount).unwrap();
    calc.edit(FieldName::Term, term).unwrap();
    calc.edit(FieldName::Rate, rate).unwrap();
    calc.select_type(kind);
}

#[test]
fn repayment_mortgage_end_to_end() {
    let mut calc = Calculator::new();
    fill(&mut calc, "100000", "30", "5.25", MortgageType::Repayment);

    let outcome = calc.submit();
    assert!(outcome.valid);
    assert_eq!(
        calc.result(),
        &CalculationResult {
            monthly_payment: "552.20".into(),
            total_repayments: "198,793.33".into(),
            computed: true,
        }
    );
    assert_eq!(calc.state().amount.value, "100,000");
}

#[test]
fn interest_only_mortgage_end_to_end() {
    let mut calc = Calculator::new();
    fill(&mut calc, "100,000", "30", "5.25", MortgageType::InterestOnly);
    calc.submit();

    assert_eq!(calc.result().monthly_payment, "437.50");
    assert_eq!(calc.result().total_repayments, "257,500.00");
}

#[test]
fn zero_rate_repayment_is_finite() {
    let mut calc = Calculator::new();
    fill(&mut calc, "36000", "3", "0", MortgageType::Repayment);
    calc.submit();

    assert_eq!(calc.result().monthly_payment, "1,000.00");
    assert_eq!(calc.result().total_repayments, "36,000.00");
}

#[test]
fn huge_principal_never_shows_infinity() {
    let mut calc = Calculator::new();
    let amount = format!("1{}", "0".repeat(306));
    fill(&mut calc, &amount, "30", "5", MortgageType::InterestOnly);

    let outcome = calc.submit();
    assert!(outcome.valid);
    let result = calc.result();
    assert!(result.computed);
    assert!(!result.monthly_payment.contains("inf"));
    assert!(!result.total_repayments.contains("inf"));
    assert!(!result.total_repayments.contains("NaN"));
}

#[test]
fn tiny_rate_repayment_still_computes() {
    let mut calc = Calculator::new();
    fill(&mut calc, "100000", "30", "0.0000000000000001", MortgageType::Repayment);

    let outcome = calc.submit();
    assert!(outcome.valid);
    assert_eq!(
        outcome.result,
        Some(CalculationResult {
            monthly_payment: "277.78".into(),
            total_repayments: "100,000.00".into(),
            computed: true,
        })
    );
}

#[test]
fn empty_submit_flags_all_four_fields() {
    let mut calc = Calculator::new();
    let outcome = calc.submit();

    assert!(!outcome.valid);
    assert_eq!(outcome.errors.len(), 4);
    for (_, field) in calc.state().iter() {
        assert_eq!(field, &Field::new("", Some(true)));
    }
    assert!(!calc.result().computed);
}

#[test]
fn one_empty_field_flags_only_that_field() {
    let mut calc = Calculator::new();
    calc.edit(FieldName::Amount, "200000").unwrap();
    calc.edit(FieldName::Term, "25").unwrap();
    calc.select_type(MortgageType::Repayment);

    let outcome = calc.submit();
    assert!(!outcome.valid);
    assert_eq!(outcome.errors, vec![FieldError::Required { field: FieldName::Rate }]);
    assert_eq!(outcome.result, None);

    let state = calc.state();
    assert_eq!(state.rate, Field::new("", Some(true)));
    assert_eq!(state.amount, Field::new("200,000", Some(false)));
    assert_eq!(state.term, Field::new("25", Some(false)));
    assert_eq!(state.mortgage_type, Field::new("Repayment", Some(false)));
    assert!(!calc.result().computed);
}

#[test]
fn failed_submit_keeps_previous_result() {
    let mut calc = Calculator::new();
    fill(&mut calc, "100000", "30", "5.25", MortgageType::Repayment);
    calc.submit();
    let before = calc.result().clone();

    calc.edit(FieldName::Term, "").unwrap();
    calc.submit();
    assert_eq!(calc.result(), &before);

    // A zero-year repayment term has no finite answer either.
    calc.edit(FieldName::Term, "0").unwrap();
    let outcome = calc.submit();
    assert!(outcome.valid);
    assert_eq!(outcome.result, None);
    assert_eq!(calc.result(), &before);
}

#[test]
fn unknown_type_leaves_result_untouched() {
    let mut state = FormState::default();
    for (name, value) in [
        (FieldName::Amount, "100,000"),
        (FieldName::Term, "30"),
        (FieldName::Rate, "5"),
        (FieldName::Type, "Offset"),
    ] {
        state = mortgage_calc::apply(state, mortgage_calc::Action::update(name, value, Some(false)));
    }

    let outcome = on_submit(&state);
    assert!(outcome.valid);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.result, None);
}

#[test]
fn clear_resets_fields_and_result() {
    let mut calc = Calculator::new();
    fill(&mut calc, "100000", "30", "5.25", MortgageType::Repayment);
    calc.submit();
    assert!(calc.result().computed);

    calc.clear();
    assert_eq!(calc.state(), &FormState::default());
    assert_eq!(calc.result(), &CalculationResult::pending());
}

#[test]
fn unparseable_edit_is_rejected() {
    let mut calc = Calculator::new();
    calc.edit(FieldName::Amount, "12").unwrap();

    let err = calc.edit(FieldName::Amount, "12a3").unwrap_err();
    assert_eq!(err, FieldError::Unparseable { input: "12a3".into() });
    assert_eq!(calc.state().amount, Field::new("12", Some(false)));
}

#[test]
fn format_and_strip_are_consistent() {
    for input in ["0", "7", "1000", "1234567.89", "98765.4321", "100000000"] {
        let stripped = strip_separators(input);
        let formatted = format_with_commas(&stripped);
        assert_eq!(strip_separators(&formatted), stripped);
        assert_eq!(format_with_commas(&formatted), formatted);
    }
}

#[test]
fn submit_outcome_serializes() {
    let outcome = on_submit(&FormState::default());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"][0]["kind"], "required");
    assert_eq!(json["errors"][0]["field"], "amount");
    assert_eq!(json["result"], serde_json::Value::Null);
}
